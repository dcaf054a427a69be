// Replays the session onto a surface each frame.
// Live overlay: camera + skeleton + cursor + buttons (with highlight) + strokes + HUD.
// Paint canvas: buttons (never highlighted) + strokes, on top of whatever it already shows.

use crate::buttons::BUTTONS;
use crate::draw::{GLYPH_HEIGHT, Surface};
use crate::hand::{HAND_CONNECTIONS, landmarks};
use crate::palette::{Action, PaletteColor};
use crate::session::Session;
use crate::strokes::StrokeStore;
use crate::types::{BLACK, Point, WHITE};

pub const STROKE_WIDTH: i32 = 4;
pub const LABEL_SCALE: i32 = 2;
/// Label baseline, shared by every button.
pub const LABEL_BASELINE: i32 = 40;

const CURSOR_RADIUS: i32 = 12;
const CURSOR_RING_RADIUS: i32 = 14;
const SKELETON_COLOR: u32 = WHITE;
const LANDMARK_COLOR: u32 = 0x00_FF_00_00;

/// The five buttons. Border is 3px on the highlighted one, 2px elsewhere.
pub fn render_buttons<S: Surface>(surface: &mut S, highlight: Option<Action>) {
    for b in &BUTTONS {
        surface.fill_rect(b.top_left(), b.bottom_right(), b.fill);
        let thickness = if highlight == Some(b.action) { 3 } else { 2 };
        surface.stroke_rect(b.top_left(), b.bottom_right(), BLACK, thickness);
        let origin = Point::new(b.left + 10, LABEL_BASELINE - GLYPH_HEIGHT * LABEL_SCALE);
        surface.text(origin, b.label, LABEL_SCALE, b.label_color);
    }
}

/// Every stroke segment, 4px wide, in its colour.
pub fn render_strokes<S: Surface>(surface: &mut S, strokes: &StrokeStore) {
    strokes.for_each_segment(|color, a, b| surface.line(a, b, color.rgb(), STROKE_WIDTH));
}

/// Filled dot in the active colour with a black ring around it.
pub fn render_cursor<S: Surface>(surface: &mut S, at: Point, color: PaletteColor) {
    surface.fill_circle(at, CURSOR_RADIUS, color.rgb());
    surface.stroke_circle(at, CURSOR_RING_RADIUS, BLACK, 2);
}

/// Bones as white lines, joints as red dots.
pub fn render_skeleton<S: Surface>(surface: &mut S, points: &[Point; landmarks::COUNT]) {
    for &(a, b) in &HAND_CONNECTIONS {
        surface.line(points[a], points[b], SKELETON_COLOR, 2);
    }
    for &p in points {
        surface.fill_circle(p, 2, LANDMARK_COLOR);
    }
}

/// Status text in the bottom-left corner.
pub fn render_hud<S: Surface>(surface: &mut S, frame_height: usize, text: &str) {
    let y = frame_height as i32 - GLYPH_HEIGHT - 8;
    surface.text(Point::new(8, y), text, 1, WHITE);
}

/// What the live window shows for one frame, drawn over the camera image.
pub struct Overlay<'a> {
    /// Landmark pixels when a hand was found this frame.
    pub hand: Option<&'a [Point; landmarks::COUNT]>,
    pub highlight: Option<Action>,
    pub hud: &'a str,
}

pub fn render_overlay<S: Surface>(surface: &mut S, session: &Session, overlay: &Overlay<'_>) {
    if let Some(points) = overlay.hand {
        render_skeleton(surface, points);
        render_cursor(surface, points[landmarks::INDEX_FINGER_TIP], session.active_color());
    }
    render_buttons(surface, overlay.highlight);
    render_strokes(surface, &session.strokes);
    let (_, h) = session.frame_size();
    render_hud(surface, h, overlay.hud);
}

/// Repaint the persistent canvas. It is never cleared here, only drawn over.
pub fn render_canvas(session: &mut Session) {
    let (canvas, strokes) = session.canvas_and_strokes();
    render_buttons(canvas, None);
    render_strokes(canvas, strokes);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FrameBuffer;

    /// Records every primitive call instead of drawing.
    #[derive(Default)]
    struct Recorder {
        calls: Vec<Call>,
    }

    #[derive(Debug, PartialEq)]
    enum Call {
        Fill(u32),
        FillRect(Point, Point, u32),
        StrokeRect(Point, Point, u32, i32),
        Line(Point, Point, u32, i32),
        FillCircle(Point, i32, u32),
        StrokeCircle(Point, i32, u32, i32),
        Text(Point, String, u32),
    }

    impl Surface for Recorder {
        fn fill(&mut self, color: u32) {
            self.calls.push(Call::Fill(color));
        }
        fn fill_rect(&mut self, tl: Point, br: Point, color: u32) {
            self.calls.push(Call::FillRect(tl, br, color));
        }
        fn stroke_rect(&mut self, tl: Point, br: Point, color: u32, thickness: i32) {
            self.calls.push(Call::StrokeRect(tl, br, color, thickness));
        }
        fn line(&mut self, from: Point, to: Point, color: u32, thickness: i32) {
            self.calls.push(Call::Line(from, to, color, thickness));
        }
        fn fill_circle(&mut self, center: Point, radius: i32, color: u32) {
            self.calls.push(Call::FillCircle(center, radius, color));
        }
        fn stroke_circle(&mut self, center: Point, radius: i32, color: u32, thickness: i32) {
            self.calls.push(Call::StrokeCircle(center, radius, color, thickness));
        }
        fn text(&mut self, origin: Point, text: &str, _scale: i32, color: u32) {
            self.calls.push(Call::Text(origin, text.to_owned(), color));
        }
    }

    fn borders(rec: &Recorder) -> Vec<i32> {
        rec.calls
            .iter()
            .filter_map(|c| match c {
                Call::StrokeRect(_, _, _, t) => Some(*t),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn highlight_thickens_one_border() {
        let mut rec = Recorder::default();
        render_buttons(&mut rec, Some(Action::Select(PaletteColor::Red)));
        assert_eq!(borders(&rec), vec![2, 2, 2, 3, 2]);

        let mut rec = Recorder::default();
        render_buttons(&mut rec, None);
        assert_eq!(borders(&rec), vec![2; 5]);
    }

    #[test]
    fn labels_black_on_clear_white_elsewhere() {
        let mut rec = Recorder::default();
        render_buttons(&mut rec, None);
        let labels: Vec<_> = rec
            .calls
            .iter()
            .filter_map(|c| match c {
                Call::Text(p, s, color) => Some((p.x, s.as_str(), *color)),
                _ => None,
            })
            .collect();
        assert_eq!(
            labels,
            vec![
                (50, "CLEAR", BLACK),
                (170, "BLUE", WHITE),
                (285, "GREEN", WHITE),
                (400, "RED", WHITE),
                (515, "YELLOW", WHITE),
            ]
        );
        assert!(rec.calls.contains(&Call::FillRect(Point::new(40, 1), Point::new(140, 65), 0x00C8C8C8)));
    }

    #[test]
    fn strokes_become_4px_lines_in_their_color() {
        let mut session = Session::new(640, 480);
        for p in [(300, 200), (310, 205), (320, 210)] {
            session.strokes.append_point(PaletteColor::Green, p.into());
        }
        let mut rec = Recorder::default();
        render_strokes(&mut rec, &session.strokes);
        assert_eq!(
            rec.calls,
            vec![
                Call::Line(Point::new(320, 210), Point::new(310, 205), 0x0000FF00, 4),
                Call::Line(Point::new(310, 205), Point::new(300, 200), 0x0000FF00, 4),
            ]
        );
    }

    #[test]
    fn overlay_without_hand_has_no_cursor() {
        let session = Session::new(640, 480);
        let mut rec = Recorder::default();
        render_overlay(&mut rec, &session, &Overlay { hand: None, highlight: None, hud: "FPS: 30.0" });
        assert!(!rec.calls.iter().any(|c| matches!(c, Call::FillCircle(..) | Call::StrokeCircle(..))));
        assert!(rec.calls.contains(&Call::Text(Point::new(8, 465), "FPS: 30.0".into(), WHITE)));
    }

    #[test]
    fn overlay_with_hand_draws_skeleton_then_cursor() {
        let mut session = Session::new(640, 480);
        session.select_color(PaletteColor::Yellow);
        let mut points = [Point::new(100, 100); landmarks::COUNT];
        points[landmarks::INDEX_FINGER_TIP] = Point::new(320, 240);

        let mut rec = Recorder::default();
        render_overlay(&mut rec, &session, &Overlay { hand: Some(&points), highlight: None, hud: "" });

        let bones = rec.calls.iter().filter(|c| matches!(c, Call::Line(_, _, WHITE, 2))).count();
        assert_eq!(bones, HAND_CONNECTIONS.len());
        assert!(rec.calls.contains(&Call::FillCircle(Point::new(320, 240), 12, 0x00FFFF00)));
        assert!(rec.calls.contains(&Call::StrokeCircle(Point::new(320, 240), 14, BLACK, 2)));
        // buttons come after the hand
        let cursor = rec.calls.iter().position(|c| matches!(c, Call::StrokeCircle(..)));
        let first_button = rec.calls.iter().position(|c| matches!(c, Call::FillRect(..)));
        assert!(cursor < first_button);
        assert!(!rec.calls.iter().any(|c| matches!(c, Call::Fill(_))));
    }

    #[test]
    fn canvas_keeps_old_ink_and_gets_new_strokes() {
        let mut session = Session::new(640, 480);
        session.strokes.append_point(PaletteColor::Red, Point::new(100, 300));
        session.strokes.append_point(PaletteColor::Red, Point::new(200, 300));
        render_canvas(&mut session);
        assert_eq!(session.canvas().get(150, 300), Some(PaletteColor::Red.rgb()));

        // the strokes are gone from the store, but the pixels stay until a clear
        session.strokes.clear_all();
        render_canvas(&mut session);
        assert_eq!(session.canvas().get(150, 300), Some(PaletteColor::Red.rgb()));

        session.clear();
        render_canvas(&mut session);
        assert_eq!(session.canvas().get(150, 300), Some(WHITE));
        // buttons are painted back after the wipe
        assert_eq!(session.canvas().get(90, 5), Some(0x00C8C8C8));
    }

    #[test]
    fn highlight_never_reaches_the_canvas() {
        let mut session = Session::new(640, 480);
        let mut rec = Recorder::default();
        render_overlay(&mut rec, &session, &Overlay { hand: None, highlight: Some(Action::Clear), hud: "" });
        assert_eq!(borders(&rec), vec![3, 2, 2, 2, 2]);

        render_canvas(&mut session);
        let canvas = session.canvas();
        // a 2px border covers x = 39..=40; a 3px one would reach x = 41
        assert_eq!(canvas.get(40, 30), Some(BLACK));
        assert_eq!(canvas.get(41, 30), Some(0x00C8C8C8));
        assert_eq!(canvas.get(160, 30), Some(BLACK));
        assert_eq!(canvas.get(161, 30), Some(PaletteColor::Blue.rgb()));
    }

    #[test]
    fn overlay_on_a_real_frame() {
        let mut session = Session::new(640, 480);
        session.strokes.append_point(PaletteColor::Blue, Point::new(100, 300));
        session.strokes.append_point(PaletteColor::Blue, Point::new(200, 300));
        let mut frame = FrameBuffer::filled(640, 480, 0x00_20_20_20);
        render_overlay(&mut frame, &session, &Overlay { hand: None, highlight: Some(Action::Clear), hud: "PAUSED" });
        assert_eq!(frame.get(150, 300), Some(PaletteColor::Blue.rgb()));
        assert_eq!(frame.get(240, 10), Some(PaletteColor::Blue.rgb()));
        // the highlighted border reaches one pixel further in
        assert_eq!(frame.get(41, 30), Some(BLACK));
        assert_eq!(frame.get(161, 30), Some(PaletteColor::Blue.rgb()));
    }
}
