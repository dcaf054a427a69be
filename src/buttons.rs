// The button strip along the top of the frame: fixed layout plus hit-testing.
// Drawing the strip lives in render.rs.

use crate::palette::{Action, PaletteColor};
use crate::types::{BLACK, Point, WHITE};

/// Top edge shared by every button.
pub const BUTTON_TOP: i32 = 1;
/// Bottom edge shared by every button. Anything with `y < STRIP_BOTTOM` is UI, never canvas.
pub const STRIP_BOTTOM: i32 = 65;

pub const CLEAR_FILL: u32 = 0x00_C8_C8_C8;

/// One hit-region. `left..=right` is inclusive on both ends.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ButtonSpec {
    pub left: i32,
    pub right: i32,
    pub label: &'static str,
    pub fill: u32,
    pub label_color: u32,
    pub action: Action,
}

impl ButtonSpec {
    const fn select(left: i32, right: i32, color: PaletteColor) -> Self {
        Self {
            left,
            right,
            label: color.label(),
            fill: color.rgb(),
            label_color: WHITE,
            action: Action::Select(color),
        }
    }

    pub const fn top_left(&self) -> Point {
        Point::new(self.left, BUTTON_TOP)
    }

    pub const fn bottom_right(&self) -> Point {
        Point::new(self.right, STRIP_BOTTOM)
    }

    pub const fn contains_x(&self, x: i32) -> bool {
        self.left <= x && x <= self.right
    }
}

/// Left to right, non-overlapping.
pub const BUTTONS: [ButtonSpec; 5] = [
    ButtonSpec {
        left: 40,
        right: 140,
        label: "CLEAR",
        fill: CLEAR_FILL,
        label_color: BLACK,
        action: Action::Clear,
    },
    ButtonSpec::select(160, 255, PaletteColor::Blue),
    ButtonSpec::select(275, 370, PaletteColor::Green),
    ButtonSpec::select(390, 485, PaletteColor::Red),
    ButtonSpec::select(505, 600, PaletteColor::Yellow),
];

/// True if the point is in the reserved top strip.
pub fn in_strip(p: Point) -> bool {
    p.y < STRIP_BOTTOM
}

/// Which button (if any) sits under `p`.
/// `None` both below the strip and in the gaps between buttons.
pub fn hit_test(p: Point) -> Option<Action> {
    if !in_strip(p) {
        return None;
    }
    BUTTONS.iter().find(|b| b.contains_x(p.x)).map(|b| b.action)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clear_region_edges() {
        assert_eq!(hit_test(Point::new(140, 64)), Some(Action::Clear));
        assert_eq!(hit_test(Point::new(40, 10)), Some(Action::Clear));
        assert_eq!(hit_test(Point::new(39, 10)), None);
    }

    #[test]
    fn strip_bottom_is_exclusive() {
        assert_eq!(hit_test(Point::new(140, 65)), None);
        for b in &BUTTONS {
            assert_eq!(hit_test(Point::new(b.left, 65)), None);
        }
    }

    #[test]
    fn gaps_hit_nothing() {
        assert_eq!(hit_test(Point::new(141, 30)), None);
        assert_eq!(hit_test(Point::new(265, 30)), None);
        assert_eq!(hit_test(Point::new(620, 30)), None);
    }

    #[test]
    fn color_buttons() {
        assert_eq!(hit_test(Point::new(160, 30)), Some(Action::Select(PaletteColor::Blue)));
        assert_eq!(hit_test(Point::new(370, 0)), Some(Action::Select(PaletteColor::Green)));
        assert_eq!(hit_test(Point::new(400, 64)), Some(Action::Select(PaletteColor::Red)));
        assert_eq!(hit_test(Point::new(600, 5)), Some(Action::Select(PaletteColor::Yellow)));
    }

    #[test]
    fn layout_is_ordered_and_disjoint() {
        for pair in BUTTONS.windows(2) {
            assert!(pair[0].right < pair[1].left);
        }
        assert_eq!(BUTTONS[0].label_color, BLACK);
        assert!(BUTTONS[1..].iter().all(|b| b.label_color == WHITE));
    }
}
