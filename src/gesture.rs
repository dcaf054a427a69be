// Per-frame gesture interpretation.
//
// Each frame the tracker yields zero or one hand. The interpreter decides what that hand
// means, in this order:
//
// 1. no hand: pen up on every colour
// 2. index tip and thumb tip closer than the pinch threshold: pen up on every colour
// 3. index tip in the button strip: press whatever button is under it (maybe none)
// 4. otherwise: draw at the index tip in the active colour
//
// Pinch beats the strip so a hand drifting into the strip can back out without pressing
// anything; the strip beats drawing because it is never part of the canvas.

use serde::Deserialize;

use crate::buttons;
use crate::geometry::{clamp_to_frame, distance, in_frame};
use crate::palette::{Action, PaletteColor};
use crate::session::Session;
use crate::types::Point;

pub const DEFAULT_PINCH_THRESHOLD: f64 = 40.0;

/// The two landmarks the core cares about, in frame pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct HandPose {
    pub fingertip: Point,
    pub thumb_tip: Point,
}

/// What to do with a fingertip that lands outside the frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutOfFrame {
    /// Snap it onto the nearest edge pixel.
    #[default]
    Clamp,
    /// Treat the frame as if no hand was seen.
    Reject,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Gesture {
    NoHand,
    OutOfFrame,
    Pinch,
    Press(Action),
    /// Fingertip is in the strip but between buttons.
    Hover,
    Draw(Point),
}

impl Gesture {
    /// Button to highlight on the live overlay this frame.
    pub fn highlight(self) -> Option<Action> {
        match self {
            Gesture::Press(action) => Some(action),
            _ => None,
        }
    }
}

pub struct GestureInterpreter {
    pinch_threshold: f64,
    out_of_frame: OutOfFrame,
}

impl GestureInterpreter {
    pub fn new(pinch_threshold: f64, out_of_frame: OutOfFrame) -> Self {
        Self { pinch_threshold, out_of_frame }
    }

    /// Decide what the hand means without touching any state.
    pub fn classify(&self, hand: Option<HandPose>, frame_size: (usize, usize)) -> Gesture {
        let Some(hand) = hand else {
            return Gesture::NoHand;
        };

        let (w, h) = frame_size;
        let tip = match self.out_of_frame {
            OutOfFrame::Clamp => clamp_to_frame(hand.fingertip, w, h),
            OutOfFrame::Reject if in_frame(hand.fingertip, w, h) => hand.fingertip,
            OutOfFrame::Reject => return Gesture::OutOfFrame,
        };

        if distance(tip, hand.thumb_tip) < self.pinch_threshold {
            return Gesture::Pinch;
        }

        if buttons::in_strip(tip) {
            return match buttons::hit_test(tip) {
                Some(action) => Gesture::Press(action),
                None => Gesture::Hover,
            };
        }

        Gesture::Draw(tip)
    }

    /// Classify the hand and apply the result to the session.
    pub fn step(&self, session: &mut Session, hand: Option<HandPose>) -> Gesture {
        let gesture = self.classify(hand, session.frame_size());
        match gesture {
            Gesture::NoHand => session.strokes.lift_pen(),
            Gesture::Pinch => {
                let active = session.strokes.buffer(session.active_color()).active();
                log::debug!("pen lifted after {} points", active.len());
                session.strokes.lift_pen();
            }
            Gesture::OutOfFrame => {
                log::debug!("fingertip outside the frame: {:?}", hand.map(|h| h.fingertip));
                session.strokes.lift_pen();
            }
            Gesture::Press(Action::Clear) => {
                if !session.strokes.is_pristine() {
                    let dropped: usize =
                        PaletteColor::ALL.iter().map(|&c| session.strokes.buffer(c).stroke_count()).sum();
                    log::info!("canvas cleared ({dropped} strokes dropped)");
                }
                session.clear();
            }
            Gesture::Press(Action::Select(color)) => {
                if session.active_color() != color {
                    log::info!("selected {}", color.label());
                }
                // Keeps appending to that colour's current stroke.
                session.select_color(color);
            }
            Gesture::Hover => {}
            Gesture::Draw(p) => {
                let color = session.active_color();
                session.strokes.append_point(color, p);
            }
        }
        gesture
    }
}

impl Default for GestureInterpreter {
    fn default() -> Self {
        Self::new(DEFAULT_PINCH_THRESHOLD, OutOfFrame::default())
    }
}
