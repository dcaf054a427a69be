// Per-colour stroke history.
//
// Every colour owns a `ColorBuffer`: finished strokes plus one active stroke that new
// points go into. A `Stroke` is a bounded sliding window: points are inserted at the
// front (newest first) and, once full, the oldest point falls off the back.

use std::collections::VecDeque;
use std::mem;

use crate::palette::PaletteColor;
use crate::types::Point;

/// Capacity of the first stroke of a colour (at startup and after a clear).
pub const FIRST_STROKE_CAPACITY: usize = 1024;
/// Capacity of every stroke started by lifting the pen.
pub const STROKE_CAPACITY: usize = 512;

#[derive(Clone, Debug)]
pub struct Stroke {
    /// Newest point at index 0.
    points: VecDeque<Point>,
    capacity: usize,
}

impl Stroke {
    /// An empty stroke holding at most `capacity` points. Storage grows as points arrive.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { points: VecDeque::new(), capacity }
    }

    /// Insert at the front, evicting the oldest point once full.
    pub fn push(&mut self, p: Point) {
        if self.capacity == 0 {
            return;
        }
        if self.points.len() == self.capacity {
            self.points.pop_back();
        }
        self.points.push_front(p);
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Points in stored order (newest first).
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.points.iter().copied()
    }

    /// Adjacent pairs `(p[i-1], p[i])` in stored order.
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.points.iter().zip(self.points.iter().skip(1)).map(|(&a, &b)| (a, b))
    }
}

/// All strokes of one colour. The active stroke is always the last one.
#[derive(Clone, Debug)]
pub struct ColorBuffer {
    finished: Vec<Stroke>,
    active: Stroke,
}

impl ColorBuffer {
    pub fn new() -> Self {
        Self { finished: Vec::new(), active: Stroke::with_capacity(FIRST_STROKE_CAPACITY) }
    }

    /// Index of the active stroke; always `stroke_count() - 1`.
    pub fn active_index(&self) -> usize {
        self.finished.len()
    }

    pub fn stroke_count(&self) -> usize {
        self.finished.len() + 1
    }

    pub fn active(&self) -> &Stroke {
        &self.active
    }

    /// Creation order, active stroke last.
    pub fn strokes(&self) -> impl Iterator<Item = &Stroke> {
        self.finished.iter().chain(std::iter::once(&self.active))
    }

    fn start_new_stroke(&mut self) {
        let done = mem::replace(&mut self.active, Stroke::with_capacity(STROKE_CAPACITY));
        self.finished.push(done);
    }
}

impl Default for ColorBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// One [`ColorBuffer`] per palette colour.
#[derive(Clone, Debug, Default)]
pub struct StrokeStore {
    buffers: [ColorBuffer; 4],
}

impl StrokeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn buffer(&self, color: PaletteColor) -> &ColorBuffer {
        &self.buffers[color.index()]
    }

    /// End the active stroke of `color` so later points don't connect to it.
    pub fn start_new_stroke(&mut self, color: PaletteColor) {
        self.buffers[color.index()].start_new_stroke();
    }

    /// Pen up on every colour at once.
    pub fn lift_pen(&mut self) {
        for color in PaletteColor::ALL {
            self.start_new_stroke(color);
        }
    }

    pub fn append_point(&mut self, color: PaletteColor, p: Point) {
        self.buffers[color.index()].active.push(p);
    }

    /// True if every colour holds just its first stroke, still empty.
    pub fn is_pristine(&self) -> bool {
        self.buffers.iter().all(|b| b.stroke_count() == 1 && b.active().is_empty())
    }

    /// Back to one empty 1024-point stroke per colour.
    pub fn clear_all(&mut self) {
        self.buffers = Default::default();
    }

    /// Visit every drawable segment: colours in palette order, strokes oldest first,
    /// points in stored order.
    pub fn for_each_segment(&self, mut visit: impl FnMut(PaletteColor, Point, Point)) {
        for color in PaletteColor::ALL {
            for stroke in self.buffer(color).strokes() {
                for (a, b) in stroke.segments() {
                    visit(color, a, b);
                }
            }
        }
    }
}
