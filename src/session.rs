// Everything that survives from one frame to the next: stroke history, the selected
// colour and the paint canvas. The frame loop owns exactly one of these.

use crate::draw::Surface;
use crate::palette::PaletteColor;
use crate::strokes::StrokeStore;
use crate::types::{FrameBuffer, WHITE};

pub struct Session {
    pub strokes: StrokeStore,
    active_color: PaletteColor,
    canvas: FrameBuffer,
}

impl Session {
    /// Fresh session with an all-white canvas the size of the video frame.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            strokes: StrokeStore::new(),
            active_color: PaletteColor::default(),
            canvas: FrameBuffer::filled(width, height, WHITE),
        }
    }

    pub fn active_color(&self) -> PaletteColor {
        self.active_color
    }

    pub fn select_color(&mut self, color: PaletteColor) {
        self.active_color = color;
    }

    pub fn canvas(&self) -> &FrameBuffer {
        &self.canvas
    }

    /// Split borrow for the renderer: it reads strokes while painting the canvas.
    pub fn canvas_and_strokes(&mut self) -> (&mut FrameBuffer, &StrokeStore) {
        (&mut self.canvas, &self.strokes)
    }

    pub fn frame_size(&self) -> (usize, usize) {
        (self.canvas.width, self.canvas.height)
    }

    /// The CLEAR button: wipe strokes, wipe canvas, back to the first colour.
    pub fn clear(&mut self) {
        self.strokes.clear_all();
        self.canvas.fill(WHITE);
        self.active_color = PaletteColor::default();
    }
}
