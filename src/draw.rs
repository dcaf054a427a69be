// Software drawing onto a FrameBuffer.
// The renderer only ever talks to the `Surface` trait: rectangles, lines, circles, text and
// a full fill. `FrameBuffer` implements it with plain pixel writes (Bresenham lines, disc
// stamps for thickness, a tiny 5x7 bitmap font for labels).

use crate::types::{BLACK, FrameBuffer, Point};

/// Drawing primitives a render target must offer. Colours are 0x00RRGGBB.
pub trait Surface {
    fn fill(&mut self, color: u32);
    fn fill_rect(&mut self, top_left: Point, bottom_right: Point, color: u32);
    /// Outline centred on the rectangle's edges.
    fn stroke_rect(&mut self, top_left: Point, bottom_right: Point, color: u32, thickness: i32);
    fn line(&mut self, from: Point, to: Point, color: u32, thickness: i32);
    fn fill_circle(&mut self, center: Point, radius: i32, color: u32);
    fn stroke_circle(&mut self, center: Point, radius: i32, color: u32, thickness: i32);
    /// `origin` is the top-left of the first glyph; `scale` multiplies the 5x7 cell.
    fn text(&mut self, origin: Point, text: &str, scale: i32, color: u32);
}

/// Put a pixel on the framebuffer if (x,y) is inside bounds.
#[inline]
fn put_pixel(fb: &mut FrameBuffer, x: i32, y: i32, color: u32) {
    if x < 0 || y < 0 {
        return;
    }
    let (x, y) = (x as usize, y as usize);
    if x >= fb.width || y >= fb.height {
        return;
    }
    let idx = y * fb.width + x;
    fb.pixels[idx] = color;
}

/// Filled disc; the building block for thick lines.
fn stamp_disc(fb: &mut FrameBuffer, cx: i32, cy: i32, r: i32, color: u32) {
    if r <= 0 {
        put_pixel(fb, cx, cy, color);
        return;
    }
    let r2 = r * r;
    for dy in -r..=r {
        for dx in -r..=r {
            if dx * dx + dy * dy <= r2 {
                put_pixel(fb, cx + dx, cy + dy, color);
            }
        }
    }
}

/// Bresenham from (x0,y0) to (x1,y1), calling `plot` on every pixel.
fn bresenham(x0: i32, y0: i32, x1: i32, y1: i32, mut plot: impl FnMut(i32, i32)) {
    let (mut x0, mut y0) = (x0, y0);
    let dx = (x1 - x0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let dy = -(y1 - y0).abs();
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx + dy;
    loop {
        plot(x0, y0);
        if x0 == x1 && y0 == y1 { break; }
        let e2 = 2 * err;
        if e2 >= dy { err += dy; x0 += sx; }
        if e2 <= dx { err += dx; y0 += sy; }
    }
}

impl Surface for FrameBuffer {
    fn fill(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    fn fill_rect(&mut self, top_left: Point, bottom_right: Point, color: u32) {
        let x0 = top_left.x.min(bottom_right.x).max(0);
        let x1 = top_left.x.max(bottom_right.x).min(self.width as i32 - 1);
        let y0 = top_left.y.min(bottom_right.y).max(0);
        let y1 = top_left.y.max(bottom_right.y).min(self.height as i32 - 1);
        for y in y0..=y1 {
            let row = y as usize * self.width;
            for x in x0..=x1 {
                self.pixels[row + x as usize] = color;
            }
        }
    }

    fn stroke_rect(&mut self, top_left: Point, bottom_right: Point, color: u32, thickness: i32) {
        let t = thickness.max(1);
        let lo = t / 2; // pixels outside the edge
        let hi = t - 1 - lo; // pixels inside the edge
        let (l, r) = (top_left.x, bottom_right.x);
        let (top, bot) = (top_left.y, bottom_right.y);
        // top, bottom, left, right bands
        self.fill_rect(Point::new(l - lo, top - lo), Point::new(r + lo, top + hi), color);
        self.fill_rect(Point::new(l - lo, bot - hi), Point::new(r + lo, bot + lo), color);
        self.fill_rect(Point::new(l - lo, top - lo), Point::new(l + hi, bot + lo), color);
        self.fill_rect(Point::new(r - hi, top - lo), Point::new(r + lo, bot + lo), color);
    }

    fn line(&mut self, from: Point, to: Point, color: u32, thickness: i32) {
        let r = thickness / 2;
        bresenham(from.x, from.y, to.x, to.y, |x, y| stamp_disc(self, x, y, r, color));
    }

    fn fill_circle(&mut self, center: Point, radius: i32, color: u32) {
        stamp_disc(self, center.x, center.y, radius, color);
    }

    fn stroke_circle(&mut self, center: Point, radius: i32, color: u32, thickness: i32) {
        let t = thickness.max(1);
        let outer = radius + t / 2;
        let inner = (radius - (t - t / 2)).max(0);
        let (o2, i2) = (outer * outer, inner * inner);
        for dy in -outer..=outer {
            for dx in -outer..=outer {
                let d2 = dx * dx + dy * dy;
                if d2 <= o2 && d2 > i2 {
                    put_pixel(self, center.x + dx, center.y + dy, color);
                }
            }
        }
    }

    fn text(&mut self, origin: Point, text: &str, scale: i32, color: u32) {
        draw_text_5x7(self, origin.x, origin.y, text, scale.max(1), color);
    }
}

/* ---------- 5x7 bitmap font (the button labels and the HUD) ---------- */

/// Height of one glyph row block at scale 1.
pub const GLYPH_HEIGHT: i32 = 7;
/// Horizontal advance per glyph at scale 1 (5 pixels glyph + 1 spacing).
pub const GLYPH_ADVANCE: i32 = 6;

/// Return a 5x7 glyph bitmap for a limited character set.
/// Each u8 is a row; the low 5 bits are the pixels (bit 4 = leftmost).
fn glyph5x7(ch: char) -> Option<[u8; 7]> {
    macro_rules! g { ($a:expr,$b:expr,$c:expr,$d:expr,$e:expr,$f:expr,$g:expr) => {
        Some([$a,$b,$c,$d,$e,$f,$g])
    }; }

    match ch.to_ascii_uppercase() {
        // Digits 0..9
        '0' => g!(0b01110,0b10001,0b10011,0b10101,0b11001,0b10001,0b01110),
        '1' => g!(0b00100,0b01100,0b00100,0b00100,0b00100,0b00100,0b01110),
        '2' => g!(0b01110,0b10001,0b00001,0b00010,0b00100,0b01000,0b11111),
        '3' => g!(0b11110,0b00001,0b00001,0b01110,0b00001,0b00001,0b11110),
        '4' => g!(0b00010,0b00110,0b01010,0b10010,0b11111,0b00010,0b00010),
        '5' => g!(0b11111,0b10000,0b11110,0b00001,0b00001,0b10001,0b01110),
        '6' => g!(0b00110,0b01000,0b10000,0b11110,0b10001,0b10001,0b01110),
        '7' => g!(0b11111,0b00001,0b00010,0b00100,0b01000,0b01000,0b01000),
        '8' => g!(0b01110,0b10001,0b10001,0b01110,0b10001,0b10001,0b01110),
        '9' => g!(0b01110,0b10001,0b10001,0b01111,0b00001,0b00010,0b01100),

        // Letters for CLEAR / BLUE / GREEN / RED / YELLOW / FPS / PAUSED
        'A' => g!(0b01110,0b10001,0b10001,0b11111,0b10001,0b10001,0b10001),
        'B' => g!(0b11110,0b10001,0b10001,0b11110,0b10001,0b10001,0b11110),
        'C' => g!(0b01110,0b10001,0b10000,0b10000,0b10000,0b10001,0b01110),
        'D' => g!(0b11100,0b10010,0b10001,0b10001,0b10001,0b10010,0b11100),
        'E' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b11111),
        'F' => g!(0b11111,0b10000,0b10000,0b11110,0b10000,0b10000,0b10000),
        'G' => g!(0b01110,0b10001,0b10000,0b10111,0b10001,0b10001,0b01111),
        'L' => g!(0b10000,0b10000,0b10000,0b10000,0b10000,0b10000,0b11111),
        'N' => g!(0b10001,0b11001,0b10101,0b10011,0b10001,0b10001,0b10001),
        'O' => g!(0b01110,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'P' => g!(0b11110,0b10001,0b10001,0b11110,0b10000,0b10000,0b10000),
        'R' => g!(0b11110,0b10001,0b10001,0b11110,0b10100,0b10010,0b10001),
        'S' => g!(0b01111,0b10000,0b10000,0b01110,0b00001,0b00001,0b11110),
        'U' => g!(0b10001,0b10001,0b10001,0b10001,0b10001,0b10001,0b01110),
        'W' => g!(0b10001,0b10001,0b10001,0b10101,0b10101,0b10101,0b01010),
        'Y' => g!(0b10001,0b10001,0b01010,0b00100,0b00100,0b00100,0b00100),

        // Punctuation: space, vertical bar, colon, dot
        ' ' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00000,0b00000),
        '|' => g!(0b00100,0b00100,0b00100,0b00100,0b00100,0b00100,0b00100),
        ':' => g!(0b00000,0b00100,0b00000,0b00000,0b00100,0b00000,0b00000),
        '.' => g!(0b00000,0b00000,0b00000,0b00000,0b00000,0b00100,0b00000),

        _ => None,
    }
}

/// Draw a single character at (x,y), each font pixel a `scale` x `scale` block.
fn draw_char_5x7(fb: &mut FrameBuffer, x: i32, y: i32, ch: char, scale: i32, color: u32) {
    let Some(rows) = glyph5x7(ch) else { return };
    for (ry, rowbits) in rows.iter().enumerate() {
        for rx in 0..5 {
            if (rowbits & (1 << (4 - rx))) == 0 {
                continue;
            }
            let px = x + rx * scale;
            let py = y + ry as i32 * scale;
            for sy in 0..scale {
                for sx in 0..scale {
                    put_pixel(fb, px + sx, py + sy, color);
                }
            }
        }
    }
}

/// Draw a text string using 5x7 glyphs.
/// Light text gets a 1-block black shadow so it stays readable on any background.
fn draw_text_5x7(fb: &mut FrameBuffer, x: i32, y: i32, text: &str, scale: i32, color: u32) {
    if color != BLACK {
        let mut sx = x + scale;
        for ch in text.chars() {
            draw_char_5x7(fb, sx, y + scale, ch, scale, BLACK);
            sx += GLYPH_ADVANCE * scale;
        }
    }
    let mut cx = x;
    for ch in text.chars() {
        draw_char_5x7(fb, cx, y, ch, scale, color);
        cx += GLYPH_ADVANCE * scale;
    }
}
