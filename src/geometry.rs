use crate::types::Point;

/// Euclidean distance between two frame points.
pub fn distance(p: Point, q: Point) -> f64 {
    let dx = f64::from(p.x) - f64::from(q.x);
    let dy = f64::from(p.y) - f64::from(q.y);
    dx.hypot(dy)
}

/// True if `p` lies inside a `width` x `height` frame.
pub fn in_frame(p: Point, width: usize, height: usize) -> bool {
    p.x >= 0 && p.y >= 0 && (p.x as usize) < width && (p.y as usize) < height
}

/// Pull `p` onto the nearest pixel of a `width` x `height` frame.
pub fn clamp_to_frame(p: Point, width: usize, height: usize) -> Point {
    let max_x = width.saturating_sub(1) as i32;
    let max_y = height.saturating_sub(1) as i32;
    Point::new(p.x.clamp(0, max_x), p.y.clamp(0, max_y))
}
