//! Geometry helpers shared by the stroke interpolator and the label layer.

use kurbo::Point;
use serde::{Deserialize, Serialize};

/// Integer-aligned pixel position in canvas space.
///
/// Coordinates may be negative: a brush stamp near the canvas edge can start
/// off-canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GridCell {
    pub x: i32,
    pub y: i32,
}

impl GridCell {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// Euclidean distance between two points.
pub fn distance_between(a: Point, b: Point) -> f64 {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    dx.hypot(dy)
}

/// Angle in radians of the vector from `a` to `b`.
///
/// Zero points along +y: the sine of the result is the horizontal component
/// and the cosine the vertical one. Coincident points yield `0.0`.
pub fn angle_between(a: Point, b: Point) -> f64 {
    (b.x - a.x).atan2(b.y - a.y)
}

/// Round half toward positive infinity (`-0.5` rounds to `0`).
pub(crate) fn round_half_up(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Convert a rounded coordinate to a grid index, saturating at the `i32` range.
pub(crate) fn to_grid(value: f64) -> i32 {
    round_half_up(value).clamp(i32::MIN as f64, i32::MAX as f64) as i32
}
