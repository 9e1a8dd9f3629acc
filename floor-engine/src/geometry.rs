//! Geometry and collision primitives
//!
//! Positions are top-left anchored canvas pixels.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A point on the canvas
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Displacement between two points
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Offset {
    pub dx: f64,
    pub dy: f64,
}

impl Sub for Point {
    type Output = Offset;

    fn sub(self, rhs: Point) -> Offset {
        Offset {
            dx: self.x - rhs.x,
            dy: self.y - rhs.y,
        }
    }
}

impl Sub<Offset> for Point {
    type Output = Point;

    fn sub(self, rhs: Offset) -> Point {
        Point::new(self.x - rhs.dx, self.y - rhs.dy)
    }
}

impl Add<Offset> for Point {
    type Output = Point;

    fn add(self, rhs: Offset) -> Point {
        Point::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

/// Whether two equally sized boxes intersect once inflated by `gap` on each axis.
///
/// Symmetric in `a` and `b`. Boxes exactly `width + gap` apart do not overlap.
pub fn overlaps(a: Point, b: Point, width: f64, height: f64, gap: f64) -> bool {
    (a.x - b.x).abs() < width + gap && (a.y - b.y).abs() < height + gap
}

/// Clamp `value` into `[min, max]`.
///
/// A degenerate range (`min > max`) or a NaN value yields `min`.
pub fn clamp(value: f64, min: f64, max: f64) -> f64 {
    if min > max || value.is_nan() {
        return min;
    }
    value.max(min).min(max)
}
