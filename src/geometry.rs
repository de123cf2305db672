use serde::Serialize;
use std::f64::consts::TAU;

/// A 2D point in world coordinates.
/// Used both for map corner data and for raycast output vertices.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A directed line starting at `(x, y)` with direction vector `(dx, dy)` and
/// its magnitude `mag`.
///
/// A finite wall segment spans parameter `t ∈ [0, 1]` from `(x, y)` to
/// `(x + dx, y + dy)` and has `mag > 0`. A ray uses the same representation
/// with a unit direction vector and `mag = 1`; its parameter is unbounded
/// above zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
    pub mag: f64,
}

impl Segment {
    /// Create a finite segment from an origin and direction components.
    pub fn new(x: f64, y: f64, dx: f64, dy: f64) -> Self {
        Segment {
            x,
            y,
            dx,
            dy,
            mag: (dx * dx + dy * dy).sqrt(),
        }
    }

    /// Create a ray from `(x, y)` toward `angle` radians: unit direction,
    /// `mag = 1`.
    pub fn ray(x: f64, y: f64, angle: f64) -> Self {
        Segment {
            x,
            y,
            dx: angle.cos(),
            dy: angle.sin(),
            mag: 1.0,
        }
    }

    /// End point of a finite segment.
    pub fn end(&self) -> Point {
        Point::new(self.x + self.dx, self.y + self.dy)
    }
}

/// A raycast hit: a point plus the ray's parametric distance (`param`, used
/// for nearest-hit selection) and the absolute angle of the ray that produced
/// it (`angle`, used for the final angular sort).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionPoint {
    pub x: f64,
    pub y: f64,
    pub param: f64,
    pub angle: f64,
}

impl IntersectionPoint {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Wrap an angle into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    angle.rem_euclid(TAU)
}

/// Angle in radians of the vector from `(x1, y1)` to `(x2, y2)`, in
/// `(-π, π]`. Y grows downward, so positive angles point down-screen.
pub fn angle_between(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    (y2 - y1).atan2(x2 - x1)
}
