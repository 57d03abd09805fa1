//! Points, objective functions and search domains on the plane.
//!
//! The objective is any pure scalar field `f(x, y)`. Closures of the form
//! `Fn(f64, f64) -> f64` implement [`Objective`] directly, so most callers
//! never name the trait.

mod domain;

pub use domain::Domain;

/// A point on the plane.
///
/// Equality is exact floating-point equality.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl Point {
    /// Creates the point `(x, y)`.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    pub fn distance(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// The point at distance `step` from `self` in direction `angle` (radians).
    pub fn towards(&self, angle: f64, step: f64) -> Point {
        let (sin, cos) = angle.sin_cos();
        Point::new(self.x + step * cos, self.y + step * sin)
    }

    /// The point offset by `(dx, dy)`.
    pub fn shifted(&self, dx: f64, dy: f64) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

/// A scalar field over the plane, the "height" a search minimizes.
///
/// Implementations must be pure: the same point always yields the same
/// value. `Sync` lets restarts evaluate the field from worker threads.
pub trait Objective: Sync {
    /// Evaluates the field at `point`.
    fn evaluate(&self, point: Point) -> f64;
}

impl<F> Objective for F
where
    F: Fn(f64, f64) -> f64 + Sync,
{
    fn evaluate(&self, point: Point) -> f64 {
        self(point.x, point.y)
    }
}

/// Multimodal test surface with a local minimum of `0` at the origin.
///
/// `z(x, y) = sin(x² + 3y²) / (0.1 + x² + y²) + (x² + 5y²) · exp(1 − x² − y²) / 2`
pub fn reference_surface(x: f64, y: f64) -> f64 {
    let r2 = x * x + y * y;
    (x * x + 3.0 * y * y).sin() / (0.1 + r2) + (x * x + 5.0 * y * y) * (1.0 - r2).exp() / 2.0
}
