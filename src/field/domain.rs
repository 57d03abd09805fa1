//! Axis-aligned rectangular search domain.

use super::Point;
use crate::error::{Error, Result};
use rand::Rng;

/// A closed rectangle `[xmin, xmax] × [ymin, ymax]`.
///
/// Bounds are validated on construction and never change afterwards.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "Bounds"))]
pub struct Domain {
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
}

impl Domain {
    /// Creates a domain from its four bounds.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDomain`] if `xmin > xmax`, `ymin > ymax`, any bound
    /// is NaN or infinite, or a width `max − min` overflows to infinity.
    /// Degenerate (zero-width) intervals are allowed.
    pub fn new(xmin: f64, xmax: f64, ymin: f64, ymax: f64) -> Result<Self> {
        check_axis("x", xmin, xmax)?;
        check_axis("y", ymin, ymax)?;
        Ok(Self {
            xmin,
            xmax,
            ymin,
            ymax,
        })
    }

    /// A square `[min, max]²`.
    pub fn square(min: f64, max: f64) -> Result<Self> {
        Self::new(min, max, min, max)
    }

    /// The `(xmin, xmax)` interval.
    pub fn x_bounds(&self) -> (f64, f64) {
        (self.xmin, self.xmax)
    }

    /// The `(ymin, ymax)` interval.
    pub fn y_bounds(&self) -> (f64, f64) {
        (self.ymin, self.ymax)
    }

    /// Returns `true` iff both coordinates lie in their closed intervals.
    pub fn contains(&self, point: &Point) -> bool {
        (self.xmin..=self.xmax).contains(&point.x) && (self.ymin..=self.ymax).contains(&point.y)
    }

    /// Draws a point uniformly from the rectangle, bounds included.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Point {
        Point::new(
            rng.random_range(self.xmin..=self.xmax),
            rng.random_range(self.ymin..=self.ymax),
        )
    }
}

fn check_axis(axis: &'static str, min: f64, max: f64) -> Result<()> {
    // A finite width also rules out infinite and NaN bounds, and matches
    // what `Rng::random_range` requires of an inclusive float range.
    if min > max || !(max - min).is_finite() {
        return Err(Error::InvalidDomain { axis, min, max });
    }
    Ok(())
}

/// Unvalidated bounds, checked through [`Domain::new`] on deserialization.
#[cfg(feature = "serde")]
#[derive(serde::Deserialize)]
struct Bounds {
    xmin: f64,
    xmax: f64,
    ymin: f64,
    ymax: f64,
}

#[cfg(feature = "serde")]
impl TryFrom<Bounds> for Domain {
    type Error = Error;

    fn try_from(b: Bounds) -> Result<Self> {
        Domain::new(b.xmin, b.xmax, b.ymin, b.ymax)
    }
}
