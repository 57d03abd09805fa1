//! Linear cooling with a positive floor.

use crate::error::{Error, Result};

/// Default amount subtracted from the temperature per accepted move.
pub const DEFAULT_TEMPERATURE_DECREMENT: f64 = 0.01;

/// Default value the temperature settles at once linear cooling runs out.
pub const DEFAULT_TEMPERATURE_FLOOR: f64 = 1e-15;

/// Temperature in effect for an acceptance decision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Temperature {
    /// No stochastic acceptance: only strict improvements are taken.
    Off,
    /// Worsening moves are accepted with probability `exp(-Δ / T)`.
    At(f64),
}

impl Temperature {
    /// The numeric temperature, `None` when off.
    pub fn value(&self) -> Option<f64> {
        match *self {
            Temperature::Off => None,
            Temperature::At(t) => Some(t),
        }
    }
}

/// Infinite, non-increasing sequence `T0, T0 − δ, T0 − 2δ, …`, clamped at a
/// positive floor.
///
/// Term `k` has the closed form `max(T0 − δ·k, floor)`, so the iterator
/// only stores its index and never accumulates rounding error. It never
/// returns `None`.
///
/// # Examples
///
/// ```
/// use u_localsearch::anneal::TemperatureSchedule;
///
/// let mut schedule = TemperatureSchedule::new(1.0).unwrap().with_decrement(0.25).unwrap();
/// let first: Vec<f64> = schedule.by_ref().take(6).collect();
/// assert_eq!(&first[..4], &[1.0, 0.75, 0.5, 0.25]);
/// assert_eq!(first[4], 1e-15);
/// assert_eq!(schedule.next(), Some(1e-15));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TemperatureSchedule {
    initial: f64,
    decrement: f64,
    floor: f64,
    index: u64,
}

impl TemperatureSchedule {
    /// Creates a schedule starting at `initial` with the default decrement
    /// and floor.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidParameter`] unless `initial` is finite and positive.
    pub fn new(initial: f64) -> Result<Self> {
        if !(initial.is_finite() && initial > 0.0) {
            return Err(Error::parameter(
                "initial_temperature",
                format!("must be finite and positive, got {initial}"),
            ));
        }
        Ok(Self {
            initial,
            decrement: DEFAULT_TEMPERATURE_DECREMENT,
            floor: DEFAULT_TEMPERATURE_FLOOR,
            index: 0,
        })
    }

    /// Sets the per-step decrement `δ` (must be finite and positive).
    pub fn with_decrement(mut self, decrement: f64) -> Result<Self> {
        if !(decrement.is_finite() && decrement > 0.0) {
            return Err(Error::parameter(
                "temperature_decrement",
                format!("must be finite and positive, got {decrement}"),
            ));
        }
        self.decrement = decrement;
        Ok(self)
    }

    /// Sets the floor (must be positive and below the initial temperature).
    pub fn with_floor(mut self, floor: f64) -> Result<Self> {
        if !(floor.is_finite() && floor > 0.0) {
            return Err(Error::parameter(
                "temperature_floor",
                format!("must be finite and positive, got {floor}"),
            ));
        }
        if floor >= self.initial {
            return Err(Error::parameter(
                "temperature_floor",
                format!("must be below the initial temperature {}, got {floor}", self.initial),
            ));
        }
        self.floor = floor;
        Ok(self)
    }

    pub fn initial(&self) -> f64 {
        self.initial
    }

    pub fn decrement(&self) -> f64 {
        self.decrement
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    /// Number of terms produced so far.
    pub fn position(&self) -> u64 {
        self.index
    }

    /// Term `k` of the sequence.
    pub fn temperature_at(&self, k: u64) -> f64 {
        (self.initial - self.decrement * k as f64).max(self.floor)
    }

    /// Rewinds the cursor to the first term.
    pub fn reset(&mut self) {
        self.index = 0;
    }
}

impl Iterator for TemperatureSchedule {
    type Item = f64;

    fn next(&mut self) -> Option<f64> {
        let t = self.temperature_at(self.index);
        self.index = self.index.saturating_add(1);
        Some(t)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
