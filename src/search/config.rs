//! Search configuration.

use crate::anneal::{TemperatureSchedule, DEFAULT_TEMPERATURE_DECREMENT, DEFAULT_TEMPERATURE_FLOOR};
use crate::error::{Error, Result};
use crate::field::Point;

/// Default number of consecutive rejected moves that ends a restart.
pub const DEFAULT_MOVE_RETRIES: usize = 18;

/// Which end of the objective range counts as better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Goal {
    /// Smaller values are better.
    #[default]
    Minimize,
    /// Larger values are better.
    Maximize,
}

impl Goal {
    /// Maps a value onto the "lower is better" scale the walk works on.
    ///
    /// The mapping is its own inverse.
    pub fn orient(self, value: f64) -> f64 {
        match self {
            Goal::Minimize => value,
            Goal::Maximize => -value,
        }
    }

    /// Returns `true` if `candidate` is strictly better than `incumbent`.
    pub fn is_better(self, candidate: f64, incumbent: f64) -> bool {
        self.orient(candidate) < self.orient(incumbent)
    }
}

/// Where the domain membership test is applied during a walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoundaryCheck {
    /// Test the point the walk is currently on. A single step may leave the
    /// domain; every later attempt from outside is rejected.
    #[default]
    PreMove,
    /// Test the candidate. The walk never leaves the domain.
    Candidate,
}

/// Configuration for [`SearchRunner`](super::SearchRunner).
///
/// # Examples
///
/// ```
/// use u_localsearch::search::{SearchConfig, DEFAULT_MOVE_RETRIES};
///
/// let config = SearchConfig::new(0.05)
///     .with_restarts(10)
///     .with_trace(true)
///     .with_seed(42);
/// assert_eq!(config.move_retries, DEFAULT_MOVE_RETRIES);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Length of every move. Must be finite and positive.
    pub step: f64,

    /// Number of independent restarts (at least 1).
    pub restarts: usize,

    /// Consecutive rejected moves after which a restart is converged.
    pub move_retries: usize,

    /// Starting temperature. `None` disables stochastic acceptance.
    pub initial_temperature: Option<f64>,

    /// Temperature drop per accepted move.
    pub temperature_decrement: f64,

    /// Positive value the temperature is clamped at.
    pub temperature_floor: f64,

    /// Comparison used for acceptance and for ranking restarts.
    pub goal: Goal,

    /// Domain membership policy.
    pub boundary: BoundaryCheck,

    /// Start point for the first restart. Later restarts start at random.
    pub start: Option<Point>,

    /// Whether to keep the visited points of every restart.
    pub record_trace: bool,

    /// Whether to run restarts on the rayon pool (`parallel` feature).
    pub parallel: bool,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl SearchConfig {
    /// Creates a single-restart hill-climbing configuration with the given step.
    pub fn new(step: f64) -> Self {
        Self {
            step,
            restarts: 1,
            move_retries: DEFAULT_MOVE_RETRIES,
            initial_temperature: None,
            temperature_decrement: DEFAULT_TEMPERATURE_DECREMENT,
            temperature_floor: DEFAULT_TEMPERATURE_FLOOR,
            goal: Goal::default(),
            boundary: BoundaryCheck::default(),
            start: None,
            record_trace: false,
            parallel: false,
            seed: None,
        }
    }

    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    pub fn with_restarts(mut self, n: usize) -> Self {
        self.restarts = n;
        self
    }

    pub fn with_move_retries(mut self, n: usize) -> Self {
        self.move_retries = n;
        self
    }

    /// Enables annealing from temperature `t`.
    pub fn with_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = Some(t);
        self
    }

    /// Disables annealing.
    pub fn without_temperature(mut self) -> Self {
        self.initial_temperature = None;
        self
    }

    pub fn with_temperature_decrement(mut self, decrement: f64) -> Self {
        self.temperature_decrement = decrement;
        self
    }

    pub fn with_temperature_floor(mut self, floor: f64) -> Self {
        self.temperature_floor = floor;
        self
    }

    pub fn with_goal(mut self, goal: Goal) -> Self {
        self.goal = goal;
        self
    }

    pub fn with_boundary(mut self, boundary: BoundaryCheck) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_start(mut self, start: Point) -> Self {
        self.start = Some(start);
        self
    }

    pub fn with_trace(mut self, record: bool) -> Self {
        self.record_trace = record;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Builds the temperature schedule, or `None` for hill climbing.
    pub fn schedule(&self) -> Result<Option<TemperatureSchedule>> {
        self.initial_temperature
            .map(|t| {
                TemperatureSchedule::new(t)?
                    .with_decrement(self.temperature_decrement)?
                    .with_floor(self.temperature_floor)
            })
            .transpose()
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if !(self.step.is_finite() && self.step > 0.0) {
            return Err(Error::parameter(
                "step",
                format!("must be finite and positive, got {}", self.step),
            ));
        }
        if self.restarts == 0 {
            return Err(Error::parameter("restarts", "must be at least 1"));
        }
        if self.move_retries == 0 {
            return Err(Error::parameter("move_retries", "must be at least 1"));
        }
        if let Some(p) = self.start {
            if !(p.x.is_finite() && p.y.is_finite()) {
                return Err(Error::parameter(
                    "start",
                    format!("must be finite, got ({}, {})", p.x, p.y),
                ));
            }
        }
        self.schedule().map(|_| ())
    }
}
