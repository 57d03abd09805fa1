//! Error type shared by every search entry point.

/// Errors reported by domain construction, config validation and search runs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    /// Returned when a lower bound exceeds its upper bound (or either is NaN).
    #[error("invalid domain: {axis} bounds [{min}, {max}] are not ordered")]
    InvalidDomain {
        /// The offending axis, `"x"` or `"y"`.
        axis: &'static str,
        /// The lower bound supplied.
        min: f64,
        /// The upper bound supplied.
        max: f64,
    },

    /// Returned when a configuration value is out of range.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        /// The name of the parameter.
        name: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// Returned when the objective yields NaN or an infinity at a visited point.
    #[error("objective returned non-finite value {value} at ({x}, {y})")]
    NonFiniteEvaluation {
        /// The x coordinate of the point.
        x: f64,
        /// The y coordinate of the point.
        y: f64,
        /// The value returned by the objective.
        value: f64,
    },
}

/// Convenience alias for results with this crate's [`Error`].
pub type Result<T> = core::result::Result<T, Error>;

impl Error {
    pub(crate) fn parameter(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}
