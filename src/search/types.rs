//! Search results.

use crate::field::Point;

/// Statistics for one restart.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RestartOutcome {
    /// Position of this restart in the run, from 0.
    pub index: usize,

    /// The point the walk started from.
    pub start: Point,

    /// The point the walk stopped on.
    pub end: Point,

    /// The best point visited during this restart.
    pub best: Point,

    /// Objective value at `best`.
    pub best_value: f64,

    /// Number of accepted moves.
    pub moves: usize,

    /// Number of proposed moves (accepted or not).
    pub attempts: usize,

    /// Temperature in effect when the walk stopped, `None` without annealing.
    pub final_temperature: Option<f64>,

    /// Whether the walk was interrupted by cancellation.
    pub cancelled: bool,
}

/// Result of a search run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    /// The best point found across all restarts.
    pub best: Point,

    /// Objective value at `best`.
    pub best_value: f64,

    /// Index of the restart that produced `best`.
    pub best_restart: usize,

    /// Per-restart statistics, in restart order.
    pub restarts: Vec<RestartOutcome>,

    /// Visited points of each restart in chronological order, when
    /// `record_trace` is set.
    pub trace: Option<Vec<Vec<Point>>>,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,
}

impl SearchResult {
    /// Total accepted moves over all restarts.
    pub fn total_moves(&self) -> usize {
        self.restarts.iter().map(|r| r.moves).sum()
    }

    /// Total proposed moves over all restarts.
    pub fn total_attempts(&self) -> usize {
        self.restarts.iter().map(|r| r.attempts).sum()
    }
}
