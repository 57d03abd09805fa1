//! Unified restart-based local search.
//!
//! Every restart draws a start point from the [`Domain`](crate::field::Domain)
//! and walks in uniformly random directions at a fixed step length. Moves
//! are filtered by the acceptance rule in [`anneal`](crate::anneal); a
//! restart ends after `move_retries` consecutive rejections. The best point
//! over all restarts is reported.
//!
//! Pure hill climbing, hill climbing with restarts and simulated annealing
//! are configurations of this one procedure; see [`climb`](crate::climb).

mod config;
mod runner;
mod types;

pub use config::{BoundaryCheck, Goal, SearchConfig, DEFAULT_MOVE_RETRIES};
pub use runner::SearchRunner;
pub use types::{RestartOutcome, SearchResult};
