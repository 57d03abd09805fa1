//! Steepest-descent hill climbing on a fixed lattice.
//!
//! From the current point `(x, y)` the nine lattice points
//! `(x + i·step, y + j·step)` for `i, j ∈ {−1, 0, 1}` are compared and the
//! walk moves to the best one. The centre only loses to a strictly better
//! neighbour, so the walk halts exactly at a lattice local optimum.
//! Neighbours outside the domain or with non-finite values are skipped,
//! which bounds the walk to finitely many lattice points.

use rand::Rng;

use crate::error::{Error, Result};
use crate::field::{Domain, Objective, Point};
use crate::random::{create_rng, rng_from_seed};
use crate::search::{RestartOutcome, SearchConfig, SearchResult};

/// Neighbour offsets in row-major order, top row first, centre excluded.
const NEIGHBOURS: [(f64, f64); 8] = [
    (-1.0, 1.0),
    (0.0, 1.0),
    (1.0, 1.0),
    (-1.0, 0.0),
    (1.0, 0.0),
    (-1.0, -1.0),
    (0.0, -1.0),
    (1.0, -1.0),
];

/// Runs lattice hill climbing for `config.restarts` restarts.
///
/// Uses `step`, `restarts`, `goal`, `start`, `record_trace` and `seed` from
/// `config`; the temperature, boundary and retry settings do not apply.
/// The first restart starts at `config.start` when set.
///
/// # Errors
///
/// - [`Error::InvalidParameter`] for an invalid config or a start point
///   outside `domain`
/// - [`Error::NonFiniteEvaluation`] if a start point evaluates to NaN or ±∞
pub fn grid_hill_climb<F: Objective>(
    f: &F,
    domain: &Domain,
    config: &SearchConfig,
) -> Result<SearchResult> {
    config.validate()?;
    if let Some(start) = config.start {
        if !domain.contains(&start) {
            return Err(Error::parameter(
                "start",
                format!("({}, {}) lies outside the domain", start.x, start.y),
            ));
        }
    }

    let _span = tracing::debug_span!("grid_search", restarts = config.restarts, step = config.step)
        .entered();

    let goal = config.goal;
    let mut master = rng_from_seed(config.seed);
    let mut outcomes: Vec<RestartOutcome> = Vec::with_capacity(config.restarts);
    let mut traces = Vec::new();

    for index in 0..config.restarts {
        let mut rng = create_rng(master.random());
        let start = match config.start {
            Some(p) if index == 0 => p,
            _ => domain.sample(&mut rng),
        };

        let value = f.evaluate(start);
        if !value.is_finite() {
            return Err(Error::NonFiniteEvaluation {
                x: start.x,
                y: start.y,
                value,
            });
        }

        let mut current = start;
        let mut current_cost = goal.orient(value);
        let mut trace = Vec::new();
        if config.record_trace {
            trace.push(start);
        }
        let mut moves = 0usize;
        let mut attempts = 0usize;

        loop {
            let mut next: Option<(Point, f64)> = None;
            for &(dx, dy) in &NEIGHBOURS {
                let candidate = current.shifted(dx * config.step, dy * config.step);
                if !domain.contains(&candidate) {
                    continue;
                }
                let cost = goal.orient(f.evaluate(candidate));
                attempts += 1;
                let incumbent = next.map_or(current_cost, |(_, c)| c);
                if cost.is_finite() && cost < incumbent {
                    next = Some((candidate, cost));
                }
            }
            match next {
                Some((point, cost)) => {
                    current = point;
                    current_cost = cost;
                    moves += 1;
                    if config.record_trace {
                        trace.push(point);
                    }
                }
                None => break,
            }
        }

        let best_value = goal.orient(current_cost);
        tracing::debug!(restart = index, moves, attempts, best_value, "lattice optimum reached");

        outcomes.push(RestartOutcome {
            index,
            start,
            end: current,
            best: current,
            best_value,
            moves,
            attempts,
            final_temperature: None,
            cancelled: false,
        });
        if config.record_trace {
            traces.push(trace);
        }
    }

    let mut best_restart = 0;
    for (i, outcome) in outcomes.iter().enumerate().skip(1) {
        if goal.is_better(outcome.best_value, outcomes[best_restart].best_value) {
            best_restart = i;
        }
    }
    let (best, best_value) = (outcomes[best_restart].best, outcomes[best_restart].best_value);
    tracing::info!(x = best.x, y = best.y, value = best_value, best_restart, "grid search finished");

    Ok(SearchResult {
        best,
        best_value,
        best_restart,
        restarts: outcomes,
        trace: config.record_trace.then_some(traces),
        cancelled: false,
    })
}
