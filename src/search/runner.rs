//! Restart loop and random-direction walk.
//!
//! # Algorithm
//!
//! For each restart:
//!
//! 1. Draw a start point from the domain (the configured start for the
//!    first restart) and evaluate it
//! 2. Pull a temperature if a schedule is configured
//! 3. Propose a point at distance `step` in a uniform random direction
//! 4. Move if the boundary check passes and the acceptance rule agrees;
//!    on a move, pull the next temperature and clear the rejection count
//! 5. Stop after `move_retries` consecutive rejections
//!
//! Each restart runs on its own RNG, seeded from the master RNG before any
//! restart starts, so results do not depend on execution order.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::Rng;

use super::config::{BoundaryCheck, SearchConfig};
use super::types::{RestartOutcome, SearchResult};
use crate::anneal::{accepts, Temperature, TemperatureSchedule};
use crate::error::{Error, Result};
use crate::field::{Domain, Objective, Point};
use crate::random::{create_rng, rng_from_seed};

/// Executes the unified search procedure.
pub struct SearchRunner;

/// One finished restart and its visited points.
struct Walk {
    outcome: RestartOutcome,
    trace: Vec<Point>,
}

impl SearchRunner {
    /// Runs the search with an RNG built from `config.seed`.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidParameter`] for an invalid config or a start point
    ///   outside `domain`
    /// - [`Error::NonFiniteEvaluation`] if a start point evaluates to NaN or ±∞
    pub fn run<F: Objective>(f: &F, domain: &Domain, config: &SearchConfig) -> Result<SearchResult> {
        Self::run_with_cancel(f, domain, config, None)
    }

    /// Runs the search with an optional cancellation token.
    ///
    /// The token is checked before each restart and before each proposed
    /// move. The first restart always contributes at least its start point.
    pub fn run_with_cancel<F: Objective>(
        f: &F,
        domain: &Domain,
        config: &SearchConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SearchResult> {
        let mut rng = rng_from_seed(config.seed);
        Self::run_with_rng(f, domain, config, &mut rng, cancel)
    }

    /// Runs the search drawing all randomness from `rng`.
    ///
    /// `config.seed` is ignored.
    pub fn run_with_rng<F: Objective, R: Rng>(
        f: &F,
        domain: &Domain,
        config: &SearchConfig,
        rng: &mut R,
        cancel: Option<Arc<AtomicBool>>,
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
        let schedule = config.schedule()?;

        let _span = tracing::debug_span!(
            "search",
            restarts = config.restarts,
            step = config.step,
            annealing = schedule.is_some()
        )
        .entered();

        let seeds: Vec<u64> = (0..config.restarts).map(|_| rng.random()).collect();
        let cancel = cancel.as_deref();

        let walks = run_restarts(f, domain, config, schedule.as_ref(), &seeds, cancel)?;
        let skipped = walks.iter().any(Option::is_none);
        let walks: Vec<Walk> = walks.into_iter().flatten().collect();

        // Strict comparison: the earliest restart wins ties.
        let goal = config.goal;
        let mut best_pos = 0;
        for (pos, walk) in walks.iter().enumerate().skip(1) {
            if goal.is_better(walk.outcome.best_value, walks[best_pos].outcome.best_value) {
                best_pos = pos;
            }
        }

        let best = &walks[best_pos].outcome;
        let (best_point, best_value, best_restart) = (best.best, best.best_value, best.index);
        let cancelled = skipped || walks.iter().any(|w| w.outcome.cancelled);

        tracing::info!(
            x = best_point.x,
            y = best_point.y,
            value = best_value,
            best_restart,
            cancelled,
            "search finished"
        );

        let (restarts, traces): (Vec<_>, Vec<_>) =
            walks.into_iter().map(|w| (w.outcome, w.trace)).unzip();

        Ok(SearchResult {
            best: best_point,
            best_value,
            best_restart,
            restarts,
            trace: config.record_trace.then_some(traces),
            cancelled,
        })
    }
}

/// Runs every restart, yielding `None` for restarts skipped by cancellation.
fn run_restarts<F: Objective>(
    f: &F,
    domain: &Domain,
    config: &SearchConfig,
    schedule: Option<&TemperatureSchedule>,
    seeds: &[u64],
    cancel: Option<&AtomicBool>,
) -> Result<Vec<Option<Walk>>> {
    let restart = |(index, &seed): (usize, &u64)| -> Result<Option<Walk>> {
        if index > 0 && is_cancelled(cancel) {
            return Ok(None);
        }
        let mut rng = create_rng(seed);
        walk(f, domain, config, schedule, index, &mut rng, cancel).map(Some)
    };

    #[cfg(feature = "parallel")]
    if config.parallel {
        use rayon::prelude::*;
        return seeds.par_iter().enumerate().map(&restart).collect();
    }

    seeds.iter().enumerate().map(&restart).collect()
}

fn walk<F: Objective>(
    f: &F,
    domain: &Domain,
    config: &SearchConfig,
    schedule: Option<&TemperatureSchedule>,
    index: usize,
    rng: &mut StdRng,
    cancel: Option<&AtomicBool>,
) -> Result<Walk> {
    let goal = config.goal;
    let start = match config.start {
        Some(p) if index == 0 => p,
        _ => domain.sample(rng),
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
    let mut best = current;
    let mut best_cost = current_cost;
    let mut trace = Vec::new();
    if config.record_trace {
        trace.push(start);
    }

    // Fresh cursor for every restart.
    let mut schedule = schedule.cloned();
    let mut temperature = next_temperature(schedule.as_mut());

    let mut rejections = 0usize;
    let mut moves = 0usize;
    let mut attempts = 0usize;
    let mut cancelled = false;

    while rejections < config.move_retries {
        if is_cancelled(cancel) {
            cancelled = true;
            break;
        }

        let angle = rng.random_range(0.0..core::f64::consts::TAU);
        let candidate = current.towards(angle, config.step);
        let candidate_cost = goal.orient(f.evaluate(candidate));
        attempts += 1;

        let in_bounds = match config.boundary {
            BoundaryCheck::PreMove => domain.contains(&current),
            BoundaryCheck::Candidate => domain.contains(&candidate),
        };

        if in_bounds && accepts(current_cost, candidate_cost, temperature, rng) {
            current = candidate;
            current_cost = candidate_cost;
            moves += 1;
            if config.record_trace {
                trace.push(candidate);
            }
            if current_cost < best_cost {
                best = current;
                best_cost = current_cost;
            }
            temperature = next_temperature(schedule.as_mut());
            rejections = 0;
        } else {
            rejections += 1;
        }
    }

    let best_value = goal.orient(best_cost);
    tracing::debug!(
        restart = index,
        start_x = start.x,
        start_y = start.y,
        moves,
        attempts,
        best_value,
        "restart converged"
    );

    Ok(Walk {
        outcome: RestartOutcome {
            index,
            start,
            end: current,
            best,
            best_value,
            moves,
            attempts,
            final_temperature: temperature.value(),
            cancelled,
        },
        trace,
    })
}

fn next_temperature(schedule: Option<&mut TemperatureSchedule>) -> Temperature {
    schedule
        .and_then(Iterator::next)
        .map_or(Temperature::Off, Temperature::At)
}

fn is_cancelled(cancel: Option<&AtomicBool>) -> bool {
    cancel.is_some_and(|flag| flag.load(Ordering::Relaxed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::reference_surface;
    use crate::search::{Goal, DEFAULT_MOVE_RETRIES};

    fn bowl(x: f64, y: f64) -> f64 {
        (x - 1.0).powi(2) + (y + 0.5).powi(2)
    }

    fn square() -> Domain {
        Domain::square(-2.5, 2.5).unwrap()
    }

    #[test]
    fn test_converges_on_bowl() {
        let config = SearchConfig::new(0.05)
            .with_start(Point::new(2.0, 1.5))
            .with_seed(42);
        let result = SearchRunner::run(&bowl, &square(), &config).unwrap();
        assert!(result.restarts[0].moves > 0);
        assert!(
            result.best.distance(&Point::new(1.0, -0.5)) < 0.15,
            "ended at {:?}",
            result.best
        );
        assert_eq!(result.restarts.len(), 1);
        assert!(!result.cancelled);
    }

    #[test]
    fn test_stagnation_ends_restart() {
        // Every move away from the minimum at the origin is worse.
        let peak = |x: f64, y: f64| x * x + y * y;
        let config = SearchConfig::new(0.1)
            .with_start(Point::new(0.0, 0.0))
            .with_move_retries(7)
            .with_trace(true)
            .with_seed(1);
        let result = SearchRunner::run(&peak, &square(), &config).unwrap();
        let outcome = &result.restarts[0];
        assert_eq!(outcome.moves, 0);
        assert_eq!(outcome.attempts, 7);
        assert_eq!(outcome.end, Point::new(0.0, 0.0));
        assert_eq!(result.trace.unwrap(), vec![vec![Point::new(0.0, 0.0)]]);
        assert_eq!(result.best_value, 0.0);
    }

    #[test]
    fn test_trace_integrity() {
        let config = SearchConfig::new(0.05)
            .with_restarts(5)
            .with_trace(true)
            .with_seed(7);
        let domain = square();
        let result = SearchRunner::run(&reference_surface, &domain, &config).unwrap();
        let trace = result.trace.as_ref().unwrap();
        assert_eq!(trace.len(), 5);
        for (points, restart) in trace.iter().zip(&result.restarts) {
            assert!(!points.is_empty());
            assert!(domain.contains(&points[0]));
            assert_eq!(points[0], restart.start);
            assert_eq!(points.len(), restart.moves + 1);
            for w in points.windows(2) {
                assert!((w[0].distance(&w[1]) - 0.05).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_trace_omitted_by_default() {
        let config = SearchConfig::new(0.05).with_seed(7);
        let result = SearchRunner::run(&bowl, &square(), &config).unwrap();
        assert!(result.trace.is_none());
    }

    #[test]
    fn test_best_is_best_of_restarts() {
        let config = SearchConfig::new(0.05).with_restarts(8).with_seed(11);
        let result = SearchRunner::run(&reference_surface, &square(), &config).unwrap();
        for r in &result.restarts {
            assert!(result.best_value <= r.best_value);
        }
        assert_eq!(result.best, result.restarts[result.best_restart].best);
    }

    #[test]
    fn test_ties_keep_earliest_restart() {
        let flat = |_: f64, _: f64| 1.0;
        let config = SearchConfig::new(0.1).with_restarts(4).with_seed(3);
        let result = SearchRunner::run(&flat, &square(), &config).unwrap();
        assert_eq!(result.best_restart, 0);
    }

    #[test]
    fn test_same_seed_same_result() {
        let config = SearchConfig::new(0.05).with_restarts(3).with_seed(99);
        let a = SearchRunner::run(&reference_surface, &square(), &config).unwrap();
        let b = SearchRunner::run(&reference_surface, &square(), &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_boundary_candidate_stays_inside() {
        // Descends towards x = -inf, so the walk runs into the left edge.
        let slope = |x: f64, _: f64| x;
        let domain = Domain::new(-1.0, 1.0, -1.0, 1.0).unwrap();
        let config = SearchConfig::new(0.1)
            .with_boundary(BoundaryCheck::Candidate)
            .with_trace(true)
            .with_seed(5);
        let result = SearchRunner::run(&slope, &domain, &config).unwrap();
        for p in &result.trace.unwrap()[0] {
            assert!(domain.contains(p));
        }
    }

    #[test]
    fn test_boundary_pre_move_allows_one_excursion() {
        let slope = |x: f64, _: f64| x;
        let domain = Domain::new(-1.0, 1.0, -1.0, 1.0).unwrap();
        let config = SearchConfig::new(0.1).with_trace(true).with_seed(5);
        let result = SearchRunner::run(&slope, &domain, &config).unwrap();
        let points = &result.trace.unwrap()[0];
        let outside = points.iter().filter(|p| !domain.contains(p)).count();
        assert!(outside <= 1);
        if outside == 1 {
            assert!(!domain.contains(points.last().unwrap()));
        }
    }

    #[test]
    fn test_maximize() {
        let cap = |x: f64, y: f64| -(x * x + y * y);
        let config = SearchConfig::new(0.05)
            .with_goal(Goal::Maximize)
            .with_start(Point::new(1.0, 1.0))
            .with_seed(21);
        let result = SearchRunner::run(&cap, &square(), &config).unwrap();
        assert!(result.best.distance(&Point::new(0.0, 0.0)) < 0.15);
        assert!(result.best_value <= 0.0);
    }

    #[test]
    fn test_non_finite_start_fails() {
        let nan = |_: f64, _: f64| f64::NAN;
        let config = SearchConfig::new(0.05).with_seed(1);
        let err = SearchRunner::run(&nan, &square(), &config).unwrap_err();
        assert!(matches!(err, Error::NonFiniteEvaluation { .. }));
    }

    #[test]
    fn test_non_finite_candidates_rejected() {
        // Finite only at the origin, so every candidate is NaN.
        let spike = |x: f64, y: f64| if x == 0.0 && y == 0.0 { 1.0 } else { f64::NAN };
        let config = SearchConfig::new(0.05)
            .with_start(Point::new(0.0, 0.0))
            .with_temperature(1e6)
            .with_seed(1);
        let result = SearchRunner::run(&spike, &square(), &config).unwrap();
        assert_eq!(result.restarts[0].moves, 0);
        assert_eq!(result.best_value, 1.0);
    }

    #[test]
    fn test_start_outside_domain_rejected() {
        let config = SearchConfig::new(0.05).with_start(Point::new(10.0, 0.0));
        let err = SearchRunner::run(&bowl, &square(), &config).unwrap_err();
        assert!(matches!(err, Error::InvalidParameter { name: "start", .. }));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SearchConfig::new(0.05).with_restarts(0);
        assert!(SearchRunner::run(&bowl, &square(), &config).is_err());
    }

    #[test]
    fn test_cancellation() {
        let config = SearchConfig::new(0.05).with_restarts(5).with_seed(42);
        let cancel = Arc::new(AtomicBool::new(true));
        let result = SearchRunner::run_with_cancel(&bowl, &square(), &config, Some(cancel)).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.restarts.len(), 1);
        assert_eq!(result.restarts[0].attempts, 0);
    }

    #[test]
    fn test_injected_rng_is_deterministic() {
        let config = SearchConfig::new(0.05).with_restarts(2);
        let mut a = create_rng(17);
        let mut b = create_rng(17);
        let ra = SearchRunner::run_with_rng(&bowl, &square(), &config, &mut a, None).unwrap();
        let rb = SearchRunner::run_with_rng(&bowl, &square(), &config, &mut b, None).unwrap();
        assert_eq!(ra, rb);
    }

    #[test]
    fn test_annealing_accepts_worsening_moves() {
        let config = SearchConfig::new(0.05)
            .with_temperature(50.0)
            .with_temperature_decrement(0.5)
            .with_boundary(BoundaryCheck::Candidate)
            .with_trace(true)
            .with_seed(8);
        let result = SearchRunner::run(&bowl, &square(), &config).unwrap();
        let points = &result.trace.unwrap()[0];
        let uphill = points
            .windows(2)
            .filter(|w| bowl(w[1].x, w[1].y) > bowl(w[0].x, w[0].y))
            .count();
        assert!(uphill > 0);
    }

    #[test]
    fn test_temperature_pulled_once_per_accepted_move() {
        let config = SearchConfig::new(0.05)
            .with_temperature(10.0)
            .with_temperature_decrement(0.1)
            .with_boundary(BoundaryCheck::Candidate)
            .with_seed(13);
        let schedule = config.schedule().unwrap().unwrap();
        let result = SearchRunner::run(&reference_surface, &square(), &config).unwrap();
        let outcome = &result.restarts[0];
        assert!(outcome.attempts > outcome.moves);
        assert_eq!(
            outcome.final_temperature,
            Some(schedule.temperature_at(outcome.moves as u64))
        );
    }

    #[test]
    fn test_hill_climbing_has_no_temperature() {
        let config = SearchConfig::new(0.05).with_restarts(3).with_seed(13);
        let result = SearchRunner::run(&reference_surface, &square(), &config).unwrap();
        assert!(result.restarts.iter().all(|r| r.final_temperature.is_none()));
    }

    #[test]
    fn test_totals_sum_restarts() {
        let config = SearchConfig::new(0.2).with_step(0.05).with_restarts(4).with_seed(6);
        assert_eq!(config.step, 0.05);
        let result = SearchRunner::run(&reference_surface, &square(), &config).unwrap();
        let moves: usize = result.restarts.iter().map(|r| r.moves).sum();
        let attempts: usize = result.restarts.iter().map(|r| r.attempts).sum();
        assert_eq!(result.total_moves(), moves);
        assert_eq!(result.total_attempts(), attempts);
        assert!(result.total_attempts() >= result.total_moves() + 4 * DEFAULT_MOVE_RETRIES);
    }

    #[test]
    fn test_cold_schedule_matches_hill_climbing_acceptance() {
        let config = SearchConfig::new(0.05)
            .with_temperature(1e-11)
            .with_restarts(20)
            .with_trace(true)
            .with_seed(4);
        let result = SearchRunner::run(&reference_surface, &square(), &config).unwrap();
        for points in result.trace.unwrap() {
            for w in points.windows(2) {
                assert!(reference_surface(w[1].x, w[1].y) < reference_surface(w[0].x, w[0].y));
            }
        }
    }

    #[cfg(feature = "parallel")]
    #[test]
    fn test_parallel_matches_sequential() {
        let config = SearchConfig::new(0.05).with_restarts(6).with_trace(true).with_seed(5);
        let seq = SearchRunner::run(&reference_surface, &square(), &config).unwrap();
        let par = SearchRunner::run(&reference_surface, &square(), &config.clone().with_parallel(true))
            .unwrap();
        assert_eq!(seq, par);
    }
}
