//! Ready-made search configurations.
//!
//! - [`hill_climb`]: one restart, strict improvements only
//! - [`hill_climb_random_restart`]: `N` independent hill climbs, best kept
//! - [`simulated_annealing`]: one restart with a linearly cooling temperature
//! - [`grid_hill_climb`]: steepest descent over the 8-neighbour lattice
//!
//! The first three set the restart count and temperature on a copy of the
//! supplied [`SearchConfig`] and delegate to [`SearchRunner`]; every other
//! knob (step, seed, trace, goal, boundary policy) is taken as given.
//!
//! # Examples
//!
//! ```
//! use u_localsearch::climb::hill_climb_random_restart;
//! use u_localsearch::field::{reference_surface, Domain};
//! use u_localsearch::search::SearchConfig;
//!
//! let domain = Domain::square(-2.5, 2.5).unwrap();
//! let config = SearchConfig::new(0.05).with_seed(42);
//! let result = hill_climb_random_restart(&reference_surface, 10, &domain, &config).unwrap();
//! assert_eq!(result.restarts.len(), 10);
//! ```

mod grid;

pub use grid::grid_hill_climb;

use crate::error::Result;
use crate::field::{Domain, Objective};
use crate::search::{SearchConfig, SearchResult, SearchRunner};

/// Hill climbing from a single start point.
pub fn hill_climb<F: Objective>(f: &F, domain: &Domain, config: &SearchConfig) -> Result<SearchResult> {
    let config = config.clone().with_restarts(1).without_temperature();
    SearchRunner::run(f, domain, &config)
}

/// Hill climbing repeated from `restarts` random start points.
pub fn hill_climb_random_restart<F: Objective>(
    f: &F,
    restarts: usize,
    domain: &Domain,
    config: &SearchConfig,
) -> Result<SearchResult> {
    let config = config.clone().with_restarts(restarts).without_temperature();
    SearchRunner::run(f, domain, &config)
}

/// Simulated annealing from a single start point, cooling from `max_temp`.
///
/// The decrement and floor come from `config`.
pub fn simulated_annealing<F: Objective>(
    f: &F,
    max_temp: f64,
    domain: &Domain,
    config: &SearchConfig,
) -> Result<SearchResult> {
    let config = config.clone().with_restarts(1).with_temperature(max_temp);
    SearchRunner::run(f, domain, &config)
}
