//! Derivative-free local search over two-dimensional scalar fields.
//!
//! One parameterized procedure covers three classic optimizers:
//!
//! - **Hill climbing**: a random-direction walk that only takes strict
//!   improvements and stops after a run of rejected moves.
//! - **Hill climbing with random restarts**: independent hill climbs from
//!   fresh random start points; the best end result wins.
//! - **Simulated annealing**: the same walk, but worsening moves are taken
//!   with Metropolis probability under a linearly cooling temperature.
//!
//! A lattice variant of hill climbing (8 neighbours plus the centre) is
//! available as an alternate mode.
//!
//! # Modules
//!
//! - [`field`]: points, the [`Objective`](field::Objective) trait, search
//!   domains and a reference test surface
//! - [`anneal`]: temperature schedules and the acceptance rule
//! - [`search`]: the unified restart loop, its configuration and results
//! - [`climb`]: the ready-made specializations
//!
//! # Feature Flags
//!
//! | Flag | What it enables |
//! |------|-----------------|
//! | `parallel` | Run restarts on the rayon thread pool |
//! | `serde` | `Serialize`/`Deserialize` on points, domains, configs and results |
//!
//! # Examples
//!
//! ```
//! use u_localsearch::climb::simulated_annealing;
//! use u_localsearch::field::{reference_surface, Domain};
//! use u_localsearch::search::SearchConfig;
//!
//! let domain = Domain::square(-2.5, 2.5)?;
//! let config = SearchConfig::new(0.05).with_seed(7).with_trace(true);
//! let result = simulated_annealing(&reference_surface, 2.0, &domain, &config)?;
//! assert!(result.trace.is_some());
//! # Ok::<(), u_localsearch::Error>(())
//! ```

pub mod anneal;
pub mod climb;
mod error;
pub mod field;
pub mod random;
pub mod search;

pub use error::{Error, Result};
