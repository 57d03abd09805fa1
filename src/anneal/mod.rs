//! Temperature schedules and the Metropolis acceptance rule.
//!
//! Hill climbing and simulated annealing share one code path: the walk
//! consults [`accepts`] with a [`Temperature`], which is either
//! [`Temperature::Off`] (worsening moves always rejected) or a value pulled
//! from a [`TemperatureSchedule`].
//!
//! # References
//!
//! - Metropolis et al. (1953), "Equation of State Calculations by Fast Computing Machines"
//! - Kirkpatrick, Gelatt & Vecchi (1983), "Optimization by Simulated Annealing"

mod acceptance;
mod schedule;

pub use acceptance::{acceptance_probability, accepts};
pub use schedule::{
    Temperature, TemperatureSchedule, DEFAULT_TEMPERATURE_DECREMENT, DEFAULT_TEMPERATURE_FLOOR,
};
