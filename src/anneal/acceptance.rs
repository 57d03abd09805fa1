//! Metropolis acceptance criterion (minimization).

use super::Temperature;
use rand::Rng;

/// Probability of moving from a point valued `current` to one valued
/// `candidate`.
///
/// Strict improvements return `1.0`. With [`Temperature::Off`] anything
/// else returns `0.0`; with [`Temperature::At`] it is `exp((current − candidate) / T)`.
/// Non-finite candidates always return `0.0`.
pub fn acceptance_probability(current: f64, candidate: f64, temperature: Temperature) -> f64 {
    if !candidate.is_finite() {
        return 0.0;
    }
    if candidate < current {
        return 1.0;
    }
    match temperature {
        Temperature::Off => 0.0,
        Temperature::At(t) => ((current - candidate) / t).exp(),
    }
}

/// Decides whether to take the move with [`acceptance_probability`].
///
/// Draws from `rng` only under [`Temperature::At`] when the probability lies
/// strictly between 0 and 1.
pub fn accepts<R: Rng>(current: f64, candidate: f64, temperature: Temperature, rng: &mut R) -> bool {
    let probability = acceptance_probability(current, candidate, temperature);
    match temperature {
        Temperature::At(_) if probability > 0.0 && probability < 1.0 => {
            rng.random::<f64>() < probability
        }
        _ => probability >= 1.0,
    }
}
