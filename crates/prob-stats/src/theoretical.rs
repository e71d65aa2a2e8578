//! Closed-form binomial probabilities used to cross-check sampled data.

use prob_core::{ErrorInfo, ProbError};
use serde::{Deserialize, Serialize};

use crate::combinatorics::{binomial_coefficient, ln_binomial_coefficient};

/// Binomial probabilities `P(X = k)` for `k = 0..=n`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TheoreticalDistribution {
    /// Number of trials.
    pub n: u64,
    /// Success probability per trial.
    pub p: f64,
    /// Probability of exactly `k` successes at index `k`.
    pub probabilities: Vec<f64>,
}

impl TheoreticalDistribution {
    /// Probability of `k` successes, `None` when `k > n`.
    pub fn probability(&self, k: u64) -> Option<f64> {
        self.probabilities.get(k as usize).copied()
    }

    /// Expected number of successes, `n · p`.
    pub fn expected_value(&self) -> f64 {
        self.n as f64 * self.p
    }
}

/// Largest `n` [`theoretical_binomial`] tabulates; larger values are rejected
/// with `InvalidParameter` instead of allocating `n + 1` probabilities.
pub const MAX_THEORETICAL_TRIALS: u64 = 1_000_000;

/// `P(X = k)` for `X ~ Binomial(n, p)`.
///
/// The coefficient `C(n, k)` is exact integer arithmetic whenever it fits in
/// `u128`, and the product with `p^k (1 − p)^(n − k)` is then taken in
/// floating point as long as both powers and their product are normal
/// floats. Otherwise the whole expression is evaluated in log space.
///
/// ```
/// use prob_stats::binomial_pmf;
/// assert_eq!(binomial_pmf(5, 3, 0.5).unwrap(), 0.3125);
/// ```
pub fn binomial_pmf(n: u64, k: u64, p: f64) -> Result<f64, ProbError> {
    validate_probability(p)?;
    if k > n {
        return Err(ProbError::InvalidParameter(
            ErrorInfo::new("pmf-k-range", "k must lie in [0, n]")
                .with_context("n", n.to_string())
                .with_context("k", k.to_string()),
        ));
    }
    if p == 0.0 {
        return Ok(if k == 0 { 1.0 } else { 0.0 });
    }
    if p == 1.0 {
        return Ok(if k == n { 1.0 } else { 0.0 });
    }
    let coefficient = match binomial_coefficient(n, k) {
        Ok(coefficient) => Some(coefficient as f64),
        Err(ProbError::NumericOverflow(_)) => None,
        Err(other) => return Err(other),
    };
    if let Some(coefficient) = coefficient {
        let successes = pow_u64(p, k);
        let failures = pow_u64(1.0 - p, n - k);
        let powers = successes * failures;
        if successes.is_normal() && failures.is_normal() && powers.is_normal() {
            return Ok(coefficient * powers);
        }
    }
    let ln_coefficient = ln_binomial_coefficient(n, k)?;
    let ln_powers = k as f64 * p.ln() + (n - k) as f64 * (-p).ln_1p();
    Ok((ln_coefficient + ln_powers).exp())
}

/// Full binomial distribution for `n` trials.
///
/// `n` is capped at [`MAX_THEORETICAL_TRIALS`].
pub fn theoretical_binomial(n: u64, p: f64) -> Result<TheoreticalDistribution, ProbError> {
    validate_probability(p)?;
    if n > MAX_THEORETICAL_TRIALS {
        return Err(ProbError::InvalidParameter(
            ErrorInfo::new("pmf-n-too-large", "too many trials to tabulate")
                .with_context("n", n.to_string())
                .with_context("max", MAX_THEORETICAL_TRIALS.to_string()),
        ));
    }
    let probabilities = (0..=n)
        .map(|k| binomial_pmf(n, k, p))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(TheoreticalDistribution {
        n,
        p,
        probabilities,
    })
}

fn validate_probability(p: f64) -> Result<(), ProbError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(ProbError::invalid_parameter(
            "probability-range",
            "probability must lie in [0, 1]",
            "p",
            p,
        ));
    }
    Ok(())
}

fn pow_u64(base: f64, exponent: u64) -> f64 {
    match i32::try_from(exponent) {
        Ok(exp) => base.powi(exp),
        Err(_) => base.powf(exponent as f64),
    }
}
