//! Exact counting helpers and their log-space counterparts.

use prob_core::{ErrorInfo, ProbError};

/// Below this argument `ln n!` is summed term by term; above it the Stirling
/// series is accurate to well under one ulp.
const LN_FACTORIAL_DIRECT_LIMIT: u64 = 256;

fn overflow(code: &str, what: String) -> ProbError {
    ProbError::NumericOverflow(
        ErrorInfo::new(code, format!("{what} exceeds the exact u128 range"))
            .with_hint("use the log-space variant for large arguments"),
    )
}

/// `n!` computed exactly. Overflows for `n > 34`.
///
/// ```
/// use prob_stats::factorial;
/// assert_eq!(factorial(5).unwrap(), 120);
/// assert!(factorial(35).is_err());
/// ```
pub fn factorial(n: u64) -> Result<u128, ProbError> {
    (1..=n as u128).try_fold(1u128, |acc, i| {
        acc.checked_mul(i)
            .ok_or_else(|| overflow("factorial-overflow", format!("{n}!")))
    })
}

/// Number of ordered selections of `k` items out of `n`, `n! / (n − k)!`.
pub fn permutations(n: u64, k: u64) -> Result<u128, ProbError> {
    check_k(n, k)?;
    ((n - k + 1) as u128..=n as u128).try_fold(1u128, |acc, i| {
        acc.checked_mul(i)
            .ok_or_else(|| overflow("permutations-overflow", format!("P({n}, {k})")))
    })
}

/// Binomial coefficient `C(n, k)` computed exactly.
///
/// Uses the multiplicative formula with a gcd reduction at each step, so the
/// intermediate product never exceeds the final value by more than a factor
/// of `k`. Returns [`ProbError::NumericOverflow`] when the coefficient itself
/// does not fit in `u128`.
///
/// ```
/// use prob_stats::binomial_coefficient;
/// assert_eq!(binomial_coefficient(5, 3).unwrap(), 10);
/// assert_eq!(binomial_coefficient(52, 5).unwrap(), 2_598_960);
/// ```
pub fn binomial_coefficient(n: u64, k: u64) -> Result<u128, ProbError> {
    check_k(n, k)?;
    let k = k.min(n - k) as u128;
    let n = n as u128;
    let mut result = 1u128;
    for i in 1..=k {
        let numerator = n - k + i;
        let g = gcd(result, i);
        let reduced = result / g;
        let divisor = i / g;
        result = reduced
            .checked_mul(numerator / divisor)
            .ok_or_else(|| overflow("binomial-overflow", format!("C({n}, {k})")))?;
    }
    Ok(result)
}

/// Natural logarithm of `n!`.
pub fn ln_factorial(n: u64) -> f64 {
    if n < LN_FACTORIAL_DIRECT_LIMIT {
        return (2..=n).map(|i| (i as f64).ln()).sum();
    }
    let x = n as f64;
    let inv = 1.0 / x;
    let inv2 = inv * inv;
    let series = inv * (1.0 / 12.0 - inv2 * (1.0 / 360.0 - inv2 * (1.0 / 1260.0 - inv2 / 1680.0)));
    x * x.ln() - x + 0.5 * (2.0 * std::f64::consts::PI * x).ln() + series
}

/// Natural logarithm of `C(n, k)` as a sum of log-factorials.
pub fn ln_binomial_coefficient(n: u64, k: u64) -> Result<f64, ProbError> {
    check_k(n, k)?;
    Ok(ln_factorial(n) - ln_factorial(k) - ln_factorial(n - k))
}

fn check_k(n: u64, k: u64) -> Result<(), ProbError> {
    if k > n {
        return Err(ProbError::InvalidParameter(
            ErrorInfo::new("k-exceeds-n", "k must not exceed n")
                .with_context("n", n.to_string())
                .with_context("k", k.to_string()),
        ));
    }
    Ok(())
}

fn gcd(mut a: u128, mut b: u128) -> u128 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}
