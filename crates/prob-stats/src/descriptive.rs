//! Descriptive statistics over finite sample sets.
//!
//! Conventions used throughout:
//!
//! - Variance is the **population** variance (denominator `N`), accumulated
//!   with Welford's update. Every summary states this in
//!   [`SummaryStatistics::variance_convention`].
//! - Percentiles use the linear method: position `h = p/100 · (N − 1)`,
//!   interpolating between order statistics `⌊h⌋` and `⌊h⌋ + 1`.
//! - The mode is the most frequent value; ties resolve to the smallest value.
//!
//! Empty or non-finite input is rejected with [`ProbError::InvalidInput`]
//! instead of producing `NaN`.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use prob_core::{ErrorInfo, ProbError};
use serde::{Deserialize, Serialize};

/// Label written next to every variance this crate reports.
pub const VARIANCE_CONVENTION: &str = "population";

/// Summary of a single sample set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryStatistics {
    /// Number of samples.
    pub count: usize,
    /// Arithmetic mean.
    pub mean: f64,
    /// 50th percentile.
    pub median: f64,
    /// Most frequent value, smallest among ties.
    pub mode: f64,
    /// Population variance.
    pub variance: f64,
    /// Square root of [`Self::variance`].
    pub std_dev: f64,
    /// Smallest sample.
    pub min: f64,
    /// Largest sample.
    pub max: f64,
    /// Normalisation used for [`Self::variance`].
    pub variance_convention: String,
    /// Requested percentiles keyed as `p<k>` (for example `p95`, `p2.5`).
    pub percentiles: BTreeMap<String, f64>,
}

impl SummaryStatistics {
    /// Flattens the summary into a statistic-name to value mapping.
    pub fn to_map(&self) -> BTreeMap<String, f64> {
        let mut map = BTreeMap::new();
        map.insert("count".to_string(), self.count as f64);
        map.insert("mean".to_string(), self.mean);
        map.insert("median".to_string(), self.median);
        map.insert("mode".to_string(), self.mode);
        map.insert("variance".to_string(), self.variance);
        map.insert("std_dev".to_string(), self.std_dev);
        map.insert("min".to_string(), self.min);
        map.insert("max".to_string(), self.max);
        for (key, value) in &self.percentiles {
            map.insert(key.clone(), *value);
        }
        map
    }
}

/// Computes the full summary of `values` plus the requested percentiles.
///
/// ```
/// use prob_stats::summarize;
/// let summary = summarize(&[1.0, 2.0, 3.0, 4.0, 5.0], &[25.0, 75.0]).unwrap();
/// assert_eq!(summary.mean, 3.0);
/// assert_eq!(summary.median, 3.0);
/// assert_eq!(summary.variance, 2.0);
/// assert_eq!(summary.percentiles["p25"], 2.0);
/// ```
pub fn summarize(values: &[f64], percentiles: &[f64]) -> Result<SummaryStatistics, ProbError> {
    validate_samples(values)?;
    for &p in percentiles {
        validate_percentile(p)?;
    }
    let sorted = sorted_copy(values);
    let variance = welford_population_variance(values);
    let requested = percentiles
        .iter()
        .map(|&p| (percentile_key(p), percentile_sorted(&sorted, p)))
        .collect();

    Ok(SummaryStatistics {
        count: values.len(),
        mean: kahan_sum(values) / values.len() as f64,
        median: percentile_sorted(&sorted, 50.0),
        mode: mode_sorted(&sorted),
        variance,
        std_dev: variance.sqrt(),
        min: sorted[0],
        max: sorted[sorted.len() - 1],
        variance_convention: VARIANCE_CONVENTION.to_string(),
        percentiles: requested,
    })
}

/// Arithmetic mean using Kahan compensated summation.
pub fn mean(values: &[f64]) -> Result<f64, ProbError> {
    validate_samples(values)?;
    Ok(kahan_sum(values) / values.len() as f64)
}

/// Median, the 50th percentile under the linear method.
pub fn median(values: &[f64]) -> Result<f64, ProbError> {
    percentile(values, 50.0)
}

/// Most frequent value; the smallest value wins ties.
///
/// For continuous samples every value is usually unique, in which case the
/// result is the minimum.
pub fn mode(values: &[f64]) -> Result<f64, ProbError> {
    validate_samples(values)?;
    Ok(mode_sorted(&sorted_copy(values)))
}

/// Population variance (denominator `N`).
pub fn population_variance(values: &[f64]) -> Result<f64, ProbError> {
    validate_samples(values)?;
    Ok(welford_population_variance(values))
}

/// Population standard deviation.
pub fn population_std_dev(values: &[f64]) -> Result<f64, ProbError> {
    population_variance(values).map(f64::sqrt)
}

/// Smallest sample.
pub fn min(values: &[f64]) -> Result<f64, ProbError> {
    validate_samples(values)?;
    Ok(values.iter().copied().fold(f64::INFINITY, f64::min))
}

/// Largest sample.
pub fn max(values: &[f64]) -> Result<f64, ProbError> {
    validate_samples(values)?;
    Ok(values.iter().copied().fold(f64::NEG_INFINITY, f64::max))
}

/// The `p`-th percentile (`p` in `[0, 100]`) by linear interpolation.
///
/// ```
/// use prob_stats::percentile;
/// let data = [1.0, 2.0, 3.0, 4.0];
/// assert_eq!(percentile(&data, 0.0).unwrap(), 1.0);
/// assert_eq!(percentile(&data, 50.0).unwrap(), 2.5);
/// assert_eq!(percentile(&data, 100.0).unwrap(), 4.0);
/// ```
pub fn percentile(values: &[f64], p: f64) -> Result<f64, ProbError> {
    validate_samples(values)?;
    validate_percentile(p)?;
    Ok(percentile_sorted(&sorted_copy(values), p))
}

/// Several percentiles of the same data, sorting once.
pub fn percentiles(values: &[f64], ps: &[f64]) -> Result<Vec<f64>, ProbError> {
    validate_samples(values)?;
    for &p in ps {
        validate_percentile(p)?;
    }
    let sorted = sorted_copy(values);
    Ok(ps.iter().map(|&p| percentile_sorted(&sorted, p)).collect())
}

/// Pearson product-moment correlation of two equally long series.
pub fn pearson_correlation(xs: &[f64], ys: &[f64]) -> Result<f64, ProbError> {
    if xs.len() != ys.len() {
        return Err(ProbError::InvalidInput(
            ErrorInfo::new("correlation-length", "series lengths differ")
                .with_context("x_len", xs.len().to_string())
                .with_context("y_len", ys.len().to_string()),
        ));
    }
    if xs.len() < 2 {
        return Err(ProbError::invalid_input(
            "correlation-size",
            "correlation needs at least two points",
        ));
    }
    validate_samples(xs)?;
    validate_samples(ys)?;
    let mean_x = kahan_sum(xs) / xs.len() as f64;
    let mean_y = kahan_sum(ys) / ys.len() as f64;
    let mut sxy = 0.0;
    let mut sxx = 0.0;
    let mut syy = 0.0;
    for (&x, &y) in xs.iter().zip(ys) {
        let dx = x - mean_x;
        let dy = y - mean_y;
        sxy += dx * dy;
        sxx += dx * dx;
        syy += dy * dy;
    }
    if sxx == 0.0 || syy == 0.0 {
        return Err(ProbError::invalid_input(
            "correlation-constant",
            "correlation is undefined for a constant series",
        ));
    }
    Ok((sxy / (sxx.sqrt() * syy.sqrt())).clamp(-1.0, 1.0))
}

/// Kahan compensated sum.
pub fn kahan_sum(values: &[f64]) -> f64 {
    let mut sum = 0.0;
    let mut compensation = 0.0;
    for &value in values {
        let y = value - compensation;
        let t = sum + y;
        compensation = (t - sum) - y;
        sum = t;
    }
    sum
}

fn welford_population_variance(values: &[f64]) -> f64 {
    let mut count = 0.0;
    let mut mean = 0.0;
    let mut m2 = 0.0;
    for &value in values {
        count += 1.0;
        let delta = value - mean;
        mean += delta / count;
        m2 += delta * (value - mean);
    }
    m2 / count
}

fn validate_samples(values: &[f64]) -> Result<(), ProbError> {
    if values.is_empty() {
        return Err(ProbError::invalid_input(
            "samples-empty",
            "sample set is empty",
        ));
    }
    if let Some(index) = values.iter().position(|value| !value.is_finite()) {
        return Err(ProbError::InvalidInput(
            ErrorInfo::new("samples-non-finite", "sample set contains a non-finite value")
                .with_context("index", index.to_string())
                .with_context("value", values[index].to_string()),
        ));
    }
    Ok(())
}

fn validate_percentile(p: f64) -> Result<(), ProbError> {
    if !(0.0..=100.0).contains(&p) {
        return Err(ProbError::invalid_parameter(
            "percentile-range",
            "percentile must lie in [0, 100]",
            "p",
            p,
        ));
    }
    Ok(())
}

fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_unstable_by(f64::total_cmp);
    sorted
}

fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let h = (n - 1) as f64 * (p / 100.0);
    let lower = h.floor() as usize;
    if lower + 1 >= n {
        return sorted[n - 1];
    }
    let weight = h - lower as f64;
    let (a, b) = (sorted[lower], sorted[lower + 1]);
    // Clamped so rounding can never step past the next order statistic.
    (a + weight * (b - a)).clamp(a, b)
}

fn mode_sorted(sorted: &[f64]) -> f64 {
    let mut best = sorted[0];
    let mut best_count = 0usize;
    let mut idx = 0;
    while idx < sorted.len() {
        let value = sorted[idx];
        let run = sorted[idx..]
            .iter()
            .take_while(|&&other| other.total_cmp(&value) == Ordering::Equal)
            .count();
        // Strictly greater keeps the earliest (smallest) value on ties.
        if run > best_count {
            best = value;
            best_count = run;
        }
        idx += run;
    }
    best
}

fn percentile_key(p: f64) -> String {
    format!("p{p}")
}
