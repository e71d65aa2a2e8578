#![deny(missing_docs)]
//! Statistics primitives for the probability fixture generator.
//!
//! - [`descriptive`]: summaries, percentiles and correlation.
//! - [`combinatorics`]: exact factorials and binomial coefficients.
//! - [`theoretical`]: binomial PMF and full theoretical distributions.
//! - [`kde`]: bivariate Gaussian kernel density estimation.

pub mod combinatorics;
pub mod descriptive;
pub mod kde;
pub mod theoretical;

pub use combinatorics::{
    binomial_coefficient, factorial, ln_binomial_coefficient, ln_factorial, permutations,
};
pub use descriptive::{
    kahan_sum, max, mean, median, min, mode, pearson_correlation, percentile, percentiles,
    population_std_dev, population_variance, summarize, SummaryStatistics, VARIANCE_CONVENTION,
};
pub use kde::{linspace, meshgrid, GaussianKde2d};
pub use theoretical::{
    binomial_pmf, theoretical_binomial, TheoreticalDistribution, MAX_THEORETICAL_TRIALS,
};
