//! Seeded samplers for the distributions the fixtures draw from.
//!
//! Every sampler takes the caller's [`RngHandle`] explicitly and returns a
//! [`SampleSet`] of exactly the requested length. Parameters are validated
//! before any draw is made.

use prob_core::{ErrorInfo, ProbError, RngHandle};
use rand::distributions::WeightedIndex;
use rand::Rng;
use rand_distr::{Binomial, Distribution, Exp, Normal, SkewNormal, StandardNormal};
use serde::{Deserialize, Serialize};

/// Ordered samples drawn from a named distribution. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleSet<T> {
    distribution: String,
    values: Vec<T>,
}

impl<T> SampleSet<T> {
    fn new(distribution: String, values: Vec<T>) -> Self {
        Self {
            distribution,
            values,
        }
    }

    /// Description of the distribution and its parameters.
    pub fn distribution(&self) -> &str {
        &self.distribution
    }

    /// The samples in draw order.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Number of samples.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// True when no samples were drawn.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Consumes the set and returns the samples.
    pub fn into_values(self) -> Vec<T> {
        self.values
    }
}

fn check_probability(code: &str, p: f64) -> Result<(), ProbError> {
    if !(0.0..=1.0).contains(&p) {
        return Err(ProbError::invalid_parameter(
            code,
            "probability must lie in [0, 1]",
            "p",
            p,
        ));
    }
    Ok(())
}

fn check_finite(code: &str, parameter: &str, value: f64) -> Result<(), ProbError> {
    if !value.is_finite() {
        return Err(ProbError::invalid_parameter(
            code,
            format!("{parameter} must be finite"),
            parameter,
            value,
        ));
    }
    Ok(())
}

fn distr_error(code: &str, err: impl ToString) -> ProbError {
    ProbError::InvalidParameter(ErrorInfo::new(code, err.to_string()))
}

/// Number of successes in `trials` Bernoulli(`p`) trials, `count` times.
pub fn sample_binomial(
    trials: u64,
    p: f64,
    count: usize,
    rng: &mut RngHandle,
) -> Result<SampleSet<u64>, ProbError> {
    check_probability("binomial-p", p)?;
    let dist = Binomial::new(trials, p).map_err(|err| distr_error("binomial-new", err))?;
    let values = (0..count).map(|_| dist.sample(rng)).collect();
    Ok(SampleSet::new(format!("binomial(n={trials}, p={p})"), values))
}

/// Standard skew-normal samples (location 0, scale 1) with the given shape.
///
/// Shape 0 is the standard normal distribution.
pub fn sample_skew_normal(
    shape: f64,
    count: usize,
    rng: &mut RngHandle,
) -> Result<SampleSet<f64>, ProbError> {
    check_finite("skew-normal-shape", "shape", shape)?;
    let dist =
        SkewNormal::new(0.0, 1.0, shape).map_err(|err| distr_error("skew-normal-new", err))?;
    let values = (0..count).map(|_| dist.sample(rng)).collect();
    Ok(SampleSet::new(format!("skew-normal(shape={shape})"), values))
}

/// Normal samples with the given mean and standard deviation.
pub fn sample_normal(
    mean: f64,
    std_dev: f64,
    count: usize,
    rng: &mut RngHandle,
) -> Result<SampleSet<f64>, ProbError> {
    check_finite("normal-mean", "mean", mean)?;
    check_finite("normal-std-dev", "std_dev", std_dev)?;
    if std_dev < 0.0 {
        return Err(ProbError::invalid_parameter(
            "normal-std-dev",
            "standard deviation must not be negative",
            "std_dev",
            std_dev,
        ));
    }
    let dist = Normal::new(mean, std_dev).map_err(|err| distr_error("normal-new", err))?;
    let values = (0..count).map(|_| dist.sample(rng)).collect();
    Ok(SampleSet::new(
        format!("normal(mean={mean}, std_dev={std_dev})"),
        values,
    ))
}

/// Exponential samples parameterised by their mean (`scale = 1 / rate`).
pub fn sample_exponential(
    scale: f64,
    count: usize,
    rng: &mut RngHandle,
) -> Result<SampleSet<f64>, ProbError> {
    check_finite("exponential-scale", "scale", scale)?;
    if scale <= 0.0 {
        return Err(ProbError::invalid_parameter(
            "exponential-scale",
            "scale must be positive",
            "scale",
            scale,
        ));
    }
    let dist = Exp::new(1.0 / scale).map_err(|err| distr_error("exponential-new", err))?;
    let values = (0..count).map(|_| dist.sample(rng)).collect();
    Ok(SampleSet::new(format!("exponential(scale={scale})"), values))
}

/// Bivariate normal distribution sampled through the Cholesky factor of its
/// covariance matrix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BivariateNormal {
    mean: [f64; 2],
    // Lower triangular factor [l00, l10, l11].
    factor: [f64; 3],
}

impl BivariateNormal {
    /// Validates the covariance and precomputes its Cholesky factor.
    ///
    /// The covariance must be finite, symmetric and positive definite.
    pub fn new(mean: [f64; 2], cov: [[f64; 2]; 2]) -> Result<Self, ProbError> {
        check_finite("bivariate-mean", "mean[0]", mean[0])?;
        check_finite("bivariate-mean", "mean[1]", mean[1])?;
        if cov.iter().flatten().any(|value| !value.is_finite()) {
            return Err(ProbError::invalid_parameter(
                "bivariate-cov",
                "covariance entries must be finite",
                "cov",
                format!("{cov:?}"),
            ));
        }
        let scale = cov[0][1].abs().max(cov[1][0].abs()).max(1.0);
        if (cov[0][1] - cov[1][0]).abs() > 1e-12 * scale {
            return Err(ProbError::invalid_parameter(
                "bivariate-asymmetric",
                "covariance matrix must be symmetric",
                "cov",
                format!("{cov:?}"),
            ));
        }
        let not_pd = || {
            ProbError::InvalidParameter(
                ErrorInfo::new(
                    "bivariate-not-positive-definite",
                    "covariance matrix is not positive definite",
                )
                .with_context("cov", format!("{cov:?}")),
            )
        };
        if cov[0][0] <= 0.0 {
            return Err(not_pd());
        }
        let l00 = cov[0][0].sqrt();
        let l10 = cov[1][0] / l00;
        let diag = cov[1][1] - l10 * l10;
        if diag <= 0.0 {
            return Err(not_pd());
        }
        Ok(Self {
            mean,
            factor: [l00, l10, diag.sqrt()],
        })
    }

    /// Draws one `(x, y)` pair.
    pub fn sample(&self, rng: &mut RngHandle) -> (f64, f64) {
        let z0: f64 = StandardNormal.sample(rng);
        let z1: f64 = StandardNormal.sample(rng);
        let [l00, l10, l11] = self.factor;
        (
            self.mean[0] + l00 * z0,
            self.mean[1] + l10 * z0 + l11 * z1,
        )
    }
}

/// `count` draws from a bivariate normal, split into x and y sample sets.
pub fn sample_bivariate_normal(
    mean: [f64; 2],
    cov: [[f64; 2]; 2],
    count: usize,
    rng: &mut RngHandle,
) -> Result<(SampleSet<f64>, SampleSet<f64>), ProbError> {
    let dist = BivariateNormal::new(mean, cov)?;
    let (xs, ys): (Vec<f64>, Vec<f64>) = (0..count).map(|_| dist.sample(rng)).unzip();
    let label = format!("bivariate-normal(mean={mean:?}, cov={cov:?})");
    Ok((
        SampleSet::new(format!("{label}.x"), xs),
        SampleSet::new(format!("{label}.y"), ys),
    ))
}

/// Labels drawn with the given weights, or uniformly when `weights` is `None`.
pub fn sample_categorical(
    labels: &[String],
    weights: Option<&[f64]>,
    count: usize,
    rng: &mut RngHandle,
) -> Result<SampleSet<String>, ProbError> {
    if labels.is_empty() {
        return Err(ProbError::invalid_parameter(
            "categorical-labels",
            "at least one category label is required",
            "labels",
            "[]",
        ));
    }
    let values = match weights {
        None => (0..count)
            .map(|_| labels[rng.gen_range(0..labels.len())].clone())
            .collect(),
        Some(weights) => {
            if weights.len() != labels.len() {
                return Err(ProbError::InvalidParameter(
                    ErrorInfo::new(
                        "categorical-weights-length",
                        "one weight per label is required",
                    )
                    .with_context("labels", labels.len().to_string())
                    .with_context("weights", weights.len().to_string()),
                ));
            }
            if weights.iter().any(|w| !w.is_finite()) {
                return Err(ProbError::invalid_parameter(
                    "categorical-weights",
                    "weights must be finite",
                    "weights",
                    format!("{weights:?}"),
                ));
            }
            let index = WeightedIndex::new(weights)
                .map_err(|err| distr_error("categorical-weights", err))?;
            (0..count)
                .map(|_| labels[index.sample(rng)].clone())
                .collect()
        }
    };
    Ok(SampleSet::new(
        format!("categorical(labels={labels:?})"),
        values,
    ))
}
