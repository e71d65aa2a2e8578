//! YAML configuration of a generation run.

use std::fs;
use std::path::{Path, PathBuf};

use prob_core::{ErrorInfo, ProbError};
use serde::{Deserialize, Serialize};

use crate::dataset::DatasetKind;
use crate::serde::from_yaml_slice;

/// YAML-configurable parameters governing a generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Master seed every dataset substream is derived from.
    #[serde(default = "default_master_seed")]
    pub master_seed: u64,
    /// Directory fixtures are written to. Must already exist.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Restricts the run to these datasets (empty runs all of them).
    #[serde(default)]
    pub only: Vec<DatasetKind>,
    /// Datasets whose validation failures are logged and skipped instead of
    /// aborting the run.
    #[serde(default)]
    pub optional: Vec<DatasetKind>,
    /// Per-dataset parameters.
    #[serde(default)]
    pub datasets: DatasetParams,
}

fn default_master_seed() -> u64 {
    42
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("data")
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            master_seed: default_master_seed(),
            output_dir: default_output_dir(),
            only: Vec::new(),
            optional: Vec::new(),
            datasets: DatasetParams::default(),
        }
    }
}

impl GeneratorConfig {
    /// Loads a configuration from a YAML file.
    pub fn load(path: &Path) -> Result<Self, ProbError> {
        let bytes = fs::read(path).map_err(|err| {
            ProbError::Io(
                ErrorInfo::new("config-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        from_yaml_slice(&bytes).map_err(|err| match err {
            ProbError::Serde(info) => {
                ProbError::Serde(info.with_context("path", path.display().to_string()))
            }
            other => other,
        })
    }

    /// Datasets selected for this run, in generation order.
    pub fn selected(&self) -> Vec<DatasetKind> {
        DatasetKind::ALL
            .into_iter()
            .filter(|kind| self.only.is_empty() || self.only.contains(kind))
            .collect()
    }

    /// Whether a validation failure in `kind` may be skipped.
    pub fn is_optional(&self, kind: DatasetKind) -> bool {
        self.optional.contains(&kind)
    }
}

/// Parameter blocks for every dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DatasetParams {
    /// See [`CoinFlipParams`].
    pub coin_flip: CoinFlipParams,
    /// See [`FiveCoinParams`].
    pub five_coins: FiveCoinParams,
    /// See [`CentralTendencyParams`].
    pub central_tendency: CentralTendencyParams,
    /// See [`QuantileParams`].
    pub quantiles: QuantileParams,
    /// See [`BoxPlotParams`].
    pub box_plot: BoxPlotParams,
    /// See [`DispersionParams`].
    pub dispersion: DispersionParams,
    /// See [`AdvancedParams`].
    pub advanced: AdvancedParams,
}

/// Law of large numbers series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoinFlipParams {
    /// Number of flips for each point of the series.
    pub flips: Vec<u64>,
    /// Probability of heads.
    pub p: f64,
}

impl Default for CoinFlipParams {
    fn default() -> Self {
        Self {
            flips: (1..=12).map(|exp| 1u64 << exp).collect(),
            p: 0.5,
        }
    }
}

/// Repeated experiments of a few coin flips each.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiveCoinParams {
    /// Coins flipped per experiment.
    pub coins: u64,
    /// Probability of heads.
    pub p: f64,
    /// Number of experiments.
    pub experiments: usize,
}

impl Default for FiveCoinParams {
    fn default() -> Self {
        Self {
            coins: 5,
            p: 0.5,
            experiments: 1000,
        }
    }
}

/// Symmetric vs. skewed sample pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CentralTendencyParams {
    /// Skew-normal shape of the symmetric sample.
    pub normal_shape: f64,
    /// Skew-normal shape of the skewed sample.
    pub skewed_shape: f64,
    /// Samples per distribution.
    pub samples: usize,
}

impl Default for CentralTendencyParams {
    fn default() -> Self {
        Self {
            normal_shape: 0.0,
            skewed_shape: 10.0,
            samples: 1000,
        }
    }
}

/// Quantile demonstration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantileParams {
    /// Skew-normal shape.
    pub shape: f64,
    /// Number of samples.
    pub samples: usize,
    /// High percentiles reported as `percentiles_95_99`.
    pub percentiles: Vec<f64>,
    /// Quartile positions.
    pub quartiles: Vec<f64>,
    /// Decile positions.
    pub deciles: Vec<f64>,
}

impl Default for QuantileParams {
    fn default() -> Self {
        Self {
            shape: 10.0,
            samples: 1000,
            percentiles: vec![95.0, 99.0],
            quartiles: vec![25.0, 50.0, 75.0],
            deciles: (1..10).map(|d| f64::from(d) * 10.0).collect(),
        }
    }
}

/// Mean and standard deviation of a normal measurement.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalParams {
    /// Mean.
    pub mean: f64,
    /// Standard deviation.
    pub std_dev: f64,
}

impl NormalParams {
    /// Convenience constructor.
    pub const fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }
}

/// One species of the iris-like table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesParams {
    /// Species name, used as the JSON key.
    pub name: String,
    /// Sepal length distribution.
    pub sepal_length: NormalParams,
    /// Sepal width distribution.
    pub sepal_width: NormalParams,
}

/// Box plot source tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxPlotParams {
    /// Rows per species.
    pub samples_per_species: usize,
    /// Species of the iris-like table.
    pub species: Vec<SpeciesParams>,
    /// Rows of the tips-like table.
    pub tip_rows: usize,
    /// Mean of the exponential part of a bill.
    pub bill_scale: f64,
    /// Constant added to every bill.
    pub bill_offset: f64,
    /// Tip as a fraction of the bill.
    pub tip_rate: NormalParams,
    /// Day labels, drawn uniformly.
    pub days: Vec<String>,
    /// Smoker labels, drawn uniformly.
    pub smoker: Vec<String>,
}

impl Default for BoxPlotParams {
    fn default() -> Self {
        let species = |name: &str, length: NormalParams, width: NormalParams| SpeciesParams {
            name: name.to_string(),
            sepal_length: length,
            sepal_width: width,
        };
        Self {
            samples_per_species: 50,
            species: vec![
                species("setosa", NormalParams::new(5.0, 0.3), NormalParams::new(3.4, 0.4)),
                species("versicolor", NormalParams::new(5.9, 0.5), NormalParams::new(2.8, 0.3)),
                species("virginica", NormalParams::new(6.6, 0.6), NormalParams::new(3.0, 0.3)),
            ],
            tip_rows: 244,
            bill_scale: 15.0,
            bill_offset: 5.0,
            tip_rate: NormalParams::new(0.15, 0.05),
            days: ["Thu", "Fri", "Sat", "Sun"].map(String::from).to_vec(),
            smoker: ["Yes", "No"].map(String::from).to_vec(),
        }
    }
}

/// Dispersion demonstration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DispersionParams {
    /// Skew-normal shape.
    pub shape: f64,
    /// Number of samples.
    pub samples: usize,
}

impl Default for DispersionParams {
    fn default() -> Self {
        Self {
            shape: 10.0,
            samples: 1000,
        }
    }
}

/// Correlated scatter with density contours.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvancedParams {
    /// Number of scatter points.
    pub points: usize,
    /// Mean vector.
    pub mean: [f64; 2],
    /// Covariance matrix.
    pub cov: [[f64; 2]; 2],
    /// Category labels of the overlay.
    pub categories: Vec<String>,
    /// Category weights, one per label.
    pub category_weights: Vec<f64>,
    /// Density grid resolution along each axis.
    pub grid_size: usize,
}

impl Default for AdvancedParams {
    fn default() -> Self {
        Self {
            points: 500,
            mean: [0.0, 0.0],
            cov: [[1.0, 0.7], [0.7, 1.0]],
            categories: ["A", "B", "C"].map(String::from).to_vec(),
            category_weights: vec![0.4, 0.35, 0.25],
            grid_size: 50,
        }
    }
}
