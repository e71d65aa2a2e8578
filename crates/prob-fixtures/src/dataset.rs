//! Dataset identifiers, their output files and RNG substreams.

use std::fmt;
use std::str::FromStr;

use prob_core::ProbError;
use serde::{Deserialize, Serialize};

/// The datasets the generator knows how to produce, in generation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    /// Law of large numbers series of coin-flip proportions.
    CoinFlip,
    /// Observed vs. theoretical distribution of heads in five flips.
    FiveCoinDistribution,
    /// Mean / median / mode for a symmetric and a skewed sample.
    CentralTendency,
    /// Percentiles, quartiles and deciles of a skewed sample.
    Quantiles,
    /// Source data for box plots (iris-like and tips-like tables).
    BoxPlot,
    /// Mean, variance and standard deviation bands.
    Dispersion,
    /// Correlated scatter data with a density grid and category overlay.
    AdvancedVisualization,
}

impl DatasetKind {
    /// Every dataset in generation order.
    pub const ALL: [DatasetKind; 7] = [
        DatasetKind::CoinFlip,
        DatasetKind::FiveCoinDistribution,
        DatasetKind::CentralTendency,
        DatasetKind::Quantiles,
        DatasetKind::BoxPlot,
        DatasetKind::Dispersion,
        DatasetKind::AdvancedVisualization,
    ];

    /// Stable snake_case identifier.
    pub fn name(self) -> &'static str {
        match self {
            DatasetKind::CoinFlip => "coin_flip",
            DatasetKind::FiveCoinDistribution => "five_coin_distribution",
            DatasetKind::CentralTendency => "central_tendency",
            DatasetKind::Quantiles => "quantiles",
            DatasetKind::BoxPlot => "box_plot",
            DatasetKind::Dispersion => "dispersion",
            DatasetKind::AdvancedVisualization => "advanced_visualization",
        }
    }

    /// Files the dataset writes, relative to the output directory.
    pub fn file_names(self) -> &'static [&'static str] {
        match self {
            DatasetKind::CoinFlip => &["coin_flip_law_of_large_numbers.json"],
            DatasetKind::FiveCoinDistribution => &["probability_distribution_5_coins.json"],
            DatasetKind::CentralTendency => {
                &["central_tendency_normal.json", "central_tendency_skewed.json"]
            }
            DatasetKind::Quantiles => &["quantiles_data.json"],
            DatasetKind::BoxPlot => &["boxplot_data.json"],
            DatasetKind::Dispersion => &["dispersion_data.json"],
            DatasetKind::AdvancedVisualization => &["advanced_visualization_data.json"],
        }
    }

    /// Substream index used to derive this dataset's RNG from the master seed.
    ///
    /// Fixed per variant, so adding or skipping datasets never shifts the
    /// random stream of another one.
    pub fn substream(self) -> u64 {
        match self {
            DatasetKind::CoinFlip => 1,
            DatasetKind::FiveCoinDistribution => 2,
            DatasetKind::CentralTendency => 3,
            DatasetKind::Quantiles => 4,
            DatasetKind::BoxPlot => 5,
            DatasetKind::Dispersion => 6,
            DatasetKind::AdvancedVisualization => 7,
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DatasetKind {
    type Err = ProbError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().replace('-', "_");
        DatasetKind::ALL
            .into_iter()
            .find(|kind| kind.name() == normalized)
            .ok_or_else(|| {
                ProbError::invalid_parameter(
                    "dataset-unknown",
                    "unknown dataset name",
                    "dataset",
                    s,
                )
            })
    }
}
