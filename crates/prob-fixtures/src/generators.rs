//! The dataset routines.
//!
//! Each `generate_*` function draws everything it needs from the handle it is
//! given and returns a typed document whose field names are the JSON keys the
//! visualization layer reads. [`build_records`] turns them into
//! [`FixtureRecord`]s.

use std::collections::BTreeMap;

use prob_core::{ErrorInfo, ProbError, RngHandle};
use prob_stats::{
    linspace, max, meshgrid, min, pearson_correlation, percentiles, summarize,
    theoretical_binomial, GaussianKde2d, VARIANCE_CONVENTION,
};
use serde::{Deserialize, Serialize};

use crate::config::{
    AdvancedParams, BoxPlotParams, CentralTendencyParams, CoinFlipParams, DatasetParams,
    DispersionParams, FiveCoinParams, QuantileParams,
};
use crate::dataset::DatasetKind;
use crate::fixture::FixtureRecord;
use crate::sampling::{
    sample_binomial, sample_bivariate_normal, sample_categorical, sample_exponential,
    sample_normal, sample_skew_normal,
};

/// `coin_flip_law_of_large_numbers.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoinFlipFixture {
    /// Flips per point.
    pub n_flips: Vec<u64>,
    /// Heads observed for each point.
    pub heads_count: Vec<u64>,
    /// `heads_count / n_flips`.
    pub proportion_heads: Vec<f64>,
    /// Probability of heads the proportions converge to.
    pub expected_value: f64,
}

/// `probability_distribution_5_coins.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiveCoinFixture {
    /// Head counts that occurred at least once, ascending.
    pub heads_values: Vec<u64>,
    /// Occurrences of each entry of `heads_values`.
    pub observed_counts: Vec<u64>,
    /// `observed_counts / n_experiments`.
    pub observed_probabilities: Vec<f64>,
    /// Binomial PMF for every possible head count.
    pub theoretical_probabilities: Vec<f64>,
    /// Number of experiments.
    pub n_experiments: usize,
}

/// `central_tendency_{normal,skewed}.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CentralTendencyFixture {
    /// Samples.
    pub values: Vec<f64>,
    /// Mean.
    pub mean: f64,
    /// Median.
    pub median: f64,
    /// Mode, smallest value among ties.
    pub mode: f64,
    /// `normal` or `skewed`.
    pub distribution_type: String,
}

/// `quantiles_data.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuantilesFixture {
    /// Samples.
    pub values: Vec<f64>,
    /// High percentiles, 95th and 99th by default.
    pub percentiles_95_99: Vec<f64>,
    /// Quartiles.
    pub quartiles: Vec<f64>,
    /// Deciles.
    pub deciles: Vec<f64>,
    /// Smallest sample.
    pub min_value: f64,
    /// Largest sample.
    pub max_value: f64,
}

/// Measurements of one iris-like species.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesMeasurements {
    /// Sepal lengths.
    pub sepal_length: Vec<f64>,
    /// Sepal widths.
    pub sepal_width: Vec<f64>,
}

/// Tips-like restaurant table, one entry per row in each column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TipsData {
    /// Bill totals.
    pub total_bill: Vec<f64>,
    /// Tips.
    pub tip: Vec<f64>,
    /// Day labels.
    pub day: Vec<String>,
    /// Smoker labels.
    pub smoker: Vec<String>,
}

/// `boxplot_data.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxPlotFixture {
    /// Iris-like measurements keyed by species.
    pub iris_data: BTreeMap<String, SpeciesMeasurements>,
    /// Tips-like table.
    pub tips_data: TipsData,
}

/// Mean ± one and two standard deviations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StdBands {
    /// `mean − 2σ`.
    pub mean_minus_2std: f64,
    /// `mean − σ`.
    pub mean_minus_1std: f64,
    /// Mean.
    pub mean: f64,
    /// `mean + σ`.
    pub mean_plus_1std: f64,
    /// `mean + 2σ`.
    pub mean_plus_2std: f64,
}

/// `dispersion_data.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DispersionFixture {
    /// Samples.
    pub values: Vec<f64>,
    /// Mean.
    pub mean: f64,
    /// Population variance.
    pub variance: f64,
    /// Population standard deviation.
    pub standard_deviation: f64,
    /// Always `population`.
    pub variance_convention: String,
    /// Standard deviation bands.
    pub std_bands: StdBands,
}

/// Scatter points with their category overlay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterData {
    /// x coordinates.
    pub x: Vec<f64>,
    /// y coordinates.
    pub y: Vec<f64>,
    /// Category label per point.
    pub category: Vec<String>,
}

/// Density evaluated on a regular mesh; row `i` holds `y_grid[i][..]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContourData {
    /// x coordinate of every mesh cell.
    pub x_grid: Vec<Vec<f64>>,
    /// y coordinate of every mesh cell.
    pub y_grid: Vec<Vec<f64>>,
    /// Kernel density estimate at every mesh cell.
    pub density: Vec<Vec<f64>>,
}

/// `advanced_visualization_data.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdvancedFixture {
    /// Scatter points.
    pub scatter_data: ScatterData,
    /// Density contours.
    pub contour_data: ContourData,
    /// Pearson correlation of the scatter points.
    pub correlation: f64,
}

fn require_samples(code: &str, parameter: &str, count: usize) -> Result<(), ProbError> {
    if count == 0 {
        return Err(ProbError::invalid_parameter(
            code,
            format!("{parameter} must be at least 1"),
            parameter,
            count,
        ));
    }
    Ok(())
}

/// Proportion of heads for growing numbers of flips.
pub fn generate_coin_flip(
    params: &CoinFlipParams,
    rng: &mut RngHandle,
) -> Result<CoinFlipFixture, ProbError> {
    if let Some(position) = params.flips.iter().position(|&n| n == 0) {
        return Err(ProbError::InvalidParameter(
            ErrorInfo::new("coin-flip-zero", "every point needs at least one flip")
                .with_context("index", position.to_string()),
        ));
    }
    let mut heads_count = Vec::with_capacity(params.flips.len());
    for &n in &params.flips {
        let draw = sample_binomial(n, params.p, 1, rng)?;
        heads_count.push(draw.values()[0]);
    }
    let proportion_heads = heads_count
        .iter()
        .zip(&params.flips)
        .map(|(&heads, &n)| heads as f64 / n as f64)
        .collect();
    Ok(CoinFlipFixture {
        n_flips: params.flips.clone(),
        heads_count,
        proportion_heads,
        expected_value: params.p,
    })
}

/// Observed head counts over repeated experiments next to the binomial PMF.
pub fn generate_five_coin_distribution(
    params: &FiveCoinParams,
    rng: &mut RngHandle,
) -> Result<FiveCoinFixture, ProbError> {
    require_samples("five-coins-experiments", "experiments", params.experiments)?;
    let samples = sample_binomial(params.coins, params.p, params.experiments, rng)?;
    let mut tally: BTreeMap<u64, u64> = BTreeMap::new();
    for &heads in samples.values() {
        *tally.entry(heads).or_default() += 1;
    }
    let theoretical = theoretical_binomial(params.coins, params.p)?;
    let experiments = params.experiments as f64;
    Ok(FiveCoinFixture {
        heads_values: tally.keys().copied().collect(),
        observed_counts: tally.values().copied().collect(),
        observed_probabilities: tally.values().map(|&c| c as f64 / experiments).collect(),
        theoretical_probabilities: theoretical.probabilities,
        n_experiments: params.experiments,
    })
}

fn central_tendency(
    shape: f64,
    samples: usize,
    distribution_type: &str,
    rng: &mut RngHandle,
) -> Result<CentralTendencyFixture, ProbError> {
    let values = sample_skew_normal(shape, samples, rng)?.into_values();
    let summary = summarize(&values, &[])?;
    Ok(CentralTendencyFixture {
        values,
        mean: summary.mean,
        median: summary.median,
        mode: summary.mode,
        distribution_type: distribution_type.to_string(),
    })
}

/// A symmetric and a skewed sample with their mean, median and mode.
pub fn generate_central_tendency(
    params: &CentralTendencyParams,
    rng: &mut RngHandle,
) -> Result<(CentralTendencyFixture, CentralTendencyFixture), ProbError> {
    require_samples("central-tendency-samples", "samples", params.samples)?;
    let normal = central_tendency(params.normal_shape, params.samples, "normal", rng)?;
    let skewed = central_tendency(params.skewed_shape, params.samples, "skewed", rng)?;
    Ok((normal, skewed))
}

/// Percentiles, quartiles and deciles of a skewed sample.
pub fn generate_quantiles(
    params: &QuantileParams,
    rng: &mut RngHandle,
) -> Result<QuantilesFixture, ProbError> {
    require_samples("quantiles-samples", "samples", params.samples)?;
    let values = sample_skew_normal(params.shape, params.samples, rng)?.into_values();
    Ok(QuantilesFixture {
        percentiles_95_99: percentiles(&values, &params.percentiles)?,
        quartiles: percentiles(&values, &params.quartiles)?,
        deciles: percentiles(&values, &params.deciles)?,
        min_value: min(&values)?,
        max_value: max(&values)?,
        values,
    })
}

/// Iris-like and tips-like tables for box plots.
pub fn generate_box_plot(
    params: &BoxPlotParams,
    rng: &mut RngHandle,
) -> Result<BoxPlotFixture, ProbError> {
    require_samples("box-plot-species-rows", "samples_per_species", params.samples_per_species)?;
    require_samples("box-plot-tip-rows", "tip_rows", params.tip_rows)?;
    let n = params.samples_per_species;

    // All lengths first, then all widths.
    let mut lengths = Vec::with_capacity(params.species.len());
    for species in &params.species {
        let dist = species.sepal_length;
        lengths.push(sample_normal(dist.mean, dist.std_dev, n, rng)?.into_values());
    }
    let mut iris_data = BTreeMap::new();
    for (species, sepal_length) in params.species.iter().zip(lengths) {
        let dist = species.sepal_width;
        let sepal_width = sample_normal(dist.mean, dist.std_dev, n, rng)?.into_values();
        iris_data.insert(
            species.name.clone(),
            SpeciesMeasurements {
                sepal_length,
                sepal_width,
            },
        );
    }

    let rows = params.tip_rows;
    let total_bill: Vec<f64> = sample_exponential(params.bill_scale, rows, rng)?
        .into_values()
        .into_iter()
        .map(|bill| bill + params.bill_offset)
        .collect();
    let rates = sample_normal(params.tip_rate.mean, params.tip_rate.std_dev, rows, rng)?;
    let tip = total_bill
        .iter()
        .zip(rates.values())
        .map(|(bill, rate)| bill * rate)
        .collect();
    let day = sample_categorical(&params.days, None, rows, rng)?.into_values();
    let smoker = sample_categorical(&params.smoker, None, rows, rng)?.into_values();

    Ok(BoxPlotFixture {
        iris_data,
        tips_data: TipsData {
            total_bill,
            tip,
            day,
            smoker,
        },
    })
}

/// Mean, population variance and standard deviation bands of a skewed sample.
pub fn generate_dispersion(
    params: &DispersionParams,
    rng: &mut RngHandle,
) -> Result<DispersionFixture, ProbError> {
    require_samples("dispersion-samples", "samples", params.samples)?;
    let values = sample_skew_normal(params.shape, params.samples, rng)?.into_values();
    let summary = summarize(&values, &[])?;
    let (mean, sd) = (summary.mean, summary.std_dev);
    Ok(DispersionFixture {
        values,
        mean,
        variance: summary.variance,
        standard_deviation: sd,
        variance_convention: VARIANCE_CONVENTION.to_string(),
        std_bands: StdBands {
            mean_minus_2std: mean - 2.0 * sd,
            mean_minus_1std: mean - sd,
            mean,
            mean_plus_1std: mean + sd,
            mean_plus_2std: mean + 2.0 * sd,
        },
    })
}

/// Correlated scatter, its kernel density on a mesh and a category overlay.
pub fn generate_advanced_visualization(
    params: &AdvancedParams,
    rng: &mut RngHandle,
) -> Result<AdvancedFixture, ProbError> {
    require_samples("advanced-points", "points", params.points)?;
    if params.grid_size < 2 {
        return Err(ProbError::invalid_parameter(
            "advanced-grid",
            "grid_size must be at least 2",
            "grid_size",
            params.grid_size,
        ));
    }
    let (xs, ys) = sample_bivariate_normal(params.mean, params.cov, params.points, rng)?;
    let (xs, ys) = (xs.into_values(), ys.into_values());
    let category = sample_categorical(
        &params.categories,
        Some(params.category_weights.as_slice()),
        params.points,
        rng,
    )?
    .into_values();

    let kde = GaussianKde2d::fit(&xs, &ys)?;
    let x_axis = linspace(min(&xs)?, max(&xs)?, params.grid_size);
    let y_axis = linspace(min(&ys)?, max(&ys)?, params.grid_size);
    let density = kde.evaluate_grid(&x_axis, &y_axis);
    let (x_grid, y_grid) = meshgrid(&x_axis, &y_axis);
    let correlation = pearson_correlation(&xs, &ys)?;

    Ok(AdvancedFixture {
        scatter_data: ScatterData {
            x: xs,
            y: ys,
            category,
        },
        contour_data: ContourData {
            x_grid,
            y_grid,
            density,
        },
        correlation,
    })
}

/// Runs the routine for `kind` and wraps its documents as fixture records.
pub fn build_records(
    kind: DatasetKind,
    params: &DatasetParams,
    rng: &mut RngHandle,
) -> Result<Vec<FixtureRecord>, ProbError> {
    let files = kind.file_names();
    match kind {
        DatasetKind::CoinFlip => {
            let doc = generate_coin_flip(&params.coin_flip, rng)?;
            Ok(vec![FixtureRecord::new(kind, files[0], &doc)?])
        }
        DatasetKind::FiveCoinDistribution => {
            let doc = generate_five_coin_distribution(&params.five_coins, rng)?;
            Ok(vec![FixtureRecord::new(kind, files[0], &doc)?])
        }
        DatasetKind::CentralTendency => {
            let (normal, skewed) = generate_central_tendency(&params.central_tendency, rng)?;
            Ok(vec![
                FixtureRecord::new(kind, files[0], &normal)?,
                FixtureRecord::new(kind, files[1], &skewed)?,
            ])
        }
        DatasetKind::Quantiles => {
            let doc = generate_quantiles(&params.quantiles, rng)?;
            Ok(vec![FixtureRecord::new(kind, files[0], &doc)?])
        }
        DatasetKind::BoxPlot => {
            let doc = generate_box_plot(&params.box_plot, rng)?;
            Ok(vec![FixtureRecord::new(kind, files[0], &doc)?])
        }
        DatasetKind::Dispersion => {
            let doc = generate_dispersion(&params.dispersion, rng)?;
            Ok(vec![FixtureRecord::new(kind, files[0], &doc)?])
        }
        DatasetKind::AdvancedVisualization => {
            let doc = generate_advanced_visualization(&params.advanced, rng)?;
            Ok(vec![FixtureRecord::new(kind, files[0], &doc)?])
        }
    }
}
