use prob_core::RngHandle;
use prob_fixtures::{
    build_records, generate_advanced_visualization, generate_box_plot, generate_central_tendency,
    generate_coin_flip, generate_dispersion, generate_five_coin_distribution, generate_quantiles,
    DatasetKind, DatasetParams,
};
use serde_json::Value;

fn keys(value: &Value) -> Vec<&str> {
    value
        .as_object()
        .unwrap()
        .keys()
        .map(String::as_str)
        .collect()
}

#[test]
fn every_dataset_writes_the_expected_keys() {
    let params = DatasetParams::default();
    let expected: [(DatasetKind, &[&str]); 7] = [
        (
            DatasetKind::CoinFlip,
            &["expected_value", "heads_count", "n_flips", "proportion_heads"],
        ),
        (
            DatasetKind::FiveCoinDistribution,
            &[
                "heads_values",
                "n_experiments",
                "observed_counts",
                "observed_probabilities",
                "theoretical_probabilities",
            ],
        ),
        (
            DatasetKind::CentralTendency,
            &["distribution_type", "mean", "median", "mode", "values"],
        ),
        (
            DatasetKind::Quantiles,
            &["deciles", "max_value", "min_value", "percentiles_95_99", "quartiles", "values"],
        ),
        (DatasetKind::BoxPlot, &["iris_data", "tips_data"]),
        (
            DatasetKind::Dispersion,
            &["mean", "standard_deviation", "std_bands", "values", "variance", "variance_convention"],
        ),
        (
            DatasetKind::AdvancedVisualization,
            &["contour_data", "correlation", "scatter_data"],
        ),
    ];
    for (kind, fields) in expected {
        let mut rng = RngHandle::for_substream(42, kind.substream());
        let records = build_records(kind, &params, &mut rng).unwrap();
        assert_eq!(records.len(), kind.file_names().len());
        for (record, file_name) in records.iter().zip(kind.file_names()) {
            assert_eq!(record.file_name(), *file_name);
            assert_eq!(record.dataset(), kind);
            assert_eq!(keys(record.document()), fields.to_vec(), "{kind}");
        }
    }
}

#[test]
fn coin_flip_proportions_match_counts() {
    let params = DatasetParams::default();
    let mut rng = RngHandle::from_seed(42);
    let doc = generate_coin_flip(&params.coin_flip, &mut rng).unwrap();

    assert_eq!(doc.n_flips.first(), Some(&2));
    assert_eq!(doc.n_flips.last(), Some(&4096));
    assert_eq!(doc.expected_value, 0.5);
    for ((&n, &heads), &proportion) in doc.n_flips.iter().zip(&doc.heads_count).zip(&doc.proportion_heads) {
        assert!(heads <= n);
        assert_eq!(proportion, heads as f64 / n as f64);
    }
    assert!((doc.proportion_heads.last().unwrap() - 0.5).abs() < 0.05);
}

#[test]
fn five_coin_observed_counts_cover_every_experiment() {
    let params = DatasetParams::default();
    let mut rng = RngHandle::from_seed(42);
    let doc = generate_five_coin_distribution(&params.five_coins, &mut rng).unwrap();

    assert_eq!(doc.n_experiments, 1000);
    assert_eq!(doc.observed_counts.iter().sum::<u64>(), 1000);
    assert!(doc.heads_values.windows(2).all(|w| w[0] < w[1]));
    assert!(doc.heads_values.iter().all(|&k| k <= 5));
    assert_eq!(doc.theoretical_probabilities.len(), 6);
    assert_eq!(doc.theoretical_probabilities[3], 0.3125);
    let total: f64 = doc.observed_probabilities.iter().sum();
    assert!((total - 1.0).abs() < 1e-9);
}

#[test]
fn central_tendency_labels_and_skew() {
    let params = DatasetParams::default();
    let mut rng = RngHandle::from_seed(42);
    let (normal, skewed) = generate_central_tendency(&params.central_tendency, &mut rng).unwrap();

    assert_eq!(normal.distribution_type, "normal");
    assert_eq!(skewed.distribution_type, "skewed");
    assert_eq!(normal.values.len(), 1000);
    assert_eq!(skewed.values.len(), 1000);
    // Right skew pulls the mean above the median.
    assert!(skewed.mean > skewed.median);
    assert!(normal.values.contains(&normal.mode));
}

#[test]
fn quantiles_are_ordered_and_bounded() {
    let params = DatasetParams::default();
    let mut rng = RngHandle::from_seed(42);
    let doc = generate_quantiles(&params.quantiles, &mut rng).unwrap();

    assert_eq!(doc.percentiles_95_99.len(), 2);
    assert_eq!(doc.quartiles.len(), 3);
    assert_eq!(doc.deciles.len(), 9);
    for series in [&doc.percentiles_95_99, &doc.quartiles, &doc.deciles] {
        assert!(series.windows(2).all(|w| w[0] <= w[1]));
        assert!(series.iter().all(|&q| doc.min_value <= q && q <= doc.max_value));
    }
    assert_eq!(doc.quartiles[1], doc.deciles[4]);
}

#[test]
fn box_plot_tables_have_consistent_lengths() {
    let params = DatasetParams::default();
    let mut rng = RngHandle::from_seed(42);
    let doc = generate_box_plot(&params.box_plot, &mut rng).unwrap();

    let species: Vec<&str> = doc.iris_data.keys().map(String::as_str).collect();
    assert_eq!(species, ["setosa", "versicolor", "virginica"]);
    for measurements in doc.iris_data.values() {
        assert_eq!(measurements.sepal_length.len(), 50);
        assert_eq!(measurements.sepal_width.len(), 50);
    }

    let tips = &doc.tips_data;
    assert_eq!(tips.total_bill.len(), 244);
    assert_eq!(tips.tip.len(), 244);
    assert_eq!(tips.day.len(), 244);
    assert_eq!(tips.smoker.len(), 244);
    assert!(tips.total_bill.iter().all(|&bill| bill >= 5.0));
    assert!(tips.day.iter().all(|d| ["Thu", "Fri", "Sat", "Sun"].contains(&d.as_str())));
    assert!(tips.smoker.iter().all(|s| s == "Yes" || s == "No"));
}

#[test]
fn dispersion_bands_are_centred_on_the_mean() {
    let params = DatasetParams::default();
    let mut rng = RngHandle::from_seed(42);
    let doc = generate_dispersion(&params.dispersion, &mut rng).unwrap();

    assert_eq!(doc.variance_convention, "population");
    assert!((doc.standard_deviation - doc.variance.sqrt()).abs() < 1e-12);
    let bands = &doc.std_bands;
    assert_eq!(bands.mean, doc.mean);
    assert!((bands.mean_plus_1std - bands.mean - doc.standard_deviation).abs() < 1e-12);
    assert!((bands.mean - bands.mean_minus_2std - 2.0 * doc.standard_deviation).abs() < 1e-12);
}

#[test]
fn advanced_visualization_grid_spans_the_scatter() {
    let params = DatasetParams::default();
    let mut rng = RngHandle::from_seed(42);
    let doc = generate_advanced_visualization(&params.advanced, &mut rng).unwrap();

    let scatter = &doc.scatter_data;
    assert_eq!(scatter.x.len(), 500);
    assert_eq!(scatter.y.len(), 500);
    assert_eq!(scatter.category.len(), 500);
    assert!(scatter.category.iter().all(|c| ["A", "B", "C"].contains(&c.as_str())));

    let contour = &doc.contour_data;
    assert_eq!(contour.density.len(), 50);
    assert!(contour.density.iter().all(|row| row.len() == 50));
    assert!(contour.density.iter().flatten().all(|&d| d >= 0.0));
    let x_min = scatter.x.iter().copied().fold(f64::INFINITY, f64::min);
    assert_eq!(contour.x_grid[0][0], x_min);
    // Rows follow y: every cell of a row shares its y coordinate.
    assert!(contour.y_grid[7].iter().all(|&y| y == contour.y_grid[7][0]));

    assert!((doc.correlation - 0.7).abs() < 0.15, "correlation {}", doc.correlation);
}
