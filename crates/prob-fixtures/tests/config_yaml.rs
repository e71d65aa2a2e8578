use std::fs;
use std::path::PathBuf;

use prob_core::ErrorKind;
use prob_fixtures::serde::to_yaml_string;
use prob_fixtures::{DatasetKind, GeneratorConfig};
use tempfile::tempdir;

#[test]
fn partial_yaml_keeps_defaults_for_omitted_fields() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fixtures.yaml");
    fs::write(
        &path,
        "master_seed: 7\noutput_dir: out\noptional: [box_plot]\ndatasets:\n  five_coins:\n    experiments: 250\n",
    )
    .unwrap();

    let config = GeneratorConfig::load(&path).unwrap();

    assert_eq!(config.master_seed, 7);
    assert_eq!(config.output_dir, PathBuf::from("out"));
    assert!(config.is_optional(DatasetKind::BoxPlot));
    assert!(!config.is_optional(DatasetKind::Dispersion));
    assert_eq!(config.datasets.five_coins.experiments, 250);
    assert_eq!(config.datasets.five_coins.coins, 5);
    assert_eq!(config.datasets.advanced.grid_size, 50);
    assert_eq!(config.selected(), DatasetKind::ALL.to_vec());
}

#[test]
fn defaults_survive_a_yaml_round_trip() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fixtures.yaml");
    let config = GeneratorConfig::default();
    fs::write(&path, to_yaml_string(&config).unwrap()).unwrap();

    assert_eq!(GeneratorConfig::load(&path).unwrap(), config);
}

#[test]
fn only_restricts_and_orders_the_selection() {
    let config = GeneratorConfig {
        only: vec![DatasetKind::Dispersion, DatasetKind::CoinFlip],
        ..GeneratorConfig::default()
    };
    assert_eq!(
        config.selected(),
        vec![DatasetKind::CoinFlip, DatasetKind::Dispersion]
    );
}

#[test]
fn unknown_dataset_names_are_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("fixtures.yaml");
    fs::write(&path, "only: [histogram]\n").unwrap();

    let err = GeneratorConfig::load(&path).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Serde);
    assert!(err.info().context.contains_key("path"));

    let err = "histogram".parse::<DatasetKind>().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::InvalidParameter);
    assert_eq!("box-plot".parse::<DatasetKind>().unwrap(), DatasetKind::BoxPlot);
}

#[test]
fn missing_config_file_is_an_io_error() {
    let dir = tempdir().unwrap();
    let err = GeneratorConfig::load(&dir.path().join("absent.yaml")).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Io);
}
