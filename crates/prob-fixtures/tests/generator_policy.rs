use std::fs;

use prob_core::ErrorKind;
use prob_fixtures::{
    generate_all, sha256_hex, DatasetKind, FixtureManifest, GenerateError, GeneratorConfig,
    MANIFEST_FILE_NAME,
};
use tempfile::tempdir;

fn broken_five_coins(dir: &std::path::Path) -> GeneratorConfig {
    let mut config = GeneratorConfig {
        output_dir: dir.to_path_buf(),
        ..GeneratorConfig::default()
    };
    config.datasets.five_coins.experiments = 0;
    config
}

#[test]
fn mandatory_validation_failure_aborts_before_writing() {
    let dir = tempdir().unwrap();
    let err = generate_all(&broken_five_coins(dir.path())).unwrap_err();

    assert_eq!(err.dataset(), Some(DatasetKind::FiveCoinDistribution));
    assert_eq!(err.error().kind(), ErrorKind::InvalidParameter);
    assert!(matches!(err, GenerateError::Dataset { .. }));
    assert!(err.to_string().starts_with("dataset `five_coin_distribution` failed"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn optional_validation_failure_is_skipped_and_recorded() {
    let dir = tempdir().unwrap();
    let mut config = broken_five_coins(dir.path());
    config.optional = vec![DatasetKind::FiveCoinDistribution];

    let report = generate_all(&config).unwrap();

    assert_eq!(report.fixture_count(), 7);
    assert!(!dir.path().join("probability_distribution_5_coins.json").exists());
    assert!(dir.path().join("coin_flip_law_of_large_numbers.json").exists());
    assert_eq!(report.manifest.skipped.len(), 1);
    let skipped = &report.manifest.skipped[0];
    assert_eq!(skipped.dataset, DatasetKind::FiveCoinDistribution);
    assert_eq!(skipped.kind, ErrorKind::InvalidParameter);
    assert_eq!(skipped.error.code, "five-coins-experiments");
}

#[test]
fn missing_output_directory_aborts_the_run() {
    let dir = tempdir().unwrap();
    let config = GeneratorConfig {
        output_dir: dir.path().join("not-created"),
        ..GeneratorConfig::default()
    };

    let err = generate_all(&config).unwrap_err();

    assert_eq!(err.dataset(), None);
    assert_eq!(err.error().kind(), ErrorKind::Io);
    assert!(!dir.path().join("not-created").exists());
}

#[test]
fn invalid_covariance_is_a_mandatory_failure() {
    let dir = tempdir().unwrap();
    let mut config = GeneratorConfig {
        output_dir: dir.path().to_path_buf(),
        ..GeneratorConfig::default()
    };
    config.datasets.advanced.cov = [[1.0, 1.5], [1.5, 1.0]];

    let err = generate_all(&config).unwrap_err();
    assert_eq!(err.dataset(), Some(DatasetKind::AdvancedVisualization));
    assert_eq!(err.error().info().code, "bivariate-not-positive-definite");
}

#[test]
fn failed_rerun_keeps_previous_fixtures_consistent_with_manifest() {
    let dir = tempdir().unwrap();
    let first = GeneratorConfig {
        output_dir: dir.path().to_path_buf(),
        ..GeneratorConfig::default()
    };
    generate_all(&first).unwrap();
    let coin_flip = dir.path().join("coin_flip_law_of_large_numbers.json");
    let before = fs::read(&coin_flip).unwrap();

    let blocked = dir.path().join("quantiles_data.json");
    fs::remove_file(&blocked).unwrap();
    fs::create_dir(&blocked).unwrap();
    fs::write(blocked.join("keep"), b"x").unwrap();
    let entries_before = fs::read_dir(dir.path()).unwrap().count();

    let second = GeneratorConfig {
        master_seed: 43,
        ..first
    };
    let err = generate_all(&second).unwrap_err();
    assert_eq!(err.dataset(), Some(DatasetKind::Quantiles));
    assert_eq!(err.error().kind(), ErrorKind::Io);

    assert_eq!(fs::read(&coin_flip).unwrap(), before);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), entries_before);
    let manifest = FixtureManifest::load(&dir.path().join(MANIFEST_FILE_NAME)).unwrap();
    assert_eq!(manifest.provenance.seed, 42);
    for entry in manifest
        .fixtures
        .iter()
        .filter(|entry| entry.dataset != DatasetKind::Quantiles)
    {
        let bytes = fs::read(dir.path().join(&entry.file_name)).unwrap();
        assert_eq!(sha256_hex(&bytes), entry.sha256, "{}", entry.file_name);
    }
}
