use std::fs;
use std::path::Path;

use prob_fixtures::{generate_all, DatasetKind, GeneratorConfig, MANIFEST_FILE_NAME};
use tempfile::tempdir;

fn config_for(dir: &Path, seed: u64) -> GeneratorConfig {
    GeneratorConfig {
        master_seed: seed,
        output_dir: dir.to_path_buf(),
        ..GeneratorConfig::default()
    }
}

fn read_all(dir: &Path) -> Vec<(String, Vec<u8>)> {
    let mut files: Vec<(String, Vec<u8>)> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| {
            let entry = entry.unwrap();
            let name = entry.file_name().to_string_lossy().into_owned();
            (name, fs::read(entry.path()).unwrap())
        })
        .collect();
    files.sort();
    files
}

#[test]
fn same_seed_produces_byte_identical_fixtures() {
    let first = tempdir().unwrap();
    let second = tempdir().unwrap();

    let report_a = generate_all(&config_for(first.path(), 42)).unwrap();
    let report_b = generate_all(&config_for(second.path(), 42)).unwrap();

    assert_eq!(report_a.fixture_count(), 8);
    assert_eq!(report_a.fixture_count(), report_b.fixture_count());

    let files_a = read_all(first.path());
    let files_b = read_all(second.path());
    assert_eq!(files_a.len(), 9);
    assert_eq!(files_a, files_b);
    assert!(files_a.iter().any(|(name, _)| name == MANIFEST_FILE_NAME));
}

#[test]
fn different_seeds_change_the_samples() {
    let first = tempdir().unwrap();
    let second = tempdir().unwrap();
    generate_all(&config_for(first.path(), 42)).unwrap();
    generate_all(&config_for(second.path(), 43)).unwrap();

    let name = "dispersion_data.json";
    let a = fs::read(first.path().join(name)).unwrap();
    let b = fs::read(second.path().join(name)).unwrap();
    assert_ne!(a, b);
}

#[test]
fn dataset_streams_do_not_depend_on_the_selection() {
    let full = tempdir().unwrap();
    let subset = tempdir().unwrap();
    generate_all(&config_for(full.path(), 42)).unwrap();

    let mut config = config_for(subset.path(), 42);
    config.only = vec![DatasetKind::Quantiles];
    let report = generate_all(&config).unwrap();
    assert_eq!(report.fixture_count(), 1);

    let name = "quantiles_data.json";
    assert_eq!(
        fs::read(full.path().join(name)).unwrap(),
        fs::read(subset.path().join(name)).unwrap()
    );
    assert!(!subset.path().join("dispersion_data.json").exists());
}

#[test]
fn manifest_hashes_match_written_bytes() {
    let dir = tempdir().unwrap();
    let report = generate_all(&config_for(dir.path(), 42)).unwrap();

    assert_eq!(report.manifest.provenance.seed, 42);
    assert_eq!(report.manifest.fixtures.len(), report.fixture_count());
    for entry in &report.manifest.fixtures {
        let bytes = fs::read(dir.path().join(&entry.file_name)).unwrap();
        assert_eq!(prob_fixtures::sha256_hex(&bytes), entry.sha256);
        assert_eq!(
            entry.substream_seed,
            prob_core::derive_substream_seed(42, entry.dataset.substream())
        );
    }

    let loaded = prob_fixtures::FixtureManifest::load(&report.manifest_path).unwrap();
    assert_eq!(loaded, report.manifest);
}
