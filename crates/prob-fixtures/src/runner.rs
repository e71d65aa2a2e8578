//! Batch execution of the dataset routines.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use prob_core::{ErrorInfo, ProbError, RngHandle};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::GeneratorConfig;
use crate::dataset::DatasetKind;
use crate::fixture::{stage_bytes, FixtureRecord};
use crate::generators::build_records;
use crate::hash::sha256_hex;
use crate::manifest::{FixtureManifest, ManifestEntry, SkippedDataset, MANIFEST_FILE_NAME};

/// Failure that aborted a generation run.
#[derive(Debug, Error)]
pub enum GenerateError {
    /// A mandatory dataset failed, or writing one of its files failed.
    #[error("dataset `{dataset}` failed: {source}")]
    Dataset {
        /// Dataset being generated or written.
        dataset: DatasetKind,
        /// Underlying error.
        #[source]
        source: ProbError,
    },
    /// The run could not start or its manifest could not be written.
    #[error("generation run failed: {0}")]
    Run(#[source] ProbError),
}

impl GenerateError {
    /// Dataset the failure is attributed to, if any.
    pub fn dataset(&self) -> Option<DatasetKind> {
        match self {
            GenerateError::Dataset { dataset, .. } => Some(*dataset),
            GenerateError::Run(_) => None,
        }
    }

    /// The underlying error.
    pub fn error(&self) -> &ProbError {
        match self {
            GenerateError::Dataset { source, .. } | GenerateError::Run(source) => source,
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    /// Directory the files were written to.
    pub output_dir: PathBuf,
    /// Fixture files in write order, manifest excluded.
    pub written: Vec<PathBuf>,
    /// Path of the manifest.
    pub manifest_path: PathBuf,
    /// The manifest as written.
    pub manifest: FixtureManifest,
}

impl GenerationReport {
    /// Number of fixture files written.
    pub fn fixture_count(&self) -> usize {
        self.written.len()
    }
}

struct Built {
    dataset: DatasetKind,
    seed: u64,
    records: Vec<FixtureRecord>,
}

/// Builds every selected dataset in memory.
///
/// Validation failures in optional datasets are logged and returned as
/// skipped entries; any other failure aborts.
fn build_all(config: &GeneratorConfig) -> Result<(Vec<Built>, Vec<SkippedDataset>), GenerateError> {
    let mut built = Vec::new();
    let mut skipped = Vec::new();
    for dataset in config.selected() {
        let mut rng = RngHandle::for_substream(config.master_seed, dataset.substream());
        let seed = rng.seed();
        debug!(%dataset, substream = dataset.substream(), seed, "derived dataset rng");
        match build_records(dataset, &config.datasets, &mut rng) {
            Ok(records) => built.push(Built {
                dataset,
                seed,
                records,
            }),
            Err(err) if err.is_validation() && config.is_optional(dataset) => {
                warn!(%dataset, error = %err, "skipping optional dataset");
                skipped.push(SkippedDataset {
                    dataset,
                    kind: err.kind(),
                    error: err.info().clone(),
                });
            }
            Err(source) => return Err(GenerateError::Dataset { dataset, source }),
        }
    }
    Ok((built, skipped))
}

fn ensure_output_dir(dir: &Path) -> Result<(), GenerateError> {
    if dir.is_dir() {
        return Ok(());
    }
    Err(GenerateError::Run(ProbError::Io(
        ErrorInfo::new("output-dir-missing", "output directory does not exist")
            .with_context("path", dir.display().to_string())
            .with_hint("create the directory first; the generator never creates it"),
    )))
}

fn remove_stale_manifest(path: &Path) -> Result<(), GenerateError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(GenerateError::Run(ProbError::Io(
            ErrorInfo::new("manifest-remove", err.to_string())
                .with_context("path", path.display().to_string()),
        ))),
    }
}

/// Runs the selected datasets in order and writes their fixtures plus a
/// `fixtures_manifest.json` into `config.output_dir`.
///
/// All documents are built and staged into temporary files before the first
/// destination is replaced, so a validation or staging failure leaves the
/// output directory untouched. The previous manifest is removed before any
/// rename, so a failure during the renames never leaves a manifest that
/// describes files it does not match.
pub fn generate_all(config: &GeneratorConfig) -> Result<GenerationReport, GenerateError> {
    let output_dir = config.output_dir.clone();
    ensure_output_dir(&output_dir)?;
    info!(
        seed = config.master_seed,
        dir = %output_dir.display(),
        "generating fixtures"
    );

    let mut manifest = FixtureManifest::for_config(config).map_err(GenerateError::Run)?;
    let (built, skipped) = build_all(config)?;
    manifest.skipped = skipped;

    let mut staged = Vec::new();
    for Built {
        dataset,
        seed,
        records,
    } in built
    {
        for record in records {
            let attribute = |source| GenerateError::Dataset { dataset, source };
            let bytes = record.to_bytes().map_err(attribute)?;
            let file = stage_bytes(&bytes, &output_dir.join(record.file_name()))
                .map_err(attribute)?;
            manifest.fixtures.push(ManifestEntry {
                dataset,
                file_name: record.file_name().to_string(),
                substream_seed: seed,
                sha256: sha256_hex(&bytes),
            });
            staged.push((dataset, bytes.len(), file));
        }
    }
    let manifest_path = output_dir.join(MANIFEST_FILE_NAME);
    let staged_manifest = manifest.stage(&manifest_path).map_err(GenerateError::Run)?;

    remove_stale_manifest(&manifest_path)?;
    let mut written = Vec::with_capacity(staged.len());
    for (dataset, len, file) in staged {
        let path = file
            .commit()
            .map_err(|source| GenerateError::Dataset { dataset, source })?;
        info!(%dataset, file = %path.display(), bytes = len, "fixture written");
        written.push(path);
    }
    staged_manifest.commit().map_err(GenerateError::Run)?;
    info!(
        fixtures = written.len(),
        skipped = manifest.skipped.len(),
        "generation complete"
    );

    Ok(GenerationReport {
        output_dir,
        written,
        manifest_path,
        manifest,
    })
}
