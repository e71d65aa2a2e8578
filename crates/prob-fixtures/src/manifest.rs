//! Run manifest written next to the fixtures.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use prob_core::{ErrorInfo, ErrorKind, ProbError, RunProvenance, SchemaVersion};
use serde::{Deserialize, Serialize};

use crate::config::GeneratorConfig;
use crate::dataset::DatasetKind;
use crate::fixture::{stage_bytes, StagedFile};
use crate::hash::stable_hash_string;
use crate::serde::{from_json_slice, to_canonical_json_bytes};

/// File name of the manifest written next to the fixtures.
pub const MANIFEST_FILE_NAME: &str = "fixtures_manifest.json";

/// One fixture file written by a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestEntry {
    /// Dataset that produced the file.
    pub dataset: DatasetKind,
    /// File name relative to the output directory.
    pub file_name: String,
    /// Seed of the dataset's RNG substream.
    pub substream_seed: u64,
    /// SHA-256 of the bytes written.
    pub sha256: String,
}

/// An optional dataset that failed validation and was skipped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedDataset {
    /// Dataset that was skipped.
    pub dataset: DatasetKind,
    /// Error family of the failure.
    pub kind: ErrorKind,
    /// Diagnostic payload.
    pub error: ErrorInfo,
}

/// Structured record of a completed generation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixtureManifest {
    /// Schema of the manifest document.
    pub schema_version: SchemaVersion,
    /// Seed, configuration hash and tool versions.
    pub provenance: RunProvenance,
    /// Fixture files in write order.
    pub fixtures: Vec<ManifestEntry>,
    /// Optional datasets skipped because of validation errors.
    pub skipped: Vec<SkippedDataset>,
}

impl FixtureManifest {
    /// Starts an empty manifest for `config`.
    pub fn for_config(config: &GeneratorConfig) -> Result<Self, ProbError> {
        let mut tool_versions = BTreeMap::new();
        tool_versions.insert(
            env!("CARGO_PKG_NAME").to_string(),
            env!("CARGO_PKG_VERSION").to_string(),
        );
        Ok(Self {
            schema_version: SchemaVersion::default(),
            provenance: RunProvenance {
                seed: config.master_seed,
                config_hash: stable_hash_string(&config.datasets)?,
                tool_versions,
            },
            fixtures: Vec::new(),
            skipped: Vec::new(),
        })
    }

    /// Serializes the manifest as canonical JSON into a staged file for `path`.
    pub fn stage(&self, path: &Path) -> Result<StagedFile, ProbError> {
        stage_bytes(&to_canonical_json_bytes(self)?, path)
    }

    /// Loads a manifest from disk.
    pub fn load(path: &Path) -> Result<Self, ProbError> {
        let bytes = fs::read(path).map_err(|err| {
            ProbError::Io(
                ErrorInfo::new("manifest-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        from_json_slice(&bytes)
    }
}
