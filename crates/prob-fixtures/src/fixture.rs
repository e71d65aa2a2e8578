//! Fixture documents and their atomic persistence.

use std::io::Write;
use std::path::{Path, PathBuf};

use prob_core::{ErrorInfo, ProbError};
use serde::Serialize;
use serde_json::Value;
use tempfile::NamedTempFile;

use crate::dataset::DatasetKind;
use crate::serde::{to_canonical_json_bytes, to_canonical_value};

/// A named JSON document produced by one dataset generator.
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureRecord {
    dataset: DatasetKind,
    file_name: String,
    document: Value,
}

impl FixtureRecord {
    /// Captures `document` as the canonical JSON tree of a fixture.
    pub fn new<T: Serialize>(
        dataset: DatasetKind,
        file_name: impl Into<String>,
        document: &T,
    ) -> Result<Self, ProbError> {
        Ok(Self {
            dataset,
            file_name: file_name.into(),
            document: to_canonical_value(document)?,
        })
    }

    /// Dataset that produced the record.
    pub fn dataset(&self) -> DatasetKind {
        self.dataset
    }

    /// File name relative to the output directory.
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// The JSON document.
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Serialized bytes exactly as [`write_fixture`] writes them.
    pub fn to_bytes(&self) -> Result<Vec<u8>, ProbError> {
        to_canonical_json_bytes(&self.document)
    }
}

fn io_error(code: &str, err: impl ToString, path: &Path) -> ProbError {
    ProbError::Io(ErrorInfo::new(code, err.to_string()).with_context("path", path.display().to_string()))
}

/// Bytes written and synced to a temporary file next to their destination,
/// waiting to be renamed into place. Dropping it removes the temporary file.
#[derive(Debug)]
pub struct StagedFile {
    file: NamedTempFile,
    path: PathBuf,
}

impl StagedFile {
    /// Final destination.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Renames the temporary file over the destination.
    pub fn commit(self) -> Result<PathBuf, ProbError> {
        let Self { file, path } = self;
        file.persist(&path)
            .map_err(|err| io_error("fixture-persist", err.error, &path))?;
        Ok(path)
    }
}

/// Writes `bytes` into a temporary file in the destination directory without
/// touching `path` itself.
///
/// The destination directory must already exist and `path` must not be a
/// directory.
pub fn stage_bytes(bytes: &[u8], path: &Path) -> Result<StagedFile, ProbError> {
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    if !parent.is_dir() {
        return Err(ProbError::Io(
            ErrorInfo::new("fixture-dir", "destination directory does not exist")
                .with_context("path", parent.display().to_string())
                .with_hint("create the output directory before generating fixtures"),
        ));
    }
    if path.is_dir() {
        return Err(ProbError::Io(
            ErrorInfo::new("fixture-dest-is-dir", "destination is a directory")
                .with_context("path", path.display().to_string()),
        ));
    }
    let mut file =
        NamedTempFile::new_in(parent).map_err(|err| io_error("fixture-tmp", err, parent))?;
    file.write_all(bytes)
        .map_err(|err| io_error("fixture-write", err, path))?;
    file.as_file()
        .sync_all()
        .map_err(|err| io_error("fixture-sync", err, path))?;
    Ok(StagedFile {
        file,
        path: path.to_path_buf(),
    })
}

/// Writes `bytes` to `path` through a temporary file in the same directory.
///
/// The destination directory must already exist. An existing file at `path`
/// is replaced; on failure nothing is left behind.
pub fn write_bytes_atomic(bytes: &[u8], path: &Path) -> Result<(), ProbError> {
    stage_bytes(bytes, path)?.commit()?;
    Ok(())
}

/// Writes a fixture record to `path`, overwriting any existing file.
///
/// The document is fully serialized before the destination is touched.
pub fn write_fixture(record: &FixtureRecord, path: &Path) -> Result<(), ProbError> {
    let bytes = record.to_bytes()?;
    write_bytes_atomic(&bytes, path)
}
