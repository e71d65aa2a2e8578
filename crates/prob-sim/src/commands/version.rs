use std::error::Error;

use clap::Args;
use prob_core::SchemaVersion;
use prob_fixtures::{to_canonical_json_bytes, DatasetKind, MANIFEST_FILE_NAME};
use prob_stats::VARIANCE_CONVENTION;
use serde::Serialize;

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Emit the fixture schema and dataset catalogue as JSON.
    #[arg(long)]
    pub long: bool,
}

#[derive(Debug, Serialize)]
struct VersionInfo {
    version: &'static str,
    manifest_schema: SchemaVersion,
    manifest_file: &'static str,
    variance_convention: &'static str,
    datasets: Vec<DatasetInfo>,
}

#[derive(Debug, Serialize)]
struct DatasetInfo {
    name: &'static str,
    files: &'static [&'static str],
}

pub fn run(args: &VersionArgs) -> Result<(), Box<dyn Error>> {
    if !args.long {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }
    let info = VersionInfo {
        version: env!("CARGO_PKG_VERSION"),
        manifest_schema: SchemaVersion::default(),
        manifest_file: MANIFEST_FILE_NAME,
        variance_convention: VARIANCE_CONVENTION,
        datasets: DatasetKind::ALL
            .into_iter()
            .map(|kind| DatasetInfo {
                name: kind.name(),
                files: kind.file_names(),
            })
            .collect(),
    };
    print!("{}", String::from_utf8(to_canonical_json_bytes(&info)?)?);
    Ok(())
}
