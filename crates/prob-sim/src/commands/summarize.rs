use std::error::Error;
use std::fs;
use std::path::PathBuf;

use clap::Args;
use prob_core::{ErrorInfo, ProbError};
use prob_fixtures::{from_json_slice, to_canonical_json_bytes};
use prob_stats::summarize;

#[derive(Args, Debug)]
pub struct SummarizeArgs {
    /// JSON file holding an array of numbers.
    #[arg(long)]
    pub input: PathBuf,
    /// Percentiles to report in addition to the median (repeatable).
    #[arg(long = "percentile", value_name = "P")]
    pub percentiles: Vec<f64>,
}

pub fn run(args: &SummarizeArgs) -> Result<(), Box<dyn Error>> {
    let bytes = fs::read(&args.input).map_err(|err| {
        ProbError::Io(
            ErrorInfo::new("summarize-read", err.to_string())
                .with_context("path", args.input.display().to_string()),
        )
    })?;
    let values: Vec<f64> = from_json_slice(&bytes)?;
    let summary = summarize(&values, &args.percentiles)?;
    print!("{}", String::from_utf8(to_canonical_json_bytes(&summary)?)?);
    Ok(())
}
