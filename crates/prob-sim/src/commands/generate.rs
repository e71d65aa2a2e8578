use std::error::Error;
use std::path::PathBuf;

use clap::Args;
use prob_fixtures::{generate_all, DatasetKind, GeneratorConfig};

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// YAML configuration; defaults apply when omitted.
    #[arg(long)]
    pub config: Option<PathBuf>,
    /// Output directory, which must already exist. Overrides the configuration.
    #[arg(long)]
    pub out: Option<PathBuf>,
    /// Master seed. Overrides the configuration.
    #[arg(long)]
    pub seed: Option<u64>,
    /// Restrict the run to these datasets (repeatable).
    #[arg(long = "only", value_name = "DATASET")]
    pub only: Vec<DatasetKind>,
}

pub fn run(args: &GenerateArgs) -> Result<(), Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => GeneratorConfig::load(path)?,
        None => GeneratorConfig::default(),
    };
    if let Some(out) = &args.out {
        config.output_dir = out.clone();
    }
    if let Some(seed) = args.seed {
        config.master_seed = seed;
    }
    if !args.only.is_empty() {
        config.only = args.only.clone();
    }

    let report = generate_all(&config)?;
    println!(
        "generated {} fixture files in {}",
        report.fixture_count(),
        report.output_dir.display()
    );
    for path in &report.written {
        if let Some(name) = path.file_name() {
            println!("  {}", name.to_string_lossy());
        }
    }
    for skipped in &report.manifest.skipped {
        println!("  skipped {}: {}", skipped.dataset, skipped.error);
    }
    Ok(())
}
