use std::error::Error;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use commands::{
    generate::{self, GenerateArgs},
    pmf::{self, PmfArgs},
    summarize::{self, SummarizeArgs},
    version::{self, VersionArgs},
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "prob-sim",
    about = "Deterministic statistical fixtures for the probability presentation"
)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise.
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Generate every fixture file into an existing directory.
    Generate(GenerateArgs),
    /// Summarize a JSON array of numbers.
    Summarize(SummarizeArgs),
    /// Print the binomial distribution for n trials.
    Pmf(PmfArgs),
    /// Print version information.
    Version(VersionArgs),
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn dispatch(command: Command) -> Result<(), Box<dyn Error>> {
    match command {
        Command::Generate(args) => generate::run(&args),
        Command::Summarize(args) => summarize::run(&args),
        Command::Pmf(args) => pmf::run(&args),
        Command::Version(args) => version::run(&args),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match dispatch(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}
