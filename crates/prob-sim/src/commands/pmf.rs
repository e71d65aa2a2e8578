use std::error::Error;

use clap::Args;
use prob_fixtures::to_canonical_json_bytes;
use prob_stats::theoretical_binomial;

#[derive(Args, Debug)]
pub struct PmfArgs {
    /// Number of trials.
    #[arg(long)]
    pub n: u64,
    /// Success probability per trial.
    #[arg(long, default_value_t = 0.5)]
    pub p: f64,
}

pub fn run(args: &PmfArgs) -> Result<(), Box<dyn Error>> {
    let distribution = theoretical_binomial(args.n, args.p)?;
    print!("{}", String::from_utf8(to_canonical_json_bytes(&distribution)?)?);
    Ok(())
}
