//! Solve the required contribution over a grid of investment and escalation rates
//!
//! Usage: cargo run --bin sweep_rates -- --rates 0.06,0.08,0.10 --escalations 0,0.05
//!
//! Writes one CSV row per scenario to stdout.

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;

use fees_planner::projection::DEFAULT_SEED_CAPITAL;
use fees_planner::{write_sweep_csv, ScenarioRunner};

#[derive(Parser, Debug)]
#[command(name = "sweep_rates", about = "Required contribution across a grid of rates")]
struct Args {
    /// Schedule CSV (Year,Fees,Bonus); the built-in reference schedule if omitted
    #[arg(long)]
    schedule: Option<PathBuf>,

    #[arg(long, default_value_t = DEFAULT_SEED_CAPITAL)]
    seed_capital: f64,

    /// Annual investment rates to try
    #[arg(long, value_delimiter = ',', default_values_t = vec![0.04, 0.06, 0.0878, 0.10, 0.12])]
    rates: Vec<f64>,

    /// Annual escalation rates to try
    #[arg(long, value_delimiter = ',', default_values_t = vec![0.0, 0.05, 0.08])]
    escalations: Vec<f64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let runner = match &args.schedule {
        Some(path) => ScenarioRunner::from_csv_path(path)
            .with_context(|| format!("loading schedule from {}", path.display()))?,
        None => ScenarioRunner::new(),
    };

    let scenarios = ScenarioRunner::rate_grid(args.seed_capital, &args.rates, &args.escalations);
    let start = Instant::now();
    let results = runner.run_batch(&scenarios);
    log::info!("Solved {} scenarios in {:?}", results.len(), start.elapsed());

    write_sweep_csv(std::io::stdout().lock(), &results).context("writing sweep table")?;

    Ok(())
}
