//! Fees Planner CLI
//!
//! Solves for the minimum monthly contribution and prints the yearly projection

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use fees_planner::actuals::{compare, load_actuals};
use fees_planner::projection::{
    plan, write_year_records_csv_path, ProjectionInputs, ProjectionRecord, SolverConfig,
    DEFAULT_ESCALATION_RATE, DEFAULT_INVESTMENT_RATE, DEFAULT_SEED_CAPITAL,
};
use fees_planner::schedule::{load_schedule, Schedule};

#[derive(Parser, Debug)]
#[command(name = "fees_planner", version, about = "Minimum contribution to fund a school fee schedule")]
struct Args {
    /// Schedule CSV (Year,Fees,Bonus); the built-in reference schedule if omitted
    #[arg(long)]
    schedule: Option<PathBuf>,

    #[arg(long, default_value_t = DEFAULT_SEED_CAPITAL)]
    seed_capital: f64,

    /// Annual investment return as a decimal
    #[arg(long, default_value_t = DEFAULT_INVESTMENT_RATE)]
    investment_rate: f64,

    /// Annual contribution escalation as a decimal
    #[arg(long, default_value_t = DEFAULT_ESCALATION_RATE)]
    escalation: f64,

    /// Write the yearly projection to this CSV file
    #[arg(long)]
    output: Option<PathBuf>,

    /// Write a dated JSON record of the projection to this file
    #[arg(long)]
    record: Option<PathBuf>,

    /// Actual values CSV (Year,Fees,MonthlyContribution,Bonus,Balance) to compare against
    #[arg(long)]
    actuals: Option<PathBuf>,

    /// Allow the search bound to double this many times if it is not feasible
    #[arg(long, default_value_t = 0)]
    widen_bound: u32,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let schedule = match &args.schedule {
        Some(path) => load_schedule(path)
            .with_context(|| format!("loading schedule from {}", path.display()))?,
        None => Schedule::reference(),
    };

    let inputs = ProjectionInputs::new(args.seed_capital, args.investment_rate, args.escalation);
    let config = SolverConfig {
        max_bound_doublings: args.widen_bound,
        ..SolverConfig::default()
    };

    println!("Fees Planner v{}", env!("CARGO_PKG_VERSION"));
    println!("==================\n");
    println!("Horizon: {}-{} ({} years)", schedule.start_year(), schedule.end_year(), schedule.len());
    println!("  Seed capital:     {:.2}", inputs.seed_capital);
    println!("  Investment rate:  {:.4}", inputs.periodic_rate_annual);
    println!("  Escalation:       {:.4}", inputs.escalation_rate);
    println!();

    let (outcome, projection) = plan(&inputs, &schedule, &config).context("solving contribution")?;

    println!(
        "Initial monthly contribution: {:.2} ({:?} after {} iterations)\n",
        outcome.contribution, outcome.exit, outcome.iterations
    );

    println!(
        "{:>5} {:>14} {:>12} {:>12} {:>14} {:>14} {:>14}",
        "Year", "Fees", "Monthly", "Bonus", "Contributions", "Return", "Balance"
    );
    println!("{}", "-".repeat(93));
    for row in &projection.years {
        println!(
            "{:>5} {:>14.2} {:>12.2} {:>12.2} {:>14.2} {:>14.2} {:>14.2}",
            row.year,
            row.liability,
            row.periodic_contribution,
            row.inflow,
            row.period_contributions_total,
            row.investment_return,
            row.ending_balance,
        );
    }

    let summary = projection.summary();
    println!("\nSummary:");
    println!("  Total fees paid:      {:.2}", summary.total_liabilities);
    println!("  Total contributions:  {:.2}", summary.total_contributions);
    println!("  Total bonuses:        {:.2}", summary.total_inflows);
    println!("  Investment return:    {:.2}", summary.total_investment_return);
    println!("  Final balance:        {:.2}", summary.final_balance);
    if let Some(headroom) = summary.min_headroom {
        println!("  Minimum headroom:     {:.2}", headroom);
    }

    if let Some(path) = &args.output {
        write_year_records_csv_path(path, &projection.years)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("\nYearly projection written to: {}", path.display());
    }

    if let Some(path) = &args.record {
        ProjectionRecord::new(inputs, &projection)
            .write_json(path)
            .with_context(|| format!("writing {}", path.display()))?;
        println!("Projection record written to: {}", path.display());
    }

    if let Some(path) = &args.actuals {
        let actuals = load_actuals(path).with_context(|| format!("loading actuals from {}", path.display()))?;
        let rows = compare(&projection, &actuals)?;

        println!("\nActual vs projected:");
        println!(
            "{:>5} {:>14} {:>14} {:>14} {:>12}",
            "Year", "Projected", "Actual", "Variance", "Monthly Var"
        );
        for row in &rows {
            println!(
                "{:>5} {:>14.2} {:>14.2} {:>14.2} {:>12.2}",
                row.year,
                row.projected_balance,
                row.actual_balance,
                row.balance_variance,
                row.contribution_variance,
            );
        }
    }

    Ok(())
}
