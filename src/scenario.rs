//! Scenario runner for batches of independent solves
//!
//! Loads a schedule once, then solves many input sets against it. Each solve
//! is independent and stateless, so batches run in parallel.

use rayon::prelude::*;
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::error::PlannerResult;
use crate::projection::{plan, solve_contribution, ProjectionInputs, ProjectionResult, SolveOutcome, SolverConfig};
use crate::schedule::{load_schedule, Schedule};

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv_path(Path::new("data/reference_schedule.csv"))?;
///
/// for rate in [0.06, 0.08, 0.10] {
///     let outcome = runner.solve(&ProjectionInputs::new(119_000.0, rate, 0.05))?;
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    schedule: Schedule,
    config: SolverConfig,
}

/// Inputs paired with their solve outcome
#[derive(Debug)]
pub struct ScenarioResult {
    pub inputs: ProjectionInputs,
    pub outcome: PlannerResult<SolveOutcome>,
}

/// One line of a rate sweep table; solve failures leave the numeric columns empty
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SweepRow {
    #[serde(rename = "InvestmentRate")]
    pub investment_rate: f64,
    #[serde(rename = "Escalation")]
    pub escalation: f64,
    #[serde(rename = "Contribution")]
    pub contribution: Option<f64>,
    #[serde(rename = "FinalBalance")]
    pub final_balance: Option<f64>,
    #[serde(rename = "Iterations")]
    pub iterations: Option<u32>,
    /// Exit reason on success, error message otherwise
    #[serde(rename = "Status")]
    pub status: String,
}

impl From<&ScenarioResult> for SweepRow {
    fn from(result: &ScenarioResult) -> Self {
        let mut row = SweepRow {
            investment_rate: result.inputs.periodic_rate_annual,
            escalation: result.inputs.escalation_rate,
            contribution: None,
            final_balance: None,
            iterations: None,
            status: String::new(),
        };
        match &result.outcome {
            Ok(outcome) => {
                row.contribution = Some(outcome.contribution);
                row.final_balance = Some(outcome.final_balance);
                row.iterations = Some(outcome.iterations);
                row.status = format!("{:?}", outcome.exit);
            }
            Err(err) => row.status = err.to_string(),
        }
        row
    }
}

/// Write batch results as a CSV table, one row per scenario
pub fn write_sweep_csv<W: Write>(writer: W, results: &[ScenarioResult]) -> PlannerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for result in results {
        csv_writer.serialize(SweepRow::from(result))?;
    }
    csv_writer.flush()?;
    Ok(())
}

impl ScenarioRunner {
    /// Create runner for the built-in reference schedule
    pub fn new() -> Self {
        Self::with_schedule(Schedule::reference())
    }

    pub fn with_schedule(schedule: Schedule) -> Self {
        Self {
            schedule,
            config: SolverConfig::default(),
        }
    }

    /// Create runner by loading the schedule from a CSV file
    pub fn from_csv_path(path: &Path) -> PlannerResult<Self> {
        Ok(Self::with_schedule(load_schedule(path)?))
    }

    /// Replace the solver configuration
    pub fn with_config(mut self, config: SolverConfig) -> Self {
        self.config = config;
        self
    }

    pub fn solve(&self, inputs: &ProjectionInputs) -> PlannerResult<SolveOutcome> {
        solve_contribution(inputs, &self.schedule, &self.config)
    }

    /// Solve and materialize the year-by-year trajectory
    pub fn run(&self, inputs: &ProjectionInputs) -> PlannerResult<(SolveOutcome, ProjectionResult)> {
        plan(inputs, &self.schedule, &self.config)
    }

    /// Solve every input set in parallel; results keep the input order
    pub fn run_batch(&self, scenarios: &[ProjectionInputs]) -> Vec<ScenarioResult> {
        scenarios
            .par_iter()
            .map(|inputs| ScenarioResult {
                inputs: *inputs,
                outcome: self.solve(inputs),
            })
            .collect()
    }

    /// Cartesian grid of investment and escalation rates around a fixed seed capital
    pub fn rate_grid(seed_capital: f64, rates: &[f64], escalations: &[f64]) -> Vec<ProjectionInputs> {
        rates
            .iter()
            .flat_map(|&rate| {
                escalations
                    .iter()
                    .map(move |&escalation| ProjectionInputs::new(seed_capital, rate, escalation))
            })
            .collect()
    }

    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn config(&self) -> &SolverConfig {
        &self.config
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
