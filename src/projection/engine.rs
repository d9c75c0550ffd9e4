//! Core balance simulation over the schedule horizon

use crate::error::{PlannerError, PlannerResult};
use crate::schedule::Schedule;
use super::inputs::ProjectionInputs;
use super::records::{ProjectionResult, SimulationResult, YearRecord};
use super::state::ProjectionState;

/// Contribution periods per year
pub const MONTHS_PER_YEAR: u32 = 12;

/// Simulate the balance for one trial contribution.
///
/// Convenience wrapper around [`ProjectionEngine::simulate`].
pub fn simulate(contribution: f64, inputs: &ProjectionInputs, schedule: &Schedule) -> SimulationResult {
    ProjectionEngine::new(*inputs, schedule).simulate(contribution)
}

/// Deterministic balance projection for a fixed set of inputs and schedule
pub struct ProjectionEngine<'a> {
    inputs: ProjectionInputs,
    schedule: &'a Schedule,
    monthly_rate: f64,
}

impl<'a> ProjectionEngine<'a> {
    /// Create a new engine; the monthly rate is derived once here
    pub fn new(inputs: ProjectionInputs, schedule: &'a Schedule) -> Self {
        Self {
            monthly_rate: inputs.monthly_rate(),
            inputs,
            schedule,
        }
    }

    pub fn inputs(&self) -> &ProjectionInputs {
        &self.inputs
    }

    pub fn schedule(&self) -> &Schedule {
        self.schedule
    }

    /// Final balance for a trial contribution, short-circuiting at the first
    /// liability the balance cannot cover
    pub fn simulate(&self, contribution: f64) -> SimulationResult {
        self.run(contribution, None)
    }

    /// Full year-by-year trajectory for a contribution.
    ///
    /// Uses the same pass as [`simulate`](Self::simulate), so the final balance
    /// is identical to what the solver saw.
    pub fn project(&self, contribution: f64) -> PlannerResult<ProjectionResult> {
        self.inputs.validate()?;
        if !contribution.is_finite() || contribution < 0.0 {
            return Err(PlannerError::invalid_inputs(format!(
                "contribution must be a non-negative amount, got {}",
                contribution
            )));
        }

        let mut result = ProjectionResult::new(contribution);
        let outcome = self.run(contribution, Some(&mut result.years));

        match outcome.shortfall_year {
            Some(year) => Err(PlannerError::Infeasible { contribution, year }),
            None => Ok(result),
        }
    }

    /// Single simulation pass; year records are only built when `detail` is given
    fn run(&self, contribution: f64, mut detail: Option<&mut Vec<YearRecord>>) -> SimulationResult {
        let mut state = ProjectionState::new(self.inputs.seed_capital, contribution);

        for (index, entry) in self.schedule.entries().iter().enumerate() {
            let starting_balance = state.balance;

            // No deduction in the first year
            let deducted = if index > 0 {
                if !state.deduct_liability(entry.liability) {
                    return SimulationResult::infeasible(entry.year);
                }
                entry.liability
            } else {
                0.0
            };

            let monthly = state.contribution;
            for _ in 0..MONTHS_PER_YEAR {
                state.accrue_month(self.monthly_rate);
            }
            state.add_inflow(entry.inflow);

            if let Some(years) = detail.as_deref_mut() {
                let contributions_total = monthly * MONTHS_PER_YEAR as f64;
                years.push(YearRecord {
                    year: entry.year,
                    liability: entry.liability,
                    periodic_contribution: monthly,
                    inflow: entry.inflow,
                    period_contributions_total: contributions_total,
                    investment_return: state.balance - starting_balance - contributions_total
                        - entry.inflow
                        + deducted,
                    starting_balance,
                    ending_balance: state.balance,
                });
            }

            state.escalate(self.inputs.escalation_rate);
        }

        SimulationResult::feasible(state.balance)
    }
}
