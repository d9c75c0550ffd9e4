//! Minimum contribution search
//!
//! Bisection over the initial monthly contribution, using the balance
//! simulation as the oracle. Valid because both the final balance and
//! feasibility are non-decreasing in the contribution.

use log::{debug, info, warn};

use crate::error::{PlannerError, PlannerResult};
use crate::schedule::Schedule;
use super::engine::ProjectionEngine;
use super::inputs::ProjectionInputs;
use super::records::{ProjectionResult, YearRecord};

/// Final balance within this distance of zero is accepted immediately
pub const DEFAULT_ABS_TOLERANCE: f64 = 1.0;

/// Bisection stops once the bracket is this narrow
pub const DEFAULT_CONVERGENCE_TOLERANCE: f64 = 0.01;

/// Iteration cap; hitting it means the bracket was not shrinking
pub const DEFAULT_MAX_ITERATIONS: u32 = 200;

/// Configuration for a solve
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    pub abs_tolerance: f64,
    pub convergence_tolerance: f64,
    pub max_iterations: u32,

    /// Times the upper bound may be doubled when it is not feasible.
    /// Zero reports `Infeasible` straight away.
    pub max_bound_doublings: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            abs_tolerance: DEFAULT_ABS_TOLERANCE,
            convergence_tolerance: DEFAULT_CONVERGENCE_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            max_bound_doublings: 0,
        }
    }
}

impl SolverConfig {
    fn validate(&self) -> PlannerResult<()> {
        if !self.abs_tolerance.is_finite() || self.abs_tolerance <= 0.0 {
            return Err(PlannerError::invalid_inputs("abs_tolerance must be > 0"));
        }
        if !self.convergence_tolerance.is_finite() || self.convergence_tolerance <= 0.0 {
            return Err(PlannerError::invalid_inputs("convergence_tolerance must be > 0"));
        }
        if self.max_iterations == 0 {
            return Err(PlannerError::invalid_inputs("max_iterations must be > 0"));
        }
        Ok(())
    }
}

/// How the search terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolveExit {
    /// A zero contribution already covers every liability
    LowerBound,
    /// Final balance landed within `abs_tolerance` of zero
    WithinTolerance,
    /// Bracket narrowed below `convergence_tolerance`
    IntervalClosed,
}

/// Result of a contribution solve
#[derive(Debug, Clone)]
pub struct SolveOutcome {
    /// Initial monthly contribution; always feasible
    pub contribution: f64,

    /// Final balance simulated at `contribution`
    pub final_balance: f64,

    pub exit: SolveExit,

    /// Bisection steps taken
    pub iterations: u32,

    /// Bracket when the search stopped
    pub low: f64,
    pub high: f64,

    /// Upper bound the search started from, after any widening
    pub upper_bound: f64,
}

/// Heuristic starting bound: three times the largest liability spread over a year
pub fn initial_upper_bound(schedule: &Schedule) -> f64 {
    schedule.max_liability() / 12.0 * 3.0
}

/// Minimum contribution with the default configuration
pub fn solve(inputs: &ProjectionInputs, schedule: &Schedule) -> PlannerResult<f64> {
    solve_contribution(inputs, schedule, &SolverConfig::default()).map(|o| o.contribution)
}

/// Find the minimum non-negative initial contribution that keeps the balance
/// non-negative at every liability deduction.
///
/// # Errors
/// * `InvalidInputs` for out-of-range inputs or config
/// * `Infeasible` when the (possibly widened) upper bound still falls short
/// * `NonConvergent` when `max_iterations` is reached before the bracket closes
pub fn solve_contribution(
    inputs: &ProjectionInputs,
    schedule: &Schedule,
    config: &SolverConfig,
) -> PlannerResult<SolveOutcome> {
    inputs.validate()?;
    config.validate()?;

    let engine = ProjectionEngine::new(*inputs, schedule);

    let zero = engine.simulate(0.0);
    if let Some(final_balance) = zero.balance() {
        info!(
            "Zero contribution is sufficient (final balance {:.2})",
            final_balance
        );
        return Ok(SolveOutcome {
            contribution: 0.0,
            final_balance,
            exit: SolveExit::LowerBound,
            iterations: 0,
            low: 0.0,
            high: 0.0,
            upper_bound: 0.0,
        });
    }

    let mut high = initial_upper_bound(schedule);
    let mut high_eval = engine.simulate(high);
    let mut doublings = 0;
    while let Some(year) = high_eval.shortfall_year {
        if doublings >= config.max_bound_doublings {
            return Err(PlannerError::Infeasible {
                contribution: high,
                year,
            });
        }
        doublings += 1;
        let widened = if high > 0.0 { high * 2.0 } else { 1.0 };
        warn!(
            "Upper bound {:.2} falls short in {}; widening to {:.2}",
            high, year, widened
        );
        high = widened;
        high_eval = engine.simulate(high);
    }
    let upper_bound = high;

    // Invariant: `low` is infeasible or short of zero, `high` is feasible
    let mut low = 0.0;
    let mut iterations = 0;
    let mut candidate = high;

    let exit = loop {
        if high - low <= config.convergence_tolerance {
            break SolveExit::IntervalClosed;
        }
        if iterations >= config.max_iterations {
            return Err(PlannerError::NonConvergent {
                iterations,
                low,
                high,
            });
        }
        iterations += 1;

        let mid = (low + high) / 2.0;
        let eval = engine.simulate(mid);
        debug!(
            "iteration {}: bracket [{:.4}, {:.4}] mid {:.4} -> {:?}",
            iterations,
            low,
            high,
            mid,
            eval.balance()
        );

        match eval.balance() {
            None => low = mid,
            Some(balance) if balance.abs() < config.abs_tolerance => {
                candidate = mid;
                break SolveExit::WithinTolerance;
            }
            Some(balance) if balance < 0.0 => low = mid,
            Some(_) => high = mid,
        }
    };

    if exit == SolveExit::IntervalClosed {
        // `low` is only kept if it is itself feasible
        candidate = if engine.simulate(low).feasible { low } else { high };
    }

    let final_eval = engine.simulate(candidate);
    let final_balance = match final_eval.balance() {
        Some(balance) => balance,
        None => {
            return Err(PlannerError::Infeasible {
                contribution: candidate,
                year: final_eval.shortfall_year.unwrap_or_else(|| schedule.start_year()),
            })
        }
    };

    info!(
        "Solved contribution {:.2} after {} iterations ({:?}, final balance {:.2})",
        candidate, iterations, exit, final_balance
    );

    Ok(SolveOutcome {
        contribution: candidate,
        final_balance,
        exit,
        iterations,
        low,
        high,
        upper_bound,
    })
}

/// Solve for the contribution and materialize its trajectory
pub fn plan(
    inputs: &ProjectionInputs,
    schedule: &Schedule,
    config: &SolverConfig,
) -> PlannerResult<(SolveOutcome, ProjectionResult)> {
    let outcome = solve_contribution(inputs, schedule, config)?;
    let projection = ProjectionEngine::new(*inputs, schedule).project(outcome.contribution)?;
    Ok((outcome, projection))
}

/// Year records for the minimum contribution, together with that contribution
pub fn solve_and_project(
    inputs: &ProjectionInputs,
    schedule: &Schedule,
) -> PlannerResult<(Vec<YearRecord>, f64)> {
    let (outcome, projection) = plan(inputs, schedule, &SolverConfig::default())?;
    Ok((projection.years, outcome.contribution))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::simulate;
    use crate::schedule::ScheduleEntry;
    use approx::assert_relative_eq;

    #[test]
    fn test_zero_liability_single_year_needs_nothing() {
        let schedule = Schedule::new(vec![ScheduleEntry::new(2025, 0.0, 0.0)]).unwrap();
        let inputs = ProjectionInputs::new(0.0, 0.0, 0.0);

        assert_eq!(solve(&inputs, &schedule).unwrap(), 0.0);

        let outcome = solve_contribution(&inputs, &schedule, &SolverConfig::default()).unwrap();
        assert_eq!(outcome.exit, SolveExit::LowerBound);
        assert_eq!(outcome.iterations, 0);
    }

    #[test]
    fn test_seed_capital_alone_covers_fees() {
        let schedule = Schedule::from_columns(2025, &[0.0, 500.0, 500.0], &[0.0, 0.0, 0.0]).unwrap();
        let inputs = ProjectionInputs::new(10_000.0, 0.05, 0.0);
        assert_eq!(solve(&inputs, &schedule).unwrap(), 0.0);
    }

    #[test]
    fn test_reference_scenario() {
        let schedule = Schedule::reference();
        let inputs = ProjectionInputs::default();
        let config = SolverConfig::default();

        let outcome = solve_contribution(&inputs, &schedule, &config).unwrap();

        // The 2039 fee is the binding constraint, so the bracket closes
        // rather than the final balance reaching zero
        assert_eq!(outcome.exit, SolveExit::IntervalClosed);
        assert!(outcome.iterations < 40);
        assert!(outcome.high - outcome.low <= config.convergence_tolerance);
        assert!((outcome.contribution - 14_364.96).abs() < 0.05);

        let result = simulate(outcome.contribution, &inputs, &schedule);
        assert!(result.feasible);
        assert_eq!(result.final_balance, outcome.final_balance);
        assert!(result.final_balance > 0.0);

        // Minimal: a little less fails
        let below = simulate(outcome.contribution - 2.0 * config.convergence_tolerance, &inputs, &schedule);
        assert!(!below.feasible);
        assert_eq!(below.shortfall_year, Some(2039));
    }

    #[test]
    fn test_reference_scenario_every_year_feasible() {
        let schedule = Schedule::reference();
        let inputs = ProjectionInputs::default();

        let (years, contribution) = solve_and_project(&inputs, &schedule).unwrap();
        assert_eq!(years.len(), 15);
        assert!(contribution > 0.0);

        for record in years.iter().skip(1) {
            let after_fee = record.starting_balance - record.liability;
            assert!(after_fee >= 0.0, "{} went negative: {}", record.year, after_fee);
        }

        // Almost nothing is left once the final fee is paid
        let last = years.last().unwrap();
        let headroom = last.starting_balance - last.liability;
        assert!(headroom < 25.0, "headroom {} too large", headroom);
    }

    #[test]
    fn test_interval_closed_returns_feasible_bound() {
        // No growth: 12c must cover the 1200 fee, so c >= 100, and the final
        // balance is then 24c - 1200, never near zero
        let schedule = Schedule::from_columns(2025, &[0.0, 1_200.0], &[0.0, 0.0]).unwrap();
        let inputs = ProjectionInputs::new(0.0, 0.0, 0.0);
        let config = SolverConfig::default();

        let outcome = solve_contribution(&inputs, &schedule, &config).unwrap();
        assert_eq!(outcome.exit, SolveExit::IntervalClosed);
        assert!(outcome.contribution >= 100.0);
        assert_relative_eq!(outcome.contribution, 100.0, epsilon = config.convergence_tolerance);
        assert!(simulate(outcome.contribution, &inputs, &schedule).feasible);
    }

    #[test]
    fn test_within_tolerance_exit() {
        // Escalation of -99.99% leaves almost nothing paid in the last year,
        // so the final balance tracks the headroom after the fee
        let schedule = Schedule::from_columns(2025, &[0.0, 1_200.0], &[0.0, 0.0]).unwrap();
        let inputs = ProjectionInputs::new(0.0, 0.0, -0.9999);
        let config = SolverConfig::default();

        let outcome = solve_contribution(&inputs, &schedule, &config).unwrap();
        assert_eq!(outcome.exit, SolveExit::WithinTolerance);
        assert!(outcome.final_balance.abs() < config.abs_tolerance);
        assert!(simulate(outcome.contribution, &inputs, &schedule).feasible);
    }

    #[test]
    fn test_infeasible_within_default_bound() {
        let schedule = Schedule::from_columns(2025, &[1_000.0, 50_000.0], &[0.0, 0.0]).unwrap();

        // Bound is 50_000 / 12 * 3 = 12_500 a month; without growth that is plenty
        let inputs = ProjectionInputs::new(0.0, 0.0, 0.0);
        assert!(solve(&inputs, &schedule).is_ok());

        // At -95% a year, a year of 12_500 a month no longer reaches the 2026 fee
        let inputs = ProjectionInputs::new(0.0, -0.95, 0.0);
        match solve(&inputs, &schedule) {
            Err(PlannerError::Infeasible { year, contribution }) => {
                assert_eq!(year, 2026);
                assert_relative_eq!(contribution, 12_500.0, epsilon = 1e-9);
            }
            other => panic!("expected Infeasible, got {:?}", other),
        }
    }

    #[test]
    fn test_widening_finds_solution_beyond_bound() {
        let schedule = Schedule::from_columns(2025, &[1_000.0, 50_000.0], &[0.0, 0.0]).unwrap();
        let inputs = ProjectionInputs::new(0.0, -0.95, 0.0);
        let config = SolverConfig {
            max_bound_doublings: 10,
            ..SolverConfig::default()
        };

        let outcome = solve_contribution(&inputs, &schedule, &config).unwrap();
        assert!(outcome.upper_bound > initial_upper_bound(&schedule));
        assert!(simulate(outcome.contribution, &inputs, &schedule).feasible);
        assert!(!simulate(outcome.contribution - 0.02, &inputs, &schedule).feasible);
    }

    #[test]
    fn test_iteration_cap_reports_non_convergence() {
        let config = SolverConfig {
            max_iterations: 3,
            ..SolverConfig::default()
        };
        let result = solve_contribution(&ProjectionInputs::default(), &Schedule::reference(), &config);
        match result {
            Err(PlannerError::NonConvergent { iterations, low, high }) => {
                assert_eq!(iterations, 3);
                assert!(high > low);
            }
            other => panic!("expected NonConvergent, got {:?}", other),
        }
    }

    #[test]
    fn test_rejects_invalid_inputs_and_config() {
        let schedule = Schedule::reference();
        let bad_inputs = ProjectionInputs::new(-5.0, 0.05, 0.05);
        assert!(matches!(solve(&bad_inputs, &schedule), Err(PlannerError::InvalidInputs { .. })));

        let bad_config = SolverConfig {
            convergence_tolerance: 0.0,
            ..SolverConfig::default()
        };
        assert!(matches!(
            solve_contribution(&ProjectionInputs::default(), &schedule, &bad_config),
            Err(PlannerError::InvalidInputs { .. })
        ));
    }

    #[test]
    fn test_solve_and_project_is_idempotent() {
        let schedule = Schedule::reference();
        let inputs = ProjectionInputs::default();

        let (years_a, contribution_a) = solve_and_project(&inputs, &schedule).unwrap();
        let (years_b, contribution_b) = solve_and_project(&inputs, &schedule).unwrap();

        assert_eq!(contribution_a, contribution_b);
        assert_eq!(years_a, years_b);
    }

    #[test]
    fn test_projection_consistent_with_solver() {
        let schedule = Schedule::reference();
        let inputs = ProjectionInputs::default();
        let (outcome, projection) = plan(&inputs, &schedule, &SolverConfig::default()).unwrap();

        assert_eq!(projection.contribution, outcome.contribution);
        assert_eq!(projection.summary().final_balance, outcome.final_balance);
    }
}
