//! Balance projection, contribution solver and trajectory export

mod engine;
mod export;
mod inputs;
mod records;
mod solver;
mod state;

pub use engine::{simulate, ProjectionEngine, MONTHS_PER_YEAR};
pub use export::{write_year_records_csv, write_year_records_csv_path, ProjectionRecord};
pub use inputs::{ProjectionInputs, DEFAULT_ESCALATION_RATE, DEFAULT_INVESTMENT_RATE, DEFAULT_SEED_CAPITAL};
pub use records::{ProjectionResult, ProjectionSummary, SimulationResult, YearRecord};
pub use solver::{
    initial_upper_bound, plan, solve, solve_and_project, solve_contribution, SolveExit,
    SolveOutcome, SolverConfig, DEFAULT_ABS_TOLERANCE, DEFAULT_CONVERGENCE_TOLERANCE,
    DEFAULT_MAX_ITERATIONS,
};
pub use state::ProjectionState;
