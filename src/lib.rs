//! Fees Planner - savings projection against scheduled school fees
//!
//! This library provides:
//! - Validated fee and bonus schedules over a multi-year horizon
//! - Monthly-compounding balance simulation with escalating contributions
//! - Bisection solver for the minimum contribution that covers every fee
//! - Year-by-year trajectories, CSV/JSON export, and variance against actuals
//! - Parallel scenario batches

pub mod actuals;
pub mod error;
pub mod projection;
pub mod scenario;
pub mod schedule;

// Re-export commonly used types
pub use error::{PlannerError, PlannerResult};
pub use projection::{
    simulate, solve, solve_and_project, ProjectionEngine, ProjectionInputs, ProjectionResult,
    SimulationResult, SolveOutcome, SolverConfig, YearRecord,
};
pub use scenario::{write_sweep_csv, ScenarioResult, ScenarioRunner, SweepRow};
pub use schedule::{Schedule, ScheduleEntry};
