//! Error types for schedule validation, solving and I/O

use thiserror::Error;

/// A specialized Result type for planner operations.
pub type PlannerResult<T> = Result<T, PlannerError>;

/// Errors that can occur while validating inputs, solving or loading data.
#[derive(Error, Debug)]
pub enum PlannerError {
    /// Schedule is empty, has gaps or unordered years, or carries negative amounts.
    #[error("Invalid schedule: {reason}")]
    InvalidSchedule {
        /// Description of the violated rule.
        reason: String,
    },

    /// Projection inputs are out of range.
    #[error("Invalid inputs: {reason}")]
    InvalidInputs {
        /// Description of the violated rule.
        reason: String,
    },

    /// No contribution within the search bound keeps the balance non-negative.
    #[error("No feasible contribution: {contribution:.2} per month cannot cover the liability in {year}")]
    Infeasible {
        /// Largest contribution that was tried.
        contribution: f64,
        /// First year whose liability could not be met.
        year: u32,
    },

    /// Bisection did not close the bracket within the iteration cap.
    #[error("Solver did not converge after {iterations} iterations (bracket [{low:.4}, {high:.4}])")]
    NonConvergent {
        /// Number of iterations attempted.
        iterations: u32,
        /// Lower bound of the final bracket.
        low: f64,
        /// Upper bound of the final bracket.
        high: f64,
    },

    /// The same year appears twice in a set of actual values.
    #[error("Duplicate actual values for year {year}")]
    DuplicateActual {
        /// The repeated year.
        year: u32,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl PlannerError {
    pub(crate) fn invalid_schedule(reason: impl Into<String>) -> Self {
        Self::InvalidSchedule {
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_inputs(reason: impl Into<String>) -> Self {
        Self::InvalidInputs {
            reason: reason.into(),
        }
    }
}
