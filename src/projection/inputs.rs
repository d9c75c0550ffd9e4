//! Projection inputs shared by the simulator and the solver

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};

/// Reference seed capital
pub const DEFAULT_SEED_CAPITAL: f64 = 119_000.0;

/// Reference annual investment return (8.78%)
pub const DEFAULT_INVESTMENT_RATE: f64 = 0.0878;

/// Reference annual contribution escalation (5%)
pub const DEFAULT_ESCALATION_RATE: f64 = 0.05;

/// Immutable input set for one solve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInputs {
    /// Opening balance at the start of the first year
    pub seed_capital: f64,

    /// Annual investment return, compounded monthly at the equivalent effective rate
    pub periodic_rate_annual: f64,

    /// Growth applied to the monthly contribution after each year
    pub escalation_rate: f64,
}

impl ProjectionInputs {
    pub fn new(seed_capital: f64, periodic_rate_annual: f64, escalation_rate: f64) -> Self {
        Self {
            seed_capital,
            periodic_rate_annual,
            escalation_rate,
        }
    }

    /// Effective monthly rate equivalent to the annual rate
    pub fn monthly_rate(&self) -> f64 {
        (1.0 + self.periodic_rate_annual).powf(1.0 / 12.0) - 1.0
    }

    /// Check the ranges under which the balance is monotone in the contribution
    pub fn validate(&self) -> PlannerResult<()> {
        if !self.seed_capital.is_finite() || self.seed_capital < 0.0 {
            return Err(PlannerError::invalid_inputs(format!(
                "seed capital must be a non-negative amount, got {}",
                self.seed_capital
            )));
        }
        if !self.periodic_rate_annual.is_finite() || self.periodic_rate_annual <= -1.0 {
            return Err(PlannerError::invalid_inputs(format!(
                "investment rate must be greater than -100%, got {}",
                self.periodic_rate_annual
            )));
        }
        if !self.escalation_rate.is_finite() || self.escalation_rate <= -1.0 {
            return Err(PlannerError::invalid_inputs(format!(
                "escalation rate must be greater than -100%, got {}",
                self.escalation_rate
            )));
        }
        Ok(())
    }
}

impl Default for ProjectionInputs {
    fn default() -> Self {
        Self::new(DEFAULT_SEED_CAPITAL, DEFAULT_INVESTMENT_RATE, DEFAULT_ESCALATION_RATE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_monthly_rate_compounds_to_annual() {
        let inputs = ProjectionInputs::default();
        let compounded = (1.0 + inputs.monthly_rate()).powi(12) - 1.0;
        assert_relative_eq!(compounded, inputs.periodic_rate_annual, epsilon = 1e-12);
    }

    #[test]
    fn test_zero_rate_has_zero_monthly_rate() {
        assert_eq!(ProjectionInputs::new(0.0, 0.0, 0.0).monthly_rate(), 0.0);
    }

    #[test]
    fn test_validation() {
        assert!(ProjectionInputs::default().validate().is_ok());
        assert!(ProjectionInputs::new(-1.0, 0.05, 0.0).validate().is_err());
        assert!(ProjectionInputs::new(0.0, -1.0, 0.0).validate().is_err());
        assert!(ProjectionInputs::new(0.0, 0.05, -1.5).validate().is_err());
        assert!(ProjectionInputs::new(f64::NAN, 0.05, 0.0).validate().is_err());
        // Negative but bounded rates are allowed
        assert!(ProjectionInputs::new(0.0, -0.2, -0.1).validate().is_ok());
    }
}
