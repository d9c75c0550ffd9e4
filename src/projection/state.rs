//! Running balance state for one simulation pass

/// Balance and contribution carried from year to year
#[derive(Debug, Clone, Copy)]
pub struct ProjectionState {
    /// Current account balance
    pub balance: f64,

    /// Monthly contribution for the current year
    pub contribution: f64,
}

impl ProjectionState {
    /// Initialize state at the start of the horizon
    pub fn new(seed_capital: f64, initial_contribution: f64) -> Self {
        Self {
            balance: seed_capital,
            contribution: initial_contribution,
        }
    }

    /// Deduct a liability, or return false if the balance cannot cover it.
    /// The balance is left untouched on failure.
    pub fn deduct_liability(&mut self, liability: f64) -> bool {
        if self.balance < liability {
            return false;
        }
        self.balance -= liability;
        true
    }

    /// One monthly period: contribution goes in first, then growth applies
    pub fn accrue_month(&mut self, monthly_rate: f64) {
        self.balance = (self.balance + self.contribution) * (1.0 + monthly_rate);
    }

    pub fn add_inflow(&mut self, inflow: f64) {
        self.balance += inflow;
    }

    /// Escalate the contribution for the next year
    pub fn escalate(&mut self, escalation_rate: f64) {
        self.contribution *= 1.0 + escalation_rate;
    }
}
