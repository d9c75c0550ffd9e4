//! Year-by-year output structures for projections

use serde::{Deserialize, Serialize};

/// Outcome of a single simulation pass
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimulationResult {
    /// Balance at the end of the horizon; `f64::NEG_INFINITY` when infeasible
    pub final_balance: f64,

    /// False when a liability could not be covered
    pub feasible: bool,

    /// Year whose liability exceeded the balance, if any
    pub shortfall_year: Option<u32>,
}

impl SimulationResult {
    pub fn feasible(final_balance: f64) -> Self {
        Self {
            final_balance,
            feasible: true,
            shortfall_year: None,
        }
    }

    pub fn infeasible(year: u32) -> Self {
        Self {
            final_balance: f64::NEG_INFINITY,
            feasible: false,
            shortfall_year: Some(year),
        }
    }

    /// Final balance, or None when the run was infeasible
    pub fn balance(&self) -> Option<f64> {
        self.feasible.then_some(self.final_balance)
    }
}

/// A single year of projection output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearRecord {
    pub year: u32,

    /// Liability as scheduled (only deducted after the first year)
    pub liability: f64,

    /// Monthly contribution paid during this year
    pub periodic_contribution: f64,

    pub inflow: f64,

    /// Sum of the twelve monthly contributions
    pub period_contributions_total: f64,

    /// Growth earned this year, derived as the reconciliation residual
    pub investment_return: f64,

    /// Balance carried in from the previous year (seed capital in the first year)
    pub starting_balance: f64,

    pub ending_balance: f64,
}

impl YearRecord {
    /// Liability actually taken out of the balance this year
    pub fn deducted_liability(&self, first_year: bool) -> f64 {
        if first_year {
            0.0
        } else {
            self.liability
        }
    }
}

/// Full trajectory for one contribution
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Initial monthly contribution that produced this trajectory
    pub contribution: f64,

    /// One record per year of the horizon
    pub years: Vec<YearRecord>,
}

impl ProjectionResult {
    pub fn new(contribution: f64) -> Self {
        Self {
            contribution,
            years: Vec::new(),
        }
    }

    /// Add a year record
    pub fn add_year(&mut self, record: YearRecord) {
        self.years.push(record);
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let total_liabilities: f64 = self
            .years
            .iter()
            .enumerate()
            .map(|(i, r)| r.deducted_liability(i == 0))
            .sum();
        let total_contributions: f64 = self.years.iter().map(|r| r.period_contributions_total).sum();
        let total_inflows: f64 = self.years.iter().map(|r| r.inflow).sum();
        let total_investment_return: f64 = self.years.iter().map(|r| r.investment_return).sum();

        let final_balance = self.years.last().map(|r| r.ending_balance).unwrap_or(0.0);

        // Balance immediately after each deduction; first year has none
        let min_headroom = self
            .years
            .iter()
            .skip(1)
            .map(|r| r.starting_balance - r.liability)
            .fold(None, |acc: Option<f64>, h| Some(acc.map_or(h, |m| m.min(h))));

        ProjectionSummary {
            total_years: self.years.len() as u32,
            total_liabilities,
            total_contributions,
            total_inflows,
            total_investment_return,
            final_balance,
            min_headroom,
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_years: u32,
    pub total_liabilities: f64,
    pub total_contributions: f64,
    pub total_inflows: f64,
    pub total_investment_return: f64,
    pub final_balance: f64,
    /// Smallest balance left just after a liability deduction; None for a one-year horizon
    pub min_headroom: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: u32, liability: f64, starting: f64, ending: f64) -> YearRecord {
        YearRecord {
            year,
            liability,
            periodic_contribution: 10.0,
            inflow: 5.0,
            period_contributions_total: 120.0,
            investment_return: 1.0,
            starting_balance: starting,
            ending_balance: ending,
        }
    }

    #[test]
    fn test_infeasible_result_has_no_usable_balance() {
        let result = SimulationResult::infeasible(2030);
        assert!(!result.feasible);
        assert!(result.final_balance.is_infinite() && result.final_balance < 0.0);
        assert_eq!(result.balance(), None);
        assert_eq!(result.shortfall_year, Some(2030));
    }

    #[test]
    fn test_summary_skips_first_year_liability() {
        let mut result = ProjectionResult::new(10.0);
        result.add_year(record(2025, 999.0, 100.0, 300.0));
        result.add_year(record(2026, 250.0, 300.0, 200.0));
        result.add_year(record(2027, 150.0, 200.0, 90.0));

        let summary = result.summary();
        assert_eq!(summary.total_years, 3);
        assert_eq!(summary.total_liabilities, 400.0);
        assert_eq!(summary.total_contributions, 360.0);
        assert_eq!(summary.total_inflows, 15.0);
        assert_eq!(summary.final_balance, 90.0);
        assert_eq!(summary.min_headroom, Some(50.0));
    }

    #[test]
    fn test_single_year_has_no_headroom() {
        let mut result = ProjectionResult::new(0.0);
        result.add_year(record(2025, 0.0, 100.0, 105.0));
        assert_eq!(result.summary().min_headroom, None);
    }
}
