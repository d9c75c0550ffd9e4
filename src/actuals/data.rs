//! Actual values keyed by year and variance against projected values

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{PlannerError, PlannerResult};
use crate::projection::ProjectionResult;

/// Values actually observed for a year, entered after the fact
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActualRecord {
    pub year: u32,
    pub liability: f64,
    pub periodic_contribution: f64,
    pub inflow: f64,
    /// Balance at the end of the year
    pub balance: f64,
}

/// Actual minus projected, for one year present in both sets
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VarianceRow {
    pub year: u32,
    pub projected_balance: f64,
    pub actual_balance: f64,
    pub balance_variance: f64,
    pub contribution_variance: f64,
    pub liability_variance: f64,
    pub inflow_variance: f64,
}

/// Compare actuals against a projection.
///
/// Only years present in both are reported, in year order. Years outside the
/// projection horizon are ignored; a year recorded twice is an error.
pub fn compare(projection: &ProjectionResult, actuals: &[ActualRecord]) -> PlannerResult<Vec<VarianceRow>> {
    let mut by_year = BTreeMap::new();
    for actual in actuals {
        if by_year.insert(actual.year, actual).is_some() {
            return Err(PlannerError::DuplicateActual { year: actual.year });
        }
    }

    let rows = projection
        .years
        .iter()
        .filter_map(|projected| {
            by_year.get(&projected.year).map(|actual| VarianceRow {
                year: projected.year,
                projected_balance: projected.ending_balance,
                actual_balance: actual.balance,
                balance_variance: actual.balance - projected.ending_balance,
                contribution_variance: actual.periodic_contribution - projected.periodic_contribution,
                liability_variance: actual.liability - projected.liability,
                inflow_variance: actual.inflow - projected.inflow,
            })
        })
        .collect();

    Ok(rows)
}
