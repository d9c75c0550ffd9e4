//! Load actual values from CSV
//!
//! Expected columns: `Year,Fees,MonthlyContribution,Bonus,Balance`.

use csv::Reader;
use std::path::Path;

use super::ActualRecord;
use crate::error::PlannerResult;

#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Year")]
    year: u32,
    #[serde(rename = "Fees")]
    fees: f64,
    #[serde(rename = "MonthlyContribution")]
    monthly_contribution: f64,
    #[serde(rename = "Bonus")]
    bonus: f64,
    #[serde(rename = "Balance")]
    balance: f64,
}

impl From<CsvRow> for ActualRecord {
    fn from(row: CsvRow) -> Self {
        ActualRecord {
            year: row.year,
            liability: row.fees,
            periodic_contribution: row.monthly_contribution,
            inflow: row.bonus,
            balance: row.balance,
        }
    }
}

/// Load actual values from a CSV file
pub fn load_actuals<P: AsRef<Path>>(path: P) -> PlannerResult<Vec<ActualRecord>> {
    read_actuals(Reader::from_path(path)?)
}

/// Load actual values from any reader
pub fn load_actuals_from_reader<R: std::io::Read>(reader: R) -> PlannerResult<Vec<ActualRecord>> {
    read_actuals(Reader::from_reader(reader))
}

fn read_actuals<R: std::io::Read>(mut reader: Reader<R>) -> PlannerResult<Vec<ActualRecord>> {
    let mut actuals = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        actuals.push(ActualRecord::from(row));
    }
    Ok(actuals)
}
