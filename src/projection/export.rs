//! Hand-off formats for projections: CSV year tables and dated JSON records
//!
//! Storage itself belongs to the caller; these only produce the payloads.

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::PlannerResult;
use super::inputs::ProjectionInputs;
use super::records::{ProjectionResult, ProjectionSummary, YearRecord};

/// Write year records as CSV with a header row
pub fn write_year_records_csv<W: Write>(writer: W, years: &[YearRecord]) -> PlannerResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for record in years {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write year records to a CSV file
pub fn write_year_records_csv_path<P: AsRef<Path>>(path: P, years: &[YearRecord]) -> PlannerResult<()> {
    let file = File::create(path)?;
    write_year_records_csv(file, years)
}

/// A solved projection stamped with the date it was produced
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionRecord {
    pub projection_date: NaiveDate,
    pub inputs: ProjectionInputs,
    pub solved_contribution: f64,
    pub summary: ProjectionSummary,
    pub years: Vec<YearRecord>,
}

impl ProjectionRecord {
    /// Record dated today (local time)
    pub fn new(inputs: ProjectionInputs, projection: &ProjectionResult) -> Self {
        Self::dated(Local::now().date_naive(), inputs, projection)
    }

    pub fn dated(projection_date: NaiveDate, inputs: ProjectionInputs, projection: &ProjectionResult) -> Self {
        Self {
            projection_date,
            inputs,
            solved_contribution: projection.contribution,
            summary: projection.summary(),
            years: projection.years.clone(),
        }
    }

    pub fn to_json(&self) -> PlannerResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> PlannerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> PlannerResult<()> {
        let file = File::create(path)?;
        serde_json::to_writer_pretty(file, self)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::projection::ProjectionEngine;
    use crate::schedule::Schedule;

    fn sample_projection() -> ProjectionResult {
        let schedule = Schedule::from_columns(2025, &[0.0, 1_000.0], &[100.0, 0.0]).unwrap();
        ProjectionEngine::new(ProjectionInputs::new(500.0, 0.06, 0.05), &schedule)
            .project(100.0)
            .unwrap()
    }

    #[test]
    fn test_csv_has_header_and_one_row_per_year() {
        let projection = sample_projection();
        let mut buffer = Vec::new();
        write_year_records_csv(&mut buffer, &projection.years).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("year,liability,periodic_contribution,inflow"));
        assert!(lines[1].starts_with("2025,"));
        assert!(lines[2].starts_with("2026,1000.0,"));
    }

    #[test]
    fn test_record_json_keeps_date_and_years() {
        let projection = sample_projection();
        let date = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let record = ProjectionRecord::dated(date, ProjectionInputs::new(500.0, 0.06, 0.05), &projection);

        let json = record.to_json().unwrap();
        assert!(json.contains("\"projection_date\": \"2025-03-01\""));

        let parsed = ProjectionRecord::from_json(&json).unwrap();
        assert_eq!(parsed.projection_date, date);
        assert_eq!(parsed.years.len(), 2);
        assert_eq!(parsed.solved_contribution, 100.0);
    }
}
