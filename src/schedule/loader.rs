//! Load fee and bonus schedules from CSV
//!
//! Expected columns: `Year,Fees,Bonus`, one row per year in ascending order.

use csv::Reader;
use log::debug;
use std::path::Path;

use super::{Schedule, ScheduleEntry};
use crate::error::PlannerResult;

/// Default location of the reference schedule
pub const DEFAULT_SCHEDULE_PATH: &str = "data/reference_schedule.csv";

/// Raw CSV row
#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "Year")]
    year: u32,
    #[serde(rename = "Fees")]
    fees: f64,
    #[serde(rename = "Bonus")]
    bonus: f64,
}

impl From<CsvRow> for ScheduleEntry {
    fn from(row: CsvRow) -> Self {
        ScheduleEntry::new(row.year, row.fees, row.bonus)
    }
}

/// Load and validate a schedule from a CSV file
pub fn load_schedule<P: AsRef<Path>>(path: P) -> PlannerResult<Schedule> {
    let path = path.as_ref();
    debug!("Loading schedule from {}", path.display());
    let reader = Reader::from_path(path)?;
    read_schedule(reader)
}

/// Load and validate a schedule from any reader (e.g., string buffer)
pub fn load_schedule_from_reader<R: std::io::Read>(reader: R) -> PlannerResult<Schedule> {
    read_schedule(Reader::from_reader(reader))
}

/// Load the schedule at [`DEFAULT_SCHEDULE_PATH`]
pub fn load_default_schedule() -> PlannerResult<Schedule> {
    load_schedule(DEFAULT_SCHEDULE_PATH)
}

fn read_schedule<R: std::io::Read>(mut reader: Reader<R>) -> PlannerResult<Schedule> {
    let mut entries = Vec::new();

    for result in reader.deserialize() {
        let row: CsvRow = result?;
        entries.push(ScheduleEntry::from(row));
    }

    Schedule::new(entries)
}
