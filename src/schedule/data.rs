//! Schedule data structures and validation

use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, PlannerResult};

/// Liability (school fee) and inflow (bonus) for a single year of the horizon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntry {
    pub year: u32,

    /// Deducted at the start of the year (never in the first year)
    pub liability: f64,

    /// Added once at the end of the year, after monthly growth
    pub inflow: f64,
}

impl ScheduleEntry {
    pub fn new(year: u32, liability: f64, inflow: f64) -> Self {
        Self { year, liability, inflow }
    }
}

/// Validated, contiguous, ascending sequence of schedule entries.
///
/// The horizon is whatever range of years the entries cover; there is no
/// fixed start or end year.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Schedule {
    entries: Vec<ScheduleEntry>,
}

impl Schedule {
    /// Validate and wrap a sequence of entries.
    ///
    /// Entries must already be sorted; they are not re-sorted or deduplicated.
    pub fn new(entries: Vec<ScheduleEntry>) -> PlannerResult<Self> {
        if entries.is_empty() {
            return Err(PlannerError::invalid_schedule("schedule has no entries"));
        }

        for entry in &entries {
            if !entry.liability.is_finite() || entry.liability < 0.0 {
                return Err(PlannerError::invalid_schedule(format!(
                    "liability for {} must be a non-negative amount, got {}",
                    entry.year, entry.liability
                )));
            }
            if !entry.inflow.is_finite() || entry.inflow < 0.0 {
                return Err(PlannerError::invalid_schedule(format!(
                    "inflow for {} must be a non-negative amount, got {}",
                    entry.year, entry.inflow
                )));
            }
        }

        for pair in entries.windows(2) {
            if pair[0].year.checked_add(1) != Some(pair[1].year) {
                return Err(PlannerError::invalid_schedule(format!(
                    "years must be contiguous and ascending: {} followed by {}",
                    pair[0].year, pair[1].year
                )));
            }
        }

        Ok(Self { entries })
    }

    /// Build a schedule from parallel liability and inflow columns starting at `start_year`
    pub fn from_columns(start_year: u32, liabilities: &[f64], inflows: &[f64]) -> PlannerResult<Self> {
        if liabilities.len() != inflows.len() {
            return Err(PlannerError::invalid_schedule(format!(
                "{} liabilities but {} inflows",
                liabilities.len(),
                inflows.len()
            )));
        }

        let last_offset = liabilities.len().saturating_sub(1);
        let fits = u32::try_from(last_offset)
            .ok()
            .and_then(|offset| start_year.checked_add(offset))
            .is_some();
        if !fits {
            return Err(PlannerError::invalid_schedule(format!(
                "{} years starting at {} run past the last representable year",
                liabilities.len(),
                start_year
            )));
        }

        // Offsets are bounded by the check above, so the addition cannot overflow
        let entries = liabilities
            .iter()
            .zip(inflows)
            .enumerate()
            .map(|(offset, (&liability, &inflow))| {
                ScheduleEntry::new(start_year + offset as u32, liability, inflow)
            })
            .collect();

        Self::new(entries)
    }

    /// Reference fee and bonus schedule for 2025-2039
    pub fn reference() -> Self {
        let fees = [
            0.0,      // 2025
            181413.0, // 2026
            203907.0, // 2027
            259330.0, // 2028
            287039.0, // 2029
            311901.0, // 2030
            323677.0, // 2031
            359029.0, // 2032
            384372.0, // 2033
            411551.0, // 2034
            465033.0, // 2035
            497920.0, // 2036
            524159.0, // 2037
            554905.0, // 2038
            627957.0, // 2039
        ];
        let bonuses = [
            50000.0, 75000.0, 78750.0, 82688.0, 86822.0, 91163.0, 95721.0, 100507.0,
            105533.0, 110809.0, 116350.0, 122167.0, 128256.0, 134629.0,
            0.0, // no bonus in the final year
        ];

        let entries = fees
            .iter()
            .zip(bonuses.iter())
            .zip(2025..)
            .map(|((&liability, &inflow), year)| ScheduleEntry::new(year, liability, inflow))
            .collect();

        Self { entries }
    }

    pub fn entries(&self) -> &[ScheduleEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Always false for a validated schedule
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn start_year(&self) -> u32 {
        self.entries[0].year
    }

    pub fn end_year(&self) -> u32 {
        self.entries[self.entries.len() - 1].year
    }

    /// Largest single liability over the horizon
    pub fn max_liability(&self) -> f64 {
        self.entries.iter().map(|e| e.liability).fold(0.0, f64::max)
    }

    /// Sum of the liabilities actually deducted (the first year's never is)
    pub fn total_liabilities(&self) -> f64 {
        self.entries.iter().skip(1).map(|e| e.liability).sum()
    }

    pub fn total_inflows(&self) -> f64 {
        self.entries.iter().map(|e| e.inflow).sum()
    }
}
