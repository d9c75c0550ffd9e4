//! Liability and inflow schedules over the projection horizon

mod data;
pub mod loader;

pub use data::{Schedule, ScheduleEntry};
pub use loader::{load_schedule, load_schedule_from_reader, load_default_schedule, DEFAULT_SCHEDULE_PATH};
