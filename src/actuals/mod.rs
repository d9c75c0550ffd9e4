//! Recorded actual values and their variance against a projection

mod data;
pub mod loader;

pub use data::{compare, ActualRecord, VarianceRow};
pub use loader::{load_actuals, load_actuals_from_reader};
