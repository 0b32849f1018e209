//! Filtering and label derivation for list/total/export

pub mod engine;
pub mod label;

pub use engine::{filter_expenses, week_of_month};
pub use label::{generate_labels, ExportLabels};
