//! Export module for EnvelopeCLI
//!
//! Provides complete data export functionality in multiple formats:
//! - CSV: For transaction and budget data (spreadsheet-compatible)
//! - JSON: For machine-readable full database export
//! - YAML: For human-readable full database export

pub mod csv;
pub mod json;
pub mod yaml;

pub use csv::{export_transactions_csv, export_allocations_csv, export_accounts_csv};
pub use json::{export_full_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;
