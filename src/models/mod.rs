//! Core data models

pub mod expense;
pub mod filter;

pub use expense::{Expense, AMOUNT_EPSILON};
pub use filter::FilterCriteria;
