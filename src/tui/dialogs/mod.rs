//! Dialog modules for the TUI
//!
//! Contains modal dialogs for various operations

pub mod bulk_categorize;
pub mod command_palette;
pub mod confirm;
pub mod help;
pub mod move_funds;
pub mod transaction;
