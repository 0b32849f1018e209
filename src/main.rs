//! expense-cli binary entry point.
//!
//! Crate root: declares the top-level modules that make up the crate.
//!
//! Only the coherent "expense" core is wired here. A second, incomplete
//! "envelope" budgeting/TUI layer (cli, crypto, display, export, services, tui,
//! plus storage/income, storage/targets) also exists on disk but is built on a
//! data model — Money, Transaction, Account, Category, Payee, EnvelopeError,
//! Settings — and external crates (ratatui, crossterm, argon2, aes_gcm, base64,
//! serde_yaml) that are defined nowhere in the tree. It cannot be compiled
//! without authoring that model, so it is left unwired. See BUILD_FLAGS.json.

mod audit;
mod config;
mod error;
mod history;
mod models;
mod query;
mod storage;
mod ui;

fn main() {
    eprintln!("expense-cli");
}
