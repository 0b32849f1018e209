//! Storage layer for expense-cli
//!
//! Provides JSON whole-file storage with atomic replacement. No cross-process
//! locking exists: two simultaneous invocations against the same data
//! directory race on last-write-wins file replacement. That is an accepted
//! limitation of the design, not a solved problem.

pub mod file_io;
pub mod ledger;

pub use file_io::{read_json, read_json_or_default, write_json_atomic};
pub use ledger::LedgerRepository;

use crate::config::paths::ExpensePaths;
use crate::config::settings::Config;
use crate::error::ExpenseResult;
use crate::models::Expense;

/// Main storage coordinator for the ledger and config records
pub struct Storage {
    paths: ExpensePaths,
    ledger: LedgerRepository,
}

impl Storage {
    /// Create a new Storage instance, making sure all persisted records
    /// exist before any command executes
    pub fn new(paths: ExpensePaths) -> ExpenseResult<Self> {
        ensure_files(&paths)?;

        Ok(Self {
            ledger: LedgerRepository::new(paths.data_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &ExpensePaths {
        &self.paths
    }

    /// Load the expense ledger. Fatal on a corrupt file.
    pub fn load_ledger(&self) -> ExpenseResult<Vec<Expense>> {
        self.ledger.load()
    }

    /// Replace the expense ledger
    pub fn save_ledger(&self, expenses: &[Expense]) -> ExpenseResult<()> {
        self.ledger.save(expenses)
    }

    /// Load the config record. A corrupt or unparseable config is recovered
    /// by resetting to the default, with a notice on stderr; the command
    /// itself continues.
    pub fn load_config(&self) -> Config {
        let (config, recovered) = read_json_or_default(self.paths.config_file());
        if recovered {
            eprintln!("Warning: config file was unreadable; starting from a fresh default.");
        }
        config
    }

    /// Replace the config record
    pub fn save_config(&self, config: &Config) -> ExpenseResult<()> {
        write_json_atomic(self.paths.config_file(), config)
    }
}

/// Create the data directory and all four persisted records (ledger, config,
/// undo stack, redo stack) if any are missing
fn ensure_files(paths: &ExpensePaths) -> ExpenseResult<()> {
    std::fs::create_dir_all(paths.base_dir())
        .map_err(|e| crate::error::ExpenseError::Io(format!("Failed to create data directory: {}", e)))?;

    let defaults = [
        (paths.data_file(), "[]"),
        (paths.config_file(), "{}"),
        (paths.undo_stack_file(), "[]"),
        (paths.redo_stack_file(), "[]"),
    ];

    for (path, initial) in defaults {
        if !path.exists() {
            std::fs::write(&path, initial).map_err(|e| {
                crate::error::ExpenseError::Io(format!(
                    "Failed to create {}: {}",
                    path.display(),
                    e
                ))
            })?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creates_all_records() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let _storage = Storage::new(paths).unwrap();

        assert!(temp_dir.path().join("data.json").exists());
        assert!(temp_dir.path().join("config.json").exists());
        assert!(temp_dir.path().join("undo_stack.json").exists());
        assert!(temp_dir.path().join("redo_stack.json").exists());
    }

    #[test]
    fn test_config_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        let mut config = storage.load_config();
        assert_eq!(config.preferred_currency, None);

        config.set_preferred_currency("EUR", None);
        storage.save_config(&config).unwrap();

        let reloaded = storage.load_config();
        assert_eq!(reloaded.preferred_currency.as_deref(), Some("EUR"));
    }

    #[test]
    fn test_corrupt_config_recovers_to_default() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        std::fs::write(temp_dir.path().join("config.json"), "garbage").unwrap();
        let config = storage.load_config();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_corrupt_ledger_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();

        std::fs::write(temp_dir.path().join("data.json"), "garbage").unwrap();
        assert!(storage.load_ledger().is_err());
    }
}
