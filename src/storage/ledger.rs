//! Ledger persistence
//!
//! The ledger is a single JSON array of expense rows, replaced wholesale on
//! every write. A corrupt ledger file is a fatal condition: there is no safe
//! default for financial data, so commands must halt before mutating.

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use crate::error::{ExpenseError, ExpenseResult};
use crate::models::Expense;

use super::file_io::write_json_atomic;

/// Repository for the expense ledger file
pub struct LedgerRepository {
    path: PathBuf,
}

impl LedgerRepository {
    /// Create a new ledger repository backed by the given file
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// Load all expenses. A missing file reads as an empty ledger; an
    /// unparseable file is a fatal error.
    pub fn load(&self) -> ExpenseResult<Vec<Expense>> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path).map_err(|e| {
            ExpenseError::Storage(format!("Failed to open {}: {}", self.path.display(), e))
        })?;

        serde_json::from_reader(BufReader::new(file))
            .map_err(|e| ExpenseError::CorruptLedger(format!("{}: {}", self.path.display(), e)))
    }

    /// Replace the ledger file with the given expenses (atomic)
    pub fn save(&self, expenses: &[Expense]) -> ExpenseResult<()> {
        write_json_atomic(&self.path, &expenses)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_repo() -> (TempDir, LedgerRepository) {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.json");
        (temp_dir, LedgerRepository::new(path))
    }

    #[test]
    fn test_missing_file_reads_empty() {
        let (_temp_dir, repo) = create_test_repo();
        assert!(repo.load().unwrap().is_empty());
    }

    #[test]
    fn test_save_and_reload() {
        let (_temp_dir, repo) = create_test_repo();

        let expenses = vec![
            Expense::new(1, 50.0, "Groceries", "USD"),
            Expense::new(2, 12.5, "Coffee", "EUR"),
        ];
        repo.save(&expenses).unwrap();

        let loaded = repo.load().unwrap();
        assert_eq!(loaded, expenses);
    }

    #[test]
    fn test_corrupt_ledger_is_fatal() {
        let (temp_dir, repo) = create_test_repo();
        std::fs::write(temp_dir.path().join("data.json"), "{ definitely not json").unwrap();

        let err = repo.load().unwrap_err();
        assert!(matches!(err, ExpenseError::CorruptLedger(_)));
    }

    #[test]
    fn test_save_replaces_wholesale() {
        let (_temp_dir, repo) = create_test_repo();

        repo.save(&[Expense::new(1, 1.0, "a", "USD")]).unwrap();
        repo.save(&[Expense::new(2, 2.0, "b", "USD")]).unwrap();

        let loaded = repo.load().unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, 2);
    }
}
