//! Path management for expense-cli
//!
//! All persisted records live in a single data directory.
//!
//! ## Path Resolution Order
//!
//! 1. `EXPENSE_DATA_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `~/.expense`
//! 3. Windows: `%USERPROFILE%\.expense`

use std::path::PathBuf;

use crate::error::ExpenseError;

/// Manages all paths used by expense-cli
#[derive(Debug, Clone)]
pub struct ExpensePaths {
    /// Base directory for all expense-cli data
    base_dir: PathBuf,
}

impl ExpensePaths {
    /// Create a new ExpensePaths instance
    ///
    /// Path resolution:
    /// 1. `EXPENSE_DATA_DIR` env var (explicit override)
    /// 2. `~/.expense` (or `%USERPROFILE%\.expense` on Windows)
    ///
    /// # Errors
    ///
    /// Returns an error if the home directory cannot be determined.
    pub fn new() -> Result<Self, ExpenseError> {
        let base_dir = if let Ok(custom) = std::env::var("EXPENSE_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create ExpensePaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory (~/.expense/ or equivalent)
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the ledger file
    pub fn data_file(&self) -> PathBuf {
        self.base_dir.join("data.json")
    }

    /// Get the path to the config file
    pub fn config_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the undo stack file
    pub fn undo_stack_file(&self) -> PathBuf {
        self.base_dir.join("undo_stack.json")
    }

    /// Get the path to the redo stack file
    pub fn redo_stack_file(&self) -> PathBuf {
        self.base_dir.join("redo_stack.json")
    }

    /// Get the path to the audit log
    pub fn audit_log(&self) -> PathBuf {
        self.base_dir.join("audit.log")
    }

    /// Resolve the default export directory (the user's Downloads folder,
    /// falling back to the current directory when no home is available)
    pub fn downloads_dir() -> PathBuf {
        home_dir()
            .map(|home| home.join("Downloads"))
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Resolve the user's home directory from the environment
#[cfg(not(windows))]
fn home_dir() -> Option<PathBuf> {
    std::env::var("HOME").ok().map(PathBuf::from)
}

/// Resolve the user's home directory from the environment
#[cfg(windows)]
fn home_dir() -> Option<PathBuf> {
    std::env::var("USERPROFILE").ok().map(PathBuf::from)
}

/// Resolve the default data directory path
fn resolve_default_path() -> Result<PathBuf, ExpenseError> {
    let home = home_dir()
        .ok_or_else(|| ExpenseError::Config("Could not determine home directory".into()))?;
    Ok(home.join(".expense"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_file(), temp_dir.path().join("data.json"));
        assert_eq!(paths.config_file(), temp_dir.path().join("config.json"));
    }

    #[test]
    fn test_stack_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(
            paths.undo_stack_file(),
            temp_dir.path().join("undo_stack.json")
        );
        assert_eq!(
            paths.redo_stack_file(),
            temp_dir.path().join("redo_stack.json")
        );
    }
}
