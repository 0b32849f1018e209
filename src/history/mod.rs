//! Snapshot-based undo/redo history
//!
//! Wraps the storage layer with two bounded stacks of full-state snapshots.
//! Every mutating command must call [`HistoryManager::begin_mutation`] before
//! touching the ledger or config, and [`HistoryManager::clear_redo`] right
//! after when it is a new user-initiated command (undo/redo themselves keep
//! the redo stack alive).

pub mod snapshot;

pub use snapshot::{Snapshot, SnapshotStack, SNAPSHOT_CAPACITY};

use std::path::PathBuf;

use crate::error::ExpenseResult;
use crate::storage::{file_io, Storage};

/// Which of the two history stacks a call refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StackKind {
    Undo,
    Redo,
}

/// Manages the undo and redo snapshot stacks
pub struct HistoryManager<'a> {
    storage: &'a Storage,
}

impl<'a> HistoryManager<'a> {
    /// Create a history manager over the given storage
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Snapshot the current ledger + config onto the undo stack, tagged with
    /// the command about to run. Must be called once, synchronously, before
    /// any mutation logic.
    ///
    /// Fails when the ledger itself is unreadable, which halts the command
    /// before anything is mutated.
    pub fn begin_mutation(&self, command: &str) -> ExpenseResult<()> {
        let snapshot = self.capture(command)?;
        let mut undo = self.load_stack(StackKind::Undo);
        undo.push(snapshot);
        self.save_stack(StackKind::Undo, &undo)
    }

    /// Empty the redo stack. Called after `begin_mutation` for every new
    /// user-initiated command, invalidating redo history.
    pub fn clear_redo(&self) -> ExpenseResult<()> {
        self.save_stack(StackKind::Redo, &SnapshotStack::new())
    }

    /// Revert the most recent mutation. The pre-undo state moves onto the
    /// redo stack under the same command name. Returns the name of the
    /// undone command, or `None` when there is nothing to undo.
    pub fn undo(&self) -> ExpenseResult<Option<String>> {
        self.transfer(StackKind::Undo, StackKind::Redo)
    }

    /// Re-apply the most recent undone mutation. Symmetric to [`undo`].
    ///
    /// [`undo`]: HistoryManager::undo
    pub fn redo(&self) -> ExpenseResult<Option<String>> {
        self.transfer(StackKind::Redo, StackKind::Undo)
    }

    /// The command name that `undo` would revert, if any
    pub fn peek_undo_command(&self) -> Option<String> {
        self.load_stack(StackKind::Undo)
            .last_command()
            .map(String::from)
    }

    /// The command name that `redo` would re-apply, if any
    pub fn peek_redo_command(&self) -> Option<String> {
        self.load_stack(StackKind::Redo)
            .last_command()
            .map(String::from)
    }

    /// Pop the latest snapshot from `from`, push the current state onto `to`
    /// under the popped command name, then restore the popped snapshot.
    fn transfer(&self, from: StackKind, to: StackKind) -> ExpenseResult<Option<String>> {
        let mut source = self.load_stack(from);
        let Some(popped) = source.pop() else {
            return Ok(None);
        };
        self.save_stack(from, &source)?;

        // Capture the pre-restore state so the operation itself is reversible
        let current = self.capture(&popped.command)?;
        let mut target = self.load_stack(to);
        target.push(current);
        self.save_stack(to, &target)?;

        self.restore(&popped)?;
        Ok(Some(popped.command))
    }

    /// Deep-copy the current persisted state into a snapshot
    fn capture(&self, command: &str) -> ExpenseResult<Snapshot> {
        let data = self.storage.load_ledger()?;
        let config = self.storage.load_config();
        Ok(Snapshot::new(command, data, config))
    }

    /// Write a snapshot back as the current persisted state
    fn restore(&self, snapshot: &Snapshot) -> ExpenseResult<()> {
        self.storage.save_ledger(&snapshot.data)?;
        self.storage.save_config(&snapshot.config)
    }

    /// Load a stack file. A corrupt or unreadable stack reads as empty: the
    /// user loses history, never data.
    fn load_stack(&self, kind: StackKind) -> SnapshotStack {
        let (stack, recovered) = file_io::read_json_or_default(self.stack_path(kind));
        if recovered {
            eprintln!("Warning: history file was unreadable; continuing with empty history.");
        }
        stack
    }

    fn save_stack(&self, kind: StackKind, stack: &SnapshotStack) -> ExpenseResult<()> {
        file_io::write_json_atomic(self.stack_path(kind), stack)
    }

    fn stack_path(&self, kind: StackKind) -> PathBuf {
        match kind {
            StackKind::Undo => self.storage.paths().undo_stack_file(),
            StackKind::Redo => self.storage.paths().redo_stack_file(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::ExpensePaths;
    use crate::models::Expense;
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = ExpensePaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        (temp_dir, storage)
    }

    fn add_expense(storage: &Storage, history: &HistoryManager, id: u64, amount: f64) {
        history.begin_mutation("add").unwrap();
        history.clear_redo().unwrap();
        let mut expenses = storage.load_ledger().unwrap();
        expenses.push(Expense::new(id, amount, format!("expense {id}"), "USD"));
        storage.save_ledger(&expenses).unwrap();
    }

    #[test]
    fn test_undo_restores_pre_command_state() {
        let (_temp_dir, storage) = create_test_storage();
        let history = HistoryManager::new(&storage);

        add_expense(&storage, &history, 1, 50.0);
        assert_eq!(storage.load_ledger().unwrap().len(), 1);

        let undone = history.undo().unwrap();
        assert_eq!(undone.as_deref(), Some("add"));
        assert!(storage.load_ledger().unwrap().is_empty());
    }

    #[test]
    fn test_redo_restores_post_command_state() {
        let (_temp_dir, storage) = create_test_storage();
        let history = HistoryManager::new(&storage);

        add_expense(&storage, &history, 1, 50.0);
        history.undo().unwrap();

        let redone = history.redo().unwrap();
        assert_eq!(redone.as_deref(), Some("add"));

        let expenses = storage.load_ledger().unwrap();
        assert_eq!(expenses.len(), 1);
        assert_eq!(expenses[0].amount, 50.0);
    }

    #[test]
    fn test_undo_empty_history() {
        let (_temp_dir, storage) = create_test_storage();
        let history = HistoryManager::new(&storage);

        assert_eq!(history.undo().unwrap(), None);
        assert_eq!(history.redo().unwrap(), None);
    }

    #[test]
    fn test_undo_restores_config_too() {
        let (_temp_dir, storage) = create_test_storage();
        let history = HistoryManager::new(&storage);

        history.begin_mutation("change-currency").unwrap();
        history.clear_redo().unwrap();
        let mut config = storage.load_config();
        config.set_preferred_currency("EUR", None);
        storage.save_config(&config).unwrap();

        history.undo().unwrap();
        assert_eq!(storage.load_config().preferred_currency, None);
    }

    #[test]
    fn test_new_command_clears_redo() {
        let (_temp_dir, storage) = create_test_storage();
        let history = HistoryManager::new(&storage);

        add_expense(&storage, &history, 1, 50.0);
        history.undo().unwrap();
        assert!(history.peek_redo_command().is_some());

        add_expense(&storage, &history, 1, 75.0);
        assert!(history.peek_redo_command().is_none());
        assert_eq!(history.redo().unwrap(), None);
    }

    #[test]
    fn test_stack_bounded_at_capacity() {
        let (temp_dir, storage) = create_test_storage();
        let history = HistoryManager::new(&storage);

        for i in 0..8 {
            add_expense(&storage, &history, i + 1, 10.0);
        }

        let raw = std::fs::read_to_string(temp_dir.path().join("undo_stack.json")).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), SNAPSHOT_CAPACITY);

        // Only the five most recent states can be unwound
        for _ in 0..SNAPSHOT_CAPACITY {
            assert!(history.undo().unwrap().is_some());
        }
        assert_eq!(history.undo().unwrap(), None);

        // The oldest reachable snapshot holds the first three expenses
        assert_eq!(storage.load_ledger().unwrap().len(), 3);
    }

    #[test]
    fn test_corrupt_stack_treated_as_empty() {
        let (temp_dir, storage) = create_test_storage();
        let history = HistoryManager::new(&storage);

        add_expense(&storage, &history, 1, 50.0);
        std::fs::write(temp_dir.path().join("undo_stack.json"), "garbage").unwrap();

        // History is lost but the data is untouched
        assert_eq!(history.undo().unwrap(), None);
        assert_eq!(storage.load_ledger().unwrap().len(), 1);
    }

    #[test]
    fn test_undo_after_each_command_walks_backwards() {
        let (_temp_dir, storage) = create_test_storage();
        let history = HistoryManager::new(&storage);

        add_expense(&storage, &history, 1, 10.0);
        add_expense(&storage, &history, 2, 20.0);
        add_expense(&storage, &history, 3, 30.0);

        history.undo().unwrap();
        assert_eq!(storage.load_ledger().unwrap().len(), 2);
        history.undo().unwrap();
        assert_eq!(storage.load_ledger().unwrap().len(), 1);
        history.undo().unwrap();
        assert!(storage.load_ledger().unwrap().is_empty());
    }
}
