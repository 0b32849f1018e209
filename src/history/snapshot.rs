//! Snapshot and bounded stack types for undo/redo
//!
//! Each snapshot is a full deep copy of the ledger and config at a point in
//! time, tagged with the name of the command that was about to run. Whole-
//! state snapshotting trades memory for simplicity: any mutation, however
//! complex, is undone in one step with no per-field reconciliation.

use serde::{Deserialize, Serialize};

use crate::config::settings::Config;
use crate::models::Expense;

/// Maximum number of snapshots kept per stack
pub const SNAPSHOT_CAPACITY: usize = 5;

/// A full point-in-time copy of ledger + config
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Name of the command this snapshot was taken for
    pub command: String,

    /// The complete ledger at capture time
    pub data: Vec<Expense>,

    /// The config at capture time
    pub config: Config,
}

impl Snapshot {
    /// Capture a snapshot for the given command
    pub fn new(command: impl Into<String>, data: Vec<Expense>, config: Config) -> Self {
        Self {
            command: command.into(),
            data,
            config,
        }
    }
}

/// A bounded stack of snapshots, ordered oldest first
///
/// Serialized as a plain JSON array so the on-disk stack files stay a simple
/// ordered list, max length [`SNAPSHOT_CAPACITY`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotStack {
    snapshots: Vec<Snapshot>,
}

impl SnapshotStack {
    /// Create an empty stack
    pub fn new() -> Self {
        Self::default()
    }

    /// Push a snapshot, evicting the oldest entry when the bound is exceeded
    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
        if self.snapshots.len() > SNAPSHOT_CAPACITY {
            self.snapshots.remove(0);
        }
    }

    /// Pop the most recent snapshot
    pub fn pop(&mut self) -> Option<Snapshot> {
        self.snapshots.pop()
    }

    /// The command name of the most recent snapshot, if any
    pub fn last_command(&self) -> Option<&str> {
        self.snapshots.last().map(|s| s.command.as_str())
    }

    /// Number of snapshots held
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether the stack is empty
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(command: &str) -> Snapshot {
        Snapshot::new(command, Vec::new(), Config::default())
    }

    #[test]
    fn test_push_and_pop_lifo() {
        let mut stack = SnapshotStack::new();
        stack.push(snapshot("add"));
        stack.push(snapshot("delete"));

        assert_eq!(stack.last_command(), Some("delete"));
        assert_eq!(stack.pop().unwrap().command, "delete");
        assert_eq!(stack.pop().unwrap().command, "add");
        assert!(stack.pop().is_none());
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut stack = SnapshotStack::new();
        for i in 0..7 {
            stack.push(snapshot(&format!("cmd-{i}")));
        }

        assert_eq!(stack.len(), SNAPSHOT_CAPACITY);
        // cmd-0 and cmd-1 were evicted from the front
        assert_eq!(stack.pop().unwrap().command, "cmd-6");
        let mut oldest = stack;
        while oldest.len() > 1 {
            oldest.pop();
        }
        assert_eq!(oldest.last_command(), Some("cmd-2"));
    }

    #[test]
    fn test_serializes_as_plain_array() {
        let mut stack = SnapshotStack::new();
        stack.push(snapshot("add"));

        let json = serde_json::to_string(&stack).unwrap();
        assert!(json.starts_with('['));

        let parsed: SnapshotStack = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.last_command(), Some("add"));
    }
}
