//! Expense model
//!
//! Represents a single ledger row with soft-delete support and the
//! original amount/currency recorded at first entry.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tolerance used when comparing monetary amounts
pub const AMOUNT_EPSILON: f64 = 0.001;

/// A single expense entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    /// Unique identifier, assigned as max(existing) + 1 and never reused
    pub id: u64,

    /// Current amount, expressed in `currency`
    pub amount: f64,

    /// Free-text description
    pub description: String,

    /// Creation time, unless changed by an edit
    pub date: DateTime<Utc>,

    /// Current 3-letter currency code
    pub currency: String,

    /// Amount at first recording; set once and preserved across conversions
    #[serde(default)]
    pub original_amount: Option<f64>,

    /// Currency at first recording; reset only by an explicit currency edit
    #[serde(default)]
    pub original_currency: Option<String>,

    /// Soft-delete flag; hidden from default listings when set
    #[serde(default)]
    pub is_deleted: bool,

    /// When the expense was soft-deleted, if it was
    #[serde(default)]
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Expense {
    /// Create a new expense dated now, with originals recorded
    pub fn new(id: u64, amount: f64, description: impl Into<String>, currency: impl Into<String>) -> Self {
        let currency = currency.into();
        Self {
            id,
            amount,
            description: description.into(),
            date: Utc::now(),
            currency: currency.clone(),
            original_amount: Some(amount),
            original_currency: Some(currency),
            is_deleted: false,
            deleted_at: None,
        }
    }

    /// The next id for a ledger: max(existing) + 1, or 1 when empty.
    /// Soft-deleted rows still count, so ids are never reused.
    pub fn next_id(expenses: &[Expense]) -> u64 {
        expenses.iter().map(|e| e.id).max().map_or(1, |max| max + 1)
    }

    /// Mark this expense as soft-deleted
    pub fn mark_deleted(&mut self) {
        self.is_deleted = true;
        self.deleted_at = Some(Utc::now());
    }

    /// Undo a soft delete
    pub fn mark_recovered(&mut self) {
        self.is_deleted = false;
        self.deleted_at = None;
    }

    /// Record the current amount/currency as the originals if they are
    /// absent. Called before any conversion touches the entry.
    pub fn backfill_originals(&mut self) {
        if self.original_amount.is_none() {
            self.original_amount = Some(self.amount);
        }
        if self.original_currency.is_none() {
            self.original_currency = Some(self.currency.clone());
        }
    }

    /// Whether the current value differs from the originally recorded one
    pub fn differs_from_original(&self) -> bool {
        let original_amount = self.original_amount.unwrap_or(self.amount);
        let original_currency = self.original_currency.as_deref().unwrap_or(&self.currency);
        (original_amount - self.amount).abs() > AMOUNT_EPSILON || original_currency != self.currency
    }
}

impl fmt::Display for Expense {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "#{}: {:.2} {} - {}",
            self.id, self.amount, self.currency, self.description
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_expense_records_originals() {
        let expense = Expense::new(1, 50.0, "Groceries", "USD");

        assert_eq!(expense.id, 1);
        assert_eq!(expense.amount, 50.0);
        assert_eq!(expense.original_amount, Some(50.0));
        assert_eq!(expense.original_currency.as_deref(), Some("USD"));
        assert!(!expense.is_deleted);
        assert!(expense.deleted_at.is_none());
    }

    #[test]
    fn test_next_id_empty_ledger() {
        assert_eq!(Expense::next_id(&[]), 1);
    }

    #[test]
    fn test_next_id_never_reused() {
        let mut expenses = vec![
            Expense::new(1, 10.0, "a", "USD"),
            Expense::new(2, 20.0, "b", "USD"),
            Expense::new(3, 30.0, "c", "USD"),
        ];

        // Soft-deleting does not free the id
        expenses[2].mark_deleted();
        assert_eq!(Expense::next_id(&expenses), 4);
    }

    #[test]
    fn test_delete_and_recover() {
        let mut expense = Expense::new(1, 10.0, "a", "USD");

        expense.mark_deleted();
        assert!(expense.is_deleted);
        assert!(expense.deleted_at.is_some());

        expense.mark_recovered();
        assert!(!expense.is_deleted);
        assert!(expense.deleted_at.is_none());
    }

    #[test]
    fn test_backfill_originals() {
        let mut expense = Expense::new(1, 10.0, "a", "USD");
        expense.original_amount = None;
        expense.original_currency = None;
        expense.amount = 12.5;
        expense.currency = "EUR".to_string();

        expense.backfill_originals();
        assert_eq!(expense.original_amount, Some(12.5));
        assert_eq!(expense.original_currency.as_deref(), Some("EUR"));

        // Backfill never overwrites an existing original
        expense.amount = 99.0;
        expense.backfill_originals();
        assert_eq!(expense.original_amount, Some(12.5));
    }

    #[test]
    fn test_differs_from_original() {
        let mut expense = Expense::new(1, 10.0, "a", "USD");
        assert!(!expense.differs_from_original());

        expense.amount = 15.0;
        assert!(expense.differs_from_original());

        expense.amount = 10.0;
        expense.currency = "EUR".to_string();
        assert!(expense.differs_from_original());
    }

    #[test]
    fn test_serde_camel_case_round_trip() {
        let expense = Expense::new(7, 42.5, "Lunch", "EUR");
        let json = serde_json::to_string(&expense).unwrap();

        assert!(json.contains("originalAmount"));
        assert!(json.contains("originalCurrency"));
        assert!(json.contains("isDeleted"));
        assert!(json.contains("deletedAt"));

        let parsed: Expense = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, expense);
    }

    #[test]
    fn test_parses_legacy_row_without_originals() {
        let json = r#"{
            "id": 3,
            "amount": 12.0,
            "description": "Coffee",
            "date": "2025-07-29T10:00:00Z",
            "currency": "USD"
        }"#;

        let parsed: Expense = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.original_amount, None);
        assert_eq!(parsed.original_currency, None);
        assert!(!parsed.is_deleted);
    }
}
