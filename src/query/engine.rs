//! Filter engine
//!
//! A pure function mapping validated criteria over the entry list. Every
//! read path (list, total, export) goes through the same predicate so filter
//! semantics stay consistent. Criteria are validated upstream; the engine
//! only evaluates them.

use chrono::{DateTime, Datelike, Utc};

use crate::models::{Expense, FilterCriteria};

/// Week-of-month for a date: the 1-based index of the 7-day block containing
/// it (days 1-7 are week 1, days 8-14 week 2, and so on)
pub fn week_of_month(date: &DateTime<Utc>) -> u32 {
    (date.day() + 6) / 7
}

/// Apply the conjunction of all supplied criteria over the entries,
/// returning the matching subset. Soft-deleted rows are excluded unless
/// `include_deleted` is set.
pub fn filter_expenses(
    expenses: &[Expense],
    criteria: &FilterCriteria,
    include_deleted: bool,
) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|e| matches(e, criteria, include_deleted))
        .cloned()
        .collect()
}

fn matches(expense: &Expense, criteria: &FilterCriteria, include_deleted: bool) -> bool {
    if !include_deleted && expense.is_deleted {
        return false;
    }

    let date = expense.date;

    if let Some(filter_date) = criteria.date {
        if date.date_naive() != filter_date {
            return false;
        }
    }

    if let Some(day) = criteria.day {
        if date.weekday() != day {
            return false;
        }
    }

    if let Some(month) = criteria.month {
        if date.month() != month {
            return false;
        }
    }

    if let Some(year) = criteria.year {
        if date.year() != year {
            return false;
        }
    }

    if let Some(week) = criteria.week {
        if week_of_month(&date) != week {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone, Weekday};

    fn expense_on(id: u64, year: i32, month: u32, day: u32) -> Expense {
        let mut expense = Expense::new(id, 10.0, format!("expense {id}"), "USD");
        expense.date = Utc.with_ymd_and_hms(year, month, day, 12, 30, 0).unwrap();
        expense
    }

    #[test]
    fn test_deleted_hidden_by_default() {
        let mut deleted = expense_on(1, 2025, 7, 1);
        deleted.mark_deleted();
        let visible = expense_on(2, 2025, 7, 2);
        let expenses = vec![deleted, visible];

        let criteria = FilterCriteria::default();
        let filtered = filter_expenses(&expenses, &criteria, false);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 2);

        let all = filter_expenses(&expenses, &criteria, true);
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn test_month_and_year_conjunction() {
        let expenses = vec![
            expense_on(1, 2025, 7, 10),
            expense_on(2, 2025, 6, 10),
            expense_on(3, 2024, 7, 10),
        ];

        let criteria = FilterCriteria {
            month: Some(7),
            year: Some(2025),
            ..Default::default()
        };

        let filtered = filter_expenses(&expenses, &criteria, false);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);
    }

    #[test]
    fn test_exact_date_ignores_time_of_day() {
        let expenses = vec![expense_on(1, 2025, 7, 29), expense_on(2, 2025, 7, 30)];

        let criteria = FilterCriteria {
            date: NaiveDate::from_ymd_opt(2025, 7, 29),
            ..Default::default()
        };

        let filtered = filter_expenses(&expenses, &criteria, false);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);
    }

    #[test]
    fn test_weekday_match() {
        // 2025-07-28 is a Monday
        let expenses = vec![expense_on(1, 2025, 7, 28), expense_on(2, 2025, 7, 29)];

        let criteria = FilterCriteria {
            day: Some(Weekday::Mon),
            ..Default::default()
        };

        let filtered = filter_expenses(&expenses, &criteria, false);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, 1);
    }

    #[test]
    fn test_week_of_month_blocks() {
        let day1 = expense_on(1, 2025, 7, 1);
        let day7 = expense_on(2, 2025, 7, 7);
        let day8 = expense_on(3, 2025, 7, 8);
        let day15 = expense_on(4, 2025, 7, 15);
        let day21 = expense_on(5, 2025, 7, 21);
        let day22 = expense_on(6, 2025, 7, 22);
        let day31 = expense_on(7, 2025, 7, 31);

        assert_eq!(week_of_month(&day1.date), 1);
        assert_eq!(week_of_month(&day7.date), 1);
        assert_eq!(week_of_month(&day8.date), 2);
        assert_eq!(week_of_month(&day15.date), 3);
        assert_eq!(week_of_month(&day21.date), 3);
        assert_eq!(week_of_month(&day22.date), 4);
        assert_eq!(week_of_month(&day31.date), 5);
    }

    #[test]
    fn test_week_filter_selects_third_block() {
        let expenses = vec![
            expense_on(1, 2025, 7, 14),
            expense_on(2, 2025, 7, 15),
            expense_on(3, 2025, 7, 21),
            expense_on(4, 2025, 7, 22),
        ];

        let criteria = FilterCriteria {
            month: Some(7),
            week: Some(3),
            ..Default::default()
        };

        let filtered = filter_expenses(&expenses, &criteria, false);
        let ids: Vec<u64> = filtered.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }
}
