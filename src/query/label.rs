//! Export label generation
//!
//! Derives deterministic filenames and titles from the applied filter
//! combination. When several filters are combined, the most specific one
//! wins: exact date, then week-of-month, then weekday combinations, then
//! month, weekday, and year alone, falling back to "AllTime".

use chrono::Weekday;

use crate::models::FilterCriteria;

/// Labels derived from a filter combination
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportLabels {
    /// Label used in export filenames, e.g. `Expense_July_2025`
    pub filename_label: String,
    /// Label used in titles and list headers, e.g. `July_2025`
    pub title_label: String,
}

/// Derive filename/title labels from the filter state
pub fn generate_labels(criteria: &FilterCriteria) -> ExportLabels {
    let year_suffix = match criteria.year {
        Some(year) => format!("_{year}"),
        None => "_AllYears".to_string(),
    };

    let base = if let Some(date) = criteria.date {
        date.format("%Y-%m-%d").to_string()
    } else if let (Some(week), Some(month)) = (criteria.week, criteria.month) {
        format!("{}_{}{}", week_suffix(week), month_name(month), year_suffix)
    } else if let (Some(day), Some(month)) = (criteria.day, criteria.month) {
        format!("{}_{}{}", weekday_name(day), month_name(month), year_suffix)
    } else if let (Some(day), Some(year)) = (criteria.day, criteria.year) {
        format!("{}_AllMonths_{}", weekday_name(day), year)
    } else if let Some(month) = criteria.month {
        format!("{}{}", month_name(month), year_suffix)
    } else if let Some(day) = criteria.day {
        format!("{}_AllMonths_AllYears", weekday_name(day))
    } else if let Some(year) = criteria.year {
        year.to_string()
    } else {
        "AllTime".to_string()
    };

    ExportLabels {
        filename_label: format!("Expense_{base}"),
        title_label: base,
    }
}

/// English month name for a 1-based month number
pub fn month_name(month: u32) -> &'static str {
    const MONTH_NAMES: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    MONTH_NAMES[(month as usize - 1).min(11)]
}

/// Full English weekday name
pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// Ordinal week label: 1stWeek, 2ndWeek, 3rdWeek, then NthWeek
fn week_suffix(week: u32) -> String {
    match week {
        1 => "1stWeek".to_string(),
        2 => "2ndWeek".to_string(),
        3 => "3rdWeek".to_string(),
        n => format!("{n}thWeek"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn labels(criteria: FilterCriteria) -> String {
        generate_labels(&criteria).title_label
    }

    #[test]
    fn test_no_filters_is_all_time() {
        let result = generate_labels(&FilterCriteria::default());
        assert_eq!(result.title_label, "AllTime");
        assert_eq!(result.filename_label, "Expense_AllTime");
    }

    #[test]
    fn test_date_wins_over_everything() {
        let criteria = FilterCriteria {
            date: NaiveDate::from_ymd_opt(2025, 7, 29),
            ..Default::default()
        };
        assert_eq!(labels(criteria), "2025-07-29");
    }

    #[test]
    fn test_month_and_year() {
        let criteria = FilterCriteria {
            month: Some(7),
            year: Some(2025),
            ..Default::default()
        };
        assert_eq!(labels(criteria), "July_2025");
    }

    #[test]
    fn test_month_without_year() {
        let criteria = FilterCriteria {
            month: Some(7),
            ..Default::default()
        };
        assert_eq!(labels(criteria), "July_AllYears");
    }

    #[test]
    fn test_week_and_month() {
        let criteria = FilterCriteria {
            week: Some(2),
            month: Some(7),
            year: Some(2025),
            ..Default::default()
        };
        assert_eq!(labels(criteria), "2ndWeek_July_2025");

        let criteria = FilterCriteria {
            week: Some(5),
            month: Some(3),
            ..Default::default()
        };
        assert_eq!(labels(criteria), "5thWeek_March_AllYears");
    }

    #[test]
    fn test_day_and_month() {
        let criteria = FilterCriteria {
            day: Some(Weekday::Wed),
            month: Some(7),
            ..Default::default()
        };
        assert_eq!(labels(criteria), "Wednesday_July_AllYears");
    }

    #[test]
    fn test_day_and_year() {
        let criteria = FilterCriteria {
            day: Some(Weekday::Wed),
            year: Some(2024),
            ..Default::default()
        };
        assert_eq!(labels(criteria), "Wednesday_AllMonths_2024");
    }

    #[test]
    fn test_day_alone() {
        let criteria = FilterCriteria {
            day: Some(Weekday::Wed),
            ..Default::default()
        };
        assert_eq!(labels(criteria), "Wednesday_AllMonths_AllYears");
    }

    #[test]
    fn test_year_alone() {
        let criteria = FilterCriteria {
            year: Some(2025),
            ..Default::default()
        };
        assert_eq!(labels(criteria), "2025");
    }
}
