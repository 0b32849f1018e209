//! Filter criteria for list/total/export queries
//!
//! Criteria arrive from the CLI as loose strings; `FilterCriteria::parse`
//! validates them up front and produces a typed value. The filter engine
//! itself never re-validates.

use chrono::{NaiveDate, Weekday};

use crate::error::{ExpenseError, ExpenseResult};

/// The seven weekday names accepted by `--day`, in Monday-first order
const WEEKDAY_NAMES: [(&str, Weekday); 7] = [
    ("monday", Weekday::Mon),
    ("tuesday", Weekday::Tue),
    ("wednesday", Weekday::Wed),
    ("thursday", Weekday::Thu),
    ("friday", Weekday::Fri),
    ("saturday", Weekday::Sat),
    ("sunday", Weekday::Sun),
];

/// A validated set of query filters. All criteria are optional and
/// independently toggleable; filtering applies the conjunction of those
/// present.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    /// Exact calendar-day match (ignores time of day)
    pub date: Option<NaiveDate>,
    /// Weekday match
    pub day: Option<Weekday>,
    /// Calendar month, 1-12
    pub month: Option<u32>,
    /// Week of month, 1-5; only meaningful together with `month`
    pub week: Option<u32>,
    /// Calendar year
    pub year: Option<i32>,
}

impl FilterCriteria {
    /// Validate raw CLI filter options and build a typed criteria value.
    ///
    /// Rules:
    /// 1. `date` is mutually exclusive with `day`/`month`/`week`/`year`.
    /// 2. `date` must be a valid `YYYY-MM-DD` calendar date.
    /// 3. `week` requires `month` and must be in 1..=5.
    /// 4. `month` must be in 1..=12; `year` must be exactly 4 digits.
    /// 5. `day` must be one of the seven English weekday names.
    pub fn parse(
        date: Option<&str>,
        day: Option<&str>,
        month: Option<&str>,
        week: Option<&str>,
        year: Option<&str>,
    ) -> ExpenseResult<Self> {
        if date.is_some() && (day.is_some() || month.is_some() || week.is_some() || year.is_some())
        {
            return Err(ExpenseError::Validation(
                "Cannot use --date with --day, --month, --week, or --year. \
                 Please choose one filtering method."
                    .into(),
            ));
        }

        let date = date.map(parse_date).transpose()?;
        let day = day.map(parse_weekday).transpose()?;
        let month = month.map(parse_month).transpose()?;
        let week = week.map(parse_week).transpose()?;
        let year = year.map(parse_year).transpose()?;

        if week.is_some() && month.is_none() {
            return Err(ExpenseError::Validation(
                "The --week option must be used with --month (and optionally --year) \
                 for meaningful filtering."
                    .into(),
            ));
        }

        Ok(Self {
            date,
            day,
            month,
            week,
            year,
        })
    }

    /// Whether no criteria are set at all
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Parse and validate a `YYYY-MM-DD` filter date
pub fn parse_date(input: &str) -> ExpenseResult<NaiveDate> {
    NaiveDate::parse_from_str(input, "%Y-%m-%d").map_err(|_| {
        ExpenseError::Validation(format!(
            "Invalid --date format '{input}'. Please use YYYY-MM-DD (e.g., 2025-07-29)."
        ))
    })
}

/// Parse a full English weekday name, case-insensitively
pub fn parse_weekday(input: &str) -> ExpenseResult<Weekday> {
    let lowered = input.to_lowercase();
    WEEKDAY_NAMES
        .iter()
        .find(|(name, _)| *name == lowered)
        .map(|(_, weekday)| *weekday)
        .ok_or_else(|| {
            ExpenseError::Validation(format!(
                "Invalid --day value '{input}'. Must be one of: Monday, Tuesday, Wednesday, \
                 Thursday, Friday, Saturday, Sunday."
            ))
        })
}

fn parse_month(input: &str) -> ExpenseResult<u32> {
    match input.parse::<u32>() {
        Ok(month @ 1..=12) => Ok(month),
        _ => Err(ExpenseError::Validation(
            "Invalid --month value. Must be between 1 and 12.".into(),
        )),
    }
}

fn parse_week(input: &str) -> ExpenseResult<u32> {
    match input.parse::<u32>() {
        Ok(week @ 1..=5) => Ok(week),
        _ => Err(ExpenseError::Validation(format!(
            "Invalid --week value '{input}'. Must be between 1 and 5 for week of month."
        ))),
    }
}

fn parse_year(input: &str) -> ExpenseResult<i32> {
    if input.len() == 4 {
        if let Ok(year) = input.parse::<i32>() {
            return Ok(year);
        }
    }
    Err(ExpenseError::Validation(
        "Invalid --year value. Please use a 4-digit year (e.g., 2025).".into(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_criteria() {
        let criteria = FilterCriteria::parse(None, None, None, None, None).unwrap();
        assert!(criteria.is_empty());
    }

    #[test]
    fn test_month_and_year() {
        let criteria =
            FilterCriteria::parse(None, None, Some("7"), None, Some("2025")).unwrap();
        assert_eq!(criteria.month, Some(7));
        assert_eq!(criteria.year, Some(2025));
    }

    #[test]
    fn test_date_is_mutually_exclusive() {
        let err = FilterCriteria::parse(Some("2025-07-29"), Some("Monday"), None, None, None)
            .unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Cannot use --date"));
    }

    #[test]
    fn test_bad_date_format() {
        assert!(FilterCriteria::parse(Some("29-07-2025"), None, None, None, None).is_err());
        assert!(FilterCriteria::parse(Some("2025-02-30"), None, None, None, None).is_err());
        assert!(FilterCriteria::parse(Some("2025-07-29"), None, None, None, None).is_ok());
    }

    #[test]
    fn test_week_requires_month() {
        let err = FilterCriteria::parse(None, None, None, Some("3"), None).unwrap_err();
        assert!(err.to_string().contains("--week"));

        let criteria = FilterCriteria::parse(None, None, Some("7"), Some("3"), None).unwrap();
        assert_eq!(criteria.week, Some(3));
    }

    #[test]
    fn test_week_range() {
        assert!(FilterCriteria::parse(None, None, Some("7"), Some("0"), None).is_err());
        assert!(FilterCriteria::parse(None, None, Some("7"), Some("6"), None).is_err());
        assert!(FilterCriteria::parse(None, None, Some("7"), Some("5"), None).is_ok());
    }

    #[test]
    fn test_month_range() {
        assert!(FilterCriteria::parse(None, None, Some("0"), None, None).is_err());
        assert!(FilterCriteria::parse(None, None, Some("13"), None, None).is_err());
        assert!(FilterCriteria::parse(None, None, Some("notanum"), None, None).is_err());
    }

    #[test]
    fn test_year_must_be_four_digits() {
        assert!(FilterCriteria::parse(None, None, None, None, Some("25")).is_err());
        assert!(FilterCriteria::parse(None, None, None, None, Some("20255")).is_err());
        assert!(FilterCriteria::parse(None, None, None, None, Some("2025")).is_ok());
    }

    #[test]
    fn test_weekday_names_case_insensitive() {
        assert_eq!(parse_weekday("Monday").unwrap(), Weekday::Mon);
        assert_eq!(parse_weekday("wednesday").unwrap(), Weekday::Wed);
        assert_eq!(parse_weekday("SUNDAY").unwrap(), Weekday::Sun);
        assert!(parse_weekday("Mon").is_err());
        assert!(parse_weekday("Someday").is_err());
    }
}
