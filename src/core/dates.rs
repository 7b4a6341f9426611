//! Calendar helpers: record/subscription date parsing and month membership.

use std::fmt;

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, NaiveTime};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::errors::{LedgerError, Result};

static RECORD_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,2})/(\d{1,2})/(\d{4})$").expect("valid record date regex"));
static ISO_DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid iso date regex"));

/// Additional layouts accepted for subscription due dates.
const LOOSE_DATE_FORMATS: &[&str] = &[
    "%Y/%m/%d",
    "%B %d, %Y",
    "%b %d, %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d %B %Y",
    "%d %b %Y",
];
const LOOSE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"];

/// Identifies a calendar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    pub fn of(date: NaiveDate) -> Self {
        Self::new(date.year(), date.month())
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Human label such as "March 2024".
    pub fn label(&self) -> String {
        match self.first_day() {
            Some(day) => day.format("%B %Y").to_string(),
            None => self.to_string(),
        }
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{:02}", self.year, self.month)
    }
}

/// Parses the `M/D/YYYY` layout used by income and spending records.
pub fn parse_record_date(text: &str) -> Result<NaiveDate> {
    let value = text.trim();
    let captures = RECORD_DATE
        .captures(value)
        .ok_or_else(|| LedgerError::InvalidDate(format!("`{}` is not M/D/YYYY", text)))?;
    let month: u32 = captures[1].parse().unwrap_or_default();
    let day: u32 = captures[2].parse().unwrap_or_default();
    let year: i32 = captures[3].parse().unwrap_or_default();
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| LedgerError::InvalidDate(format!("`{}` is not a calendar date", text)))
}

/// Parses a subscription due date. Anything unparseable yields `None`, which
/// callers treat as "always active".
pub fn parse_subscription_due_date(text: &str) -> Option<NaiveDate> {
    let value = text.trim();
    if value.is_empty() {
        return None;
    }
    if let Some(captures) = ISO_DATE.captures(value) {
        let year: i32 = captures[1].parse().ok()?;
        let month: u32 = captures[2].parse().ok()?;
        let day: u32 = captures[3].parse().ok()?;
        return NaiveDate::from_ymd_opt(year, month, day);
    }
    if RECORD_DATE.is_match(value) {
        return parse_record_date(value).ok();
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(value) {
        return Some(stamp.date_naive());
    }
    if let Ok(stamp) = DateTime::parse_from_rfc2822(value) {
        return Some(stamp.date_naive());
    }
    LOOSE_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
        .map(|stamp| stamp.date())
        .or_else(|| {
            LOOSE_DATE_FORMATS
                .iter()
                .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        })
}

/// Renders a date in the record layout (`M/D/YYYY`, no zero padding).
pub fn format_record_date(date: NaiveDate) -> String {
    format!("{}/{}/{}", date.month(), date.day(), date.year())
}

pub fn month_key(date: NaiveDate) -> MonthKey {
    MonthKey::of(date)
}

pub fn is_same_month(date: NaiveDate, year: i32, month: u32) -> bool {
    MonthKey::new(year, month).contains(date)
}

/// Last instant (23:59:59.999) of the given month; `None` for an invalid month.
pub fn end_of_month(year: i32, month: u32) -> Option<NaiveDateTime> {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    let last_day = NaiveDate::from_ymd_opt(next_year, next_month, 1)?.pred_opt()?;
    let last_instant = NaiveTime::from_hms_milli_opt(23, 59, 59, 999)?;
    (month >= 1).then(|| last_day.and_time(last_instant))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_record_dates_without_padding() {
        assert_eq!(parse_record_date("3/7/2024").unwrap(), date(2024, 3, 7));
        assert_eq!(parse_record_date("12/31/2023").unwrap(), date(2023, 12, 31));
        assert_eq!(parse_record_date(" 01/05/2025 ").unwrap(), date(2025, 1, 5));
    }

    #[test]
    fn rejects_malformed_record_dates() {
        for raw in ["", "2024-03-07", "13/1/2024", "2/30/2024", "soon"] {
            let err = parse_record_date(raw).expect_err("should reject");
            assert!(matches!(err, LedgerError::InvalidDate(_)), "{raw}: {err}");
        }
    }

    #[test]
    fn subscription_dates_accept_several_layouts() {
        let expected = date(2024, 3, 15);
        assert_eq!(parse_subscription_due_date("2024-03-15"), Some(expected));
        assert_eq!(parse_subscription_due_date("3/15/2024"), Some(expected));
        assert_eq!(
            parse_subscription_due_date("2024-03-15T10:30:00Z"),
            Some(expected)
        );
        assert_eq!(parse_subscription_due_date("March 15, 2024"), Some(expected));
        assert_eq!(parse_subscription_due_date("Mar 15 2024"), Some(expected));
    }

    #[test]
    fn unparseable_subscription_dates_are_none() {
        assert_eq!(parse_subscription_due_date(""), None);
        assert_eq!(parse_subscription_due_date("   "), None);
        assert_eq!(parse_subscription_due_date("whenever"), None);
        assert_eq!(parse_subscription_due_date("2024-02-31"), None);
    }

    #[test]
    fn end_of_month_is_last_instant() {
        let end = end_of_month(2024, 2).unwrap();
        assert_eq!(end.date(), date(2024, 2, 29));
        assert_eq!(end.time(), NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap());
        assert_eq!(end_of_month(2023, 12).unwrap().date(), date(2023, 12, 31));
        assert!(end_of_month(2023, 13).is_none());
        assert!(end_of_month(2023, 0).is_none());
    }

    #[test]
    fn month_membership_and_ordering() {
        assert!(is_same_month(date(2024, 3, 31), 2024, 3));
        assert!(!is_same_month(date(2023, 3, 31), 2024, 3));
        assert!(MonthKey::new(2024, 1) > MonthKey::new(2023, 12));
        assert_eq!(month_key(date(2024, 3, 9)).to_string(), "2024-03");
        assert_eq!(MonthKey::new(2024, 3).label(), "March 2024");
        assert_eq!(format_record_date(date(2024, 3, 9)), "3/9/2024");
    }
}
