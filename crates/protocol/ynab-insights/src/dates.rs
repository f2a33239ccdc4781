//! Date and month helpers for the aggregation entry points.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use ynab_types::{Transaction, DATE_FORMAT};

use crate::error::{InsightsError, InsightsResult};

/// Longest accepted range, in days.
pub const MAX_RANGE_DAYS: i64 = 730;

/// Bounds on the trailing month window.
pub const MIN_MONTHS: u32 = 1;
pub const MAX_MONTHS: u32 = 24;

/// A validated inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    pub since: NaiveDate,
    pub until: NaiveDate,
}

impl DateRange {
    /// Number of days between the endpoints.
    pub fn days(&self) -> i64 {
        (self.until - self.since).num_days()
    }
}

/// Parse a `YYYY-MM-DD` date; `field` names the parameter in the error.
pub fn parse_date(field: &'static str, value: &str) -> InsightsResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| InsightsError::InvalidDate {
        field,
        value: value.to_string(),
    })
}

/// Validate a `since`/`until` pair.
///
/// Both must parse, `until` must not precede `since`, and the span must not
/// exceed [`MAX_RANGE_DAYS`].
///
/// # Example
/// ```
/// use ynab_insights::validate_date_range;
///
/// assert!(validate_date_range("2024-01-01", "2024-06-30").is_ok());
/// assert!(validate_date_range("2024-06-01", "2024-01-01").is_err());
/// assert!(validate_date_range("2022-01-01", "2024-06-01").is_err());
/// ```
pub fn validate_date_range(since: &str, until: &str) -> InsightsResult<DateRange> {
    let range = DateRange {
        since: parse_date("since_date", since)?,
        until: parse_date("until_date", until)?,
    };

    if range.until < range.since {
        return Err(InsightsError::InvalidRange {
            since: since.to_string(),
            until: until.to_string(),
        });
    }

    let days = range.days();
    if days > MAX_RANGE_DAYS {
        return Err(InsightsError::RangeTooLarge {
            days,
            max: MAX_RANGE_DAYS,
        });
    }

    Ok(range)
}

/// Keep transactions dated on or before `until`.
///
/// The upstream only filters by `since_date`, so the upper bound is applied
/// locally. Transactions with an unparseable date are dropped.
pub fn filter_until(transactions: Vec<Transaction>, until: NaiveDate) -> Vec<Transaction> {
    transactions
        .into_iter()
        .filter(|tx| tx.parsed_date().is_some_and(|d| d <= until))
        .collect()
}

/// `YYYY-MM` key of a date.
pub fn month_key(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

/// Parse a `YYYY-MM` month into its first day.
pub fn parse_month(value: &str) -> InsightsResult<NaiveDate> {
    let bytes = value.as_bytes();
    if bytes.len() != 7 || bytes[4] != b'-' {
        return Err(InsightsError::InvalidMonth(value.to_string()));
    }
    NaiveDate::parse_from_str(&format!("{}-01", value), DATE_FORMAT)
        .map_err(|_| InsightsError::InvalidMonth(value.to_string()))
}

/// The last `n` months ending with the month of `today`, oldest first.
///
/// `n` is clamped to `1..=24`.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use ynab_insights::last_n_months;
///
/// let today = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap();
/// assert_eq!(last_n_months(today, 3), vec!["2023-12", "2024-01", "2024-02"]);
/// ```
pub fn last_n_months(today: NaiveDate, n: u32) -> Vec<String> {
    let n = n.clamp(MIN_MONTHS, MAX_MONTHS) as i32;
    let current = today.year() * 12 + today.month0() as i32;

    (0..n)
        .rev()
        .map(|back| {
            let index = current - back;
            format!("{:04}-{:02}", index.div_euclid(12), index.rem_euclid(12) + 1)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ynab_test_utils::TransactionBuilder;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_validate_date_range_accepts_valid_range() {
        let range = validate_date_range("2024-01-01", "2024-12-31").unwrap();
        assert_eq!(range.since, date(2024, 1, 1));
        assert_eq!(range.days(), 365);
    }

    #[test]
    fn test_validate_date_range_rejects_reversed() {
        assert!(matches!(
            validate_date_range("2024-06-01", "2024-01-01"),
            Err(InsightsError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_validate_date_range_rejects_too_large() {
        assert!(matches!(
            validate_date_range("2022-01-01", "2024-06-01"),
            Err(InsightsError::RangeTooLarge { max: 730, .. })
        ));
    }

    #[test]
    fn test_validate_date_range_boundary() {
        // 2023-01-01 + 730 days = 2024-12-31
        assert!(validate_date_range("2023-01-01", "2024-12-31").is_ok());
        assert!(validate_date_range("2023-01-01", "2025-01-01").is_err());
        assert!(validate_date_range("2024-03-03", "2024-03-03").is_ok());
    }

    #[test]
    fn test_validate_date_range_names_bad_field() {
        match validate_date_range("2024-01-01", "2024-13-01") {
            Err(InsightsError::InvalidDate { field, value }) => {
                assert_eq!(field, "until_date");
                assert_eq!(value, "2024-13-01");
            }
            other => panic!("expected InvalidDate, got {:?}", other),
        }
    }

    #[test]
    fn test_filter_until_is_inclusive_and_drops_bad_dates() {
        let txs = vec![
            TransactionBuilder::new("a").date("2024-01-31").build(),
            TransactionBuilder::new("b").date("2024-02-01").build(),
            TransactionBuilder::new("c").date("garbage").build(),
        ];
        let kept = filter_until(txs, date(2024, 1, 31));
        let ids: Vec<&str> = kept.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["a"]);
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month("2024-03").unwrap(), date(2024, 3, 1));
        assert!(parse_month("2024-3").is_err());
        assert!(parse_month("2024-13").is_err());
        assert!(parse_month("2024-03-01").is_err());
        assert!(parse_month("").is_err());
    }

    #[test]
    fn test_last_n_months_crosses_year() {
        assert_eq!(
            last_n_months(date(2024, 1, 31), 3),
            vec!["2023-11", "2023-12", "2024-01"]
        );
    }

    #[test]
    fn test_last_n_months_clamped() {
        assert_eq!(last_n_months(date(2024, 5, 1), 0), vec!["2024-05"]);
        let months = last_n_months(date(2024, 5, 1), 100);
        assert_eq!(months.len(), 24);
        assert_eq!(months.first().map(String::as_str), Some("2022-06"));
        assert_eq!(months.last().map(String::as_str), Some("2024-05"));
    }

    #[test]
    fn test_month_key() {
        assert_eq!(month_key(date(2024, 9, 30)), "2024-09");
    }
}
