//! Trade date parsing.
//!
//! Ledger entries are typed by hand, so dates arrive either as full RFC 3339
//! timestamps or as bare `YYYY-MM-DD` days (taken as midnight UTC).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

/// Parse a trade date from an RFC 3339 timestamp or a `YYYY-MM-DD` date.
pub fn parse_trade_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Some(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
}

pub(super) fn deserialize_trade_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_trade_date(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid trade date: {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::rfc3339("2025-03-01T15:30:00Z", "2025-03-01T15:30:00+00:00")]
    #[case::offset("2025-03-01T10:30:00-05:00", "2025-03-01T15:30:00+00:00")]
    #[case::date_only("2025-03-01", "2025-03-01T00:00:00+00:00")]
    #[case::padded("  2025-03-01 ", "2025-03-01T00:00:00+00:00")]
    fn test_parse_trade_date(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(parse_trade_date(input).unwrap().to_rfc3339(), expected);
    }

    #[rstest]
    #[case::empty("")]
    #[case::garbage("last tuesday")]
    #[case::bad_month("2025-13-01")]
    fn test_parse_trade_date_rejects(#[case] input: &str) {
        assert!(parse_trade_date(input).is_none());
    }
}
