// SPDX-License-Identifier: MIT

//! Shared helpers for date/time handling.
//!
//! The days-together counter compares calendar dates only, always in UTC,
//! so the result does not depend on the server's local time zone or on the
//! time-of-day component of stored date strings.

use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Current Unix time in milliseconds.
pub fn now_unix_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Normalize a stored ISO-8601 date string to a UTC calendar date.
///
/// Accepts both full RFC3339 timestamps (any offset) and plain
/// `YYYY-MM-DD` dates. Timestamps are converted to UTC before the date
/// component is taken.
pub fn parse_utc_date_only(raw: &str) -> Option<NaiveDate> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.naive_utc().date());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

/// Inclusive day count between `start_date` and `today` (UTC calendar).
///
/// A start date of today yields 1, yesterday 2. Future start dates and
/// missing/unparseable values yield 0.
pub fn days_together(start_date: Option<&str>, today: NaiveDate) -> i64 {
    let Some(raw) = start_date else {
        return 0;
    };
    let Some(start) = parse_utc_date_only(raw) else {
        return 0;
    };

    ((today - start).num_days() + 1).max(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn start_today_counts_one() {
        let today = date(2025, 8, 17);
        assert_eq!(days_together(Some("2025-08-17"), today), 1);
    }

    #[test]
    fn start_yesterday_counts_two() {
        let today = date(2025, 8, 17);
        assert_eq!(days_together(Some("2025-08-16"), today), 2);
    }

    #[test]
    fn future_start_clamps_to_zero() {
        let today = date(2025, 8, 17);
        assert_eq!(days_together(Some("2025-08-18"), today), 0);
    }

    #[test]
    fn missing_start_is_zero() {
        let today = date(2025, 8, 17);
        assert_eq!(days_together(None, today), 0);
        assert_eq!(days_together(Some("not-a-date"), today), 0);
    }

    #[test]
    fn offset_timestamps_compare_by_utc_date() {
        // 2025-08-17T23:30:00+09:00 is 2025-08-17T14:30:00Z: still "today".
        let today = date(2025, 8, 17);
        assert_eq!(days_together(Some("2025-08-17T23:30:00+09:00"), today), 1);

        // 2025-08-17T01:00:00+09:00 is 2025-08-16T16:00:00Z: one day earlier.
        assert_eq!(days_together(Some("2025-08-17T01:00:00+09:00"), today), 2);
    }

    #[test]
    fn long_relationships_count_linearly() {
        let start = date(2024, 1, 1);
        let today = start + Duration::days(365);
        assert_eq!(days_together(Some("2024-01-01"), today), 366);
    }
}
