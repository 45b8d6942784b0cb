// SPDX-License-Identifier: MIT

//! Shared helpers for date handling.

use chrono::{DateTime, NaiveDate};

/// Parse an event date from a form value, discarding any time component.
///
/// Accepts a plain calendar date (`2025-03-01`), an RFC3339 datetime, or a
/// datetime with the date before a `T` separator (what date pickers submit).
pub fn parse_event_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }

    // Fall back to whatever precedes the time separator
    raw.split('T')
        .next()
        .and_then(|d| NaiveDate::parse_from_str(d, "%Y-%m-%d").ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_plain_date() {
        assert_eq!(
            parse_event_date("2025-03-01"),
            NaiveDate::from_ymd_opt(2025, 3, 1)
        );
    }

    #[test]
    fn test_parse_strips_time_component() {
        assert_eq!(
            parse_event_date("2025-03-01T18:30:00+02:00"),
            NaiveDate::from_ymd_opt(2025, 3, 1)
        );
        assert_eq!(
            parse_event_date("2025-03-01T18:30:00"),
            NaiveDate::from_ymd_opt(2025, 3, 1)
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_event_date("not-a-date"), None);
        assert_eq!(parse_event_date(""), None);
    }
}
