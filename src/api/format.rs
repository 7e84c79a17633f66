//! Display strings for dollar amounts and timestamps.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::ledger::wagers::group_thousands;

/// `$1,234.56`
pub fn usd_grouped(value: f64) -> String {
    let (sign, whole, cents) = split_cents(value);
    format!("{sign}${}.{cents:02}", group_thousands(whole))
}

/// `$1234.56`
pub fn usd_plain(value: f64) -> String {
    let (sign, whole, cents) = split_cents(value);
    format!("{sign}${whole}.{cents:02}")
}

/// ISO-8601 with microseconds and a `Z` suffix.
pub fn iso_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// `Mar 05, 2025`
pub fn long_date(ts: DateTime<Utc>) -> String {
    ts.format("%b %d, %Y").to_string()
}

fn split_cents(value: f64) -> (&'static str, i64, i64) {
    let cents = (value.abs() * 100.0).round() as i64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    (sign, cents / 100, cents % 100)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_usd_formats() {
        assert_eq!(usd_grouped(123456.789), "$123,456.79");
        assert_eq!(usd_grouped(0.5), "$0.50");
        assert_eq!(usd_grouped(-1500.0), "-$1,500.00");
        assert_eq!(usd_plain(1234.5), "$1234.50");
    }

    #[test]
    fn test_dates() {
        let ts = Utc.with_ymd_and_hms(2025, 3, 5, 8, 30, 0).unwrap();
        assert_eq!(iso_timestamp(ts), "2025-03-05T08:30:00.000000Z");
        assert_eq!(long_date(ts), "Mar 05, 2025");
    }
}
