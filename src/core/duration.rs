//! Elapsed holding period in fractional years.

use crate::core::error::ReturnError;
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use tracing::debug;

const BUY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Seconds in a 365-day year. Leap days are not accounted for.
pub const SECONDS_PER_YEAR: f64 = 60.0 * 60.0 * 24.0 * 365.0;

/// Parses a zero-padded `YYYY-MM-DD` date.
pub fn parse_buy_date(buy_date: &str) -> Result<NaiveDate, ReturnError> {
    let invalid = || ReturnError::InvalidDate {
        date: buy_date.to_string(),
    };

    // chrono accepts unpadded months and days, so check the shape first.
    let trimmed = buy_date.trim();
    if !is_padded_date(trimmed) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(trimmed, BUY_DATE_FORMAT).map_err(|_| invalid())
}

fn is_padded_date(s: &str) -> bool {
    s.len() == 10
        && s.bytes().enumerate().all(|(i, b)| match i {
            4 | 7 => b == b'-',
            _ => b.is_ascii_digit(),
        })
}

/// Years elapsed between local midnight of `buy_date` and `now`.
pub fn years_between(buy_date: &str, now: DateTime<Local>) -> Result<f64, ReturnError> {
    let invalid = || ReturnError::InvalidDate {
        date: buy_date.to_string(),
    };

    let date = parse_buy_date(buy_date)?;
    let midnight = date.and_hms_opt(0, 0, 0).ok_or_else(invalid)?;
    // Midnight can fall inside a DST gap; take the first instant that exists.
    let bought_at = Local
        .from_local_datetime(&midnight)
        .earliest()
        .or_else(|| {
            Local
                .from_local_datetime(&(midnight + chrono::Duration::hours(1)))
                .earliest()
        })
        .ok_or_else(invalid)?;

    let elapsed = now.signed_duration_since(bought_at);
    let years = elapsed.num_milliseconds() as f64 / 1000.0 / SECONDS_PER_YEAR;
    debug!("{buy_date} -> {years} years");

    if years <= 0.0 {
        return Err(ReturnError::NonPositiveDuration {
            date: buy_date.to_string(),
        });
    }
    Ok(years)
}

/// Years elapsed between `buy_date` and the current local time.
pub fn years_since(buy_date: &str) -> Result<f64, ReturnError> {
    years_between(buy_date, Local::now())
}
