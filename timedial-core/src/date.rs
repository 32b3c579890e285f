//! Calendar helpers
//!
//! Month arithmetic clamps the day to the end of the target month
//! (31 March minus one month is the last day of February). Results beyond
//! what `NaiveDate` can represent saturate at its bounds.

use chrono::{Datelike, Months, NaiveDate};
use core::fmt::Write;
use heapless::String;
use timedial_protocol::WireDate;

/// Longest month-year label ("September 9999")
pub const LABEL_LEN: usize = 16;

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

/// Shift a date by a signed number of months
pub fn add_months(date: NaiveDate, months: i64) -> NaiveDate {
    let magnitude = u32::try_from(months.unsigned_abs()).unwrap_or(u32::MAX);
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(magnitude))
    } else {
        date.checked_sub_months(Months::new(magnitude))
    };
    match shifted {
        Some(d) => d,
        None if months >= 0 => NaiveDate::MAX,
        None => NaiveDate::MIN,
    }
}

/// Shift a date by a signed number of years
///
/// 29 February lands on 28 February in non-leap target years.
pub fn add_years(date: NaiveDate, years: i64) -> NaiveDate {
    add_months(date, years.saturating_mul(12))
}

/// Parse a `YYYYMMDD` string
pub fn parse_yyyymmdd(s: &str) -> Option<NaiveDate> {
    WireDate::from_bytes(s.as_bytes()).and_then(|w| from_wire(&w))
}

/// Convert a wire date, rejecting impossible calendar dates
pub fn from_wire(date: &WireDate) -> Option<NaiveDate> {
    let n = date.as_u32();
    NaiveDate::from_ymd_opt((n / 10_000) as i32, (n / 100) % 100, n % 100)
}

/// Convert to a wire date; `None` for years outside 0..=9999
pub fn to_wire(date: NaiveDate) -> Option<WireDate> {
    WireDate::from_ymd(date.year(), date.month(), date.day())
}

/// The date as the number `YYYYMMDD`, for logging
pub fn as_u32(date: NaiveDate) -> u32 {
    to_wire(date).map(|w| w.as_u32()).unwrap_or(0)
}

/// Month and year as shown on the panel, e.g. `June 2024`
pub fn month_year_label(date: NaiveDate) -> String<LABEL_LEN> {
    let mut label = String::new();
    let name = MONTH_NAMES[date.month0() as usize];
    // Years past four digits do not fit the panel; keep what fits
    let _ = write!(label, "{} {}", name, date.year());
    label
}
