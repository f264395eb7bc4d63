use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime};

use crate::consts::{LOG_DATE_FORMAT, MONTH_LABEL_FORMAT};

/// Formats accepted when reading a stored log date back into a day key.
/// The canonical format comes first; the rest cover exports written by
/// older builds (ISO dates and the en-US long form).
const LOG_DATE_INPUT_FORMATS: &[&str] = &[
    LOG_DATE_FORMAT,
    "%Y-%m-%d",
    "%A, %B %d, %Y",
    "%B %d, %Y",
    "%d %b %Y",
];

/// Canonical session-log date key: "02 January 2024"
pub(crate) fn canonical_log_date(date: NaiveDate) -> String {
    date.format(LOG_DATE_FORMAT).to_string()
}

/// Parse a stored log date into a calendar day, `None` if unrecognized
pub(crate) fn parse_log_date(s: &str) -> Option<NaiveDate> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    LOG_DATE_INPUT_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// Last representable millisecond of a calendar day (23:59:59.999)
pub(crate) fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    let last = NaiveTime::from_hms_milli_opt(23, 59, 59, 999).unwrap_or_default();
    date.and_time(last)
}

/// Month tab label: "January 2024"
pub(crate) fn month_label(date: NaiveDate) -> String {
    date.format(MONTH_LABEL_FORMAT).to_string()
}

/// Parse a month selector, either "2024-01" or "January 2024"
pub(crate) fn parse_month(s: &str) -> Option<NaiveDate> {
    let trimmed = s.trim();
    NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(&format!("01 {trimmed}"), "%d %B %Y"))
        .ok()
        .and_then(|d| d.with_day(1))
}

/// Number of days in the month containing `date`
pub(crate) fn days_in_month(date: NaiveDate) -> u32 {
    let first = NaiveDate::from_ymd_opt(date.year(), date.month(), 1);
    let next = if date.month() == 12 {
        NaiveDate::from_ymd_opt(date.year() + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(date.year(), date.month() + 1, 1)
    };
    match (first, next) {
        (Some(first), Some(next)) => (next - first).num_days() as u32,
        _ => 0,
    }
}
