//! Field parsing utilities for dataset cells
//!
//! Uploaded datasets come from many instruments and spreadsheets, so cell
//! parsing is lenient: numbers may carry a trailing unit, and dates may carry
//! a time-of-day suffix or use one of several common layouts.

use crate::constants::{
    ACCEPTED_DATE_FORMATS, ACCEPTED_DATETIME_FORMATS, DISPLAY_DATE_FORMAT,
    DISPLAY_REFERENCE_YEAR,
};
use chrono::{DateTime, Month, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;

/// Leading decimal number, optionally signed and with an exponent
static LEADING_NUMBER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?").expect("valid number pattern")
});

/// Parse a cell as a finite float
///
/// Surrounding whitespace is ignored and a trailing non-numeric suffix such as
/// a unit ("27.5 C") is dropped. Empty cells, text, NaN and infinities yield
/// `None`.
pub fn parse_float(cell: &str) -> Option<f64> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        return None;
    }

    let value = match trimmed.parse::<f64>() {
        Ok(value) => value,
        Err(_) => LEADING_NUMBER
            .find(trimmed)
            .and_then(|m| m.as_str().parse::<f64>().ok())?,
    };

    value.is_finite().then_some(value)
}

/// Parse the date portion of a cell as a calendar date
///
/// Only the text before the first space is considered, so "2025-08-02 06:00"
/// reads as 2 August 2025.
pub fn parse_calendar_date(cell: &str) -> Option<NaiveDate> {
    let token = cell.trim().split(' ').next()?;
    if token.is_empty() {
        return None;
    }

    if let Some(date) = ACCEPTED_DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(token, format).ok())
    {
        return Some(date);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(token) {
        return Some(dt.date_naive());
    }

    ACCEPTED_DATETIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(token, format).ok())
        .map(|dt| dt.date())
}

/// Format a date as a chart label ("Aug 2")
pub fn format_display_date(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

/// Parse a chart label back into a comparable date
///
/// Labels carry no year, so every label lands in the same reference year.
pub fn parse_display_date(label: &str) -> Option<NaiveDate> {
    let (month, day) = label.trim().split_once(' ')?;
    let month = Month::from_str(month.trim()).ok()?;
    let day = day.trim().parse::<u32>().ok()?;

    NaiveDate::from_ymd_opt(DISPLAY_REFERENCE_YEAR, month.number_from_month(), day)
}

/// Convert a calendar date cell straight to its chart label
pub fn parse_date_label(cell: &str) -> Option<String> {
    parse_calendar_date(cell).map(format_display_date)
}
