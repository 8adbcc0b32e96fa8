//! Tests for date-based aggregation

use super::{aggregate, aggregate_by_date};
use crate::app::models::{AggregatedParameterPoint, ParameterRecord};
use chrono::{Days, NaiveDate};

fn reading(date: &str, temperature: Option<f64>, salinity: Option<f64>) -> ParameterRecord {
    ParameterRecord {
        date: date.to_string(),
        temperature,
        salinity,
        wind_speed: None,
    }
}

fn assert_close(actual: Option<f64>, expected: f64) {
    let actual = actual.expect("value present");
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

#[test]
fn test_same_day_readings_are_averaged() {
    let records = vec![
        reading("Aug 2", Some(27.5), None),
        reading("Aug 2", Some(27.9), None),
    ];

    let points = aggregate(&records);
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].date, "Aug 2");
    assert_close(points[0].temperature, 27.7);
    assert_eq!(points[0].salinity, None);
    assert_eq!(points[0].wind_speed, None);
}

#[test]
fn test_absent_fields_do_not_dilute_mean() {
    let records = vec![
        reading("Aug 3", Some(28.0), Some(34.0)),
        reading("Aug 3", None, Some(35.0)),
        reading("Aug 3", Some(29.0), None),
    ];

    let points = aggregate(&records);
    assert_close(points[0].temperature, 28.5);
    assert_close(points[0].salinity, 34.5);
}

#[test]
fn test_sorted_chronologically_not_lexically() {
    let records = vec![
        reading("Dec 1", Some(1.0), None),
        reading("Aug 10", Some(2.0), None),
        reading("Aug 9", Some(3.0), None),
        reading("Jan 5", Some(4.0), None),
    ];

    let dates: Vec<String> = aggregate(&records).into_iter().map(|p| p.date).collect();
    assert_eq!(dates, vec!["Jan 5", "Aug 9", "Aug 10", "Dec 1"]);
}

#[test]
fn test_unreadable_labels_sort_first() {
    let records = vec![
        reading("Aug 2", Some(1.0), None),
        reading("someday", Some(2.0), None),
    ];

    let points = aggregate(&records);
    assert_eq!(points[0].date, "someday");
    assert_eq!(points[1].date, "Aug 2");
}

#[test]
fn test_aggregation_is_idempotent() {
    let records = vec![
        reading("Aug 1", Some(27.53), Some(34.68)),
        reading("Aug 1", Some(28.0), None),
        reading("Aug 2", None, Some(34.58)),
        reading("Aug 3", Some(28.19), Some(34.74)),
    ];

    let once = aggregate(&records);
    let as_records: Vec<ParameterRecord> = once.iter().cloned().map(Into::into).collect();
    let twice = aggregate(&as_records);

    assert_eq!(once, twice);
}

#[test]
fn test_cap_keeps_latest_dates() {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let records: Vec<ParameterRecord> = (0..150)
        .map(|offset| {
            let date = start + Days::new(offset);
            reading(&date.format("%b %-d").to_string(), Some(offset as f64), None)
        })
        .collect();

    let points = aggregate(&records);
    assert_eq!(points.len(), 100);

    let first_kept = start + Days::new(50);
    assert_eq!(points[0].date, first_kept.format("%b %-d").to_string());
    assert_close(points[0].temperature, 50.0);
    assert_close(points[99].temperature, 149.0);
}

#[test]
fn test_custom_cap_and_small_input() {
    let records = vec![
        reading("Aug 1", Some(1.0), None),
        reading("Aug 2", Some(2.0), None),
        reading("Aug 3", Some(3.0), None),
    ];

    let capped = aggregate_by_date(&records, 2);
    let dates: Vec<&str> = capped.iter().map(|p| p.date.as_str()).collect();
    assert_eq!(dates, vec!["Aug 2", "Aug 3"]);

    assert_eq!(aggregate_by_date(&records, 10).len(), 3);
}

#[test]
fn test_empty_input() {
    let points: Vec<AggregatedParameterPoint> = aggregate(&[]);
    assert!(points.is_empty());
}
