//! Same-day averaging, chronological ordering and series capping

use std::cmp::Ordering;
use std::collections::HashMap;
use tracing::debug;

use crate::app::models::{AggregatedParameterPoint, ParameterRecord, SemanticField};
use crate::app::services::csv_table::field_parsers::parse_display_date;
use crate::constants::DEFAULT_MAX_SERIES_POINTS;

/// Running sum and count for one field on one date
#[derive(Debug, Clone, Copy, Default)]
struct FieldMean {
    sum: f64,
    count: usize,
}

impl FieldMean {
    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Accumulated readings for one date label
#[derive(Debug, Default)]
struct DateGroup {
    temperature: FieldMean,
    salinity: FieldMean,
    wind_speed: FieldMean,
}

impl DateGroup {
    fn add(&mut self, record: &ParameterRecord) {
        for field in SemanticField::MEASUREMENTS {
            if let Some(value) = record.get(field) {
                self.field_mut(field).add(value);
            }
        }
    }

    fn field_mut(&mut self, field: SemanticField) -> &mut FieldMean {
        match field {
            SemanticField::Salinity => &mut self.salinity,
            SemanticField::WindSpeed => &mut self.wind_speed,
            _ => &mut self.temperature,
        }
    }

    fn into_point(self, date: String) -> AggregatedParameterPoint {
        AggregatedParameterPoint {
            date,
            temperature: self.temperature.mean(),
            salinity: self.salinity.mean(),
            wind_speed: self.wind_speed.mean(),
        }
    }
}

/// Aggregate with the default series cap
pub fn aggregate(records: &[ParameterRecord]) -> Vec<AggregatedParameterPoint> {
    aggregate_by_date(records, DEFAULT_MAX_SERIES_POINTS)
}

/// Average same-date readings and return the latest `max_points` dates in order
///
/// A field absent from a record contributes to neither the sum nor the count
/// for its date. Labels that cannot be read back as dates sort first.
pub fn aggregate_by_date(
    records: &[ParameterRecord],
    max_points: usize,
) -> Vec<AggregatedParameterPoint> {
    let mut groups: HashMap<&str, DateGroup> = HashMap::new();
    for record in records {
        groups.entry(record.date.as_str()).or_default().add(record);
    }

    let mut points: Vec<AggregatedParameterPoint> = groups
        .into_iter()
        .map(|(date, group)| group.into_point(date.to_string()))
        .collect();

    points.sort_by(chronological);

    if points.len() > max_points {
        let dropped = points.len() - max_points;
        debug!(
            "Series capped at {} points, dropped {} oldest dates",
            max_points, dropped
        );
        points.drain(..dropped);
    }

    points
}

fn chronological(a: &AggregatedParameterPoint, b: &AggregatedParameterPoint) -> Ordering {
    parse_display_date(&a.date)
        .cmp(&parse_display_date(&b.date))
        .then_with(|| a.date.cmp(&b.date))
}
