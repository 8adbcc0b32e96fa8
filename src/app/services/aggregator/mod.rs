//! Date-based aggregation of parameter readings into chart series
//!
//! Readings that share a date label are averaged field by field, the
//! resulting points are ordered chronologically and the series is capped to
//! its most recent points.

pub mod series;

#[cfg(test)]
mod tests;

pub use series::{aggregate, aggregate_by_date};
