//! Trailing-window monthly submission counts
//!
//! The window always holds 12 month bins ending with the month of the
//! supplied reference instant. The reference is a parameter so results do
//! not depend on the wall clock.

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use tracing::debug;

use crate::app::models::{MonthlySubmissionCount, Submission};
use crate::constants::{MONTH_KEY_FORMAT, TREND_WINDOW_MONTHS};

/// One calendar month of the trend window
#[derive(Debug)]
struct MonthBin {
    start: NaiveDate,
    count: u32,
}

impl MonthBin {
    fn contains(&self, date: NaiveDate) -> bool {
        self.start.year() == date.year() && self.start.month() == date.month()
    }
}

/// Count submissions per month over the 12 months ending at `now`
pub fn monthly_submission_counts(
    submissions: &[Submission],
    now: DateTime<Utc>,
) -> Vec<MonthlySubmissionCount> {
    monthly_counts_for_dates(submissions.iter().map(|s| s.date), now)
}

/// Count timestamps per month over the 12 months ending at `now`
///
/// Timestamps before the first day of the earliest month, or in a month after
/// `now`, are ignored. Bins come back oldest first and zero-filled.
pub fn monthly_counts_for_dates<I>(dates: I, now: DateTime<Utc>) -> Vec<MonthlySubmissionCount>
where
    I: IntoIterator<Item = DateTime<Utc>>,
{
    let mut bins = window_bins(now.date_naive());
    let Some(window_start) = bins.first().map(|bin| bin.start) else {
        return Vec::new();
    };

    let mut ignored = 0usize;
    for date in dates {
        let day = date.date_naive();
        if day < window_start {
            ignored += 1;
            continue;
        }
        match bins.iter_mut().find(|bin| bin.contains(day)) {
            Some(bin) => bin.count += 1,
            None => ignored += 1,
        }
    }

    if ignored > 0 {
        debug!("{} submissions fell outside the trend window", ignored);
    }

    bins.into_iter()
        .map(|bin| MonthlySubmissionCount {
            month: bin.start.format(MONTH_KEY_FORMAT).to_string(),
            submissions: bin.count,
        })
        .collect()
}

fn window_bins(today: NaiveDate) -> Vec<MonthBin> {
    let Some(current_month) = NaiveDate::from_ymd_opt(today.year(), today.month(), 1) else {
        return Vec::new();
    };

    (0..TREND_WINDOW_MONTHS)
        .rev()
        .filter_map(|months_back| current_month.checked_sub_months(Months::new(months_back)))
        .map(|start| MonthBin { start, count: 0 })
        .collect()
}
