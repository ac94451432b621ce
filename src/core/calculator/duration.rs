//! Turns a time entry into man-hours.

use crate::errors::{AppError, AppResult};
use crate::models::time_entry::TimeEntry;
use chrono::{DateTime, Utc};

const QUARTERS_PER_HOUR: f64 = 4.0;

/// Crew size used for man-hours: the worker list wins when present,
/// otherwise `crew_count` clamped to at least 1.
pub fn effective_crew_size(entry: &TimeEntry) -> u32 {
    if !entry.worker_names.is_empty() {
        return entry.worker_names.len() as u32;
    }
    entry.crew_count.max(1) as u32
}

/// `total_hours × effective_crew_size`. Negative or non-finite stored hours
/// count as zero.
pub fn man_hours(entry: &TimeEntry) -> f64 {
    let hours = if entry.total_hours.is_finite() {
        entry.total_hours.max(0.0)
    } else {
        0.0
    };
    hours * effective_crew_size(entry) as f64
}

pub fn round_to_quarter_hour(hours: f64) -> f64 {
    (hours * QUARTERS_PER_HOUR).round() / QUARTERS_PER_HOUR
}

/// Duration between two timestamps in hours, rounded to the nearest quarter
/// hour. `end` must be strictly after `start`.
pub fn hours_between(start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<f64> {
    if end <= start {
        return Err(AppError::InvalidTimeRange {
            start: start.to_rfc3339(),
            end: end.to_rfc3339(),
        });
    }
    let seconds = (end - start).num_seconds() as f64;
    Ok(round_to_quarter_hour(seconds / 3600.0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn entry(hours: f64, crew: i32, workers: &[&str]) -> TimeEntry {
        let start = Utc.with_ymd_and_hms(2025, 10, 2, 8, 0, 0).unwrap();
        let mut e = TimeEntry::new(1, None, 1, start);
        e.total_hours = hours;
        e.crew_count = crew;
        e.worker_names = workers.iter().map(|s| s.to_string()).collect();
        e
    }

    #[test]
    fn crew_count_multiplies_hours() {
        assert_eq!(man_hours(&entry(8.0, 3, &[])), 24.0);
    }

    #[test]
    fn worker_names_override_crew_count() {
        assert_eq!(man_hours(&entry(4.0, 5, &["Alice", "Bob"])), 8.0);
    }

    #[test]
    fn zero_or_negative_crew_counts_as_one() {
        assert_eq!(man_hours(&entry(6.0, 0, &[])), 6.0);
        assert_eq!(man_hours(&entry(6.0, -4, &[])), 6.0);
    }

    #[test]
    fn man_hours_never_below_total_hours() {
        for crew in -2..6 {
            for hours in [0.0, 0.25, 1.5, 10.0] {
                let e = entry(hours, crew, &[]);
                assert!(man_hours(&e) >= e.total_hours);
            }
        }
    }

    #[test]
    fn quarter_hour_rounding() {
        assert_eq!(round_to_quarter_hour(1.1), 1.0);
        assert_eq!(round_to_quarter_hour(1.13), 1.25);
        assert_eq!(round_to_quarter_hour(7.9), 8.0);
        assert_eq!(round_to_quarter_hour(0.125), 0.25);
    }

    #[test]
    fn hours_between_rounds_and_validates() {
        let start = Utc.with_ymd_and_hms(2025, 10, 2, 8, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2025, 10, 2, 16, 7, 0).unwrap();
        assert_eq!(hours_between(start, end).unwrap(), 8.0);

        let end = Utc.with_ymd_and_hms(2025, 10, 2, 16, 8, 0).unwrap();
        assert_eq!(hours_between(start, end).unwrap(), 8.25);

        assert!(matches!(
            hours_between(start, start),
            Err(AppError::InvalidTimeRange { .. })
        ));
        assert!(hours_between(end, start).is_err());
    }
}
