//! Timestamp parsing and display for the CLI.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, LocalResult, NaiveDateTime, TimeZone, Utc};

const INPUT_FORMATS: [&str; 3] = ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"];

/// Parse a wall-clock timestamp (`YYYY-MM-DD HH:MM`) in the local zone, or a
/// full RFC 3339 timestamp.
pub fn parse_timestamp(s: &str) -> AppResult<DateTime<Utc>> {
    parse_timestamp_in(s, &Local)
}

pub fn parse_timestamp_in<Tz: TimeZone>(s: &str, tz: &Tz) -> AppResult<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = INPUT_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(s, f).ok())
        .ok_or_else(|| AppError::InvalidTimestamp(s.to_string()))?;

    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => Ok(dt.with_timezone(&Utc)),
        // DST fold: take the earlier instant
        LocalResult::Ambiguous(early, _) => Ok(early.with_timezone(&Utc)),
        LocalResult::None => Err(AppError::InvalidTimestamp(s.to_string())),
    }
}

pub fn parse_optional_timestamp(input: Option<&str>) -> AppResult<Option<DateTime<Utc>>> {
    input.map(parse_timestamp).transpose()
}

/// `YYYY-MM-DD HH:MM` in the local zone.
pub fn fmt_local(dt: &DateTime<Utc>) -> String {
    dt.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    #[test]
    fn wall_clock_is_converted_from_the_given_zone() {
        let est = FixedOffset::west_opt(5 * 3600).unwrap();
        let dt = parse_timestamp_in("2025-03-10 22:30", &est).unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-03-11T03:30:00+00:00");
    }

    #[test]
    fn rfc3339_is_accepted_as_is() {
        let dt = parse_timestamp_in("2025-03-10T08:00:00Z", &Utc).unwrap();
        assert_eq!(dt.to_rfc3339(), "2025-03-10T08:00:00+00:00");
    }

    #[test]
    fn garbage_is_rejected() {
        assert!(matches!(
            parse_timestamp_in("yesterday", &Utc),
            Err(AppError::InvalidTimestamp(_))
        ));
    }
}
