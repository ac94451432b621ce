use crate::core::calculator::duration;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One recorded block of crew time on a job.
///
/// `component_id == None` marks a generic clock-in entry. When
/// `worker_names` is non-empty it is the authoritative crew size and
/// `crew_count` mirrors its length.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeEntry {
    pub id: i64,
    pub job_id: i64,
    pub component_id: Option<i64>,
    pub user_id: i64,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    pub total_hours: f64,
    pub crew_count: i32,
    pub worker_names: Vec<String>,
    pub is_manual: bool,
    pub notes: Option<String>,
}

/// How the crew of an entry is described.
#[derive(Debug, Clone, PartialEq)]
pub enum CrewSelection {
    /// Headcount only.
    Count(i32),
    /// Specific workers by name; the list length becomes the crew size.
    Workers(Vec<String>),
}

impl TimeEntry {
    /// A fresh timer-based entry for one worker, not yet persisted (`id == 0`).
    pub fn new(
        job_id: i64,
        component_id: Option<i64>,
        user_id: i64,
        start: DateTime<Utc>,
    ) -> Self {
        Self {
            id: 0,
            job_id,
            component_id,
            user_id,
            start,
            end: None,
            total_hours: 0.0,
            crew_count: 1,
            worker_names: Vec::new(),
            is_manual: false,
            notes: None,
        }
    }

    pub fn is_clock_in(&self) -> bool {
        self.component_id.is_none()
    }

    /// Hours × effective crew size.
    pub fn man_hours(&self) -> f64 {
        duration::man_hours(self)
    }

    /// New timestamps; `total_hours` is re-derived from them (quarter-hour
    /// rounding) and the entry stops being manual.
    pub fn with_timestamps(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> AppResult<Self> {
        let hours = duration::hours_between(start, end)?;
        Ok(Self {
            start,
            end: Some(end),
            total_hours: hours,
            is_manual: false,
            ..self.clone()
        })
    }

    /// A typed duration. Timestamps are left as they are.
    pub fn with_manual_hours(&self, hours: f64) -> AppResult<Self> {
        if !hours.is_finite() || hours < 0.0 {
            return Err(AppError::InvalidNumber {
                field: "hours",
                value: hours,
            });
        }
        Ok(Self {
            total_hours: hours,
            is_manual: true,
            ..self.clone()
        })
    }

    pub fn with_crew(&self, crew: CrewSelection) -> AppResult<Self> {
        let (crew_count, worker_names) = match crew {
            CrewSelection::Count(n) => (n.max(1), Vec::new()),
            CrewSelection::Workers(names) => {
                let names: Vec<String> = names
                    .into_iter()
                    .map(|n| n.trim().to_string())
                    .filter(|n| !n.is_empty())
                    .collect();
                if names.is_empty() {
                    return Err(AppError::EmptyCrewSelection);
                }
                (names.len() as i32, names)
            }
        };
        Ok(Self {
            crew_count,
            worker_names,
            ..self.clone()
        })
    }

    pub fn with_notes(&self, notes: Option<String>) -> Self {
        Self {
            notes: notes.filter(|n| !n.trim().is_empty()),
            ..self.clone()
        }
    }
}
