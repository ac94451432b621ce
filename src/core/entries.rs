use crate::core::calculator::duration::effective_crew_size;
use crate::db::log::audit_or_warn;
use crate::db::store::JobStore;
use crate::errors::{AppError, AppResult};
use crate::models::{CrewSelection, Session, TimeEntry};
use chrono::{DateTime, Utc};

/// A new time entry as captured from the user.
#[derive(Debug, Clone)]
pub struct NewTimeEntry {
    pub job_id: i64,
    pub component_id: Option<i64>,
    pub start: DateTime<Utc>,
    pub end: Option<DateTime<Utc>>,
    /// Typed duration; wins over the timestamp-derived one when both are given.
    pub hours: Option<f64>,
    pub crew: CrewSelection,
    pub notes: Option<String>,
}

/// Editable fields of an existing entry; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct TimeEntryEdit {
    pub start: Option<DateTime<Utc>>,
    pub end: Option<DateTime<Utc>>,
    pub hours: Option<f64>,
    pub crew: Option<CrewSelection>,
    pub notes: Option<String>,
}

pub struct EntryLogic;

impl EntryLogic {
    pub fn record<S: JobStore + ?Sized>(
        store: &mut S,
        session: &Session,
        new: NewTimeEntry,
    ) -> AppResult<TimeEntry> {
        if new.end.is_none() && new.hours.is_none() {
            return Err(AppError::MissingField("end or hours"));
        }
        store.job(new.job_id)?;

        let mut entry = TimeEntry::new(new.job_id, new.component_id, session.user_id, new.start)
            .with_crew(new.crew)?
            .with_notes(new.notes);
        if let Some(end) = new.end {
            entry = entry.with_timestamps(new.start, end)?;
        }
        if let Some(hours) = new.hours {
            entry = entry.with_manual_hours(hours)?;
        }

        entry.id = store.insert_time_entry(&entry)?;

        audit_or_warn(
            store,
            "entry_add",
            &format!("entry {}", entry.id),
            &format!(
                "job {}: {:.2} h × {} = {:.2} man-hours",
                entry.job_id,
                entry.total_hours,
                effective_crew_size(&entry),
                entry.man_hours()
            ),
        );

        Ok(entry)
    }

    /// Edit an entry. Crew sessions may only edit their own entries.
    pub fn edit<S: JobStore + ?Sized>(
        store: &mut S,
        session: &Session,
        entry_id: i64,
        edit: TimeEntryEdit,
    ) -> AppResult<TimeEntry> {
        let current = store.time_entry(entry_id)?;
        if !session.is_office() && current.user_id != session.user_id {
            return Err(AppError::Forbidden("edit another user's time entry"));
        }

        let mut updated = current.clone();

        if edit.start.is_some() || edit.end.is_some() {
            let start = edit.start.unwrap_or(current.start);
            let end = edit
                .end
                .or(current.end)
                .ok_or(AppError::MissingField("end"))?;
            updated = updated.with_timestamps(start, end)?;
        }
        if let Some(hours) = edit.hours {
            updated = updated.with_manual_hours(hours)?;
        }
        if let Some(crew) = edit.crew {
            updated = updated.with_crew(crew)?;
        }
        if let Some(notes) = edit.notes {
            updated = updated.with_notes(Some(notes));
        }

        store.update_time_entry(&updated)?;

        audit_or_warn(
            store,
            "entry_edit",
            &format!("entry {}", entry_id),
            &format!(
                "man-hours {:.2} → {:.2}",
                current.man_hours(),
                updated.man_hours()
            ),
        );

        Ok(updated)
    }

    /// Entries of a job, optionally only those recorded by `user_id`.
    pub fn list<S: JobStore + ?Sized>(
        store: &S,
        job_id: i64,
        user_id: Option<i64>,
    ) -> AppResult<Vec<TimeEntry>> {
        let mut entries = store.time_entries(job_id)?;
        if let Some(uid) = user_id {
            entries.retain(|e| e.user_id == uid);
        }
        Ok(entries)
    }
}
