//! Groups normalized time entries by calendar date, by component and by
//! user. The three groupings are independent; every entry lands in each of
//! them exactly once.

use super::duration::man_hours;
use crate::models::component::{Component, User};
use crate::models::time_entry::TimeEntry;
use chrono::{Local, NaiveDate, TimeZone};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

/// Label for references that no longer resolve.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Label of the group holding clock-in entries (no component).
pub const GENERAL_LABEL: &str = "General (clock-in)";

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct HoursBucket {
    pub entries: usize,
    pub man_hours: f64,
}

impl HoursBucket {
    fn add(&mut self, entry: &TimeEntry) {
        self.entries += 1;
        self.man_hours += man_hours(entry);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DateGroup {
    pub date: NaiveDate,
    pub component_work: HoursBucket,
    pub generic_time: HoursBucket,
    pub total_entries: usize,
    pub total_man_hours: f64,
}

impl DateGroup {
    fn new(date: NaiveDate) -> Self {
        Self {
            date,
            component_work: HoursBucket::default(),
            generic_time: HoursBucket::default(),
            total_entries: 0,
            total_man_hours: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentTimeSummary {
    /// `None` for the clock-in group.
    pub component_id: Option<i64>,
    pub name: String,
    pub entries: usize,
    pub total_hours: f64,
    pub man_hours: f64,
    /// Share of the grand total man-hours, 0..=100.
    pub share_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserComponentHours {
    pub component_id: Option<i64>,
    pub name: String,
    pub entries: usize,
    pub total_hours: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserSummary {
    pub user_id: i64,
    pub name: String,
    pub entries: usize,
    pub total_hours: f64,
    pub man_hours: f64,
    pub components: Vec<UserComponentHours>,
}

/// Id → name lookup for components and users.
pub struct NameIndex<'a> {
    components: HashMap<i64, &'a str>,
    users: HashMap<i64, &'a str>,
}

impl<'a> NameIndex<'a> {
    pub fn new(components: &'a [Component], users: &'a [User]) -> Self {
        Self {
            components: components.iter().map(|c| (c.id, c.name.as_str())).collect(),
            users: users.iter().map(|u| (u.id, u.name.as_str())).collect(),
        }
    }

    pub fn component(&self, id: Option<i64>) -> String {
        match id {
            None => GENERAL_LABEL.to_string(),
            Some(id) => self
                .components
                .get(&id)
                .map(|n| n.to_string())
                .unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
        }
    }

    pub fn user(&self, id: i64) -> String {
        self.users
            .get(&id)
            .map(|n| n.to_string())
            .unwrap_or_else(|| UNKNOWN_LABEL.to_string())
    }
}

/// Sum of man-hours over any selection of entries.
pub fn total_man_hours<'a>(entries: impl IntoIterator<Item = &'a TimeEntry>) -> f64 {
    entries.into_iter().map(man_hours).sum()
}

/// Man-hours of clock-in entries only (no component).
pub fn clock_in_man_hours(entries: &[TimeEntry]) -> f64 {
    total_man_hours(entries.iter().filter(|e| e.is_clock_in()))
}

/// Group by the calendar date of `start` in the system local time zone.
pub fn group_by_date(entries: &[TimeEntry]) -> Vec<DateGroup> {
    group_by_date_in(entries, &Local)
}

/// Group by the calendar date of `start` as seen in `tz`, oldest first.
pub fn group_by_date_in<Tz: TimeZone>(entries: &[TimeEntry], tz: &Tz) -> Vec<DateGroup> {
    let mut groups: BTreeMap<NaiveDate, DateGroup> = BTreeMap::new();

    for entry in entries {
        let date = entry.start.with_timezone(tz).date_naive();
        let group = groups.entry(date).or_insert_with(|| DateGroup::new(date));

        if entry.is_clock_in() {
            group.generic_time.add(entry);
        } else {
            group.component_work.add(entry);
        }
    }

    groups
        .into_values()
        .map(|mut g| {
            g.total_entries = g.component_work.entries + g.generic_time.entries;
            g.total_man_hours = g.component_work.man_hours + g.generic_time.man_hours;
            g
        })
        .collect()
}

/// Hours per component, highest first. Clock-in entries form their own
/// group so the shares cover every entry.
pub fn group_by_component(entries: &[TimeEntry], names: &NameIndex) -> Vec<ComponentTimeSummary> {
    let mut groups: HashMap<Option<i64>, ComponentTimeSummary> = HashMap::new();

    for entry in entries {
        let group = groups
            .entry(entry.component_id)
            .or_insert_with(|| ComponentTimeSummary {
                component_id: entry.component_id,
                name: names.component(entry.component_id),
                entries: 0,
                total_hours: 0.0,
                man_hours: 0.0,
                share_pct: 0.0,
            });
        group.entries += 1;
        group.total_hours += entry.total_hours;
        group.man_hours += man_hours(entry);
    }

    let grand_total: f64 = groups.values().map(|g| g.man_hours).sum();

    let mut out: Vec<ComponentTimeSummary> = groups
        .into_values()
        .map(|mut g| {
            g.share_pct = share_of(g.man_hours, grand_total);
            g
        })
        .collect();

    out.sort_by(|a, b| {
        b.total_hours
            .total_cmp(&a.total_hours)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.component_id.cmp(&b.component_id))
    });
    out
}

/// Hours per user with a nested per-component breakdown, highest first.
pub fn group_by_user(entries: &[TimeEntry], names: &NameIndex) -> Vec<UserSummary> {
    let mut users: HashMap<i64, (UserSummary, HashMap<Option<i64>, UserComponentHours>)> =
        HashMap::new();

    for entry in entries {
        let (summary, per_component) = users.entry(entry.user_id).or_insert_with(|| {
            (
                UserSummary {
                    user_id: entry.user_id,
                    name: names.user(entry.user_id),
                    entries: 0,
                    total_hours: 0.0,
                    man_hours: 0.0,
                    components: Vec::new(),
                },
                HashMap::new(),
            )
        });

        summary.entries += 1;
        summary.total_hours += entry.total_hours;
        summary.man_hours += man_hours(entry);

        let c = per_component
            .entry(entry.component_id)
            .or_insert_with(|| UserComponentHours {
                component_id: entry.component_id,
                name: names.component(entry.component_id),
                entries: 0,
                total_hours: 0.0,
            });
        c.entries += 1;
        c.total_hours += entry.total_hours;
    }

    let mut out: Vec<UserSummary> = users
        .into_values()
        .map(|(mut summary, per_component)| {
            let mut components: Vec<UserComponentHours> = per_component.into_values().collect();
            components.sort_by(|a, b| {
                b.total_hours
                    .total_cmp(&a.total_hours)
                    .then_with(|| a.name.cmp(&b.name))
                    .then_with(|| a.component_id.cmp(&b.component_id))
            });
            summary.components = components;
            summary
        })
        .collect();

    out.sort_by(|a, b| {
        b.total_hours
            .total_cmp(&a.total_hours)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.user_id.cmp(&b.user_id))
    });
    out
}

/// `part / total × 100`, or 0 when the total is not positive.
pub fn share_of(part: f64, total: f64) -> f64 {
    if total > 0.0 { part / total * 100.0 } else { 0.0 }
}
