use crate::cli::commands::open_pool;
use crate::cli::parser::{Commands, EntryAction};
use crate::config::Config;
use crate::core::calculator::aggregator::NameIndex;
use crate::core::calculator::duration::effective_crew_size;
use crate::core::entries::{EntryLogic, NewTimeEntry, TimeEntryEdit};
use crate::db::store::JobStore;
use crate::errors::AppResult;
use crate::models::{CrewSelection, Session, TimeEntry};
use crate::ui::messages::{info, success};
use crate::utils::table::{Column, Table};
use crate::utils::time::{fmt_local, parse_optional_timestamp, parse_timestamp};

/// `--worker` names win over `--crew`; neither means no change (edit) or a
/// crew of one (add).
fn crew_selection(crew: Option<i32>, workers: &[String]) -> Option<CrewSelection> {
    if !workers.is_empty() {
        Some(CrewSelection::Workers(workers.to_vec()))
    } else {
        crew.map(CrewSelection::Count)
    }
}

fn describe(entry: &TimeEntry) -> String {
    format!(
        "{:.2} h × {} = {:.2} man-hours",
        entry.total_hours,
        effective_crew_size(entry),
        entry.man_hours()
    )
}

pub fn handle(cmd: &Commands, cfg: &Config, session: &Session) -> AppResult<()> {
    let Commands::Entry { action } = cmd else {
        return Ok(());
    };
    let mut pool = open_pool(cfg)?;

    match action {
        EntryAction::Add {
            job,
            component,
            start,
            end,
            hours,
            crew,
            workers,
            notes,
        } => {
            let new = NewTimeEntry {
                job_id: *job,
                component_id: *component,
                start: parse_timestamp(start)?,
                end: parse_optional_timestamp(end.as_deref())?,
                hours: *hours,
                crew: crew_selection(*crew, workers).unwrap_or(CrewSelection::Count(1)),
                notes: notes.clone(),
            };
            let entry = EntryLogic::record(&mut pool, session, new)?;
            success(format!("Entry {} recorded: {}", entry.id, describe(&entry)));
        }

        EntryAction::Edit {
            id,
            start,
            end,
            hours,
            crew,
            workers,
            notes,
        } => {
            let edit = TimeEntryEdit {
                start: parse_optional_timestamp(start.as_deref())?,
                end: parse_optional_timestamp(end.as_deref())?,
                hours: *hours,
                crew: crew_selection(*crew, workers),
                notes: notes.clone(),
            };
            let entry = EntryLogic::edit(&mut pool, session, *id, edit)?;
            success(format!("Entry {} updated: {}", entry.id, describe(&entry)));
        }

        EntryAction::List { job, mine } => {
            pool.job(*job)?;
            let user_filter = mine.then_some(session.user_id);
            let entries = EntryLogic::list(&pool, *job, user_filter)?;
            if entries.is_empty() {
                info("No time entries for this job.");
                return Ok(());
            }

            let components = pool.components(*job)?;
            let users = pool.users()?;
            let names = NameIndex::new(&components, &users);

            let mut t = Table::new(
                vec![
                    Column::right("ID"),
                    Column::left("Start"),
                    Column::left("End"),
                    Column::left("Component"),
                    Column::left("User"),
                    Column::right("Hours"),
                    Column::right("Crew"),
                    Column::right("Man-h"),
                    Column::left("Notes"),
                ],
                &cfg.separator_char,
            );
            for e in &entries {
                let hours = if e.is_manual {
                    format!("{:.2}*", e.total_hours)
                } else {
                    format!("{:.2}", e.total_hours)
                };
                t.add_row(vec![
                    e.id.to_string(),
                    fmt_local(&e.start),
                    e.end.as_ref().map(fmt_local).unwrap_or_else(|| "--".to_string()),
                    names.component(e.component_id),
                    names.user(e.user_id),
                    hours,
                    effective_crew_size(e).to_string(),
                    format!("{:.2}", e.man_hours()),
                    e.notes.clone().unwrap_or_default(),
                ]);
            }
            t.print();
            println!("* hours entered by hand");
        }
    }

    Ok(())
}
