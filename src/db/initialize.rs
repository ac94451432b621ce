use crate::db::migrate::{pending_versions, run_pending_migrations};
use crate::errors::AppResult;
use rusqlite::Connection;

/// Bring the schema up to date and return the migration versions that were
/// applied (empty when it already was).
pub fn init_db(conn: &Connection) -> AppResult<Vec<&'static str>> {
    let pending = pending_versions(conn)?;
    if !pending.is_empty() {
        run_pending_migrations(conn)?;
    }
    Ok(pending)
}
