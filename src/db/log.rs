use crate::db::store::JobStore;
use crate::errors::AppResult;
use crate::ui::messages::warning;
use chrono::Local;
use rusqlite::Connection;
use rusqlite::params;

/// Write an internal audit line into the `log` table.
pub fn ttlog(conn: &Connection, operation: &str, target: &str, message: &str) -> AppResult<()> {
    let now = Local::now().to_rfc3339();

    let mut stmt = conn.prepare_cached(
        "INSERT INTO log (date, operation, target, message)
         VALUES (?1, ?2, ?3, ?4)",
    )?;

    stmt.execute(params![now, operation, target, message])?;

    Ok(())
}

/// Audit a completed write through the store. A failing audit line is
/// reported but never undoes the write.
pub(crate) fn audit_or_warn<S: JobStore + ?Sized>(
    store: &mut S,
    operation: &str,
    target: &str,
    message: &str,
) {
    if let Err(e) = store.audit(operation, target, message) {
        warning(format!("Failed to write internal log: {}", e));
    }
}

/// Load `(id, date, operation, target, message)` rows, oldest first.
pub fn load_log(conn: &Connection) -> AppResult<Vec<(i64, String, String, String, String)>> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, date, operation, target, message FROM log ORDER BY id ASC",
    )?;

    let rows = stmt.query_map([], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
            row.get::<_, Option<String>>(3)?.unwrap_or_default(),
            row.get::<_, String>(4)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::pool::DbPool;

    #[test]
    fn audit_line_lands_in_the_log() {
        let mut pool = DbPool::in_memory().unwrap();
        audit_or_warn(&mut pool, "row_add", "row 1", "lumber on job 1");

        let log = load_log(&pool.conn).unwrap();
        let last = log.last().unwrap();
        assert_eq!(last.2, "row_add");
        assert_eq!(last.3, "row 1");
        assert_eq!(last.4, "lumber on job 1");
    }

    #[test]
    fn failed_audit_is_not_an_error() {
        let mut pool = DbPool::in_memory().unwrap();
        pool.conn.execute_batch("DROP TABLE log;").unwrap();
        audit_or_warn(&mut pool, "row_add", "row 1", "ignored");
    }
}
