use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists. It doubles as the migration ledger.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20251002_0001_create_job_tables",
        description: "Created jobs, users, components and time_entries tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS jobs (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            name            TEXT NOT NULL,
            estimated_hours REAL,
            created_at      TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS users (
            id   INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS components (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            job_id    INTEGER NOT NULL,
            name      TEXT NOT NULL,
            is_active INTEGER NOT NULL DEFAULT 1,
            is_task   INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS time_entries (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            job_id       INTEGER NOT NULL,
            component_id INTEGER,
            user_id      INTEGER NOT NULL,
            start_time   TEXT NOT NULL,
            end_time     TEXT,
            total_hours  REAL NOT NULL DEFAULT 0,
            crew_count   INTEGER NOT NULL DEFAULT 1,
            worker_names TEXT NOT NULL DEFAULT '[]',
            is_manual    INTEGER NOT NULL DEFAULT 0,
            notes        TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_components_job ON components(job_id);
        CREATE INDEX IF NOT EXISTS idx_time_entries_job ON time_entries(job_id, start_time);
        "#,
    },
    Migration {
        version: "20251002_0002_create_cost_tables",
        description: "Created financial_rows and labor_pricing tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS financial_rows (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            job_id         INTEGER NOT NULL,
            category       TEXT NOT NULL
                CHECK(category IN ('labor','subcontractor','materials','equipment','other')),
            description    TEXT NOT NULL DEFAULT '',
            quantity       REAL NOT NULL,
            unit_cost      REAL NOT NULL,
            markup_percent REAL NOT NULL DEFAULT 0,
            total_cost     REAL NOT NULL,
            selling_price  REAL NOT NULL,
            order_index    REAL NOT NULL DEFAULT 0,
            notes          TEXT
        );

        CREATE TABLE IF NOT EXISTS labor_pricing (
            job_id        INTEGER PRIMARY KEY,
            hourly_rate   REAL NOT NULL,
            billable_rate REAL NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_financial_rows_job ON financial_rows(job_id, order_index);
        "#,
    },
    Migration {
        version: "20251014_0003_create_material_tables",
        description: "Created material workbook, sheet and item tables",
        sql: r#"
        CREATE TABLE IF NOT EXISTS material_workbooks (
            id         INTEGER PRIMARY KEY AUTOINCREMENT,
            job_id     INTEGER NOT NULL,
            name       TEXT NOT NULL,
            status     TEXT NOT NULL DEFAULT 'active' CHECK(status IN ('active','archived')),
            created_at TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS material_sheets (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            workbook_id INTEGER NOT NULL,
            name        TEXT NOT NULL,
            sort_order  INTEGER NOT NULL DEFAULT 0
        );

        CREATE TABLE IF NOT EXISTS material_items (
            id             INTEGER PRIMARY KEY AUTOINCREMENT,
            sheet_id       INTEGER NOT NULL,
            category       TEXT NOT NULL DEFAULT '',
            description    TEXT NOT NULL DEFAULT '',
            quantity       REAL NOT NULL DEFAULT 0,
            cost_per_unit  REAL NOT NULL DEFAULT 0,
            price_per_unit REAL NOT NULL DEFAULT 0
        );

        CREATE INDEX IF NOT EXISTS idx_material_workbooks_job ON material_workbooks(job_id, status);
        CREATE INDEX IF NOT EXISTS idx_material_items_sheet ON material_items(sheet_id);
        "#,
    },
    Migration {
        version: "20251019_0004_unmarked_labor_rows",
        description: "Reset selling_price of labor rows to their total_cost",
        sql: r#"
        UPDATE financial_rows
           SET selling_price = total_cost
         WHERE category = 'labor' AND selling_price <> total_cost;
        "#,
    },
];

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    if is_applied(conn, m.version)? {
        return Ok(());
    }

    if let Err(e) = conn.execute_batch(&format!("BEGIN;\n{}\nCOMMIT;", m.sql)) {
        let _ = conn.execute_batch("ROLLBACK;");
        return Err(e);
    }

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;

    success(format!("Migration applied: {} → {}", m.version, m.description));
    Ok(())
}

/// Versions of every migration known to this build, oldest first.
pub fn known_versions() -> Vec<&'static str> {
    MIGRATIONS.iter().map(|m| m.version).collect()
}

/// Versions not yet recorded in the `log` table, oldest first.
pub fn pending_versions(conn: &Connection) -> Result<Vec<&'static str>> {
    ensure_log_table(conn)?;
    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            out.push(m.version);
        }
    }
    Ok(out)
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    for m in MIGRATIONS {
        apply(conn, m)?;
    }

    Ok(())
}
