use crate::db::migrate::known_versions;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use std::fs;

fn count(pool: &DbPool, table: &str) -> AppResult<i64> {
    let sql = format!("SELECT COUNT(*) FROM {table}");
    Ok(pool.conn.query_row(&sql, [], |row| row.get(0))?)
}

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) RECORD COUNTS
    //
    for (label, table) in [
        ("Jobs", "jobs"),
        ("Components", "components"),
        ("Time entries", "time_entries"),
        ("Financial rows", "financial_rows"),
        ("Material items", "material_items"),
    ] {
        let n = count(pool, table)?;
        println!("{}• {}:{} {}{}{}", CYAN, label, RESET, GREEN, n, RESET);
    }

    //
    // 3) SCHEMA VERSION
    //
    let applied: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM log WHERE operation = 'migration_applied'",
        [],
        |row| row.get(0),
    )?;
    let latest = known_versions().last().copied().unwrap_or("--");
    println!(
        "{}• Migrations:{} {}/{} {}(latest {}){}",
        CYAN,
        RESET,
        applied,
        known_versions().len(),
        GREY,
        latest,
        RESET
    );

    println!();
    Ok(())
}
