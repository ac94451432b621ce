use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET, YELLOW};

/// Jobs whose financial rows share an order key and will be renumbered on
/// the next insertion between them.
fn jobs_with_duplicate_keys(pool: &DbPool) -> AppResult<Vec<(i64, i64)>> {
    let mut stmt = pool.conn.prepare(
        "SELECT job_id, COUNT(*) - COUNT(DISTINCT order_index)
         FROM financial_rows
         GROUP BY job_id
         HAVING COUNT(*) > COUNT(DISTINCT order_index)
         ORDER BY job_id",
    )?;
    let rows = stmt.query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        info,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        //
        // 1) MIGRATE
        //
        if *migrate {
            println!("{}▶ Running migrations…{}", CYAN, RESET);
            let applied = init_db(&pool.conn)?;
            if applied.is_empty() {
                println!("{}✔ Schema already up to date.{}\n", GREEN, RESET);
            } else {
                println!(
                    "{}✔ {} migration(s) applied.{}\n",
                    GREEN,
                    applied.len(),
                    RESET
                );
            }
        }

        //
        // 2) INFO
        //
        if *info {
            stats::print_db_info(&pool, &cfg.database)?;
        }

        //
        // 3) CHECK
        //
        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity: String = pool
                .conn
                .query_row("PRAGMA integrity_check;", [], |row| row.get(0))?;

            if integrity == "ok" {
                println!("{}✔ Integrity check passed.{}", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{} {}", RED, RESET, integrity);
            }

            for (job_id, dupes) in jobs_with_duplicate_keys(&pool)? {
                println!(
                    "{}• Job {}: {} financial row(s) share an order key{}",
                    YELLOW, job_id, dupes, RESET
                );
            }
            println!();
        }
    }

    Ok(())
}
