pub mod catalog;
pub mod config;
pub mod db;
pub mod entry;
pub mod export;
pub mod init;
pub mod log;
pub mod report;
pub mod row;

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Open the configured database, applying any pending migrations.
pub(crate) fn open_pool(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}
