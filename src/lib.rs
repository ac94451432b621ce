//! rJobCost library root.
//! Exposes the CLI parser, the high-level run() function, the rollup engine
//! and its SQLite store.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use models::{Role, Session};

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, session: &Session) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Job { .. }
        | Commands::Component { .. }
        | Commands::User { .. }
        | Commands::Labor { .. }
        | Commands::Material { .. } => cli::commands::catalog::handle(&cli.command, cfg, session),
        Commands::Entry { .. } => cli::commands::entry::handle(&cli.command, cfg, session),
        Commands::Row { .. } => cli::commands::row::handle(&cli.command, cfg, session),
        Commands::Summary { .. }
        | Commands::Costs { .. }
        | Commands::Proposal { .. }
        | Commands::Progress { .. } => cli::commands::report::handle(&cli.command, cfg),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    // config is loaded once; CLI flags override it
    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    let role = match &cli.role {
        Some(r) => Role::parse(r)?,
        None => cfg.role,
    };
    let session = Session::new(cli.user.unwrap_or(cfg.user_id), role);

    dispatch(&cli, &cfg, &session)
}
