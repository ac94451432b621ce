use crate::cli::commands::open_pool;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::export::ExportLogic;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        job,
        format,
        file,
        markup,
        force,
    } = cmd
    {
        let mut pool = open_pool(cfg)?;
        let markup = markup.unwrap_or(cfg.default_markup_percent);
        ExportLogic::export(&mut pool, *job, markup, *format, file, *force)?;
    }
    Ok(())
}
