use crate::cli::commands::open_pool;
use crate::cli::parser::{
    Commands, ComponentAction, JobAction, LaborAction, MaterialAction, UserAction,
};
use crate::config::Config;
use crate::core::catalog::CatalogLogic;
use crate::core::financial::RowLogic;
use crate::db::store::JobStore;
use crate::errors::AppResult;
use crate::models::{NewMaterialItem, Session};
use crate::ui::messages::{info, success};
use crate::utils::fmt_money;
use crate::utils::table::{Column, Table};

/// Handle `job`, `component`, `user`, `labor` and `material`.
pub fn handle(cmd: &Commands, cfg: &Config, session: &Session) -> AppResult<()> {
    let mut pool = open_pool(cfg)?;

    match cmd {
        Commands::Job { action } => match action {
            JobAction::Add { name, estimate } => {
                let id = CatalogLogic::add_job(&mut pool, session, name, *estimate)?;
                success(format!("Job {} created: {}", id, name.trim()));
            }
            JobAction::Estimate { job, hours } => {
                CatalogLogic::set_estimate(&mut pool, session, *job, *hours)?;
                match hours.filter(|h| *h > 0.0) {
                    Some(h) => success(format!("Job {} estimate set to {:.2} man-hours", job, h)),
                    None => success(format!("Job {} estimate cleared", job)),
                }
            }
            JobAction::List => {
                let jobs = pool.jobs()?;
                if jobs.is_empty() {
                    info("No jobs yet.");
                    return Ok(());
                }
                let mut t = Table::new(
                    vec![Column::right("ID"), Column::left("Name"), Column::right("Estimate")],
                    &cfg.separator_char,
                );
                for j in jobs {
                    t.add_row(vec![
                        j.id.to_string(),
                        j.name,
                        j.estimated_hours
                            .map(|h| format!("{:.2}", h))
                            .unwrap_or_else(|| "--".to_string()),
                    ]);
                }
                t.print();
            }
        },

        Commands::Component { action } => match action {
            ComponentAction::Add { job, name, task } => {
                let id = CatalogLogic::add_component(&mut pool, session, *job, name, *task)?;
                success(format!("Component {} added to job {}", id, job));
            }
            ComponentAction::List { job } => {
                pool.job(*job)?;
                let mut t = Table::new(
                    vec![Column::right("ID"), Column::left("Name"), Column::left("Kind")],
                    &cfg.separator_char,
                );
                for c in pool.components(*job)? {
                    let name = if c.is_active {
                        c.name
                    } else {
                        format!("{} (inactive)", c.name)
                    };
                    t.add_row(vec![
                        c.id.to_string(),
                        name,
                        if c.is_task { "task" } else { "component" }.to_string(),
                    ]);
                }
                t.print();
            }
            ComponentAction::Activate { id } => {
                CatalogLogic::set_component_active(&mut pool, session, *id, true)?;
                success(format!("Component {} activated", id));
            }
            ComponentAction::Deactivate { id } => {
                CatalogLogic::set_component_active(&mut pool, session, *id, false)?;
                success(format!("Component {} deactivated", id));
            }
        },

        Commands::User { action } => match action {
            UserAction::Add { name } => {
                let id = CatalogLogic::add_user(&mut pool, session, name)?;
                success(format!("User {} added: {}", id, name.trim()));
            }
            UserAction::List => {
                let mut t = Table::new(
                    vec![Column::right("ID"), Column::left("Name")],
                    &cfg.separator_char,
                );
                for u in pool.users()? {
                    t.add_row(vec![u.id.to_string(), u.name]);
                }
                t.print();
            }
        },

        Commands::Labor { action } => match action {
            LaborAction::Set { job, rate } => {
                let pricing = RowLogic::set_labor_rate(&mut pool, session, *job, *rate)?;
                success(format!(
                    "Job {} labor rate set to {} / h",
                    job,
                    fmt_money(pricing.hourly_rate)
                ));
            }
        },

        Commands::Material { action } => match action {
            MaterialAction::Workbook { job, name } => {
                let id = CatalogLogic::add_workbook(&mut pool, session, *job, name)?;
                success(format!("Workbook {} created for job {}", id, job));
            }
            MaterialAction::Archive { workbook } => {
                CatalogLogic::archive_workbook(&mut pool, session, *workbook)?;
                success(format!("Workbook {} archived", workbook));
            }
            MaterialAction::Sheet { workbook, name } => {
                let id = CatalogLogic::add_sheet(&mut pool, session, *workbook, name)?;
                success(format!("Sheet {} added to workbook {}", id, workbook));
            }
            MaterialAction::Item {
                sheet,
                description,
                category,
                quantity,
                cost,
                price,
            } => {
                let item = NewMaterialItem {
                    sheet_id: *sheet,
                    category: category.trim().to_string(),
                    description: description.trim().to_string(),
                    quantity: *quantity,
                    cost_per_unit: *cost,
                    price_per_unit: *price,
                };
                let id = CatalogLogic::add_item(&mut pool, session, item)?;
                success(format!("Item {} added to sheet {}", id, sheet));
            }
        },

        _ => {}
    }

    Ok(())
}
