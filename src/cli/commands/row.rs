use crate::cli::commands::open_pool;
use crate::cli::parser::{Commands, RowAction};
use crate::config::Config;
use crate::core::financial::{Placement, RowLogic};
use crate::db::store::JobStore;
use crate::errors::{AppError, AppResult};
use crate::models::{Category, FinancialRow, FinancialRowInput, FinancialRowPatch, Session};
use crate::ui::messages::{info, success};
use crate::utils::fmt_money;
use crate::utils::table::{Column, Table};

fn parse_category(code: &str) -> AppResult<Category> {
    Category::from_code(code).ok_or_else(|| AppError::InvalidCategory(code.to_string()))
}

/// `--after N` counts rows as shown by `row list`, starting at 1.
fn placement(after: Option<usize>) -> AppResult<Placement> {
    match after {
        None => Ok(Placement::Append),
        Some(0) => Err(AppError::InvalidPosition(
            "0 (row numbers start at 1)".to_string(),
        )),
        Some(n) => Ok(Placement::After(n - 1)),
    }
}

fn describe(row: &FinancialRow) -> String {
    format!(
        "{} '{}' {} × {} = {} (sell {})",
        row.category,
        row.description,
        row.quantity,
        fmt_money(row.unit_cost),
        fmt_money(row.total_cost),
        fmt_money(row.selling_price)
    )
}

pub fn handle(cmd: &Commands, cfg: &Config, session: &Session) -> AppResult<()> {
    let Commands::Row { action } = cmd else {
        return Ok(());
    };
    let mut pool = open_pool(cfg)?;

    match action {
        RowAction::Add {
            job,
            category,
            description,
            quantity,
            unit_cost,
            markup,
            after,
            notes,
        } => {
            let input = FinancialRowInput {
                category: parse_category(category)?,
                description: description.clone(),
                quantity: *quantity,
                unit_cost: *unit_cost,
                markup_percent: *markup,
                notes: notes.clone(),
            };
            let row = RowLogic::create(&mut pool, session, *job, input, placement(*after)?)?;
            success(format!("Row {} added: {}", row.id, describe(&row)));
        }

        RowAction::Edit {
            id,
            category,
            description,
            quantity,
            unit_cost,
            markup,
            notes,
        } => {
            let patch = FinancialRowPatch {
                category: category.as_deref().map(parse_category).transpose()?,
                description: description.clone(),
                quantity: *quantity,
                unit_cost: *unit_cost,
                markup_percent: *markup,
                notes: notes.clone(),
            };
            let row = RowLogic::update(&mut pool, session, *id, patch)?;
            success(format!("Row {} updated: {}", row.id, describe(&row)));
        }

        RowAction::Del { id } => {
            let row = RowLogic::delete(&mut pool, session, *id)?;
            success(format!("Row {} deleted: {}", row.id, row.description));
        }

        RowAction::List { job } => {
            pool.job(*job)?;
            let rows = RowLogic::list(&pool, *job)?;
            if rows.is_empty() {
                info("No financial rows for this job.");
                return Ok(());
            }

            let mut t = Table::new(
                vec![
                    Column::right("#"),
                    Column::right("ID"),
                    Column::left("Category"),
                    Column::left("Description"),
                    Column::right("Qty"),
                    Column::right("Unit cost"),
                    Column::right("Total"),
                    Column::right("Markup"),
                    Column::right("Price"),
                ],
                &cfg.separator_char,
            );
            for (i, r) in rows.iter().enumerate() {
                t.add_row(vec![
                    (i + 1).to_string(),
                    r.id.to_string(),
                    r.category.label().to_string(),
                    r.description.clone(),
                    format!("{}", r.quantity),
                    fmt_money(r.unit_cost),
                    fmt_money(r.total_cost),
                    format!("{:.1}%", r.markup_percent),
                    fmt_money(r.selling_price),
                ]);
            }
            t.print();
        }
    }

    Ok(())
}
