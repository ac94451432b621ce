use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::store::JobStore;
use crate::errors::{AppError, AppResult};
use crate::models::{
    Category, Component, FinancialRow, Job, LaborPricing, MaterialItem, NewMaterialItem,
    TimeEntry, User, WorkbookStatus,
};
use chrono::{DateTime, Local, Utc};
use rusqlite::{OptionalExtension, Result, Row, params};

fn conversion_error(col: usize, err: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(col, rusqlite::types::Type::Text, Box::new(err))
}

fn parse_ts(col: usize, raw: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| conversion_error(col, AppError::InvalidTimestamp(raw.to_string())))
}

fn map_job(row: &Row) -> Result<Job> {
    Ok(Job {
        id: row.get("id")?,
        name: row.get("name")?,
        estimated_hours: row.get("estimated_hours")?,
    })
}

fn map_component(row: &Row) -> Result<Component> {
    Ok(Component {
        id: row.get("id")?,
        job_id: row.get("job_id")?,
        name: row.get("name")?,
        is_active: row.get::<_, i32>("is_active")? == 1,
        is_task: row.get::<_, i32>("is_task")? == 1,
    })
}

pub fn map_time_entry(row: &Row) -> Result<TimeEntry> {
    let start_raw: String = row.get("start_time")?;
    let end_raw: Option<String> = row.get("end_time")?;
    let workers_raw: String = row.get("worker_names")?;

    let start = parse_ts(4, &start_raw)?;
    let end = match end_raw {
        Some(ref s) if !s.is_empty() => Some(parse_ts(5, s)?),
        _ => None,
    };

    let worker_names: Vec<String> = if workers_raw.trim().is_empty() {
        Vec::new()
    } else {
        serde_json::from_str(&workers_raw).map_err(|e| conversion_error(8, AppError::Json(e)))?
    };

    Ok(TimeEntry {
        id: row.get("id")?,
        job_id: row.get("job_id")?,
        component_id: row.get("component_id")?,
        user_id: row.get("user_id")?,
        start,
        end,
        total_hours: row.get("total_hours")?,
        crew_count: row.get("crew_count")?,
        worker_names,
        is_manual: row.get::<_, i32>("is_manual")? == 1,
        notes: row.get("notes")?,
    })
}

pub fn map_financial_row(row: &Row) -> Result<FinancialRow> {
    let cat_str: String = row.get("category")?;
    let category = Category::from_db_str(&cat_str)
        .ok_or_else(|| conversion_error(2, AppError::InvalidCategory(cat_str.clone())))?;

    Ok(FinancialRow {
        id: row.get("id")?,
        job_id: row.get("job_id")?,
        category,
        description: row.get("description")?,
        quantity: row.get("quantity")?,
        unit_cost: row.get("unit_cost")?,
        markup_percent: row.get("markup_percent")?,
        total_cost: row.get("total_cost")?,
        selling_price: row.get("selling_price")?,
        order_index: row.get("order_index")?,
        notes: row.get("notes")?,
    })
}

fn map_material_item(row: &Row) -> Result<MaterialItem> {
    Ok(MaterialItem {
        id: row.get("id")?,
        sheet_id: row.get("sheet_id")?,
        sheet_name: row.get("sheet_name")?,
        sheet_order: row.get("sheet_order")?,
        category: row.get("category")?,
        description: row.get("description")?,
        quantity: row.get("quantity")?,
        cost_per_unit: row.get("cost_per_unit")?,
        price_per_unit: row.get("price_per_unit")?,
    })
}

fn not_found(kind: &'static str, id: i64) -> AppError {
    AppError::NotFound { kind, id }
}

fn workers_json(entry: &TimeEntry) -> AppResult<String> {
    Ok(serde_json::to_string(&entry.worker_names)?)
}

impl JobStore for DbPool {
    fn job(&self, job_id: i64) -> AppResult<Job> {
        self.conn
            .query_row(
                "SELECT id, name, estimated_hours FROM jobs WHERE id = ?1",
                [job_id],
                map_job,
            )
            .optional()?
            .ok_or_else(|| not_found("Job", job_id))
    }

    fn jobs(&self) -> AppResult<Vec<Job>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name, estimated_hours FROM jobs ORDER BY id ASC")?;
        let rows = stmt.query_map([], map_job)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn components(&self, job_id: i64) -> AppResult<Vec<Component>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, job_id, name, is_active, is_task FROM components
             WHERE job_id = ?1
             ORDER BY name ASC, id ASC",
        )?;
        let rows = stmt.query_map([job_id], map_component)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn users(&self) -> AppResult<Vec<User>> {
        let mut stmt = self
            .conn
            .prepare("SELECT id, name FROM users ORDER BY id ASC")?;
        let rows = stmt.query_map([], |row| {
            Ok(User {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn time_entries(&self, job_id: i64) -> AppResult<Vec<TimeEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, job_id, component_id, user_id, start_time, end_time, total_hours,
                    crew_count, worker_names, is_manual, notes
             FROM time_entries
             WHERE job_id = ?1
             ORDER BY start_time ASC, id ASC",
        )?;
        let rows = stmt.query_map([job_id], map_time_entry)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn time_entry(&self, entry_id: i64) -> AppResult<TimeEntry> {
        self.conn
            .query_row(
                "SELECT id, job_id, component_id, user_id, start_time, end_time, total_hours,
                        crew_count, worker_names, is_manual, notes
                 FROM time_entries WHERE id = ?1",
                [entry_id],
                map_time_entry,
            )
            .optional()?
            .ok_or_else(|| not_found("Time entry", entry_id))
    }

    fn financial_rows(&self, job_id: i64) -> AppResult<Vec<FinancialRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT * FROM financial_rows
             WHERE job_id = ?1
             ORDER BY order_index ASC, id ASC",
        )?;
        let rows = stmt.query_map([job_id], map_financial_row)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn financial_row(&self, row_id: i64) -> AppResult<FinancialRow> {
        self.conn
            .query_row(
                "SELECT * FROM financial_rows WHERE id = ?1",
                [row_id],
                map_financial_row,
            )
            .optional()?
            .ok_or_else(|| not_found("Financial row", row_id))
    }

    fn labor_pricing(&self, job_id: i64) -> AppResult<Option<LaborPricing>> {
        Ok(self
            .conn
            .query_row(
                "SELECT job_id, hourly_rate, billable_rate FROM labor_pricing WHERE job_id = ?1",
                [job_id],
                |row| {
                    Ok(LaborPricing {
                        job_id: row.get(0)?,
                        hourly_rate: row.get(1)?,
                        billable_rate: row.get(2)?,
                    })
                },
            )
            .optional()?)
    }

    fn active_material_items(&self, job_id: i64) -> AppResult<Vec<MaterialItem>> {
        let workbook: Option<i64> = self
            .conn
            .query_row(
                "SELECT id FROM material_workbooks
                 WHERE job_id = ?1 AND status = ?2
                 ORDER BY id DESC
                 LIMIT 1",
                params![job_id, WorkbookStatus::Active.to_db_str()],
                |row| row.get(0),
            )
            .optional()?;

        let Some(workbook_id) = workbook else {
            return Ok(Vec::new());
        };

        let mut stmt = self.conn.prepare(
            "SELECT i.id, i.sheet_id, s.name AS sheet_name, s.sort_order AS sheet_order,
                    i.category, i.description, i.quantity, i.cost_per_unit, i.price_per_unit
             FROM material_items i
             JOIN material_sheets s ON s.id = i.sheet_id
             WHERE s.workbook_id = ?1
             ORDER BY s.sort_order ASC, s.id ASC, i.id ASC",
        )?;
        let rows = stmt.query_map([workbook_id], map_material_item)?;

        let mut out = Vec::new();
        for r in rows {
            out.push(r?);
        }
        Ok(out)
    }

    fn insert_financial_row(&mut self, row: &FinancialRow) -> AppResult<i64> {
        self.conn.execute(
            "INSERT INTO financial_rows (job_id, category, description, quantity, unit_cost,
                                         markup_percent, total_cost, selling_price, order_index, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                row.job_id,
                row.category.to_db_str(),
                row.description,
                row.quantity,
                row.unit_cost,
                row.markup_percent,
                row.total_cost,
                row.selling_price,
                row.order_index,
                row.notes,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_financial_row(&mut self, row: &FinancialRow) -> AppResult<()> {
        let changed = self.conn.execute(
            "UPDATE financial_rows
             SET category = ?1, description = ?2, quantity = ?3, unit_cost = ?4,
                 markup_percent = ?5, total_cost = ?6, selling_price = ?7, notes = ?8
             WHERE id = ?9",
            params![
                row.category.to_db_str(),
                row.description,
                row.quantity,
                row.unit_cost,
                row.markup_percent,
                row.total_cost,
                row.selling_price,
                row.notes,
                row.id,
            ],
        )?;
        if changed == 0 {
            return Err(not_found("Financial row", row.id));
        }
        Ok(())
    }

    fn delete_financial_row(&mut self, row_id: i64) -> AppResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM financial_rows WHERE id = ?1", [row_id])?;
        if changed == 0 {
            return Err(not_found("Financial row", row_id));
        }
        Ok(())
    }

    fn renumber_financial_rows(&mut self, keys: &[(i64, f64)]) -> AppResult<()> {
        let tx = self.conn.transaction()?;
        {
            let mut stmt = tx.prepare("UPDATE financial_rows SET order_index = ?1 WHERE id = ?2")?;
            for (id, key) in keys {
                stmt.execute(params![key, id])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn insert_time_entry(&mut self, entry: &TimeEntry) -> AppResult<i64> {
        let workers = workers_json(entry)?;
        self.conn.execute(
            "INSERT INTO time_entries (job_id, component_id, user_id, start_time, end_time,
                                       total_hours, crew_count, worker_names, is_manual, notes)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
            params![
                entry.job_id,
                entry.component_id,
                entry.user_id,
                entry.start.to_rfc3339(),
                entry.end.map(|e| e.to_rfc3339()),
                entry.total_hours,
                entry.crew_count,
                workers,
                if entry.is_manual { 1 } else { 0 },
                entry.notes,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn update_time_entry(&mut self, entry: &TimeEntry) -> AppResult<()> {
        let workers = workers_json(entry)?;
        let changed = self.conn.execute(
            "UPDATE time_entries
             SET component_id = ?1, start_time = ?2, end_time = ?3, total_hours = ?4,
                 crew_count = ?5, worker_names = ?6, is_manual = ?7, notes = ?8
             WHERE id = ?9",
            params![
                entry.component_id,
                entry.start.to_rfc3339(),
                entry.end.map(|e| e.to_rfc3339()),
                entry.total_hours,
                entry.crew_count,
                workers,
                if entry.is_manual { 1 } else { 0 },
                entry.notes,
                entry.id,
            ],
        )?;
        if changed == 0 {
            return Err(not_found("Time entry", entry.id));
        }
        Ok(())
    }

    fn insert_job(&mut self, name: &str, estimated_hours: Option<f64>) -> AppResult<i64> {
        self.conn.execute(
            "INSERT INTO jobs (name, estimated_hours, created_at) VALUES (?1, ?2, ?3)",
            params![name, estimated_hours, Local::now().to_rfc3339()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn set_estimated_hours(&mut self, job_id: i64, hours: Option<f64>) -> AppResult<()> {
        let changed = self.conn.execute(
            "UPDATE jobs SET estimated_hours = ?1 WHERE id = ?2",
            params![hours, job_id],
        )?;
        if changed == 0 {
            return Err(not_found("Job", job_id));
        }
        Ok(())
    }

    fn insert_component(&mut self, job_id: i64, name: &str, is_task: bool) -> AppResult<i64> {
        self.conn.execute(
            "INSERT INTO components (job_id, name, is_active, is_task) VALUES (?1, ?2, 1, ?3)",
            params![job_id, name, if is_task { 1 } else { 0 }],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn set_component_active(&mut self, component_id: i64, active: bool) -> AppResult<()> {
        let changed = self.conn.execute(
            "UPDATE components SET is_active = ?1 WHERE id = ?2",
            params![if active { 1 } else { 0 }, component_id],
        )?;
        if changed == 0 {
            return Err(not_found("Component", component_id));
        }
        Ok(())
    }

    fn insert_user(&mut self, name: &str) -> AppResult<i64> {
        self.conn
            .execute("INSERT INTO users (name) VALUES (?1)", [name])?;
        Ok(self.conn.last_insert_rowid())
    }

    fn set_labor_pricing(&mut self, pricing: &LaborPricing) -> AppResult<()> {
        self.conn.execute(
            "INSERT INTO labor_pricing (job_id, hourly_rate, billable_rate)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(job_id) DO UPDATE SET
                hourly_rate = excluded.hourly_rate,
                billable_rate = excluded.billable_rate",
            params![pricing.job_id, pricing.hourly_rate, pricing.billable_rate],
        )?;
        Ok(())
    }

    fn insert_material_workbook(&mut self, job_id: i64, name: &str) -> AppResult<i64> {
        self.conn.execute(
            "INSERT INTO material_workbooks (job_id, name, status, created_at)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                job_id,
                name,
                WorkbookStatus::Active.to_db_str(),
                Local::now().to_rfc3339()
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn archive_material_workbook(&mut self, workbook_id: i64) -> AppResult<()> {
        let changed = self.conn.execute(
            "UPDATE material_workbooks SET status = ?1 WHERE id = ?2",
            params![WorkbookStatus::Archived.to_db_str(), workbook_id],
        )?;
        if changed == 0 {
            return Err(not_found("Material workbook", workbook_id));
        }
        Ok(())
    }

    fn insert_material_sheet(&mut self, workbook_id: i64, name: &str) -> AppResult<i64> {
        self.conn.execute(
            "INSERT INTO material_sheets (workbook_id, name, sort_order)
             VALUES (?1, ?2, (SELECT IFNULL(MAX(sort_order), -1) + 1
                              FROM material_sheets WHERE workbook_id = ?1))",
            params![workbook_id, name],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn insert_material_item(&mut self, item: &NewMaterialItem) -> AppResult<i64> {
        self.conn.execute(
            "INSERT INTO material_items (sheet_id, category, description, quantity,
                                         cost_per_unit, price_per_unit)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                item.sheet_id,
                item.category,
                item.description,
                item.quantity,
                item.cost_per_unit,
                item.price_per_unit,
            ],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    fn audit(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()> {
        ttlog(&self.conn, operation, target, message)
    }
}
