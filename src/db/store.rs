//! Read/write contract between the rollup engine and the record store.
//!
//! The engine only ever reads whole record sets for a job and recomputes
//! from them; writes are limited to financial rows, time entries and the
//! setup records a job needs.

use crate::errors::AppResult;
use crate::models::{
    Component, FinancialRow, Job, LaborPricing, MaterialItem, NewMaterialItem, TimeEntry, User,
};

pub trait JobStore {
    // ---------------------------
    // Reads
    // ---------------------------
    fn job(&self, job_id: i64) -> AppResult<Job>;
    fn jobs(&self) -> AppResult<Vec<Job>>;
    fn components(&self, job_id: i64) -> AppResult<Vec<Component>>;
    fn users(&self) -> AppResult<Vec<User>>;
    fn time_entries(&self, job_id: i64) -> AppResult<Vec<TimeEntry>>;
    fn time_entry(&self, entry_id: i64) -> AppResult<TimeEntry>;
    fn financial_rows(&self, job_id: i64) -> AppResult<Vec<FinancialRow>>;
    fn financial_row(&self, row_id: i64) -> AppResult<FinancialRow>;
    fn labor_pricing(&self, job_id: i64) -> AppResult<Option<LaborPricing>>;
    /// Items of the job's most recent active workbook.
    fn active_material_items(&self, job_id: i64) -> AppResult<Vec<MaterialItem>>;

    // ---------------------------
    // Engine writes
    // ---------------------------
    fn insert_financial_row(&mut self, row: &FinancialRow) -> AppResult<i64>;
    fn update_financial_row(&mut self, row: &FinancialRow) -> AppResult<()>;
    fn delete_financial_row(&mut self, row_id: i64) -> AppResult<()>;
    /// Rewrite `order_index` of many rows at once, all or nothing.
    fn renumber_financial_rows(&mut self, keys: &[(i64, f64)]) -> AppResult<()>;
    fn insert_time_entry(&mut self, entry: &TimeEntry) -> AppResult<i64>;
    fn update_time_entry(&mut self, entry: &TimeEntry) -> AppResult<()>;

    // ---------------------------
    // Setup writes
    // ---------------------------
    fn insert_job(&mut self, name: &str, estimated_hours: Option<f64>) -> AppResult<i64>;
    fn set_estimated_hours(&mut self, job_id: i64, hours: Option<f64>) -> AppResult<()>;
    fn insert_component(&mut self, job_id: i64, name: &str, is_task: bool) -> AppResult<i64>;
    fn set_component_active(&mut self, component_id: i64, active: bool) -> AppResult<()>;
    fn insert_user(&mut self, name: &str) -> AppResult<i64>;
    fn set_labor_pricing(&mut self, pricing: &LaborPricing) -> AppResult<()>;
    fn insert_material_workbook(&mut self, job_id: i64, name: &str) -> AppResult<i64>;
    fn archive_material_workbook(&mut self, workbook_id: i64) -> AppResult<()>;
    fn insert_material_sheet(&mut self, workbook_id: i64, name: &str) -> AppResult<i64>;
    fn insert_material_item(&mut self, item: &NewMaterialItem) -> AppResult<i64>;

    // ---------------------------
    // Audit
    // ---------------------------
    fn audit(&mut self, operation: &str, target: &str, message: &str) -> AppResult<()>;
}
