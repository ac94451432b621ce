//! Office-side edits of financial rows and labor pricing.
//!
//! Every write is validated before anything is persisted; a failed write
//! leaves the stored rows as they were.

use crate::core::calculator::ordering;
use crate::db::log::audit_or_warn;
use crate::db::store::JobStore;
use crate::errors::{AppError, AppResult};
use crate::models::{
    FinancialRow, FinancialRowInput, FinancialRowPatch, LaborPricing, Session,
};

/// Where a new row goes in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    Append,
    /// Right after the row currently shown at this 0-based position.
    After(usize),
}

pub struct RowLogic;

impl RowLogic {
    /// Rows of a job in display order.
    pub fn list<S: JobStore + ?Sized>(store: &S, job_id: i64) -> AppResult<Vec<FinancialRow>> {
        let mut rows = store.financial_rows(job_id)?;
        ordering::sort_for_display(&mut rows);
        Ok(rows)
    }

    pub fn create<S: JobStore + ?Sized>(
        store: &mut S,
        session: &Session,
        job_id: i64,
        input: FinancialRowInput,
        placement: Placement,
    ) -> AppResult<FinancialRow> {
        session.require_office("create financial row")?;
        store.job(job_id)?;

        // Validate before touching the store at all.
        let mut row = FinancialRow::from_input(job_id, input, 0.0)?;

        let existing = Self::list(store, job_id)?;
        row.order_index = match placement {
            Placement::Append => ordering::append_key(&existing),
            Placement::After(k) => {
                if ordering::needs_renumber(&existing, k) {
                    let fresh = Self::renumber(store, job_id, &existing)?;
                    ordering::insert_after(&fresh, k)
                } else {
                    ordering::insert_after(&existing, k)
                }
            }
        };

        row.id = store.insert_financial_row(&row)?;

        audit_or_warn(
            store,
            "row_add",
            &format!("row {}", row.id),
            &format!(
                "{} '{}' on job {}: {:.2} × {:.2} = {:.2}",
                row.category, row.description, job_id, row.quantity, row.unit_cost, row.total_cost
            ),
        );

        Ok(row)
    }

    /// Apply `patch` to a stored row. Totals are re-derived; the order key
    /// is kept.
    pub fn update<S: JobStore + ?Sized>(
        store: &mut S,
        session: &Session,
        row_id: i64,
        patch: FinancialRowPatch,
    ) -> AppResult<FinancialRow> {
        session.require_office("edit financial row")?;

        let current = store.financial_row(row_id)?;
        let updated = current.with_patch(patch)?;
        store.update_financial_row(&updated)?;

        audit_or_warn(
            store,
            "row_edit",
            &format!("row {}", row_id),
            &format!(
                "total {:.2} → {:.2}, price {:.2} → {:.2}",
                current.total_cost, updated.total_cost, current.selling_price, updated.selling_price
            ),
        );

        Ok(updated)
    }

    pub fn delete<S: JobStore + ?Sized>(
        store: &mut S,
        session: &Session,
        row_id: i64,
    ) -> AppResult<FinancialRow> {
        session.require_office("delete financial row")?;

        let row = store.financial_row(row_id)?;
        store.delete_financial_row(row_id)?;

        audit_or_warn(
            store,
            "row_del",
            &format!("row {}", row_id),
            &format!("{} '{}' removed from job {}", row.category, row.description, row.job_id),
        );

        Ok(row)
    }

    /// Rewrite the order keys of a job to `0, 1, 2, …` in current display
    /// order and return the rows with their new keys.
    fn renumber<S: JobStore + ?Sized>(
        store: &mut S,
        job_id: i64,
        rows: &[FinancialRow],
    ) -> AppResult<Vec<FinancialRow>> {
        let keys = ordering::renumbered(rows);
        store.renumber_financial_rows(&keys)?;

        audit_or_warn(
            store,
            "row_renumber",
            &format!("job {}", job_id),
            &format!("Order keys of {} rows rewritten", keys.len()),
        );

        Self::list(store, job_id)
    }

    /// Set the job's labor rate. Billable rate always equals the hourly rate.
    pub fn set_labor_rate<S: JobStore + ?Sized>(
        store: &mut S,
        session: &Session,
        job_id: i64,
        hourly_rate: Option<f64>,
    ) -> AppResult<LaborPricing> {
        session.require_office("set labor rate")?;

        let rate = hourly_rate.ok_or(AppError::MissingField("hourly_rate"))?;
        if !rate.is_finite() || rate < 0.0 {
            return Err(AppError::InvalidNumber {
                field: "hourly_rate",
                value: rate,
            });
        }
        store.job(job_id)?;

        let pricing = LaborPricing::at_rate(job_id, rate);
        store.set_labor_pricing(&pricing)?;

        audit_or_warn(
            store,
            "labor_rate",
            &format!("job {}", job_id),
            &format!("Hourly rate set to {:.2}", rate),
        );

        Ok(pricing)
    }
}
