use crate::core::calculator::aggregator::{self, NameIndex};
use crate::core::calculator::progress::compute_progress;
use crate::core::calculator::rollup;
use crate::db::store::JobStore;
use crate::errors::AppResult;
use crate::models::job_report::JobReport;
use chrono::{Local, TimeZone};

pub struct Core;

impl Core {
    /// Re-read every record of the job and recompute all figures, bucketing
    /// dates in the system local time zone.
    pub fn build_job_report<S: JobStore + ?Sized>(
        store: &S,
        job_id: i64,
        markup_percent: f64,
    ) -> AppResult<JobReport> {
        Self::build_job_report_in(store, job_id, markup_percent, &Local)
    }

    pub fn build_job_report_in<S: JobStore + ?Sized, Tz: TimeZone>(
        store: &S,
        job_id: i64,
        markup_percent: f64,
        tz: &Tz,
    ) -> AppResult<JobReport> {
        let job = store.job(job_id)?;
        let components = store.components(job_id)?;
        let users = store.users()?;
        let entries = store.time_entries(job_id)?;
        let rows = store.financial_rows(job_id)?;
        let labor_pricing = store.labor_pricing(job_id)?;
        let items = store.active_material_items(job_id)?;

        let names = NameIndex::new(&components, &users);

        let total_man_hours = aggregator::total_man_hours(&entries);
        let clock_in_man_hours = aggregator::clock_in_man_hours(&entries);

        let materials = rollup::material_breakdown(&items);
        let labor = rollup::labor_totals(total_man_hours, labor_pricing.as_ref());
        let costs = rollup::cost_breakdown(&rows, &materials, labor);
        let proposal = rollup::proposal(&rows, &materials, labor, markup_percent);

        let progress = compute_progress(clock_in_man_hours, job.estimated_hours);
        let labor_budget_progress =
            compute_progress(clock_in_man_hours, Some(costs.budgeted_labor_hours));

        Ok(JobReport {
            by_date: aggregator::group_by_date_in(&entries, tz),
            by_component: aggregator::group_by_component(&entries, &names),
            by_user: aggregator::group_by_user(&entries, &names),
            total_man_hours,
            clock_in_man_hours,
            costs,
            proposal,
            progress,
            labor_budget_progress,
            job,
        })
    }
}
