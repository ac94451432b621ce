use super::job::Job;
use crate::core::calculator::aggregator::{ComponentTimeSummary, DateGroup, UserSummary};
use crate::core::calculator::progress::Progress;
use crate::core::calculator::rollup::{CostBreakdown, Proposal};
use serde::Serialize;

/// Everything the summary views show for one job, recomputed from the raw
/// records on every load.
#[derive(Debug, Clone, Serialize)]
pub struct JobReport {
    pub job: Job,
    pub by_date: Vec<DateGroup>,
    pub by_component: Vec<ComponentTimeSummary>,
    pub by_user: Vec<UserSummary>,
    pub total_man_hours: f64,
    pub clock_in_man_hours: f64,
    pub costs: CostBreakdown,
    pub proposal: Proposal,
    /// Clock-in man-hours against the job estimate.
    pub progress: Option<Progress>,
    /// Clock-in man-hours against the hours budgeted on labor rows.
    pub labor_budget_progress: Option<Progress>,
}
