//! Clocked man-hours against an hours budget.

use serde::Serialize;

/// Shown percentage is capped at 100; the over-budget flag uses the true
/// ratio.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Progress {
    pub clocked_man_hours: f64,
    pub budget_hours: f64,
    pub percent: f64,
    pub is_over_budget: bool,
}

/// `None` when there is no usable budget (absent, zero, negative or not a
/// number).
pub fn compute_progress(clocked_man_hours: f64, budget_hours: Option<f64>) -> Option<Progress> {
    let budget = budget_hours.filter(|b| b.is_finite() && *b > 0.0)?;
    let percent = (clocked_man_hours / budget * 100.0).min(100.0);
    Some(Progress {
        clocked_man_hours,
        budget_hours: budget,
        percent,
        is_over_budget: clocked_man_hours > budget,
    })
}
