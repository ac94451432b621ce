/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Profit colour:
/// \>0 → green
/// \<0 → red
/// 0 → reset
pub fn color_for_amount(value: f64) -> &'static str {
    if value > 0.0 {
        GREEN
    } else if value < 0.0 {
        RED
    } else {
        RESET
    }
}

/// Progress colour: red once the budget is exceeded, yellow from 90%.
pub fn color_for_progress(percent: f64, over_budget: bool) -> &'static str {
    if over_budget {
        RED
    } else if percent >= 90.0 {
        YELLOW
    } else {
        GREEN
    }
}
