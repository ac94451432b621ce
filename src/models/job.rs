use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Job {
    pub id: i64,
    pub name: String,
    /// Man-hour budget; `None` or `0` means no progress figure.
    pub estimated_hours: Option<f64>,
}

/// Per-job labor rate. Billable and hourly rate are kept equal: labor is
/// never marked up.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LaborPricing {
    pub job_id: i64,
    pub hourly_rate: f64,
    pub billable_rate: f64,
}

impl LaborPricing {
    pub fn at_rate(job_id: i64, hourly_rate: f64) -> Self {
        Self {
            job_id,
            hourly_rate,
            billable_rate: hourly_rate,
        }
    }
}
