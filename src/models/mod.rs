//! Domain records read from and written to the job store, plus the
//! report bundle assembled from them.

pub mod category;
pub mod component;
pub mod financial_row;
pub mod job;
pub mod job_report;
pub mod material;
pub mod session;
pub mod time_entry;

pub use category::Category;
pub use component::{Component, User};
pub use financial_row::{FinancialRow, FinancialRowInput, FinancialRowPatch};
pub use job::{Job, LaborPricing};
pub use job_report::JobReport;
pub use material::{MaterialItem, NewMaterialItem, WorkbookStatus};
pub use session::{Role, Session};
pub use time_entry::{CrewSelection, TimeEntry};
