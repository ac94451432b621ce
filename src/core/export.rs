use crate::core::logic::Core;
use crate::db::log::audit_or_warn;
use crate::db::store::JobStore;
use crate::errors::AppResult;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::{ExportFormat, ProposalLineExport};
use crate::ui::messages::warning;
use std::path::Path;

pub struct ExportLogic;

impl ExportLogic {
    /// Write a job to `file`.
    ///
    /// - `json`: the whole report (time groupings, costs, proposal, progress)
    /// - `csv`: the proposal lines
    ///
    /// `file` must be absolute; an existing file is replaced only with
    /// `force` or after confirmation.
    pub fn export<S: JobStore + ?Sized>(
        store: &mut S,
        job_id: i64,
        markup_percent: f64,
        format: ExportFormat,
        file: &str,
        force: bool,
    ) -> AppResult<()> {
        let path = Path::new(file);
        ensure_writable(path, force)?;

        let report = Core::build_job_report(&*store, job_id, markup_percent)?;

        match format {
            ExportFormat::Json => export_json(&report, path)?,
            ExportFormat::Csv => {
                if report.proposal.lines.is_empty() {
                    warning("No proposal lines for this job; writing the header only.");
                }
                let lines: Vec<ProposalLineExport> =
                    report.proposal.lines.iter().map(ProposalLineExport::from).collect();
                export_csv(&lines, path)?
            }
        }

        audit_or_warn(
            store,
            "export",
            &format!("job {}", job_id),
            &format!("{} written to {}", format.as_str(), path.display()),
        );

        Ok(())
    }
}
