// src/export/json_csv.rs

use crate::errors::AppResult;
use crate::export::{ProposalLineExport, notify_export_success};
use crate::ui::messages::info;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Pretty-printed JSON of any serializable report.
pub(crate) fn export_json<T: Serialize>(data: &T, path: &Path) -> AppResult<()> {
    info(format!("Exporting to JSON: {}", path.display()));

    let json_data = serde_json::to_string_pretty(data)?;
    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;

    notify_export_success("JSON", path);
    Ok(())
}

/// CSV with a fixed header row, written even when there are no lines.
pub(crate) fn export_csv(lines: &[ProposalLineExport], path: &Path) -> AppResult<()> {
    info(format!("Exporting to CSV: {}", path.display()));

    let mut wtr = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    wtr.write_record(ProposalLineExport::HEADERS)?;
    for line in lines {
        wtr.serialize(line)?;
    }
    wtr.flush()?;

    notify_export_success("CSV", path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[test]
    fn empty_csv_still_has_a_header() {
        let path = env::temp_dir().join("rjobcost_empty_lines.csv");
        export_csv(&[], &path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.trim_end(), "section,label,category,cost,price,tax,total");
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn header_matches_serialized_fields() {
        let path = env::temp_dir().join("rjobcost_one_line.csv");
        let line = ProposalLineExport {
            section: "row",
            label: "Permit".into(),
            category: "other",
            cost: 150.0,
            price: 150.0,
            tax: 10.5,
            total: 160.5,
        };
        export_csv(&[line], &path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("section,label,category,cost,price,tax,total"));
        assert_eq!(lines.next(), Some("row,Permit,other,150.0,150.0,10.5,160.5"));
        let _ = fs::remove_file(&path);
    }
}
