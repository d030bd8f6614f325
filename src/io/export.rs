//! Export computed reports to JSON and CSV.
//!
//! The JSON report is the portable representation of a run (schema:
//! `domain::ReportFile`). The CSV holds one end-to-end row per amount and is meant
//! for spreadsheets or downstream scripts.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::Utc;

use crate::app::pipeline::ReportRun;
use crate::domain::ReportFile;
use crate::error::AppError;

/// Build the serializable report document for a run.
pub fn report_file(run: &ReportRun) -> ReportFile {
    ReportFile {
        tool: "checkout".to_string(),
        generated_at: Utc::now(),
        max_attempts: run.max_attempts,
        confirm: run.confirm.clone(),
        rows: run.rows.clone(),
    }
}

/// Write a report JSON file.
pub fn write_report_json(path: &Path, run: &ReportRun) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create report JSON '{}': {e}", path.display())))?;

    serde_json::to_writer_pretty(file, &report_file(run))
        .map_err(|e| AppError::io(format!("Failed to write report JSON: {e}")))?;

    Ok(())
}

/// Read a report JSON file.
pub fn read_report_json(path: &Path) -> Result<ReportFile, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::io(format!("Failed to open report JSON '{}': {e}", path.display())))?;
    let report: ReportFile =
        serde_json::from_reader(file).map_err(|e| AppError::io(format!("Invalid report JSON: {e}")))?;
    Ok(report)
}

/// Write end-to-end rows to a CSV file.
pub fn write_end_to_end_csv(path: &Path, run: &ReportRun) -> Result<(), AppError> {
    let mut file = File::create(path)
        .map_err(|e| AppError::io(format!("Failed to create export CSV '{}': {e}", path.display())))?;

    writeln!(
        file,
        "amount,max_attempts,success,create_fraud,confirm_fraud,create_retry_exhaust,confirm_retry_exhaust"
    )
    .map_err(|e| AppError::io(format!("Failed to write export CSV header: {e}")))?;

    for row in &run.rows {
        let e = &row.end_to_end;
        writeln!(
            file,
            "{},{},{:.10},{:.10},{:.10},{:.10},{:.10}",
            row.amount,
            run.max_attempts,
            e.success,
            e.create_fraud,
            e.confirm_fraud,
            e.create_retry_exhaust,
            e.confirm_retry_exhaust,
        )
        .map_err(|e| AppError::io(format!("Failed to write export CSV row: {e}")))?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::pipeline::run_report;
    use crate::domain::ReportConfig;
    use crate::error::ErrorKind;

    #[test]
    fn json_report_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let run = run_report(&ReportConfig::default()).unwrap();

        write_report_json(&path, &run).unwrap();
        let back = read_report_json(&path).unwrap();

        assert_eq!(back.tool, "checkout");
        assert_eq!(back.max_attempts, 3);
        assert_eq!(back.rows.len(), run.rows.len());
        assert_eq!(back.rows[0].amount, 100.0);
        assert!((back.rows[0].end_to_end.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn csv_has_header_and_one_row_per_amount() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("e2e.csv");
        let config = ReportConfig {
            price_points: vec![100.0, 7_500.0],
            ..ReportConfig::default()
        };
        let run = run_report(&config).unwrap();

        write_end_to_end_csv(&path, &run).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("amount,max_attempts,success"));
        assert!(lines[1].starts_with("100,3,"));
        assert!(lines[2].starts_with("7500,3,"));
    }

    #[test]
    fn missing_report_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_report_json(&dir.path().join("nope.json")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
