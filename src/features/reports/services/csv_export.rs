use chrono::{DateTime, Utc};

use crate::core::error::{AppError, Result};
use crate::features::reports::models::Report;

/// Column headers of the export, in order
const CSV_HEADERS: [&str; 13] = [
    "ID",
    "Address",
    "Latitude",
    "Longitude",
    "Timestamp",
    "Reported By",
    "Description",
    "Upvotes",
    "Danger Score",
    "Danger Level",
    "Road Type",
    "Status",
    "Assigned Worker",
];

/// Serialize the full report collection to CSV.
///
/// Fixed 13-column layout; quoting follows standard CSV rules (fields
/// containing commas, quotes, or newlines are double-quote escaped).
pub fn export_reports_csv(reports: &[Report]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(CSV_HEADERS)
        .map_err(|e| AppError::Internal(format!("CSV write failed: {}", e)))?;

    for report in reports {
        writer
            .write_record([
                report.id.clone(),
                report.location.address.clone(),
                report.location.lat.to_string(),
                report.location.lng.to_string(),
                report.created_at.to_rfc3339(),
                report.reporter.name.clone(),
                report.description.clone(),
                report.upvotes.to_string(),
                report.danger_score.to_string(),
                report.danger_level.to_string(),
                report.road_type.to_string(),
                report.status.to_string(),
                report.worker.clone().unwrap_or_else(|| "N/A".to_string()),
            ])
            .map_err(|e| AppError::Internal(format!("CSV write failed: {}", e)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("CSV flush failed: {}", e)))?;

    String::from_utf8(bytes).map_err(|e| AppError::Internal(format!("CSV encoding failed: {}", e)))
}

/// Timestamped download file name, e.g. `fixfirst_reports_2026-08-06.csv`
pub fn export_file_name(date: DateTime<Utc>) -> String {
    format!("fixfirst_reports_{}.csv", date.format("%Y-%m-%d"))
}
