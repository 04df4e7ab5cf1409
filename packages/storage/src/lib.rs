#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Storage boundary for incident reports.
//!
//! Turns the JSON returned by the reports query (a bare array of rows or
//! the API's `{"success": .., "reports": [..]}` envelope) into canonical
//! [`Report`]s. Rows that can't be decoded are dropped and counted rather
//! than failing the whole load, so one bad row never blanks the heatmap.

pub mod row;

use std::path::Path;

use risk_map_report_models::Report;
use serde_json::Value;

pub use row::{JsonColumn, ReportRow};

/// Errors that can occur while loading reports.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Document was valid JSON but not a list of report rows.
    #[error("Unexpected document shape: {0}")]
    UnexpectedShape(String),

    /// A single report row failed validation.
    #[error("Malformed report {id}: {reason}")]
    MalformedReport {
        /// Report primary key.
        id: i64,
        /// What was wrong with it.
        reason: String,
    },
}

/// Reports decoded from one load, plus how many rows were dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadedReports {
    /// Successfully decoded reports, in document order.
    pub reports: Vec<Report>,
    /// Number of rows dropped as malformed.
    pub skipped: u64,
}

/// Decodes reports from a JSON document.
///
/// # Errors
///
/// Returns [`StorageError::Json`] if the document isn't JSON, or
/// [`StorageError::UnexpectedShape`] if it holds neither an array of rows
/// nor an object with a `reports` array. Individual bad rows are not errors.
pub fn load_reports(json: &str) -> Result<LoadedReports, StorageError> {
    let document: Value = serde_json::from_str(json)?;
    let rows = match document {
        Value::Array(rows) => rows,
        Value::Object(mut envelope) => match envelope.remove("reports") {
            Some(Value::Array(rows)) => rows,
            Some(other) => {
                return Err(StorageError::UnexpectedShape(format!(
                    "`reports` is {}, expected an array",
                    kind_of(&other)
                )));
            }
            None => {
                return Err(StorageError::UnexpectedShape(
                    "object has no `reports` field".to_string(),
                ));
            }
        },
        other => {
            return Err(StorageError::UnexpectedShape(format!(
                "top level is {}, expected an array or object",
                kind_of(&other)
            )));
        }
    };

    let mut loaded = LoadedReports {
        reports: Vec::with_capacity(rows.len()),
        skipped: 0,
    };

    for value in rows {
        let id = value.get("id").and_then(Value::as_i64);
        let decoded = serde_json::from_value::<ReportRow>(value)
            .map_err(StorageError::from)
            .and_then(ReportRow::into_report);

        match decoded {
            Ok(report) => loaded.reports.push(report),
            Err(e) => {
                match id {
                    Some(id) => log::warn!("Dropping report {id}: {e}"),
                    None => log::warn!("Dropping report without id: {e}"),
                }
                loaded.skipped += 1;
            }
        }
    }

    if loaded.skipped > 0 {
        log::warn!("aggregation skipped {} malformed reports", loaded.skipped);
    }
    log::info!("Loaded {} reports", loaded.reports.len());

    Ok(loaded)
}

/// Reads and decodes reports from a JSON file.
///
/// # Errors
///
/// Returns [`StorageError::Io`] if the file can't be read, otherwise the
/// same errors as [`load_reports`].
pub fn load_reports_from_path(path: &Path) -> Result<LoadedReports, StorageError> {
    log::debug!("Reading reports from {}", path.display());
    let json = std::fs::read_to_string(path)?;
    load_reports(&json)
}

const fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use risk_map_report_models::{Point, ReportType};

    use super::*;

    const ENVELOPE: &str = r#"{
        "success": true,
        "reports": [
            {
                "id": 1,
                "type": "robo",
                "description": "Me quitaron el celular",
                "points": "[{\"x\":5,\"y\":5},{\"x\":8,\"y\":8}]",
                "exact_location": null,
                "created_at": "2025-03-01T10:00:00Z"
            },
            {
                "id": 2,
                "type": "vandalismo",
                "points": [{"x": 5, "y": 92}],
                "exact_location": {"x": 5, "y": 93},
                "created_at": "2025-03-02T18:30:00Z"
            }
        ]
    }"#;

    #[test]
    fn loads_api_envelope() {
        let loaded = load_reports(ENVELOPE).unwrap();
        assert_eq!(loaded.skipped, 0);
        assert_eq!(loaded.reports.len(), 2);
        assert_eq!(loaded.reports[0].points.len(), 2);
        assert_eq!(loaded.reports[1].report_type, ReportType::Vandalismo);
        assert_eq!(loaded.reports[1].exact_location, Some(Point::new(5.0, 93.0)));
    }

    #[test]
    fn loads_bare_array() {
        let loaded = load_reports(
            r#"[{"id": 9, "type": "acoso", "points": [{"x": 1, "y": 2}], "created_at": "2025-01-01T00:00:00Z"}]"#,
        )
        .unwrap();
        assert_eq!(loaded.reports.len(), 1);
        assert_eq!(loaded.reports[0].id, 9);
    }

    #[test]
    fn malformed_rows_are_skipped_not_fatal() {
        let loaded = load_reports(
            r#"[
                {"id": 1, "type": "robo", "points": [{"x": 1, "y": 2}], "created_at": "2025-01-01T00:00:00Z"},
                {"id": 2, "type": "robo", "points": [], "created_at": "2025-01-01T00:00:00Z"},
                {"id": 3, "type": "robo", "points": "not json", "created_at": "2025-01-01T00:00:00Z"},
                {"id": 4, "type": "robo", "points": [{"x": 1}], "created_at": "2025-01-01T00:00:00Z"},
                {"type": "robo"},
                "garbage"
            ]"#,
        )
        .unwrap();
        assert_eq!(loaded.reports.len(), 1);
        assert_eq!(loaded.skipped, 5);
    }

    #[test]
    fn blank_encoded_locations_do_not_drop_reports() {
        let loaded = load_reports(
            r#"[
                {"id": 1, "type": "robo", "points": "[{\"x\":5,\"y\":5}]", "exact_location": "", "created_at": "2025-01-01T00:00:00Z"},
                {"id": 2, "type": "acoso", "points": [{"x": 5, "y": 92}], "exact_location": "null", "created_at": "2025-01-01T00:00:00Z"}
            ]"#,
        )
        .unwrap();
        assert_eq!(loaded.skipped, 0);
        assert_eq!(loaded.reports.len(), 2);
        assert!(loaded.reports.iter().all(|r| r.exact_location.is_none()));
    }

    #[test]
    fn empty_array_loads_nothing() {
        assert_eq!(load_reports("[]").unwrap(), LoadedReports::default());
    }

    #[test]
    fn rejects_unexpected_shapes() {
        assert!(matches!(
            load_reports("42"),
            Err(StorageError::UnexpectedShape(_))
        ));
        assert!(matches!(
            load_reports(r#"{"success": false}"#),
            Err(StorageError::UnexpectedShape(_))
        ));
        assert!(matches!(
            load_reports(r#"{"reports": "nope"}"#),
            Err(StorageError::UnexpectedShape(_))
        ));
        assert!(matches!(load_reports("{"), Err(StorageError::Json(_))));
    }
}
