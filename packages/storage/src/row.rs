//! Report rows as they come back from the reports query.
//!
//! The `points` and `exact_location` columns hold JSON text. Depending on
//! the driver and column type they arrive either already parsed or as the
//! raw encoded string, so both shapes are accepted here and decoded once.

use chrono::{DateTime, Utc};
use risk_map_report_models::{MAX_REPORT_POINTS, Point, Report, ReportType};
use serde::de::{DeserializeOwned, Error as _};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::StorageError;

/// A JSON column that may hold either the native value or its encoded
/// string form.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum JsonColumn<T> {
    /// Already-parsed value.
    Native(T),
    /// JSON text still to be parsed.
    Encoded(String),
}

impl<T: DeserializeOwned> JsonColumn<T> {
    /// Returns the parsed value, decoding the string form if needed.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Json`] if the encoded text is not valid JSON
    /// of the expected shape.
    pub fn decode(self) -> Result<T, StorageError> {
        match self {
            Self::Native(value) => Ok(value),
            Self::Encoded(text) => Ok(serde_json::from_str(&text)?),
        }
    }
}

impl<T: DeserializeOwned> JsonColumn<Option<T>> {
    /// Returns the parsed value of a nullable column. A blank encoded string
    /// or the encoded text `null` both mean no value.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Json`] if non-blank encoded text is not valid
    /// JSON of the expected shape.
    pub fn decode_nullable(self) -> Result<Option<T>, StorageError> {
        match self {
            Self::Encoded(text) if text.trim().is_empty() => Ok(None),
            other => other.decode(),
        }
    }
}

/// Reads a free-text column that some stores hand back as a number or
/// boolean, keeping its text form.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(other) => Err(D::Error::custom(format!(
            "expected a string or number, got {other}"
        ))),
    }
}

/// A row from the reports table.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportRow {
    /// Primary key.
    pub id: i64,
    /// Raw type tag.
    #[serde(rename = "type")]
    pub report_type: String,
    /// Free-text description.
    #[serde(default, deserialize_with = "lenient_string")]
    pub description: Option<String>,
    /// Incident date as entered.
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: Option<String>,
    /// Incident time as entered.
    #[serde(default, deserialize_with = "lenient_string")]
    pub time: Option<String>,
    /// Named witnesses.
    #[serde(default, deserialize_with = "lenient_string")]
    pub testigos: Option<String>,
    /// Extra details.
    #[serde(default, deserialize_with = "lenient_string")]
    pub detalles_adicionales: Option<String>,
    /// Stolen items.
    #[serde(default, deserialize_with = "lenient_string")]
    pub objetos_robados: Option<String>,
    /// Approximate amount involved.
    #[serde(default, deserialize_with = "lenient_string")]
    pub monto_aproximado: Option<String>,
    /// Marked points.
    pub points: JsonColumn<Vec<Point>>,
    /// Precise location pin.
    #[serde(default)]
    pub exact_location: Option<JsonColumn<Option<Point>>>,
    /// Submission time.
    pub created_at: DateTime<Utc>,
}

impl ReportRow {
    /// Decodes this row into a canonical [`Report`].
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Json`] if a JSON column can't be decoded, or
    /// [`StorageError::MalformedReport`] if the report has no points or a
    /// coordinate that isn't a finite number.
    pub fn into_report(self) -> Result<Report, StorageError> {
        let id = self.id;
        let points = self.points.decode()?;
        let exact_location = self
            .exact_location
            .map(JsonColumn::decode_nullable)
            .transpose()?
            .flatten();

        if points.is_empty() {
            return Err(StorageError::MalformedReport {
                id,
                reason: "no points".to_string(),
            });
        }
        if let Some(bad) = points
            .iter()
            .chain(exact_location.as_ref())
            .find(|p| !p.is_finite())
        {
            return Err(StorageError::MalformedReport {
                id,
                reason: format!("non-finite coordinate ({}, {})", bad.x, bad.y),
            });
        }
        if points.len() > MAX_REPORT_POINTS {
            log::warn!(
                "Report {id} has {} points (form allows {MAX_REPORT_POINTS}), keeping all",
                points.len()
            );
        }

        let report_type = ReportType::from_raw(&self.report_type);
        if !report_type.is_known() {
            log::debug!("Report {id} has unrecognized type {:?}", self.report_type);
        }

        Ok(Report {
            id,
            report_type,
            points,
            exact_location,
            created_at: self.created_at,
            description: self.description,
            incident_date: self.date,
            incident_time: self.time,
            witnesses: self.testigos,
            additional_details: self.detalles_adicionales,
            stolen_items: self.objetos_robados,
            approximate_amount: self.monto_aproximado,
        })
    }
}
