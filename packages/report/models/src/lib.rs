#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Citizen incident report types.
//!
//! This crate defines the canonical in-memory shape of a submitted incident
//! report used across the risk-map system. Storage rows are decoded into
//! [`Report`] once at the storage boundary, so every consumer downstream
//! works with fully decoded points.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use strum_macros::{AsRefStr, Display};

/// Maximum number of points the report form lets a citizen place.
pub const MAX_REPORT_POINTS: usize = 3;

/// Neutral color used for any report type outside the known set.
pub const NEUTRAL_COLOR: &str = "#6b7280";

/// A position on the report map, as a percentage (0-100) of the map's
/// width and height.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position, percent of map width.
    pub x: f64,
    /// Vertical position, percent of map height.
    pub y: f64,
}

impl Point {
    /// Creates a new point from percentage coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates are finite numbers.
    #[must_use]
    pub const fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Kind of incident a citizen reported.
///
/// Tags are stored in lowercase Spanish, matching the report form values.
/// Anything outside the four known tags collapses to [`ReportType::Unknown`]
/// through [`ReportType::from_raw`]; strict parsing via [`FromStr`] accepts
/// only the four known tags and rejects `unknown` as well.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ReportType {
    /// Theft
    Robo,
    /// Assault or mugging
    Asalto,
    /// Harassment
    Acoso,
    /// Vandalism
    Vandalismo,
    /// Any tag the report form doesn't produce
    #[serde(other)]
    Unknown,
}

impl ReportType {
    /// Resolves a raw type tag to a report type. Never fails: unrecognized
    /// tags become [`ReportType::Unknown`].
    #[must_use]
    pub fn from_raw(raw: &str) -> Self {
        let lower = raw.trim().to_lowercase();
        lower.parse().unwrap_or(Self::Unknown)
    }

    /// Display color for markers and legend entries of this type.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Robo => "#ef4444",
            Self::Asalto => "#f97316",
            Self::Acoso => "#8b5cf6",
            Self::Vandalismo => "#eab308",
            Self::Unknown => NEUTRAL_COLOR,
        }
    }

    /// Legend label for this type.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Robo => "Robo",
            Self::Asalto => "Asalto",
            Self::Acoso => "Acoso",
            Self::Vandalismo => "Vandalismo",
            Self::Unknown => "Otro",
        }
    }

    /// Whether this is one of the four tags the report form produces.
    #[must_use]
    pub const fn is_known(self) -> bool {
        !matches!(self, Self::Unknown)
    }

    /// Returns the four known report types in legend order.
    #[must_use]
    pub const fn known() -> &'static [Self] {
        &[Self::Robo, Self::Asalto, Self::Acoso, Self::Vandalismo]
    }

    /// Returns all variants of this enum, including [`ReportType::Unknown`].
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Robo,
            Self::Asalto,
            Self::Acoso,
            Self::Vandalismo,
            Self::Unknown,
        ]
    }
}

impl FromStr for ReportType {
    type Err = strum::ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::known()
            .iter()
            .copied()
            .find(|ty| ty.as_ref() == s)
            .ok_or(strum::ParseError::VariantNotFound)
    }
}

/// Color for a raw type tag, falling back to [`NEUTRAL_COLOR`].
#[must_use]
pub fn type_color(raw: &str) -> &'static str {
    ReportType::from_raw(raw).color()
}

/// A citizen-submitted incident report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Storage primary key.
    pub id: i64,
    /// Kind of incident.
    #[serde(rename = "type")]
    pub report_type: ReportType,
    /// Points the citizen marked on the map, in placement order.
    pub points: Vec<Point>,
    /// Optional pin for the precise spot, independent of `points`.
    pub exact_location: Option<Point>,
    /// When the report was submitted.
    pub created_at: DateTime<Utc>,
    /// Free-text account of the incident.
    pub description: Option<String>,
    /// Incident date as entered on the form.
    pub incident_date: Option<String>,
    /// Incident time as entered on the form.
    pub incident_time: Option<String>,
    /// Witnesses, if any were named.
    pub witnesses: Option<String>,
    /// Extra details.
    pub additional_details: Option<String>,
    /// Items taken, for thefts.
    pub stolen_items: Option<String>,
    /// Approximate value involved.
    pub approximate_amount: Option<String>,
}

impl Report {
    /// Creates a report with only the fields the heatmap cares about set.
    #[must_use]
    pub const fn new(
        id: i64,
        report_type: ReportType,
        points: Vec<Point>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            report_type,
            points,
            exact_location: None,
            created_at,
            description: None,
            incident_date: None,
            incident_time: None,
            witnesses: None,
            additional_details: None,
            stolen_items: None,
            approximate_amount: None,
        }
    }

    /// Whether the points outline an area (exactly three points), which the
    /// admin map draws as a filled triangle instead of separate markers.
    #[must_use]
    pub fn outlines_area(&self) -> bool {
        self.points.len() == MAX_REPORT_POINTS
    }

    /// Display color for this report's type.
    #[must_use]
    pub const fn color(&self) -> &'static str {
        self.report_type.color()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_types_have_distinct_colors() {
        let known = ReportType::known();
        for (i, a) in known.iter().enumerate() {
            for b in &known[i + 1..] {
                assert_ne!(a.color(), b.color(), "{a:?} and {b:?} share a color");
            }
            assert_ne!(a.color(), NEUTRAL_COLOR);
        }
    }

    #[test]
    fn from_raw_is_total() {
        assert_eq!(ReportType::from_raw("robo"), ReportType::Robo);
        assert_eq!(ReportType::from_raw(" Acoso "), ReportType::Acoso);
        assert_eq!(ReportType::from_raw("incendio"), ReportType::Unknown);
        assert_eq!(ReportType::from_raw(""), ReportType::Unknown);
    }

    #[test]
    fn strict_parse_rejects_unrecognized_tags() {
        assert_eq!("asalto".parse::<ReportType>().ok(), Some(ReportType::Asalto));
        assert!("incendio".parse::<ReportType>().is_err());
        assert!("Robo".parse::<ReportType>().is_err());
        assert!("unknown".parse::<ReportType>().is_err());
        assert_eq!(ReportType::from_raw("unknown"), ReportType::Unknown);
    }

    #[test]
    fn only_form_tags_are_known() {
        assert!(ReportType::known().iter().all(|t| t.is_known()));
        assert!(!ReportType::Unknown.is_known());
        assert_eq!(ReportType::Unknown.to_string(), "unknown");
        assert_eq!(ReportType::Acoso.as_ref(), "acoso");
    }

    #[test]
    fn type_color_falls_back_to_neutral() {
        assert_eq!(type_color("robo"), "#ef4444");
        assert_eq!(type_color("vandalismo"), "#eab308");
        assert_eq!(type_color("otro"), NEUTRAL_COLOR);
    }

    #[test]
    fn unknown_tag_deserializes_to_unknown() {
        let ty: ReportType = serde_json::from_str("\"incendio\"").unwrap();
        assert_eq!(ty, ReportType::Unknown);
        let ty: ReportType = serde_json::from_str("\"acoso\"").unwrap();
        assert_eq!(ty, ReportType::Acoso);
    }

    #[test]
    fn three_points_outline_an_area() {
        let mut report = Report::new(
            1,
            ReportType::Robo,
            vec![Point::new(1.0, 1.0), Point::new(2.0, 2.0)],
            DateTime::<Utc>::UNIX_EPOCH,
        );
        assert!(!report.outlines_area());
        report.points.push(Point::new(3.0, 1.0));
        assert!(report.outlines_area());
    }
}
