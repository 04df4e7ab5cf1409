#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Result types for the risk zone heatmap and the admin dashboard.
//!
//! These are serialized to JSON for the dashboard, so field names follow
//! the camelCase convention the frontend expects.

use risk_map_report_models::ReportType;
use serde::{Deserialize, Serialize};

/// RGB color used to fill every zone rectangle.
pub const ZONE_FILL_RGB: (u8, u8, u8) = (239, 68, 68);

/// Integer key of a grid cell: the floor-divided coordinates of any point
/// inside it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct GridCell {
    /// Column index.
    pub x: i64,
    /// Row index.
    pub y: i64,
}

impl GridCell {
    /// Creates a cell key from column and row indexes.
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// Incident count for one occupied grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneSummary {
    /// Left edge of the cell, percent of map width.
    pub origin_x: f64,
    /// Top edge of the cell, percent of map height.
    pub origin_y: f64,
    /// Cell edge length, percent. Only used for rendering.
    pub size: f64,
    /// Number of report points that fell in the cell.
    pub intensity: u64,
}

/// A zone ready to be drawn as a translucent rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ZoneOverlay {
    /// The aggregated zone.
    #[serde(flatten)]
    pub zone: ZoneSummary,
    /// Fill opacity in `[0.2, 0.8]`.
    pub opacity: f64,
}

impl ZoneOverlay {
    /// CSS `rgba()` fill for this zone.
    #[must_use]
    pub fn fill_css(&self) -> String {
        let (r, g, b) = ZONE_FILL_RGB;
        format!("rgba({r}, {g}, {b}, {})", self.opacity)
    }
}

/// Number of reports of a single type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeCount {
    /// Report type.
    #[serde(rename = "type")]
    pub report_type: ReportType,
    /// Number of reports.
    pub count: u64,
}

/// Headline numbers shown above the admin heatmap.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportStats {
    /// All loaded reports.
    pub total: u64,
    /// Reports submitted inside the recent window (a week by default).
    pub this_week: u64,
    /// Breakdown by report type, in [`ReportType`] order.
    pub by_type: Vec<TypeCount>,
}
