#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Risk zone aggregation for the admin heatmap.
//!
//! Buckets every report point into a fixed square grid over the normalized
//! 0-100 map surface and counts points per occupied cell. The result is
//! recomputed from scratch on every call; nothing is cached between calls.
//!
//! Alongside the aggregation this crate carries the small pieces of the
//! dashboard that consume it: the report type filter, the opacity scaling
//! used to draw zones, and the headline statistics.

pub mod dashboard;
pub mod grid;
pub mod overlay;

use std::collections::BTreeMap;

use risk_map_report_models::Report;
use risk_map_zone_models::{GridCell, ZoneSummary};

pub use dashboard::{DEFAULT_RECENT_WINDOW_DAYS, ReportFilter, filter_reports, report_stats};
pub use grid::{DEFAULT_GRID_SIZE, GridSize};
pub use overlay::{max_intensity, overlay_zones, zone_opacity};

/// Errors raised while configuring an aggregation.
#[derive(Debug, thiserror::Error)]
pub enum ZoneError {
    /// Grid cell size was zero, negative or not a number.
    #[error("Invalid grid size {0}: must be a positive finite number")]
    InvalidGridSize(f64),

    /// Filter value was neither `all` nor a known report type.
    #[error("Unknown report filter: {0}")]
    UnknownFilter(String),
}

/// Aggregates report points into zones on the default 10-unit grid.
#[must_use]
pub fn compute_risk_zones(reports: &[Report]) -> Vec<ZoneSummary> {
    compute_risk_zones_with(reports, GridSize::default())
}

/// Aggregates report points into zones on the given grid.
///
/// Every point of every report adds exactly one to exactly one cell.
/// Points outside `[0, 100)` are bucketed with the same floor rule. Only
/// `points` are counted; `exact_location` never contributes.
///
/// Zones come back in ascending cell order, but callers should treat the
/// order as unspecified.
#[must_use]
pub fn compute_risk_zones_with(reports: &[Report], grid: GridSize) -> Vec<ZoneSummary> {
    let mut counts: BTreeMap<GridCell, u64> = BTreeMap::new();

    for report in reports {
        for point in &report.points {
            *counts.entry(grid.cell_of(point)).or_insert(0) += 1;
        }
    }

    log::debug!(
        "Aggregated {} reports into {} zones (grid size {})",
        reports.len(),
        counts.len(),
        grid.value()
    );

    counts
        .into_iter()
        .map(|(cell, intensity)| {
            let (origin_x, origin_y) = grid.origin_of(cell);
            ZoneSummary {
                origin_x,
                origin_y,
                size: grid.value(),
                intensity,
            }
        })
        .collect()
}
