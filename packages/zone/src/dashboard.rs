//! Report type filter and headline statistics for the admin dashboard.
//!
//! The heatmap is computed over the filtered report set, while the
//! statistics always describe every loaded report.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::{DateTime, Duration, Utc};
use risk_map_report_models::{Report, ReportType};
use risk_map_zone_models::{ReportStats, TypeCount};

use crate::ZoneError;

/// Length of the "this week" window, in days.
pub const DEFAULT_RECENT_WINDOW_DAYS: i64 = 7;

/// Which reports feed the heatmap.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFilter {
    /// Every report.
    #[default]
    All,
    /// Only reports of one type.
    Type(ReportType),
}

impl ReportFilter {
    /// Whether `report` passes this filter.
    #[must_use]
    pub fn matches(self, report: &Report) -> bool {
        match self {
            Self::All => true,
            Self::Type(ty) => report.report_type == ty,
        }
    }
}

impl FromStr for ReportFilter {
    type Err = ZoneError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        if lower == "all" {
            return Ok(Self::All);
        }
        match lower.parse::<ReportType>() {
            Ok(ty) if ty.is_known() => Ok(Self::Type(ty)),
            _ => Err(ZoneError::UnknownFilter(s.to_string())),
        }
    }
}

impl std::fmt::Display for ReportFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Type(ty) => write!(f, "{ty}"),
        }
    }
}

/// Reports that pass `filter`, in their original order.
#[must_use]
pub fn filter_reports(reports: &[Report], filter: ReportFilter) -> Vec<Report> {
    reports
        .iter()
        .filter(|r| filter.matches(r))
        .cloned()
        .collect()
}

/// Totals for the dashboard header.
///
/// A report counts toward `this_week` when it was created strictly after
/// `now - window`.
#[must_use]
pub fn report_stats(reports: &[Report], now: DateTime<Utc>, window: Duration) -> ReportStats {
    let cutoff = now - window;
    let mut by_type: BTreeMap<ReportType, u64> = BTreeMap::new();
    let mut this_week = 0;

    for report in reports {
        *by_type.entry(report.report_type).or_insert(0) += 1;
        if report.created_at > cutoff {
            this_week += 1;
        }
    }

    ReportStats {
        total: reports.len() as u64,
        this_week,
        by_type: by_type
            .into_iter()
            .map(|(report_type, count)| TypeCount { report_type, count })
            .collect(),
    }
}
