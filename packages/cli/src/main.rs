#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! CLI for the admin risk zone heatmap.
//!
//! Reads a report export (the JSON returned by the all-reports query),
//! applies the dashboard's type filter and prints the zone overlay, the
//! report markers or the header statistics as JSON.

mod config;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use risk_map_report_models::{Point, Report, ReportType};
use risk_map_storage::load_reports_from_path;
use risk_map_zone::{
    GridSize, ReportFilter, ZoneError, compute_risk_zones_with, filter_reports, overlay_zones,
    report_stats,
};
use risk_map_zone_models::ZoneOverlay;
use serde::Serialize;

use crate::config::DashboardConfig;

#[derive(Parser)]
#[command(name = "risk_map", about = "Risk zone heatmap tool")]
struct Cli {
    /// TOML config file (defaults to `$RISK_MAP_CONFIG`)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Aggregate report points into heatmap zones
    Zones {
        /// Report export to read
        #[arg(long)]
        input: PathBuf,
        /// `all` or a report type (robo, asalto, acoso, vandalismo)
        #[arg(long, default_value = "all")]
        filter: String,
        /// Grid cell edge in percent units, overriding the config file
        #[arg(long)]
        grid_size: Option<f64>,
    },
    /// List the map markers for each report
    Markers {
        /// Report export to read
        #[arg(long)]
        input: PathBuf,
        /// `all` or a report type (robo, asalto, acoso, vandalismo)
        #[arg(long, default_value = "all")]
        filter: String,
    },
    /// Print total, recent and per-type report counts
    Stats {
        /// Report export to read
        #[arg(long)]
        input: PathBuf,
    },
    /// Print the report type color legend
    Legend,
}

/// A zone as printed, with its CSS fill.
#[derive(Debug, Serialize)]
struct ZoneOutput {
    #[serde(flatten)]
    overlay: ZoneOverlay,
    fill: String,
}

/// Everything the admin map needs to draw one report.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Marker {
    id: i64,
    #[serde(rename = "type")]
    report_type: ReportType,
    color: &'static str,
    points: Vec<Point>,
    exact_location: Option<Point>,
    outlines_area: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LegendEntry {
    #[serde(rename = "type")]
    report_type: ReportType,
    label: &'static str,
    color: &'static str,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();
    let cli = Cli::parse();
    let config = DashboardConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Zones {
            input,
            filter,
            grid_size,
        } => {
            let filter: ReportFilter = filter.parse()?;
            let grid = resolve_grid(grid_size, &config)?;
            let reports = load(&input)?;
            print_json(&zone_output(&reports, filter, grid))?;
        }
        Commands::Markers { input, filter } => {
            let filter: ReportFilter = filter.parse()?;
            let reports = load(&input)?;
            print_json(&markers(&reports, filter))?;
        }
        Commands::Stats { input } => {
            let window = chrono::Duration::try_days(config.recent_window_days)
                .ok_or("recent_window_days is out of range")?;
            let reports = load(&input)?;
            print_json(&report_stats(&reports, chrono::Utc::now(), window))?;
        }
        Commands::Legend => print_json(&legend())?,
    }

    Ok(())
}

fn load(input: &Path) -> Result<Vec<Report>, Box<dyn std::error::Error>> {
    Ok(load_reports_from_path(input)?.reports)
}

fn print_json<T: Serialize>(value: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// The `--grid-size` flag wins over the config file.
fn resolve_grid(flag: Option<f64>, config: &DashboardConfig) -> Result<GridSize, ZoneError> {
    GridSize::new(flag.unwrap_or(config.grid_size))
}

fn zone_output(reports: &[Report], filter: ReportFilter, grid: GridSize) -> Vec<ZoneOutput> {
    let filtered = filter_reports(reports, filter);
    log::info!(
        "{} of {} reports match filter '{filter}'",
        filtered.len(),
        reports.len()
    );

    let zones = compute_risk_zones_with(&filtered, grid);
    log::info!("{} risk zones", zones.len());

    overlay_zones(&zones)
        .into_iter()
        .map(|overlay| ZoneOutput {
            fill: overlay.fill_css(),
            overlay,
        })
        .collect()
}

fn markers(reports: &[Report], filter: ReportFilter) -> Vec<Marker> {
    reports
        .iter()
        .filter(|r| filter.matches(r))
        .map(|r| Marker {
            id: r.id,
            report_type: r.report_type,
            color: r.color(),
            points: r.points.clone(),
            exact_location: r.exact_location,
            outlines_area: r.outlines_area(),
        })
        .collect()
}

fn legend() -> Vec<LegendEntry> {
    ReportType::all()
        .iter()
        .map(|&report_type| LegendEntry {
            report_type,
            label: report_type.label(),
            color: report_type.color(),
        })
        .collect()
}
