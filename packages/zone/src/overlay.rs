//! Opacity scaling for drawing zones over the map.
//!
//! Zones are drawn as red rectangles whose opacity grows linearly with
//! their share of the busiest zone's intensity.

use risk_map_zone_models::{ZoneOverlay, ZoneSummary};

/// Opacity of a zone with (close to) no incidents.
pub const MIN_OPACITY: f64 = 0.2;

/// Opacity added on top of [`MIN_OPACITY`] for the busiest zone.
pub const OPACITY_RANGE: f64 = 0.6;

/// Highest intensity among `zones`, never less than 1.
#[must_use]
pub fn max_intensity(zones: &[ZoneSummary]) -> u64 {
    zones.iter().map(|z| z.intensity).max().unwrap_or(1).max(1)
}

/// Fill opacity for a zone of `intensity` when the busiest zone has `max`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn zone_opacity(intensity: u64, max: u64) -> f64 {
    let ratio = intensity as f64 / max.max(1) as f64;
    ratio.mul_add(OPACITY_RANGE, MIN_OPACITY)
}

/// Pairs every zone with its fill opacity.
#[must_use]
pub fn overlay_zones(zones: &[ZoneSummary]) -> Vec<ZoneOverlay> {
    let max = max_intensity(zones);
    zones
        .iter()
        .map(|&zone| ZoneOverlay {
            zone,
            opacity: zone_opacity(zone.intensity, max),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zone(intensity: u64) -> ZoneSummary {
        ZoneSummary {
            origin_x: 0.0,
            origin_y: 0.0,
            size: 10.0,
            intensity,
        }
    }

    #[test]
    fn max_intensity_floors_at_one() {
        assert_eq!(max_intensity(&[]), 1);
        assert_eq!(max_intensity(&[zone(0)]), 1);
        assert_eq!(max_intensity(&[zone(3), zone(7), zone(2)]), 7);
    }

    #[test]
    fn opacity_scales_linearly() {
        assert!((zone_opacity(4, 4) - 0.8).abs() < 1e-9);
        assert!((zone_opacity(2, 4) - 0.5).abs() < 1e-9);
        assert!((zone_opacity(0, 0) - 0.2).abs() < 1e-9);
    }

    #[test]
    fn busiest_zone_is_most_opaque() {
        let overlays = overlay_zones(&[zone(1), zone(5)]);
        assert!((overlays[1].opacity - 0.8).abs() < 1e-9);
        assert!(overlays[0].opacity < overlays[1].opacity);
    }

    #[test]
    fn empty_zones_give_empty_overlay() {
        assert!(overlay_zones(&[]).is_empty());
    }
}
