//! Fixed square grid over the normalized map surface.

use risk_map_report_models::Point;
use risk_map_zone_models::GridCell;

use crate::ZoneError;

/// Default cell edge, in percent units. Gives a 10x10 grid over the map.
pub const DEFAULT_GRID_SIZE: f64 = 10.0;

/// Edge length of a grid cell, in percent units. Always positive and finite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridSize(f64);

impl GridSize {
    /// Creates a grid size.
    ///
    /// # Errors
    ///
    /// Returns [`ZoneError::InvalidGridSize`] if `size` is not a positive
    /// finite number.
    pub fn new(size: f64) -> Result<Self, ZoneError> {
        if size.is_finite() && size > 0.0 {
            Ok(Self(size))
        } else {
            Err(ZoneError::InvalidGridSize(size))
        }
    }

    /// Returns the cell edge length.
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Cell containing `point`. A point on a cell boundary belongs to the
    /// higher cell.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn cell_of(self, point: &Point) -> GridCell {
        GridCell::new(
            (point.x / self.0).floor() as i64,
            (point.y / self.0).floor() as i64,
        )
    }

    /// Top-left corner of `cell`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn origin_of(self, cell: GridCell) -> (f64, f64) {
        (cell.x as f64 * self.0, cell.y as f64 * self.0)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self(DEFAULT_GRID_SIZE)
    }
}
