//! Die boundary and the placement-row grid.
//!
//! Rows are sorted by ascending y on construction and must share one site
//! height, which lets [`RowGrid::span`] map a vertical extent to a row range
//! with a single division instead of a search.

use crate::error::EvalError;
use crate::geometry::{Coord, Rect};
use crate::ids::RowId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// The rectangle every cell must stay within.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DieBoundary {
    /// Left edge.
    pub left_x: f64,
    /// Bottom edge.
    pub low_y: f64,
    /// Right edge.
    pub right_x: f64,
    /// Top edge.
    pub high_y: f64,
}

impl DieBoundary {
    /// Creates a boundary from its lower-left and upper-right corners.
    pub fn new(left_x: f64, low_y: f64, right_x: f64, high_y: f64) -> Self {
        Self {
            left_x,
            low_y,
            right_x,
            high_y,
        }
    }

    /// Closed containment: an extent touching the boundary is inside.
    pub fn contains(&self, rect: &Rect) -> bool {
        rect.x >= self.left_x
            && rect.right() <= self.right_x
            && rect.y >= self.low_y
            && rect.top() <= self.high_y
    }
}

impl fmt::Display for DieBoundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {})-({}, {})",
            self.left_x, self.low_y, self.right_x, self.high_y
        )
    }
}

/// One horizontal strip of placement sites.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PlacementRow {
    /// Lower-left corner of the first site.
    pub origin: Coord,
    /// Width of one site.
    pub site_width: f64,
    /// Height of one site (the row height).
    pub site_height: f64,
    /// Number of sites in the row.
    pub site_count: u32,
}

/// The sorted set of placement rows with uniform height.
#[derive(Clone, Debug)]
pub struct RowGrid {
    rows: Vec<PlacementRow>,
    base_y: f64,
    row_height: f64,
}

impl RowGrid {
    /// Sorts `rows` by y and checks they can be indexed arithmetically.
    pub fn new(mut rows: Vec<PlacementRow>) -> Result<Self, EvalError> {
        let Some(first) = rows.first().copied() else {
            return Err(EvalError::InvalidRows(
                "the layout defines no placement rows".to_string(),
            ));
        };
        if first.site_height.is_nan() || first.site_height <= 0.0 {
            return Err(EvalError::InvalidRows(format!(
                "row height must be positive, got {}",
                first.site_height
            )));
        }
        if let Some(odd) = rows.iter().find(|r| r.site_height != first.site_height) {
            return Err(EvalError::InvalidRows(format!(
                "rows must share one site height: found {} and {} (row at y={})",
                first.site_height, odd.site_height, odd.origin.y
            )));
        }

        rows.sort_by(|a, b| a.origin.y.total_cmp(&b.origin.y));
        let base_y = rows[0].origin.y;
        Ok(Self {
            rows,
            base_y,
            row_height: first.site_height,
        })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the grid has no rows. [`RowGrid::new`] rejects empty row sets,
    /// so a constructed grid is never empty.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The rows in ascending y order.
    pub fn rows(&self) -> &[PlacementRow] {
        &self.rows
    }

    /// Common site height of all rows.
    pub fn row_height(&self) -> f64 {
        self.row_height
    }

    /// Row indices whose strip the vertical extent of `rect` reaches, clamped
    /// to the existing rows. Empty when the extent lies wholly outside them.
    pub fn span(&self, rect: &Rect) -> Range<usize> {
        let low = ((rect.y - self.base_y) / self.row_height).floor();
        let high = ((rect.top() - self.base_y) / self.row_height).ceil();
        // Float-to-int `as` saturates, so far-out extents cannot wrap.
        let low = (low as i64).max(0) as usize;
        let high = (high as i64).clamp(0, self.rows.len() as i64) as usize;
        low.min(high)..high
    }

    /// Smallest rectangle covering every row's sites.
    pub fn bounds(&self) -> Rect {
        let left = self.rows.iter().map(|r| r.origin.x).fold(f64::INFINITY, f64::min);
        let right = self
            .rows
            .iter()
            .map(|r| r.origin.x + r.site_width * f64::from(r.site_count))
            .fold(f64::NEG_INFINITY, f64::max);
        let top = self.base_y + self.row_height * self.rows.len() as f64;
        Rect::new(Coord::new(left, self.base_y), right - left, top - self.base_y)
    }

    /// Returns the row whose start y equals `y` exactly.
    pub fn row_starting_at(&self, y: f64) -> Option<RowId> {
        self.rows
            .binary_search_by(|r| r.origin.y.total_cmp(&y))
            .ok()
            .map(|i| RowId::from_raw(i as u32))
    }
}
