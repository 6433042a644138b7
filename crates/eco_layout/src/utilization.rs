//! Bin utilization of the placement area.
//!
//! The bounding box of the placement rows is cut into a grid of equal bins.
//! A bin's utilization is the cell area falling inside it divided by the bin
//! area, so a fully covered bin reads `1.0`. A cell straddling bins adds to
//! each bin only the part it covers; area outside the row box is dropped.
//!
//! Maps are taken of the starting layout and after every legal round, which
//! shows where an ECO run packs cells together.

use crate::cell::CellRegistry;
use crate::die::DieBoundary;
use crate::geometry::Rect;
use crate::layout::Layout;
use serde::Serialize;
use std::fmt;
use std::ops::Range;

/// Number of bins along each axis. Both counts are at least one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct BinCount {
    x: usize,
    y: usize,
}

impl BinCount {
    /// Returns `None` if either count is zero.
    pub fn new(x: usize, y: usize) -> Option<Self> {
        (x > 0 && y > 0).then_some(Self { x, y })
    }

    /// Bins along x.
    pub fn x(&self) -> usize {
        self.x
    }

    /// Bins along y.
    pub fn y(&self) -> usize {
        self.y
    }
}

impl fmt::Display for BinCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.x, self.y)
    }
}

/// Bin utilization at one point of the evaluation.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct UtilizationMap {
    /// `0` for the starting layout, otherwise the 1-based round just applied.
    pub round: usize,
    /// The binned area: the bounding box of the placement rows.
    pub bounds: Rect,
    /// Utilization per bin, `bins[row][column]`, bottom row first.
    pub bins: Vec<Vec<f64>>,
    /// Total cell area over die area.
    pub die_usage: f64,
}

impl UtilizationMap {
    /// Measures every live cell of `layout` on a `count` grid.
    pub fn measure(layout: &Layout, count: BinCount, round: usize) -> Self {
        let bounds = layout.grid().bounds();
        let mut map = Self {
            round,
            bounds,
            bins: vec![vec![0.0; count.x]; count.y],
            die_usage: die_usage(layout.die(), layout.cells()),
        };
        map.splat(layout.cells(), count);
        log::debug!(
            "utilization after round {round}: peak {:.3}, mean {:.3}, die {:.3}",
            map.peak(),
            map.mean(),
            map.die_usage
        );
        map
    }

    fn splat(&mut self, cells: &CellRegistry, count: BinCount) {
        let step_x = self.bounds.width / count.x as f64;
        let step_y = self.bounds.height / count.y as f64;
        let bin_area = step_x * step_y;
        if bin_area.is_nan() || bin_area <= 0.0 {
            return;
        }

        for (_, cell) in cells.iter() {
            let rect = cell.rect();
            let origin = self.bounds.origin();
            let columns = bin_range(rect.x - origin.x, rect.right() - origin.x, step_x, count.x);
            let rows = bin_range(rect.y - origin.y, rect.top() - origin.y, step_y, count.y);
            for j in rows {
                let low = self.bounds.y + j as f64 * step_y;
                let span_y = covered(rect.y, rect.top(), low, low + step_y);
                for i in columns.clone() {
                    let left = self.bounds.x + i as f64 * step_x;
                    let span_x = covered(rect.x, rect.right(), left, left + step_x);
                    self.bins[j][i] += span_x * span_y / bin_area;
                }
            }
        }
    }

    /// Utilization of the bin at `column`, `row`.
    pub fn get(&self, column: usize, row: usize) -> Option<f64> {
        self.bins.get(row).and_then(|r| r.get(column)).copied()
    }

    /// The fullest bin.
    pub fn peak(&self) -> f64 {
        self.values().fold(0.0, f64::max)
    }

    /// Average over all bins.
    pub fn mean(&self) -> f64 {
        let count = self.values().count();
        if count == 0 {
            return 0.0;
        }
        self.values().sum::<f64>() / count as f64
    }

    fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.bins.iter().flatten().copied()
    }
}

/// Bin indices touched by the interval `[start, end)`, measured from the
/// grid origin, clamped to `0..count`.
fn bin_range(start: f64, end: f64, step: f64, count: usize) -> Range<usize> {
    let low = (start / step).floor();
    let high = (end / step).ceil();
    // Float-to-int `as` saturates, so far-out cells cannot wrap.
    let low = (low as i64).max(0) as usize;
    let high = (high as i64).clamp(0, count as i64) as usize;
    low.min(high)..high
}

/// Length of `[a0, a1]` inside `[b0, b1]`.
fn covered(a0: f64, a1: f64, b0: f64, b1: f64) -> f64 {
    (a1.min(b1) - a0.max(b0)).max(0.0)
}

fn die_usage(die: &DieBoundary, cells: &CellRegistry) -> f64 {
    let die_area = (die.right_x - die.left_x) * (die.high_y - die.low_y);
    if die_area.is_nan() || die_area <= 0.0 {
        return 0.0;
    }
    let cell_area: f64 = cells
        .iter()
        .map(|(_, c)| c.width() * c.height())
        .sum();
    cell_area / die_area
}
