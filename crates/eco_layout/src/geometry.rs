//! Coordinates and axis-aligned cell extents.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point in layout space.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Coord {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

impl Coord {
    /// Creates a coordinate.
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Manhattan distance `|dx| + |dy|`, the displacement metric of the score.
pub fn hpwl(a: Coord, b: Coord) -> f64 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// An axis-aligned rectangle anchored at its lower-left corner.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Bottom edge.
    pub y: f64,
    /// Extent along x.
    pub width: f64,
    /// Extent along y.
    pub height: f64,
}

impl Rect {
    /// Creates a rectangle from its lower-left corner and size.
    pub fn new(origin: Coord, width: f64, height: f64) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            width,
            height,
        }
    }

    /// Lower-left corner.
    pub fn origin(&self) -> Coord {
        Coord::new(self.x, self.y)
    }

    /// Right edge.
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Top edge.
    pub fn top(&self) -> f64 {
        self.y + self.height
    }

    /// Open-interval intersection on both axes; shared edges do not overlap.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.y < other.top()
            && other.y < self.top()
            && self.x < other.right()
            && other.x < self.right()
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "x:{}~{} y:{}~{}",
            self.x,
            self.right(),
            self.y,
            self.top()
        )
    }
}
