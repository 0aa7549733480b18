// src/core/coord.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell position on a grid: `x` is the column, `y` the row.
///
/// Row 0 is the top of the rendered grid, column 0 its left edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Coord {
    /// Column, `0 <= x < cols`.
    pub x: usize,
    /// Row, `0 <= y < rows`.
    pub y: usize,
}

impl Coord {
    /// Creates a coordinate from a column and a row.
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Manhattan distance between two cells.
    pub fn manhattan(&self, other: &Coord) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl From<(usize, usize)> for Coord {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
