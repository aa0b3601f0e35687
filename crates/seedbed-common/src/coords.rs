//! Plot coordinates within the garden grid.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of a plot in the garden grid (column `x`, row `y`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PlotCoord {
    /// Column, counted from the left edge
    pub x: u32,
    /// Row, counted from the top edge
    pub y: u32,
}

impl PlotCoord {
    /// Creates a new plot coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Converts to a row-major index for a grid of the given width.
    #[must_use]
    pub const fn to_index(self, width: u32) -> usize {
        (self.y as usize) * (width as usize) + (self.x as usize)
    }

    /// Creates from a row-major index.
    #[must_use]
    pub const fn from_index(index: usize, width: u32) -> Self {
        let width = width as usize;
        Self {
            x: (index % width) as u32,
            y: (index / width) as u32,
        }
    }

    /// Returns true if this coordinate lies inside a `width` x `height` grid.
    #[must_use]
    pub const fn is_within(self, width: u32, height: u32) -> bool {
        self.x < width && self.y < height
    }
}

impl fmt::Display for PlotCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl From<(u32, u32)> for PlotCoord {
    fn from((x, y): (u32, u32)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_within() {
        assert!(PlotCoord::new(0, 0).is_within(5, 5));
        assert!(PlotCoord::new(4, 4).is_within(5, 5));
        assert!(!PlotCoord::new(5, 0).is_within(5, 5));
        assert!(!PlotCoord::new(0, 5).is_within(5, 5));
    }

    #[test]
    fn test_from_index_walks_rows() {
        assert_eq!(PlotCoord::from_index(0, 4), PlotCoord::new(0, 0));
        assert_eq!(PlotCoord::from_index(3, 4), PlotCoord::new(3, 0));
        assert_eq!(PlotCoord::from_index(4, 4), PlotCoord::new(0, 1));
    }

    #[test]
    fn test_display() {
        assert_eq!(PlotCoord::new(2, 3).to_string(), "(2,3)");
    }
}
