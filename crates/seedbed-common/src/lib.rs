//! # Seedbed Common
//!
//! Common types and shared abstractions for Seedbed.
//!
//! This crate provides foundational types used across all Seedbed crates:
//! - Plot coordinates and grid indexing
//! - Common error types
//! - Prelude for convenient imports

#![warn(missing_docs)]
#![warn(clippy::all)]
#![deny(clippy::unwrap_used)]

pub mod coords;
pub mod error;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::coords::*;
    pub use crate::error::*;
}

pub use prelude::*;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plot_coord_index_roundtrip_on_grid() {
        let coord = PlotCoord::new(3, 2);
        let index = coord.to_index(5);

        assert_eq!(index, 13);
        assert_eq!(PlotCoord::from_index(index, 5), coord);
    }

    #[test]
    fn test_out_of_bounds_error_message() {
        let err = SeedbedError::OutOfBounds {
            x: 7,
            y: 1,
            width: 5,
            height: 5,
        };
        assert_eq!(err.to_string(), "Plot (7, 1) is outside the 5x5 garden");
    }
}
