//! Error types for Seedbed.

use thiserror::Error;

/// Top-level error type for Seedbed operations.
///
/// Ordinary gardening failures (planting on an occupied plot, harvesting an
/// unripe plant) are not errors; the simulation reports those through its
/// return values. These variants cover malformed input at the edges.
#[derive(Debug, Error)]
pub enum SeedbedError {
    /// Species name not present in the catalog
    #[error("Unknown species: {0}")]
    UnknownSpecies(String),

    /// Plot coordinate outside the garden grid
    #[error("Plot ({x}, {y}) is outside the {width}x{height} garden")]
    OutOfBounds {
        /// X coordinate
        x: u32,
        /// Y coordinate
        y: u32,
        /// Garden width
        width: u32,
        /// Garden height
        height: u32,
    },

    /// Command text that could not be parsed
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Seedbed operations.
pub type SeedbedResult<T> = Result<T, SeedbedError>;
