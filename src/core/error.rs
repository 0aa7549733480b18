//! Error handling logic

use super::coord::Coord;
use thiserror::Error;

/// Error types for grid construction, circuit assembly and execution.
///
/// Every invalid input is reported through one of these variants; nothing
/// in the crate degrades to a partial grid or a partial sample set.
#[derive(Debug, Clone, PartialEq, Eq, Error)] // Eq useful for testing error variants
pub enum GridError {
    /// A coordinate lies outside the grid it was used with.
    #[error("Coordinate {coord} is outside the {rows}x{cols} grid")]
    OutOfBounds {
        /// The offending coordinate
        coord: Coord,
        /// Grid row count
        rows: usize,
        /// Grid column count
        cols: usize,
    },

    /// Grid dimensions that cannot be simulated (zero, or too many qubits).
    #[error("Invalid Dimensions: {message}")]
    InvalidDimensions {
        /// InvalidDimensions failure message
        message: String,
    },

    /// A caller-supplied coordinate map is not an injective cover of the grid.
    #[error("Invalid Coordinate Map: {message}")]
    InvalidCoordMap {
        /// InvalidCoordMap failure message
        message: String,
    },

    /// An operation is malformed (same control and target, non-finite fraction, ...).
    #[error("Invalid Operation: {message}")]
    InvalidOperation {
        /// InvalidOperation failure message
        message: String,
    },

    /// Sampling configuration rejected before execution.
    #[error("Invalid Configuration: {message}")]
    InvalidConfig {
        /// InvalidConfig failure message
        message: String,
    },

    /// The selected device has no executor available.
    #[error("Backend '{device}' unavailable: {message}")]
    BackendUnavailable {
        /// Device name as requested
        device: String,
        /// BackendUnavailable failure message
        message: String,
    },

    /// The executor accepted the job but failed to produce results.
    #[error("Execution on '{device}' failed: {message}")]
    ExecutionFailure {
        /// Device name as requested
        device: String,
        /// ExecutionFailure failure message
        message: String,
    },

    /// General error encountered during the simulation process itself.
    #[error("Simulation Process Error: {message}")]
    SimulationError {
        /// SimulationError failure message
        message: String,
    },
}
