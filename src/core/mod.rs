// src/core/mod.rs

//! Core data structures and types

// Declare modules within core
pub mod error;
pub mod qubit;
pub mod coord;
pub mod state;

// Re-export public types for convenient access via `qgrid::core::TypeName`
pub use error::GridError;
pub use qubit::QubitId;
pub use coord::Coord;
pub use state::{StateVector, basis_bit};

pub mod constants;
pub use constants::grid_constants::{DEFAULT_SHOTS, MAX_QUBITS, PI};
