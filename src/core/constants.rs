//! Constants shared across the grid, the simulators and the sampling config.

/// Numeric limits and defaults for grid registers.
pub mod grid_constants {
    /// Rotation angles are `frac * PI`.
    pub const PI: f64 = std::f64::consts::PI;
    /// Largest register the state-vector simulator will allocate (2^24 amplitudes).
    pub const MAX_QUBITS: usize = 24;
    /// Shot count used when a config does not name one.
    pub const DEFAULT_SHOTS: usize = 1024;
    /// Amplitudes with squared norm below this are treated as zero.
    pub const AMPLITUDE_TOLERANCE: f64 = 1e-12;
}
