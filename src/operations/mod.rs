// src/operations/mod.rs

//! Defines the operations a grid can accumulate: single-qubit rotations and
//! controlled rotations, each parameterised by a fraction of a half turn and
//! an axis.
//!
//! Operations are plain data. They only describe what should happen; the
//! simulators in `qgrid::simulation` decide how.

use crate::core::{GridError, QubitId, PI};
use num_complex::Complex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Rotation axis on the Bloch sphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Axis {
    /// Bit-flip axis. A full turn maps `|0>` to `|1>`.
    #[default]
    X,
    /// Flips like `X` but with a real-valued rotation matrix.
    Y,
    /// Phase axis. Never changes measurement statistics on its own.
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Axis::X => "X",
            Axis::Y => "Y",
            Axis::Z => "Z",
        };
        write!(f, "{symbol}")
    }
}

impl FromStr for Axis {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "x" => Ok(Axis::X),
            "y" => Ok(Axis::Y),
            "z" => Ok(Axis::Z),
            other => Err(GridError::InvalidOperation {
                message: format!("Unknown rotation axis '{other}' (expected x, y or z)"),
            }),
        }
    }
}

/// A 2x2 complex matrix acting on one qubit.
pub type Matrix2 = [[Complex<f64>; 2]; 2];

impl Axis {
    /// Matrix of a rotation by `theta` radians about this axis.
    ///
    /// `theta = PI` about `X` or `Y` is a full flip up to global phase;
    /// `theta = PI / 2` is a maximal-uncertainty half flip.
    pub fn rotation_matrix(self, theta: f64) -> Matrix2 {
        let half = theta / 2.0;
        let (sin, cos) = half.sin_cos();
        match self {
            Axis::X => [
                [Complex::new(cos, 0.0), Complex::new(0.0, -sin)],
                [Complex::new(0.0, -sin), Complex::new(cos, 0.0)],
            ],
            Axis::Y => [
                [Complex::new(cos, 0.0), Complex::new(-sin, 0.0)],
                [Complex::new(sin, 0.0), Complex::new(cos, 0.0)],
            ],
            Axis::Z => [
                [Complex::new(cos, -sin), Complex::new(0.0, 0.0)],
                [Complex::new(0.0, 0.0), Complex::new(cos, sin)],
            ],
        }
    }
}

/// A gate-like operation recorded on a circuit.
///
/// `frac` scales a half turn: the rotation angle is `frac * PI`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Operation {
    /// Rotation of a single qubit (the grid's `NOT`).
    Rotate {
        /// Qubit being rotated.
        target: QubitId,
        /// Fraction of a half turn.
        frac: f64,
        /// Rotation axis.
        axis: Axis,
    },

    /// Rotation of `target` conditioned on `control` being `1` (the grid's `CNOT`).
    ControlledRotate {
        /// Qubit whose value gates the rotation.
        control: QubitId,
        /// Qubit being rotated.
        target: QubitId,
        /// Fraction of a half turn.
        frac: f64,
        /// Rotation axis.
        axis: Axis,
    },
}

impl Operation {
    /// Returns every qubit named by the operation, control first.
    pub fn involved_qubits(&self) -> Vec<QubitId> {
        match self {
            Operation::Rotate { target, .. } => vec![*target],
            Operation::ControlledRotate { control, target, .. } => vec![*control, *target],
        }
    }

    /// Rotation angle in radians.
    pub fn theta(&self) -> f64 {
        match self {
            Operation::Rotate { frac, .. } | Operation::ControlledRotate { frac, .. } => frac * PI,
        }
    }

    /// Matrix applied to the target qubit (when the control, if any, is `1`).
    pub fn target_matrix(&self) -> Matrix2 {
        match self {
            Operation::Rotate { axis, .. } | Operation::ControlledRotate { axis, .. } => {
                axis.rotation_matrix(self.theta())
            }
        }
    }

    /// Checks the operation is well formed on its own.
    pub fn validate(&self) -> Result<(), GridError> {
        match self {
            Operation::Rotate { frac, .. } => check_frac(*frac),
            Operation::ControlledRotate { control, target, frac, .. } => {
                if control == target {
                    return Err(GridError::InvalidOperation {
                        message: format!("Control and target cannot be the same qubit ({control})"),
                    });
                }
                check_frac(*frac)
            }
        }
    }
}

fn check_frac(frac: f64) -> Result<(), GridError> {
    if frac.is_finite() {
        Ok(())
    } else {
        Err(GridError::InvalidOperation { message: format!("Rotation fraction must be finite, got {frac}") })
    }
}
