// src/core/state.rs

use num_complex::Complex;
use num_traits::{One, Zero};
use std::fmt;

/// Amplitudes of an `n`-qubit register over the `2^n` computational basis states.
///
/// Basis index `k` encodes qubit `i` in bit `n - 1 - i` (see [`basis_bit`]).
#[derive(Debug, Clone, PartialEq)] // Avoid Eq for floating-point complex numbers
pub struct StateVector {
    amplitudes: Vec<Complex<f64>>,
    num_qubits: usize,
}

impl StateVector {
    /// Wraps an amplitude vector. The length must be `2^num_qubits`; the
    /// engine guarantees this for every state it builds.
    pub(crate) fn new(amplitudes: Vec<Complex<f64>>, num_qubits: usize) -> Self {
        debug_assert_eq!(amplitudes.len(), 1usize << num_qubits);
        Self { amplitudes, num_qubits }
    }

    /// The all-zero state `|0...0>`.
    pub(crate) fn zero_state(num_qubits: usize) -> Self {
        let mut amplitudes = vec![Complex::zero(); 1usize << num_qubits];
        amplitudes[0] = Complex::one();
        Self { amplitudes, num_qubits }
    }

    /// Provides read-only access to the amplitudes.
    pub fn vector(&self) -> &[Complex<f64>] {
        &self.amplitudes
    }

    pub(crate) fn vector_mut(&mut self) -> &mut [Complex<f64>] {
        &mut self.amplitudes
    }

    /// Number of basis states (`2^n`).
    pub fn dim(&self) -> usize {
        self.amplitudes.len()
    }

    /// Number of qubits the vector describes.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Born-rule probabilities `|c_k|^2` for every basis state.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|c| c.norm_sqr()).collect()
    }

    /// Marginal probability of measuring `1` on `qubit`.
    pub fn probability_of_one(&self, qubit: usize) -> f64 {
        self.amplitudes
            .iter()
            .enumerate()
            .filter(|(k, _)| basis_bit(*k, qubit, self.num_qubits) == 1)
            .map(|(_, c)| c.norm_sqr())
            .sum()
    }
}

/// Value of `qubit`'s bit inside basis index `k` of an `num_qubits` register.
pub fn basis_bit(k: usize, qubit: usize, num_qubits: usize) -> u8 {
    ((k >> (num_qubits - 1 - qubit)) & 1) as u8
}

impl fmt::Display for StateVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "State[")?;
        for (i, c) in self.amplitudes.iter().enumerate() {
            write!(f, "{}{:.4}", if i > 0 { ", " } else { "" }, c)?;
        }
        write!(f, "]")
    }
}
