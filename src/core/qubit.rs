// src/core/qubit.rs

use serde::{Deserialize, Serialize};
use std::fmt;

/// Index of one qubit inside a simulated register.
///
/// Qubit `0` is the most significant bit of a basis-state index, so a
/// register of `n` qubits in basis state `k` has qubit `i` set when
/// `(k >> (n - 1 - i)) & 1 == 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct QubitId(pub usize);

impl QubitId {
    /// Gets the raw register index.
    pub fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for QubitId {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for QubitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "q[{}]", self.0)
    }
}
