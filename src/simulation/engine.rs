// src/simulation/engine.rs
use crate::core::{GridError, MAX_QUBITS, StateVector};
use crate::core::constants::grid_constants::AMPLITUDE_TOLERANCE;
use crate::operations::{Matrix2, Operation};
use num_complex::Complex;
use num_traits::{One, Zero};
use rand::Rng;

/// Single-qubit Pauli errors injected by the noisy simulator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Pauli {
    X,
    Y,
    Z,
}

impl Pauli {
    pub(crate) const ALL: [Pauli; 3] = [Pauli::X, Pauli::Y, Pauli::Z];

    fn matrix(self) -> Matrix2 {
        let (o, z, i) = (Complex::one(), Complex::zero(), Complex::i());
        match self {
            Pauli::X => [[z, o], [o, z]],
            Pauli::Y => [[z, -i], [i, z]],
            Pauli::Z => [[o, z], [z, -o]],
        }
    }
}

/// Exact state-vector simulation of an `n`-qubit register.
///
/// Holds `2^n` amplitudes and applies operations to them in place. A fresh
/// engine always starts in `|0...0>`.
pub(crate) struct SimulationEngine {
    state: StateVector,
    num_qubits: usize,
}

impl SimulationEngine {
    /// Initializes the engine with `num_qubits` qubits in `|0...0>`.
    pub(crate) fn init(num_qubits: usize) -> Result<Self, GridError> {
        if num_qubits == 0 {
            return Err(GridError::InvalidDimensions {
                message: "Cannot initialize simulation engine with zero qubits".to_string(),
            });
        }
        if num_qubits > MAX_QUBITS {
            return Err(GridError::InvalidDimensions {
                message: format!("{} qubits exceeds the simulator limit of {}", num_qubits, MAX_QUBITS),
            });
        }
        Ok(Self { state: StateVector::zero_state(num_qubits), num_qubits })
    }

    // Test hook for preparing arbitrary states
    #[cfg(test)]
    pub(crate) fn set_state(&mut self, state: StateVector) -> Result<(), GridError> {
        if state.dim() != self.state.dim() {
            Err(GridError::SimulationError {
                message: format!(
                    "Cannot set state: provided dimension {} does not match engine dimension {}",
                    state.dim(),
                    self.state.dim()
                ),
            })
        } else {
            self.state = state;
            Ok(())
        }
    }

    pub(crate) fn state(&self) -> &StateVector {
        &self.state
    }

    pub(crate) fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// Applies one operation to the state.
    pub(crate) fn apply_operation(&mut self, op: &Operation) -> Result<(), GridError> {
        op.validate()?;
        match op {
            Operation::Rotate { target, .. } => {
                let target = self.check_qubit(target.index())?;
                self.apply_single_qubit_gate(target, &op.target_matrix());
            }
            Operation::ControlledRotate { control, target, .. } => {
                let control = self.check_qubit(control.index())?;
                let target = self.check_qubit(target.index())?;
                self.apply_controlled_gate(control, target, &op.target_matrix());
            }
        }
        Ok(())
    }

    /// Applies a Pauli error to `qubit`.
    pub(crate) fn apply_pauli(&mut self, qubit: usize, pauli: Pauli) -> Result<(), GridError> {
        let qubit = self.check_qubit(qubit)?;
        self.apply_single_qubit_gate(qubit, &pauli.matrix());
        Ok(())
    }

    /// Draws `shots` basis-state outcomes from the Born distribution.
    ///
    /// The state is left untouched, so repeated calls sample the same
    /// distribution.
    pub(crate) fn sample<R: Rng>(&self, rng: &mut R, shots: usize) -> Result<Vec<usize>, GridError> {
        let mut cumulative = Vec::with_capacity(self.state.dim());
        let mut total = 0.0;
        for c in self.state.vector() {
            let p = c.norm_sqr();
            if p > AMPLITUDE_TOLERANCE {
                total += p;
            }
            cumulative.push(total);
        }
        if total < AMPLITUDE_TOLERANCE {
            return Err(GridError::SimulationError {
                message: "Cannot sample a state with negligible norm".to_string(),
            });
        }

        let last = cumulative.len() - 1;
        let outcomes = (0..shots)
            .map(|_| {
                let p_sample: f64 = rng.random::<f64>() * total;
                cumulative.partition_point(|c| *c <= p_sample).min(last)
            })
            .collect();
        Ok(outcomes)
    }

    fn check_qubit(&self, qubit: usize) -> Result<usize, GridError> {
        if qubit < self.num_qubits {
            Ok(qubit)
        } else {
            Err(GridError::InvalidOperation {
                message: format!("Qubit {} not present in a {}-qubit register", qubit, self.num_qubits),
            })
        }
    }

    /// Applies a 2x2 matrix to one qubit of the global state.
    fn apply_single_qubit_gate(&mut self, target: usize, matrix: &Matrix2) {
        let mask = 1usize << (self.num_qubits - 1 - target);
        let amplitudes = self.state.vector_mut();

        // Visit each pair of basis states differing only at the target bit
        for i0 in 0..amplitudes.len() {
            if i0 & mask != 0 {
                continue;
            }
            let i1 = i0 | mask;
            let (psi_0, psi_1) = (amplitudes[i0], amplitudes[i1]);
            amplitudes[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            amplitudes[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
    }

    /// Applies `matrix` to `target` on the subspace where `control` is `1`.
    ///
    /// Equivalent to the 4x4 block matrix `diag(I, U)` in the
    /// `|control, target>` basis.
    fn apply_controlled_gate(&mut self, control: usize, target: usize, matrix: &Matrix2) {
        let control_mask = 1usize << (self.num_qubits - 1 - control);
        let target_mask = 1usize << (self.num_qubits - 1 - target);
        let amplitudes = self.state.vector_mut();

        for i0 in 0..amplitudes.len() {
            if i0 & control_mask == 0 || i0 & target_mask != 0 {
                continue;
            }
            let i1 = i0 | target_mask;
            let (psi_0, psi_1) = (amplitudes[i0], amplitudes[i1]);
            amplitudes[i0] = matrix[0][0] * psi_0 + matrix[0][1] * psi_1;
            amplitudes[i1] = matrix[1][0] * psi_0 + matrix[1][1] * psi_1;
        }
    }
}
