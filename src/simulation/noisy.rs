// src/simulation/noisy.rs

use super::engine::{Pauli, SimulationEngine};
use super::{Executor, make_rng};
use crate::circuits::Circuit;
use crate::config::NoiseModel;
use crate::core::GridError;
use crate::operations::Operation;
use rand::Rng;
use rand::rngs::StdRng;

/// Executor that injects faults from a [`NoiseModel`].
///
/// Every shot is its own trajectory: a fresh engine replays the circuit,
/// depolarizing faults are drawn after each operation, one outcome is
/// sampled and its bits pass through the readout channel.
#[derive(Debug, Clone)]
pub struct NoisySimulator {
    noise: NoiseModel,
    seed: Option<u64>,
}

impl NoisySimulator {
    /// Creates a noisy simulator, rejecting rates outside `[0, 1]`.
    pub fn new(noise: NoiseModel, seed: Option<u64>) -> Result<Self, GridError> {
        noise.validate()?;
        Ok(Self { noise, seed })
    }

    /// The noise model in use.
    pub fn noise(&self) -> &NoiseModel {
        &self.noise
    }

    fn depolarize(&self, engine: &mut SimulationEngine, rng: &mut StdRng, qubit: usize, p: f64) -> Result<(), GridError> {
        if p > 0.0 && rng.random_bool(p) {
            let pauli = Pauli::ALL[rng.random_range(0..Pauli::ALL.len())];
            engine.apply_pauli(qubit, pauli)?;
        }
        Ok(())
    }

    fn run_trajectory(&self, circuit: &Circuit, num_qubits: usize, rng: &mut StdRng) -> Result<usize, GridError> {
        let mut engine = SimulationEngine::init(num_qubits)?;
        for op in circuit.operations() {
            engine.apply_operation(op)?;
            match op {
                Operation::Rotate { target, .. } => {
                    self.depolarize(&mut engine, rng, target.index(), self.noise.single_qubit_error)?;
                }
                Operation::ControlledRotate { control, target, .. } => {
                    self.depolarize(&mut engine, rng, control.index(), self.noise.two_qubit_error)?;
                    self.depolarize(&mut engine, rng, target.index(), self.noise.two_qubit_error)?;
                }
            }
        }

        let mut outcome = engine
            .sample(rng, 1)?
            .pop()
            .ok_or_else(|| GridError::SimulationError { message: "Trajectory produced no outcome".to_string() })?;

        if self.noise.readout_error > 0.0 {
            for bit in 0..engine.num_qubits() {
                if rng.random_bool(self.noise.readout_error) {
                    outcome ^= 1 << bit;
                }
            }
        }
        Ok(outcome)
    }
}

impl Executor for NoisySimulator {
    fn name(&self) -> &str {
        "noisy_local_simulator"
    }

    fn execute(&self, circuit: &Circuit, num_qubits: usize, shots: usize) -> Result<Vec<usize>, GridError> {
        let mut rng = make_rng(self.seed);
        (0..shots).map(|_| self.run_trajectory(circuit, num_qubits, &mut rng)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::CircuitBuilder;
    use crate::core::QubitId;
    use crate::operations::Axis;

    #[test]
    fn noiseless_model_matches_ideal_flip() -> Result<(), GridError> {
        let circuit = CircuitBuilder::new().rotate(QubitId(0), 1.0, Axis::X).build();
        let sim = NoisySimulator::new(NoiseModel::NOISELESS, Some(1))?;
        // qubit 0 of 2 is the high bit
        assert_eq!(sim.execute(&circuit, 2, 20)?, vec![0b10; 20]);
        Ok(())
    }

    #[test]
    fn certain_readout_error_inverts_every_bit() -> Result<(), GridError> {
        let noise = NoiseModel { readout_error: 1.0, ..NoiseModel::NOISELESS };
        let sim = NoisySimulator::new(noise, Some(5))?;
        assert_eq!(sim.execute(&Circuit::new(), 3, 8)?, vec![0b111; 8]);
        Ok(())
    }

    #[test]
    fn default_noise_perturbs_some_shots() -> Result<(), GridError> {
        let circuit = CircuitBuilder::new()
            .rotate(QubitId(0), 1.0, Axis::X)
            .controlled_rotate(QubitId(0), QubitId(1), 1.0, Axis::X)
            .build();
        let sim = NoisySimulator::new(NoiseModel::default(), Some(2024))?;
        let outcomes = sim.execute(&circuit, 2, 2000)?;
        let ideal = outcomes.iter().filter(|k| **k == 0b11).count();
        // Ideal answer dominates, but faults leave a visible tail
        assert!(ideal > 1700, "ideal outcome count {ideal}");
        assert!(ideal < 2000, "no faults observed in 2000 shots");
        Ok(())
    }

    #[test]
    fn keeps_the_validated_model() -> Result<(), GridError> {
        let noise = NoiseModel { readout_error: 0.1, ..NoiseModel::NOISELESS };
        let sim = NoisySimulator::new(noise, None)?;
        assert_eq!(sim.noise(), &noise);
        Ok(())
    }

    #[test]
    fn rejects_invalid_rates() {
        let noise = NoiseModel { two_qubit_error: 1.2, ..NoiseModel::NOISELESS };
        assert!(NoisySimulator::new(noise, None).is_err());
    }
}
