// src/simulation/local.rs

use super::engine::SimulationEngine;
use super::{Executor, make_rng};
use crate::circuits::Circuit;
use crate::core::GridError;
use crate::validation::check_normalization;

/// Ideal state-vector executor.
///
/// The circuit is evolved once per `execute` call and all shots are drawn
/// from the resulting Born distribution, which is equivalent to replaying
/// the circuit per shot when no noise is present.
#[derive(Debug, Clone, Default)]
pub struct LocalSimulator {
    seed: Option<u64>,
}

impl LocalSimulator {
    /// Creates a simulator; `seed` makes runs reproducible.
    pub fn new(seed: Option<u64>) -> Self {
        Self { seed }
    }
}

impl Executor for LocalSimulator {
    fn name(&self) -> &str {
        "local_simulator"
    }

    fn execute(&self, circuit: &Circuit, num_qubits: usize, shots: usize) -> Result<Vec<usize>, GridError> {
        let mut engine = SimulationEngine::init(num_qubits)?;
        for op in circuit.operations() {
            engine.apply_operation(op)?;
        }
        check_normalization(engine.state(), None)?;

        let mut rng = make_rng(self.seed);
        engine.sample(&mut rng, shots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuits::CircuitBuilder;
    use crate::core::QubitId;
    use crate::operations::Axis;

    #[test]
    fn seeded_runs_repeat() -> Result<(), GridError> {
        let circuit = CircuitBuilder::new()
            .rotate(QubitId(0), 0.5, Axis::X)
            .rotate(QubitId(1), 0.3, Axis::Y)
            .build();
        let sim = LocalSimulator::new(Some(42));
        assert_eq!(sim.execute(&circuit, 2, 64)?, sim.execute(&circuit, 2, 64)?);
        Ok(())
    }

    #[test]
    fn empty_circuit_samples_ground_state() -> Result<(), GridError> {
        let outcomes = LocalSimulator::default().execute(&Circuit::new(), 3, 10)?;
        assert_eq!(outcomes, vec![0; 10]);
        Ok(())
    }
}
