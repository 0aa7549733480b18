// src/simulation/mod.rs

//! Executes circuits and samples measurement outcomes.
//!
//! Backends implement [`Executor`]: given a circuit and a register size they
//! run it `shots` independent times and report one basis-state index per
//! shot. The crate ships two executors built on the internal state-vector
//! `SimulationEngine`:
//!
//! * [`LocalSimulator`] - exact, ideal sampling.
//! * [`NoisySimulator`] - Monte-Carlo trajectories with gate and readout faults.
//!
//! Remote hardware or cloud simulators are external collaborators; callers
//! wrap their client in an `Executor` of their own.

mod results;
mod local;
mod noisy;
pub(crate) mod engine;

pub use results::SampleSet;
pub use local::LocalSimulator;
pub use noisy::NoisySimulator;

use crate::circuits::Circuit;
use crate::config::{Device, SamplingConfig};
use crate::core::GridError;
use rand::SeedableRng;
use rand::rngs::StdRng;

/// A backend capable of running a circuit repeatedly.
///
/// Implementations must treat every shot as an independent run of the whole
/// circuit from `|0...0>`, and must return exactly `shots` outcomes. Outcome
/// `k` encodes qubit `i` in bit `num_qubits - 1 - i`.
pub trait Executor: Send + Sync {
    /// Name used in logs and errors.
    fn name(&self) -> &str;

    /// Runs `circuit` on a `num_qubits` register `shots` times.
    fn execute(&self, circuit: &Circuit, num_qubits: usize, shots: usize) -> Result<Vec<usize>, GridError>;
}

/// Picks the bundled executor for a config.
///
/// Remote devices have no bundled client and yield
/// [`GridError::BackendUnavailable`].
pub fn executor_for(config: &SamplingConfig) -> Result<Box<dyn Executor>, GridError> {
    match &config.device {
        Device::Local if config.noisy && !config.noise.is_noiseless() => {
            log::debug!("Selected noisy local simulator ({:?})", config.noise);
            Ok(Box::new(NoisySimulator::new(config.noise, config.seed)?))
        }
        Device::Local => {
            if config.noisy {
                log::debug!("Noise model has zero rates, running ideally");
            }
            log::debug!("Selected ideal local simulator");
            Ok(Box::new(LocalSimulator::new(config.seed)))
        }
        Device::Remote(name) => {
            if config.noisy {
                log::warn!("Noise injection is ignored for remote device '{}'", name);
            }
            Err(GridError::BackendUnavailable {
                device: name.clone(),
                message: "no client is bundled for remote devices; supply an Executor".to_string(),
            })
        }
    }
}

/// Seeded RNG when a seed is given, OS entropy otherwise.
pub(crate) fn make_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NoiseModel;

    #[test]
    fn local_configs_pick_bundled_executors() -> Result<(), GridError> {
        let ideal = executor_for(&SamplingConfig::default())?;
        assert_eq!(ideal.name(), "local_simulator");

        let noisy = executor_for(&SamplingConfig::default().noisy(true))?;
        assert_eq!(noisy.name(), "noisy_local_simulator");
        Ok(())
    }

    #[test]
    fn zero_rate_noise_runs_ideally() -> Result<(), GridError> {
        let config = SamplingConfig::default().noisy(true).with_noise(NoiseModel::NOISELESS);
        assert!(config.noise.is_noiseless());
        assert!(!NoiseModel::default().is_noiseless());
        assert_eq!(executor_for(&config)?.name(), "local_simulator");
        Ok(())
    }

    #[test]
    fn remote_device_is_unavailable() {
        let config = SamplingConfig::default().on_device(Device::Remote("ibmqx5".to_string()));
        match executor_for(&config) {
            Err(GridError::BackendUnavailable { device, .. }) => assert_eq!(device, "ibmqx5"),
            Err(e) => panic!("Expected BackendUnavailable, got {e:?}"),
            Ok(_) => panic!("Expected BackendUnavailable, got an executor"),
        }
    }

    #[test]
    fn invalid_noise_model_is_rejected_at_selection() {
        let config = SamplingConfig::default()
            .noisy(true)
            .with_noise(NoiseModel { single_qubit_error: -1.0, ..NoiseModel::NOISELESS });
        assert!(executor_for(&config).is_err());
    }
}
