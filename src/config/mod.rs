// src/config/mod.rs

//! Sampling configuration: how many shots, on which device, with or
//! without noise.
//!
//! All types here are plain data with serde support, so a config can be
//! kept in a JSON (or any serde format) file next to an experiment:
//!
//! ```
//! use qgrid::{Device, SamplingConfig};
//!
//! let config: SamplingConfig = serde_json::from_str(
//!     r#"{ "shots": 200, "device": "local_qasm_simulator", "noisy": true }"#,
//! ).unwrap();
//! assert_eq!(config.shots, 200);
//! assert_eq!(config.device, Device::Local);
//! assert!(config.noisy);
//! ```

use crate::core::{DEFAULT_SHOTS, GridError};
use crate::validation::check_probability;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Names accepted for the bundled state-vector simulator.
const LOCAL_DEVICE_NAMES: [&str; 4] = ["local", "local_qasm_simulator", "qasm_simulator", "simulator"];

/// Execution backend selector.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Device {
    /// The crate's own state-vector simulator.
    #[default]
    Local,
    /// A named remote device or cloud simulator. No client is bundled; run
    /// these through [`crate::GridRegister::get_samples_with`].
    Remote(String),
}

impl Device {
    /// Returns `true` for the bundled simulator.
    pub fn is_local(&self) -> bool {
        matches!(self, Device::Local)
    }

    /// Name used in logs and errors.
    pub fn name(&self) -> &str {
        match self {
            Device::Local => "local",
            Device::Remote(name) => name,
        }
    }
}

impl FromStr for Device {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        if name.is_empty() {
            return Err(GridError::InvalidConfig { message: "Device name cannot be empty".to_string() });
        }
        if LOCAL_DEVICE_NAMES.iter().any(|local| local.eq_ignore_ascii_case(name)) {
            Ok(Device::Local)
        } else {
            Ok(Device::Remote(name.to_string()))
        }
    }
}

impl TryFrom<String> for Device {
    type Error = GridError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Device> for String {
    fn from(device: Device) -> Self {
        device.name().to_string()
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Error rates for the noisy simulator.
///
/// Gate errors are depolarizing: when one fires, a uniformly random Pauli
/// (X, Y or Z) hits the affected qubit. Readout errors flip a measured bit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NoiseModel {
    /// Probability of a fault after each single-qubit rotation.
    pub single_qubit_error: f64,
    /// Probability, per involved qubit, of a fault after each controlled rotation.
    pub two_qubit_error: f64,
    /// Probability of flipping each measured bit.
    pub readout_error: f64,
}

impl NoiseModel {
    /// A model that never injects a fault.
    pub const NOISELESS: Self = Self { single_qubit_error: 0.0, two_qubit_error: 0.0, readout_error: 0.0 };

    /// Checks every rate is a probability.
    pub fn validate(&self) -> Result<(), GridError> {
        check_probability("single_qubit_error", self.single_qubit_error)?;
        check_probability("two_qubit_error", self.two_qubit_error)?;
        check_probability("readout_error", self.readout_error)
    }

    /// Returns `true` if no fault can ever fire.
    pub fn is_noiseless(&self) -> bool {
        self.single_qubit_error == 0.0 && self.two_qubit_error == 0.0 && self.readout_error == 0.0
    }
}

impl Default for NoiseModel {
    /// Rates in the range of early superconducting cloud devices.
    fn default() -> Self {
        Self { single_qubit_error: 0.01, two_qubit_error: 0.03, readout_error: 0.02 }
    }
}

/// Parameters of one `get_samples` call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Number of independent shots. Must be positive.
    pub shots: usize,
    /// Backend to execute on.
    pub device: Device,
    /// Inject the noise model instead of running ideally.
    pub noisy: bool,
    /// Seed for reproducible sampling; fresh OS entropy when `None`.
    pub seed: Option<u64>,
    /// Error rates used when `noisy` is set.
    pub noise: NoiseModel,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            shots: DEFAULT_SHOTS,
            device: Device::Local,
            noisy: false,
            seed: None,
            noise: NoiseModel::default(),
        }
    }
}

impl SamplingConfig {
    /// Default config with the given shot count.
    pub fn new(shots: usize) -> Self {
        Self { shots, ..Self::default() }
    }

    /// Sets the shot count.
    pub fn with_shots(mut self, shots: usize) -> Self {
        self.shots = shots;
        self
    }

    /// Selects the device.
    pub fn on_device(mut self, device: Device) -> Self {
        self.device = device;
        self
    }

    /// Turns noise injection on or off.
    pub fn noisy(mut self, noisy: bool) -> Self {
        self.noisy = noisy;
        self
    }

    /// Fixes the sampling seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Replaces the noise model.
    pub fn with_noise(mut self, noise: NoiseModel) -> Self {
        self.noise = noise;
        self
    }

    /// Rejects zero shots and out-of-range noise rates.
    pub fn validate(&self) -> Result<(), GridError> {
        if self.shots == 0 {
            return Err(GridError::InvalidConfig { message: "shots must be a positive integer".to_string() });
        }
        self.noise.validate()
    }
}
