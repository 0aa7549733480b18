// src/validation/mod.rs

//! Validation helpers for simulator states and probability parameters.

use crate::core::{GridError, StateVector};

// Default tolerance values (can be overridden by caller)
const DEFAULT_NORM_TOLERANCE: f64 = 1e-9;

/// Checks if the state vector is normalized (sum of squared amplitudes ≈ 1.0).
///
/// # Arguments
/// * `state` - The `StateVector` to check.
/// * `tolerance` - Allowed deviation from 1.0. Defaults to `1e-9`.
///
/// # Returns
/// * `Ok(())` if normalized within tolerance.
/// * `Err(GridError::SimulationError)` if normalization fails.
pub fn check_normalization(state: &StateVector, tolerance: Option<f64>) -> Result<(), GridError> {
    let effective_tolerance = tolerance.unwrap_or(DEFAULT_NORM_TOLERANCE);
    let norm_sq: f64 = state.vector().iter().map(|c| c.norm_sqr()).sum();
    if (norm_sq - 1.0).abs() > effective_tolerance {
        Err(GridError::SimulationError {
            message: format!(
                "State vector normalization failed. Sum(|c_i|^2) = {} (Deviation > {})",
                norm_sq, effective_tolerance
            ),
        })
    } else {
        Ok(())
    }
}

/// Checks that `value` is a probability in `[0, 1]`.
///
/// `name` is used in the error message to point at the offending parameter.
pub fn check_probability(name: &str, value: f64) -> Result<(), GridError> {
    if value.is_finite() && (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(GridError::InvalidConfig {
            message: format!("{} must be a probability in [0, 1], got {}", name, value),
        })
    }
}

/// Checks that a sampled set of outcomes is consistent with the register it
/// came from: one outcome per shot, each a valid basis index.
pub fn check_outcomes(outcomes: &[usize], shots: usize, num_qubits: usize) -> Result<(), GridError> {
    if outcomes.len() != shots {
        return Err(GridError::SimulationError {
            message: format!("Expected {} outcomes, executor returned {}", shots, outcomes.len()),
        });
    }
    let dim = 1usize << num_qubits;
    if let Some(bad) = outcomes.iter().find(|k| **k >= dim) {
        return Err(GridError::SimulationError {
            message: format!("Outcome {} is not a basis state of a {}-qubit register", bad, num_qubits),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_complex::Complex;

    #[test]
    fn normalized_state_passes() {
        let state = StateVector::zero_state(2);
        assert!(check_normalization(&state, None).is_ok());
    }

    #[test]
    fn unnormalized_state_fails() {
        let state = StateVector::new(vec![Complex::new(1.0, 0.0), Complex::new(1.0, 0.0)], 1);
        assert!(matches!(check_normalization(&state, None), Err(GridError::SimulationError { .. })));
    }

    #[test]
    fn probability_bounds() {
        assert!(check_probability("p", 0.0).is_ok());
        assert!(check_probability("p", 1.0).is_ok());
        assert!(check_probability("p", -0.1).is_err());
        assert!(check_probability("p", 1.5).is_err());
        assert!(check_probability("p", f64::NAN).is_err());
    }

    #[test]
    fn outcome_checks() {
        assert!(check_outcomes(&[0, 3, 1], 3, 2).is_ok());
        assert!(check_outcomes(&[0, 3], 3, 2).is_err());
        assert!(check_outcomes(&[0, 4, 1], 3, 2).is_err());
    }
}
