// tests/grid_tests.rs

use qgrid::{
    Axis, Circuit, Coord, Device, Executor, GridError, GridRegister, NoiseModel, SampleSet, SamplingConfig,
};
use std::collections::{HashMap, HashSet};

// Helper for building coordinates
fn at(x: usize, y: usize) -> Coord {
    Coord::new(x, y)
}

fn seeded(shots: usize) -> SamplingConfig {
    SamplingConfig::new(shots).with_seed(0x5eed)
}

// Checks the structural guarantees every sample set must satisfy
fn check_shape(result: &SampleSet, shots: usize, cells: usize) {
    assert_eq!(result.shots(), shots);
    assert_eq!(result.samples().len(), shots);
    assert_eq!(result.counts().values().sum::<usize>(), shots, "counts must sum to shots");
    assert!(result.samples().iter().all(|s| s.len() == cells), "every sample covers every cell");
}

#[test]
fn test_fresh_grid_samples_all_zero() -> Result<(), GridError> {
    let grid = GridRegister::new(3, 2)?;
    let result = grid.get_samples(&seeded(64))?;

    check_shape(&result, 64, 6);
    assert_eq!(result.counts().len(), 1);
    assert_eq!(result.counts().get("000000"), Some(&64));
    Ok(())
}

#[test]
fn test_full_not_sets_exactly_one_cell() -> Result<(), GridError> {
    let mut grid = GridRegister::new(2, 2)?;
    grid.not(at(0, 0), 1.0, Axis::X)?;

    for shots in [1, 7, 300] {
        let result = grid.get_samples(&seeded(shots))?;
        check_shape(&result, shots, 4);
        assert!(result.samples().iter().all(|s| s == "1000"));
    }
    Ok(())
}

#[test]
fn test_not_on_other_cells() -> Result<(), GridError> {
    let mut grid = GridRegister::new(2, 3)?;
    grid.not_gate(at(2, 0))?;
    grid.not_gate(at(1, 1))?;

    let result = grid.get_samples(&seeded(20))?;
    assert_eq!(result.counts().get("001010"), Some(&20));
    assert_eq!(grid.render("001010")?, "001\n010\n");
    Ok(())
}

#[test]
fn test_two_half_turns_same_axis_flip() -> Result<(), GridError> {
    for axis in [Axis::X, Axis::Y] {
        let mut grid = GridRegister::new(1, 2)?;
        grid.not(at(1, 0), 0.5, axis)?;
        grid.not(at(1, 0), 0.5, axis)?;

        let result = grid.get_samples(&seeded(500))?;
        assert_eq!(result.counts().get("01"), Some(&500), "axis {axis}");
    }
    Ok(())
}

#[test]
fn test_half_x_then_half_y_is_random() -> Result<(), GridError> {
    let shots = 2000;
    let mut grid = GridRegister::new(1, 1)?;
    grid.not(at(0, 0), 0.5, Axis::X)?;
    grid.not(at(0, 0), 0.5, Axis::Y)?;

    let result = grid.get_samples(&seeded(shots))?;
    check_shape(&result, shots, 1);

    let ones = result.counts().get("1").copied().unwrap_or(0) as f64;
    let expected = shots as f64 / 2.0;
    let sigma = (shots as f64 * 0.25).sqrt();
    assert!((ones - expected).abs() < 3.0 * sigma, "ones = {ones}, expected ~{expected}");
    Ok(())
}

#[test]
fn test_half_x_then_half_y_stays_within_three_sigma_across_seeds() -> Result<(), GridError> {
    let mut grid = GridRegister::new(1, 1)?;
    grid.not(at(0, 0), 0.5, Axis::X)?;
    grid.not(at(0, 0), 0.5, Axis::Y)?;

    // 100 shots at p = 0.5: sigma = 5
    for seed in 0..200 {
        let result = grid.get_samples(&SamplingConfig::new(100).with_seed(seed))?;
        let ones = result.counts().get("1").copied().unwrap_or(0);
        assert!(ones.abs_diff(50) <= 15, "seed {seed}: {ones} ones in 100 shots");
    }
    Ok(())
}

#[test]
fn test_z_rotation_alone_changes_nothing() -> Result<(), GridError> {
    let mut grid = GridRegister::new(1, 1)?;
    grid.not(at(0, 0), 1.0, Axis::Z)?;
    let result = grid.get_samples(&seeded(50))?;
    assert_eq!(result.counts().get("0"), Some(&50));
    Ok(())
}

#[test]
fn test_cnot_with_set_control_flips_target() -> Result<(), GridError> {
    let mut grid = GridRegister::new(2, 2)?;
    grid.not_gate(at(0, 0))?;
    grid.cnot_gate(at(0, 0), at(1, 1))?;

    let result = grid.get_samples(&seeded(100))?;
    assert_eq!(result.counts().get("1001"), Some(&100));
    Ok(())
}

#[test]
fn test_cnot_with_clear_control_does_nothing() -> Result<(), GridError> {
    let mut grid = GridRegister::new(2, 2)?;
    grid.not_gate(at(1, 1))?;
    grid.cnot_gate(at(0, 0), at(1, 1))?;

    let result = grid.get_samples(&seeded(100))?;
    assert_eq!(result.counts().get("0001"), Some(&100));
    Ok(())
}

#[test]
fn test_cnot_copies_a_random_control() -> Result<(), GridError> {
    let mut grid = GridRegister::new(1, 2)?;
    grid.not(at(0, 0), 0.5, Axis::X)?;
    grid.cnot_gate(at(0, 0), at(1, 0))?;

    let result = grid.get_samples(&seeded(400))?;
    // Perfectly correlated: only 00 and 11 appear
    let seen: HashSet<&str> = result.counts().keys().map(String::as_str).collect();
    assert_eq!(seen, HashSet::from(["00", "11"]));
    assert_eq!(result.pair_disagreement(&grid.pairs())?, vec![0.0]);
    Ok(())
}

#[test]
fn test_fractional_cnot_gives_partial_correlation() -> Result<(), GridError> {
    let mut grid = GridRegister::new(1, 2)?;
    grid.not_gate(at(0, 0))?;
    grid.cnot(at(0, 0), at(1, 0), 0.5, Axis::X)?;

    let result = grid.get_samples(&seeded(2000))?;
    let probs = result.cell_probabilities();
    assert_eq!(probs[0], 1.0, "control stays set");
    assert!((probs[1] - 0.5).abs() < 0.05, "target is half flipped: {}", probs[1]);
    Ok(())
}

#[test]
fn test_sampling_does_not_consume_operations() -> Result<(), GridError> {
    let mut grid = GridRegister::new(2, 2)?;
    grid.not_gate(at(1, 0))?;
    let first = grid.get_samples(&seeded(10))?;
    let second = grid.get_samples(&seeded(10))?;

    assert_eq!(grid.circuit().len(), 1);
    assert_eq!(first, second);
    assert_eq!(first.counts().get("0100"), Some(&10));
    Ok(())
}

#[test]
fn test_neighbours_are_adjacent_and_in_bounds() -> Result<(), GridError> {
    for (rows, cols) in [(1, 1), (1, 4), (3, 1), (3, 4), (4, 4)] {
        let grid = GridRegister::new(rows, cols)?;
        for coord in grid.coords() {
            let neighbours = grid.neighbours(coord)?;
            assert!(neighbours.len() <= 4);
            for n in neighbours {
                assert!(n.x < cols && n.y < rows, "{n} escapes {rows}x{cols}");
                assert_eq!(coord.manhattan(&n), 1);
            }
        }
    }
    Ok(())
}

#[test]
fn test_address_is_a_bijection() -> Result<(), GridError> {
    let grid = GridRegister::new(3, 4)?;
    let addresses: HashSet<usize> =
        grid.coords().map(|c| grid.address(c.x, c.y)).collect::<Result<_, _>>()?;
    assert_eq!(addresses, (0..12).collect::<HashSet<usize>>());

    let map: HashMap<Coord, usize> = grid.coords().map(|c| (c, 20 - (c.y * 4 + c.x))).collect();
    let mapped = GridRegister::with_coord_map(3, 4, &map)?;
    let remapped: HashSet<usize> =
        mapped.coords().map(|c| mapped.address(c.x, c.y)).collect::<Result<_, _>>()?;
    assert_eq!(remapped.len(), 12);
    assert_eq!(mapped.address(0, 0)?, 20);
    Ok(())
}

#[test]
fn test_coord_map_placement_is_transparent_to_samples() -> Result<(), GridError> {
    // Cells placed on qubits 7, 3, 5, 0 of an 8-qubit device
    let map: HashMap<Coord, usize> =
        HashMap::from([(at(0, 0), 7), (at(1, 0), 3), (at(0, 1), 5), (at(1, 1), 0)]);
    let mut grid = GridRegister::with_coord_map(2, 2, &map)?;
    grid.not_gate(at(1, 0))?;
    grid.cnot_gate(at(1, 0), at(0, 1))?;

    let result = grid.get_samples(&seeded(30))?;
    check_shape(&result, 30, 4);
    assert_eq!(result.counts().get("0110"), Some(&30));
    Ok(())
}

#[test]
fn test_out_of_bounds_inputs_fail() -> Result<(), GridError> {
    let mut grid = GridRegister::new(2, 2)?;
    assert!(matches!(grid.address(2, 0), Err(GridError::OutOfBounds { .. })));
    assert!(matches!(grid.not(at(0, 2), 0.5, Axis::X), Err(GridError::OutOfBounds { .. })));
    assert!(matches!(grid.cnot_gate(at(5, 5), at(0, 0)), Err(GridError::OutOfBounds { .. })));
    assert!(matches!(grid.neighbours(at(9, 9)), Err(GridError::OutOfBounds { .. })));
    assert!(matches!(grid.not(at(0, 0), f64::INFINITY, Axis::X), Err(GridError::InvalidOperation { .. })));
    Ok(())
}

#[test]
fn test_zero_shots_is_rejected() -> Result<(), GridError> {
    let grid = GridRegister::new(1, 1)?;
    assert!(matches!(grid.get_samples(&SamplingConfig::new(0)), Err(GridError::InvalidConfig { .. })));
    Ok(())
}

#[test]
fn test_remote_device_without_client_is_unavailable() -> Result<(), GridError> {
    let grid = GridRegister::new(1, 1)?;
    let config = SamplingConfig::new(10).on_device("ibmqx5".parse()?);
    assert!(matches!(grid.get_samples(&config), Err(GridError::BackendUnavailable { .. })));
    Ok(())
}

#[test]
fn test_noisy_sampling_keeps_shape_and_signal() -> Result<(), GridError> {
    let mut grid = GridRegister::new(2, 2)?;
    grid.not_gate(at(0, 0))?;
    grid.cnot_gate(at(0, 0), at(1, 0))?;

    let config = seeded(1000).noisy(true);
    let result = grid.get_samples(&config)?;
    check_shape(&result, 1000, 4);
    assert_eq!(result.most_frequent().map(|(s, _)| s), Some("1100"));
    assert!(result.counts().len() > 1, "noise should produce more than one grid state");

    let noiseless = grid.get_samples(&seeded(1000).noisy(true).with_noise(NoiseModel::NOISELESS))?;
    assert_eq!(noiseless.counts().get("1100"), Some(&1000));
    Ok(())
}

// --- Custom executors standing in for remote backends ---

/// Returns a fixed list of outcomes regardless of the circuit.
struct ScriptedExecutor {
    outcomes: Vec<usize>,
}

impl Executor for ScriptedExecutor {
    fn name(&self) -> &str {
        "scripted"
    }

    fn execute(&self, _circuit: &Circuit, _num_qubits: usize, shots: usize) -> Result<Vec<usize>, GridError> {
        Ok(self.outcomes.iter().copied().cycle().take(shots).collect())
    }
}

/// Always fails, like an unreachable cloud service.
struct OfflineExecutor;

impl Executor for OfflineExecutor {
    fn name(&self) -> &str {
        "offline"
    }

    fn execute(&self, _circuit: &Circuit, _num_qubits: usize, _shots: usize) -> Result<Vec<usize>, GridError> {
        Err(GridError::ExecutionFailure { device: "offline".to_string(), message: "connection refused".to_string() })
    }
}

#[test]
fn test_custom_executor_outcomes_map_to_cells() -> Result<(), GridError> {
    let grid = GridRegister::new(1, 3)?;
    let executor = ScriptedExecutor { outcomes: vec![0b100, 0b011] };
    let result = grid.get_samples_with(&executor, 4)?;

    assert_eq!(result.samples(), ["100", "011", "100", "011"]);
    assert_eq!(result.counts().get("100"), Some(&2));
    Ok(())
}

#[test]
fn test_custom_executor_bad_outcomes_are_execution_failures() -> Result<(), GridError> {
    let grid = GridRegister::new(1, 2)?;
    let executor = ScriptedExecutor { outcomes: vec![0b111] };
    assert!(matches!(grid.get_samples_with(&executor, 3), Err(GridError::ExecutionFailure { .. })));
    Ok(())
}

#[test]
fn test_executor_errors_propagate() -> Result<(), GridError> {
    let grid = GridRegister::new(1, 2)?;
    match grid.get_samples_with(&OfflineExecutor, 3) {
        Err(GridError::ExecutionFailure { device, message }) => {
            assert_eq!(device, "offline");
            assert!(message.contains("connection refused"));
        }
        other => panic!("Expected ExecutionFailure, got {:?}", other),
    }
    Ok(())
}

#[test]
fn test_device_selection_from_config_names() -> Result<(), GridError> {
    assert_eq!("local_qasm_simulator".parse::<Device>()?, Device::Local);
    let grid = GridRegister::new(1, 1)?;
    let config = SamplingConfig::new(5).on_device("qasm_simulator".parse()?).with_seed(3);
    assert_eq!(grid.get_samples(&config)?.shots(), 5);
    Ok(())
}
