// src/grid/mod.rs

//! A 2D grid of cells backed one-to-one by qubits.
//!
//! `GridRegister` translates grid coordinates into qubit indices, records
//! rotations and controlled rotations as a [`Circuit`], and samples the grid
//! by replaying that circuit on an [`Executor`]. Recording is cheap and pure;
//! execution happens only in [`GridRegister::get_samples`].

use crate::circuits::Circuit;
use crate::config::SamplingConfig;
use crate::core::{Coord, GridError, MAX_QUBITS, QubitId, basis_bit};
use crate::operations::{Axis, Operation};
use crate::simulation::{Executor, SampleSet, executor_for};
use crate::validation::check_outcomes;
use std::collections::{HashMap, HashSet};

/// A `rows x cols` grid of qubits with an accumulated operation list.
#[derive(Debug, Clone)]
pub struct GridRegister {
    rows: usize,
    cols: usize,
    /// Qubit index of every cell, row-major.
    addresses: Vec<usize>,
    /// Size of the simulated register (highest address + 1).
    num_qubits: usize,
    circuit: Circuit,
}

impl GridRegister {
    /// Creates a grid whose cells map row-major onto qubits `0..rows*cols`.
    ///
    /// All cells start in state `0`.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        check_dimensions(rows, cols)?;
        let addresses: Vec<usize> = (0..rows * cols).collect();
        Self::from_addresses(rows, cols, addresses)
    }

    /// Creates a grid with a caller-supplied placement of cells on qubits.
    ///
    /// `coord_map` must cover every cell exactly once, name only cells inside
    /// the grid, and send distinct cells to distinct qubits. Qubit indices may
    /// leave gaps (placement on a subset of a larger device); unused qubits
    /// are simulated and stay in `|0>`.
    pub fn with_coord_map(rows: usize, cols: usize, coord_map: &HashMap<Coord, usize>) -> Result<Self, GridError> {
        check_dimensions(rows, cols)?;

        if let Some(outside) = coord_map.keys().find(|c| c.x >= cols || c.y >= rows) {
            return Err(GridError::InvalidCoordMap {
                message: format!("{} is outside the {}x{} grid", outside, rows, cols),
            });
        }

        let mut addresses = Vec::with_capacity(rows * cols);
        let mut seen = HashSet::with_capacity(rows * cols);
        for y in 0..rows {
            for x in 0..cols {
                let coord = Coord::new(x, y);
                let index = *coord_map.get(&coord).ok_or_else(|| GridError::InvalidCoordMap {
                    message: format!("{} has no qubit assigned", coord),
                })?;
                if !seen.insert(index) {
                    return Err(GridError::InvalidCoordMap {
                        message: format!("Qubit {} is assigned to more than one cell (again at {})", index, coord),
                    });
                }
                addresses.push(index);
            }
        }
        Self::from_addresses(rows, cols, addresses)
    }

    fn from_addresses(rows: usize, cols: usize, addresses: Vec<usize>) -> Result<Self, GridError> {
        let num_qubits = addresses.iter().max().map_or(0, |max| max + 1);
        if num_qubits > MAX_QUBITS {
            return Err(GridError::InvalidDimensions {
                message: format!("Grid needs {} qubits, the simulator supports at most {}", num_qubits, MAX_QUBITS),
            });
        }
        log::debug!("Created {}x{} grid on {} qubits", rows, cols, num_qubits);
        Ok(Self { rows, cols, addresses, num_qubits, circuit: Circuit::new() })
    }

    /// Row count.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Column count.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Size of the simulated register.
    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    /// The operations recorded so far.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Qubit index of cell `(x, y)`.
    pub fn address(&self, x: usize, y: usize) -> Result<usize, GridError> {
        let coord = Coord::new(x, y);
        self.check_coord(coord)?;
        Ok(self.addresses[y * self.cols + x])
    }

    /// Every cell in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.rows).flat_map(move |y| (0..self.cols).map(move |x| Coord::new(x, y)))
    }

    /// In-bounds orthogonal neighbours of `coord`, ordered right, left, down, up.
    pub fn neighbours(&self, coord: Coord) -> Result<Vec<Coord>, GridError> {
        self.check_coord(coord)?;
        let Coord { x, y } = coord;
        let candidates = [
            Some(Coord::new(x + 1, y)),
            x.checked_sub(1).map(|x| Coord::new(x, y)),
            Some(Coord::new(x, y + 1)),
            y.checked_sub(1).map(|y| Coord::new(x, y)),
        ];
        Ok(candidates.into_iter().flatten().filter(|c| self.contains(*c)).collect())
    }

    /// Every pair of adjacent cells, once: horizontal pairs row by row, then
    /// vertical pairs.
    pub fn pairs(&self) -> Vec<(Coord, Coord)> {
        let horizontal = (0..self.rows)
            .flat_map(|y| (0..self.cols.saturating_sub(1)).map(move |x| (Coord::new(x, y), Coord::new(x + 1, y))));
        let vertical = (0..self.rows.saturating_sub(1))
            .flat_map(|y| (0..self.cols).map(move |x| (Coord::new(x, y), Coord::new(x, y + 1))));
        horizontal.chain(vertical).collect()
    }

    /// Records a rotation by `frac * PI` about `axis` on the cell at `coord`.
    ///
    /// `frac = 1.0` about `X` is a full flip, `frac = 0.5` a half flip that
    /// leaves a deterministic cell 50/50.
    pub fn not(&mut self, coord: Coord, frac: f64, axis: Axis) -> Result<(), GridError> {
        let target = QubitId(self.address(coord.x, coord.y)?);
        self.push(Operation::Rotate { target, frac, axis })
    }

    /// Full `X` flip of the cell at `coord`.
    pub fn not_gate(&mut self, coord: Coord) -> Result<(), GridError> {
        self.not(coord, 1.0, Axis::X)
    }

    /// Records a rotation of `target` by `frac * PI` about `axis`, applied
    /// only when `control` is `1`.
    pub fn cnot(&mut self, control: Coord, target: Coord, frac: f64, axis: Axis) -> Result<(), GridError> {
        let control_qubit = QubitId(self.address(control.x, control.y)?);
        let target_qubit = QubitId(self.address(target.x, target.y)?);
        if control == target {
            return Err(GridError::InvalidOperation {
                message: format!("Control and target cannot be the same cell {}", control),
            });
        }
        self.push(Operation::ControlledRotate { control: control_qubit, target: target_qubit, frac, axis })
    }

    /// Full controlled `X` flip.
    pub fn cnot_gate(&mut self, control: Coord, target: Coord) -> Result<(), GridError> {
        self.cnot(control, target, 1.0, Axis::X)
    }

    /// Samples the grid `config.shots` times on the configured device.
    ///
    /// The recorded operations are kept, so calling this again replays the
    /// same preparation from scratch.
    pub fn get_samples(&self, config: &SamplingConfig) -> Result<SampleSet, GridError> {
        config.validate()?;
        let executor = executor_for(config)?;
        self.get_samples_with(executor.as_ref(), config.shots)
    }

    /// Samples the grid `shots` times on a caller-supplied executor.
    pub fn get_samples_with(&self, executor: &dyn Executor, shots: usize) -> Result<SampleSet, GridError> {
        if shots == 0 {
            return Err(GridError::InvalidConfig { message: "shots must be a positive integer".to_string() });
        }

        let outcomes = executor.execute(&self.circuit, self.num_qubits, shots)?;
        check_outcomes(&outcomes, shots, self.num_qubits).map_err(|e| GridError::ExecutionFailure {
            device: executor.name().to_string(),
            message: e.to_string(),
        })?;

        let samples: Vec<String> = outcomes.iter().map(|k| self.outcome_to_bitstring(*k)).collect();
        let result = SampleSet::from_samples(samples, self.cols);
        log::info!(
            "Sampled {} shots on '{}': {} distinct grid states",
            shots,
            executor.name(),
            result.counts().len()
        );
        Ok(result)
    }

    /// Formats a sample as `rows` lines of `cols` characters.
    pub fn render(&self, sample: &str) -> Result<String, GridError> {
        if sample.len() != self.rows * self.cols || !sample.bytes().all(|b| b == b'0' || b == b'1') {
            return Err(GridError::InvalidOperation {
                message: format!("'{}' is not a {}-cell grid sample", sample, self.rows * self.cols),
            });
        }
        let mut out = String::with_capacity(sample.len() + self.rows);
        for row in sample.as_bytes().chunks(self.cols) {
            // Validated as ASCII above
            out.extend(row.iter().map(|b| *b as char));
            out.push('\n');
        }
        Ok(out)
    }

    fn outcome_to_bitstring(&self, outcome: usize) -> String {
        self.addresses
            .iter()
            .map(|q| if basis_bit(outcome, *q, self.num_qubits) == 1 { '1' } else { '0' })
            .collect()
    }

    fn push(&mut self, op: Operation) -> Result<(), GridError> {
        op.validate()?;
        log::trace!("Recording {:?}", op);
        self.circuit.add_operation(op);
        Ok(())
    }

    fn contains(&self, coord: Coord) -> bool {
        coord.x < self.cols && coord.y < self.rows
    }

    fn check_coord(&self, coord: Coord) -> Result<(), GridError> {
        if self.contains(coord) {
            Ok(())
        } else {
            Err(GridError::OutOfBounds { coord, rows: self.rows, cols: self.cols })
        }
    }
}

fn check_dimensions(rows: usize, cols: usize) -> Result<(), GridError> {
    if rows == 0 || cols == 0 {
        return Err(GridError::InvalidDimensions {
            message: format!("Grid dimensions must be positive, got {}x{}", rows, cols),
        });
    }
    match rows.checked_mul(cols) {
        Some(cells) if cells <= MAX_QUBITS => Ok(()),
        _ => Err(GridError::InvalidDimensions {
            message: format!("A {}x{} grid exceeds the {}-qubit simulator limit", rows, cols, MAX_QUBITS),
        }),
    }
}
