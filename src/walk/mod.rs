// src/walk/mod.rs

//! Random walks over the grid's coupling graph.
//!
//! A walk is a path of adjacent cells. Its start cell gets a half flip, and
//! every hop copies the previous cell onto the next one with a controlled
//! flip before half-flipping the new cell. Sampling after each prefix of
//! the path shows how the randomness spreads along it.

use crate::config::SamplingConfig;
use crate::core::{Coord, GridError};
use crate::grid::GridRegister;
use crate::operations::Axis;
use crate::simulation::{Executor, executor_for, make_rng};
use rand::Rng;

/// A path of adjacent cells on a `rows x cols` grid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantumWalk {
    rows: usize,
    cols: usize,
    path: Vec<Coord>,
}

impl QuantumWalk {
    /// Wraps an explicit path. Every cell must lie on the grid and each
    /// consecutive pair must be orthogonal neighbours.
    pub fn new(rows: usize, cols: usize, path: Vec<Coord>) -> Result<Self, GridError> {
        let grid = GridRegister::new(rows, cols)?;
        if path.is_empty() {
            return Err(GridError::InvalidOperation { message: "A walk needs at least one cell".to_string() });
        }
        for coord in &path {
            grid.address(coord.x, coord.y)?;
        }
        if let Some(w) = path.windows(2).find(|w| w[0].manhattan(&w[1]) != 1) {
            return Err(GridError::InvalidOperation {
                message: format!("{} and {} are not neighbours", w[0], w[1]),
            });
        }
        Ok(Self { rows, cols, path })
    }

    /// Draws a walk of `length` cells.
    ///
    /// Starts at `start`, or at a uniformly random cell when `None`. Each
    /// hop prefers neighbours not yet visited and falls back to any
    /// neighbour once the walk is boxed in.
    pub fn random(
        rows: usize,
        cols: usize,
        length: usize,
        start: Option<Coord>,
        seed: Option<u64>,
    ) -> Result<Self, GridError> {
        let grid = GridRegister::new(rows, cols)?;
        if length == 0 {
            return Err(GridError::InvalidOperation { message: "A walk needs at least one cell".to_string() });
        }

        let mut rng = make_rng(seed);
        let first = match start {
            Some(coord) => {
                grid.address(coord.x, coord.y)?;
                coord
            }
            None => Coord::new(rng.random_range(0..cols), rng.random_range(0..rows)),
        };

        let mut path = vec![first];
        while path.len() < length {
            let here = path[path.len() - 1];
            let neighbours = grid.neighbours(here)?;
            if neighbours.is_empty() {
                return Err(GridError::InvalidOperation {
                    message: format!("{} has no neighbours to walk to", here),
                });
            }
            let fresh: Vec<Coord> = neighbours.iter().copied().filter(|c| !path.contains(c)).collect();
            let choices = if fresh.is_empty() { &neighbours } else { &fresh };
            path.push(choices[rng.random_range(0..choices.len())]);
        }
        log::debug!("Drew walk {:?} on a {}x{} grid", path, rows, cols);
        Ok(Self { rows, cols, path })
    }

    pub fn path(&self) -> &[Coord] {
        &self.path
    }

    pub fn start(&self) -> Coord {
        self.path[0]
    }

    /// Number of cells on the path, which is also the number of snapshots.
    pub fn len(&self) -> usize {
        self.path.len()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_empty()
    }

    /// Grid prepared with the first `cells` cells of the path.
    pub fn register(&self, cells: usize) -> Result<GridRegister, GridError> {
        if cells == 0 || cells > self.path.len() {
            return Err(GridError::InvalidOperation {
                message: format!("Prefix of {} cells on a walk of {}", cells, self.path.len()),
            });
        }
        let mut grid = GridRegister::new(self.rows, self.cols)?;
        grid.not(self.path[0], 0.5, Axis::X)?;
        for hop in self.path[..cells].windows(2) {
            grid.cnot_gate(hop[0], hop[1])?;
            grid.not(hop[1], 0.5, Axis::X)?;
        }
        Ok(grid)
    }

    /// Per-cell probabilities of reading `1` after each prefix of the walk.
    ///
    /// Entry `k` is sampled with the first `k + 1` cells prepared and is
    /// indexed row-major like [`crate::SampleSet::cell_probabilities`].
    pub fn run(&self, config: &SamplingConfig) -> Result<Vec<Vec<f64>>, GridError> {
        config.validate()?;
        let executor = executor_for(config)?;
        self.run_with(executor.as_ref(), config.shots)
    }

    /// Same as [`QuantumWalk::run`] on a caller-supplied executor.
    pub fn run_with(&self, executor: &dyn Executor, shots: usize) -> Result<Vec<Vec<f64>>, GridError> {
        (1..=self.path.len())
            .map(|cells| {
                let result = self.register(cells)?.get_samples_with(executor, shots)?;
                Ok(result.cell_probabilities())
            })
            .collect()
    }
}
