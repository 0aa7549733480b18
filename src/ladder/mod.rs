// src/ladder/mod.rs

//! An integer counter stored on a single cell.
//!
//! The value `v` in `0..=d` is held as a rotation of `v/d` of a full flip.
//! Adding past `d` keeps rotating, so the value walks back down towards 0
//! and then up again.

use crate::config::SamplingConfig;
use crate::core::{Coord, GridError, PI};
use crate::grid::GridRegister;
use crate::operations::Axis;
use crate::simulation::{Executor, executor_for};

const CELL: Coord = Coord::new(0, 0);

/// Counter between 0 and `max` on a one-cell grid.
#[derive(Debug, Clone)]
pub struct Ladder {
    max: usize,
    grid: GridRegister,
}

impl Ladder {
    /// New ladder at value 0. `max` must be positive.
    pub fn new(max: usize) -> Result<Self, GridError> {
        if max == 0 {
            return Err(GridError::InvalidOperation { message: "Ladder maximum must be positive".to_string() });
        }
        Ok(Self { max, grid: GridRegister::new(1, 1)? })
    }

    pub fn max(&self) -> usize {
        self.max
    }

    /// The cell and its recorded rotations.
    pub fn register(&self) -> &GridRegister {
        &self.grid
    }

    /// Moves the value by `delta`; fractional and negative steps are allowed.
    pub fn add(&mut self, delta: f64) -> Result<(), GridError> {
        self.grid.not(CELL, delta / self.max as f64, Axis::X)
    }

    /// Reads the value back by sampling.
    ///
    /// Noise and low shot counts show up as a value off by one or more,
    /// more visibly for large `max`.
    pub fn value(&self, config: &SamplingConfig) -> Result<usize, GridError> {
        config.validate()?;
        let executor = executor_for(config)?;
        self.value_with(executor.as_ref(), config.shots)
    }

    /// Same as [`Ladder::value`] on a caller-supplied executor.
    pub fn value_with(&self, executor: &dyn Executor, shots: usize) -> Result<usize, GridError> {
        let result = self.grid.get_samples_with(executor, shots)?;
        Ok(decode(result.cell_probability(CELL)?, self.max))
    }
}

/// Inverts `p = sin^2(v * PI / (2 * max))` to the nearest rung.
fn decode(p: f64, max: usize) -> usize {
    let theta = 2.0 * p.clamp(0.0, 1.0).sqrt().asin();
    (theta * max as f64 / PI).round() as usize
}
