// src/superpose/mod.rs

//! Two-outcome preparations on a row of cells.
//!
//! [`superpose_bitstrings`] prepares a row that reads as one of two given
//! bitstrings with equal odds. [`bell_correlation`] prepares a rotated
//! entangled pair and reports how often the two cells agree when each is
//! read along `X` or `Z`.

use crate::config::SamplingConfig;
use crate::core::{Coord, GridError};
use crate::grid::GridRegister;
use crate::operations::Axis;
use std::collections::BTreeMap;

/// Records a Hadamard on `coord` as a half `Y` turn followed by a full flip.
fn hadamard(grid: &mut GridRegister, coord: Coord) -> Result<(), GridError> {
    grid.not(coord, 0.5, Axis::Y)?;
    grid.not_gate(coord)
}

fn parse_bits(s: &str) -> Result<Vec<bool>, GridError> {
    s.chars()
        .map(|c| match c {
            '0' => Ok(false),
            '1' => Ok(true),
            other => Err(GridError::InvalidOperation {
                message: format!("'{}' in bitstring '{}' is not a bit", other, s),
            }),
        })
        .collect()
}

/// A `1 x n` grid prepared in an equal superposition of `a` and `b`.
///
/// The shorter string is left-padded with zeros. Cells where the strings
/// agree are set outright; the first differing cell gets a half flip and
/// is copied onto the other differing cells.
pub fn bitstring_superposer(a: &str, b: &str) -> Result<GridRegister, GridError> {
    let width = a.len().max(b.len());
    if width == 0 {
        return Err(GridError::InvalidOperation { message: "Bitstrings cannot both be empty".to_string() });
    }
    let pad = |bits: Vec<bool>| {
        let mut padded = vec![false; width - bits.len()];
        padded.extend(bits);
        padded
    };
    let (a_bits, b_bits) = (pad(parse_bits(a)?), pad(parse_bits(b)?));

    let mut grid = GridRegister::new(1, width)?;
    let mut diff = Vec::new();
    for (x, (bit_a, bit_b)) in a_bits.iter().zip(&b_bits).enumerate() {
        if bit_a != bit_b {
            diff.push(Coord::new(x, 0));
        } else if *bit_a {
            grid.not_gate(Coord::new(x, 0))?;
        }
    }

    if let Some((&first, rest)) = diff.split_first() {
        grid.not(first, 0.5, Axis::Y)?;
        for &cell in rest {
            grid.cnot_gate(first, cell)?;
        }
        for &cell in &diff {
            if a_bits[cell.x] {
                grid.not_gate(cell)?;
            }
        }
    }
    Ok(grid)
}

/// Samples [`bitstring_superposer`] and returns the fraction of shots per
/// observed bitstring.
pub fn superpose_bitstrings(a: &str, b: &str, config: &SamplingConfig) -> Result<BTreeMap<String, f64>, GridError> {
    let result = bitstring_superposer(a, b)?.get_samples(config)?;
    Ok(result.fractions())
}

/// Fraction of shots in which the two cells of a rotated Bell pair agree.
///
/// `basis` names the readout of each cell: `"ZZ"`, `"ZX"`, `"XZ"` or `"XX"`
/// (case-insensitive). Ideally the agreement is `cos^2(PI/8)` for the
/// first three and `sin^2(PI/8)` for `"XX"`.
pub fn bell_correlation(basis: &str, config: &SamplingConfig) -> Result<f64, GridError> {
    let axes = basis.chars().map(|c| c.to_string().parse::<Axis>()).collect::<Result<Vec<_>, _>>()?;
    if axes.len() != 2 || axes.contains(&Axis::Y) {
        return Err(GridError::InvalidOperation {
            message: format!("Bell basis '{}' must be two of X or Z", basis),
        });
    }

    let (left, right) = (Coord::new(0, 0), Coord::new(1, 0));
    let mut grid = GridRegister::new(1, 2)?;
    hadamard(&mut grid, left)?;
    grid.cnot_gate(left, right)?;
    // Controlled X flip leaves a phase of -i on the control; undo it
    grid.not(left, 0.5, Axis::Z)?;
    grid.not(right, 0.25, Axis::Y)?;
    hadamard(&mut grid, right)?;
    for (cell, axis) in [left, right].into_iter().zip(&axes) {
        if *axis == Axis::X {
            hadamard(&mut grid, cell)?;
        }
    }

    let result = grid.get_samples(config)?;
    let disagreement = result.pair_disagreement(&[(left, right)])?;
    Ok(1.0 - disagreement[0])
}
