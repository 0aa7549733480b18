// src/lib.rs

//! `qgrid` - random grids of qubits
//!
//! A grid of cells is mapped onto a register of qubits. Cells are flipped,
//! half-flipped and conditionally flipped by coordinate, and the grid is then
//! sampled shot by shot on an execution backend: the bundled state-vector
//! simulator (ideal or noisy) or any caller-supplied [`Executor`].
//!
//! On top of the grid sit a few small games: random walks over the grid's
//! couplings ([`QuantumWalk`]), a counter kept on one cell ([`Ladder`]) and
//! two-outcome superpositions ([`superpose`]).

pub mod core;
pub mod operations;
pub mod circuits;
pub mod config;
pub mod simulation;
pub mod grid;
pub mod walk;
pub mod ladder;
pub mod superpose;
pub mod validation;

// Re-export the most common types for easier top-level use
pub use self::core::{Coord, GridError, QubitId, StateVector};
pub use operations::{Axis, Operation};
pub use circuits::{Circuit, CircuitBuilder};
pub use config::{Device, NoiseModel, SamplingConfig};
pub use simulation::{Executor, LocalSimulator, NoisySimulator, SampleSet, executor_for};
pub use grid::GridRegister;
pub use walk::QuantumWalk;
pub use ladder::Ladder;
pub use superpose::{bell_correlation, bitstring_superposer, superpose_bitstrings};
pub use validation::{check_normalization, check_outcomes, check_probability};

// Example 1: Flipping one cell
// A full NOT on the top-left cell of a 2x2 grid shows up in every shot.
/// ```
/// use qgrid::{Coord, GridRegister, SamplingConfig, GridError};
///
/// fn main() -> Result<(), GridError> {
///     let mut grid = GridRegister::new(2, 2)?;
///     grid.not_gate(Coord::new(0, 0))?;
///
///     let result = grid.get_samples(&SamplingConfig::new(100).with_seed(1))?;
///     assert_eq!(result.counts().get("1000"), Some(&100));
///
///     // Samples render as one line per grid row
///     assert_eq!(grid.render(&result.samples()[0])?, "10\n00\n");
///     Ok(())
/// }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 2: Half flips
// Two half turns about the same axis make a full flip; an X half turn
// followed by a Y half turn leaves the cell at 50/50.
/// ```
/// use qgrid::{Axis, Coord, GridRegister, SamplingConfig, GridError};
///
/// fn main() -> Result<(), GridError> {
///     let cell = Coord::new(0, 0);
///
///     let mut same_axis = GridRegister::new(1, 1)?;
///     same_axis.not(cell, 0.5, Axis::X)?;
///     same_axis.not(cell, 0.5, Axis::X)?;
///     let flipped = same_axis.get_samples(&SamplingConfig::new(50).with_seed(7))?;
///     assert_eq!(flipped.counts().get("1"), Some(&50));
///
///     let mut crossed = GridRegister::new(1, 1)?;
///     crossed.not(cell, 0.5, Axis::X)?;
///     crossed.not(cell, 0.5, Axis::Y)?;
///     let random = crossed.get_samples(&SamplingConfig::new(1000).with_seed(7))?;
///     let ones = random.counts().get("1").copied().unwrap_or(0);
///     assert!((400..=600).contains(&ones));
///     Ok(())
/// }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item

// Example 3: A ladder counter
// The value is stored as a partial flip and read back from sampled odds.
/// ```
/// use qgrid::{Ladder, SamplingConfig, GridError};
///
/// fn main() -> Result<(), GridError> {
///     let mut ladder = Ladder::new(8)?;
///     ladder.add(2.0)?;
///     ladder.add(3.0)?;
///     assert_eq!(ladder.value(&SamplingConfig::new(4096).with_seed(3))?, 5);
///     Ok(())
/// }
/// ```
#[doc(hidden)]
const _: () = (); // Attaches the preceding doc comment block to a hidden item
