//! Half flips about the same axis compose to a full flip; half flips about
//! different axes leave the cell at 50/50.

use qgrid::{Axis, Coord, GridError, GridRegister, SamplingConfig};

fn ones_fraction(grid: &GridRegister, shots: usize) -> Result<f64, GridError> {
    let result = grid.get_samples(&SamplingConfig::new(shots))?;
    Ok(result.cell_probabilities()[0])
}

fn main() -> Result<(), GridError> {
    env_logger::init();
    println!("--- qgrid Example: half flips ---");

    let cell = Coord::new(0, 0);
    let shots = 1000;

    let mut once = GridRegister::new(1, 1)?;
    once.not(cell, 0.5, Axis::X)?;
    println!("X^0.5             -> P(1) = {:.3}", ones_fraction(&once, shots)?);

    let mut twice = GridRegister::new(1, 1)?;
    twice.not(cell, 0.5, Axis::X)?;
    twice.not(cell, 0.5, Axis::X)?;
    println!("X^0.5, X^0.5      -> P(1) = {:.3}", ones_fraction(&twice, shots)?);

    let mut crossed = GridRegister::new(1, 1)?;
    crossed.not(cell, 0.5, Axis::X)?;
    crossed.not(cell, 0.5, Axis::Y)?;
    println!("X^0.5, Y^0.5      -> P(1) = {:.3}", ones_fraction(&crossed, shots)?);

    let mut undone = GridRegister::new(1, 1)?;
    undone.not(cell, 0.5, Axis::X)?;
    undone.not(cell, -0.5, Axis::X)?;
    println!("X^0.5, X^-0.5     -> P(1) = {:.3}", ones_fraction(&undone, shots)?);

    println!("\nThe same two half flips give a certain result or a coin toss");
    println!("depending only on whether their axes agree.");
    Ok(())
}
