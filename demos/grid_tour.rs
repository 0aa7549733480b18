//! Tour of a small random grid: flips, half flips, a controlled flip and
//! per-cell statistics, sampled on the ideal and the noisy simulator.
//!
//! Run with `RUST_LOG=debug cargo run --example grid_tour` to see backend
//! selection and sampling logs.

use qgrid::{Axis, Coord, GridError, GridRegister, QuantumWalk, SamplingConfig};

fn main() -> Result<(), GridError> {
    env_logger::init();
    println!("--- qgrid Example: a 3x3 random grid ---");

    let mut grid = GridRegister::new(3, 3)?;
    let centre = Coord::new(1, 1);

    // Certain flip in the top-left corner
    grid.not_gate(Coord::new(0, 0))?;
    // Half flip in the centre, copied onto its neighbours
    grid.not(centre, 0.5, Axis::X)?;
    for neighbour in grid.neighbours(centre)? {
        grid.cnot_gate(centre, neighbour)?;
    }
    // A quarter turn on the bottom-right corner
    grid.not(Coord::new(2, 2), 0.25, Axis::Y)?;

    println!("\nCircuit Definition:\n{}", grid.circuit());

    let ideal = grid.get_samples(&SamplingConfig::new(1024))?;
    println!("{}", ideal);

    println!("Most frequent grid:");
    if let Some((sample, count)) = ideal.most_frequent() {
        print!("{}", grid.render(sample)?);
        println!("({} of {} shots)", count, ideal.shots());
    }

    println!("\nProbability of each cell reading 1:");
    let probs = ideal.cell_probabilities();
    for row in probs.chunks(grid.cols()) {
        let line: Vec<String> = row.iter().map(|p| format!("{:>5.2}", p)).collect();
        println!("  {}", line.join(" "));
    }

    println!("\nNeighbour disagreement (ideal vs noisy):");
    let noisy = grid.get_samples(&SamplingConfig::new(1024).noisy(true))?;
    let pairs = grid.pairs();
    let ideal_diff = ideal.pair_disagreement(&pairs)?;
    let noisy_diff = noisy.pair_disagreement(&pairs)?;
    for (((a, b), i), n) in pairs.iter().zip(&ideal_diff).zip(&noisy_diff) {
        println!("  {} - {}: {:.3} vs {:.3}", a, b, i, n);
    }

    println!("\nA random walk of 5 cells from the centre:");
    let walk = QuantumWalk::random(3, 3, 5, Some(centre), None)?;
    println!("  path: {:?}", walk.path());
    for (step, probs) in walk.run(&SamplingConfig::new(512))?.iter().enumerate() {
        let line: Vec<String> = probs.iter().map(|p| format!("{:.2}", p)).collect();
        println!("  step {}: {}", step, line.join(" "));
    }

    Ok(())
}
