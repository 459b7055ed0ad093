//! Assembles a Wathen matrix in every storage format, solves a system with a known solution by
//! fixed-step Conjugate Gradient and prints the error of each solve.
//!
//! Usage: `cargo run --example wathen_cg [nx] [ny]`
use eyre::{eyre, WrapErr};
use nalgebra::DVector;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use wathen::sparse::cg::LinearOperator;
use wathen::{assemble, cg, StorageFormat, WathenGrid};

fn parse_arg(args: &[String], index: usize, default: usize) -> eyre::Result<usize> {
    match args.get(index) {
        Some(arg) => arg
            .parse()
            .wrap_err_with(|| format!("Invalid grid dimension {arg:?}")),
        None => Ok(default),
    }
}

fn main() -> eyre::Result<()> {
    let args: Vec<String> = std::env::args().collect();
    let nx = parse_arg(&args, 1, 4)?;
    let ny = parse_arg(&args, 2, nx)?;
    let grid = WathenGrid::new(nx, ny)?;
    let n = grid.order();

    println!("Wathen matrix for {nx} x {ny} grid");
    println!("  order:        {n}");
    println!("  triplets:     {}", grid.triplet_size());
    println!("  bandwidth:    {:?}", grid.bandwidth());

    let seed = 123456789;
    let mut rng = StdRng::seed_from_u64(seed);
    let x_true = DVector::from_fn(n, |_, _| rng.gen::<f64>());

    for format in StorageFormat::ALL {
        let matrix = assemble(&grid, format, &mut StdRng::seed_from_u64(seed));
        let mut b = DVector::zeros(n);
        LinearOperator::apply(&matrix, (&mut b).into(), (&x_true).into()).map_err(|e| eyre!("{e}"))?;

        let x0 = DVector::zeros(n);
        let x = cg(&matrix, &b, &x0).map_err(|e| eyre!("{e}"))?;
        let error = (&x - &x_true).norm() / x_true.norm();
        println!("{:>8}: relative error {error:.3e}", format!("{format:?}"));
    }

    Ok(())
}
