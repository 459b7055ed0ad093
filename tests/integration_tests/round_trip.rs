//! Assemble, multiply a known solution, solve and compare.
use nalgebra::DVector;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use util::{assert_approx_matrix_eq, relative_error};
use wathen::sparse::cg::{cg_to_tolerance, LinearOperator};
use wathen::{assemble, cg, StorageFormat, WathenGrid};

const GRIDS: [(usize, usize); 4] = [(1, 1), (2, 2), (3, 2), (4, 3)];

fn random_vector(len: usize, rng: &mut impl Rng) -> DVector<f64> {
    DVector::from_fn(len, |_, _| rng.gen())
}

#[test]
fn fixed_step_cg_recovers_known_solution() {
    for (nx, ny) in GRIDS {
        let grid = WathenGrid::new(nx, ny).unwrap();
        let n = grid.order();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let x_true = random_vector(n, &mut rng);

        for format in StorageFormat::ALL {
            let matrix = assemble(&grid, format, &mut ChaCha8Rng::seed_from_u64(nx as u64 * 10 + ny as u64));
            let mut b = DVector::zeros(n);
            LinearOperator::apply(&matrix, (&mut b).into(), (&x_true).into()).unwrap();

            for x0 in [DVector::zeros(n), DVector::from_element(n, 1.0)] {
                let x = cg(&matrix, &b, &x0).unwrap();
                let error = relative_error(&x, &x_true);
                assert!(error < 1e-4, "{nx} x {ny} grid, format {format:?}: relative error {error:e}");
            }
        }
    }
}

#[test]
fn restarting_fixed_step_cg_keeps_solution() {
    let grid = WathenGrid::new(4, 4).unwrap();
    let n = grid.order();
    let matrix = assemble(&grid, StorageFormat::Csc, &mut ChaCha8Rng::seed_from_u64(3));
    let x_true = random_vector(n, &mut ChaCha8Rng::seed_from_u64(4));
    let mut b = DVector::zeros(n);
    LinearOperator::apply(&matrix, (&mut b).into(), (&x_true).into()).unwrap();

    let x1 = cg(&matrix, &b, &DVector::zeros(n)).unwrap();
    let x2 = cg(&matrix, &b, &x1).unwrap();

    assert!(relative_error(&x2, &x_true) < 1e-6);
}

#[test]
fn convergent_cg_recovers_known_solution() {
    let grid = WathenGrid::new(5, 5).unwrap();
    let n = grid.order();
    let matrix = assemble(&grid, StorageFormat::Csc, &mut ChaCha8Rng::seed_from_u64(8));
    let x_true = random_vector(n, &mut ChaCha8Rng::seed_from_u64(9));
    let mut b = DVector::zeros(n);
    LinearOperator::apply(&matrix, (&mut b).into(), (&x_true).into()).unwrap();

    let mut x = DVector::zeros(n);
    let stats = cg_to_tolerance(&matrix, &b, &mut x, 1e-12, 10 * n).unwrap();

    assert!(stats.iterations > 0);
    assert!(stats.residual_norm <= 1e-12 * b.norm());
    assert_approx_matrix_eq!(&x, &x_true, reltol = 1e-6);
}
