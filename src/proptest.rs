//! Proptest strategies for grids and vectors.
use crate::grid::WathenGrid;
use ::proptest::prelude::*;
use nalgebra::DVector;

/// Grids with `1 <= nx <= max_nx` and `1 <= ny <= max_ny`.
pub fn wathen_grid(max_nx: usize, max_ny: usize) -> impl Strategy<Value = WathenGrid> {
    (1..=max_nx.max(1), 1..=max_ny.max(1))
        .prop_filter_map("grid must be non-empty", |(nx, ny)| WathenGrid::new(nx, ny).ok())
}

/// Vectors of the given length with entries in `[-10, 10)`.
pub fn dvector(len: usize) -> impl Strategy<Value = DVector<f64>> {
    // Keep entries moderate so that products with Wathen matrices stay well within
    // the range where relative tolerances are meaningful
    ::proptest::collection::vec(-10.0..10.0, len).prop_map(DVector::from_vec)
}

/// A grid together with a vector whose length is the order of the grid.
pub fn grid_and_vector(max_nx: usize, max_ny: usize) -> impl Strategy<Value = (WathenGrid, DVector<f64>)> {
    wathen_grid(max_nx, max_ny).prop_flat_map(|grid| (Just(grid), dvector(grid.order())))
}

impl Arbitrary for WathenGrid {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        wathen_grid(6, 6).boxed()
    }
}
