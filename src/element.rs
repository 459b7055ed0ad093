//! The element matrix of the 8-node serendipity quadrilateral.
//!
//! Local nodes are numbered counter-clockwise starting in the top-right corner:
//!
//! ```text
//!  2 --- 1 --- 0
//!  |           |
//!  3           7
//!  |           |
//!  4 --- 5 --- 6
//! ```
//!
//! Even local indices are corners and odd local indices are midside nodes.
use nalgebra::SMatrix;

/// Number of nodes of the serendipity quadrilateral.
pub const NUM_ELEMENT_NODES: usize = 8;

/// Number of entries contributed by a single element.
pub const NUM_ELEMENT_ENTRIES: usize = NUM_ELEMENT_NODES * NUM_ELEMENT_NODES;

pub type ElementMatrix = SMatrix<f64, NUM_ELEMENT_NODES, NUM_ELEMENT_NODES>;

/// Entries of the element matrix for unit density. Symmetric.
#[rustfmt::skip]
pub const ELEMENT_PATTERN: [[f64; NUM_ELEMENT_NODES]; NUM_ELEMENT_NODES] = [
    [ 6.0, -6.0,  2.0, -8.0,  3.0, -8.0,  2.0, -6.0],
    [-6.0, 32.0, -6.0, 20.0, -8.0, 16.0, -8.0, 20.0],
    [ 2.0, -6.0,  6.0, -6.0,  2.0, -8.0,  3.0, -8.0],
    [-8.0, 20.0, -6.0, 32.0, -6.0, 20.0, -8.0, 16.0],
    [ 3.0, -8.0,  2.0, -6.0,  6.0, -6.0,  2.0, -8.0],
    [-8.0, 16.0, -8.0, 20.0, -6.0, 32.0, -6.0, 20.0],
    [ 2.0, -8.0,  3.0, -8.0,  2.0, -6.0,  6.0, -6.0],
    [-6.0, 20.0, -8.0, 16.0, -8.0, 20.0, -6.0, 32.0],
];

/// The element matrix for unit density.
///
/// The contribution of an element with density `rho` is `rho * element_matrix()`.
pub fn element_matrix() -> ElementMatrix {
    ElementMatrix::from_fn(|r, c| ELEMENT_PATTERN[r][c])
}
