use nalgebra::{Point2, Vector2};
use proptest::prelude::*;
use std::collections::HashSet;
use wathen::proptest::wathen_grid;
use wathen::{bandwidth, order, triplet_size, Bandwidth, Error, WathenGrid};

#[test]
fn order_of_small_grids() {
    assert_eq!(order(1, 1), 8);
    assert_eq!(order(2, 1), 13);
    assert_eq!(order(3, 2), 29);
    assert_eq!(order(4, 4), 65);
}

#[test]
fn triplet_size_of_small_grids() {
    assert_eq!(triplet_size(1, 1), 64);
    assert_eq!(triplet_size(3, 2), 384);
}

#[test]
fn bandwidth_depends_only_on_nx() {
    let expected = Bandwidth {
        lower: 13,
        diagonal: 1,
        upper: 13,
    };
    assert_eq!(bandwidth(3, 1), expected);
    assert_eq!(bandwidth(3, 7), expected);
    assert_eq!(expected.total(), 27);
}

#[test]
fn empty_grids_are_rejected() {
    assert_eq!(WathenGrid::new(0, 3), Err(Error::EmptyGrid { nx: 0, ny: 3 }));
    assert_eq!(WathenGrid::new(2, 0), Err(Error::EmptyGrid { nx: 2, ny: 0 }));
    assert_eq!(WathenGrid::new(0, 0), Err(Error::EmptyGrid { nx: 0, ny: 0 }));

    let message = WathenGrid::new(0, 3).unwrap_err().to_string();
    assert!(message.contains("0 x 3"));
}

#[test]
fn grid_deserialization_validates_dimensions() {
    let grid: WathenGrid = serde_json::from_str(r#"{ "nx": 3, "ny": 2 }"#).unwrap();
    assert_eq!(grid, WathenGrid::new(3, 2).unwrap());
    assert!(serde_json::from_str::<WathenGrid>(r#"{ "nx": 0, "ny": 2 }"#).is_err());

    let json = serde_json::to_string(&grid).unwrap();
    assert_eq!(serde_json::from_str::<WathenGrid>(&json).unwrap(), grid);
}

#[test]
fn element_indices_run_along_rows() {
    let grid = WathenGrid::new(3, 2).unwrap();
    let indices: Vec<_> = grid.element_indices().collect();
    assert_eq!(indices, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    assert_eq!(indices.len(), grid.num_elements());
}

#[test]
fn element_nodes_of_single_element_grid() {
    let grid = WathenGrid::new(1, 1).unwrap();
    assert_eq!(grid.element_nodes(0, 0), [7, 6, 5, 3, 0, 1, 2, 4]);
}

#[test]
fn element_nodes_of_interior_element() {
    // Rows of the 3 x 2 grid: 0..7, 7..11, 11..18, 18..22, 22..29
    let grid = WathenGrid::new(3, 2).unwrap();
    assert_eq!(grid.element_nodes(1, 1), [26, 25, 24, 19, 13, 14, 15, 20]);
    assert_eq!(grid.element_nodes(0, 0), [13, 12, 11, 7, 0, 1, 2, 8]);
}

#[test]
fn node_coordinates_of_single_element_grid() {
    let grid = WathenGrid::new(1, 1).unwrap();
    let expected = vec![
        Point2::new(0.0, 0.0),
        Point2::new(0.5, 0.0),
        Point2::new(1.0, 0.0),
        Point2::new(0.0, 0.5),
        Point2::new(1.0, 0.5),
        Point2::new(0.0, 1.0),
        Point2::new(0.5, 1.0),
        Point2::new(1.0, 1.0),
    ];
    assert_eq!(grid.node_coordinates(), expected);
}

proptest! {
    #[test]
    fn order_counts_nodes(grid in wathen_grid(8, 8)) {
        let (nx, ny) = (grid.nx(), grid.ny());
        let full_rows = (ny + 1) * (2 * nx + 1);
        let midside_rows = ny * (nx + 1);
        prop_assert_eq!(grid.order(), full_rows + midside_rows);
        prop_assert_eq!(grid.node_coordinates().len(), grid.order());
        prop_assert_eq!(grid.triplet_size(), 64 * grid.num_elements());
    }

    #[test]
    fn elements_cover_every_node(grid in wathen_grid(6, 6)) {
        let mut seen = HashSet::new();
        for (i, j) in grid.element_indices() {
            let nodes = grid.element_nodes(i, j);
            let distinct: HashSet<_> = nodes.iter().copied().collect();
            prop_assert_eq!(distinct.len(), 8);
            prop_assert!(nodes.iter().all(|&node| node < grid.order()));
            seen.extend(nodes);
        }
        prop_assert_eq!(seen.len(), grid.order());
    }

    #[test]
    fn element_node_distance_attains_bandwidth(grid in wathen_grid(6, 6)) {
        let max_distance = grid
            .element_indices()
            .map(|(i, j)| {
                let nodes = grid.element_nodes(i, j);
                let max = nodes.iter().max().unwrap();
                let min = nodes.iter().min().unwrap();
                max - min
            })
            .max()
            .unwrap();
        prop_assert_eq!(max_distance, grid.bandwidth().lower);
        prop_assert_eq!(max_distance, grid.bandwidth().upper);
    }

    #[test]
    fn element_nodes_match_element_geometry(grid in wathen_grid(5, 5)) {
        let coords = grid.node_coordinates();
        let h = Vector2::new(1.0 / grid.nx() as f64, 1.0 / grid.ny() as f64);
        // Local node positions relative to the bottom-left corner, in units of the element size
        let local = [
            (1.0, 1.0), (0.5, 1.0), (0.0, 1.0), (0.0, 0.5),
            (0.0, 0.0), (0.5, 0.0), (1.0, 0.0), (1.0, 0.5),
        ];
        for (i, j) in grid.element_indices() {
            let origin = Point2::new(i as f64 * h.x, j as f64 * h.y);
            for (node, (sx, sy)) in grid.element_nodes(i, j).into_iter().zip(local) {
                let expected = origin + Vector2::new(sx * h.x, sy * h.y);
                prop_assert!((coords[node] - expected).norm() < 1e-12);
            }
        }
    }
}
