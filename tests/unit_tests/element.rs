use wathen::element::{element_matrix, ELEMENT_PATTERN, NUM_ELEMENT_NODES};

#[test]
fn element_pattern_is_symmetric() {
    for r in 0..NUM_ELEMENT_NODES {
        for c in 0..NUM_ELEMENT_NODES {
            assert_eq!(ELEMENT_PATTERN[r][c], ELEMENT_PATTERN[c][r], "asymmetry at ({r}, {c})");
        }
    }
}

#[test]
fn element_pattern_is_invariant_under_quarter_turns() {
    // Rotating the element by 90 degrees shifts local indices by two
    for r in 0..NUM_ELEMENT_NODES {
        for c in 0..NUM_ELEMENT_NODES {
            let (r_rot, c_rot) = ((r + 2) % NUM_ELEMENT_NODES, (c + 2) % NUM_ELEMENT_NODES);
            assert_eq!(ELEMENT_PATTERN[r_rot][c_rot], ELEMENT_PATTERN[r][c]);
        }
    }
}

#[test]
fn element_matrix_holds_unscaled_entries() {
    let em = element_matrix();
    assert_eq!(em[(0, 0)], 6.0);
    assert_eq!(em[(1, 1)], 32.0);
    assert_eq!(em[(0, 4)], 3.0);
    assert_eq!(em[(1, 5)], 16.0);
    assert_eq!(em[(0, 3)], -8.0);
    assert_eq!(em, em.transpose());
}

#[test]
fn element_matrix_integrates_unit_function() {
    // The entries of a mass matrix sum to the integral of (sum_i phi_i)^2 = 1
    let pattern_sum: f64 = ELEMENT_PATTERN.iter().flatten().sum();
    assert_eq!(pattern_sum, 180.0);
}

#[test]
fn element_matrix_is_positive_definite() {
    let eigenvalues = element_matrix().symmetric_eigenvalues();
    assert!(eigenvalues.min() > 0.0, "eigenvalues: {eigenvalues}");
}
