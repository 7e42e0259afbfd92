use dotplot::grid::Grid;
use dotplot::match_store::MatchStore;

#[test]
fn self_diagonal_with_no_window_hits_exact_cells() {
    let mut store = MatchStore::new();
    store.append(0, 0, 100);
    let grid = Grid::calculate(&store, 0, 0, 100, 100, 10, 0).unwrap();
    for i in 0..10u32 {
        assert_eq!(grid.get(i, i), 10, "cell ({i},{i}) should see all 10 steps");
    }
    assert_eq!(grid.get(0, 1), 0);
}

#[test]
fn smoothing_window_thickens_neighbors() {
    let mut store = MatchStore::new();
    store.append(50, 50, 1);
    // scale=1, window=20 -> radius=20, so cells 30..=70 on row 50 get bumped.
    let grid = Grid::calculate(&store, 0, 0, 100, 100, 1, 20).unwrap();
    assert_eq!(grid.get(50, 50), 1);
    assert_eq!(grid.get(69, 50), 1);
    assert_eq!(grid.get(71, 50), 0);
}

#[test]
fn saturating_add_caps_at_u32_max() {
    let mut store = MatchStore::new();
    store.append(0, 0, 1);
    let mut grid = Grid::calculate(&store, 0, 0, 1, 1, 1, 0).unwrap();
    // Repeated self-doubling via add_inplace reaches u32::MAX quickly
    // and must saturate rather than wrap.
    for _ in 0..40 {
        let other = grid.clone();
        grid.add_inplace(&other).unwrap();
    }
    assert_eq!(grid.get(0, 0), u32::MAX);
}

#[test]
fn add_inplace_rejects_dimension_mismatch() {
    let store = MatchStore::new();
    let mut a = Grid::calculate(&store, 0, 0, 4, 4, 1, 0).unwrap();
    let b = Grid::calculate(&store, 0, 0, 5, 5, 1, 0).unwrap();
    assert!(a.add_inplace(&b).is_err());
}

#[test]
fn flip_inplace_reverses_rows() {
    let mut store = MatchStore::new();
    store.append(0, 0, 1);
    let mut grid = Grid::calculate(&store, 0, 0, 2, 2, 1, 0).unwrap();
    assert_eq!(grid.get(0, 0), 1);
    grid.flip_inplace();
    assert_eq!(grid.get(0, 1), 1);
    assert_eq!(grid.get(0, 0), 0);
}

#[test]
fn uniform_grid_has_all_zero_luminance() {
    let store = MatchStore::new();
    let grid = Grid::calculate(&store, 0, 0, 3, 3, 1, 0).unwrap();
    assert!(grid.to_luminance().iter().all(|&v| v == 0));
}

#[test]
fn sub_rectangle_offset_is_relative_to_x1_y1() {
    let mut store = MatchStore::new();
    store.append(20, 20, 5);
    // Cropping to [10,30) x [10,30) shifts the match to start at (10,10).
    let grid = Grid::calculate(&store, 10, 10, 30, 30, 1, 0).unwrap();
    assert_eq!(grid.get(10, 10), 1);
    assert_eq!(grid.get(14, 14), 1);
    assert_eq!(grid.get(0, 0), 0);
}

#[test]
fn runs_outside_the_rectangle_are_clipped() {
    let mut store = MatchStore::new();
    store.append(0, 0, 20);
    let grid = Grid::calculate(&store, 5, 5, 10, 10, 1, 0).unwrap();
    assert_eq!(grid.width(), 5);
    assert_eq!(grid.height(), 5);
    // Only steps 5..10 of the run fall inside [5,10) x [5,10).
    assert_eq!(grid.get(0, 0), 1);
    assert_eq!(grid.get(4, 4), 1);
}
