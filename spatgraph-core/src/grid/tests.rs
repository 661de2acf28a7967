//! Unit tests for the spatial grid index and neighbourhood queries.

use std::collections::BTreeSet;

use proptest::prelude::*;
use rand::{SeedableRng, rngs::SmallRng};
use rstest::rstest;
use spatgraph_test_support::proptest_profile::ProptestRunProfile;

use crate::{error::GridError, position::Positions};

use super::LayerState;

fn suite_config() -> ProptestConfig {
    let profile = ProptestRunProfile::load(64, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

#[rstest]
#[case::line(1, 5)]
#[case::plane(2, 4)]
#[case::volume(3, 3)]
fn allocates_cells_per_dimension_to_the_power_of_dimension(
    #[case] dimension: usize,
    #[case] per_dimension: usize,
) {
    let state = LayerState::new(dimension, per_dimension);
    assert_eq!(state.cell_count(), per_dimension.pow(dimension as u32));
    assert_eq!(state.cells_per_dimension(), per_dimension);
}

#[rstest]
fn population_sizing_keeps_occupancy_constant() {
    let state = LayerState::for_population(2, 100);
    // floor(sqrt(100 / 2.5)) == 6
    assert_eq!(state.cells_per_dimension(), 6);
    assert_eq!(state.cell_count(), 36);
}

#[rstest]
fn population_sizing_never_drops_below_one_cell() {
    let state = LayerState::for_population(3, 1);
    assert_eq!(state.cells_per_dimension(), 1);
    assert_eq!(state.cell_count(), 1);
}

#[rstest]
#[case::origin(&[0, 0, 0])]
#[case::interior(&[1, 2, 3])]
#[case::far_corner(&[3, 3, 3])]
fn flatten_then_unflatten_round_trips(#[case] coords: &[usize]) {
    let state = LayerState::new(3, 4);
    let cell = state.flatten(coords);
    assert_eq!(state.unflatten(cell), coords);
}

#[rstest]
fn coordinate_exactly_at_domain_boundary_clamps_to_last_cell() {
    let state = LayerState::new(2, 4);
    assert_eq!(state.cell_of(&[1.0, 1.0]), state.flatten(&[3, 3]));
    let eps = f64::EPSILON;
    assert_eq!(
        state.cell_of(&[1.0 - eps, 0.0]),
        state.flatten(&[3, 0])
    );
}

#[rstest]
fn nodes_rejects_out_of_range_cell() {
    let state = LayerState::new(2, 3);
    let result = state.nodes(9);
    assert!(matches!(
        result,
        Err(GridError::CellOutOfRange {
            cell: 9,
            cell_count: 9
        })
    ));
}

#[rstest]
fn surface_at_radius_zero_is_the_cell_itself() {
    let state = LayerState::new(2, 5);
    let cell = state.flatten(&[2, 2]);
    assert_eq!(state.box_surface(cell, 0), vec![cell]);
}

#[rstest]
fn surface_counts_match_the_boundary_shell_of_a_hypercube() {
    let state = LayerState::new(2, 9);
    let centre = state.flatten(&[4, 4]);
    // An unclipped 2-dimensional shell at radius r holds (2r+1)^2 - (2r-1)^2
    // cells.
    assert_eq!(state.box_surface(centre, 1).len(), 8);
    assert_eq!(state.box_surface(centre, 2).len(), 16);
}

#[rstest]
fn surface_is_clipped_at_the_grid_boundary() {
    let state = LayerState::new(2, 9);
    let corner = state.flatten(&[0, 0]);
    assert_eq!(state.box_surface(corner, 1).len(), 3);
    let edge = state.flatten(&[0, 4]);
    assert_eq!(state.box_surface(edge, 1).len(), 5);
}

#[rstest]
fn no_node_is_listed_twice_after_a_single_orchestration_pass() {
    let mut rng = SmallRng::seed_from_u64(11);
    let positions = Positions::sample(&mut rng, 2, 200);
    let mut state = LayerState::for_population(2, 200);
    for node in 0..200 {
        state.add_node(positions.get(node), node);
    }
    let mut seen = BTreeSet::new();
    for cell in 0..state.cell_count() {
        for &node in state.nodes(cell).expect("cell index is in range") {
            assert!(seen.insert(node), "node {node} appears in more than one cell");
        }
    }
    assert_eq!(seen.len(), 200);
}

#[rstest]
fn every_node_maps_to_the_cell_covering_its_position() {
    let mut rng = SmallRng::seed_from_u64(13);
    let positions = Positions::sample(&mut rng, 3, 50);
    let mut state = LayerState::for_population(3, 50);
    for node in 0..50 {
        state.add_node(positions.get(node), node);
    }
    for node in 0..50 {
        let cell = state.cell_of(positions.get(node));
        let residents = state.nodes(cell).expect("cell index is in range");
        assert!(residents.contains(&node));
    }
}

fn grid_strategy() -> impl Strategy<Value = (usize, usize)> {
    (1usize..=4, 1usize..=6)
}

proptest! {
    #![proptest_config(suite_config())]

    #[test]
    fn cell_indices_and_coordinates_are_bijective(
        (dimension, per_dimension) in grid_strategy(),
        seed in any::<u64>(),
    ) {
        let state = LayerState::new(dimension, per_dimension);
        let cell = (seed as usize) % state.cell_count();
        let coords = state.unflatten(cell);
        prop_assert_eq!(coords.len(), dimension);
        prop_assert!(coords.iter().all(|&c| c < per_dimension));
        prop_assert_eq!(state.flatten(&coords), cell);
    }

    #[test]
    fn shells_are_disjoint_and_their_union_is_the_volume(
        (dimension, per_dimension) in grid_strategy(),
        seed in any::<u64>(),
        max_radius in 0usize..=3,
    ) {
        let state = LayerState::new(dimension, per_dimension);
        let cell = (seed as usize) % state.cell_count();

        let mut accumulated: BTreeSet<usize> = BTreeSet::new();
        for radius in 0..=max_radius {
            let shell = state.box_surface(cell, radius);
            let shell_set: BTreeSet<usize> = shell.iter().copied().collect();
            prop_assert_eq!(shell_set.len(), shell.len(), "shell repeats a cell");
            prop_assert!(
                accumulated.is_disjoint(&shell_set),
                "radius {} revisits an inner shell",
                radius
            );
            accumulated.extend(shell_set);
        }

        // A real radius just short of max_radius cell widths rounds up to the
        // same grid radius.
        let real_radius = if max_radius == 0 {
            0.0
        } else {
            (max_radius as f64 - 0.5) * state.cell_width()
        };
        let volume: BTreeSet<usize> = state.box_volume(cell, real_radius).into_iter().collect();
        prop_assert_eq!(volume, accumulated);
    }

    #[test]
    fn positions_never_map_outside_the_grid(
        (dimension, per_dimension) in grid_strategy(),
        raw in proptest::collection::vec(0.0f64..1.0, 1..=4),
    ) {
        let mut coords = raw;
        coords.resize(dimension, 1.0 - f64::EPSILON);
        let state = LayerState::new(dimension, per_dimension);
        let cell = state.cell_of(&coords);
        prop_assert!(cell < state.cell_count());
        prop_assert!(state.nodes(cell).is_ok());
    }
}
