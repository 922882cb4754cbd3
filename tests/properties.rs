//! Property-based tests for the organism.
//!
//! Populations are drawn from a small window so neighbourhoods overlap and
//! births actually happen.

use proptest::prelude::*;
use sparse_life::{BirthScan, Cell, Organism, OrganismConfig};

fn coords() -> impl Strategy<Value = Vec<(i32, i32)>> {
    prop::collection::vec((-12i32..12, -12i32..12), 0..160)
}

fn seeded(cells: &[(i32, i32)]) -> Organism {
    let mut org = Organism::new();
    org.insert_cells(cells.iter().map(|&c| Cell::from(c)));
    org
}

proptest! {
    /// live + dead neighbours always cover the whole Moore neighbourhood.
    #[test]
    fn prop_neighbor_counts_sum_to_eight(cells in coords(), x in -14i32..14, y in -14i32..14) {
        let org = seeded(&cells);
        let center = Cell::new(x, y);
        let live = org.get_num_live_neighbors(center);
        let dead = org.get_dead_neighbors(center);
        prop_assert_eq!(live + dead.len(), 8);
        prop_assert_eq!(dead.live_count(), live);
        for d in dead.iter() {
            prop_assert!(org.is_dead(*d));
            prop_assert_eq!(d.chebyshev_distance(center), 1);
        }
    }

    /// Seeding the same list twice adds nothing the second time.
    #[test]
    fn prop_insertion_is_idempotent(cells in coords()) {
        let mut org = Organism::new();
        let first = org.insert_cells(cells.iter().map(|&c| Cell::from(c)));
        let snapshot = org.get_live_cells();
        let second = org.insert_cells(cells.iter().map(|&c| Cell::from(c)));
        prop_assert_eq!(second, 0);
        prop_assert_eq!(first, snapshot.len());
        prop_assert_eq!(org.get_live_cells(), snapshot);
    }

    /// The order of the seed list does not matter.
    #[test]
    fn prop_seeding_is_order_invariant(cells in coords()) {
        let mut reversed = cells.clone();
        reversed.reverse();
        let mut rotated = cells.clone();
        if !rotated.is_empty() {
            let mid = rotated.len() / 2;
            rotated.rotate_left(mid);
        }
        let expected = seeded(&cells).get_live_cells();
        prop_assert_eq!(seeded(&reversed).get_live_cells(), expected.clone());
        prop_assert_eq!(seeded(&rotated).get_live_cells(), expected);
    }

    /// Output is strictly increasing by (x, y), hence free of duplicates.
    #[test]
    fn prop_live_cells_strictly_sorted(cells in coords(), ticks in 0u64..4) {
        let mut org = seeded(&cells);
        org.tick_n(ticks);
        let live = org.get_live_cells();
        prop_assert_eq!(live.len(), org.count());
        for pair in live.windows(2) {
            prop_assert!((pair[0].x, pair[0].y) < (pair[1].x, pair[1].y));
        }
    }

    /// Every cell of the next generation is within one step of a parent cell,
    /// and obeys B3/S23 against the parent generation.
    #[test]
    fn prop_tick_follows_b3s23(cells in coords()) {
        let before = seeded(&cells);
        let mut after = seeded(&cells);
        after.tick();

        for cell in after.get_live_cells() {
            let live = before.get_num_live_neighbors(cell);
            if before.is_alive(cell) {
                prop_assert!(live == 2 || live == 3, "{} survived with {} neighbours", cell, live);
            } else {
                prop_assert_eq!(live, 3, "{} born with {} neighbours", cell, live);
            }
            let near_parent = before
                .get_live_cells()
                .iter()
                .any(|p| p.chebyshev_distance(cell) <= 1);
            prop_assert!(near_parent);
        }
        for cell in before.get_live_cells() {
            let live = before.get_num_live_neighbors(cell);
            prop_assert_eq!(after.is_alive(cell), live == 2 || live == 3);
        }
    }

    /// Deduplicating birth candidates is a pure optimisation.
    #[test]
    fn prop_birth_scans_agree(cells in coords(), ticks in 1u64..6) {
        let run = |scan: BirthScan| {
            let mut org = Organism::with_config(OrganismConfig::default().birth_scan(scan));
            org.insert_cells(cells.iter().map(|&c| Cell::from(c)));
            org.tick_n(ticks);
            org.get_live_cells()
        };
        prop_assert_eq!(run(BirthScan::Revisit), run(BirthScan::Dedup));
    }
}
