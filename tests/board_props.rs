use std::collections::HashSet;

use battlesalvo::config::{default_fleet_spec, MAX_BOARD_SIZE, MIN_BOARD_SIZE};
use battlesalvo::{Coord, CoordStatus, PlayerState};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn fleet_fits_and_never_overlaps(
        seed in any::<u64>(),
        width in MIN_BOARD_SIZE..=MAX_BOARD_SIZE,
        height in MIN_BOARD_SIZE..=MAX_BOARD_SIZE,
    ) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut state = PlayerState::default();
        let ships = state.place_fleet(&mut rng, height, width, &default_fleet_spec()).unwrap();
        prop_assert_eq!(ships.len(), 4);
        let mut seen = HashSet::new();
        for ship in &ships {
            for cell in ship.cells() {
                prop_assert!(cell.x() < width && cell.y() < height);
                prop_assert!(seen.insert((cell.x(), cell.y())));
            }
        }
    }

    #[test]
    fn incoming_hits_are_an_ordered_subset(seed in any::<u64>()) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut state = PlayerState::default();
        let ships = state.place_fleet(&mut rng, 10, 10, &default_fleet_spec()).unwrap();
        let shots: Vec<_> = (0..rng.random_range(0..30))
            .map(|_| Coord::new(rng.random_range(0..10), rng.random_range(0..10)))
            .collect();
        let hits = state.resolve_incoming(&shots);

        let expected: Vec<_> = shots
            .iter()
            .filter(|s| ships.iter().any(|ship| ship.contains(s.x(), s.y())))
            .map(|s| (s.x(), s.y()))
            .collect();
        let got: Vec<_> = hits.iter().map(|h| (h.x(), h.y())).collect();
        prop_assert_eq!(got, expected);
        prop_assert!(hits.iter().all(|h| h.status() == CoordStatus::Hit));
    }
}
