//! Automatic bulk assignment ("assign by hall")
//!
//! Players are bucketed by hall (first-seen order), each bucket is sorted by
//! combat power (strongest first, ties keep input order), and then everyone is
//! poured into the board through a single cursor that runs across all buckets.
//! Halls are not aligned to regiments.

use std::sync::Arc;

use indexmap::IndexMap;
use shared::{
    Player, SlotPosition, TeamConfiguration, REGIMENT_CAPACITY, REGIMENT_COUNT, SLOTS_PER_SQUAD,
    SQUADS_PER_REGIMENT,
};
use tracing::{info, warn};

use crate::allocator::SlotAllocator;

/// Label of the bucket for players without a hall
pub const UNASSIGNED_HALL: &str = "未分配";

/// Result of a bulk assignment
///
/// Running out of room is not an error: the players that did not fit are
/// listed in `unassigned`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentOutcome {
    pub configuration: TeamConfiguration,
    pub assigned: usize,
    /// Players left off the board, in the order they would have been placed
    pub unassigned: Vec<Arc<Player>>,
}

impl AssignmentOutcome {
    pub fn unassigned_count(&self) -> usize {
        self.unassigned.len()
    }

    pub fn is_partial(&self) -> bool {
        !self.unassigned.is_empty()
    }
}

/// Placement cursor shared by every hall bucket
#[derive(Debug, Clone, Copy, Default)]
struct Cursor {
    regiment: usize,
    squad: usize,
    position: usize,
}

impl Cursor {
    fn at(&self) -> SlotPosition {
        SlotPosition::new(self.regiment, self.squad, self.position)
    }

    fn advance(&mut self) {
        self.position += 1;
        if self.position == SLOTS_PER_SQUAD {
            self.position = 0;
            self.squad += 1;
            if self.squad == SQUADS_PER_REGIMENT {
                self.squad = 0;
                self.regiment += 1;
            }
        }
    }

    fn next_regiment(&mut self) {
        self.regiment += 1;
        self.squad = 0;
        self.position = 0;
    }
}

/// Group players by hall, first-seen order; stable-sorted by power, descending
///
/// A hall literally named [`UNASSIGNED_HALL`] shares the `None` bucket.
pub fn hall_buckets(players: &[Arc<Player>]) -> IndexMap<Option<&str>, Vec<Arc<Player>>> {
    let mut buckets: IndexMap<Option<&str>, Vec<Arc<Player>>> = IndexMap::new();
    for player in players {
        let hall = player.hall().filter(|h| h.trim() != UNASSIGNED_HALL);
        buckets.entry(hall).or_default().push(player.clone());
    }
    for bucket in buckets.values_mut() {
        bucket.sort_by(|a, b| b.combat_power.cmp(&a.combat_power));
    }
    buckets
}

/// Assign every player to the board, discarding the current occupants
///
/// The skeleton of `config` (ids, names) is reused. A regiment holding
/// 30 players is skipped before placing; once the cursor runs past the last
/// regiment, everyone left is reported as unassigned.
pub fn assign_by_hall(players: &[Arc<Player>], config: &TeamConfiguration) -> AssignmentOutcome {
    let allocator = SlotAllocator::new();
    let mut configuration = config.clone();
    configuration.clear();

    let buckets = hall_buckets(players);
    let ordered: Vec<Arc<Player>> = buckets.into_values().flatten().collect();

    let mut cursor = Cursor::default();
    let mut assigned = 0;
    let mut unassigned = Vec::new();

    for (index, player) in ordered.iter().enumerate() {
        while cursor.regiment < REGIMENT_COUNT
            && configuration.regiment_occupancy(cursor.regiment) >= REGIMENT_CAPACITY
        {
            cursor.next_regiment();
        }

        if cursor.regiment >= REGIMENT_COUNT {
            unassigned.extend(ordered[index..].iter().cloned());
            break;
        }

        match allocator.place(&mut configuration, cursor.at(), player.clone()) {
            Ok(_) => assigned += 1,
            Err(err) => {
                warn!(%err, "assignment cursor left the board");
                unassigned.extend(ordered[index..].iter().cloned());
                break;
            }
        }
        cursor.advance();
    }

    if unassigned.is_empty() {
        info!(assigned, "assigned all players by hall");
    } else {
        warn!(
            assigned,
            unassigned = unassigned.len(),
            "all regiments are full, some players were not assigned"
        );
    }

    AssignmentOutcome {
        configuration,
        assigned,
        unassigned,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use shared::{PlayerClass, TOTAL_CAPACITY};

    fn player(name: &str, power: u64, hall: Option<&str>) -> Arc<Player> {
        let p = Player::new(name, power, PlayerClass::Other);
        Arc::new(match hall {
            Some(h) => p.with_hall(h),
            None => p,
        })
    }

    fn name_at(config: &TeamConfiguration, r: usize, s: usize, p: usize) -> Option<String> {
        config
            .get(SlotPosition::new(r, s, p))
            .unwrap()
            .map(|pl| pl.name.clone())
    }

    fn many(count: usize) -> Vec<Arc<Player>> {
        (0..count)
            .map(|i| player(&format!("p{:03}", i), 1_000 - i as u64, Some("风堂")))
            .collect()
    }

    #[test]
    fn test_hall_order_then_power() {
        let players = vec![
            player("A", 100, Some("X")),
            player("B", 200, Some("X")),
            player("C", 50, Some("Y")),
        ];

        let outcome = assign_by_hall(&players, &TeamConfiguration::default());

        assert_eq!(name_at(&outcome.configuration, 0, 0, 0), Some("B".to_string()));
        assert_eq!(name_at(&outcome.configuration, 0, 0, 1), Some("A".to_string()));
        assert_eq!(name_at(&outcome.configuration, 0, 0, 2), Some("C".to_string()));
        assert_eq!(outcome.assigned, 3);
        assert!(!outcome.is_partial());
    }

    #[test]
    fn test_missing_hall_gets_its_own_bucket_in_first_seen_order() {
        let players = vec![
            player("无堂1", 10, None),
            player("风1", 5, Some("风堂")),
            player("无堂2", 99, Some("")),
        ];

        let buckets = hall_buckets(&players);
        let keys: Vec<_> = buckets.keys().cloned().collect();
        assert_eq!(keys, vec![None, Some("风堂")]);

        let outcome = assign_by_hall(&players, &TeamConfiguration::default());
        assert_eq!(name_at(&outcome.configuration, 0, 0, 0), Some("无堂2".to_string()));
        assert_eq!(name_at(&outcome.configuration, 0, 0, 1), Some("无堂1".to_string()));
        assert_eq!(name_at(&outcome.configuration, 0, 0, 2), Some("风1".to_string()));
    }

    #[test]
    fn test_unassigned_label_joins_missing_hall_bucket() {
        let players = vec![
            player("无堂", 10, None),
            player("风1", 5, Some("风堂")),
            player("标记", 20, Some(UNASSIGNED_HALL)),
        ];

        let buckets = hall_buckets(&players);

        assert_eq!(buckets.len(), 2);
        let names: Vec<_> = buckets[&None].iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["标记", "无堂"]);
    }

    #[test]
    fn test_equal_power_keeps_input_order() {
        let players = vec![
            player("first", 100, Some("X")),
            player("second", 100, Some("X")),
            player("strong", 300, Some("X")),
            player("third", 100, Some("X")),
        ];

        let outcome = assign_by_hall(&players, &TeamConfiguration::default());
        let names: Vec<_> = (0..4)
            .map(|p| name_at(&outcome.configuration, 0, 0, p).unwrap())
            .collect();

        assert_eq!(names, vec!["strong", "first", "second", "third"]);
    }

    #[test]
    fn test_existing_occupants_are_discarded() {
        let mut config = TeamConfiguration::new("旧配置");
        config.regiments[1].name = "先锋团".to_string();
        SlotAllocator::new()
            .place(&mut config, SlotPosition::new(3, 4, 5), player("旧人", 1, None))
            .unwrap();

        let outcome = assign_by_hall(&[player("新人", 1, None)], &config);

        assert_eq!(outcome.configuration.occupied_count(), 1);
        assert_eq!(name_at(&outcome.configuration, 3, 4, 5), None);
        assert_eq!(outcome.configuration.regiments[1].name, "先锋团");
        assert_eq!(outcome.configuration.id, config.id);
    }

    #[test]
    fn test_thirty_first_player_rolls_to_next_regiment() {
        let outcome = assign_by_hall(&many(31), &TeamConfiguration::default());

        assert_eq!(outcome.configuration.regiment_occupancy(0), 30);
        assert_eq!(outcome.configuration.regiment_occupancy(1), 1);
        assert_eq!(name_at(&outcome.configuration, 0, 4, 5), Some("p029".to_string()));
        assert_eq!(name_at(&outcome.configuration, 1, 0, 0), Some("p030".to_string()));
    }

    #[test]
    fn test_overflow_reports_unassigned() {
        let outcome = assign_by_hall(&many(170), &TeamConfiguration::default());

        assert_eq!(outcome.assigned, TOTAL_CAPACITY);
        assert_eq!(outcome.unassigned_count(), 50);
        assert!(outcome.is_partial());
        assert_eq!(outcome.unassigned[0].name, "p120");
        assert_eq!(outcome.unassigned[49].name, "p169");
        for r in 0..REGIMENT_COUNT {
            assert_eq!(outcome.configuration.regiment_occupancy(r), REGIMENT_CAPACITY);
        }
    }

    #[test]
    fn test_empty_roster_clears_board() {
        let outcome = assign_by_hall(&[], &TeamConfiguration::default());
        assert_eq!(outcome.assigned, 0);
        assert_eq!(outcome.configuration.occupied_count(), 0);
    }

    proptest! {
        #[test]
        fn prop_capacity_invariant(
            seeds in proptest::collection::vec((0u64..500, proptest::option::of(0u8..4)), 0..220)
        ) {
            let players: Vec<_> = seeds
                .iter()
                .enumerate()
                .map(|(i, (power, hall))| {
                    let hall = hall.map(|h| format!("hall-{}", h));
                    player(&format!("p{}", i), *power, hall.as_deref())
                })
                .collect();

            let outcome = assign_by_hall(&players, &TeamConfiguration::default());

            for r in 0..REGIMENT_COUNT {
                prop_assert!(outcome.configuration.regiment_occupancy(r) <= REGIMENT_CAPACITY);
            }
            prop_assert!(outcome.configuration.occupied_count() <= TOTAL_CAPACITY);
            prop_assert_eq!(
                outcome.unassigned_count(),
                players.len().saturating_sub(TOTAL_CAPACITY)
            );
            prop_assert_eq!(outcome.assigned + outcome.unassigned_count(), players.len());
        }
    }
}
