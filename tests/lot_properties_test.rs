//! Property tests: the engine against a plain ordered-set model

use parking_management::{Driver, ParkOutcome, ParkingLot, SlotNumber};
use proptest::prelude::*;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone)]
enum Op {
    Park { id: u8, age: u8 },
    Leave { slot: u32 },
}

fn arb_op(capacity: u32) -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0u8..24, 18u8..22).prop_map(|(id, age)| Op::Park { id, age }),
        2 => (0..=capacity + 1).prop_map(|slot| Op::Leave { slot }),
    ]
}

fn arb_session() -> impl Strategy<Value = (u32, Vec<Op>)> {
    (1u32..16).prop_flat_map(|capacity| {
        (
            Just(capacity),
            proptest::collection::vec(arb_op(capacity), 0..120),
        )
    })
}

proptest! {
    #[test]
    fn engine_matches_model((capacity, ops) in arb_session()) {
        let mut lot = ParkingLot::new(i64::from(capacity)).expect("valid capacity");

        // Model: free slots as an ordered set, occupants by slot
        let mut free: BTreeSet<u32> = (1..=capacity).collect();
        let mut parked: BTreeMap<u32, (String, Driver)> = BTreeMap::new();

        for op in ops {
            match op {
                Op::Park { id, age } => {
                    let identity = format!("CAR-{}", id);
                    let driver = Driver::new(u32::from(age));
                    let already = parked.values().any(|(held, _)| *held == identity);
                    let result = lot.park(identity.clone(), driver);

                    if free.is_empty() {
                        prop_assert_eq!(result.ok(), Some(ParkOutcome::Full));
                    } else if already {
                        prop_assert!(result.is_err());
                    } else {
                        // Minimality: always the smallest free slot
                        let expected = free.pop_first().expect("non-empty");
                        prop_assert_eq!(
                            result.ok().and_then(ParkOutcome::slot).map(SlotNumber::get),
                            Some(expected)
                        );
                        parked.insert(expected, (identity, driver));
                    }
                }
                Op::Leave { slot } => {
                    let released = SlotNumber::new(slot).and_then(|s| lot.leave(s));
                    match parked.remove(&slot) {
                        Some((identity, driver)) => {
                            let ticket = released.expect("occupied slot releases a ticket");
                            prop_assert_eq!(ticket.identity(), identity.as_str());
                            prop_assert_eq!(*ticket.payload(), driver);
                            free.insert(slot);
                        }
                        None => prop_assert!(released.is_none()),
                    }
                }
            }

            // Partition: pool and directory split [1, capacity] exactly
            prop_assert!(lot.verify_partition().is_ok());
            prop_assert_eq!(lot.free_count() as usize, free.len());
            prop_assert_eq!(lot.occupied_count() as usize, parked.len());
        }

        for (slot, (identity, _)) in &parked {
            prop_assert_eq!(lot.slot_for(identity).map(SlotNumber::get), Some(*slot));
        }
    }

    #[test]
    fn payload_queries_return_every_match_once(ages in proptest::collection::vec(18u32..24, 1..30)) {
        let mut lot = ParkingLot::new(ages.len() as i64).expect("valid capacity");
        for (n, age) in ages.iter().enumerate() {
            lot.park(format!("CAR-{}", n), Driver::new(*age)).expect("lot has room");
        }

        for age in 18u32..24 {
            let mut slots: Vec<u32> = lot
                .slots_where(|d| d.age == age)
                .into_iter()
                .map(SlotNumber::get)
                .collect();
            slots.sort_unstable();

            let expected: Vec<u32> = ages
                .iter()
                .enumerate()
                .filter(|(_, a)| **a == age)
                .map(|(n, _)| n as u32 + 1)
                .collect();
            prop_assert_eq!(slots, expected);

            let identities = lot.identities_where(|d| d.age == age);
            let unique: BTreeSet<_> = identities.iter().collect();
            prop_assert_eq!(unique.len(), identities.len());
        }
    }
}
