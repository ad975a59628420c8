//! End-to-end scenarios for the slot allocation engine

use parking_management::error::{Error, Result};
use parking_management::{Driver, ParkOutcome, ParkingLot, SlotNumber};

fn slot(n: u32) -> SlotNumber {
    SlotNumber::new(n).expect("slot numbers start at 1")
}

#[test]
fn test_single_vehicle_round_trip() -> Result<()> {
    let mut lot = ParkingLot::new(6)?;

    let outcome = lot.park("WB-01-RM-1234", Driver::new(23))?;
    assert_eq!(outcome, ParkOutcome::Parked(slot(1)));

    assert_eq!(lot.slot_for("WB-01-RM-1234"), Some(slot(1)));
    assert_eq!(lot.identities_where(|d| d.age == 23), vec!["WB-01-RM-1234"]);
    assert_eq!(lot.slots_where(|d| d.age == 23), vec![slot(1)]);

    let ticket = lot.leave(slot(1)).expect("slot 1 holds a ticket");
    assert_eq!(ticket.identity(), "WB-01-RM-1234");
    assert_eq!(ticket.slot(), slot(1));
    assert_eq!(ticket.payload().age, 23);

    assert_eq!(lot.slot_for("WB-01-RM-1234"), None);
    assert_eq!(SlotNumber::to_wire(lot.slot_for("WB-01-RM-1234")), -1);

    // The slot is immediately available again
    assert_eq!(lot.park("WB-01-RM-5678", Driver::new(40))?.slot(), Some(slot(1)));
    Ok(())
}

#[test]
fn test_fill_lot_then_reuse_released_slot() -> Result<()> {
    let mut lot = ParkingLot::new(6)?;

    for n in 1..=6 {
        let outcome = lot.park(format!("KA-01-HH-{:04}", n), Driver::new(20 + n))?;
        assert_eq!(outcome, ParkOutcome::Parked(slot(n)));
    }

    // Seventh car is turned away
    let outcome = lot.park("KA-01-HH-0007", Driver::new(30))?;
    assert_eq!(outcome, ParkOutcome::Full);
    assert_eq!(outcome.to_wire(), -1);

    let ticket = lot.leave(slot(3)).expect("slot 3 holds a ticket");
    assert_eq!(ticket.identity(), "KA-01-HH-0003");

    // Eighth car gets the freed slot
    assert_eq!(
        lot.park("KA-01-HH-0008", Driver::new(30))?,
        ParkOutcome::Parked(slot(3))
    );
    assert!(lot.is_full());

    lot.verify_partition()?;
    Ok(())
}

#[test]
fn test_nearest_slot_after_scattered_departures() -> Result<()> {
    let mut lot = ParkingLot::new(10)?;
    for n in 1..=10 {
        lot.park(format!("CAR-{}", n), Driver::new(30))?;
    }

    for n in [9, 4, 7] {
        lot.leave(slot(n));
    }

    let order: Vec<_> = ["X", "Y", "Z"]
        .into_iter()
        .map(|id| lot.park(id, Driver::new(50)).map(ParkOutcome::slot))
        .collect::<Result<_>>()?;
    assert_eq!(order, vec![Some(slot(4)), Some(slot(7)), Some(slot(9))]);
    Ok(())
}

#[test]
fn test_duplicate_registration_is_rejected_without_losing_a_slot() -> Result<()> {
    let mut lot = ParkingLot::new(2)?;
    lot.park("KA-01-HH-1234", Driver::new(21))?;

    for _ in 0..3 {
        match lot.park("KA-01-HH-1234", Driver::new(21)) {
            Err(Error::DuplicateOccupant { identity, slot: held }) => {
                assert_eq!(identity, "KA-01-HH-1234");
                assert_eq!(held, slot(1));
            }
            other => panic!("Expected DuplicateOccupant, got {:?}", other),
        }
    }

    assert_eq!(lot.free_count(), 1);
    assert_eq!(lot.stats().rejected_duplicate, 3);
    assert_eq!(
        lot.park("PB-01-HH-1234", Driver::new(21))?,
        ParkOutcome::Parked(slot(2))
    );
    lot.verify_partition()?;
    Ok(())
}

#[test]
fn test_invalid_capacity_is_rejected() {
    for capacity in [0, -1, -100] {
        assert!(matches!(
            ParkingLot::<Driver>::new(capacity),
            Err(Error::InvalidCapacity(c)) if c == capacity
        ));
    }
}

#[test]
fn test_leave_is_idempotent() -> Result<()> {
    let mut lot = ParkingLot::new(3)?;
    lot.park("KA-01-HH-1234", Driver::new(21))?;

    assert!(lot.leave(slot(1)).is_some());
    assert!(lot.leave(slot(1)).is_none());
    assert_eq!(lot.free_count(), 3);
    assert_eq!(lot.stats().departed_total, 1);
    Ok(())
}

#[test]
fn test_tickets_listed_in_arrival_order() -> Result<()> {
    let mut lot = ParkingLot::new(4)?;
    lot.park("A", Driver::new(20))?;
    lot.park("B", Driver::new(21))?;
    lot.park("C", Driver::new(22))?;
    lot.leave(slot(1));
    lot.park("D", Driver::new(23))?;

    let listed: Vec<String> = lot.tickets().map(|t| t.to_string()).collect();
    assert_eq!(listed, vec!["B - 21 - 2", "C - 22 - 3", "D - 23 - 1"]);
    Ok(())
}
