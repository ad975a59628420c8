//! Slot allocation engine
//!
//! Hands the nearest free slot to an arriving vehicle and keeps track of
//! who is parked where until they leave.
//!
//! # Architecture
//!
//! ```text
//! ParkingLot (orchestrator)
//!   ├─→ SlotPool            → Free: min-heap [2, 5, 6]
//!   └─→ OccupancyDirectory
//!         ├─→ "KA-01-HH-1234" → Ticket(slot=1, age=21)
//!         ├─→ "PB-01-HH-1234" → Ticket(slot=3, age=21)
//!         └─→ "HR-29-TG-3098" → Ticket(slot=4, age=39)
//! ```
//!
//! Every slot in `[1, capacity]` lives in exactly one of the two
//! structures. Only `ParkingLot` touches both, so park and leave move a
//! slot across atomically (a failed insert puts the slot straight back).
//!
//! `SharedParkingLot` puts the whole pair behind one mutex for hosts that
//! share the lot between threads.

pub mod directory;
pub mod engine;
pub mod pool;
pub mod shared;
pub mod slot;
pub mod ticket;

pub use directory::OccupancyDirectory;
pub use engine::{LotStats, ParkOutcome, ParkingLot};
pub use pool::SlotPool;
pub use shared::SharedParkingLot;
pub use slot::SlotNumber;
pub use ticket::{Driver, Ticket};
