//! Line-oriented command interpreter
//!
//! Maps the text protocol onto the typed `ParkingLot` API and renders the
//! results. The engine never sees a command line.
//!
//! # Protocol
//!
//! ```text
//! Create_parking_lot 6
//! Park KA-01-HH-1234 driver_age 21
//! Slot_numbers_for_driver_of_age 21
//! Slot_number_for_car_with_number PB-01-HH-1234
//! Leave 2
//! Vehicle_registration_number_for_driver_of_age 18
//! ```

pub mod executor;
pub mod parser;

pub use executor::{CommandExecutor, Response, RunSummary};
pub use parser::Command;
