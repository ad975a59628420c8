// Parking Management - Rust Implementation
// Nearest-slot allocation engine for a fixed-capacity parking lot

#![warn(rust_2018_idioms)]

pub mod command;
pub mod config;
pub mod lot;
pub mod metrics;

// Re-exports for convenience
pub use command::{Command, CommandExecutor, Response};
pub use crate::config::AppConfig;
pub use lot::{Driver, LotStats, ParkOutcome, ParkingLot, SharedParkingLot, SlotNumber, Ticket};

/// Parking management error types
pub mod error {
    use crate::lot::slot::SlotNumber;
    use crate::lot::pool::MAX_CAPACITY;
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum Error {
        #[error("Invalid capacity {0}: a parking lot holds between 1 and {max} slots", max = MAX_CAPACITY)]
        InvalidCapacity(i64),

        #[error("No free slot left in a lot of {capacity} slots")]
        PoolExhausted { capacity: u32 },

        #[error("Vehicle \"{identity}\" is already parked at slot number {slot}")]
        DuplicateOccupant { identity: String, slot: SlotNumber },

        #[error("Slot number {0} already holds a ticket")]
        SlotOccupied(SlotNumber),

        #[error("Parking lot has not been created")]
        NotInitialized,

        #[error("Unknown command: {0}")]
        UnknownCommand(String),

        #[error("{0}")]
        InvalidCommand(String),

        #[error("Configuration error: {0}")]
        Config(String),

        #[error("Internal error: {0}")]
        Internal(String),

        #[error("I/O error: {0}")]
        Io(#[from] std::io::Error),
    }

    pub type Result<T> = std::result::Result<T, Error>;
}

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
