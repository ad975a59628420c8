//! Parking tickets

use super::slot::SlotNumber;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Attributes of the person driving a parked car
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Driver {
    pub age: u32,
}

impl Driver {
    pub fn new(age: u32) -> Self {
        Self { age }
    }
}

impl fmt::Display for Driver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.age)
    }
}

/// An active parking assignment
///
/// Issued when a vehicle is parked and handed back when it leaves.
/// Nothing changes a ticket in between.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket<P = Driver> {
    identity: String,
    payload: P,
    slot: SlotNumber,
}

impl<P> Ticket<P> {
    pub(crate) fn new(identity: String, payload: P, slot: SlotNumber) -> Self {
        Self {
            identity,
            payload,
            slot,
        }
    }

    /// Occupant identity (vehicle registration number)
    pub fn identity(&self) -> &str {
        &self.identity
    }

    pub fn payload(&self) -> &P {
        &self.payload
    }

    pub fn slot(&self) -> SlotNumber {
        self.slot
    }

    pub fn into_parts(self) -> (String, P, SlotNumber) {
        (self.identity, self.payload, self.slot)
    }
}

impl<P: fmt::Display> fmt::Display for Ticket<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - {}", self.identity, self.payload, self.slot)
    }
}
