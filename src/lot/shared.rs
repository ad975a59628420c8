//! Thread-safe handle to a parking lot

use super::engine::{LotStats, ParkOutcome, ParkingLot};
use super::slot::SlotNumber;
use super::ticket::{Driver, Ticket};
use crate::error::Result;
use parking_lot::Mutex;
use std::sync::Arc;

/// Parking lot shared between threads
///
/// Pool and directory change together, so the whole lot sits behind one
/// mutex and every call holds it for exactly one operation.
pub struct SharedParkingLot<P = Driver> {
    inner: Arc<Mutex<ParkingLot<P>>>,
}

impl<P> Clone for SharedParkingLot<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P> SharedParkingLot<P> {
    pub fn new(lot: ParkingLot<P>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(lot)),
        }
    }

    /// Create a shared lot with `capacity` free slots
    pub fn with_capacity(capacity: i64) -> Result<Self> {
        Ok(Self::new(ParkingLot::new(capacity)?))
    }

    pub fn initialize(&self, capacity: i64) -> Result<()> {
        self.inner.lock().initialize(capacity)
    }

    pub fn park(&self, identity: impl Into<String>, payload: P) -> Result<ParkOutcome> {
        self.inner.lock().park(identity, payload)
    }

    pub fn leave(&self, slot: SlotNumber) -> Option<Ticket<P>> {
        self.inner.lock().leave(slot)
    }

    pub fn slot_for(&self, identity: &str) -> Option<SlotNumber> {
        self.inner.lock().slot_for(identity)
    }

    pub fn identities_where<F>(&self, predicate: F) -> Vec<String>
    where
        F: Fn(&P) -> bool,
    {
        self.inner
            .lock()
            .identities_where(predicate)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn slots_where<F>(&self, predicate: F) -> Vec<SlotNumber>
    where
        F: Fn(&P) -> bool,
    {
        self.inner.lock().slots_where(predicate)
    }

    pub fn stats(&self) -> LotStats {
        self.inner.lock().stats()
    }

    /// Run several operations under a single lock
    pub fn with<R>(&self, f: impl FnOnce(&mut ParkingLot<P>) -> R) -> R {
        let mut lot = self.inner.lock();
        f(&mut *lot)
    }
}
