//! Parking lot orchestrator
//!
//! Combines SlotPool + OccupancyDirectory.
//! This is the only layer allowed to touch both, so it owns the rule that
//! every slot is either free or ticketed, never both and never neither.

use super::directory::OccupancyDirectory;
use super::pool::SlotPool;
use super::slot::SlotNumber;
use super::ticket::{Driver, Ticket};
use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Result of a park request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParkOutcome {
    /// Vehicle parked at this slot
    Parked(SlotNumber),
    /// Every slot is taken
    Full,
}

impl ParkOutcome {
    pub fn slot(self) -> Option<SlotNumber> {
        match self {
            ParkOutcome::Parked(slot) => Some(slot),
            ParkOutcome::Full => None,
        }
    }

    /// Protocol integer: the slot, or -1 when full
    pub fn to_wire(self) -> i64 {
        SlotNumber::to_wire(self.slot())
    }
}

/// Nearest-slot parking lot
///
/// Provides allocation using:
/// - SlotPool for the free slots (min-heap)
/// - OccupancyDirectory for identity→ticket and slot→ticket lookups
#[derive(Debug, Clone)]
pub struct ParkingLot<P = Driver> {
    pool: SlotPool,
    directory: OccupancyDirectory<P>,
    counters: Counters,
}

#[derive(Debug, Clone, Copy, Default)]
struct Counters {
    parked: u64,
    departed: u64,
    rejected_full: u64,
    rejected_duplicate: u64,
}

impl<P> ParkingLot<P> {
    /// Create a lot with slots `1..=capacity`, all free
    pub fn new(capacity: i64) -> Result<Self> {
        let pool = SlotPool::new(capacity)?;
        info!(capacity = pool.capacity(), "Created parking lot");

        Ok(Self {
            pool,
            directory: OccupancyDirectory::new(),
            counters: Counters::default(),
        })
    }

    /// Reset to an empty lot of `capacity` slots
    ///
    /// Every ticket is dropped. An invalid capacity leaves the lot as it was.
    pub fn initialize(&mut self, capacity: i64) -> Result<()> {
        self.pool.initialize(capacity)?;
        self.directory.clear();
        self.counters = Counters::default();

        info!(capacity = self.pool.capacity(), "Reset parking lot");
        Ok(())
    }

    /// Park a vehicle at the nearest free slot
    ///
    /// Fails with `DuplicateOccupant` when the identity is already parked;
    /// the slot taken for it goes straight back to the pool.
    pub fn park(&mut self, identity: impl Into<String>, payload: P) -> Result<ParkOutcome> {
        let identity = identity.into();

        if self.is_full() {
            self.counters.rejected_full += 1;
            debug!(identity = %identity, "Lot full, no slot allocated");
            return Ok(ParkOutcome::Full);
        }

        let slot = match self.pool.take_minimum() {
            Ok(slot) => slot,
            Err(Error::PoolExhausted { .. }) => {
                self.counters.rejected_full += 1;
                return Ok(ParkOutcome::Full);
            }
            Err(e) => return Err(e),
        };

        if let Err(e) = self.directory.insert(identity, slot, payload) {
            self.pool.give_back(slot);
            if matches!(e, Error::DuplicateOccupant { .. }) {
                self.counters.rejected_duplicate += 1;
            }
            debug!(slot = %slot, error = %e, "Rolled back slot allocation");
            return Err(e);
        }

        self.counters.parked += 1;
        debug!(slot = %slot, "Allocated slot");
        Ok(ParkOutcome::Parked(slot))
    }

    /// Vacate a slot, returning the ticket that held it
    ///
    /// A free or unknown slot yields `None` and changes nothing.
    pub fn leave(&mut self, slot: SlotNumber) -> Option<Ticket<P>> {
        let ticket = self.directory.remove_by_slot(slot)?;
        self.pool.give_back(slot);
        self.counters.departed += 1;

        debug!(slot = %slot, identity = %ticket.identity(), "Released slot");
        Some(ticket)
    }

    /// Slot held by a vehicle
    pub fn slot_for(&self, identity: &str) -> Option<SlotNumber> {
        self.directory.lookup_slot(identity)
    }

    /// Identities whose payload matches, in arrival order
    pub fn identities_where<F>(&self, predicate: F) -> Vec<&str>
    where
        F: Fn(&P) -> bool,
    {
        self.directory
            .find_by_payload(predicate)
            .into_iter()
            .map(|(identity, _)| identity)
            .collect()
    }

    /// Slots whose occupant's payload matches, in arrival order
    pub fn slots_where<F>(&self, predicate: F) -> Vec<SlotNumber>
    where
        F: Fn(&P) -> bool,
    {
        self.directory
            .find_by_payload(predicate)
            .into_iter()
            .map(|(_, slot)| slot)
            .collect()
    }

    pub fn ticket_at(&self, slot: SlotNumber) -> Option<&Ticket<P>> {
        self.directory.ticket_at(slot)
    }

    /// Live tickets in arrival order
    pub fn tickets(&self) -> impl Iterator<Item = &Ticket<P>> + '_ {
        self.directory.iter()
    }

    pub fn capacity(&self) -> u32 {
        self.pool.capacity()
    }

    pub fn occupied_count(&self) -> u32 {
        self.pool.occupied_count()
    }

    pub fn free_count(&self) -> u32 {
        self.pool.free_count()
    }

    pub fn is_full(&self) -> bool {
        self.pool.occupied_count() == self.pool.capacity()
    }

    /// Occupancy snapshot and lifetime counters
    pub fn stats(&self) -> LotStats {
        LotStats {
            capacity: self.capacity(),
            occupied: self.occupied_count(),
            free: self.free_count(),
            next_free: self.pool.peek_minimum(),
            parked_total: self.counters.parked,
            departed_total: self.counters.departed,
            rejected_full: self.counters.rejected_full,
            rejected_duplicate: self.counters.rejected_duplicate,
        }
    }

    /// Check that free and ticketed slots partition `[1, capacity]`
    pub fn verify_partition(&self) -> Result<()> {
        let free = self.pool.free_slots();
        let free_set: BTreeSet<_> = free.iter().copied().collect();
        if free_set.len() != free.len() {
            return Err(Error::Internal("Duplicate slot in free pool".to_string()));
        }

        let occupied: BTreeSet<_> = self.directory.occupied_slots().collect();
        if occupied.len() != self.directory.len() {
            return Err(Error::Internal(format!(
                "{} tickets share {} slots",
                self.directory.len(),
                occupied.len()
            )));
        }

        if let Some(slot) = free_set.intersection(&occupied).next() {
            return Err(Error::Internal(format!(
                "Slot {} is both free and occupied",
                slot
            )));
        }

        for n in 1..=self.capacity() {
            let Some(slot) = SlotNumber::new(n) else { continue };
            if !free_set.contains(&slot) && !occupied.contains(&slot) {
                return Err(Error::Internal(format!("Slot {} is lost", slot)));
            }
        }

        let total = free_set.len() + occupied.len();
        if total != self.capacity() as usize {
            return Err(Error::Internal(format!(
                "{} slots tracked in a lot of {}",
                total,
                self.capacity()
            )));
        }

        Ok(())
    }
}

/// Statistics for a parking lot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LotStats {
    pub capacity: u32,
    pub occupied: u32,
    pub free: u32,
    pub next_free: Option<SlotNumber>,
    pub parked_total: u64,
    pub departed_total: u64,
    pub rejected_full: u64,
    pub rejected_duplicate: u64,
}
