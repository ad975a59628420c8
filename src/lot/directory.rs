//! Occupancy directory
//!
//! Maps occupant identity to the ticket it holds, with a reverse index
//! from slot number so departures by slot never scan.
//!
//! # Layout
//!
//! ```text
//! tickets:     {0 → T(KA-01, slot 1), 2 → T(HR-29, slot 2)}   ← admission order
//! by_identity: {KA-01 → 0, HR-29 → 2}
//! by_slot:     {1 → 0, 2 → 2}
//! ```
//!
//! Sequence numbers only grow, so iterating `tickets` yields the
//! current occupants in the order they arrived.

use super::slot::SlotNumber;
use super::ticket::{Driver, Ticket};
use crate::error::{Error, Result};
use std::collections::{BTreeMap, HashMap};

/// Live tickets keyed by occupant identity
#[derive(Debug, Clone)]
pub struct OccupancyDirectory<P = Driver> {
    /// Tickets by admission sequence
    tickets: BTreeMap<u64, Ticket<P>>,
    /// Identity → admission sequence
    by_identity: HashMap<String, u64>,
    /// Slot → admission sequence
    by_slot: HashMap<SlotNumber, u64>,
    /// Next admission sequence
    next_sequence: u64,
}

impl<P> Default for OccupancyDirectory<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> OccupancyDirectory<P> {
    pub fn new() -> Self {
        Self {
            tickets: BTreeMap::new(),
            by_identity: HashMap::new(),
            by_slot: HashMap::new(),
            next_sequence: 0,
        }
    }

    /// Issue and store a ticket
    ///
    /// Fails if the identity is already parked or the slot already holds
    /// a ticket; the directory is unchanged in both cases.
    pub fn insert(
        &mut self,
        identity: impl Into<String>,
        slot: SlotNumber,
        payload: P,
    ) -> Result<&Ticket<P>> {
        let identity = identity.into();

        if let Some(existing) = self.get(&identity) {
            return Err(Error::DuplicateOccupant {
                slot: existing.slot(),
                identity,
            });
        }
        if self.by_slot.contains_key(&slot) {
            return Err(Error::SlotOccupied(slot));
        }

        let sequence = self.next_sequence;
        self.next_sequence += 1;

        self.by_identity.insert(identity.clone(), sequence);
        self.by_slot.insert(slot, sequence);
        let ticket = self
            .tickets
            .entry(sequence)
            .or_insert(Ticket::new(identity, payload, slot));
        Ok(ticket)
    }

    /// Remove and return the ticket holding `slot`
    pub fn remove_by_slot(&mut self, slot: SlotNumber) -> Option<Ticket<P>> {
        let sequence = self.by_slot.remove(&slot)?;
        let ticket = self.tickets.remove(&sequence)?;
        self.by_identity.remove(ticket.identity());
        Some(ticket)
    }

    /// Slot held by an identity
    pub fn lookup_slot(&self, identity: &str) -> Option<SlotNumber> {
        self.get(identity).map(Ticket::slot)
    }

    /// Ticket held by an identity
    pub fn get(&self, identity: &str) -> Option<&Ticket<P>> {
        self.by_identity
            .get(identity)
            .and_then(|sequence| self.tickets.get(sequence))
    }

    /// Ticket parked at a slot
    pub fn ticket_at(&self, slot: SlotNumber) -> Option<&Ticket<P>> {
        self.by_slot
            .get(&slot)
            .and_then(|sequence| self.tickets.get(sequence))
    }

    /// `(identity, slot)` of every occupant whose payload matches, in arrival order
    pub fn find_by_payload<F>(&self, predicate: F) -> Vec<(&str, SlotNumber)>
    where
        F: Fn(&P) -> bool,
    {
        self.iter()
            .filter(|ticket| predicate(ticket.payload()))
            .map(|ticket| (ticket.identity(), ticket.slot()))
            .collect()
    }

    /// Live tickets in arrival order
    pub fn iter(&self) -> impl Iterator<Item = &Ticket<P>> + '_ {
        self.tickets.values()
    }

    pub fn occupied_slots(&self) -> impl Iterator<Item = SlotNumber> + '_ {
        self.by_slot.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }

    /// Drop every ticket
    pub fn clear(&mut self) {
        self.tickets.clear();
        self.by_identity.clear();
        self.by_slot.clear();
    }
}
