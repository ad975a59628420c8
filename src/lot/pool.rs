//! Free slot pool

use super::slot::SlotNumber;
use crate::error::{Error, Result};
use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Largest lot a pool will build
pub const MAX_CAPACITY: u32 = 1 << 20;

/// Pool of free slots
///
/// Uses a min-heap so the nearest free slot is always on top.
#[derive(Debug, Clone)]
pub struct SlotPool {
    /// Number of slots in the lot
    capacity: u32,
    /// Free slots
    free_slots: BinaryHeap<Reverse<SlotNumber>>,
}

impl SlotPool {
    /// Create a pool holding every slot in `[1, capacity]`
    pub fn new(capacity: i64) -> Result<Self> {
        let mut pool = Self {
            capacity: 0,
            free_slots: BinaryHeap::new(),
        };
        pool.initialize(capacity)?;
        Ok(pool)
    }

    /// Reset the pool to `{1, ..., capacity}`
    ///
    /// On error the pool keeps its previous contents.
    pub fn initialize(&mut self, capacity: i64) -> Result<()> {
        let capacity = u32::try_from(capacity)
            .ok()
            .filter(|c| (1..=MAX_CAPACITY).contains(c))
            .ok_or(Error::InvalidCapacity(capacity))?;

        // Bulk build: BinaryHeap::from heapifies in O(n)
        let slots: Vec<_> = (1..=capacity)
            .filter_map(SlotNumber::new)
            .map(Reverse)
            .collect();

        self.free_slots = BinaryHeap::from(slots);
        self.capacity = capacity;
        Ok(())
    }

    /// Remove and return the smallest free slot
    pub fn take_minimum(&mut self) -> Result<SlotNumber> {
        self.free_slots
            .pop()
            .map(|Reverse(slot)| slot)
            .ok_or(Error::PoolExhausted {
                capacity: self.capacity,
            })
    }

    /// Return a slot to the pool
    ///
    /// The slot must currently be taken. Handing back a free slot means the
    /// caller has lost track of occupancy.
    pub fn give_back(&mut self, slot: SlotNumber) {
        debug_assert!(
            slot.get() <= self.capacity,
            "slot {} outside lot of {} slots",
            slot,
            self.capacity
        );
        debug_assert!(!self.contains(slot), "slot {} is already free", slot);
        self.free_slots.push(Reverse(slot));
    }

    /// Smallest free slot, without taking it
    pub fn peek_minimum(&self) -> Option<SlotNumber> {
        self.free_slots.peek().map(|Reverse(slot)| *slot)
    }

    /// Whether a slot is currently free (linear)
    pub fn contains(&self, slot: SlotNumber) -> bool {
        self.free_slots.iter().any(|Reverse(s)| *s == slot)
    }

    pub fn capacity(&self) -> u32 {
        self.capacity
    }

    pub fn free_count(&self) -> u32 {
        self.free_slots.len() as u32
    }

    /// Slots currently handed out
    pub fn occupied_count(&self) -> u32 {
        self.capacity - self.free_count()
    }

    pub fn is_exhausted(&self) -> bool {
        self.free_slots.is_empty()
    }

    /// Free slots in ascending order
    pub fn free_slots(&self) -> Vec<SlotNumber> {
        let mut slots: Vec<_> = self.free_slots.iter().map(|Reverse(s)| *s).collect();
        slots.sort_unstable();
        slots
    }
}
