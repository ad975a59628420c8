//! Slot numbering

use serde::{Deserialize, Serialize};
use std::fmt;
use std::num::NonZeroU32;

/// Number of a parking slot, counted from 1 at the entry terminal
///
/// Lower numbers are nearer the entry, which is why the engine always
/// hands out the smallest free one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlotNumber(NonZeroU32);

impl SlotNumber {
    /// Protocol value standing for "no slot" (lot full, car not found)
    pub const SENTINEL: i64 = -1;

    /// Create a slot number; slot 0 does not exist
    pub fn new(number: u32) -> Option<Self> {
        NonZeroU32::new(number).map(Self)
    }

    /// Raw slot number
    pub fn get(self) -> u32 {
        self.0.get()
    }

    /// Translate an optional slot into the protocol integer
    pub fn to_wire(slot: Option<SlotNumber>) -> i64 {
        slot.map_or(Self::SENTINEL, |s| i64::from(s.get()))
    }
}

impl TryFrom<i64> for SlotNumber {
    type Error = i64;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u32::try_from(value)
            .ok()
            .and_then(SlotNumber::new)
            .ok_or(value)
    }
}

impl fmt::Display for SlotNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slot_number_creation() {
        let slot = SlotNumber::new(5).unwrap();
        assert_eq!(slot.get(), 5);
        assert_eq!(slot.to_string(), "5");

        // There is no slot zero
        assert!(SlotNumber::new(0).is_none());
    }

    #[test]
    fn test_slot_number_ordering() {
        let near = SlotNumber::new(1).unwrap();
        let far = SlotNumber::new(12).unwrap();
        assert!(near < far);
    }

    #[test]
    fn test_wire_sentinel() {
        assert_eq!(SlotNumber::to_wire(None), -1);
        assert_eq!(SlotNumber::to_wire(SlotNumber::new(3)), 3);
    }

    #[test]
    fn test_try_from_protocol_integer() {
        assert_eq!(SlotNumber::try_from(7), Ok(SlotNumber::new(7).unwrap()));
        assert_eq!(SlotNumber::try_from(0), Err(0));
        assert_eq!(SlotNumber::try_from(-1), Err(-1));
        assert!(SlotNumber::try_from(i64::from(u32::MAX) + 1).is_err());
    }
}
