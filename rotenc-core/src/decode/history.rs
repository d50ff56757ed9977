//! History register
//!
//! Holds the previous and current (A, B) samples as the nibble
//! `prevA prevB curA curB` (MSB first). The current pair is always the
//! most recent hardware read; the previous pair is the current pair of
//! the read before it.

use super::Reading;

const NIBBLE_MASK: u8 = 0x0F;

/// Previous and current quadrature readings packed into 4 bits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HistoryNibble(u8);

impl HistoryNibble {
    /// Empty history (both readings 00)
    pub const fn new() -> Self {
        Self(0)
    }

    /// History at rest on `reading` (previous == current)
    pub const fn seeded(reading: Reading) -> Self {
        Self((reading.bits() << 2) | reading.bits())
    }

    /// Shift in a new reading and return the resulting nibble
    pub fn push(&mut self, reading: Reading) -> u8 {
        self.0 = ((self.0 << 2) | reading.bits()) & NIBBLE_MASK;
        self.0
    }

    /// Raw nibble value (0..=15)
    pub const fn value(self) -> u8 {
        self.0
    }

    /// Reading before the most recent one
    pub const fn previous(self) -> Reading {
        Reading::from_bits(self.0 >> 2)
    }

    /// Most recent reading
    pub const fn current(self) -> Reading {
        Reading::from_bits(self.0 & 0b11)
    }
}
