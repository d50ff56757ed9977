//! Quadrature decoding
//!
//! The decoder consumes (A, B) samples taken inside the edge interrupt and
//! turns them into direction events. Five algorithms are available, each
//! trading latency against bounce immunity:
//!
//! | Mode          | Edges    | Emits per cycle | Bounce immunity |
//! |---------------|----------|-----------------|-----------------|
//! | EdgeSample    | A rising | 1               | delay only      |
//! | LookupTable2x | A both   | 2               | none            |
//! | LookupTable4x | A, B     | 4               | none            |
//! | HalfStep      | A, B     | 2               | state machine   |
//! | FullStep      | A, B     | 1               | state machine   |
//!
//! Clockwise is the sequence AB = 11 → 01 → 00 → 10 → 11.
//!
//! LookupTable2x samples both channels but only on A edges, so B usually
//! moved since the previous sample. Those two-bit changes look up as
//! ambiguous (0); clean 2x output needs the B edges of LookupTable4x.

pub mod history;
pub mod strategy;
pub mod table;

pub use history::HistoryNibble;
pub use strategy::Decoder;
pub use table::{Transition, TransitionTable, FULL_STEP, HALF_STEP, QUADRATURE_DIRECTIONS};

use rotenc_hal::{Level, PinId, PinReader};

/// Rotation direction of one decoded step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(i8)]
pub enum Direction {
    /// Negative step
    CounterClockwise = -1,
    /// No rotation determined
    #[default]
    Stationary = 0,
    /// Positive step
    Clockwise = 1,
}

impl Direction {
    /// Signed step (-1, 0, or +1)
    pub const fn delta(self) -> i8 {
        self as i8
    }

    /// Direction from the sign of a step count
    pub const fn from_delta(delta: i16) -> Self {
        if delta > 0 {
            Direction::Clockwise
        } else if delta < 0 {
            Direction::CounterClockwise
        } else {
            Direction::Stationary
        }
    }

    /// Check if this is an actual rotation
    pub const fn is_moving(self) -> bool {
        !matches!(self, Direction::Stationary)
    }

    /// Opposite rotation
    pub const fn reversed(self) -> Self {
        match self {
            Direction::Clockwise => Direction::CounterClockwise,
            Direction::CounterClockwise => Direction::Clockwise,
            Direction::Stationary => Direction::Stationary,
        }
    }
}

/// One sample of both quadrature channels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Reading {
    /// Channel A level
    pub a: Level,
    /// Channel B level
    pub b: Level,
}

impl Reading {
    /// Create a reading from two levels
    pub const fn new(a: Level, b: Level) -> Self {
        Self { a, b }
    }

    /// Create a reading from the 2-bit value `AB`
    pub const fn from_bits(bits: u8) -> Self {
        Self {
            a: if bits & 0b10 != 0 { Level::High } else { Level::Low },
            b: if bits & 0b01 != 0 { Level::High } else { Level::Low },
        }
    }

    /// 2-bit value `AB` (A is the high bit)
    ///
    /// Doubles as the column index into a transition table.
    pub const fn bits(self) -> u8 {
        (self.a.bit() << 1) | self.b.bit()
    }

    /// Sample both channels
    pub fn sample<R: PinReader>(reader: &R, pin_a: PinId, pin_b: PinId) -> Self {
        Self {
            a: reader.read_pin(pin_a),
            b: reader.read_pin(pin_b),
        }
    }
}

/// Clockwise sequence of `AB` values starting from the 11 rest position
#[cfg(test)]
pub(crate) const CW_CYCLE: [u8; 4] = [0b01, 0b00, 0b10, 0b11];

/// Counter-clockwise sequence of `AB` values starting from the 11 rest position
#[cfg(test)]
pub(crate) const CCW_CYCLE: [u8; 4] = [0b10, 0b00, 0b01, 0b11];
