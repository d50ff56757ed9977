//! Transition tables
//!
//! The tables are plain data: a row per state, a column per `AB` reading
//! (00, 01, 10, 11). A cell holds the next state in its low nibble and an
//! optional direction flag in its high nibble. Only cells carrying a flag
//! emit a direction; bounce-induced back-and-forth transitions cycle
//! through flag-free cells and never reach one.
//!
//! The half-step and full-step tables follow Ben Buxton's rotary encoder
//! state machine.

use super::{Direction, Reading};

/// Cell flag: a clockwise step completed
pub const DIR_CW: u8 = 0x10;

/// Cell flag: a counter-clockwise step completed
pub const DIR_CCW: u8 = 0x20;

/// Cell bits holding the next state
pub const STATE_MASK: u8 = 0x0F;

/// Direction for each `prevA prevB curA curB` nibble
///
/// Zero entries are either no motion or transitions too ambiguous to trust
/// (both channels flipping at once).
pub const QUADRATURE_DIRECTIONS: [i8; 16] = [0, -1, 1, 0, 1, 0, 0, -1, -1, 0, 0, 1, 0, 1, -1, 0];

/// Look up the direction of a history nibble
pub fn quadrature_direction(nibble: u8) -> Direction {
    Direction::from_delta(i16::from(QUADRATURE_DIRECTIONS[usize::from(nibble & STATE_MASK)]))
}

/// Decoded table cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Transition {
    /// Next state (row index)
    pub next: u8,
    /// Emitted direction, if the cell is terminal
    pub direction: Option<Direction>,
}

impl Transition {
    /// Split a raw cell into next state and direction flag
    pub const fn from_cell(cell: u8) -> Self {
        let direction = if cell & DIR_CW != 0 {
            Some(Direction::Clockwise)
        } else if cell & DIR_CCW != 0 {
            Some(Direction::CounterClockwise)
        } else {
            None
        };

        Self {
            next: cell & STATE_MASK,
            direction,
        }
    }
}

/// State transition table for the debounced decoders
#[derive(Debug)]
pub struct TransitionTable {
    rows: &'static [[u8; 4]],
    names: &'static [&'static str],
}

/// Half-step table: emits at both rest positions (11 and 00)
pub static HALF_STEP: TransitionTable = TransitionTable {
    rows: &[
        [0x03, 0x02, 0x01, 0x00],
        [0x23, 0x00, 0x01, 0x00],
        [0x13, 0x02, 0x00, 0x00],
        [0x03, 0x05, 0x04, 0x00],
        [0x03, 0x03, 0x04, 0x10],
        [0x03, 0x05, 0x03, 0x20],
    ],
    names: &[
        "start",
        "ccw begin",
        "cw begin",
        "halfway",
        "cw begin (halfway)",
        "ccw begin (halfway)",
    ],
};

/// Full-step table: emits once per cycle, on return to 11
pub static FULL_STEP: TransitionTable = TransitionTable {
    rows: &[
        [0x00, 0x02, 0x04, 0x00],
        [0x03, 0x00, 0x01, 0x10],
        [0x03, 0x02, 0x00, 0x00],
        [0x03, 0x02, 0x01, 0x00],
        [0x06, 0x00, 0x04, 0x00],
        [0x06, 0x05, 0x00, 0x20],
        [0x06, 0x05, 0x04, 0x00],
    ],
    names: &[
        "start",
        "cw end",
        "cw begin",
        "cw next",
        "ccw begin",
        "ccw end",
        "ccw next",
    ],
};

impl TransitionTable {
    /// Initial state of every table
    pub const START: u8 = 0;

    /// Raw rows
    pub const fn rows(&self) -> &'static [[u8; 4]] {
        self.rows
    }

    /// Number of states
    pub const fn len(&self) -> usize {
        self.rows.len()
    }

    /// Tables are never empty
    pub const fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Human-readable state name
    pub fn state_name(&self, state: u8) -> Option<&'static str> {
        self.names.get(usize::from(state)).copied()
    }

    /// Look up the transition for `reading` in `state`
    ///
    /// An out-of-range state is treated as [`START`](Self::START).
    pub fn step(&self, state: u8, reading: Reading) -> Transition {
        let row = self
            .rows
            .get(usize::from(state))
            .unwrap_or(&self.rows[usize::from(Self::START)]);
        Transition::from_cell(row[usize::from(reading.bits())])
    }
}
