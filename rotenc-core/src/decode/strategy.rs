//! Decode strategies
//!
//! One variant per algorithm, built once from the configured
//! [`DecodeMode`]. The variant owns whatever state the algorithm persists
//! between interrupts: nothing for EdgeSample, the history nibble for the
//! lookup table, and the table row for the state machines.

use crate::config::DecodeMode;

use super::table::{quadrature_direction, TransitionTable, FULL_STEP, HALF_STEP};
use super::{Direction, HistoryNibble, Reading};

/// Active decoding algorithm and its persistent state
#[derive(Debug, Clone, Copy)]
pub enum Decoder {
    /// B level at the rising edge of A decides the direction
    EdgeSample,
    /// Direction lookup on the `prevA prevB curA curB` nibble
    LookupTable {
        /// Previous and current readings
        history: HistoryNibble,
    },
    /// Debounced transition table walk
    StateMachine {
        /// Half-step or full-step table
        table: &'static TransitionTable,
        /// Current row, always valid for `table`
        state: u8,
    },
}

impl Decoder {
    /// Build the decoder for `mode`, in its initial state
    pub fn new(mode: DecodeMode) -> Self {
        match mode {
            DecodeMode::EdgeSample => Decoder::EdgeSample,
            DecodeMode::LookupTable2x | DecodeMode::LookupTable4x => Decoder::LookupTable {
                history: HistoryNibble::new(),
            },
            DecodeMode::HalfStep => Decoder::StateMachine {
                table: &HALF_STEP,
                state: TransitionTable::START,
            },
            DecodeMode::FullStep => Decoder::StateMachine {
                table: &FULL_STEP,
                state: TransitionTable::START,
            },
        }
    }

    /// Record the resting position sampled at initialization
    ///
    /// Only the lookup table keeps raw readings; the state machines always
    /// begin at their start row.
    pub fn seed(&mut self, reading: Reading) {
        if let Decoder::LookupTable { history } = self {
            *history = HistoryNibble::seeded(reading);
        }
    }

    /// Decode a new reading
    ///
    /// Returns the value to publish to the direction cell, or `None` when
    /// the algorithm leaves the cell untouched. The lookup table publishes
    /// its entry even when that entry is [`Direction::Stationary`].
    pub fn decode(&mut self, reading: Reading) -> Option<Direction> {
        match self {
            Decoder::EdgeSample => Some(if reading.b.is_high() {
                Direction::Clockwise
            } else {
                Direction::CounterClockwise
            }),
            Decoder::LookupTable { history } => {
                let nibble = history.push(reading);
                Some(quadrature_direction(nibble))
            }
            Decoder::StateMachine { table, state } => {
                let transition = table.step(*state, reading);
                *state = transition.next;
                transition.direction
            }
        }
    }

    /// Current transition-table row (state machines only)
    pub fn state(&self) -> Option<u8> {
        match self {
            Decoder::StateMachine { state, .. } => Some(*state),
            _ => None,
        }
    }

    /// Return to the initial state
    pub fn reset(&mut self) {
        match self {
            Decoder::EdgeSample => {}
            Decoder::LookupTable { history } => *history = HistoryNibble::new(),
            Decoder::StateMachine { state, .. } => *state = TransitionTable::START,
        }
    }
}
