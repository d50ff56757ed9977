//! Edge interrupt registration
//!
//! The platform owns the interrupt controller. The decoder tells it which
//! pins and edges it cares about; the platform's handler then calls back
//! into the decoder with the pin that fired.

use crate::gpio::PinId;

/// Edge(s) that trigger an interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Low to high transition
    Rising,
    /// High to low transition
    Falling,
    /// Any transition
    Both,
}

impl Edge {
    /// Check if a low to high transition triggers this edge
    pub const fn includes_rising(self) -> bool {
        matches!(self, Edge::Rising | Edge::Both)
    }

    /// Check if a high to low transition triggers this edge
    pub const fn includes_falling(self) -> bool {
        matches!(self, Edge::Falling | Edge::Both)
    }
}

/// Edge-triggered interrupt registry
///
/// Implementations route the interrupt for a registered pin to the
/// decoder's edge handler. Registering a pin twice replaces the edge
/// selection.
pub trait EdgeInterrupts {
    /// Error type for registration (e.g. pin not interrupt-capable)
    type Error;

    /// Enable the interrupt for `pin` on `edge`
    fn register(&mut self, pin: PinId, edge: Edge) -> Result<(), Self::Error>;

    /// Disable the interrupt for `pin`
    ///
    /// Deregistering a pin that is not registered is a no-op.
    fn deregister(&mut self, pin: PinId);
}
