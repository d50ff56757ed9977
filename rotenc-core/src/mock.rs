//! Test doubles for the hardware traits

use core::cell::Cell;

use embedded_hal::delay::DelayNs;
use rotenc_hal::{Edge, EdgeInterrupts, Level, PinId, PinReader};

use crate::decode::Reading;

const PIN_COUNT: usize = 32;

/// GPIO bank whose levels tests set directly
pub struct MockPins {
    levels: Cell<[Level; PIN_COUNT]>,
}

impl MockPins {
    pub fn new() -> Self {
        Self {
            levels: Cell::new([Level::Low; PIN_COUNT]),
        }
    }

    pub fn set(&self, pin: PinId, level: Level) {
        let mut levels = self.levels.get();
        levels[usize::from(pin)] = level;
        self.levels.set(levels);
    }

    /// Drive both quadrature pins from an `AB` value
    pub fn set_ab(&self, pin_a: PinId, pin_b: PinId, bits: u8) {
        let reading = Reading::from_bits(bits);
        self.set(pin_a, reading.a);
        self.set(pin_b, reading.b);
    }
}

impl PinReader for MockPins {
    fn read_pin(&self, pin: PinId) -> Level {
        self.levels.get()[usize::from(pin)]
    }
}

/// Pin rejected by [`MockIrq`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotInterruptCapable(pub PinId);

/// Interrupt controller that records registrations
#[derive(Default)]
pub struct MockIrq {
    pub registered: Vec<(PinId, Edge)>,
    pub reject: Option<PinId>,
}

impl MockIrq {
    pub fn new() -> Self {
        Self::default()
    }

    /// Controller that refuses `pin`
    pub fn rejecting(pin: PinId) -> Self {
        Self {
            registered: Vec::new(),
            reject: Some(pin),
        }
    }

    pub fn edge_of(&self, pin: PinId) -> Option<Edge> {
        self.registered
            .iter()
            .find(|(registered, _)| *registered == pin)
            .map(|(_, edge)| *edge)
    }
}

impl EdgeInterrupts for MockIrq {
    type Error = NotInterruptCapable;

    fn register(&mut self, pin: PinId, edge: Edge) -> Result<(), Self::Error> {
        if self.reject == Some(pin) {
            return Err(NotInterruptCapable(pin));
        }
        self.deregister(pin);
        self.registered.push((pin, edge));
        Ok(())
    }

    fn deregister(&mut self, pin: PinId) {
        self.registered.retain(|(registered, _)| *registered != pin);
    }
}

/// Delay provider that records requested waits instead of waiting
#[derive(Default)]
pub struct MockDelay {
    pub waits_ns: Vec<u32>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.waits_ns.push(ns);
    }

    fn delay_us(&mut self, us: u32) {
        self.waits_ns.push(us.saturating_mul(1_000));
    }
}
