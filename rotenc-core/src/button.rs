//! Push-button input
//!
//! No software filtering: each edge interrupt copies the pin level into
//! the button cell, relying on the interrupt controller's own debounce
//! window. An encoder without a button pin has no [`Button`] at all, so
//! the cell keeps its default (released) value.

use rotenc_hal::{PinId, PinReader, NO_PIN};

use crate::config::EncoderConfig;
use crate::signal::EncoderSignals;

/// Push-button attached to the encoder shaft
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Button {
    pin: PinId,
    inverted: bool,
}

impl Button {
    /// Create a button on `pin`
    ///
    /// With `inverted` set the button reads as pressed when the pin is low.
    pub const fn new(pin: PinId, inverted: bool) -> Self {
        Self { pin, inverted }
    }

    /// Button described by `config`, if one is configured
    pub const fn from_config(config: &EncoderConfig) -> Option<Self> {
        if config.pin_button == NO_PIN {
            None
        } else {
            Some(Self::new(config.pin_button, config.button_inverted))
        }
    }

    /// Button pin
    pub const fn pin(&self) -> PinId {
        self.pin
    }

    /// Sample the pin and return the logical pressed state
    pub fn sample<R: PinReader>(&self, reader: &R) -> bool {
        reader.read_pin(self.pin).is_high() != self.inverted
    }

    /// Edge interrupt handler: store the sampled state
    pub fn on_edge<R: PinReader>(&self, reader: &R, signals: &EncoderSignals) {
        let pressed = self.sample(reader);
        trace!("button pin {} pressed={}", self.pin, pressed);
        signals.set_button(pressed);
    }
}
