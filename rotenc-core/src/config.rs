//! Encoder configuration
//!
//! Created once when the encoder is initialized and never mutated
//! afterwards. Changing any field (including the decode mode) means
//! re-initializing the encoder.

use core::fmt;

use rotenc_hal::{Edge, PinId, NO_PIN};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default bounce mask after an [`DecodeMode::EdgeSample`] decision (µs)
pub const DEFAULT_SENSITIVITY_DELAY_US: u16 = 500;

/// Quadrature decoding algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum DecodeMode {
    /// Rising edge of A, sample B (1x resolution)
    EdgeSample,
    /// Both edges of A, direction lookup on abAB (2x resolution)
    LookupTable2x,
    /// Both edges of A and B, direction lookup on abAB (4x resolution)
    LookupTable4x,
    /// Debounced state machine, emits per half detent (2x resolution)
    #[default]
    HalfStep,
    /// Debounced state machine, emits per full detent (1x resolution)
    FullStep,
}

impl DecodeMode {
    /// All modes, in short-name order
    pub const ALL: [DecodeMode; 5] = [
        DecodeMode::EdgeSample,
        DecodeMode::LookupTable2x,
        DecodeMode::LookupTable4x,
        DecodeMode::HalfStep,
        DecodeMode::FullStep,
    ];

    /// Edge(s) of pin A that trigger decoding
    pub const fn edge_a(self) -> Edge {
        match self {
            DecodeMode::EdgeSample => Edge::Rising,
            _ => Edge::Both,
        }
    }

    /// Whether edges on pin B trigger decoding
    pub const fn uses_pin_b(self) -> bool {
        !matches!(self, DecodeMode::EdgeSample | DecodeMode::LookupTable2x)
    }

    /// Nominal direction events per full quadrature cycle
    pub const fn steps_per_cycle(self) -> u8 {
        match self {
            DecodeMode::EdgeSample | DecodeMode::FullStep => 1,
            DecodeMode::LookupTable2x | DecodeMode::HalfStep => 2,
            DecodeMode::LookupTable4x => 4,
        }
    }

    /// Short name used in text configuration
    pub const fn name(self) -> &'static str {
        match self {
            DecodeMode::EdgeSample => "simple1",
            DecodeMode::LookupTable2x => "simple2",
            DecodeMode::LookupTable4x => "simple4",
            DecodeMode::HalfStep => "half",
            DecodeMode::FullStep => "full",
        }
    }

    /// Parse a mode from its short name or variant name
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|mode| {
            name.eq_ignore_ascii_case(mode.name()) || name.eq_ignore_ascii_case(mode.variant_name())
        })
    }

    const fn variant_name(self) -> &'static str {
        match self {
            DecodeMode::EdgeSample => "EdgeSample",
            DecodeMode::LookupTable2x => "LookupTable2x",
            DecodeMode::LookupTable4x => "LookupTable4x",
            DecodeMode::HalfStep => "HalfStep",
            DecodeMode::FullStep => "FullStep",
        }
    }
}

/// How the direction cell treats a new event when the last one was not drained
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Mailbox {
    /// Single slot: the newest event replaces an undrained one
    #[default]
    Overwrite,
    /// Signed running count of undrained events (saturating)
    Accumulate,
}

/// Configuration errors detected at initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Pin A is the "not connected" sentinel
    MissingPinA,
    /// Pin B is the "not connected" sentinel
    MissingPinB,
    /// Two inputs share one pin
    DuplicatePin(PinId),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::MissingPinA => write!(f, "encoder pin A is not assigned"),
            ConfigError::MissingPinB => write!(f, "encoder pin B is not assigned"),
            ConfigError::DuplicatePin(pin) => write!(f, "pin {} is assigned twice", pin),
        }
    }
}

/// Encoder configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EncoderConfig {
    /// Quadrature channel A
    pub pin_a: PinId,
    /// Quadrature channel B
    pub pin_b: PinId,
    /// Push-button input, or [`NO_PIN`]
    pub pin_button: PinId,
    /// Button reads low when pressed (pull-up wiring)
    pub button_inverted: bool,
    /// Blocking bounce mask after an EdgeSample decision (µs, 0 = none)
    pub sensitivity_delay_us: u16,
    /// Decoding algorithm
    pub mode: DecodeMode,
    /// Direction cell behavior
    pub mailbox: Mailbox,
}

impl EncoderConfig {
    /// Create a config for an encoder without a button
    pub const fn new(pin_a: PinId, pin_b: PinId) -> Self {
        Self {
            pin_a,
            pin_b,
            pin_button: NO_PIN,
            button_inverted: false,
            sensitivity_delay_us: DEFAULT_SENSITIVITY_DELAY_US,
            mode: DecodeMode::HalfStep,
            mailbox: Mailbox::Overwrite,
        }
    }

    /// Attach a push-button ([`NO_PIN`] removes it)
    pub const fn with_button(mut self, pin: PinId) -> Self {
        self.pin_button = pin;
        self
    }

    /// Attach an active-low push-button
    pub const fn with_inverted_button(mut self, pin: PinId) -> Self {
        self.pin_button = pin;
        self.button_inverted = true;
        self
    }

    /// Select the decoding algorithm
    pub const fn with_mode(mut self, mode: DecodeMode) -> Self {
        self.mode = mode;
        self
    }

    /// Set the EdgeSample bounce mask
    pub const fn with_sensitivity_delay_us(mut self, delay_us: u16) -> Self {
        self.sensitivity_delay_us = delay_us;
        self
    }

    /// Select the direction cell behavior
    pub const fn with_mailbox(mut self, mailbox: Mailbox) -> Self {
        self.mailbox = mailbox;
        self
    }

    /// Check if a push-button is configured
    pub const fn has_button(&self) -> bool {
        self.pin_button != NO_PIN
    }

    /// Check pin assignments
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pin_a == NO_PIN {
            return Err(ConfigError::MissingPinA);
        }
        if self.pin_b == NO_PIN {
            return Err(ConfigError::MissingPinB);
        }
        if self.pin_a == self.pin_b {
            return Err(ConfigError::DuplicatePin(self.pin_a));
        }
        if self.has_button() && (self.pin_button == self.pin_a || self.pin_button == self.pin_b) {
            return Err(ConfigError::DuplicatePin(self.pin_button));
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl EncoderConfig {
    /// Upper bound of the postcard encoding
    pub const MAX_ENCODED_LEN: usize = 16;

    /// Serialize into `buf` (postcard), returning the used prefix
    pub fn to_bytes<'b>(&self, buf: &'b mut [u8]) -> Result<&'b mut [u8], postcard::Error> {
        postcard::to_slice(self, buf)
    }

    /// Deserialize from postcard bytes
    ///
    /// The result is not validated; [`validate`](Self::validate) runs at
    /// encoder initialization.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, postcard::Error> {
        postcard::from_bytes(bytes)
    }
}
