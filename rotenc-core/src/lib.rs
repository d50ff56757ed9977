//! Board-agnostic quadrature rotary encoder decoding
//!
//! This crate turns edge interrupts on an encoder's A/B pins into detent
//! steps, and tracks an optional push-button:
//!
//! - Configuration types and validation
//! - Five decoding strategies (sampled edge, lookup table, state machines)
//! - Lock-free signal cells shared with the consumer
//! - Encoder lifecycle: interrupt registration, edge dispatch, teardown
//!
//! The platform is reached only through the `rotenc-hal` traits and an
//! `embedded-hal` delay, so the same decoder runs on any chip and on the
//! host in tests.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

// Must come first so the logging macros are visible to later modules
#[macro_use]
mod fmt;

pub mod button;
pub mod config;
pub mod decode;
pub mod encoder;
pub mod signal;

#[cfg(test)]
mod mock;

pub use button::Button;
pub use config::{ConfigError, DecodeMode, EncoderConfig, Mailbox};
pub use decode::{Decoder, Direction, Reading};
pub use encoder::{Encoder, EncoderError};
pub use signal::EncoderSignals;
