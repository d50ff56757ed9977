//! rotenc Hardware Abstraction Layer
//!
//! This crate defines the two contracts the decoder consumes from the
//! platform: reading the instantaneous level of a pin, and registering
//! edge-triggered interrupts on a pin. Chip HALs implement them; the
//! decoder in `rotenc-core` only ever sees these traits.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (consumer loop)            │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  rotenc-core (decoder, shared signals)  │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  rotenc-hal (this crate - traits)       │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!           chip GPIO / EXTI driver
//! ```
//!
//! # Traits
//!
//! - [`gpio::PinReader`] - Instantaneous pin sampling
//! - [`irq::EdgeInterrupts`] - Edge interrupt registration

#![no_std]
#![deny(unsafe_code)]

pub mod gpio;
pub mod irq;

// Re-export key items at crate root for convenience
pub use gpio::{parse_pin_string, Level, PinId, PinReader, NO_PIN};
pub use irq::{Edge, EdgeInterrupts};
