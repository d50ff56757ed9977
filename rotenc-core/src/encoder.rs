//! Encoder lifecycle and edge dispatch
//!
//! [`Encoder`] ties a configuration to the platform: it registers the edge
//! interrupts the selected [`DecodeMode`] needs, receives those interrupts
//! through [`Encoder::handle_edge`], and publishes results to its
//! [`EncoderSignals`]. The consumer only ever touches the signals.
//!
//! Typical interrupt wiring, with the encoder parked in a critical-section
//! mutex so the handler can reach it:
//!
//! ```ignore
//! static SIGNALS: EncoderSignals = EncoderSignals::new();
//! static ENCODER: Mutex<RefCell<Option<Encoder<'static, Gpio, Delay>>>> =
//!     Mutex::new(RefCell::new(None));
//!
//! let config = EncoderConfig::new(17, 18).with_button(27);
//! let encoder = Encoder::init(config, gpio, delay, &mut exti, &SIGNALS)?;
//! critical_section::with(|cs| ENCODER.borrow_ref_mut(cs).replace(encoder));
//!
//! #[interrupt]
//! fn IO_IRQ_BANK0() {
//!     critical_section::with(|cs| {
//!         if let Some(encoder) = ENCODER.borrow_ref_mut(cs).as_mut() {
//!             for pin in pending_pins() {
//!                 encoder.handle_edge(pin);
//!             }
//!         }
//!     });
//! }
//!
//! loop {
//!     match SIGNALS.poll_direction() {
//!         Direction::Clockwise => volume_up(),
//!         Direction::CounterClockwise => volume_down(),
//!         Direction::Stationary => {}
//!     }
//!     if SIGNALS.poll_button() {
//!         toggle_mute();
//!     }
//! }
//! ```

use core::fmt;

use embedded_hal::delay::DelayNs;
use rotenc_hal::{Edge, EdgeInterrupts, Level, PinId, PinReader};

use crate::button::Button;
use crate::config::{ConfigError, DecodeMode, EncoderConfig};
use crate::decode::{Decoder, Reading};
use crate::signal::EncoderSignals;

/// Errors from encoder initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncoderError<E> {
    /// Invalid pin assignment
    Config(ConfigError),
    /// The platform refused an edge interrupt
    Interrupt(E),
}

// Allow `?` on config validation inside generic code.
impl<E> From<ConfigError> for EncoderError<E> {
    fn from(error: ConfigError) -> Self {
        EncoderError::Config(error)
    }
}

impl<E: fmt::Debug> fmt::Display for EncoderError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            EncoderError::Config(e) => write!(f, "configuration error: {}", e),
            EncoderError::Interrupt(e) => write!(f, "interrupt registration failed: {:?}", e),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E: defmt::Format> defmt::Format for EncoderError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            EncoderError::Config(e) => defmt::write!(f, "configuration error: {}", e),
            EncoderError::Interrupt(e) => defmt::write!(f, "interrupt registration failed: {}", e),
        }
    }
}

/// A rotary encoder bound to its pins and signal cells
pub struct Encoder<'s, R, D> {
    config: EncoderConfig,
    reader: R,
    delay: D,
    decoder: Decoder,
    button: Option<Button>,
    signals: &'s EncoderSignals,
}

impl<'s, R, D> Encoder<'s, R, D>
where
    R: PinReader,
    D: DelayNs,
{
    /// Validate `config`, register edge interrupts and start decoding
    ///
    /// Registers pin A on the mode's edge, pin B on both edges for modes
    /// that read it, and the button pin on both edges when one is
    /// configured. Clears `signals`.
    ///
    /// # Errors
    /// * [`EncoderError::Config`] for an invalid pin assignment
    /// * [`EncoderError::Interrupt`] if the platform refuses a pin; any
    ///   interrupts registered before the failure are released again
    pub fn init<I: EdgeInterrupts>(
        config: EncoderConfig,
        reader: R,
        delay: D,
        irq: &mut I,
        signals: &'s EncoderSignals,
    ) -> Result<Self, EncoderError<I::Error>> {
        config.validate()?;
        register_edges(&config, irq).map_err(EncoderError::Interrupt)?;

        let mut encoder = Self {
            config,
            reader,
            delay,
            decoder: Decoder::new(config.mode),
            button: Button::from_config(&config),
            signals,
        };
        encoder.start();

        info!(
            "encoder on pins {}/{} started in {} mode",
            config.pin_a,
            config.pin_b,
            config.mode.name()
        );
        Ok(encoder)
    }

    /// Switch to a new configuration
    ///
    /// Releases the current interrupts, registers the new ones and resets
    /// the decoder to its initial state. On failure the previous
    /// configuration is restored and stays active.
    pub fn reinit<I: EdgeInterrupts>(
        &mut self,
        config: EncoderConfig,
        irq: &mut I,
    ) -> Result<(), EncoderError<I::Error>> {
        config.validate()?;
        deregister_edges(&self.config, irq);

        if let Err(e) = register_edges(&config, irq) {
            warn!("encoder reconfiguration failed, keeping previous mode");
            // These registrations succeeded before; a failure leaves the encoder deaf
            if register_edges(&self.config, irq).is_err() {
                warn!("encoder on pin {} could not be re-registered", self.config.pin_a);
            }
            return Err(EncoderError::Interrupt(e));
        }

        self.config = config;
        self.decoder = Decoder::new(config.mode);
        self.button = Button::from_config(&config);
        self.start();

        info!("encoder switched to {} mode", config.mode.name());
        Ok(())
    }

    /// Release all interrupts and hand back the platform resources
    pub fn teardown<I: EdgeInterrupts>(self, irq: &mut I) -> (R, D) {
        deregister_edges(&self.config, irq);
        debug!("encoder on pins {}/{} torn down", self.config.pin_a, self.config.pin_b);
        (self.reader, self.delay)
    }

    /// Edge interrupt entry point
    ///
    /// Call with the pin whose interrupt fired. Pins this encoder did not
    /// register are ignored.
    pub fn handle_edge(&mut self, pin: PinId) {
        if let Some(button) = self.button {
            if pin == button.pin() {
                button.on_edge(&self.reader, self.signals);
                return;
            }
        }

        if pin == self.config.pin_a || (pin == self.config.pin_b && self.config.mode.uses_pin_b()) {
            self.on_rotation_edge();
        } else {
            trace!("ignoring edge on unregistered pin {}", pin);
        }
    }

    /// Active configuration
    pub fn config(&self) -> &EncoderConfig {
        &self.config
    }

    /// Decoder and its persistent state
    pub fn decoder(&self) -> &Decoder {
        &self.decoder
    }

    /// Signal cells this encoder publishes to
    pub fn signals(&self) -> &'s EncoderSignals {
        self.signals
    }

    fn start(&mut self) {
        self.signals.clear();
        let rest = Reading::sample(&self.reader, self.config.pin_a, self.config.pin_b);
        self.decoder.seed(rest);
    }

    fn on_rotation_edge(&mut self) {
        let reading = match self.config.mode {
            // Only B is sampled; A just rose
            DecodeMode::EdgeSample => Reading::new(Level::High, self.reader.read_pin(self.config.pin_b)),
            _ => Reading::sample(&self.reader, self.config.pin_a, self.config.pin_b),
        };

        if let Some(direction) = self.decoder.decode(reading) {
            trace!("decoded {} from {}", direction.delta(), reading.bits());
            self.signals.publish(direction, self.config.mailbox);
        }

        if self.config.mode == DecodeMode::EdgeSample && self.config.sensitivity_delay_us > 0 {
            self.delay.delay_us(u32::from(self.config.sensitivity_delay_us));
        }
    }
}

fn register_edges<I: EdgeInterrupts>(config: &EncoderConfig, irq: &mut I) -> Result<(), I::Error> {
    let result = register_each(config, irq);
    if result.is_err() {
        // Deregistering a pin that never got registered is a no-op
        deregister_edges(config, irq);
    }
    result
}

fn register_each<I: EdgeInterrupts>(config: &EncoderConfig, irq: &mut I) -> Result<(), I::Error> {
    irq.register(config.pin_a, config.mode.edge_a())?;
    if config.mode.uses_pin_b() {
        irq.register(config.pin_b, Edge::Both)?;
    }
    if config.has_button() {
        irq.register(config.pin_button, Edge::Both)?;
    }
    Ok(())
}

fn deregister_edges<I: EdgeInterrupts>(config: &EncoderConfig, irq: &mut I) {
    irq.deregister(config.pin_a);
    if config.mode.uses_pin_b() {
        irq.deregister(config.pin_b);
    }
    if config.has_button() {
        irq.deregister(config.pin_button);
    }
}
