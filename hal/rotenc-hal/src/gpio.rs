//! Pin sampling abstractions
//!
//! The decoder never owns GPIO peripherals. It asks the platform for the
//! level of a pin by number, from inside the edge interrupt that fired.

/// Platform pin number
pub type PinId = u8;

/// Sentinel pin number meaning "not connected"
///
/// Used for the optional push-button input.
pub const NO_PIN: PinId = 0xFF;

/// Logic level of a digital input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0
    #[default]
    Low,
    /// Logic 1
    High,
}

impl Level {
    /// Level as a single bit (0 or 1)
    pub const fn bit(self) -> u8 {
        match self {
            Level::Low => 0,
            Level::High => 1,
        }
    }

    /// Check if the level is high (logic 1)
    pub const fn is_high(self) -> bool {
        matches!(self, Level::High)
    }

    /// Check if the level is low (logic 0)
    pub const fn is_low(self) -> bool {
        !self.is_high()
    }
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Instantaneous pin sampler
///
/// Implementations must:
/// - be callable from interrupt context
/// - never block
/// - return the raw level with no debouncing of their own
///
/// A physical GPIO read cannot fail, so there is no error path.
pub trait PinReader {
    /// Read the current level of `pin`
    fn read_pin(&self, pin: PinId) -> Level;
}

impl<T: PinReader + ?Sized> PinReader for &T {
    fn read_pin(&self, pin: PinId) -> Level {
        (**self).read_pin(pin)
    }
}

/// Parse a pin string from config
///
/// Supports formats:
/// - "gpio11" -> (11, false)
/// - "!gpio12" -> (12, true) (inverted/active-low)
///
/// The sentinel [`NO_PIN`] is never returned.
pub fn parse_pin_string(s: &str) -> Option<(PinId, bool)> {
    let s = s.trim();

    let (s, inverted) = match s.strip_prefix('!') {
        Some(rest) => (rest, true),
        None => (s, false),
    };

    let num_str = s.strip_prefix("gpio")?;
    let pin: PinId = num_str.parse().ok()?;

    if pin == NO_PIN {
        return None;
    }

    Some((pin, inverted))
}
