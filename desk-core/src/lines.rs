//! Simulated button lines: sink trait, error type, and the GPIO driver.

use desk_proto::LineState;
use embedded_hal::digital::OutputPin;

/// Error type for line operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineError {
    /// A pin refused the new level.
    Pin,
}

/// Sink for the four simulated button lines.
///
/// This trait abstracts the hardware that presses the panel buttons, so the
/// bridge logic can be tested without real pins.
pub trait ButtonLines {
    /// Drive all four lines to the given state.
    fn apply(&mut self, lines: &LineState) -> Result<(), LineError>;
}

/// Button lines wired in parallel with the panel's momentary switches.
///
/// Every line idles HIGH and is pulled LOW while pressed. Create the pins
/// at HIGH so nothing is pressed before the bridge first resets them.
///
/// # Pins
///
/// The reference wiring on the RP2040 uses:
/// - GPIO 10: D5
/// - GPIO 11: D6
/// - GPIO 12: D7
/// - GPIO 13: M
pub struct GpioButtonLines<P> {
    d5: P,
    d6: P,
    d7: P,
    memory: P,
}

impl<P: OutputPin> GpioButtonLines<P> {
    #[must_use]
    pub fn new(d5: P, d6: P, d7: P, memory: P) -> Self {
        Self { d5, d6, d7, memory }
    }

    /// Give the pins back as `(d5, d6, d7, memory)`.
    pub fn into_pins(self) -> (P, P, P, P) {
        (self.d5, self.d6, self.d7, self.memory)
    }
}

impl<P: OutputPin> ButtonLines for GpioButtonLines<P> {
    fn apply(&mut self, lines: &LineState) -> Result<(), LineError> {
        drive(&mut self.d5, lines.d5)?;
        drive(&mut self.d6, lines.d6)?;
        drive(&mut self.d7, lines.d7)?;
        drive(&mut self.memory, lines.memory)
    }
}

/// Active-low: pressed is LOW.
#[inline]
fn drive<P: OutputPin>(pin: &mut P, pressed: bool) -> Result<(), LineError> {
    let result = if pressed { pin.set_low() } else { pin.set_high() };
    result.map_err(|_| LineError::Pin)
}
