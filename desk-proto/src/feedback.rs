//! Desk controller feedback frames.
//!
//! The controller reports its state in 3-byte frames:
//!
//! ```text
//! <hi> <lo> <check>      check = hi + lo (wrapping)
//! ```
//!
//! There is no start byte, so the decoder slides a 3-byte window over the
//! stream until the check byte matches.

/// Height range reported while the desk moves or stands still, in millimetres.
pub const HEIGHT_RANGE_MM: core::ops::RangeInclusive<u16> = 400..=2000;

/// Reported once the motors have stopped.
pub const IDLE_VALUE: u16 = 0x5555;

/// Reported when the controller has gone to sleep.
pub const SLEEP_VALUE: u16 = 0x1111;

/// Preset slot referenced by the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Preset {
    P1,
    P2,
    P3,
}

/// Decoded meaning of a feedback value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DeskFeedback {
    /// Controller fault: 1 overload, 2 overtemperature, 3-5 electrical.
    Fault(u8),
    /// Waiting for a preset button to store the current height.
    Config,
    /// Ready for input.
    Ready,
    /// Current height stored into a preset.
    PresetStored(Preset),
    /// Current height in millimetres.
    Height { mm: u16 },
    /// Motors stopped.
    Idle,
    /// Controller asleep; needs a wake-up press.
    Sleep,
    Unknown(u16),
}

impl DeskFeedback {
    /// Classify a raw 16-bit feedback value.
    #[must_use]
    pub fn from_raw(value: u16) -> Self {
        match value {
            1..=5 => DeskFeedback::Fault(value as u8),
            10 => DeskFeedback::Config,
            11 => DeskFeedback::Ready,
            12 => DeskFeedback::PresetStored(Preset::P1),
            13 => DeskFeedback::PresetStored(Preset::P2),
            14 => DeskFeedback::PresetStored(Preset::P3),
            v if HEIGHT_RANGE_MM.contains(&v) => DeskFeedback::Height { mm: v },
            IDLE_VALUE => DeskFeedback::Idle,
            SLEEP_VALUE => DeskFeedback::Sleep,
            v => DeskFeedback::Unknown(v),
        }
    }
}

/// Sliding-window decoder for desk feedback frames.
#[derive(Debug, Clone, Default)]
pub struct FeedbackDecoder {
    window: [u8; 3],
    len: usize,
}

impl FeedbackDecoder {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            window: [0; 3],
            len: 0,
        }
    }

    pub fn reset(&mut self) {
        self.len = 0;
    }

    /// Feed one byte from the desk.
    ///
    /// Returns the raw frame value once the window holds a frame with a
    /// matching check byte. The window is cleared after a match and slides
    /// by one byte after a mismatch.
    pub fn push_byte(&mut self, byte: u8) -> Option<u16> {
        if self.len == self.window.len() {
            self.window.copy_within(1.., 0);
            self.window[2] = byte;
        } else {
            self.window[self.len] = byte;
            self.len += 1;
        }

        if self.len < self.window.len() {
            return None;
        }

        let [hi, lo, check] = self.window;
        if hi.wrapping_add(lo) != check {
            return None;
        }

        self.len = 0;
        Some(u16::from_be_bytes([hi, lo]))
    }

    /// Like [`push_byte`](Self::push_byte), but classified.
    pub fn push(&mut self, byte: u8) -> Option<DeskFeedback> {
        self.push_byte(byte).map(DeskFeedback::from_raw)
    }
}
