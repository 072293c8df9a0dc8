//! Core protocol types: wire constants, DeskButton, ButtonMask, LineState, Request.

use core::ops::{BitAnd, BitOr, BitOrAssign};

/// Marks the start of a 3-byte button-state packet.
pub const SENTINEL: u8 = 0xFF;

/// Keep-alive byte, sent to the desk after every applied button packet.
pub const KEEP_ALIVE: u8 = 0x11;

/// Reset command: releases all simulated buttons.
pub const RESET: u8 = 0x77;

/// Bits driving line D5 (P1, P3).
pub const D5_MASK: u8 = 0x28;

/// Bits driving line D6 (P2, Up).
pub const D6_MASK: u8 = 0x14;

/// Bits driving line D7 (P2, P3, Down).
pub const D7_MASK: u8 = 0x1A;

/// Memory button bit. Overrides every directional bit when set.
pub const MEMORY_BIT: u8 = 0x01;

/// A physical button on the desk's control panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum DeskButton {
    P1 = 1,
    P2 = 2,
    P3 = 3,
    Up = 4,
    Down = 5,
    Memory = 6,
}

impl DeskButton {
    /// All buttons in panel order.
    pub const ALL: [DeskButton; 6] = [
        DeskButton::P1,
        DeskButton::P2,
        DeskButton::P3,
        DeskButton::Up,
        DeskButton::Down,
        DeskButton::Memory,
    ];

    /// Bit of this button inside a [`ButtonMask`].
    #[inline]
    #[must_use]
    pub const fn bit(self) -> u8 {
        1 << (6 - self as u8)
    }
}

/// Button bitmask as carried by a button-state packet.
///
/// # Example
///
/// ```
/// use desk_proto::{ButtonMask, DeskButton};
///
/// let mask = ButtonMask::from(DeskButton::Up) | ButtonMask::from(DeskButton::P1);
/// assert_eq!(mask.raw(), 0x24);
/// assert!(mask.contains(DeskButton::Up));
/// ```
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonMask(pub u8);

impl ButtonMask {
    /// No buttons pressed.
    pub const NONE: Self = Self(0);

    /// Check if the given button is set.
    #[inline]
    #[must_use]
    pub const fn contains(self, button: DeskButton) -> bool {
        self.0 & button.bit() != 0
    }

    /// Get the raw byte.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl From<DeskButton> for ButtonMask {
    #[inline]
    fn from(button: DeskButton) -> Self {
        Self(button.bit())
    }
}

impl BitOr for ButtonMask {
    type Output = Self;

    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for ButtonMask {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl BitAnd for ButtonMask {
    type Output = Self;

    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Self(self.0 & rhs.0)
    }
}

/// Logical state of the four simulated button lines.
///
/// `true` means pressed. The lines are active-low on the wire; that
/// conversion belongs to whatever drives the pins.
#[derive(Clone, Copy, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LineState {
    pub d5: bool,
    pub d6: bool,
    pub d7: bool,
    pub memory: bool,
}

impl LineState {
    /// All lines released.
    pub const RELEASED: Self = Self {
        d5: false,
        d6: false,
        d7: false,
        memory: false,
    };

    /// Decode the line state for a validated button mask.
    ///
    /// The memory bit suppresses all directional lines. The line masks
    /// overlap, so one mask can press several lines at once; the panel
    /// encodes P2 and P3 as line combinations.
    #[must_use]
    pub const fn from_mask(mask: ButtonMask) -> Self {
        let b = mask.0;
        let m = b & MEMORY_BIT != 0;
        Self {
            d5: !m && b & D5_MASK != 0,
            d6: !m && b & D6_MASK != 0,
            d7: !m && b & D7_MASK != 0,
            memory: m,
        }
    }

    /// Whether any line is pressed.
    #[inline]
    #[must_use]
    pub const fn any_pressed(&self) -> bool {
        self.d5 || self.d6 || self.d7 || self.memory
    }
}

/// Single-byte request from the host that is forwarded to the desk.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Request {
    /// `0x11`: keep the desk controller awake.
    KeepAlive,
    /// `0x77`: release all buttons.
    Reset,
}

impl Request {
    /// Recognize a request byte. Anything else is not a request.
    #[inline]
    #[must_use]
    pub const fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            KEEP_ALIVE => Some(Request::KeepAlive),
            RESET => Some(Request::Reset),
            _ => None,
        }
    }

    /// The wire byte for this request.
    #[inline]
    #[must_use]
    pub const fn to_byte(self) -> u8 {
        match self {
            Request::KeepAlive => KEEP_ALIVE,
            Request::Reset => RESET,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_button_bits() {
        assert_eq!(DeskButton::P1.bit(), 0x20);
        assert_eq!(DeskButton::P2.bit(), 0x10);
        assert_eq!(DeskButton::P3.bit(), 0x08);
        assert_eq!(DeskButton::Up.bit(), 0x04);
        assert_eq!(DeskButton::Down.bit(), 0x02);
        assert_eq!(DeskButton::Memory.bit(), 0x01);
    }

    #[test]
    fn test_memory_line() {
        let lines = LineState::from_mask(ButtonMask(0x01));
        assert_eq!(
            lines,
            LineState {
                d5: false,
                d6: false,
                d7: false,
                memory: true,
            }
        );
    }

    #[test]
    fn test_memory_suppresses_directions() {
        let lines = LineState::from_mask(ButtonMask(0x3F));
        assert!(lines.memory);
        assert!(!lines.d5 && !lines.d6 && !lines.d7);
    }

    #[test]
    fn test_bit3_drives_d5_and_d7() {
        // 0x08 is P3, which the panel wires to D5 + D7
        let lines = LineState::from_mask(ButtonMask(0x08));
        assert!(lines.d5);
        assert!(!lines.d6);
        assert!(lines.d7);
        assert!(!lines.memory);
    }

    #[test]
    fn test_panel_button_lines() {
        let lines = |b: DeskButton| {
            let l = LineState::from_mask(b.into());
            (l.d5, l.d6, l.d7, l.memory)
        };

        assert_eq!(lines(DeskButton::P1), (true, false, false, false));
        assert_eq!(lines(DeskButton::P2), (false, true, true, false));
        assert_eq!(lines(DeskButton::P3), (true, false, true, false));
        assert_eq!(lines(DeskButton::Up), (false, true, false, false));
        assert_eq!(lines(DeskButton::Down), (false, false, true, false));
    }

    #[test]
    fn test_mask_ops() {
        let mut mask = ButtonMask::from(DeskButton::Up);
        mask |= DeskButton::Down.into();
        assert!(mask.contains(DeskButton::Up));
        assert!(mask.contains(DeskButton::Down));
        assert!(!mask.contains(DeskButton::Memory));
        assert_eq!((mask & ButtonMask(0x04)).raw(), 0x04);
        assert!(!mask.is_empty());
    }

    #[test]
    fn test_empty_mask_releases_all() {
        assert_eq!(LineState::from_mask(ButtonMask::NONE), LineState::RELEASED);
        assert!(!LineState::RELEASED.any_pressed());
    }

    #[test]
    fn test_request_bytes() {
        assert_eq!(Request::from_byte(0x11), Some(Request::KeepAlive));
        assert_eq!(Request::from_byte(0x77), Some(Request::Reset));
        assert_eq!(Request::from_byte(0x99), None);
        assert_eq!(Request::Reset.to_byte(), RESET);
    }
}
