//! Byte-at-a-time parser for the host-to-bridge stream.
//!
//! The host sends either a button-state packet or a single-byte request:
//!
//! ```text
//! FF <mask> <mask>    button-state packet, mask repeated as a check byte
//! 11                  keep-alive request
//! 77                  reset request
//! ```
//!
//! Any other byte outside a packet is ignored. Inside a packet every byte is
//! mask data, including `FF`, `11` and `77`.

use crate::types::{ButtonMask, Request, SENTINEL};

/// Event produced by [`PacketParser::push_byte`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HostEvent {
    /// A packet whose two mask bytes matched.
    Buttons(ButtonMask),
    /// A packet whose mask bytes differed. It must be dropped.
    Rejected { first: u8, second: u8 },
    /// A recognized single-byte request.
    Request(Request),
    /// A byte that is neither a sentinel nor a request.
    Ignored(u8),
}

/// Parser state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParserState {
    Idle,
    AwaitingMask1,
    AwaitingMask2 { first: u8 },
}

/// Host stream parser.
///
/// Never stalls on its own: partial packets simply keep their state until
/// more bytes arrive or the owner calls [`reset`](Self::reset).
#[derive(Debug, Clone)]
pub struct PacketParser {
    state: ParserState,
}

impl PacketParser {
    /// Create a new parser in the idle state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: ParserState::Idle,
        }
    }

    /// Drop any partial packet.
    pub fn reset(&mut self) {
        self.state = ParserState::Idle;
    }

    #[inline]
    #[must_use]
    pub const fn state(&self) -> ParserState {
        self.state
    }

    /// Whether no packet is in progress.
    #[inline]
    #[must_use]
    pub const fn is_idle(&self) -> bool {
        matches!(self.state, ParserState::Idle)
    }

    /// Feed a byte to the parser.
    ///
    /// Returns `Some(event)` once a byte completes a packet or a request.
    pub fn push_byte(&mut self, byte: u8) -> Option<HostEvent> {
        match self.state {
            ParserState::Idle => {
                if byte == SENTINEL {
                    self.state = ParserState::AwaitingMask1;
                    return None;
                }
                Some(match Request::from_byte(byte) {
                    Some(request) => HostEvent::Request(request),
                    None => HostEvent::Ignored(byte),
                })
            }
            ParserState::AwaitingMask1 => {
                self.state = ParserState::AwaitingMask2 { first: byte };
                None
            }
            ParserState::AwaitingMask2 { first } => {
                self.state = ParserState::Idle;
                if first == byte {
                    Some(HostEvent::Buttons(ButtonMask(byte)))
                } else {
                    Some(HostEvent::Rejected {
                        first,
                        second: byte,
                    })
                }
            }
        }
    }
}

impl Default for PacketParser {
    fn default() -> Self {
        Self::new()
    }
}
