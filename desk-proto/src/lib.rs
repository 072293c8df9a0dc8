//! Wire protocol for the desk bridge.
//!
//! The bridge sits between a host computer and a desk's motor controller
//! and forwards bytes in both directions. It intercepts one thing: a
//! button-state packet from the host, which it turns into presses on four
//! simulated control-panel lines.
//!
//! - **Types**: [`DeskButton`], [`ButtonMask`], [`LineState`], [`Request`]
//! - **Parsing**: [`PacketParser`] turns host bytes into [`HostEvent`]s
//! - **Encoding**: [`ButtonPacket`] produces host-side wire bytes
//! - **Feedback**: [`FeedbackDecoder`] classifies desk-to-host frames as
//!   [`DeskFeedback`]
//!
//! # Protocol Format
//!
//! ## Host to bridge
//!
//! ```text
//! FF <mask> <mask>    button-state packet
//! 11                  keep-alive, forwarded to the desk
//! 77                  reset: release all lines, forwarded to the desk
//! ```
//!
//! A packet is accepted only when both mask bytes are identical. The
//! bridge answers every accepted packet with a `11` keep-alive to the desk.
//!
//! ## Mask bits
//!
//! | Bit  | Button | Lines   |
//! |------|--------|---------|
//! | 0x20 | P1     | D5      |
//! | 0x10 | P2     | D6 + D7 |
//! | 0x08 | P3     | D5 + D7 |
//! | 0x04 | Up     | D6      |
//! | 0x02 | Down   | D7      |
//! | 0x01 | M      | M only  |
//!
//! ## Desk to host
//!
//! Forwarded verbatim. The controller speaks in `<hi> <lo> <hi+lo>` frames,
//! see [`feedback`].
//!
//! # Example
//!
//! ```
//! use desk_proto::{ButtonPacket, DeskButton, HostEvent, LineState, PacketParser};
//!
//! let mut parser = PacketParser::new();
//! let mut event = None;
//! for byte in ButtonPacket::new(DeskButton::Up.into()).to_bytes() {
//!     event = parser.push_byte(byte);
//! }
//!
//! if let Some(HostEvent::Buttons(mask)) = event {
//!     let lines = LineState::from_mask(mask);
//!     assert!(lines.d6 && !lines.d5 && !lines.d7 && !lines.memory);
//! }
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Enable defmt formatting (for embedded logging)

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

pub mod feedback;
pub mod packet;
pub mod parser;
pub mod types;

// Re-export types at crate root for convenience
pub use feedback::{DeskFeedback, FeedbackDecoder, Preset};
pub use packet::{ButtonPacket, PACKET_SIZE};
pub use parser::{HostEvent, PacketParser, ParserState};
pub use types::{
    ButtonMask, DeskButton, LineState, Request, D5_MASK, D6_MASK, D7_MASK, KEEP_ALIVE,
    MEMORY_BIT, RESET, SENTINEL,
};
