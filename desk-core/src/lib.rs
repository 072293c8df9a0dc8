//! Platform-agnostic desk bridge: link traits, button line drivers, and the
//! bridge loop.
//!
//! This crate holds everything between the two serial links and the four
//! simulated button lines, without any chip-specific dependencies. It runs
//! in embedded `no_std` firmware and on the host for testing.
//!
//! # Overview
//!
//! - [`link`]: Non-blocking byte link trait ([`ByteLink`]) and the
//!   `embedded-io` adapter ([`IoLink`])
//! - [`lines`]: Button line sink trait ([`ButtonLines`]) and the active-low
//!   GPIO driver ([`GpioButtonLines`])
//! - [`config`]: Timing and link parameters ([`BridgeConfig`])
//! - [`bridge`]: The forwarding and interception loop ([`DeskBridge`])
//!
//! # Example
//!
//! ```ignore
//! use desk_core::{DeskBridge, GpioButtonLines, IoLink};
//!
//! let lines = GpioButtonLines::new(d5, d6, d7, m);
//! let mut bridge = DeskBridge::new(host_link, IoLink::new(desk_uart), lines);
//!
//! bridge.reset()?;
//! loop {
//!     if let Err(e) = bridge.tick(&mut delay).await {
//!         // log and keep going
//!     }
//! }
//! ```
//!
//! # Features
//!
//! - **`std`**: Enable standard library support (for host testing)
//! - **`defmt`**: Log and derive formatting via defmt (for embedded logging)
//! - **`log`**: Log via the `log` facade instead

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(feature = "std")]
extern crate std;

// This mod MUST go first, so that the others see its macros.
mod fmt;

pub mod bridge;
pub mod config;
pub mod lines;
pub mod link;

// Re-export main types at crate root
pub use bridge::{BridgeError, BridgeEvent, DeskBridge, Tick};
pub use config::{BridgeConfig, DEFAULT_CONFIG};
pub use lines::{ButtonLines, GpioButtonLines, LineError};
pub use link::{ByteLink, IoLink, LinkError};

// Protocol types used in this crate's API
pub use desk_proto::{ButtonMask, DeskButton, DeskFeedback, LineState, ParserState};
