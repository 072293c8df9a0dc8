//! Desk bridge firmware for RP2040.
//!
//! This crate provides the embedded implementation of the desk bridge: a
//! transparent serial link between a host computer and a desk motor
//! controller that intercepts button-state packets and presses the desk's
//! panel buttons through four GPIO lines.
//!
//! # Hardware Configuration
//!
//! | Function  | GPIO | Description |
//! |-----------|------|-------------|
//! | UART1 TX  | 4    | To desk controller (9600 baud, 8N1) |
//! | UART1 RX  | 5    | From desk controller |
//! | UART0 TX  | 0    | To host (only with `host-uart`) |
//! | UART0 RX  | 1    | From host (only with `host-uart`) |
//! | D5        | 10   | Simulated button line, active low |
//! | D6        | 11   | Simulated button line, active low |
//! | D7        | 12   | Simulated button line, active low |
//! | M         | 13   | Simulated memory button, active low |
//! | LED       | 25   | On-board LED (toggles on dropped packets) |
//!
//! # Architecture
//!
//! The bridge runs as a single Embassy task that polls both links every
//! 25 ms (see [`desk_core::DeskBridge`]). With `host-usb` three more tasks
//! run the USB stack and move CDC-ACM packets in and out of two
//! [`Pipe`](embassy_sync::pipe::Pipe)s that the bridge polls without
//! blocking.
//!
//! # Features
//!
//! - **`dev-panic`** (default): Use `panic-probe` for development (prints panic info via RTT)
//! - **`prod-panic`**: Use `panic-reset` for production (silent watchdog reset)
//! - **`host-usb`** (default): Host link over USB CDC-ACM
//! - **`host-uart`**: Host link over UART0 with an external USB-serial adapter
//!
//! # Re-exports
//!
//! This crate re-exports the public items of [`desk_core`] for convenience,
//! so consumers only need to depend on this crate.

#![no_std]

// Ensure exactly one host link is selected
#[cfg(all(feature = "host-usb", feature = "host-uart"))]
compile_error!("Cannot enable both `host-usb` and `host-uart` features - the bridge has exactly one host link");

#[cfg(not(any(feature = "host-usb", feature = "host-uart")))]
compile_error!("Enable one of the `host-usb` or `host-uart` features");

// Re-export core types for convenience
pub use desk_core::{
    BridgeConfig, BridgeError, BridgeEvent, ButtonLines, ByteLink, DeskBridge, DeskFeedback,
    GpioButtonLines, IoLink, LineError, LineState, LinkError, Tick, DEFAULT_CONFIG,
};

#[cfg(feature = "host-usb")]
pub mod usb_host;

#[cfg(feature = "host-usb")]
pub use usb_host::{configure_cdc_acm, HostPipe, PipeLink};
