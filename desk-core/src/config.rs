//! Compile-time bridge configuration.

/// Bridge timing and link parameters.
///
/// Customize this at compile-time by creating your own const.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BridgeConfig {
    /// Pause after every tick, in milliseconds. Rate-limits polling to
    /// roughly the desk controller's serial turnaround.
    pub tick_interval_ms: u32,
    /// Consecutive ticks a button packet may stay incomplete before the
    /// partial bytes are dropped. `0` waits forever.
    pub packet_timeout_ticks: u8,
    /// Baud rate of both serial links (8N1).
    pub baud_rate: u32,
}

/// Defaults matching the desk controller.
pub const DEFAULT_CONFIG: BridgeConfig = BridgeConfig {
    tick_interval_ms: 25,
    packet_timeout_ticks: 8, // 200 ms at the default tick interval
    baud_rate: 9600,
};

impl Default for BridgeConfig {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}
