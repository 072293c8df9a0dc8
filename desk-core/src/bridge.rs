//! DeskBridge: forwards desk feedback to the host and turns host button
//! packets into presses on the simulated button lines.

use crate::config::{BridgeConfig, DEFAULT_CONFIG};
use crate::lines::{ButtonLines, LineError};
use crate::link::{ByteLink, LinkError};
use desk_proto::{
    DeskFeedback, FeedbackDecoder, HostEvent, LineState, PacketParser, ParserState, Request,
    KEEP_ALIVE, RESET,
};
use embedded_hal_async::delay::DelayNs;

/// What the host side of a tick resulted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeEvent {
    /// A valid packet was applied and a keep-alive sent to the desk.
    Applied(LineState),
    /// A packet with mismatched mask bytes was dropped.
    Rejected { first: u8, second: u8 },
    /// All lines were released and `0x77` forwarded to the desk.
    Reset,
    /// A keep-alive request was forwarded to the desk.
    KeepAlive,
    /// An unrecognized host byte was dropped.
    Ignored(u8),
    /// An incomplete packet was abandoned.
    PacketTimedOut,
}

/// Outcome of a single [`DeskBridge::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Tick {
    /// Bytes forwarded from the desk to the host.
    pub forwarded: usize,
    /// Host message handled this tick, if any.
    pub event: Option<BridgeEvent>,
}

/// Transparent serial bridge between a host and a desk controller.
///
/// Each tick first drains the desk link into the host link, then handles at
/// most one message from the host. Button packets are parsed a byte at a
/// time, so a packet may span several ticks without blocking forwarding.
///
/// # Error Handling
///
/// Protocol faults (mismatched packets, unknown bytes, stale partial
/// packets) are dropped and reported as [`BridgeEvent`]s. Only link and pin
/// failures are returned as [`BridgeError`]; the caller should log them and
/// keep ticking.
pub struct DeskBridge<H, D, L> {
    host: H,
    desk: D,
    lines: L,
    config: BridgeConfig,
    parser: PacketParser,
    feedback: FeedbackDecoder,
    state: LineState,
    last_feedback: Option<DeskFeedback>,
    /// Ticks the current packet has been left incomplete.
    stale_ticks: u8,
}

impl<H: ByteLink, D: ByteLink, L: ButtonLines> DeskBridge<H, D, L> {
    /// Create a new bridge with [`DEFAULT_CONFIG`].
    pub fn new(host: H, desk: D, lines: L) -> Self {
        Self::with_config(host, desk, lines, DEFAULT_CONFIG)
    }

    /// Create a new bridge with a custom configuration.
    pub fn with_config(host: H, desk: D, lines: L, config: BridgeConfig) -> Self {
        Self {
            host,
            desk,
            lines,
            config,
            parser: PacketParser::new(),
            feedback: FeedbackDecoder::new(),
            state: LineState::RELEASED,
            last_feedback: None,
            stale_ticks: 0,
        }
    }

    /// Run one tick, then pause for the configured tick interval.
    pub async fn tick<T: DelayNs>(&mut self, delay: &mut T) -> Result<Tick, BridgeError> {
        let result = self.poll();
        delay.delay_ms(self.config.tick_interval_ms).await;
        result
    }

    /// Run one tick without pausing.
    ///
    /// A link failure while forwarding does not skip host processing. The
    /// first forwarding error is returned after the host message is handled.
    pub fn poll(&mut self) -> Result<Tick, BridgeError> {
        let (forwarded, forward_error) = self.forward_desk_to_host();
        let event = self.process_host();
        if let Some(e) = forward_error {
            return Err(e);
        }
        Ok(Tick {
            forwarded,
            event: event?,
        })
    }

    /// Release every simulated button.
    pub fn reset(&mut self) -> Result<(), BridgeError> {
        self.set_lines(LineState::RELEASED)
    }

    /// Drain everything the desk has sent into the host link.
    ///
    /// Bytes the host link refuses are dropped and draining continues.
    /// Returns the number of bytes forwarded and the first error seen.
    fn forward_desk_to_host(&mut self) -> (usize, Option<BridgeError>) {
        let mut forwarded = 0;
        let mut first_error = None;

        loop {
            let byte = match self.desk.read_byte() {
                Ok(Some(byte)) => byte,
                Ok(None) => break,
                Err(e) => {
                    first_error.get_or_insert(BridgeError::Desk(e));
                    break;
                }
            };

            match self.host.write_byte(byte) {
                Ok(()) => forwarded += 1,
                Err(e) => {
                    trace!("Dropped desk byte {}", byte);
                    first_error.get_or_insert(BridgeError::Host(e));
                }
            }

            if let Some(feedback) = self.feedback.push(byte) {
                if self.last_feedback != Some(feedback) {
                    debug!("Desk feedback: {:?}", feedback);
                    self.last_feedback = Some(feedback);
                }
            }
        }

        (forwarded, first_error)
    }

    /// Feed host bytes to the parser until one message completes.
    ///
    /// A partial packet only goes stale on ticks where the host sent nothing.
    fn process_host(&mut self) -> Result<Option<BridgeEvent>, BridgeError> {
        let mut received = false;

        while let Some(byte) = self.host.read_byte().map_err(BridgeError::Host)? {
            received = true;
            if let Some(event) = self.parser.push_byte(byte) {
                self.stale_ticks = 0;
                return self.handle(event).map(Some);
            }
        }

        if received || self.parser.is_idle() {
            self.stale_ticks = 0;
            return Ok(None);
        }

        if self.config.packet_timeout_ticks == 0 {
            return Ok(None);
        }

        self.stale_ticks = self.stale_ticks.saturating_add(1);
        if self.stale_ticks < self.config.packet_timeout_ticks {
            return Ok(None);
        }

        warn!(
            "Dropping incomplete button packet after {} ticks ({:?})",
            self.stale_ticks,
            self.parser.state()
        );
        self.parser.reset();
        self.stale_ticks = 0;
        Ok(Some(BridgeEvent::PacketTimedOut))
    }

    fn handle(&mut self, event: HostEvent) -> Result<BridgeEvent, BridgeError> {
        match event {
            HostEvent::Buttons(mask) => {
                let lines = LineState::from_mask(mask);
                trace!("Button mask {:?} -> {:?}", mask, lines);
                self.set_lines(lines)?;
                self.desk.write_byte(KEEP_ALIVE).map_err(BridgeError::Desk)?;
                Ok(BridgeEvent::Applied(lines))
            }
            HostEvent::Rejected { first, second } => {
                warn!("Rejected button packet: {} != {}", first, second);
                Ok(BridgeEvent::Rejected { first, second })
            }
            HostEvent::Request(Request::Reset) => {
                debug!("Reset requested");
                self.reset()?;
                self.desk.write_byte(RESET).map_err(BridgeError::Desk)?;
                Ok(BridgeEvent::Reset)
            }
            HostEvent::Request(Request::KeepAlive) => {
                self.desk.write_byte(KEEP_ALIVE).map_err(BridgeError::Desk)?;
                Ok(BridgeEvent::KeepAlive)
            }
            HostEvent::Ignored(byte) => {
                debug!("Ignoring host byte {}", byte);
                Ok(BridgeEvent::Ignored(byte))
            }
        }
    }

    fn set_lines(&mut self, lines: LineState) -> Result<(), BridgeError> {
        self.lines.apply(&lines).map_err(BridgeError::Lines)?;
        self.state = lines;
        Ok(())
    }

    /// Current state of the simulated button lines.
    pub fn line_state(&self) -> LineState {
        self.state
    }

    /// Most recent frame decoded from the desk's feedback stream.
    pub fn last_feedback(&self) -> Option<DeskFeedback> {
        self.last_feedback
    }

    /// Where the host packet parser currently is.
    pub fn parser_state(&self) -> ParserState {
        self.parser.state()
    }

    /// Get the bridge configuration.
    pub fn config(&self) -> &BridgeConfig {
        &self.config
    }

    /// Get a reference to the host link.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Get a mutable reference to the host link.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    /// Get a reference to the desk link.
    pub fn desk(&self) -> &D {
        &self.desk
    }

    /// Get a mutable reference to the desk link.
    pub fn desk_mut(&mut self) -> &mut D {
        &mut self.desk
    }

    /// Get a reference to the button lines.
    pub fn lines(&self) -> &L {
        &self.lines
    }

    /// Decompose the bridge into its host link, desk link, and lines.
    pub fn into_parts(self) -> (H, D, L) {
        (self.host, self.desk, self.lines)
    }
}

/// Error type for bridge operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BridgeError {
    /// Error from the host link.
    Host(LinkError),
    /// Error from the desk link.
    Desk(LinkError),
    /// Error from the button lines.
    Lines(LineError),
}
