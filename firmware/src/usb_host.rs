//! USB CDC-ACM host link.
//!
//! The host sees the bridge as a virtual serial port. Two tasks move
//! packets between the CDC class and a pair of [`Pipe`]s; the bridge only
//! touches the pipes, through the non-blocking [`PipeLink`].

use defmt::info;
use desk_core::{ByteLink, LinkError};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::pipe::Pipe;
use embassy_usb::class::cdc_acm::{CdcAcmClass, Receiver, Sender, State};
use embassy_usb::driver::Driver;
use embassy_usb::Builder;

/// Max packet size of the CDC data endpoints.
pub const MAX_PACKET_SIZE: u16 = 64;

/// Capacity of each host pipe.
pub const PIPE_SIZE: usize = 128;

/// Byte pipe between a USB task and the bridge.
pub type HostPipe = Pipe<CriticalSectionRawMutex, PIPE_SIZE>;

/// Configure the CDC-ACM class on the USB builder.
pub fn configure_cdc_acm<'d, D: Driver<'d>>(
    builder: &mut Builder<'d, D>,
    state: &'d mut State<'d>,
) -> CdcAcmClass<'d, D> {
    CdcAcmClass::new(builder, state, MAX_PACKET_SIZE)
}

/// [`ByteLink`] over the two host pipes.
pub struct PipeLink<'a> {
    /// Bytes received from the host.
    rx: &'a HostPipe,
    /// Bytes queued for the host.
    tx: &'a HostPipe,
}

impl<'a> PipeLink<'a> {
    #[must_use]
    pub fn new(rx: &'a HostPipe, tx: &'a HostPipe) -> Self {
        Self { rx, tx }
    }
}

impl ByteLink for PipeLink<'_> {
    fn read_byte(&mut self) -> Result<Option<u8>, LinkError> {
        let mut byte = [0u8; 1];
        match self.rx.try_read(&mut byte) {
            Ok(_) => Ok(Some(byte[0])),
            Err(_) => Ok(None),
        }
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), LinkError> {
        match self.tx.try_write(&[byte]) {
            Ok(_) => Ok(()),
            // Pipe full: drop this byte, keep what is already queued
            Err(_) => Err(LinkError::Overrun),
        }
    }
}

/// Copy packets from the host into `pipe`, forever.
pub async fn pump_from_host<'d, D: Driver<'d>>(
    mut receiver: Receiver<'d, D>,
    pipe: &HostPipe,
) -> ! {
    let mut buf = [0u8; MAX_PACKET_SIZE as usize];

    loop {
        receiver.wait_connection().await;
        info!("Host port opened");

        while let Ok(n) = receiver.read_packet(&mut buf).await {
            pipe.write_all(&buf[..n]).await;
        }

        info!("Host port closed");
    }
}

/// Send everything written to `pipe` to the host, forever.
///
/// While the host has the port closed the pipe is left to fill up, after
/// which [`PipeLink::write_byte`] drops new bytes.
///
/// A full-size packet is followed by a zero-length packet so the host does
/// not hold the data back waiting for more.
pub async fn pump_to_host<'d, D: Driver<'d>>(mut sender: Sender<'d, D>, pipe: &HostPipe) -> ! {
    let mut buf = [0u8; MAX_PACKET_SIZE as usize];

    loop {
        sender.wait_connection().await;

        loop {
            let n = pipe.read(&mut buf).await;
            if sender.write_packet(&buf[..n]).await.is_err() {
                break;
            }
            if n == buf.len() && sender.write_packet(&[]).await.is_err() {
                break;
            }
        }
    }
}
