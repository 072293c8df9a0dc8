//! Byte link trait, error types, and the `embedded-io` adapter.

use embedded_io::{ErrorKind, Read, ReadReady, Write};

/// Error type for link operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkError {
    /// UART/USB I/O error.
    Io,
    /// Receive or transmit buffer overflow.
    Overrun,
    /// UART framing or parity error.
    Framing,
    /// Peer not connected (e.g., USB host has not opened the port).
    Disconnected,
}

/// Non-blocking byte stream to one side of the bridge.
///
/// Implementations must never wait for data: the bridge polls both sides
/// every tick and relies on `read_byte` returning `Ok(None)` when nothing
/// has arrived.
pub trait ByteLink {
    /// Take the next received byte, or `None` if none is available.
    fn read_byte(&mut self) -> Result<Option<u8>, LinkError>;

    /// Queue one byte for transmission.
    fn write_byte(&mut self, byte: u8) -> Result<(), LinkError>;
}

impl<T: ByteLink + ?Sized> ByteLink for &mut T {
    #[inline]
    fn read_byte(&mut self) -> Result<Option<u8>, LinkError> {
        (**self).read_byte()
    }

    #[inline]
    fn write_byte(&mut self, byte: u8) -> Result<(), LinkError> {
        (**self).write_byte(byte)
    }
}

/// [`ByteLink`] over any blocking `embedded-io` stream that can report
/// read readiness, such as an RP2040 `BufferedUart`.
///
/// Reads only happen after `read_ready()` returned `true`, so they never
/// block. Writes go into the peripheral's transmit buffer.
pub struct IoLink<T> {
    io: T,
}

impl<T> IoLink<T> {
    #[must_use]
    pub fn new(io: T) -> Self {
        Self { io }
    }

    pub fn inner(&self) -> &T {
        &self.io
    }

    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.io
    }

    pub fn into_inner(self) -> T {
        self.io
    }
}

impl<T: Read + ReadReady + Write> ByteLink for IoLink<T> {
    fn read_byte(&mut self) -> Result<Option<u8>, LinkError> {
        if !self.io.read_ready().map_err(io_error_to_link_error)? {
            return Ok(None);
        }

        let mut byte = [0u8; 1];
        match self.io.read(&mut byte).map_err(io_error_to_link_error)? {
            0 => Ok(None),
            _ => Ok(Some(byte[0])),
        }
    }

    fn write_byte(&mut self, byte: u8) -> Result<(), LinkError> {
        self.io.write_all(&[byte]).map_err(io_error_to_link_error)
    }
}

/// Map an `embedded-io` error onto [`LinkError`] by its kind.
#[inline]
fn io_error_to_link_error<E: embedded_io::Error>(e: E) -> LinkError {
    match e.kind() {
        ErrorKind::InvalidData => LinkError::Framing,
        ErrorKind::OutOfMemory => LinkError::Overrun,
        ErrorKind::NotConnected | ErrorKind::BrokenPipe | ErrorKind::ConnectionReset => {
            LinkError::Disconnected
        }
        _ => LinkError::Io,
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use std::collections::VecDeque;
    use std::vec::Vec;

    /// In-memory stream; `fail` makes every call return the given kind.
    struct MockIo {
        rx: VecDeque<u8>,
        tx: Vec<u8>,
        fail: Option<ErrorKind>,
    }

    impl MockIo {
        fn new(rx: &[u8]) -> Self {
            Self {
                rx: rx.iter().copied().collect(),
                tx: Vec::new(),
                fail: None,
            }
        }
    }

    impl embedded_io::ErrorType for MockIo {
        type Error = ErrorKind;
    }

    impl Read for MockIo {
        fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
            if let Some(kind) = self.fail {
                return Err(kind);
            }
            let mut n = 0;
            while n < buf.len() {
                match self.rx.pop_front() {
                    Some(b) => {
                        buf[n] = b;
                        n += 1;
                    }
                    None => break,
                }
            }
            Ok(n)
        }
    }

    impl ReadReady for MockIo {
        fn read_ready(&mut self) -> Result<bool, Self::Error> {
            if let Some(kind) = self.fail {
                return Err(kind);
            }
            Ok(!self.rx.is_empty())
        }
    }

    impl Write for MockIo {
        fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
            if let Some(kind) = self.fail {
                return Err(kind);
            }
            self.tx.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> Result<(), Self::Error> {
            Ok(())
        }
    }

    #[test]
    fn test_io_link_reads_one_byte_at_a_time() {
        let mut link = IoLink::new(MockIo::new(&[0xFF, 0x04]));
        assert_eq!(link.read_byte(), Ok(Some(0xFF)));
        assert_eq!(link.read_byte(), Ok(Some(0x04)));
        assert_eq!(link.read_byte(), Ok(None));
    }

    #[test]
    fn test_io_link_write() {
        let mut link = IoLink::new(MockIo::new(&[]));
        link.write_byte(0x11).unwrap();
        link.write_byte(0x77).unwrap();
        assert_eq!(link.inner().tx, [0x11, 0x77]);
    }

    #[test]
    fn test_io_link_maps_errors() {
        let mut io = MockIo::new(&[0x01]);
        io.fail = Some(ErrorKind::InvalidData);
        let mut link = IoLink::new(io);
        assert_eq!(link.read_byte(), Err(LinkError::Framing));

        link.inner_mut().fail = Some(ErrorKind::NotConnected);
        assert_eq!(link.write_byte(0x11), Err(LinkError::Disconnected));

        link.inner_mut().fail = Some(ErrorKind::Other);
        assert_eq!(link.read_byte(), Err(LinkError::Io));
    }

    #[test]
    fn test_mut_ref_is_a_link() {
        fn drain(mut link: impl ByteLink) -> usize {
            let mut n = 0;
            while let Ok(Some(_)) = link.read_byte() {
                n += 1;
            }
            n
        }

        let mut link = IoLink::new(MockIo::new(&[1, 2, 3]));
        assert_eq!(drain(&mut link), 3);
        assert_eq!(link.read_byte(), Ok(None));
    }
}
