//! Host-side encoding of button-state packets.

use crate::types::{ButtonMask, SENTINEL};

/// Size of a button-state packet on the wire.
pub const PACKET_SIZE: usize = 3;

/// A button-state packet ready to be written to the bridge.
///
/// # Example
///
/// ```
/// use desk_proto::{ButtonMask, ButtonPacket, DeskButton};
///
/// let packet = ButtonPacket::new(ButtonMask::from(DeskButton::Up));
/// assert_eq!(packet.to_bytes(), [0xFF, 0x04, 0x04]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonPacket {
    mask: ButtonMask,
}

impl ButtonPacket {
    #[must_use]
    pub const fn new(mask: ButtonMask) -> Self {
        Self { mask }
    }

    #[must_use]
    pub const fn mask(&self) -> ButtonMask {
        self.mask
    }

    /// Wire bytes: sentinel, mask, mask repeated as a check byte.
    #[must_use]
    pub const fn to_bytes(&self) -> [u8; PACKET_SIZE] {
        [SENTINEL, self.mask.0, self.mask.0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::{HostEvent, PacketParser};
    use crate::types::DeskButton;

    #[test]
    fn test_empty_mask_packet() {
        assert_eq!(
            ButtonPacket::new(ButtonMask::NONE).to_bytes(),
            [0xFF, 0x00, 0x00]
        );
    }

    #[test]
    fn test_parser_accepts_encoded_packets() {
        let mut parser = PacketParser::new();
        for button in DeskButton::ALL {
            let packet = ButtonPacket::new(button.into());
            let mut event = None;
            for b in packet.to_bytes() {
                event = parser.push_byte(b);
            }
            assert_eq!(event, Some(HostEvent::Buttons(packet.mask())));
        }
    }
}
