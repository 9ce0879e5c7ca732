//! WSG command message framing
//!
//! Frame format:
//! ```text
//! [Preamble: 3 bytes] 0xAA 0xAA 0xAA
//! [Command ID: 1 byte]
//! [Payload Length: 2 bytes LE]
//! [Payload: variable]
//! [CRC: 2 bytes LE] (over every preceding byte, preamble included)
//! ```

use crate::checksum::Crc16;
use crate::commands::CommandId;
use crate::types::ProtocolError;

/// Frame preamble
pub const PREAMBLE: [u8; 3] = [0xAA; 3];

/// Header size: preamble(3) + command(1) + length(2)
pub const HEADER_LEN: usize = 6;

/// Trailing checksum size
pub const CHECKSUM_LEN: usize = 2;

/// Bytes a frame adds around its payload
pub const FRAME_OVERHEAD: usize = HEADER_LEN + CHECKSUM_LEN;

/// Largest payload the 16-bit length field can describe
pub const MAX_PAYLOAD_LEN: usize = u16::MAX as usize;

/// How the payload length is written into the header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LengthField {
    /// Full 16-bit little-endian length
    #[default]
    Le16,
    /// Low byte only, high byte always zero. Matches older drivers and is
    /// only correct for payloads under 256 bytes.
    LowByteOnly,
}

impl LengthField {
    fn encode(self, len: u16) -> [u8; 2] {
        match self {
            LengthField::Le16 => len.to_le_bytes(),
            LengthField::LowByteOnly => [(len & 0xFF) as u8, 0x00],
        }
    }
}

/// A command ready to be framed for the gripper
///
/// The payload is copied in at construction and never changes afterwards,
/// so serializing the same message twice yields identical bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandMessage {
    command: CommandId,
    payload: Vec<u8>,
}

impl CommandMessage {
    /// Create a new message
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::PayloadTooLarge`] if the payload does not fit
    /// the 16-bit length field.
    pub fn new(command: CommandId, payload: impl Into<Vec<u8>>) -> Result<Self, ProtocolError> {
        let payload = payload.into();
        if payload.len() > MAX_PAYLOAD_LEN {
            tracing::debug!(
                "Rejecting {} with {} byte payload",
                command.name(),
                payload.len()
            );
            return Err(ProtocolError::PayloadTooLarge(payload.len()));
        }
        Ok(Self { command, payload })
    }

    /// Create a message from a raw command byte
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::UnknownCommand`] for ids outside the command
    /// set, or [`ProtocolError::PayloadTooLarge`] as for [`Self::new`].
    pub fn from_raw(id: u8, payload: impl Into<Vec<u8>>) -> Result<Self, ProtocolError> {
        let command = CommandId::try_from(id).inspect_err(|_| {
            tracing::debug!("Rejecting unknown command id {:#04X}", id);
        })?;
        Self::new(command, payload)
    }

    #[must_use]
    pub fn command(&self) -> CommandId {
        self.command
    }

    #[must_use]
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Size of the serialized frame
    #[must_use]
    pub fn frame_len(&self) -> usize {
        self.payload.len() + FRAME_OVERHEAD
    }

    /// Serialize to a frame with a 16-bit little-endian length field
    #[must_use]
    pub fn serialize(&self) -> Vec<u8> {
        self.serialize_with(LengthField::Le16)
    }

    /// Serialize to a frame, choosing how the length field is written
    #[must_use]
    pub fn serialize_with(&self, length_field: LengthField) -> Vec<u8> {
        // Checked in the constructor
        let len = self.payload.len() as u16;

        let mut data = Vec::with_capacity(self.frame_len());

        // Header
        data.extend_from_slice(&PREAMBLE);
        data.push(self.command.as_u8());
        data.extend_from_slice(&length_field.encode(len));

        data.extend_from_slice(&self.payload);

        // CRC covers everything written so far
        let crc = Crc16::new().update(&data).finish();
        data.extend_from_slice(&crc.to_le_bytes());

        tracing::trace!(
            "Framed {} ({} byte payload): {:02X?}",
            self.command.name(),
            len,
            &data
        );

        data
    }
}

/// Extension point for decoding response frames
///
/// Responses from the gripper carry a status code after the length field
/// and need checksum verification before use. This crate only builds
/// outgoing frames; a transport layer implements this trait to turn its
/// inbound byte stream into responses. `decode` may be fed partial data and
/// returns `Ok(None)` until a full frame is available.
pub trait FrameDecoder {
    type Output;
    type Error;

    fn decode(&mut self, bytes: &[u8]) -> Result<Option<Self::Output>, Self::Error>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checksum::compute_crc16;

    fn embedded_crc(frame: &[u8]) -> u16 {
        let n = frame.len();
        u16::from_le_bytes([frame[n - 2], frame[n - 1]])
    }

    #[test]
    fn test_grasp_empty_payload() {
        let msg = CommandMessage::new(CommandId::Grasp, Vec::new()).unwrap();
        let frame = msg.serialize();

        let crc = compute_crc16(&[0xAA, 0xAA, 0xAA, 0x25, 0x00, 0x00]);
        assert_eq!(
            frame,
            vec![0xAA, 0xAA, 0xAA, 0x25, 0x00, 0x00, crc as u8, (crc >> 8) as u8]
        );
        assert_eq!(frame, vec![0xAA, 0xAA, 0xAA, 0x25, 0x00, 0x00, 0x71, 0x40]);
    }

    #[test]
    fn test_pre_position_payload() {
        let payload: [u8; 6] = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06];
        let msg = CommandMessage::new(CommandId::PrePosition, payload).unwrap();
        let frame = msg.serialize();

        assert_eq!(frame.len(), 14);
        assert_eq!(&frame[..6], &[0xAA, 0xAA, 0xAA, 0x21, 0x06, 0x00]);
        assert_eq!(&frame[6..12], &payload);
        assert_eq!(embedded_crc(&frame), compute_crc16(&frame[..12]));
        assert_eq!(embedded_crc(&frame), 0x448A);
    }

    #[test]
    fn test_frame_layout_across_lengths() {
        for len in [0usize, 1, 7, 255, 256, 1024, 4097, MAX_PAYLOAD_LEN] {
            let payload: Vec<u8> = (0..len).map(|i| (i % 251) as u8).collect();
            let msg = CommandMessage::new(CommandId::Loop, payload.clone()).unwrap();
            let frame = msg.serialize();

            assert_eq!(frame.len(), len + FRAME_OVERHEAD);
            assert_eq!(frame.len(), msg.frame_len());
            assert_eq!(&frame[..3], &PREAMBLE);
            assert_eq!(frame[3], CommandId::Loop as u8);
            assert_eq!(usize::from(u16::from_le_bytes([frame[4], frame[5]])), len);
            assert_eq!(&frame[HEADER_LEN..HEADER_LEN + len], payload.as_slice());
            assert_eq!(embedded_crc(&frame), compute_crc16(&frame[..HEADER_LEN + len]));
        }
    }

    #[test]
    fn test_length_field_boundary() {
        let short = CommandMessage::new(CommandId::SetDeviceTag, vec![0x55u8; 255]).unwrap();
        let long = CommandMessage::new(CommandId::SetDeviceTag, vec![0x55u8; 256]).unwrap();

        assert_eq!(&short.serialize()[4..6], &[0xFF, 0x00]);
        assert_eq!(&long.serialize()[4..6], &[0x00, 0x01]);

        // Legacy encoding agrees below 256 and loses the high byte above
        assert_eq!(
            short.serialize_with(LengthField::LowByteOnly),
            short.serialize()
        );
        let legacy = long.serialize_with(LengthField::LowByteOnly);
        assert_eq!(&legacy[4..6], &[0x00, 0x00]);
        assert_eq!(legacy.len(), 256 + FRAME_OVERHEAD);
        assert_eq!(embedded_crc(&legacy), compute_crc16(&legacy[..HEADER_LEN + 256]));
    }

    #[test]
    fn test_serialize_is_pure() {
        let a = CommandMessage::new(CommandId::SetForceLimit, [0x00u8, 0x00, 0x20, 0x41]).unwrap();
        let b = CommandMessage::new(CommandId::SetForceLimit, [0x00u8, 0x00, 0x20, 0x41]).unwrap();
        assert_eq!(a.serialize(), a.serialize());
        assert_eq!(a.serialize(), b.serialize());
    }

    #[test]
    fn test_payload_is_copied() {
        let mut buf: Vec<u8> = vec![1, 2, 3];
        let msg = CommandMessage::new(CommandId::Loop, buf.as_slice()).unwrap();
        buf[0] = 9;
        assert_eq!(msg.payload(), &[1, 2, 3]);
    }

    #[test]
    fn test_payload_too_large() {
        let result = CommandMessage::new(CommandId::Loop, vec![0u8; MAX_PAYLOAD_LEN + 1]);
        assert_eq!(
            result,
            Err(ProtocolError::PayloadTooLarge(MAX_PAYLOAD_LEN + 1))
        );
    }

    #[test]
    fn test_from_raw() {
        let msg = CommandMessage::from_raw(0x40, Vec::new()).unwrap();
        assert_eq!(msg.command(), CommandId::GetSystemState);

        let result = CommandMessage::from_raw(0x27, Vec::new());
        assert_eq!(result, Err(ProtocolError::UnknownCommand(0x27)));
    }

    #[test]
    fn test_decoder_extension_point() {
        // Minimal decoder that waits for a whole header before yielding
        struct HeaderOnly(Vec<u8>);

        impl FrameDecoder for HeaderOnly {
            type Output = CommandId;
            type Error = ProtocolError;

            fn decode(&mut self, bytes: &[u8]) -> Result<Option<CommandId>, ProtocolError> {
                self.0.extend_from_slice(bytes);
                if self.0.len() < HEADER_LEN {
                    return Ok(None);
                }
                CommandId::try_from(self.0[3]).map(Some)
            }
        }

        let frame = CommandMessage::new(CommandId::Home, [0x00u8]).unwrap().serialize();
        let mut decoder = HeaderOnly(Vec::new());
        assert_eq!(decoder.decode(&frame[..2]), Ok(None));
        assert_eq!(decoder.decode(&frame[2..]), Ok(Some(CommandId::Home)));
    }
}
