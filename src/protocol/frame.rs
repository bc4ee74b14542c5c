//! Command frame encoder
//!
//! # Frame format
//!
//! ```text
//! 0xFF 0x00 <LEN> <TYPE> [<payload>...] <CRC>
//! ```
//!
//! - Preamble: `0xFF 0x00`
//! - `LEN`: `1 (TYPE) + payload length + 1 (CRC)`, so always at least 2
//! - `CRC`: [`checksum8`] of every preceding byte, preamble included

use heapless::Vec;

use super::{checksum8, CommandType, HEADER_LEN, MAX_FRAME_LEN, MAX_PAYLOAD_LEN, PREAMBLE};

/// Error type for frames that cannot be built
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// The payload does not fit the one-byte length field
    #[error("payload of {len} bytes exceeds the {max} byte frame limit", max = MAX_PAYLOAD_LEN)]
    PayloadTooLong {
        /// Length of the rejected payload
        len: usize,
    },
}

/// An encoded command frame, ready for transmission
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frame {
    bytes: Vec<u8, MAX_FRAME_LEN>,
}

impl Frame {
    /// The complete wire bytes, preamble through checksum.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// The length byte.
    pub fn len_byte(&self) -> u8 {
        self.bytes[2]
    }

    /// The type code.
    pub fn command_type(&self) -> u8 {
        self.bytes[HEADER_LEN]
    }

    /// The payload between the type code and the checksum.
    pub fn payload(&self) -> &[u8] {
        &self.bytes[HEADER_LEN + 1..self.bytes.len() - 1]
    }

    /// The checksum byte.
    pub fn crc(&self) -> u8 {
        self.bytes[self.bytes.len() - 1]
    }
}

impl AsRef<[u8]> for Frame {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

/// Encode a frame for any type byte.
///
/// # Example
///
/// ```
/// use zetag::protocol::encode_frame;
///
/// let frame = encode_frame(0x41, &[0x14]).unwrap();
/// assert_eq!(frame.as_bytes(), &[0xFF, 0x00, 0x03, 0x41, 0x14, 0x57]);
/// ```
///
/// # Errors
/// * [`FrameError::PayloadTooLong`] - payload longer than [`MAX_PAYLOAD_LEN`]
pub fn encode_frame(type_code: u8, payload: &[u8]) -> Result<Frame, FrameError> {
    if payload.len() > MAX_PAYLOAD_LEN {
        return Err(FrameError::PayloadTooLong { len: payload.len() });
    }

    // Bounded by MAX_PAYLOAD_LEN above, so none of the writes below can overflow.
    let len = (payload.len() + 2) as u8;
    let mut bytes = Vec::new();
    let _ = bytes.extend_from_slice(&PREAMBLE);
    let _ = bytes.push(len);
    let _ = bytes.push(type_code);
    let _ = bytes.extend_from_slice(payload);
    let crc = checksum8(&bytes);
    let _ = bytes.push(crc);

    Ok(Frame { bytes })
}

/// Encode a frame for a registered command type.
///
/// # Errors
/// * [`FrameError::PayloadTooLong`] - payload longer than [`MAX_PAYLOAD_LEN`]
pub fn encode_command(command: CommandType, payload: &[u8]) -> Result<Frame, FrameError> {
    encode_frame(command.into(), payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_tx_power_frame() {
        let frame = encode_command(CommandType::TxPower, &[0x14]).unwrap();
        assert_eq!(frame.as_bytes(), &[0xFF, 0x00, 0x03, 0x41, 0x14, 0x57]);
        assert_eq!(frame.len_byte(), 3);
        assert_eq!(frame.command_type(), 0x41);
        assert_eq!(frame.payload(), &[0x14]);
        assert_eq!(frame.crc(), 0x57);
    }

    #[test]
    fn encodes_empty_payload() {
        let frame = encode_command(CommandType::Version, &[]).unwrap();
        assert_eq!(frame.as_bytes(), &[0xFF, 0x00, 0x02, 0x02, 0x03]);
        assert!(frame.payload().is_empty());
    }

    #[test]
    fn encodes_normal_mode_frame() {
        let frame = encode_command(CommandType::OpMode, &[0x00]).unwrap();
        assert_eq!(frame.as_bytes(), &[0xFF, 0x00, 0x03, 0x44, 0x00, 0x46]);
    }

    #[test]
    fn accepts_largest_payload() {
        let payload = [0xAA; MAX_PAYLOAD_LEN];
        let frame = encode_frame(0x80, &payload).unwrap();
        assert_eq!(frame.len_byte(), 0xFF);
        assert_eq!(frame.as_bytes().len(), MAX_FRAME_LEN);
    }

    #[test]
    fn rejects_oversized_payload() {
        let payload = [0u8; MAX_PAYLOAD_LEN + 1];
        assert_eq!(
            encode_frame(0x80, &payload),
            Err(FrameError::PayloadTooLong { len: MAX_PAYLOAD_LEN + 1 })
        );
    }
}
