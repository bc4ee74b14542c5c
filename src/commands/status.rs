//! Status commands
//!
//! Queries that read information back from the module.

use core::convert::Infallible;

use regiface::FromByteArray;

use super::{parse_payload, Command, FromResponse, Payload};
use crate::protocol::{CommandType, Response, RxError};

/// Protocol version reported by the module
///
/// The module reports the main and sub version in the low nibble of two
/// consecutive payload bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ProtocolVersion {
    /// Main version (0-15)
    pub major: u8,
    /// Sub version (0-15)
    pub minor: u8,
}

impl ProtocolVersion {
    /// Packed form: main version in the high nibble, sub version in the low.
    pub fn to_byte(self) -> u8 {
        (self.major << 4) | self.minor
    }
}

impl FromByteArray for ProtocolVersion {
    type Error = Infallible;
    type Array = [u8; 2];

    fn from_bytes(bytes: Self::Array) -> Result<Self, Self::Error> {
        Ok(Self {
            major: bytes[0] & 0x0F,
            minor: bytes[1] & 0x0F,
        })
    }
}

impl FromResponse for ProtocolVersion {
    fn from_response(response: Response) -> Result<Self, RxError> {
        parse_payload(&response.payload)
    }
}

/// GetVersion command (0x02)
///
/// Reads the protocol version. The request has no payload.
#[derive(Debug, Clone, Copy, Default)]
pub struct GetVersion;

impl Command for GetVersion {
    type ResponseParameters = ProtocolVersion;

    fn id() -> CommandType {
        CommandType::Version
    }

    fn write_parameters(self, _payload: &mut Payload) -> Result<(), RxError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{decode, encode_frame};

    fn version_response(payload: &[u8]) -> Response {
        decode(encode_frame(0x02, payload).unwrap().as_bytes()).unwrap()
    }

    #[test]
    fn packs_nibbles() {
        let version = ProtocolVersion::from_response(version_response(&[0x31, 0x02])).unwrap();
        assert_eq!(version, ProtocolVersion { major: 1, minor: 2 });
        assert_eq!(version.to_byte(), 0x12);
    }

    #[test]
    fn ignores_trailing_bytes() {
        let version = ProtocolVersion::from_response(version_response(&[0x03, 0x01, 0xAA])).unwrap();
        assert_eq!(version.to_byte(), 0x31);
    }

    #[test]
    fn short_payload_is_size_error() {
        assert_eq!(
            ProtocolVersion::from_response(version_response(&[0x03])),
            Err(RxError::Size)
        );
    }
}
