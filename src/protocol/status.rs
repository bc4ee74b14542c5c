//! Receive status taxonomy and the decoded response frame

use heapless::Vec;

use super::{CommandType, MAX_PAYLOAD_LEN};

/// Reasons a request/response round trip did not yield a usable response
///
/// This is [`RxStatus`] without its `Ok` case. Only a successful receive
/// carries a [`Response`]; every failure carries nothing but its kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RxError {
    /// No preamble byte arrived within the synchronization bound
    #[error("timed out waiting for a frame preamble")]
    Timeout,
    /// A payload did not fit a frame, or a response payload was too short
    #[error("payload size mismatch")]
    Size,
    /// The module answered with an error frame (type 0xFF)
    #[error("module reported an error")]
    Zetag,
    /// Checksum mismatch, or a response type that does not match the request
    #[error("checksum or type mismatch")]
    Checksum,
    /// Malformed preamble or length byte
    #[error("malformed frame")]
    Format,
}

/// Error type for invalid receive status values
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[error("invalid receive status 0x{0:02X}")]
pub struct InvalidRxStatus(pub u8);

/// Outcome of a single receive attempt, with its wire values
///
/// Exactly one status is produced per round trip. The numeric values match
/// the status byte used by existing ZETag tooling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum RxStatus {
    /// Valid response
    Ok = 0xFF,
    /// Receive timeout
    Timeout = 1,
    /// Size mismatch
    SizeErr = 2,
    /// Module-side error (response type 0xFF)
    ZetagErr = 3,
    /// Checksum or type correlation mismatch
    ChecksumErr = 4,
    /// Invalid frame format
    FormatErr = 5,
}

impl RxStatus {
    /// Status of a receive result.
    pub fn of<T>(result: &Result<T, RxError>) -> Self {
        match result {
            Ok(_) => Self::Ok,
            Err(error) => Self::from(*error),
        }
    }

    /// Returns `true` for [`RxStatus::Ok`].
    pub fn is_ok(self) -> bool {
        self == Self::Ok
    }
}

impl From<RxError> for RxStatus {
    fn from(value: RxError) -> Self {
        match value {
            RxError::Timeout => Self::Timeout,
            RxError::Size => Self::SizeErr,
            RxError::Zetag => Self::ZetagErr,
            RxError::Checksum => Self::ChecksumErr,
            RxError::Format => Self::FormatErr,
        }
    }
}

impl From<RxStatus> for u8 {
    fn from(value: RxStatus) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for RxStatus {
    type Error = InvalidRxStatus;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0xFF => Ok(Self::Ok),
            1 => Ok(Self::Timeout),
            2 => Ok(Self::SizeErr),
            3 => Ok(Self::ZetagErr),
            4 => Ok(Self::ChecksumErr),
            5 => Ok(Self::FormatErr),
            invalid => Err(InvalidRxStatus(invalid)),
        }
    }
}

/// A validated response frame
///
/// Only produced when the checksum matched, so every field can be trusted.
///
/// # Frame Format
/// `FF 00 LEN TYPE [payload...] CRC`, where `LEN` counts `TYPE`, the payload
/// and `CRC`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Response {
    /// Length byte as received (`payload.len() + 2`)
    pub len: u8,
    /// Raw type code; see [`Response::command`]
    pub command_type: u8,
    /// Payload bytes following the type code
    pub payload: Vec<u8, MAX_PAYLOAD_LEN>,
    /// Checksum byte as received
    pub crc: u8,
}

impl Response {
    /// The type code as a registry entry, if it is one.
    pub fn command(&self) -> Option<CommandType> {
        CommandType::try_from(self.command_type).ok()
    }

    /// Returns `true` if the module answered with an error frame.
    pub fn is_error_report(&self) -> bool {
        self.command_type == u8::from(CommandType::Error)
    }
}
