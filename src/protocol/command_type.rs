/// Error type for type codes outside the command registry
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[error("unknown command type 0x{0:02X}")]
pub struct UnknownCommandType(pub u8);

/// Frame type codes understood by the ZETag module
///
/// The same code tags a request and its response, with the exception of
/// [`CommandType::ChannelSpaceSet`], which the module answers with
/// [`CommandType::ChannelSpaceQuery`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum CommandType {
    /// Read the module MAC address (0x01)
    Mac = 0x01,
    /// Read the protocol version (0x02)
    Version = 0x02,
    /// Frequency and channel configuration (0x40)
    SetTxMode = 0x40,
    /// TX output power, 0.5 dB per step (0x41)
    TxPower = 0x41,
    /// Radio parameters: modulation, symbol rate and coding rate (0x42)
    RadioParam = 0x42,
    /// Operating mode: transparent or test (0x44)
    OpMode = 0x44,
    /// Channel spacing, set (0xF0)
    ChannelSpaceSet = 0xF0,
    /// Channel spacing, query and the reply to a set (0xF1)
    ChannelSpaceQuery = 0xF1,
    /// Application data transmission (0x80)
    AppData = 0x80,
    /// Error report from the module (0xFF)
    Error = 0xFF,
}

impl From<CommandType> for u8 {
    fn from(value: CommandType) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for CommandType {
    type Error = UnknownCommandType;

    fn try_from(value: u8) -> Result<Self, UnknownCommandType> {
        // `Self::Error` would be ambiguous with the associated type.
        match value {
            0x01 => Ok(CommandType::Mac),
            0x02 => Ok(CommandType::Version),
            0x40 => Ok(CommandType::SetTxMode),
            0x41 => Ok(CommandType::TxPower),
            0x42 => Ok(CommandType::RadioParam),
            0x44 => Ok(CommandType::OpMode),
            0xF0 => Ok(CommandType::ChannelSpaceSet),
            0xF1 => Ok(CommandType::ChannelSpaceQuery),
            0x80 => Ok(CommandType::AppData),
            0xFF => Ok(CommandType::Error),
            invalid => Err(UnknownCommandType(invalid)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_round_trips() {
        for code in 0..=u8::MAX {
            if let Ok(ty) = CommandType::try_from(code) {
                assert_eq!(u8::from(ty), code);
            }
        }
    }

    #[test]
    fn unknown_codes_are_rejected() {
        assert_eq!(CommandType::try_from(0x81), Err(UnknownCommandType(0x81)));
        assert_eq!(CommandType::try_from(0x00), Err(UnknownCommandType(0x00)));
    }
}
