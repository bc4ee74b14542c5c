//! Operational commands
//!
//! This module contains commands that control what the module does with the
//! radio once it is configured:
//! - Normal (transparent) operation or periodic test transmission
//! - Transmission of application data

use super::{put_bytes, Command, Payload};
use crate::protocol::{CommandType, Response, RxError};

/// Largest application payload the module accepts in one frame
pub const MAX_APP_DATA_LEN: usize = 30;

/// Test transmission period used when none is given
pub const DEFAULT_TEST_PERIOD: u16 = 1;

/// Operating modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OperatingMode {
    /// Transparent operation (0x00)
    #[default]
    Normal = 0x00,
    /// Periodic test transmission (0x01)
    Test = 0x01,
}

/// SetOperatingMode command (0x44)
///
/// Switches between normal operation and test transmission.
///
/// # Payload
/// - Normal: `00`
/// - Test: `01 [period hi] [period lo]`
///
/// The period is in seconds and is ignored in normal mode.
#[derive(Debug, Clone, Copy)]
pub struct SetOperatingMode {
    /// Mode to enter
    pub mode: OperatingMode,
    /// Test transmission period in seconds
    pub test_period: u16,
}

impl SetOperatingMode {
    /// Enter `mode`, using [`DEFAULT_TEST_PERIOD`] for test mode.
    pub fn new(mode: OperatingMode) -> Self {
        Self {
            mode,
            test_period: DEFAULT_TEST_PERIOD,
        }
    }
}

impl Command for SetOperatingMode {
    type ResponseParameters = Response;

    fn id() -> CommandType {
        CommandType::OpMode
    }

    fn write_parameters(self, payload: &mut Payload) -> Result<(), RxError> {
        put_bytes(payload, &[self.mode as u8])?;
        if self.mode == OperatingMode::Test {
            put_bytes(payload, &self.test_period.to_be_bytes())?;
        }
        Ok(())
    }
}

/// TransmitData command (0x80)
///
/// Hands application data to the module for transmission over the air.
///
/// # Important Notes
/// - Only the first [`MAX_APP_DATA_LEN`] bytes are sent
/// - [`Device::transmit_application_data`](crate::Device::transmit_application_data)
///   skips the round trip entirely for empty data
#[derive(Debug, Clone, Copy)]
pub struct TransmitData<'a> {
    /// Data to transmit
    pub data: &'a [u8],
}

impl Command for TransmitData<'_> {
    type ResponseParameters = Response;

    fn id() -> CommandType {
        CommandType::AppData
    }

    fn write_parameters(self, payload: &mut Payload) -> Result<(), RxError> {
        let len = self.data.len().min(MAX_APP_DATA_LEN);
        put_bytes(payload, &self.data[..len])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::payload_of;

    #[test]
    fn normal_mode_payload() {
        let payload = payload_of(SetOperatingMode::new(OperatingMode::Normal));
        assert_eq!(payload.as_slice(), &[0x00]);
    }

    #[test]
    fn test_mode_payload() {
        let payload = payload_of(SetOperatingMode::new(OperatingMode::Test));
        assert_eq!(payload.as_slice(), &[0x01, 0x00, 0x01]);

        let payload = payload_of(SetOperatingMode {
            mode: OperatingMode::Test,
            test_period: 600,
        });
        assert_eq!(payload.as_slice(), &[0x01, 0x02, 0x58]);
    }

    #[test]
    fn app_data_is_truncated() {
        let data: [u8; 45] = core::array::from_fn(|i| i as u8);
        let payload = payload_of(TransmitData { data: &data });
        assert_eq!(payload.as_slice(), &data[..MAX_APP_DATA_LEN]);
    }
}
