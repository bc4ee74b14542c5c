//! RF configuration commands
//!
//! This module contains commands for configuring the transmitter:
//! - Carrier frequency and channel plan
//! - TX output power
//! - Channel spacing
//! - Modulation (radio parameters)
//!
//! All values are clamped to the module's legal range when the request frame
//! is built.

use core::convert::Infallible;

use regiface::ToByteArray;

use super::{put_bytes, put_parameter, Command, Payload};
use crate::protocol::{CommandType, Response, RxError};

/// Lowest carrier frequency accepted by the module, in Hz
pub const MIN_FREQUENCY: u32 = 470_000_000;

/// Highest carrier frequency accepted by the module, in Hz
pub const MAX_FREQUENCY: u32 = 928_000_000;

/// Largest channel plan
pub const MAX_CHANNELS: u8 = 6;

/// Carrier frequency
///
/// Sent as four big-endian bytes. Operating bands are 470-510 MHz and
/// 920-928 MHz; only the outer bounds are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Frequency(u32);

impl Frequency {
    /// Create a frequency, clamped to [`MIN_FREQUENCY`]..=[`MAX_FREQUENCY`].
    pub fn from_hz(hz: u32) -> Self {
        Self(hz.clamp(MIN_FREQUENCY, MAX_FREQUENCY))
    }

    /// Frequency in Hz.
    pub fn hz(self) -> u32 {
        self.0
    }
}

impl ToByteArray for Frequency {
    type Error = Infallible;
    type Array = [u8; 4];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok(self.0.to_be_bytes())
    }
}

/// Channel plan layout selector for [`SetFrequency`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelPlan {
    /// Single channel, short form (0x00)
    Single = 0x00,
    /// Two or more channels (0x01)
    Multi = 0x01,
}

/// SetFrequency command (0x40)
///
/// Configures the carrier frequency and the channel plan.
///
/// # Payload
/// - One channel: `00 [freq 4B]`
/// - 2 to 6 channels: `01 [freq 4B] [count] [ch 0] .. [ch count-1]`, where
///   channel `n` is `n * step`
///
/// # Important Notes
/// - `channel_count` is clamped to 1..=6
/// - `step` is in units of the configured channel spacing, clamped to 1..=2
/// - `frequency` is clamped to 470 MHz..=928 MHz
#[derive(Debug, Clone, Copy)]
pub struct SetFrequency {
    /// Carrier frequency in Hz
    pub frequency: u32,
    /// Number of channels in the plan
    pub channel_count: u8,
    /// Channel number increment between adjacent channels
    pub step: u8,
}

impl SetFrequency {
    /// Single-channel plan at `frequency`.
    pub fn single(frequency: u32) -> Self {
        Self {
            frequency,
            channel_count: 1,
            step: 1,
        }
    }
}

impl Command for SetFrequency {
    type ResponseParameters = Response;

    fn id() -> CommandType {
        CommandType::SetTxMode
    }

    fn write_parameters(self, payload: &mut Payload) -> Result<(), RxError> {
        let count = self.channel_count.clamp(1, MAX_CHANNELS);
        let step = self.step.clamp(1, 2);
        let frequency = Frequency::from_hz(self.frequency);

        if count == 1 {
            put_bytes(payload, &[ChannelPlan::Single as u8])?;
            return put_parameter(payload, frequency);
        }

        put_bytes(payload, &[ChannelPlan::Multi as u8])?;
        put_parameter(payload, frequency)?;
        put_bytes(payload, &[count])?;
        for channel in 0..count {
            put_bytes(payload, &[channel.wrapping_mul(step)])?;
        }
        Ok(())
    }
}

/// TX power register value
///
/// The register counts 0.5 dB steps, so 8 dB is `0x10` and 10 dB is `0x14`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TxPower(u8);

impl TxPower {
    /// Power in whole dB, clamped to 1..=10.
    pub fn from_db(db: u8) -> Self {
        Self(db.clamp(1, 10))
    }

    /// Power in whole dB.
    pub fn db(self) -> u8 {
        self.0
    }
}

impl ToByteArray for TxPower {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok([self.0 * 2])
    }
}

/// SetTxPower command (0x41)
///
/// Sets the TX output power.
#[derive(Debug, Clone, Copy)]
pub struct SetTxPower {
    /// Output power in dB (1 to 10)
    pub db: u8,
}

impl Command for SetTxPower {
    type ResponseParameters = Response;

    fn id() -> CommandType {
        CommandType::TxPower
    }

    fn write_parameters(self, payload: &mut Payload) -> Result<(), RxError> {
        put_parameter(payload, TxPower::from_db(self.db))
    }
}

/// Channel spacing choices used by [`RadioSettings`](crate::RadioSettings)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelSpacing {
    /// 100 kHz
    KHz100 = 100,
    /// 200 kHz
    #[default]
    KHz200 = 200,
}

impl ChannelSpacing {
    /// Spacing in kHz.
    pub fn khz(self) -> u16 {
        self as u16
    }
}

/// SetChannelSpacing command (0xF0)
///
/// Sets the spacing between adjacent channels.
///
/// # Important Notes
/// - `khz` is clamped to 100..=200 and sent as its low byte
/// - The module answers with type 0xF1 rather than 0xF0
#[derive(Debug, Clone, Copy)]
pub struct SetChannelSpacing {
    /// Channel spacing in kHz
    pub khz: u16,
}

impl Command for SetChannelSpacing {
    type ResponseParameters = Response;

    fn id() -> CommandType {
        CommandType::ChannelSpaceSet
    }

    fn write_parameters(self, payload: &mut Payload) -> Result<(), RxError> {
        let [_, low] = self.khz.clamp(100, 200).to_be_bytes();
        put_bytes(payload, &[low])
    }
}

/// Modulation options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TxMode {
    /// 4FSK, 600 sps, coding rate 1/2
    #[default]
    Fsk4,
    /// 8FSK, reserved
    Fsk8,
}

impl ToByteArray for TxMode {
    type Error = Infallible;
    type Array = [u8; 1];

    fn to_bytes(self) -> Result<Self::Array, Self::Error> {
        Ok(match self {
            Self::Fsk4 => [0x01],
            // Not defined by the module yet; sent as the reserved encoding.
            Self::Fsk8 => [0x10],
        })
    }
}

/// SetTxMode command (0x42)
///
/// Sets the radio parameters (modulation, symbol rate, coding rate).
#[derive(Debug, Clone, Copy)]
pub struct SetTxMode {
    /// Modulation selection
    pub mode: TxMode,
}

impl Command for SetTxMode {
    type ResponseParameters = Response;

    fn id() -> CommandType {
        CommandType::RadioParam
    }

    fn write_parameters(self, payload: &mut Payload) -> Result<(), RxError> {
        put_parameter(payload, self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::payload_of;

    #[test]
    fn single_channel_frequency() {
        let payload = payload_of(SetFrequency::single(922_080_000));
        assert_eq!(payload.as_slice(), &[0x00, 0x36, 0xF5, 0xD3, 0x00]);
    }

    #[test]
    fn multi_channel_frequency() {
        let payload = payload_of(SetFrequency {
            frequency: 922_080_000,
            channel_count: 3,
            step: 2,
        });
        assert_eq!(
            payload.as_slice(),
            &[0x01, 0x36, 0xF5, 0xD3, 0x00, 0x03, 0x00, 0x02, 0x04]
        );
    }

    #[test]
    fn frequency_parameters_are_clamped() {
        let low = payload_of(SetFrequency::single(100));
        assert_eq!(&low[1..], &MIN_FREQUENCY.to_be_bytes());

        let high = payload_of(SetFrequency::single(u32::MAX));
        assert_eq!(&high[1..], &MAX_FREQUENCY.to_be_bytes());

        let wide = payload_of(SetFrequency {
            frequency: 922_080_000,
            channel_count: 9,
            step: 5,
        });
        assert_eq!(wide[5], 6);
        assert_eq!(&wide[6..], &[0, 2, 4, 6, 8, 10]);

        let zero = payload_of(SetFrequency {
            frequency: 922_080_000,
            channel_count: 0,
            step: 0,
        });
        assert_eq!(zero[0], ChannelPlan::Single as u8);
        assert_eq!(zero.len(), 5);
    }

    #[test]
    fn tx_power_register() {
        assert_eq!(payload_of(SetTxPower { db: 10 }).as_slice(), &[0x14]);
        assert_eq!(payload_of(SetTxPower { db: 8 }).as_slice(), &[0x10]);
        assert_eq!(payload_of(SetTxPower { db: 0 }).as_slice(), &[0x02]);
        assert_eq!(payload_of(SetTxPower { db: 99 }).as_slice(), &[0x14]);
    }

    #[test]
    fn channel_spacing_low_byte() {
        assert_eq!(payload_of(SetChannelSpacing { khz: 100 }).as_slice(), &[0x64]);
        assert_eq!(payload_of(SetChannelSpacing { khz: 200 }).as_slice(), &[0xC8]);
        assert_eq!(payload_of(SetChannelSpacing { khz: 20 }).as_slice(), &[0x64]);
        assert_eq!(payload_of(SetChannelSpacing { khz: 1000 }).as_slice(), &[0xC8]);
    }

    #[test]
    fn tx_mode_encoding() {
        assert_eq!(payload_of(SetTxMode { mode: TxMode::Fsk4 }).as_slice(), &[0x01]);
        assert_eq!(payload_of(SetTxMode { mode: TxMode::Fsk8 }).as_slice(), &[0x10]);
    }
}
