//! Radio configuration in one step
//!
//! [`RadioSettings`] groups the parameters usually configured together and
//! [`Device::apply_settings`] sends them in the order the module expects.

use crate::commands::{ChannelSpacing, SetChannelSpacing, SetFrequency, SetTxMode, SetTxPower, TxMode};
use crate::device::Device;
use crate::protocol::RxError;
use crate::transport::{AsyncTransport, Transport};

/// Channel spacing always programmed by [`Device::apply_settings`]
///
/// The channel plan expresses wider spacing as a larger channel step instead.
pub const BASE_CHANNEL_SPACING: ChannelSpacing = ChannelSpacing::KHz100;

/// Complete radio configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RadioSettings {
    /// Carrier frequency in Hz
    pub frequency: u32,
    /// Spacing between the channels of the plan
    pub channel_spacing: ChannelSpacing,
    /// Number of channels (1 to 6)
    pub channel_count: u8,
    /// TX power in dB (1 to 10)
    pub tx_power: u8,
    /// Modulation
    pub mode: TxMode,
}

impl Default for RadioSettings {
    fn default() -> Self {
        Self {
            frequency: 922_080_000,
            channel_spacing: ChannelSpacing::KHz200,
            channel_count: 2,
            tx_power: 8,
            mode: TxMode::Fsk4,
        }
    }
}

impl RadioSettings {
    /// Channel step in units of [`BASE_CHANNEL_SPACING`].
    pub fn channel_step(&self) -> u8 {
        match self.channel_spacing {
            ChannelSpacing::KHz200 => 2,
            ChannelSpacing::KHz100 => 1,
        }
    }

    fn frequency_command(&self) -> SetFrequency {
        SetFrequency {
            frequency: self.frequency,
            channel_count: self.channel_count,
            step: self.channel_step(),
        }
    }
}

impl<T> Device<T>
where
    T: Transport,
{
    /// Applies a complete radio configuration.
    ///
    /// Sends, in order: modulation, channel spacing ([`BASE_CHANNEL_SPACING`]),
    /// TX power, frequency and channel plan.
    ///
    /// # Errors
    /// Stops at the first step that fails and returns its error.
    pub fn apply_settings(&mut self, settings: &RadioSettings) -> Result<(), RxError> {
        debug!("applying {:?}", settings);
        self.execute_command(SetTxMode { mode: settings.mode })?;
        self.execute_command(SetChannelSpacing {
            khz: BASE_CHANNEL_SPACING.khz(),
        })?;
        self.execute_command(SetTxPower {
            db: settings.tx_power,
        })?;
        self.execute_command(settings.frequency_command())?;
        Ok(())
    }
}

impl<T> Device<T>
where
    T: AsyncTransport,
{
    /// Asynchronously applies a complete radio configuration.
    ///
    /// This is the async version of [`apply_settings`](Device::apply_settings).
    pub async fn apply_settings_async(&mut self, settings: &RadioSettings) -> Result<(), RxError> {
        debug!("applying {:?}", settings);
        self.execute_command_async(SetTxMode { mode: settings.mode })
            .await?;
        self.execute_command_async(SetChannelSpacing {
            khz: BASE_CHANNEL_SPACING.khz(),
        })
        .await?;
        self.execute_command_async(SetTxPower {
            db: settings.tx_power,
        })
        .await?;
        self.execute_command_async(settings.frequency_command())
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = RadioSettings::default();
        assert_eq!(settings.frequency, 922_080_000);
        assert_eq!(settings.channel_count, 2);
        assert_eq!(settings.tx_power, 8);
        assert_eq!(settings.mode, TxMode::Fsk4);
        assert_eq!(settings.channel_step(), 2);
    }

    #[test]
    fn narrow_spacing_uses_unit_step() {
        let settings = RadioSettings {
            channel_spacing: ChannelSpacing::KHz100,
            ..RadioSettings::default()
        };
        assert_eq!(settings.frequency_command().step, 1);
    }
}
