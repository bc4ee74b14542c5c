//! ZETag Device Interface
//!
//! This module provides the request/response interface to a ZETag module
//! over a byte transport. It supports both blocking operation through
//! [`Transport`] and asynchronous operation through [`AsyncTransport`].
//!
//! Every call performs exactly one round trip: the request frame is written
//! byte by byte, then the receive state machine runs once. Nothing is retried
//! and only one request is ever outstanding.
//!
//! # Example
//! ```no_run
//! use zetag::{Device, OperatingMode, Transport};
//!
//! fn configure<T: Transport>(transport: T) -> Result<T, zetag::RxError> {
//!     let mut device = Device::new(transport);
//!
//!     device.set_operating_mode(OperatingMode::Normal)?;
//!     device.set_tx_power(8)?;
//!     device.set_frequency(922_080_000, 2, 1)?;
//!
//!     Ok(device.release())
//! }
//! ```

use crate::commands::{
    Command, FromResponse, GetVersion, OperatingMode, Payload, ProtocolVersion, SetChannelSpacing,
    SetFrequency, SetOperatingMode, SetTxMode, SetTxPower, TransmitData, TxMode,
};
use crate::protocol::{
    correlate, encode_command, CommandType, Decoder, Frame, Response, RxError, TYPE_OFFSET,
};
use crate::transport::{AsyncTransport, Transport};

/// Main device interface for the ZETag module.
///
/// Owns the transport for its lifetime; use [`Device::release`] to get it
/// back.
#[derive(Debug)]
pub struct Device<T> {
    transport: T,
}

impl<T> Device<T> {
    /// Creates a new Device instance wrapping the provided transport.
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    /// Releases the underlying transport.
    pub fn release(self) -> T {
        self.transport
    }
}

fn build_frame(command: CommandType, payload: &[u8]) -> Result<Frame, RxError> {
    encode_command(command, payload).map_err(|error| {
        warn!("cannot frame command {:?}: {:?}", command, error);
        RxError::Size
    })
}

fn build_payload<C: Command>(command: C) -> Result<Payload, RxError> {
    let mut payload = Payload::new();
    command.write_parameters(&mut payload)?;
    Ok(payload)
}

impl<T> Device<T>
where
    T: Transport,
{
    fn transmit(&mut self, bytes: &[u8]) {
        debug!("tx {:?}", bytes);
        for &byte in bytes {
            self.transport.write_byte(byte);
        }
    }

    fn receive(&mut self) -> Result<Response, RxError> {
        let mut decoder = Decoder::new();
        loop {
            let byte = self.transport.read_byte();
            if let Some(result) = decoder.feed(byte) {
                return result;
            }
        }
    }

    /// Sends a command frame and returns the decoded response.
    ///
    /// The response is returned exactly as decoded; its type is not checked
    /// against the request.
    ///
    /// # Errors
    /// * [`RxError::Size`] - payload too long to frame; nothing is sent
    /// * [`RxError::Timeout`] - no frame started within the sync bound
    /// * [`RxError::Format`] - malformed preamble or length
    /// * [`RxError::Checksum`] - checksum mismatch
    pub fn send_command(
        &mut self,
        command: CommandType,
        payload: &[u8],
    ) -> Result<Response, RxError> {
        let frame = build_frame(command, payload)?;
        self.transmit(frame.as_bytes());
        self.receive()
    }

    /// Sends pre-built frame bytes verbatim and returns the correlated response.
    ///
    /// The request type is read from offset 3 of `frame`, or taken as `0x00`
    /// if `frame` is shorter. A decoded response is then checked with
    /// [`correlate`].
    ///
    /// # Errors
    /// * [`RxError::Zetag`] - the module answered with an error frame
    /// * [`RxError::Checksum`] - checksum mismatch, or the response type does
    ///   not answer the request
    /// * [`RxError::Timeout`], [`RxError::Format`] - as for [`Device::send_command`]
    pub fn send_raw_frame(&mut self, frame: &[u8]) -> Result<Response, RxError> {
        self.transmit(frame);
        let response = self.receive()?;
        correlate(frame.get(TYPE_OFFSET).copied(), response)
    }

    /// Executes a typed command.
    ///
    /// # Errors
    /// * Any error from [`Device::send_command`]
    /// * [`RxError::Size`] - the response payload is too short for the result
    pub fn execute_command<C>(&mut self, command: C) -> Result<C::ResponseParameters, RxError>
    where
        C: Command,
    {
        let payload = build_payload(command)?;
        let response = self.send_command(C::id(), &payload)?;
        C::ResponseParameters::from_response(response)
    }

    /// Reads the module's protocol version.
    pub fn get_protocol_version(&mut self) -> Result<ProtocolVersion, RxError> {
        self.execute_command(GetVersion)
    }

    /// Enters normal or test operation.
    ///
    /// Test mode uses a one-second transmission period; see
    /// [`Device::set_test_mode`] for other periods.
    pub fn set_operating_mode(&mut self, mode: OperatingMode) -> Result<Response, RxError> {
        self.execute_command(SetOperatingMode::new(mode))
    }

    /// Enters test operation with a transmission period in seconds.
    pub fn set_test_mode(&mut self, period: u16) -> Result<Response, RxError> {
        self.execute_command(SetOperatingMode {
            mode: OperatingMode::Test,
            test_period: period,
        })
    }

    /// Sets the TX power in dB, clamped to 1..=10.
    pub fn set_tx_power(&mut self, db: u8) -> Result<Response, RxError> {
        self.execute_command(SetTxPower { db })
    }

    /// Sets the channel spacing in kHz, clamped to 100..=200.
    pub fn set_channel_spacing(&mut self, khz: u16) -> Result<Response, RxError> {
        self.execute_command(SetChannelSpacing { khz })
    }

    /// Sets the carrier frequency and channel plan.
    ///
    /// See [`SetFrequency`] for the clamping rules.
    pub fn set_frequency(
        &mut self,
        hz: u32,
        channel_count: u8,
        step: u8,
    ) -> Result<Response, RxError> {
        self.execute_command(SetFrequency {
            frequency: hz,
            channel_count,
            step,
        })
    }

    /// Sets the modulation.
    pub fn set_tx_mode(&mut self, mode: TxMode) -> Result<Response, RxError> {
        self.execute_command(SetTxMode { mode })
    }

    /// Transmits up to 30 bytes of application data.
    ///
    /// Longer data is truncated. Empty data is a no-op and touches the
    /// transport not at all.
    pub fn transmit_application_data(&mut self, data: &[u8]) -> Result<(), RxError> {
        if data.is_empty() {
            return Ok(());
        }
        self.execute_command(TransmitData { data }).map(|_| ())
    }
}

impl<T> Device<T>
where
    T: AsyncTransport,
{
    async fn transmit_async(&mut self, bytes: &[u8]) {
        debug!("tx {:?}", bytes);
        for &byte in bytes {
            self.transport.write_byte(byte).await;
        }
    }

    async fn receive_async(&mut self) -> Result<Response, RxError> {
        let mut decoder = Decoder::new();
        loop {
            let byte = self.transport.read_byte().await;
            if let Some(result) = decoder.feed(byte) {
                return result;
            }
        }
    }

    /// Asynchronously sends a command frame.
    ///
    /// This is the async version of [`send_command`](Device::send_command).
    pub async fn send_command_async(
        &mut self,
        command: CommandType,
        payload: &[u8],
    ) -> Result<Response, RxError> {
        let frame = build_frame(command, payload)?;
        self.transmit_async(frame.as_bytes()).await;
        self.receive_async().await
    }

    /// Asynchronously sends pre-built frame bytes.
    ///
    /// This is the async version of [`send_raw_frame`](Device::send_raw_frame).
    pub async fn send_raw_frame_async(&mut self, frame: &[u8]) -> Result<Response, RxError> {
        self.transmit_async(frame).await;
        let response = self.receive_async().await?;
        correlate(frame.get(TYPE_OFFSET).copied(), response)
    }

    /// Asynchronously executes a typed command.
    ///
    /// This is the async version of [`execute_command`](Device::execute_command).
    pub async fn execute_command_async<C>(
        &mut self,
        command: C,
    ) -> Result<C::ResponseParameters, RxError>
    where
        C: Command,
    {
        let payload = build_payload(command)?;
        let response = self.send_command_async(C::id(), &payload).await?;
        C::ResponseParameters::from_response(response)
    }
}
