//! ZETag command implementations
//!
//! Each device operation is a struct implementing [`Command`]. The struct
//! holds the operation's parameters in domain units (Hz, dB, kHz) and writes
//! the module's register encoding when the frame is built, clamping
//! out-of-range values to the nearest legal one.
//!
//! # Command Categories
//! - [`rf`]-related commands
//!   - Set frequency and channel plan ([`SetFrequency`])
//!   - Set TX power ([`SetTxPower`])
//!   - Set channel spacing ([`SetChannelSpacing`])
//!   - Set modulation ([`SetTxMode`])
//!
//! - [`operational`] commands
//!   - Select normal or test operation ([`SetOperatingMode`])
//!   - Transmit application data ([`TransmitData`])
//!
//! - [`status`] commands
//!   - Read the protocol version ([`GetVersion`])
//!
//! # Command Execution
//! Commands are run with [`Device::execute_command`](crate::Device::execute_command)
//! or its async twin. One command is one request frame and one response frame;
//! nothing is retried.

use core::convert::Infallible;

use heapless::Vec;
use regiface::{ByteArray, FromByteArray, ToByteArray};

use crate::protocol::{CommandType, Response, RxError, MAX_PAYLOAD_LEN};

mod operational;
mod rf;
mod status;

pub use operational::*;
pub use rf::*;
pub use status::*;

/// Request payload buffer
pub type Payload = Vec<u8, MAX_PAYLOAD_LEN>;

/// A typed ZETag command
pub trait Command {
    /// Value extracted from a successful response
    type ResponseParameters: FromResponse;

    /// Type code of the request frame.
    fn id() -> CommandType;

    /// Append the request payload.
    ///
    /// # Errors
    /// * [`RxError::Size`] - the payload does not fit a frame
    fn write_parameters(self, payload: &mut Payload) -> Result<(), RxError>;
}

/// Conversion from a validated response into a command's result
pub trait FromResponse: Sized {
    /// Extract the result.
    ///
    /// # Errors
    /// * [`RxError::Size`] - the response payload is too short
    fn from_response(response: Response) -> Result<Self, RxError>;
}

impl FromResponse for Response {
    fn from_response(response: Response) -> Result<Self, RxError> {
        Ok(response)
    }
}

/// Parse the leading bytes of a response payload as a fixed-width value.
///
/// Trailing bytes beyond the value's width are ignored.
///
/// # Errors
/// * [`RxError::Size`] - fewer payload bytes than the value needs
pub fn parse_payload<P>(payload: &[u8]) -> Result<P, RxError>
where
    P: FromByteArray<Error = Infallible>,
{
    let mut raw = P::Array::new();
    let width = raw.as_ref().len();
    let bytes = payload.get(..width).ok_or(RxError::Size)?;
    raw.as_mut().copy_from_slice(bytes);

    P::from_bytes(raw).map_err(|never| match never {})
}

/// Append a fixed-width parameter value to a payload.
///
/// # Errors
/// * [`RxError::Size`] - the payload is full
pub fn put_parameter<P>(payload: &mut Payload, parameter: P) -> Result<(), RxError>
where
    P: ToByteArray<Error = Infallible>,
{
    let raw = match parameter.to_bytes() {
        Ok(raw) => raw,
        Err(never) => match never {},
    };
    put_bytes(payload, raw.as_ref())
}

/// Append raw bytes to a payload.
///
/// # Errors
/// * [`RxError::Size`] - the payload is full
pub fn put_bytes(payload: &mut Payload, bytes: &[u8]) -> Result<(), RxError> {
    payload.extend_from_slice(bytes).map_err(|_| RxError::Size)
}

#[cfg(test)]
pub(crate) fn payload_of<C: Command>(command: C) -> Payload {
    let mut payload = Payload::new();
    command.write_parameters(&mut payload).unwrap();
    payload
}
