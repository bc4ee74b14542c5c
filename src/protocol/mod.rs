//! ZETag frame protocol
//!
//! Pure byte-level handling of the module's command/response frames:
//!
//! - [`checksum8`]: the 8-bit additive checksum protecting every frame
//! - [`encode_frame`] / [`encode_command`]: build outgoing frames
//! - [`Decoder`] / [`decode`]: the response receive state machine
//! - [`correlate`]: decide whether a response answers a given request
//! - [`RxStatus`] / [`RxError`]: the receive status taxonomy
//!
//! Nothing here performs I/O; see [`crate::Device`] for the round trip.

mod checksum;
mod command_type;
mod decoder;
mod frame;
mod status;

pub use checksum::*;
pub use command_type::*;
pub use decoder::*;
pub use frame::*;
pub use status::*;

/// Fixed two-byte frame preamble
pub const PREAMBLE: [u8; 2] = [0xFF, 0x00];

/// Preamble plus the length byte
pub const HEADER_LEN: usize = 3;

/// Smallest valid length byte: type code and checksum only
pub const MIN_LEN: u8 = 2;

/// Largest payload a frame can carry (`LEN` is one byte)
pub const MAX_PAYLOAD_LEN: usize = u8::MAX as usize - 2;

/// Largest type-plus-payload span a frame can carry
pub const MAX_BODY_LEN: usize = MAX_PAYLOAD_LEN + 1;

/// Largest complete frame, preamble through checksum
pub const MAX_FRAME_LEN: usize = HEADER_LEN + u8::MAX as usize;

/// Offset of the type code within a frame
pub const TYPE_OFFSET: usize = HEADER_LEN;

/// Match a validated response against the request that caused it.
///
/// `request_type` is the type code of the transmitted frame, or `None` if
/// the transmitted bytes were too short to carry one. A missing type code is
/// matched as `0x00`.
///
/// # Rules
/// - An error frame (type 0xFF) becomes [`RxError::Zetag`], whatever was sent.
/// - A response with the request's own type is accepted.
/// - A [`CommandType::ChannelSpaceSet`] request is also answered by
///   [`CommandType::ChannelSpaceQuery`].
/// - Anything else is treated as an integrity failure, [`RxError::Checksum`].
pub fn correlate(request_type: Option<u8>, response: Response) -> Result<Response, RxError> {
    let response_type = response.command_type;

    if response.is_error_report() {
        warn!("module reported an error: {:?}", response.payload.as_slice());
        return Err(RxError::Zetag);
    }

    let request_type = request_type.unwrap_or(0x00);
    let accepted = response_type == request_type
        || (request_type == u8::from(CommandType::ChannelSpaceSet)
            && response_type == u8::from(CommandType::ChannelSpaceQuery));

    if !accepted {
        warn!(
            "response type {} does not answer request type {}",
            response_type, request_type
        );
        return Err(RxError::Checksum);
    }

    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(type_code: u8, payload: &[u8]) -> Response {
        let frame = encode_frame(type_code, payload).unwrap();
        decode(frame.as_bytes()).unwrap()
    }

    #[test]
    fn matching_type_is_accepted() {
        let rsp = response(0x41, &[0x14]);
        assert_eq!(correlate(Some(0x41), rsp.clone()), Ok(rsp));
    }

    #[test]
    fn channel_space_set_accepts_query_reply() {
        let rsp = response(0xF1, &[0x64]);
        assert!(correlate(Some(0xF0), rsp).is_ok());
    }

    #[test]
    fn query_reply_exception_is_one_way() {
        let rsp = response(0xF0, &[0x64]);
        assert_eq!(correlate(Some(0xF1), rsp), Err(RxError::Checksum));
    }

    #[test]
    fn mismatched_type_is_checksum_error() {
        let rsp = response(0x44, &[0x00]);
        assert_eq!(correlate(Some(0x41), rsp), Err(RxError::Checksum));
    }

    #[test]
    fn error_frame_is_zetag_error() {
        for request in [0x41, 0xF0, 0x80, 0xFF] {
            let rsp = response(0xFF, &[0x01]);
            assert_eq!(correlate(Some(request), rsp), Err(RxError::Zetag));
        }
    }

    #[test]
    fn missing_request_type_matches_type_zero() {
        let rsp = response(0x00, &[]);
        assert_eq!(correlate(None, rsp.clone()), Ok(rsp));
        assert_eq!(correlate(None, response(0x41, &[])), Err(RxError::Checksum));
        assert_eq!(correlate(None, response(0xFF, &[])), Err(RxError::Zetag));
    }
}
