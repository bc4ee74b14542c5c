//! Response receive state machine
//!
//! Bytes are pushed in one at a time with [`Decoder::feed`]; the decoder
//! reports a terminal result once a frame has been validated or rejected.
//! The blocking and async receive paths in [`crate::Device`] share it, so the
//! only suspension point is the transport's single-byte read.
//!
//! # States
//! 1. `Sync` - discard bytes until `0xFF`. More than [`SYNC_LIMIT`] discarded
//!    bytes end the attempt with [`RxError::Timeout`].
//! 2. `SecondPreamble` - the next byte must be `0x00`.
//! 3. `Length` - `LEN`, which must be at least 2.
//! 4. `Body` - `LEN - 1` bytes: the type code followed by the payload.
//! 5. `Crc` - one checksum byte, then validation.

use heapless::Vec;

use super::{checksum8, Response, RxError, MAX_BODY_LEN, MIN_LEN, PREAMBLE};

/// Number of non-preamble bytes tolerated before the receive times out
pub const SYNC_LIMIT: u8 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Sync,
    SecondPreamble,
    Length,
    Body,
    Crc,
}

/// Incremental decoder for a single response frame
#[derive(Debug, Clone)]
pub struct Decoder {
    state: State,
    discarded: u8,
    len: u8,
    body: Vec<u8, MAX_BODY_LEN>,
}

impl Decoder {
    /// Create a decoder waiting for the first preamble byte
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: State::Sync,
            discarded: 0,
            len: 0,
            body: Vec::new(),
        }
    }

    /// Return to the `Sync` state, dropping any partial frame.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Feed one received byte.
    ///
    /// Returns `None` while more bytes are needed. Once a terminal state is
    /// reached the result is returned and the decoder resets itself.
    pub fn feed(&mut self, byte: u8) -> Option<Result<Response, RxError>> {
        let result = self.step(byte);
        if let Some(result) = &result {
            if let Err(error) = result {
                warn!("receive failed: {:?}", error);
            }
            self.reset();
        }
        result
    }

    fn step(&mut self, byte: u8) -> Option<Result<Response, RxError>> {
        match self.state {
            State::Sync => {
                if byte == PREAMBLE[0] {
                    if self.discarded > 0 {
                        trace!("discarded {} bytes before preamble", self.discarded);
                    }
                    self.state = State::SecondPreamble;
                    return None;
                }
                self.discarded += 1;
                if self.discarded > SYNC_LIMIT {
                    return Some(Err(RxError::Timeout));
                }
                None
            }
            State::SecondPreamble => {
                if byte != PREAMBLE[1] {
                    return Some(Err(RxError::Format));
                }
                self.state = State::Length;
                None
            }
            State::Length => {
                if byte < MIN_LEN {
                    return Some(Err(RxError::Format));
                }
                self.len = byte;
                self.state = State::Body;
                None
            }
            State::Body => {
                // LEN - 1 <= MAX_BODY_LEN, so the push cannot overflow.
                let _ = self.body.push(byte);
                if self.body.len() == usize::from(self.len - 1) {
                    self.state = State::Crc;
                }
                None
            }
            State::Crc => Some(self.validate(byte)),
        }
    }

    fn validate(&self, crc: u8) -> Result<Response, RxError> {
        let expected = checksum8(&PREAMBLE)
            .wrapping_add(self.len)
            .wrapping_add(checksum8(&self.body));
        if expected != crc {
            return Err(RxError::Checksum);
        }

        let (&command_type, payload) = self.body.split_first().ok_or(RxError::Format)?;
        Ok(Response {
            len: self.len,
            command_type,
            payload: Vec::from_slice(payload).map_err(|_| RxError::Size)?,
            crc,
        })
    }
}

impl Default for Decoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Decode one response from a captured byte buffer.
///
/// Bytes missing at the end of `bytes` are read as `0x00`, the value an idle
/// link produces, so a truncated capture ends the same way a silent module
/// would.
pub fn decode(bytes: &[u8]) -> Result<Response, RxError> {
    let mut decoder = Decoder::new();
    let mut bytes = bytes.iter().copied();
    loop {
        let byte = bytes.next().unwrap_or(0x00);
        if let Some(result) = decoder.feed(byte) {
            return result;
        }
    }
}
