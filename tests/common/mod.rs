//! Scripted serial port for driving `Device` without hardware.

#![allow(dead_code)]

use std::collections::VecDeque;

use zetag::protocol::encode_frame;
use zetag::Transport;

/// Records every written byte and replays queued response bytes.
///
/// Reads past the end of the queue return `0x00`, like an idle line.
#[derive(Debug, Default)]
pub struct MockSerial {
    rx: VecDeque<u8>,
    tx: Vec<u8>,
    reads: usize,
}

impl MockSerial {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue raw bytes for the device to read.
    pub fn respond(&mut self, bytes: &[u8]) -> &mut Self {
        self.rx.extend(bytes);
        self
    }

    /// Queue a well-formed response frame.
    pub fn respond_frame(&mut self, type_code: u8, payload: &[u8]) -> &mut Self {
        let frame = encode_frame(type_code, payload).unwrap();
        self.respond(frame.as_bytes())
    }

    /// Everything written so far.
    pub fn written(&self) -> &[u8] {
        &self.tx
    }

    /// Number of reads performed, including idle reads.
    pub fn reads(&self) -> usize {
        self.reads
    }

    /// Response bytes not yet consumed.
    pub fn pending(&self) -> usize {
        self.rx.len()
    }
}

impl Transport for MockSerial {
    fn write_byte(&mut self, byte: u8) {
        self.tx.push(byte);
    }

    fn read_byte(&mut self) -> u8 {
        self.reads += 1;
        self.rx.pop_front().unwrap_or(0x00)
    }
}

/// Encoded request frame, for comparing against what the device wrote.
pub fn frame(type_code: u8, payload: &[u8]) -> Vec<u8> {
    encode_frame(type_code, payload).unwrap().as_bytes().to_vec()
}
