#![cfg_attr(not(test), no_std)]
//! ZETag Module Driver
//!
//! This crate provides a type-safe interface for the ZETag sub-GHz transmitter
//! module. The module is driven over a byte-oriented serial link with a small
//! command/response frame protocol.
//!
//! # Features
//! - Frequency range: 470-928 MHz (operating bands 470-510 MHz and 920-928 MHz)
//! - Channel plans of 1 to 6 channels, 100 or 200 kHz apart
//! - Output power: 1 to 10 dB in 0.5 dB register steps
//! - Modulation: 4FSK, 600 sps, coding rate 1/2
//! - Application payloads of up to 30 bytes
//!
//! # Architecture
//! The driver is organized into several modules:
//!
//! - [`device`]: Main device interface for request/response round trips
//!   - Writes request frames and runs the receive state machine
//!   - Blocking and async variants of every round trip
//!
//! - [`protocol`]: Frame protocol, free of I/O
//!   - Checksum, frame encoder and receive state machine
//!   - Status taxonomy ([`RxStatus`], [`RxError`])
//!   - Request/response type correlation
//!
//! - [`commands`]: One typed struct per module operation
//!   - [`commands::SetFrequency`], [`commands::SetTxPower`], ...
//!
//! - [`transport`]: Byte transport trait and adapters for `embedded-hal-nb`
//!   serial peripherals and `embedded-io` ports
//!
//! - [`settings`]: Whole-radio configuration applied in one call
//!
//! # Frame format
//! ```text
//! FF 00 LEN TYPE [payload...] CRC
//! ```
//! `LEN` counts `TYPE`, the payload and `CRC`; `CRC` is the 8-bit sum of
//! every byte before it.
//!
//! # Important Notes
//! - Every failure is reported as an [`RxError`]; nothing is retried
//! - The only receive bound is 15 bytes of noise before a frame starts, so a
//!   transport whose reads never return will block forever
//! - Configuration commands are not checked against the response type; use
//!   [`Device::send_raw_frame`] for a correlated round trip
//!
//! # Example
//! ```no_run
//! use zetag::{Device, RadioSettings, Transport};
//!
//! fn configure_radio<T: Transport>(transport: T) -> Result<Device<T>, zetag::RxError> {
//!     let mut device = Device::new(transport);
//!
//!     device.apply_settings(&RadioSettings::default())?;
//!     device.transmit_application_data(b"hello")?;
//!
//!     Ok(device)
//! }
//! ```

mod fmt;

pub mod commands;
pub mod device;
pub mod protocol;
pub mod settings;
pub mod transport;

pub use commands::*;
pub use device::Device;
pub use protocol::{CommandType, Response, RxError, RxStatus};
pub use settings::RadioSettings;
pub use transport::{AsyncTransport, IoSerial, NbSerial, Transport};
