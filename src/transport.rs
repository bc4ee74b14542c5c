//! Byte transport to the module
//!
//! The ZETag protocol only ever needs to write one byte and to read one byte,
//! blocking until it arrives. Neither operation reports failure to the
//! protocol layer:
//!
//! - A failed write is dropped.
//! - A failed or empty read yields `0x00`, which the receive state machine
//!   counts toward its synchronization bound. A dead link therefore ends in
//!   [`RxError::Timeout`](crate::protocol::RxError::Timeout) as long as the
//!   underlying port returns at all (e.g. it has a read timeout configured).
//!
//! Adapters are provided for `embedded-hal-nb` serial peripherals
//! ([`NbSerial`]) and for `embedded-io` / `embedded-io-async` ports
//! ([`IoSerial`]).

use embedded_hal_nb::{nb, serial};

/// Blocking single-byte transport
pub trait Transport {
    /// Send one byte.
    fn write_byte(&mut self, byte: u8);

    /// Receive one byte, blocking until it arrives.
    fn read_byte(&mut self) -> u8;
}

/// Asynchronous single-byte transport
#[allow(async_fn_in_trait)]
pub trait AsyncTransport {
    /// Send one byte.
    async fn write_byte(&mut self, byte: u8);

    /// Receive one byte, waiting until it arrives.
    async fn read_byte(&mut self) -> u8;
}

impl<T: Transport + ?Sized> Transport for &mut T {
    fn write_byte(&mut self, byte: u8) {
        T::write_byte(self, byte)
    }

    fn read_byte(&mut self) -> u8 {
        T::read_byte(self)
    }
}

/// Transport over an `embedded-hal-nb` serial peripheral
///
/// # Example
/// ```no_run
/// # fn wrap<S>(uart: S)
/// # where
/// #     S: embedded_hal_nb::serial::Read<u8> + embedded_hal_nb::serial::Write<u8>,
/// # {
/// use zetag::{Device, NbSerial};
///
/// let mut device = Device::new(NbSerial::new(uart));
/// let version = device.get_protocol_version();
/// # }
/// ```
#[derive(Debug)]
pub struct NbSerial<S> {
    serial: S,
}

impl<S> NbSerial<S> {
    /// Wrap a serial peripheral.
    pub fn new(serial: S) -> Self {
        Self { serial }
    }

    /// Releases the underlying serial peripheral.
    pub fn release(self) -> S {
        self.serial
    }
}

impl<S> Transport for NbSerial<S>
where
    S: serial::Read<u8> + serial::Write<u8>,
{
    fn write_byte(&mut self, byte: u8) {
        if nb::block!(self.serial.write(byte)).is_err() {
            warn!("serial write failed, byte dropped");
        }
    }

    fn read_byte(&mut self) -> u8 {
        nb::block!(self.serial.read()).unwrap_or_else(|_| {
            warn!("serial read failed");
            0x00
        })
    }
}

/// Transport over an `embedded-io` or `embedded-io-async` port
///
/// Implements [`Transport`] when the port implements the blocking
/// `embedded_io` traits and [`AsyncTransport`] when it implements the
/// `embedded_io_async` ones.
#[derive(Debug)]
pub struct IoSerial<T> {
    port: T,
}

impl<T> IoSerial<T> {
    /// Wrap a port.
    pub fn new(port: T) -> Self {
        Self { port }
    }

    /// Releases the underlying port.
    pub fn release(self) -> T {
        self.port
    }
}

impl<T> Transport for IoSerial<T>
where
    T: embedded_io::Read + embedded_io::Write,
{
    fn write_byte(&mut self, byte: u8) {
        if let Err(error) = self.port.write_all(&[byte]) {
            warn!("port write failed: {:?}", embedded_io::Error::kind(&error));
        }
    }

    fn read_byte(&mut self) -> u8 {
        let mut buf = [0u8; 1];
        match self.port.read(&mut buf) {
            Ok(1) => buf[0],
            Ok(_) => 0x00,
            Err(error) => {
                warn!("port read failed: {:?}", embedded_io::Error::kind(&error));
                0x00
            }
        }
    }
}

impl<T> AsyncTransport for IoSerial<T>
where
    T: embedded_io_async::Read + embedded_io_async::Write,
{
    async fn write_byte(&mut self, byte: u8) {
        if let Err(error) = self.port.write_all(&[byte]).await {
            warn!("port write failed: {:?}", embedded_io::Error::kind(&error));
        }
    }

    async fn read_byte(&mut self) -> u8 {
        let mut buf = [0u8; 1];
        match self.port.read(&mut buf).await {
            Ok(1) => buf[0],
            Ok(_) => 0x00,
            Err(error) => {
                warn!("port read failed: {:?}", embedded_io::Error::kind(&error));
                0x00
            }
        }
    }
}
