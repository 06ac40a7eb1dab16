//! Serial port transport for mount communication.
//!
//! [`SerialTransport`] implements the [`Transport`] trait for USB-to-serial
//! adapters and RS-232 links to a hand controller. NexStar-style controllers
//! talk at 9600 baud, 8 data bits, no parity, one stop bit; the transport
//! always opens the port that way.
//!
//! # Example
//!
//! ```no_run
//! use mountlib_transport::SerialTransport;
//! use mountlib_core::transport::Transport;
//! use std::time::Duration;
//!
//! # async fn example() -> mountlib_core::Result<()> {
//! let mut transport = SerialTransport::open("/dev/ttyUSB0").await?;
//!
//! // Echo probe
//! transport.send(&[0x4B, 0x45]).await?;
//!
//! let mut buf = [0u8; 1];
//! let n = transport.receive(&mut buf, Duration::from_secs(1)).await?;
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use mountlib_core::error::{Error, Result};
use mountlib_core::transport::Transport;
use std::time::Duration;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio_serial::{SerialPortBuilderExt, SerialStream};

/// Controller line speed. Hand controllers do not negotiate it.
const BAUD_RATE: u32 = 9600;

/// Serial port transport to a mount hand controller.
///
/// The line is always 9600 baud, 8 data bits, no parity, one stop bit and no
/// flow control.
pub struct SerialTransport {
    port: Option<SerialStream>,
    port_name: String,
}

impl SerialTransport {
    /// Open `port` (e.g. "/dev/ttyUSB0" or "COM3") at 9600 8N1.
    ///
    /// Failure to open is reported as [`Error::Transport`].
    pub async fn open(port: &str) -> Result<Self> {
        tracing::debug!(port = %port, baud_rate = BAUD_RATE, "Opening serial port");

        let serial_stream = tokio_serial::new(port, BAUD_RATE)
            .data_bits(tokio_serial::DataBits::Eight)
            .parity(tokio_serial::Parity::None)
            .stop_bits(tokio_serial::StopBits::One)
            .flow_control(tokio_serial::FlowControl::None)
            .open_native_async()
            .map_err(|e| {
                tracing::error!(port = %port, error = %e, "Failed to open serial port");
                Error::Transport(format!("cannot open {port}: {e}"))
            })?;

        tracing::info!(port = %port, "Serial port opened");

        Ok(Self {
            port: Some(serial_stream),
            port_name: port.to_string(),
        })
    }
}

/// A vanished USB adapter shows up as a broken pipe or "not connected".
fn map_io_error(e: std::io::Error) -> Error {
    match e.kind() {
        std::io::ErrorKind::BrokenPipe | std::io::ErrorKind::NotConnected => Error::ConnectionLost,
        _ => Error::Io(e),
    }
}

#[async_trait]
impl Transport for SerialTransport {
    async fn send(&mut self, data: &[u8]) -> Result<()> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;
        tracing::trace!(port = %self.port_name, bytes = ?data, "tx");

        let written = match port.write_all(data).await {
            Ok(()) => port.flush().await,
            Err(e) => Err(e),
        };
        written.map_err(|e| {
            tracing::error!(port = %self.port_name, error = %e, "write to controller failed");
            map_io_error(e)
        })
    }

    async fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize> {
        let port = self.port.as_mut().ok_or(Error::NotConnected)?;

        let Ok(read) = tokio::time::timeout(timeout, port.read(buf)).await else {
            tracing::trace!(port = %self.port_name, timeout = ?timeout, "no data before timeout");
            return Err(Error::Timeout);
        };
        let n = read.map_err(|e| {
            tracing::error!(port = %self.port_name, error = %e, "read from controller failed");
            map_io_error(e)
        })?;
        tracing::trace!(port = %self.port_name, bytes = ?&buf[..n], "rx");
        Ok(n)
    }

    async fn close(&mut self) -> Result<()> {
        let Some(mut port) = self.port.take() else {
            return Ok(());
        };
        // Best effort: the port is released either way.
        if let Err(e) = port.flush().await {
            tracing::warn!(port = %self.port_name, error = %e, "flush on close failed");
        }
        tracing::info!(port = %self.port_name, "Serial port closed");
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.port.is_some()
    }
}
