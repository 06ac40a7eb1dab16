//! NexStarBuilder -- fluent builder for constructing [`NexStarMount`]
//! instances.
//!
//! The builder opens the transport, runs the echo handshake, and only hands
//! out a driver whose link is `Ready`. Line settings are fixed by the
//! controller (9600 baud, 8N1) and are not configurable here.
//!
//! # Example
//!
//! ```no_run
//! use mountlib_nexstar::builder::NexStarBuilder;
//! use std::time::Duration;
//!
//! # async fn example() -> mountlib_core::Result<()> {
//! let mount = NexStarBuilder::new()
//!     .serial_port("/dev/ttyUSB0")
//!     .command_timeout(Duration::from_millis(2000))
//!     .build()
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::time::Duration;

use mountlib_core::error::{Error, Result};
use mountlib_core::transport::Transport;

use crate::driver::NexStarMount;

/// Default wall-clock bound on one reply.
pub const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_millis(1000);

/// Fluent builder for [`NexStarMount`].
pub struct NexStarBuilder {
    serial_port: Option<String>,
    command_timeout: Duration,
}

impl NexStarBuilder {
    pub fn new() -> Self {
        NexStarBuilder {
            serial_port: None,
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }

    /// Set the serial port path (e.g. `/dev/ttyUSB0` or `COM3`).
    pub fn serial_port(mut self, port: &str) -> Self {
        self.serial_port = Some(port.to_string());
        self
    }

    /// Set how long to wait for one complete reply (default: 1s).
    ///
    /// `Duration::MAX` waits without a clock bound; the per-reply read cap
    /// still applies.
    pub fn command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    /// Build a [`NexStarMount`] on a caller-provided transport.
    ///
    /// Runs the handshake; a mismatched or missing echo is returned as
    /// [`Error::Handshake`]. This is the entry point for tests (pass a
    /// `MockTransport` from `mountlib-test-harness`).
    pub async fn build_with_transport(self, transport: Box<dyn Transport>) -> Result<NexStarMount> {
        if self.command_timeout.is_zero() {
            return Err(Error::InvalidParameter(
                "command_timeout must be non-zero".into(),
            ));
        }
        let port = self.serial_port.as_deref().unwrap_or("custom");
        let mount = NexStarMount::new(transport, port, self.command_timeout);
        mount.handshake().await?;
        Ok(mount)
    }

    /// Open the serial port and build a [`NexStarMount`] on it.
    ///
    /// Requires that [`serial_port()`](Self::serial_port) has been called.
    pub async fn build(self) -> Result<NexStarMount> {
        let port = self
            .serial_port
            .as_ref()
            .ok_or_else(|| Error::InvalidParameter("serial_port is required for build()".into()))?;

        let transport = mountlib_transport::SerialTransport::open(port).await?;
        self.build_with_transport(Box::new(transport)).await
    }
}

impl Default for NexStarBuilder {
    fn default() -> Self {
        Self::new()
    }
}
