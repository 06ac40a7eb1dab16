//! Transport trait for mount communication.
//!
//! The [`Transport`] trait abstracts over the physical link to a mount
//! controller. The serial implementation lives in `mountlib-transport`; a
//! scripted mock for testing lives in `mountlib-test-harness`.
//!
//! Protocol engines (e.g. the NexStar transaction loop in `mountlib-nexstar`)
//! operate on a `Transport` rather than directly on a serial port, so the
//! same code drives real hardware and deterministic unit tests.

use async_trait::async_trait;
use std::time::Duration;

use crate::error::Result;

/// Asynchronous byte-level transport to a mount controller.
///
/// The link is assumed to be a reliable ordered byte stream with exactly one
/// reader and one writer.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send raw bytes to the mount.
    ///
    /// Implementations should not return until all bytes have been handed
    /// to the underlying link. Partial writes are not retried by callers.
    async fn send(&mut self, data: &[u8]) -> Result<()>;

    /// Receive bytes from the mount into the provided buffer.
    ///
    /// Returns the number of bytes actually read. Will wait up to `timeout`
    /// for data to arrive; returns [`Error::Timeout`](crate::error::Error::Timeout)
    /// if no data is received within the deadline.
    async fn receive(&mut self, buf: &mut [u8], timeout: Duration) -> Result<usize>;

    /// Close the transport connection.
    ///
    /// After calling `close()`, subsequent `send()` and `receive()` calls
    /// should return [`Error::NotConnected`](crate::error::Error::NotConnected).
    async fn close(&mut self) -> Result<()>;

    /// Check whether the transport is currently connected.
    fn is_connected(&self) -> bool;
}
