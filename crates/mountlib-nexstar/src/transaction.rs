//! One request/response exchange with the hand controller.
//!
//! A transaction writes a complete command, then reads the reply one byte at
//! a time until the `#` terminator arrives. Reading stops at the terminator so
//! nothing belonging to a later exchange is consumed.
//!
//! Two bounds keep a silent or babbling controller from blocking forever:
//!
//! - at most [`MAX_RESPONSE_BYTES`] byte reads, and
//! - a wall-clock deadline of `timeout` for the whole read phase.
//!
//! A `timeout` too large to place on the clock (e.g. `Duration::MAX`) leaves
//! the read cap as the only bound.
//!
//! Hitting either bound is [`Error::Timeout`]; the partial reply is dropped.

use std::time::Duration;

use bytes::{BufMut, Bytes, BytesMut};
use tokio::time::Instant;

use mountlib_core::error::{Error, Result};
use mountlib_core::transport::Transport;

use crate::protocol::TERMINATOR;

/// Maximum number of byte reads per transaction.
pub const MAX_RESPONSE_BYTES: usize = 100;

/// Send `frame` and collect the terminated reply.
///
/// The returned buffer always ends with [`TERMINATOR`]. A read that yields no
/// bytes still counts against [`MAX_RESPONSE_BYTES`]. Transport errors other
/// than a timeout are returned unchanged.
pub async fn execute(
    transport: &mut dyn Transport,
    frame: &[u8],
    timeout: Duration,
) -> Result<Bytes> {
    tracing::trace!(frame = ?frame, "sending command");
    transport.send(frame).await?;

    let deadline = Instant::now().checked_add(timeout);
    let mut response = BytesMut::with_capacity(16);
    let mut byte = [0u8; 1];

    for _ in 0..MAX_RESPONSE_BYTES {
        let remaining = match deadline {
            Some(deadline) => deadline.saturating_duration_since(Instant::now()),
            None => timeout,
        };
        if remaining.is_zero() {
            tracing::debug!(received = ?&response[..], "response deadline expired");
            return Err(Error::Timeout);
        }

        let n = match transport.receive(&mut byte, remaining).await {
            Ok(n) => n,
            Err(Error::Timeout) => {
                tracing::debug!(received = ?&response[..], "no terminator before timeout");
                return Err(Error::Timeout);
            }
            Err(e) => return Err(e),
        };
        if n == 0 {
            continue;
        }

        response.put_u8(byte[0]);
        if byte[0] == TERMINATOR {
            tracing::trace!(response = ?&response[..], "received response");
            return Ok(response.freeze());
        }
    }

    tracing::debug!(
        reads = MAX_RESPONSE_BYTES,
        received = response.len(),
        "read cap reached without terminator"
    );
    Err(Error::Timeout)
}
