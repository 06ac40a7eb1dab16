//! NexStarMount -- the [`Mount`] trait implementation for NexStar hand
//! controllers.
//!
//! This module ties the frame encoder and response decoder ([`protocol`]) and
//! the bounded read loop ([`transaction`]) to a [`Transport`]. It owns the
//! link lifecycle:
//!
//! ```text
//! Open --handshake ok--> Verified --> Ready --close--> Closed
//!   \
//!    `--handshake failed--> Failed
//! ```
//!
//! `Verified` is a step inside [`NexStarMount::handshake`]: the echo check and
//! the move to `Ready` happen under one lock, so callers only ever observe
//! `Open`, `Ready`, `Failed` or `Closed`.
//!
//! Only `Ready` accepts motion and query commands. A `Failed` driver stays
//! failed; the caller must build a new one.

use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{broadcast, Mutex};
use tracing::{debug, info, warn};

use mountlib_core::error::{Error, Result};
use mountlib_core::events::MountEvent;
use mountlib_core::mount::Mount;
use mountlib_core::transport::Transport;
use mountlib_core::types::*;

use crate::protocol;
use crate::transaction;

/// Link state and transport, locked together so a transaction and the state
/// check that guards it cannot interleave with another caller.
struct Link {
    transport: Box<dyn Transport>,
    state: LinkState,
}

/// A NexStar-protocol mount reached over a [`Transport`].
///
/// Constructed via [`NexStarBuilder`](crate::builder::NexStarBuilder), which
/// runs the handshake before handing the driver out.
pub struct NexStarMount {
    link: Mutex<Link>,
    command_timeout: Duration,
    event_tx: broadcast::Sender<MountEvent>,
    info: MountInfo,
}

impl NexStarMount {
    /// Wrap an already-open transport. The link starts in
    /// [`LinkState::Open`]; call [`handshake`](Self::handshake) before use.
    pub fn new(transport: Box<dyn Transport>, port: &str, command_timeout: Duration) -> Self {
        let (event_tx, _) = broadcast::channel(64);
        NexStarMount {
            link: Mutex::new(Link {
                transport,
                state: LinkState::Open,
            }),
            command_timeout,
            event_tx,
            info: MountInfo {
                protocol: "NexStar".to_string(),
                port: port.to_string(),
            },
        }
    }

    /// Send the echo probe and move the link to `Ready` if it comes back.
    ///
    /// Any mismatch or timeout fails with [`Error::Handshake`] and leaves the
    /// link `Failed`. Only valid from `Open`.
    pub async fn handshake(&self) -> Result<()> {
        let mut link = self.link.lock().await;
        if link.state != LinkState::Open {
            return Err(Error::NotReady(link.state));
        }

        let probe = protocol::encode_echo();
        let outcome =
            transaction::execute(link.transport.as_mut(), &probe, self.command_timeout).await;

        let reply = match outcome {
            Ok(buf) => buf,
            Err(e) => {
                link.state = LinkState::Failed;
                warn!(port = %self.info.port, error = %e, "echo probe failed");
                return Err(Error::Handshake(format!("echo probe failed: {e}")));
            }
        };

        if protocol::decode_echo(&reply) != &protocol::ECHO_REPLY[..] {
            link.state = LinkState::Failed;
            warn!(port = %self.info.port, reply = ?&reply[..], "echo mismatch");
            return Err(Error::Handshake(format!(
                "expected echo {:02X?}, got {:02X?}",
                protocol::ECHO_REPLY,
                &reply[..]
            )));
        }

        debug!(port = %self.info.port, state = %LinkState::Verified, "echo verified");
        link.state = LinkState::Ready;
        info!(port = %self.info.port, "mount link established");
        let _ = self.event_tx.send(MountEvent::HandshakeCompleted);
        Ok(())
    }

    /// Run one command on a `Ready` link and return the raw reply.
    async fn execute_command(&self, frame: &[u8]) -> Result<bytes::Bytes> {
        let mut link = self.link.lock().await;
        if link.state != LinkState::Ready {
            return Err(Error::NotReady(link.state));
        }
        transaction::execute(link.transport.as_mut(), frame, self.command_timeout).await
    }

    /// Encode and send a slew. Encoding errors surface before any I/O.
    async fn execute_slew(&self, request: SlewRequest) -> Result<()> {
        let frame = protocol::encode_slew(&request)?;
        debug!(
            axis = %request.axis,
            mode = %request.mode,
            rate = request.rate,
            "slewing"
        );
        // Slew replies carry no payload beyond the terminator.
        let _ = self.execute_command(&frame).await?;
        let _ = self.event_tx.send(MountEvent::SlewCommanded(request));
        Ok(())
    }
}

#[async_trait]
impl Mount for NexStarMount {
    fn info(&self) -> &MountInfo {
        &self.info
    }

    async fn link_state(&self) -> LinkState {
        self.link.lock().await.state
    }

    async fn slew_fixed(&self, axis: Axis, rate: i32) -> Result<()> {
        self.execute_slew(SlewRequest::fixed(axis, rate)).await
    }

    async fn slew_variable(&self, axis: Axis, rate: i32) -> Result<()> {
        self.execute_slew(SlewRequest::variable(axis, rate)).await
    }

    async fn get_position(&self) -> Result<Position> {
        debug!("reading position");
        let reply = self
            .execute_command(&protocol::encode_get_position())
            .await?;
        let position = protocol::decode_position(&reply)?;
        let _ = self.event_tx.send(MountEvent::PositionRead(position));
        Ok(position)
    }

    fn subscribe(&self) -> Result<broadcast::Receiver<MountEvent>> {
        Ok(self.event_tx.subscribe())
    }

    async fn close(&self) -> Result<()> {
        let mut link = self.link.lock().await;
        if link.state == LinkState::Closed {
            return Ok(());
        }
        link.state = LinkState::Closed;
        link.transport.close().await?;
        info!(port = %self.info.port, "mount link closed");
        let _ = self.event_tx.send(MountEvent::Disconnected);
        Ok(())
    }
}
