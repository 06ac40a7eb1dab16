//! Asynchronous mount event types.
//!
//! Drivers emit events through a [`tokio::sync::broadcast`] channel after an
//! operation completes successfully. Displays and loggers can subscribe
//! instead of wrapping every call.

use crate::types::{Position, SlewRequest};

/// An event emitted by a mount driver.
///
/// Delivery is best-effort through a bounded broadcast channel; slow
/// consumers may miss events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountEvent {
    /// The startup echo probe succeeded and the link is ready.
    HandshakeCompleted,

    /// A slew command was acknowledged by the controller.
    SlewCommanded(SlewRequest),

    /// A position query returned.
    PositionRead(Position),

    /// The transport was closed.
    Disconnected,
}
