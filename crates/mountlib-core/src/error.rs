//! Error types for mountlib.
//!
//! All fallible operations across the library return [`Result<T>`], which
//! uses [`Error`] as the error type. Transport-layer, encoding, protocol, and
//! link-lifecycle errors are all captured here.

use crate::types::LinkState;

/// The error type for all mountlib operations.
///
/// Every error is returned to the immediate caller. Nothing in the library
/// retries a timed-out frame or reopens a failed transport on its own.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The underlying stream could not be opened or configured.
    #[error("transport error: {0}")]
    Transport(String),

    /// The startup echo probe did not come back as expected.
    ///
    /// A driver that fails its handshake is unusable; construct a new one.
    #[error("handshake failed: {0}")]
    Handshake(String),

    /// No terminator arrived within the read bound.
    ///
    /// The driver stays usable for subsequent operations.
    #[error("timeout waiting for response")]
    Timeout,

    /// A requested rate does not fit the wire field. Raised before any I/O.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The controller replied with a malformed or unparseable body.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// An operation was attempted before the link reached `Ready`.
    #[error("mount not ready (link state: {0})")]
    NotReady(LinkState),

    /// An invalid parameter was passed to a mount command.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// No connection to the mount has been established.
    #[error("not connected")]
    NotConnected,

    /// The connection to the mount was lost unexpectedly.
    #[error("connection lost")]
    ConnectionLost,

    /// An underlying I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// A convenience `Result` alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_transport() {
        let e = Error::Transport("port busy".into());
        assert_eq!(e.to_string(), "transport error: port busy");
    }

    #[test]
    fn error_display_handshake() {
        let e = Error::Handshake("echo mismatch".into());
        assert_eq!(e.to_string(), "handshake failed: echo mismatch");
    }

    #[test]
    fn error_display_timeout() {
        let e = Error::Timeout;
        assert_eq!(e.to_string(), "timeout waiting for response");
    }

    #[test]
    fn error_display_encoding() {
        let e = Error::Encoding("fixed rate 256 exceeds 255".into());
        assert_eq!(e.to_string(), "encoding error: fixed rate 256 exceeds 255");
    }

    #[test]
    fn error_display_protocol() {
        let e = Error::Protocol("missing terminator".into());
        assert_eq!(e.to_string(), "protocol error: missing terminator");
    }

    #[test]
    fn error_display_not_ready() {
        let e = Error::NotReady(LinkState::Failed);
        assert_eq!(e.to_string(), "mount not ready (link state: failed)");
    }

    #[test]
    fn error_display_invalid_parameter() {
        let e = Error::InvalidParameter("unknown axis 'Foo'".into());
        assert_eq!(e.to_string(), "invalid parameter: unknown axis 'Foo'");
    }

    #[test]
    fn error_display_not_connected() {
        assert_eq!(Error::NotConnected.to_string(), "not connected");
    }

    #[test]
    fn error_display_connection_lost() {
        assert_eq!(Error::ConnectionLost.to_string(), "connection lost");
    }

    #[test]
    fn error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "pipe broken");
        let e: Error = io_err.into();
        assert!(matches!(e, Error::Io(_)));
        assert!(e.to_string().contains("pipe broken"));
    }

    #[test]
    fn error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}
        assert_send::<Error>();
        assert_sync::<Error>();
    }

    #[test]
    fn error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<Error>();
    }
}
