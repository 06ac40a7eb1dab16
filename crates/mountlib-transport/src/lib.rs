//! Transport implementations for mountlib.
//!
//! This crate provides the concrete [`Transport`](mountlib_core::Transport)
//! used to reach a mount controller:
//!
//! - [`SerialTransport`]: USB-to-serial adapters and RS-232 links
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
//! // Ask for the azimuth/altitude position
//! transport.send(b"Z").await?;
//!
//! let mut buf = [0u8; 16];
//! let n = transport.receive(&mut buf, Duration::from_secs(1)).await?;
//! # Ok(())
//! # }
//! ```

pub mod serial;

pub use serial::SerialTransport;
