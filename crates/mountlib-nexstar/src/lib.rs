//! NexStar hand-controller protocol backend for mountlib.
//!
//! This crate drives alt-azimuth mounts that speak the NexStar serial
//! protocol. It provides:
//!
//! - **Frame codec** ([`protocol`]) -- build the fixed 7-byte slew frames and
//!   the echo/position queries, and decode `#`-terminated replies.
//! - **Transaction** ([`transaction`]) -- send one command and read until the
//!   terminator, bounded by a byte cap and a deadline.
//! - **Driver** ([`driver`]) -- [`Mount`](mountlib_core::Mount)
//!   implementation owning the transport and the link lifecycle.
//! - **Builder** ([`builder`]) -- opens the port and performs the handshake.
//!
//! # Example
//!
//! ```
//! use mountlib_core::Axis;
//! use mountlib_nexstar::protocol::{decode_position, encode_fixed};
//!
//! let frame = encode_fixed(Axis::Altitude, -40).unwrap();
//! assert_eq!(frame, [0x50, 2, 17, 37, 40, 0, 0]);
//!
//! let pos = decode_position(b"00F0,01A2#").unwrap();
//! assert_eq!((pos.azimuth, pos.altitude), (0x00F0, 0x01A2));
//! ```

pub mod builder;
pub mod driver;
pub mod protocol;
pub mod transaction;

pub use builder::NexStarBuilder;
pub use driver::NexStarMount;
