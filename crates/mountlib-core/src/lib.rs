//! mountlib-core: Core traits, types, and error definitions for mountlib.
//!
//! This crate defines the controller-agnostic abstractions that mountlib
//! backends implement. Applications depend on these types without pulling in
//! a specific protocol driver.
//!
//! # Key types
//!
//! - [`Mount`] -- the unified trait for controlling a mount
//! - [`Transport`] -- byte-level communication channel
//! - [`MountEvent`] -- notifications emitted after successful operations
//! - [`Error`] / [`Result`] -- error handling

pub mod error;
pub mod events;
pub mod mount;
pub mod transport;
pub mod types;

pub use error::{Error, Result};
pub use events::MountEvent;
pub use mount::Mount;
pub use transport::Transport;
pub use types::*;
