//! mountlib-test-harness: Test utilities and mock transports for mountlib.
//!
//! This crate provides [`MockTransport`] for deterministic unit testing of
//! protocol engines without a mount attached.

pub mod mock_serial;

pub use mock_serial::{MockTransport, SentLog};
