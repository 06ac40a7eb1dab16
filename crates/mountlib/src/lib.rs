//! # mountlib -- Telescope mount control over serial links
//!
//! `mountlib` is an asynchronous Rust library for driving motorized
//! alt-azimuth telescope mounts through their hand controller. It covers the
//! protocol layer: building motion commands, the send/read-until-terminator
//! exchange, and decoding replies. Deciding *when* to slew (tracking,
//! guiding, UIs) is left to the application.
//!
//! ## Quick Start
//!
//! ```no_run
//! use mountlib::{Axis, Mount};
//! use mountlib::nexstar::NexStarBuilder;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mount = NexStarBuilder::new()
//!         .serial_port("/dev/ttyUSB0")
//!         .build()
//!         .await?;
//!
//!     mount.slew_fixed(Axis::Azimuth, 5).await?;
//!     let pos = mount.get_position().await?;
//!     println!("{pos}");
//!     mount.stop_all().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! | Crate                   | Purpose                                       |
//! |-------------------------|-----------------------------------------------|
//! | `mountlib-core`         | [`Mount`] and [`Transport`] traits, types, errors |
//! | `mountlib-transport`    | Serial transport                              |
//! | `mountlib-nexstar`      | NexStar hand-controller protocol driver       |
//! | **`mountlib`**          | This facade crate -- re-exports everything    |
//!
//! ## Feature Flags
//!
//! | Feature   | Enables                               | Default |
//! |-----------|---------------------------------------|---------|
//! | `nexstar` | [`nexstar`] module (NexStar protocol) | yes     |
//!
//! ## Events
//!
//! Drivers emit a [`MountEvent`] after each successful operation:
//!
//! ```no_run
//! use mountlib::{Mount, MountEvent};
//! # async fn example(mount: &dyn Mount) -> mountlib::Result<()> {
//! let mut events = mount.subscribe()?;
//! while let Ok(event) = events.recv().await {
//!     if let MountEvent::PositionRead(pos) = event {
//!         println!("{pos}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub use mountlib_core::*;

/// Serial transport to the hand controller.
pub mod serial {
    pub use mountlib_transport::*;
}

/// NexStar hand-controller protocol backend.
///
/// Provides [`NexStarMount`](nexstar::NexStarMount) and
/// [`NexStarBuilder`](nexstar::NexStarBuilder).
#[cfg(feature = "nexstar")]
pub mod nexstar {
    pub use mountlib_nexstar::*;
}
