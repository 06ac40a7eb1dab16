//! The `Mount` trait -- unified interface for mount controller backends.
//!
//! Application code (trackers, guiding loops, UIs) programs against
//! `dyn Mount` and decides *when* to slew; backends such as
//! `mountlib-nexstar` decide *how* that reaches the controller.

use async_trait::async_trait;
use tokio::sync::broadcast;

use crate::error::Result;
use crate::events::MountEvent;
use crate::types::*;

/// Unified asynchronous interface for controlling an alt-azimuth mount.
///
/// Operations are serialized per mount: each one is a single
/// request/response exchange with the controller.
#[async_trait]
pub trait Mount: Send + Sync {
    /// Return static information about the connected mount.
    fn info(&self) -> &MountInfo;

    /// Current lifecycle state of the link.
    async fn link_state(&self) -> LinkState;

    /// Slew one axis at a preset (fixed) rate. The sign selects direction.
    async fn slew_fixed(&self, axis: Axis, rate: i32) -> Result<()>;

    /// Slew one axis at a variable rate in arcseconds per second.
    async fn slew_variable(&self, axis: Axis, rate: i32) -> Result<()>;

    /// Issue an arbitrary slew request.
    async fn slew(&self, request: SlewRequest) -> Result<()> {
        match request.mode {
            RateMode::Fixed => self.slew_fixed(request.axis, request.rate).await,
            RateMode::Variable => self.slew_variable(request.axis, request.rate).await,
        }
    }

    /// Set variable rates on both axes, altitude first.
    async fn set_slew_rate(&self, alt: i32, azm: i32) -> Result<()> {
        self.slew_variable(Axis::Altitude, alt).await?;
        self.slew_variable(Axis::Azimuth, azm).await
    }

    /// Stop one axis with a zero-rate variable slew.
    async fn stop(&self, axis: Axis) -> Result<()> {
        self.slew(SlewRequest::stop(axis)).await
    }

    /// Stop both axes.
    async fn stop_all(&self) -> Result<()> {
        for axis in Axis::ALL {
            self.stop(axis).await?;
        }
        Ok(())
    }

    /// Read the raw azimuth/altitude position.
    async fn get_position(&self) -> Result<Position>;

    /// Subscribe to mount events.
    fn subscribe(&self) -> Result<broadcast::Receiver<MountEvent>>;

    /// Close the link. Further operations fail with `NotReady`.
    async fn close(&self) -> Result<()>;
}
