//! Basic NexStar mount control example.
//!
//! Connects to a hand controller, reads the current position, nudges the
//! altitude axis up at a variable rate for two seconds, stops, and reads the
//! position again.
//!
//! # Requirements
//!
//! - A NexStar-protocol hand controller connected via a USB-serial adapter
//! - The serial port path adjusted for your system (e.g., `/dev/ttyUSB0`
//!   on Linux, `COM3` on Windows)
//!
//! # Usage
//!
//! ```sh
//! cargo run -p mountlib --example nudge_and_read
//! ```

use std::time::Duration;

use mountlib::nexstar::NexStarBuilder;
use mountlib::{Axis, Mount};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Adjust this to match your system's serial port.
    let serial_port = "/dev/ttyUSB0";

    println!("Connecting to mount on {}...", serial_port);

    let mount = NexStarBuilder::new()
        .serial_port(serial_port)
        .command_timeout(Duration::from_millis(1500))
        .build()
        .await?;

    let info = mount.info();
    println!("Connected: {} on {}", info.protocol, info.port);

    let before = mount.get_position().await?;
    println!("Position: {} (raw {:04X},{:04X})", before, before.azimuth, before.altitude);

    // 120 arcsec/s upward.
    println!("\nSlewing altitude up...");
    mount.slew_variable(Axis::Altitude, 120).await?;
    tokio::time::sleep(Duration::from_secs(2)).await;
    mount.stop(Axis::Altitude).await?;

    let after = mount.get_position().await?;
    println!("Position now: {}", after);

    mount.close().await?;
    println!("\nDone.");
    Ok(())
}
