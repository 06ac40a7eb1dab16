// mount-cli -- command-line tool for exercising the NexStar driver against
// a real hand controller or a scripted mock transport.
//
// Usage:
//   mount-cli --port /dev/ttyUSB0 echo
//   mount-cli --port /dev/ttyUSB0 position
//   mount-cli --port /dev/ttyUSB0 slew --axis alt --rate -40 --fixed
//   mount-cli --port /dev/ttyUSB0 slew --axis azm --rate 120 --duration 3
//   mount-cli --port /dev/ttyUSB0 rate --alt 15 --azm -30
//   mount-cli --port /dev/ttyUSB0 stop
//   mount-cli --mock --log-level trace position

mod logging;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use mountlib::nexstar::protocol;
use mountlib::nexstar::{NexStarBuilder, NexStarMount};
use mountlib::{Axis, Mount};
use mountlib_test_harness::MockTransport;

use logging::{init_logging, LogLevel};

// ---------------------------------------------------------------------------
// CLI argument definitions
// ---------------------------------------------------------------------------

/// mount-cli -- drives a NexStar mount from the command line.
#[derive(Parser)]
#[command(name = "mount-cli", version, about)]
struct Cli {
    /// Serial port path (e.g. /dev/ttyUSB0, COM3).
    /// Required unless --mock is used.
    #[arg(long)]
    port: Option<String>,

    /// How long to wait for each reply, in milliseconds.
    #[arg(long, default_value_t = 1000)]
    timeout_ms: u64,

    /// Use a scripted mock transport instead of a serial port.
    #[arg(long)]
    mock: bool,

    /// Log verbosity (written to stderr).
    #[arg(long, value_enum, default_value = "warn")]
    log_level: LogLevel,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Connect, run the echo handshake, and report the link.
    Echo,

    /// Read the azimuth/altitude position.
    Position,

    /// Slew one axis.
    Slew {
        /// Axis: alt or azm.
        #[arg(long)]
        axis: Axis,

        /// Signed rate. Variable: arcsec/s. Fixed (--fixed): preset 0-9.
        #[arg(long, allow_negative_numbers = true)]
        rate: i32,

        /// Use the fixed-rate command instead of a variable rate.
        #[arg(long)]
        fixed: bool,

        /// Stop the axis after this many seconds (0 = leave it moving).
        #[arg(long, default_value_t = 0)]
        duration: u64,
    },

    /// Set variable rates on both axes at once (arcsec/s).
    Rate {
        #[arg(long, allow_negative_numbers = true, default_value_t = 0)]
        alt: i32,

        #[arg(long, allow_negative_numbers = true, default_value_t = 0)]
        azm: i32,
    },

    /// Stop one axis, or both if --axis is omitted.
    Stop {
        #[arg(long)]
        axis: Option<Axis>,
    },
}

// ---------------------------------------------------------------------------
// Connection
// ---------------------------------------------------------------------------

/// A mock controller that answers the handshake and whatever the command
/// will send.
fn mock_controller(command: &Command) -> MockTransport {
    let mut mock = MockTransport::new();
    mock.expect(&protocol::encode_echo(), &protocol::ECHO_REPLY);
    if let Command::Position = command {
        mock.expect(&protocol::encode_get_position(), b"4000,2000#");
    }
    mock.set_default_response(&[protocol::TERMINATOR]);
    mock
}

async fn connect(cli: &Cli) -> Result<NexStarMount> {
    let builder = NexStarBuilder::new().command_timeout(Duration::from_millis(cli.timeout_ms));

    if cli.mock {
        let mount = builder
            .serial_port("mock")
            .build_with_transport(Box::new(mock_controller(&cli.command)))
            .await
            .context("failed to build mount with mock transport")?;
        println!("Connected (mock transport)");
        return Ok(mount);
    }

    let port = cli
        .port
        .as_deref()
        .context("--port is required when not using --mock")?;
    let mount = builder
        .serial_port(port)
        .build()
        .await
        .with_context(|| format!("failed to connect to mount on {port}"))?;
    println!("Connected to mount on {port}");
    Ok(mount)
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

async fn cmd_echo(mount: &dyn Mount) -> Result<()> {
    let info = mount.info();
    println!("Protocol:   {}", info.protocol);
    println!("Port:       {}", info.port);
    println!("Link state: {}", mount.link_state().await);
    Ok(())
}

async fn cmd_position(mount: &dyn Mount) -> Result<()> {
    let pos = mount
        .get_position()
        .await
        .context("failed to read position")?;
    println!("Raw:     {:04X},{:04X}", pos.azimuth, pos.altitude);
    println!("Degrees: {pos}");
    Ok(())
}

async fn cmd_slew(mount: &dyn Mount, axis: Axis, rate: i32, fixed: bool, duration: u64) -> Result<()> {
    let result = if fixed {
        mount.slew_fixed(axis, rate).await
    } else {
        mount.slew_variable(axis, rate).await
    };
    result.with_context(|| format!("failed to slew {axis} at {rate}"))?;
    println!("{axis} slewing at {rate} ({})", if fixed { "fixed" } else { "variable" });

    if duration > 0 {
        tokio::time::sleep(Duration::from_secs(duration)).await;
        mount
            .stop(axis)
            .await
            .with_context(|| format!("failed to stop {axis}"))?;
        println!("{axis} stopped after {duration}s");
    }
    Ok(())
}

async fn cmd_rate(mount: &dyn Mount, alt: i32, azm: i32) -> Result<()> {
    mount
        .set_slew_rate(alt, azm)
        .await
        .context("failed to set slew rates")?;
    println!("Alt {alt} arcsec/s, Azm {azm} arcsec/s");
    Ok(())
}

async fn cmd_stop(mount: &dyn Mount, axis: Option<Axis>) -> Result<()> {
    match axis {
        Some(axis) => {
            mount.stop(axis).await.with_context(|| format!("failed to stop {axis}"))?;
            println!("{axis} stopped");
        }
        None => {
            mount.stop_all().await.context("failed to stop mount")?;
            println!("All axes stopped");
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_level);

    let mount = connect(&cli).await?;

    let result = match &cli.command {
        Command::Echo => cmd_echo(&mount).await,
        Command::Position => cmd_position(&mount).await,
        Command::Slew {
            axis,
            rate,
            fixed,
            duration,
        } => cmd_slew(&mount, *axis, *rate, *fixed, *duration).await,
        Command::Rate { alt, azm } => cmd_rate(&mount, *alt, *azm).await,
        Command::Stop { axis } => cmd_stop(&mount, *axis).await,
    };

    mount.close().await.ok();
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_negative_rate() {
        let cli = Cli::try_parse_from([
            "mount-cli", "--mock", "slew", "--axis", "alt", "--rate", "-40", "--fixed",
        ])
        .unwrap();
        match cli.command {
            Command::Slew {
                axis, rate, fixed, ..
            } => {
                assert_eq!(axis, Axis::Altitude);
                assert_eq!(rate, -40);
                assert!(fixed);
            }
            _ => panic!("expected slew"),
        }
    }

    #[test]
    fn rejects_unknown_axis() {
        let result = Cli::try_parse_from(["mount-cli", "stop", "--axis", "dec"]);
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn mock_echo_reports_ready_link() {
        let cli = Cli::try_parse_from(["mount-cli", "--mock", "echo"]).unwrap();
        assert!(matches!(cli.command, Command::Echo));
        let mount = connect(&cli).await.unwrap();
        assert_eq!(mount.link_state().await, mountlib::LinkState::Ready);
        cmd_echo(&mount).await.unwrap();
    }

    #[tokio::test]
    async fn mock_position_round_trip() {
        let cli = Cli::try_parse_from(["mount-cli", "--mock", "position"]).unwrap();
        let mount = connect(&cli).await.unwrap();
        let pos = mount.get_position().await.unwrap();
        assert_eq!((pos.azimuth, pos.altitude), (0x4000, 0x2000));
    }

    #[tokio::test]
    async fn mock_slew_and_stop() {
        let cli = Cli::try_parse_from(["mount-cli", "--mock", "stop"]).unwrap();
        let mount = connect(&cli).await.unwrap();
        cmd_slew(&mount, Axis::Azimuth, 100, false, 0).await.unwrap();
        cmd_stop(&mount, None).await.unwrap();
    }
}
