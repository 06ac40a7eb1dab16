//! Core types used throughout mountlib.
//!
//! These describe motion requests and mount state independently of how a
//! particular controller encodes them on the wire.

use std::fmt;
use std::str::FromStr;

/// A mechanical axis of an alt-azimuth mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Vertical (elevation) axis.
    Altitude,
    /// Horizontal (bearing) axis.
    Azimuth,
}

impl Axis {
    /// Both axes, altitude first.
    pub const ALL: [Axis; 2] = [Axis::Altitude, Axis::Azimuth];
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Altitude => write!(f, "Alt"),
            Axis::Azimuth => write!(f, "Azm"),
        }
    }
}

/// Error returned when parsing an invalid axis string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseAxisError(pub String);

impl fmt::Display for ParseAxisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown axis: '{}'", self.0)
    }
}

impl std::error::Error for ParseAxisError {}

impl From<ParseAxisError> for crate::error::Error {
    fn from(e: ParseAxisError) -> Self {
        crate::error::Error::InvalidParameter(e.to_string())
    }
}

impl FromStr for Axis {
    type Err = ParseAxisError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "alt" | "altitude" => Ok(Axis::Altitude),
            "az" | "azm" | "azimuth" => Ok(Axis::Azimuth),
            _ => Err(ParseAxisError(s.to_string())),
        }
    }
}

/// Direction of travel along an axis, derived from the sign of a rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Positive,
    Negative,
}

impl Direction {
    /// Negative iff `rate < 0`. A zero rate is positive.
    pub fn from_rate(rate: i32) -> Self {
        if rate < 0 {
            Direction::Negative
        } else {
            Direction::Positive
        }
    }
}

/// How a slew rate is expressed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateMode {
    /// One of the controller's preset speeds, 8-bit magnitude.
    Fixed,
    /// Arcseconds per second, sent as a 16-bit count of quarter-arcseconds.
    Variable,
}

impl fmt::Display for RateMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RateMode::Fixed => write!(f, "fixed"),
            RateMode::Variable => write!(f, "variable"),
        }
    }
}

/// A request to move one axis at a signed rate.
///
/// The sign of `rate` selects the [`Direction`]; its magnitude must fit the
/// wire field for `mode` or encoding fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlewRequest {
    pub axis: Axis,
    pub mode: RateMode,
    pub rate: i32,
}

impl SlewRequest {
    pub fn fixed(axis: Axis, rate: i32) -> Self {
        SlewRequest {
            axis,
            mode: RateMode::Fixed,
            rate,
        }
    }

    pub fn variable(axis: Axis, rate: i32) -> Self {
        SlewRequest {
            axis,
            mode: RateMode::Variable,
            rate,
        }
    }

    /// A zero-rate variable slew, which is how the controller is told to stop.
    pub fn stop(axis: Axis) -> Self {
        Self::variable(axis, 0)
    }

    pub fn direction(&self) -> Direction {
        Direction::from_rate(self.rate)
    }
}

/// Raw mount position as reported by the controller.
///
/// Each field is a 16-bit fraction of a full revolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    pub azimuth: u16,
    pub altitude: u16,
}

impl Position {
    /// Convert both axes to degrees as `(azimuth, altitude)`.
    pub fn to_degrees(&self) -> (f64, f64) {
        (raw_to_degrees(self.azimuth), raw_to_degrees(self.altitude))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (az, alt) = self.to_degrees();
        write!(f, "Azm {az:.3} deg, Alt {alt:.3} deg")
    }
}

fn raw_to_degrees(raw: u16) -> f64 {
    raw as f64 / 65536.0 * 360.0
}

/// Lifecycle state of the link to a mount controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkState {
    /// Transport is open, handshake not yet attempted.
    Open,
    /// Echo probe answered correctly. Transitional: a driver moves straight
    /// on to `Ready` while still holding its link lock.
    Verified,
    /// Accepting motion and query operations.
    Ready,
    /// Handshake failed; the instance must not be reused.
    Failed,
    /// Transport closed by the caller.
    Closed,
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LinkState::Open => write!(f, "open"),
            LinkState::Verified => write!(f, "verified"),
            LinkState::Ready => write!(f, "ready"),
            LinkState::Failed => write!(f, "failed"),
            LinkState::Closed => write!(f, "closed"),
        }
    }
}

/// Static information about a connected mount.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountInfo {
    /// Protocol family spoken by the controller (e.g. "NexStar").
    pub protocol: String,
    /// Transport description, e.g. the serial port path.
    pub port: String,
}
