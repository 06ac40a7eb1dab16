//! NexStar binary frame encoder and response decoder.
//!
//! The hand controller accepts short binary commands and answers every one
//! of them with a reply terminated by `#` (0x23).
//!
//! # Slew frames
//!
//! Motion commands are a fixed 7-byte "pass-through" frame addressed to one
//! of the motor controllers:
//!
//! ```text
//! 'P' <len> <axis> <dir> <payload...> <0-padding>
//! ```
//!
//! | Mode     | len | dir (+/-) | payload                 |
//! |----------|-----|-----------|-------------------------|
//! | Fixed    | 2   | 36 / 37   | rate (1 byte), 0, 0     |
//! | Variable | 3   | 6 / 7     | rate hi, rate lo, 0     |
//!
//! Axis address: Altitude = 17, Azimuth = 16. Variable rates are sent in
//! quarter-arcseconds per second, so the wire value is `4 * |rate|`.
//!
//! # Replies
//!
//! - Echo: the probe `K 0x45` is answered with `0x45 #`.
//! - Position: `Z` is answered with `AAAA,BBBB#`, two 16-bit hex fields
//!   (azimuth, then altitude).
//! - Slews: `#` (payload ignored).

use mountlib_core::{Axis, Direction, Error, Position, RateMode, Result, SlewRequest};

/// Reply terminator byte (`#`).
pub const TERMINATOR: u8 = b'#';

/// Length of every slew frame.
pub const SLEW_FRAME_LEN: usize = 7;

/// Pass-through command opcode.
const OPCODE_PASS_THROUGH: u8 = b'P';
/// Echo command opcode.
const OPCODE_ECHO: u8 = b'K';
/// Get azimuth/altitude command opcode.
const OPCODE_GET_AZM_ALT: u8 = b'Z';

/// Byte sent with the echo probe and expected back.
pub const ECHO_BYTE: u8 = 0x45;

/// Expected reply to [`encode_echo`].
pub const ECHO_REPLY: [u8; 2] = [ECHO_BYTE, TERMINATOR];

/// Largest fixed-rate magnitude (one byte).
pub const MAX_FIXED_RATE: u32 = 0xFF;
/// Largest variable-rate wire value in quarter-arcseconds (two bytes).
pub const MAX_VARIABLE_QUARTER_ARCSEC: u32 = 0xFFFF;

/// A fully encoded slew command.
pub type SlewFrame = [u8; SLEW_FRAME_LEN];

fn axis_code(axis: Axis) -> u8 {
    match axis {
        Axis::Altitude => 17,
        Axis::Azimuth => 16,
    }
}

fn direction_code(mode: RateMode, direction: Direction) -> u8 {
    match (mode, direction) {
        (RateMode::Fixed, Direction::Positive) => 36,
        (RateMode::Fixed, Direction::Negative) => 37,
        (RateMode::Variable, Direction::Positive) => 6,
        (RateMode::Variable, Direction::Negative) => 7,
    }
}

fn sub_length(mode: RateMode) -> u8 {
    match mode {
        RateMode::Fixed => 2,
        RateMode::Variable => 3,
    }
}

fn slew_header(axis: Axis, mode: RateMode, rate: i32) -> SlewFrame {
    let direction = Direction::from_rate(rate);
    [
        OPCODE_PASS_THROUGH,
        sub_length(mode),
        axis_code(axis),
        direction_code(mode, direction),
        0,
        0,
        0,
    ]
}

/// Encode a fixed-rate slew.
///
/// Fails with [`Error::Encoding`] if `|rate|` does not fit in one byte.
///
/// # Example
///
/// ```
/// use mountlib_core::Axis;
/// use mountlib_nexstar::protocol::encode_fixed;
///
/// let frame = encode_fixed(Axis::Altitude, -40).unwrap();
/// assert_eq!(frame, [b'P', 2, 17, 37, 40, 0, 0]);
/// ```
pub fn encode_fixed(axis: Axis, rate: i32) -> Result<SlewFrame> {
    let magnitude = rate.unsigned_abs();
    if magnitude > MAX_FIXED_RATE {
        return Err(Error::Encoding(format!(
            "fixed rate {rate} exceeds {MAX_FIXED_RATE}"
        )));
    }
    let mut frame = slew_header(axis, RateMode::Fixed, rate);
    frame[4] = magnitude as u8;
    Ok(frame)
}

/// Encode a variable-rate slew, `rate` in arcseconds per second.
///
/// Fails with [`Error::Encoding`] if `4 * |rate|` does not fit in 16 bits.
///
/// # Example
///
/// ```
/// use mountlib_core::Axis;
/// use mountlib_nexstar::protocol::encode_variable;
///
/// // 4 * 100 = 400 = 0x0190
/// let frame = encode_variable(Axis::Azimuth, 100).unwrap();
/// assert_eq!(frame, [b'P', 3, 16, 6, 0x01, 0x90, 0]);
/// ```
pub fn encode_variable(axis: Axis, rate: i32) -> Result<SlewFrame> {
    let quarter_arcsec = rate
        .unsigned_abs()
        .checked_mul(4)
        .filter(|q| *q <= MAX_VARIABLE_QUARTER_ARCSEC)
        .ok_or_else(|| {
            Error::Encoding(format!(
                "variable rate {rate} arcsec/s exceeds {} quarter-arcsec",
                MAX_VARIABLE_QUARTER_ARCSEC
            ))
        })?;
    let mut frame = slew_header(axis, RateMode::Variable, rate);
    frame[4] = (quarter_arcsec >> 8) as u8;
    frame[5] = (quarter_arcsec & 0xFF) as u8;
    Ok(frame)
}

/// Encode any [`SlewRequest`], dispatching on its rate mode.
pub fn encode_slew(request: &SlewRequest) -> Result<SlewFrame> {
    match request.mode {
        RateMode::Fixed => encode_fixed(request.axis, request.rate),
        RateMode::Variable => encode_variable(request.axis, request.rate),
    }
}

/// Build the startup echo probe (`K 0x45`).
pub fn encode_echo() -> [u8; 2] {
    [OPCODE_ECHO, ECHO_BYTE]
}

/// Build the "get azimuth/altitude" query (`Z`).
pub fn encode_get_position() -> [u8; 1] {
    [OPCODE_GET_AZM_ALT]
}

/// Return an echo reply unchanged, for comparison against [`ECHO_REPLY`].
pub fn decode_echo(buf: &[u8]) -> &[u8] {
    buf
}

/// Decode a `AAAA,BBBB#` position reply.
///
/// The buffer must end with the terminator. The body must be exactly two
/// comma-separated hex fields that each fit in 16 bits; anything else is an
/// [`Error::Protocol`].
///
/// # Example
///
/// ```
/// use mountlib_nexstar::protocol::decode_position;
///
/// let pos = decode_position(b"00F0,01A2#").unwrap();
/// assert_eq!(pos.azimuth, 0x00F0);
/// assert_eq!(pos.altitude, 0x01A2);
/// ```
pub fn decode_position(buf: &[u8]) -> Result<Position> {
    let body = match buf.split_last() {
        Some((&TERMINATOR, body)) => body,
        Some(_) => {
            return Err(Error::Protocol(format!(
                "position reply missing terminator: {buf:02X?}"
            )));
        }
        None => return Err(Error::Protocol("empty position reply".into())),
    };

    let text = std::str::from_utf8(body)
        .map_err(|_| Error::Protocol(format!("position reply is not ASCII: {body:02X?}")))?;

    let fields: Vec<&str> = text.split(',').collect();
    let [azimuth, altitude] = fields.as_slice() else {
        return Err(Error::Protocol(format!(
            "expected 2 position fields, got {}: {text:?}",
            fields.len()
        )));
    };

    Ok(Position {
        azimuth: parse_hex_field(azimuth)?,
        altitude: parse_hex_field(altitude)?,
    })
}

fn parse_hex_field(field: &str) -> Result<u16> {
    // from_str_radix tolerates a leading '+', the controller never sends one.
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::Protocol(format!("invalid hex field: {field:?}")));
    }
    u16::from_str_radix(field, 16)
        .map_err(|e| Error::Protocol(format!("invalid hex field {field:?}: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    // ---------------------------------------------------------------
    // Fixed-rate frames
    // ---------------------------------------------------------------

    #[test]
    fn fixed_altitude_negative() {
        let frame = encode_fixed(Axis::Altitude, -40).unwrap();
        assert_eq!(frame, [0x50, 2, 17, 37, 40, 0, 0]);
    }

    #[test]
    fn fixed_azimuth_positive() {
        let frame = encode_fixed(Axis::Azimuth, 9).unwrap();
        assert_eq!(frame, [0x50, 2, 16, 36, 9, 0, 0]);
    }

    #[test]
    fn fixed_zero_is_positive() {
        let frame = encode_fixed(Axis::Azimuth, 0).unwrap();
        assert_eq!(frame[3], 36);
        assert_eq!(frame[4], 0);
    }

    #[test]
    fn fixed_magnitude_and_sign_over_full_range() {
        for rate in -255..=255 {
            for axis in Axis::ALL {
                let frame = encode_fixed(axis, rate).unwrap();
                assert_eq!(frame.len(), SLEW_FRAME_LEN);
                assert_eq!(frame[4] as i32, rate.abs());
                assert_eq!(frame[3], if rate < 0 { 37 } else { 36 });
                assert_eq!(&frame[5..], &[0, 0]);
            }
        }
    }

    #[test]
    fn fixed_rejects_256() {
        assert!(matches!(
            encode_fixed(Axis::Altitude, 256),
            Err(Error::Encoding(_))
        ));
        assert!(matches!(
            encode_fixed(Axis::Altitude, -256),
            Err(Error::Encoding(_))
        ));
    }

    #[test]
    fn fixed_rejects_i32_min() {
        assert!(matches!(
            encode_fixed(Axis::Azimuth, i32::MIN),
            Err(Error::Encoding(_))
        ));
    }

    // ---------------------------------------------------------------
    // Variable-rate frames
    // ---------------------------------------------------------------

    #[test]
    fn variable_splits_quarter_arcsec() {
        // 4 * 1000 = 4000 = 0x0FA0
        let frame = encode_variable(Axis::Altitude, -1000).unwrap();
        assert_eq!(frame, [0x50, 3, 17, 7, 0x0F, 0xA0, 0]);
    }

    #[test]
    fn variable_high_low_reassemble() {
        for rate in [0, 1, 63, 64, 255, 1000, 8191, 16383] {
            for signed in [rate, -rate] {
                let frame = encode_variable(Axis::Azimuth, signed).unwrap();
                let wire = frame[4] as u32 * 256 + frame[5] as u32;
                assert_eq!(wire, 4 * rate as u32);
                assert_eq!(frame[6], 0);
            }
        }
    }

    #[test]
    fn variable_direction_codes() {
        assert_eq!(encode_variable(Axis::Azimuth, 1).unwrap()[3], 6);
        assert_eq!(encode_variable(Axis::Azimuth, -1).unwrap()[3], 7);
        assert_eq!(encode_variable(Axis::Azimuth, 0).unwrap()[3], 6);
    }

    #[test]
    fn variable_accepts_16383() {
        let frame = encode_variable(Axis::Altitude, 16383).unwrap();
        assert_eq!((frame[4], frame[5]), (0xFF, 0xFC));
    }

    #[test]
    fn variable_rejects_16384() {
        assert!(matches!(
            encode_variable(Axis::Altitude, 16384),
            Err(Error::Encoding(_))
        ));
        assert!(matches!(
            encode_variable(Axis::Azimuth, -16384),
            Err(Error::Encoding(_))
        ));
    }

    #[test]
    fn variable_rejects_multiply_overflow() {
        assert!(matches!(
            encode_variable(Axis::Altitude, i32::MAX),
            Err(Error::Encoding(_))
        ));
    }

    #[test]
    fn encode_slew_dispatches_on_mode() {
        let fixed = encode_slew(&SlewRequest::fixed(Axis::Azimuth, 3)).unwrap();
        assert_eq!(fixed[1], 2);
        let variable = encode_slew(&SlewRequest::variable(Axis::Azimuth, 3)).unwrap();
        assert_eq!(variable[1], 3);
        let stop = encode_slew(&SlewRequest::stop(Axis::Altitude)).unwrap();
        assert_eq!(stop, [0x50, 3, 17, 6, 0, 0, 0]);
    }

    // ---------------------------------------------------------------
    // Simple commands
    // ---------------------------------------------------------------

    #[test]
    fn echo_and_position_queries() {
        assert_eq!(encode_echo(), [0x4B, 0x45]);
        assert_eq!(encode_get_position(), [0x5A]);
        assert_eq!(ECHO_REPLY, [0x45, 0x23]);
    }

    #[test]
    fn decode_echo_is_identity() {
        assert_eq!(decode_echo(&[0x45, 0x23]), &ECHO_REPLY);
    }

    // ---------------------------------------------------------------
    // Position replies
    // ---------------------------------------------------------------

    #[test]
    fn decode_position_reply() {
        let pos = decode_position(b"00F0,01A2#").unwrap();
        assert_eq!(
            pos,
            Position {
                azimuth: 0x00F0,
                altitude: 0x01A2
            }
        );
    }

    #[test]
    fn decode_position_lowercase_and_max() {
        let pos = decode_position(b"ffff,abcd#").unwrap();
        assert_eq!(pos.azimuth, 0xFFFF);
        assert_eq!(pos.altitude, 0xABCD);
    }

    #[test]
    fn decode_position_missing_terminator() {
        assert!(matches!(
            decode_position(b"00F0,01A2"),
            Err(Error::Protocol(_))
        ));
    }

    #[test]
    fn decode_position_empty() {
        assert!(matches!(decode_position(b""), Err(Error::Protocol(_))));
        assert!(matches!(decode_position(b"#"), Err(Error::Protocol(_))));
    }

    #[test]
    fn decode_position_wrong_field_count() {
        assert!(matches!(decode_position(b"00F0#"), Err(Error::Protocol(_))));
        assert!(matches!(
            decode_position(b"00F0,01A2,0000#"),
            Err(Error::Protocol(_))
        ));
    }

    #[test]
    fn decode_position_bad_hex() {
        assert!(matches!(
            decode_position(b"00G0,01A2#"),
            Err(Error::Protocol(_))
        ));
        assert!(matches!(decode_position(b",01A2#"), Err(Error::Protocol(_))));
        assert!(matches!(
            decode_position(b"+0F0,01A2#"),
            Err(Error::Protocol(_))
        ));
    }

    #[test]
    fn decode_position_field_too_wide() {
        assert!(matches!(
            decode_position(b"10000,0000#"),
            Err(Error::Protocol(_))
        ));
    }

    #[test]
    fn decode_position_non_ascii() {
        assert!(matches!(
            decode_position(&[0xFF, b',', b'0', b'#']),
            Err(Error::Protocol(_))
        ));
    }
}
