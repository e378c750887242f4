//! Remote commands
//!
//! Payload grammar (exact bytes, no terminator):
//! - `COLOR#RRGGBB` - solid color
//! - `PULSE#RRGGBB` - breathing pulse of a color
//! - `CHASE` - rotating rainbow chase

use core::fmt;

use crate::color::Rgb;
use crate::error::ParseError;

const COLOR_PREFIX: &[u8] = b"COLOR";
const PULSE_PREFIX: &[u8] = b"PULSE";
const CHASE_PAYLOAD: &[u8] = b"CHASE";

/// Length of a `#RRGGBB` color segment
const RGB24_LEN: usize = 7;

const MODE_ID_COLOR: u8 = 0;
const MODE_ID_RAINBOW_CHASE: u8 = 1;
const MODE_ID_PULSE_WAVE: u8 = 2;

/// Animation command, latest one wins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Every pixel set to one color
    Color(Rgb),
    /// Interleaved rainbow that crawls around the strip
    RainbowChase,
    /// Breathing pulse of one color
    PulseWave(Rgb),
}

/// Known animation modes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum ModeId {
    Color = MODE_ID_COLOR,
    RainbowChase = MODE_ID_RAINBOW_CHASE,
    PulseWave = MODE_ID_PULSE_WAVE,
}

impl ModeId {
    pub fn from_raw(value: u8) -> Option<Self> {
        Some(match value {
            MODE_ID_COLOR => Self::Color,
            MODE_ID_RAINBOW_CHASE => Self::RainbowChase,
            MODE_ID_PULSE_WAVE => Self::PulseWave,
            _ => return None,
        })
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Color => "color",
            Self::RainbowChase => "chase",
            Self::PulseWave => "pulse",
        }
    }
}

impl Default for Command {
    /// Strip off
    fn default() -> Self {
        Self::Color(Rgb::new(0, 0, 0))
    }
}

impl Command {
    /// Parse a raw transport payload
    pub fn parse(payload: &[u8]) -> Result<Self, ParseError> {
        if payload == CHASE_PAYLOAD {
            return Ok(Self::RainbowChase);
        }
        if let Some(color) = strip_keyword(payload, COLOR_PREFIX) {
            return parse_rgb24(color).map(Self::Color);
        }
        if let Some(color) = strip_keyword(payload, PULSE_PREFIX) {
            return parse_rgb24(color).map(Self::PulseWave);
        }
        Err(ParseError::UnknownCommand)
    }

    pub const fn mode(&self) -> ModeId {
        match self {
            Self::Color(_) => ModeId::Color,
            Self::RainbowChase => ModeId::RainbowChase,
            Self::PulseWave(_) => ModeId::PulseWave,
        }
    }

    /// Color carried by the command, if the mode has one
    pub const fn color(&self) -> Option<Rgb> {
        match self {
            Self::Color(color) | Self::PulseWave(color) => Some(*color),
            Self::RainbowChase => None,
        }
    }
}

impl TryFrom<&[u8]> for Command {
    type Error = ParseError;

    fn try_from(payload: &[u8]) -> Result<Self, Self::Error> {
        Self::parse(payload)
    }
}

impl fmt::Display for Command {
    /// Canonical payload form, e.g. `COLOR#1A2B3C`
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Color(c) => write!(f, "COLOR#{:02X}{:02X}{:02X}", c.r, c.g, c.b),
            Self::PulseWave(c) => write!(f, "PULSE#{:02X}{:02X}{:02X}", c.r, c.g, c.b),
            Self::RainbowChase => f.write_str("CHASE"),
        }
    }
}

/// Returns the `#...` segment following `keyword`, if the payload has
/// anything after the keyword and its separator.
fn strip_keyword<'a>(payload: &'a [u8], keyword: &[u8]) -> Option<&'a [u8]> {
    let rest = payload.strip_prefix(keyword)?;
    (rest.len() > 1 && rest.first() == Some(&b'#')).then_some(rest)
}

/// Parse a `#RRGGBB` color segment
///
/// Digits are packed big-endian: `#1A2B3C` is `r = 0x1A, g = 0x2B, b = 0x3C`.
pub fn parse_rgb24(data: &[u8]) -> Result<Rgb, ParseError> {
    if data.len() != RGB24_LEN {
        return Err(ParseError::InvalidLength(data.len()));
    }
    let (hash, digits) = data.split_at(1);
    if hash != b"#" {
        return Err(ParseError::MissingHash);
    }

    let mut value: u32 = 0;
    for (i, &digit) in digits.iter().enumerate() {
        let nibble = hex_nibble(digit).ok_or(ParseError::InvalidHexDigit { position: i + 1 })?;
        value = (value << 4) | u32::from(nibble);
    }

    let [_, r, g, b] = value.to_be_bytes();
    Ok(Rgb { r, g, b })
}

fn hex_nibble(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_payload_parses_big_endian() {
        assert_eq!(
            Command::parse(b"COLOR#1A2B3C"),
            Ok(Command::Color(Rgb::new(0x1A, 0x2B, 0x3C)))
        );
    }

    #[test]
    fn pulse_payload_accepts_lowercase() {
        assert_eq!(
            Command::parse(b"PULSE#ff8000"),
            Ok(Command::PulseWave(Rgb::new(0xFF, 0x80, 0x00)))
        );
    }

    #[test]
    fn chase_must_match_exactly() {
        assert_eq!(Command::parse(b"CHASE"), Ok(Command::RainbowChase));
        assert_eq!(Command::parse(b"CHASE "), Err(ParseError::UnknownCommand));
        assert_eq!(Command::parse(b"chase"), Err(ParseError::UnknownCommand));
    }

    #[test]
    fn short_color_is_rejected() {
        assert_eq!(
            Command::parse(b"COLOR#1A2B3"),
            Err(ParseError::InvalidLength(6))
        );
    }

    #[test]
    fn long_color_is_rejected() {
        assert_eq!(
            Command::parse(b"COLOR#1A2B3C4"),
            Err(ParseError::InvalidLength(8))
        );
    }

    #[test]
    fn non_hex_color_is_rejected() {
        assert_eq!(
            Command::parse(b"COLOR#GGGGGG"),
            Err(ParseError::InvalidHexDigit { position: 1 })
        );
        assert_eq!(
            Command::parse(b"PULSE#00FF0Z"),
            Err(ParseError::InvalidHexDigit { position: 6 })
        );
    }

    #[test]
    fn keyword_without_color_is_unknown() {
        assert_eq!(Command::parse(b"COLOR"), Err(ParseError::UnknownCommand));
        assert_eq!(Command::parse(b"COLOR#"), Err(ParseError::UnknownCommand));
        assert_eq!(Command::parse(b"COLOR123456"), Err(ParseError::UnknownCommand));
        assert_eq!(Command::parse(b""), Err(ParseError::UnknownCommand));
    }

    #[test]
    fn rgb24_requires_hash() {
        assert_eq!(parse_rgb24(b"x1A2B3C"), Err(ParseError::MissingHash));
        assert_eq!(parse_rgb24(b"#000000"), Ok(Rgb::new(0, 0, 0)));
    }

    #[test]
    fn mode_ids_round_trip_through_raw() {
        for mode in [ModeId::Color, ModeId::RainbowChase, ModeId::PulseWave] {
            assert_eq!(ModeId::from_raw(mode as u8), Some(mode));
        }
        assert_eq!(ModeId::from_raw(3), None);
    }

    #[test]
    fn command_exposes_mode_and_color() {
        let pulse = Command::PulseWave(Rgb::new(1, 2, 3));
        assert_eq!(pulse.mode(), ModeId::PulseWave);
        assert_eq!(pulse.color(), Some(Rgb::new(1, 2, 3)));
        assert_eq!(Command::RainbowChase.color(), None);
        assert_eq!(Command::default(), Command::Color(Rgb::new(0, 0, 0)));
    }
}
