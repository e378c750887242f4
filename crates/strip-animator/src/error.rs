use core::fmt;

/// Rejection reasons for remote command payloads
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// Payload does not start with a known command keyword
    UnknownCommand,
    /// Color segment is not exactly `#RRGGBB` long
    InvalidLength(usize),
    /// Color segment does not start with `#`
    MissingHash,
    /// Byte at `position` (within the color segment) is not a hex digit
    InvalidHexDigit { position: usize },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCommand => f.write_str("unknown command"),
            Self::InvalidLength(len) => write!(f, "color length was {len}, not 7"),
            Self::MissingHash => f.write_str("color does not start with #"),
            Self::InvalidHexDigit { position } => {
                write!(f, "invalid hex digit at position {position}")
            }
        }
    }
}

impl core::error::Error for ParseError {}

/// Startup failures that must stop the firmware before rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    /// The command mailbox slot was already claimed
    MailboxUnavailable,
}

impl fmt::Display for InitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MailboxUnavailable => f.write_str("command mailbox is already in use"),
        }
    }
}

impl core::error::Error for InitError {}

/// Outcome of a frame submission that did not complete cleanly
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransmitFault {
    /// The transmitter reported an error
    Failed,
    /// The frame was not flushed within the transmit timeout
    TimedOut,
}

impl fmt::Display for TransmitFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Failed => f.write_str("transmit failed"),
            Self::TimedOut => f.write_str("transmit timed out"),
        }
    }
}

impl core::error::Error for TransmitFault {}
