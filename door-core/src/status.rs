//! Serial status lines
//!
//! Optional human-readable diagnostics echoed back over the link. They
//! carry no protocol meaning; a host may print or ignore them.

use core::fmt::{self, Write as _};

use door_hal::UartTx;
use heapless::String;

use crate::frame_loop::FrameOutcome;

/// Longest rendered line, including the line terminator
const MAX_LINE_LEN: usize = 48;

/// Status messages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StatusLine {
    /// Firmware is up
    Starting,
    /// Strip filled with the idle color
    IdleFill,
    /// Marker byte received
    FrameStart,
    /// Payload read finished with this many bytes
    BytesReceived(usize),
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusLine::Starting => f.write_str("Starting"),
            StatusLine::IdleFill => f.write_str("Setting all LEDs to idle color"),
            StatusLine::FrameStart => f.write_str("SOF Received"),
            StatusLine::BytesReceived(n) => write!(f, "Num bytes received: {}", n),
        }
    }
}

/// Write one status line followed by CRLF
pub fn write_line<T: UartTx>(tx: &mut T, line: StatusLine) -> Result<(), T::Error> {
    let mut buf: String<MAX_LINE_LEN> = String::new();
    // Every variant fits in MAX_LINE_LEN
    let _ = write!(buf, "{}\r\n", line);
    tx.write_blocking(buf.as_bytes())
}

/// Echo the lines for a loop step
///
/// Steps that did not see a marker produce no output.
pub fn report<T: UartTx, E>(
    tx: &mut T,
    outcome: &FrameOutcome<E>,
    payload_len: usize,
) -> Result<(), T::Error> {
    let received = match outcome {
        FrameOutcome::Committed => payload_len,
        FrameOutcome::Discarded { received } => *received,
        _ => return Ok(()),
    };

    write_line(tx, StatusLine::FrameStart)?;
    write_line(tx, StatusLine::BytesReceived(received))?;
    tx.flush()
}
