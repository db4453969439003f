//! Frame receiver
//!
//! Syncs to frame starts in an unstructured byte stream and pulls one
//! fixed-length payload per frame. Nothing is carried between calls: a
//! byte that is not the marker is dropped on the spot, and a short payload
//! is simply reported as short.

use door_hal::UartRx;

/// Result of one start-of-frame poll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Poll {
    /// No byte waiting
    Idle,
    /// A non-marker byte was read and discarded
    Skipped(u8),
    /// The marker arrived; a payload follows
    FrameStart,
}

/// Marker detection and payload reads over a UART
pub struct FrameReceiver<R> {
    uart: R,
    marker: u8,
}

impl<R: UartRx> FrameReceiver<R> {
    /// Create a receiver that syncs on `marker`
    pub fn new(uart: R, marker: u8) -> Self {
        Self { uart, marker }
    }

    /// Start-of-frame byte
    pub fn marker(&self) -> u8 {
        self.marker
    }

    /// Underlying UART
    pub fn uart(&self) -> &R {
        &self.uart
    }

    /// Release the UART
    pub fn into_inner(self) -> R {
        self.uart
    }

    /// Read at most one byte and report whether a frame has started
    ///
    /// Never blocks.
    pub fn poll_for_start(&mut self) -> Result<Poll, R::Error> {
        Ok(match self.uart.try_read_byte()? {
            None => Poll::Idle,
            Some(byte) if byte == self.marker => Poll::FrameStart,
            Some(byte) => Poll::Skipped(byte),
        })
    }

    /// Read up to `expected_len` payload bytes into the front of `buf`
    ///
    /// Blocks for at most `timeout_ms`. Returns the number of bytes that
    /// arrived; anything less than `expected_len` is an incomplete frame.
    /// Writes are capped at `expected_len` and at `buf.len()`.
    pub fn read_payload(
        &mut self,
        buf: &mut [u8],
        expected_len: usize,
        timeout_ms: u32,
    ) -> Result<usize, R::Error> {
        let len = expected_len.min(buf.len());
        let count = self.uart.read_timeout(&mut buf[..len], timeout_ms)?;
        Ok(count.min(len))
    }
}
