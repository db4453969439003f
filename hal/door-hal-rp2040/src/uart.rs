//! Buffered UART adapter
//!
//! Wraps embassy-rp's interrupt-driven `BufferedUartRx`/`BufferedUartTx`.
//! The ring buffer fills in the background, so polling for a single byte
//! is just a look at the buffer, and a payload read spins on the buffer
//! until it has enough bytes or the deadline passes.

use embassy_rp::uart::{BufferedUartRx, BufferedUartTx, Error as UartError};
use embassy_time::{Duration, Instant};
use embedded_io::{Read, ReadReady, Write};

/// Error from UART operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum UartBusError {
    /// Receive FIFO overflowed
    Overrun,
    /// Line held low (break condition)
    Break,
    /// Parity error
    Parity,
    /// Framing error
    Framing,
    /// Other error
    Other,
}

impl From<UartError> for UartBusError {
    fn from(e: UartError) -> Self {
        match e {
            UartError::Overrun => UartBusError::Overrun,
            UartError::Break => UartBusError::Break,
            UartError::Parity => UartBusError::Parity,
            UartError::Framing => UartBusError::Framing,
            #[allow(unreachable_patterns)]
            _ => UartBusError::Other,
        }
    }
}

/// Receive half of the frame link
pub struct SerialRx {
    rx: BufferedUartRx,
}

impl SerialRx {
    /// Wrap a buffered receiver
    pub fn new(rx: BufferedUartRx) -> Self {
        Self { rx }
    }
}

impl door_hal::UartRx for SerialRx {
    type Error = UartBusError;

    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error> {
        if !self.rx.read_ready()? {
            return Ok(None);
        }

        let mut byte = [0u8; 1];
        let n = self.rx.read(&mut byte)?;
        Ok((n == 1).then_some(byte[0]))
    }

    fn read_timeout(&mut self, buf: &mut [u8], timeout_ms: u32) -> Result<usize, Self::Error> {
        let deadline = Instant::now() + Duration::from_millis(timeout_ms as u64);
        let mut count = 0;

        while count < buf.len() {
            if self.rx.read_ready()? {
                // Only returns what is already buffered, never blocks here
                count += self.rx.read(&mut buf[count..])?;
            } else if Instant::now() >= deadline {
                break;
            }
        }

        Ok(count)
    }
}

/// Transmit half of the frame link, used for status lines
pub struct SerialTx {
    tx: BufferedUartTx,
}

impl SerialTx {
    /// Wrap a buffered transmitter
    pub fn new(tx: BufferedUartTx) -> Self {
        Self { tx }
    }
}

impl door_hal::UartTx for SerialTx {
    type Error = UartBusError;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.tx.write_all(data)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Write::flush(&mut self.tx)?;
        Ok(())
    }
}
