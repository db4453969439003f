//! UART serial communication abstractions
//!
//! The receive side mirrors how a serial-fed LED controller actually uses
//! the link: a cheap "is there a byte?" poll while idle, then one bounded
//! read for the frame payload.

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the UART
    ///
    /// Blocks until all data has been written or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;
}

/// UART receiver
pub trait UartRx {
    /// Error type for receive operations
    type Error;

    /// Take one byte if one is already waiting
    ///
    /// Never blocks. Returns `Ok(None)` when the receive buffer is empty.
    fn try_read_byte(&mut self) -> Result<Option<u8>, Self::Error>;

    /// Read into `buf` until it is full or `timeout_ms` elapses
    ///
    /// Returns the number of bytes written to the front of `buf`. A count
    /// shorter than `buf.len()` means the timeout expired first.
    fn read_timeout(&mut self, buf: &mut [u8], timeout_ms: u32) -> Result<usize, Self::Error>;
}

/// Combined UART interface
///
/// For UARTs that provide both TX and RX on a single peripheral.
pub trait Uart: UartTx + UartRx {}

// Blanket implementation
impl<T: UartTx + UartRx> Uart for T {}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Upper bound for a payload read, in milliseconds
    pub read_timeout_ms: u32,
}

impl Default for UartConfig {
    fn default() -> Self {
        Self {
            baudrate: 115_200,
            read_timeout_ms: 100,
        }
    }
}

impl UartConfig {
    /// Time needed to clock `bytes` bytes through the line, in milliseconds
    ///
    /// Assumes 8N1 framing (10 bit times per byte) and rounds up.
    pub fn transfer_time_ms(&self, bytes: usize) -> u32 {
        if self.baudrate == 0 {
            return u32::MAX;
        }
        let bits = bytes as u64 * 10;
        let ms = (bits * 1000).div_ceil(self.baudrate as u64);
        ms.min(u32::MAX as u64) as u32
    }
}
