//! Strip and link configuration

use door_hal::UartConfig;
use door_protocol::{frame, FRAME_MARKER};
use smart_leds::RGB8;

use crate::mapping::Mapping;

/// Dim white shown between power-up and the first frame
pub const DEFAULT_IDLE_COLOR: RGB8 = RGB8::new(0x04, 0x04, 0x04);

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Strip has no pixels
    ZeroPixels,
    /// Baud rate of zero
    InvalidBaudrate,
    /// Payload read timeout of zero
    ZeroTimeout,
    /// A full frame cannot cross the link within the read timeout
    TimeoutTooShort,
    /// Configured pixel count differs from the drawing buffer size
    PixelCountMismatch,
    /// Strip driver has fewer pixels than a frame carries
    StripTooShort,
}

/// Strip and serial link configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StripConfig {
    /// Number of physical LEDs (N)
    pub num_pixels: usize,
    /// Start-of-frame byte
    pub marker: u8,
    /// Serial link settings
    pub uart: UartConfig,
    /// Color every LED shows before the first frame
    pub idle_color: RGB8,
    /// How payload bytes turn into pixel colors
    pub mapping: Mapping,
    /// Echo status lines back over the serial link
    pub echo_status: bool,
}

impl StripConfig {
    /// Four 10-LED columns on a 115200 baud link
    pub const DEFAULT: Self = Self {
        num_pixels: 40,
        marker: FRAME_MARKER,
        uart: UartConfig {
            baudrate: 115_200,
            read_timeout_ms: 100,
        },
        idle_color: DEFAULT_IDLE_COLOR,
        mapping: Mapping::Grayscale,
        echo_status: true,
    };

    /// Expected payload length in bytes (3 × N)
    pub const fn payload_len(&self) -> usize {
        frame::payload_len(self.num_pixels)
    }

    /// Check the configuration for values that can never produce a frame
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_pixels == 0 {
            return Err(ConfigError::ZeroPixels);
        }
        if self.uart.baudrate == 0 {
            return Err(ConfigError::InvalidBaudrate);
        }
        if self.uart.read_timeout_ms == 0 {
            return Err(ConfigError::ZeroTimeout);
        }

        // The payload read starts right after the marker, so only the
        // payload itself has to fit in the window.
        if self.uart.transfer_time_ms(self.payload_len()) > self.uart.read_timeout_ms {
            return Err(ConfigError::TimeoutTooShort);
        }

        Ok(())
    }
}

impl Default for StripConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}
