//! Compile-time strip configuration
//!
//! Constants are generated from `strip.toml` by the build script, which
//! has already rejected out-of-range values.

use door_core::StripConfig;
use door_hal::UartConfig;

mod generated {
    include!(concat!(env!("OUT_DIR"), "/strip_config.rs"));
}

pub use generated::NUM_PIXELS;

/// Strip and link settings for this build
pub const STRIP: StripConfig = StripConfig {
    num_pixels: NUM_PIXELS,
    marker: generated::MARKER,
    uart: UartConfig {
        baudrate: generated::BAUDRATE,
        read_timeout_ms: generated::READ_TIMEOUT_MS,
    },
    idle_color: generated::IDLE_COLOR,
    mapping: generated::MAPPING,
    echo_status: generated::ECHO_STATUS,
};

/// UART receive ring buffer size: two whole frames of backlog
pub const RX_BUF_SIZE: usize = 2 * door_protocol::frame::frame_len(NUM_PIXELS);

/// UART transmit ring buffer size for status lines
pub const TX_BUF_SIZE: usize = 256;
