//! Board-agnostic core logic for the door display firmware
//!
//! This crate contains everything between the UART and the LED driver
//! that does not depend on a specific chip:
//!
//! - Strip configuration and validation
//! - The drawing buffer the receiver fills
//! - A double-buffered strip model (drawing vs. display)
//! - Channel mapping from payload bytes to pixel colors
//! - Frame receiver, pixel renderer and the loop that sequences them
//! - Status lines for the optional serial diagnostics
//!
//! Control flows one way: receiver, renderer, strip driver. A frame is
//! latched to the LEDs only when its whole payload arrived; anything short
//! is dropped and the strip keeps showing the previous frame.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod buffer;
pub mod config;
pub mod frame_loop;
pub mod mapping;
pub mod receiver;
pub mod renderer;
pub mod state;
pub mod status;
pub mod strip;
pub mod traits;

#[cfg(test)]
pub(crate) mod testing;

pub use buffer::DrawingBuffer;
pub use config::{ConfigError, StripConfig};
pub use frame_loop::{FrameLoop, FrameOutcome};
pub use mapping::{ChannelMapping, Mapping};
pub use receiver::{FrameReceiver, Poll};
pub use renderer::PixelRenderer;
pub use strip::DoubleBuffer;
pub use traits::{StripDriver, StripError};
