//! Door Display Serial Protocol
//!
//! This crate defines the byte stream a host sends to the LED controller.
//! There is exactly one message: a frame of raw pixel bytes.
//!
//! # Protocol Overview
//!
//! ```text
//! ┌────────┬──────────────────────────────┐
//! │ MARKER │ PAYLOAD                      │
//! │ 1B '*' │ 3 × N bytes, N = pixel count │
//! └────────┴──────────────────────────────┘
//! ```
//!
//! There is no length prefix, checksum or escaping. A marker value inside
//! the payload is indistinguishable from a frame start, so a receiver that
//! loses sync mid-payload recovers only at the next real marker it happens
//! to land on.
//!
//! The host side also needs to know how a 2D image maps onto the single
//! daisy-chained strip; [`layout::MatrixLayout`] captures that wiring.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod frame;
pub mod layout;
pub mod order;

pub use frame::{encode_frame, payload_len, FrameError, BYTES_PER_PIXEL, FRAME_MARKER};
pub use layout::MatrixLayout;
pub use order::ChannelOrder;
