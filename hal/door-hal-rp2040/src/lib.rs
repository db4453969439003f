//! RP2040-specific HAL for the door display firmware
//!
//! This crate provides RP2040 implementations of the shared traits:
//!
//! - Buffered UART receive with deadline-based payload timeouts
//!   (implements `door_hal::UartRx` / `door_hal::UartTx`)
//! - PIO-driven WS2812 strip with drawing/display double buffering
//!   (implements `door_core::StripDriver`)

#![no_std]

pub mod uart;
pub mod ws2812;

pub use uart::{SerialRx, SerialTx, UartBusError};
pub use ws2812::PioStrip;
