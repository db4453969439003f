//! Door Display Hardware Abstraction Layer
//!
//! This crate defines the bus-level traits the frame receiver is written
//! against. Chip-specific crates (`door-hal-rp2040`) implement them, and
//! the core crate's tests implement them with scripted byte queues.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  door-firmware / door-core              │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  door-hal (this crate - traits)         │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//!             ┌───────────────┐
//!             │ door-hal-     │
//!             │    rp2040     │
//!             └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`uart::UartRx`] - non-blocking byte poll and bounded-timeout reads
//! - [`uart::UartTx`] - blocking writes for status output

#![no_std]
#![deny(unsafe_code)]

pub mod uart;

pub use uart::{UartConfig, UartRx, UartTx};
