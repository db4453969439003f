//! Configuration types
//!
//! Everything here is fixed at build time; the firmware fills a
//! [`StripConfig`] from constants generated out of `strip.toml`.

pub mod strip;

pub use strip::*;
