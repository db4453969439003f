//! Hardware abstraction traits
//!
//! Device-level interfaces the core drives. Bus-level traits (UART) live
//! in `door-hal`.

pub mod strip;

pub use strip::{StripDriver, StripError, StripExt};
