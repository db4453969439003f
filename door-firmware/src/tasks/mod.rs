//! Embassy async tasks

pub mod frames;

pub use frames::{frame_task, DoorLoop};
