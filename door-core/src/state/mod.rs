//! Frame state machine
//!
//! One frame moves through IDLE, RECEIVING, then COMMIT or DISCARD, and
//! back to IDLE. Transitions are synchronous; the frame loop feeds events
//! as the receiver reports them.

pub mod events;
pub mod machine;

pub use events::Event;
pub use machine::State;
