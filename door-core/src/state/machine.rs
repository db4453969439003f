//! State machine definition

use super::events::Event;

/// Frame handling states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum State {
    /// Waiting for a marker byte
    #[default]
    Idle,
    /// Payload read in progress, bounded by the read timeout
    Receiving,
    /// Full payload received; render and show
    Commit,
    /// Payload short or faulted; leave the strip alone
    Discard,
}

impl State {
    /// Check if this state may touch the strip
    pub fn strip_allowed(&self) -> bool {
        matches!(self, State::Commit)
    }

    /// Process an event and return the next state
    pub fn transition(self, event: Event) -> Self {
        use Event::*;
        use State::*;

        match (self, event) {
            (Idle, MarkerSeen) => Receiving,

            (Receiving, PayloadComplete) => Commit,
            (Receiving, PayloadShort { .. }) => Discard,
            (Receiving, LineFault) => Discard,

            (Commit, Finished) => Idle,
            (Discard, Finished) => Idle,

            // Default: stay in current state
            _ => self,
        }
    }
}
