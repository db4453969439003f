//! Events that trigger state transitions

/// Events that can trigger state transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Marker byte read from the link
    MarkerSeen,
    /// Payload read returned the full expected length
    PayloadComplete,
    /// Payload read timed out after `received` bytes
    PayloadShort { received: usize },
    /// UART reported a line fault during the payload read
    LineFault,
    /// Commit or discard handling is done
    Finished,
}

impl Event {
    /// Check if this event ends a payload read
    pub fn is_payload_result(&self) -> bool {
        matches!(
            self,
            Event::PayloadComplete | Event::PayloadShort { .. } | Event::LineFault
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payload_results() {
        assert!(Event::PayloadComplete.is_payload_result());
        assert!(Event::PayloadShort { received: 3 }.is_payload_result());
        assert!(Event::LineFault.is_payload_result());
        assert!(!Event::MarkerSeen.is_payload_result());
        assert!(!Event::Finished.is_payload_result());
    }
}
