//! Link statistics
//!
//! Counters the driver keeps about the serial link. Purely informational:
//! nothing here feeds back into framing or dispatch.

/// Serial link counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LinkStats {
    /// Bytes pulled from the transport
    pub bytes_received: u32,
    /// Frames parsed and dispatched to the timeline
    pub frames_dispatched: u32,
    /// Complete frames that failed to parse
    pub frames_rejected: u32,
    /// Frames discarded because they outgrew the receive buffer
    pub overflows: u32,
    /// Transport read errors
    pub read_errors: u32,
    /// Timestamp of the last dispatched frame, once one has been seen
    pub last_frame_ms: Option<u32>,
    /// Whether a frame was dispatched within the configured link timeout
    pub link_active: bool,
}

impl LinkStats {
    /// Record that a frame was dispatched at `now_ms`
    pub fn mark_frame(&mut self, now_ms: u32) {
        self.last_frame_ms = Some(now_ms);
    }

    /// Recompute `link_active` against `timeout_ms`
    ///
    /// Uses wrapping arithmetic so the ~49 day rollover of a u32
    /// millisecond clock does not flip the flag.
    pub fn refresh(&mut self, now_ms: u32, timeout_ms: u32) {
        self.link_active = match self.last_frame_ms {
            Some(last) => now_ms.wrapping_sub(last) <= timeout_ms,
            None => false,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inactive_until_first_frame() {
        let mut stats = LinkStats::default();
        stats.refresh(1000, 2000);
        assert!(!stats.link_active);
    }

    #[test]
    fn test_active_within_timeout() {
        let mut stats = LinkStats::default();
        stats.mark_frame(1000);
        stats.refresh(2500, 2000);
        assert!(stats.link_active);
        stats.refresh(3001, 2000);
        assert!(!stats.link_active);
    }

    #[test]
    fn test_clock_rollover() {
        let mut stats = LinkStats::default();
        stats.mark_frame(u32::MAX - 100);
        stats.refresh(200, 2000);
        assert!(stats.link_active);
    }
}
