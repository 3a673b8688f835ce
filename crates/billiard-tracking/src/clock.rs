//! Frame time derivation from detector timestamps

use std::time::Duration;
use tracing::warn;

/// Turns absolute frame timestamps into frame-to-frame deltas
///
/// Timestamps are durations since any fixed epoch. The first frame after
/// construction or [`reset`](FrameClock::reset) has a delta of zero, and so
/// has a frame stamped earlier than its predecessor.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameClock {
    last: Option<Duration>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a frame at `timestamp` and return seconds since the previous one
    pub fn tick(&mut self, timestamp: Duration) -> f64 {
        let delta = match self.last {
            None => 0.0,
            Some(last) => match timestamp.checked_sub(last) {
                Some(elapsed) => elapsed.as_secs_f64(),
                None => {
                    warn!(?last, ?timestamp, "frame timestamp went backwards");
                    0.0
                }
            },
        };
        self.last = Some(timestamp);
        delta
    }

    pub fn last_timestamp(&self) -> Option<Duration> {
        self.last
    }

    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_first_tick_is_zero() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick(Duration::from_secs(42)), 0.0);
        assert_relative_eq!(clock.tick(Duration::from_millis(42_250)), 0.25);
    }

    #[test]
    fn test_backwards_timestamp_yields_zero_and_reanchors() {
        let mut clock = FrameClock::new();
        clock.tick(Duration::from_secs(10));
        assert_eq!(clock.tick(Duration::from_secs(9)), 0.0);
        assert_eq!(clock.last_timestamp(), Some(Duration::from_secs(9)));
        assert_relative_eq!(clock.tick(Duration::from_millis(9_100)), 0.1);
    }

    #[test]
    fn test_reset_restarts_at_zero() {
        let mut clock = FrameClock::new();
        clock.tick(Duration::from_secs(1));
        clock.reset();
        assert_eq!(clock.tick(Duration::from_secs(5)), 0.0);
    }
}
