//! Session clock - elapsed play time gated by session activity
//!
//! The clock starts on the first accepted pick of a session, stops on a win,
//! and only moves while running. It accumulates milliseconds so hosts can
//! feed it either fixed-timestep deltas or whole one-second ticks.

use crate::types::CLOCK_TICK_MS;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SessionClock {
    elapsed_ms: u64,
    started: bool,
    running: bool,
}

impl SessionClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start counting. A clock only starts once per session.
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.running = true;
    }

    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Add elapsed time if the clock is running
    pub fn advance(&mut self, elapsed_ms: u32) {
        if self.running {
            self.elapsed_ms = self.elapsed_ms.saturating_add(elapsed_ms as u64);
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn has_started(&self) -> bool {
        self.started
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    /// Whole clock units (seconds) elapsed
    pub fn elapsed_secs(&self) -> u64 {
        self.elapsed_ms / CLOCK_TICK_MS as u64
    }
}

/// Format seconds as `mm:ss`. Minutes are not wrapped into hours.
///
/// # Examples
///
/// ```
/// use memory_match_core::format_elapsed;
///
/// assert_eq!(format_elapsed(0), "00:00");
/// assert_eq!(format_elapsed(75), "01:15");
/// assert_eq!(format_elapsed(3600), "60:00");
/// ```
pub fn format_elapsed(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_idle_until_started() {
        let mut clock = SessionClock::new();
        clock.advance(5_000);
        assert_eq!(clock.elapsed_secs(), 0);
        assert!(!clock.has_started());
    }

    #[test]
    fn test_clock_counts_whole_units() {
        let mut clock = SessionClock::new();
        clock.start();
        clock.advance(999);
        assert_eq!(clock.elapsed_secs(), 0);
        clock.advance(1);
        assert_eq!(clock.elapsed_secs(), 1);
        clock.advance(2_500);
        assert_eq!(clock.elapsed_secs(), 3);
    }

    #[test]
    fn test_clock_stop_freezes_time() {
        let mut clock = SessionClock::new();
        clock.start();
        clock.advance(2_000);
        clock.stop();
        clock.advance(10_000);
        assert_eq!(clock.elapsed_secs(), 2);

        // A stopped clock does not restart within the same session.
        clock.start();
        assert!(!clock.is_running());
    }

    #[test]
    fn test_clock_reset() {
        let mut clock = SessionClock::new();
        clock.start();
        clock.advance(4_000);
        clock.reset();
        assert_eq!(clock, SessionClock::default());
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(9), "00:09");
        assert_eq!(format_elapsed(61), "01:01");
        assert_eq!(format_elapsed(599), "09:59");
    }
}
