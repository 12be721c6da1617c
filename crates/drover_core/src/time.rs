//! Countdown ticker used for frame timers, splash delays, and transitions.
//!
//! All waiting in the engine is expressed as per-frame polling of a `Ticker`
//! rather than as callbacks or async continuations, which keeps a whole
//! session a deterministic function of the dt sequence fed to it.
//!
//! Boundary contract: `elapsed()` is true only once the countdown is
//! **strictly negative**. A 3.0s ticker updated three times with dt=1.0 reads
//! exactly 0.0 and is not yet elapsed; the fourth update tips it over.

/// Lower bound for the default duration. Avoids division-by-zero in
/// `progress()` and degenerate always-elapsed timers.
const MIN_DURATION: f32 = 0.0001;

#[derive(Debug, Clone)]
pub struct Ticker {
    default_seconds: f32,
    remaining: f32,
    active: bool,
}

impl Ticker {
    /// Create an active ticker with the given default duration in seconds.
    /// Durations below `MIN_DURATION` are clamped up.
    pub fn new(default_seconds: f32) -> Self {
        let default_seconds = default_seconds.max(MIN_DURATION);
        Self {
            default_seconds,
            remaining: default_seconds,
            active: true,
        }
    }

    /// Count down by `dt` seconds while active.
    pub fn update(&mut self, dt: f32) {
        if self.active {
            self.remaining -= dt;
        }
    }

    /// True once the countdown has gone strictly below zero.
    pub fn elapsed(&self) -> bool {
        self.remaining < 0.0
    }

    /// Restore the countdown to the default duration.
    pub fn reset(&mut self) {
        self.remaining = self.default_seconds;
    }

    /// Restore the countdown to an explicit duration, leaving the default as is.
    pub fn reset_to(&mut self, seconds: f32) {
        self.remaining = seconds;
    }

    /// Change the default duration. The running countdown is re-clamped if it
    /// now exceeds the new default.
    pub fn set_default_seconds(&mut self, seconds: f32) {
        self.default_seconds = seconds.max(MIN_DURATION);
        if self.remaining > self.default_seconds {
            self.remaining = self.default_seconds;
        }
    }

    pub fn default_seconds(&self) -> f32 {
        self.default_seconds
    }

    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    /// Remaining fraction of the default duration, clamped to [0, 1].
    /// Counts down from 1.0 toward 0.0.
    pub fn progress(&self) -> f32 {
        (self.remaining / self.default_seconds).clamp(0.0, 1.0)
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_requires_strictly_negative_countdown() {
        let mut ticker = Ticker::new(3.0);
        ticker.update(1.0);
        ticker.update(1.0);
        assert!(!ticker.elapsed());

        // Third update lands exactly on 0.0, which is not yet elapsed.
        ticker.update(1.0);
        assert!(!ticker.elapsed());

        ticker.update(1.0);
        assert!(ticker.elapsed());
    }

    #[test]
    fn inactive_ticker_does_not_count_down() {
        let mut ticker = Ticker::new(1.0);
        ticker.set_active(false);
        ticker.update(10.0);
        assert!(!ticker.elapsed());
        assert_eq!(ticker.remaining(), 1.0);
    }

    #[test]
    fn reset_restores_default_duration() {
        let mut ticker = Ticker::new(2.0);
        ticker.update(5.0);
        assert!(ticker.elapsed());
        ticker.reset();
        assert!(!ticker.elapsed());
        assert_eq!(ticker.remaining(), 2.0);
    }

    #[test]
    fn reset_to_overrides_without_touching_default() {
        let mut ticker = Ticker::new(2.0);
        ticker.reset_to(5.0);
        assert_eq!(ticker.remaining(), 5.0);
        assert_eq!(ticker.default_seconds(), 2.0);
    }

    #[test]
    fn shrinking_default_reclamps_running_countdown() {
        let mut ticker = Ticker::new(10.0);
        ticker.set_default_seconds(1.0);
        assert_eq!(ticker.remaining(), 1.0);
        assert_eq!(ticker.default_seconds(), 1.0);
    }

    #[test]
    fn tiny_default_is_clamped_to_minimum() {
        let ticker = Ticker::new(0.0);
        assert!(ticker.default_seconds() > 0.0);
        assert!(!ticker.elapsed());
    }

    #[test]
    fn progress_counts_down_and_clamps() {
        let mut ticker = Ticker::new(2.0);
        assert_eq!(ticker.progress(), 1.0);
        ticker.update(1.0);
        assert!((ticker.progress() - 0.5).abs() < f32::EPSILON);
        ticker.update(5.0);
        assert_eq!(ticker.progress(), 0.0);
    }
}
