//! Loop pacing and call-rate measurement.
//!
//! Both helpers are single-threaded bookkeeping meant to drive poll loops
//! around a `trislot` exchange from the outside; neither touches exchange
//! state.
//!
//! - [`IntervalSleeper`] keeps consecutive ticks a fixed interval apart.
//! - [`CallRateCounter`] reports how many times per second it is called.

use std::time::{Duration, Instant};

/// Fixed-interval sleeper for smoothing loop rates.
///
/// Each tick sleeps for whatever is left of `interval` since the previous
/// tick. A tick that arrives late returns immediately and restarts timing
/// from the current instant instead of trying to catch up.
///
/// Not meant to be shared between threads.
#[derive(Debug, Clone)]
pub struct IntervalSleeper {
    interval: Duration,
    last_tick: Option<Instant>,
}

impl IntervalSleeper {
    /// Interval used by [`IntervalSleeper::default`].
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(100);

    /// Create a sleeper ticking every `interval`.
    pub const fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_tick: None,
        }
    }

    /// Configured interval.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Change the interval; takes effect from the next tick.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Sleep until the next tick, measured from [`Instant::now`].
    pub fn sleep(&mut self) {
        self.sleep_from(Instant::now());
    }

    /// Sleep until the next tick, taking `now` as the current instant.
    ///
    /// Returns how long the thread slept.
    pub fn sleep_from(&mut self, now: Instant) -> Duration {
        let delay = self.advance(now);
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
        delay
    }

    /// Advance the tick bookkeeping and return the delay owed at `now`.
    pub fn advance(&mut self, now: Instant) -> Duration {
        let Some(last) = self.last_tick else {
            self.last_tick = Some(now);
            return Duration::ZERO;
        };

        let elapsed = now.saturating_duration_since(last);
        if elapsed >= self.interval {
            self.last_tick = Some(now);
            return Duration::ZERO;
        }

        self.last_tick = Some(last + self.interval);
        self.interval - elapsed
    }
}

impl Default for IntervalSleeper {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}

/// Call-rate counter in calls per second.
///
/// Counting starts at the first call. Over the first second the raw count is
/// reported. Between one and three seconds the rate is `count / elapsed`, and
/// a midpoint is remembered. At three seconds the window is rebased onto that
/// midpoint so the count never grows without bound:
///
/// ```text
///   1s   1s   1s
///  [  ]|[  ]|[  ]
///  ^^^^^^^^^  rate window
///       ^ midpoint recorded here, window restarts from it at 3s
/// ```
///
/// Rates at or below 1 Hz are unreliable.
#[derive(Debug, Clone, Default)]
pub struct CallRateCounter {
    begin: Option<Instant>,
    midpoint: Option<(Instant, u64)>,
    count: u64,
}

impl CallRateCounter {
    const UPDATE_WINDOW: Duration = Duration::from_secs(1);
    const TRIPLE_WINDOW: Duration = Duration::from_secs(3);

    /// Create an idle counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one call at [`Instant::now`] and return the current rate.
    pub fn call(&mut self) -> f32 {
        self.call_at(Instant::now())
    }

    /// Record one call at `now` and return the current rate.
    pub fn call_at(&mut self, now: Instant) -> f32 {
        let begin = *self.begin.get_or_insert(now);
        self.count += 1;

        let elapsed = now.saturating_duration_since(begin);
        if elapsed < Self::UPDATE_WINDOW {
            return self.count as f32;
        }

        if elapsed < Self::TRIPLE_WINDOW {
            self.midpoint.get_or_insert((now, self.count));
            return Self::frequency(self.count, elapsed);
        }

        match self.midpoint.take() {
            Some((at, count_at)) => {
                self.begin = Some(at);
                self.count -= count_at;
                Self::frequency(self.count, now.saturating_duration_since(at))
            }
            // Calls were too sparse to record a midpoint; start over.
            None => {
                self.reset_at(now);
                0.0
            }
        }
    }

    /// Forget all recorded calls.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn reset_at(&mut self, now: Instant) {
        self.begin = Some(now);
        self.midpoint = None;
        self.count = 0;
    }

    fn frequency(count: u64, elapsed: Duration) -> f32 {
        let secs = elapsed.as_secs_f32();
        if secs <= 0.0 { 0.0 } else { count as f32 / secs }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MS: Duration = Duration::from_millis(1);

    #[test]
    fn first_tick_is_free() {
        let mut sleeper = IntervalSleeper::new(10 * MS);
        assert_eq!(sleeper.advance(Instant::now()), Duration::ZERO);
    }

    #[test]
    fn early_tick_owes_remainder() {
        let mut sleeper = IntervalSleeper::new(10 * MS);
        let t0 = Instant::now();
        sleeper.advance(t0);
        assert_eq!(sleeper.advance(t0 + 3 * MS), 7 * MS);
        // The tick advanced by exactly one interval, not to "now + delay".
        assert_eq!(sleeper.advance(t0 + 10 * MS), 10 * MS);
    }

    #[test]
    fn late_tick_restarts_timing() {
        let mut sleeper = IntervalSleeper::new(10 * MS);
        let t0 = Instant::now();
        sleeper.advance(t0);
        assert_eq!(sleeper.advance(t0 + 25 * MS), Duration::ZERO);
        assert_eq!(sleeper.advance(t0 + 30 * MS), 5 * MS);
    }

    #[test]
    fn zero_interval_never_sleeps() {
        let mut sleeper = IntervalSleeper::new(Duration::ZERO);
        let t0 = Instant::now();
        for i in 0..5 {
            assert_eq!(sleeper.advance(t0 + i * MS), Duration::ZERO);
        }
    }

    #[test]
    fn default_interval() {
        assert_eq!(IntervalSleeper::default().interval(), 100 * MS);
    }

    #[test]
    fn rate_counts_raw_in_first_window() {
        let mut counter = CallRateCounter::new();
        let t0 = Instant::now();
        assert_eq!(counter.call_at(t0), 1.0);
        assert_eq!(counter.call_at(t0 + 100 * MS), 2.0);
        assert_eq!(counter.call_at(t0 + 900 * MS), 3.0);
    }

    #[test]
    fn steady_rate_is_reported() {
        let mut counter = CallRateCounter::new();
        let t0 = Instant::now();
        let mut rate = 0.0;
        // 100 Hz for 10 seconds crosses several rebases.
        for i in 0..1000u32 {
            rate = counter.call_at(t0 + i * 10 * MS);
            if i >= 150 {
                assert!((95.0..=106.0).contains(&rate), "call {i}: {rate}");
            }
        }
        assert!((99.0..=101.0).contains(&rate), "final rate {rate}");
    }

    #[test]
    fn sparse_calls_reset_counter() {
        let mut counter = CallRateCounter::new();
        let t0 = Instant::now();
        counter.call_at(t0);
        assert_eq!(counter.call_at(t0 + 5000 * MS), 0.0);
        assert_eq!(counter.call_at(t0 + 5100 * MS), 1.0);
    }
}
