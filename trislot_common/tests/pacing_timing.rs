//! Wall-clock checks for the pacing helpers.

use std::time::{Duration, Instant};
use trislot_common::pacing::{CallRateCounter, IntervalSleeper};

/// Ticks are never closer together than the interval.
#[test]
fn sleeper_enforces_minimum_spacing() {
    const TICKS: u32 = 20;
    let interval = Duration::from_millis(5);
    let mut sleeper = IntervalSleeper::new(interval);

    sleeper.sleep();
    let start = Instant::now();
    for _ in 0..TICKS {
        sleeper.sleep();
    }
    let elapsed = start.elapsed();

    // The first tick after `start` may be slightly short because the
    // interval was already running.
    assert!(
        elapsed >= interval * (TICKS - 1),
        "{TICKS} ticks took only {elapsed:?}"
    );
}

/// A loop paced at 200 Hz reports a rate in the right neighbourhood.
#[test]
fn paced_loop_reports_rate() {
    let mut sleeper = IntervalSleeper::new(Duration::from_millis(5));
    let mut counter = CallRateCounter::new();
    let start = Instant::now();
    let mut rate = 0.0;

    while start.elapsed() < Duration::from_millis(1500) {
        sleeper.sleep();
        rate = counter.call();
    }

    // Scheduler jitter only ever slows the loop down.
    assert!(rate > 50.0 && rate <= 210.0, "rate {rate}");
}
