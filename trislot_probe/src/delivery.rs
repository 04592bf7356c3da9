//! Delivery experiment: one paced writer, one polling reader.
//!
//! ```text
//!  writer thread                      reader thread
//!  ─────────────                      ─────────────
//!  settle                             loop until writer done:
//!  for id in 0..packages:               try_consume()
//!      sleeper.sleep()                    Some → stamp reader time
//!      stamp writer time                  None → sleeper.sleep()
//!      publish(Package::new(id))      drain once more
//!  settle, signal done
//! ```
//!
//! The run measures how many packages the reader missed and how long the
//! delivered ones sat in the exchange.

use crate::config::DeliveryConfig;
use crate::error::{ProbeError, ProbeResult};
use crate::package::Package;
use crate::report::{DeliveryReport, ReportCounters};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};
use trislot::{Consumer, Publisher};
use trislot_common::pacing::{CallRateCounter, IntervalSleeper};

/// How often the threads log their current call rate.
const RATE_LOG_INTERVAL: Duration = Duration::from_secs(1);

struct WriterOutcome {
    times: Vec<Duration>,
    superseded: u64,
    rate_hz: f32,
}

struct ReaderOutcome {
    times: Vec<Option<Duration>>,
    reordered: u64,
    torn: u64,
    rate_hz: f32,
}

/// Run one delivery experiment and collect its report.
pub fn run_delivery(config: &DeliveryConfig) -> ProbeResult<DeliveryReport> {
    config.validate()?;

    let (publisher, consumer) = trislot::channel::<Package>();
    let writer_done = Arc::new(AtomicBool::new(false));
    let begin = Instant::now();

    info!(
        packages = config.packages,
        writer_interval_ms = config.writer_interval_ms,
        reader_interval_ms = config.reader_interval_ms,
        "starting delivery run"
    );

    let reader = spawn_worker("reader", {
        let config = config.clone();
        let writer_done = Arc::clone(&writer_done);
        move || read_packages(consumer, &config, &writer_done, begin)
    })?;

    let writer = spawn_worker("writer", {
        let config = config.clone();
        let writer_done = Arc::clone(&writer_done);
        move || write_packages(publisher, &config, &writer_done, begin)
    });
    let writer = match writer {
        Ok(handle) => handle,
        Err(e) => {
            // Let the reader exit before reporting the failure.
            writer_done.store(true, Ordering::Release);
            let _ = reader.join();
            return Err(e);
        }
    };

    let writer = join_worker("writer", writer)?;
    let reader = join_worker("reader", reader)?;

    let report = DeliveryReport::from_timings(
        &writer.times,
        &reader.times,
        ReportCounters {
            superseded: writer.superseded,
            reordered: reader.reordered,
            torn: reader.torn,
            writer_rate_hz: writer.rate_hz,
            reader_rate_hz: reader.rate_hz,
        },
    );

    if report.reordered > 0 || report.torn > 0 {
        warn!(
            reordered = report.reordered,
            torn = report.torn,
            "exchange delivered inconsistent packages"
        );
    }
    info!(
        total = report.total,
        loss = report.loss,
        avg_delay_us = report.avg_delay_us,
        "delivery run complete"
    );
    Ok(report)
}

fn spawn_worker<T, F>(role: &'static str, body: F) -> ProbeResult<JoinHandle<T>>
where
    T: Send + 'static,
    F: FnOnce() -> T + Send + 'static,
{
    thread::Builder::new()
        .name(format!("probe-{role}"))
        .spawn(body)
        .map_err(|source| ProbeError::Spawn { role, source })
}

fn join_worker<T>(role: &'static str, handle: JoinHandle<T>) -> ProbeResult<T> {
    handle
        .join()
        .map_err(|_| ProbeError::WorkerPanicked { role })
}

fn write_packages(
    mut publisher: Publisher<Package>,
    config: &DeliveryConfig,
    done: &AtomicBool,
    begin: Instant,
) -> WriterOutcome {
    let mut sleeper = IntervalSleeper::new(config.writer_interval());
    let mut rate = CallRateCounter::new();
    let mut rate_hz = 0.0;
    let mut last_log = Instant::now();
    let mut times = Vec::with_capacity(config.packages as usize);

    thread::sleep(config.settle());

    for id in 0..config.packages {
        sleeper.sleep();
        let now = Instant::now();
        publisher.publish(Package::new(id));
        times.push(now.duration_since(begin));

        rate_hz = rate.call_at(now);
        if now.duration_since(last_log) >= RATE_LOG_INTERVAL {
            debug!(rate_hz, published = id + 1, "writer rate");
            last_log = now;
        }
    }

    thread::sleep(config.settle());
    done.store(true, Ordering::Release);

    WriterOutcome {
        times,
        superseded: publisher.superseded(),
        rate_hz,
    }
}

fn read_packages(
    mut consumer: Consumer<Package>,
    config: &DeliveryConfig,
    done: &AtomicBool,
    begin: Instant,
) -> ReaderOutcome {
    let mut sleeper = IntervalSleeper::new(config.reader_interval());
    let mut rate = CallRateCounter::new();
    let mut last_log = Instant::now();
    let mut outcome = ReaderOutcome {
        times: vec![None; config.packages as usize],
        reordered: 0,
        torn: 0,
        rate_hz: 0.0,
    };
    let mut last_id: Option<u32> = None;

    let mut take = |consumer: &mut Consumer<Package>, outcome: &mut ReaderOutcome| -> bool {
        let Some(package) = consumer.try_consume() else {
            return false;
        };
        let now = Instant::now();
        if !package.is_intact() {
            outcome.torn += 1;
        }
        if last_id.is_some_and(|last| package.id <= last) {
            outcome.reordered += 1;
        }
        last_id = Some(package.id);
        if let Some(slot) = outcome.times.get_mut(package.id as usize) {
            *slot = Some(now.duration_since(begin));
        }

        outcome.rate_hz = rate.call_at(now);
        if now.duration_since(last_log) >= RATE_LOG_INTERVAL {
            debug!(rate_hz = outcome.rate_hz, last_id = package.id, "reader rate");
            last_log = now;
        }
        true
    };

    while !done.load(Ordering::Acquire) {
        if !take(&mut consumer, &mut outcome) {
            sleeper.sleep();
        }
    }
    // The writer may have published its last package after our final poll.
    take(&mut consumer, &mut outcome);

    outcome
}
