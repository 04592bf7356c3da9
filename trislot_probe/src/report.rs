//! Delivery report: per-package timing, loss and delay summary.

use serde::Serialize;
use std::io::Write;
use std::time::Duration;

/// Timing of one published package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PackageRecord {
    /// Package sequence number.
    pub id: u32,
    /// Publish time since run start [µs].
    pub writer_us: u64,
    /// Consume time since run start [µs]; `None` if the package was dropped.
    pub reader_us: Option<u64>,
}

impl PackageRecord {
    /// Consume minus publish time [µs], if delivered.
    pub fn delay_us(&self) -> Option<u64> {
        self.reader_us.map(|r| r.saturating_sub(self.writer_us))
    }
}

/// Summary of a delivery run.
#[derive(Debug, Clone, Serialize)]
pub struct DeliveryReport {
    /// Packages published.
    pub total: u64,
    /// Packages never consumed.
    pub loss: u64,
    /// Packages the writer dropped because the reader had not taken them yet.
    pub superseded: u64,
    /// Packages consumed out of publish order (always 0 for a correct exchange).
    pub reordered: u64,
    /// Packages whose ballast did not match their id (always 0 for a correct exchange).
    pub torn: u64,
    /// Mean publish-to-consume delay over delivered packages [µs].
    pub avg_delay_us: f64,
    /// Worst publish-to-consume delay [µs].
    pub max_delay_us: u64,
    /// Writer call rate at the end of the run [Hz].
    pub writer_rate_hz: f32,
    /// Reader successful-consume rate at the end of the run [Hz].
    pub reader_rate_hz: f32,
    /// Per-package records, in id order.
    #[serde(skip)]
    pub records: Vec<PackageRecord>,
}

impl DeliveryReport {
    /// Build the report from raw timestamps.
    ///
    /// `writer_times[i]` is when package `i` was published, `reader_times[i]`
    /// when it was consumed, if ever.
    pub fn from_timings(
        writer_times: &[Duration],
        reader_times: &[Option<Duration>],
        counters: ReportCounters,
    ) -> Self {
        let records: Vec<PackageRecord> = writer_times
            .iter()
            .enumerate()
            .map(|(id, w)| PackageRecord {
                id: id as u32,
                writer_us: w.as_micros() as u64,
                reader_us: reader_times
                    .get(id)
                    .copied()
                    .flatten()
                    .map(|r| r.as_micros() as u64),
            })
            .collect();

        let delays: Vec<u64> = records.iter().filter_map(PackageRecord::delay_us).collect();
        let delivered = delays.len() as u64;
        let avg_delay_us = if delivered == 0 {
            0.0
        } else {
            delays.iter().sum::<u64>() as f64 / delivered as f64
        };

        Self {
            total: records.len() as u64,
            loss: records.len() as u64 - delivered,
            superseded: counters.superseded,
            reordered: counters.reordered,
            torn: counters.torn,
            avg_delay_us,
            max_delay_us: delays.iter().copied().max().unwrap_or(0),
            writer_rate_hz: counters.writer_rate_hz,
            reader_rate_hz: counters.reader_rate_hz,
            records,
        }
    }

    /// Packages delivered to the reader.
    pub fn delivered(&self) -> u64 {
        self.total - self.loss
    }

    /// One-line summary: `[Summary] total(N) loss(L) avg_delay(Xus)`.
    pub fn summary_line(&self) -> String {
        format!(
            "[Summary] total({}) loss({}) avg_delay({:.3}us)",
            self.total, self.loss, self.avg_delay_us
        )
    }

    /// Write one CSV row per package: `id,writer_us,reader_us,delay_us`.
    /// Dropped packages leave the reader columns empty.
    pub fn write_csv<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        for record in &self.records {
            match (record.reader_us, record.delay_us()) {
                (Some(reader), Some(delay)) => {
                    writeln!(out, "{},{},{},{}", record.id, record.writer_us, reader, delay)?
                }
                _ => writeln!(out, "{},{},", record.id, record.writer_us)?,
            }
        }
        Ok(())
    }
}

/// Counters gathered by the worker threads alongside the timestamps.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportCounters {
    /// See [`DeliveryReport::superseded`].
    pub superseded: u64,
    /// See [`DeliveryReport::reordered`].
    pub reordered: u64,
    /// See [`DeliveryReport::torn`].
    pub torn: u64,
    /// See [`DeliveryReport::writer_rate_hz`].
    pub writer_rate_hz: f32,
    /// See [`DeliveryReport::reader_rate_hz`].
    pub reader_rate_hz: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    fn sample() -> DeliveryReport {
        DeliveryReport::from_timings(
            &[ms(0), ms(4), ms(8)],
            &[Some(ms(1)), None, Some(ms(11))],
            ReportCounters {
                superseded: 1,
                ..ReportCounters::default()
            },
        )
    }

    #[test]
    fn summary_counts_loss_and_delay() {
        let report = sample();
        assert_eq!(report.total, 3);
        assert_eq!(report.loss, 1);
        assert_eq!(report.delivered(), 2);
        assert_eq!(report.max_delay_us, 3000);
        assert!((report.avg_delay_us - 2000.0).abs() < f64::EPSILON);
        assert_eq!(
            report.summary_line(),
            "[Summary] total(3) loss(1) avg_delay(2000.000us)"
        );
    }

    #[test]
    fn csv_leaves_dropped_reader_columns_empty() {
        let mut out = Vec::new();
        sample().write_csv(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "0,0,1000,1000\n1,4000,\n2,8000,11000,3000\n");
    }

    #[test]
    fn nothing_delivered_has_zero_delay() {
        let report =
            DeliveryReport::from_timings(&[ms(0)], &[None], ReportCounters::default());
        assert_eq!(report.loss, 1);
        assert_eq!(report.avg_delay_us, 0.0);
    }

    #[test]
    fn json_omits_records() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["total"], 3);
        assert_eq!(json["superseded"], 1);
        assert!(json.get("records").is_none());
    }
}
