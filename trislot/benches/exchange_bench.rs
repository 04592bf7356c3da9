//! Exchange latency benchmarks.
//!
//! Measures uncontended publish / consume cost for small and large payloads,
//! plus a cross-thread run with a writer hammering the exchange.

use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use trislot::channel;

/// Payload the size of a small telemetry frame.
#[derive(Clone, Copy, Default)]
#[repr(C)]
struct Frame {
    id: u64,
    data: [f64; 31],
}

fn bench_publish_u64(c: &mut Criterion) {
    let (mut tx, _rx) = channel::<u64>();
    let mut i = 0u64;

    c.bench_function("publish_u64", |b| {
        b.iter(|| {
            i = i.wrapping_add(1);
            tx.publish(black_box(i));
        });
    });
}

fn bench_publish_frame(c: &mut Criterion) {
    let (mut tx, _rx) = channel::<Frame>();
    let frame = Frame::default();

    c.bench_function("publish_frame_256B", |b| {
        b.iter(|| {
            tx.publish(black_box(frame));
        });
    });
}

fn bench_consume_empty(c: &mut Criterion) {
    let (_tx, mut rx) = channel::<Frame>();

    c.bench_function("try_consume_empty", |b| {
        b.iter(|| {
            black_box(rx.try_consume());
        });
    });
}

fn bench_roundtrip_frame(c: &mut Criterion) {
    let (mut tx, mut rx) = channel::<Frame>();
    let frame = Frame::default();

    c.bench_function("roundtrip_frame_256B", |b| {
        b.iter(|| {
            tx.publish(black_box(frame));
            black_box(rx.try_consume());
        });
    });
}

fn bench_consume_contended(c: &mut Criterion) {
    let (mut tx, mut rx) = channel::<Frame>();
    let stop = Arc::new(AtomicBool::new(false));

    let writer_stop = Arc::clone(&stop);
    let writer = thread::spawn(move || {
        let mut frame = Frame::default();
        while !writer_stop.load(Ordering::Relaxed) {
            frame.id = frame.id.wrapping_add(1);
            tx.publish(frame);
        }
    });

    c.bench_function("try_consume_contended_256B", |b| {
        b.iter(|| {
            black_box(rx.try_consume());
        });
    });

    stop.store(true, Ordering::Relaxed);
    writer.join().unwrap();
}

criterion_group!(
    benches,
    bench_publish_u64,
    bench_publish_frame,
    bench_consume_empty,
    bench_roundtrip_frame,
    bench_consume_contended,
);
criterion_main!(benches);
