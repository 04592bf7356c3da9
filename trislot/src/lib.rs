//! # trislot
//!
//! A non-blocking latest-value exchange between exactly one writer and exactly
//! one reader. The writer publishes without ever waiting for the reader, the
//! reader fetches the freshest value without ever waiting for the writer, and
//! intermediate values the reader had no time to pick up are dropped.
//!
//! ## Features
//!
//! - **Lock-Free Operation**: no mutex, condition variable or syscall on either
//!   side; every call is a handful of atomic operations
//! - **Bounded Latency**: both operations are bounded by the slot count (3)
//! - **No Allocation in Hot Path**: one `Arc` at construction, nothing after
//! - **Type-Enforced SPSC**: the exchange is only reachable through one
//!   [`Publisher`] and one [`Consumer`]
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────┐       ┌──────────────────────────────┐       ┌─────────────┐
//! │  Publisher  │       │          Exchange            │       │  Consumer   │
//! │             │       │ ┌────────┬────────┬────────┐ │       │             │
//! │ publish(v) ─┼──────►│ │ slot 0 │ slot 1 │ slot 2 │ ├──────►│ try_consume │
//! │             │       │ │ status │ status │ status │ │       │             │
//! └─────────────┘       │ └────────┴────────┴────────┘ │       └─────────────┘
//!                       │ last_written (round-robin)   │
//!                       └──────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! let (mut tx, mut rx) = trislot::channel::<u32>();
//!
//! assert_eq!(rx.try_consume(), None);
//!
//! tx.publish(1);
//! tx.publish(2);
//! tx.publish(3);
//!
//! // Older values were dropped; only the freshest is delivered, once.
//! assert_eq!(rx.try_consume(), Some(3));
//! assert_eq!(rx.try_consume(), None);
//! ```
//!
//! ### Polling Across Threads
//!
//! ```rust
//! use std::thread;
//!
//! let (mut tx, mut rx) = trislot::channel::<u64>();
//!
//! let writer = thread::spawn(move || {
//!     for i in 0..1000 {
//!         tx.publish(i);
//!     }
//! });
//!
//! let mut last = None;
//! while !writer.is_finished() || rx.has_pending() {
//!     if let Some(v) = rx.try_consume() {
//!         assert!(last.is_none_or(|l| v > l));
//!         last = Some(v);
//!     }
//! }
//! writer.join().unwrap();
//! ```
//!
//! Retry pacing is the caller's business; `trislot_common::pacing` provides an
//! interval sleeper suited to poll loops.
//!
//! ## Thread Safety
//!
//! - **Publisher**: `Send`, single owner - one writer per exchange
//! - **Consumer**: `Send`, single owner - one reader per exchange
//! - **Exchange**: `Sync`; its mutating operations are only reachable through
//!   the handles

#![deny(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod exchange;
pub mod handle;
pub mod status;

pub use error::{StatusError, StatusResult};
pub use exchange::{Exchange, SLOT_COUNT};
pub use handle::{Consumer, Publisher, channel};
pub use status::SlotStatus;
