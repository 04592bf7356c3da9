//! trislot Common Library
//!
//! Collaborators shared by the trislot workspace crates. None of them touch
//! exchange internals; they configure, pace and observe the code that calls
//! into an exchange.
//!
//! # Module Structure
//!
//! - [`config`] - TOML configuration loading traits and types
//! - [`logging`] - Process-wide tracing subscriber setup
//! - [`pacing`] - Fixed-interval sleeper and call-rate counter
//! - [`prelude`] - Common re-exports for convenience
//!
//! # Usage
//!
//! ```rust
//! use trislot_common::prelude::*;
//!
//! let mut sleeper = IntervalSleeper::new(std::time::Duration::from_millis(1));
//! let mut rate = CallRateCounter::new();
//! for _ in 0..3 {
//!     sleeper.sleep();
//!     rate.call();
//! }
//! ```

pub mod config;
pub mod logging;
pub mod pacing;
pub mod prelude;
