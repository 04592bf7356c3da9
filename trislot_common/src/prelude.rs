//! Prelude module for common re-exports.
//!
//! ```rust
//! use trislot_common::prelude::*;
//! ```

// ─── Logging ────────────────────────────────────────────────────────
pub use crate::config::LogLevel;
pub use crate::logging::init_tracing;

// ─── Configuration ──────────────────────────────────────────────────
pub use crate::config::{ConfigError, ConfigLoader, SharedConfig};

// ─── Pacing ─────────────────────────────────────────────────────────
pub use crate::pacing::{CallRateCounter, IntervalSleeper};
