//! Probe configuration (`probe.toml`).
//!
//! ```toml
//! [shared]
//! log_level = "info"
//! service_name = "trislot-probe"
//!
//! [delivery]
//! packages = 1000
//! writer_interval_ms = 4
//! reader_interval_ms = 2
//! settle_ms = 1000
//! ```
//!
//! Every `[delivery]` field has a default, and the whole section may be
//! omitted.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use trislot_common::config::{ConfigError, ConfigLoader, SharedConfig};

/// Upper bound on packages per run; per-package timestamps are kept in memory.
pub const MAX_PACKAGES: u32 = 10_000_000;

/// Top-level probe configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProbeConfig {
    /// Logging and identity.
    #[serde(default)]
    pub shared: SharedConfig,

    /// Delivery experiment parameters.
    #[serde(default)]
    pub delivery: DeliveryConfig,
}

/// Parameters of one writer/reader delivery run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeliveryConfig {
    /// Number of packages the writer publishes.
    #[serde(default = "default_packages")]
    pub packages: u32,

    /// Pacing interval between two publishes [ms]. Zero publishes flat out.
    #[serde(default = "default_writer_interval_ms")]
    pub writer_interval_ms: u64,

    /// Back-off interval after an empty poll [ms]. Zero busy-polls.
    #[serde(default = "default_reader_interval_ms")]
    pub reader_interval_ms: u64,

    /// Quiet period before the first and after the last publish [ms], giving
    /// the reader time to start and to drain.
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

fn default_packages() -> u32 {
    1000
}

fn default_writer_interval_ms() -> u64 {
    4
}

fn default_reader_interval_ms() -> u64 {
    2
}

fn default_settle_ms() -> u64 {
    1000
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            packages: default_packages(),
            writer_interval_ms: default_writer_interval_ms(),
            reader_interval_ms: default_reader_interval_ms(),
            settle_ms: default_settle_ms(),
        }
    }
}

impl DeliveryConfig {
    /// Writer pacing interval.
    pub fn writer_interval(&self) -> Duration {
        Duration::from_millis(self.writer_interval_ms)
    }

    /// Reader back-off interval.
    pub fn reader_interval(&self) -> Duration {
        Duration::from_millis(self.reader_interval_ms)
    }

    /// Settle period.
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// Validate numeric bounds.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.packages == 0 {
            return Err(ConfigError::ValidationError(
                "delivery.packages must be at least 1".to_string(),
            ));
        }
        if self.packages > MAX_PACKAGES {
            return Err(ConfigError::ValidationError(format!(
                "delivery.packages must not exceed {MAX_PACKAGES}"
            )));
        }
        Ok(())
    }
}

impl ProbeConfig {
    /// Load and validate a probe configuration file.
    pub fn load_validated(path: &Path) -> Result<Self, ConfigError> {
        let config = Self::load(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate all sections.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        self.delivery.validate()
    }
}
