//! # trislot Delivery Probe
//!
//! Drives a `trislot` exchange with one paced writer thread and one polling
//! reader thread, then reports how many packages were lost and how long the
//! delivered ones took to cross.
//!
//! ```rust,no_run
//! use trislot_probe::{DeliveryConfig, run_delivery};
//!
//! # fn main() -> Result<(), trislot_probe::ProbeError> {
//! let report = run_delivery(&DeliveryConfig::default())?;
//! println!("{}", report.summary_line());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod delivery;
pub mod error;
pub mod package;
pub mod report;

pub use config::{DeliveryConfig, ProbeConfig};
pub use delivery::run_delivery;
pub use error::{ProbeError, ProbeResult};
pub use package::Package;
pub use report::{DeliveryReport, PackageRecord};
