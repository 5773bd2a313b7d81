//! Analysis engine for CO2, temperature and groundwater series.
//!
//! - [`gap`]: theoretical temperature from CO2 via the logarithmic forcing relation,
//!   and the gap to the observed temperature.
//! - [`lag`]: lagged cross-correlation search between two equal-length series.
//! - [`trend`]: ordinary least-squares trend over an ordered sequence.
//! - [`composite`]: combines the above into a report with rule-based findings,
//!   which [`interpret`] turns into an evidence classification.
//!
//! All operations are pure functions over borrowed series; none hold state
//! between calls.

pub mod align;
pub mod chart;
pub mod composite;
pub mod error;
pub mod gap;
pub mod interpret;
pub mod lag;
pub mod stats;
pub mod summary;
pub mod trend;

pub use error::{AnalysisError, Result};
