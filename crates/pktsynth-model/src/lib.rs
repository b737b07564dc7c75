//! Data model for packet-length traffic synthesis.
//!
//! Plain data shared by every stage: raw [`Record`]s, the fitted
//! [`ProtocolDistribution`] and [`LengthStatistics`], and the [`FittedModel`]
//! pairing them.

pub mod distribution;
pub mod error;
pub mod model;
pub mod record;
pub mod statistics;

pub use distribution::{MASS_TOLERANCE, ProtocolDistribution, rank_order};
pub use error::{ModelError, Result};
pub use model::FittedModel;
pub use record::{Record, SyntheticRecord};
pub use statistics::{LengthStatistics, LengthStats};
