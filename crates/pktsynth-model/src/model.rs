//! Fitted protocol/length model.

use serde::{Deserialize, Serialize};

use crate::distribution::ProtocolDistribution;
use crate::error::{ModelError, Result};
use crate::statistics::{LengthStatistics, LengthStats};

/// Protocol distribution plus per-protocol length statistics.
///
/// Both mappings always share the same key set. Deserialization goes through
/// [`FittedModel::new`], so a loaded model holds the same guarantee.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ModelFields")]
pub struct FittedModel {
    distribution: ProtocolDistribution,
    lengths: LengthStatistics,
    record_count: usize,
}

#[derive(Deserialize)]
struct ModelFields {
    distribution: ProtocolDistribution,
    lengths: LengthStatistics,
    record_count: usize,
}

impl TryFrom<ModelFields> for FittedModel {
    type Error = ModelError;

    fn try_from(fields: ModelFields) -> Result<Self> {
        Self::new(fields.distribution, fields.lengths, fields.record_count)
    }
}

impl FittedModel {
    /// Pair a distribution with its length statistics.
    ///
    /// Fails with [`ModelError::KeyMismatch`] unless every protocol in one
    /// mapping appears in the other.
    pub fn new(
        distribution: ProtocolDistribution,
        lengths: LengthStatistics,
        record_count: usize,
    ) -> Result<Self> {
        let distribution_only: Vec<String> = distribution
            .labels()
            .filter(|label| !lengths.contains(label))
            .map(str::to_string)
            .collect();
        let statistics_only: Vec<String> = lengths
            .labels()
            .filter(|label| !distribution.contains(label))
            .map(str::to_string)
            .collect();
        if !distribution_only.is_empty() || !statistics_only.is_empty() {
            return Err(ModelError::KeyMismatch {
                distribution_only,
                statistics_only,
            });
        }
        Ok(Self {
            distribution,
            lengths,
            record_count,
        })
    }

    pub fn distribution(&self) -> &ProtocolDistribution {
        &self.distribution
    }

    pub fn lengths(&self) -> &LengthStatistics {
        &self.lengths
    }

    pub fn length_stats(&self, protocol: &str) -> Option<&LengthStats> {
        self.lengths.get(protocol)
    }

    /// Number of records the model was fitted on; the default sample size.
    pub fn record_count(&self) -> usize {
        self.record_count
    }

    pub fn protocol_count(&self) -> usize {
        self.distribution.len()
    }

    pub fn is_empty(&self) -> bool {
        self.distribution.is_empty()
    }
}
