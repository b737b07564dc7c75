//! Categorical distribution over protocol labels.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};

/// Allowed deviation of the total probability mass from 1.
pub const MASS_TOLERANCE: f64 = 1e-9;

/// Probability mass per protocol label.
///
/// Probabilities are non-negative and sum to 1 within [`MASS_TOLERANCE`].
/// An empty distribution is representable so that callers can detect the
/// "no data" case; every other constructor path enforces the mass invariant,
/// deserialization included.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, f64>", into = "BTreeMap<String, f64>")]
pub struct ProtocolDistribution {
    probabilities: BTreeMap<String, f64>,
}

impl ProtocolDistribution {
    /// Relative frequencies from per-protocol counts. Zero counts are skipped.
    pub fn from_counts<'a, I>(counts: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, u64)>,
    {
        let counts: Vec<(&str, u64)> = counts.into_iter().filter(|(_, c)| *c > 0).collect();
        let total: u64 = counts.iter().map(|(_, c)| *c).sum();
        let probabilities = counts
            .into_iter()
            .map(|(label, count)| (label.to_string(), count as f64 / total as f64))
            .collect();
        Self { probabilities }
    }

    /// Build from explicit probabilities, validating the mass invariant.
    pub fn from_probabilities<I, S>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut probabilities = BTreeMap::new();
        for (label, probability) in entries {
            let label = label.into();
            if !probability.is_finite() || probability < 0.0 {
                return Err(ModelError::InvalidProbability {
                    protocol: label,
                    probability,
                });
            }
            probabilities.insert(label, probability);
        }
        let distribution = Self { probabilities };
        if !distribution.is_empty() {
            let total = distribution.total_mass();
            if (total - 1.0).abs() > MASS_TOLERANCE {
                return Err(ModelError::UnnormalizedMass { total });
            }
        }
        Ok(distribution)
    }

    pub fn probability(&self, protocol: &str) -> Option<f64> {
        self.probabilities.get(protocol).copied()
    }

    pub fn contains(&self, protocol: &str) -> bool {
        self.probabilities.contains_key(protocol)
    }

    pub fn len(&self) -> usize {
        self.probabilities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probabilities.is_empty()
    }

    /// Sum of all probabilities (1 for any non-empty distribution).
    pub fn total_mass(&self) -> f64 {
        self.probabilities.values().sum()
    }

    /// Entries in label order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.probabilities
            .iter()
            .map(|(label, probability)| (label.as_str(), *probability))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.probabilities.keys().map(String::as_str)
    }

    /// Labels by descending probability, ties broken by label.
    ///
    /// This is the display order for frequency comparisons, so real and
    /// synthetic panels line up.
    pub fn ranked(&self) -> Vec<(&str, f64)> {
        let mut ranked: Vec<(&str, f64)> = self.iter().collect();
        ranked.sort_by(|a, b| rank_order(*a, *b));
        ranked
    }
}

/// Ordering of `(label, frequency)` pairs for display: descending frequency,
/// then ascending label.
pub fn rank_order(a: (&str, f64), b: (&str, f64)) -> Ordering {
    b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0))
}

impl TryFrom<BTreeMap<String, f64>> for ProtocolDistribution {
    type Error = ModelError;

    fn try_from(probabilities: BTreeMap<String, f64>) -> Result<Self> {
        Self::from_probabilities(probabilities)
    }
}

impl From<ProtocolDistribution> for BTreeMap<String, f64> {
    fn from(distribution: ProtocolDistribution) -> Self {
        distribution.probabilities
    }
}
