//! Per-protocol packet length statistics.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Mean and sample standard deviation of lengths for one protocol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LengthStats {
    pub mean: f64,
    /// Bessel-corrected; 0 when `count < 2`.
    pub stddev: f64,
    /// Number of supporting records.
    pub count: u64,
}

impl LengthStats {
    pub fn new(mean: f64, stddev: f64, count: u64) -> Self {
        Self {
            mean,
            stddev,
            count,
        }
    }

    /// A zero-variance model that always yields `mean`.
    pub fn constant(mean: f64) -> Self {
        Self::new(mean, 0.0, 1)
    }

    pub fn is_degenerate(&self) -> bool {
        self.stddev == 0.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LengthStatistics {
    by_protocol: BTreeMap<String, LengthStats>,
}

impl LengthStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, protocol: impl Into<String>, stats: LengthStats) {
        self.by_protocol.insert(protocol.into(), stats);
    }

    pub fn get(&self, protocol: &str) -> Option<&LengthStats> {
        self.by_protocol.get(protocol)
    }

    pub fn contains(&self, protocol: &str) -> bool {
        self.by_protocol.contains_key(protocol)
    }

    pub fn len(&self) -> usize {
        self.by_protocol.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_protocol.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &LengthStats)> {
        self.by_protocol
            .iter()
            .map(|(label, stats)| (label.as_str(), stats))
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.by_protocol.keys().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<(S, LengthStats)> for LengthStatistics {
    fn from_iter<T: IntoIterator<Item = (S, LengthStats)>>(iter: T) -> Self {
        Self {
            by_protocol: iter
                .into_iter()
                .map(|(label, stats)| (label.into(), stats))
                .collect(),
        }
    }
}
