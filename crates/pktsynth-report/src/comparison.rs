//! Real-vs-synthetic summary statistics.

use std::collections::BTreeMap;

use pktsynth_fit::LengthAccumulator;
use pktsynth_model::{Record, rank_order};
use serde::Serialize;

/// Counts, frequency and length moments for one side of the comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SideStats {
    pub count: u64,
    pub frequency: f64,
    pub mean_length: f64,
    pub stddev_length: f64,
}

/// One protocol row of the comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProtocolComparison {
    pub protocol: String,
    pub real: SideStats,
    pub synthetic: SideStats,
}

impl ProtocolComparison {
    /// Synthetic minus real frequency.
    pub fn frequency_delta(&self) -> f64 {
        self.synthetic.frequency - self.real.frequency
    }
}

/// Per-protocol comparison of a real and a synthetic record set.
///
/// Rows are ordered by descending real frequency, ties broken by protocol
/// label. Protocols present on only one side get zeroed stats for the other.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonSummary {
    pub real_total: usize,
    pub synthetic_total: usize,
    pub real_overall: SideStats,
    pub synthetic_overall: SideStats,
    pub protocols: Vec<ProtocolComparison>,
}

impl ComparisonSummary {
    pub fn from_records(real: &[Record], synthetic: &[Record]) -> Self {
        let real_groups = group(real);
        let synthetic_groups = group(synthetic);

        let mut labels: Vec<&str> = real_groups
            .keys()
            .chain(synthetic_groups.keys())
            .copied()
            .collect();
        labels.sort_unstable();
        labels.dedup();

        let mut protocols: Vec<ProtocolComparison> = labels
            .into_iter()
            .map(|label| ProtocolComparison {
                protocol: label.to_string(),
                real: side(real_groups.get(label), real.len()),
                synthetic: side(synthetic_groups.get(label), synthetic.len()),
            })
            .collect();
        protocols.sort_by(|a, b| {
            rank_order(
                (a.protocol.as_str(), a.real.frequency),
                (b.protocol.as_str(), b.real.frequency),
            )
        });

        Self {
            real_total: real.len(),
            synthetic_total: synthetic.len(),
            real_overall: overall(real),
            synthetic_overall: overall(synthetic),
            protocols,
        }
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.protocols.iter().map(|row| row.protocol.as_str())
    }

    pub fn get(&self, protocol: &str) -> Option<&ProtocolComparison> {
        self.protocols.iter().find(|row| row.protocol == protocol)
    }

    /// Largest absolute frequency difference across protocols.
    pub fn max_frequency_delta(&self) -> f64 {
        self.protocols
            .iter()
            .map(|row| row.frequency_delta().abs())
            .fold(0.0, f64::max)
    }
}

fn group(records: &[Record]) -> BTreeMap<&str, LengthAccumulator> {
    let mut groups: BTreeMap<&str, LengthAccumulator> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.protocol.as_str())
            .or_default()
            .push(record.length);
    }
    groups
}

fn side(acc: Option<&LengthAccumulator>, total: usize) -> SideStats {
    let Some(acc) = acc else {
        return SideStats::default();
    };
    SideStats {
        count: acc.count(),
        frequency: if total == 0 {
            0.0
        } else {
            acc.count() as f64 / total as f64
        },
        mean_length: acc.mean(),
        stddev_length: acc.stddev(),
    }
}

fn overall(records: &[Record]) -> SideStats {
    let mut acc = LengthAccumulator::default();
    for record in records {
        acc.push(record.length);
    }
    side(Some(&acc), records.len())
}
