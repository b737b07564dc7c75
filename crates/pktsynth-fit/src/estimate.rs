//! Distribution estimation from a record set.

use std::collections::BTreeMap;

use pktsynth_model::{FittedModel, LengthStatistics, ProtocolDistribution, Record};

use crate::accumulator::LengthAccumulator;
use crate::error::{FitError, Result};

/// Fit the protocol distribution and per-protocol length statistics.
///
/// Pure and deterministic. Protocol probabilities are relative frequencies;
/// length statistics are the mean and Bessel-corrected standard deviation of
/// each protocol's lengths, with a standard deviation of 0 for protocols seen
/// once.
///
/// # Errors
///
/// [`FitError::EmptyModel`] when `records` is empty.
pub fn estimate(records: &[Record]) -> Result<FittedModel> {
    if records.is_empty() {
        return Err(FitError::EmptyModel);
    }

    let mut groups: BTreeMap<&str, LengthAccumulator> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.protocol.as_str())
            .or_default()
            .push(record.length);
    }

    let distribution =
        ProtocolDistribution::from_counts(groups.iter().map(|(label, acc)| (*label, acc.count())));
    let lengths: LengthStatistics = groups
        .iter()
        .map(|(label, acc)| (*label, acc.finish()))
        .collect();

    tracing::debug!(
        records = records.len(),
        protocols = distribution.len(),
        "estimated model"
    );

    Ok(FittedModel::new(distribution, lengths, records.len())?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(pairs: &[(&str, u64)]) -> Vec<Record> {
        pairs
            .iter()
            .map(|(protocol, length)| Record::new(*protocol, *length))
            .collect()
    }

    #[test]
    fn test_estimate_frequencies() {
        let model = estimate(&records(&[
            ("TCP", 60),
            ("TCP", 1514),
            ("UDP", 120),
            ("TCP", 66),
        ]))
        .unwrap();

        let dist = model.distribution();
        assert_eq!(dist.probability("TCP"), Some(0.75));
        assert_eq!(dist.probability("UDP"), Some(0.25));
        assert_eq!(model.record_count(), 4);
    }

    #[test]
    fn test_estimate_lengths() {
        let model = estimate(&records(&[("DNS", 70), ("DNS", 90), ("ARP", 42)])).unwrap();

        let dns = model.length_stats("DNS").unwrap();
        assert!((dns.mean - 80.0).abs() < 1e-12);
        // (10^2 + 10^2) / (2 - 1)
        assert!((dns.stddev - 200.0f64.sqrt()).abs() < 1e-12);

        let arp = model.length_stats("ARP").unwrap();
        assert_eq!(arp.mean, 42.0);
        assert_eq!(arp.stddev, 0.0);
    }

    #[test]
    fn test_estimate_empty_is_error() {
        assert!(matches!(estimate(&[]), Err(FitError::EmptyModel)));
    }

    #[test]
    fn test_estimate_labels_are_case_sensitive() {
        let model = estimate(&records(&[("tcp", 60), ("TCP", 60)])).unwrap();
        assert_eq!(model.protocol_count(), 2);
    }
}
