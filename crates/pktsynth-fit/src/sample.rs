//! Synthetic record sampling from a fitted model.
//!
//! Each draw is independent: a protocol from the categorical distribution,
//! then a length from that protocol's normal distribution, truncated toward
//! zero and clamped at 0. Clamping piles negative draws onto 0 rather than
//! resampling, so the left tail differs from a truncated normal.

use pktsynth_model::{
    FittedModel, LengthStatistics, LengthStats, ProtocolDistribution, SyntheticRecord,
};
use rand::distr::Distribution;
use rand::distr::weighted::WeightedIndex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;

use crate::error::{FitError, Result};

/// Length model for one protocol.
#[derive(Debug, Clone, Copy)]
enum LengthModel {
    Constant(f64),
    Normal(Normal<f64>),
}

impl LengthModel {
    fn from_stats(protocol: &str, stats: &LengthStats) -> Result<Self> {
        let invalid = || FitError::InvalidLengthModel {
            protocol: protocol.to_string(),
            mean: stats.mean,
            stddev: stats.stddev,
        };
        if !stats.mean.is_finite() || !stats.stddev.is_finite() || stats.stddev < 0.0 {
            return Err(invalid());
        }
        if stats.is_degenerate() {
            return Ok(Self::Constant(stats.mean));
        }
        Normal::new(stats.mean, stats.stddev)
            .map(Self::Normal)
            .map_err(|_| invalid())
    }

    fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Self::Constant(mean) => *mean,
            Self::Normal(normal) => normal.sample(rng),
        }
    }
}

/// Truncate toward zero and clamp at 0.
pub fn clamp_length(value: f64) -> u64 {
    // NaN.max(0.0) is 0.0
    value.trunc().max(0.0) as u64
}

/// Draws synthetic records from a protocol distribution and length statistics.
///
/// Holds only read-only lookup tables; all randomness comes from the `Rng`
/// passed to each call.
#[derive(Debug, Clone)]
pub struct Sampler {
    labels: Vec<String>,
    index: WeightedIndex<f64>,
    lengths: Vec<LengthModel>,
}

impl Sampler {
    /// Build a sampler from the two model mappings.
    ///
    /// # Errors
    ///
    /// - [`FitError::EmptyModel`] if `distribution` is empty
    /// - [`FitError::MissingStatistics`] if a protocol has no length entry
    /// - [`FitError::InvalidLengthModel`] for non-finite or negative parameters
    pub fn new(distribution: &ProtocolDistribution, lengths: &LengthStatistics) -> Result<Self> {
        if distribution.is_empty() {
            return Err(FitError::EmptyModel);
        }

        let mut labels = Vec::with_capacity(distribution.len());
        let mut weights = Vec::with_capacity(distribution.len());
        let mut models = Vec::with_capacity(distribution.len());
        for (label, probability) in distribution.iter() {
            let stats = lengths
                .get(label)
                .ok_or_else(|| FitError::MissingStatistics {
                    protocol: label.to_string(),
                })?;
            models.push(LengthModel::from_stats(label, stats)?);
            labels.push(label.to_string());
            weights.push(probability);
        }

        let index = WeightedIndex::new(&weights).map_err(|e| FitError::InvalidWeights {
            reason: e.to_string(),
        })?;

        Ok(Self {
            labels,
            index,
            lengths: models,
        })
    }

    pub fn from_model(model: &FittedModel) -> Result<Self> {
        Self::new(model.distribution(), model.lengths())
    }

    /// Draw one record.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> SyntheticRecord {
        let slot = self.index.sample(rng);
        let length = clamp_length(self.lengths[slot].draw(rng));
        SyntheticRecord::new(self.labels[slot].clone(), length)
    }

    /// Draw exactly `count` independent records.
    pub fn draw_many<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<SyntheticRecord> {
        (0..count).map(|_| self.draw(rng)).collect()
    }
}

/// Draw `count` records from `model`, or `model.record_count()` when `None`.
pub fn sample<R: Rng + ?Sized>(
    model: &FittedModel,
    count: Option<usize>,
    rng: &mut R,
) -> Result<Vec<SyntheticRecord>> {
    let sampler = Sampler::from_model(model)?;
    let count = count.unwrap_or_else(|| model.record_count());
    let records = sampler.draw_many(count, rng);
    tracing::debug!(
        samples = records.len(),
        protocols = model.protocol_count(),
        "sampled synthetic records"
    );
    Ok(records)
}

/// Seeded generator for reproducible runs, OS entropy otherwise.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_length() {
        assert_eq!(clamp_length(499.99), 499);
        assert_eq!(clamp_length(0.4), 0);
        assert_eq!(clamp_length(-0.7), 0);
        assert_eq!(clamp_length(-250.0), 0);
        assert_eq!(clamp_length(f64::NAN), 0);
    }

    #[test]
    fn test_sampler_rejects_empty_distribution() {
        let result = Sampler::new(&ProtocolDistribution::default(), &LengthStatistics::new());
        assert!(matches!(result, Err(FitError::EmptyModel)));
    }

    #[test]
    fn test_sampler_rejects_missing_statistics() {
        let dist = ProtocolDistribution::from_counts([("TCP", 1), ("UDP", 1)]);
        let lengths: LengthStatistics = [("TCP", LengthStats::constant(60.0))].into_iter().collect();

        let result = Sampler::new(&dist, &lengths);
        assert!(matches!(
            result,
            Err(FitError::MissingStatistics { ref protocol }) if protocol == "UDP"
        ));
    }

    #[test]
    fn test_sampler_rejects_nan_mean() {
        let dist = ProtocolDistribution::from_counts([("TCP", 1)]);
        let lengths: LengthStatistics = [("TCP", LengthStats::new(f64::NAN, 1.0, 2))]
            .into_iter()
            .collect();

        assert!(matches!(
            Sampler::new(&dist, &lengths),
            Err(FitError::InvalidLengthModel { .. })
        ));
    }

    #[test]
    fn test_negative_mean_clamps_to_zero() {
        let dist = ProtocolDistribution::from_counts([("ODD", 1)]);
        let lengths: LengthStatistics = [("ODD", LengthStats::constant(-50.0))]
            .into_iter()
            .collect();
        let sampler = Sampler::new(&dist, &lengths).unwrap();

        let mut rng = StdRng::seed_from_u64(7);
        assert!(sampler.draw_many(100, &mut rng).iter().all(|r| r.length == 0));
    }

    #[test]
    fn test_same_seed_same_output() {
        let dist = ProtocolDistribution::from_counts([("TCP", 3), ("UDP", 1)]);
        let lengths: LengthStatistics = [
            ("TCP", LengthStats::new(600.0, 200.0, 3)),
            ("UDP", LengthStats::new(120.0, 40.0, 1)),
        ]
        .into_iter()
        .collect();
        let sampler = Sampler::new(&dist, &lengths).unwrap();

        let first = sampler.draw_many(500, &mut rng_from_seed(Some(42)));
        let second = sampler.draw_many(500, &mut rng_from_seed(Some(42)));
        assert_eq!(first, second);
    }
}
