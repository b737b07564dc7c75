//! Single-pass length statistics.

use pktsynth_model::LengthStats;

/// Running count, mean and sum of squared deviations (Welford).
#[derive(Debug, Clone, Copy, Default)]
pub struct LengthAccumulator {
    count: u64,
    mean: f64,
    m2: f64,
}

impl LengthAccumulator {
    pub fn push(&mut self, length: u64) {
        let value = length as f64;
        self.count += 1;
        let delta = value - self.mean;
        self.mean += delta / self.count as f64;
        self.m2 += delta * (value - self.mean);
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Bessel-corrected standard deviation, 0 for fewer than two values.
    pub fn stddev(&self) -> f64 {
        if self.count < 2 {
            return 0.0;
        }
        (self.m2.max(0.0) / (self.count - 1) as f64).sqrt()
    }

    pub fn finish(&self) -> LengthStats {
        LengthStats::new(self.mean, self.stddev(), self.count)
    }
}
