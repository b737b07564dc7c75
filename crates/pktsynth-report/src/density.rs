//! Histograms and kernel density estimates for length distributions.

use std::f64::consts::PI;

/// Equal-width histogram over a fixed range.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    pub start: f64,
    pub bin_width: f64,
    pub counts: Vec<usize>,
    pub total: usize,
}

impl Histogram {
    /// Bin `samples` into `bins` equal bins spanning `[min, max]`.
    ///
    /// Values outside the range are ignored; `max` falls in the last bin. A
    /// zero-width range is widened to one unit centred on `min`.
    pub fn with_range(samples: &[f64], min: f64, max: f64, bins: usize) -> Self {
        let bins = bins.max(1);
        let (start, end) = if max > min {
            (min, max)
        } else {
            (min - 0.5, min + 0.5)
        };
        let bin_width = (end - start) / bins as f64;
        let mut counts = vec![0usize; bins];
        let mut total = 0usize;
        for &value in samples {
            if !(start..=end).contains(&value) {
                continue;
            }
            let index = (((value - start) / bin_width) as usize).min(bins - 1);
            counts[index] += 1;
            total += 1;
        }
        Self {
            start,
            bin_width,
            counts,
            total,
        }
    }

    pub fn end(&self) -> f64 {
        self.start + self.bin_width * self.counts.len() as f64
    }

    /// `(left, right)` edges of bin `index`.
    pub fn bin_edges(&self, index: usize) -> (f64, f64) {
        let left = self.start + self.bin_width * index as f64;
        (left, left + self.bin_width)
    }

    /// Per-bin density, integrating to 1 over the range.
    pub fn densities(&self) -> Vec<f64> {
        if self.total == 0 {
            return vec![0.0; self.counts.len()];
        }
        let scale = 1.0 / (self.total as f64 * self.bin_width);
        self.counts.iter().map(|&c| c as f64 * scale).collect()
    }
}

/// Scott's rule bandwidth, `None` when the sample has no spread.
pub fn scott_bandwidth(samples: &[f64]) -> Option<f64> {
    let n = samples.len();
    if n < 2 {
        return None;
    }
    let mean = samples.iter().sum::<f64>() / n as f64;
    let variance = samples.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    let stddev = variance.sqrt();
    if !stddev.is_finite() || stddev == 0.0 {
        return None;
    }
    Some(1.06 * stddev * (n as f64).powf(-0.2))
}

/// Sample counts above which the KDE sums over binned samples.
pub const KDE_EXACT_LIMIT: usize = 4096;
/// Bin resolution of the binned KDE, in bins per bandwidth.
const KDE_BINS_PER_BANDWIDTH: f64 = 8.0;
const KDE_MAX_BINS: usize = 1 << 16;

/// Gaussian kernel density of `samples` evaluated at each point of `grid`.
///
/// Above [`KDE_EXACT_LIMIT`] samples the kernels are centred on occupied
/// bins of width `bandwidth / 8`, weighted by bin count, so the cost is
/// bounded by the number of bins rather than the sample count.
pub fn gaussian_kde(samples: &[f64], grid: &[f64]) -> Option<Vec<f64>> {
    let bandwidth = scott_bandwidth(samples)?;
    let norm = 1.0 / (samples.len() as f64 * bandwidth * (2.0 * PI).sqrt());
    let centres = if samples.len() > KDE_EXACT_LIMIT {
        binned_centres(samples, bandwidth)
    } else {
        samples.iter().map(|&s| (s, 1.0)).collect()
    };
    Some(
        grid.iter()
            .map(|&x| {
                centres
                    .iter()
                    .map(|&(centre, weight)| {
                        let z = (x - centre) / bandwidth;
                        weight * (-0.5 * z * z).exp()
                    })
                    .sum::<f64>()
                    * norm
            })
            .collect(),
    )
}

/// `(bin centre, count)` for every occupied bin.
fn binned_centres(samples: &[f64], bandwidth: f64) -> Vec<(f64, f64)> {
    let (min, max) = samples
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &s| {
            (lo.min(s), hi.max(s))
        });
    let bins = ((max - min) * KDE_BINS_PER_BANDWIDTH / bandwidth).ceil() as usize;
    let histogram = Histogram::with_range(samples, min, max, bins.clamp(1, KDE_MAX_BINS));
    histogram
        .counts
        .iter()
        .enumerate()
        .filter(|&(_, &count)| count > 0)
        .map(|(index, &count)| {
            let (left, right) = histogram.bin_edges(index);
            ((left + right) / 2.0, count as f64)
        })
        .collect()
}

/// `points` evenly spaced values from `min` to `max` inclusive.
pub fn linspace(min: f64, max: f64, points: usize) -> Vec<f64> {
    match points {
        0 => Vec::new(),
        1 => vec![min],
        _ => {
            let step = (max - min) / (points - 1) as f64;
            (0..points).map(|i| min + step * i as f64).collect()
        }
    }
}
