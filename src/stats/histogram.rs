use crate::data::model::ClusterSizeSample;
use crate::error::StatsError;

/// Default number of histogram bins.
pub const DEFAULT_BINS: usize = 20;

/// Equal-width histogram of cluster sizes.
///
/// Bins span `[min, max]`; every bin is half-open except the last, which
/// also includes `max`. A sample with a single distinct value is binned over
/// `[v - 0.5, v + 0.5]`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` ascending edges.
    pub edges: Vec<f64>,
    /// One count per bin.
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn new(sample: &ClusterSizeSample, bins: usize) -> Result<Self, StatsError> {
        if bins == 0 {
            return Err(StatsError::InvalidBins);
        }

        let (mut lo, mut hi) = (sample.min() as f64, sample.max() as f64);
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins)
            .map(|i| if i == bins { hi } else { lo + width * i as f64 })
            .collect();

        let mut counts = vec![0usize; bins];
        for &size in sample.sizes() {
            let offset = (size as f64 - lo) / (hi - lo) * bins as f64;
            let bin = (offset.floor() as usize).min(bins - 1);
            counts[bin] += 1;
        }

        Ok(Self { edges, counts })
    }

    pub fn bins(&self) -> usize {
        self.counts.len()
    }

    pub fn bin_width(&self) -> f64 {
        self.edges[1] - self.edges[0]
    }

    /// Midpoint of bin `i`.
    pub fn center(&self, i: usize) -> f64 {
        (self.edges[i] + self.edges[i + 1]) / 2.0
    }

    pub fn max_count(&self) -> usize {
        self.counts.iter().copied().max().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}
