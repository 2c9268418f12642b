use serde::Serialize;

use super::normality::{dagostino_pearson, ks_normal, TestOutcome};
use crate::data::model::ClusterSizeSample;

/// Percentile ranks reported for every index.
pub const PERCENTILE_RANKS: [u8; 10] = [1, 5, 10, 20, 25, 50, 75, 90, 95, 99];

/// Significance level for both normality verdicts.
pub const DEFAULT_ALPHA: f64 = 0.05;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Which p-value drives the "Normality (DP)" line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DpVerdictSource {
    /// The omnibus test's own p-value.
    #[default]
    Own,
    /// The KS p-value, reproducing the historical report.
    Legacy,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryOptions {
    pub alpha: f64,
    pub dp_verdict: DpVerdictSource,
}

impl Default for SummaryOptions {
    fn default() -> Self {
        Self {
            alpha: DEFAULT_ALPHA,
            dp_verdict: DpVerdictSource::Own,
        }
    }
}

// ---------------------------------------------------------------------------
// Report types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    LooksNormal,
    LooksNonNormal,
    /// Not enough data to run the test.
    Undetermined,
}

impl Verdict {
    fn from_outcome(outcome: &TestOutcome, alpha: f64) -> Self {
        if outcome.looks_normal(alpha) {
            Verdict::LooksNormal
        } else {
            Verdict::LooksNonNormal
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Percentile {
    pub rank: u8,
    pub value: f64,
}

/// Everything printed about one index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexReport {
    pub cluster_count: usize,
    pub total_members: usize,
    pub empty_clusters: usize,
    pub percentiles: Vec<Percentile>,
    pub median: f64,
    pub max: usize,
    pub min: usize,
    pub mean: f64,
    pub std_dev: f64,
    pub ks: TestOutcome,
    /// `None` when the sample is too small for the omnibus test.
    pub omnibus: Option<TestOutcome>,
    pub normality_ks: Verdict,
    pub normality_dp: Verdict,
    pub dp_verdict_source: DpVerdictSource,
}

// ---------------------------------------------------------------------------
// Summarizer
// ---------------------------------------------------------------------------

/// Compute the full report for a cluster-size sample.
pub fn summarize(sample: &ClusterSizeSample, options: &SummaryOptions) -> IndexReport {
    let sorted = sample.sorted_values();
    let cluster_count = sample.len();
    let total_members = sample.total();

    let mean = total_members as f64 / cluster_count as f64;
    let std_dev = population_std_dev(&sample.values(), mean);

    let percentiles = PERCENTILE_RANKS
        .iter()
        .map(|&rank| Percentile {
            rank,
            value: percentile_sorted(&sorted, f64::from(rank)),
        })
        .collect();

    let ks = ks_normal(&sorted, mean, std_dev);
    let omnibus = dagostino_pearson(&sample.values());
    log::debug!(
        "ks: D={:.6} p={:.6}; omnibus: {:?}",
        ks.statistic,
        ks.p_value,
        omnibus
    );

    let normality_ks = Verdict::from_outcome(&ks, options.alpha);
    let normality_dp = match options.dp_verdict {
        DpVerdictSource::Legacy => normality_ks,
        DpVerdictSource::Own => omnibus
            .as_ref()
            .map(|o| Verdict::from_outcome(o, options.alpha))
            .unwrap_or(Verdict::Undetermined),
    };

    IndexReport {
        cluster_count,
        total_members,
        empty_clusters: sample.sizes().iter().filter(|&&s| s == 0).count(),
        percentiles,
        median: percentile_sorted(&sorted, 50.0),
        max: sample.max(),
        min: sample.min(),
        mean,
        std_dev,
        ks,
        omnibus,
        normality_ks,
        normality_dp,
        dp_verdict_source: options.dp_verdict,
    }
}

/// Linear-interpolation percentile of an ascending, non-empty slice.
///
/// `p` is in `[0, 100]`; the position is `(n - 1) * (p / 100)`. Interpolation
/// runs from whichever neighbour is nearer, so results agree with numpy's
/// `percentile` to the last bit.
pub fn percentile_sorted(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 0 {
        return f64::NAN;
    }
    let pos = (n - 1) as f64 * (p.clamp(0.0, 100.0) / 100.0);
    let lo = pos.floor() as usize;
    let hi = (lo + 1).min(n - 1);
    let frac = pos - lo as f64;
    let (a, b) = (sorted[lo], sorted[hi]);
    let diff = b - a;
    if frac >= 0.5 {
        b - diff * (1.0 - frac)
    } else {
        a + diff * frac
    }
}

/// Standard deviation dividing by N, given the sample mean.
///
/// Two-pass: squared deviations in index order, added with
/// [`pairwise_sum`].
pub fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let squared: Vec<f64> = values.iter().map(|x| (x - mean) * (x - mean)).collect();
    (pairwise_sum(&squared) / values.len() as f64).sqrt()
}

const PAIRWISE_BLOCK: usize = 128;

/// Summation in numpy's order: eight interleaved accumulators per block of
/// at most 128 values, blocks combined by halving.
pub fn pairwise_sum(values: &[f64]) -> f64 {
    let n = values.len();
    if n < 8 {
        return values.iter().fold(0.0, |acc, x| acc + x);
    }
    if n <= PAIRWISE_BLOCK {
        let mut r = [0.0; 8];
        r.copy_from_slice(&values[..8]);
        let whole = n - n % 8;
        for chunk in values[8..whole].chunks_exact(8) {
            for (acc, x) in r.iter_mut().zip(chunk) {
                *acc += x;
            }
        }
        let mut res = ((r[0] + r[1]) + (r[2] + r[3])) + ((r[4] + r[5]) + (r[6] + r[7]));
        for x in &values[whole..] {
            res += x;
        }
        return res;
    }
    let mut half = n / 2;
    half -= half % 8;
    pairwise_sum(&values[..half]) + pairwise_sum(&values[half..])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(sizes: &[usize]) -> IndexReport {
        let sample = ClusterSizeSample::new(sizes.to_vec()).unwrap();
        summarize(&sample, &SummaryOptions::default())
    }

    fn rel_close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * b.abs().max(1.0)
    }

    #[test]
    fn three_cluster_scenario() {
        let r = report(&[2, 1, 3]);
        assert_eq!(r.cluster_count, 3);
        assert_eq!(r.min, 1);
        assert_eq!(r.max, 3);
        assert_eq!(r.mean, 2.0);
        assert!((r.std_dev - 0.816496580927726).abs() < 1e-12);
        assert_eq!(r.median, 2.0);
        assert_eq!(r.total_members, 6);
        assert_eq!(r.omnibus, None);
        assert_eq!(r.normality_dp, Verdict::Undetermined);
    }

    #[test]
    fn identical_sizes() {
        let r = report(&[5, 5, 5, 5, 5]);
        assert_eq!(r.std_dev, 0.0);
        assert!(r.percentiles.iter().all(|p| p.value == 5.0));
        assert_eq!(r.normality_ks, Verdict::LooksNonNormal);
    }

    #[test]
    fn population_std_dev_divides_by_n() {
        assert_eq!(population_std_dev(&[2.0, 2.0, 2.0, 2.0], 2.0), 0.0);
        assert!((population_std_dev(&[1.0, 2.0, 3.0, 4.0], 2.5) - 1.25f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn std_dev_is_bit_exact_in_index_order() {
        let r = report(&[457, 472, 95, 161, 491, 194, 65, 495, 14, 53, 179, 85, 183]);
        assert_eq!(r.std_dev, 176.19989320900254);
    }

    #[test]
    fn pairwise_sum_blocks() {
        let small: Vec<f64> = (1..=7).map(f64::from).collect();
        assert_eq!(pairwise_sum(&small), 28.0);
        let block: Vec<f64> = (1..=100).map(f64::from).collect();
        assert_eq!(pairwise_sum(&block), 5050.0);
        let split: Vec<f64> = (1..=1000).map(f64::from).collect();
        assert_eq!(pairwise_sum(&split), 500_500.0);
        assert_eq!(pairwise_sum(&[]), 0.0);
    }

    #[test]
    fn mean_matches_arithmetic_mean() {
        use statrs::statistics::Statistics;

        let sizes = [17usize, 3, 250, 41, 9, 9, 120, 66, 1, 38, 77];
        let r = report(&sizes);
        let values: Vec<f64> = sizes.iter().map(|&s| s as f64).collect();
        assert!(rel_close(r.mean, values.iter().mean()));
    }

    #[test]
    fn percentiles_are_bounded_and_monotone() {
        let r = report(&[40, 3, 18, 7, 7, 99, 23, 51, 12, 64, 5, 31, 2, 88]);
        let ranks: Vec<u8> = r.percentiles.iter().map(|p| p.rank).collect();
        assert_eq!(ranks, PERCENTILE_RANKS.to_vec());
        for pair in r.percentiles.windows(2) {
            assert!(pair[0].value <= pair[1].value);
        }
        for p in &r.percentiles {
            assert!(p.value >= r.min as f64 && p.value <= r.max as f64);
        }
    }

    #[test]
    fn linear_interpolation_between_ranks() {
        let sorted = [1.0, 2.0, 3.0, 4.0];
        // position (n - 1) * p / 100
        assert_eq!(percentile_sorted(&sorted, 50.0), 2.5);
        assert!((percentile_sorted(&sorted, 1.0) - 1.03).abs() < 1e-12);
        assert!((percentile_sorted(&sorted, 99.0) - 3.97).abs() < 1e-12);
        assert_eq!(percentile_sorted(&sorted, 0.0), 1.0);
        assert_eq!(percentile_sorted(&sorted, 100.0), 4.0);
        assert_eq!(percentile_sorted(&[7.0], 25.0), 7.0);
    }

    #[test]
    fn upper_half_interpolates_down_from_next_rank() {
        let r = report(&[291, 433, 410, 391, 32, 130, 60, 253, 389, 230]);
        let p95 = r.percentiles.iter().find(|p| p.rank == 95).unwrap();
        assert_eq!(p95.value, 422.65);

        let r = report(&[5, 60, 58, 51, 43, 49, 56]);
        let p5 = r.percentiles.iter().find(|p| p.rank == 5).unwrap();
        assert_eq!(p5.value, 16.400000000000002);
    }

    #[test]
    fn legacy_dp_verdict_repeats_ks() {
        let sizes = [1usize, 1, 1, 1, 1, 1, 1, 9];
        let sample = ClusterSizeSample::new(sizes.to_vec()).unwrap();

        let own = summarize(&sample, &SummaryOptions::default());
        let legacy = summarize(
            &sample,
            &SummaryOptions {
                dp_verdict: DpVerdictSource::Legacy,
                ..SummaryOptions::default()
            },
        );

        assert_eq!(legacy.normality_dp, legacy.normality_ks);
        assert_eq!(own.normality_ks, legacy.normality_ks);
        assert_eq!(own.omnibus, legacy.omnibus);
        assert_eq!(legacy.dp_verdict_source, DpVerdictSource::Legacy);
        let omnibus = own.omnibus.unwrap();
        assert_eq!(
            own.normality_dp,
            Verdict::from_outcome(&omnibus, DEFAULT_ALPHA)
        );
    }

    #[test]
    fn counts_empty_clusters() {
        let r = report(&[0, 4, 0, 2]);
        assert_eq!(r.empty_clusters, 2);
        assert_eq!(r.min, 0);
    }
}
