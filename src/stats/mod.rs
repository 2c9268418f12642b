/// Statistics over cluster sizes.
///
/// * `summary`    – percentiles, aggregates and the report
/// * `normality`  – Kolmogorov–Smirnov and D'Agostino–Pearson tests
/// * `histogram`  – fixed-width binning for the plot

pub mod histogram;
pub mod normality;
pub mod summary;

pub use histogram::{Histogram, DEFAULT_BINS};
pub use normality::TestOutcome;
pub use summary::{
    summarize, DpVerdictSource, IndexReport, Percentile, SummaryOptions, Verdict,
    DEFAULT_ALPHA, PERCENTILE_RANKS,
};
