use std::io::Write;
use std::path::PathBuf;

use crate::data::loader::load_index;
use crate::data::model::ClusterSizeSample;
use crate::error::StatsError;
use crate::gate::Confirmation;
use crate::report::{write_report, ReportFormat};
use crate::stats::{summarize, IndexReport, SummaryOptions, DEFAULT_BINS};
use crate::visualizer::{show_histogram, HistogramRenderer};

/// Default index location, relative to the working directory.
pub const DEFAULT_INDEX_PATH: &str = "./data/index.json";

#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub index_path: PathBuf,
    pub format: ReportFormat,
    /// Ignored for JSON output, which never plots.
    pub show_plot: bool,
    pub bins: usize,
    pub summary: SummaryOptions,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            index_path: PathBuf::from(DEFAULT_INDEX_PATH),
            format: ReportFormat::Text,
            show_plot: true,
            bins: DEFAULT_BINS,
            summary: SummaryOptions::default(),
        }
    }
}

/// Load → summarize → report → (gate → histogram).
///
/// The report is fully written before the histogram step starts, so a
/// render failure never loses it.
pub fn run<W: Write>(
    options: &RunOptions,
    out: &mut W,
    gate: &mut dyn Confirmation,
    renderer: &dyn HistogramRenderer,
) -> Result<IndexReport, StatsError> {
    log::info!("Loading index from {}", options.index_path.display());
    let index = load_index(&options.index_path)?;
    let sample = ClusterSizeSample::from_index(&index)?;

    let report = summarize(&sample, &options.summary);
    write_report(out, &report, options.format)?;

    if options.show_plot && options.format == ReportFormat::Text {
        show_histogram(&sample, &report, options.bins, out, gate, renderer)?;
    } else {
        log::debug!("Histogram skipped");
    }

    Ok(report)
}
