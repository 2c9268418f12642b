//! Command-line interface. Every option can also come from the environment.

use std::path::PathBuf;

use clap::Parser;

use crate::pipeline::{RunOptions, DEFAULT_INDEX_PATH};
use crate::report::ReportFormat;
use crate::stats::{DpVerdictSource, SummaryOptions, DEFAULT_ALPHA, DEFAULT_BINS};

#[derive(Parser, Debug)]
#[command(
    name = "index-stats",
    version = env!("CARGO_PKG_VERSION"),
    about = "Print cluster-size statistics for an IVF-flat index and plot their histogram"
)]
pub struct Cli {
    /// Index JSON file with `centroids` and `clusters`.
    #[arg(value_name = "INDEX", env = "INDEX_STATS_PATH", default_value = DEFAULT_INDEX_PATH)]
    pub index: PathBuf,

    /// Number of histogram bins.
    #[arg(long, env = "INDEX_STATS_BINS", default_value_t = DEFAULT_BINS, value_parser = parse_bins)]
    pub bins: usize,

    /// Significance level for the normality verdicts.
    #[arg(long, env = "INDEX_STATS_ALPHA", default_value_t = DEFAULT_ALPHA, value_parser = parse_alpha)]
    pub alpha: f64,

    /// Which p-value decides the "Normality (DP)" line. `legacy` repeats the
    /// KS verdict, as older reports did.
    #[arg(long, value_enum, env = "INDEX_STATS_DP_VERDICT", default_value_t = DpVerdictSource::Own)]
    pub dp_verdict: DpVerdictSource,

    /// Report format. JSON output never opens the histogram.
    #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Print the report only.
    #[arg(long)]
    pub no_plot: bool,

    /// Open the histogram without waiting for input.
    #[arg(long, short = 'y')]
    pub yes: bool,

    /// Enable debug logging (RUST_LOG takes precedence).
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            index_path: self.index.clone(),
            format: self.format,
            show_plot: !self.no_plot,
            bins: self.bins,
            summary: SummaryOptions {
                alpha: self.alpha,
                dp_verdict: self.dp_verdict,
            },
        }
    }

    /// Default `env_logger` filter when RUST_LOG is unset.
    pub fn log_filter(&self) -> &'static str {
        if self.verbose {
            "index_stats=debug"
        } else {
            "warn"
        }
    }
}

fn parse_bins(s: &str) -> Result<usize, String> {
    match s.parse::<usize>() {
        Ok(0) => Err("at least one bin is required".to_string()),
        Ok(bins) => Ok(bins),
        Err(e) => Err(e.to_string()),
    }
}

fn parse_alpha(s: &str) -> Result<f64, String> {
    let alpha: f64 = s.parse().map_err(|e: std::num::ParseFloatError| e.to_string())?;
    if alpha > 0.0 && alpha < 1.0 {
        Ok(alpha)
    } else {
        Err(format!("alpha must be in (0, 1), got {alpha}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["index-stats"]).unwrap();
        let options = cli.run_options();
        assert_eq!(options, RunOptions::default());
        assert_eq!(cli.log_filter(), "warn");
    }

    #[test]
    fn flags_map_to_options() {
        let cli = Cli::try_parse_from([
            "index-stats",
            "idx.json",
            "--bins",
            "8",
            "--alpha",
            "0.01",
            "--dp-verdict",
            "legacy",
            "--format",
            "json",
            "--no-plot",
            "-v",
        ])
        .unwrap();
        let options = cli.run_options();
        assert_eq!(options.index_path, PathBuf::from("idx.json"));
        assert_eq!(options.bins, 8);
        assert_eq!(options.summary.alpha, 0.01);
        assert_eq!(options.summary.dp_verdict, DpVerdictSource::Legacy);
        assert_eq!(options.format, ReportFormat::Json);
        assert!(!options.show_plot);
        assert_eq!(cli.log_filter(), "index_stats=debug");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Cli::try_parse_from(["index-stats", "--bins", "0"]).is_err());
        assert!(Cli::try_parse_from(["index-stats", "--alpha", "1.5"]).is_err());
    }
}
