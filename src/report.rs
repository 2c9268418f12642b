use std::fmt;
use std::io::Write;

use crate::error::StatsError;
use crate::stats::{IndexReport, Verdict};

/// Line printed before waiting for the user to open the histogram.
pub const HISTOGRAM_PROMPT: &str = "Enter anything to show histogram.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ReportFormat {
    /// Fixed-layout text report.
    #[default]
    Text,
    /// Pretty-printed JSON with every computed field.
    Json,
}

/// Verdict text of the two normality lines.
///
/// Besides "looks normal" and "looks non-normal", the DP line reads
/// "undetermined (too few clusters)" under `--dp-verdict own` when the index
/// has fewer than eight clusters and the omnibus test cannot run.
impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::LooksNormal => write!(f, "looks normal"),
            Verdict::LooksNonNormal => write!(f, "looks non-normal"),
            Verdict::Undetermined => write!(f, "undetermined (too few clusters)"),
        }
    }
}

/// The fixed text report.
///
/// Floats use `{:?}` so whole numbers keep their `.0`. The last line may show
/// a third verdict, "undetermined (too few clusters)"; see [`Verdict`].
impl fmt::Display for IndexReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Index Statistics")?;
        writeln!(f, "--------------------------------------")?;
        writeln!(f, "No. of Clusters   : {}", self.cluster_count)?;
        writeln!(f, "Percentiles")?;
        for p in &self.percentiles {
            writeln!(f, "\t{} -  {:?}", p.rank, p.value)?;
        }
        writeln!(f, "Max. (Cluster Size) : {}", self.max)?;
        writeln!(f, "Min. (Cluster Size) : {}", self.min)?;
        writeln!(f, "Ave. (Cluster Size) : {:?}", self.mean)?;
        writeln!(f, "Std. Dev. (Cluster Sizes): {:?}", self.std_dev)?;
        writeln!(f, "Normality (KS): {}", self.normality_ks)?;
        writeln!(f, "Normality (DP): {}", self.normality_dp)
    }
}

/// Write `report` to `out` in the requested format and flush.
pub fn write_report<W: Write>(
    out: &mut W,
    report: &IndexReport,
    format: ReportFormat,
) -> Result<(), StatsError> {
    match format {
        ReportFormat::Text => write!(out, "{report}")?,
        ReportFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, report).map_err(std::io::Error::from)?;
            writeln!(out)?;
        }
    }
    out.flush()?;
    Ok(())
}
