use std::io::Write;

use eframe::egui;

use crate::app::HistogramApp;
use crate::data::model::ClusterSizeSample;
use crate::error::StatsError;
use crate::gate::Confirmation;
use crate::report::HISTOGRAM_PROMPT;
use crate::state::PlotState;
use crate::stats::{Histogram, IndexReport};

/// Displays a finished histogram.
pub trait HistogramRenderer {
    fn render(&self, histogram: &Histogram, report: &IndexReport) -> Result<(), StatsError>;
}

/// Opens a native window with an `egui_plot` bar chart and blocks until it
/// is closed.
pub struct NativeRenderer {
    pub title: String,
}

impl Default for NativeRenderer {
    fn default() -> Self {
        Self {
            title: "Index Statistics – Cluster Sizes".to_string(),
        }
    }
}

impl HistogramRenderer for NativeRenderer {
    fn render(&self, histogram: &Histogram, report: &IndexReport) -> Result<(), StatsError> {
        let state = PlotState::new(histogram.clone(), report.clone());

        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([1000.0, 650.0])
                .with_min_inner_size([500.0, 320.0]),
            ..Default::default()
        };

        log::info!("Opening histogram window ({} bins)", histogram.bins());
        eframe::run_native(
            &self.title,
            options,
            Box::new(move |_cc| Ok(Box::new(HistogramApp::new(state)))),
        )
        .map_err(|e| {
            log::error!("Histogram window failed: {e}");
            StatsError::Render(e.to_string())
        })?;
        log::info!("Histogram window closed");
        Ok(())
    }
}

/// Prompt, wait for the gate, then render `bins` equal-width bins.
///
/// The bin count is validated before prompting so a bad value never leaves
/// the user waiting for nothing.
pub fn show_histogram<W: Write>(
    sample: &ClusterSizeSample,
    report: &IndexReport,
    bins: usize,
    out: &mut W,
    gate: &mut dyn Confirmation,
    renderer: &dyn HistogramRenderer,
) -> Result<(), StatsError> {
    let histogram = Histogram::new(sample, bins)?;

    writeln!(out, "{HISTOGRAM_PROMPT}")?;
    out.flush()?;
    gate.confirm()?;

    renderer.render(&histogram, report)
}
