use eframe::egui::Color32;

use crate::color::bin_gradient;
use crate::stats::{Histogram, IndexReport};

// ---------------------------------------------------------------------------
// Histogram window state
// ---------------------------------------------------------------------------

/// Everything the histogram window shows, independent of rendering.
pub struct PlotState {
    pub histogram: Histogram,

    /// Report the histogram belongs to; shown in the side panel.
    pub report: IndexReport,

    /// One colour per bin.
    pub bar_colors: Vec<Color32>,

    /// Plot `log10(1 + count)` instead of raw counts.
    pub log_scale: bool,
}

impl PlotState {
    pub fn new(histogram: Histogram, report: IndexReport) -> Self {
        let bar_colors = bin_gradient(histogram.bins());
        Self {
            histogram,
            report,
            bar_colors,
            log_scale: false,
        }
    }

    pub fn toggle_log_scale(&mut self) {
        self.log_scale = !self.log_scale;
    }

    /// Height of bar `i` under the current scale.
    pub fn bar_height(&self, i: usize) -> f64 {
        let count = self.histogram.counts[i] as f64;
        if self.log_scale {
            count.ln_1p() / std::f64::consts::LN_10
        } else {
            count
        }
    }

    /// Height of the tallest bar under the current scale; the plot's
    /// default y-range reaches at least this far.
    pub fn y_max(&self) -> f64 {
        let count = self.histogram.max_count() as f64;
        if self.log_scale {
            count.ln_1p() / std::f64::consts::LN_10
        } else {
            count
        }
    }

    pub fn y_axis_label(&self) -> &'static str {
        if self.log_scale {
            "log10(1 + clusters)"
        } else {
            "Clusters"
        }
    }

    /// Hover text for bar `i`.
    pub fn bar_label(&self, i: usize) -> String {
        let h = &self.histogram;
        let close = if i + 1 == h.bins() { ']' } else { ')' };
        format!(
            "[{:.1}, {:.1}{close}: {} clusters",
            h.edges[i],
            h.edges[i + 1],
            h.counts[i]
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::ClusterSizeSample;
    use crate::stats::{summarize, SummaryOptions};

    fn state(sizes: &[usize], bins: usize) -> PlotState {
        let sample = ClusterSizeSample::new(sizes.to_vec()).unwrap();
        let report = summarize(&sample, &SummaryOptions::default());
        PlotState::new(Histogram::new(&sample, bins).unwrap(), report)
    }

    #[test]
    fn log_scale_toggles_heights() {
        let mut s = state(&[0, 0, 0, 0, 0, 0, 0, 0, 0, 10], 2);
        assert_eq!(s.bar_height(0), 9.0);
        s.toggle_log_scale();
        assert!((s.bar_height(0) - 1.0).abs() < 1e-12);
        assert_eq!(s.y_axis_label(), "log10(1 + clusters)");
    }

    #[test]
    fn y_max_follows_tallest_bar() {
        let mut s = state(&[1, 1, 1, 2, 9, 9, 9, 9], 4);
        assert_eq!(s.y_max(), 4.0);
        assert!((0..s.histogram.bins()).all(|i| s.bar_height(i) <= s.y_max()));
        s.toggle_log_scale();
        assert!((s.y_max() - 5f64.log10()).abs() < 1e-12);
    }

    #[test]
    fn labels_close_last_bin() {
        let s = state(&[0, 10], 2);
        assert_eq!(s.bar_label(0), "[0.0, 5.0): 1 clusters");
        assert_eq!(s.bar_label(1), "[5.0, 10.0]: 1 clusters");
        assert_eq!(s.bar_colors.len(), 2);
    }
}
