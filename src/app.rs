use eframe::egui;

use crate::state::PlotState;
use crate::ui::{panels, plot};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct HistogramApp {
    pub state: PlotState,
}

impl HistogramApp {
    pub fn new(state: PlotState) -> Self {
        Self { state }
    }
}

impl eframe::App for HistogramApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: summary + scale toggle ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Left side panel: percentiles ----
        egui::SidePanel::left("stats_panel")
            .default_width(200.0)
            .resizable(true)
            .show(ctx, |ui| {
                panels::side_panel(ui, &self.state);
            });

        // ---- Central panel: histogram ----
        egui::CentralPanel::default().show(ctx, |ui| {
            plot::histogram_plot(ui, &self.state);
        });
    }
}
