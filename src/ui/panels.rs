use eframe::egui::{self, Grid, RichText, ScrollArea, Ui};

use crate::state::PlotState;

// ---------------------------------------------------------------------------
// Left side panel – report summary
// ---------------------------------------------------------------------------

/// Render the percentile table and normality verdicts.
pub fn side_panel(ui: &mut Ui, state: &PlotState) {
    let report = &state.report;

    ui.heading("Index Statistics");
    ui.separator();

    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            ui.strong("Percentiles");
            Grid::new("percentiles")
                .striped(true)
                .num_columns(2)
                .show(ui, |ui: &mut Ui| {
                    for p in &report.percentiles {
                        ui.label(format!("p{}", p.rank));
                        ui.label(format!("{:.2}", p.value));
                        ui.end_row();
                    }
                });
            ui.separator();

            Grid::new("aggregates")
                .num_columns(2)
                .show(ui, |ui: &mut Ui| {
                    ui.label("Min");
                    ui.label(report.min.to_string());
                    ui.end_row();
                    ui.label("Max");
                    ui.label(report.max.to_string());
                    ui.end_row();
                    ui.label("Empty clusters");
                    ui.label(report.empty_clusters.to_string());
                    ui.end_row();
                    ui.label("Members");
                    ui.label(report.total_members.to_string());
                    ui.end_row();
                });
            ui.separator();

            ui.strong("Normality");
            ui.label(format!("KS: {}", report.normality_ks));
            ui.label(format!("DP: {}", report.normality_dp));
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut PlotState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.label(format!(
            "{} clusters, {} bins",
            state.report.cluster_count,
            state.histogram.bins()
        ));

        ui.separator();

        ui.label(
            RichText::new(format!(
                "mean {:.2}  σ {:.2}",
                state.report.mean, state.report.std_dev
            ))
            .monospace(),
        );

        ui.separator();

        if ui.selectable_label(state.log_scale, "Log scale").clicked() {
            state.toggle_log_scale();
        }
    });
}
