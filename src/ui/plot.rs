use eframe::egui::Ui;
use egui_plot::{Bar, BarChart, Legend, Plot};

use crate::state::PlotState;

// ---------------------------------------------------------------------------
// Cluster-size histogram (central panel)
// ---------------------------------------------------------------------------

/// Render the histogram as a bar chart filling the central panel.
pub fn histogram_plot(ui: &mut Ui, state: &PlotState) {
    let histogram = &state.histogram;
    let width = histogram.bin_width();

    let bars: Vec<Bar> = (0..histogram.bins())
        .map(|i| {
            Bar::new(histogram.center(i), state.bar_height(i))
                .width(width)
                .fill(state.bar_colors[i])
                .name(state.bar_label(i))
        })
        .collect();

    let chart = BarChart::new(bars).name("Cluster sizes");

    Plot::new("cluster_size_histogram")
        .legend(Legend::default())
        .x_axis_label("Cluster size")
        .y_axis_label(state.y_axis_label())
        .include_y(0.0)
        .include_y(state.y_max())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}
