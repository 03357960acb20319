use eframe::egui::{RichText, Stroke, Ui};
use egui_plot::{Bar, BarChart, Plot, PlotPoints, Points};

use crate::chart::Figure;
use crate::color;

// ---------------------------------------------------------------------------
// Figure rendering
// ---------------------------------------------------------------------------

/// Render a [`Figure`] into the remaining space of `ui`.
pub fn figure_plot(ui: &mut Ui, id: &str, figure: &Figure) {
    if let Some(title) = figure.title() {
        ui.horizontal(|ui: &mut Ui| {
            ui.label(RichText::new(title).strong().size(16.0));
            if ui.small_button("Copy chart JSON").clicked() {
                match figure.to_json() {
                    Ok(json) => ui.ctx().copy_text(json),
                    Err(e) => log::error!("Failed to serialise figure: {e}"),
                }
            }
        });
    }

    let accent = color::accent();

    match figure {
        // Blank axes, like an empty figure in a browser.
        Figure::Empty => {
            Plot::new(id).show(ui, |_plot_ui| {});
        }
        Figure::Histogram {
            x_label,
            y_label,
            bins,
            ..
        } => {
            let bars: Vec<Bar> = bins
                .iter()
                .map(|bin| {
                    Bar::new(bin.center(), bin.count as f64)
                        .width(bin.width())
                        .name(format!("[{}, {})", bin.start, bin.end))
                        .fill(color::lighten(accent, 0.2))
                        .stroke(Stroke::new(1.0, accent))
                })
                .collect();

            let chart = BarChart::new(bars).name(x_label).color(accent);

            Plot::new(id)
                .x_axis_label(x_label.as_str())
                .y_axis_label(y_label.as_str())
                .allow_boxed_zoom(true)
                .allow_drag(true)
                .allow_scroll(true)
                .allow_zoom(true)
                .show(ui, |plot_ui| {
                    plot_ui.bar_chart(chart);
                });
        }
        Figure::Scatter {
            x_label,
            y_label,
            points,
            ..
        } => {
            let series: PlotPoints = points.iter().copied().collect();
            let markers = Points::new(series)
                .name(format!("{y_label} by {x_label}"))
                .color(accent)
                .radius(3.0);

            Plot::new(id)
                .x_axis_label(x_label.as_str())
                .y_axis_label(y_label.as_str())
                .allow_boxed_zoom(true)
                .allow_drag(true)
                .allow_scroll(true)
                .allow_zoom(true)
                .show(ui, |plot_ui| {
                    plot_ui.points(markers);
                });
        }
    }
}
