use std::f64::consts::TAU;

use eframe::egui::{self, Color32, RichText, Stroke, Ui};
use egui_plot::{Legend, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::chart::{ChartData, ChartSpec, ScatterPoint, Slice};
use crate::color::CategoryColors;

const CHART_HEIGHT: f32 = 340.0;

// ---------------------------------------------------------------------------
// Chart container
// ---------------------------------------------------------------------------

/// Render one chart container: title row with a "Copy JSON" button, then
/// the plot identified by `container`. Returns a status line when the
/// button was used.
pub fn chart_container(ui: &mut Ui, container: &str, spec: Option<&ChartSpec>) -> Option<String> {
    let Some(spec) = spec else {
        ui.label(format!("{container}: no figure"));
        return None;
    };

    let mut status = None;
    ui.horizontal(|ui: &mut Ui| {
        ui.label(RichText::new(&spec.title).strong().size(18.0));
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui: &mut Ui| {
            if ui.small_button("Copy JSON").clicked() {
                match spec.to_json() {
                    Ok(json) => {
                        ui.ctx().copy_text(json);
                        status = Some(format!("Copied {container} figure"));
                    }
                    Err(e) => {
                        log::error!("Failed to serialize {container}: {e}");
                        status = Some(format!("Error: {e}"));
                    }
                }
            }
        });
    });

    match &spec.data {
        ChartData::Pie {
            names_field,
            slices,
            ..
        } => pie_plot(ui, container, names_field, slices),
        ChartData::Scatter {
            x_field,
            y_field,
            points,
            ..
        } => scatter_plot(ui, container, x_field, y_field, points),
    }
    status
}

// ---------------------------------------------------------------------------
// Pie
// ---------------------------------------------------------------------------

/// Pie drawn as filled polygon wedges on a unit circle, starting at twelve
/// o'clock and running clockwise.
fn pie_plot(ui: &mut Ui, id: &str, names_field: &str, slices: &[Slice]) {
    let total: f64 = slices.iter().map(|s| s.value).sum();
    let colors = CategoryColors::new(slices.iter().map(|s| s.label.as_str()));

    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.3)
        .include_x(1.3)
        .include_y(-1.1)
        .include_y(1.1)
        .show(ui, |plot_ui| {
            if total <= 0.0 {
                plot_ui.text(Text::new(PlotPoint::new(0.0, 0.0), "No data"));
                return;
            }

            let mut start = 0.0;
            for slice in slices {
                let fraction = slice.value / total;
                if fraction <= 0.0 {
                    continue;
                }
                let end = start + fraction * TAU;

                let name = format!("{names_field} {}", slice.label);
                let color = colors.color_for(&slice.label);
                plot_ui.polygon(
                    Polygon::new(wedge(start, end))
                        .name(&name)
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, Color32::WHITE)),
                );

                let mid = (start + end) / 2.0;
                let (x, y) = polar(0.65, mid);
                plot_ui.text(Text::new(
                    PlotPoint::new(x, y),
                    RichText::new(format!("{:.1}%", fraction * 100.0)).color(Color32::WHITE),
                ));

                start = end;
            }
        });
}

/// Unit-circle point at `angle` radians measured clockwise from twelve o'clock.
fn polar(radius: f64, angle: f64) -> (f64, f64) {
    (radius * angle.sin(), radius * angle.cos())
}

fn wedge(start: f64, end: f64) -> PlotPoints<'static> {
    let steps = (((end - start) / TAU) * 120.0).ceil().max(2.0) as usize;
    std::iter::once([0.0, 0.0])
        .chain((0..=steps).map(|i| {
            let a = start + (end - start) * i as f64 / steps as f64;
            let (x, y) = polar(1.0, a);
            [x, y]
        }))
        .collect()
}

// ---------------------------------------------------------------------------
// Scatter
// ---------------------------------------------------------------------------

/// One point series per category so the legend doubles as a colour key.
fn scatter_plot(ui: &mut Ui, id: &str, x_field: &str, y_field: &str, points: &[ScatterPoint]) {
    let colors = CategoryColors::new(points.iter().map(|p| p.category.as_str()));

    Plot::new(id)
        .height(CHART_HEIGHT)
        .legend(Legend::default())
        .x_axis_label(x_field)
        .y_axis_label(y_field)
        .include_y(-0.25)
        .include_y(1.25)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for category in colors.labels() {
                let series: PlotPoints = points
                    .iter()
                    .filter(|p| p.category == *category)
                    .map(|p| [p.x, p.y])
                    .collect();

                plot_ui.points(
                    Points::new(series)
                        .name(category)
                        .color(colors.color_for(category))
                        .radius(4.0),
                );
            }
        });
}
