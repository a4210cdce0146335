use std::f64::consts::{FRAC_PI_2, TAU};

use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{
    GridInput, GridMark, Legend, Plot, PlotPoint, PlotPoints, Points, Polygon, Text,
};

use crate::chart::{ChartSpec, ProportionChart, ScatterChart};
use crate::color::ColorMap;
use crate::data::error::AggregationError;
use crate::state::AppState;

/// Vertices used for a full circle; slices get a proportional share.
const CIRCLE_SEGMENTS: f64 = 96.0;

// ---------------------------------------------------------------------------
// Chart areas (central panel)
// ---------------------------------------------------------------------------

pub fn success_pie_chart(ui: &mut Ui, state: &AppState, height: f32) {
    chart_area(ui, &state.pie_chart, &state.booster_colors, height);
}

pub fn success_payload_scatter_chart(ui: &mut Ui, state: &AppState, height: f32) {
    chart_area(ui, &state.scatter_chart, &state.booster_colors, height);
}

/// Title plus plot, or the error in place of the plot.
fn chart_area(
    ui: &mut Ui,
    result: &Result<ChartSpec, AggregationError>,
    colors: &ColorMap,
    height: f32,
) {
    let spec = match result {
        Ok(spec) => spec,
        Err(e) => {
            ui.label(RichText::new(format!("Chart unavailable: {e}")).color(Color32::RED));
            return;
        }
    };

    ui.vertical_centered(|ui: &mut Ui| {
        ui.strong(spec.title());
    });
    if !spec.has_data() {
        ui.label(RichText::new("No launches match the current selection.").weak());
    }
    match spec {
        ChartSpec::Proportion(pie) => pie_plot(ui, pie, height),
        ChartSpec::Scatter(scatter) => scatter_plot(ui, scatter, colors, height),
    }
}

// ---------------------------------------------------------------------------
// Pie
// ---------------------------------------------------------------------------

/// Outline of one slice: centre, then the arc. Angles run clockwise from
/// twelve o'clock.
fn slice_outline(start: f64, sweep: f64) -> Vec<[f64; 2]> {
    let steps = ((CIRCLE_SEGMENTS * sweep / TAU).ceil() as usize).max(2);
    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for k in 0..=steps {
        let angle = FRAC_PI_2 - (start + sweep * k as f64 / steps as f64);
        points.push([angle.cos(), angle.sin()]);
    }
    points
}

fn pie_plot(ui: &mut Ui, pie: &ProportionChart, height: f32) {
    let labels: Vec<String> = pie.slices.iter().map(|s| s.label.to_string()).collect();
    let colors = ColorMap::new(&labels);
    let fractions = pie.fractions();

    Plot::new("success_pie_chart")
        .legend(Legend::default())
        .data_aspect(1.0)
        .height(height)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .include_x(-1.1)
        .include_x(1.1)
        .include_y(-1.1)
        .include_y(1.1)
        .show(ui, |plot_ui| {
            let mut start = 0.0;
            for (label, fraction) in labels.iter().zip(&fractions) {
                if *fraction <= 0.0 {
                    continue;
                }
                let sweep = fraction * TAU;
                let polygon = Polygon::new(PlotPoints::new(slice_outline(start, sweep)))
                    .name(label)
                    .fill_color(colors.color_for(label))
                    .stroke(Stroke::new(1.0, Color32::WHITE));
                plot_ui.polygon(polygon);

                let mid = FRAC_PI_2 - (start + sweep / 2.0);
                plot_ui.text(
                    Text::new(
                        PlotPoint::new(0.65 * mid.cos(), 0.65 * mid.sin()),
                        format!("{:.1}%", fraction * 100.0),
                    )
                    .color(Color32::WHITE),
                );
                start += sweep;
            }
        });
}

// ---------------------------------------------------------------------------
// Scatter
// ---------------------------------------------------------------------------

fn scatter_plot(ui: &mut Ui, scatter: &ScatterChart, colors: &ColorMap, height: f32) {
    let mut plot = Plot::new("success_payload_scatter_chart")
        .legend(Legend::default())
        .height(height)
        .x_axis_label(scatter.x_axis.title.clone())
        .y_axis_label(scatter.y_axis.title.clone())
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .include_y(-0.1)
        .include_y(1.1);

    if let Some(ticks) = scatter.y_axis.tick_values.clone() {
        plot = plot.y_grid_spacer(move |_input: GridInput| {
            ticks
                .iter()
                .map(|&value| GridMark {
                    value,
                    step_size: 1.0,
                })
                .collect()
        });
    }

    plot.show(ui, |plot_ui| {
        for series in &scatter.series {
            let points = Points::new(PlotPoints::new(series.points.clone()))
                .name(&series.name)
                .color(colors.color_for(&series.name))
                .filled(true)
                .radius(4.0);
            plot_ui.points(points);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slice_outline_spans_arc() {
        let quarter = slice_outline(0.0, TAU / 4.0);
        assert_eq!(quarter[0], [0.0, 0.0]);
        // starts at twelve o'clock and ends at three o'clock
        let first = quarter[1];
        let last = quarter[quarter.len() - 1];
        assert!(first[0].abs() < 1e-9 && (first[1] - 1.0).abs() < 1e-9);
        assert!((last[0] - 1.0).abs() < 1e-9 && last[1].abs() < 1e-9);
    }

    #[test]
    fn test_thin_slice_has_minimum_vertices() {
        let sliver = slice_outline(0.0, 0.001);
        assert_eq!(sliver.len(), 4);
    }
}
