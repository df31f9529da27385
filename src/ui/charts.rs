use std::f64::consts::TAU;

use eframe::egui::{Align2, Color32, RichText, Stroke, Ui};
use egui_plot::{Bar, BarChart, Legend, Plot, PlotPoint, Polygon, Text};

use crate::chart::{BarChartSpec, ChartBackend, HistogramSpec, PieChartSpec};
use crate::color;

const CHART_HEIGHT: f32 = 340.0;
const BAR_WIDTH: f64 = 0.6;
/// Straight segments per full turn when approximating pie arcs.
const ARC_SEGMENTS: f64 = 128.0;

// ---------------------------------------------------------------------------
// egui_plot backend for chart descriptions
// ---------------------------------------------------------------------------

/// Draws [`ChartSpec`](crate::chart::ChartSpec)s into an egui `Ui`.
pub struct EguiCharts<'a> {
    pub ui: &'a mut Ui,
}

impl ChartBackend for EguiCharts<'_> {
    fn bar(&mut self, spec: &BarChartSpec) {
        let colors = color::viridis(spec.bars.len());
        let labels: Vec<String> = spec.bars.iter().map(|b| b.label.clone()).collect();

        let bars: Vec<Bar> = spec
            .bars
            .iter()
            .zip(colors)
            .enumerate()
            .map(|(i, (b, fill))| {
                let stroke = if b.highlighted {
                    Stroke::new(2.5, color::HIGHLIGHT)
                } else {
                    Stroke::new(1.0, Color32::BLACK)
                };
                Bar::new(i as f64, b.value)
                    .width(BAR_WIDTH)
                    .name(&b.label)
                    .fill(fill)
                    .stroke(stroke)
            })
            .collect();

        Plot::new(("bar_chart", &spec.title))
            .height(CHART_HEIGHT)
            .x_axis_label(&spec.x_label)
            .y_axis_label(&spec.y_label)
            .x_axis_formatter(move |mark, _range| category_label(&labels, mark.value))
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .show(self.ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars));
                for (i, b) in spec.bars.iter().enumerate() {
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(i as f64, b.value),
                            RichText::new(format!("{:.0}", b.value)).strong(),
                        )
                        .anchor(value_anchor(b.value))
                        .color(Color32::WHITE),
                    );
                }
            });
    }

    fn pie(&mut self, spec: &PieChartSpec) {
        if spec.slices.iter().all(|s| s.share <= 0.0) {
            self.ui
                .label("No positive values among these companies; nothing to share out.");
            return;
        }
        let colors = color::teal_ramp(spec.slices.len());

        Plot::new(("pie_chart", &spec.title))
            .height(CHART_HEIGHT)
            .data_aspect(1.0)
            .show_axes(false)
            .show_grid(false)
            .show_x(false)
            .show_y(false)
            .legend(Legend::default())
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .show(self.ui, |plot_ui| {
                let mut start = 0.0;
                for (slice, fill) in spec.slices.iter().zip(colors) {
                    if slice.share <= 0.0 {
                        continue;
                    }
                    let sweep = slice.share / 100.0 * TAU;
                    let stroke = if slice.highlighted {
                        Stroke::new(2.5, color::HIGHLIGHT)
                    } else {
                        Stroke::new(1.0, Color32::BLACK)
                    };
                    plot_ui.polygon(
                        Polygon::new(sector(start, sweep))
                            .name(&slice.label)
                            .fill_color(fill)
                            .stroke(stroke),
                    );

                    let mid = start + sweep / 2.0;
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(0.6 * mid.cos(), 0.6 * mid.sin()),
                            format!("{:.1}%", slice.share),
                        )
                        .color(Color32::WHITE),
                    );
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(1.15 * mid.cos(), 1.15 * mid.sin()),
                            &slice.label,
                        )
                        .color(Color32::WHITE),
                    );
                    start += sweep;
                }
            });
    }

    fn histogram(&mut self, spec: &HistogramSpec) {
        let bars: Vec<Bar> = spec
            .edges
            .windows(2)
            .zip(&spec.counts)
            .map(|(w, &count)| {
                let width = if w[1] > w[0] { w[1] - w[0] } else { 1.0 };
                Bar::new((w[0] + w[1]) / 2.0, count as f64)
                    .width(width)
                    .fill(color::HISTOGRAM_FILL.gamma_multiply(0.7))
                    .stroke(Stroke::new(1.0, Color32::BLACK))
            })
            .collect();
        let labels: Vec<(f64, usize)> = spec
            .edges
            .windows(2)
            .zip(&spec.counts)
            .map(|(w, &count)| ((w[0] + w[1]) / 2.0, count))
            .collect();

        Plot::new(("histogram", &spec.title))
            .height(CHART_HEIGHT)
            .x_axis_label(&spec.x_label)
            .y_axis_label(&spec.y_label)
            .legend(Legend::default())
            .allow_drag(false)
            .allow_zoom(false)
            .allow_scroll(false)
            .show(self.ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).name("Profit Distribution"));
                for (x, count) in labels {
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(x, count as f64),
                            RichText::new(count.to_string()).strong(),
                        )
                        .anchor(Align2::CENTER_BOTTOM)
                        .color(Color32::WHITE),
                    );
                }
            });
    }
}

/// Company name under an integer tick, nothing between ticks.
fn category_label(labels: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    labels.get(idx as usize).cloned().unwrap_or_default()
}

fn value_anchor(value: f64) -> Align2 {
    if value < 0.0 {
        Align2::CENTER_TOP
    } else {
        Align2::CENTER_BOTTOM
    }
}

/// Closed unit-circle sector starting at `start` radians and spanning `sweep`.
fn sector(start: f64, sweep: f64) -> Vec<[f64; 2]> {
    let steps = ((sweep / TAU) * ARC_SEGMENTS).ceil().max(1.0) as usize;
    let mut points = Vec::with_capacity(steps + 2);
    points.push([0.0, 0.0]);
    for i in 0..=steps {
        let a = start + sweep * i as f64 / steps as f64;
        points.push([a.cos(), a.sin()]);
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_labels_only_on_integer_ticks() {
        let labels = vec!["A".to_string(), "B".to_string()];
        assert_eq!(category_label(&labels, 1.0), "B");
        assert_eq!(category_label(&labels, 0.5), "");
        assert_eq!(category_label(&labels, -1.0), "");
        assert_eq!(category_label(&labels, 5.0), "");
    }

    #[test]
    fn sector_starts_at_centre_and_spans_arc() {
        let points = sector(0.0, TAU / 4.0);
        assert_eq!(points[0], [0.0, 0.0]);
        assert_eq!(points[1], [1.0, 0.0]);
        let last = points.last().unwrap();
        assert!(last[0].abs() < 1e-9);
        assert!((last[1] - 1.0).abs() < 1e-9);
        assert_eq!(points.len(), 32 + 2);
    }
}
