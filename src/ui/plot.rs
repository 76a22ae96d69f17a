use eframe::egui::{Color32, RichText, Stroke, Ui};
use egui_plot::{Bar, BarChart, GridMark, MarkerShape, Plot, PlotPoint, PlotPoints, Points, Polygon, Text};

use crate::charts::bar::BarChartSpec;
use crate::charts::bubble::BubbleChartSpec;
use crate::charts::gauge::{GaugeChartSpec, RING_HOLE};
use crate::color::{to_color32, ColorScale, GAUGE_PALETTE, NEEDLE_COLOR};

/// Bubbles wider than this are capped so one dominant OTU cannot cover the plot.
const MAX_BUBBLE_RADIUS: f32 = 60.0;
/// Vertices per degree when tessellating ring segments.
const ARC_STEPS_PER_DEGREE: f64 = 0.5;

// ---------------------------------------------------------------------------
// Bar chart
// ---------------------------------------------------------------------------

/// Horizontal bars, top entry last, OTU names on the y axis.
pub fn bar_chart(ui: &mut Ui, spec: &BarChartSpec, height: f32) {
    ui.label(RichText::new(&spec.layout.title).strong());

    let trace = &spec.trace;
    let bars: Vec<Bar> = trace
        .x
        .iter()
        .enumerate()
        .map(|(i, &value)| {
            let label = trace.text.get(i).cloned().unwrap_or_default();
            Bar::new(i as f64, value).name(label).width(0.7)
        })
        .collect();

    let ticks = trace.y.clone();
    let chart = BarChart::new(bars)
        .horizontal()
        .color(to_color32(NEEDLE_COLOR))
        .element_formatter(Box::new(|bar: &Bar, _chart: &BarChart| {
            format!("{}\n{}", bar.value, bar.name)
        }));

    Plot::new("bar_chart")
        .height(height)
        .y_axis_formatter(move |mark: GridMark, _range| tick_label(&ticks, mark.value))
        .show_grid([true, false])
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(chart);
        });
}

/// Name of the bar at integer position `value`, blank between bars.
fn tick_label(ticks: &[String], value: f64) -> String {
    let idx = value.round();
    if (value - idx).abs() > 1e-6 || idx < 0.0 {
        return String::new();
    }
    ticks.get(idx as usize).cloned().unwrap_or_default()
}

// ---------------------------------------------------------------------------
// Bubble chart
// ---------------------------------------------------------------------------

/// One filled circle per OTU, sized by count and coloured by OTU id.
pub fn bubble_chart(ui: &mut Ui, spec: &BubbleChartSpec, height: f32) {
    let trace = &spec.trace;
    let scale = ColorScale::spanning(trace.marker.color.iter().map(|&c| f64::from(c)));
    let x_title = spec.layout.xaxis.title.clone().unwrap_or_default();
    if spec.is_empty() {
        ui.label("No OTUs recorded for this sample.");
    }

    Plot::new("bubble_chart")
        .height(height)
        .x_axis_label(x_title)
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for i in 0..spec.len() {
                let x = f64::from(trace.x[i]);
                let y = trace.y[i];
                let radius = (trace.marker.size[i] / 2.0) as f32;
                let color = scale.color_for(f64::from(trace.marker.color[i]));

                let points = Points::new(vec![[x, y]])
                    .name(&trace.text[i])
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(radius.clamp(1.0, MAX_BUBBLE_RADIUS))
                    .color(color.gamma_multiply(0.8));

                plot_ui.points(points);
            }
        });
}

// ---------------------------------------------------------------------------
// Gauge
// ---------------------------------------------------------------------------

/// Half-donut dial with needle and centre marker.
pub fn gauge_chart(ui: &mut Ui, spec: &GaugeChartSpec, height: f32) {
    ui.label(RichText::new("Belly Button Washing Frequency").strong());
    ui.label("Scrubs per Week");

    let ring = &spec.ring;
    let spans = ring.segment_spans();
    let filler = ring.filler_index();
    let needle_color = to_color32(NEEDLE_COLOR);
    let [x_range, y_range] = [&spec.layout.xaxis.range, &spec.layout.yaxis.range]
        .map(|r| r.unwrap_or([-1.0, 1.0]));

    Plot::new("gauge_chart")
        .height(height)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .show_x(false)
        .show_y(false)
        .include_x(x_range[0])
        .include_x(x_range[1])
        .include_y(y_range[0])
        .include_y(y_range[1])
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            for (i, &(start, end)) in spans.iter().enumerate() {
                if i == filler {
                    continue;
                }
                let color = GAUGE_PALETTE
                    .get(i)
                    .copied()
                    .map(to_color32)
                    .unwrap_or(Color32::GRAY);
                let label = ring.labels.get(i).copied().unwrap_or_default();

                plot_ui.polygon(
                    Polygon::new(PlotPoints::new(annulus_sector(RING_HOLE, 1.0, start, end)))
                        .name(label)
                        .fill_color(color)
                        .stroke(Stroke::new(1.0, Color32::WHITE)),
                );

                let text = ring.text.get(i).copied().unwrap_or_default();
                let mid = ((start + end) / 2.0).to_radians();
                let r = (1.0 + RING_HOLE) / 2.0;
                plot_ui.text(
                    Text::new(PlotPoint::new(r * mid.cos(), r * mid.sin()), RichText::new(text).size(16.0))
                        .color(contrast_text(color)),
                );
            }

            plot_ui.polygon(
                Polygon::new(PlotPoints::new(spec.needle.polygon().to_vec()))
                    .fill_color(needle_color)
                    .stroke(Stroke::new(1.0, needle_color))
                    .allow_hover(false),
            );

            plot_ui.points(
                Points::new(vec![[spec.center.x[0], spec.center.y[0]]])
                    .name(format!("{}: {}", spec.center.name, spec.center.text))
                    .shape(MarkerShape::Circle)
                    .filled(true)
                    .radius(spec.center.marker.size as f32 / 4.0)
                    .color(needle_color),
            );
        });
}

/// Closed outline of a ring sector between two standard-position angles.
fn annulus_sector(inner: f64, outer: f64, start_deg: f64, end_deg: f64) -> Vec<[f64; 2]> {
    let steps = (((end_deg - start_deg).abs() * ARC_STEPS_PER_DEGREE).ceil() as usize).max(1);
    let arc = |r: f64| {
        (0..=steps).map(move |k| {
            let a = (start_deg + (end_deg - start_deg) * k as f64 / steps as f64).to_radians();
            [r * a.cos(), r * a.sin()]
        })
    };

    let mut pts: Vec<[f64; 2]> = arc(outer).collect();
    let mut inner_pts: Vec<[f64; 2]> = arc(inner).collect();
    inner_pts.reverse();
    pts.extend(inner_pts);
    pts
}

/// Black or white, whichever reads better on `bg`.
fn contrast_text(bg: Color32) -> Color32 {
    let luma = 0.299 * bg.r() as f32 + 0.587 * bg.g() as f32 + 0.114 * bg.b() as f32;
    if luma > 140.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}
