use std::f64::consts::TAU;
use std::ops::RangeInclusive;

use eframe::egui::{Color32, RichText, Ui};
use egui_plot::{
    Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoint, Points, Polygon, Text,
};

use crate::color::ColorMap;
use crate::data::aggregate::{share, DashboardSummary, HistogramBucket};
use crate::data::model::NumericField;

const CHART_HEIGHT: f32 = 280.0;
const SKY_BLUE: Color32 = Color32::from_rgb(135, 206, 235);
const ORANGE: Color32 = Color32::from_rgb(255, 165, 0);
const GREEN: Color32 = Color32::from_rgb(0, 128, 0);
const PURPLE: Color32 = Color32::from_rgb(128, 0, 128);
const RED: Color32 = Color32::from_rgb(220, 40, 40);
const POINT_RADIUS: f32 = 3.0;
const MARKER_RADIUS: f32 = 4.0;
const LINE_WIDTH: f32 = 2.0;

// ---------------------------------------------------------------------------
// All charts, top to bottom
// ---------------------------------------------------------------------------

/// Heading of the ranking chart; names the configured size, not how many
/// cars survived the filter.
pub fn ranking_title(top_n: usize) -> String {
    format!("Top {top_n} Most Expensive Cars")
}

/// Render every chart for the current summary.
pub fn dashboard_charts(
    ui: &mut Ui,
    summary: &DashboardSummary,
    fuel_colors: &ColorMap,
    top_n: usize,
) {
    ui.heading("Number of Cars by Company");
    count_bars(ui, "by_company", &summary.by_company, Color32::LIGHT_BLUE);

    ui.heading("Fuel Type Distribution");
    fuel_pie(ui, &summary.by_fuel_type, fuel_colors);

    ui.heading("Horsepower Distribution");
    histogram(ui, "hp_histogram", &summary.horsepower_histogram);

    ui.heading("Price vs HorsePower");
    scatter(
        ui,
        "price_vs_hp",
        &summary.price_vs_horsepower,
        NumericField::Price,
        Color32::LIGHT_BLUE,
        false,
    );

    ui.heading(ranking_title(top_n));
    ranking(ui, &summary.most_expensive);

    ui.heading("Seats Distribution");
    count_bars(ui, "by_seats", &summary.by_seats, GREEN);

    ui.heading("Average Price by Fuel Type");
    category_line(ui, &summary.mean_price_by_fuel);

    ui.heading("Acceleration (0-100 km/h) vs HorsePower");
    scatter(
        ui,
        "accel_vs_hp",
        &summary.acceleration_vs_horsepower,
        NumericField::Acceleration,
        RED,
        true,
    );
}

fn empty_notice(ui: &mut Ui) {
    ui.label(RichText::new("No data for the current filters.").italics());
    ui.add_space(8.0);
}

/// Axis labels for charts whose x positions are category indices.
fn category_formatter(labels: Vec<String>) -> impl Fn(GridMark, &RangeInclusive<f64>) -> String {
    move |mark, _range| {
        let i = mark.value.round();
        if (mark.value - i).abs() > 1e-6 || i < 0.0 {
            return String::new();
        }
        labels.get(i as usize).cloned().unwrap_or_default()
    }
}

// ---------------------------------------------------------------------------
// Individual charts
// ---------------------------------------------------------------------------

fn count_bars(ui: &mut Ui, id: &str, counts: &[(String, usize)], color: Color32) {
    if counts.is_empty() {
        return empty_notice(ui);
    }
    let bars: Vec<Bar> = counts
        .iter()
        .enumerate()
        .map(|(i, (label, count))| Bar::new(i as f64, *count as f64).name(label).width(0.7))
        .collect();
    let labels = counts.iter().map(|(l, _)| l.clone()).collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .y_axis_label("Number of Cars")
        .x_axis_formatter(category_formatter(labels))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(color));
        });
}

/// Donut chart: each slice is a run of thin convex quads, pulled slightly out
/// from the centre, with a "label / percent" annotation.
fn fuel_pie(ui: &mut Ui, counts: &[(String, usize)], colors: &ColorMap) {
    const HOLE: f64 = 0.3;
    const PULL: f64 = 0.05;
    const STEP: f64 = TAU / 180.0;

    if counts.is_empty() {
        return empty_notice(ui);
    }

    let slices = share(counts);
    Plot::new("fuel_pie")
        .height(CHART_HEIGHT)
        .data_aspect(1.0)
        .show_axes(false)
        .show_grid(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .legend(Legend::default())
        .show(ui, |plot_ui| {
            let mut start = 0.0_f64;
            for (label, _, frac) in &slices {
                let sweep = frac * TAU;
                let mid = start + sweep / 2.0;
                let (dx, dy) = (PULL * mid.cos(), PULL * mid.sin());
                let color = colors.color_for(label);

                let steps = ((sweep / STEP).ceil() as usize).max(1);
                for k in 0..steps {
                    let a0 = start + sweep * k as f64 / steps as f64;
                    let a1 = start + sweep * (k + 1) as f64 / steps as f64;
                    let quad = vec![
                        [dx + HOLE * a0.cos(), dy + HOLE * a0.sin()],
                        [dx + a0.cos(), dy + a0.sin()],
                        [dx + a1.cos(), dy + a1.sin()],
                        [dx + HOLE * a1.cos(), dy + HOLE * a1.sin()],
                    ];
                    plot_ui.polygon(Polygon::new(quad).fill_color(color).name(label));
                }

                let r = 1.2;
                plot_ui.text(Text::new(
                    PlotPoint::new(r * mid.cos(), r * mid.sin()),
                    format!("{label}\n{:.1}%", frac * 100.0),
                ));
                start += sweep;
            }
        });
}

fn histogram(ui: &mut Ui, id: &str, buckets: &[HistogramBucket]) {
    if buckets.is_empty() {
        return empty_notice(ui);
    }
    let bars: Vec<Bar> = buckets
        .iter()
        .map(|b| {
            Bar::new((b.low + b.high) / 2.0, b.count as f64)
                .width(b.high - b.low)
                .name(format!("{:.0}–{:.0}", b.low, b.high))
        })
        .collect();

    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label(NumericField::Horsepower.to_string())
        .y_axis_label("Number of Cars")
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(SKY_BLUE));
        });
}

/// Scatter of `[horsepower, y]`. With `invert_y` smaller values are drawn
/// higher (faster cars on top for acceleration).
fn scatter(
    ui: &mut Ui,
    id: &str,
    points: &[[f64; 2]],
    y_field: NumericField,
    color: Color32,
    invert_y: bool,
) {
    if points.is_empty() {
        return empty_notice(ui);
    }
    let sign = if invert_y { -1.0 } else { 1.0 };
    let series: Vec<[f64; 2]> = points.iter().map(|&[x, y]| [x, sign * y]).collect();
    let translucent = Color32::from_rgba_unmultiplied(color.r(), color.g(), color.b(), 153);

    Plot::new(id)
        .height(CHART_HEIGHT)
        .x_axis_label(NumericField::Horsepower.to_string())
        .y_axis_label(y_field.to_string())
        .y_axis_formatter(move |mark, _range| {
            let decimals = if mark.step_size >= 1.0 { 0 } else { 1 };
            // + 0.0 turns -0.0 into 0.0
            format!("{:.*}", decimals, sign * mark.value + 0.0)
        })
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.points(Points::new(series).radius(POINT_RADIUS).color(translucent));
        });
}

/// Horizontal bars, most expensive at the top.
fn ranking(ui: &mut Ui, cars: &[(String, f64)]) {
    if cars.is_empty() {
        return empty_notice(ui);
    }
    let bars: Vec<Bar> = cars
        .iter()
        .enumerate()
        .map(|(i, (name, price))| Bar::new(-(i as f64), *price).name(name).width(0.7))
        .collect();
    let labels: Vec<String> = cars.iter().map(|(n, _)| n.clone()).collect();
    let by_rank = category_formatter(labels);

    Plot::new("most_expensive")
        .height(CHART_HEIGHT)
        .x_axis_label(NumericField::Price.to_string())
        .y_axis_formatter(move |mark, range| {
            by_rank(
                GridMark {
                    value: -mark.value,
                    ..mark
                },
                range,
            )
        })
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new(bars).color(ORANGE).horizontal());
        });
}

/// Line with markers over category positions.
fn category_line(ui: &mut Ui, values: &[(String, f64)]) {
    if values.is_empty() {
        return empty_notice(ui);
    }
    let series: Vec<[f64; 2]> = values
        .iter()
        .enumerate()
        .map(|(i, (_, v))| [i as f64, *v])
        .collect();
    let labels = values.iter().map(|(l, _)| l.clone()).collect();

    Plot::new("mean_price_by_fuel")
        .height(CHART_HEIGHT)
        .x_axis_label("Fuel Type")
        .y_axis_label("Average Price ($)")
        .x_axis_formatter(category_formatter(labels))
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.line(Line::new(series.clone()).color(PURPLE).width(LINE_WIDTH));
            plot_ui.points(Points::new(series).radius(MARKER_RADIUS).color(PURPLE));
        });
}
