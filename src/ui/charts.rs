//! Charts view rendering.
//!
//! Draws the two rolling time-series charts from the live buffers: soil
//! moisture for every zone, and temperature/humidity for the reference
//! zone. Gaps in a series are simply not plotted, so a missing reading
//! shows as a break instead of a dip to zero.

use std::collections::VecDeque;

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType, Paragraph},
    Frame,
};

use crate::app::App;
use crate::data::charts::MAX_POINTS;
use crate::source::ZONE_COUNT;

/// Render the Charts view: moisture on top, climate below.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let chunks = Layout::vertical([
        Constraint::Percentage(55), // Soil moisture, all zones
        Constraint::Percentage(45), // Temperature / humidity, zone 0
    ])
    .split(area);

    render_moisture_chart(frame, app, chunks[0]);
    render_climate_chart(frame, app, chunks[1]);
}

fn render_moisture_chart(frame: &mut Frame, app: &App, area: Rect) {
    let chart_block = Block::default()
        .title(" Soil Moisture ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let points: Vec<Vec<(f64, f64)>> = (0..ZONE_COUNT)
        .map(|zone| {
            app.charts
                .moisture
                .zone(zone)
                .map(|series| series.points())
                .unwrap_or_default()
        })
        .collect();

    if points.iter().all(Vec::is_empty) {
        render_empty(frame, chart_block, area);
        return;
    }

    let datasets: Vec<Dataset> = points
        .iter()
        .enumerate()
        .filter(|(_, p)| !p.is_empty())
        .map(|(zone, p)| {
            let name = app
                .zone_names
                .get(zone)
                .cloned()
                .unwrap_or_else(|| format!("Zone {}", zone + 1));
            Dataset::default()
                .name(name)
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(app.theme.zone_color(zone)))
                .data(p)
        })
        .collect();

    let chart = Chart::new(datasets)
        .block(chart_block)
        .x_axis(time_axis(app, &app.charts.moisture.labels))
        .y_axis(
            Axis::default()
                .title("Moisture %")
                .style(Style::default().fg(app.theme.border))
                .bounds([0.0, 100.0])
                .labels(["0", "50", "100"]),
        );

    frame.render_widget(chart, area);
}

fn render_climate_chart(frame: &mut Frame, app: &App, area: Rect) {
    let name = app
        .zone_names
        .first()
        .cloned()
        .unwrap_or_else(|| "Zone 1".to_string());
    let chart_block = Block::default()
        .title(format!(" Temperature / Humidity ({}) ", name))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    let temperature = app.charts.climate.temperature.points();
    let humidity = app.charts.climate.humidity.points();

    if temperature.is_empty() && humidity.is_empty() {
        render_empty(frame, chart_block, area);
        return;
    }

    let mut datasets = Vec::new();
    if !temperature.is_empty() {
        datasets.push(
            Dataset::default()
                .name("Temperature (°C)")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(app.theme.temperature))
                .data(&temperature),
        );
    }
    if !humidity.is_empty() {
        datasets.push(
            Dataset::default()
                .name("Humidity (%)")
                .marker(symbols::Marker::Braille)
                .graph_type(GraphType::Line)
                .style(Style::default().fg(app.theme.humidity))
                .data(&humidity),
        );
    }

    let chart = Chart::new(datasets)
        .block(chart_block)
        .x_axis(time_axis(app, &app.charts.climate.labels))
        .y_axis(
            Axis::default()
                .title("°C / %RH")
                .style(Style::default().fg(app.theme.border))
                .bounds([0.0, 100.0])
                .labels(["0", "50", "100"]),
        );

    frame.render_widget(chart, area);
}

/// Build the shared time axis from a chart's label track.
///
/// Bounds span the full window so fresh sessions grow rightward instead
/// of rescaling on every point.
fn time_axis<'a>(app: &App, labels: &'a VecDeque<String>) -> Axis<'a> {
    let axis = Axis::default()
        .style(Style::default().fg(app.theme.border))
        .bounds([0.0, (MAX_POINTS - 1) as f64]);

    match labels.len() {
        0 => axis,
        1 => axis.labels([labels[0].as_str()]),
        2 => axis.labels([labels[0].as_str(), labels[1].as_str()]),
        n => axis.labels([
            labels[0].as_str(),
            labels[n / 2].as_str(),
            labels[n - 1].as_str(),
        ]),
    }
}

fn render_empty(frame: &mut Frame, block: Block, area: Rect) {
    let empty = Paragraph::new("\n  No chart data yet")
        .block(block)
        .style(Style::default().add_modifier(Modifier::DIM));
    frame.render_widget(empty, area);
}
