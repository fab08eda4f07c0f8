//! Zones view rendering.
//!
//! Displays a table of all zones with their latest readings, a moisture
//! level bar, and the watering status badge.

use ratatui::{
    layout::{Constraint, Rect},
    widgets::{Block, Borders, Cell, Row, Table, TableState},
    Frame,
};

use crate::app::App;

/// Width of the moisture level bar in characters.
const BAR_WIDTH: usize = 10;

/// Render the Zones view showing all zones in a table.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let Some(ref data) = app.data else {
        let block = Block::default()
            .title(" Zones ")
            .borders(Borders::ALL)
            .border_type(app.theme.border_type);
        let empty = ratatui::widgets::Paragraph::new("\n  Waiting for sensor data...")
            .block(block)
            .style(ratatui::style::Style::default().add_modifier(ratatui::style::Modifier::DIM));
        frame.render_widget(empty, area);
        return;
    };

    let header = Row::new(vec![
        Cell::from("Zone"),
        Cell::from("Moisture"),
        Cell::from("Level"),
        Cell::from("Temp"),
        Cell::from("Humidity"),
        Cell::from("Water"),
        Cell::from("Predicted"),
        Cell::from("Status"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = data
        .zones
        .iter()
        .map(|zone| {
            let name = app
                .zone_names
                .get(zone.id)
                .cloned()
                .unwrap_or_else(|| format!("Zone {}", zone.id + 1));
            let r = zone.reading;

            let active = data.active_zones.contains(&(zone.id as u64));
            let name_cell = if active {
                Cell::from(format!("{} ◂", name))
                    .style(ratatui::style::Style::default().fg(app.theme.highlight))
            } else {
                Cell::from(name)
            };

            Row::new(vec![
                name_cell,
                Cell::from(format_pct(r.soil_moisture)),
                Cell::from(moisture_bar(r.soil_moisture)),
                Cell::from(format_degrees(r.temperature)),
                Cell::from(format_pct(r.humidity)),
                Cell::from(format_ml(r.water_applied)),
                Cell::from(format_ml(r.water_prediction)),
                Cell::from(zone.status.label()).style(app.theme.status_style(zone.status)),
            ])
        })
        .collect();

    let widths = [
        Constraint::Fill(2),                   // Zone name
        Constraint::Length(9),                 // Moisture
        Constraint::Length(BAR_WIDTH as u16),  // Level bar
        Constraint::Length(8),                 // Temp
        Constraint::Length(9),                 // Humidity
        Constraint::Length(9),                 // Water
        Constraint::Length(10),                // Predicted
        Constraint::Min(11),                   // Status
    ];

    let title = format!(" Zones ({}) ", data.zones.len());

    let table = Table::new(rows, widths)
        .header(header)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_type(app.theme.border_type)
                .border_style(ratatui::style::Style::default().fg(app.theme.border)),
        )
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    let mut state = TableState::default();
    state.select(Some(app.selected_zone));

    frame.render_stateful_widget(table, area, &mut state);
}

/// Render a moisture percentage as a fixed-width block bar.
pub fn moisture_bar(moisture: Option<f64>) -> String {
    let Some(pct) = moisture else {
        return " ".repeat(BAR_WIDTH);
    };
    let filled = ((pct / 100.0) * BAR_WIDTH as f64).round().clamp(0.0, BAR_WIDTH as f64) as usize;
    let mut bar = "█".repeat(filled);
    bar.push_str(&"░".repeat(BAR_WIDTH - filled));
    bar
}

pub fn format_pct(value: Option<f64>) -> String {
    value.map(|v| format!("{:.1}%", v)).unwrap_or_else(|| "--".to_string())
}

pub fn format_degrees(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1}°C", v))
        .unwrap_or_else(|| "--".to_string())
}

pub fn format_ml(value: Option<f64>) -> String {
    value
        .map(|v| format!("{:.1} ml", v))
        .unwrap_or_else(|| "--".to_string())
}
