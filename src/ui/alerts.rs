//! Alerts view rendering.
//!
//! Displays the rolling alert log, newest first, with severity coloring.

use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table, TableState},
    Frame,
};

use crate::app::App;

/// Render the Alerts view.
pub fn render(frame: &mut Frame, app: &mut App, area: Rect) {
    let block = Block::default()
        .title(format!(" Alerts ({}) ", app.alerts.len()))
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.border));

    if app.alerts.is_empty() {
        let empty = Paragraph::new("\n  No alerts - all zones within thresholds")
            .block(block)
            .style(Style::default().add_modifier(Modifier::DIM));
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(vec![
        Cell::from("Time"),
        Cell::from("Severity"),
        Cell::from("Message"),
    ])
    .height(1)
    .style(app.theme.header);

    let rows: Vec<Row> = app
        .alerts
        .iter()
        .map(|alert| {
            let severity_style = app.theme.severity_style(alert.severity);
            Row::new(vec![
                Cell::from(alert.time_label.clone()),
                Cell::from(alert.severity.symbol()).style(severity_style),
                Cell::from(alert.message.clone()),
            ])
        })
        .collect();

    let widths = [
        Constraint::Length(9),  // Time
        Constraint::Length(9),  // Severity
        Constraint::Fill(1),    // Message
    ];

    let table = Table::new(rows, widths)
        .header(header)
        .block(block)
        .row_highlight_style(app.theme.selected)
        .highlight_symbol("▶ ");

    // Clamp in case the log shrank since the last scroll
    let selected = app.alert_scroll.min(app.alerts.len() - 1);
    let mut state = TableState::default();
    state.select(Some(selected));

    frame.render_stateful_widget(table, area, &mut state);
}
