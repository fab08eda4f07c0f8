//! Zone detail overlay rendering.
//!
//! Displays a modal overlay with the selected zone's full reading and
//! how it sits against the configured thresholds.

use ratatui::{
    layout::{Constraint, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::app::App;
use crate::ui::zones::{format_degrees, format_ml, format_pct, moisture_bar};

/// Minimum width required for the detail overlay to render properly.
const MIN_OVERLAY_WIDTH: u16 = 46;
/// Minimum height required for the detail overlay to render properly.
const MIN_OVERLAY_HEIGHT: u16 = 14;

/// Render the zone detail as a modal overlay.
pub fn render_overlay(frame: &mut Frame, app: &App, area: Rect) {
    // Skip rendering if terminal is too small for the overlay
    if area.width < MIN_OVERLAY_WIDTH || area.height < MIN_OVERLAY_HEIGHT {
        return;
    }

    let Some(ref data) = app.data else {
        return;
    };
    let Some(zone) = data.zones.get(app.selected_zone) else {
        return;
    };

    let name = app
        .zone_names
        .get(zone.id)
        .cloned()
        .unwrap_or_else(|| format!("Zone {}", zone.id + 1));

    // Center the overlay
    let overlay_width = 60u16.min(area.width.saturating_sub(4));
    let overlay_height = 16u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(overlay_width)) / 2;
    let y = area.y + (area.height.saturating_sub(overlay_height)) / 2;
    let overlay_area = Rect::new(x, y, overlay_width, overlay_height);

    // Clear the area behind the overlay
    frame.render_widget(Clear, overlay_area);

    let chunks = Layout::vertical([
        Constraint::Min(13),   // Content
        Constraint::Length(1), // Footer
    ])
    .split(overlay_area);

    let status_style = app.theme.status_style(zone.status);
    let r = zone.reading;
    let watering = data.active_zones.contains(&(zone.id as u64));

    let lines = vec![
        Line::from(vec![
            Span::styled(format!(" {} ", name), Style::default().add_modifier(Modifier::BOLD)),
            Span::styled(
                format!("[{}]", zone.status.label()),
                status_style.add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw("  Soil Moisture   "),
            Span::styled(
                format!("{:<8}", format_pct(r.soil_moisture)),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::styled(moisture_bar(r.soil_moisture), Style::default().fg(app.theme.humidity)),
        ]),
        Line::from(vec![
            Span::raw("  Temperature     "),
            Span::styled(
                format_degrees(r.temperature),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw("  Humidity        "),
            Span::styled(format_pct(r.humidity), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(vec![
            Span::raw("  Water Applied   "),
            Span::styled(
                format_ml(r.water_applied),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::raw("  AI Prediction   "),
            Span::styled(
                format_ml(r.water_prediction),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(""),
        Line::from(vec![
            Span::raw("  Watering now: "),
            if watering {
                Span::styled("yes", Style::default().fg(app.theme.highlight))
            } else {
                Span::styled("no", Style::default().add_modifier(Modifier::DIM))
            },
        ]),
        Line::from(Span::styled(
            format!(
                "  Needs water below {:.0}% moisture; alerts above {:.0}°C",
                app.thresholds.moisture_low, app.thresholds.temp_high
            ),
            Style::default().add_modifier(Modifier::DIM),
        )),
    ];

    let block = Block::default()
        .title(" Zone Detail ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    frame.render_widget(Paragraph::new(lines).block(block), chunks[0]);

    let footer = Paragraph::new(Line::from(vec![Span::styled(
        " ↑↓: other zones · Esc to close ",
        Style::default().add_modifier(Modifier::DIM),
    )]));
    frame.render_widget(footer, chunks[1]);
}
