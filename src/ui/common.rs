//! Common UI components shared across views.
//!
//! This module contains the header bar, tab bar, status bar, and help overlay.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Tabs},
    Frame,
};

use crate::app::{App, View};
use crate::data::MoistureStatus;

/// Render the header bar with the system overview.
///
/// Displays: connection indicator, zone counts by status, pump state,
/// active zone count, session water total.
pub fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let Some(ref data) = app.data else {
        let line = Line::from(vec![
            Span::styled(
                " IRRIWATCH ",
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw("| Waiting for controller..."),
        ]);
        frame.render_widget(Paragraph::new(line), area);
        return;
    };

    // Count zones by watering status
    let mut optimal = 0;
    let mut dry = 0;
    for zone in &data.zones {
        match zone.status {
            MoistureStatus::Optimal => optimal += 1,
            MoistureStatus::NeedsWater => dry += 1,
            MoistureStatus::Unknown => {}
        }
    }

    // Connection indicator
    let (status_icon, status_style) = if app.online() {
        ("●", Style::default().fg(app.theme.optimal))
    } else {
        ("●", Style::default().fg(app.theme.warning))
    };

    let pump = if data.pump_running { "Running" } else { "Idle" };
    let pump_style = if data.pump_running {
        Style::default().fg(app.theme.highlight).add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };

    let line = Line::from(vec![
        Span::styled(format!(" {} ", status_icon), status_style),
        Span::styled("IRRIWATCH ", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("│ "),
        Span::styled(format!("{}", optimal), Style::default().fg(app.theme.optimal)),
        Span::raw(" ok "),
        if dry > 0 {
            Span::styled(
                format!("{}", dry),
                Style::default().fg(app.theme.warning).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled("0", Style::default().add_modifier(Modifier::DIM))
        },
        Span::raw(" dry │ pump: "),
        Span::styled(pump, pump_style),
        Span::raw(" │ "),
        Span::styled(
            format!("{}", data.active_zones.len()),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::raw(" active │ "),
        Span::raw(format!("water: {}", format_water(app.session_water))),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}

/// Format a water volume in ml for display (e.g. 1234.0 -> "1.2 L").
pub fn format_water(ml: f64) -> String {
    if ml >= 1000.0 {
        format!("{:.1} L", ml / 1000.0)
    } else {
        format!("{:.0} ml", ml)
    }
}

/// Render the tab bar showing available views.
///
/// Highlights the currently active view.
pub fn render_tabs(frame: &mut Frame, app: &App, area: Rect) {
    let titles: Vec<Line> = vec![
        Line::from(" 1:Zones "),
        Line::from(" 2:Charts "),
        Line::from(" 3:Alerts "),
    ];

    let selected = match app.current_view {
        View::Zones => 0,
        View::Charts => 1,
        View::Alerts => 2,
    };

    let tabs = Tabs::new(titles)
        .select(selected)
        .style(app.theme.tab_inactive)
        .highlight_style(app.theme.tab_active)
        .divider("|");

    frame.render_widget(tabs, area);
}

/// Render the status bar at the bottom.
///
/// Shows: data source, time since last update, available controls.
/// Also displays temporary status messages and errors.
pub fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    // Check for temporary status message first
    if let Some(msg) = app.get_status_message() {
        let paragraph =
            Paragraph::new(format!(" {} ", msg)).style(Style::default().fg(app.theme.highlight));
        frame.render_widget(paragraph, area);
        return;
    }

    let status = if let Some(ref data) = app.data {
        let elapsed = data.last_updated.elapsed();

        // Context-sensitive controls
        let controls = match app.current_view {
            View::Zones => "↑↓:select Enter:detail Tab:switch e:export ?:help q:quit",
            View::Charts => "Tab:switch e:export ?:help q:quit",
            View::Alerts => "↑↓:scroll Tab:switch e:export ?:help q:quit",
        };

        format!(
            " {} | Updated {:.1}s ago | {}",
            app.source_description(),
            elapsed.as_secs_f64(),
            controls,
        )
    } else if let Some(ref err) = app.load_error {
        format!(" Error: {} | q:quit r:retry", err)
    } else {
        format!(" {} | Waiting for data... | q:quit", app.source_description())
    };

    let paragraph = Paragraph::new(status).style(Style::default().add_modifier(Modifier::DIM));

    frame.render_widget(paragraph, area);
}

/// Render the help overlay with keyboard shortcuts.
///
/// Displayed as a centered modal on top of the current view.
pub fn render_help(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = vec![
        Line::from(vec![Span::styled("Keyboard Shortcuts", app.theme.header)]),
        Line::from(""),
        Line::from(vec![Span::styled(
            " Navigation",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  ←/→ h/l     Switch views"),
        Line::from("  ↑/↓ j/k     Navigate list"),
        Line::from("  1/2/3       Jump to view"),
        Line::from("  Home/End    Jump to first/last"),
        Line::from("  Enter       Zone detail"),
        Line::from("  Esc         Go back"),
        Line::from(""),
        Line::from(vec![Span::styled(
            " General",
            Style::default().add_modifier(Modifier::BOLD),
        )]),
        Line::from("  r         Reload data"),
        Line::from("  e         Export to JSON"),
        Line::from("  q         Quit"),
        Line::from(""),
        Line::from(vec![Span::styled(
            "Press any key to close",
            Style::default().add_modifier(Modifier::DIM),
        )]),
    ];

    let block = Block::default()
        .title(" Help ")
        .borders(Borders::ALL)
        .border_type(app.theme.border_type)
        .border_style(Style::default().fg(app.theme.highlight));

    let paragraph = Paragraph::new(help_text).block(block);

    // Center the help overlay - responsive to terminal size
    let help_width = 42u16.min(area.width.saturating_sub(4));
    let help_height = 20u16.min(area.height.saturating_sub(2));
    let x = area.x + (area.width.saturating_sub(help_width)) / 2;
    let y = area.y + (area.height.saturating_sub(help_height)) / 2;
    let help_area = Rect::new(x, y, help_width, help_height);

    // Clear the area behind the help
    frame.render_widget(ratatui::widgets::Clear, help_area);
    frame.render_widget(paragraph, help_area);
}
