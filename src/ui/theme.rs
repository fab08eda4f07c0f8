//! Theme configuration for the TUI.
//!
//! Supports light and dark themes with automatic terminal detection.

use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::block::BorderType;

use crate::data::{MoistureStatus, Severity};
use crate::source::ZONE_COUNT;

/// Color and style theme for the TUI.
///
/// Use [`Theme::auto_detect()`] for automatic theme selection based on
/// terminal background, or [`Theme::dark()`]/[`Theme::light()`] explicitly.
#[derive(Debug, Clone)]
pub struct Theme {
    /// Accent color for highlights and active elements.
    pub highlight: Color,
    /// Color for warning-level alerts and dry zones.
    pub warning: Color,
    /// Color for informational alerts.
    pub info: Color,
    /// Color for zones at optimal moisture.
    pub optimal: Color,
    /// Color for zones with no data.
    pub unknown: Color,
    /// Color for borders and separators.
    pub border: Color,
    /// Style for header rows in tables.
    pub header: Style,
    /// Style for selected/highlighted rows.
    pub selected: Style,
    /// Style for the active tab.
    pub tab_active: Style,
    /// Style for inactive tabs.
    pub tab_inactive: Style,
    /// Border style (rounded, plain, etc.).
    pub border_type: BorderType,
    /// One chart line color per zone.
    pub zone_colors: [Color; ZONE_COUNT],
    /// Chart line color for temperature.
    pub temperature: Color,
    /// Chart line color for humidity.
    pub humidity: Color,
}

impl Theme {
    /// Create a dark theme suitable for dark terminal backgrounds.
    pub fn dark() -> Self {
        Self {
            highlight: Color::Cyan,
            warning: Color::Yellow,
            info: Color::Cyan,
            optimal: Color::Green,
            unknown: Color::Gray,
            border: Color::Gray,
            header: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::Gray),
            border_type: BorderType::Rounded,
            zone_colors: [Color::Blue, Color::Green, Color::Yellow, Color::Red],
            temperature: Color::Red,
            humidity: Color::Blue,
        }
    }

    /// Create a light theme suitable for light terminal backgrounds.
    pub fn light() -> Self {
        Self {
            highlight: Color::Blue,
            warning: Color::Yellow,
            info: Color::Blue,
            optimal: Color::Green,
            unknown: Color::DarkGray,
            border: Color::DarkGray,
            header: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            selected: Style::default().bg(Color::LightBlue).add_modifier(Modifier::BOLD),
            tab_active: Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD),
            tab_inactive: Style::default().fg(Color::DarkGray),
            border_type: BorderType::Rounded,
            zone_colors: [Color::Blue, Color::Green, Color::Magenta, Color::Red],
            temperature: Color::Red,
            humidity: Color::Blue,
        }
    }

    /// Auto-detect based on terminal background
    pub fn auto_detect() -> Self {
        // Use terminal-light crate to detect background luminance
        match terminal_light::luma() {
            Ok(luma) if luma > 0.5 => Self::light(),
            _ => Self::dark(),
        }
    }

    /// Get style for a zone's watering status
    pub fn status_style(&self, status: MoistureStatus) -> Style {
        match status {
            MoistureStatus::Optimal => Style::default().fg(self.optimal),
            MoistureStatus::NeedsWater => {
                Style::default().fg(self.warning).add_modifier(Modifier::BOLD)
            }
            MoistureStatus::Unknown => Style::default().fg(self.unknown).add_modifier(Modifier::DIM),
        }
    }

    /// Get style for an alert severity
    pub fn severity_style(&self, severity: Severity) -> Style {
        match severity {
            Severity::Warning => Style::default().fg(self.warning).add_modifier(Modifier::BOLD),
            Severity::Info => Style::default().fg(self.info),
        }
    }

    /// Chart line color for a zone
    pub fn zone_color(&self, zone: usize) -> Color {
        self.zone_colors.get(zone).copied().unwrap_or(self.highlight)
    }
}
