//! Application state and navigation logic.

use std::time::{Duration, Instant};

use anyhow::Result;
use chrono::Local;

use crate::data::{
    AlertLog, AlignedSeries, DashboardData, LiveCharts, MoistureStatus, Thresholds,
};
use crate::source::{DataSource, ZONE_COUNT};
use crate::ui::Theme;

/// Readings older than this mark the controller as offline.
const STALE_AFTER: Duration = Duration::from_secs(90);

/// The current view/tab in the TUI.
///
/// Zone detail is shown as an overlay (controlled by
/// `App::show_detail_overlay`) rather than as a separate view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    /// Per-zone readings and watering status.
    Zones,
    /// Rolling soil moisture and climate charts.
    Charts,
    /// The alert log.
    Alerts,
}

impl View {
    /// Cycle to the next view.
    pub fn next(self) -> Self {
        match self {
            View::Zones => View::Charts,
            View::Charts => View::Alerts,
            View::Alerts => View::Zones,
        }
    }

    /// Cycle to the previous view.
    pub fn prev(self) -> Self {
        match self {
            View::Zones => View::Alerts,
            View::Charts => View::Zones,
            View::Alerts => View::Charts,
        }
    }

    /// Returns the display label for this view.
    pub fn label(&self) -> &'static str {
        match self {
            View::Zones => "Zones",
            View::Charts => "Charts",
            View::Alerts => "Alerts",
        }
    }
}

/// Main application state.
pub struct App {
    pub running: bool,
    pub current_view: View,
    pub show_help: bool,
    pub show_detail_overlay: bool,

    // Data source
    source: Box<dyn DataSource>,
    pub data: Option<DashboardData>,
    pub charts: LiveCharts,
    pub alerts: AlertLog,
    pub load_error: Option<String>,
    pub thresholds: Thresholds,
    pub zone_names: Vec<String>,
    /// Water applied across all updates received this session, in ml.
    pub session_water: f64,

    // Navigation state
    pub selected_zone: usize,
    pub alert_scroll: usize,

    // UI
    pub theme: Theme,

    // Status message (temporary feedback)
    pub status_message: Option<(String, Instant)>,
}

impl App {
    /// Create a new App with the given data source, thresholds and zone names.
    pub fn new(source: Box<dyn DataSource>, thresholds: Thresholds, zone_names: Vec<String>) -> Self {
        Self {
            running: true,
            current_view: View::Zones,
            show_help: false,
            show_detail_overlay: false,
            source,
            data: None,
            charts: LiveCharts::new(),
            alerts: AlertLog::new(),
            load_error: None,
            thresholds,
            zone_names,
            session_water: 0.0,
            selected_zone: 0,
            alert_scroll: 0,
            theme: Theme::auto_detect(),
            status_message: None,
        }
    }

    /// Returns a description of the current data source.
    pub fn source_description(&self) -> &str {
        self.source.description()
    }

    /// Seed the chart buffers from aligned historical data.
    pub fn seed_history(&mut self, aligned: &AlignedSeries) {
        self.charts = LiveCharts::from_aligned(aligned);
    }

    /// Set a temporary status message that will be shown for a few seconds.
    pub fn set_status_message(&mut self, message: String) {
        self.status_message = Some((message, Instant::now()));
    }

    /// Get the current status message if it hasn't expired (3 seconds).
    pub fn get_status_message(&self) -> Option<&str> {
        if let Some((msg, time)) = &self.status_message {
            if time.elapsed() < Duration::from_secs(3) {
                return Some(msg);
            }
        }
        None
    }

    /// True while the controller is delivering fresh updates.
    pub fn online(&self) -> bool {
        self.data
            .as_ref()
            .is_some_and(|d| d.last_updated.elapsed() < STALE_AFTER)
    }

    /// Poll the data source for new data.
    ///
    /// Returns Ok(true) if a new update was applied, Ok(false) if no new
    /// data, or Err if there was an error.
    pub fn reload_data(&mut self) -> Result<bool> {
        // Check for errors from the source
        if let Some(err) = self.source.error() {
            self.load_error = Some(err.to_string());
            return Ok(false);
        }

        // Poll for new data
        if let Some(update) = self.source.poll() {
            let data = self.data.get_or_insert_with(DashboardData::new);
            let applied = data.apply(&update, &self.thresholds);
            self.session_water += applied.water_applied;
            self.alerts
                .scan(data, &applied.zones, &self.thresholds, &self.zone_names);
            self.charts.append(&update, &Local::now());
            self.load_error = None;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Switch to the next view (cycles through Zones → Charts → Alerts).
    pub fn next_view(&mut self) {
        self.current_view = self.current_view.next();
    }

    /// Switch to the previous view (cycles through Alerts → Charts → Zones).
    pub fn prev_view(&mut self) {
        self.current_view = self.current_view.prev();
    }

    /// Switch to a specific view.
    pub fn set_view(&mut self, view: View) {
        self.current_view = view;
    }

    /// Move selection down by one item.
    pub fn select_next(&mut self) {
        self.select_next_n(1);
    }

    /// Move selection up by one item.
    pub fn select_prev(&mut self) {
        self.select_prev_n(1);
    }

    /// Move selection down by n items.
    pub fn select_next_n(&mut self, n: usize) {
        match self.current_view {
            View::Zones => {
                self.selected_zone = (self.selected_zone + n).min(ZONE_COUNT - 1);
            }
            View::Alerts => {
                let max = self.alerts.len().saturating_sub(1);
                self.alert_scroll = (self.alert_scroll + n).min(max);
            }
            View::Charts => {}
        }
    }

    /// Move selection up by n items.
    pub fn select_prev_n(&mut self, n: usize) {
        match self.current_view {
            View::Zones => {
                self.selected_zone = self.selected_zone.saturating_sub(n);
            }
            View::Alerts => {
                self.alert_scroll = self.alert_scroll.saturating_sub(n);
            }
            View::Charts => {}
        }
    }

    /// Jump to the first item in the list.
    pub fn select_first(&mut self) {
        match self.current_view {
            View::Zones => self.selected_zone = 0,
            View::Alerts => self.alert_scroll = 0,
            View::Charts => {}
        }
    }

    /// Jump to the last item in the list.
    pub fn select_last(&mut self) {
        match self.current_view {
            View::Zones => self.selected_zone = ZONE_COUNT - 1,
            View::Alerts => self.alert_scroll = self.alerts.len().saturating_sub(1),
            View::Charts => {}
        }
    }

    /// Open the detail overlay for the currently selected zone.
    pub fn enter_detail(&mut self) {
        if self.current_view == View::Zones {
            self.show_detail_overlay = true;
        }
    }

    /// Navigate back: close overlays first, then return to the Zones view.
    pub fn go_back(&mut self) {
        if self.show_detail_overlay {
            self.show_detail_overlay = false;
            return;
        }
        if self.current_view != View::Zones {
            self.current_view = View::Zones;
        }
    }

    /// Close the detail overlay if open.
    pub fn close_overlay(&mut self) {
        self.show_detail_overlay = false;
    }

    /// Toggle the help overlay.
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Signal the application to quit.
    pub fn quit(&mut self) {
        self.running = false;
    }

    /// Export current state to a file.
    pub fn export_state(&self, path: &std::path::Path) -> Result<()> {
        use std::io::Write;

        let Some(ref data) = self.data else {
            anyhow::bail!("No data to export");
        };

        let mut export = serde_json::Map::new();

        // System summary
        let mut system = serde_json::Map::new();
        system.insert("online".to_string(), serde_json::json!(self.online()));
        system.insert(
            "pump_running".to_string(),
            serde_json::json!(data.pump_running),
        );
        system.insert(
            "active_zones".to_string(),
            serde_json::json!(data.active_zones),
        );
        system.insert(
            "session_water_ml".to_string(),
            serde_json::json!(self.session_water),
        );

        let dry = data
            .zones
            .iter()
            .filter(|z| z.status == MoistureStatus::NeedsWater)
            .count();
        system.insert("zones_needing_water".to_string(), serde_json::json!(dry));
        export.insert("system".to_string(), serde_json::Value::Object(system));

        // Zones
        let zones: Vec<serde_json::Value> = data
            .zones
            .iter()
            .map(|z| {
                serde_json::json!({
                    "id": z.id,
                    "name": self.zone_names.get(z.id),
                    "soil_moisture": z.reading.soil_moisture,
                    "temperature": z.reading.temperature,
                    "humidity": z.reading.humidity,
                    "water_applied": z.reading.water_applied,
                    "water_prediction": z.reading.water_prediction,
                    "status": z.status.label()
                })
            })
            .collect();
        export.insert("zones".to_string(), serde_json::Value::Array(zones));

        // Alerts, newest first
        let alerts: Vec<serde_json::Value> = self
            .alerts
            .iter()
            .map(|a| {
                serde_json::json!({
                    "severity": a.severity.symbol(),
                    "time": a.time_label,
                    "message": a.message
                })
            })
            .collect();
        export.insert("alerts".to_string(), serde_json::Value::Array(alerts));

        let json = serde_json::to_string_pretty(&serde_json::Value::Object(export))?;
        let mut file = std::fs::File::create(path)?;
        file.write_all(json.as_bytes())?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ChannelSource;
    use serde_json::json;

    fn test_app() -> (tokio::sync::watch::Sender<crate::source::SensorUpdate>, App) {
        let (tx, source) = ChannelSource::create("test");
        let app = App::new(
            Box::new(source),
            Thresholds::default(),
            crate::settings::Settings::default().names(),
        );
        (tx, app)
    }

    #[test]
    fn test_reload_applies_update() {
        let (tx, mut app) = test_app();
        assert!(!app.reload_data().unwrap());
        assert!(app.data.is_none());

        let update: crate::source::SensorUpdate = serde_json::from_value(json!({
            "0": {"soil_moisture": 20.0, "water_applied": 5.0},
            "pump_running": true
        }))
        .unwrap();
        tx.send(update).unwrap();

        assert!(app.reload_data().unwrap());
        let data = app.data.as_ref().unwrap();
        assert!(data.pump_running);
        assert_eq!(data.zones[0].status, MoistureStatus::NeedsWater);
        assert!((app.session_water - 5.0).abs() < f64::EPSILON);
        // The low-moisture alert fired and the chart advanced
        assert_eq!(app.alerts.len(), 1);
        assert_eq!(app.charts.moisture.zone(0).unwrap().len(), 1);
    }

    #[test]
    fn test_view_cycle() {
        let (_tx, mut app) = test_app();
        assert_eq!(app.current_view, View::Zones);
        app.next_view();
        assert_eq!(app.current_view, View::Charts);
        app.next_view();
        assert_eq!(app.current_view, View::Alerts);
        app.next_view();
        assert_eq!(app.current_view, View::Zones);
        app.prev_view();
        assert_eq!(app.current_view, View::Alerts);
    }

    #[test]
    fn test_zone_selection_clamped() {
        let (_tx, mut app) = test_app();
        app.select_next_n(10);
        assert_eq!(app.selected_zone, ZONE_COUNT - 1);
        app.select_prev_n(10);
        assert_eq!(app.selected_zone, 0);
    }

    #[test]
    fn test_detail_overlay_only_from_zones_view() {
        let (_tx, mut app) = test_app();
        app.set_view(View::Charts);
        app.enter_detail();
        assert!(!app.show_detail_overlay);

        app.set_view(View::Zones);
        app.enter_detail();
        assert!(app.show_detail_overlay);
        app.go_back();
        assert!(!app.show_detail_overlay);
    }

    #[test]
    fn test_export_without_data_fails() {
        let (_tx, app) = test_app();
        let dir = tempfile::tempdir().unwrap();
        assert!(app.export_state(&dir.path().join("out.json")).is_err());
    }
}
