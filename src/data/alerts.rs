//! Rolling alert log with duplicate suppression.
//!
//! Each update is scanned against the thresholds and the resulting
//! alerts are kept in a bounded, newest-first log. A repeat of the same
//! message inside the suppression window is dropped via an explicit
//! expiring set rather than rescanning the log itself.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

use chrono::Local;

use super::timefmt;
use super::zones::{DashboardData, Thresholds};

/// Maximum number of alerts retained.
const MAX_ALERTS: usize = 20;

/// Window inside which an identical message is suppressed.
const REPEAT_WINDOW: Duration = Duration::from_secs(60);

/// Alert severity, ordered least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
}

impl Severity {
    /// Returns a short symbol for display.
    pub fn symbol(&self) -> &'static str {
        match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARN",
        }
    }
}

/// One alert entry.
#[derive(Debug, Clone)]
pub struct Alert {
    pub severity: Severity,
    pub message: String,
    /// Clock label at the moment the alert was raised.
    pub time_label: String,
}

/// Bounded, newest-first alert log.
#[derive(Debug, Clone, Default)]
pub struct AlertLog {
    alerts: VecDeque<Alert>,
    recent: Vec<(String, Instant)>,
}

impl AlertLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan the zones refreshed by one update and raise alerts for any
    /// threshold violations.
    pub fn scan(
        &mut self,
        data: &DashboardData,
        updated_zones: &[usize],
        thresholds: &Thresholds,
        zone_names: &[String],
    ) {
        for &zone in updated_zones {
            let Some(state) = data.zones.get(zone) else { continue };
            let name = zone_names
                .get(zone)
                .map(String::as_str)
                .unwrap_or("Unknown zone");
            let reading = state.reading;

            if let Some(m) = reading.soil_moisture {
                if m < thresholds.moisture_low {
                    self.push(
                        Severity::Warning,
                        format!("Low soil moisture in {}: {:.1}%", name, m),
                    );
                }
            }
            if let Some(t) = reading.temperature {
                if t > thresholds.temp_high {
                    self.push(
                        Severity::Warning,
                        format!("High temperature in {}: {:.1}°C", name, t),
                    );
                } else if t < thresholds.temp_low {
                    self.push(
                        Severity::Info,
                        format!("Low temperature in {}: {:.1}°C", name, t),
                    );
                }
            }
            if let Some(h) = reading.humidity {
                if h < thresholds.humidity_low {
                    self.push(Severity::Info, format!("Low humidity in {}: {:.1}%", name, h));
                }
            }
        }
    }

    /// Record an alert unless the same message fired inside the
    /// suppression window. The log keeps at most [`MAX_ALERTS`] entries,
    /// newest first.
    pub fn push(&mut self, severity: Severity, message: String) {
        let now = Instant::now();
        self.recent
            .retain(|(_, raised)| now.duration_since(*raised) < REPEAT_WINDOW);
        if self.recent.iter().any(|(m, _)| *m == message) {
            return;
        }
        self.recent.push((message.clone(), now));

        self.alerts.push_front(Alert {
            severity,
            message,
            time_label: timefmt::clock_label(&Local::now()),
        });
        if self.alerts.len() > MAX_ALERTS {
            self.alerts.pop_back();
        }
    }

    /// Iterate alerts, newest first.
    pub fn iter(&self) -> impl Iterator<Item = &Alert> {
        self.alerts.iter()
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    /// Count of warnings currently in the log.
    pub fn warning_count(&self) -> usize {
        self.alerts
            .iter()
            .filter(|a| a.severity == Severity::Warning)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::update::SensorUpdate;
    use serde_json::json;

    fn names() -> Vec<String> {
        (1..=4).map(|n| format!("Zone {}", n)).collect()
    }

    fn scan_update(log: &mut AlertLog, value: serde_json::Value) {
        let update: SensorUpdate = serde_json::from_value(value).unwrap();
        let thresholds = Thresholds::default();
        let mut data = DashboardData::new();
        let applied = data.apply(&update, &thresholds);
        log.scan(&data, &applied.zones, &thresholds, &names());
    }

    #[test]
    fn test_scan_raises_threshold_alerts() {
        let mut log = AlertLog::new();
        scan_update(
            &mut log,
            json!({
                "0": {"soil_moisture": 20.0},
                "1": {"temperature": 35.0},
                "2": {"temperature": 10.0, "humidity": 30.0}
            }),
        );

        let messages: Vec<&str> = log.iter().map(|a| a.message.as_str()).collect();
        assert_eq!(log.len(), 4);
        assert!(messages.contains(&"Low soil moisture in Zone 1: 20.0%"));
        assert!(messages.contains(&"High temperature in Zone 2: 35.0°C"));
        assert!(messages.contains(&"Low temperature in Zone 3: 10.0°C"));
        assert!(messages.contains(&"Low humidity in Zone 3: 30.0%"));
        assert_eq!(log.warning_count(), 2);
    }

    #[test]
    fn test_scan_skips_healthy_zones() {
        let mut log = AlertLog::new();
        scan_update(
            &mut log,
            json!({ "0": {"soil_moisture": 55.0, "temperature": 22.0, "humidity": 60.0} }),
        );
        assert!(log.is_empty());
    }

    #[test]
    fn test_duplicate_messages_suppressed_in_window() {
        let mut log = AlertLog::new();
        log.push(Severity::Warning, "Low soil moisture in Zone 1: 20.0%".into());
        log.push(Severity::Warning, "Low soil moisture in Zone 1: 20.0%".into());
        assert_eq!(log.len(), 1);

        // A different message is not suppressed
        log.push(Severity::Warning, "Low soil moisture in Zone 1: 19.0%".into());
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn test_log_capped_newest_first() {
        let mut log = AlertLog::new();
        for i in 0..25 {
            log.push(Severity::Info, format!("alert {}", i));
        }
        assert_eq!(log.len(), MAX_ALERTS);
        assert_eq!(log.iter().next().unwrap().message, "alert 24");
        assert_eq!(log.iter().last().unwrap().message, "alert 5");
    }
}
