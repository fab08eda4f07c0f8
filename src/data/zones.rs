//! Zone state parsing and status computation.
//!
//! This module transforms raw sensor updates into per-zone display data
//! with a watering status computed from configurable thresholds.

use std::time::Instant;

use serde_json::Value;

use crate::source::update::{is_reserved, metric, parse_zone_id, SensorUpdate, ZONE_COUNT};

/// Thresholds for zone status and alert computation.
///
/// Defaults match the controller's stock dashboard configuration.
#[derive(Debug, Clone)]
pub struct Thresholds {
    /// Soil moisture % below which a zone needs water.
    pub moisture_low: f64,
    /// Soil moisture % above which a zone is saturated.
    pub moisture_high: f64,
    /// Temperature below which a low-temperature notice is raised.
    pub temp_low: f64,
    /// Temperature above which a high-temperature warning is raised.
    pub temp_high: f64,
    /// Humidity % below which a low-humidity notice is raised.
    pub humidity_low: f64,
    /// Humidity % above which the air is considered saturated.
    pub humidity_high: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            moisture_low: 35.0,
            moisture_high: 70.0,
            temp_low: 15.0,
            temp_high: 30.0,
            humidity_low: 40.0,
            humidity_high: 80.0,
        }
    }
}

/// Watering status for a zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoistureStatus {
    Optimal,
    NeedsWater,
    Unknown,
}

impl MoistureStatus {
    /// Returns the display label for this status.
    pub fn label(&self) -> &'static str {
        match self {
            MoistureStatus::Optimal => "Optimal",
            MoistureStatus::NeedsWater => "Needs Water",
            MoistureStatus::Unknown => "No Data",
        }
    }
}

/// The latest sensor sample for one zone. Absent fields stay absent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZoneReading {
    pub soil_moisture: Option<f64>,
    pub temperature: Option<f64>,
    pub humidity: Option<f64>,
    pub water_applied: Option<f64>,
    pub water_prediction: Option<f64>,
}

impl ZoneReading {
    /// Extract a reading from a raw zone entry.
    ///
    /// Returns None when the entry is not an object, so a malformed zone
    /// is skipped without touching its previous state.
    fn from_value(entry: &Value) -> Option<Self> {
        entry.as_object()?;
        Some(Self {
            soil_moisture: metric(entry, "soil_moisture"),
            temperature: metric(entry, "temperature"),
            humidity: metric(entry, "humidity"),
            water_applied: metric(entry, "water_applied"),
            water_prediction: metric(entry, "water_prediction"),
        })
    }
}

/// Display state for one zone.
#[derive(Debug, Clone)]
pub struct ZoneData {
    pub id: usize,
    pub reading: ZoneReading,
    pub status: MoistureStatus,
}

/// What one update actually changed, for alert scanning and stats.
#[derive(Debug, Clone, Default)]
pub struct Applied {
    /// Zone ids refreshed by this event, in key order.
    pub zones: Vec<usize>,
    /// Water applied across this event's zones, in ml.
    pub water_applied: f64,
}

/// Complete dashboard state, merged across updates.
///
/// Zones keep their last known reading when an update omits them, the
/// way the original dashboard's cards held their previous values.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub zones: Vec<ZoneData>,
    pub pump_running: bool,
    pub active_zones: Vec<u64>,
    pub last_updated: Instant,
}

impl Default for DashboardData {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardData {
    /// All zones unknown, nothing received yet.
    pub fn new() -> Self {
        Self {
            zones: (0..ZONE_COUNT)
                .map(|id| ZoneData {
                    id,
                    reading: ZoneReading::default(),
                    status: MoistureStatus::Unknown,
                })
                .collect(),
            pump_running: false,
            active_zones: Vec::new(),
            last_updated: Instant::now(),
        }
    }

    /// Merge one live update into the dashboard state.
    ///
    /// Zone entries that are out of range or not objects are skipped;
    /// the rest of the event still applies. System flags are replaced
    /// wholesale on every event.
    pub fn apply(&mut self, update: &SensorUpdate, thresholds: &Thresholds) -> Applied {
        let mut applied = Applied::default();

        for (key, entry) in update {
            if is_reserved(key) {
                continue;
            }
            let Some(zone) = parse_zone_id(key) else { continue };
            let Some(reading) = ZoneReading::from_value(entry) else { continue };
            self.zones[zone].reading = reading;
            self.zones[zone].status = status_for(reading.soil_moisture, thresholds);
            applied.water_applied += reading.water_applied.unwrap_or(0.0);
            applied.zones.push(zone);
        }

        self.pump_running = update
            .get("pump_running")
            .and_then(Value::as_bool)
            .unwrap_or(false);
        self.active_zones = update
            .get("active_zones")
            .and_then(Value::as_array)
            .map(|zones| zones.iter().filter_map(Value::as_u64).collect())
            .unwrap_or_default();
        self.last_updated = Instant::now();

        applied
    }
}

fn status_for(soil_moisture: Option<f64>, thresholds: &Thresholds) -> MoistureStatus {
    match soil_moisture {
        Some(m) if m < thresholds.moisture_low => MoistureStatus::NeedsWater,
        Some(_) => MoistureStatus::Optimal,
        None => MoistureStatus::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn update(value: Value) -> SensorUpdate {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_apply_sets_readings_and_status() {
        let mut data = DashboardData::new();
        let applied = data.apply(
            &update(json!({
                "0": {"soil_moisture": 30.0, "temperature": 22.0, "water_applied": 12.5},
                "1": {"soil_moisture": 55.0},
                "pump_running": true,
                "active_zones": [0]
            })),
            &Thresholds::default(),
        );

        assert_eq!(applied.zones, vec![0, 1]);
        assert!((applied.water_applied - 12.5).abs() < f64::EPSILON);
        assert_eq!(data.zones[0].status, MoistureStatus::NeedsWater);
        assert_eq!(data.zones[1].status, MoistureStatus::Optimal);
        assert_eq!(data.zones[2].status, MoistureStatus::Unknown);
        assert!(data.pump_running);
        assert_eq!(data.active_zones, vec![0]);
    }

    #[test]
    fn test_apply_skips_malformed_entries() {
        let mut data = DashboardData::new();
        let applied = data.apply(
            &update(json!({
                "0": "broken",
                "1": {"soil_moisture": 50.0},
                "6": {"soil_moisture": 10.0}
            })),
            &Thresholds::default(),
        );

        assert_eq!(applied.zones, vec![1]);
        assert_eq!(data.zones[0].status, MoistureStatus::Unknown);
        assert_eq!(data.zones[1].reading.soil_moisture, Some(50.0));
    }

    #[test]
    fn test_apply_retains_previous_zone_state() {
        let mut data = DashboardData::new();
        data.apply(
            &update(json!({ "2": {"soil_moisture": 60.0} })),
            &Thresholds::default(),
        );
        data.apply(
            &update(json!({ "0": {"soil_moisture": 45.0} })),
            &Thresholds::default(),
        );

        // Zone 2 was not in the second update but keeps its reading
        assert_eq!(data.zones[2].reading.soil_moisture, Some(60.0));
        assert_eq!(data.zones[2].status, MoistureStatus::Optimal);
    }

    #[test]
    fn test_system_flags_replaced_each_event() {
        let mut data = DashboardData::new();
        data.apply(
            &update(json!({ "pump_running": true, "active_zones": [1, 3] })),
            &Thresholds::default(),
        );
        assert!(data.pump_running);

        data.apply(&update(json!({ "0": {"soil_moisture": 50.0} })), &Thresholds::default());
        assert!(!data.pump_running);
        assert!(data.active_zones.is_empty());
    }
}
