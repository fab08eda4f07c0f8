//! Wire types for controller payloads.
//!
//! These match the JSON shapes produced by the irrigation controller (and
//! its simulator): one live update per POST/emit, keyed by zone id, plus
//! historical dumps keyed the same way. Values stay as raw JSON so that a
//! malformed entry for one zone never prevents the rest of the payload
//! from being used.

use std::collections::BTreeMap;

use serde_json::Value;

/// Number of irrigation zones the controller drives.
pub const ZONE_COUNT: usize = 4;

/// Top-level keys that carry system state rather than zone readings.
pub const RESERVED_KEYS: &[&str] = &["pump_running", "active_zones"];

/// One live sensor update.
///
/// Maps zone-id strings ("0".."3") to reading objects with optional
/// `soil_moisture`, `temperature`, `humidity`, `water_applied` and
/// `water_prediction` fields, plus the reserved system keys
/// `pump_running` (bool) and `active_zones` (array of zone ids).
pub type SensorUpdate = BTreeMap<String, Value>;

/// A historical data dump: zone-id string to a list of timestamped
/// readings, as returned by the controller's sensor-data endpoint.
pub type HistoricalSet = BTreeMap<String, Value>;

/// True for top-level keys that are system flags, not zone readings.
pub fn is_reserved(key: &str) -> bool {
    RESERVED_KEYS.contains(&key)
}

/// Parse a top-level key as a zone id, rejecting anything outside 0..ZONE_COUNT.
pub fn parse_zone_id(key: &str) -> Option<usize> {
    key.parse::<usize>().ok().filter(|z| *z < ZONE_COUNT)
}

/// Extract a numeric metric field from a reading entry.
///
/// Returns None when the entry is not an object, the field is absent, or
/// the field is not a number, so callers degrade to a gap per zone.
pub fn metric(entry: &Value, field: &str) -> Option<f64> {
    entry.as_object()?.get(field)?.as_f64()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_update() {
        let json = r#"{
            "0": {
                "soil_moisture": 42.5,
                "temperature": 21.3,
                "humidity": 60.0,
                "water_prediction": 12.0,
                "water_applied": 0
            },
            "pump_running": true,
            "active_zones": [1, 2]
        }"#;

        let update: SensorUpdate = serde_json::from_str(json).unwrap();
        assert_eq!(update.len(), 3);

        let zone = update.get("0").unwrap();
        assert_eq!(metric(zone, "soil_moisture"), Some(42.5));
        assert_eq!(metric(zone, "temperature"), Some(21.3));
        assert_eq!(metric(zone, "missing"), None);

        assert_eq!(update.get("pump_running").unwrap().as_bool(), Some(true));
    }

    #[test]
    fn test_parse_zone_id_bounds() {
        assert_eq!(parse_zone_id("0"), Some(0));
        assert_eq!(parse_zone_id("3"), Some(3));
        assert_eq!(parse_zone_id("4"), None);
        assert_eq!(parse_zone_id("-1"), None);
        assert_eq!(parse_zone_id("pump_running"), None);
    }

    #[test]
    fn test_reserved_keys() {
        assert!(is_reserved("pump_running"));
        assert!(is_reserved("active_zones"));
        assert!(!is_reserved("0"));
    }

    #[test]
    fn test_metric_tolerates_wrong_shapes() {
        assert_eq!(metric(&Value::from(17), "soil_moisture"), None);
        assert_eq!(metric(&Value::Null, "soil_moisture"), None);
        let entry: Value = serde_json::json!({"soil_moisture": "wet"});
        assert_eq!(metric(&entry, "soil_moisture"), None);
    }
}
