//! Chart data processing: historical alignment and live rolling buffers.
//!
//! Two collaborating pieces feed the chart views:
//!
//! - [`align`] takes an unordered historical dump and produces one shared
//!   time axis with per-zone, per-metric value sequences aligned to it.
//! - [`LiveCharts`] holds the in-memory series mutated on every live
//!   update: append one point per metric, evict the oldest entry once a
//!   series passes the window size.
//!
//! Missing readings are gaps ([`None`]), never zeros, so the chart view
//! can skip them instead of drawing a dip to the baseline.

use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt;

use chrono::{DateTime, TimeZone};
use serde_json::Value;

use super::timefmt;
use crate::source::update::{is_reserved, metric, parse_zone_id, HistoricalSet, SensorUpdate, ZONE_COUNT};

/// Maximum number of points kept per series and per label track.
pub const MAX_POINTS: usize = 50;

/// The zone whose temperature and humidity feed the climate chart.
const CLIMATE_ZONE: &str = "0";

/// Historical readings aligned to one shared time axis.
///
/// Every per-zone sequence has length `labels.len()`; index `i` of any
/// sequence corresponds to `labels[i]`. Zones without a reading at a
/// given instant hold a gap at that position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignedSeries {
    /// Human-readable time labels, ascending chronological order.
    pub labels: Vec<String>,
    /// Soil moisture percentage per zone.
    pub moisture: [Vec<Option<f64>>; ZONE_COUNT],
    /// Temperature in degrees per zone.
    pub temperature: [Vec<Option<f64>>; ZONE_COUNT],
    /// Relative humidity percentage per zone.
    pub humidity: [Vec<Option<f64>>; ZONE_COUNT],
}

/// Align a historical dump onto one shared, sorted time axis.
///
/// Timestamps are deduplicated by exact value and sorted by their natural
/// order (ISO-8601 strings sort correctly lexicographically). Zone keys
/// outside 0..4 and entries that are not arrays are skipped; readings
/// without a given field leave a gap at their position. When more than
/// [`MAX_POINTS`] distinct timestamps exist, the oldest are dropped.
///
/// Position lookup goes through a timestamp-to-index map built once, so
/// the whole run is O(zones x readings) rather than rescanning the axis
/// for every reading.
pub fn align(historical: &HistoricalSet) -> AlignedSeries {
    let mut stamps: Vec<&str> = Vec::new();
    let mut seen: HashSet<&str> = HashSet::new();
    for entries in historical.values() {
        let Some(list) = entries.as_array() else { continue };
        for reading in list {
            if let Some(ts) = reading.get("timestamp").and_then(Value::as_str) {
                if seen.insert(ts) {
                    stamps.push(ts);
                }
            }
        }
    }
    stamps.sort_unstable();

    let index_of: HashMap<&str, usize> =
        stamps.iter().enumerate().map(|(i, ts)| (*ts, i)).collect();

    let mut series = AlignedSeries {
        labels: stamps.iter().map(|ts| timefmt::time_label(ts)).collect(),
        ..Default::default()
    };
    for zone in 0..ZONE_COUNT {
        series.moisture[zone] = vec![None; stamps.len()];
        series.temperature[zone] = vec![None; stamps.len()];
        series.humidity[zone] = vec![None; stamps.len()];
    }

    for (key, entries) in historical {
        let Some(zone) = parse_zone_id(key) else { continue };
        let Some(list) = entries.as_array() else { continue };
        for reading in list {
            let Some(idx) = reading
                .get("timestamp")
                .and_then(Value::as_str)
                .and_then(|ts| index_of.get(ts).copied())
            else {
                continue;
            };
            series.moisture[zone][idx] = metric(reading, "soil_moisture");
            series.temperature[zone][idx] = metric(reading, "temperature");
            series.humidity[zone][idx] = metric(reading, "humidity");
        }
    }

    if series.labels.len() > MAX_POINTS {
        let start = series.labels.len() - MAX_POINTS;
        series.labels.drain(..start);
        for zone in 0..ZONE_COUNT {
            series.moisture[zone].drain(..start);
            series.temperature[zone].drain(..start);
            series.humidity[zone].drain(..start);
        }
    }

    series
}

/// One bounded chart series: a FIFO of at most [`MAX_POINTS`] values.
#[derive(Debug, Clone, Default)]
pub struct SeriesBuffer {
    values: VecDeque<Option<f64>>,
}

impl SeriesBuffer {
    fn seeded(values: &[Option<f64>]) -> Self {
        Self {
            values: values.iter().copied().collect(),
        }
    }

    /// Append a value, evicting the oldest entry once past capacity.
    fn push(&mut self, value: f64) {
        self.values.push_back(Some(value));
        if self.values.len() > MAX_POINTS {
            self.values.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterate the buffered values, gaps included, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = Option<f64>> + '_ {
        self.values.iter().copied()
    }

    /// Plot points (index, value), skipping gaps.
    pub fn points(&self) -> Vec<(f64, f64)> {
        self.values
            .iter()
            .enumerate()
            .filter_map(|(i, v)| v.map(|y| (i as f64, y)))
            .collect()
    }
}

/// The soil moisture chart: one series per zone plus a shared label track.
///
/// Zone ids resolve to series slots through a checked lookup, so an
/// unexpected id is skipped instead of writing out of range.
#[derive(Debug, Clone, Default)]
pub struct MoistureChart {
    /// Time labels shared by all zone series, oldest first.
    pub labels: VecDeque<String>,
    series: [SeriesBuffer; ZONE_COUNT],
}

impl MoistureChart {
    /// The series for a zone, if the id is in range.
    pub fn zone(&self, zone: usize) -> Option<&SeriesBuffer> {
        self.series.get(zone)
    }

    fn zone_mut(&mut self, zone: usize) -> Option<&mut SeriesBuffer> {
        self.series.get_mut(zone)
    }

    fn append(&mut self, update: &SensorUpdate, label: &str) {
        for (key, entry) in update {
            if is_reserved(key) {
                continue;
            }
            let Some(zone) = parse_zone_id(key) else { continue };
            let Some(slot) = self.zone_mut(zone) else { continue };
            if let Some(v) = metric(entry, "soil_moisture") {
                slot.push(v);
            }
        }
        push_label(&mut self.labels, label);
    }
}

/// The temperature/humidity chart for the reference zone.
#[derive(Debug, Clone, Default)]
pub struct ClimateChart {
    /// Time labels shared by both series, oldest first.
    pub labels: VecDeque<String>,
    pub temperature: SeriesBuffer,
    pub humidity: SeriesBuffer,
}

impl ClimateChart {
    fn append(&mut self, update: &SensorUpdate, label: &str) {
        let Some(entry) = update.get(CLIMATE_ZONE) else {
            return;
        };
        if let Some(v) = metric(entry, "temperature") {
            self.temperature.push(v);
        }
        if let Some(v) = metric(entry, "humidity") {
            self.humidity.push(v);
        }
        push_label(&mut self.labels, label);
    }
}

fn push_label(labels: &mut VecDeque<String>, label: &str) {
    labels.push_back(label.to_string());
    if labels.len() > MAX_POINTS {
        labels.pop_front();
    }
}

/// The live chart buffer set, owned by the application for the session.
#[derive(Debug, Clone, Default)]
pub struct LiveCharts {
    pub moisture: MoistureChart,
    pub climate: ClimateChart,
}

impl LiveCharts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the buffers from an aligned historical run.
    pub fn from_aligned(aligned: &AlignedSeries) -> Self {
        let mut charts = Self::new();
        charts.moisture.labels = aligned.labels.iter().cloned().collect();
        for zone in 0..ZONE_COUNT {
            charts.moisture.series[zone] = SeriesBuffer::seeded(&aligned.moisture[zone]);
        }
        charts.climate.labels = aligned.labels.iter().cloned().collect();
        charts.climate.temperature = SeriesBuffer::seeded(&aligned.temperature[0]);
        charts.climate.humidity = SeriesBuffer::seeded(&aligned.humidity[0]);
        charts
    }

    /// Apply one live update to every chart.
    ///
    /// One display label is computed from `now` and shared by everything
    /// this event touches. Each zone entry that carries the relevant
    /// numeric field appends one point; malformed entries are skipped per
    /// zone without affecting the rest of the event. Series that pass
    /// [`MAX_POINTS`] evict their oldest entry.
    pub fn append<Tz: TimeZone>(&mut self, update: &SensorUpdate, now: &DateTime<Tz>)
    where
        Tz::Offset: fmt::Display,
    {
        let label = timefmt::clock_label(now);
        self.moisture.append(update, &label);
        self.climate.append(update, &label);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    fn historical(value: Value) -> HistoricalSet {
        serde_json::from_value(value).unwrap()
    }

    fn update(value: Value) -> SensorUpdate {
        serde_json::from_value(value).unwrap()
    }

    fn at(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 10, minute, 0).unwrap()
    }

    #[test]
    fn test_align_merges_zones_onto_shared_axis() {
        let input = historical(json!({
            "0": [{"timestamp": "2024-01-01T10:00:00Z", "soil_moisture": 40}],
            "1": [{"timestamp": "2024-01-01T10:00:00Z", "temperature": 22}]
        }));

        let series = align(&input);
        assert_eq!(series.labels, vec!["10:00 AM"]);
        assert_eq!(series.moisture[0], vec![Some(40.0)]);
        assert_eq!(series.moisture[1], vec![None]);
        assert_eq!(series.temperature[1], vec![Some(22.0)]);
        assert_eq!(series.temperature[0], vec![None]);
    }

    #[test]
    fn test_align_sequences_share_axis_length() {
        let input = historical(json!({
            "0": [
                {"timestamp": "2024-01-01T10:00:00Z", "soil_moisture": 40, "humidity": 60},
                {"timestamp": "2024-01-01T10:05:00Z", "soil_moisture": 41}
            ],
            "2": [{"timestamp": "2024-01-01T10:02:00Z", "temperature": 19}]
        }));

        let series = align(&input);
        assert_eq!(series.labels.len(), 3);
        for zone in 0..ZONE_COUNT {
            assert_eq!(series.moisture[zone].len(), 3);
            assert_eq!(series.temperature[zone].len(), 3);
            assert_eq!(series.humidity[zone].len(), 3);
        }
        // Zone 3 sent nothing and is all gaps
        assert!(series.moisture[3].iter().all(Option::is_none));
    }

    #[test]
    fn test_align_is_insensitive_to_reading_order() {
        let ordered = historical(json!({
            "0": [
                {"timestamp": "2024-01-01T10:00:00Z", "soil_moisture": 40},
                {"timestamp": "2024-01-01T10:05:00Z", "soil_moisture": 45},
                {"timestamp": "2024-01-01T10:10:00Z", "soil_moisture": 50}
            ]
        }));
        let shuffled = historical(json!({
            "0": [
                {"timestamp": "2024-01-01T10:10:00Z", "soil_moisture": 50},
                {"timestamp": "2024-01-01T10:00:00Z", "soil_moisture": 40},
                {"timestamp": "2024-01-01T10:05:00Z", "soil_moisture": 45}
            ]
        }));

        assert_eq!(align(&ordered), align(&shuffled));
    }

    #[test]
    fn test_align_truncates_to_trailing_window() {
        let readings: Vec<Value> = (0..60)
            .map(|m| {
                json!({
                    "timestamp": format!("2024-01-01T10:{:02}:00Z", m),
                    "soil_moisture": m
                })
            })
            .collect();
        let input = historical(json!({ "0": readings }));

        let series = align(&input);
        assert_eq!(series.labels.len(), MAX_POINTS);
        assert_eq!(series.labels[0], "10:10 AM");
        assert_eq!(series.labels[MAX_POINTS - 1], "10:59 AM");
        assert_eq!(series.moisture[0][0], Some(10.0));
        assert_eq!(series.moisture[0][MAX_POINTS - 1], Some(59.0));
        for zone in 0..ZONE_COUNT {
            assert_eq!(series.moisture[zone].len(), MAX_POINTS);
        }
    }

    #[test]
    fn test_align_preserves_gaps_without_shifting() {
        let input = historical(json!({
            "0": [
                {"timestamp": "2024-01-01T10:00:00Z", "soil_moisture": 40},
                {"timestamp": "2024-01-01T10:05:00Z", "temperature": 20},
                {"timestamp": "2024-01-01T10:10:00Z", "soil_moisture": 44}
            ]
        }));

        let series = align(&input);
        assert_eq!(series.moisture[0], vec![Some(40.0), None, Some(44.0)]);
        assert_eq!(series.temperature[0], vec![None, Some(20.0), None]);
    }

    #[test]
    fn test_align_skips_malformed_zones() {
        let input = historical(json!({
            "0": [{"timestamp": "2024-01-01T10:00:00Z", "soil_moisture": 40}],
            "2": "not an array",
            "7": [{"timestamp": "2024-01-01T10:01:00Z", "soil_moisture": 99}],
            "garden": [{"timestamp": "2024-01-01T10:02:00Z", "soil_moisture": 98}]
        }));

        let series = align(&input);
        // Out-of-range and non-numeric zones contribute no values, but
        // their array entries still widen the shared axis
        assert_eq!(series.labels.len(), 3);
        assert_eq!(series.moisture[0][0], Some(40.0));
        assert!(series.moisture[2].iter().all(Option::is_none));
    }

    #[test]
    fn test_align_empty_input() {
        let series = align(&HistoricalSet::new());
        assert!(series.labels.is_empty());
        for zone in 0..ZONE_COUNT {
            assert!(series.moisture[zone].is_empty());
            assert!(series.temperature[zone].is_empty());
            assert!(series.humidity[zone].is_empty());
        }
    }

    #[test]
    fn test_append_fifo_keeps_last_window() {
        let mut charts = LiveCharts::new();
        for i in 1..=51 {
            charts.append(&update(json!({ "0": {"soil_moisture": i} })), &at(0));
        }

        let zone0: Vec<Option<f64>> = charts.moisture.zone(0).unwrap().iter().collect();
        assert_eq!(zone0.len(), MAX_POINTS);
        assert_eq!(zone0[0], Some(2.0));
        assert_eq!(zone0[MAX_POINTS - 1], Some(51.0));
        assert_eq!(charts.moisture.labels.len(), MAX_POINTS);
    }

    #[test]
    fn test_append_reserved_keys_update_labels_only() {
        let mut charts = LiveCharts::new();
        charts.append(
            &update(json!({ "pump_running": true, "0": {"temperature": 21} })),
            &at(30),
        );

        assert!(charts.moisture.zone(0).unwrap().is_empty());
        assert_eq!(charts.moisture.labels.len(), 1);
        let temps: Vec<Option<f64>> = charts.climate.temperature.iter().collect();
        assert_eq!(temps, vec![Some(21.0)]);
        assert!(charts.climate.humidity.is_empty());
        assert_eq!(charts.climate.labels, vec!["10:30 AM"]);
    }

    #[test]
    fn test_append_isolates_malformed_zone_entries() {
        let mut charts = LiveCharts::new();
        charts.append(
            &update(json!({
                "1": 42,
                "2": {"soil_moisture": "wet"},
                "3": {"soil_moisture": 55},
                "9": {"soil_moisture": 10}
            })),
            &at(0),
        );

        assert!(charts.moisture.zone(1).unwrap().is_empty());
        assert!(charts.moisture.zone(2).unwrap().is_empty());
        let zone3: Vec<Option<f64>> = charts.moisture.zone(3).unwrap().iter().collect();
        assert_eq!(zone3, vec![Some(55.0)]);
        assert_eq!(charts.moisture.labels.len(), 1);
    }

    #[test]
    fn test_climate_chart_tracks_reference_zone_only() {
        let mut charts = LiveCharts::new();
        charts.append(
            &update(json!({ "1": {"temperature": 30, "humidity": 50} })),
            &at(0),
        );

        assert!(charts.climate.temperature.is_empty());
        assert!(charts.climate.humidity.is_empty());
        assert!(charts.climate.labels.is_empty());
        // The moisture chart's label track still advances once per event
        assert_eq!(charts.moisture.labels.len(), 1);
    }

    #[test]
    fn test_seeded_charts_continue_the_window() {
        let input = historical(json!({
            "0": [
                {"timestamp": "2024-01-01T10:00:00Z", "soil_moisture": 40,
                 "temperature": 20, "humidity": 55}
            ]
        }));
        let mut charts = LiveCharts::from_aligned(&align(&input));
        assert_eq!(charts.moisture.labels, vec!["10:00 AM"]);

        charts.append(&update(json!({ "0": {"soil_moisture": 42} })), &at(5));

        let zone0: Vec<Option<f64>> = charts.moisture.zone(0).unwrap().iter().collect();
        assert_eq!(zone0, vec![Some(40.0), Some(42.0)]);
        assert_eq!(charts.moisture.labels, vec!["10:00 AM", "10:05 AM"]);
        let temps: Vec<Option<f64>> = charts.climate.temperature.iter().collect();
        assert_eq!(temps, vec![Some(20.0)]);
    }

    #[test]
    fn test_points_skip_gaps() {
        let buffer = SeriesBuffer::seeded(&[Some(40.0), None, Some(44.0)]);
        assert_eq!(buffer.points(), vec![(0.0, 40.0), (2.0, 44.0)]);
    }
}
