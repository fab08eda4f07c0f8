//! Data models and processing for sensor updates.
//!
//! This module handles the transformation of raw controller payloads
//! into structured, display-ready data.
//!
//! ## Submodules
//!
//! - [`alerts`]: Rolling alert log with duplicate suppression
//! - [`charts`]: Historical series alignment and live rolling chart buffers
//! - [`timefmt`]: Shared hour:minute label formatting
//! - [`zones`]: Per-zone state and threshold-based status
//!
//! ## Data Flow
//!
//! ```text
//! SensorUpdate (raw JSON)
//!        │
//!        ├──▶ DashboardData::apply()  (zone cards, system flags)
//!        │           │
//!        │           └──▶ AlertLog::scan()
//!        │
//!        └──▶ LiveCharts::append()    (rolling chart windows)
//!
//! HistoricalSet (raw JSON)
//!        │
//!        └──▶ align() ──▶ LiveCharts::from_aligned()  (chart seeding)
//! ```

pub mod alerts;
pub mod charts;
pub mod timefmt;
pub mod zones;

pub use alerts::{Alert, AlertLog, Severity};
pub use charts::{align, AlignedSeries, ClimateChart, LiveCharts, MoistureChart, SeriesBuffer};
pub use zones::{Applied, DashboardData, MoistureStatus, Thresholds, ZoneData, ZoneReading};
