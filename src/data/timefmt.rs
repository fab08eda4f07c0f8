//! Time label formatting shared by the aligner and the live chart buffers.
//!
//! Every chart axis label in the application goes through this module so
//! that historical and live points format identically.

use std::fmt;

use chrono::{DateTime, NaiveDateTime, TimeZone};

/// Hour:minute clock format used for all chart labels (e.g. "10:00 AM").
const CLOCK_FORMAT: &str = "%-I:%M %p";

/// Format a wall-clock instant as a chart label.
pub fn clock_label<Tz: TimeZone>(t: &DateTime<Tz>) -> String
where
    Tz::Offset: fmt::Display,
{
    t.format(CLOCK_FORMAT).to_string()
}

/// Convert a reading timestamp into a chart label.
///
/// RFC 3339 timestamps format in their own embedded offset, so the result
/// is deterministic regardless of the host timezone. Naive ISO timestamps
/// (the controller backend emits `datetime.now().isoformat()`, which has
/// no offset) format as-is. Anything unparseable falls back to the raw
/// string so a bad timestamp still gets an axis slot instead of a crash.
pub fn time_label(timestamp: &str) -> String {
    if let Ok(t) = DateTime::parse_from_rfc3339(timestamp) {
        return clock_label(&t);
    }
    if let Ok(t) = NaiveDateTime::parse_from_str(timestamp, "%Y-%m-%dT%H:%M:%S%.f") {
        return t.format(CLOCK_FORMAT).to_string();
    }
    timestamp.to_string()
}
