//! Data source abstraction for receiving sensor updates.
//!
//! This module provides a trait-based abstraction for receiving live
//! sensor updates from various backends (file polling, TCP streams,
//! in-process channels) plus one-shot historical loading for chart
//! seeding.

mod channel;
mod file;
mod history;
mod stream;
pub mod update;

pub use channel::ChannelSource;
pub use file::FileSource;
pub use history::load_history;
pub use stream::StreamSource;
pub use update::{HistoricalSet, SensorUpdate, ZONE_COUNT};

use std::fmt::Debug;

/// Trait for receiving sensor updates from various sources.
///
/// Implementations provide updates from different backends - file
/// polling, network streams, or in-memory channels.
///
/// # Example
///
/// ```
/// use irriwatch::{DataSource, FileSource};
///
/// let mut source = FileSource::new("sensors.json");
/// if let Some(update) = source.poll() {
///     println!("Got {} top-level keys", update.len());
/// }
/// ```
pub trait DataSource: Send + Debug {
    /// Poll for the latest update.
    ///
    /// Returns `Some(update)` if new data is available, `None` otherwise.
    /// This method should be non-blocking.
    fn poll(&mut self) -> Option<SensorUpdate>;

    /// Returns a human-readable description of the source.
    ///
    /// Used for display in the TUI status bar.
    fn description(&self) -> &str;

    /// Check if the source has encountered an error.
    ///
    /// Returns the error message if an error occurred during the last poll.
    fn error(&self) -> Option<&str>;
}
