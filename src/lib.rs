// Library crate: public API items may not be used by the binary
#![allow(unused)]

//! # irriwatch
//!
//! A diagnostic TUI and library for monitoring smart irrigation
//! controller activity.
//!
//! This crate receives live sensor updates from an irrigation controller
//! (soil moisture, temperature, humidity and water metrics for up to
//! four zones), maintains a rolling alert log and bounded time-series
//! chart buffers, and displays everything in an interactive terminal UI.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                        Application                          │
//! │  ┌─────────┐    ┌──────────┐    ┌─────────┐    ┌─────────┐ │
//! │  │  app    │───▶│   data   │───▶│   ui    │───▶│ Terminal│ │
//! │  │ (state) │    │(processing)   │(rendering)   │         │ │
//! │  └────┬────┘    └──────────┘    └─────────┘    └─────────┘ │
//! │       │                                                     │
//! │       ▼                                                     │
//! │  ┌─────────┐                                                │
//! │  │ source  │◀── FileSource | StreamSource | ChannelSource  │
//! │  │ (input) │                                                │
//! │  └─────────┘                                                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! - **[`app`]**: Application state, view navigation, and user interaction logic
//! - **[`source`]**: Data source abstraction ([`DataSource`] trait) with implementations
//!   for file polling, TCP streams, and channel-based input, plus historical loading
//! - **[`data`]**: Data models and processing - aligns historical readings onto a
//!   shared time axis, maintains rolling chart windows, computes zone status and alerts
//! - **[`ui`]**: Terminal rendering using ratatui - zone tables, line charts,
//!   alert log, and theme support
//!
//! ## Features
//!
//! - **Zones view**: Per-zone readings with moisture bars and watering status
//! - **Charts view**: Rolling soil moisture and climate time series
//! - **Alerts view**: Threshold violations with duplicate suppression
//! - **Historical seeding**: Charts start from a saved sensor-data dump
//!
//! ## Usage
//!
//! ### As a CLI tool
//!
//! ```bash
//! # Follow a JSON file the controller (or simulator) writes to
//! irriwatch --file sensors.json
//!
//! # Follow a live controller over TCP, charts seeded from history
//! irriwatch --connect 192.168.4.1:9090 --history history.json
//! ```
//!
//! ### As a library with file source
//!
//! ```
//! use irriwatch::{App, FileSource, Settings, Thresholds};
//!
//! let source = Box::new(FileSource::new("sensors.json"));
//! let app = App::new(source, Thresholds::default(), Settings::default().names());
//! ```
//!
//! ### As a library with stream source (TCP, etc.)
//!
//! ```no_run
//! use std::io::Cursor;
//! use irriwatch::{App, Settings, StreamSource, Thresholds};
//!
//! # tokio_test::block_on(async {
//! // Example with a cursor (in practice, use TcpStream)
//! let data = b"{}\n";
//! let stream = Cursor::new(data.to_vec());
//! let source = StreamSource::spawn(stream, "example");
//! let app = App::new(Box::new(source), Thresholds::default(), Settings::default().names());
//! # });
//! ```
//!
//! ### As a library with channel source (for embedding)
//!
//! ```
//! use irriwatch::{App, ChannelSource, Settings, Thresholds};
//!
//! // Create a channel for pushing updates
//! let (tx, source) = ChannelSource::create("ingest");
//!
//! // Create the app
//! let app = App::new(Box::new(source), Thresholds::default(), Settings::default().names());
//! ```

pub mod app;
pub mod data;
pub mod events;
pub mod settings;
pub mod source;
pub mod ui;

// Re-export main types for convenience
pub use app::App;
pub use data::{
    align, AlertLog, AlignedSeries, DashboardData, LiveCharts, MoistureStatus, Thresholds,
};
pub use settings::Settings;
pub use source::{
    load_history, ChannelSource, DataSource, FileSource, HistoricalSet, SensorUpdate, StreamSource,
};
