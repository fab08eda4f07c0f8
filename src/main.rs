// Binary includes library modules - some public API items are only for library consumers
#![allow(unused)]

use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Terminal,
};

mod app;
mod data;
mod events;
mod settings;
mod source;
mod ui;

use app::{App, View};
use data::{align, DashboardData, Thresholds};
use settings::Settings;
use source::{DataSource, FileSource, HistoricalSet, StreamSource};

#[derive(Parser, Debug)]
#[command(name = "irriwatch")]
#[command(about = "Diagnostic TUI for monitoring smart irrigation controller activity")]
struct Args {
    /// Path to a sensor update JSON file written by the controller or simulator
    #[arg(short, long, default_value = "sensors.json", conflicts_with = "connect")]
    file: PathBuf,

    /// Connect to a TCP endpoint streaming newline-delimited updates (host:port)
    #[arg(short, long)]
    connect: Option<String>,

    /// Historical sensor-data JSON used to seed the charts at startup
    #[arg(long)]
    history: Option<PathBuf>,

    /// Config file with zone names and threshold overrides (TOML)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Refresh interval in seconds (only used with --file)
    #[arg(short, long, default_value = "1")]
    refresh: u64,

    /// Soil moisture % below which a zone needs water
    #[arg(long)]
    moisture_low: Option<f64>,

    /// Temperature above which a high-temperature warning is raised
    #[arg(long)]
    temp_high: Option<f64>,

    /// Temperature below which a low-temperature notice is raised
    #[arg(long)]
    temp_low: Option<f64>,

    /// Humidity % below which a low-humidity notice is raised
    #[arg(long)]
    humidity_low: Option<f64>,

    /// Export current state to JSON file and exit
    #[arg(short, long, conflicts_with = "connect")]
    export: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load optional config file, then apply CLI overrides on top
    let settings = match &args.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    let mut thresholds = settings.apply_thresholds(Thresholds::default());
    if let Some(v) = args.moisture_low {
        thresholds.moisture_low = v;
    }
    if let Some(v) = args.temp_high {
        thresholds.temp_high = v;
    }
    if let Some(v) = args.temp_low {
        thresholds.temp_low = v;
    }
    if let Some(v) = args.humidity_low {
        thresholds.humidity_low = v;
    }
    let zone_names = settings.names();

    // Historical data is best-effort: a bad file leaves the charts empty
    let history = match &args.history {
        Some(path) => match source::load_history(path) {
            Ok(set) => Some(set),
            Err(e) => {
                println!("Warning: could not load history from {}: {}", path.display(), e);
                None
            }
        },
        None => None,
    };

    // Handle export mode (non-interactive)
    if let Some(export_path) = args.export {
        return export_to_file(&args.file, &export_path, &thresholds, &zone_names);
    }

    // Handle TCP connection mode
    if let Some(ref addr) = args.connect {
        return run_with_tcp(addr, thresholds, zone_names, history);
    }

    // Default: file-based mode
    let source = Box::new(FileSource::new(&args.file));
    run_tui(
        source,
        thresholds,
        zone_names,
        history,
        Duration::from_secs(args.refresh),
    )
}

/// Run with a TCP stream data source
fn run_with_tcp(
    addr: &str,
    thresholds: Thresholds,
    zone_names: Vec<String>,
    history: Option<HistoricalSet>,
) -> Result<()> {
    // Build a tokio runtime for the TCP connection
    let rt = tokio::runtime::Runtime::new()?;

    let source = rt.block_on(async {
        use tokio::net::TcpStream;

        println!("Connecting to {}...", addr);
        match TcpStream::connect(addr).await {
            Ok(stream) => {
                println!("Connected!");
                Ok(Box::new(StreamSource::spawn(stream, addr)) as Box<dyn DataSource>)
            }
            Err(e) => Err(anyhow::anyhow!("Failed to connect to {}: {}", addr, e)),
        }
    })?;

    // For TCP, we poll continuously (no refresh interval needed).
    // The runtime stays alive until this returns, keeping the reader task running.
    run_tui(
        source,
        thresholds,
        zone_names,
        history,
        Duration::from_millis(100),
    )
}

/// Run the TUI with the given data source
fn run_tui(
    source: Box<dyn DataSource>,
    thresholds: Thresholds,
    zone_names: Vec<String>,
    history: Option<HistoricalSet>,
    refresh_interval: Duration,
) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Setup panic hook to restore terminal
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
        original_hook(panic);
    }));

    // Create app, seed charts from history, and load initial data
    let mut app = App::new(source, thresholds, zone_names);
    if let Some(ref set) = history {
        app.seed_history(&align(set));
    }
    let _ = app.reload_data();

    // Run the main loop
    let result = run_app(&mut terminal, &mut app, refresh_interval);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    refresh_interval: Duration,
) -> Result<()> {
    let mut last_refresh = Instant::now();

    // Minimum terminal size for usable display
    const MIN_WIDTH: u16 = 70;
    const MIN_HEIGHT: u16 = 14;

    while app.running {
        // Draw UI
        terminal.draw(|frame| {
            let area = frame.area();

            // Check for minimum terminal size
            if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
                let msg = format!(
                    "Terminal too small: {}x{}\nMinimum: {}x{}\n\nResize to continue",
                    area.width, area.height, MIN_WIDTH, MIN_HEIGHT
                );
                let paragraph = ratatui::widgets::Paragraph::new(msg)
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(ratatui::style::Style::default().fg(ratatui::style::Color::Yellow));
                let centered = ratatui::layout::Rect::new(0, area.height / 2 - 2, area.width, 5);
                frame.render_widget(paragraph, centered);
                return;
            }

            let chunks = Layout::vertical([
                Constraint::Length(1), // Header bar
                Constraint::Length(1), // Tabs
                Constraint::Min(8),    // Content
                Constraint::Length(1), // Status bar
            ])
            .split(area);

            // Render header with system overview
            ui::common::render_header(frame, app, chunks[0]);

            // Render tabs
            ui::common::render_tabs(frame, app, chunks[1]);

            // Render current view
            match app.current_view {
                View::Zones => ui::zones::render(frame, app, chunks[2]),
                View::Charts => ui::charts::render(frame, app, chunks[2]),
                View::Alerts => ui::alerts::render(frame, app, chunks[2]),
            }

            // Render status bar
            ui::common::render_status_bar(frame, app, chunks[3]);

            // Render zone detail overlay if active
            if app.show_detail_overlay {
                ui::detail::render_overlay(frame, app, area);
            }

            // Render help overlay if active
            if app.show_help {
                ui::common::render_help(frame, app, area);
            }
        })?;

        // Poll for events with a short timeout
        if let Some(event) = events::poll_event(Duration::from_millis(100))? {
            match event {
                Event::Key(key) => events::handle_key_event(app, key),
                Event::Mouse(mouse) => {
                    // Content starts after header (1) + tabs (1) + table header (1)
                    events::handle_mouse_event(app, mouse, 3);
                }
                Event::Resize(_, _) => {
                    // Terminal will redraw on next iteration
                }
                _ => {}
            }
        }

        // Auto-refresh data periodically
        if last_refresh.elapsed() >= refresh_interval {
            let _ = app.reload_data();
            last_refresh = Instant::now();
        }
    }

    Ok(())
}

/// Export current controller state to a JSON file without starting the TUI
fn export_to_file(
    sensors_path: &std::path::Path,
    export_path: &std::path::Path,
    thresholds: &Thresholds,
    zone_names: &[String],
) -> Result<()> {
    let mut source = FileSource::new(sensors_path);
    let Some(update) = source.poll() else {
        anyhow::bail!(
            "Could not read {}: {}",
            sensors_path.display(),
            source.error().unwrap_or("no data")
        );
    };

    let mut data = DashboardData::new();
    data.apply(&update, thresholds);

    let zones: Vec<serde_json::Value> = data
        .zones
        .iter()
        .map(|z| {
            serde_json::json!({
                "id": z.id,
                "name": zone_names.get(z.id),
                "soil_moisture": z.reading.soil_moisture,
                "temperature": z.reading.temperature,
                "humidity": z.reading.humidity,
                "water_applied": z.reading.water_applied,
                "water_prediction": z.reading.water_prediction,
                "status": z.status.label()
            })
        })
        .collect();

    let export = serde_json::json!({
        "system": {
            "pump_running": data.pump_running,
            "active_zones": data.active_zones,
        },
        "zones": zones,
    });

    std::fs::write(export_path, serde_json::to_string_pretty(&export)?)?;
    println!("Exported controller state to: {}", export_path.display());
    Ok(())
}
