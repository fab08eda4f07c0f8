//! Stream-based data source.
//!
//! Receives sensor updates from an async byte stream. This is how the
//! TUI follows a live controller over TCP: one JSON update per line.

use std::sync::{Arc, Mutex};

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::sync::mpsc;

use super::{DataSource, SensorUpdate};

/// A data source that receives sensor updates from an async stream.
///
/// This source spawns a background task that reads newline-delimited
/// JSON from the provided async reader and makes updates available via
/// `poll()`.
///
/// # Example with a byte stream
///
/// ```
/// use std::io::Cursor;
/// use irriwatch::StreamSource;
///
/// # tokio_test::block_on(async {
/// let data = b"{}\n";
/// let stream = Cursor::new(data.to_vec());
/// let source = StreamSource::spawn(stream, "example");
/// # });
/// ```
#[derive(Debug)]
pub struct StreamSource {
    receiver: mpsc::Receiver<SensorUpdate>,
    description: String,
    last_error: Arc<Mutex<Option<String>>>,
}

impl StreamSource {
    /// Spawn a background task that reads from the given async reader.
    ///
    /// The reader should provide newline-delimited JSON updates. Each
    /// line is parsed as a complete `SensorUpdate`; a line that fails to
    /// parse is reported but does not end the stream.
    pub fn spawn<R>(reader: R, description: &str) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let (tx, rx) = mpsc::channel(16);
        let last_error = Arc::new(Mutex::new(None));
        let error_handle = last_error.clone();

        tokio::spawn(async move {
            let mut reader = BufReader::new(reader);
            let mut line = String::new();

            loop {
                line.clear();
                match reader.read_line(&mut line).await {
                    Ok(0) => {
                        // EOF
                        *error_handle.lock().unwrap() = Some("Connection closed".to_string());
                        break;
                    }
                    Ok(_) => match serde_json::from_str::<SensorUpdate>(line.trim()) {
                        Ok(update) => {
                            *error_handle.lock().unwrap() = None;
                            if tx.send(update).await.is_err() {
                                // Receiver dropped
                                break;
                            }
                        }
                        Err(e) => {
                            *error_handle.lock().unwrap() = Some(format!("Parse error: {}", e));
                        }
                    },
                    Err(e) => {
                        *error_handle.lock().unwrap() = Some(format!("Read error: {}", e));
                        break;
                    }
                }
            }
        });

        Self {
            receiver: rx,
            description: format!("stream: {}", description),
            last_error,
        }
    }

    /// Get the last error message, if any.
    pub fn last_error(&self) -> Option<String> {
        self.last_error.lock().unwrap().clone()
    }
}

impl DataSource for StreamSource {
    fn poll(&mut self) -> Option<SensorUpdate> {
        // Try to receive without blocking
        match self.receiver.try_recv() {
            Ok(update) => Some(update),
            Err(mpsc::error::TryRecvError::Empty) => None,
            Err(mpsc::error::TryRecvError::Disconnected) => {
                *self.last_error.lock().unwrap() = Some("Stream disconnected".to_string());
                None
            }
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        // The error lives behind a mutex shared with the reader task and
        // cannot be handed out as a plain reference; use last_error().
        None
    }
}
