//! Channel-based data source.
//!
//! Receives sensor updates via a tokio watch channel. This is useful
//! when embedding the dashboard in a host process that already has the
//! updates in memory and pushes rather than polls.

use tokio::sync::watch;

use super::{DataSource, SensorUpdate};

/// A data source that receives sensor updates via a channel.
///
/// The producer (e.g. an ingest task) sends updates through the channel,
/// and this source provides them to the TUI.
///
/// # Example
///
/// ```
/// use irriwatch::ChannelSource;
///
/// // Create a channel pair
/// let (tx, source) = ChannelSource::create("ingest");
/// ```
#[derive(Debug)]
pub struct ChannelSource {
    receiver: watch::Receiver<SensorUpdate>,
    description: String,
}

impl ChannelSource {
    /// Create a new channel source.
    ///
    /// # Arguments
    ///
    /// * `receiver` - The receiving end of a watch channel
    /// * `source_description` - A description of where updates come from
    pub fn new(receiver: watch::Receiver<SensorUpdate>, source_description: &str) -> Self {
        let description = format!("channel: {}", source_description);
        Self {
            receiver,
            description,
        }
    }

    /// Create a channel pair for sending updates to a ChannelSource.
    ///
    /// Returns (sender, source) where the sender is used to push updates
    /// and the source can be handed to the TUI. The channel's initial
    /// empty value is never delivered; only sent updates are.
    pub fn create(source_description: &str) -> (watch::Sender<SensorUpdate>, Self) {
        let (tx, rx) = watch::channel(SensorUpdate::default());
        let source = Self::new(rx, source_description);
        (tx, source)
    }
}

impl DataSource for ChannelSource {
    fn poll(&mut self) -> Option<SensorUpdate> {
        // Check if there's a new value without blocking
        if self.receiver.has_changed().unwrap_or(false) {
            Some(self.receiver.borrow_and_update().clone())
        } else {
            None
        }
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn error(&self) -> Option<&str> {
        // Channel sources don't have file-based errors; a dropped sender
        // simply stops producing updates.
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_channel_source_poll() {
        let (tx, mut source) = ChannelSource::create("test");

        // The initial empty value is not delivered
        assert!(source.poll().is_none());

        // Send a new update
        let update: SensorUpdate =
            serde_json::from_value(json!({ "0": {"soil_moisture": 42.0} })).unwrap();
        tx.send(update).unwrap();

        // Now poll returns the new update
        let update = source.poll();
        assert!(update.is_some());
        assert!(update.unwrap().contains_key("0"));

        // No change, so poll returns None again
        assert!(source.poll().is_none());
    }

    #[test]
    fn test_channel_source_description() {
        let (_tx, source) = ChannelSource::create("ingest");
        assert_eq!(source.description(), "channel: ingest");
    }
}
