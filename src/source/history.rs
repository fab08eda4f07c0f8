//! One-shot historical data loading.
//!
//! The controller's sensor-data endpoint returns a JSON object mapping
//! zone ids to lists of timestamped readings. Saving that response to a
//! file and passing it via `--history` seeds the charts at startup.

use std::fs;
use std::path::Path;

use anyhow::Result;

use super::update::HistoricalSet;

/// Load a historical data dump from a JSON file.
///
/// A missing or unparseable file is an error for the caller to report;
/// the charts simply start empty in that case.
pub fn load_history(path: &Path) -> Result<HistoricalSet> {
    let content = fs::read_to_string(path)?;
    let set: HistoricalSet = serde_json::from_str(&content)?;
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_history() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"{{
                "0": [
                    {{"timestamp": "2024-01-01T10:00:00Z", "soil_moisture": 40.0}},
                    {{"timestamp": "2024-01-01T10:05:00Z", "soil_moisture": 41.5}}
                ],
                "1": []
            }}"#
        )
        .unwrap();

        let set = load_history(file.path()).unwrap();
        assert_eq!(set.len(), 2);
        assert_eq!(set.get("0").unwrap().as_array().unwrap().len(), 2);
    }

    #[test]
    fn test_load_history_missing_file() {
        assert!(load_history(Path::new("/nonexistent/history.json")).is_err());
    }

    #[test]
    fn test_load_history_invalid_json() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[1, 2, 3").unwrap();
        assert!(load_history(file.path()).is_err());
    }
}
