pub mod calendar;
pub mod calendars;
pub mod config;
pub mod event;
pub mod select;
pub mod show;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Parse a record given inline as JSON, or as `@path` to a JSON file.
pub fn parse_record<T: DeserializeOwned>(arg: &str) -> Result<T> {
    let content = match arg.strip_prefix('@') {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Could not read {}", path))?
        }
        None => arg.to_string(),
    };

    serde_json::from_str(&content).context("Invalid JSON record")
}
