//! One CLI invocation's view of the data directory.
//!
//! Each run behaves like a page load: the calendar snapshot is read,
//! a store is hydrated from it and the remembered selection, and after a
//! mutation the canonical set is written back.

use std::path::{Path, PathBuf};

use agenda_core::config::AgendaConfig;
use agenda_core::storage::FileStorage;
use agenda_core::{Calendar, CalendarId, Hydration, SelectionStore};
use anyhow::{Context, Result};

/// Canonical calendar set, as a JSON array of calendar records
pub const SNAPSHOT_FILE: &str = "calendars.json";

pub struct Session {
    snapshot_path: PathBuf,
    store: SelectionStore<FileStorage>,
}

impl Session {
    pub fn open(config: &AgendaConfig, default_override: Option<CalendarId>) -> Result<Self> {
        let default_calendar = default_override.or(config.default_calendar);
        Self::open_at(&config.data_path(), &config.selection_key, default_calendar)
    }

    pub fn open_at(
        data_path: &Path,
        selection_key: &str,
        default_calendar: Option<CalendarId>,
    ) -> Result<Self> {
        let snapshot_path = data_path.join(SNAPSHOT_FILE);
        let calendars = load_snapshot(&snapshot_path)?;

        let store = SelectionStore::new(
            FileStorage::new(data_path),
            selection_key,
            Hydration::new(calendars).with_default(default_calendar),
        );

        Ok(Session {
            snapshot_path,
            store,
        })
    }

    pub fn store(&self) -> &SelectionStore<FileStorage> {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut SelectionStore<FileStorage> {
        &mut self.store
    }

    /// Write the canonical set back to the snapshot.
    pub fn save(&self) -> Result<()> {
        save_snapshot(&self.snapshot_path, self.store.calendars())
    }
}

fn load_snapshot(path: &Path) -> Result<Vec<Calendar>> {
    if !path.exists() {
        return Ok(vec![]);
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Could not read {}", path.display()))?;

    serde_json::from_str(&content).with_context(|| format!("Invalid calendar data in {}", path.display()))
}

fn save_snapshot(path: &Path, calendars: &[Calendar]) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }

    let content = serde_json::to_string_pretty(calendars)?;
    let temp = path.with_extension("json.tmp");
    std::fs::write(&temp, content)?;
    std::fs::rename(&temp, path)?;
    Ok(())
}
