//! Global agenda configuration.

use std::path::{Path, PathBuf};

use ::config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::error::{AgendaError, AgendaResult};
use crate::id::CalendarId;
use crate::selection::DEFAULT_SELECTION_KEY;

static DEFAULT_DATA_PATH: &str = "~/agenda";

fn default_data_path() -> PathBuf {
    PathBuf::from(DEFAULT_DATA_PATH)
}

fn is_default_data_path(p: &PathBuf) -> bool {
    *p == default_data_path()
}

fn default_selection_key() -> String {
    DEFAULT_SELECTION_KEY.to_string()
}

fn is_default_selection_key(key: &String) -> bool {
    key == DEFAULT_SELECTION_KEY
}

/// Global configuration at ~/.config/agenda/config.toml
///
/// Every key can be overridden with an `AGENDA_`-prefixed environment
/// variable (`AGENDA_DATA_DIR`, `AGENDA_DEFAULT_CALENDAR`, ...).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AgendaConfig {
    #[serde(default = "default_data_path", skip_serializing_if = "is_default_data_path")]
    pub data_dir: PathBuf,

    /// Calendar selected when there is no remembered selection
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_calendar: Option<CalendarId>,

    /// Storage key of the remembered selection
    #[serde(
        default = "default_selection_key",
        skip_serializing_if = "is_default_selection_key"
    )]
    pub selection_key: String,
}

impl Default for AgendaConfig {
    fn default() -> Self {
        AgendaConfig {
            data_dir: default_data_path(),
            default_calendar: None,
            selection_key: default_selection_key(),
        }
    }
}

impl AgendaConfig {
    pub fn config_path() -> AgendaResult<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| AgendaError::Config("Could not determine config directory".into()))?
            .join("agenda");

        Ok(config_dir.join("config.toml"))
    }

    /// Load from the default location, creating a commented config file on first use.
    pub fn load() -> AgendaResult<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            Self::create_default_config(&config_path)?;
        }

        Self::load_from(&config_path)
    }

    pub fn load_from(path: &Path) -> AgendaResult<Self> {
        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("AGENDA"))
            .build()
            .map_err(|e| AgendaError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| AgendaError::Config(e.to_string()))
    }

    /// The data directory with `~` expanded.
    pub fn data_path(&self) -> PathBuf {
        let full_path_str = shellexpand::tilde(&self.data_dir.to_string_lossy()).into_owned();

        PathBuf::from(full_path_str)
    }

    /// Save the current config to ~/.config/agenda/config.toml
    pub fn save(&self) -> AgendaResult<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> AgendaResult<()> {
        let content =
            toml::to_string_pretty(self).map_err(|e| AgendaError::Config(e.to_string()))?;

        std::fs::write(path, content)
            .map_err(|e| AgendaError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }

    /// Create a default config file with all options commented out.
    pub fn create_default_config(path: &Path) -> AgendaResult<()> {
        let contents = format!(
            "\
# agenda configuration

# Where calendars and the remembered selection live:
# data_dir = \"{}\"

# Calendar to select when nothing else is remembered:
# default_calendar = 1

# Storage key for the remembered selection:
# selection_key = \"{}\"
",
            DEFAULT_DATA_PATH, DEFAULT_SELECTION_KEY
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AgendaError::Config(format!("Could not create config directory: {e}"))
            })?;
        }

        std::fs::write(path, contents)
            .map_err(|e| AgendaError::Config(format!("Could not write config file: {e}")))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("agenda/config.toml");

        AgendaConfig::create_default_config(&path).unwrap();
        let config = AgendaConfig::load_from(&path).unwrap();

        assert_eq!(config.data_dir, PathBuf::from("~/agenda"));
        assert_eq!(config.default_calendar, None);
        assert_eq!(config.selection_key, DEFAULT_SELECTION_KEY);
    }

    #[test]
    fn test_load_reads_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(
            &path,
            "data_dir = \"/tmp/agenda-data\"\ndefault_calendar = 7\nselection_key = \"work\"\n",
        )
        .unwrap();

        let config = AgendaConfig::load_from(&path).unwrap();
        assert_eq!(config.data_path(), PathBuf::from("/tmp/agenda-data"));
        assert_eq!(config.default_calendar, Some(CalendarId(7)));
        assert_eq!(config.selection_key, "work");
    }

    #[test]
    fn test_save_omits_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let config = AgendaConfig {
            default_calendar: Some(CalendarId(3)),
            ..Default::default()
        };
        config.save_to(&path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written.trim(), "default_calendar = 3");
    }
}
