use crate::utils::error::{BlobMonError, Result};
use crate::utils::validation::{
    parse_refresh_interval, validate_non_empty_string, validate_refresh_interval, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::sync::watch;

pub const DEFAULT_SETTINGS_PATH: &str = "blobmon.toml";
pub const DEFAULT_CONNECTION_PREFIX: &str = "AZURE_CONNECTION";
const KNOWN_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

fn default_log_level() -> String {
    "debug".to_string()
}

/// Contents of the settings file.
///
/// Keys other than the ones named here (including the per-account
/// `account_<N>_containers` overrides) are kept in `extra` so a save does
/// not drop them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub refresh_interval: u64,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_prefix: Option<String>,
    #[serde(flatten)]
    pub extra: toml::Table,
}

impl Settings {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                BlobMonError::ConfigNotFound {
                    path: path.display().to_string(),
                }
            } else {
                BlobMonError::IoError(e)
            }
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Static container list for an account index, if one is configured.
    pub fn containers_for(&self, index: usize) -> Option<Vec<String>> {
        let value = self.extra.get(&format!("account_{}_containers", index))?;
        let containers: Vec<String> = value
            .as_array()?
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect();
        Some(containers)
    }

    pub fn connection_prefix(&self) -> &str {
        self.connection_prefix
            .as_deref()
            .unwrap_or(DEFAULT_CONNECTION_PREFIX)
    }

    /// Normalized log level. Unknown values fall back to `debug`.
    pub fn log_level(&self) -> &str {
        let level = self.log_level.trim();
        KNOWN_LOG_LEVELS
            .iter()
            .find(|known| known.eq_ignore_ascii_case(level))
            .copied()
            .unwrap_or("debug")
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_refresh_interval(self.refresh_interval as i64)?;
        if let Some(prefix) = &self.connection_prefix {
            validate_non_empty_string("connection_prefix", prefix)?;
        }
        Ok(())
    }
}

/// Owns the settings for the life of the process.
///
/// The refresh interval is the only runtime-mutable value. Changing it goes
/// through [`SettingsStore::set_refresh_interval`], which validates, updates
/// memory, notifies subscribers and writes the file.
#[derive(Debug)]
pub struct SettingsStore {
    path: PathBuf,
    settings: Settings,
    interval_tx: watch::Sender<u64>,
}

impl SettingsStore {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let settings = Settings::from_file(&path)?;
        tracing::debug!("Settings loaded from {}", path.display());
        Ok(Self::new(path, settings))
    }

    pub fn new(path: PathBuf, settings: Settings) -> Self {
        let (interval_tx, _) = watch::channel(settings.refresh_interval);
        Self {
            path,
            settings,
            interval_tx,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn refresh_interval(&self) -> u64 {
        self.settings.refresh_interval
    }

    /// Receiver the refresh loop reads before each sleep.
    pub fn subscribe_interval(&self) -> watch::Receiver<u64> {
        self.interval_tx.subscribe()
    }

    pub fn set_refresh_interval(&mut self, raw: &str) -> Result<u64> {
        let interval = match parse_refresh_interval(raw) {
            Ok(interval) => interval,
            Err(e) => {
                tracing::warn!("Rejected refresh interval input '{}': {}", raw, e);
                return Err(e);
            }
        };

        self.settings.refresh_interval = interval;
        self.interval_tx.send_replace(interval);
        tracing::info!("refresh_interval updated to {} seconds", interval);

        // The in-memory value stays even when the write fails
        if let Err(e) = self.save() {
            tracing::error!("Failed to persist settings to {}: {}", self.path.display(), e);
            return Err(e);
        }
        Ok(interval)
    }

    pub fn save(&self) -> Result<()> {
        let content = self.settings.to_toml_string()?;
        std::fs::write(&self.path, content)?;
        tracing::debug!("Settings saved to {}", self.path.display());
        Ok(())
    }
}
