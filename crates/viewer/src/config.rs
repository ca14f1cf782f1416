//! Viewer configuration management

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerConfig {
    pub viewer: ViewerSettings,
    pub ui: UiSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ViewerSettings {
    pub log_level: String,
    /// Log file used while the TUI owns the terminal. No file, no logs.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiSettings {
    /// Keyboard poll interval in milliseconds
    pub tick_rate_ms: u64,
    /// Width of the device list pane as a percentage of the terminal
    pub list_width_percent: u16,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            viewer: ViewerSettings {
                log_level: "info".to_string(),
                log_file: None,
            },
            ui: UiSettings {
                tick_rate_ms: 100,
                list_width_percent: 40,
            },
        }
    }
}

impl ViewerConfig {
    /// Default configuration path, `~/.config/usbscope/config.toml`.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("usbscope")
            .join("config.toml")
    }

    /// Load configuration from the specified path
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = if let Some(p) = path {
            p
        } else {
            let candidates = vec![
                Self::default_path(),
                PathBuf::from("/etc/usbscope/config.toml"),
            ];
            candidates
                .into_iter()
                .find(|p| p.exists())
                .ok_or_else(|| anyhow!("No configuration file found, using defaults"))?
        };

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: ViewerConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        config.validate()?;

        tracing::info!("Loaded configuration from: {}", config_path.display());
        Ok(config)
    }

    /// Load configuration or return defaults if not found
    pub fn load_or_default() -> Self {
        match Self::load(None) {
            Ok(config) => config,
            Err(e) => {
                // Logging may not be initialized yet
                eprintln!("Using default configuration: {}", e);
                Self::default()
            }
        }
    }

    /// Save configuration to the given path, creating parent directories
    pub fn save(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;
        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;
        Ok(())
    }

    fn validate(&self) -> Result<()> {
        if self.ui.tick_rate_ms == 0 {
            return Err(anyhow!("ui.tick_rate_ms must be non-zero"));
        }
        if !(10..=90).contains(&self.ui.list_width_percent) {
            return Err(anyhow!("ui.list_width_percent must be between 10 and 90"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = ViewerConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.viewer.log_level, "info");
        assert_eq!(config.ui.tick_rate_ms, 100);
    }

    #[test]
    fn save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = ViewerConfig::default();
        config.viewer.log_level = "debug".to_string();
        config.ui.list_width_percent = 50;
        config.save(&path).unwrap();

        let loaded = ViewerConfig::load(Some(path)).unwrap();
        assert_eq!(loaded.viewer.log_level, "debug");
        assert_eq!(loaded.ui.list_width_percent, 50);
    }

    #[test]
    fn rejects_zero_tick_rate() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[viewer]\nlog_level = \"info\"\n[ui]\ntick_rate_ms = 0\nlist_width_percent = 40\n",
        )
        .unwrap();
        assert!(ViewerConfig::load(Some(path)).is_err());
    }

    #[test]
    fn missing_optional_fields_use_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[viewer]\nlog_level = \"warn\"\n[ui]\ntick_rate_ms = 50\nlist_width_percent = 30\n",
        )
        .unwrap();
        let loaded = ViewerConfig::load(Some(path)).unwrap();
        assert_eq!(loaded.viewer.log_file, None);
    }
}
