use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

pub const APP_NAME: &str = "panda-explorer";
const CONFIG_FILE: &str = "config.toml";

/// User-tunable settings. Every field is optional in the TOML file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerConfig {
    /// Rows materialised for the main preview.
    pub preview_rows: usize,
    /// Rows per partition materialised for the split preview.
    pub split_preview_rows: usize,
    /// Rows per partition shown while the split panel is collapsed.
    pub collapsed_split_rows: usize,
    pub histogram_bins: usize,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self {
            preview_rows: 50,
            split_preview_rows: 10,
            collapsed_split_rows: 3,
            histogram_bins: 20,
            window_width: 1200.0,
            window_height: 800.0,
        }
    }
}

impl ExplorerConfig {
    /// `<config dir>/panda-explorer/config.toml`, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Resolve the configuration: an explicit path wins, then the default
    /// location if the file exists, then built-in defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config = Self::from_toml_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;
        log::info!("loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("invalid TOML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.preview_rows == 0 {
            bail!("preview_rows must be at least 1");
        }
        if self.split_preview_rows == 0 {
            bail!("split_preview_rows must be at least 1");
        }
        if self.collapsed_split_rows == 0 {
            bail!("collapsed_split_rows must be at least 1");
        }
        if self.histogram_bins == 0 {
            bail!("histogram_bins must be at least 1");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(
            ExplorerConfig::from_toml_str("").unwrap(),
            ExplorerConfig::default()
        );
    }

    #[test]
    fn partial_file_overrides_some_fields() {
        let config = ExplorerConfig::from_toml_str("preview_rows = 100\nhistogram_bins = 8\n").unwrap();
        assert_eq!(config.preview_rows, 100);
        assert_eq!(config.histogram_bins, 8);
        assert_eq!(config.split_preview_rows, 10);
    }

    #[test]
    fn zero_rows_rejected() {
        assert!(ExplorerConfig::from_toml_str("preview_rows = 0").is_err());
        assert!(ExplorerConfig::from_toml_str("histogram_bins = 0").is_err());
        assert!(ExplorerConfig::from_toml_str("split_preview_rows = 0").is_err());
        let err = ExplorerConfig::from_toml_str("collapsed_split_rows = 0").unwrap_err();
        assert!(err.to_string().contains("collapsed_split_rows"));
    }

    #[test]
    fn explicit_path_is_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("explorer.toml");
        std::fs::write(&path, "split_preview_rows = 4\n").unwrap();
        let config = ExplorerConfig::load(Some(path.as_path())).unwrap();
        assert_eq!(config.split_preview_rows, 4);

        assert!(ExplorerConfig::load(Some(dir.path().join("missing.toml").as_path())).is_err());
    }
}
