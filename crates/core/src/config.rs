//! Application configuration.
//!
//! Values are layered from built-in defaults, the TOML file under the user's
//! config directory, and `ICTINV_*` environment variables, in that order.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::Deserialize;
use tracing::info;

use crate::models::{DEFAULT_STATUS, DEFAULT_TYPE};

/// Directory under `~/.config` holding the configuration file.
pub const CONFIG_DIR: &str = "ictinv";
/// File name of the configuration file.
pub const CONFIG_FILE: &str = "config.toml";

const DEFAULT_CONFIG: &str = r#"# ictinv configuration

# Directory receiving ictinv.log, relative to the working directory.
log_dir = "logs"

# Type given to resources added without a prototype.
default_type = "other"

# Status given to newly added resources.
default_status = "available"

# How resources are printed: "text" or "json".
output = "text"
"#;

/// Rendering used when printing resources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// `Resource(code=.., name=.., type=.., status=..)`.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Resolved runtime settings.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Where the log file is written.
    pub log_dir: PathBuf,
    /// Type for resources added without a prototype.
    pub default_type: String,
    /// Status for resources added without a prototype.
    pub default_status: String,
    /// Resource rendering.
    pub output: OutputFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_dir: PathBuf::from("logs"),
            default_type: DEFAULT_TYPE.to_string(),
            default_status: DEFAULT_STATUS.to_string(),
            output: OutputFormat::Text,
        }
    }
}

impl AppConfig {
    /// Load from the default configuration file and the environment.
    pub fn load() -> Result<Self> {
        Self::load_from(default_config_path())
    }

    /// Load from `path` (which may be absent) and the environment.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let defaults = Self::default();
        let settings = Config::builder()
            .set_default("log_dir", defaults.log_dir.to_string_lossy().to_string())?
            .set_default("default_type", defaults.default_type)?
            .set_default("default_status", defaults.default_status)?
            .set_default("output", "text")?
            .add_source(File::from(path).required(false))
            .add_source(Environment::with_prefix("ICTINV"))
            .build()
            .with_context(|| format!("failed to read config {}", path.display()))?;

        settings
            .try_deserialize()
            .with_context(|| format!("invalid config {}", path.display()))
    }
}

/// Location of the configuration file under the user's config directory.
pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR)
        .join(CONFIG_FILE)
}

/// Write the default configuration file unless one already exists.
pub fn ensure_default_config() -> Result<PathBuf> {
    let path = default_config_path();
    write_default_config(&path)?;
    Ok(path)
}

fn write_default_config(path: &Path) -> Result<()> {
    if path.exists() {
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create config directory {}", parent.display()))?;
    }
    fs::write(path, DEFAULT_CONFIG)
        .with_context(|| format!("failed to write config {}", path.display()))?;
    info!("wrote default configuration to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() -> Result<()> {
        let dir = tempdir()?;
        let config = AppConfig::load_from(dir.path().join("absent.toml"))?;

        assert_eq!(config.log_dir, PathBuf::from("logs"));
        assert_eq!(config.default_type, DEFAULT_TYPE);
        assert_eq!(config.default_status, DEFAULT_STATUS);
        assert_eq!(config.output, OutputFormat::Text);
        Ok(())
    }

    #[test]
    fn file_overrides_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "default_status = \"in stock\"\noutput = \"json\"\n")?;

        let config = AppConfig::load_from(&path)?;
        assert_eq!(config.default_status, "in stock");
        assert_eq!(config.default_type, DEFAULT_TYPE);
        assert_eq!(config.output, OutputFormat::Json);
        Ok(())
    }

    #[test]
    fn written_default_matches_builtin_defaults() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nested").join(CONFIG_FILE);
        write_default_config(&path)?;
        assert!(path.is_file());

        let config = AppConfig::load_from(&path)?;
        let defaults = AppConfig::default();
        assert_eq!(config.log_dir, defaults.log_dir);
        assert_eq!(config.default_type, defaults.default_type);
        assert_eq!(config.default_status, defaults.default_status);
        assert_eq!(config.output, defaults.output);
        Ok(())
    }

    #[test]
    fn existing_file_is_left_alone() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "default_type = \"peripheral\"\n")?;

        write_default_config(&path)?;
        assert_eq!(fs::read_to_string(&path)?, "default_type = \"peripheral\"\n");
        Ok(())
    }

    #[test]
    fn rejects_unknown_output_format() -> Result<()> {
        let dir = tempdir()?;
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "output = \"yaml\"\n")?;

        assert!(AppConfig::load_from(&path).is_err());
        Ok(())
    }
}
