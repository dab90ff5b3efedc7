use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use modelforge_core::OptionDefaults;

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "modelforge.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("io error reading {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("toml decode error: {0}")]
    TomlDecode(#[from] toml::de::Error),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LogSettings {
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
    /// Append JSON lines to this file instead of stderr.
    pub path: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ForgeConfig {
    pub database_url: Option<String>,
    pub db_schema: Option<String>,
    pub schema_file: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub template_dir: Option<PathBuf>,
    pub extension: String,
    pub log: LogSettings,
    pub defaults: OptionDefaults,
}

impl Default for ForgeConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            db_schema: None,
            schema_file: None,
            output_dir: PathBuf::from("models"),
            template_dir: None,
            extension: "php".to_string(),
            log: LogSettings::default(),
            defaults: OptionDefaults::default(),
        }
    }
}

/// Load `path`, or `modelforge.toml` when it exists, or built-in defaults.
pub fn load_config(path: Option<&Path>) -> ConfigResult<ForgeConfig> {
    let path = match path {
        Some(path) => path,
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if !default_path.exists() {
                return Ok(ForgeConfig::default());
            }
            default_path
        }
    };

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_config(&content)
}

pub fn parse_config(content: &str) -> ConfigResult<ForgeConfig> {
    Ok(toml::from_str(content)?)
}
