//! Configuration management
//!
//! Resolution order: built-in defaults, then the TOML config file, then
//! environment variables, then explicit CLI overrides. The config file never
//! holds credentials; API keys live only in process memory (see
//! [`crate::credential`]).

use std::fs;
use std::path::PathBuf;

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::backend::DEFAULT_BACKEND_URL;
use crate::voice::DEFAULT_LOCALE;
use crate::{Error, Result};

/// Resolved client configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Q&A backend base URL
    pub backend_url: String,
    /// Voice configuration
    pub voice: VoiceConfig,
}

/// Voice-related configuration
#[derive(Debug, Clone)]
pub struct VoiceConfig {
    /// Enable speech capture and output
    pub enabled: bool,
    /// Recognition locale
    pub locale: String,
}

impl Default for VoiceConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BACKEND_URL.to_string(),
            voice: VoiceConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        Self::load_with_options(None, false)
    }

    /// Load configuration with CLI overrides applied last
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load_with_options(backend_url: Option<&str>, disable_voice: bool) -> Result<Self> {
        let file = load_config_file()?;
        let mut config = Self::default();

        if let Some(url) = file.backend.url {
            config.backend_url = url;
        }
        if let Some(enabled) = file.voice.enabled {
            config.voice.enabled = enabled;
        }
        if let Some(locale) = file.voice.locale {
            config.voice.locale = locale;
        }

        if let Ok(url) = std::env::var("PARLEY_BACKEND_URL") {
            if !url.is_empty() {
                config.backend_url = url;
            }
        }
        if let Ok(locale) = std::env::var("PARLEY_LOCALE") {
            if !locale.is_empty() {
                config.voice.locale = locale;
            }
        }
        if std::env::var("PARLEY_DISABLE_VOICE").is_ok_and(|v| v == "1" || v == "true") {
            config.voice.enabled = false;
        }

        if let Some(url) = backend_url {
            config.backend_url = url.to_string();
        }
        if disable_voice {
            config.voice.enabled = false;
        }

        Ok(config)
    }
}

/// On-disk config file model (all fields optional)
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    /// Backend section
    #[serde(default)]
    pub backend: BackendFileConfig,
    /// Voice section
    #[serde(default)]
    pub voice: VoiceFileConfig,
}

/// `[backend]` section of the config file
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct BackendFileConfig {
    /// Base URL for the Q&A backend
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// `[voice]` section of the config file
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct VoiceFileConfig {
    /// Enable voice features
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    /// Recognition locale
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

/// Path to the config file, if a config directory can be determined
#[must_use]
pub fn config_file_path() -> Option<PathBuf> {
    ProjectDirs::from("dev", "parley", "parley").map(|dirs| dirs.config_dir().join("config.toml"))
}

/// Load the config file, returning defaults when it does not exist
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config_file() -> Result<ConfigFile> {
    let Some(path) = config_file_path() else {
        return Ok(ConfigFile::default());
    };
    if !path.exists() {
        return Ok(ConfigFile::default());
    }

    let raw = fs::read_to_string(&path)?;
    let file = toml::from_str(&raw)?;
    tracing::debug!(path = %path.display(), "config file loaded");
    Ok(file)
}

/// Write the config file, creating parent directories as needed
///
/// # Errors
///
/// Returns an error if the config directory cannot be determined or the
/// file cannot be written.
pub fn save_config_file(file: &ConfigFile) -> Result<PathBuf> {
    let path = config_file_path()
        .ok_or_else(|| Error::Config("could not determine config directory".to_string()))?;

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let raw = toml::to_string_pretty(file).map_err(|e| Error::Config(e.to_string()))?;
    fs::write(&path, raw)?;
    tracing::info!(path = %path.display(), "config file written");
    Ok(path)
}
