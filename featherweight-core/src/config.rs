//! Configuration loading and management
//!
//! Configuration is loaded from `~/.config/featherweight/config.toml`
//!
//! Paths follow the XDG Base Directory Specification:
//! - Config: `$XDG_CONFIG_HOME/featherweight/` (~/.config/featherweight/)
//! - State/Logs: `$XDG_STATE_HOME/featherweight/` (~/.local/state/featherweight/)

use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Returns a best-effort home directory path.
fn home_dir() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Returns XDG_CONFIG_HOME or ~/.config
fn xdg_config_home() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".config"))
}

/// Returns XDG_STATE_HOME or ~/.local/state
fn xdg_state_home() -> PathBuf {
    std::env::var("XDG_STATE_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| home_dir().join(".local/state"))
}

/// Main configuration struct
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Insight report configuration
    #[serde(default)]
    pub report: ReportConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Limits and toggles for [`crate::patterns::InsightReport`] generation.
#[derive(Debug, Deserialize, Clone)]
pub struct ReportConfig {
    /// Number of sacred-number patterns to keep
    #[serde(default = "default_max_number_patterns")]
    pub max_number_patterns: usize,

    /// Number of archetypes to keep (detection itself never returns more than 3)
    #[serde(default = "default_max_archetypes")]
    pub max_archetypes: usize,

    /// Number of karmic themes to keep
    #[serde(default = "default_max_karmic_themes")]
    pub max_karmic_themes: usize,

    /// Number of synchronicity patterns to keep
    #[serde(default = "default_max_synchronicities")]
    pub max_synchronicities: usize,

    /// Number of temporal patterns to keep
    #[serde(default = "default_max_temporal_patterns")]
    pub max_temporal_patterns: usize,

    /// Run synchronicity detection over life events
    #[serde(default = "default_true")]
    pub include_synchronicities: bool,

    /// Run temporal cycle analysis
    #[serde(default = "default_true")]
    pub include_temporal: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_number_patterns: default_max_number_patterns(),
            max_archetypes: default_max_archetypes(),
            max_karmic_themes: default_max_karmic_themes(),
            max_synchronicities: default_max_synchronicities(),
            max_temporal_patterns: default_max_temporal_patterns(),
            include_synchronicities: true,
            include_temporal: true,
        }
    }
}

impl ReportConfig {
    /// Validate configuration, returning error message if invalid
    pub fn validate(&self) -> Result<()> {
        let limits = [
            ("report.max_number_patterns", self.max_number_patterns),
            ("report.max_archetypes", self.max_archetypes),
            ("report.max_karmic_themes", self.max_karmic_themes),
            ("report.max_synchronicities", self.max_synchronicities),
            ("report.max_temporal_patterns", self.max_temporal_patterns),
        ];
        for (key, value) in limits {
            if value == 0 {
                return Err(Error::Config(format!("{} must be at least 1", key)));
            }
        }
        Ok(())
    }
}

fn default_max_number_patterns() -> usize {
    5
}

fn default_max_archetypes() -> usize {
    3
}

fn default_max_karmic_themes() -> usize {
    6
}

fn default_max_synchronicities() -> usize {
    10
}

fn default_max_temporal_patterns() -> usize {
    10
}

fn default_true() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Maximum number of log files to keep
    #[serde(default = "default_max_log_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            max_files: default_max_log_files(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_max_log_files() -> usize {
    5
}

impl Config {
    /// Load configuration from the default path
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();

        if !config_path.exists() {
            tracing::info!("No config file found at {:?}, using defaults", config_path);
            return Ok(Config::default());
        }

        Self::load_from(&config_path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("failed to read config file {:?}: {}", path, e)))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("failed to parse config: {}", e)))?;

        config.report.validate()?;
        Ok(config)
    }

    /// Returns the default config file path
    ///
    /// `$XDG_CONFIG_HOME/featherweight/config.toml` (~/.config/featherweight/config.toml)
    pub fn config_path() -> PathBuf {
        xdg_config_home().join("featherweight").join("config.toml")
    }

    /// Returns the state directory path (for logs)
    ///
    /// `$XDG_STATE_HOME/featherweight/` (~/.local/state/featherweight/)
    pub fn state_dir() -> PathBuf {
        xdg_state_home().join("featherweight")
    }

    /// Returns the log file path
    pub fn log_path() -> PathBuf {
        Self::state_dir().join("featherweight.log")
    }
}
