//! Surat Desa configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::domain::SettingsSnapshot;
use crate::print::{DEFAULT_MARGIN, DEFAULT_PAGE_SIZE, DEFAULT_SETTLE_DELAY, PrintLayout, SpoolOpener};

/// Main configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[serde(rename = "log-level")]
    pub log_level: Option<String>,

    /// Village identity and signing officer
    pub settings: SettingsSnapshot,

    /// Template lookup
    pub templates: TemplatesConfig,

    /// Rendering options
    pub render: RenderConfig,

    /// Printing
    pub print: PrintConfig,
}

impl Config {
    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, try to load it
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .suratdesa.yml
        let local_config = PathBuf::from(".suratdesa.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/suratdesa/suratdesa.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("suratdesa").join("suratdesa.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        // No config file found, use defaults
        tracing::info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Read just the log level, before logging is set up. Errors are ignored:
    /// the full load reports them once logging works.
    pub fn load_log_level(config_path: Option<&PathBuf>) -> Option<String> {
        let candidates: Vec<PathBuf> = match config_path {
            Some(path) => vec![path.clone()],
            None => [
                Some(PathBuf::from(".suratdesa.yml")),
                dirs::config_dir().map(|d| d.join("suratdesa").join("suratdesa.yml")),
            ]
            .into_iter()
            .flatten()
            .collect(),
        };

        candidates
            .iter()
            .find(|p| p.exists())
            .and_then(|p| Self::load_from_file(p).ok())
            .and_then(|c| c.log_level)
    }

    fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Template lookup configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplatesConfig {
    /// Directory of `<tag>.html` templates, checked after `.suratdesa/templates/`
    pub dir: PathBuf,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("templates"),
        }
    }
}

/// Rendering configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// HTML-escape substituted values
    #[serde(rename = "escape-values")]
    pub escape_values: bool,
}

/// Print configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PrintConfig {
    /// CSS page size
    #[serde(rename = "page-size")]
    pub page_size: String,

    /// CSS page margin
    pub margin: String,

    /// Delay between writing the body and printing, in milliseconds
    #[serde(rename = "settle-delay-ms")]
    pub settle_delay_ms: u64,

    /// Directory spooled documents are written to
    #[serde(rename = "spool-dir")]
    pub spool_dir: PathBuf,

    /// Print command; the spooled file path is appended as the last argument
    pub command: Vec<String>,

    /// Keep spooled files after printing
    #[serde(rename = "keep-spool")]
    pub keep_spool: bool,
}

impl Default for PrintConfig {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE.to_string(),
            margin: DEFAULT_MARGIN.to_string(),
            settle_delay_ms: DEFAULT_SETTLE_DELAY.as_millis() as u64,
            spool_dir: std::env::temp_dir().join("suratdesa").join("spool"),
            command: vec!["lp".to_string()],
            keep_spool: false,
        }
    }
}

impl PrintConfig {
    pub fn layout(&self) -> PrintLayout {
        PrintLayout {
            page_size: self.page_size.clone(),
            margin: self.margin.clone(),
            settle_delay: Duration::from_millis(self.settle_delay_ms),
        }
    }

    pub fn opener(&self) -> SpoolOpener {
        SpoolOpener::new(&self.spool_dir, self.command.clone()).keep_spool(self.keep_spool)
    }
}
