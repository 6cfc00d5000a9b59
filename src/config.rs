//! Configuration
//!
//! `<home>/config.toml`, every section and key optional:
//!
//! ```toml
//! [llm]
//! base_url = "https://api.openai.com/v1"
//! model = "gpt-4o"
//! max_tokens = 4096
//!
//! [render]
//! mmdc = "mmdc"
//!
//! [export]
//! output_dir = "."
//!
//! [logging]
//! level = "info"
//! json = false
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::diagram::DEFAULT_MMDC;
use crate::llm::adapters::DEFAULT_BASE_URL;
use crate::llm::types::{ModelSettings, DEFAULT_MAX_TOKENS, DEFAULT_MODEL};

/// Environment variable overriding `[render] mmdc`
pub const MMDC_ENV: &str = "SCHEMASCRIBE_MMDC";

const CONFIG_FILE: &str = "config.toml";
const STORE_FILE: &str = "store.toml";
const LOG_DIR: &str = "logs";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {path}: {message}")]
    Parse { path: String, message: String },
}

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub llm: LlmConfig,
    pub render: RenderConfig,
    pub export: ExportConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Mermaid CLI executable
    pub mmdc: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            mmdc: PathBuf::from(DEFAULT_MMDC),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory receiving `database-diagram.png`
    pub output_dir: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    pub level: String,
    /// One JSON object per line instead of plain text
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl AppConfig {
    /// Load from a file; a missing file yields defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                return Ok(Self::default());
            }
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.display().to_string(),
                    source,
                })
            }
        };
        Self::from_toml_str(&content).map_err(|message| ConfigError::Parse {
            path: path.display().to_string(),
            message,
        })
    }

    /// Parse TOML text
    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Apply environment overrides
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(mmdc) = std::env::var_os(MMDC_ENV).filter(|v| !v.is_empty()) {
            self.render.mmdc = PathBuf::from(mmdc);
        }
        self
    }

    pub fn model_settings(&self) -> ModelSettings {
        ModelSettings {
            model: self.llm.model.clone(),
            max_tokens: self.llm.max_tokens,
        }
    }
}

/// Files under the application home directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    home: PathBuf,
}

impl AppPaths {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self { home: home.into() }
    }

    pub fn home(&self) -> &Path {
        &self.home
    }

    pub fn config_file(&self) -> PathBuf {
        self.home.join(CONFIG_FILE)
    }

    /// Persistent key/value store (holds the API key)
    pub fn store_file(&self) -> PathBuf {
        self.home.join(STORE_FILE)
    }

    pub fn log_dir(&self) -> PathBuf {
        self.home.join(LOG_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.llm.base_url, "https://api.openai.com/v1");
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.llm.max_tokens, 4096);
        assert_eq!(config.render.mmdc, PathBuf::from("mmdc"));
        assert_eq!(config.export.output_dir, PathBuf::from("."));
        assert_eq!(config.logging.level, "info");
        assert!(!config.logging.json);
    }

    #[test]
    fn test_partial_config_keeps_other_defaults() {
        let config = AppConfig::from_toml_str(
            r#"[llm]
model = "gpt-4o-mini"
"#,
        )
        .unwrap();
        assert_eq!(config.llm.model, "gpt-4o-mini");
        assert_eq!(config.llm.max_tokens, 4096);
        assert_eq!(config.render, RenderConfig::default());
    }

    #[test]
    fn test_invalid_config_is_error() {
        assert!(AppConfig::from_toml_str("[llm]\nmax_tokens = \"lots\"").is_err());
    }

    #[test]
    fn test_load_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_reports_path_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[render\n").unwrap();
        let err = AppConfig::load(&path).unwrap_err();
        assert!(err.to_string().contains("config.toml"));
    }

    #[test]
    fn test_model_settings_from_config() {
        let mut config = AppConfig::default();
        config.llm.max_tokens = 2048;
        assert_eq!(config.model_settings().max_tokens, 2048);
    }

    #[test]
    fn test_app_paths() {
        let paths = AppPaths::new("/home/u/.config/schemascribe");
        assert_eq!(
            paths.store_file(),
            PathBuf::from("/home/u/.config/schemascribe/store.toml")
        );
        assert_eq!(
            paths.log_dir(),
            PathBuf::from("/home/u/.config/schemascribe/logs")
        );
    }
}
