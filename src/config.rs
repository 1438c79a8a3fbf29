//! Configuration management for laptopdoc
//!
//! Provides TOML-based configuration with defaults and validation.
//! Location: ~/.laptopdoc/config.toml

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{LaptopDocError, Result};

/// Complete configuration for laptopdoc
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub wizard: WizardConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub knowledge: KnowledgeConfig,
    #[serde(default)]
    pub paths: PathsConfig,
}

/// Wizard defaults
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WizardConfig {
    /// Brand preselected when the wizard starts
    pub default_brand: Option<String>,
}

/// Output configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub color_output: bool,
    pub output_format: String,
    pub default_verbosity: String,
}

/// Knowledge base source
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KnowledgeConfig {
    /// TOML knowledge base replacing the built-in tables
    pub path: Option<String>,
}

/// File system paths configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PathsConfig {
    pub history_file: String,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color_output: true,
            output_format: "text".to_string(),
            default_verbosity: "normal".to_string(),
        }
    }
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            history_file: "~/.laptopdoc/history".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file or use defaults
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(config_path) = path {
            Self::load_from_file(config_path)
        } else {
            Self::load_default()
        }
    }

    /// Load configuration from specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| LaptopDocError::ConfigError(format!("Failed to read config: {}", e)))?;

        let config: Config = toml::from_str(&contents)
            .map_err(|e| LaptopDocError::ConfigError(format!("Failed to parse config: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Load from the standard location or fall back to built-in defaults
    pub fn load_default() -> Result<Self> {
        if let Some(config_path) = Self::default_path() {
            if config_path.exists() {
                return Self::load_from_file(&config_path);
            }
        }

        Ok(Config::default())
    }

    /// Standard config file location
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".laptopdoc").join("config.toml"))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        match self.display.output_format.as_str() {
            "text" | "json" => {}
            other => {
                return Err(LaptopDocError::ConfigError(format!(
                    "Invalid output format: {}",
                    other
                )))
            }
        }

        match self.display.default_verbosity.as_str() {
            "quiet" | "normal" | "verbose" | "very_verbose" => {}
            other => {
                return Err(LaptopDocError::ConfigError(format!(
                    "Invalid verbosity level: {}",
                    other
                )))
            }
        }

        if let Some(brand) = &self.wizard.default_brand {
            if brand.trim().is_empty() {
                return Err(LaptopDocError::ConfigError(
                    "default_brand must not be empty".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Save configuration to file, creating parent directories
    pub fn save(&self, path: &Path) -> Result<()> {
        let contents = toml::to_string_pretty(self).map_err(|e| {
            LaptopDocError::ConfigError(format!("Failed to serialize config: {}", e))
        })?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, contents)?;

        Ok(())
    }

    /// Expand tilde in paths
    pub fn expand_path(path: &str) -> PathBuf {
        if let Some(rest) = path.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(path)
    }

    /// REPL input history file
    pub fn history_file(&self) -> PathBuf {
        Self::expand_path(&self.paths.history_file)
    }

    /// Knowledge base file, if one is configured
    pub fn knowledge_path(&self) -> Option<PathBuf> {
        self.knowledge.path.as_deref().map(Self::expand_path)
    }

    pub fn wants_json(&self) -> bool {
        self.display.output_format == "json"
    }
}
