//! Configuration management for rd.
//!
//! Parses `rd.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [ruby]
//! directive = "ruby"
//! fallback_tag = "div"
//!
//! [markdown]
//! gfm = true
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the recognized directive name.
    pub directive: Option<String>,
    /// Override the fallback container tag.
    pub fallback_tag: Option<String>,
    /// Override GFM support.
    pub gfm: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "rd.toml";

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Ruby directive configuration.
    pub ruby: RubyConfig,
    /// Markdown parser configuration.
    pub markdown: MarkdownConfig,

    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Ruby directive configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RubyConfig {
    /// Directive name recognized as `:name[...]`.
    pub directive: String,
    /// Container tag used when the content has no reading.
    pub fallback_tag: String,
}

impl Default for RubyConfig {
    fn default() -> Self {
        Self {
            directive: "ruby".to_owned(),
            fallback_tag: "div".to_owned(),
        }
    }
}

/// Markdown parser configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    /// Enable GitHub Flavored Markdown extensions.
    pub gfm: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self { gfm: true }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `rd.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading, so CLI arguments take precedence
    /// over config file values. The merged result is validated.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or a value is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let start_dir = std::env::current_dir()?;
        Self::load_from(config_path, &start_dir, cli_settings)
    }

    /// Same as [`load`](Self::load) with discovery starting at `start_dir`.
    fn load_from(
        config_path: Option<&Path>,
        start_dir: &Path,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config(start_dir) {
            tracing::debug!(path = %discovered.display(), "Discovered configuration file");
            Self::load_from_file(&discovered)?
        } else {
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(directive) = &settings.directive {
            self.ruby.directive.clone_from(directive);
        }
        if let Some(fallback_tag) = &settings.fallback_tag {
            self.ruby.fallback_tag.clone_from(fallback_tag);
        }
        if let Some(gfm) = settings.gfm {
            self.markdown.gfm = gfm;
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        start
            .ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.exists())
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ruby = &self.ruby;

        require_non_empty(&ruby.directive, "ruby.directive")?;
        if !ruby
            .directive
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
        {
            return Err(ConfigError::Validation(format!(
                "ruby.directive may only contain letters, digits, '-' and '_': {}",
                ruby.directive
            )));
        }

        require_non_empty(&ruby.fallback_tag, "ruby.fallback_tag")?;
        if !ruby.fallback_tag.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::Validation(format!(
                "ruby.fallback_tag must be an ASCII tag name: {}",
                ruby.fallback_tag
            )));
        }

        Ok(())
    }
}
