//! Configuration management for kroki2md.
//!
//! Parses `kroki2md.toml` configuration files with serde and provides
//! auto-discovery of the config file in parent directories.
//!
//! CLI settings can be applied during load via [`CliSettings`].
//!
//! ```toml
//! [kroki]
//! url = "https://kroki.example.com"
//! format = "svg"
//!
//! [extensions]
//! mdd = "mermaid"
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use k2m_diagrams::{DEFAULT_KROKI_URL, DiagramFormat, DiagramLanguage, ExtensionMap};
use serde::Deserialize;

/// Configuration filename to search for.
pub const CONFIG_FILENAME: &str = "kroki2md.toml";

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override Kroki service URL.
    pub kroki_url: Option<String>,
    /// Override output format.
    pub format: Option<DiagramFormat>,
}

/// Raw configuration file as parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    kroki: KrokiSection,
    extensions: BTreeMap<String, String>,
}

/// Raw `[kroki]` section.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct KrokiSection {
    url: Option<String>,
    format: Option<String>,
}

/// Resolved application configuration.
#[derive(Debug)]
pub struct Config {
    /// Kroki service base URL.
    pub kroki_url: String,
    /// Output format for generated links.
    pub format: DiagramFormat,
    /// Extension to diagram language mapping (defaults plus configured entries).
    pub extensions: ExtensionMap,
    /// Path to the config file, if one was loaded.
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            kroki_url: DEFAULT_KROKI_URL.to_owned(),
            format: DiagramFormat::default(),
            extensions: ExtensionMap::default(),
            config_path: None,
        }
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

/// Require a URL field to be a non-empty http:// or https:// URL.
fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if url.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `kroki2md.toml` in the current directory and
    /// its parents, falling back to defaults.
    ///
    /// CLI settings are applied after loading, so CLI arguments take
    /// precedence over config file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or a value is invalid.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let discovered = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Some(path.to_path_buf())
            }
            None => std::env::current_dir()
                .ok()
                .and_then(|cwd| Self::discover_from(&cwd)),
        };

        let mut config = match discovered {
            Some(path) => Self::load_from_file(&path)?,
            None => Self::default(),
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Search for the config file in `start` and its parents.
    #[must_use]
    pub fn discover_from(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config = Self::from_toml(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Parse and resolve configuration from TOML text.
    fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let file: ConfigFile = toml::from_str(content)?;
        Self::resolve(file)
    }

    /// Turn the raw file into resolved configuration.
    fn resolve(file: ConfigFile) -> Result<Self, ConfigError> {
        let format = match file.kroki.format.as_deref() {
            Some(name) => DiagramFormat::parse(name).ok_or_else(|| {
                ConfigError::Validation(format!(
                    "kroki.format must be one of svg, png (got '{name}')"
                ))
            })?,
            None => DiagramFormat::default(),
        };

        let mut extensions = ExtensionMap::default();
        for (extension, language_name) in &file.extensions {
            if extension.is_empty() || extension.contains('.') {
                return Err(ConfigError::Validation(format!(
                    "extensions key '{extension}' must be a bare extension without dots"
                )));
            }
            let language = DiagramLanguage::parse(language_name).ok_or_else(|| {
                ConfigError::Validation(format!(
                    "extensions.{extension}: unknown diagram language '{language_name}'"
                ))
            })?;
            extensions.insert(extension.clone(), language);
        }

        Ok(Self {
            kroki_url: file
                .kroki
                .url
                .unwrap_or_else(|| DEFAULT_KROKI_URL.to_owned()),
            format,
            extensions,
            config_path: None,
        })
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(kroki_url) = &settings.kroki_url {
            self.kroki_url.clone_from(kroki_url);
        }
        if let Some(format) = settings.format {
            self.format = format;
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the Kroki URL is not an http(s) URL.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_http_url(&self.kroki_url, "kroki.url")
    }
}
