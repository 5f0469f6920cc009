use anyhow::{Result, anyhow};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use ruleprint_reports::{EncodeOptions, OutputFormat, ReportMetadata};

use crate::cli::args::RenderArgs;

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct RuleprintConfig {
    #[serde(default)]
    pub render: RenderConfig,

    #[serde(default)]
    pub metadata: MetadataConfig,
}

/// Encoding settings for the JSON document
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct RenderConfig {
    /// Output layout: "pretty" (default) or "compact"
    #[serde(default = "default_format")]
    pub format: String,

    /// Write "/" as "\/"
    #[serde(default = "default_true")]
    pub escape_slashes: bool,

    /// Write non-ASCII characters as \uXXXX escapes
    #[serde(default = "default_true")]
    pub escape_unicode: bool,
}

/// Producer metadata written at the top of every report
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct MetadataConfig {
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default = "default_package")]
    pub package: String,
}

fn default_format() -> String {
    "pretty".to_string()
}

fn default_true() -> bool {
    true
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_package() -> String {
    "ruleprint".to_string()
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            format: default_format(),
            escape_slashes: default_true(),
            escape_unicode: default_true(),
        }
    }
}

impl Default for MetadataConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            package: default_package(),
        }
    }
}

impl RenderConfig {
    pub fn output_format(&self) -> OutputFormat {
        match self.format.parse() {
            Ok(format) => format,
            Err(_) => {
                tracing::warn!(
                    "Unknown format '{}' in config, defaulting to 'pretty'. Valid values: 'pretty', 'compact'",
                    self.format
                );
                OutputFormat::Pretty
            }
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Invalid value in {field}: {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// One configuration file as written: only the keys it sets are `Some`.
#[derive(Deserialize, Debug, Clone, Default)]
pub struct ConfigLayer {
    #[serde(default)]
    pub render: RenderLayer,

    #[serde(default)]
    pub metadata: MetadataLayer,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct RenderLayer {
    pub format: Option<String>,
    pub escape_slashes: Option<bool>,
    pub escape_unicode: Option<bool>,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct MetadataLayer {
    pub version: Option<String>,
    pub package: Option<String>,
}

impl ConfigLayer {
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let layer: ConfigLayer = toml::from_str(&content)?;
        Ok(layer)
    }
}

impl RuleprintConfig {
    /// Apply every key the layer sets, including ones equal to the defaults.
    pub fn merge(&mut self, layer: &ConfigLayer) {
        if let Some(ref format) = layer.render.format {
            self.render.format = format.clone();
        }
        if let Some(escape_slashes) = layer.render.escape_slashes {
            self.render.escape_slashes = escape_slashes;
        }
        if let Some(escape_unicode) = layer.render.escape_unicode {
            self.render.escape_unicode = escape_unicode;
        }

        if let Some(ref version) = layer.metadata.version {
            self.metadata.version = version.clone();
        }
        if let Some(ref package) = layer.metadata.package {
            self.metadata.package = package.clone();
        }
    }

    pub fn generate_default_config() -> String {
        toml::to_string_pretty(&Self::default()).unwrap_or_else(|_| {
            format!(
                r#"[render]
format = "pretty"
escape_slashes = true
escape_unicode = true

[metadata]
version = "{}"
package = "ruleprint"
"#,
                default_version()
            )
        })
    }

    /// Get the user config file path (~/.config/ruleprint/config.toml)
    pub fn get_user_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config/ruleprint/config.toml"))
    }

    /// Get the current directory config file path (./ruleprint.toml)
    pub fn get_current_config_path() -> PathBuf {
        PathBuf::from("./ruleprint.toml")
    }

    /// Implicit config files, lowest priority first:
    /// 1. User config (~/.config/ruleprint/config.toml)
    /// 2. Current directory (./ruleprint.toml)
    pub fn default_layer_paths() -> Vec<PathBuf> {
        let mut paths = Vec::new();
        if let Some(user_path) = Self::get_user_config_path() {
            paths.push(user_path);
        }
        paths.push(Self::get_current_config_path());
        paths
    }

    /// Merge the implicit config files that exist, in order. Missing files are skipped.
    pub fn load_with_merged_configs(layer_paths: &[PathBuf]) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for path in layer_paths {
            if path.exists() {
                let layer = ConfigLayer::load_from_file(path)?;
                config.merge(&layer);
                tracing::debug!("Loaded config layer from: {}", path.display());
            }
        }

        Ok(config)
    }

    pub fn apply_env_vars(&mut self, env_vars: &HashMap<String, String>) -> Result<()> {
        for (key, value) in env_vars {
            if let Some(config_key) = key.strip_prefix("RULEPRINT_") {
                match config_key {
                    "RENDER_FORMAT" => self.render.format = value.clone(),
                    "RENDER_ESCAPE_SLASHES" => {
                        self.render.escape_slashes = value
                            .parse()
                            .map_err(|_| anyhow!("Invalid escape_slashes value: {}", value))?;
                    }
                    "RENDER_ESCAPE_UNICODE" => {
                        self.render.escape_unicode = value
                            .parse()
                            .map_err(|_| anyhow!("Invalid escape_unicode value: {}", value))?;
                    }
                    "METADATA_VERSION" => self.metadata.version = value.clone(),
                    "METADATA_PACKAGE" => self.metadata.package = value.clone(),
                    _ => {}
                }
            }
        }
        Ok(())
    }

    pub fn apply_render_args(&mut self, args: &RenderArgs) {
        if let Some(ref format) = args.format {
            self.render.format = format.clone();
        }
    }

    /// Load configuration with full precedence chain:
    /// 1. Default values (lowest)
    /// 2. User config (~/.config/ruleprint/config.toml)
    /// 3. Current directory (./ruleprint.toml)
    /// 4. Explicit --config file
    /// 5. Environment variables (RULEPRINT_*)
    /// 6. CLI arguments (highest)
    pub fn load_with_precedence(
        config_path: Option<&Path>,
        cli_args: &RenderArgs,
        env_vars: &HashMap<String, String>,
    ) -> Result<Self> {
        Self::resolve(&Self::default_layer_paths(), config_path, cli_args, env_vars)
    }

    /// The precedence chain of [`load_with_precedence`](Self::load_with_precedence)
    /// over caller-chosen implicit layer files.
    pub fn resolve(
        layer_paths: &[PathBuf],
        config_path: Option<&Path>,
        cli_args: &RenderArgs,
        env_vars: &HashMap<String, String>,
    ) -> Result<Self> {
        let mut config = Self::load_with_merged_configs(layer_paths)?;

        if let Some(path) = config_path {
            let explicit_layer = ConfigLayer::load_from_file(path)
                .map_err(|e| anyhow!("Failed to load config file {}: {}", path.display(), e))?;
            config.merge(&explicit_layer);
            tracing::debug!("Loaded config from: {}", path.display());
        }

        config.apply_env_vars(env_vars)?;
        config.apply_render_args(cli_args);
        config.validate()?;

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Err(reason) = self.render.format.parse::<OutputFormat>() {
            return Err(ConfigError::InvalidValue {
                field: "render.format".to_string(),
                value: self.render.format.clone(),
                reason,
            });
        }

        if self.metadata.version.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "metadata.version".to_string(),
                value: self.metadata.version.clone(),
                reason: "must not be empty".to_string(),
            });
        }

        if self.metadata.package.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "metadata.package".to_string(),
                value: self.metadata.package.clone(),
                reason: "must not be empty".to_string(),
            });
        }

        Ok(())
    }

    pub fn to_encode_options(&self) -> EncodeOptions {
        EncodeOptions {
            format: self.render.output_format(),
            escape_slashes: self.render.escape_slashes,
            escape_unicode: self.render.escape_unicode,
        }
    }

    pub fn to_metadata(&self) -> ReportMetadata {
        ReportMetadata::new(self.metadata.version.clone(), self.metadata.package.clone())
    }
}
