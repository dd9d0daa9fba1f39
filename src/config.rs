//! Site configuration module.
//!
//! Handles loading and validating the optional `config.toml` at the source
//! root. Config files are sparse — override just the values you want:
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! extension = "md"          # Document extension (without the leading dot)
//!
//! [site]
//! base_path = "/sites/blog/posts"  # Published posts base path; relative
//!                                  # cover references resolve against it
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Extension of post documents, without the leading dot.
    pub extension: String,
    /// Published-site path settings.
    pub site: SitePaths,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SitePaths {
    /// Absolute base path the published post sources are served under.
    pub base_path: String,
}

fn default_extension() -> String {
    "md".to_string()
}

fn default_base_path() -> String {
    "/sites/blog/posts".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
            site: SitePaths::default(),
        }
    }
}

impl Default for SitePaths {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
        }
    }
}

impl SiteConfig {
    /// Validate config values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.extension.is_empty() {
            return Err(ConfigError::Validation(
                "extension must not be empty".to_string(),
            ));
        }
        if self.extension.starts_with('.') {
            return Err(ConfigError::Validation(format!(
                "extension must not include the leading dot (got {:?})",
                self.extension
            )));
        }
        if !self.site.base_path.starts_with('/') {
            return Err(ConfigError::Validation(format!(
                "site.base_path must be absolute (got {:?})",
                self.site.base_path
            )));
        }
        Ok(())
    }
}

/// Load `config.toml` from the source root, falling back to defaults when
/// the file does not exist.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let path = root.join("config.toml");
    let config = if path.is_file() {
        let content = fs::read_to_string(&path)?;
        toml::from_str(&content)?
    } else {
        SiteConfig::default()
    };
    config.validate()?;
    Ok(config)
}

/// A documented stock `config.toml` with every option at its default.
pub fn stock_config_toml() -> &'static str {
    r#"# postdex configuration — every option is optional; defaults shown.

# File extension of post documents, without the leading dot.
extension = "md"

[site]
# Absolute base path the published post sources are served under. Relative
# cover references resolve against this prefix plus the post's directory.
base_path = "/sites/blog/posts"
"#
}
