//! Site configuration module.
//!
//! Two kinds of configuration live in the content directory:
//!
//! - `config.toml` at the content root: site identity and build mode. Loaded,
//!   merged over stock defaults, and validated. A broken `config.toml` fails
//!   the build.
//! - `config/pagination.yaml`: the number of articles per listing page. This
//!   file is edited alongside the content, so problems only log a warning and
//!   fall back to the default.
//!
//! ```text
//! content/
//! ├── config.toml              # Site config (overrides stock defaults)
//! └── config/
//!     └── pagination.yaml      # articles_per_page: 15
//! ```
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [site]
//! base_url = "https://example.com"   # Absolute URL of the deployed site
//! author = "Site Author"             # Person named in structured data
//! job_title = "Psychotherapist"
//! area_served = "Ontario, Canada"
//! known_languages = ["English", "Cantonese"]
//! contact_email = ""                 # Target of the hero "email me" link
//!
//! [build]
//! mode = "production"                # or "development"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse. Override just the values you want:
//!
//! ```toml
//! [site]
//! base_url = "https://therapy.example.org"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::cache::CachePolicy;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
///
/// All fields have sensible defaults. User config files need only specify
/// the values they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Site identity used in URLs and structured data.
    pub site: SiteSection,
    /// Build behaviour.
    pub build: BuildSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSection {
    /// Absolute URL the site is served from, without a trailing slash.
    pub base_url: String,
    pub author: String,
    pub job_title: String,
    pub area_served: String,
    pub known_languages: Vec<String>,
    /// Address for the inquiry `mailto:` link. Empty disables the link.
    pub contact_email: String,
}

impl Default for SiteSection {
    fn default() -> Self {
        Self {
            base_url: "https://example.com".to_string(),
            author: "Site Author".to_string(),
            job_title: "Psychotherapist".to_string(),
            area_served: "Ontario, Canada".to_string(),
            known_languages: vec!["English".to_string(), "Cantonese".to_string()],
            contact_email: String::new(),
        }
    }
}

impl SiteSection {
    /// `base_url` with any trailing slashes removed.
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuildSection {
    pub mode: RuntimeMode,
}

/// Production memoizes loaded content; development re-reads it on every call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeMode {
    #[default]
    Production,
    Development,
}

impl RuntimeMode {
    pub fn cache_policy(self) -> CachePolicy {
        match self {
            RuntimeMode::Production => CachePolicy::Memoize,
            RuntimeMode::Development => CachePolicy::Bypass,
        }
    }
}

impl std::fmt::Display for RuntimeMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            RuntimeMode::Production => "production",
            RuntimeMode::Development => "development",
        })
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let base_url = self.site.base_url();
        if base_url.is_empty() {
            return Err(ConfigError::Validation(
                "site.base_url must not be empty".into(),
            ));
        }
        if !base_url.starts_with("https://") && !base_url.starts_with("http://") {
            return Err(ConfigError::Validation(
                "site.base_url must start with http:// or https://".into(),
            ));
        }
        if self.site.author.trim().is_empty() {
            return Err(ConfigError::Validation(
                "site.author must not be empty".into(),
            ));
        }
        if !self.site.contact_email.is_empty() && !self.site.contact_email.contains('@') {
            return Err(ConfigError::Validation(
                "site.contact_email must be an email address".into(),
            ));
        }
        Ok(())
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
/// Returns `Err` if the file exists but contains invalid TOML.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// and validates the result.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(root)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# Practice Site Configuration
# ===========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Place this file at the content root (content/config.toml).
# Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Site identity
# ---------------------------------------------------------------------------
[site]
# Absolute URL the site is deployed to. Used for canonical links,
# the sitemap, and structured data.
base_url = "https://example.com"

# Practitioner named in article and service structured data.
author = "Site Author"
job_title = "Psychotherapist"
area_served = "Ontario, Canada"
known_languages = ["English", "Cantonese"]

# Address for the "email me" link on the home page.
# Leave empty to hide the link.
contact_email = ""

# ---------------------------------------------------------------------------
# Build
# ---------------------------------------------------------------------------
[build]
# "production" loads content once per build.
# "development" re-reads content files on every lookup.
mode = "production"
"##
}

// =============================================================================
// Pagination config (YAML, lenient)
// =============================================================================

pub const DEFAULT_ARTICLES_PER_PAGE: usize = 15;

/// Listing page size from `config/pagination.yaml`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    pub articles_per_page: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            articles_per_page: DEFAULT_ARTICLES_PER_PAGE,
        }
    }
}

/// Read `<root>/config/pagination.yaml`.
///
/// `articles_per_page` must be a positive integer. A missing file, an
/// unreadable file, or an invalid value logs and yields the default.
pub fn load_pagination(root: &Path) -> PaginationConfig {
    let path = root.join("config").join("pagination.yaml");
    let default = PaginationConfig::default();
    if !path.exists() {
        warn!(
            path = %path.display(),
            articles_per_page = default.articles_per_page,
            "pagination config not found, using default"
        );
        return default;
    }

    let parsed = fs::read_to_string(&path)
        .map_err(|e| e.to_string())
        .and_then(|s| serde_yaml::from_str::<serde_yaml::Value>(&s).map_err(|e| e.to_string()));
    let value = match parsed {
        Ok(value) => value,
        Err(err) => {
            error!(path = %path.display(), %err, "failed to load pagination config");
            return default;
        }
    };

    match value.get("articles_per_page") {
        None => default,
        Some(raw) => match raw.as_u64().filter(|n| *n > 0) {
            Some(n) => PaginationConfig {
                articles_per_page: usize::try_from(n).unwrap_or(DEFAULT_ARTICLES_PER_PAGE),
            },
            None => {
                warn!(
                    path = %path.display(),
                    articles_per_page = default.articles_per_page,
                    "invalid articles_per_page, using default"
                );
                default
            }
        },
    }
}
