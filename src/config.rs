//! Configuration file support for sbomscan.
//!
//! Provides YAML-based configuration through `sbomscan.config.yml`
//! files, merged with environment variables and CLI flags. Precedence:
//! CLI flag, then environment, then config file, then defaults.

use anyhow::{bail, Context};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::shared::Result;

const CONFIG_FILENAME: &str = "sbomscan.config.yml";

/// Default location of the SQLite database.
const DEFAULT_DATABASE: &str = "sbom_data.db";

/// Environment variable holding the forge API token.
const TOKEN_ENV: &str = "GITHUB_TOKEN";

/// Top-level configuration file schema.
#[derive(Debug, Deserialize, Default)]
pub struct ConfigFile {
    pub database: Option<String>,
    pub api_url: Option<String>,
    pub token: Option<String>,
    /// Captures unknown fields for warnings.
    #[serde(flatten)]
    pub unknown_fields: HashMap<String, serde_yaml_ng::Value>,
}

/// Load config from an explicit path. Returns an error if the file is not found.
pub fn load_config_from_path(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path).with_context(|| {
        format!(
            "Failed to read config file: {}\n\n💡 Hint: Check that the file exists and is readable.",
            path.display()
        )
    })?;

    let config: ConfigFile = serde_yaml_ng::from_str(&content).with_context(|| {
        format!(
            "Failed to parse config file: {}\n\n💡 Hint: Ensure the file contains valid YAML syntax.",
            path.display()
        )
    })?;

    validate_config(&config)?;
    warn_unknown_fields(&config);

    Ok(config)
}

/// Auto-discover config in a directory. Returns `None` silently if not found.
pub fn discover_config(dir: &Path) -> Result<Option<ConfigFile>> {
    let config_path = dir.join(CONFIG_FILENAME);
    if !config_path.exists() {
        return Ok(None);
    }
    load_config_from_path(&config_path).map(Some)
}

fn validate_config(config: &ConfigFile) -> Result<()> {
    if let Some(api_url) = &config.api_url {
        if !api_url.starts_with("http://") && !api_url.starts_with("https://") {
            bail!(
                "Invalid api_url in config: {}\n\n💡 Hint: The API base URL must start with http:// or https://",
                api_url
            );
        }
    }
    if let Some(database) = &config.database {
        if database.trim().is_empty() {
            bail!("Invalid database path in config: must not be empty");
        }
    }
    Ok(())
}

fn warn_unknown_fields(config: &ConfigFile) {
    for field in config.unknown_fields.keys() {
        eprintln!("⚠️  Unknown config field ignored: {}", field);
    }
}

/// Fully resolved runtime settings.
#[derive(Debug, Clone)]
pub struct Settings {
    pub database: PathBuf,
    pub api_url: String,
    pub token: Option<String>,
}

impl Settings {
    /// Merges CLI overrides, environment, and an optional config file.
    pub fn resolve(config: Option<ConfigFile>, database_override: Option<PathBuf>) -> Self {
        let config = config.unwrap_or_default();
        let token = std::env::var(TOKEN_ENV)
            .ok()
            .filter(|t| !t.is_empty())
            .or(config.token);

        Self {
            database: database_override
                .or_else(|| config.database.map(PathBuf::from))
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATABASE)),
            api_url: config
                .api_url
                .unwrap_or_else(|| "https://api.github.com".to_string()),
            token,
        }
    }
}
