use anyhow::{Context, Result};
use directories::ProjectDirs;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_CLIENT_VERSION, DEFAULT_IP_ADDRESS, DEFAULT_LANGUAGE,
    DEFAULT_PLATFORM, REQUEST_TIMEOUT_SECS,
};

/// Main configuration structure
///
/// Kept flat so every key maps onto one `GANGWAY_`-prefixed environment
/// variable (`GANGWAY_BASE_URL`, `GANGWAY_TIMEOUT_SECS`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Base address every relative endpoint resolves against. Empty
    /// until configured; calls then fail as network faults rather than
    /// at startup.
    pub base_url: String,

    /// Per-call timeout ceiling, in seconds
    pub timeout_secs: u64,

    /// `language` default header
    pub language: String,

    /// `platform` default header
    pub platform: String,

    /// `version` default header
    pub version: String,

    /// `ipAddress` default header
    pub ip_address: String,

    /// Colored terminal output
    pub color: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: REQUEST_TIMEOUT_SECS,
            language: DEFAULT_LANGUAGE.to_string(),
            platform: DEFAULT_PLATFORM.to_string(),
            version: DEFAULT_CLIENT_VERSION.to_string(),
            ip_address: DEFAULT_IP_ADDRESS.to_string(),
            color: true,
        }
    }
}

/// Load configuration from multiple sources
pub fn load_config() -> Result<AppConfig> {
    // Get config directories
    let config_dir = get_config_dir()?;
    let global_config = config_dir.join("config.toml");
    let local_config = PathBuf::from(".gangway/config.toml");

    // Build figment configuration
    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

    // Add global config if it exists
    if global_config.exists() {
        figment = figment.merge(Toml::file(&global_config));
    }

    // Add local config if it exists
    if local_config.exists() {
        figment = figment.merge(Toml::file(&local_config));
    }

    // Add environment variables (GANGWAY_ prefix)
    figment = figment.merge(Env::prefixed("GANGWAY_"));

    // Extract and return config
    figment.extract().context("Failed to load configuration")
}

/// Get the configuration directory
pub fn get_config_dir() -> Result<PathBuf> {
    if let Some(proj_dirs) = ProjectDirs::from("", "", "gangway") {
        let config_dir = proj_dirs.config_dir();
        std::fs::create_dir_all(config_dir)?;
        Ok(config_dir.to_path_buf())
    } else {
        // Fallback to home directory
        let home = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .context("Could not determine home directory")?;
        let config_dir = PathBuf::from(home).join(".config").join("gangway");
        std::fs::create_dir_all(&config_dir)?;
        Ok(config_dir)
    }
}

/// Save configuration to file
pub fn save_config(config: &AppConfig, path: Option<PathBuf>) -> Result<()> {
    let path = if let Some(p) = path {
        p
    } else {
        get_config_dir()?.join("config.toml")
    };

    let toml_string = toml::to_string_pretty(config)?;
    std::fs::write(&path, toml_string)
        .with_context(|| format!("Failed to write config to {}", path.display()))?;

    Ok(())
}

/// Create a default configuration file if it doesn't exist
pub fn init_config() -> Result<()> {
    let config_dir = get_config_dir()?;
    let config_file = config_dir.join("config.toml");

    if !config_file.exists() {
        let default_config = AppConfig::default();
        save_config(&default_config, Some(config_file.clone()))?;
        println!("Created default configuration at: {}", config_file.display());
    }

    // Create example local config
    let local_example = PathBuf::from(".gangway/config.toml.example");
    if !local_example.exists() {
        if let Some(parent) = local_example.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let example_config = r#"# Gangway Project Configuration
# This file overrides global settings for this project

base_url = "https://api.example.com"
timeout_secs = 30
language = "EN"
platform = "web"
"#;
        std::fs::write(&local_example, example_config)?;
        println!("Created example configuration at: {}", local_example.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn defaults_match_the_header_contract() {
        let config = AppConfig::default();
        assert_eq!(config.base_url, "");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.language, "EN");
        assert_eq!(config.platform, "web");
        assert_eq!(config.version, "1.0.0");
        assert_eq!(config.ip_address, "");
        assert!(config.color);
    }

    #[test]
    fn config_file_overrides_defaults_and_keeps_the_rest() {
        let figment = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::string("base_url = \"https://api.example.com\"\n"));
        let config: AppConfig = figment.extract().unwrap();

        assert_eq!(config.base_url, "https://api.example.com");
        assert_eq!(config.timeout_secs, 30);
        assert_eq!(config.language, "EN");
    }

    #[test]
    fn later_sources_win() {
        let figment = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::string("timeout_secs = 10\n"))
            .merge(Toml::string("timeout_secs = 60\n"));
        let config: AppConfig = figment.extract().unwrap();
        assert_eq!(config.timeout_secs, 60);
    }
}
