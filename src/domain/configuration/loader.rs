//! Client configuration loading.

use std::path::{Path, PathBuf};

use tracing::debug;
use url::Url;

use crate::domain::{AppConfig, AppError};

pub const CONFIG_ENV: &str = "PUBFUND_CONFIG";
pub const RPC_URL_ENV: &str = "PUBFUND_RPC_URL";
pub const DEFAULT_CONFIG_FILE: &str = "pubfund.toml";

/// Where the configuration is read from: the explicit path, else
/// `PUBFUND_CONFIG`, else `./pubfund.toml`.
pub fn resolve_config_path(explicit: Option<&Path>) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    match std::env::var_os(CONFIG_ENV) {
        Some(value) if !value.is_empty() => PathBuf::from(value),
        _ => PathBuf::from(DEFAULT_CONFIG_FILE),
    }
}

/// Load, override from the environment, and validate the configuration.
pub fn load_config(explicit: Option<&Path>) -> Result<AppConfig, AppError> {
    let path = resolve_config_path(explicit);
    if !path.is_file() {
        return Err(AppError::ConfigMissing(path.display().to_string()));
    }

    debug!(path = %path.display(), "loading configuration");
    let content = std::fs::read_to_string(&path)?;
    let mut config: AppConfig = toml::from_str(&content)?;
    apply_env_overrides(&mut config)?;
    config.validate()?;
    Ok(config)
}

/// Parse configuration from string content.
pub fn parse_config_content(content: &str) -> Result<AppConfig, AppError> {
    let config: AppConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

fn apply_env_overrides(config: &mut AppConfig) -> Result<(), AppError> {
    if let Ok(raw) = std::env::var(RPC_URL_ENV) {
        let raw = raw.trim();
        if !raw.is_empty() {
            config.rpc.url = Url::parse(raw).map_err(|err| {
                AppError::InvalidConfig(format!("{} is not a valid URL: {}", RPC_URL_ENV, err))
            })?;
        }
    }
    Ok(())
}
