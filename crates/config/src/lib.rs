pub mod schema;
pub mod watcher;

pub use schema::{BackendConfig, DashConfig, ThemeConfig, WindowConfig};
pub use watcher::ConfigWatcher;

use fwd_core::{DashError, Result};
use std::path::{Path, PathBuf};

/// Load dashboard settings from a TOML file.  Returns `DashConfig::default()`
/// if the file doesn't exist so the dashboard always starts.
pub fn load(path: impl AsRef<Path>) -> Result<DashConfig> {
    let path = path.as_ref();
    if !path.exists() {
        tracing::warn!(
            "Settings file not found at '{}'; using defaults.",
            path.display()
        );
        return Ok(DashConfig::default());
    }

    let raw = std::fs::read_to_string(path)
        .map_err(|e| DashError::Config(format!("cannot read '{}': {e}", path.display())))?;

    parse(&raw)
}

/// Parse settings from TOML text and normalise them.
pub fn parse(raw: &str) -> Result<DashConfig> {
    let mut config: DashConfig =
        toml::from_str(raw).map_err(|e| DashError::Config(format!("TOML parse error: {e}")))?;
    config.backend.base_url = normalize_base_url(&config.backend.base_url)?;
    Ok(config)
}

/// Return the default settings path, honouring `$XDG_CONFIG_HOME`.
pub fn default_path() -> PathBuf {
    let base = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".config")
        });
    base.join("fwd-dash").join("fwd-dash.toml")
}

/// Endpoint names are appended directly to the base URL, so it must end in `/`.
pub fn normalize_base_url(url: &str) -> Result<String> {
    let url = url.trim();
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(DashError::Config(format!(
            "backend URL must start with http:// or https://, got '{url}'"
        )));
    }
    if url.ends_with('/') {
        Ok(url.to_string())
    } else {
        Ok(format!("{url}/"))
    }
}
