//! fwd-dash — operator dashboard for a syslog dispatcher/collector module.
//!
//! Run with:  `RUST_LOG=info fwd-dash [BASE_URL]`

use anyhow::Result;
use fwd_config::{default_path, load, normalize_base_url, DashConfig};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Structured logging — RUST_LOG controls verbosity (default: info).
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    tracing::info!("fwd-dash v{} starting", env!("CARGO_PKG_VERSION"));

    let mut config = load(default_path()).unwrap_or_else(|e| {
        tracing::warn!("{e}; using default settings");
        DashConfig::default()
    });

    // A base URL on the command line wins over the settings file.
    if let Some(url) = std::env::args().nth(1) {
        config.backend.base_url = normalize_base_url(&url)?;
    }

    fwd_shell::run(config).map_err(Into::into)
}
