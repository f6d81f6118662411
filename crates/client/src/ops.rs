//! Config round trips, one function per call shape.

use crate::backend::Backend;
use fwd_core::{ConfigState, Result};
use tracing::{debug, info};

/// Fetch the module's configuration.  The caller replaces its local copy
/// with the result wholesale.
pub async fn load(backend: &dyn Backend) -> Result<ConfigState> {
    let config = backend.get_config().await?;
    debug!(fields = config.len(), "config loaded");
    Ok(config)
}

/// Send the whole local configuration.
///
/// Fire-and-forget: callers dispatch this without waiting on it, and the
/// result only feeds a status line.
pub async fn save(backend: &dyn Backend, config: ConfigState) -> Result<()> {
    backend.save_config(&config).await?;
    info!(fields = config.len(), "config saved");
    Ok(())
}

/// Reload on the module side, then fetch.
///
/// Sequenced: `get_config` is only issued after the reload is acknowledged,
/// and not at all if the reload fails.
pub async fn reload_then_load(backend: &dyn Backend) -> Result<ConfigState> {
    backend.reload_config().await?;
    info!("backend reloaded its config");
    load(backend).await
}
