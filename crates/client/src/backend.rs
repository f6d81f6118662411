use async_trait::async_trait;
use fwd_core::{ConfigState, Result, Sample};

/// Request/response surface exposed by a dispatcher or collector module.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Current counters.
    async fn stats(&self) -> Result<Sample>;

    /// Current configuration.
    async fn get_config(&self) -> Result<ConfigState>;

    /// Replace the module's configuration with `config`.
    async fn save_config(&self, config: &ConfigState) -> Result<()>;

    /// Make the module re-read its configuration from its own storage.
    /// Resolves once the module has acknowledged.
    async fn reload_config(&self) -> Result<()>;
}
