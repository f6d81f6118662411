use crate::backend::Backend;
use async_trait::async_trait;
use fwd_config::BackendConfig;
use fwd_core::{ConfigState, DashError, Result, Sample};
use reqwest::{Client, RequestBuilder, Response};
use serde_json::json;
use std::time::Duration;
use tracing::{debug, warn};

const STATS: &str = "stats";
const GET_CONFIG: &str = "getConfig";
const SAVE_CONFIG: &str = "saveConfig";
const RELOAD_CONFIG: &str = "reloadConfig";

/// [`Backend`] over the module's HTTP endpoints.
///
/// Endpoint names are appended to the configured base URL, which is expected
/// to end in `/`.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    base_url:    String,
    http_client: Client,
}

impl HttpBackend {
    pub fn new(config: &BackendConfig) -> Self {
        let http_client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .user_agent(&config.user_agent)
            .build()
            .unwrap_or_else(|e| {
                warn!(target: "backend", error = %e, "HTTP client setup failed; using defaults");
                Client::new()
            });

        Self {
            base_url: config.base_url.clone(),
            http_client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{endpoint}", self.base_url)
    }

    /// Send `request` and fail on transport errors and non-2xx statuses.
    async fn send(&self, endpoint: &str, request: RequestBuilder) -> Result<Response> {
        debug!(target: "backend", endpoint, "request");

        let response = request.send().await.map_err(|e| {
            warn!(target: "backend", endpoint, error = %e, "request failed");
            DashError::Backend(format!("{endpoint}: {e}"))
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(target: "backend", endpoint, status = %status, "backend returned error");
            return Err(DashError::Backend(format!("{endpoint}: HTTP {status}")));
        }

        Ok(response)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let response = self
            .send(endpoint, self.http_client.get(self.url(endpoint)))
            .await?;

        response.json().await.map_err(|e| {
            warn!(target: "backend", endpoint, error = %e, "failed to decode response");
            DashError::Decode(format!("{endpoint}: {e}"))
        })
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn stats(&self) -> Result<Sample> {
        self.get_json(STATS).await
    }

    async fn get_config(&self) -> Result<ConfigState> {
        self.get_json(GET_CONFIG).await
    }

    async fn save_config(&self, config: &ConfigState) -> Result<()> {
        let request = self.http_client.post(self.url(SAVE_CONFIG)).json(config);
        self.send(SAVE_CONFIG, request).await?;
        Ok(())
    }

    async fn reload_config(&self) -> Result<()> {
        let request = self.http_client.post(self.url(RELOAD_CONFIG)).json(&json!({}));
        self.send(RELOAD_CONFIG, request).await?;
        Ok(())
    }
}
