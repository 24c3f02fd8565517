//! dofus-portals API client

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::infrastructure::config::DofusPortalsConfig;
use crate::infrastructure::ports::{PortalProviderPort, ProviderError, ProviderPortal};

/// Header carrying the API key.
const TOKEN_HEADER: &str = "token";

const USER_AGENT: &str = "KaellyBot";

/// Client for the dofus-portals external API
#[derive(Clone)]
pub struct DofusPortalsClient {
    client: Client,
    base_url: String,
    token: String,
}

impl DofusPortalsClient {
    pub fn new(config: &DofusPortalsConfig) -> Self {
        // Per-request timeouts are applied in `fetch`; this one only bounds idle connects.
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .connect_timeout(config.timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, ProviderError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| ProviderError::Transport(format!("Invalid base URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| ProviderError::Transport("Base URL cannot carry a path".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        url: Url,
        timeout: Duration,
    ) -> Result<T, ProviderError> {
        let response = self
            .client
            .get(url)
            .header(TOKEN_HEADER, &self.token)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| classify(e, timeout))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status(status.as_u16()));
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::Timeout(timeout)
            } else {
                ProviderError::Decode(e.to_string())
            }
        })
    }
}

fn classify(error: reqwest::Error, timeout: Duration) -> ProviderError {
    if error.is_timeout() {
        ProviderError::Timeout(timeout)
    } else {
        ProviderError::Transport(error.to_string())
    }
}

#[async_trait]
impl PortalProviderPort for DofusPortalsClient {
    async fn list_portals(
        &self,
        server_id: &str,
        timeout: Duration,
    ) -> Result<Vec<ProviderPortal>, ProviderError> {
        let url = self.endpoint(&["external", "v1", "servers", server_id, "portals"])?;
        self.fetch(url, timeout).await
    }

    async fn get_portal(
        &self,
        server_id: &str,
        dimension_id: &str,
        timeout: Duration,
    ) -> Result<ProviderPortal, ProviderError> {
        let url = self.endpoint(&[
            "external",
            "v1",
            "servers",
            server_id,
            "portals",
            dimension_id,
        ])?;
        self.fetch(url, timeout).await
    }
}
