use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::fetcher::{FetchError, Fetcher, DEFAULT_USER_AGENT};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new() -> Result<Self, FetchError> {
        Self::with_options(DEFAULT_USER_AGENT, DEFAULT_TIMEOUT)
    }

    pub fn with_options(user_agent: &str, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .gzip(true)
            .user_agent(user_agent)
            .build()
            .map_err(|e| FetchError::RequestBuild {
                url: String::new(),
                reason: e.to_string(),
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        let parsed = Url::parse(url).map_err(|e| FetchError::RequestBuild {
            url: url.to_string(),
            reason: e.to_string(),
        })?;

        let request = self
            .client
            .get(parsed)
            .build()
            .map_err(|e| FetchError::RequestBuild {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        tracing::debug!("Fetching feed from {}", url);

        let network = |source: reqwest::Error| FetchError::Network {
            url: url.to_string(),
            source,
        };
        let response = self.client.execute(request).await.map_err(network)?;
        let response = response.error_for_status().map_err(network)?;

        let body = response.bytes().await.map_err(|source| FetchError::BodyRead {
            url: url.to_string(),
            source,
        })?;

        Ok(body.to_vec())
    }
}
