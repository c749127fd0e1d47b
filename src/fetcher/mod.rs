pub mod http_fetcher;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::RssFeed;
use crate::normalizer::Normalizer;

pub const DEFAULT_USER_AGENT: &str = "gator";

/// Failures of the fetch pipeline, one per step.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Could not build request for {url}: {reason}")]
    RequestBuild { url: String, reason: String },

    #[error("Request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Could not read response body from {url}: {source}")]
    BodyRead {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("Could not parse feed from {url}: {reason}")]
    Parse { url: String, reason: String },
}

#[async_trait]
pub trait Fetcher {
    /// GET `url` and return the full response body.
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError>;
}

/// Fetch `url` and normalize the body into an [`RssFeed`].
pub async fn fetch_feed(
    fetcher: &(dyn Fetcher + Send + Sync),
    normalizer: &Normalizer,
    url: &str,
) -> Result<RssFeed, FetchError> {
    let body = fetcher.fetch(url).await?;
    let feed = normalizer.normalize(url, &body)?;

    tracing::debug!("Parsed {} items from {}", feed.items.len(), url);
    Ok(feed)
}
