//! Shared helpers for unit tests.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tempfile::TempDir;

use crate::app::Session;
use crate::config::Config;
use crate::fetcher::{FetchError, Fetcher};
use crate::store::SqliteStore;

pub const SAMPLE_FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="2.0">
  <channel>
    <title>Boot.dev Blog</title>
    <link>https://www.wagslane.dev/</link>
    <description>Recent content on Lane&amp;#39;s blog</description>
    <item>
      <title>Optimize for simplicity first</title>
      <link>https://www.wagslane.dev/posts/optimize-for-simplicity-first/</link>
      <pubDate>Tue, 05 Dec 2023 00:00:00 +0000</pubDate>
      <description>It&amp;rsquo;s a trap.</description>
    </item>
  </channel>
</rss>"#;

/// Serves a fixed body and remembers which URLs were requested.
pub struct StubFetcher {
    body: &'static str,
    pub requested: Mutex<Vec<String>>,
}

impl StubFetcher {
    pub fn new(body: &'static str) -> Self {
        Self {
            body,
            requested: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Fetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<Vec<u8>, FetchError> {
        self.requested.lock().unwrap().push(url.to_string());
        Ok(self.body.as_bytes().to_vec())
    }
}

/// A session backed by an in-memory store and a config file in a temp dir.
///
/// Keep the returned [`TempDir`] alive for as long as the session is used.
pub fn session() -> (Session, TempDir) {
    session_with_fetcher(Arc::new(StubFetcher::new(SAMPLE_FEED)))
}

pub fn session_with_fetcher(fetcher: Arc<dyn Fetcher + Send + Sync>) -> (Session, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let config = Config::new(":memory:", dir.path().join(".gatorconfig.json"));
    let store = Arc::new(SqliteStore::in_memory().unwrap());

    (Session::with_parts(config, store, fetcher), dir)
}
