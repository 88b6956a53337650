//! JSONPlaceholder-style remote provider.
//!
//! The mock server exposes a `posts` collection; the first `fetch_limit`
//! post titles are mapped to quotes under the fixed `"Server"` category.
//! New local quotes are POSTed back to the same collection.

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::RemoteProvider;
use crate::types::Quote;

const PROVIDER_NAME: &str = "placeholder";

/// Category assigned to every quote originating from the server.
pub const SERVER_CATEGORY: &str = "Server";

/// A post as returned by the mock server. Only the title is needed.
#[derive(Debug, Deserialize)]
struct PostRecord {
    title: String,
}

/// HTTP client for the mock remote quote collection.
pub struct PlaceholderClient {
    http: Client,
    server_url: String,
    fetch_limit: usize,
}

impl PlaceholderClient {
    pub fn new(server_url: impl Into<String>, fetch_limit: usize) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .user_agent("QUOTESYNC/0.1.0 (quote-sync-agent)")
            .build()
            .context("Failed to build HTTP client for remote provider")?;

        Ok(Self {
            http,
            server_url: server_url.into(),
            fetch_limit,
        })
    }

    // -- Internal helpers ------------------------------------------------

    async fn fetch_posts(&self) -> Result<Vec<PostRecord>> {
        debug!(url = %self.server_url, "Fetching remote quotes");

        let resp = self
            .http
            .get(&self.server_url)
            .send()
            .await
            .context("Remote quote request failed")?;

        if !resp.status().is_success() {
            let status = resp.status();
            anyhow::bail!("Remote server error {status}");
        }

        let posts: Vec<PostRecord> = resp
            .json()
            .await
            .context("Failed to parse remote posts response")?;

        Ok(posts)
    }
}

/// Map server posts to quotes: the first `limit` titles become quote
/// texts under the fixed server category.
fn posts_to_quotes(posts: Vec<PostRecord>, limit: usize) -> Vec<Quote> {
    posts
        .into_iter()
        .take(limit)
        .map(|post| Quote::new(post.title, SERVER_CATEGORY))
        .collect()
}

#[async_trait]
impl RemoteProvider for PlaceholderClient {
    async fn fetch_remote_quotes(&self) -> Vec<Quote> {
        match self.fetch_posts().await {
            Ok(posts) => posts_to_quotes(posts, self.fetch_limit),
            Err(e) => {
                warn!(error = %e, "Failed to fetch quotes from server");
                Vec::new()
            }
        }
    }

    async fn push_quote(&self, quote: &Quote) {
        let result = self
            .http
            .post(&self.server_url)
            .json(quote)
            .send()
            .await
            .and_then(|resp| resp.error_for_status());

        match result {
            Ok(_) => info!(%quote, "Quote sent to server"),
            Err(e) => warn!(error = %e, "Error sending quote to server"),
        }
    }

    fn name(&self) -> &str {
        PROVIDER_NAME
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
