//! Remote quote providers.
//!
//! Defines the `RemoteProvider` trait and the JSONPlaceholder-style
//! HTTP implementation. Transport failures are swallowed at this
//! boundary: a failed fetch yields an empty list so a flaky network
//! never blocks local usage.

pub mod placeholder;

use async_trait::async_trait;

use crate::types::Quote;

/// Abstraction over the remote quote collection.
#[async_trait]
pub trait RemoteProvider: Send + Sync {
    /// Fetch the current server quotes. Returns an empty list on any
    /// transport failure.
    async fn fetch_remote_quotes(&self) -> Vec<Quote>;

    /// Send a locally added quote to the server. Fire-and-forget:
    /// failures are logged, never surfaced.
    async fn push_quote(&self, quote: &Quote);

    /// Provider name for logging and identification.
    fn name(&self) -> &str;
}
