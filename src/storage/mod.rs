//! Persistence layer.
//!
//! Saves and loads the quote collection to/from a JSON file through the
//! `QuoteStorage` seam. The last-selected category filter is persisted
//! separately as a small plain-text file, so the quotes file stays a
//! byte-faithful serialization of the collection itself.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::types::Quote;

/// Abstraction over quote-collection persistence.
///
/// The store calls `load` once at startup and `save` after every
/// mutating operation.
#[cfg_attr(test, mockall::automock)]
pub trait QuoteStorage: Send + Sync {
    /// Load the persisted collection.
    /// Returns `None` when nothing has been persisted yet (fresh start).
    fn load(&self) -> Result<Option<Vec<Quote>>>;

    /// Persist the full collection, replacing any previous copy.
    fn save(&self, quotes: &[Quote]) -> Result<()>;
}

/// JSON-file implementation of `QuoteStorage`.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStorage { path: path.into() }
    }
}

impl QuoteStorage for JsonFileStorage {
    fn load(&self) -> Result<Option<Vec<Quote>>> {
        if !self.path.exists() {
            info!(path = %self.path.display(), "No saved quotes found, starting fresh");
            return Ok(None);
        }

        let json = std::fs::read_to_string(&self.path)
            .context(format!("Failed to read quotes from {}", self.path.display()))?;

        let quotes: Vec<Quote> = serde_json::from_str(&json)
            .context(format!("Failed to parse quotes from {}", self.path.display()))?;

        info!(path = %self.path.display(), count = quotes.len(), "Quotes loaded from disk");
        Ok(Some(quotes))
    }

    fn save(&self, quotes: &[Quote]) -> Result<()> {
        let json = serde_json::to_string_pretty(quotes)
            .context("Failed to serialise quote collection")?;

        std::fs::write(&self.path, &json)
            .context(format!("Failed to write quotes to {}", self.path.display()))?;

        debug!(path = %self.path.display(), count = quotes.len(), "Quotes saved");
        Ok(())
    }
}

/// Persist the last-selected category filter.
pub fn save_filter(path: &Path, filter: &str) -> Result<()> {
    std::fs::write(path, filter)
        .context(format!("Failed to write filter to {}", path.display()))?;
    debug!(path = %path.display(), filter, "Filter saved");
    Ok(())
}

/// Load the last-selected category filter.
/// Returns `None` if no filter was ever saved.
pub fn load_filter(path: &Path) -> Result<Option<String>> {
    if !path.exists() {
        return Ok(None);
    }
    let filter = std::fs::read_to_string(path)
        .context(format!("Failed to read filter from {}", path.display()))?;
    let filter = filter.trim().to_string();
    if filter.is_empty() {
        return Ok(None);
    }
    Ok(Some(filter))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
