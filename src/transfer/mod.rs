//! Import/export of the quote collection as JSON text.
//!
//! Serializes the collection to pretty-printed JSON for file exchange
//! and parses import payloads into the raw JSON value the store
//! validates element by element.

use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use tracing::info;

use crate::types::{Quote, QuoteError};

/// Serialize the collection as pretty-printed JSON, the interchange
/// format for exported quote files.
pub fn export_json(quotes: &[Quote]) -> Result<String> {
    serde_json::to_string_pretty(quotes).context("Failed to serialise quote collection")
}

/// Parse an import payload. The result still has to pass the store's
/// per-element validation; this only rejects unparseable text.
pub fn parse_import(text: &str) -> Result<Value, QuoteError> {
    serde_json::from_str(text).map_err(|e| QuoteError::Format(format!("invalid JSON: {e}")))
}

/// Write the collection to a JSON file.
pub fn write_quotes_file(path: &Path, quotes: &[Quote]) -> Result<()> {
    let json = export_json(quotes)?;
    std::fs::write(path, &json)
        .context(format!("Failed to write quotes to {}", path.display()))?;
    info!(path = %path.display(), count = quotes.len(), "Quotes exported");
    Ok(())
}

/// Read an import file into the raw JSON payload for
/// `QuoteStore::import_batch`.
pub fn read_import_file(path: &Path) -> Result<Value> {
    let text = std::fs::read_to_string(path)
        .context(format!("Failed to read import file {}", path.display()))?;
    Ok(parse_import(&text)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
