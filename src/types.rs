//! Shared types for the QUOTESYNC agent.
//!
//! These types form the data model used across all modules.
//! They are designed to be stable so that storage, remote, and
//! store modules can depend on them without circular references.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Quote
// ---------------------------------------------------------------------------

/// A single quote record.
///
/// Quotes have no identifier beyond their content: two quotes are the
/// same quote exactly when both fields match (case-sensitive, no
/// trimming). Derived `PartialEq` is that identity rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub category: String,
}

impl Quote {
    pub fn new(text: impl Into<String>, category: impl Into<String>) -> Self {
        Quote {
            text: text.into(),
            category: category.into(),
        }
    }
}

impl fmt::Display for Quote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "\"{}\" [{}]", self.text, self.category)
    }
}

// ---------------------------------------------------------------------------
// Merge & sync reports
// ---------------------------------------------------------------------------

/// Outcome of merging a batch of server quotes into the local collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MergeReport {
    /// Quotes appended by this merge, in the order they were added.
    pub added: Vec<Quote>,
    /// Whether the collection was mutated (and persisted) at all.
    pub changed: bool,
}

impl MergeReport {
    /// A report for a merge that found nothing new.
    pub fn unchanged() -> Self {
        MergeReport {
            added: Vec::new(),
            changed: false,
        }
    }
}

/// Summary of one fetch-and-merge cycle, for logging and inspection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncReport {
    pub cycle: u64,
    /// How many quotes the remote provider returned.
    pub fetched: usize,
    /// How many of those were new and appended locally.
    pub added: usize,
    /// Collection size after the merge.
    pub total: usize,
    pub changed: bool,
    pub completed_at: DateTime<Utc>,
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "cycle {}: fetched {} | added {} | total {} | {}",
            self.cycle,
            self.fetched,
            self.added,
            self.total,
            if self.changed { "updated" } else { "no change" },
        )
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Domain-specific error types for QUOTESYNC.
#[derive(Debug, thiserror::Error)]
pub enum QuoteError {
    #[error("Validation error: {field} must not be empty")]
    Validation { field: &'static str },

    #[error("Format error: {0}")]
    Format(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
