//! The quote store.
//!
//! `QuoteStore` owns the in-memory collection and is the only place
//! that mutates it. Every mutating operation persists through the
//! `QuoteStorage` seam before returning; when the save fails the
//! in-memory change is rolled back, so memory and disk never diverge
//! after an operation completes.

use rand::Rng;
use serde_json::Value;
use tracing::{debug, info};

use crate::storage::QuoteStorage;
use crate::types::{MergeReport, Quote, QuoteError};

/// Sentinel category selector matching every quote.
pub const ALL_CATEGORIES: &str = "all";

/// Seed collection used when storage is empty on first start.
const DEFAULT_QUOTES: &[(&str, &str)] = &[
    (
        "The only limit to our realization of tomorrow is our doubts of today.",
        "Motivation",
    ),
    ("In the middle of difficulty lies opportunity.", "Inspiration"),
    ("The purpose of our lives is to be happy.", "Life"),
    ("Stay hungry, stay foolish.", "Wisdom"),
];

/// Owner of the quote collection.
pub struct QuoteStore {
    quotes: Vec<Quote>,
    storage: Box<dyn QuoteStorage>,
}

impl QuoteStore {
    /// Open the store: restore the persisted collection, or seed the
    /// default set (persisting it immediately) when storage is empty.
    pub fn open(storage: Box<dyn QuoteStorage>) -> Result<Self, QuoteError> {
        let quotes = match storage.load().map_err(storage_err)? {
            Some(quotes) => {
                info!(count = quotes.len(), "Restored quote collection");
                quotes
            }
            None => {
                let seeded: Vec<Quote> = DEFAULT_QUOTES
                    .iter()
                    .map(|(text, category)| Quote::new(*text, *category))
                    .collect();
                storage.save(&seeded).map_err(storage_err)?;
                info!(count = seeded.len(), "Seeded default quote collection");
                seeded
            }
        };

        Ok(QuoteStore { quotes, storage })
    }

    // -- Read access ------------------------------------------------------

    pub fn quotes(&self) -> &[Quote] {
        &self.quotes
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }

    /// Distinct categories in first-appearance order.
    pub fn categories(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for q in &self.quotes {
            if !seen.contains(&q.category) {
                seen.push(q.category.clone());
            }
        }
        seen
    }

    /// All quotes whose category matches the selector exactly, in
    /// collection order. The sentinel [`ALL_CATEGORIES`] returns the
    /// full collection.
    pub fn filtered_by(&self, selector: &str) -> Vec<Quote> {
        if selector == ALL_CATEGORIES {
            return self.quotes.clone();
        }
        self.quotes
            .iter()
            .filter(|q| q.category == selector)
            .cloned()
            .collect()
    }

    // -- Mutations --------------------------------------------------------

    /// Append a new quote. Both fields are trimmed before validation
    /// and stored trimmed; an empty field fails with no mutation.
    pub fn add(&mut self, text: &str, category: &str) -> Result<Quote, QuoteError> {
        let text = text.trim();
        let category = category.trim();

        if text.is_empty() {
            return Err(QuoteError::Validation { field: "text" });
        }
        if category.is_empty() {
            return Err(QuoteError::Validation { field: "category" });
        }

        let quote = Quote::new(text, category);
        self.quotes.push(quote.clone());
        self.persist_or_rollback(1)?;

        debug!(%quote, "Quote added");
        Ok(quote)
    }

    /// Import a parsed JSON payload: an array whose every element is an
    /// object with string `text` and `category` fields. All-or-nothing:
    /// the first invalid element fails the whole import with no
    /// mutation. Returns the number of quotes appended.
    pub fn import_batch(&mut self, raw: &Value) -> Result<usize, QuoteError> {
        let records = raw
            .as_array()
            .ok_or_else(|| QuoteError::Format("import payload is not an array".into()))?;

        // Validate the whole batch before touching the collection.
        let mut imported = Vec::with_capacity(records.len());
        for (i, record) in records.iter().enumerate() {
            let obj = record
                .as_object()
                .ok_or_else(|| QuoteError::Format(format!("element {i} is not an object")))?;
            let text = obj
                .get("text")
                .and_then(Value::as_str)
                .ok_or_else(|| QuoteError::Format(format!("element {i} has no string `text`")))?;
            let category = obj.get("category").and_then(Value::as_str).ok_or_else(|| {
                QuoteError::Format(format!("element {i} has no string `category`"))
            })?;
            imported.push(Quote::new(text, category));
        }

        let count = imported.len();
        self.quotes.extend(imported);
        self.persist_or_rollback(count)?;

        info!(count, total = self.quotes.len(), "Quotes imported");
        Ok(count)
    }

    /// Merge server quotes into the collection. Membership is tested
    /// against the snapshot of the collection as it stood when the
    /// merge began: a server quote equal to one appended earlier in the
    /// same batch is still appended. Persists only when something was
    /// added.
    pub fn merge_remote(&mut self, server_quotes: &[Quote]) -> Result<MergeReport, QuoteError> {
        let snapshot_len = self.quotes.len();
        let mut added = Vec::new();

        for server_quote in server_quotes {
            let exists = self.quotes[..snapshot_len].iter().any(|q| q == server_quote);
            if !exists {
                self.quotes.push(server_quote.clone());
                added.push(server_quote.clone());
            }
        }

        if added.is_empty() {
            debug!(fetched = server_quotes.len(), "Merge found nothing new");
            return Ok(MergeReport::unchanged());
        }

        self.persist_or_rollback(added.len())?;

        info!(
            added = added.len(),
            total = self.quotes.len(),
            "New quotes merged from server"
        );
        Ok(MergeReport {
            added,
            changed: true,
        })
    }

    /// Persist the collection; on failure drop the last `appended`
    /// entries so the in-memory copy matches what is on disk.
    fn persist_or_rollback(&mut self, appended: usize) -> Result<(), QuoteError> {
        if let Err(e) = self.storage.save(&self.quotes) {
            self.quotes.truncate(self.quotes.len() - appended);
            return Err(storage_err(e));
        }
        Ok(())
    }
}

/// Pick a quote uniformly at random. Each call is independent; there is
/// no guarantee against repeating the previous pick.
pub fn pick_random(from: &[Quote]) -> Option<&Quote> {
    if from.is_empty() {
        return None;
    }
    let index = rand::rng().random_range(0..from.len());
    Some(&from[index])
}

fn storage_err(e: anyhow::Error) -> QuoteError {
    QuoteError::Storage(e.to_string())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
