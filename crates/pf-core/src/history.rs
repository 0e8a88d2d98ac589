//! Capped generation history.
//!
//! The list is never edited in place: `append` and `clear` build a new list
//! and swap it in, so a reader always sees either the old or the new list.

use crate::errors::CoreError;
use crate::record::GenerationRecord;
use crate::store::Store;

/// Default number of records kept.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Store key the history list is persisted under.
pub const HISTORY_KEY: &str = "history";

/// Newest-first list of generation records, capped at `limit` entries.
#[derive(Debug, Clone, PartialEq)]
pub struct History {
    limit: usize,
    entries: Vec<GenerationRecord>,
}

impl History {
    /// An empty history keeping at most `limit` records (minimum 1).
    #[must_use]
    pub fn new(limit: usize) -> Self {
        Self {
            limit: limit.max(1),
            entries: Vec::new(),
        }
    }

    /// Rebuild a history from existing records, dropping any beyond `limit`.
    #[must_use]
    pub fn from_entries(limit: usize, mut entries: Vec<GenerationRecord>) -> Self {
        let limit = limit.max(1);
        entries.truncate(limit);
        Self { limit, entries }
    }

    #[must_use]
    pub const fn limit(&self) -> usize {
        self.limit
    }

    #[must_use]
    pub fn entries(&self) -> &[GenerationRecord] {
        &self.entries
    }

    #[must_use]
    pub fn latest(&self) -> Option<&GenerationRecord> {
        self.entries.first()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prepend `record`, evicting the oldest entry once the cap is reached.
    pub fn append(&mut self, record: GenerationRecord) {
        let mut next = Vec::with_capacity(self.limit);
        next.push(record);
        next.extend(self.entries.iter().take(self.limit - 1).cloned());
        self.entries = next;
    }

    /// Drop every record.
    pub fn clear(&mut self) {
        self.entries = Vec::new();
    }

    /// Load the persisted history from `store`. A missing key yields an empty
    /// history.
    ///
    /// # Errors
    ///
    /// Returns `CoreError` if the store fails or the stored value is not a
    /// valid record list.
    pub fn load(store: &dyn Store, limit: usize) -> Result<Self, CoreError> {
        match store.get(HISTORY_KEY)? {
            Some(raw) => {
                let entries: Vec<GenerationRecord> = serde_json::from_str(&raw)?;
                Ok(Self::from_entries(limit, entries))
            }
            None => Ok(Self::new(limit)),
        }
    }

    /// Persist the whole list under [`HISTORY_KEY`].
    ///
    /// # Errors
    ///
    /// Returns `CoreError` if serialization or the store fails.
    pub fn save(&self, store: &mut dyn Store) -> Result<(), CoreError> {
        let raw = serde_json::to_string_pretty(&self.entries)?;
        store.set(HISTORY_KEY, &raw)?;
        Ok(())
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_LIMIT)
    }
}
