//! Per-repository column-id cache
//!
//! The board service assigns each column an id distinct from its display
//! name; configuration speaks in display names, the move endpoint wants ids.
//! This cache holds the name -> id table per repository, populated wholesale
//! from one board fetch and reused for subsequent deliveries.
//!
//! Keyed by repository id so concurrent deliveries for different
//! repositories sharing one relay never read each other's columns.

use std::collections::HashMap;
use std::sync::Mutex;

/// Column name -> column id cache, keyed by repository id
#[derive(Debug, Default)]
pub struct ColumnCache {
    inner: Mutex<HashMap<u64, HashMap<String, String>>>,
}

impl ColumnCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether columns for this repository have been cached yet
    pub fn has_repo(&self, repo_id: u64) -> bool {
        self.lock().contains_key(&repo_id)
    }

    /// Replace the cached columns for a repository wholesale.
    ///
    /// Storing an empty iterator still marks the repository as cached; the
    /// cache never distinguishes "empty board" from "every lookup misses".
    pub fn store(&self, repo_id: u64, columns: impl IntoIterator<Item = (String, String)>) {
        self.lock().insert(repo_id, columns.into_iter().collect());
    }

    /// Resolve a column display name to its id.
    ///
    /// A name the board does not know resolves to the empty sentinel id
    /// rather than failing; the board service's own rejection of the
    /// resulting move is the authoritative answer.
    pub fn resolve(&self, repo_id: u64, name: &str) -> String {
        self.lock()
            .get(&repo_id)
            .and_then(|columns| columns.get(name))
            .cloned()
            .unwrap_or_default()
    }

    /// Drop the cached columns for one repository
    pub fn invalidate(&self, repo_id: u64) {
        self.lock().remove(&repo_id);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<u64, HashMap<String, String>>> {
        self.inner.lock().expect("column cache lock poisoned")
    }
}
