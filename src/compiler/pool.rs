//! String interner for literal text and field paths.

use std::collections::HashMap;
use std::sync::Arc;

/// Insertion-ordered, deduplicated string table.
///
/// Literals and field paths share one pool, so a literal `obj` and a variable
/// named `obj` occupy a single slot. Strings are stored as `Arc<str>` so the
/// matcher can hand out binding keys with an atomic increment instead of a copy.
#[derive(Debug, Default, Clone)]
pub struct Pool {
    index: HashMap<Arc<str>, usize>,
    entries: Vec<Arc<str>>,
}

impl Pool {
    /// Create an empty pool
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the slot for `s`, appending it if this is its first use
    pub fn index(&mut self, s: &str) -> usize {
        if let Some(&idx) = self.index.get(s) {
            return idx;
        }
        let idx = self.entries.len();
        let entry: Arc<str> = Arc::from(s);
        self.entries.push(Arc::clone(&entry));
        self.index.insert(entry, idx);
        idx
    }

    /// Number of interned strings
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been interned
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the pool, yielding entries in slot order
    #[must_use]
    pub fn into_entries(self) -> Vec<Arc<str>> {
        self.entries
    }
}
