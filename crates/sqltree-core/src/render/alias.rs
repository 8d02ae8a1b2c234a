//! Identity-keyed alias allocation.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// The identity of a relation (table, CTE, or derived table).
///
/// Every constructed relation gets a fresh id; clones of a relation handle
/// share it. Two tables with the same name are still two relations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RelationId(u64);

impl RelationId {
    pub(crate) fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(0);
        Self(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Per-render map from relation identity to generated alias.
#[derive(Debug, Default)]
pub struct AliasRegistry {
    aliases: HashMap<RelationId, String>,
}

impl AliasRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the alias of `id`, allocating the next one on first use.
    pub fn alias_for(&mut self, id: RelationId) -> String {
        let next = self.aliases.len();
        self.aliases
            .entry(id)
            .or_insert_with(|| alias_name(next))
            .clone()
    }

    /// Returns the number of allocated aliases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.aliases.len()
    }

    /// Returns true if no alias has been allocated.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.aliases.is_empty()
    }
}

/// Returns the `index`-th alias: `a` .. `z`, `aa` .. `zz`, `aaa`, ...
#[must_use]
pub fn alias_name(index: usize) -> String {
    const LETTERS: &[u8; 26] = b"abcdefghijklmnopqrstuvwxyz";
    let mut letters = Vec::new();
    let mut n = index + 1;
    while n > 0 {
        n -= 1;
        letters.push(char::from(LETTERS[n % 26]));
        n /= 26;
    }
    letters.iter().rev().collect()
}
