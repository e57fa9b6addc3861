//! Instant name matching over the scope set.
//!
//! Runs entirely on products already fetched for the page context; no
//! network round trip and no relevance ranking. Matches come back in scope
//! order.

use std::sync::Arc;

use crate::catalog::Product;

/// Maximum suggestions shown under the search box.
pub const SUGGESTION_LIMIT: usize = 5;

/// Case-insensitive substring index over product names.
#[derive(Debug, Clone)]
pub struct TypeAheadIndex {
    scope: Arc<[Product]>,
    names: Vec<String>,
}

impl TypeAheadIndex {
    /// Index a scope set.
    pub fn new(scope: Arc<[Product]>) -> Self {
        let names = scope.iter().map(|p| p.name.to_lowercase()).collect();
        Self { scope, names }
    }

    pub fn scope(&self) -> &Arc<[Product]> {
        &self.scope
    }

    pub fn len(&self) -> usize {
        self.scope.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scope.is_empty()
    }

    /// Up to [`SUGGESTION_LIMIT`] matches. A blank keyword suggests nothing.
    pub fn suggest(&self, keyword: &str) -> Vec<&Product> {
        let needle = keyword.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        self.matching(needle).take(SUGGESTION_LIMIT).collect()
    }

    /// Every match, for a committed keyword. A blank keyword matches the
    /// whole scope.
    pub fn search(&self, keyword: &str) -> Vec<Product> {
        let needle = keyword.trim().to_lowercase();
        self.matching(needle).cloned().collect()
    }

    // Takes the lowercased needle by value so results borrow only `self`.
    fn matching(&self, needle: String) -> impl Iterator<Item = &Product> + '_ {
        self.names
            .iter()
            .zip(self.scope.iter())
            .filter(move |(name, _)| name.contains(needle.as_str()))
            .map(|(_, product)| product)
    }
}

impl Default for TypeAheadIndex {
    fn default() -> Self {
        Self::new(Arc::from(Vec::new()))
    }
}
