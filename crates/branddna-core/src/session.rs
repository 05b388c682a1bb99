//! Session-scoped mutable state: the current query, the compare-set and the
//! selected brand. Everything else is derived on demand.

use serde::Serialize;

use crate::filter::{apply, FacetCatalog, QueryState};
use crate::record::BrandRecord;

pub const COMPARE_CAPACITY: usize = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CompareToggle {
    Added,
    Removed,
    /// The set is at capacity; nothing changed.
    Full,
}

/// Insertion-ordered set of brand names, bounded at [`COMPARE_CAPACITY`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompareSet {
    names: Vec<String>,
}

impl CompareSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle(&mut self, name: &str) -> CompareToggle {
        if let Some(pos) = self.names.iter().position(|n| n == name) {
            self.names.remove(pos);
            return CompareToggle::Removed;
        }
        if self.names.len() >= COMPARE_CAPACITY {
            return CompareToggle::Full;
        }
        self.names.push(name.to_string());
        CompareToggle::Added
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn clear(&mut self) {
        self.names.clear();
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Two or more brands are needed for a comparison view.
    pub fn is_comparable(&self) -> bool {
        self.names.len() >= 2
    }

    /// Selected brands in collection order.
    pub fn selected<'a>(&self, collection: &'a [BrandRecord]) -> Vec<&'a BrandRecord> {
        collection
            .iter()
            .filter(|b| self.contains(b.name()))
            .collect()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub catalog: FacetCatalog,
    pub query: QueryState,
    pub compare: CompareSet,
    selected: Option<String>,
}

impl Session {
    pub fn new(catalog: FacetCatalog) -> Self {
        Self {
            catalog,
            ..Self::default()
        }
    }

    pub fn set_query(&mut self, query: QueryState) {
        self.query = query;
    }

    pub fn toggle_facet(&mut self, key: &str, value: &str) {
        self.query = self.query.toggled(key, value);
    }

    pub fn reset_query(&mut self) {
        self.query = self.query.reset();
    }

    /// Filtered view of `collection` under the current query.
    pub fn view<'a>(&self, collection: &'a [BrandRecord]) -> Vec<&'a BrandRecord> {
        apply(collection, &self.catalog, &self.query)
    }

    /// Select a brand for the detail view. Unknown names clear the selection.
    pub fn select(&mut self, collection: &[BrandRecord], name: &str) -> bool {
        let found = collection.iter().any(|b| b.name() == name);
        self.selected = found.then(|| name.to_string());
        found
    }

    pub fn deselect(&mut self) {
        self.selected = None;
    }

    pub fn selected<'a>(&self, collection: &'a [BrandRecord]) -> Option<&'a BrandRecord> {
        let name = self.selected.as_deref()?;
        collection.iter().find(|b| b.name() == name)
    }
}
