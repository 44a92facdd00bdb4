//! Resolved sheet mappings and formula-derived lookup tables.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Joins a standard code and description as `code^description`.
///
/// Either side may be empty; the separator is dropped when both are.
pub fn combine_standard(code: &str, description: &str) -> String {
    let code = code.trim();
    let description = description.trim();
    if code.is_empty() && description.is_empty() {
        String::new()
    } else {
        format!("{code}^{description}")
    }
}

/// Source key (local code or description) to combined standard value.
///
/// Keys are trimmed and never empty. Inserting an existing key replaces the
/// value in place, so the key keeps its first-seen position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SheetMapping {
    entries: IndexMap<String, String>,
}

impl SheetMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `key -> value`; blank keys are ignored and reported as `false`.
    pub fn insert(&mut self, key: &str, value: impl Into<String>) -> bool {
        let key = key.trim();
        if key.is_empty() {
            return false;
        }
        self.entries.insert(key.to_string(), value.into());
        true
    }

    /// Layers `self` over `base`: entries of `self` win on key collision.
    #[must_use]
    pub fn over(self, base: &IndexMap<String, String>) -> Self {
        let mut merged = Self::new();
        for (key, value) in base {
            merged.insert(key, value.clone());
        }
        for (key, value) in self.entries {
            merged.insert(&key, value);
        }
        merged
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key.trim()).map(String::as_str)
    }

    /// First key whose value equals `value` (trimmed comparison).
    pub fn key_for_value(&self, value: &str) -> Option<&str> {
        let value = value.trim();
        self.entries
            .iter()
            .find(|(_, candidate)| candidate.trim() == value)
            .map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// First-data-row formulas per sheet and column header: sheet -> column -> formula.
pub type FormulaCells = BTreeMap<String, BTreeMap<String, String>>;

/// Lookup maps resolved from spreadsheet formulas: sheet -> column -> key -> value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LookupTables {
    sheets: BTreeMap<String, BTreeMap<String, IndexMap<String, String>>>,
}

impl LookupTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        sheet: impl Into<String>,
        column: impl Into<String>,
        entries: IndexMap<String, String>,
    ) {
        self.sheets
            .entry(sheet.into())
            .or_default()
            .insert(column.into(), entries);
    }

    pub fn get(&self, sheet: &str, column: &str) -> Option<&IndexMap<String, String>> {
        self.sheets.get(sheet).and_then(|columns| columns.get(column))
    }

    pub fn is_empty(&self) -> bool {
        self.sheets.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sheets.values().map(BTreeMap::len).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn combines_standard_values() {
        assert_eq!(combine_standard("F", "Female"), "F^Female");
        assert_eq!(combine_standard("", "Female"), "^Female");
        assert_eq!(combine_standard("F", " "), "F^");
        assert_eq!(combine_standard(" ", ""), "");
    }

    #[test]
    fn later_entries_override_base() {
        let mut base = IndexMap::new();
        base.insert("A".to_string(), "base-a".to_string());
        base.insert("B".to_string(), "base-b".to_string());
        let mut own = SheetMapping::new();
        own.insert("B", "own-b");
        own.insert("C", "own-c");
        let merged = own.over(&base);
        let pairs: Vec<_> = merged.iter().collect();
        assert_eq!(
            pairs,
            vec![("A", "base-a"), ("B", "own-b"), ("C", "own-c")]
        );
    }

    #[test]
    fn blank_keys_are_skipped() {
        let mut mapping = SheetMapping::new();
        assert!(!mapping.insert("  ", "x"));
        assert!(mapping.is_empty());
    }
}
