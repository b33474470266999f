/// Item set preparation for hosts.
///
/// Hosts collect item names from free text, files or comma-separated imports.
/// These helpers normalize that input and check it against the item count the
/// user asked for before a session is started.
use std::collections::HashSet;

use crate::constants::MIN_ITEMS;
use crate::error::{RankError, Result};

/// Split a comma-separated import into item names.
///
/// Entries are trimmed, empty entries dropped, and repeated names removed
/// keeping the first occurrence.
pub fn parse_import(text: &str) -> Vec<String> {
    dedup_names(text.split(',').map(str::trim))
}

/// Trim, drop empties and de-duplicate names, preserving first-seen order.
pub fn dedup_names<I, S>(names: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for name in names {
        let name = name.as_ref().trim();
        if name.is_empty() || !seen.insert(name.to_string()) {
            continue;
        }
        out.push(name.to_string());
    }
    out
}

/// Check a requested item count against `[MIN_ITEMS, max_items]`.
pub fn validate_item_count(count: usize, max_items: usize) -> Result<()> {
    if count < MIN_ITEMS || count > max_items {
        return Err(RankError::invalid_input(format!(
            "item count must be between {MIN_ITEMS} and {max_items}, got {count}"
        )));
    }
    Ok(())
}

/// Finalize the item set for a session that was announced with
/// `expected_count` items.
///
/// Fails on an empty name, a duplicate name, or a length that no longer
/// matches `expected_count` (e.g. after an import dropped duplicates).
pub fn finalize_items<S: AsRef<str>>(names: &[S], expected_count: usize) -> Result<Vec<String>> {
    let mut seen = HashSet::with_capacity(names.len());
    let mut items = Vec::with_capacity(names.len());
    for (idx, name) in names.iter().enumerate() {
        let name = name.as_ref().trim();
        if name.is_empty() {
            return Err(RankError::invalid_input(format!(
                "item {} has an empty name",
                idx + 1
            )));
        }
        if !seen.insert(name) {
            return Err(RankError::invalid_input(format!(
                "duplicate item name \"{name}\""
            )));
        }
        items.push(name.to_string());
    }

    if items.len() != expected_count {
        return Err(RankError::invalid_input(format!(
            "expected {expected_count} items, got {}",
            items.len()
        )));
    }
    Ok(items)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_import_trims_and_dedups() {
        assert_eq!(parse_import("Apple, Banana, Apple"), vec!["Apple", "Banana"]);
        assert_eq!(parse_import(" a ,, b,  "), vec!["a", "b"]);
        assert!(parse_import("").is_empty());
    }

    #[test]
    fn test_parse_import_is_case_sensitive() {
        assert_eq!(parse_import("apple,Apple"), vec!["apple", "Apple"]);
    }

    #[test]
    fn test_validate_item_count_bounds() {
        assert!(validate_item_count(2, 100).is_ok());
        assert!(validate_item_count(100, 100).is_ok());
        assert!(validate_item_count(1, 100).is_err());
        assert!(validate_item_count(101, 100).is_err());
    }

    #[test]
    fn test_finalize_items_count_mismatch_after_import() {
        let imported = parse_import("Apple, Banana, Apple");
        assert_eq!(imported.len(), 2);
        let err = finalize_items(&imported, 3).unwrap_err();
        assert_eq!(err, RankError::invalid_input("expected 3 items, got 2"));
    }

    #[test]
    fn test_finalize_items_rejects_empty_and_duplicates() {
        assert!(finalize_items(&["A", "  "], 2).is_err());
        assert!(finalize_items(&["A", "A"], 2).is_err());
        assert_eq!(finalize_items(&[" A", "B "], 2).unwrap(), vec!["A", "B"]);
    }
}
