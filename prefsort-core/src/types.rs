use std::collections::HashMap;

use crate::constants::MIN_ITEMS;
use crate::error::{RankError, Result};

/// Two distinct items awaiting a decision, in presentation order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparisonPair {
    pub first: String,
    pub second: String,
}

impl ComparisonPair {
    /// True if `item` is one of the two items of this pair.
    pub fn contains(&self, item: &str) -> bool {
        self.first == item || self.second == item
    }
}

/// Comparison progress: pairs settled so far against the expected total.
///
/// `completed` counts both answered and inferred pairs. For the adaptive
/// strategy `total` is an estimate and `completed` may end up above or below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    /// Completion percentage, clamped to [0, 100].
    pub fn percent(&self) -> f64 {
        if self.total == 0 {
            return 100.0;
        }
        (self.completed as f64 / self.total as f64 * 100.0).clamp(0.0, 100.0)
    }
}

/// Best-known order of the session's items, most preferred first.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Ranking {
    pub items: Vec<String>,
    /// Number of items in the session. A ranking shorter than this is partial.
    pub item_count: usize,
}

impl Ranking {
    /// True when every session item appears in the ranking.
    pub fn is_complete(&self) -> bool {
        self.items.len() == self.item_count
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Zero-based position of `item`, if ranked.
    pub fn position(&self, item: &str) -> Option<usize> {
        self.items.iter().position(|i| i == item)
    }
}

/// Internal indexed pair (usize indices, not item names).
pub(crate) type IndexedPair = (usize, usize);

/// Maps between caller-provided item names and internal 0..N indices.
#[derive(Debug, Clone)]
pub(crate) struct ItemMap {
    names: Vec<String>,
    name_to_idx: HashMap<String, usize>,
}

impl ItemMap {
    /// Validate and index an item set: at least two items, no empty or
    /// duplicate names. Names are matched exactly (case-sensitive).
    pub fn from_names<S: AsRef<str>>(names: &[S]) -> Result<Self> {
        if names.len() < MIN_ITEMS {
            return Err(RankError::invalid_input(format!(
                "need at least {MIN_ITEMS} items to rank, got {}",
                names.len()
            )));
        }

        let mut name_to_idx = HashMap::with_capacity(names.len());
        let mut owned = Vec::with_capacity(names.len());
        for (idx, name) in names.iter().enumerate() {
            let name = name.as_ref();
            if name.is_empty() {
                return Err(RankError::invalid_input(format!(
                    "item {} has an empty name",
                    idx + 1
                )));
            }
            if name_to_idx.insert(name.to_string(), idx).is_some() {
                return Err(RankError::invalid_input(format!(
                    "duplicate item name \"{name}\""
                )));
            }
            owned.push(name.to_string());
        }

        Ok(ItemMap {
            names: owned,
            name_to_idx,
        })
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn to_idx(&self, name: &str) -> Option<usize> {
        self.name_to_idx.get(name).copied()
    }

    /// Like `to_idx`, but an unknown name is an `InvalidInput` error.
    pub fn require_idx(&self, name: &str) -> Result<usize> {
        self.to_idx(name)
            .ok_or_else(|| RankError::invalid_input(format!("unknown item \"{name}\"")))
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn to_pair(&self, (a, b): IndexedPair) -> ComparisonPair {
        ComparisonPair {
            first: self.names[a].clone(),
            second: self.names[b].clone(),
        }
    }

    pub fn to_names(&self, indices: &[usize]) -> Vec<String> {
        indices.iter().map(|&i| self.names[i].clone()).collect()
    }
}
