/// Directed preference graph over item indices.
///
/// An edge `a → b` means "a is strictly preferred to b", recorded directly
/// from a user answer. Every item has an adjacency list, possibly empty.
/// Acyclicity is not enforced here. The engine only records answers for pairs
/// that are not yet inferable, which keeps its graph acyclic; a cycle in a
/// graph built directly surfaces as a partial ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PreferenceGraph {
    adjacency: Vec<Vec<usize>>,
}

impl PreferenceGraph {
    /// Empty graph with one entry per item.
    pub fn new(num_items: usize) -> Self {
        PreferenceGraph {
            adjacency: vec![Vec::new(); num_items],
        }
    }

    /// Number of items (nodes).
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    /// Record `preferred → less_preferred`. Returns false if the edge already
    /// existed or would be a self-loop; the graph is unchanged in that case.
    pub fn add_edge(&mut self, preferred: usize, less_preferred: usize) -> bool {
        if preferred == less_preferred {
            return false;
        }
        let successors = &mut self.adjacency[preferred];
        if successors.contains(&less_preferred) {
            return false;
        }
        successors.push(less_preferred);
        true
    }

    /// Items `item` is directly preferred over.
    pub fn neighbors(&self, item: usize) -> &[usize] {
        self.adjacency.get(item).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_edge(&self, from: usize, to: usize) -> bool {
        self.neighbors(from).contains(&to)
    }

    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }

    /// All edges as `(preferred, less_preferred)`, grouped by source item.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.adjacency
            .iter()
            .enumerate()
            .flat_map(|(from, tos)| tos.iter().map(move |&to| (from, to)))
    }

    /// Drop every edge, keeping one empty entry per item.
    pub fn reset(&mut self) {
        for successors in &mut self.adjacency {
            successors.clear();
        }
    }
}
