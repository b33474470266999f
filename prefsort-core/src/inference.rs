/// Transitive inference over the preference graph.
///
/// A pair is inferable when its order already follows from recorded answers,
/// either through a direct edge or a chain of them. Inferable pairs are never
/// presented to the user.
use crate::graph::PreferenceGraph;

/// True if the relative order of `a` and `b` is already determined.
///
/// Symmetric: `can_infer(g, a, b) == can_infer(g, b, a)`. An item is never
/// comparable with itself, so `can_infer(g, a, a)` is false.
pub fn can_infer(graph: &PreferenceGraph, a: usize, b: usize) -> bool {
    if a == b {
        return false;
    }
    if graph.has_edge(a, b) || graph.has_edge(b, a) {
        return true;
    }
    reaches(graph, a, b) || reaches(graph, b, a)
}

/// True if `a` is known to be preferred to `b`, directly or transitively.
pub fn is_preferred(graph: &PreferenceGraph, a: usize, b: usize) -> bool {
    a != b && reaches(graph, a, b)
}

/// Depth-first reachability from `from` to `to` along preference edges.
///
/// Explicit stack plus visited set: O(V+E) per query, no recursion depth
/// limit, and terminates on cyclic graphs.
pub fn reaches(graph: &PreferenceGraph, from: usize, to: usize) -> bool {
    let mut visited = vec![false; graph.len()];
    let mut stack = vec![from];

    while let Some(node) = stack.pop() {
        for &next in graph.neighbors(node) {
            if next == to {
                return true;
            }
            if !visited[next] {
                visited[next] = true;
                stack.push(next);
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chain(n: usize) -> PreferenceGraph {
        let mut graph = PreferenceGraph::new(n);
        for i in 0..n - 1 {
            graph.add_edge(i, i + 1);
        }
        graph
    }

    #[test]
    fn test_direct_edge_is_inferable_both_ways() {
        let mut graph = PreferenceGraph::new(2);
        graph.add_edge(0, 1);
        assert!(can_infer(&graph, 0, 1));
        assert!(can_infer(&graph, 1, 0));
    }

    #[test]
    fn test_transitive_order_is_inferable() {
        let graph = chain(3);
        assert!(can_infer(&graph, 0, 2));
        assert!(can_infer(&graph, 2, 0));
        assert!(is_preferred(&graph, 0, 2));
        assert!(!is_preferred(&graph, 2, 0));
    }

    #[test]
    fn test_unrelated_items_are_not_inferable() {
        let mut graph = PreferenceGraph::new(4);
        graph.add_edge(0, 1);
        graph.add_edge(2, 3);
        assert!(!can_infer(&graph, 0, 2));
        assert!(!can_infer(&graph, 1, 3));
        // Sharing a common successor does not order two items.
        graph.add_edge(0, 3);
        assert!(!can_infer(&graph, 0, 2));
    }

    #[test]
    fn test_item_is_not_comparable_with_itself() {
        let graph = chain(2);
        assert!(!can_infer(&graph, 0, 0));
        assert!(!is_preferred(&graph, 1, 1));
    }

    #[test]
    fn test_reachability_terminates_on_cycle() {
        let mut graph = PreferenceGraph::new(4);
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        graph.add_edge(2, 0);
        assert!(can_infer(&graph, 0, 2));
        assert!(!can_infer(&graph, 0, 3));
        assert!(!reaches(&graph, 1, 3));
    }

    #[test]
    fn test_long_chain_does_not_overflow() {
        let graph = chain(100_000);
        assert!(reaches(&graph, 0, 99_999));
        assert!(!reaches(&graph, 99_999, 0));
    }
}
