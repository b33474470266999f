/// Ranking resolution: topological order of the preference graph.
use std::collections::VecDeque;

use crate::graph::PreferenceGraph;
use crate::inference::can_infer;

/// Kahn's topological sort, most preferred first.
///
/// Zero-in-degree items are queued in item-set order and dequeued FIFO, so
/// the result is a single deterministic linearization. Items on a cycle
/// never reach zero in-degree and are left out, giving a partial ranking.
pub fn resolve(graph: &PreferenceGraph) -> Vec<usize> {
    let num_items = graph.len();
    let mut in_degree = vec![0usize; num_items];
    for (_, to) in graph.edges() {
        in_degree[to] += 1;
    }

    let mut queue: VecDeque<usize> = (0..num_items).filter(|&i| in_degree[i] == 0).collect();
    let mut ranking = Vec::with_capacity(num_items);

    while let Some(item) = queue.pop_front() {
        ranking.push(item);
        for &next in graph.neighbors(item) {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                queue.push_back(next);
            }
        }
    }

    ranking
}

/// True if `ranking` covers every item and is the only order consistent
/// with the graph, i.e. every adjacent pair in it is already ordered.
pub fn is_total_order(graph: &PreferenceGraph, ranking: &[usize]) -> bool {
    ranking.len() == graph.len()
        && ranking.windows(2).all(|w| can_infer(graph, w[0], w[1]))
}
