/// Comparison scheduling strategies.
///
/// Two strategies decide which pair to ask next:
///   Exhaustive: every pair, adjacent items first, skipping inferable ones.
///     Always reaches a total order for consistent answers.
///   Adaptive: quicksort-like. Compare a pivot against everything, then
///     refine the partial ranking in small batches. Keeps the question count
///     near n·log₂n at the cost of guaranteed totality.
///
/// Both share the same contract: produce the next undetermined pair, fold an
/// answer back (the caller writes the edge, the scheduler advances), and stop
/// when nothing informative is left.
use std::collections::VecDeque;

use tracing::{debug, trace};

use crate::graph::PreferenceGraph;
use crate::inference::can_infer;
use crate::resolver::{is_total_order, resolve};
use crate::types::IndexedPair;

/// Scheduling strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Strategy {
    Exhaustive,
    Adaptive,
}

impl Strategy {
    /// Exhaustive up to `exhaustive_threshold` items, adaptive above.
    pub fn for_item_count(num_items: usize, exhaustive_threshold: usize) -> Strategy {
        if num_items <= exhaustive_threshold {
            Strategy::Exhaustive
        } else {
            Strategy::Adaptive
        }
    }

    /// Progress total for a session of `num_items`: exact for exhaustive,
    /// an estimate for adaptive.
    pub fn total_estimate(self, num_items: usize) -> usize {
        match self {
            Strategy::Exhaustive => exhaustive_pair_count(num_items),
            Strategy::Adaptive => adaptive_estimate(num_items),
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Exhaustive => f.write_str("exhaustive"),
            Strategy::Adaptive => f.write_str("adaptive"),
        }
    }
}

/// Number of unordered pairs among `num_items`: n·(n−1)/2.
pub fn exhaustive_pair_count(num_items: usize) -> usize {
    num_items * num_items.saturating_sub(1) / 2
}

/// Expected question count for the adaptive strategy: ceil(n·log₂n).
pub fn adaptive_estimate(num_items: usize) -> usize {
    if num_items < 2 {
        return 0;
    }
    let n = num_items as f64;
    (n * n.log2()).ceil() as usize
}

/// Every `i < j` pair, ordered by gap `j - i` and then by `i`.
///
/// Neighbouring items come first, so a chain of answers like a > b, b > c
/// settles (a, c) by inference before it would be asked.
pub(crate) fn all_pairs(num_items: usize) -> VecDeque<IndexedPair> {
    let mut pairs = VecDeque::with_capacity(exhaustive_pair_count(num_items));
    for gap in 1..num_items {
        for i in 0..(num_items - gap) {
            pairs.push_back((i, i + gap));
        }
    }
    pairs
}

/// Seed batch for the adaptive strategy: the first item against every other.
pub(crate) fn pivot_seed(num_items: usize) -> VecDeque<IndexedPair> {
    (1..num_items).map(|j| (0, j)).collect()
}

/// Outcome of planning the next adaptive batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum AdaptiveStep {
    /// The graph already admits a single linearization.
    Complete,
    /// More comparisons to ask.
    Batch(Vec<IndexedPair>),
    /// Undetermined, but no informative pair could be found.
    Stalled,
}

/// Plan the adaptive strategy's next batch from the current graph.
pub(crate) fn plan_adaptive_batch(graph: &PreferenceGraph, batch_size: usize) -> AdaptiveStep {
    let ranking = resolve(graph);
    if is_total_order(graph, &ranking) {
        return AdaptiveStep::Complete;
    }

    let batch = if ranking.len() < graph.len() {
        triangulate_unranked(graph, &ranking, batch_size)
    } else {
        unresolved_pairs(graph, &ranking, batch_size)
    };

    if batch.is_empty() {
        AdaptiveStep::Stalled
    } else {
        AdaptiveStep::Batch(batch)
    }
}

/// Compare the first unranked item against the first, middle and last
/// ranked items.
///
/// Items only go unranked when the graph holds a cycle. `RankingEngine` never
/// presents an inferable pair, so its answers cannot close one; this branch
/// (and `Stalled`) only fires for graphs built directly.
fn triangulate_unranked(
    graph: &PreferenceGraph,
    ranking: &[usize],
    batch_size: usize,
) -> Vec<IndexedPair> {
    let mut ranked = vec![false; graph.len()];
    for &item in ranking {
        ranked[item] = true;
    }
    let Some(pivot) = (0..graph.len()).find(|&i| !ranked[i]) else {
        return Vec::new();
    };
    if ranking.is_empty() {
        return Vec::new();
    }

    let mut anchors: Vec<usize> = Vec::with_capacity(3);
    for pos in [0, ranking.len() / 2, ranking.len() - 1] {
        let anchor = ranking[pos];
        if !anchors.contains(&anchor) {
            anchors.push(anchor);
        }
    }

    anchors
        .into_iter()
        .filter(|&anchor| !can_infer(graph, pivot, anchor))
        .take(batch_size)
        .map(|anchor| (pivot, anchor))
        .collect()
}

/// Up to `batch_size` pairs of the ranking whose order is still open.
///
/// Scans ranking positions by gap, neighbours first: an open adjacent pair is
/// exactly what keeps the ranking from being a total order, and settling
/// neighbours merges sorted runs instead of re-sorting from the top.
fn unresolved_pairs(
    graph: &PreferenceGraph,
    ranking: &[usize],
    batch_size: usize,
) -> Vec<IndexedPair> {
    let mut batch = Vec::with_capacity(batch_size);
    for gap in 1..ranking.len() {
        for (i, &a) in ranking[..ranking.len() - gap].iter().enumerate() {
            let b = ranking[i + gap];
            if !can_infer(graph, a, b) {
                batch.push((a, b));
                if batch.len() == batch_size {
                    return batch;
                }
            }
        }
    }
    batch
}

/// Per-session scheduler state: the pending queue and the progress counter.
#[derive(Debug, Clone)]
pub(crate) struct Scheduler {
    strategy: Strategy,
    num_items: usize,
    batch_size: usize,
    queue: VecDeque<IndexedPair>,
    completed: usize,
    total: usize,
    batches: usize,
}

impl Scheduler {
    pub fn new(strategy: Strategy, num_items: usize, batch_size: usize) -> Self {
        let queue = match strategy {
            Strategy::Exhaustive => all_pairs(num_items),
            Strategy::Adaptive => pivot_seed(num_items),
        };
        Scheduler {
            strategy,
            num_items,
            batch_size: batch_size.max(1),
            queue,
            completed: 0,
            total: strategy.total_estimate(num_items),
            batches: 0,
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn completed(&self) -> usize {
        self.completed
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Follow-up batches planned after the initial queue.
    pub fn batches(&self) -> usize {
        self.batches
    }

    /// Next pair the user must decide, or `None` when the session is done.
    ///
    /// Inferable pairs at the front of the queue are dropped and counted as
    /// completed. The returned pair stays queued until `record_answer`, so
    /// repeated calls without an answer return the same pair.
    pub fn next_pair(&mut self, graph: &PreferenceGraph) -> Option<IndexedPair> {
        loop {
            while let Some(&(a, b)) = self.queue.front() {
                if !can_infer(graph, a, b) {
                    return Some((a, b));
                }
                trace!(a, b, "skipping inferable pair");
                self.queue.pop_front();
                self.completed += 1;
            }

            if !self.refill(graph) {
                return None;
            }
        }
    }

    /// The front pair was answered: drop it and count it.
    pub fn record_answer(&mut self) {
        if self.queue.pop_front().is_some() {
            self.completed += 1;
        }
    }

    /// Queue another batch once the current one is exhausted. Returns false
    /// when the strategy has nothing left to ask.
    fn refill(&mut self, graph: &PreferenceGraph) -> bool {
        match self.strategy {
            Strategy::Exhaustive => false,
            Strategy::Adaptive => match plan_adaptive_batch(graph, self.batch_size) {
                AdaptiveStep::Complete => {
                    debug!(completed = self.completed, "adaptive ranking complete");
                    false
                }
                AdaptiveStep::Stalled => {
                    debug!(
                        completed = self.completed,
                        "no informative pair left, stopping with a partial ranking"
                    );
                    false
                }
                AdaptiveStep::Batch(pairs) => {
                    self.batches += 1;
                    debug!(batch = self.batches, pairs = pairs.len(), "queued adaptive batch");
                    self.queue.extend(pairs);
                    true
                }
            },
        }
    }

    /// Back to the initial queue with zero progress.
    pub fn reset(&mut self) {
        *self = Scheduler::new(self.strategy, self.num_items, self.batch_size);
    }
}
