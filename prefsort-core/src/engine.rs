/// Ranking session orchestrator.
///
/// Pure computation: no IO, no terminal. The host asks for the next pair,
/// shows it to the user, and feeds the choice back. All session state (graph,
/// scheduler queue, progress, pending pair) lives in one owned value and is
/// only mutated through its methods.
///
/// Items are identified by their caller-provided names.
use tracing::{debug, warn};

use crate::constants::{EXHAUSTIVE_MAX_ITEMS, TRIANGULATION_BATCH_SIZE};
use crate::error::{RankError, Result};
use crate::graph::PreferenceGraph;
use crate::inference;
use crate::items::finalize_items;
use crate::resolver::{is_total_order, resolve};
use crate::scheduler::{Scheduler, Strategy};
use crate::types::{ComparisonPair, IndexedPair, ItemMap, Progress, Ranking};

/// Configuration for the ranking engine.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Largest item count ranked exhaustively; above it the adaptive strategy is used.
    pub exhaustive_threshold: usize,
    /// Comparisons per adaptive follow-up batch.
    pub triangulation_batch: usize,
    /// Force a strategy instead of choosing by item count.
    pub strategy: Option<Strategy>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            exhaustive_threshold: EXHAUSTIVE_MAX_ITEMS,
            triangulation_batch: TRIANGULATION_BATCH_SIZE,
            strategy: None,
        }
    }
}

impl EngineConfig {
    /// Strategy for a session of `num_items`.
    pub fn strategy_for(&self, num_items: usize) -> Strategy {
        self.strategy
            .unwrap_or_else(|| Strategy::for_item_count(num_items, self.exhaustive_threshold))
    }
}

/// Start a session with the default configuration.
pub fn start_session<S: AsRef<str>>(items: &[S]) -> Result<RankingEngine> {
    RankingEngine::new(items, EngineConfig::default())
}

/// Start a session for an item set that was announced with `expected_count`
/// items. Fails if the finalized set no longer has that many items.
pub fn start_session_with_count<S: AsRef<str>>(
    items: &[S],
    expected_count: usize,
) -> Result<RankingEngine> {
    let items = finalize_items(items, expected_count)?;
    start_session(&items)
}

#[derive(Debug, Clone)]
pub struct RankingEngine {
    /// Maps between caller item names and internal 0..N indices.
    item_map: ItemMap,
    graph: PreferenceGraph,
    scheduler: Scheduler,
    /// Pair returned by the last `next_comparison`, awaiting an answer.
    pending: Option<IndexedPair>,
    questions_asked: usize,
    finished: bool,
}

impl RankingEngine {
    /// Start a session. Fails with `InvalidInput` on fewer than two items,
    /// an empty name, or a duplicate name.
    pub fn new<S: AsRef<str>>(items: &[S], config: EngineConfig) -> Result<Self> {
        let item_map = ItemMap::from_names(items)?;
        let num_items = item_map.len();
        let strategy = config.strategy_for(num_items);
        let scheduler = Scheduler::new(strategy, num_items, config.triangulation_batch);

        debug!(
            items = num_items,
            %strategy,
            total = scheduler.total(),
            "ranking session started"
        );

        Ok(RankingEngine {
            item_map,
            graph: PreferenceGraph::new(num_items),
            scheduler,
            pending: None,
            questions_asked: 0,
            finished: false,
        })
    }

    /// Number of items being ranked.
    pub fn num_items(&self) -> usize {
        self.item_map.len()
    }

    /// Item names in session order.
    pub fn items(&self) -> &[String] {
        self.item_map.names()
    }

    pub fn strategy(&self) -> Strategy {
        self.scheduler.strategy()
    }

    /// Read-only view of the recorded preferences, by item index.
    pub fn graph(&self) -> &PreferenceGraph {
        &self.graph
    }

    /// Next pair to show the user, or `None` once the session has completed
    /// or terminated early. Calling it again before `answer` returns the
    /// same pair.
    pub fn next_comparison(&mut self) -> Option<ComparisonPair> {
        if self.finished {
            return None;
        }
        if let Some(pair) = self.pending {
            return Some(self.item_map.to_pair(pair));
        }

        match self.scheduler.next_pair(&self.graph) {
            Some(pair) => {
                self.pending = Some(pair);
                Some(self.item_map.to_pair(pair))
            }
            None => {
                self.finished = true;
                let ranked = resolve(&self.graph).len();
                if ranked < self.num_items() {
                    warn!(
                        ranked,
                        items = self.num_items(),
                        "preference graph holds a cycle, ranking is partial"
                    );
                }
                debug!(
                    questions = self.questions_asked,
                    settled = self.scheduler.completed(),
                    "ranking session finished"
                );
                None
            }
        }
    }

    /// Record the user's choice for the pending pair. `chosen` must be one
    /// of the two items last returned by `next_comparison`.
    pub fn answer(&mut self, chosen: &str) -> Result<()> {
        let (a, b) = self
            .pending
            .ok_or_else(|| RankError::invalid_input("no comparison is pending"))?;

        let winner = self.item_map.to_idx(chosen);
        let (preferred, less_preferred) = match winner {
            Some(w) if w == a => (a, b),
            Some(w) if w == b => (b, a),
            _ => {
                return Err(RankError::invalid_input(format!(
                    "\"{chosen}\" is not part of the current comparison"
                )));
            }
        };

        self.graph.add_edge(preferred, less_preferred);
        self.scheduler.record_answer();
        self.pending = None;
        self.questions_asked += 1;
        Ok(())
    }

    /// Settled pairs (answered or inferred) against the strategy's total.
    pub fn progress(&self) -> Progress {
        Progress {
            completed: self.scheduler.completed(),
            total: self.scheduler.total(),
        }
    }

    /// Best-known order, most preferred first. Lists every item; use
    /// `is_determined` to tell whether the answers so far fix it.
    pub fn current_ranking(&self) -> Ranking {
        Ranking {
            items: self.item_map.to_names(&resolve(&self.graph)),
            item_count: self.num_items(),
        }
    }

    /// True once the recorded answers determine a single total order.
    pub fn is_determined(&self) -> bool {
        is_total_order(&self.graph, &resolve(&self.graph))
    }

    /// True once `next_comparison` has returned `None`.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Questions the user actually answered (inferred pairs excluded).
    pub fn questions_asked(&self) -> usize {
        self.questions_asked
    }

    /// Follow-up batches the adaptive strategy planned after its seed batch.
    pub fn adaptive_batches(&self) -> usize {
        self.scheduler.batches()
    }

    /// Whether the order of two items already follows from the answers.
    pub fn can_infer(&self, a: &str, b: &str) -> Result<bool> {
        let a = self.item_map.require_idx(a)?;
        let b = self.item_map.require_idx(b)?;
        Ok(inference::can_infer(&self.graph, a, b))
    }

    /// Discard all answers and start over with the same items and strategy.
    pub fn reset(&mut self) {
        self.graph.reset();
        self.scheduler.reset();
        self.pending = None;
        self.questions_asked = 0;
        self.finished = false;
        debug!(items = self.num_items(), "ranking session reset");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Answer every question according to `truth` (most preferred first)
    /// and return the pairs that were presented.
    fn run_truthfully(engine: &mut RankingEngine, truth: &[&str]) -> Vec<ComparisonPair> {
        let rank = |name: &str| truth.iter().position(|t| *t == name).unwrap();
        let mut asked = Vec::new();
        while let Some(pair) = engine.next_comparison() {
            let winner = if rank(&pair.first) < rank(&pair.second) {
                pair.first.clone()
            } else {
                pair.second.clone()
            };
            engine.answer(&winner).unwrap();
            asked.push(pair);
        }
        asked
    }

    #[test]
    fn test_two_items() {
        let mut engine = start_session(&["X", "Y"]).unwrap();
        let pair = engine.next_comparison().unwrap();
        assert_eq!(pair, ComparisonPair { first: "X".into(), second: "Y".into() });
        engine.answer("X").unwrap();

        assert!(engine.next_comparison().is_none());
        let ranking = engine.current_ranking();
        assert_eq!(ranking.items, vec!["X", "Y"]);
        assert!(ranking.is_complete());
    }

    #[test]
    fn test_transitive_pair_is_never_presented() {
        let mut engine = start_session(&["A", "B", "C"]).unwrap();
        assert_eq!(engine.strategy(), Strategy::Exhaustive);

        let asked = run_truthfully(&mut engine, &["A", "B", "C"]);
        assert_eq!(asked.len(), 2);
        assert!(!asked.iter().any(|p| p.contains("A") && p.contains("C")));
        assert!(engine.can_infer("A", "C").unwrap());
        assert!(engine.can_infer("C", "A").unwrap());

        assert_eq!(engine.current_ranking().items, vec!["A", "B", "C"]);
        assert_eq!(engine.progress(), Progress { completed: 3, total: 3 });
    }

    #[test]
    fn test_twelve_items_use_adaptive_batches() {
        let items: Vec<String> = (1..=12).map(|i| format!("item{i}")).collect();
        let mut engine = start_session(&items).unwrap();
        assert_eq!(engine.strategy(), Strategy::Adaptive);
        assert_eq!(engine.progress().total, 44);

        // Seed batch: pivot against the other 11 items.
        for j in 1..12 {
            let pair = engine.next_comparison().unwrap();
            assert_eq!(pair.first, "item1");
            assert_eq!(pair.second, items[j]);
            engine.answer("item1").unwrap();
        }
        assert_eq!(engine.adaptive_batches(), 0);

        // Pivot beats everything: the rest is still unordered.
        assert!(engine.next_comparison().is_some());
        assert_eq!(engine.adaptive_batches(), 1);

        let truth: Vec<&str> = items.iter().map(String::as_str).collect();
        run_truthfully(&mut engine, &truth);
        let ranking = engine.current_ranking();
        assert!(ranking.is_complete());
        assert_eq!(ranking.items, items);
        assert!(engine.is_determined());
    }

    #[test]
    fn test_count_mismatch_after_import_fails() {
        let imported = crate::items::parse_import("Apple, Banana, Apple");
        assert_eq!(imported.len(), 2);
        let err = start_session_with_count(&imported, 3).unwrap_err();
        assert!(matches!(err, RankError::InvalidInput { .. }));
        assert!(start_session_with_count(&imported, 2).is_ok());
    }

    #[test]
    fn test_cyclic_preferences_yield_partial_ranking() {
        let map = ItemMap::from_names(&["A", "B", "C"]).unwrap();
        let mut graph = PreferenceGraph::new(3);
        graph.add_edge(0, 1);
        graph.add_edge(1, 2);
        graph.add_edge(2, 0);

        let order = resolve(&graph);
        assert!(order.len() < 3);
        assert!(!is_total_order(&graph, &order));

        let ranking = Ranking { items: map.to_names(&order), item_count: 3 };
        assert!(!ranking.is_complete());
    }

    #[test]
    fn test_answers_never_close_a_cycle() {
        // Always pick the second item: no hidden order, yet the answered
        // pairs are never inferable, so no answer can contradict earlier ones.
        let mut engine = start_session(&["A", "B", "C"]).unwrap();
        let mut asked = 0;
        while let Some(pair) = engine.next_comparison() {
            engine.answer(&pair.second).unwrap();
            asked += 1;
        }

        assert_eq!(asked, 2);
        let ranking = engine.current_ranking();
        assert_eq!(ranking.items, vec!["C", "B", "A"]);
        assert!(ranking.is_complete());
        assert!(engine.is_determined());
    }

    #[test]
    fn test_answer_must_match_pending_pair() {
        let mut engine = start_session(&["A", "B", "C"]).unwrap();
        assert!(engine.answer("A").is_err(), "nothing pending yet");

        let pair = engine.next_comparison().unwrap();
        assert_eq!((pair.first.as_str(), pair.second.as_str()), ("A", "B"));
        assert!(engine.answer("C").is_err());
        assert!(engine.answer("Z").is_err());
        assert!(engine.answer("a").is_err());

        engine.answer("B").unwrap();
        assert!(engine.answer("B").is_err(), "pair already answered");
    }

    #[test]
    fn test_next_comparison_repeats_until_answered() {
        let mut engine = start_session(&["A", "B", "C"]).unwrap();
        let first = engine.next_comparison().unwrap();
        let again = engine.next_comparison().unwrap();
        assert_eq!(first, again);
        assert_eq!(engine.questions_asked(), 0);
    }

    #[test]
    fn test_start_session_validation() {
        assert!(start_session(&["Only"]).is_err());
        assert!(start_session::<&str>(&[]).is_err());
        assert!(start_session(&["A", "B", "A"]).is_err());
        assert!(start_session(&["A", ""]).is_err());
    }

    #[test]
    fn test_reset_starts_over() {
        let mut engine = start_session(&["A", "B", "C"]).unwrap();
        run_truthfully(&mut engine, &["C", "B", "A"]);
        assert!(engine.is_finished());

        engine.reset();
        assert!(!engine.is_finished());
        assert_eq!(engine.progress().completed, 0);
        assert_eq!(engine.questions_asked(), 0);
        assert_eq!(engine.graph().edge_count(), 0);

        run_truthfully(&mut engine, &["B", "A", "C"]);
        assert_eq!(engine.current_ranking().items, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_forced_strategy() {
        let config = EngineConfig {
            strategy: Some(Strategy::Adaptive),
            ..EngineConfig::default()
        };
        let mut engine = RankingEngine::new(&["A", "B", "C", "D"], config).unwrap();
        assert_eq!(engine.strategy(), Strategy::Adaptive);
        run_truthfully(&mut engine, &["D", "C", "B", "A"]);
        assert_eq!(engine.current_ranking().items, vec!["D", "C", "B", "A"]);
    }

    #[test]
    fn test_can_infer_unknown_item() {
        let engine = start_session(&["A", "B"]).unwrap();
        assert!(engine.can_infer("A", "Q").is_err());
        assert!(!engine.can_infer("A", "B").unwrap());
    }
}
