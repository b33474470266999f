/// prefsort-core: Pure-computation preference-inference engine.
///
/// Pairwise choices → directed preference graph → full ranking, asking as few
/// questions as possible. Pairs whose order already follows transitively from
/// earlier answers are never asked. No IO and no terminal: bring your own UI.
///
/// Items are identified by caller-provided names. The crate handles the
/// internal mapping to array indices, so callers never think about indices.
///
/// # Quick start
///
/// ```rust
/// use prefsort_core::start_session;
///
/// let mut engine = start_session(&["Tea", "Coffee", "Water"]).unwrap();
///
/// // Pretend the user always prefers the alphabetically first item.
/// while let Some(pair) = engine.next_comparison() {
///     let choice = pair.first.clone().min(pair.second.clone());
///     engine.answer(&choice).unwrap();
/// }
///
/// let ranking = engine.current_ranking();
/// assert!(ranking.is_complete());
/// assert_eq!(ranking.items, vec!["Coffee", "Tea", "Water"]);
/// ```

pub mod constants;
pub mod engine;
pub mod error;
pub mod graph;
pub mod inference;
pub mod items;
pub mod resolver;
pub mod scheduler;
pub mod types;

// Re-export primary public API at crate root.
pub use engine::{start_session, start_session_with_count, EngineConfig, RankingEngine};
pub use error::{RankError, Result};
pub use graph::PreferenceGraph;
pub use inference::can_infer;
pub use items::{finalize_items, parse_import, validate_item_count};
pub use resolver::resolve;
pub use scheduler::{adaptive_estimate, exhaustive_pair_count, Strategy};
pub use types::{ComparisonPair, Progress, Ranking};
