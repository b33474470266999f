/// Simulate command: measures how many questions each strategy needs.
///
/// Each trial hides a random total order over N items, runs a full session
/// answering every question truthfully, and records the questions asked.
/// No human in the loop, so strategies and thresholds can be compared quickly.
use prefsort_core::{
    EngineConfig, RankError, RankingEngine, Strategy, exhaustive_pair_count,
};
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::Serialize;
use tracing::debug;

/// Aggregate results over all trials.
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport {
    pub num_items: usize,
    pub trials: usize,
    pub seed: u64,
    pub strategy: Strategy,
    pub mean_questions: f64,
    pub min_questions: usize,
    pub max_questions: usize,
    /// The engine's progress total: exact pair count or the n·log₂n estimate.
    pub progress_total: usize,
    pub all_pairs: usize,
    pub complete_rankings: usize,
}

/// Run `trials` sessions over `num_items` synthetic items.
pub fn run_simulation(
    num_items: usize,
    trials: usize,
    seed: u64,
    config: &EngineConfig,
) -> Result<SimulationReport, RankError> {
    let items: Vec<String> = (1..=num_items).map(|i| format!("item-{i}")).collect();
    let mut rng = SmallRng::seed_from_u64(seed);

    let mut questions = Vec::with_capacity(trials);
    let mut complete_rankings = 0;
    let strategy = config.strategy_for(num_items);

    for trial in 0..trials {
        // hidden_rank[i] = position of item i in the hidden order (0 = best)
        let mut hidden_rank: Vec<usize> = (0..num_items).collect();
        hidden_rank.shuffle(&mut rng);

        let mut engine = RankingEngine::new(&items, config.clone())?;

        while let Some(pair) = engine.next_comparison() {
            let first = item_index(&pair.first);
            let second = item_index(&pair.second);
            let winner = if hidden_rank[first] < hidden_rank[second] {
                &pair.first
            } else {
                &pair.second
            };
            engine.answer(winner)?;
        }

        let ranking = engine.current_ranking();
        if ranking.is_complete() && engine.is_determined() {
            complete_rankings += 1;
        }
        debug!(trial, questions = engine.questions_asked(), "trial finished");
        questions.push(engine.questions_asked());
    }

    let total: usize = questions.iter().sum();
    Ok(SimulationReport {
        num_items,
        trials,
        seed,
        strategy,
        mean_questions: if trials == 0 { 0.0 } else { total as f64 / trials as f64 },
        min_questions: questions.iter().copied().min().unwrap_or(0),
        max_questions: questions.iter().copied().max().unwrap_or(0),
        progress_total: strategy.total_estimate(num_items),
        all_pairs: exhaustive_pair_count(num_items),
        complete_rankings,
    })
}

/// Synthetic items are named `item-N`, 1-based.
fn item_index(name: &str) -> usize {
    name.trim_start_matches("item-").parse::<usize>().map_or(0, |n| n.saturating_sub(1))
}

pub fn print_report(report: &SimulationReport) {
    println!(
        "Simulated {} sessions of {} items ({} strategy, seed {})",
        report.trials, report.num_items, report.strategy, report.seed,
    );
    println!(
        "Questions asked: mean {:.1}, min {}, max {}",
        report.mean_questions, report.min_questions, report.max_questions,
    );
    println!(
        "Progress total: {} | All pairs: {}",
        report.progress_total, report.all_pairs,
    );
    println!(
        "Complete rankings: {}/{}",
        report.complete_rankings, report.trials,
    );
}
