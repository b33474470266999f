mod config;
mod output;
mod parse;
mod prompt;
mod simulate;

use clap::Parser;
use prefsort_core::{
    EngineConfig, RankingEngine, Strategy, finalize_items, parse_import, validate_item_count,
};
use rand::seq::SliceRandom;
use std::io;
use std::path::PathBuf;
use tracing::debug;

use crate::output::SessionSummary;
use crate::prompt::{SessionOutcome, collect_items, run_interactive};

pub fn bail(msg: impl std::fmt::Display) -> ! {
    eprintln!("Error: {msg}");
    std::process::exit(1);
}

#[derive(Parser)]
#[command(name = "prefsort", version, about = "Rank items by answering pairwise questions")]
struct Cli {
    /// Log engine decisions to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Rank a list of items by choosing between pairs
    Rank(RankArgs),
    /// Measure how many questions the strategies need on random orders
    Simulate(SimulateArgs),
    /// Create a default config file at ~/.config/prefsort/config.toml
    Init,
}

#[derive(Parser)]
struct RankArgs {
    /// File with one item per line, or a JSON array of strings
    #[arg(long)]
    items: Option<PathBuf>,

    /// Inline item (repeatable)
    #[arg(long = "item")]
    inline_items: Vec<String>,

    /// Comma-separated items, e.g. "Apple, Banana, Cherry". Repeats are dropped.
    #[arg(long)]
    import: Option<String>,

    /// Expected number of items. Ranking fails if the item list does not
    /// have exactly this many unique items.
    #[arg(long)]
    count: Option<usize>,

    /// Strategy: "auto" (by item count), "exhaustive" or "adaptive"
    #[arg(long)]
    strategy: Option<String>,

    /// Largest item count ranked exhaustively in auto mode
    #[arg(long)]
    exhaustive_threshold: Option<usize>,

    /// Maximum number of items allowed
    #[arg(long)]
    max_items: Option<usize>,

    /// Randomize item order before comparing
    #[arg(long)]
    shuffle: bool,

    /// Output JSON instead of table
    #[arg(long)]
    json: bool,

    /// Path to config file (default: ~/.config/prefsort/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser)]
struct SimulateArgs {
    /// Number of items per simulated session
    #[arg(long, default_value_t = 20)]
    items: usize,

    /// Number of simulated sessions
    #[arg(long, default_value_t = 100)]
    trials: usize,

    /// RNG seed for reproducible runs (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Strategy: "auto" (by item count), "exhaustive" or "adaptive"
    #[arg(long)]
    strategy: Option<String>,

    /// Largest item count ranked exhaustively in auto mode
    #[arg(long)]
    exhaustive_threshold: Option<usize>,

    /// Output JSON instead of text
    #[arg(long)]
    json: bool,

    /// Path to config file (default: ~/.config/prefsort/config.toml)
    #[arg(long)]
    config: Option<PathBuf>,
}

fn parse_strategy(value: Option<&str>) -> Option<Strategy> {
    match value {
        Some("auto") | None => None,
        Some("exhaustive") => Some(Strategy::Exhaustive),
        Some("adaptive") => Some(Strategy::Adaptive),
        Some(other) => bail(format!(
            "Unknown strategy \"{other}\". Use \"auto\", \"exhaustive\" or \"adaptive\"."
        )),
    }
}

/// Engine settings from CLI flags, falling back to the config file.
fn build_engine_config(
    exhaustive_threshold: Option<usize>,
    strategy: Option<&str>,
    cfg: &config::PrefsortConfig,
) -> EngineConfig {
    let defaults = EngineConfig::default();
    EngineConfig {
        exhaustive_threshold: exhaustive_threshold
            .or(cfg.exhaustive_threshold)
            .unwrap_or(defaults.exhaustive_threshold),
        strategy: parse_strategy(strategy),
        ..defaults
    }
}

/// Load items from --items file, --import list and --item flags, in that order.
/// Returns an empty list if none were given.
fn load_items(args: &RankArgs) -> Vec<String> {
    let mut items = Vec::new();

    if let Some(ref path) = args.items {
        let content = std::fs::read_to_string(path)
            .unwrap_or_else(|e| bail(format!("Failed to read items file {}: {e}", path.display())));
        items = parse::parse_items_from_str(&content).unwrap_or_else(|e| bail(e));
    }

    if let Some(ref list) = args.import {
        items.extend(parse_import(list));
    }

    items.extend(args.inline_items.iter().cloned());
    items
}

fn init_tracing(verbose: bool) {
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Rank(args) => run_rank(args),
        Commands::Simulate(args) => run_simulate(args),
        Commands::Init => {
            let path = config::create_default_config();
            println!("Created config at {}", path.display());
            println!("Edit it to set your default strategy threshold, item limits, etc.");
        }
    }
}

fn run_rank(args: RankArgs) {
    // Load config file, merge with CLI args (CLI wins)
    let config_path = args.config.clone().unwrap_or_else(config::config_path);
    let cfg = config::load_config(&config_path);

    let max_items = args.max_items.or(cfg.max_items).unwrap_or(config::DEFAULT_MAX_ITEMS);
    let large_item_warning = cfg.large_item_warning.unwrap_or(config::DEFAULT_LARGE_ITEM_WARNING);
    let json = args.json || cfg.json.unwrap_or(false);

    let engine_config = build_engine_config(
        args.exhaustive_threshold,
        args.strategy.as_deref(),
        &cfg,
    );

    // Prompts go to stderr so stdout carries only the results (e.g. --json).
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let mut prompt_out = io::stderr();

    let mut items = load_items(&args);
    if items.is_empty() {
        items = collect_items(max_items, &mut input, &mut prompt_out)
            .unwrap_or_else(|e| bail(format!("Failed to read from stdin: {e}")))
            .unwrap_or_else(|| bail("Input ended before all items were entered."));
    }

    if let Some(count) = args.count {
        validate_item_count(count, max_items).unwrap_or_else(|e| bail(e));
        items = finalize_items(&items, count).unwrap_or_else(|e| bail(e));
    }
    validate_item_count(items.len(), max_items).unwrap_or_else(|e| bail(e));

    if items.len() > large_item_warning {
        let strategy = engine_config.strategy_for(items.len());
        eprintln!(
            "Warning: ranking {} items with the {strategy} strategy may take around {} questions.",
            items.len(),
            strategy.total_estimate(items.len()),
        );
    }

    if args.shuffle {
        items.shuffle(&mut rand::rng());
    }

    let mut engine = RankingEngine::new(&items, engine_config).unwrap_or_else(|e| bail(e));
    debug!(items = engine.num_items(), strategy = %engine.strategy(), "starting comparisons");

    let outcome = run_interactive(&mut engine, &mut input, &mut prompt_out)
        .unwrap_or_else(|e| bail(format!("Failed to read answer: {e}")));
    if outcome == SessionOutcome::Stopped {
        eprintln!("Stopped early; showing the ranking so far.");
    }

    let ranking = engine.current_ranking();
    let summary = SessionSummary {
        progress: engine.progress(),
        determined: engine.is_determined(),
        questions_asked: engine.questions_asked(),
        strategy: engine.strategy(),
    };

    if json {
        output::print_json(&ranking, &summary);
    } else {
        println!();
        output::print_table(&ranking, &summary);
    }
}

fn run_simulate(args: SimulateArgs) {
    let config_path = args.config.clone().unwrap_or_else(config::config_path);
    let cfg = config::load_config(&config_path);

    let engine_config = build_engine_config(
        args.exhaustive_threshold,
        args.strategy.as_deref(),
        &cfg,
    );

    let seed = args.seed.unwrap_or_else(rand::random);
    let report = simulate::run_simulation(args.items, args.trials, seed, &engine_config)
        .unwrap_or_else(|e| bail(e));

    if args.json || cfg.json.unwrap_or(false) {
        let json = serde_json::to_string_pretty(&report)
            .unwrap_or_else(|e| bail(format!("Failed to serialize report: {e}")));
        println!("{json}");
    } else {
        simulate::print_report(&report);
    }
}
