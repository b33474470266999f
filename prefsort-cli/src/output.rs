/// Output formatting: terminal table and JSON.
use prefsort_core::{Progress, Ranking, Strategy};
use serde::Serialize;

#[derive(Serialize)]
struct JsonRankedItem<'a> {
    rank: usize,
    name: &'a str,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    items: Vec<JsonRankedItem<'a>>,
    complete: bool,
    determined: bool,
    questions_asked: usize,
    progress: Progress,
    strategy: Strategy,
}

/// Summary numbers printed under the ranking.
pub struct SessionSummary {
    pub progress: Progress,
    /// Every pair's order follows from the answers given.
    pub determined: bool,
    pub questions_asked: usize,
    pub strategy: Strategy,
}

/// Render results as a terminal table.
pub fn render_table(ranking: &Ranking, summary: &SessionSummary) -> String {
    let name_width = ranking.items.iter()
        .map(|name| name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4); // at least "Item"

    let mut out = String::new();
    out.push_str(&format!("  # | {:<name_width$}\n", "Item"));
    out.push_str(&format!("----|-{}\n", "-".repeat(name_width)));

    for (i, name) in ranking.items.iter().enumerate() {
        out.push_str(&format!("{:>3} | {}\n", i + 1, name));
    }

    let inferred = summary.progress.completed.saturating_sub(summary.questions_asked);
    out.push_str(&format!(
        "\n{} of {} items ranked ({} strategy): {} questions asked, {} pairs inferred\n",
        ranking.len(),
        ranking.item_count,
        summary.strategy,
        summary.questions_asked,
        inferred,
    ));
    if !ranking.is_complete() {
        out.push_str("Ranking is partial: some items could not be placed.\n");
    } else if !summary.determined {
        out.push_str("Stopped early: some pairs are still open, so the order is provisional.\n");
    }
    out
}

/// Render results as JSON.
pub fn render_json(ranking: &Ranking, summary: &SessionSummary) -> serde_json::Result<String> {
    let items = ranking.items.iter()
        .enumerate()
        .map(|(i, name)| JsonRankedItem { rank: i + 1, name })
        .collect();

    let output = JsonOutput {
        items,
        complete: ranking.is_complete(),
        determined: summary.determined,
        questions_asked: summary.questions_asked,
        progress: summary.progress,
        strategy: summary.strategy,
    };
    serde_json::to_string_pretty(&output)
}

pub fn print_table(ranking: &Ranking, summary: &SessionSummary) {
    print!("{}", render_table(ranking, summary));
}

pub fn print_json(ranking: &Ranking, summary: &SessionSummary) {
    match render_json(ranking, summary) {
        Ok(json) => println!("{json}"),
        Err(e) => crate::bail(format!("Failed to serialize results: {e}")),
    }
}
