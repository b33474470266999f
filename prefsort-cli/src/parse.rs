/// Parsing of user input: item lists and answers to a comparison prompt.
use prefsort_core::ComparisonPair;
use prefsort_core::items::dedup_names;

/// What the user typed in response to a comparison prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// The preferred item's name.
    Pick(String),
    /// Stop comparing and show the ranking so far.
    Quit,
    /// Input that matches neither item; re-prompt.
    Invalid(String),
}

/// Parse items from file or stdin content: a JSON array of strings, or plain
/// text with one item per line. Blank entries are dropped and repeated names
/// collapsed to their first occurrence.
pub fn parse_items_from_str(content: &str) -> Result<Vec<String>, String> {
    let trimmed = content.trim();
    if trimmed.starts_with('[') {
        let items: Vec<String> = serde_json::from_str(trimmed)
            .map_err(|e| format!("File looks like JSON but failed to parse: {e}"))?;
        Ok(dedup_names(items))
    } else {
        Ok(dedup_names(trimmed.lines()))
    }
}

/// Interpret one line of input for `pair`.
///
/// Accepts `1` / `2`, the exact item name, or `q` / `quit`. Item names win
/// over the shortcuts, so an item literally called "2" or "q" can still be
/// picked by name.
pub fn parse_choice(line: &str, pair: &ComparisonPair) -> Choice {
    let input = line.trim();
    if input == pair.first || input == pair.second {
        return Choice::Pick(input.to_string());
    }
    match input.to_ascii_lowercase().as_str() {
        "1" => Choice::Pick(pair.first.clone()),
        "2" => Choice::Pick(pair.second.clone()),
        "q" | "quit" => Choice::Quit,
        _ => Choice::Invalid(input.to_string()),
    }
}
