/// Interactive comparison prompts.
///
/// Generic over the reader and writer so the whole question loop can be
/// driven from a string in tests.
use std::io::{self, BufRead, Write};

use prefsort_core::{ComparisonPair, Progress, RankingEngine, validate_item_count};
use tracing::debug;

use crate::parse::{Choice, parse_choice};

/// Width of the progress bar, in characters between the brackets.
pub const BAR_WIDTH: usize = 20;

/// How an interactive session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    /// The engine ran out of questions.
    Finished,
    /// The user quit (or input ended) before the engine was done.
    Stopped,
}

/// Render progress as `[#####---------------]  25% (3/12)`.
///
/// The adaptive strategy's total is an estimate, so the bar is clamped
/// rather than allowed to overflow.
pub fn progress_bar(progress: Progress, width: usize) -> String {
    let percent = progress.percent();
    let filled = ((percent / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    format!(
        "[{}{}] {:>3.0}% ({}/{})",
        "#".repeat(filled),
        "-".repeat(width - filled),
        percent,
        progress.completed,
        progress.total,
    )
}

/// The question shown for one pair.
pub fn build_prompt(pair: &ComparisonPair, progress: Progress) -> String {
    format!(
        "\n{}\nWhich do you prefer?\n  1) {}\n  2) {}\n> ",
        progress_bar(progress, BAR_WIDTH),
        pair.first,
        pair.second,
    )
}

/// Ask about one pair until the user gives a usable answer. Returns the
/// chosen item, or `None` if the user quit. End of input counts as quitting.
pub fn ask<R: BufRead, W: Write>(
    pair: &ComparisonPair,
    progress: Progress,
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<String>> {
    loop {
        write!(out, "{}", build_prompt(pair, progress))?;
        out.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            return Ok(None);
        }

        match parse_choice(&line, pair) {
            Choice::Pick(name) => return Ok(Some(name)),
            Choice::Quit => return Ok(None),
            Choice::Invalid(text) => {
                debug!(input = %text, "unrecognized answer");
                writeln!(out, "Please type 1, 2, one of the item names, or q to stop.")?;
            }
        }
    }
}

/// Read one trimmed line, or `None` at end of input.
fn read_trimmed<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Ask how many items to rank, then ask for each name in turn.
///
/// Bad counts, empty names and repeated names are rejected with a message
/// and asked again. Returns `None` if input ends first.
pub fn collect_items<R: BufRead, W: Write>(
    max_items: usize,
    input: &mut R,
    out: &mut W,
) -> io::Result<Option<Vec<String>>> {
    let count = loop {
        write!(out, "How many items do you want to rank? ")?;
        out.flush()?;
        let Some(line) = read_trimmed(input)? else {
            return Ok(None);
        };
        match line.parse::<usize>() {
            Ok(n) => match validate_item_count(n, max_items) {
                Ok(()) => break n,
                Err(e) => writeln!(out, "{e}")?,
            },
            Err(_) => writeln!(out, "Please enter a whole number.")?,
        }
    };

    let mut items: Vec<String> = Vec::with_capacity(count);
    while items.len() < count {
        write!(out, "Item {}/{}: ", items.len() + 1, count)?;
        out.flush()?;
        let Some(name) = read_trimmed(input)? else {
            return Ok(None);
        };
        if name.is_empty() {
            writeln!(out, "Item names cannot be empty.")?;
        } else if items.contains(&name) {
            writeln!(out, "\"{name}\" is already in the list.")?;
        } else {
            items.push(name);
        }
    }
    Ok(Some(items))
}

/// Run the question loop until the engine is done or the user quits.
pub fn run_interactive<R: BufRead, W: Write>(
    engine: &mut RankingEngine,
    input: &mut R,
    out: &mut W,
) -> io::Result<SessionOutcome> {
    while let Some(pair) = engine.next_comparison() {
        let Some(name) = ask(&pair, engine.progress(), input, out)? else {
            return Ok(SessionOutcome::Stopped);
        };
        if let Err(e) = engine.answer(&name) {
            writeln!(out, "{e}")?;
        }
    }
    writeln!(out, "\n{}", progress_bar(engine.progress(), BAR_WIDTH))?;
    Ok(SessionOutcome::Finished)
}

#[cfg(test)]
mod tests {
    use super::*;
    use prefsort_core::start_session;
    use std::io::Cursor;

    #[test]
    fn test_progress_bar_rendering() {
        let bar = progress_bar(Progress { completed: 3, total: 6 }, 10);
        assert_eq!(bar, "[#####-----]  50% (3/6)");

        let empty = progress_bar(Progress { completed: 0, total: 45 }, 10);
        assert_eq!(empty, "[----------]   0% (0/45)");
    }

    #[test]
    fn test_progress_bar_clamps_overshoot() {
        let bar = progress_bar(Progress { completed: 50, total: 44 }, 10);
        assert_eq!(bar, "[##########] 100% (50/44)");
    }

    #[test]
    fn test_build_prompt_lists_both_items() {
        let pair = ComparisonPair { first: "Pizza".into(), second: "Sushi".into() };
        let prompt = build_prompt(&pair, Progress { completed: 1, total: 3 });
        assert!(prompt.contains("1) Pizza"));
        assert!(prompt.contains("2) Sushi"));
        assert!(prompt.contains("(1/3)"));
    }

    #[test]
    fn test_ask_reprompts_on_invalid_input() {
        let pair = ComparisonPair { first: "Pizza".into(), second: "Sushi".into() };
        let mut input = Cursor::new("3\nsushi\n2\n");
        let mut out = Vec::new();
        let choice = ask(&pair, Progress::default(), &mut input, &mut out).unwrap();
        assert_eq!(choice.as_deref(), Some("Sushi"));

        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.matches("Which do you prefer?").count(), 3);
        assert_eq!(text.matches("Please type 1, 2").count(), 2);
    }

    #[test]
    fn test_ask_treats_eof_as_quit() {
        let pair = ComparisonPair { first: "A".into(), second: "B".into() };
        let mut input = Cursor::new("");
        let mut out = Vec::new();
        assert_eq!(ask(&pair, Progress::default(), &mut input, &mut out).unwrap(), None);
    }

    #[test]
    fn test_collect_items_validates_input() {
        let mut input = Cursor::new("1\nabc\n3\nPizza\n\nPizza\nSushi\nTacos\n");
        let mut out = Vec::new();
        let items = collect_items(100, &mut input, &mut out).unwrap();
        assert_eq!(items, Some(vec!["Pizza".to_string(), "Sushi".into(), "Tacos".into()]));

        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("between 2 and 100"));
        assert!(text.contains("whole number"));
        assert!(text.contains("cannot be empty"));
        assert!(text.contains("\"Pizza\" is already in the list"));
    }

    #[test]
    fn test_collect_items_respects_max() {
        let mut input = Cursor::new("5\n2\nA\nB\n");
        let mut out = Vec::new();
        let items = collect_items(4, &mut input, &mut out).unwrap();
        assert_eq!(items, Some(vec!["A".to_string(), "B".into()]));
    }

    #[test]
    fn test_collect_items_eof() {
        let mut input = Cursor::new("3\nA\n");
        let mut out = Vec::new();
        assert_eq!(collect_items(100, &mut input, &mut out).unwrap(), None);
    }

    #[test]
    fn test_run_interactive_to_completion() {
        let mut engine = start_session(&["A", "B", "C"]).unwrap();
        // (A, B) -> A, (B, C) -> B; (A, C) is inferred.
        let mut input = Cursor::new("1\nB\n");
        let mut out = Vec::new();
        let outcome = run_interactive(&mut engine, &mut input, &mut out).unwrap();

        assert_eq!(outcome, SessionOutcome::Finished);
        assert_eq!(engine.current_ranking().items, vec!["A", "B", "C"]);
        assert_eq!(engine.questions_asked(), 2);
    }

    #[test]
    fn test_run_interactive_quit_early() {
        let mut engine = start_session(&["A", "B", "C"]).unwrap();
        let mut input = Cursor::new("2\nq\n");
        let mut out = Vec::new();
        let outcome = run_interactive(&mut engine, &mut input, &mut out).unwrap();

        assert_eq!(outcome, SessionOutcome::Stopped);
        assert_eq!(engine.questions_asked(), 1);
        assert!(!engine.is_finished());
    }
}
