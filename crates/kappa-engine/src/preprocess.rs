//! Text normalization: lower-case, expand domain abbreviations, tokenize.

use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Whole-word abbreviations expanded before tokenizing.
pub const ABBREVIATIONS: &[(&str, &str)] = &[
    ("wbc", "white blood cell"),
    ("rbc", "red blood cell"),
    ("bp", "blood pressure"),
    ("hr", "heart rate"),
    ("ai", "artificial intelligence"),
    ("ml", "machine learning"),
];

static ABBREVIATION_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = ABBREVIATIONS
        .iter()
        .map(|(short, _)| *short)
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{})\b", alternation)).expect("abbreviation pattern is valid")
});

// Letters, numbers and underscore. Combining marks split a word.
static WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\p{L}\p{N}_]+").expect("word pattern is valid"));

/// Normalize `text` into an ordered token sequence.
///
/// Tokens are runs of letters, numbers or `_` of at least two characters. Empty or
/// whitespace-only input yields an empty sequence.
pub fn preprocess(text: &str) -> Vec<String> {
    let normalized = text.to_lowercase();
    let expanded = expand_abbreviations(normalized.trim());
    WORD_RE
        .find_iter(&expanded)
        .map(|m| m.as_str())
        .filter(|token| token.chars().count() > 1)
        .map(String::from)
        .collect()
}

fn expand_abbreviations(text: &str) -> String {
    ABBREVIATION_RE
        .replace_all(text, |caps: &Captures| {
            let short = &caps[0];
            ABBREVIATIONS
                .iter()
                .find(|(abbr, _)| *abbr == short)
                .map(|(_, long)| (*long).to_string())
                .unwrap_or_else(|| short.to_string())
        })
        .into_owned()
}
