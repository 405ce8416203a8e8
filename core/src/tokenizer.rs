use lazy_static::lazy_static;
use regex::Regex;
use std::collections::BTreeSet;

lazy_static! {
    // ASCII punctuation and digits separate words, as do the information separators
    // U+001C..U+001F, which `split_whitespace` would otherwise keep inside a token.
    static ref SEPARATORS: Regex =
        Regex::new(r"[[:punct:][:digit:]\x1C-\x1F]").expect("valid regex");
}

/// Shortest token kept, in characters.
pub const MIN_TERM_CHARS: usize = 3;

fn terms(text: &str) -> Vec<String> {
    SEPARATORS
        .replace_all(text, " ")
        .split_whitespace()
        .filter(|token| token.chars().count() >= MIN_TERM_CHARS)
        .map(str::to_lowercase)
        .collect()
}

/// Tokenize text into lowercase terms, keeping duplicates in their original order.
///
/// Punctuation and digits become spaces, so `"Chicken-Soup"` yields two terms and `"123"`
/// yields none. Tokens shorter than three characters are dropped.
pub fn tokenize(text: &str) -> Vec<String> {
    terms(text)
}

/// Tokenize text into a deduplicated, sorted set of terms. Used for queries.
pub fn tokenize_set(text: &str) -> BTreeSet<String> {
    terms(text).into_iter().collect()
}
