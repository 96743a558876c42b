//! Text cleanup shared by the parser and the extraction rules.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static RE_WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Compose to NFC and collapse runs of whitespace (including non-breaking
/// spaces) into single spaces.
pub fn normalize_text(raw: &str) -> String {
    let composed: String = raw.nfc().collect();
    RE_WHITESPACE_RUN
        .replace_all(&composed, " ")
        .trim()
        .to_string()
}

fn is_separator(c: char) -> bool {
    c.is_whitespace() || matches!(c, '—' | '–' | '-' | ':' | '|' | '·' | ',')
}

/// Strip separators left behind at the end of a label, including the opening
/// parenthesis of a removed "(10 mins.)" marker.
pub fn trim_trailing_separators(text: &str) -> &str {
    text.trim_end_matches(|c: char| is_separator(c) || c == '(')
}

/// Strip separators at the start of trailing free text, including the closing
/// parenthesis and period of a removed marker.
pub fn trim_leading_separators(text: &str) -> &str {
    text.trim_start_matches(|c: char| is_separator(c) || c == ')' || c == '.')
}
