//! Field-extraction rules for a single program item.
//!
//! Each rule is a named pattern with its own fixtures below. The rules only
//! look at already-normalized text; deciding which text is an item is the
//! segmenter's job in the parent module.

use crate::text_utils::{trim_leading_separators, trim_trailing_separators};
use once_cell::sync::Lazy;
use regex::Regex;

/// A number followed by a minute marker: `15 min`, `(10 mins.)`, `5 minutos`,
/// `3 minutes`.
pub static DURATION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\(?\s*\b(?P<minutes>\d{1,3})\s*(?:min(?:utos?|utes?|s)?)\b\.?\s*\)?").unwrap()
});

/// An em or en dash with surrounding spaces separating title from free text.
pub static SEPARATOR: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+[—–]\s+").unwrap());

/// Title, duration and assignment split out of one item's text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFields {
    pub title: String,
    pub duration_minutes: Option<u32>,
    pub assignment: String,
}

/// A duration marker found in a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DurationMatch {
    pub minutes: u32,
    pub start: usize,
    pub end: usize,
}

pub fn find_duration(text: &str) -> Option<DurationMatch> {
    let caps = DURATION.captures(text)?;
    let whole = caps.get(0)?;
    let minutes = caps.name("minutes")?.as_str().parse().ok()?;
    Some(DurationMatch {
        minutes,
        start: whole.start(),
        end: whole.end(),
    })
}

/// Split an item's text into its fields.
///
/// With a duration marker, the title is whatever precedes it and the
/// assignment whatever follows. Without one, the text is split at the first
/// dash separator, if any.
pub fn split_fields(text: &str) -> EntryFields {
    if let Some(found) = find_duration(text) {
        return EntryFields {
            title: clean_label(&text[..found.start]),
            duration_minutes: Some(found.minutes),
            assignment: trim_leading_separators(&text[found.end..])
                .trim_end()
                .to_string(),
        };
    }

    match SEPARATOR.find(text) {
        Some(sep) => EntryFields {
            title: clean_label(&text[..sep.start()]),
            duration_minutes: None,
            assignment: trim_leading_separators(&text[sep.end()..])
                .trim_end()
                .to_string(),
        },
        None => EntryFields {
            title: clean_label(text),
            duration_minutes: None,
            assignment: String::new(),
        },
    }
}

fn clean_label(text: &str) -> String {
    trim_trailing_separators(trim_leading_separators(text)).to_string()
}

/// Duration and trailing text from a paragraph that follows an item heading,
/// as in `(10 mins.) Análisis con el auditorio.`
pub fn continuation_fields(text: &str) -> Option<(u32, String)> {
    let found = find_duration(text)?;
    let rest = trim_leading_separators(&text[found.end..]).trim_end();
    Some((found.minutes, rest.to_string()))
}
