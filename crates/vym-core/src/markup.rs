//! Markup parsing for publication documents.
//!
//! Parsing goes through html5ever (via `scraper`), which repairs unbalanced
//! tags and other irregular markup instead of rejecting the document. A
//! document is only reported as malformed when its bytes are not text at all
//! or the plain-text renderer gives up on the tree.

use crate::archive::PublicationDocument;
use crate::error::ExtractError;
use crate::text_utils::normalize_text;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use tracing::{debug, trace, warn};

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Line width handed to html2text; wide enough that no hard wraps are added.
const PLAIN_TEXT_WIDTH: usize = 10_000;

/// A parsed document tree plus the source it came from.
pub struct ParsedDocument {
    path: String,
    source: String,
    html: Html,
}

/// One element selected by tag, with its normalized text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Block {
    pub tag: String,
    pub classes: Vec<String>,
    pub text: String,
}

impl Block {
    pub fn is_heading(&self) -> bool {
        matches!(self.tag.as_str(), "h1" | "h2" | "h3" | "h4" | "h5" | "h6")
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

impl ParsedDocument {
    pub fn parse(document: &PublicationDocument) -> Result<Self, ExtractError> {
        let bytes = document
            .content
            .strip_prefix(UTF8_BOM)
            .unwrap_or(&document.content);
        let source = std::str::from_utf8(bytes)
            .map_err(|err| ExtractError::MalformedMarkup {
                document: document.path.clone(),
                reason: format!("content is not UTF-8 text: {err}"),
            })?
            .to_string();
        Ok(Self::parse_str(&document.path, source))
    }

    /// Parse markup that is already text.
    pub fn parse_str(path: &str, source: impl Into<String>) -> Self {
        let source = source.into();
        let html = Html::parse_document(&source);
        if !html.errors.is_empty() {
            debug!(
                document = %path,
                recovered_errors = html.errors.len(),
                "Markup parsed with recovered errors"
            );
        }
        Self {
            path: path.to_string(),
            source,
            html,
        }
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Plain text of the whole document with paragraph and heading breaks kept
    /// as line breaks.
    pub fn plain_text(&self) -> Result<String, ExtractError> {
        html2text::from_read(self.source.as_bytes(), PLAIN_TEXT_WIDTH).map_err(|err| {
            ExtractError::MalformedMarkup {
                document: self.path.clone(),
                reason: format!("plain-text rendering failed: {err}"),
            }
        })
    }

    /// Elements with any of the given tag names, plus elements carrying any
    /// of `marker_classes`, in document order.
    ///
    /// When a tag-selected element sits inside another tag-selected element
    /// only the outer one is returned, so nested `<li><p>..</p></li>` is
    /// reported once. Marker elements are always returned, whatever their tag
    /// and nesting.
    pub fn blocks(&self, tags: &[String], marker_classes: &[String]) -> Vec<Block> {
        let wanted: HashSet<String> = tags.iter().map(|tag| tag.to_ascii_lowercase()).collect();
        let Some(selector) = block_selector(&wanted, marker_classes) else {
            return Vec::new();
        };
        let is_marker = |element: &ElementRef<'_>| {
            element
                .value()
                .classes()
                .any(|class| marker_classes.iter().any(|marker| marker == class))
        };

        let blocks: Vec<Block> = self
            .html
            .select(&selector)
            .filter(|element| is_marker(element) || !has_selected_ancestor(element, &wanted))
            .map(to_block)
            .filter(|block| !block.text.is_empty())
            .collect();
        trace!(document = %self.path, blocks = blocks.len(), "Collected blocks");
        blocks
    }

    /// Elements carrying `class` in their class attribute, in document order.
    pub fn elements_with_class(&self, class: &str) -> Vec<Block> {
        self.html
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|element| element.value().classes().any(|c| c == class))
            .map(to_block)
            .collect()
    }
}

fn block_selector(tags: &HashSet<String>, marker_classes: &[String]) -> Option<Selector> {
    let mut parts: Vec<String> = tags.iter().cloned().collect();
    parts.sort_unstable();
    let tag_count = parts.len();
    parts.extend(
        marker_classes
            .iter()
            .filter(|class| !class.trim().is_empty())
            .map(|class| format!(".{}", class.trim())),
    );
    if parts.is_empty() {
        return None;
    }
    match Selector::parse(&parts.join(", ")) {
        Ok(selector) => Some(selector),
        Err(err) if parts.len() > tag_count && tag_count > 0 => {
            warn!(classes = ?marker_classes, "Ignoring unusable marker classes: {err}");
            Selector::parse(&parts[..tag_count].join(", ")).ok()
        }
        Err(err) => {
            debug!(selector = ?parts, "Invalid block selector: {err}");
            None
        }
    }
}

fn has_selected_ancestor(element: &ElementRef<'_>, tags: &HashSet<String>) -> bool {
    element
        .ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| tags.contains(ancestor.value().name()))
}

fn to_block(element: ElementRef<'_>) -> Block {
    let mut raw = String::new();
    collect_text(element, &mut raw);
    Block {
        tag: element.value().name().to_string(),
        classes: element.value().classes().map(str::to_string).collect(),
        text: normalize_text(&raw),
    }
}

/// Tags whose boundaries separate words even when the markup has no
/// whitespace there.
const BREAKING_TAGS: &[&str] = &[
    "address", "article", "aside", "blockquote", "br", "dd", "div", "dl", "dt", "figcaption",
    "figure", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header", "hr", "li", "nav", "ol",
    "p", "section", "table", "td", "th", "tr", "ul",
];

/// Text of `element` with a space at every block and `<br>` boundary.
/// Inline tags join their text directly, so `Can<em>ción</em>` stays one word.
fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        if let Some(text) = child.value().as_text() {
            out.push_str(text);
        } else if let Some(child_element) = ElementRef::wrap(child) {
            let breaks = BREAKING_TAGS.contains(&child_element.value().name());
            if breaks {
                out.push(' ');
            }
            collect_text(child_element, out);
            if breaks {
                out.push(' ');
            }
        }
    }
}
