//! Schedule extraction: parsed document in, program entries out.
//!
//! A week starts at a heading whose text looks like a date range ("6-12 DE
//! ENERO") or at an element carrying one of the configured marker classes, and
//! runs until the next such heading. Inside a week every entry block (item
//! headings, list items) becomes one program entry; paragraphs that follow an
//! entry are only consulted for a duration the entry itself lacks.
//!
//! Nothing here touches the file system, so every rule can be exercised with
//! inline markup.

pub mod rules;

use crate::config::ExtractionConfig;
use crate::error::ExtractError;
use crate::markup::{Block, ParsedDocument};
use regex::Regex;
use rules::{EntryFields, continuation_fields, split_fields};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// One row of the output table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramEntry {
    pub week: String,
    pub title: String,
    #[serde(rename = "duration")]
    pub duration_minutes: Option<u32>,
    pub assignment: String,
}

/// The blocks between one week heading and the next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramSection {
    pub week: String,
    pub blocks: Vec<Block>,
}

/// An entry block plus the detail blocks that follow it.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Candidate {
    text: String,
    details: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct ScheduleExtractor {
    week_patterns: Vec<Regex>,
    marker_classes: Vec<String>,
    entry_tags: Vec<String>,
    detail_tags: Vec<String>,
    scan_tags: Vec<String>,
}

impl Default for ScheduleExtractor {
    fn default() -> Self {
        Self::new(&ExtractionConfig::default())
    }
}

impl ScheduleExtractor {
    pub fn new(config: &ExtractionConfig) -> Self {
        let mut week_patterns = compile_patterns(&config.week_patterns);
        if week_patterns.is_empty() {
            warn!("No usable week patterns configured; using the built-in patterns");
            week_patterns = compile_patterns(&ExtractionConfig::default().week_patterns);
        }

        let entry_tags = lowercase_all(&config.entry_tags);
        let detail_tags = lowercase_all(&config.detail_tags);
        let mut scan_tags: Vec<String> = HEADING_TAGS.iter().map(|t| t.to_string()).collect();
        for tag in entry_tags.iter().chain(detail_tags.iter()) {
            if !scan_tags.contains(tag) {
                scan_tags.push(tag.clone());
            }
        }

        Self {
            week_patterns,
            marker_classes: config.marker_classes.clone(),
            entry_tags,
            detail_tags,
            scan_tags,
        }
    }

    /// All program entries of one document, in document order.
    pub fn extract(&self, doc: &ParsedDocument) -> Result<Vec<ProgramEntry>, ExtractError> {
        if !self.has_program_cue(doc)? {
            trace!(document = %doc.path(), "No week cue in document");
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for section in self.sections(doc) {
            let found = self.section_entries(&section);
            debug!(
                document = %doc.path(),
                week = %section.week,
                entries = found.len(),
                "Extracted weekly program"
            );
            entries.extend(found);
        }
        Ok(entries)
    }

    /// Cheap check before walking the tree: does the document mention a week
    /// at all?
    pub fn has_program_cue(&self, doc: &ParsedDocument) -> Result<bool, ExtractError> {
        if self
            .marker_classes
            .iter()
            .any(|class| !doc.elements_with_class(class).is_empty())
        {
            return Ok(true);
        }
        let text = doc.plain_text()?;
        Ok(self.week_patterns.iter().any(|re| re.is_match(&text)))
    }

    /// Split a document into weekly sections. Blocks before the first week
    /// heading belong to no section and are dropped.
    pub fn sections(&self, doc: &ParsedDocument) -> Vec<ProgramSection> {
        let mut sections: Vec<ProgramSection> = Vec::new();
        for block in doc.blocks(&self.scan_tags, &self.marker_classes) {
            if self.is_week_heading(&block) {
                sections.push(ProgramSection {
                    week: block.text,
                    blocks: Vec::new(),
                });
            } else if let Some(current) = sections.last_mut() {
                current.blocks.push(block);
            }
        }
        sections
    }

    pub fn section_entries(&self, section: &ProgramSection) -> Vec<ProgramEntry> {
        self.segment(section)
            .into_iter()
            .filter_map(|candidate| {
                let fields = resolve_fields(&candidate);
                if fields.title.is_empty()
                    && fields.assignment.is_empty()
                    && fields.duration_minutes.is_none()
                {
                    trace!(text = %candidate.text, "Skipping candidate with no fields");
                    return None;
                }
                Some(ProgramEntry {
                    week: section.week.clone(),
                    title: fields.title,
                    duration_minutes: fields.duration_minutes,
                    assignment: fields.assignment,
                })
            })
            .collect()
    }

    fn segment(&self, section: &ProgramSection) -> Vec<Candidate> {
        let mut candidates: Vec<Candidate> = Vec::new();
        for block in &section.blocks {
            if self.entry_tags.contains(&block.tag) {
                candidates.push(Candidate {
                    text: block.text.clone(),
                    details: Vec::new(),
                });
            } else if self.detail_tags.contains(&block.tag) {
                if let Some(current) = candidates.last_mut() {
                    current.details.push(block.text.clone());
                }
            }
        }
        candidates
    }

    fn is_week_heading(&self, block: &Block) -> bool {
        if self.marker_classes.iter().any(|class| block.has_class(class)) {
            return true;
        }
        block.is_heading() && self.week_patterns.iter().any(|re| re.is_match(&block.text))
    }
}

fn resolve_fields(candidate: &Candidate) -> EntryFields {
    let mut fields = split_fields(&candidate.text);
    if fields.duration_minutes.is_none() {
        if let Some((minutes, rest)) = candidate
            .details
            .first()
            .and_then(|detail| continuation_fields(detail))
        {
            fields.duration_minutes = Some(minutes);
            if fields.assignment.is_empty() {
                fields.assignment = rest;
            }
        }
    }
    fields
}

fn compile_patterns(patterns: &[String]) -> Vec<Regex> {
    patterns
        .iter()
        .filter_map(|pattern| match Regex::new(pattern) {
            Ok(re) => Some(re),
            Err(err) => {
                warn!(%pattern, "Ignoring invalid week pattern: {err}");
                None
            }
        })
        .collect()
}

fn lowercase_all(tags: &[String]) -> Vec<String> {
    tags.iter().map(|tag| tag.trim().to_ascii_lowercase()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(body: &str) -> ParsedDocument {
        ParsedDocument::parse_str(
            "OEBPS/test.xhtml",
            format!("<html><body>{body}</body></html>"),
        )
    }

    fn extract(body: &str) -> Vec<ProgramEntry> {
        ScheduleExtractor::default()
            .extract(&parse(body))
            .expect("extraction should succeed")
    }

    fn entry(week: &str, title: &str, minutes: Option<u32>, assignment: &str) -> ProgramEntry {
        ProgramEntry {
            week: week.to_string(),
            title: title.to_string(),
            duration_minutes: minutes,
            assignment: assignment.to_string(),
        }
    }

    #[test]
    fn three_entry_section_keeps_order_and_blank_assignment() {
        let entries = extract(
            "<h1>6-12 DE ENERO</h1>\
             <ul>\
               <li>Entry A — 15 min — Assignment X</li>\
               <li>Entry B — 5 min</li>\
               <li>Entry C — 10 min — Assignment Z</li>\
             </ul>",
        );
        assert_eq!(
            entries,
            vec![
                entry("6-12 DE ENERO", "Entry A", Some(15), "Assignment X"),
                entry("6-12 DE ENERO", "Entry B", Some(5), ""),
                entry("6-12 DE ENERO", "Entry C", Some(10), "Assignment Z"),
            ]
        );
    }

    #[test]
    fn workbook_layout_takes_duration_from_following_paragraph() {
        let entries = extract(
            "<header><h1>6-12 DE ENERO</h1><h2>ISAÍAS 17-20</h2></header>\
             <h3>Canción 76 y oración</h3>\
             <h3>Palabras de introducción (1 min.)</h3>\
             <h3>1. Dios castiga a los que tratan mal a su pueblo</h3>\
             <p>(10 mins.) Análisis con el auditorio.</p>\
             <p>Is 17:12-14. Estudie esta sección.</p>\
             <h3>3. Lectura de la Biblia</h3>\
             <p>(4 mins.) Is 18:1-7 (th lección 12).</p>",
        );
        let titles: Vec<&str> = entries.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(
            titles,
            vec![
                "ISAÍAS 17-20",
                "Canción 76 y oración",
                "Palabras de introducción",
                "1. Dios castiga a los que tratan mal a su pueblo",
                "3. Lectura de la Biblia",
            ]
        );
        assert_eq!(entries[1].duration_minutes, None);
        assert_eq!(entries[2].duration_minutes, Some(1));
        assert_eq!(entries[3].duration_minutes, Some(10));
        assert_eq!(entries[3].assignment, "Análisis con el auditorio.");
        assert_eq!(entries[4].duration_minutes, Some(4));
        assert_eq!(entries[4].assignment, "Is 18:1-7 (th lección 12).");
    }

    #[test]
    fn splits_multiple_weeks_in_one_document() {
        let entries = extract(
            "<h1>6-12 DE ENERO</h1><h3>Primera (5 mins.)</h3>\
             <h1>13-19 DE ENERO</h1><h3>Segunda (7 mins.)</h3><h3>Tercera</h3>",
        );
        let weeks: Vec<(&str, &str)> = entries
            .iter()
            .map(|e| (e.week.as_str(), e.title.as_str()))
            .collect();
        assert_eq!(
            weeks,
            vec![
                ("6-12 DE ENERO", "Primera"),
                ("13-19 DE ENERO", "Segunda"),
                ("13-19 DE ENERO", "Tercera"),
            ]
        );
    }

    #[test]
    fn cross_month_and_english_week_headings() {
        let extractor = ScheduleExtractor::default();
        for heading in [
            "30 DE DICIEMBRE-5 DE ENERO",
            "6-12 DE ENERO",
            "JANUARY 6-12",
            "DECEMBER 30–JANUARY 5",
        ] {
            let doc = parse(&format!("<h1>{heading}</h1><h3>Item (3 mins.)</h3>"));
            let sections = extractor.sections(&doc);
            assert_eq!(sections.len(), 1, "{heading}");
            assert_eq!(sections[0].week, heading);
        }
    }

    #[test]
    fn content_before_first_week_is_ignored() {
        let entries = extract(
            "<h2>Contenido</h2><li>Not a program item (2 mins.)</li>\
             <h1>6-12 DE ENERO</h1><h3>Item (3 mins.)</h3>",
        );
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Item");
    }

    #[test]
    fn unrelated_document_yields_nothing() {
        assert!(extract("<h1>Índice</h1><p>Cubierta</p><h2>Notas</h2>").is_empty());
    }

    #[test]
    fn week_heading_with_empty_body_yields_nothing() {
        assert!(extract("<h1>6-12 DE ENERO</h1><p>   </p>").is_empty());
    }

    #[test]
    fn week_text_in_a_paragraph_is_not_a_heading() {
        assert!(extract("<p>Reunión del 6-12 DE ENERO</p><h3>Item (3 mins.)</h3>").is_empty());
    }

    #[test]
    fn marker_class_starts_a_section() {
        let config = ExtractionConfig {
            marker_classes: vec!["weekHeading".to_string()],
            ..ExtractionConfig::default()
        };
        let extractor = ScheduleExtractor::new(&config);
        let doc = parse(
            "<p class=\"weekHeading\">Semana uno</p>\
             <h3>Entry A — 15 min — Assignment X</h3>",
        );
        let entries = extractor.extract(&doc).expect("extraction should succeed");
        assert_eq!(entries, vec![entry("Semana uno", "Entry A", Some(15), "Assignment X")]);
    }

    #[test]
    fn marker_class_on_any_tag_starts_a_section() {
        let config = ExtractionConfig {
            marker_classes: vec!["weekHeading".to_string()],
            ..ExtractionConfig::default()
        };
        let extractor = ScheduleExtractor::new(&config);
        for body in [
            "<div class=\"weekHeading\">Semana uno</div><h3>Entry A — 15 min — Assignment X</h3>",
            "<header><span class=\"weekHeading\">Semana uno</span></header>\
             <h3>Entry A — 15 min — Assignment X</h3>",
        ] {
            let entries = extractor.extract(&parse(body)).expect("extraction should succeed");
            assert_eq!(
                entries,
                vec![entry("Semana uno", "Entry A", Some(15), "Assignment X")],
                "{body}"
            );
        }
    }

    #[test]
    fn item_text_split_across_child_elements() {
        let entries = extract(
            "<h1>6-12 DE ENERO</h1>\
             <ul><li><p>Entry A</p><p>15 min</p></li><li>Entry B<br/>5 min</li></ul>",
        );
        assert_eq!(
            entries,
            vec![
                entry("6-12 DE ENERO", "Entry A", Some(15), ""),
                entry("6-12 DE ENERO", "Entry B", Some(5), ""),
            ]
        );
    }

    #[test]
    fn week_heading_with_line_break() {
        let entries = extract("<h1>6-12<br/>DE ENERO</h1><h3>Item (3 mins.)</h3>");
        assert_eq!(entries, vec![entry("6-12 DE ENERO", "Item", Some(3), "")]);
    }

    #[test]
    fn invalid_patterns_fall_back_to_builtin() {
        let config = ExtractionConfig {
            week_patterns: vec!["(unclosed".to_string()],
            ..ExtractionConfig::default()
        };
        let extractor = ScheduleExtractor::new(&config);
        let doc = parse("<h1>6-12 DE ENERO</h1><h3>Item (3 mins.)</h3>");
        assert_eq!(extractor.extract(&doc).expect("extraction").len(), 1);
    }

    #[test]
    fn entry_without_any_text_is_dropped() {
        let entries = extract("<h1>6-12 DE ENERO</h1><h3> — </h3><h3>Real (2 mins.)</h3>");
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].title, "Real");
    }
}
