//! One extraction run: archive → markup → entries → output table.
//!
//! Every entry is collected before the output file is touched, so a fatal
//! input error never creates or truncates the destination.

use crate::archive::open_documents;
use crate::config::{AppConfig, OutputFormat};
use crate::error::ExtractError;
use crate::extract::{ProgramEntry, ScheduleExtractor};
use crate::markup::ParsedDocument;
use crate::writer::write_table;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output_path: PathBuf,
    pub format: OutputFormat,
    pub documents_scanned: usize,
    pub documents_with_entries: usize,
    pub documents_skipped: usize,
    pub entries: usize,
}

/// Entries of every document in `input`, in reader order, plus document
/// counters for the summary.
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    pub entries: Vec<ProgramEntry>,
    pub documents_scanned: usize,
    pub documents_with_entries: usize,
    pub documents_skipped: usize,
}

pub fn extract_entries(input: &Path, config: &AppConfig) -> Result<Extraction, ExtractError> {
    let extractor = ScheduleExtractor::new(&config.extraction);
    let mut result = Extraction::default();

    for item in open_documents(input, config.document_order)? {
        result.documents_scanned += 1;
        let document = match item {
            Ok(document) => document,
            Err(err) => {
                warn!("Skipping unreadable document: {err}");
                result.documents_skipped += 1;
                continue;
            }
        };

        let found = ParsedDocument::parse(&document).and_then(|doc| extractor.extract(&doc));
        match found {
            Ok(entries) if entries.is_empty() => {
                debug!(document = %document.path, "No program entries");
            }
            Ok(entries) => {
                info!(
                    document = %document.path,
                    entries = entries.len(),
                    "Found weekly program"
                );
                result.documents_with_entries += 1;
                result.entries.extend(entries);
            }
            Err(err) => {
                warn!("Skipping document: {err}");
                result.documents_skipped += 1;
            }
        }
    }
    Ok(result)
}

/// Run the whole pipeline for one EPUB and write the configured output.
pub fn run(input: &Path, config: &AppConfig) -> Result<RunSummary, ExtractError> {
    let started = Instant::now();
    info!(input = %input.display(), "Starting extraction");

    let extraction = extract_entries(input, config)?;
    let output_path = write_table(&extraction.entries, &config.output)?;

    let summary = RunSummary {
        output_path,
        format: config.output.format,
        documents_scanned: extraction.documents_scanned,
        documents_with_entries: extraction.documents_with_entries,
        documents_skipped: extraction.documents_skipped,
        entries: extraction.entries.len(),
    };
    info!(
        output = %summary.output_path.display(),
        documents = summary.documents_scanned,
        matched = summary.documents_with_entries,
        skipped = summary.documents_skipped,
        entries = summary.entries,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Extraction finished"
    );
    Ok(summary)
}
