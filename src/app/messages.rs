use super::state::Outcome;
use std::path::PathBuf;
use vym_core::config::OutputFormat;

/// Messages emitted by the UI.
#[derive(Debug, Clone)]
pub enum Message {
    SelectEpub,
    EpubChosen(PathBuf),
    FormatSelected(OutputFormat),
    ExtractionFinished(Outcome),
}
