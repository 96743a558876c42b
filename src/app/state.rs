use std::path::PathBuf;
use vym_core::config::AppConfig;
use vym_core::{ErrorKind, ExtractError, RunSummary};

/// Result of one extraction, reduced to what the window shows.
pub type Outcome = Result<RunSummary, Failure>;

/// A fatal error as presented to the user: its kind and message only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<ExtractError> for Failure {
    fn from(err: ExtractError) -> Self {
        Failure {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Status {
    #[default]
    Idle,
    Done(RunSummary),
    Failed(Failure),
}

impl Status {
    pub fn from_outcome(outcome: Outcome) -> Self {
        match outcome {
            Ok(summary) => Status::Done(summary),
            Err(failure) => Status::Failed(failure),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Status::Idle => "Select an EPUB workbook to extract its weekly programs.".to_string(),
            Status::Done(summary) => format!(
                "Wrote {} entries to {}",
                summary.entries,
                summary.output_path.display()
            ),
            Status::Failed(failure) => format!("{}: {}", failure.kind, failure.message),
        }
    }
}

/// Core application state.
pub struct App {
    pub(super) config: AppConfig,
    pub(super) status: Status,
    pub(super) last_input: Option<PathBuf>,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        App {
            config,
            status: Status::Idle,
            last_input: None,
        }
    }
}
