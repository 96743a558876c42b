//! Weekly meeting-program extraction from EPUB workbooks.
//!
//! The stages are usable on their own (`archive`, `markup`, `extract`,
//! `writer`); `pipeline::run` strings them together for one input file.

pub mod archive;
pub mod config;
pub mod error;
pub mod extract;
pub mod markup;
pub mod pipeline;
pub mod text_utils;
pub mod writer;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{ErrorKind, ExtractError};
pub use extract::{ProgramEntry, ScheduleExtractor};
pub use pipeline::{RunSummary, run};
pub use writer::COLUMNS;
