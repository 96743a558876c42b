//! Configuration loading for the extractor.
//!
//! All user-tunable settings are centralized here and loaded from
//! `conf/config.toml` if present. Any missing or invalid entries fall back to
//! defaults so a run can still proceed.

mod defaults;
mod io;
mod models;
mod tables;

pub use io::{load_config, parse_config, serialize_config};
pub use models::{AppConfig, DocumentOrder, ExtractionConfig, LogLevel, OutputConfig, OutputFormat};
