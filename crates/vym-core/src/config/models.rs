use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Effective configuration for one run, flattened from the TOML tables.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub document_order: DocumentOrder,
    pub extraction: ExtractionConfig,
    pub output: OutputConfig,
    pub log_level: LogLevel,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            document_order: super::defaults::default_document_order(),
            extraction: ExtractionConfig::default(),
            output: OutputConfig::default(),
            log_level: super::defaults::default_log_level(),
        }
    }
}

/// Rules that decide which markup is a week heading and which is a program item.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ExtractionConfig {
    /// Regular expressions matched against heading text.
    #[serde(default = "super::defaults::default_week_patterns")]
    pub week_patterns: Vec<String>,
    /// Class names that mark a week heading regardless of its text.
    #[serde(default)]
    pub marker_classes: Vec<String>,
    /// Tags that start a new program entry.
    #[serde(default = "super::defaults::default_entry_tags")]
    pub entry_tags: Vec<String>,
    /// Tags whose text continues the current entry.
    #[serde(default = "super::defaults::default_detail_tags")]
    pub detail_tags: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        ExtractionConfig {
            week_patterns: super::defaults::default_week_patterns(),
            marker_classes: Vec::new(),
            entry_tags: super::defaults::default_entry_tags(),
            detail_tags: super::defaults::default_detail_tags(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default = "super::defaults::default_output_path")]
    pub path: String,
    #[serde(default = "super::defaults::default_output_format")]
    pub format: OutputFormat,
    #[serde(default = "super::defaults::default_sheet_name")]
    pub sheet_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            path: super::defaults::default_output_path(),
            format: super::defaults::default_output_format(),
            sheet_name: super::defaults::default_sheet_name(),
        }
    }
}

impl OutputConfig {
    pub fn path_buf(&self) -> PathBuf {
        PathBuf::from(&self.path)
    }

    /// Switch format, renaming the output when it still carries the extension
    /// of a known format (`weekly_programs.xlsx` -> `weekly_programs.txt`).
    pub fn set_format(&mut self, format: OutputFormat) {
        self.format = format;
        let path = self.path_buf();
        if OutputFormat::from_path(&path).is_some() {
            self.path = path
                .with_extension(format.extension())
                .to_string_lossy()
                .into_owned();
        }
    }
}

/// Order in which markup documents are read from the EPUB.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum DocumentOrder {
    /// Zip central-directory order.
    #[default]
    Archive,
    /// Reading order from the package spine.
    Spine,
}

impl std::fmt::Display for DocumentOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            DocumentOrder::Archive => "archive",
            DocumentOrder::Spine => "spine",
        };
        write!(f, "{}", label)
    }
}

/// Output file formats.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "kebab-case")]
pub enum OutputFormat {
    #[default]
    Xlsx,
    Text,
    Json,
}

impl OutputFormat {
    pub const ALL: [OutputFormat; 3] = [OutputFormat::Xlsx, OutputFormat::Text, OutputFormat::Json];

    /// Format implied by a file name's extension, if any.
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        OutputFormat::ALL
            .into_iter()
            .find(|format| format.extension() == ext)
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Xlsx => "xlsx",
            OutputFormat::Text => "txt",
            OutputFormat::Json => "json",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            OutputFormat::Xlsx => "Spreadsheet (xlsx)",
            OutputFormat::Text => "Plain text",
            OutputFormat::Json => "JSON",
        };
        write!(f, "{}", label)
    }
}

/// Supported logging verbosity levels.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_filter_str())
    }
}

impl LogLevel {
    pub fn as_filter_str(self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}
