use super::models::{DocumentOrder, LogLevel, OutputFormat};

/// Spanish edition: "6-12 DE ENERO", "30 DE DICIEMBRE-5 DE ENERO".
pub(crate) const SPANISH_WEEK_PATTERN: &str = r"(?i)\b\d{1,2}(?:\s+DE\s+(?:ENERO|FEBRERO|MARZO|ABRIL|MAYO|JUNIO|JULIO|AGOSTO|SEPTIEMBRE|SETIEMBRE|OCTUBRE|NOVIEMBRE|DICIEMBRE))?\s*[-–]\s*\d{1,2}\s+DE\s+(?:ENERO|FEBRERO|MARZO|ABRIL|MAYO|JUNIO|JULIO|AGOSTO|SEPTIEMBRE|SETIEMBRE|OCTUBRE|NOVIEMBRE|DICIEMBRE)\b";

/// English edition: "JANUARY 6-12", "DECEMBER 30–JANUARY 5".
pub(crate) const ENGLISH_WEEK_PATTERN: &str = r"(?i)\b(?:JANUARY|FEBRUARY|MARCH|APRIL|MAY|JUNE|JULY|AUGUST|SEPTEMBER|OCTOBER|NOVEMBER|DECEMBER)\s+\d{1,2}\s*[-–]\s*(?:(?:JANUARY|FEBRUARY|MARCH|APRIL|MAY|JUNE|JULY|AUGUST|SEPTEMBER|OCTOBER|NOVEMBER|DECEMBER)\s+)?\d{1,2}\b";

pub(crate) fn default_week_patterns() -> Vec<String> {
    vec![
        SPANISH_WEEK_PATTERN.to_string(),
        ENGLISH_WEEK_PATTERN.to_string(),
    ]
}

pub(crate) fn default_entry_tags() -> Vec<String> {
    ["h2", "h3", "h4", "h5", "h6", "li"]
        .iter()
        .map(|tag| tag.to_string())
        .collect()
}

pub(crate) fn default_detail_tags() -> Vec<String> {
    vec!["p".to_string()]
}

pub(crate) fn default_output_path() -> String {
    "weekly_programs.xlsx".to_string()
}

pub(crate) fn default_output_format() -> OutputFormat {
    OutputFormat::Xlsx
}

pub(crate) fn default_sheet_name() -> String {
    "Programa".to_string()
}

pub(crate) fn default_document_order() -> DocumentOrder {
    DocumentOrder::Archive
}

pub(crate) fn default_log_level() -> LogLevel {
    LogLevel::Info
}
