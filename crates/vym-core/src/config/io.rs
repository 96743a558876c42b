use super::models::AppConfig;
use super::tables::ConfigTables;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{debug, info, warn};

/// Load configuration from disk, falling back to defaults when the file is
/// missing or unreadable.
pub fn load_config(path: &Path) -> AppConfig {
    let contents = match fs::read_to_string(path) {
        Ok(data) => {
            info!(path = %path.display(), "Loaded base config");
            data
        }
        Err(err) => {
            warn!(
                path = %path.display(),
                "Falling back to default config: {err}"
            );
            return AppConfig::default();
        }
    };

    match parse_config(&contents) {
        Ok(cfg) => {
            debug!("Parsed configuration from disk");
            cfg
        }
        Err(err) => {
            warn!(path = %path.display(), "Invalid config TOML: {err:#}");
            AppConfig::default()
        }
    }
}

pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let tables: ConfigTables =
        toml::from_str(contents).context("Failed to parse configuration tables")?;
    Ok(tables.into())
}

pub fn serialize_config(config: &AppConfig) -> Result<String> {
    toml::to_string_pretty(&ConfigTables::from(config)).context("Failed to serialize configuration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DocumentOrder, LogLevel, OutputFormat};

    #[test]
    fn empty_file_yields_defaults() {
        let cfg = parse_config("").expect("empty config should parse");
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.output.path, "weekly_programs.xlsx");
        assert_eq!(cfg.output.format, OutputFormat::Xlsx);
    }

    #[test]
    fn partial_tables_keep_remaining_defaults() {
        let cfg = parse_config(
            r#"
            [input]
            document_order = "spine"

            [output]
            format = "text"
            path = "programs.txt"

            [logging]
            log_level = "debug"
            "#,
        )
        .expect("config should parse");

        assert_eq!(cfg.document_order, DocumentOrder::Spine);
        assert_eq!(cfg.output.format, OutputFormat::Text);
        assert_eq!(cfg.output.path, "programs.txt");
        assert_eq!(cfg.output.sheet_name, "Programa");
        assert_eq!(cfg.log_level, LogLevel::Debug);
        assert_eq!(cfg.extraction.entry_tags.len(), 6);
    }

    #[test]
    fn rejects_unknown_enum_values() {
        let err = parse_config("[output]\nformat = \"pdf\"\n").unwrap_err();
        assert!(format!("{err:#}").contains("pdf"));
    }

    #[test]
    fn serialized_config_parses_back() {
        let mut cfg = AppConfig::default();
        cfg.extraction.marker_classes = vec!["weekHeading".to_string()];
        cfg.output.format = OutputFormat::Json;
        let text = serialize_config(&cfg).expect("config should serialize");
        assert!(text.contains("[extraction]"));
        assert_eq!(parse_config(&text).expect("round trip"), cfg);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = load_config(Path::new("/definitely/not/here/config.toml"));
        assert_eq!(cfg, AppConfig::default());
    }
}
