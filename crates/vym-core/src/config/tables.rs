use super::defaults;
use super::models::{AppConfig, DocumentOrder, ExtractionConfig, LogLevel, OutputConfig};
use serde::{Deserialize, Serialize};

/// On-disk layout of `conf/config.toml`.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub(super) struct ConfigTables {
    #[serde(default)]
    input: InputConfig,
    #[serde(default)]
    extraction: ExtractionConfig,
    #[serde(default)]
    output: OutputConfig,
    #[serde(default)]
    logging: LoggingConfig,
}

impl From<ConfigTables> for AppConfig {
    fn from(tables: ConfigTables) -> Self {
        AppConfig {
            document_order: tables.input.document_order,
            extraction: tables.extraction,
            output: tables.output,
            log_level: tables.logging.log_level,
        }
    }
}

impl From<&AppConfig> for ConfigTables {
    fn from(config: &AppConfig) -> Self {
        ConfigTables {
            input: InputConfig {
                document_order: config.document_order,
            },
            extraction: config.extraction.clone(),
            output: config.output.clone(),
            logging: LoggingConfig {
                log_level: config.log_level,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct InputConfig {
    #[serde(default = "defaults::default_document_order")]
    document_order: DocumentOrder,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            document_order: defaults::default_document_order(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
struct LoggingConfig {
    #[serde(default = "defaults::default_log_level")]
    log_level: LogLevel,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            log_level: defaults::default_log_level(),
        }
    }
}
