// Configuration utilities
// Author: Gabriel Demetrios Lafis

use std::fs;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::data::MalformedRecordPolicy;
use crate::report::DEFAULT_EXPORT_NAME;
use crate::source::{HttpSource, DEFAULT_BASE_URL};
use super::{parse_level, validate_not_empty, validate_positive, AppError, AppResult};

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub source: SourceConfig,
    pub logging: LoggingConfig,
    pub export: ExportConfig,
}

/// Server configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
    pub enable_cors: bool,
}

/// Remote sales source configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    pub timeout_secs: Option<u64>,
    pub malformed_records: MalformedRecordPolicy,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

/// CSV export configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub default_file_name: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8080,
            workers: None,
            enable_cors: false,
        }
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        SourceConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: None,
            malformed_records: MalformedRecordPolicy::Abort,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: "info".to_string(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        ExportConfig {
            default_file_name: DEFAULT_EXPORT_NAME.to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON or YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> AppResult<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)?;
        
        let extension = path.extension().and_then(|ext| ext.to_str()).unwrap_or("");
        let config: Config = match extension {
            "json" => serde_json::from_str(&contents)
                .map_err(|e| AppError::Config(e.to_string()))?,
            "yaml" | "yml" => serde_yaml::from_str(&contents)
                .map_err(|e| AppError::Config(e.to_string()))?,
            other => {
                return Err(AppError::Config(format!(
                    "Unsupported config file format '{}'", other
                )))
            }
        };
        
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> AppResult<()> {
        validate_not_empty(&self.source.base_url, "source.base_url").map_err(AppError::Config)?;
        if let Some(timeout) = self.source.timeout_secs {
            validate_positive(timeout, "source.timeout_secs").map_err(AppError::Config)?;
        }
        if let Some(workers) = self.server.workers {
            validate_positive(workers, "server.workers").map_err(AppError::Config)?;
        }
        Ok(())
    }
    
    /// Get the log level filter
    pub fn log_level_filter(&self) -> log::LevelFilter {
        parse_level(&self.logging.level)
    }

    /// Build the remote source this configuration describes
    pub fn http_source(&self) -> HttpSource {
        let source = HttpSource::new(self.source.base_url.clone())
            .with_policy(self.source.malformed_records);

        match self.source.timeout_secs {
            Some(secs) => source.with_timeout(Duration::from_secs(secs)),
            None => source,
        }
    }

    /// Number of server workers, defaulting to one per CPU
    pub fn workers(&self) -> usize {
        self.server.workers.unwrap_or_else(num_cpus::get)
    }
}
