use crate::config::LoggingSettings;

/// Filter level and output format for the tracing subscriber.
pub struct TracingConfig {
    pub level: String,
    pub json_format: bool,
}

impl TracingConfig {
    /// Build from the logging section of the pipeline settings. A
    /// `RUST_LOG` environment variable still wins over the level here.
    pub fn from_logging(logging: &LoggingSettings) -> Self {
        Self {
            level: logging.level.clone(),
            json_format: logging.enable_json,
        }
    }
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::from_logging(&LoggingSettings::default())
    }
}
