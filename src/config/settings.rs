use std::path::{Path, PathBuf};

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub extraction: ExtractionSettings,
    pub chunking: ChunkingSettings,
    pub embeddings: EmbeddingsSettings,
    pub retrieval: RetrievalSettings,
    pub templates: TemplateSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExtractionSettings {
    pub primary_model: String,
    pub fallback_model: String,
    pub temperature: f32,
    /// Below this many extracted fields a completeness check is run.
    pub verification_threshold: usize,
    /// Minimum field count for a primary vision pass to be accepted
    /// without consulting the fallback model.
    pub min_primary_fields: usize,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    pub chunk_size: usize,
    pub overlap: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingsSettings {
    pub model: String,
    pub dimension: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetrievalSettings {
    pub top_k: usize,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TemplateSettings {
    /// Extra template records loaded at startup, appended after the
    /// built-in ones. Empty path means built-ins only.
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Settings {
    pub fn from_toml_file(path: &Path) -> Result<Self, SettingsError> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::Unreadable(path.to_path_buf(), e.to_string()))?;
        let mut settings: Self = toml::from_str(&raw)
            .map_err(|e| SettingsError::Invalid(path.to_path_buf(), e.to_string()))?;
        settings.apply_env_overrides();
        Ok(settings)
    }

    /// Environment variables win over the file. An unparseable numeric
    /// override is logged and the file value kept.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("CAREFORM_PRIMARY_MODEL") {
            self.extraction.primary_model = v;
        }
        if let Ok(v) = std::env::var("CAREFORM_FALLBACK_MODEL") {
            self.extraction.fallback_model = v;
        }
        if let Ok(v) = std::env::var("CAREFORM_REQUEST_TIMEOUT_SECS") {
            match v.parse() {
                Ok(secs) => self.extraction.request_timeout_secs = secs,
                Err(_) => tracing::warn!(
                    value = %v,
                    "ignoring non-numeric CAREFORM_REQUEST_TIMEOUT_SECS"
                ),
            }
        }
        if let Ok(v) = std::env::var("CAREFORM_EMBEDDING_MODEL") {
            self.embeddings.model = v;
        }
        if let Ok(v) = std::env::var("CAREFORM_TOP_K") {
            match v.parse() {
                Ok(top_k) => self.retrieval.top_k = top_k,
                Err(_) => tracing::warn!(value = %v, "ignoring non-numeric CAREFORM_TOP_K"),
            }
        }
        if let Ok(v) = std::env::var("CAREFORM_TEMPLATE_DIR") {
            self.templates.dir = Some(PathBuf::from(v));
        }
        if let Ok(v) = std::env::var("CAREFORM_LOG_LEVEL") {
            self.logging.level = v;
        }
        if let Ok(v) = std::env::var("CAREFORM_LOG_FORMAT") {
            self.logging.enable_json = v.to_lowercase() == "json";
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("cannot read settings file {0}: {1}")]
    Unreadable(PathBuf, String),
    #[error("invalid settings file {0}: {1}")]
    Invalid(PathBuf, String),
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            extraction: ExtractionSettings::default(),
            chunking: ChunkingSettings::default(),
            embeddings: EmbeddingsSettings::default(),
            retrieval: RetrievalSettings::default(),
            templates: TemplateSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

impl Default for ExtractionSettings {
    fn default() -> Self {
        Self {
            primary_model: "gpt-4o".to_string(),
            fallback_model: "gpt-4-turbo-preview".to_string(),
            temperature: 0.2,
            verification_threshold: 10,
            min_primary_fields: 3,
            request_timeout_secs: 120,
        }
    }
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            chunk_size: 1000,
            overlap: 200,
        }
    }
}

impl Default for EmbeddingsSettings {
    fn default() -> Self {
        Self {
            model: "text-embedding-ada-002".to_string(),
            dimension: 1536,
        }
    }
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self { top_k: 5 }
    }
}

impl Default for TemplateSettings {
    fn default() -> Self {
        Self { dir: None }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            enable_json: false,
        }
    }
}
