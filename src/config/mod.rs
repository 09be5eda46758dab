mod settings;

pub use settings::{
    ChunkingSettings, EmbeddingsSettings, ExtractionSettings, LoggingSettings, RetrievalSettings,
    Settings, SettingsError, TemplateSettings,
};
