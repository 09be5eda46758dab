use serde::Deserialize;

use crate::domain::FormField;

/// One registered template: a detector (filename keywords plus a content
/// keyword-density threshold) bound to a fixed field list. Records are data
/// loaded from JSON, not code; the detector logic lives once in the
/// registry.
#[derive(Debug, Clone, Deserialize)]
pub struct TemplateRecord {
    pub name: String,
    /// Filename matches when every keyword is a substring of the lowercased
    /// filename. An empty list disables filename detection for this record.
    #[serde(default)]
    pub filename_keywords: Vec<String>,
    /// Content matches when at least `threshold` of these keywords appear in
    /// the lowercased document text.
    #[serde(default)]
    pub content_keywords: Vec<String>,
    #[serde(default = "default_threshold")]
    pub threshold: usize,
    pub fields: Vec<FormField>,
}

fn default_threshold() -> usize {
    2
}

impl TemplateRecord {
    pub fn matches_filename(&self, filename: &str) -> bool {
        if self.filename_keywords.is_empty() {
            return false;
        }
        let lower = filename.to_lowercase();
        self.filename_keywords
            .iter()
            .all(|keyword| lower.contains(&keyword.to_lowercase()))
    }

    /// Number of content keywords present in the text. Comparing this
    /// against `threshold` is the registry's density test.
    pub fn content_score(&self, text_lower: &str) -> usize {
        self.content_keywords
            .iter()
            .filter(|keyword| text_lower.contains(&keyword.to_lowercase()))
            .count()
    }
}
