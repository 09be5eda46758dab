use serde::Deserialize;

/// A paragraph from a structurally parsed document. `emphasized` marks bold
/// or heading-styled text, used as a section-title prefix for member fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paragraph {
    pub text: String,
    pub emphasized: bool,
}

/// Paragraphs and tables extracted from a DOCX container. Tables are row-major
/// cell grids with cell text already flattened.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StructuredDocument {
    pub paragraphs: Vec<Paragraph>,
    pub tables: Vec<Vec<Vec<String>>>,
}

impl StructuredDocument {
    /// Flatten to plain text for chunking and template keyword scoring.
    pub fn flatten(&self) -> String {
        let mut out = String::new();
        for para in &self.paragraphs {
            out.push_str(&para.text);
            out.push('\n');
        }
        for table in &self.tables {
            for row in table {
                out.push_str(&row.join(" | "));
                out.push('\n');
            }
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty() && self.tables.is_empty()
    }
}

/// Output of the content extractor: a file of unknown format reduced to a
/// representation the extraction strategies can work with.
#[derive(Debug, Clone, PartialEq)]
pub enum NormalizedContent {
    Text(String),
    Image { data: Vec<u8>, mime: String },
    Structured(StructuredDocument),
}

impl NormalizedContent {
    /// Textual view of the content, if one exists. Image content has none.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Self::Text(text) => Some(text.clone()),
            Self::Structured(doc) => Some(doc.flatten()),
            Self::Image { .. } => None,
        }
    }
}

/// Which pipeline tier produced an extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionSource {
    PrimaryModel,
    FallbackModel,
    Template,
    Heuristic,
    FilenameGuess,
    Minimal,
    Supplementary,
}

impl ExtractionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PrimaryModel => "primary-model",
            Self::FallbackModel => "fallback-model",
            Self::Template => "template",
            Self::Heuristic => "heuristic",
            Self::FilenameGuess => "filename-guess",
            Self::Minimal => "minimal",
            Self::Supplementary => "supplementary",
        }
    }
}

/// First-pass extractor output, pre-normalization. Candidates stay as raw
/// JSON objects so that schema cleanup never touches source text before the
/// normalizer runs.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    pub candidates: Vec<serde_json::Value>,
    pub source: ExtractionSource,
}

impl ExtractionResult {
    pub fn new(candidates: Vec<serde_json::Value>, source: ExtractionSource) -> Self {
        Self { candidates, source }
    }
}

/// Advisory report from the completeness verifier. Never blocks persistence;
/// a non-empty `missed_questions` only triggers a best-effort supplementary
/// extraction pass.
#[derive(Debug, Clone, Deserialize)]
pub struct VerificationReport {
    pub complete: bool,
    #[serde(default)]
    pub issues: Vec<String>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub missed_questions: Vec<String>,
}

impl VerificationReport {
    /// Downgrade a verifier failure into an advisory "incomplete" report.
    pub fn from_error(message: impl Into<String>) -> Self {
        Self {
            complete: false,
            issues: vec![message.into()],
            suggestions: vec!["Manual review recommended".to_string()],
            missed_questions: Vec::new(),
        }
    }

    pub fn passed() -> Self {
        Self {
            complete: true,
            issues: Vec::new(),
            suggestions: Vec::new(),
            missed_questions: Vec::new(),
        }
    }
}
