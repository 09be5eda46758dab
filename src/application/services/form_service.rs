use std::sync::Arc;

use crate::application::extraction::{
    normalize, CompletenessVerifier, ExtractionStrategy, NormalizerError,
};
use crate::application::ports::{FileLoader, FileLoaderError};
use crate::application::templates::TemplateRegistry;
use crate::domain::{
    ContentType, Document, ExtractionResult, ExtractionSource, FormStructure, NormalizedContent,
    VerificationReport,
};

/// Outcome of one pipeline run: always a usable structure plus provenance
/// and the advisory verification report.
#[derive(Debug, Clone)]
pub struct ProcessedForm {
    pub structure: FormStructure,
    pub source: ExtractionSource,
    pub verification: VerificationReport,
}

/// Orchestrates the whole form-structure pipeline: template registry,
/// content extraction, the strategy chain, completeness verification with a
/// supplementary pass, and normalization. Given any supported file it ends
/// in a usable, possibly degraded, structure; the only hard failure is an
/// unsupported format.
pub struct FormService {
    file_loader: Arc<dyn FileLoader>,
    registry: Arc<TemplateRegistry>,
    strategies: Vec<Arc<dyn ExtractionStrategy>>,
    verifier: CompletenessVerifier,
    verification_threshold: usize,
}

impl FormService {
    pub fn new(
        file_loader: Arc<dyn FileLoader>,
        registry: Arc<TemplateRegistry>,
        strategies: Vec<Arc<dyn ExtractionStrategy>>,
        verifier: CompletenessVerifier,
        verification_threshold: usize,
    ) -> Self {
        Self {
            file_loader,
            registry,
            strategies,
            verifier,
            verification_threshold,
        }
    }

    #[tracing::instrument(skip(self, data), fields(filename, size_bytes = data.len()))]
    pub async fn process(
        &self,
        data: &[u8],
        filename: &str,
    ) -> Result<ProcessedForm, FormServiceError> {
        let content_type = ContentType::from_filename(filename)
            .ok_or_else(|| FormServiceError::UnsupportedFormat(filename.to_string()))?;
        let document = Document::new(filename.to_string(), content_type, data.len() as u64);

        // Known recurring forms bypass model extraction entirely; the
        // filename check runs before any content work.
        if let Some(matched) = self.registry.match_filename(filename) {
            return Ok(ProcessedForm {
                structure: matched.structure,
                source: ExtractionSource::Template,
                verification: VerificationReport::passed(),
            });
        }

        let content = self.load_content(data, &document).await?;

        if let Some(text) = content.as_text() {
            if let Some(matched) = self.registry.match_content(&text) {
                return Ok(ProcessedForm {
                    structure: matched.structure,
                    source: ExtractionSource::Template,
                    verification: VerificationReport::passed(),
                });
            }
        }

        let mut result = self.run_strategy_chain(&content, &document).await;

        let verification = if result.candidates.len() < self.verification_threshold
            && result.source != ExtractionSource::Minimal
        {
            let report = self.verifier.verify(&content, &result.candidates).await;
            if !report.complete && !report.missed_questions.is_empty() {
                let supplementary = self
                    .verifier
                    .extract_missed(&content, &report.missed_questions)
                    .await;
                if !supplementary.is_empty() {
                    tracing::info!(
                        appended = supplementary.len(),
                        "appending supplementary fields found during verification"
                    );
                    // Supplementary fields go to the end, never interleaved.
                    result.candidates.extend(supplementary);
                }
            }
            report
        } else {
            VerificationReport::passed()
        };

        let structure = match normalize(&result) {
            Ok(structure) if !structure.is_empty() => structure,
            Ok(_) => {
                tracing::warn!("normalization produced an empty structure, using fallback");
                FormStructure::minimal_fallback()
            }
            Err(NormalizerError::MalformedCandidate { position, detail }) => {
                tracing::error!(position, %detail, "malformed extraction, using fallback structure");
                FormStructure::minimal_fallback()
            }
        };

        Ok(ProcessedForm {
            structure,
            source: result.source,
            verification,
        })
    }

    /// Content extraction with degraded-but-non-empty failure semantics: a
    /// broken file still yields a synthetic description so downstream tiers
    /// always receive something. Only an undispatchable format is fatal,
    /// and that was already rejected before this point.
    async fn load_content(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<NormalizedContent, FormServiceError> {
        match self.file_loader.extract(data, document).await {
            Ok(content) => Ok(content),
            Err(FileLoaderError::UnsupportedContentType(mime)) => {
                Err(FormServiceError::UnsupportedFormat(mime))
            }
            Err(e) => {
                tracing::warn!(
                    filename = %document.filename,
                    error = %e,
                    "content extraction failed, continuing with synthetic description"
                );
                Ok(NormalizedContent::Text(synthetic_description(
                    &document.filename,
                )))
            }
        }
    }

    async fn run_strategy_chain(
        &self,
        content: &NormalizedContent,
        document: &Document,
    ) -> ExtractionResult {
        for strategy in &self.strategies {
            match strategy.attempt(content, document).await {
                Ok(Some(result)) => {
                    tracing::info!(
                        strategy = strategy.name(),
                        source = result.source.as_str(),
                        field_count = result.candidates.len(),
                        "extraction tier succeeded"
                    );
                    return result;
                }
                Ok(None) => {
                    tracing::debug!(strategy = strategy.name(), "extraction tier yielded nothing");
                }
                Err(e) => {
                    tracing::warn!(strategy = strategy.name(), error = %e, "extraction tier failed");
                }
            }
        }

        // The minimal tier is infallible, so reaching here means the chain
        // was assembled without it. Substitute its output directly.
        tracing::error!("strategy chain exhausted without a terminal tier");
        ExtractionResult::new(Vec::new(), ExtractionSource::Minimal)
    }
}

fn synthetic_description(filename: &str) -> String {
    let stem = filename
        .rsplit_once('.')
        .map(|(stem, _)| stem)
        .unwrap_or(filename)
        .replace(['_', '-'], " ");
    format!("Form document: {}", stem.trim())
}

#[derive(Debug, thiserror::Error)]
pub enum FormServiceError {
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
}
