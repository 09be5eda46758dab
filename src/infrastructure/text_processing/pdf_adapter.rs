use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document, NormalizedContent};

use super::text_sanitizer::sanitize_extracted_text;

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);

/// Below this many characters a PDF is treated as having no usable text
/// layer, which usually means it is a scan.
const MIN_TEXT_CHARS: usize = 100;

#[derive(Default)]
pub struct PdfAdapter;

impl PdfAdapter {
    pub fn new() -> Self {
        Self
    }

    fn extract_blocking(data: &[u8]) -> Result<(String, bool), FileLoaderError> {
        let text = pdf_extract::extract_text_from_mem(data)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("failed to parse PDF: {e}")))?;

        Ok((text, Self::contains_images(data)))
    }

    /// Scans the object table for image XObjects. Used to tell a scanned
    /// document apart from a genuinely empty one.
    fn contains_images(data: &[u8]) -> bool {
        let Ok(doc) = lopdf::Document::load_mem(data) else {
            return false;
        };

        doc.objects.values().any(|object| {
            let Ok(stream) = object.as_stream() else {
                return false;
            };
            stream
                .dict
                .get(b"Subtype")
                .and_then(|v| v.as_name())
                .map(|name| name == b"Image")
                .unwrap_or(false)
        })
    }
}

#[async_trait]
impl FileLoader for PdfAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(
            document_id = %document.id.as_uuid(),
            filename = %document.filename,
        )
    )]
    async fn extract(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<NormalizedContent, FileLoaderError> {
        if document.content_type != ContentType::Pdf {
            return Err(FileLoaderError::UnsupportedContentType(
                document.content_type.as_mime().to_string(),
            ));
        }

        let owned = data.to_vec();
        let filename = document.filename.clone();

        let (text, has_images) = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || Self::extract_blocking(&owned)),
        )
        .await
        .map_err(|_| FileLoaderError::ExtractionFailed("PDF extraction timed out".to_string()))?
        .map_err(|e| FileLoaderError::ExtractionFailed(format!("task join error: {e}")))??;

        let sanitized = sanitize_extracted_text(&text);
        tracing::info!(chars = sanitized.len(), has_images, "PDF text extraction complete");

        if sanitized.len() >= MIN_TEXT_CHARS {
            return Ok(NormalizedContent::Text(sanitized));
        }

        // A PDF carrying images but almost no text layer is a scan; hand it
        // to the image path so the multimodal tier can read it.
        if has_images {
            tracing::info!(
                filename = %filename,
                "sparse text layer with embedded images, treating PDF as a scanned image"
            );
            return Ok(NormalizedContent::Image {
                data: data.to_vec(),
                mime: ContentType::Pdf.as_mime().to_string(),
            });
        }

        if sanitized.is_empty() {
            return Err(FileLoaderError::NoTextFound(filename));
        }

        Ok(NormalizedContent::Text(sanitized))
    }
}
