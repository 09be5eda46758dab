use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document, NormalizedContent};

/// Dispatches extraction to the adapter registered for the document's
/// content type. Unregistered types are rejected up front so the pipeline
/// can report an unsupported format before any model call is made.
pub struct CompositeFileLoader {
    adapters: HashMap<ContentType, Arc<dyn FileLoader>>,
}

impl CompositeFileLoader {
    pub fn new(adapters: Vec<(ContentType, Arc<dyn FileLoader>)>) -> Self {
        Self {
            adapters: adapters.into_iter().collect(),
        }
    }

    /// The standard wiring: PDFs, DOCX, plain text, and the supported
    /// image formats all routed to their adapters.
    pub fn with_default_adapters() -> Self {
        let image: Arc<dyn FileLoader> = Arc::new(super::ImageAdapter::new());

        Self::new(vec![
            (ContentType::Pdf, Arc::new(super::PdfAdapter::new())),
            (ContentType::Docx, Arc::new(super::DocxAdapter::new())),
            (ContentType::Text, Arc::new(super::PlainTextAdapter)),
            (ContentType::Jpeg, Arc::clone(&image)),
            (ContentType::Png, Arc::clone(&image)),
            (ContentType::Gif, Arc::clone(&image)),
            (ContentType::Webp, image),
        ])
    }
}

#[async_trait]
impl FileLoader for CompositeFileLoader {
    async fn extract(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<NormalizedContent, FileLoaderError> {
        let adapter = self.adapters.get(&document.content_type).ok_or_else(|| {
            FileLoaderError::UnsupportedContentType(document.content_type.as_mime().to_string())
        })?;

        adapter.extract(data, document).await
    }
}
