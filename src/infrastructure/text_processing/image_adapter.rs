use async_trait::async_trait;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{Document, NormalizedContent};

/// Images carry their bytes through unchanged so the vision tier can send
/// them to a multimodal model. The only validation here is that the
/// declared content type really is an image.
#[derive(Default)]
pub struct ImageAdapter;

impl ImageAdapter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FileLoader for ImageAdapter {
    async fn extract(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<NormalizedContent, FileLoaderError> {
        if !document.content_type.is_image() {
            return Err(FileLoaderError::UnsupportedContentType(
                document.content_type.as_mime().to_string(),
            ));
        }

        if data.is_empty() {
            return Err(FileLoaderError::ExtractionFailed(format!(
                "empty image payload for {}",
                document.filename
            )));
        }

        Ok(NormalizedContent::Image {
            data: data.to_vec(),
            mime: document.content_type.as_mime().to_string(),
        })
    }
}
