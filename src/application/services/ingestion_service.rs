use std::sync::Arc;

use crate::application::ports::{
    ChunkRepository, ChunkRepositoryError, Embedder, EmbedderError, TextSplitter,
    TextSplitterError, VectorIndex, VectorIndexError,
};
use crate::domain::DocumentId;

/// Turns a policy document's text into retrievable state: chunks it, embeds
/// every chunk, appends each embedding to the vector index (write-through),
/// and records the chunks with their assigned slots.
pub struct IngestionService {
    text_splitter: Arc<dyn TextSplitter>,
    embedder: Arc<dyn Embedder>,
    vector_index: Arc<dyn VectorIndex>,
    chunk_repository: Arc<dyn ChunkRepository>,
}

impl IngestionService {
    pub fn new(
        text_splitter: Arc<dyn TextSplitter>,
        embedder: Arc<dyn Embedder>,
        vector_index: Arc<dyn VectorIndex>,
        chunk_repository: Arc<dyn ChunkRepository>,
    ) -> Self {
        Self {
            text_splitter,
            embedder,
            vector_index,
            chunk_repository,
        }
    }

    /// Returns the number of chunks indexed. An index persistence failure
    /// aborts the whole ingestion: a silently lost embedding would
    /// desynchronize the slot map from the stored chunks.
    #[tracing::instrument(skip(self, text), fields(document_id = %document_id.as_uuid()))]
    pub async fn ingest(
        &self,
        text: &str,
        document_id: DocumentId,
    ) -> Result<usize, IngestionError> {
        let mut chunks = self.text_splitter.split(text, document_id).await?;
        if chunks.is_empty() {
            tracing::info!("document produced no chunks, nothing to index");
            return Ok(0);
        }

        let texts: Vec<&str> = chunks.iter().map(|c| c.content.as_str()).collect();
        let embeddings = self.embedder.embed_batch(&texts).await?;

        for (chunk, embedding) in chunks.iter_mut().zip(embeddings.iter()) {
            let slot = self.vector_index.insert(chunk.id, embedding).await?;
            chunk.embedding_slot = Some(slot);
        }

        self.chunk_repository.save_batch(&chunks).await?;

        tracing::info!(chunk_count = chunks.len(), "document indexed");
        Ok(chunks.len())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IngestionError {
    #[error("text splitting: {0}")]
    Splitting(#[from] TextSplitterError),
    #[error("embedding: {0}")]
    Embedding(#[from] EmbedderError),
    #[error("vector index: {0}")]
    Index(#[from] VectorIndexError),
    #[error("chunk storage: {0}")]
    Storage(#[from] ChunkRepositoryError),
}
