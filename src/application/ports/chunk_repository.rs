use async_trait::async_trait;

use crate::domain::{Chunk, ChunkId, DocumentId};

/// Persistence seam for document chunks. The real store is an external
/// collaborator; the pipeline only needs batch create, lookup by id, and
/// transitive delete with the owning document.
#[async_trait]
pub trait ChunkRepository: Send + Sync {
    async fn save_batch(&self, chunks: &[Chunk]) -> Result<(), ChunkRepositoryError>;
    async fn get(&self, id: ChunkId) -> Result<Option<Chunk>, ChunkRepositoryError>;
    async fn delete_for_document(
        &self,
        document_id: DocumentId,
    ) -> Result<usize, ChunkRepositoryError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ChunkRepositoryError {
    #[error("storage failure: {0}")]
    StorageFailure(String),
}
