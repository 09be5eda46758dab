use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{ChunkRepository, ChunkRepositoryError};
use crate::domain::{Chunk, ChunkId, DocumentId};

/// Chunk store backed by a process-local map. The production deployment
/// keeps chunks in the host application's database; this implementation
/// covers single-process deployments and tests.
#[derive(Default)]
pub struct InMemoryChunkRepository {
    chunks: RwLock<HashMap<ChunkId, Chunk>>,
}

impl InMemoryChunkRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ChunkRepository for InMemoryChunkRepository {
    async fn save_batch(&self, chunks: &[Chunk]) -> Result<(), ChunkRepositoryError> {
        let mut store = self.chunks.write().await;
        for chunk in chunks {
            store.insert(chunk.id, chunk.clone());
        }
        Ok(())
    }

    async fn get(&self, id: ChunkId) -> Result<Option<Chunk>, ChunkRepositoryError> {
        Ok(self.chunks.read().await.get(&id).cloned())
    }

    async fn delete_for_document(
        &self,
        document_id: DocumentId,
    ) -> Result<usize, ChunkRepositoryError> {
        let mut store = self.chunks.write().await;
        let before = store.len();
        store.retain(|_, chunk| chunk.document_id != document_id);
        Ok(before - store.len())
    }
}
