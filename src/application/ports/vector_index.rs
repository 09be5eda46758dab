use async_trait::async_trait;

use crate::domain::{ChunkId, Embedding};

/// A search hit: the owning chunk plus a similarity score derived from
/// squared Euclidean distance via `1 / (1 + distance)`. Higher is closer.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotHit {
    pub chunk_id: ChunkId,
    pub score: f32,
}

/// Append-only nearest-neighbor index over fixed-dimension embeddings.
/// Slots are assigned monotonically; there is no update or delete path —
/// compaction for deleted documents is an acknowledged open question.
#[async_trait]
pub trait VectorIndex: Send + Sync {
    /// Append an embedding and durably persist the index before returning
    /// the assigned slot. A persistence failure must surface here: silently
    /// dropping an embedding would desynchronize the slot map.
    async fn insert(
        &self,
        chunk_id: ChunkId,
        embedding: &Embedding,
    ) -> Result<u64, VectorIndexError>;

    /// Exact scan over all indexed vectors. `top_k` is clamped to the index
    /// size; an empty index yields an empty result.
    async fn search(
        &self,
        embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SlotHit>, VectorIndexError>;

    async fn len(&self) -> Result<usize, VectorIndexError>;
}

#[derive(Debug, thiserror::Error)]
pub enum VectorIndexError {
    #[error("embedding dimension {actual} does not match index dimension {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("index persistence failed: {0}")]
    Persistence(String),
    #[error("index corrupted: {0}")]
    Corrupted(String),
}
