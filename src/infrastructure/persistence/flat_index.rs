use std::fs;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{SlotHit, VectorIndex, VectorIndexError};
use crate::domain::{ChunkId, Embedding};

const VECTORS_FILE: &str = "index.bin";
const SLOT_MAP_FILE: &str = "id_mapping.json";

/// Exact nearest-neighbor index: a flat list of vectors scanned in full on
/// every search. Both the vectors and the slot-to-chunk mapping are written
/// through to disk on every insert, so a crash never leaves an embedding
/// without its owning chunk id.
pub struct FlatIndex {
    dir: PathBuf,
    dimension: usize,
    state: RwLock<IndexState>,
}

#[derive(Default)]
struct IndexState {
    vectors: Vec<Embedding>,
    slot_map: Vec<ChunkId>,
}

impl FlatIndex {
    pub fn open(dir: impl Into<PathBuf>, dimension: usize) -> Result<Self, VectorIndexError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| VectorIndexError::Persistence(e.to_string()))?;

        let state = Self::load(&dir, dimension)?;
        tracing::info!(dir = %dir.display(), vectors = state.vectors.len(), "vector index opened");

        Ok(Self {
            dir,
            dimension,
            state: RwLock::new(state),
        })
    }

    fn load(dir: &Path, dimension: usize) -> Result<IndexState, VectorIndexError> {
        let vectors_path = dir.join(VECTORS_FILE);
        let slot_map_path = dir.join(SLOT_MAP_FILE);

        if !vectors_path.exists() || !slot_map_path.exists() {
            return Ok(IndexState::default());
        }

        let vector_bytes =
            fs::read(&vectors_path).map_err(|e| VectorIndexError::Persistence(e.to_string()))?;
        let vectors: Vec<Embedding> = bincode::deserialize(&vector_bytes)
            .map_err(|e| VectorIndexError::Corrupted(format!("vector file: {e}")))?;

        let slot_bytes =
            fs::read(&slot_map_path).map_err(|e| VectorIndexError::Persistence(e.to_string()))?;
        let slot_map: Vec<ChunkId> = serde_json::from_slice(&slot_bytes)
            .map_err(|e| VectorIndexError::Corrupted(format!("slot map: {e}")))?;

        if vectors.len() != slot_map.len() {
            return Err(VectorIndexError::Corrupted(format!(
                "{} vectors but {} slot entries",
                vectors.len(),
                slot_map.len()
            )));
        }

        if let Some(bad) = vectors.iter().find(|v| v.dimensions() != dimension) {
            return Err(VectorIndexError::Corrupted(format!(
                "stored vector has dimension {}, index expects {}",
                bad.dimensions(),
                dimension
            )));
        }

        Ok(IndexState { vectors, slot_map })
    }

    fn persist(&self, state: &IndexState) -> Result<(), VectorIndexError> {
        let vector_bytes = bincode::serialize(&state.vectors)
            .map_err(|e| VectorIndexError::Persistence(e.to_string()))?;
        self.write_atomic(VECTORS_FILE, &vector_bytes)?;

        let slot_bytes = serde_json::to_vec(&state.slot_map)
            .map_err(|e| VectorIndexError::Persistence(e.to_string()))?;
        self.write_atomic(SLOT_MAP_FILE, &slot_bytes)?;

        Ok(())
    }

    /// Write through a temp file and rename, so a crash mid-write never
    /// leaves a truncated file or a vector/slot-map length mismatch.
    fn write_atomic(&self, file_name: &str, bytes: &[u8]) -> Result<(), VectorIndexError> {
        let tmp = self.dir.join(format!("{file_name}.tmp"));
        fs::write(&tmp, bytes).map_err(|e| VectorIndexError::Persistence(e.to_string()))?;
        fs::rename(&tmp, self.dir.join(file_name))
            .map_err(|e| VectorIndexError::Persistence(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl VectorIndex for FlatIndex {
    async fn insert(
        &self,
        chunk_id: ChunkId,
        embedding: &Embedding,
    ) -> Result<u64, VectorIndexError> {
        if embedding.dimensions() != self.dimension {
            return Err(VectorIndexError::DimensionMismatch {
                expected: self.dimension,
                actual: embedding.dimensions(),
            });
        }

        let mut state = self.state.write().await;
        let slot = state.vectors.len() as u64;
        state.vectors.push(embedding.clone());
        state.slot_map.push(chunk_id);

        if let Err(e) = self.persist(&state) {
            // Roll back the in-memory append so memory and disk agree.
            state.vectors.pop();
            state.slot_map.pop();
            return Err(e);
        }

        Ok(slot)
    }

    async fn search(
        &self,
        embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SlotHit>, VectorIndexError> {
        if embedding.dimensions() != self.dimension {
            return Err(VectorIndexError::DimensionMismatch {
                expected: self.dimension,
                actual: embedding.dimensions(),
            });
        }

        let state = self.state.read().await;

        let mut scored: Vec<(usize, f32)> = state
            .vectors
            .iter()
            .enumerate()
            .map(|(slot, stored)| (slot, embedding.squared_distance(stored)))
            .collect();

        // Distance ascending; equal distances keep insertion order.
        scored.sort_by(|a, b| {
            a.1.partial_cmp(&b.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then(a.0.cmp(&b.0))
        });
        scored.truncate(top_k);

        Ok(scored
            .into_iter()
            .map(|(slot, distance)| SlotHit {
                chunk_id: state.slot_map[slot],
                score: 1.0 / (1.0 + distance),
            })
            .collect())
    }

    async fn len(&self) -> Result<usize, VectorIndexError> {
        Ok(self.state.read().await.vectors.len())
    }
}
