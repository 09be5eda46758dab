use uuid::Uuid;

/// A bounded substring of a document's text, the unit of embedding and
/// retrieval. Chunks are created in a single batch per document, never
/// mutated afterwards, and deleted transitively with their document.
#[derive(Debug, Clone, PartialEq)]
pub struct Chunk {
    pub id: ChunkId,
    pub document_id: DocumentId,
    pub content: String,
    /// 0-based position within the document; defines reassembly order.
    pub chunk_index: usize,
    /// Slot in the vector index, assigned when the chunk is embedded.
    pub embedding_slot: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct ChunkId(Uuid);

impl ChunkId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for ChunkId {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl Chunk {
    pub fn new(content: String, document_id: DocumentId, chunk_index: usize) -> Self {
        Self {
            id: ChunkId::new(),
            document_id,
            content,
            chunk_index,
            embedding_slot: None,
        }
    }
}
