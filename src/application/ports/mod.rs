mod chunk_repository;
mod completion_client;
mod embedder;
mod file_loader;
mod text_splitter;
mod vector_index;

pub use chunk_repository::{ChunkRepository, ChunkRepositoryError};
pub use completion_client::{
    CompletionClient, CompletionError, ImagePayload, JsonCompletionRequest,
};
pub use embedder::{Embedder, EmbedderError};
pub use file_loader::{FileLoader, FileLoaderError};
pub use text_splitter::{TextSplitter, TextSplitterError};
pub use vector_index::{SlotHit, VectorIndex, VectorIndexError};
