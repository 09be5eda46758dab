mod flat_index;
mod in_memory_chunk_repository;

pub use flat_index::FlatIndex;
pub use in_memory_chunk_repository::InMemoryChunkRepository;
