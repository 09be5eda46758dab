use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use careform::application::ports::{
    ChunkRepository, CompletionClient, CompletionError, Embedder, EmbedderError,
    JsonCompletionRequest, SlotHit, VectorIndex, VectorIndexError,
};
use careform::application::services::RetrievalService;
use careform::domain::{Chunk, ChunkId, DocumentId, Embedding};
use careform::infrastructure::persistence::InMemoryChunkRepository;

const TOP_K: usize = 5;

struct FixedEmbedder;

#[async_trait]
impl Embedder for FixedEmbedder {
    async fn embed(&self, _text: &str) -> Result<Embedding, EmbedderError> {
        Ok(Embedding::new(vec![1.0, 0.0]))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        Ok(texts.iter().map(|_| Embedding::new(vec![1.0, 0.0])).collect())
    }
}

struct FixedHitsIndex {
    hits: Vec<SlotHit>,
}

#[async_trait]
impl VectorIndex for FixedHitsIndex {
    async fn insert(
        &self,
        _chunk_id: ChunkId,
        _embedding: &Embedding,
    ) -> Result<u64, VectorIndexError> {
        unreachable!("retrieval never inserts")
    }

    async fn search(
        &self,
        _embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SlotHit>, VectorIndexError> {
        Ok(self.hits.iter().take(top_k).cloned().collect())
    }

    async fn len(&self) -> Result<usize, VectorIndexError> {
        Ok(self.hits.len())
    }
}

#[derive(Default)]
struct RecordingCompletionClient {
    last_user: Mutex<Option<String>>,
}

#[async_trait]
impl CompletionClient for RecordingCompletionClient {
    async fn complete_json(
        &self,
        _request: JsonCompletionRequest,
    ) -> Result<serde_json::Value, CompletionError> {
        Err(CompletionError::InvalidResponse("not used".to_string()))
    }

    async fn complete(&self, _system: &str, user: &str) -> Result<String, CompletionError> {
        *self.last_user.lock().unwrap() = Some(user.to_string());
        Ok("Staff must follow the medication policy.".to_string())
    }
}

async fn stored_chunk(repository: &InMemoryChunkRepository, content: &str) -> ChunkId {
    let chunk = Chunk::new(content.to_string(), DocumentId::new(), 0);
    let id = chunk.id;
    repository.save_batch(&[chunk]).await.unwrap();
    id
}

#[tokio::test]
async fn given_no_index_hits_when_querying_then_an_explicit_no_context_answer_is_returned() {
    let client = Arc::new(RecordingCompletionClient::default());
    let service = RetrievalService::new(
        Arc::new(FixedEmbedder),
        Arc::new(FixedHitsIndex { hits: Vec::new() }),
        Arc::new(InMemoryChunkRepository::new()),
        Arc::clone(&client) as Arc<dyn CompletionClient>,
        TOP_K,
    );

    let response = service.query("What is the medication policy?").await.unwrap();

    assert!(response.sources.is_empty());
    assert!(!response.answer.is_empty());
    // No completion call is made without context to ground it.
    assert!(client.last_user.lock().unwrap().is_none());
}

#[tokio::test]
async fn given_index_hits_when_querying_then_chunk_contents_ground_the_answer() {
    let repository = Arc::new(InMemoryChunkRepository::new());
    let first = stored_chunk(&repository, "Medication is stored in a locked cabinet.").await;
    let second = stored_chunk(&repository, "Only trained staff administer medication.").await;
    let client = Arc::new(RecordingCompletionClient::default());
    let service = RetrievalService::new(
        Arc::new(FixedEmbedder),
        Arc::new(FixedHitsIndex {
            hits: vec![
                SlotHit { chunk_id: first, score: 0.9 },
                SlotHit { chunk_id: second, score: 0.7 },
            ],
        }),
        Arc::clone(&repository) as Arc<dyn ChunkRepository>,
        Arc::clone(&client) as Arc<dyn CompletionClient>,
        TOP_K,
    );

    let response = service.query("Where is medication stored?").await.unwrap();

    assert_eq!(response.answer, "Staff must follow the medication policy.");
    assert_eq!(response.sources.len(), 2);
    assert_eq!(response.sources[0].chunk_id, first);
    assert!((response.sources[0].score - 0.9).abs() < f32::EPSILON);

    let prompt = client.last_user.lock().unwrap().clone().unwrap();
    assert!(prompt.contains("Medication is stored in a locked cabinet."));
    assert!(prompt.contains("Only trained staff administer medication."));
    assert!(prompt.contains("Where is medication stored?"));
}

#[tokio::test]
async fn given_a_hit_without_a_stored_chunk_when_querying_then_it_is_skipped_not_fatal() {
    let repository = Arc::new(InMemoryChunkRepository::new());
    let stored = stored_chunk(&repository, "Complaints are acknowledged within two days.").await;
    let dangling = ChunkId::new();
    let service = RetrievalService::new(
        Arc::new(FixedEmbedder),
        Arc::new(FixedHitsIndex {
            hits: vec![
                SlotHit { chunk_id: dangling, score: 0.95 },
                SlotHit { chunk_id: stored, score: 0.5 },
            ],
        }),
        Arc::clone(&repository) as Arc<dyn ChunkRepository>,
        Arc::new(RecordingCompletionClient::default()),
        TOP_K,
    );

    let response = service.query("How fast are complaints handled?").await.unwrap();

    assert_eq!(response.sources.len(), 1);
    assert_eq!(response.sources[0].chunk_id, stored);
}
