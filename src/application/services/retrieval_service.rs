use std::sync::Arc;

use crate::application::extraction::prompts::ANSWER_SYSTEM;
use crate::application::ports::{
    ChunkRepository, ChunkRepositoryError, CompletionClient, CompletionError, Embedder,
    EmbedderError, VectorIndex, VectorIndexError,
};
use crate::domain::ChunkId;

const NO_CONTEXT_ANSWER: &str =
    "No relevant policy information was found for this question.";

/// Answers a free-text policy question: embeds the query, runs an exact
/// nearest-neighbor search, assembles the matching chunk contents into a
/// context, and asks the completion service for a grounded answer. An empty
/// index or an empty result set produces an explicit "nothing found" answer,
/// never a silent empty response.
pub struct RetrievalService {
    embedder: Arc<dyn Embedder>,
    vector_index: Arc<dyn VectorIndex>,
    chunk_repository: Arc<dyn ChunkRepository>,
    completion_client: Arc<dyn CompletionClient>,
    top_k: usize,
}

impl RetrievalService {
    pub fn new(
        embedder: Arc<dyn Embedder>,
        vector_index: Arc<dyn VectorIndex>,
        chunk_repository: Arc<dyn ChunkRepository>,
        completion_client: Arc<dyn CompletionClient>,
        top_k: usize,
    ) -> Self {
        Self {
            embedder,
            vector_index,
            chunk_repository,
            completion_client,
            top_k,
        }
    }

    #[tracing::instrument(skip(self))]
    pub async fn query(&self, question: &str) -> Result<QueryResponse, RetrievalError> {
        let query_embedding = self.embedder.embed(question).await?;

        let hits = self
            .vector_index
            .search(&query_embedding, self.top_k)
            .await?;

        if hits.is_empty() {
            tracing::info!("no index hits for query");
            return Ok(QueryResponse {
                answer: NO_CONTEXT_ANSWER.to_string(),
                sources: Vec::new(),
            });
        }

        let mut sources = Vec::with_capacity(hits.len());
        for hit in hits {
            match self.chunk_repository.get(hit.chunk_id).await? {
                Some(chunk) => sources.push(SourceChunk {
                    chunk_id: hit.chunk_id,
                    content: chunk.content,
                    score: hit.score,
                }),
                None => {
                    tracing::warn!(
                        chunk_id = %hit.chunk_id.as_uuid(),
                        "index hit has no stored chunk, skipping"
                    );
                }
            }
        }

        if sources.is_empty() {
            return Ok(QueryResponse {
                answer: NO_CONTEXT_ANSWER.to_string(),
                sources: Vec::new(),
            });
        }

        let context = sources
            .iter()
            .map(|s| s.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");
        let user = format!("Context documents:\n{context}\n\nQuestion: {question}");

        let answer = self
            .completion_client
            .complete(ANSWER_SYSTEM, &user)
            .await?;

        Ok(QueryResponse { answer, sources })
    }
}

#[derive(Debug, Clone)]
pub struct QueryResponse {
    pub answer: String,
    pub sources: Vec<SourceChunk>,
}

#[derive(Debug, Clone)]
pub struct SourceChunk {
    pub chunk_id: ChunkId,
    pub content: String,
    pub score: f32,
}

#[derive(Debug, thiserror::Error)]
pub enum RetrievalError {
    #[error("embedding: {0}")]
    Embedding(#[from] EmbedderError),
    #[error("search: {0}")]
    Search(#[from] VectorIndexError),
    #[error("chunk lookup: {0}")]
    Lookup(#[from] ChunkRepositoryError),
    #[error("answer generation: {0}")]
    Completion(#[from] CompletionError),
}
