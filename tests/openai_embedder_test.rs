use std::time::Duration;

use careform::application::ports::Embedder;
use careform::infrastructure::llm::OpenAiEmbedder;

#[tokio::test]
async fn given_an_empty_batch_when_embedding_then_no_request_is_made() {
    let embedder = OpenAiEmbedder::new(
        "test-key".to_string(),
        "text-embedding-ada-002".to_string(),
        Duration::from_secs(120),
    );

    let embeddings = embedder.embed_batch(&[]).await.unwrap();

    assert!(embeddings.is_empty());
}

#[tokio::test]
async fn given_a_tiny_timeout_when_embedding_then_the_call_fails_instead_of_hanging() {
    let embedder = OpenAiEmbedder::new(
        "test-key".to_string(),
        "text-embedding-ada-002".to_string(),
        Duration::from_millis(1),
    );

    let result = embedder.embed_batch(&["incident reporting policy"]).await;

    assert!(result.is_err());
}
