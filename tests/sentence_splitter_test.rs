use careform::application::ports::TextSplitter;
use careform::domain::DocumentId;
use careform::infrastructure::text_processing::SentenceSplitter;

const SMALL_CHUNK_SIZE: usize = 50;
const SMALL_OVERLAP: usize = 10;
const STANDARD_CHUNK_SIZE: usize = 1000;
const STANDARD_OVERLAP: usize = 200;

#[tokio::test]
async fn given_empty_text_when_splitting_then_returns_no_chunks() {
    let splitter = SentenceSplitter::new(SMALL_CHUNK_SIZE, SMALL_OVERLAP);
    let doc_id = DocumentId::new();

    let chunks = splitter.split("", doc_id).await.unwrap();

    assert!(chunks.is_empty());
}

#[tokio::test]
async fn given_short_text_when_splitting_then_returns_single_verbatim_chunk() {
    let splitter = SentenceSplitter::new(STANDARD_CHUNK_SIZE, STANDARD_OVERLAP);
    let doc_id = DocumentId::new();
    let text = "Participants must be supported to make their own choices.";

    let chunks = splitter.split(text, doc_id).await.unwrap();

    assert_eq!(chunks.len(), 1);
    assert_eq!(chunks[0].content, text);
    assert_eq!(chunks[0].chunk_index, 0);
    assert_eq!(chunks[0].document_id, doc_id);
}

#[tokio::test]
async fn given_long_text_when_splitting_then_no_chunk_exceeds_configured_size() {
    let splitter = SentenceSplitter::new(SMALL_CHUNK_SIZE, SMALL_OVERLAP);
    let doc_id = DocumentId::new();
    let text = "word ".repeat(100);

    let chunks = splitter.split(&text, doc_id).await.unwrap();

    assert!(chunks.len() > 1);
    for chunk in &chunks {
        assert!(chunk.content.chars().count() <= SMALL_CHUNK_SIZE);
    }
}

#[tokio::test]
async fn given_long_text_when_splitting_then_chunk_indexes_are_sequential() {
    let splitter = SentenceSplitter::new(SMALL_CHUNK_SIZE, SMALL_OVERLAP);
    let doc_id = DocumentId::new();
    let text = "policy ".repeat(60);

    let chunks = splitter.split(&text, doc_id).await.unwrap();

    for (i, chunk) in chunks.iter().enumerate() {
        assert_eq!(chunk.chunk_index, i);
    }
}

#[tokio::test]
async fn given_consecutive_chunks_when_splitting_then_they_share_overlap_text() {
    let splitter = SentenceSplitter::new(SMALL_CHUNK_SIZE, SMALL_OVERLAP);
    let doc_id = DocumentId::new();
    let text: String = ('a'..='z').cycle().take(200).collect();

    let chunks = splitter.split(&text, doc_id).await.unwrap();

    assert!(chunks.len() > 1);
    for pair in chunks.windows(2) {
        let prev_tail: String = pair[0]
            .content
            .chars()
            .skip(pair[0].content.chars().count() - SMALL_OVERLAP)
            .collect();
        let next_head: String = pair[1].content.chars().take(SMALL_OVERLAP).collect();
        assert_eq!(prev_tail, next_head);
    }
}

#[tokio::test]
async fn given_sentence_near_window_end_when_splitting_then_chunk_ends_at_sentence_boundary() {
    let splitter = SentenceSplitter::new(SMALL_CHUNK_SIZE, SMALL_OVERLAP);
    let doc_id = DocumentId::new();
    // A sentence terminator falls inside the last fifth of the first window.
    let text = format!("{}. {}", "x".repeat(44), "y".repeat(100));

    let chunks = splitter.split(&text, doc_id).await.unwrap();

    assert!(chunks.len() > 1);
    assert!(
        chunks[0].content.ends_with(". "),
        "first chunk should stop after the sentence terminator: {:?}",
        chunks[0].content
    );
}

#[tokio::test]
async fn given_boundary_outside_final_fifth_when_splitting_then_window_is_not_pulled_back() {
    let splitter = SentenceSplitter::new(SMALL_CHUNK_SIZE, SMALL_OVERLAP);
    let doc_id = DocumentId::new();
    // The only terminator sits early in the window, outside the pullback zone.
    let text = format!("{}. {}", "x".repeat(5), "y".repeat(200));

    let chunks = splitter.split(&text, doc_id).await.unwrap();

    assert_eq!(chunks[0].content.chars().count(), SMALL_CHUNK_SIZE);
}

#[tokio::test]
async fn given_fifteen_hundred_chars_when_splitting_with_standard_settings_then_two_chunks_result() {
    let splitter = SentenceSplitter::new(STANDARD_CHUNK_SIZE, STANDARD_OVERLAP);
    let doc_id = DocumentId::new();
    let text = "a".repeat(1500);

    let chunks = splitter.split(&text, doc_id).await.unwrap();

    assert_eq!(chunks.len(), 2);
    assert_eq!(chunks[0].content.chars().count(), STANDARD_CHUNK_SIZE);
    // The second window starts at the overlap and runs to the end.
    assert_eq!(chunks[1].content.chars().count(), 700);
}

#[tokio::test]
async fn given_unbroken_text_when_splitting_then_chunk_count_tracks_the_stride() {
    let splitter = SentenceSplitter::new(SMALL_CHUNK_SIZE, SMALL_OVERLAP);
    let doc_id = DocumentId::new();
    let stride = SMALL_CHUNK_SIZE - SMALL_OVERLAP;

    for len in [50, 51, 200, 1000, 4000] {
        let text = "x".repeat(len);
        let chunks = splitter.split(&text, doc_id).await.unwrap();

        let expected = len.div_ceil(stride);
        assert!(
            chunks.len().abs_diff(expected) <= 1,
            "{len} chars produced {} chunks, expected about {expected}",
            chunks.len()
        );
    }
}

#[tokio::test]
async fn given_any_text_when_splitting_then_every_chunk_is_a_verbatim_substring() {
    let splitter = SentenceSplitter::new(SMALL_CHUNK_SIZE, SMALL_OVERLAP);
    let doc_id = DocumentId::new();
    let text = "Support workers must report incidents promptly. Records are kept for seven years. \
                Participants may request their records at any time.";

    let chunks = splitter.split(text, doc_id).await.unwrap();

    for chunk in &chunks {
        assert!(
            text.contains(&chunk.content),
            "chunk not found verbatim in source: {:?}",
            chunk.content
        );
    }
}
