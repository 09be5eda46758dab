use async_trait::async_trait;

use crate::application::ports::{TextSplitter, TextSplitterError};
use crate::domain::{Chunk, DocumentId};

const SENTENCE_TERMINATORS: [[char; 2]; 6] = [
    ['.', ' '],
    ['?', ' '],
    ['!', ' '],
    ['.', '\n'],
    ['?', '\n'],
    ['!', '\n'],
];

/// Fixed-window splitter with overlap. Windows that would cut a sentence
/// mid-way are pulled back to the last sentence boundary, but only when
/// that boundary falls within the final fifth of the window, so chunks
/// never shrink below 80% of the configured size.
pub struct SentenceSplitter {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl SentenceSplitter {
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self {
            chunk_size,
            chunk_overlap,
        }
    }

    fn boundary_in_window(chars: &[char], window_start: usize, window_end: usize) -> Option<usize> {
        let search_from = window_start + (window_end - window_start) * 4 / 5;

        for pos in (search_from..window_end.saturating_sub(1)).rev() {
            let pair = [chars[pos], chars[pos + 1]];
            if SENTENCE_TERMINATORS.contains(&pair) {
                // Cut after the terminator and its trailing separator.
                return Some(pos + 2);
            }
        }

        None
    }
}

#[async_trait]
impl TextSplitter for SentenceSplitter {
    async fn split(
        &self,
        text: &str,
        document_id: DocumentId,
    ) -> Result<Vec<Chunk>, TextSplitterError> {
        if self.chunk_size == 0 {
            return Err(TextSplitterError::SplittingFailed(
                "chunk size must be positive".to_string(),
            ));
        }

        let chars: Vec<char> = text.chars().collect();
        let total_len = chars.len();
        let mut chunks = Vec::new();

        if total_len == 0 {
            return Ok(chunks);
        }

        let mut start = 0;
        let mut chunk_index = 0;

        while start < total_len {
            let mut end = (start + self.chunk_size).min(total_len);

            if end < total_len {
                if let Some(boundary) = Self::boundary_in_window(&chars, start, end) {
                    end = boundary;
                }
            }

            let chunk_text: String = chars[start..end].iter().collect();
            chunks.push(Chunk::new(chunk_text, document_id, chunk_index));
            chunk_index += 1;

            if end >= total_len {
                break;
            }

            let next_start = end.saturating_sub(self.chunk_overlap);
            // The overlap must never rewind past the current start.
            start = next_start.max(start + 1);
        }

        Ok(chunks)
    }
}
