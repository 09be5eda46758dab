mod chunk;
mod document;
mod embedding;
mod extraction;
mod form;

pub use chunk::{Chunk, ChunkId, DocumentId};
pub use document::{ContentType, Document};
pub use embedding::Embedding;
pub use extraction::{
    ExtractionResult, ExtractionSource, NormalizedContent, Paragraph, StructuredDocument,
    VerificationReport,
};
pub use form::{ConditionalRule, FieldType, FormField, FormStructure};
