mod form_service;
mod ingestion_service;
mod retrieval_service;
mod submission;

pub use form_service::{FormService, FormServiceError, ProcessedForm};
pub use ingestion_service::{IngestionError, IngestionService};
pub use retrieval_service::{QueryResponse, RetrievalError, RetrievalService, SourceChunk};
pub use submission::{validate_submission, MissingField, SubmissionValidation};
