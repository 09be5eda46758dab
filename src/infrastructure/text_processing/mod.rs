mod composite_file_loader;
mod docx_adapter;
mod image_adapter;
mod pdf_adapter;
mod plain_text_adapter;
mod sentence_splitter;
mod text_sanitizer;

pub use composite_file_loader::CompositeFileLoader;
pub use docx_adapter::DocxAdapter;
pub use image_adapter::ImageAdapter;
pub use pdf_adapter::PdfAdapter;
pub use plain_text_adapter::PlainTextAdapter;
pub use sentence_splitter::SentenceSplitter;
pub use text_sanitizer::sanitize_extracted_text;
