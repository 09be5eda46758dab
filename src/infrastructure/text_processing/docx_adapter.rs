use std::io::{Cursor, Read};
use std::sync::LazyLock;

use async_trait::async_trait;
use regex::Regex;

use crate::application::ports::{FileLoader, FileLoaderError};
use crate::domain::{ContentType, Document, NormalizedContent, Paragraph, StructuredDocument};

static TABLE_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<w:tbl(?:>|\s[^>]*>).*?</w:tbl>").unwrap());
static ROW_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<w:tr(?:>|\s[^>]*>).*?</w:tr>").unwrap());
static CELL_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<w:tc(?:>|\s[^>]*>).*?</w:tc>").unwrap());
static PARAGRAPH_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<w:p(?:>|\s[^>]*>).*?</w:p>").unwrap());
static TEXT_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<w:t(?:>|\s[^>]*>)(.*?)</w:t>").unwrap());
static BOLD_MARK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<w:b(?:/>|\s)|w:val="Heading"#).unwrap());

/// Pulls paragraphs and tables out of the WordprocessingML inside a .docx
/// archive. Forms authored in Word lean heavily on tables for checklists,
/// so table cell structure is preserved rather than flattened to prose.
#[derive(Default)]
pub struct DocxAdapter;

impl DocxAdapter {
    pub fn new() -> Self {
        Self
    }

    fn read_document_xml(data: &[u8]) -> Result<String, FileLoaderError> {
        let mut archive = zip::ZipArchive::new(Cursor::new(data))
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("not a DOCX archive: {e}")))?;

        let mut entry = archive.by_name("word/document.xml").map_err(|e| {
            FileLoaderError::ExtractionFailed(format!("missing word/document.xml: {e}"))
        })?;

        let mut xml = String::new();
        entry
            .read_to_string(&mut xml)
            .map_err(|e| FileLoaderError::ExtractionFailed(format!("unreadable XML: {e}")))?;

        Ok(xml)
    }

    fn parse(xml: &str) -> StructuredDocument {
        let mut tables = Vec::new();

        for table in TABLE_BLOCK.find_iter(xml) {
            let mut rows = Vec::new();
            for row in ROW_BLOCK.find_iter(table.as_str()) {
                let cells: Vec<String> = CELL_BLOCK
                    .find_iter(row.as_str())
                    .map(|cell| Self::text_of(cell.as_str()))
                    .collect();
                if cells.iter().any(|c| !c.is_empty()) {
                    rows.push(cells);
                }
            }
            if !rows.is_empty() {
                tables.push(rows);
            }
        }

        // Paragraphs inside tables already surfaced via their cells.
        let body = TABLE_BLOCK.replace_all(xml, "");
        let paragraphs: Vec<Paragraph> = PARAGRAPH_BLOCK
            .find_iter(&body)
            .filter_map(|block| {
                let text = Self::text_of(block.as_str());
                if text.is_empty() {
                    return None;
                }
                Some(Paragraph {
                    emphasized: BOLD_MARK.is_match(block.as_str()),
                    text,
                })
            })
            .collect();

        StructuredDocument { paragraphs, tables }
    }

    fn text_of(fragment: &str) -> String {
        let joined: String = TEXT_RUN
            .captures_iter(fragment)
            .map(|cap| cap[1].to_string())
            .collect();

        unescape_xml(&joined).trim().to_string()
    }
}

fn unescape_xml(text: &str) -> String {
    text.replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

#[async_trait]
impl FileLoader for DocxAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(
            document_id = %document.id.as_uuid(),
            filename = %document.filename,
        )
    )]
    async fn extract(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<NormalizedContent, FileLoaderError> {
        if document.content_type != ContentType::Docx {
            return Err(FileLoaderError::UnsupportedContentType(
                document.content_type.as_mime().to_string(),
            ));
        }

        let xml = Self::read_document_xml(data)?;
        let structured = Self::parse(&xml);

        tracing::info!(
            paragraphs = structured.paragraphs.len(),
            tables = structured.tables.len(),
            "DOCX extraction complete"
        );

        if structured.paragraphs.is_empty() && structured.tables.is_empty() {
            return Err(FileLoaderError::NoTextFound(document.filename.clone()));
        }

        Ok(NormalizedContent::Structured(structured))
    }
}
