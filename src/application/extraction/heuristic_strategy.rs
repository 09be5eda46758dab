use async_trait::async_trait;

use crate::domain::{
    Document, ExtractionResult, ExtractionSource, NormalizedContent, StructuredDocument,
};

use super::strategy::{ExtractionStrategy, StrategyError};

/// Derives candidate fields directly from structurally parsed documents
/// without invoking a model. Checklist tables whose header row resembles
/// Yes/No/NA columns become one radio field per row; paragraphs with
/// question-like punctuation become input fields, prefixed with the most
/// recent emphasized paragraph as a section title.
pub struct HeuristicStrategy;

impl HeuristicStrategy {
    pub fn new() -> Self {
        Self
    }

    fn derive_fields(doc: &StructuredDocument) -> Vec<serde_json::Value> {
        let mut fields = Vec::new();

        for table in &doc.tables {
            extract_checklist_rows(table, &mut fields);
        }

        let mut section: Option<String> = None;
        for para in &doc.paragraphs {
            if para.emphasized {
                section = Some(para.text.clone());
                continue;
            }
            if let Some(field) = field_from_paragraph(&para.text, section.as_deref()) {
                fields.push(field);
            }
        }

        // Assign positional ids once the full ordered list is known.
        for (i, field) in fields.iter_mut().enumerate() {
            if let Some(object) = field.as_object_mut() {
                object.insert(
                    "id".to_string(),
                    serde_json::Value::String(format!("question_{}", i + 1)),
                );
            }
        }

        fields
    }
}

impl Default for HeuristicStrategy {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ExtractionStrategy for HeuristicStrategy {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    async fn attempt(
        &self,
        content: &NormalizedContent,
        document: &Document,
    ) -> Result<Option<ExtractionResult>, StrategyError> {
        let NormalizedContent::Structured(doc) = content else {
            return Ok(None);
        };

        let fields = Self::derive_fields(doc);
        if fields.is_empty() {
            tracing::debug!(
                filename = %document.filename,
                "heuristic pass found no fields, escalating"
            );
            return Ok(None);
        }

        tracing::info!(
            filename = %document.filename,
            field_count = fields.len(),
            "heuristic pass derived fields without a model call"
        );
        Ok(Some(ExtractionResult::new(
            fields,
            ExtractionSource::Heuristic,
        )))
    }
}

/// Canonical Yes/No/NA token for a cell, if the cell is one.
fn choice_token(cell: &str) -> Option<&'static str> {
    match cell.trim().to_lowercase().as_str() {
        "yes" | "y" => Some("Yes"),
        "no" | "n" => Some("No"),
        "na" | "n/a" | "n.a." => Some("N/A"),
        _ => None,
    }
}

/// Deduplicated tokens found across a row, in Yes, No, N/A order.
fn row_tokens(row: &[String]) -> Vec<String> {
    let mut yes = false;
    let mut no = false;
    let mut na = false;
    for cell in row {
        match choice_token(cell) {
            Some("Yes") => yes = true,
            Some("No") => no = true,
            Some("N/A") => na = true,
            _ => {}
        }
    }

    let mut tokens = Vec::new();
    if yes {
        tokens.push("Yes".to_string());
    }
    if no {
        tokens.push("No".to_string());
    }
    if na {
        tokens.push("N/A".to_string());
    }
    tokens
}

fn extract_checklist_rows(table: &[Vec<String>], out: &mut Vec<serde_json::Value>) {
    let Some(header) = table.first() else {
        return;
    };

    // The table only counts as a checklist when its header row carries at
    // least two Yes/No/NA column labels.
    let header_tokens = row_tokens(header);
    if header_tokens.len() < 2 {
        return;
    }

    for row in &table[1..] {
        let Some(label) = row.iter().find(|cell| !cell.trim().is_empty()) else {
            continue;
        };
        // A row that is nothing but Yes/No/NA tokens is a column header
        // repeat, not a question.
        if row
            .iter()
            .filter(|cell| !cell.trim().is_empty())
            .all(|cell| choice_token(cell).is_some())
        {
            continue;
        }

        let mut options = row_tokens(row);
        if options.is_empty() {
            options = header_tokens.clone();
        }

        out.push(serde_json::json!({
            "question_text": label.trim(),
            "field_type": "radio",
            "options": options,
            "required": true,
        }));
    }
}

const CHECKBOX_GLYPHS: [&str; 5] = ["\u{2610}", "\u{25A1}", "\u{25A0}", "[ ]", "[]"];

fn field_from_paragraph(text: &str, section: Option<&str>) -> Option<serde_json::Value> {
    let trimmed = text.trim();
    if trimmed.len() < 3 {
        return None;
    }

    let (label, field_type) = if let Some(glyph_label) = strip_checkbox_glyph(trimmed) {
        (glyph_label.to_string(), "checkbox")
    } else if trimmed.ends_with(':') {
        (trimmed.trim_end_matches(':').trim().to_string(), "text")
    } else if trimmed.ends_with('?') {
        (trimmed.to_string(), "text")
    } else if trimmed.contains("___") {
        (
            trimmed.trim_end_matches(['_', ' ']).trim().to_string(),
            "text",
        )
    } else {
        return None;
    };

    if label.is_empty() {
        return None;
    }

    let question_text = match section {
        Some(title) => format!("{} - {}", title, label),
        None => label,
    };

    Some(serde_json::json!({
        "question_text": question_text,
        "field_type": field_type,
        "options": [],
        "required": false,
    }))
}

fn strip_checkbox_glyph(text: &str) -> Option<&str> {
    for glyph in CHECKBOX_GLYPHS {
        if let Some(rest) = text.strip_prefix(glyph) {
            let rest = rest.trim();
            if !rest.is_empty() {
                return Some(rest);
            }
        }
    }
    None
}
