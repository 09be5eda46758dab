use std::collections::HashSet;

use crate::domain::{
    ConditionalRule, ExtractionResult, FieldType, FormField, FormStructure,
};

/// Pure normalization pass: maps heterogeneous candidate output onto the
/// canonical schema without ever dropping, merging, reordering, or rewording
/// a question. Text fidelity and schema cleanup are deliberately separate:
/// only type tokens and missing metadata are touched, never question text.
pub fn normalize(result: &ExtractionResult) -> Result<FormStructure, NormalizerError> {
    let mut fields = Vec::with_capacity(result.candidates.len());
    let mut used_ids: HashSet<String> = HashSet::new();

    for (position, candidate) in result.candidates.iter().enumerate() {
        let object = candidate
            .as_object()
            .ok_or_else(|| NormalizerError::MalformedCandidate {
                position,
                detail: "candidate entry is not a JSON object".to_string(),
            })?;

        let question_text = lookup_str(object, &["question_text", "question", "label", "text"])
            .map(str::to_string)
            .unwrap_or_else(|| format!("Question {}", position + 1));

        let raw_type = lookup_str(object, &["field_type", "type"]).unwrap_or("text");
        let field_type = canonical_field_type(raw_type);

        let mut options = object
            .get("options")
            .and_then(|v| v.as_array())
            .map(|array| {
                array
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect::<Vec<_>>()
            })
            .unwrap_or_default();

        if field_type.is_choice() && options.is_empty() {
            options = infer_default_options(&question_text);
        }
        if !field_type.is_choice() {
            options.clear();
        }

        let required = object
            .get("required")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        let conditional = object.get("conditional").and_then(parse_conditional);

        let id = unique_id(
            lookup_str(object, &["id"]),
            &question_text,
            position,
            &mut used_ids,
        );

        fields.push(FormField {
            id,
            question_text,
            field_type,
            options,
            required,
            conditional,
        });
    }

    Ok(FormStructure::new(fields))
}

#[derive(Debug, thiserror::Error)]
pub enum NormalizerError {
    #[error("malformed extraction at candidate {position}: {detail}")]
    MalformedCandidate { position: usize, detail: String },
}

fn lookup_str<'a>(
    object: &'a serde_json::Map<String, serde_json::Value>,
    keys: &[&str],
) -> Option<&'a str> {
    keys.iter()
        .find_map(|key| object.get(*key).and_then(|v| v.as_str()))
        .filter(|s| !s.trim().is_empty())
}

/// Synonym table for the field-type vocabularies different models emit.
fn canonical_field_type(raw: &str) -> FieldType {
    match raw.trim().to_lowercase().as_str() {
        "text" | "short_text" | "single_line" | "phone" => FieldType::Text,
        "textarea" | "long_text" | "multi_line" => FieldType::Textarea,
        "radio" | "multiple_choice" | "yes_no" | "yes/no" => FieldType::Radio,
        "checkbox" | "multi_select" => FieldType::Checkbox,
        "select" | "dropdown" => FieldType::Select,
        "date" => FieldType::Date,
        "time" => FieldType::Time,
        "datetime" => FieldType::Datetime,
        "email" => FieldType::Email,
        "number" => FieldType::Number,
        "signature" => FieldType::Signature,
        "heading" | "header" => FieldType::Heading,
        "information" | "readonly" => FieldType::Information,
        "table" => FieldType::Table,
        _ => FieldType::Text,
    }
}

/// Default option sets for choice fields whose options the extractor
/// omitted, inferred from question-text keywords in priority order. A
/// question matching none of the groups keeps its empty list: accepted
/// information loss rather than invented options.
fn infer_default_options(question_text: &str) -> Vec<String> {
    let lower = question_text.to_lowercase();

    if lower.contains("yes") || lower.contains("no") {
        return vec!["Yes".to_string(), "No".to_string()];
    }
    if ["agree", "disagree", "consent", "accept"]
        .iter()
        .any(|w| lower.contains(w))
    {
        return vec!["Agree".to_string(), "Disagree".to_string()];
    }
    if ["rate", "scale", "score", "level"]
        .iter()
        .any(|w| lower.contains(w))
    {
        return (1..=5).map(|n| n.to_string()).collect();
    }

    Vec::new()
}

fn parse_conditional(value: &serde_json::Value) -> Option<ConditionalRule> {
    let object = value.as_object()?;
    Some(ConditionalRule {
        dependent_on: object.get("dependent_on")?.as_str()?.to_string(),
        show_if: object.get("show_if")?.as_str()?.to_string(),
    })
}

const MAX_DERIVED_ID_LEN: usize = 30;

/// Stable identifier for a field: the extractor's id when present, otherwise
/// derived from the question text, with a positional fallback and a
/// positional suffix to keep ids unique within the structure.
fn unique_id(
    given: Option<&str>,
    question_text: &str,
    position: usize,
    used: &mut HashSet<String>,
) -> String {
    let base = match given {
        Some(id) => id.trim().to_string(),
        None => derive_id(question_text, position),
    };

    let id = if used.contains(&base) {
        format!("{}_{}", base, position + 1)
    } else {
        base
    };
    used.insert(id.clone());
    id
}

fn derive_id(question_text: &str, position: usize) -> String {
    let derived: String = question_text
        .trim()
        .to_lowercase()
        .replace(' ', "_")
        .chars()
        .take(MAX_DERIVED_ID_LEN)
        .collect();

    if derived.is_empty() {
        format!("question_{}", position + 1)
    } else {
        derived
    }
}
