use std::collections::HashMap;

use crate::domain::{FieldType, FormField, FormStructure};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingField {
    pub id: String,
    pub question: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionValidation {
    pub valid: bool,
    pub missing_fields: Vec<MissingField>,
}

/// Checks that every required, currently visible input field has an answer.
/// Headings and read-only information fields take no input and are never
/// counted; a conditional field is only required while its controlling
/// answer makes it visible.
pub fn validate_submission(
    structure: &FormStructure,
    answers: &HashMap<String, String>,
) -> SubmissionValidation {
    let missing_fields: Vec<MissingField> = structure
        .questions
        .iter()
        .filter(|field| field.required && takes_input(field) && is_visible(field, answers))
        .filter(|field| {
            answers
                .get(&field.id)
                .map(|answer| answer.trim().is_empty())
                .unwrap_or(true)
        })
        .map(|field| MissingField {
            id: field.id.clone(),
            question: field.question_text.clone(),
        })
        .collect();

    SubmissionValidation {
        valid: missing_fields.is_empty(),
        missing_fields,
    }
}

fn takes_input(field: &FormField) -> bool {
    !matches!(field.field_type, FieldType::Heading | FieldType::Information)
}

fn is_visible(field: &FormField, answers: &HashMap<String, String>) -> bool {
    match &field.conditional {
        Some(rule) => answers
            .get(&rule.dependent_on)
            .is_some_and(|answer| answer == &rule.show_if),
        None => true,
    }
}
