use std::collections::HashMap;

use careform::application::services::validate_submission;
use careform::domain::{ConditionalRule, FieldType, FormField, FormStructure};
use pretty_assertions::assert_eq;

fn answers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn basic_structure() -> FormStructure {
    FormStructure::new(vec![
        FormField::new("section", "Details", FieldType::Heading),
        FormField::new("name", "Your name", FieldType::Text).required(),
        FormField::new("notes", "Anything else?", FieldType::Textarea),
    ])
}

#[test]
fn given_all_required_answers_when_validating_then_the_submission_is_valid() {
    let validation = validate_submission(&basic_structure(), &answers(&[("name", "Sam")]));

    assert!(validation.valid);
    assert!(validation.missing_fields.is_empty());
}

#[test]
fn given_a_missing_required_answer_when_validating_then_it_is_reported_by_id_and_question() {
    let validation = validate_submission(&basic_structure(), &answers(&[]));

    assert!(!validation.valid);
    assert_eq!(validation.missing_fields.len(), 1);
    assert_eq!(validation.missing_fields[0].id, "name");
    assert_eq!(validation.missing_fields[0].question, "Your name");
}

#[test]
fn given_a_blank_answer_when_validating_then_it_counts_as_missing() {
    let validation = validate_submission(&basic_structure(), &answers(&[("name", "   ")]));

    assert!(!validation.valid);
}

#[test]
fn given_required_headings_and_information_fields_when_validating_then_they_are_never_counted() {
    let mut structure = basic_structure();
    // Extraction sometimes marks non-input fields required; they take no answer.
    structure.questions[0].required = true;
    structure
        .questions
        .push(FormField::new("note", "Return this form to the office", FieldType::Information).required());

    let validation = validate_submission(&structure, &answers(&[("name", "Sam")]));

    assert!(validation.valid);
}

fn conditional_structure() -> FormStructure {
    let mut authorities = FormField::new(
        "authorities",
        "Which authorities were notified?",
        FieldType::Checkbox,
    )
    .required();
    authorities.conditional = Some(ConditionalRule {
        dependent_on: "reportable".to_string(),
        show_if: "Yes".to_string(),
    });

    FormStructure::new(vec![
        FormField::new("reportable", "Is this reportable?", FieldType::Radio).required(),
        authorities,
    ])
}

#[test]
fn given_a_hidden_conditional_field_when_validating_then_it_is_not_required() {
    let validation = validate_submission(&conditional_structure(), &answers(&[("reportable", "No")]));

    assert!(validation.valid);
}

#[test]
fn given_a_visible_conditional_field_when_validating_then_its_answer_is_required() {
    let validation =
        validate_submission(&conditional_structure(), &answers(&[("reportable", "Yes")]));

    assert!(!validation.valid);
    assert_eq!(validation.missing_fields[0].id, "authorities");
}

#[test]
fn given_an_unanswered_controlling_field_when_validating_then_the_dependent_stays_hidden() {
    let validation = validate_submission(&conditional_structure(), &answers(&[]));

    assert!(!validation.valid);
    // Only the controlling field itself is missing.
    assert_eq!(validation.missing_fields.len(), 1);
    assert_eq!(validation.missing_fields[0].id, "reportable");
}
