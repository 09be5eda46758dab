use careform::application::extraction::{normalize, NormalizerError};
use careform::domain::{ExtractionResult, ExtractionSource, FieldType};
use pretty_assertions::assert_eq;
use serde_json::json;

fn result_of(candidates: Vec<serde_json::Value>) -> ExtractionResult {
    ExtractionResult::new(candidates, ExtractionSource::PrimaryModel)
}

#[test]
fn given_candidates_when_normalizing_then_order_and_text_are_preserved_verbatim() {
    let result = result_of(vec![
        json!({"question_text": "  Name of participant", "field_type": "text"}),
        json!({"question_text": "Describe the support provided", "field_type": "textarea"}),
    ]);

    let structure = normalize(&result).unwrap();

    assert_eq!(structure.len(), 2);
    assert_eq!(structure.questions[0].question_text, "  Name of participant");
    assert_eq!(
        structure.questions[1].question_text,
        "Describe the support provided"
    );
}

#[test]
fn given_alternate_key_names_when_normalizing_then_fallback_chain_resolves_them() {
    let result = result_of(vec![
        json!({"question": "From question key", "type": "date"}),
        json!({"label": "From label key"}),
        json!({"text": "From text key"}),
    ]);

    let structure = normalize(&result).unwrap();

    assert_eq!(structure.questions[0].question_text, "From question key");
    assert_eq!(structure.questions[0].field_type, FieldType::Date);
    assert_eq!(structure.questions[1].question_text, "From label key");
    assert_eq!(structure.questions[2].question_text, "From text key");
}

#[test]
fn given_candidate_without_any_text_key_when_normalizing_then_positional_question_text_is_used() {
    let result = result_of(vec![json!({"field_type": "text"})]);

    let structure = normalize(&result).unwrap();

    assert_eq!(structure.questions[0].question_text, "Question 1");
}

#[test]
fn given_synonym_field_types_when_normalizing_then_canonical_types_are_assigned() {
    let result = result_of(vec![
        json!({"question_text": "Pick one", "field_type": "multiple_choice", "options": ["A", "B"]}),
        json!({"question_text": "Pick many", "field_type": "multi_select", "options": ["A", "B"]}),
        json!({"question_text": "State", "field_type": "dropdown", "options": ["NSW", "VIC"]}),
        json!({"question_text": "Contact number", "field_type": "phone"}),
        json!({"question_text": "Section", "field_type": "header"}),
        json!({"question_text": "Note", "field_type": "readonly"}),
        json!({"question_text": "Mystery", "field_type": "hologram"}),
    ]);

    let structure = normalize(&result).unwrap();

    let types: Vec<FieldType> = structure.questions.iter().map(|q| q.field_type).collect();
    assert_eq!(
        types,
        vec![
            FieldType::Radio,
            FieldType::Checkbox,
            FieldType::Select,
            FieldType::Text,
            FieldType::Heading,
            FieldType::Information,
            FieldType::Text,
        ]
    );
}

#[test]
fn given_missing_field_type_when_normalizing_then_text_is_the_default() {
    let result = result_of(vec![json!({"question_text": "Anything"})]);

    let structure = normalize(&result).unwrap();

    assert_eq!(structure.questions[0].field_type, FieldType::Text);
}

#[test]
fn given_choice_field_without_options_when_normalizing_then_options_are_inferred_from_wording() {
    let result = result_of(vec![
        json!({"question_text": "Do you consent to sharing your data?", "field_type": "radio"}),
        json!({"question_text": "Have you eaten today? Yes or no", "field_type": "radio"}),
        json!({"question_text": "Rate the quality of support", "field_type": "select"}),
        json!({"question_text": "Preferred communication method", "field_type": "radio"}),
    ]);

    let structure = normalize(&result).unwrap();

    assert_eq!(structure.questions[0].options, vec!["Agree", "Disagree"]);
    assert_eq!(structure.questions[1].options, vec!["Yes", "No"]);
    assert_eq!(structure.questions[2].options, vec!["1", "2", "3", "4", "5"]);
    // No keyword group applies: the empty list is kept rather than invented.
    assert!(structure.questions[3].options.is_empty());
}

#[test]
fn given_non_choice_field_with_options_when_normalizing_then_options_are_cleared() {
    let result = result_of(vec![
        json!({"question_text": "Your name", "field_type": "text", "options": ["stale", "junk"]}),
    ]);

    let structure = normalize(&result).unwrap();

    assert!(structure.questions[0].options.is_empty());
}

#[test]
fn given_no_id_when_normalizing_then_id_is_derived_from_question_text_and_capped() {
    let result = result_of(vec![
        json!({"question_text": "Emergency Contact", "field_type": "text"}),
        json!({"question_text": "A very long question text that keeps going well past the cap", "field_type": "text"}),
    ]);

    let structure = normalize(&result).unwrap();

    assert_eq!(structure.questions[0].id, "emergency_contact");
    assert_eq!(structure.questions[1].id.chars().count(), 30);
    assert!(structure.questions[1].id.starts_with("a_very_long_question"));
}

#[test]
fn given_duplicate_ids_when_normalizing_then_a_positional_suffix_disambiguates() {
    let result = result_of(vec![
        json!({"id": "name", "question_text": "Name", "field_type": "text"}),
        json!({"id": "name", "question_text": "Name", "field_type": "text"}),
    ]);

    let structure = normalize(&result).unwrap();

    assert_eq!(structure.questions[0].id, "name");
    assert_eq!(structure.questions[1].id, "name_2");
}

#[test]
fn given_conditional_metadata_when_normalizing_then_the_rule_is_carried_through() {
    let result = result_of(vec![json!({
        "id": "authorities",
        "question_text": "Which authorities were notified?",
        "field_type": "checkbox",
        "options": ["Police"],
        "conditional": {"dependent_on": "reportable", "show_if": "Yes"}
    })]);

    let structure = normalize(&result).unwrap();

    let rule = structure.questions[0].conditional.as_ref().unwrap();
    assert_eq!(rule.dependent_on, "reportable");
    assert_eq!(rule.show_if, "Yes");
}

#[test]
fn given_a_non_object_candidate_when_normalizing_then_a_malformed_error_names_its_position() {
    let result = result_of(vec![
        json!({"question_text": "Fine", "field_type": "text"}),
        json!("just a string"),
    ]);

    let error = normalize(&result).unwrap_err();

    match error {
        NormalizerError::MalformedCandidate { position, .. } => assert_eq!(position, 1),
    }
}
