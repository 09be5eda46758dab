use careform::application::extraction::{ExtractionStrategy, HeuristicStrategy};
use careform::domain::{
    ContentType, Document, ExtractionSource, NormalizedContent, Paragraph, StructuredDocument,
};

fn docx_document() -> Document {
    Document::new("daily_checklist.docx".to_string(), ContentType::Docx, 1024)
}

fn structured(paragraphs: Vec<Paragraph>, tables: Vec<Vec<Vec<String>>>) -> NormalizedContent {
    NormalizedContent::Structured(StructuredDocument { paragraphs, tables })
}

fn row(cells: &[&str]) -> Vec<String> {
    cells.iter().map(|c| c.to_string()).collect()
}

#[tokio::test]
async fn given_checklist_table_when_deriving_then_each_row_becomes_a_required_radio_field() {
    let strategy = HeuristicStrategy::new();
    let content = structured(
        vec![],
        vec![vec![
            row(&["Question", "Yes", "No"]),
            row(&["Have you eaten today?", "", ""]),
            row(&["Did you take your medication?", "", ""]),
        ]],
    );

    let result = strategy
        .attempt(&content, &docx_document())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(result.source, ExtractionSource::Heuristic);
    assert_eq!(result.candidates.len(), 2);

    let first = &result.candidates[0];
    assert_eq!(first["id"], "question_1");
    assert_eq!(first["question_text"], "Have you eaten today?");
    assert_eq!(first["field_type"], "radio");
    assert_eq!(first["options"][0], "Yes");
    assert_eq!(first["options"][1], "No");
    assert_eq!(first["required"], true);
}

#[tokio::test]
async fn given_table_without_choice_header_when_deriving_then_it_is_not_treated_as_a_checklist() {
    let strategy = HeuristicStrategy::new();
    let content = structured(
        vec![],
        vec![vec![
            row(&["Name", "Role"]),
            row(&["Alex", "Support worker"]),
        ]],
    );

    let result = strategy.attempt(&content, &docx_document()).await.unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn given_row_with_its_own_tokens_when_deriving_then_row_tokens_override_header_tokens() {
    let strategy = HeuristicStrategy::new();
    let content = structured(
        vec![],
        vec![vec![
            row(&["Item", "Yes", "No", "N/A"]),
            row(&["Is the exit clear?", "Yes", "No", ""]),
        ]],
    );

    let result = strategy
        .attempt(&content, &docx_document())
        .await
        .unwrap()
        .unwrap();

    let options = result.candidates[0]["options"].as_array().unwrap();
    assert_eq!(options.len(), 2);
    assert_eq!(options[0], "Yes");
    assert_eq!(options[1], "No");
}

#[tokio::test]
async fn given_paragraph_forms_when_deriving_then_punctuation_decides_the_field_type() {
    let strategy = HeuristicStrategy::new();
    let content = structured(
        vec![
            Paragraph {
                text: "Participant name:".to_string(),
                emphasized: false,
            },
            Paragraph {
                text: "What support do you need?".to_string(),
                emphasized: false,
            },
            Paragraph {
                text: "Signature ___________".to_string(),
                emphasized: false,
            },
            Paragraph {
                text: "\u{2610} I agree to the house rules".to_string(),
                emphasized: false,
            },
        ],
        vec![],
    );

    let result = strategy
        .attempt(&content, &docx_document())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(result.candidates.len(), 4);
    assert_eq!(result.candidates[0]["question_text"], "Participant name");
    assert_eq!(result.candidates[0]["field_type"], "text");
    assert_eq!(
        result.candidates[1]["question_text"],
        "What support do you need?"
    );
    assert_eq!(result.candidates[2]["question_text"], "Signature");
    assert_eq!(result.candidates[3]["field_type"], "checkbox");
}

#[tokio::test]
async fn given_emphasized_paragraphs_when_deriving_then_sections_prefix_member_questions() {
    let strategy = HeuristicStrategy::new();
    let content = structured(
        vec![
            Paragraph {
                text: "Contact Details".to_string(),
                emphasized: true,
            },
            Paragraph {
                text: "Phone number:".to_string(),
                emphasized: false,
            },
            Paragraph {
                text: "Emergency".to_string(),
                emphasized: true,
            },
            Paragraph {
                text: "Who should we call?".to_string(),
                emphasized: false,
            },
        ],
        vec![],
    );

    let result = strategy
        .attempt(&content, &docx_document())
        .await
        .unwrap()
        .unwrap();

    assert_eq!(
        result.candidates[0]["question_text"],
        "Contact Details - Phone number"
    );
    assert_eq!(
        result.candidates[1]["question_text"],
        "Emergency - Who should we call?"
    );
}

#[tokio::test]
async fn given_prose_paragraphs_when_deriving_then_nothing_is_extracted() {
    let strategy = HeuristicStrategy::new();
    let content = structured(
        vec![Paragraph {
            text: "This form should be returned to the office".to_string(),
            emphasized: false,
        }],
        vec![],
    );

    let result = strategy.attempt(&content, &docx_document()).await.unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn given_non_structured_content_when_deriving_then_the_tier_passes() {
    let strategy = HeuristicStrategy::new();
    let content = NormalizedContent::Text("plain text".to_string());

    let result = strategy.attempt(&content, &docx_document()).await.unwrap();

    assert!(result.is_none());
}
