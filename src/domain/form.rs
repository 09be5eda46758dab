use serde::{Deserialize, Serialize};

/// Canonical field-type vocabulary. Heterogeneous model output is mapped onto
/// this enum by the normalizer; these are the only values ever persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Text,
    Textarea,
    Radio,
    Checkbox,
    Select,
    Date,
    Time,
    Datetime,
    Email,
    Number,
    Signature,
    Heading,
    Information,
    Table,
}

impl FieldType {
    pub fn is_choice(&self) -> bool {
        matches!(self, Self::Radio | Self::Checkbox | Self::Select)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Textarea => "textarea",
            Self::Radio => "radio",
            Self::Checkbox => "checkbox",
            Self::Select => "select",
            Self::Date => "date",
            Self::Time => "time",
            Self::Datetime => "datetime",
            Self::Email => "email",
            Self::Number => "number",
            Self::Signature => "signature",
            Self::Heading => "heading",
            Self::Information => "information",
            Self::Table => "table",
        }
    }
}

/// Conditional visibility: the field is shown only when the field named by
/// `dependent_on` was answered with `show_if`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionalRule {
    pub dependent_on: String,
    pub show_if: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub id: String,
    pub question_text: String,
    pub field_type: FieldType,
    #[serde(default)]
    pub options: Vec<String>,
    #[serde(default)]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub conditional: Option<ConditionalRule>,
}

impl FormField {
    pub fn new(id: impl Into<String>, question_text: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: id.into(),
            question_text: question_text.into(),
            field_type,
            options: Vec::new(),
            required: false,
            conditional: None,
        }
    }

    pub fn with_options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }
}

/// The canonical ordered field list for one uploaded form. Order is display
/// and fill order and must mirror the source document; it is never partially
/// written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormStructure {
    pub questions: Vec<FormField>,
}

impl FormStructure {
    pub fn new(questions: Vec<FormField>) -> Self {
        Self { questions }
    }

    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// The documented last-resort structure: the pipeline never returns an
    /// empty field list, even for a near-empty input file.
    pub fn minimal_fallback() -> Self {
        Self::new(vec![
            FormField::new("form_name", "Form Name", FieldType::Text).required(),
            FormField::new("form_description", "Form Description", FieldType::Textarea).required(),
        ])
    }
}
