use std::sync::Arc;

use crate::application::ports::{CompletionClient, ImagePayload, JsonCompletionRequest};
use crate::domain::{NormalizedContent, VerificationReport};

use super::prompts;

/// Context passed back to the audit call is capped to stay inside token
/// limits; the candidate list itself is always sent whole.
const MAX_CONTEXT_CHARS: usize = 3_000;

/// Second model pass that critiques a first-pass extraction for omissions.
/// Strictly advisory: every failure in here is swallowed and reported as an
/// incomplete result, never raised out of the pipeline.
pub struct CompletenessVerifier {
    client: Arc<dyn CompletionClient>,
    model: String,
}

impl CompletenessVerifier {
    pub fn new(client: Arc<dyn CompletionClient>, model: String) -> Self {
        Self { client, model }
    }

    pub async fn verify(
        &self,
        content: &NormalizedContent,
        candidates: &[serde_json::Value],
    ) -> VerificationReport {
        let listing = enumerate_candidates(candidates);

        let mut user = format!(
            "Review these {} questions extracted from a form and identify anything that was \
             missed.\n\nEXTRACTED QUESTIONS:\n{}\n",
            candidates.len(),
            listing
        );
        if let Some(text) = content.as_text() {
            let capped: String = text.chars().take(MAX_CONTEXT_CHARS).collect();
            user.push_str(&format!("\nORIGINAL DOCUMENT TEXT:\n{}\n", capped));
        }
        user.push_str("\nRespond with the JSON validation object only.");

        let mut request = JsonCompletionRequest::new(&self.model, prompts::VERIFY_SYSTEM, user);
        if let NormalizedContent::Image { data, mime } = content {
            request = request.with_image(ImagePayload {
                data: data.clone(),
                mime: mime.clone(),
            });
        }

        match self.client.complete_json(request).await {
            Ok(response) => match serde_json::from_value::<VerificationReport>(response) {
                Ok(report) => {
                    if !report.complete {
                        tracing::warn!(
                            issue_count = report.issues.len(),
                            missed_count = report.missed_questions.len(),
                            "verification flagged extraction as incomplete"
                        );
                    }
                    report
                }
                Err(e) => VerificationReport::from_error(format!(
                    "Validation parsing error: {e}"
                )),
            },
            Err(e) => VerificationReport::from_error(format!("Validation error: {e}")),
        }
    }

    /// Narrowly scoped extraction for the specific questions the verifier
    /// found missing. Returned fields carry fresh `missed_N` identifiers and
    /// are meant to be appended, never interleaved. Best-effort: failures
    /// yield an empty list.
    pub async fn extract_missed(
        &self,
        content: &NormalizedContent,
        missed: &[String],
    ) -> Vec<serde_json::Value> {
        if missed.is_empty() {
            return Vec::new();
        }

        let listing = missed
            .iter()
            .enumerate()
            .map(|(i, q)| format!("{}. {}", i + 1, q))
            .collect::<Vec<_>>()
            .join("\n");
        let user = format!(
            "Extract ONLY these fields from the document, exactly as they appear:\n{}\n\n\
             Respond with the JSON object only.",
            listing
        );

        let mut request =
            JsonCompletionRequest::new(&self.model, prompts::SUPPLEMENTARY_SYSTEM, user);
        if let NormalizedContent::Image { data, mime } = content {
            request = request.with_image(ImagePayload {
                data: data.clone(),
                mime: mime.clone(),
            });
        }

        let questions = match self.client.complete_json(request).await {
            Ok(response) => super::strategy::questions_from_response(&response)
                .unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "supplementary extraction failed, continuing without it");
                Vec::new()
            }
        };

        questions
            .into_iter()
            .enumerate()
            .filter_map(|(i, mut q)| {
                let object = q.as_object_mut()?;
                object.insert(
                    "id".to_string(),
                    serde_json::Value::String(format!("missed_{}", i + 1)),
                );
                Some(q)
            })
            .collect()
    }
}

fn enumerate_candidates(candidates: &[serde_json::Value]) -> String {
    candidates
        .iter()
        .enumerate()
        .map(|(i, c)| format!("{}. {}", i + 1, candidate_text(c)))
        .collect::<Vec<_>>()
        .join("\n")
}

fn candidate_text(candidate: &serde_json::Value) -> &str {
    for key in ["question_text", "question", "label", "text"] {
        if let Some(text) = candidate.get(key).and_then(|v| v.as_str()) {
            return text;
        }
    }
    "Unknown question"
}
