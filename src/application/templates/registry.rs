use std::path::Path;

use crate::domain::FormStructure;

use super::record::TemplateRecord;

/// A deterministic override for known recurring, safety-critical forms:
/// incident reports, hazard checklists, and the like must produce identical
/// structures every time regardless of model variance, so a registry match
/// bypasses model-based extraction entirely.
pub struct TemplateRegistry {
    records: Vec<TemplateRecord>,
}

/// A successful detector hit, carrying the fixed field list verbatim.
#[derive(Debug, Clone)]
pub struct TemplateMatch {
    pub template_name: String,
    pub structure: FormStructure,
}

const BUILTIN_RECORDS: [&str; 3] = [
    include_str!("../../../templates/hazard_form.json"),
    include_str!("../../../templates/incident_report.json"),
    include_str!("../../../templates/access_audit_checklist.json"),
];

impl TemplateRegistry {
    pub fn new(records: Vec<TemplateRecord>) -> Self {
        Self { records }
    }

    /// The records shipped with the crate, in registration order.
    pub fn builtin() -> Result<Self, TemplateRegistryError> {
        let records = BUILTIN_RECORDS
            .iter()
            .map(|raw| serde_json::from_str(raw))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| TemplateRegistryError::InvalidRecord(e.to_string()))?;
        Ok(Self::new(records))
    }

    /// Load additional records from `*.json` files in a directory, appended
    /// after the built-in set in filename order (registration order is the
    /// documented tie-break, so it must be stable).
    pub fn load_dir(mut self, dir: &Path) -> Result<Self, TemplateRegistryError> {
        let mut paths: Vec<_> = std::fs::read_dir(dir)
            .map_err(|e| TemplateRegistryError::Io(e.to_string()))?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.extension().is_some_and(|ext| ext == "json"))
            .collect();
        paths.sort();

        for path in paths {
            let raw = std::fs::read_to_string(&path)
                .map_err(|e| TemplateRegistryError::Io(e.to_string()))?;
            let record: TemplateRecord = serde_json::from_str(&raw).map_err(|e| {
                TemplateRegistryError::InvalidRecord(format!("{}: {e}", path.display()))
            })?;
            self.records.push(record);
        }
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Filename detection. Decisive when it fires; resolved in registration
    /// order when more than one record matches.
    pub fn match_filename(&self, filename: &str) -> Option<TemplateMatch> {
        self.records
            .iter()
            .find(|record| record.matches_filename(filename))
            .map(|record| {
                tracing::info!(template = %record.name, filename, "template matched on filename");
                TemplateMatch {
                    template_name: record.name.clone(),
                    structure: FormStructure::new(record.fields.clone()),
                }
            })
    }

    /// Content detection: every record is scored by keyword density and the
    /// highest score above that record's threshold wins, ties broken by
    /// registration order.
    pub fn match_content(&self, text: &str) -> Option<TemplateMatch> {
        let lower = text.to_lowercase();

        let best = self
            .records
            .iter()
            .map(|record| (record, record.content_score(&lower)))
            .filter(|(record, score)| *score >= record.threshold && record.threshold > 0)
            // max_by_key returns the last maximum; compare strictly so the
            // first registered record wins ties.
            .fold(None::<(&TemplateRecord, usize)>, |best, (record, score)| {
                match best {
                    Some((_, best_score)) if best_score >= score => best,
                    _ => Some((record, score)),
                }
            });

        best.map(|(record, score)| {
            tracing::info!(
                template = %record.name,
                score,
                "template matched on content keyword density"
            );
            TemplateMatch {
                template_name: record.name.clone(),
                structure: FormStructure::new(record.fields.clone()),
            }
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TemplateRegistryError {
    #[error("template record invalid: {0}")]
    InvalidRecord(String),
    #[error("template directory unreadable: {0}")]
    Io(String),
}
