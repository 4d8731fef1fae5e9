//! Output records produced by a documentation run.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analysis::StructuralFacts;
use crate::doc::{DocumentationSections, MethodExample};
use crate::extract::EndpointCandidate;
use crate::semantic::SemanticReport;

pub const FALLBACK_TITLE: &str = "API Endpoint";

/// Title, prose and examples for one endpoint candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocumentationRecord {
    pub title: String,
    pub documentation: DocumentationSections,
    pub examples: Vec<MethodExample>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointDocumentation {
    #[serde(flatten)]
    pub candidate: EndpointCandidate,
    #[serde(flatten)]
    pub record: DocumentationRecord,
    pub analysis: SemanticReport,
    pub summary: String,
    /// True when the prose is placeholder text.
    pub fallback: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileDocumentation {
    pub path: String,
    pub file_type: String,
    pub analysis: StructuralFacts,
    pub endpoints: Vec<EndpointDocumentation>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    pub generated_at: DateTime<Utc>,
    pub version: String,
    pub ai_powered: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RepositoryDocumentation {
    pub repository: String,
    pub files: Vec<FileDocumentation>,
    pub generated_at: DateTime<Utc>,
    pub metadata: Metadata,
}

impl RepositoryDocumentation {
    pub fn new(repository: impl Into<String>, files: Vec<FileDocumentation>, ai_powered: bool) -> Self {
        let generated_at = Utc::now();
        Self {
            repository: repository.into(),
            files,
            generated_at,
            metadata: Metadata {
                generated_at,
                version: env!("CARGO_PKG_VERSION").to_string(),
                ai_powered,
            },
        }
    }

    pub fn endpoint_count(&self) -> usize {
        self.files.iter().map(|f| f.endpoints.len()).sum()
    }
}
