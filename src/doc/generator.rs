use std::sync::Arc;

use log::{debug, warn};

use super::examples::{generate_examples, ExampleProfile};
use super::sections::{parse_sections, DocumentationSections};
use super::summary::render_summary;
use crate::config::{CompletionSettings, Config};
use crate::extract::EndpointCandidate;
use crate::llm::{CompletionRequest, TextGenerator};
use crate::model::{DocumentationRecord, EndpointDocumentation, FALLBACK_TITLE};
use crate::semantic::SemanticReport;

const TITLE_SYSTEM_PROMPT: &str = "You are an expert at creating clear API endpoint titles. Return only the title text, without quotes or extra formatting.";

const DOCUMENTATION_SYSTEM_PROMPT: &str = "You are an expert technical writer who specializes in clear, detailed API documentation. Write naturally and conversationally, avoiding bullet points or technical formatting.";

/// Title and prose for one endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedProse {
    pub title: String,
    pub sections: DocumentationSections,
    /// True when the prose call failed or returned nothing.
    pub fallback: bool,
}

/// Builds endpoint documentation from generated prose, examples and the
/// offline summary. Generation failures degrade to placeholder text and
/// never drop the endpoint.
pub struct DocumentationAssembler {
    generator: Arc<dyn TextGenerator>,
    title_settings: CompletionSettings,
    analysis_settings: CompletionSettings,
}

impl DocumentationAssembler {
    pub fn new(generator: Arc<dyn TextGenerator>, config: &Config) -> Self {
        Self {
            generator,
            title_settings: config.title,
            analysis_settings: config.analysis,
        }
    }

    pub async fn document(
        &self,
        candidate: &EndpointCandidate,
        report: SemanticReport,
    ) -> EndpointDocumentation {
        let prose = self.generate_prose(candidate).await;
        let examples = generate_examples(
            &candidate.verbs,
            &candidate.path,
            &ExampleProfile::from(&report),
        );
        let summary = render_summary(&report);

        EndpointDocumentation {
            candidate: candidate.clone(),
            record: DocumentationRecord {
                title: prose.title,
                documentation: prose.sections,
                examples,
            },
            analysis: report,
            summary,
            fallback: prose.fallback,
        }
    }

    pub async fn generate_prose(&self, candidate: &EndpointCandidate) -> GeneratedProse {
        let title_request = CompletionRequest::new(
            title_prompt(candidate),
            TITLE_SYSTEM_PROMPT,
            self.title_settings,
        );
        let title = match self.generator.complete(&title_request).await {
            Ok(raw) => clean_title(&raw),
            Err(e) => {
                warn!("Title generation failed for {}: {}", candidate.path, e);
                FALLBACK_TITLE.to_string()
            }
        };

        let analysis_request = CompletionRequest::new(
            documentation_prompt(candidate),
            DOCUMENTATION_SYSTEM_PROMPT,
            self.analysis_settings,
        );
        match self.generator.complete(&analysis_request).await {
            Ok(text) if !text.trim().is_empty() => {
                let parsed = parse_sections(&text);
                debug!(
                    "{}: {} of 5 sections parsed",
                    candidate.path,
                    5 - parsed.missing.len()
                );
                GeneratedProse {
                    title,
                    sections: parsed.sections,
                    fallback: false,
                }
            }
            outcome => {
                match outcome {
                    Err(e) => warn!("Documentation generation failed for {}: {}", candidate.path, e),
                    Ok(_) => warn!("Documentation generation returned no text for {}", candidate.path),
                }
                GeneratedProse {
                    title: FALLBACK_TITLE.to_string(),
                    sections: DocumentationSections::placeholders(),
                    fallback: true,
                }
            }
        }
    }
}

/// Strips surrounding whitespace and quote characters; empty titles fall
/// back to the default.
pub fn clean_title(raw: &str) -> String {
    let title = raw
        .trim()
        .trim_matches(|c| matches!(c, '"' | '\'' | '`'))
        .trim();
    if title.is_empty() {
        FALLBACK_TITLE.to_string()
    } else {
        title.to_string()
    }
}

fn endpoint_information(candidate: &EndpointCandidate) -> String {
    let methods: Vec<&str> = candidate.verbs.iter().map(|v| v.as_str()).collect();
    format!(
        "Endpoint Information:\nType: {}\nPath: {}\nMethods: {}\n\nSource Code:\n{}",
        candidate.endpoint_type,
        candidate.path,
        methods.join(", "),
        candidate.source_text
    )
}

pub fn title_prompt(candidate: &EndpointCandidate) -> String {
    format!(
        "Create a clear title (3-5 words) for this API endpoint that explains its main purpose. Do not use quotes in your response.

{}

Example style titles (return similar format without quotes):
Fetch Task Breakdown Data
Ticket Context Analysis
Text Analysis Processor",
        endpoint_information(candidate)
    )
}

pub fn documentation_prompt(candidate: &EndpointCandidate) -> String {
    format!(
        "Analyze this API endpoint and provide detailed documentation in natural, flowing paragraphs.

{}

Please write detailed paragraphs for each section:

1. OVERVIEW SECTION:
Write 2-3 clear paragraphs explaining what this endpoint does, its main purpose, and how it fits into the overall API. Focus on the business value and use cases.

2. TECHNICAL DETAILS SECTION:
Write a comprehensive paragraph about the technical implementation, including HTTP methods, authentication requirements, and any special considerations.

3. PARAMETERS SECTION:
Write detailed paragraphs explaining each parameter, including data types and validation rules.

4. RESPONSE FORMAT SECTION:
Write a thorough explanation of the response structure as a paragraph.

5. ERROR HANDLING SECTION:
Write detailed paragraphs explaining possible error scenarios and how to handle them.",
        endpoint_information(candidate)
    )
}
