pub use crate::analysis::{StructuralAnalyzer, StructuralFacts};
pub use crate::config::Config;
pub use crate::doc::{DocumentationAssembler, DocumentationSections, MethodExample};
pub use crate::extract::{EndpointCandidate, EndpointExtractor, EndpointType, HttpVerb};
pub use crate::llm::{CompletionRequest, OfflineGenerator, OpenAiClient, TextGenerator};
pub use crate::model::{
    DocumentationRecord, EndpointDocumentation, FileDocumentation, RepositoryDocumentation,
};
pub use crate::pipeline::{DocumentationPipeline, RunOutcome, RunStats};
pub use crate::semantic::{SemanticAnalyzer, SemanticReport};
pub use crate::source::{ContentSource, GitHubSource, LocalSource, RepoEntry, RepositoryId};
