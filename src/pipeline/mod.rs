//! Repository run orchestration.
//!
//! A run moves through `Fetching -> Filtering -> PerFileAnalysis ->
//! Aggregating -> Done`. Only a failed listing ends in `Failed`; every
//! later failure is confined to the file or endpoint that raised it.

use std::fmt;
use std::sync::Arc;

use futures::future::join_all;
use log::{debug, error, info, warn};
use serde::Serialize;

use crate::analysis::{StructuralAnalyzer, StructuralFacts};
use crate::config::Config;
use crate::doc::DocumentationAssembler;
use crate::error::DocError;
use crate::extract::{EndpointCandidate, EndpointExtractor};
use crate::llm::TextGenerator;
use crate::model::{EndpointDocumentation, FileDocumentation, RepositoryDocumentation};
use crate::semantic::{SemanticAnalyzer, SemanticReport};
use crate::source::{ContentSource, RepoEntry, RepositoryId};
use crate::Result;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Fetching,
    Filtering,
    PerFileAnalysis,
    Aggregating,
    Done,
    Failed,
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RunState::Fetching => "fetching",
            RunState::Filtering => "filtering",
            RunState::PerFileAnalysis => "per-file analysis",
            RunState::Aggregating => "aggregating",
            RunState::Done => "done",
            RunState::Failed => "failed",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunStats {
    pub files_listed: usize,
    pub files_selected: usize,
    pub files_documented: usize,
    pub files_skipped: usize,
    pub endpoints_documented: usize,
    pub endpoints_fallback: usize,
}

#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub documentation: RepositoryDocumentation,
    pub stats: RunStats,
}

/// Candidates and semantic reports for one file, without text generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FileAnalysis {
    pub path: String,
    pub file_type: String,
    pub structure: StructuralFacts,
    pub endpoints: Vec<AnalyzedEndpoint>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalyzedEndpoint {
    #[serde(flatten)]
    pub candidate: EndpointCandidate,
    pub analysis: SemanticReport,
}

pub fn classify_file_type(path: &str) -> &'static str {
    if path.contains("/api/") {
        if path.ends_with(".spec.ts") {
            "API Specification"
        } else if path.contains("/v1/") {
            "V1 API Route"
        } else {
            "API Route"
        }
    } else if path.contains("controller") {
        "Controller"
    } else if path.contains("service") {
        "Service"
    } else {
        "API Definition"
    }
}

/// Files whose lower-cased path ends in a configured extension and
/// contains a configured route directory, in listing order, capped at
/// `max_files`.
pub fn select_files(entries: &[RepoEntry], config: &Config) -> Vec<String> {
    let extensions: Vec<String> = config
        .source_extensions
        .iter()
        .map(|e| e.to_lowercase())
        .collect();
    let directories: Vec<String> = config
        .route_directories
        .iter()
        .map(|d| d.to_lowercase())
        .collect();

    entries
        .iter()
        .filter(|entry| entry.is_file())
        .filter(|entry| {
            let path = entry.path.to_lowercase();
            extensions.iter().any(|ext| path.ends_with(ext.as_str()))
                && directories.iter().any(|dir| path.contains(dir.as_str()))
        })
        .take(config.max_files)
        .map(|entry| entry.path.clone())
        .collect()
}

/// Parses and extracts a single file; no text generation is involved.
pub fn analyze_file(path: &str, content: &str) -> Result<FileAnalysis> {
    let structure = StructuralAnalyzer::analyze_source(content)?;
    let semantic = SemanticAnalyzer::new();
    let endpoints = EndpointExtractor::new()
        .extract(content, path)
        .into_iter()
        .map(|candidate| {
            let analysis = semantic.analyze(&candidate);
            AnalyzedEndpoint {
                candidate,
                analysis,
            }
        })
        .collect();

    Ok(FileAnalysis {
        path: path.to_string(),
        file_type: classify_file_type(path).to_string(),
        structure,
        endpoints,
    })
}

pub struct DocumentationPipeline {
    source: Arc<dyn ContentSource>,
    assembler: DocumentationAssembler,
    extractor: EndpointExtractor,
    semantic: SemanticAnalyzer,
    config: Config,
    ai_powered: bool,
}

impl DocumentationPipeline {
    pub fn new(
        source: Arc<dyn ContentSource>,
        generator: Arc<dyn TextGenerator>,
        config: Config,
    ) -> Self {
        Self {
            source,
            assembler: DocumentationAssembler::new(generator, &config),
            extractor: EndpointExtractor::new(),
            semantic: SemanticAnalyzer::new(),
            ai_powered: config.has_text_generation(),
            config,
        }
    }

    /// Overrides the `aiPowered` metadata flag, e.g. for offline runs.
    pub fn with_ai_powered(mut self, ai_powered: bool) -> Self {
        self.ai_powered = ai_powered;
        self
    }

    pub async fn run(&self, repo: &RepositoryId) -> Result<RunOutcome> {
        let mut stats = RunStats::default();

        enter(repo, RunState::Fetching);
        let entries = match self.source.list_files(repo).await {
            Ok(entries) => entries,
            Err(e) => {
                enter(repo, RunState::Failed);
                error!("Listing {} failed: {}", repo, e);
                return Err(DocError::input(format!(
                    "Failed to list repository {}: {}",
                    repo, e
                )));
            }
        };
        stats.files_listed = entries.len();

        enter(repo, RunState::Filtering);
        let selected = select_files(&entries, &self.config);
        stats.files_selected = selected.len();
        info!("Found {} API-related files", selected.len());

        enter(repo, RunState::PerFileAnalysis);
        let mut files = Vec::new();
        for path in &selected {
            match self.document_file(repo, path).await {
                Ok(Some(file)) => {
                    stats.endpoints_documented += file.endpoints.len();
                    stats.endpoints_fallback +=
                        file.endpoints.iter().filter(|e| e.fallback).count();
                    files.push(file);
                }
                Ok(None) => debug!("{}: no endpoints, omitted", path),
                Err(e) => warn!("Skipping {}: {}", path, e),
            }
        }
        stats.files_documented = files.len();
        stats.files_skipped = stats.files_selected - stats.files_documented;

        enter(repo, RunState::Aggregating);
        let documentation =
            RepositoryDocumentation::new(repo.to_string(), files, self.ai_powered);

        enter(repo, RunState::Done);
        Ok(RunOutcome {
            documentation,
            stats,
        })
    }

    /// `Ok(None)` when the file has no endpoint candidates.
    pub async fn document_file(
        &self,
        repo: &RepositoryId,
        path: &str,
    ) -> Result<Option<FileDocumentation>> {
        info!("Processing file: {}", path);
        let content = self.source.read_file(repo, path).await?;
        self.document_source(path, &content).await
    }

    pub async fn document_source(
        &self,
        path: &str,
        content: &str,
    ) -> Result<Option<FileDocumentation>> {
        let analysis = StructuralAnalyzer::analyze_source(content)?;
        let candidates = self.extractor.extract(content, path);
        info!("Found {} endpoints in {}", candidates.len(), path);
        if candidates.is_empty() {
            return Ok(None);
        }

        let endpoints = join_all(
            candidates
                .iter()
                .map(|candidate| self.document_endpoint(candidate)),
        )
        .await;

        Ok(Some(FileDocumentation {
            path: path.to_string(),
            file_type: classify_file_type(path).to_string(),
            analysis,
            endpoints,
        }))
    }

    async fn document_endpoint(&self, candidate: &EndpointCandidate) -> EndpointDocumentation {
        info!("Analyzing endpoint: {}", candidate.path);
        let report = self.semantic.analyze(candidate);
        self.assembler.document(candidate, report).await
    }
}

fn enter(repo: &RepositoryId, state: RunState) {
    debug!("{}: {}", repo, state);
}
