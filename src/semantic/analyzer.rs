use log::debug;

use super::complexity::{assess_complexity, method_complexity};
use super::context::derive_context;
use super::flow::analyze_data_flow;
use super::patterns::{detect_code_patterns, detect_functional_patterns};
use super::security::analyze_security;
use super::{EndpointAnalysis, FunctionalAnalysis, SemanticReport};
use crate::extract::{EndpointCandidate, HttpVerb};

#[derive(Debug, Default)]
pub struct SemanticAnalyzer;

impl SemanticAnalyzer {
    pub fn new() -> Self {
        Self
    }

    pub fn analyze(&self, candidate: &EndpointCandidate) -> SemanticReport {
        self.analyze_source(&candidate.path, &candidate.verbs, &candidate.source_text)
    }

    pub fn analyze_source(&self, path: &str, verbs: &[HttpVerb], source: &str) -> SemanticReport {
        let context = derive_context(path);

        let patterns = detect_code_patterns(source);
        let functionality = FunctionalAnalysis {
            patterns: detect_functional_patterns(source),
            method_analysis: verbs
                .iter()
                .map(|verb| method_complexity(source, *verb))
                .collect(),
        };
        let security = analyze_security(source, context.is_admin);
        let data_flow = analyze_data_flow(source);
        let complexity = assess_complexity(&patterns, &functionality.patterns);

        debug!(
            "{}: security {}, complexity {} ({} factors)",
            path, security.level, complexity.level, complexity.factors
        );

        SemanticReport {
            context,
            analysis: EndpointAnalysis {
                patterns,
                functionality,
                security,
                data_flow,
                complexity,
            },
        }
    }
}
