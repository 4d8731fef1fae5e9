//! Per-endpoint semantic classification.
//!
//! Every probe is a pure function of the endpoint path and the owning
//! file's text; none of them can fail.

pub mod analyzer;
pub mod complexity;
pub mod context;
pub mod flow;
pub mod patterns;
pub mod security;

use serde::{Deserialize, Serialize};

pub use analyzer::SemanticAnalyzer;
pub use complexity::{ComplexityAssessment, ComplexityLevel, MethodComplexity};
pub use context::{derive_context, SemanticContext};
pub use flow::DataFlow;
pub use patterns::{CodePatterns, FunctionalPatterns, PatternProbe};
pub use security::{SecurityLevel, SecurityMeasures, SecurityProfile};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionalAnalysis {
    pub patterns: FunctionalPatterns,
    pub method_analysis: Vec<MethodComplexity>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointAnalysis {
    pub patterns: CodePatterns,
    pub functionality: FunctionalAnalysis,
    pub security: SecurityProfile,
    pub data_flow: DataFlow,
    pub complexity: ComplexityAssessment,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SemanticReport {
    pub context: SemanticContext,
    pub analysis: EndpointAnalysis,
}
