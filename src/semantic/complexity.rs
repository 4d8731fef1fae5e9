//! The two complexity scales: a weighted per-method score over an
//! approximate method span, and an endpoint-level factor count. They are
//! kept separate and never compared.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use super::patterns::{CodePatterns, FunctionalPatterns};
use crate::extract::HttpVerb;

// Matches `if`, `switch`, and any colon with an optional leading backslash.
static RE_CONDITIONAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"if|switch|\\?:").unwrap());
static RE_LOOP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"for|while|do").unwrap());
static RE_AWAIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"await").unwrap());
static RE_METHOD_SPANS: LazyLock<Vec<(HttpVerb, Regex)>> = LazyLock::new(|| {
    HttpVerb::ALL
        .into_iter()
        .map(|verb| {
            let pattern = format!(r"(?i){}.*?\{{([\s\S]*?)\}}", verb.lowercase());
            (verb, Regex::new(&pattern).unwrap())
        })
        .collect()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComplexityLevel {
    Simple,
    Moderate,
    Complex,
}

impl fmt::Display for ComplexityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ComplexityLevel::Simple => "simple",
            ComplexityLevel::Moderate => "moderate",
            ComplexityLevel::Complex => "complex",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodMetrics {
    pub lines: usize,
    pub conditionals: usize,
    pub loops: usize,
    pub awaits: usize,
}

impl MethodMetrics {
    pub fn measure(span: &str) -> Self {
        Self {
            lines: span.split('\n').count(),
            conditionals: RE_CONDITIONAL.find_iter(span).count(),
            loops: RE_LOOP.find_iter(span).count(),
            awaits: RE_AWAIT.find_iter(span).count(),
        }
    }

    pub fn score(&self) -> f64 {
        self.lines as f64 * 0.1
            + self.conditionals as f64 * 2.0
            + self.loops as f64 * 3.0
            + self.awaits as f64 * 1.5
    }

    pub fn level(&self) -> ComplexityLevel {
        method_level(self.score())
    }
}

pub fn method_level(score: f64) -> ComplexityLevel {
    if score < 5.0 {
        ComplexityLevel::Simple
    } else if score < 15.0 {
        ComplexityLevel::Moderate
    } else {
        ComplexityLevel::Complex
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodComplexity {
    pub method: HttpVerb,
    pub complexity: ComplexityLevel,
}

/// Text between the first case-insensitive occurrence of the verb and the
/// first `}` after the next `{`. Nested braces are not balanced, so the
/// span usually ends early; empty when nothing matches.
pub fn method_span(source: &str, verb: HttpVerb) -> String {
    RE_METHOD_SPANS
        .iter()
        .find(|(candidate, _)| *candidate == verb)
        .and_then(|(_, regex)| regex.captures(source))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

pub fn method_complexity(source: &str, verb: HttpVerb) -> MethodComplexity {
    let metrics = MethodMetrics::measure(&method_span(source, verb));
    MethodComplexity {
        method: verb,
        complexity: metrics.level(),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityAssessment {
    pub level: ComplexityLevel,
    /// In `0..=5`.
    pub factors: u8,
}

pub fn assess_complexity(
    patterns: &CodePatterns,
    functionality: &FunctionalPatterns,
) -> ComplexityAssessment {
    let factors = [
        patterns.asynchronous.present,
        patterns.event_driven.present,
        patterns.stream_processing.present,
        functionality.state_management,
        functionality.integration,
    ]
    .iter()
    .filter(|present| **present)
    .count() as u8;

    let level = match factors {
        0..=2 => ComplexityLevel::Simple,
        3..=4 => ComplexityLevel::Moderate,
        _ => ComplexityLevel::Complex,
    };

    ComplexityAssessment { level, factors }
}
