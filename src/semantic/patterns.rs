use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static RE_ASYNC: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"async|await|Promise").unwrap());
static RE_EVENT_DRIVEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"emit|on\(|addEventListener").unwrap());
static RE_STREAM_PROCESSING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"pipe|stream|transform").unwrap());
static RE_ERROR_BOUNDARY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"try|catch|finally").unwrap());
static RE_VALIDATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"validate|schema|assert").unwrap());
static RE_CACHING: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"cache|memoize|store").unwrap());
static RE_MONITORING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"metrics|monitor|track").unwrap());
static RE_OPTIMIZATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"optimize|index|aggregate").unwrap());

static RE_DATA_VALIDATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"validate|sanitize|check").unwrap());
static RE_STATE_MANAGEMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"state|store|context").unwrap());
static RE_BUSINESS_LOGIC: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"calculate|process|transform").unwrap());
static RE_INTEGRATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"connect|sync|integrate").unwrap());

/// Outcome of one regex probe over a source text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatternProbe {
    pub present: bool,
    /// Non-overlapping matches.
    pub matches: usize,
}

impl PatternProbe {
    pub fn run(regex: &Regex, source: &str) -> Self {
        let matches = regex.find_iter(source).count();
        Self {
            present: matches > 0,
            matches,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CodePatterns {
    #[serde(rename = "async")]
    pub asynchronous: PatternProbe,
    pub event_driven: PatternProbe,
    pub stream_processing: PatternProbe,
    pub error_boundary: PatternProbe,
    pub validation: PatternProbe,
    pub caching: PatternProbe,
    pub monitoring: PatternProbe,
    pub optimization: PatternProbe,
}

pub fn detect_code_patterns(source: &str) -> CodePatterns {
    CodePatterns {
        asynchronous: PatternProbe::run(&RE_ASYNC, source),
        event_driven: PatternProbe::run(&RE_EVENT_DRIVEN, source),
        stream_processing: PatternProbe::run(&RE_STREAM_PROCESSING, source),
        error_boundary: PatternProbe::run(&RE_ERROR_BOUNDARY, source),
        validation: PatternProbe::run(&RE_VALIDATION, source),
        caching: PatternProbe::run(&RE_CACHING, source),
        monitoring: PatternProbe::run(&RE_MONITORING, source),
        optimization: PatternProbe::run(&RE_OPTIMIZATION, source),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionalPatterns {
    pub data_validation: bool,
    pub state_management: bool,
    pub business_logic: bool,
    pub integration: bool,
}

pub fn detect_functional_patterns(source: &str) -> FunctionalPatterns {
    FunctionalPatterns {
        data_validation: RE_DATA_VALIDATION.is_match(source),
        state_management: RE_STATE_MANAGEMENT.is_match(source),
        business_logic: RE_BUSINESS_LOGIC.is_match(source),
        integration: RE_INTEGRATION.is_match(source),
    }
}
