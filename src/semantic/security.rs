use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static RE_AUTHENTICATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"authenticate|login|session").unwrap());
static RE_AUTHORIZATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"authorize|permission|role").unwrap());
static RE_ENCRYPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"encrypt|cipher|hash").unwrap());
static RE_SANITIZATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"sanitize|escape|clean").unwrap());
static RE_RATE_LIMIT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"rate|throttle|limit").unwrap());
static RE_REQUIRES_AUTH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"auth|login|session").unwrap());

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityLevel {
    Basic,
    Medium,
    High,
}

impl SecurityLevel {
    /// Thresholds on the 0..=8 weighted score.
    pub fn from_score(score: u8) -> Self {
        if score >= 6 {
            SecurityLevel::High
        } else if score >= 3 {
            SecurityLevel::Medium
        } else {
            SecurityLevel::Basic
        }
    }
}

impl fmt::Display for SecurityLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SecurityLevel::Basic => "basic",
            SecurityLevel::Medium => "medium",
            SecurityLevel::High => "high",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityMeasures {
    pub authentication: bool,
    pub authorization: bool,
    pub encryption: bool,
    pub sanitization: bool,
    pub rate_limit: bool,
}

impl SecurityMeasures {
    pub fn detect(source: &str) -> Self {
        Self {
            authentication: RE_AUTHENTICATION.is_match(source),
            authorization: RE_AUTHORIZATION.is_match(source),
            encryption: RE_ENCRYPTION.is_match(source),
            sanitization: RE_SANITIZATION.is_match(source),
            rate_limit: RE_RATE_LIMIT.is_match(source),
        }
    }

    /// Names of the detected measures, in declaration order.
    pub fn implemented(&self) -> Vec<&'static str> {
        [
            ("authentication", self.authentication),
            ("authorization", self.authorization),
            ("encryption", self.encryption),
            ("sanitization", self.sanitization),
            ("rateLimit", self.rate_limit),
        ]
        .into_iter()
        .filter_map(|(name, present)| present.then_some(name))
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityProfile {
    pub measures: SecurityMeasures,
    pub requires_auth: bool,
    pub level: SecurityLevel,
}

impl SecurityProfile {
    /// The profile assumed for callers that have no analysis at hand: an
    /// authenticated endpoint without rate limiting.
    pub fn assumed() -> Self {
        Self {
            measures: SecurityMeasures::default(),
            requires_auth: true,
            level: SecurityLevel::Basic,
        }
    }
}

/// Weighted score: admin and the authentication and authorization probes
/// count 2 each, encryption and sanitization 1 each.
pub fn security_score(measures: &SecurityMeasures, is_admin: bool) -> u8 {
    let weighted: [(bool, u8); 5] = [
        (is_admin, 2),
        (measures.authentication, 2),
        (measures.authorization, 2),
        (measures.encryption, 1),
        (measures.sanitization, 1),
    ];
    weighted
        .iter()
        .filter(|(present, _)| *present)
        .map(|(_, weight)| weight)
        .sum()
}

pub fn analyze_security(source: &str, is_admin: bool) -> SecurityProfile {
    let measures = SecurityMeasures::detect(source);
    SecurityProfile {
        measures,
        requires_auth: is_admin || RE_REQUIRES_AUTH.is_match(source),
        level: SecurityLevel::from_score(security_score(&measures, is_admin)),
    }
}
