//! Heuristic endpoint discovery over raw file text.

use std::fmt;
use std::str::FromStr;
use std::sync::{Arc, LazyLock};

use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::DocError;

static ROUTE_REGISTRATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\.(get|post|put|delete|patch)\s*\(\s*(['"`][^'"`]+['"`])"#).unwrap()
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum HttpVerb {
    Get,
    Post,
    Put,
    Delete,
    Patch,
}

impl HttpVerb {
    pub const ALL: [HttpVerb; 5] = [
        HttpVerb::Get,
        HttpVerb::Post,
        HttpVerb::Put,
        HttpVerb::Delete,
        HttpVerb::Patch,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HttpVerb::Get => "GET",
            HttpVerb::Post => "POST",
            HttpVerb::Put => "PUT",
            HttpVerb::Delete => "DELETE",
            HttpVerb::Patch => "PATCH",
        }
    }

    pub fn lowercase(&self) -> &'static str {
        match self {
            HttpVerb::Get => "get",
            HttpVerb::Post => "post",
            HttpVerb::Put => "put",
            HttpVerb::Delete => "delete",
            HttpVerb::Patch => "patch",
        }
    }
}

impl fmt::Display for HttpVerb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HttpVerb {
    type Err = DocError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        HttpVerb::ALL
            .into_iter()
            .find(|verb| verb.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| DocError::input(format!("Unknown HTTP method: {}", s)))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndpointType {
    /// The file itself is the route, invoked through its exported handlers.
    #[serde(rename = "Next.js API Route")]
    FrameworkHandler,
    /// An explicit `router.verb('/path', ...)` call site.
    #[serde(rename = "Express Route")]
    RouteRegistration,
}

impl EndpointType {
    pub fn label(&self) -> &'static str {
        match self {
            EndpointType::FrameworkHandler => "Next.js API Route",
            EndpointType::RouteRegistration => "Express Route",
        }
    }
}

impl fmt::Display for EndpointType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointCandidate {
    #[serde(rename = "type")]
    pub endpoint_type: EndpointType,
    pub path: String,
    /// Never empty; ordered as [`HttpVerb::ALL`] for framework handlers.
    pub verbs: Vec<HttpVerb>,
    #[serde(skip)]
    pub source_text: Arc<str>,
}

#[derive(Debug, Default)]
pub struct EndpointExtractor;

impl EndpointExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Runs both detectors over `content` and returns their candidates in
    /// scan order, framework handler first. Candidates are not de-duplicated.
    pub fn extract(&self, content: &str, file_path: &str) -> Vec<EndpointCandidate> {
        let source: Arc<str> = Arc::from(content);
        let mut candidates = Vec::new();

        if let Some(candidate) = Self::framework_handler(&source, file_path) {
            candidates.push(candidate);
        }
        candidates.extend(Self::route_registrations(&source));

        debug!("{}: {} endpoint candidate(s)", file_path, candidates.len());
        candidates
    }

    fn framework_handler(source: &Arc<str>, file_path: &str) -> Option<EndpointCandidate> {
        if !source.contains("export default") && !source.contains("export const") {
            return None;
        }

        let lowered = source.to_lowercase();
        let verbs: Vec<HttpVerb> = HttpVerb::ALL
            .into_iter()
            .filter(|verb| lowered.contains(verb.lowercase()))
            .collect();

        if verbs.is_empty() {
            return None;
        }

        Some(EndpointCandidate {
            endpoint_type: EndpointType::FrameworkHandler,
            path: file_path.to_string(),
            verbs,
            source_text: Arc::clone(source),
        })
    }

    fn route_registrations(source: &Arc<str>) -> Vec<EndpointCandidate> {
        ROUTE_REGISTRATION
            .captures_iter(source)
            .filter_map(|caps| {
                let verb = caps.get(1)?.as_str().parse::<HttpVerb>().ok()?;
                let path = caps
                    .get(2)?
                    .as_str()
                    .replace(['\'', '"', '`', ','], "")
                    .trim()
                    .to_string();
                Some(EndpointCandidate {
                    endpoint_type: EndpointType::RouteRegistration,
                    path,
                    verbs: vec![verb],
                    source_text: Arc::clone(source),
                })
            })
            .collect()
    }
}
