use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static RE_PATH_PARAM: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\[(.*?)\]").unwrap());
static RE_VERSION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^v\d+$").unwrap());

const DOMAIN_STOPLIST: [&str; 4] = ["api", "admin", "v1", "index.ts"];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SemanticContext {
    pub domain: Option<String>,
    pub is_admin: bool,
    pub version: String,
    pub resource_type: String,
    pub path_params: Vec<String>,
}

/// Derives the routing context of an endpoint from its path alone.
pub fn derive_context(path: &str) -> SemanticContext {
    let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

    let path_params = RE_PATH_PARAM
        .captures_iter(path)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .collect();

    let version = segments
        .iter()
        .find(|s| RE_VERSION.is_match(s))
        .map_or_else(|| "v1".to_string(), |s| s.to_string());

    let domain = segments
        .iter()
        .find(|s| !DOMAIN_STOPLIST.contains(*s))
        .map(|s| s.to_string());

    let resource_type = segments
        .last()
        .copied()
        .map(|s| s.strip_suffix(".ts").unwrap_or(s))
        .filter(|s| !s.is_empty())
        .unwrap_or("resource")
        .to_string();

    SemanticContext {
        domain,
        is_admin: path.contains("/admin/"),
        version,
        resource_type,
        path_params,
    }
}
