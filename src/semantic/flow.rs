use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static RE_INPUT_STREAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"readStream|createReadStream").unwrap());
static RE_OUTPUT_STREAM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"writeStream|createWriteStream").unwrap());

static RE_MAP: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"map\(").unwrap());
static RE_FILTER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"filter\(").unwrap());
static RE_REDUCE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"reduce\(").unwrap());
static RE_SORT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"sort\(").unwrap());

static RE_FETCH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"fetch\(").unwrap());
static RE_DATABASE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"query|findBy").unwrap());
static RE_CACHE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"cache").unwrap());

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataFlow {
    pub has_input_stream: bool,
    pub has_output_stream: bool,
    pub data_transformations: Vec<String>,
    pub async_operations: Vec<String>,
}

impl DataFlow {
    pub fn is_streaming(&self) -> bool {
        self.has_input_stream || self.has_output_stream
    }
}

fn labels(source: &str, probes: &[(&LazyLock<Regex>, &str)]) -> Vec<String> {
    probes
        .iter()
        .filter(|(regex, _)| regex.is_match(source))
        .map(|(_, label)| label.to_string())
        .collect()
}

pub fn analyze_data_flow(source: &str) -> DataFlow {
    DataFlow {
        has_input_stream: RE_INPUT_STREAM.is_match(source),
        has_output_stream: RE_OUTPUT_STREAM.is_match(source),
        data_transformations: labels(
            source,
            &[
                (&RE_MAP, "mapping"),
                (&RE_FILTER, "filtering"),
                (&RE_REDUCE, "reduction"),
                (&RE_SORT, "sorting"),
            ],
        ),
        async_operations: labels(
            source,
            &[
                (&RE_FETCH, "external API calls"),
                (&RE_DATABASE, "database operations"),
                (&RE_CACHE, "cache operations"),
            ],
        ),
    }
}
