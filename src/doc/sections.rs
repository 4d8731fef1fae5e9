//! Splitting generated prose into the five documentation sections.

use std::sync::LazyLock;

use log::{debug, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SectionKey {
    Overview,
    TechnicalDetails,
    Parameters,
    ResponseFormat,
    ErrorHandling,
}

impl SectionKey {
    pub const ALL: [SectionKey; 5] = [
        SectionKey::Overview,
        SectionKey::TechnicalDetails,
        SectionKey::Parameters,
        SectionKey::ResponseFormat,
        SectionKey::ErrorHandling,
    ];

    pub fn field_name(&self) -> &'static str {
        match self {
            SectionKey::Overview => "overview",
            SectionKey::TechnicalDetails => "technicalDetails",
            SectionKey::Parameters => "parameters",
            SectionKey::ResponseFormat => "responseFormat",
            SectionKey::ErrorHandling => "errorHandling",
        }
    }

    pub fn placeholder(&self) -> &'static str {
        match self {
            SectionKey::Overview => "Documentation generation in progress.",
            SectionKey::TechnicalDetails => "Technical details are being processed.",
            SectionKey::Parameters => "Parameter documentation is being generated.",
            SectionKey::ResponseFormat => "Response format documentation is being prepared.",
            SectionKey::ErrorHandling => "Error handling documentation is being created.",
        }
    }

    fn keyword(&self) -> &'static str {
        match self {
            SectionKey::Overview => r"OVERVIEW",
            SectionKey::TechnicalDetails => r"TECHNICAL\s+DETAILS",
            SectionKey::Parameters => r"PARAMETERS",
            SectionKey::ResponseFormat => r"RESPONSE\s+FORMAT",
            SectionKey::ErrorHandling => r"ERROR\s+HANDLING",
        }
    }

    /// Accepted header forms, all case-insensitive:
    /// `**OVERVIEW:**`, `**1. OVERVIEW SECTION**`, `OVERVIEW SECTION:` or
    /// `2. Technical Details:` at a line start, and markdown headings such
    /// as `## Parameters`.
    fn header_regex(&self) -> Regex {
        let key = self.keyword();
        let pattern = format!(
            r"(?im)\*\*[ \t]*(?:\d+\.[ \t]*)?{key}(?:\s+SECTION)?[ \t]*:?[ \t]*\*\*:?|^[ \t]*(?:#+[ \t]*)?(?:\d+\.[ \t]*)?{key}(?:\s+SECTION)?[ \t]*:|^[ \t]*#+[ \t]*(?:\d+\.[ \t]*)?{key}(?:\s+SECTION)?[ \t]*\r?$",
            key = key
        );
        Regex::new(&pattern).unwrap()
    }
}

static HEADERS: LazyLock<Vec<(SectionKey, Regex)>> = LazyLock::new(|| {
    SectionKey::ALL
        .into_iter()
        .map(|key| (key, key.header_regex()))
        .collect()
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentationSections {
    pub overview: String,
    pub technical_details: String,
    pub parameters: String,
    pub response_format: String,
    pub error_handling: String,
}

impl DocumentationSections {
    pub fn placeholders() -> Self {
        let mut sections = Self {
            overview: String::new(),
            technical_details: String::new(),
            parameters: String::new(),
            response_format: String::new(),
            error_handling: String::new(),
        };
        for key in SectionKey::ALL {
            *sections.field_mut(key) = key.placeholder().to_string();
        }
        sections
    }

    pub fn get(&self, key: SectionKey) -> &str {
        match key {
            SectionKey::Overview => &self.overview,
            SectionKey::TechnicalDetails => &self.technical_details,
            SectionKey::Parameters => &self.parameters,
            SectionKey::ResponseFormat => &self.response_format,
            SectionKey::ErrorHandling => &self.error_handling,
        }
    }

    fn field_mut(&mut self, key: SectionKey) -> &mut String {
        match key {
            SectionKey::Overview => &mut self.overview,
            SectionKey::TechnicalDetails => &mut self.technical_details,
            SectionKey::Parameters => &mut self.parameters,
            SectionKey::ResponseFormat => &mut self.response_format,
            SectionKey::ErrorHandling => &mut self.error_handling,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedSections {
    /// Every field is non-empty; missing ones hold their placeholder.
    pub sections: DocumentationSections,
    pub missing: Vec<SectionKey>,
}

impl ParsedSections {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

struct Header {
    key: SectionKey,
    start: usize,
    end: usize,
}

/// Splits `response` at recognised section headers. A section runs from
/// the end of its header to the start of the next header of any kind; the
/// first header for a key wins.
pub fn parse_sections(response: &str) -> ParsedSections {
    let mut headers: Vec<Header> = HEADERS
        .iter()
        .flat_map(|(key, regex)| {
            regex.find_iter(response).map(move |m| Header {
                key: *key,
                start: m.start(),
                end: m.end(),
            })
        })
        .collect();
    headers.sort_by_key(|h| h.start);

    let mut sections = DocumentationSections::placeholders();
    let mut missing = Vec::new();

    for key in SectionKey::ALL {
        let content = headers
            .iter()
            .position(|h| h.key == key)
            .map(|index| {
                let end = headers
                    .get(index + 1)
                    .map_or(response.len(), |next| next.start);
                let start = headers[index].end.min(end);
                response[start..end].trim()
            })
            .filter(|content| !content.is_empty());

        match content {
            Some(content) => *sections.field_mut(key) = content.to_string(),
            None => missing.push(key),
        }
    }

    if !missing.is_empty() {
        let names: Vec<&str> = missing.iter().map(|k| k.field_name()).collect();
        warn!("Empty sections after parsing: {:?}", names);
        debug!("Original response: {}", response);
    }

    ParsedSections { sections, missing }
}
