//! Request examples for curl, JavaScript and Python.
//!
//! Rendering is pure templating over the verb, the path and an
//! [`ExampleProfile`]; identical inputs always give identical strings.

use serde::{Deserialize, Serialize};
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::extract::HttpVerb;
use crate::semantic::SemanticReport;

const BASE_URL: &str = "https://api.example.com";
const CONTENT_TYPE: &str = "application/json";
const AUTHORIZATION: &str = "Bearer your-api-key";
const RATE_LIMIT_STRATEGY: &str = "adaptive";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleSet {
    pub curl: String,
    pub js: String,
    pub python: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MethodExample {
    pub method: HttpVerb,
    pub examples: ExampleSet,
}

/// The facts that shape an example.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExampleProfile {
    pub requires_auth: bool,
    pub rate_limited: bool,
    pub streaming: bool,
}

impl Default for ExampleProfile {
    /// Without analysis an authenticated, non-streaming call is assumed.
    fn default() -> Self {
        Self {
            requires_auth: true,
            rate_limited: false,
            streaming: false,
        }
    }
}

impl From<&SemanticReport> for ExampleProfile {
    fn from(report: &SemanticReport) -> Self {
        let analysis = &report.analysis;
        Self {
            requires_auth: analysis.security.requires_auth,
            rate_limited: analysis.security.measures.rate_limit,
            streaming: analysis.data_flow.is_streaming(),
        }
    }
}

#[derive(Serialize)]
struct ExampleHeaders {
    #[serde(rename = "Content-Type")]
    content_type: &'static str,
    #[serde(rename = "Authorization", skip_serializing_if = "Option::is_none")]
    authorization: Option<&'static str>,
    #[serde(
        rename = "X-Rate-Limit-Strategy",
        skip_serializing_if = "Option::is_none"
    )]
    rate_limit_strategy: Option<&'static str>,
}

impl ExampleHeaders {
    fn new(profile: &ExampleProfile) -> Self {
        Self {
            content_type: CONTENT_TYPE,
            authorization: profile.requires_auth.then_some(AUTHORIZATION),
            rate_limit_strategy: profile.rate_limited.then_some(RATE_LIMIT_STRATEGY),
        }
    }

    /// Pretty JSON with nested lines indented by `indent` spaces and the
    /// closing brace at column zero.
    fn to_json(&self, indent: usize) -> String {
        let indent = " ".repeat(indent);
        let mut out = Vec::new();
        let mut serializer =
            Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(indent.as_bytes()));
        match self.serialize(&mut serializer) {
            Ok(()) => String::from_utf8(out).unwrap_or_default(),
            Err(_) => String::from("{}"),
        }
    }
}

/// Last path segment with everything but ASCII letters removed.
fn resource_name(path: &str) -> String {
    path.rsplit('/')
        .next()
        .unwrap_or_default()
        .chars()
        .filter(|c| c.is_ascii_alphabetic())
        .collect()
}

pub fn curl_example(verb: HttpVerb, path: &str, profile: &ExampleProfile) -> String {
    let mut headers = vec![format!(r#"-H "Content-Type: {}""#, CONTENT_TYPE)];
    if profile.requires_auth {
        headers.push(format!(r#"-H "Authorization: {}""#, AUTHORIZATION));
    }
    if profile.rate_limited {
        headers.push(format!(
            r#"-H "X-Rate-Limit-Strategy: {}""#,
            RATE_LIMIT_STRATEGY
        ));
    }

    format!(
        "curl -X {verb} \\\n  \"{base}{path}\" \\\n  {headers}",
        verb = verb,
        base = BASE_URL,
        path = path,
        headers = headers.join(" \\\n  ")
    )
}

pub fn js_example(verb: HttpVerb, path: &str, profile: &ExampleProfile) -> String {
    let name = match resource_name(path) {
        name if name.is_empty() => "Resource".to_string(),
        name => name,
    };

    let body = if profile.streaming {
        format!(
            "const response = await fetch('{base}{path}');
    const reader = response.body.getReader();
    const decoder = new TextDecoder();

    while (true) {{
      const {{ done, value }} = await reader.read();
      if (done) break;
      console.log('Received:', decoder.decode(value));
    }}",
            base = BASE_URL,
            path = path
        )
    } else {
        format!(
            "const response = await fetch('{base}{path}', {{
      method: '{verb}',
      headers: {headers},
      // Add request body for POST/PUT/PATCH methods
    }});

    if (!response.ok) {{
      throw new Error(`HTTP error! status: ${{response.status}}`);
    }}

    const data = await response.json();
    console.log('Success:', data);",
            base = BASE_URL,
            path = path,
            verb = verb,
            headers = ExampleHeaders::new(profile).to_json(6)
        )
    };

    format!(
        "// Example with error handling and {streaming}data
const {method}{name} = async () => {{
  try {{
    {body}
  }} catch (error) {{
    console.error('Error:', error.message);
    // Implement appropriate error handling
  }}
}};",
        streaming = if profile.streaming { "streaming " } else { "" },
        method = verb.lowercase(),
        name = name,
        body = body
    )
}

pub fn python_example(verb: HttpVerb, path: &str, profile: &ExampleProfile) -> String {
    let name = match resource_name(path) {
        name if name.is_empty() => "resource".to_string(),
        name => name,
    };
    let headers = ExampleHeaders::new(profile).to_json(16);

    let body = if profile.streaming {
        format!(
            "with requests.get('{base}{path}',
            headers={headers},
            stream=True) as response:
            response.raise_for_status()
            for chunk in response.iter_content(chunk_size=8192):
                if chunk:
                    print('Received chunk:', len(chunk), 'bytes')",
            base = BASE_URL,
            path = path,
            headers = headers
        )
    } else {
        format!(
            "response = requests.{method}(
            '{base}{path}',
            headers={headers}
            # Add json parameter for POST/PUT/PATCH methods
        )
        response.raise_for_status()
        data = response.json()
        print('Success:', data)",
            method = verb.lowercase(),
            base = BASE_URL,
            path = path,
            headers = headers
        )
    };

    format!(
        "import requests
{import}

def {method}_{name}():
    try:
        {body}
    except requests.exceptions.RequestException as error:
        print('Error:', error)
        # Implement appropriate error handling",
        import = if profile.streaming {
            "from requests.exceptions import ChunkedEncodingError"
        } else {
            ""
        },
        method = verb.lowercase(),
        name = name,
        body = body
    )
}

pub fn render_examples(verb: HttpVerb, path: &str, profile: &ExampleProfile) -> ExampleSet {
    ExampleSet {
        curl: curl_example(verb, path, profile),
        js: js_example(verb, path, profile),
        python: python_example(verb, path, profile),
    }
}

/// One example set per verb, in the order given.
pub fn generate_examples(
    verbs: &[HttpVerb],
    path: &str,
    profile: &ExampleProfile,
) -> Vec<MethodExample> {
    verbs
        .iter()
        .map(|verb| MethodExample {
            method: *verb,
            examples: render_examples(*verb, path, profile),
        })
        .collect()
}
