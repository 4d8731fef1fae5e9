use routedoc::doc::{
    clean_title, generate_examples, parse_sections, DocumentationSections, ExampleProfile,
    SectionKey,
};
use routedoc::{EndpointExtractor, HttpVerb, SemanticAnalyzer};

use crate::common::{setup_test_env, FULL_PROSE, NEXT_ROUTE, PLACEHOLDERS};

#[test]
fn test_full_prose_parses_into_five_sections() {
    setup_test_env();
    let parsed = parse_sections(FULL_PROSE);
    assert!(parsed.is_complete());
    assert_eq!(
        parsed.sections.overview,
        "Returns the orders of the current account."
    );
    assert_eq!(
        parsed.sections.error_handling,
        "Responds with 500 when the query fails."
    );
}

#[test]
fn test_empty_response_gives_non_empty_fields() {
    let parsed = parse_sections("");
    for (key, placeholder) in SectionKey::ALL.iter().zip(PLACEHOLDERS) {
        assert_eq!(parsed.sections.get(*key), placeholder);
    }
    assert_eq!(parsed.sections, DocumentationSections::placeholders());
}

#[test]
fn test_serialized_section_names() {
    let json = serde_json::to_value(DocumentationSections::placeholders()).unwrap();
    let object = json.as_object().unwrap();
    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        vec![
            "errorHandling",
            "overview",
            "parameters",
            "responseFormat",
            "technicalDetails"
        ]
    );
}

#[test]
fn test_titles_lose_quotes() {
    assert_eq!(clean_title("\"Fetch Order List\""), "Fetch Order List");
    assert_eq!(clean_title(""), "API Endpoint");
}

#[test]
fn test_examples_follow_security_profile() {
    let candidate = EndpointExtractor::new()
        .extract(NEXT_ROUTE, "app/api/orders/route.ts")
        .remove(0);
    let report = SemanticAnalyzer::new().analyze(&candidate);
    let profile = ExampleProfile::from(&report);
    assert!(profile.requires_auth);

    let examples = generate_examples(&candidate.verbs, "/api/orders", &profile);
    assert_eq!(examples.len(), 1);
    assert_eq!(examples[0].method, HttpVerb::Get);
    assert!(examples[0]
        .examples
        .curl
        .contains("-H \"Authorization: Bearer your-api-key\""));
    assert!(examples[0].examples.python.contains("def get_orders():"));
}

#[test]
fn test_examples_are_idempotent() {
    let profile = ExampleProfile {
        requires_auth: true,
        rate_limited: true,
        streaming: true,
    };
    let verbs = [HttpVerb::Put, HttpVerb::Patch];
    assert_eq!(
        generate_examples(&verbs, "/api/items", &profile),
        generate_examples(&verbs, "/api/items", &profile)
    );
}
