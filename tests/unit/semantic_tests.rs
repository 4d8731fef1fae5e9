use routedoc::semantic::complexity::MethodMetrics;
use routedoc::semantic::{derive_context, ComplexityLevel, SecurityLevel};
use routedoc::{EndpointExtractor, HttpVerb, SemanticAnalyzer};

use crate::common::{setup_test_env, NEXT_ROUTE};

#[test]
fn test_admin_path_context() {
    setup_test_env();
    let context = derive_context("/api/v2/admin/users/[id]");
    assert_eq!(context.version, "v2");
    assert!(context.is_admin);
    assert_eq!(context.resource_type, "[id]");
    assert_eq!(context.path_params, vec!["id"]);
}

#[test]
fn test_version_segment_or_default() {
    let cases = [
        ("/api/v3/orders", "v3"),
        ("/api/orders/v10", "v10"),
        ("/api/version2/orders", "v1"),
        ("/api/v2beta", "v1"),
        ("", "v1"),
    ];
    for (path, expected) in cases {
        assert_eq!(derive_context(path).version, expected, "path {:?}", path);
    }
}

#[test]
fn test_admin_with_auth_probes_is_high() {
    let report = SemanticAnalyzer::new().analyze_source(
        "/api/admin/users",
        &[HttpVerb::Post],
        "await authenticate(req); await authorize(user);",
    );
    assert_eq!(report.analysis.security.level, SecurityLevel::High);
    assert!(report.analysis.security.requires_auth);
}

#[test]
fn test_same_probes_without_admin_are_medium() {
    let report = SemanticAnalyzer::new().analyze_source(
        "/api/users",
        &[HttpVerb::Post],
        "await authenticate(req); await authorize(user);",
    );
    assert_eq!(report.analysis.security.level, SecurityLevel::Medium);
}

#[test]
fn test_method_level_is_monotone() {
    let base = MethodMetrics {
        lines: 10,
        conditionals: 1,
        loops: 0,
        awaits: 1,
    };
    let bumps: [fn(&mut MethodMetrics); 4] = [
        |m| m.lines += 40,
        |m| m.conditionals += 2,
        |m| m.loops += 1,
        |m| m.awaits += 3,
    ];

    let mut current = base;
    for bump in bumps.iter().cycle().take(12) {
        let before = current.level();
        bump(&mut current);
        assert!(current.level() >= before);
    }
    assert_eq!(current.level(), ComplexityLevel::Complex);
}

#[test]
fn test_framework_handler_report() {
    let candidate = EndpointExtractor::new()
        .extract(NEXT_ROUTE, "app/api/orders/route.ts")
        .remove(0);
    let report = SemanticAnalyzer::new().analyze(&candidate);

    assert_eq!(report.context.resource_type, "route");
    assert!(report.analysis.patterns.asynchronous.present);
    assert!(report.analysis.security.measures.authentication);
    assert_eq!(report.analysis.functionality.method_analysis.len(), 1);
    assert_eq!(
        report.analysis.functionality.method_analysis[0].method,
        HttpVerb::Get
    );
    assert!(report
        .analysis
        .data_flow
        .async_operations
        .contains(&"database operations".to_string()));
    assert!(report.analysis.complexity.factors <= 5);
}
