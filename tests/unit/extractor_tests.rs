use routedoc::{EndpointExtractor, EndpointType, HttpVerb};

use crate::common::{setup_test_env, EXPRESS_ROUTER, HELPERS, NEXT_ROUTE};

#[test]
fn test_single_route_registration() {
    setup_test_env();
    let candidates = EndpointExtractor::new().extract("app.get('/users')", "server/routes/users.ts");
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].endpoint_type, EndpointType::RouteRegistration);
    assert_eq!(candidates[0].path, "/users");
    assert_eq!(candidates[0].verbs, vec![HttpVerb::Get]);
}

#[test]
fn test_router_registrations_in_scan_order() {
    let candidates = EndpointExtractor::new().extract(EXPRESS_ROUTER, "src/routes/orders.ts");
    let summary: Vec<(&str, Vec<HttpVerb>)> = candidates
        .iter()
        .map(|c| (c.path.as_str(), c.verbs.clone()))
        .collect();
    assert_eq!(
        summary,
        vec![
            ("/orders", vec![HttpVerb::Get]),
            ("/orders/new", vec![HttpVerb::Post])
        ]
    );
}

#[test]
fn test_framework_handler_uses_file_path() {
    let candidates = EndpointExtractor::new().extract(NEXT_ROUTE, "app/api/orders/route.ts");
    assert_eq!(candidates.len(), 1);
    assert_eq!(candidates[0].endpoint_type, EndpointType::FrameworkHandler);
    assert_eq!(candidates[0].path, "app/api/orders/route.ts");
    assert_eq!(candidates[0].verbs, vec![HttpVerb::Get]);
}

#[test]
fn test_no_signals_no_candidates() {
    assert!(EndpointExtractor::new()
        .extract(HELPERS, "src/api/helpers.ts")
        .is_empty());
}

#[test]
fn test_detectors_are_not_merged() {
    let source = "export default handler;\napp.post('/hooks', handler);";
    let candidates = EndpointExtractor::new().extract(source, "src/api/hooks.ts");
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].endpoint_type, EndpointType::FrameworkHandler);
    assert_eq!(candidates[0].verbs, vec![HttpVerb::Post]);
    assert_eq!(candidates[1].endpoint_type, EndpointType::RouteRegistration);
    assert_eq!(candidates[1].path, "/hooks");
}

#[test]
fn test_verbs_are_known_methods() {
    let source = "r.options('/a', h); r.head('/b', h); r.patch('/c', h); r.delete('/d', h);";
    let candidates = EndpointExtractor::new().extract(source, "src/routes/misc.ts");
    let verbs: Vec<HttpVerb> = candidates.iter().flat_map(|c| c.verbs.clone()).collect();
    assert_eq!(verbs, vec![HttpVerb::Patch, HttpVerb::Delete]);
    for verb in verbs {
        assert!(HttpVerb::ALL.contains(&verb));
    }
}
