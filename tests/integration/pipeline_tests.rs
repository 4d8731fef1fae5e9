use std::sync::Arc;

use routedoc::error::{ContentSourceErrorKind, ErrorKind};
use routedoc::{Config, DocumentationPipeline, EndpointType, HttpVerb, OfflineGenerator};

use crate::common::{
    pipeline, repo, setup_test_env, MockGenerator, MockSource, EXPRESS_ROUTER, FULL_PROSE,
    HELPERS, NEXT_ROUTE, PLACEHOLDERS, UNBALANCED,
};

#[tokio::test]
async fn test_documents_every_endpoint() {
    let generator = Arc::new(MockGenerator::new("Orders Listing", FULL_PROSE));
    let source = MockSource::new()
        .with_file("app/api/orders/route.ts", NEXT_ROUTE)
        .with_file("src/routes/orders.ts", EXPRESS_ROUTER);
    let outcome = pipeline(source, generator.clone()).run(&repo()).await.unwrap();

    let doc = &outcome.documentation;
    assert_eq!(doc.repository, "acme/shop");
    assert_eq!(doc.files.len(), 2);
    assert_eq!(doc.endpoint_count(), 3);
    // two completions per endpoint
    assert_eq!(generator.calls(), 6);

    let next = &doc.files[0];
    assert_eq!(next.file_type, "API Route");
    assert!(next.analysis.capabilities.authentication);
    assert_eq!(next.endpoints[0].candidate.endpoint_type, EndpointType::FrameworkHandler);
    assert_eq!(next.endpoints[0].record.title, "Orders Listing");
    assert!(!next.endpoints[0].fallback);

    let express = &doc.files[1];
    assert_eq!(express.file_type, "API Definition");
    assert_eq!(express.endpoints[1].candidate.path, "/orders/new");
    assert_eq!(express.endpoints[1].record.examples[0].method, HttpVerb::Post);
}

#[tokio::test]
async fn test_service_failure_is_confined_to_one_endpoint() {
    let generator =
        Arc::new(MockGenerator::new("Orders Listing", FULL_PROSE).failing_on("Methods: POST"));
    let source = MockSource::new().with_file("src/routes/orders.ts", EXPRESS_ROUTER);
    let outcome = pipeline(source, generator).run(&repo()).await.unwrap();

    let endpoints = &outcome.documentation.files[0].endpoints;
    assert_eq!(endpoints.len(), 2);

    let get = &endpoints[0];
    assert!(!get.fallback);
    assert_eq!(get.record.title, "Orders Listing");
    assert_eq!(
        get.record.documentation.overview,
        "Returns the orders of the current account."
    );

    let post = &endpoints[1];
    assert!(post.fallback);
    assert_eq!(post.record.title, "API Endpoint");
    let docs = &post.record.documentation;
    assert_eq!(
        [
            docs.overview.as_str(),
            docs.technical_details.as_str(),
            docs.parameters.as_str(),
            docs.response_format.as_str(),
            docs.error_handling.as_str(),
        ],
        PLACEHOLDERS
    );
    assert_eq!(post.record.examples.len(), 1);
    assert_eq!(outcome.stats.endpoints_fallback, 1);
}

#[tokio::test]
async fn test_file_without_candidates_is_omitted() {
    let source = MockSource::new()
        .with_file("src/api/helpers.ts", HELPERS)
        .with_file("src/api/orders.ts", EXPRESS_ROUTER);
    let outcome = pipeline(source, Arc::new(OfflineGenerator)).run(&repo()).await.unwrap();

    let paths: Vec<&str> = outcome
        .documentation
        .files
        .iter()
        .map(|f| f.path.as_str())
        .collect();
    assert_eq!(paths, vec!["src/api/orders.ts"]);
    assert_eq!(outcome.stats.files_skipped, 1);
}

#[tokio::test]
async fn test_parse_failure_skips_file_and_continues() {
    let source = MockSource::new()
        .with_file("src/api/a_broken.ts", UNBALANCED)
        .with_file("src/api/b_orders.ts", EXPRESS_ROUTER);
    let outcome = pipeline(source, Arc::new(OfflineGenerator)).run(&repo()).await.unwrap();

    assert_eq!(outcome.documentation.files.len(), 1);
    assert_eq!(outcome.documentation.files[0].path, "src/api/b_orders.ts");
    assert_eq!(outcome.stats.files_selected, 2);
    assert_eq!(outcome.stats.files_documented, 1);
}

#[tokio::test]
async fn test_unreadable_file_is_skipped() {
    let source = MockSource::new()
        .unreadable("src/api/gone.ts")
        .with_file("src/api/orders.ts", EXPRESS_ROUTER);
    let outcome = pipeline(source, Arc::new(OfflineGenerator)).run(&repo()).await.unwrap();
    assert_eq!(outcome.documentation.files.len(), 1);
    assert_eq!(outcome.stats.files_skipped, 1);
}

#[tokio::test]
async fn test_listing_failure_is_fatal_input_error() {
    for kind in [ContentSourceErrorKind::NotFound, ContentSourceErrorKind::RateLimited] {
        let source = MockSource::new()
            .with_file("src/api/orders.ts", EXPRESS_ROUTER)
            .failing_listing(kind);
        let err = pipeline(source, Arc::new(OfflineGenerator))
            .run(&repo())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Input);
        assert!(err.is_fatal());
        assert!(err.to_string().contains("acme/shop"));
    }
}

#[tokio::test]
async fn test_file_cap() {
    let mut source = MockSource::new();
    for i in 0..20 {
        source = source.with_file(&format!("src/routes/r{:02}.ts", i), "app.get('/ping', ok);");
    }
    let outcome = pipeline(source, Arc::new(OfflineGenerator)).run(&repo()).await.unwrap();
    assert_eq!(outcome.stats.files_listed, 20);
    assert_eq!(outcome.stats.files_selected, 15);
    assert_eq!(outcome.documentation.files.len(), 15);
    assert_eq!(outcome.documentation.files[14].path, "src/routes/r14.ts");
}

#[tokio::test]
async fn test_configured_filters() {
    setup_test_env();
    let config = Config {
        source_extensions: vec![".ts".to_string(), ".js".to_string()],
        max_files: 1,
        ..Config::default()
    };
    let source = MockSource::new()
        .with_file("lib/routes/a.js", "app.get('/a', h);")
        .with_file("lib/routes/b.js", "app.get('/b', h);");
    let pipeline = DocumentationPipeline::new(Arc::new(source), Arc::new(OfflineGenerator), config);
    let outcome = pipeline.run(&repo()).await.unwrap();
    assert_eq!(outcome.documentation.files.len(), 1);
    assert_eq!(outcome.documentation.files[0].path, "lib/routes/a.js");
}

#[tokio::test]
async fn test_endpoint_order_survives_uneven_latency() {
    let generator = Arc::new(
        MockGenerator::new("Title", FULL_PROSE).slow_on("Path: /first"),
    );
    let source = MockSource::new().with_file(
        "src/routes/mixed.ts",
        "app.get('/first', a);\napp.put('/second', b);\napp.delete('/third', c);",
    );
    let outcome = pipeline(source, generator).run(&repo()).await.unwrap();
    let paths: Vec<&str> = outcome.documentation.files[0]
        .endpoints
        .iter()
        .map(|e| e.candidate.path.as_str())
        .collect();
    assert_eq!(paths, vec!["/first", "/second", "/third"]);
}

#[tokio::test]
async fn test_serialized_record_shape() {
    let source = MockSource::new().with_file("src/api/orders.ts", EXPRESS_ROUTER);
    let outcome = pipeline(source, Arc::new(OfflineGenerator)).run(&repo()).await.unwrap();
    let json = serde_json::to_value(&outcome.documentation).unwrap();

    assert!(json["generatedAt"].is_string());
    assert_eq!(json["metadata"]["aiPowered"], false);
    let file = &json["files"][0];
    assert_eq!(file["fileType"], "API Route");
    assert!(file["analysis"]["capabilities"]["validation"].as_bool().unwrap());

    let endpoint = &file["endpoints"][0];
    assert_eq!(endpoint["type"], "Express Route");
    assert_eq!(endpoint["path"], "/orders");
    assert_eq!(endpoint["verbs"], serde_json::json!(["GET"]));
    assert_eq!(endpoint["title"], "API Endpoint");
    assert_eq!(endpoint["documentation"]["overview"], PLACEHOLDERS[0]);
    assert_eq!(endpoint["examples"][0]["method"], "GET");
    assert!(endpoint["analysis"]["context"]["version"].is_string());
    assert!(endpoint["summary"].as_str().unwrap().starts_with("# orders API"));
    assert!(endpoint.get("sourceText").is_none());
}
