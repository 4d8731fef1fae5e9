use std::fs;
use std::sync::Arc;

use routedoc::pipeline::analyze_file;
use routedoc::{Config, DocumentationPipeline, LocalSource, OfflineGenerator, RepositoryId};
use tempfile::TempDir;

use crate::common::{setup_test_env, EXPRESS_ROUTER, HELPERS, NEXT_ROUTE, PLACEHOLDERS};

fn checkout() -> TempDir {
    let dir = TempDir::new().unwrap();
    let files = [
        ("app/api/orders/route.ts", NEXT_ROUTE),
        ("src/routes/orders.ts", EXPRESS_ROUTER),
        ("src/api/helpers.ts", HELPERS),
        ("node_modules/pkg/api/index.ts", EXPRESS_ROUTER),
        ("README.md", "# shop"),
    ];
    for (path, content) in files {
        let full = dir.path().join(path);
        fs::create_dir_all(full.parent().unwrap()).unwrap();
        fs::write(full, content).unwrap();
    }
    dir
}

#[tokio::test]
async fn test_offline_run_over_checkout() {
    setup_test_env();
    let dir = checkout();
    let source = LocalSource::new(dir.path());
    let repo = RepositoryId::new("local", source.name());

    let pipeline = DocumentationPipeline::new(
        Arc::new(source),
        Arc::new(OfflineGenerator),
        Config::default(),
    );
    let outcome = pipeline.run(&repo).await.unwrap();

    let paths: Vec<&str> = outcome
        .documentation
        .files
        .iter()
        .map(|f| f.path.as_str())
        .collect();
    assert_eq!(paths, vec!["app/api/orders/route.ts", "src/routes/orders.ts"]);
    assert_eq!(outcome.stats.files_selected, 3);
    assert_eq!(outcome.stats.endpoints_documented, 3);
    assert_eq!(outcome.stats.endpoints_fallback, 3);

    for file in &outcome.documentation.files {
        for endpoint in &file.endpoints {
            assert_eq!(endpoint.record.title, "API Endpoint");
            assert_eq!(endpoint.record.documentation.overview, PLACEHOLDERS[0]);
            assert!(!endpoint.record.examples.is_empty());
            assert!(endpoint.summary.contains("## Security Profile"));
        }
    }
}

#[tokio::test]
async fn test_written_documentation_round_trips_as_json() {
    let dir = checkout();
    let source = LocalSource::new(dir.path());
    let pipeline = DocumentationPipeline::new(
        Arc::new(source),
        Arc::new(OfflineGenerator),
        Config::default(),
    );
    let outcome = pipeline.run(&RepositoryId::new("local", "shop")).await.unwrap();

    let out = dir.path().join("docs.json");
    fs::write(&out, serde_json::to_string_pretty(&outcome.documentation).unwrap()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out).unwrap()).unwrap();
    assert_eq!(value["repository"], "local/shop");
    assert_eq!(value["files"].as_array().unwrap().len(), 2);
}

#[test]
fn test_single_file_analysis() {
    let analysis = analyze_file("app/api/orders/route.ts", NEXT_ROUTE).unwrap();
    assert_eq!(analysis.file_type, "API Route");
    assert_eq!(analysis.structure.imports, vec!["next/server", "@/lib/auth"]);
    assert_eq!(analysis.endpoints.len(), 1);
    assert!(analysis.endpoints[0].analysis.analysis.security.requires_auth);

    let json = serde_json::to_value(&analysis).unwrap();
    assert_eq!(json["endpoints"][0]["type"], "Next.js API Route");
    assert!(json["structure"]["capabilities"]["database"].as_bool().unwrap());
}
