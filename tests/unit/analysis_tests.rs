use routedoc::analysis::{CapabilityFlags, FunctionSignature};
use routedoc::{DocError, StructuralAnalyzer};

use crate::common::{setup_test_env, EXPRESS_ROUTER, NEXT_ROUTE, UNBALANCED};

#[test]
fn test_next_route_facts() {
    setup_test_env();
    let facts = StructuralAnalyzer::analyze_source(NEXT_ROUTE).unwrap();
    assert_eq!(facts.imports, vec!["next/server", "@/lib/auth"]);
    assert_eq!(
        facts.capabilities,
        CapabilityFlags {
            authentication: true,
            database: true,
            error_handling: true,
            ..CapabilityFlags::default()
        }
    );
}

#[test]
fn test_member_calls_do_not_set_flags() {
    let facts = StructuralAnalyzer::analyze_source(EXPRESS_ROUTER).unwrap();
    assert!(facts.capabilities.validation);
    // Order.create(...) is a member call
    assert!(!facts.capabilities.database);
    assert!(!facts.capabilities.error_handling);
    assert!(facts.imports.is_empty());
}

#[test]
fn test_declared_functions() {
    let source = "export async function handler(req, res) {}\nfunction toDto({ id, name }) { return id; }";
    let facts = StructuralAnalyzer::analyze_source(source).unwrap();
    assert_eq!(
        facts.functions,
        vec![
            FunctionSignature {
                name: "handler".to_string(),
                params: vec!["req".to_string(), "res".to_string()],
                is_async: true,
            },
            FunctionSignature {
                name: "toDto".to_string(),
                params: vec!["unknown".to_string()],
                is_async: false,
            },
        ]
    );
    assert_eq!(facts.exports, vec!["handler"]);
}

#[test]
fn test_error_handling_follows_try() {
    let with_try = StructuralAnalyzer::analyze_source("try { run(); } finally { done(); }").unwrap();
    assert!(with_try.capabilities.error_handling);

    let without = StructuralAnalyzer::analyze_source("run(); promise.catch(report);").unwrap();
    assert!(!without.capabilities.error_handling);
}

#[test]
fn test_unbalanced_source_fails() {
    let err = StructuralAnalyzer::analyze_source(UNBALANCED).unwrap_err();
    assert!(matches!(err, DocError::Parse { .. }));
    assert!(!err.is_fatal());
}

const TYPED_ROUTES: &str = r#"
import { NextRequest, NextResponse } from 'next/server';
import { repo } from '@/lib/repo';

type Item = { id: string; name: string };

function first<T extends unknown[]>(xs: T): T[number] {
  return xs[0];
}

function pick<T extends { id: string }>(items: T[], id = defaultId()): T | undefined {
  return items.find((item) => item.id === id);
}

export function paginate(page: number, size = 20, ...filters: string[]) {
  return { page, size, filters };
}

class ItemController {
  async update(id: string, dto: Partial<Item>): Promise<Item> {
    return repo.save({ ...dto, id });
  }

  delete(id: string): void {
    repo.remove(id);
  }
}

export async function GET(req: NextRequest, fallback = () => { try { warmUp(); } catch (e) {} }) {
  const slug = `${req.nextUrl.pathname.replace(/'/g, '')}`;
  return NextResponse.json(pick(await repo.all(), slug));
}
"#;

#[test]
fn test_typescript_module_facts() {
    setup_test_env();
    let facts = StructuralAnalyzer::analyze_source(TYPED_ROUTES).unwrap();

    assert_eq!(facts.imports, vec!["next/server", "@/lib/repo"]);
    assert_eq!(facts.exports, vec!["paginate", "GET"]);

    let signatures: Vec<(&str, Vec<&str>)> = facts
        .functions
        .iter()
        .map(|f| {
            (
                f.name.as_str(),
                f.params.iter().map(String::as_str).collect(),
            )
        })
        .collect();
    assert_eq!(
        signatures,
        vec![
            ("first", vec!["xs"]),
            ("pick", vec!["items", "unknown"]),
            ("paginate", vec!["page", "unknown", "unknown"]),
            ("GET", vec!["req", "unknown"]),
        ]
    );

    // Class methods named `update`/`delete` are declarations, not calls;
    // the try/catch lives in a parameter default.
    assert_eq!(
        facts.capabilities,
        CapabilityFlags {
            error_handling: true,
            ..CapabilityFlags::default()
        }
    );
}
