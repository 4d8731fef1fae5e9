use routedoc::lexer::Lexer;
use routedoc::token::TokenKind;
use routedoc::DocError;

use crate::common::{setup_test_env, EXPRESS_ROUTER, NEXT_ROUTE};

#[test]
fn test_fixtures_tokenize() {
    setup_test_env();
    for source in [NEXT_ROUTE, EXPRESS_ROUTER] {
        let tokens = Lexer::new(source).tokenize().unwrap();
        assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::EOF));
    }
}

#[test]
fn test_typescript_surface() {
    let source = "export async function POST(req: NextRequest): Promise<Response> { return new Response(null, { status: 204 }); }";
    let tokens = Lexer::new(source).tokenize().unwrap();
    let kinds: Vec<TokenKind> = tokens.iter().map(|t| t.kind).take(4).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Export,
            TokenKind::Identifier,
            TokenKind::Function,
            TokenKind::Identifier
        ]
    );
    assert!(tokens.iter().any(|t| t.is(TokenKind::New)));
}

#[test]
fn test_unterminated_template_is_parse_failure() {
    let err = Lexer::new("const s = `open ${value}").tokenize().unwrap_err();
    assert!(matches!(err, DocError::Parse { position: 10, .. }));
}
