use crate::ast::{ASTNode, Callee, Function, Parameter};
use crate::error::{DocError, Result};
use crate::token::{Token, TokenKind};

const MEMBER_MODIFIERS: [&str; 10] = [
    "async",
    "static",
    "public",
    "private",
    "protected",
    "get",
    "set",
    "override",
    "abstract",
    "*",
];

/// Structural parser over the token stream.
///
/// It is not a full grammar: it tracks delimiter nesting exactly, recognises
/// the statement forms listed in [`ASTNode`], and skips everything else.
/// Unbalanced or mismatched delimiters, malformed `import`/`function`
/// headers and `try` blocks without a handler are reported as parse
/// failures.
pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if !tokens.last().map_or(false, |t| t.is(TokenKind::EOF)) {
            let position = tokens
                .last()
                .map(|t| t.position + t.value.len())
                .unwrap_or(0);
            tokens.push(Token::new(TokenKind::EOF, "", position));
        }
        Self { tokens, current: 0 }
    }

    pub fn parse(&mut self) -> Result<ASTNode> {
        let body = self.parse_sequence(None)?;
        Ok(ASTNode::Program(body))
    }

    fn parse_sequence(&mut self, closing: Option<TokenKind>) -> Result<Vec<ASTNode>> {
        let mut nodes = Vec::new();

        loop {
            let token = self.peek().clone();

            // `{ default: x, import: y }` style keys are plain tokens
            if self.peek_at(1).is(TokenKind::Colon)
                && matches!(
                    token.kind,
                    TokenKind::Import | TokenKind::Export | TokenKind::Function | TokenKind::Try
                )
            {
                self.advance();
                continue;
            }

            match token.kind {
                TokenKind::EOF => {
                    return match closing {
                        Some(kind) => Err(DocError::parse_failure(
                            token.position,
                            format!("Unexpected end of input, expected '{}'", symbol(kind)),
                        )),
                        None => Ok(nodes),
                    };
                }
                kind if kind.is_closing() => {
                    if Some(kind) == closing {
                        self.advance();
                        return Ok(nodes);
                    }
                    return Err(DocError::parse_failure(
                        token.position,
                        format!("Unexpected '{}'", token.value),
                    ));
                }
                TokenKind::Import => {
                    if let Some(node) = self.parse_import()? {
                        nodes.push(node);
                    }
                }
                TokenKind::Export => nodes.push(self.parse_export()?),
                TokenKind::Function => {
                    let is_declaration = self.at_statement_start();
                    nodes.push(self.parse_function(false, is_declaration)?);
                }
                TokenKind::Identifier
                    if token.value == "async" && self.peek_at(1).is(TokenKind::Function) =>
                {
                    let is_declaration = self.at_statement_start();
                    self.advance();
                    nodes.push(self.parse_function(true, is_declaration)?);
                }
                TokenKind::Try => nodes.push(self.parse_try()?),
                TokenKind::LeftParen => nodes.push(self.parse_parenthesized()?),
                TokenKind::LeftBrace | TokenKind::LeftBracket => {
                    self.advance();
                    let inner = self.parse_sequence(token.kind.closing_for())?;
                    nodes.push(ASTNode::Block(inner));
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    fn parse_import(&mut self) -> Result<Option<ASTNode>> {
        let start = self.advance();

        // `import(...)` and `import.meta` are expressions
        if self.check(TokenKind::LeftParen) || self.check(TokenKind::Dot) {
            return Ok(None);
        }

        loop {
            let token = self.peek().clone();
            match token.kind {
                TokenKind::String => {
                    self.advance();
                    return Ok(Some(ASTNode::Import {
                        source: token.unquoted().to_string(),
                        position: start.position,
                    }));
                }
                // `import fs = require('fs')`
                TokenKind::Equal => return Ok(None),
                TokenKind::LeftBrace => {
                    self.parse_group()?;
                }
                TokenKind::EOF | TokenKind::Semicolon | TokenKind::Import | TokenKind::Export => {
                    return Err(DocError::parse_failure(
                        start.position,
                        "Malformed import declaration: missing module specifier",
                    ))
                }
                kind if kind.is_closing() => {
                    return Err(DocError::parse_failure(
                        token.position,
                        format!("Unexpected '{}' in import declaration", token.value),
                    ))
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    fn parse_export(&mut self) -> Result<ASTNode> {
        self.advance();
        let token = self.peek().clone();

        match token.kind {
            TokenKind::Default => {
                self.advance();
                let declaration = self.parse_exported_function()?;
                Ok(ASTNode::Export {
                    declaration,
                    is_default: true,
                })
            }
            TokenKind::Const | TokenKind::Let | TokenKind::Var => {
                self.advance();
                let mut names = Vec::new();
                if self.check(TokenKind::Identifier) {
                    names.push(self.advance().value);
                }
                Ok(ASTNode::Export {
                    declaration: Some(Box::new(ASTNode::Variable { names })),
                    is_default: false,
                })
            }
            _ => {
                let declaration = self.parse_exported_function()?;
                Ok(ASTNode::Export {
                    declaration,
                    is_default: false,
                })
            }
        }
    }

    fn parse_exported_function(&mut self) -> Result<Option<Box<ASTNode>>> {
        if self.check(TokenKind::Function) {
            return Ok(Some(Box::new(self.parse_function(false, true)?)));
        }
        if self.peek().value == "async" && self.peek_at(1).is(TokenKind::Function) {
            self.advance();
            return Ok(Some(Box::new(self.parse_function(true, true)?)));
        }
        Ok(None)
    }

    fn parse_function(&mut self, is_async: bool, is_declaration: bool) -> Result<ASTNode> {
        self.expect_token(TokenKind::Function, "function")?;
        self.match_token(&[TokenKind::Star]);

        let name = if self.check(TokenKind::Identifier) {
            Some(self.advance().value)
        } else {
            None
        };

        if self.peek().value == "<" {
            self.skip_type_parameters()?;
        }
        if !self.check(TokenKind::LeftParen) {
            return Err(DocError::parse_failure(
                self.peek().position,
                "Malformed function declaration: expected '('",
            ));
        }

        let (params, defaults) = self.parse_parameters()?;

        if self.match_token(&[TokenKind::Colon]) {
            self.skip_type_annotation()?;
        }

        // Overloads and ambient declarations have no body
        let body = if self.match_token(&[TokenKind::LeftBrace]) {
            self.parse_sequence(Some(TokenKind::RightBrace))?
        } else {
            Vec::new()
        };

        Ok(ASTNode::Function(Function {
            name,
            params,
            is_async,
            is_declaration,
            defaults,
            body,
        }))
    }

    /// Type parameters: `<T extends { id: string }, U = T[]>`.
    fn skip_type_parameters(&mut self) -> Result<()> {
        let open = self.advance();
        let mut depth = 1usize;

        while depth > 0 {
            let token = self.peek().clone();
            match token.kind {
                TokenKind::LeftBrace | TokenKind::LeftBracket | TokenKind::LeftParen => {
                    self.parse_group()?;
                }
                TokenKind::EOF | TokenKind::Semicolon => {
                    return Err(DocError::parse_failure(
                        open.position,
                        "Malformed function declaration: unclosed type parameters",
                    ))
                }
                kind if kind.is_closing() => {
                    return Err(DocError::parse_failure(
                        token.position,
                        format!("Unexpected '{}' in type parameters", token.value),
                    ))
                }
                _ => {
                    match token.value.as_str() {
                        "<" => depth += 1,
                        ">" => depth -= 1,
                        _ => {}
                    }
                    self.advance();
                }
            }
        }
        Ok(())
    }

    /// Parameters plus the code nested in their default values. Defaulted,
    /// rest and destructured parameters have no simple name.
    fn parse_parameters(&mut self) -> Result<(Vec<Parameter>, Vec<ASTNode>)> {
        self.expect_token(TokenKind::LeftParen, "(")?;
        let mut params = Vec::new();
        let mut defaults = Vec::new();
        let mut current: Option<Parameter> = None;

        loop {
            let token = self.peek().clone();
            match token.kind {
                TokenKind::RightParen => {
                    self.advance();
                    params.extend(current.take());
                    return Ok((params, defaults));
                }
                TokenKind::Comma => {
                    self.advance();
                    params.extend(current.take());
                }
                TokenKind::EOF => {
                    return Err(DocError::parse_failure(
                        token.position,
                        "Unexpected end of input in parameter list",
                    ))
                }
                TokenKind::LeftBrace | TokenKind::LeftBracket => {
                    if current.is_none() {
                        current = Some(Parameter::Pattern);
                    }
                    defaults.push(ASTNode::Block(self.parse_group()?));
                }
                TokenKind::LeftParen => defaults.push(self.parse_parenthesized()?),
                kind if kind.is_closing() => {
                    return Err(DocError::parse_failure(
                        token.position,
                        format!("Unexpected '{}' in parameter list", token.value),
                    ))
                }
                TokenKind::Equal | TokenKind::Spread => {
                    current = Some(Parameter::Pattern);
                    self.advance();
                }
                TokenKind::Identifier | TokenKind::Keyword if current.is_none() => {
                    current = Some(Parameter::Named(token.value.clone()));
                    self.advance();
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    fn parse_try(&mut self) -> Result<ASTNode> {
        let start = self.advance();
        if !self.match_token(&[TokenKind::LeftBrace]) {
            return Err(DocError::parse_failure(
                start.position,
                "Expected '{' after 'try'",
            ));
        }
        let block = self.parse_sequence(Some(TokenKind::RightBrace))?;

        let mut handler = None;
        if self.match_token(&[TokenKind::Catch]) {
            let binding = if self.check(TokenKind::LeftParen) {
                self.parse_group()?
            } else {
                Vec::new()
            };
            self.expect_token(TokenKind::LeftBrace, "{")?;
            let mut nodes = self.parse_sequence(Some(TokenKind::RightBrace))?;
            if !binding.is_empty() {
                nodes.insert(0, ASTNode::Block(binding));
            }
            handler = Some(nodes);
        }

        let mut finalizer = None;
        if self.match_token(&[TokenKind::Finally]) {
            self.expect_token(TokenKind::LeftBrace, "{")?;
            finalizer = Some(self.parse_sequence(Some(TokenKind::RightBrace))?);
        }

        if handler.is_none() && finalizer.is_none() {
            return Err(DocError::parse_failure(
                start.position,
                "Missing catch or finally after try block",
            ));
        }

        Ok(ASTNode::Try {
            block,
            handler,
            finalizer,
        })
    }

    /// A `(` group: a call when it follows a callee, otherwise a plain group.
    fn parse_parenthesized(&mut self) -> Result<ASTNode> {
        let callee = self.callee_before_paren();
        let open_index = self.current;
        let open = self.advance();
        let args = self.parse_sequence(Some(TokenKind::RightParen))?;

        // `async (req) => ...` is a parameter list, not a call
        if self.check(TokenKind::Arrow) {
            return Ok(ASTNode::Block(args));
        }

        let is_method =
            matches!(callee, Some(Callee::Identifier(_))) && self.at_method_body(open_index);
        match callee {
            // Method shorthand in classes and object literals: `get(req) { ... }`
            // or `async create(dto: Dto): Promise<Item> { ... }`
            Some(Callee::Identifier(name)) if is_method => {
                let is_async = open_index
                    .checked_sub(2)
                    .map_or(false, |i| self.tokens[i].value == "async");
                self.advance();
                let body = self.parse_sequence(Some(TokenKind::RightBrace))?;
                Ok(ASTNode::Function(Function {
                    name: Some(name),
                    params: Vec::new(),
                    is_async,
                    is_declaration: false,
                    defaults: args,
                    body,
                }))
            }
            Some(callee) => Ok(ASTNode::Call {
                callee,
                args,
                position: open.position,
            }),
            None => Ok(ASTNode::Block(args)),
        }
    }

    /// Whether the cursor, just past `)`, is at a method body, possibly behind
    /// a return type. On success the cursor is left on the `{`.
    fn at_method_body(&mut self, open_index: usize) -> bool {
        if self.check(TokenKind::LeftBrace) {
            return true;
        }
        if !self.check(TokenKind::Colon) || !self.at_member_start(open_index.saturating_sub(1)) {
            return false;
        }

        let saved = self.current;
        self.advance();
        if self.skip_type_annotation().is_ok() && self.check(TokenKind::LeftBrace) {
            return true;
        }
        self.current = saved;
        false
    }

    /// Whether the token at `index` begins a class or object member, looking
    /// back over modifiers and decorators like `@Post()`.
    fn at_member_start(&self, index: usize) -> bool {
        let mut i = index;
        while let Some(prev) = i.checked_sub(1).and_then(|j| self.tokens.get(j)) {
            if MEMBER_MODIFIERS.contains(&prev.value.as_str()) {
                i -= 1;
                continue;
            }
            return matches!(
                prev.kind,
                TokenKind::LeftBrace
                    | TokenKind::RightBrace
                    | TokenKind::Semicolon
                    | TokenKind::Comma
                    | TokenKind::RightParen
            );
        }
        true
    }

    fn callee_before_paren(&self) -> Option<Callee> {
        let prev = self.previous()?;
        match prev.kind {
            TokenKind::Identifier => match self.previous_at(2).map(|t| t.kind) {
                Some(TokenKind::Dot) | Some(TokenKind::OptionalChain) => {
                    let object = self
                        .previous_at(3)
                        .filter(|t| t.is(TokenKind::Identifier) || t.value == "this")
                        .map(|t| t.value.clone());
                    Some(Callee::Member {
                        object,
                        property: prev.value.clone(),
                    })
                }
                // `new Client(...)` constructs rather than calls
                Some(TokenKind::New) => None,
                _ => Some(Callee::Identifier(prev.value.clone())),
            },
            TokenKind::RightParen | TokenKind::RightBracket => Some(Callee::Expression),
            _ => None,
        }
    }

    fn skip_type_annotation(&mut self) -> Result<()> {
        // An object type literal directly after the colon belongs to the type
        if self.check(TokenKind::LeftBrace) {
            self.parse_group()?;
        }
        let mut angle = 0usize;
        loop {
            let kind = self.peek().kind;
            match kind {
                // `Promise<{ id: string }>`
                TokenKind::LeftBrace if angle > 0 => {
                    self.parse_group()?;
                }
                TokenKind::LeftBrace | TokenKind::Semicolon | TokenKind::EOF => return Ok(()),
                TokenKind::LeftParen | TokenKind::LeftBracket => {
                    self.parse_group()?;
                }
                k if k.is_closing() => return Ok(()),
                _ => match self.advance().value.as_str() {
                    "<" => angle += 1,
                    ">" => angle = angle.saturating_sub(1),
                    _ => {}
                },
            }
        }
    }

    /// Consumes one delimited group, checking its nesting, and returns the
    /// nodes found inside it.
    fn parse_group(&mut self) -> Result<Vec<ASTNode>> {
        let open = self.advance();
        self.parse_sequence(open.kind.closing_for())
    }

    fn at_statement_start(&self) -> bool {
        match self.previous() {
            None => true,
            // A `function` keyword right after a complete expression can only
            // start a new statement
            Some(token) => {
                token.kind.ends_expression()
                    || matches!(
                        token.kind,
                        TokenKind::Semicolon
                            | TokenKind::LeftBrace
                            | TokenKind::Export
                            | TokenKind::Default
                    )
            }
        }
    }

    fn peek(&self) -> &Token {
        self.peek_at(0)
    }

    fn peek_at(&self, offset: usize) -> &Token {
        let last = self.tokens.len() - 1;
        &self.tokens[(self.current + offset).min(last)]
    }

    fn previous(&self) -> Option<&Token> {
        self.previous_at(1)
    }

    fn previous_at(&self, distance: usize) -> Option<&Token> {
        self.current
            .checked_sub(distance)
            .and_then(|i| self.tokens.get(i))
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !token.is(TokenKind::EOF) {
            self.current += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().is(kind)
    }

    fn match_token(&mut self, kinds: &[TokenKind]) -> bool {
        if kinds.contains(&self.peek().kind) {
            self.advance();
            return true;
        }
        false
    }

    fn expect_token(&mut self, kind: TokenKind, expected: &str) -> Result<Token> {
        let token = self.peek().clone();
        if token.is(kind) {
            self.advance();
            Ok(token)
        } else {
            Err(DocError::parse_failure(
                token.position,
                format!("Expected '{}', found '{}'", expected, token.value),
            ))
        }
    }
}

fn symbol(kind: TokenKind) -> &'static str {
    match kind {
        TokenKind::RightParen => ")",
        TokenKind::RightBrace => "}",
        TokenKind::RightBracket => "]",
        _ => "?",
    }
}
