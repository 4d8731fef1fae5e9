use crate::{
    token::{Token, TokenKind},
    DocError, Result,
};
use nom::{
    bytes::complete::{tag, take_until, take_while, take_while1},
    character::complete::{digit1, satisfy},
    combinator::{opt, recognize},
    sequence::{pair, tuple},
    IResult,
};

const OPERATORS: &[(&str, TokenKind)] = &[
    ("===", TokenKind::Operator),
    ("!==", TokenKind::Operator),
    ("**=", TokenKind::Operator),
    ("...", TokenKind::Spread),
    ("=>", TokenKind::Arrow),
    ("?.", TokenKind::OptionalChain),
    ("==", TokenKind::Operator),
    ("!=", TokenKind::Operator),
    ("<=", TokenKind::Operator),
    (">=", TokenKind::Operator),
    ("&&", TokenKind::Operator),
    ("||", TokenKind::Operator),
    ("??", TokenKind::Operator),
    ("++", TokenKind::Operator),
    ("--", TokenKind::Operator),
    ("+=", TokenKind::Operator),
    ("-=", TokenKind::Operator),
    ("*=", TokenKind::Operator),
    ("/=", TokenKind::Operator),
    ("%=", TokenKind::Operator),
    ("&=", TokenKind::Operator),
    ("|=", TokenKind::Operator),
    ("^=", TokenKind::Operator),
    ("**", TokenKind::Operator),
];

/// Tokenizer for JavaScript/TypeScript module text.
///
/// Comments and whitespace are dropped. String, template and regular
/// expression literals are kept whole so that delimiters inside them never
/// reach the structural parser.
pub struct Lexer<'a> {
    input: &'a str,
    position: usize,
    last_kind: Option<TokenKind>,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        let input = input.strip_prefix('\u{feff}').unwrap_or(input);
        Self {
            input,
            position: 0,
            last_kind: None,
        }
    }

    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();

        if self.input.starts_with("#!") {
            self.skip_line();
        }

        while !self.input.is_empty() {
            if self.skip_trivia()? {
                continue;
            }

            let token = self.next_token()?;
            self.last_kind = Some(token.kind);
            tokens.push(token);
        }

        tokens.push(Token::new(TokenKind::EOF, "", self.position));
        Ok(tokens)
    }

    /// Skips whitespace or one comment; `false` when neither is next.
    fn skip_trivia(&mut self) -> Result<bool> {
        let input = self.input;

        if let Ok((remaining, _)) = whitespace(input) {
            self.advance(remaining);
            return Ok(true);
        }

        if input.starts_with("//") {
            self.skip_line();
            return Ok(true);
        }

        if input.starts_with("/*") {
            return match block_comment(input) {
                Ok((remaining, _)) => {
                    self.advance(remaining);
                    Ok(true)
                }
                Err(_) => Err(DocError::parse_failure(
                    self.position,
                    "Unterminated block comment",
                )),
            };
        }

        Ok(false)
    }

    /// Length of the template literal at the cursor. Each `${ ... }`
    /// substitution is tokenized like ordinary code, so strings, regular
    /// expressions and nested templates inside it are read whole.
    fn template_len(&self) -> Result<usize> {
        let input = self.input;
        let bytes = input.as_bytes();
        let mut i = 1;
        while i < bytes.len() {
            match bytes[i] {
                b'\\' => i += 2,
                b'`' => return Ok(i + 1),
                b'$' if bytes.get(i + 1) == Some(&b'{') => {
                    i += 2;
                    let mut substitution = Lexer {
                        input: &input[i..],
                        position: self.position + i,
                        last_kind: None,
                    };
                    match substitution.substitution_len()? {
                        Some(len) => i += len,
                        None => break,
                    }
                }
                _ => i += 1,
            }
        }
        Err(DocError::parse_failure(
            self.position,
            "Unterminated template literal",
        ))
    }

    /// Bytes up to and including the `}` closing a substitution; `None` when
    /// the input ends first.
    fn substitution_len(&mut self) -> Result<Option<usize>> {
        let total = self.input.len();
        let mut depth = 0usize;

        while !self.input.is_empty() {
            if self.skip_trivia()? {
                continue;
            }

            let token = self.next_token()?;
            match token.kind {
                TokenKind::LeftBrace => depth += 1,
                TokenKind::RightBrace if depth == 0 => return Ok(Some(total - self.input.len())),
                TokenKind::RightBrace => depth -= 1,
                _ => {}
            }
            self.last_kind = Some(token.kind);
        }
        Ok(None)
    }

    fn next_token(&mut self) -> Result<Token> {
        let input = self.input;

        // Keywords and identifiers
        if let Ok((remaining, ident)) = identifier(input) {
            // Property names after `.`/`?.` are never keywords: `promise.catch(...)`.
            let after_dot = matches!(
                self.last_kind,
                Some(TokenKind::Dot) | Some(TokenKind::OptionalChain)
            );
            let kind = match TokenKind::keyword(ident) {
                Some(kind) if !after_dot => kind,
                _ => TokenKind::Identifier,
            };
            return Ok(self.emit(kind, remaining));
        }

        // Numbers
        if let Ok((remaining, _)) = number(input) {
            return Ok(self.emit(TokenKind::Number, remaining));
        }

        let first = match input.chars().next() {
            Some(ch) => ch,
            None => return Ok(Token::new(TokenKind::EOF, "", self.position)),
        };

        match first {
            '\'' | '"' => {
                let len = quoted_len(input).ok_or_else(|| {
                    DocError::parse_failure(self.position, "Unterminated string literal")
                })?;
                return Ok(self.emit(TokenKind::String, &input[len..]));
            }
            '`' => {
                let len = self.template_len()?;
                return Ok(self.emit(TokenKind::Template, &input[len..]));
            }
            '/' if !self.last_kind.map_or(false, |kind| kind.ends_expression()) => {
                let len = regex_len(input).ok_or_else(|| {
                    DocError::parse_failure(self.position, "Unterminated regular expression")
                })?;
                return Ok(self.emit(TokenKind::Regex, &input[len..]));
            }
            _ => {}
        }

        // Operators and symbols
        for (op, kind) in OPERATORS {
            if input.starts_with(op) {
                return Ok(self.emit(*kind, &input[op.len()..]));
            }
        }

        let kind = match first {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            ',' => TokenKind::Comma,
            '.' => TokenKind::Dot,
            ';' => TokenKind::Semicolon,
            ':' => TokenKind::Colon,
            '=' => TokenKind::Equal,
            '*' => TokenKind::Star,
            '+' | '-' | '/' | '%' | '<' | '>' | '!' | '&' | '|' | '^' | '~' | '?' | '@' | '#' => {
                TokenKind::Operator
            }
            _ => {
                return Err(DocError::parse_failure(
                    self.position,
                    format!("Unexpected character: {}", first),
                ))
            }
        };

        Ok(self.emit(kind, &input[first.len_utf8()..]))
    }

    fn emit(&mut self, kind: TokenKind, remaining: &'a str) -> Token {
        let consumed = self.input.len() - remaining.len();
        let token = Token::new(kind, &self.input[..consumed], self.position);
        self.advance(remaining);
        token
    }

    fn skip_line(&mut self) {
        let input = self.input;
        let end = input.find('\n').unwrap_or(input.len());
        self.advance(&input[end..]);
    }

    fn advance(&mut self, remaining: &'a str) {
        let consumed = self.input.len() - remaining.len();
        self.position += consumed;
        self.input = remaining;
    }
}

fn whitespace(input: &str) -> IResult<&str, &str> {
    take_while1(char::is_whitespace)(input)
}

fn block_comment(input: &str) -> IResult<&str, (&str, &str, &str)> {
    tuple((tag("/*"), take_until("*/"), tag("*/")))(input)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(tuple((
        opt(tag("#")),
        satisfy(|c: char| c.is_alphabetic() || c == '_' || c == '$'),
        take_while(|c: char| c.is_alphanumeric() || c == '_' || c == '$'),
    )))(input)
}

fn number(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        digit1,
        take_while(|c: char| c.is_ascii_alphanumeric() || c == '.' || c == '_'),
    ))(input)
}

// The scanners below walk bytes: every delimiter they look for is ASCII and
// UTF-8 continuation bytes never collide with ASCII, so multi-byte text
// inside literals passes through untouched.

/// Length of a single- or double-quoted string literal, closing quote included.
fn quoted_len(input: &str) -> Option<usize> {
    let bytes = input.as_bytes();
    let quote = *bytes.first()?;
    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 2,
            b'\n' => return None,
            b if b == quote => return Some(i + 1),
            _ => i += 1,
        }
    }
    None
}

/// Length of a regular expression literal including its flags.
fn regex_len(input: &str) -> Option<usize> {
    let bytes = input.as_bytes();
    let mut in_class = false;
    let mut i = 1;
    while i < bytes.len() {
        match bytes[i] {
            b'\\' => i += 1,
            b'\n' => return None,
            b'[' => in_class = true,
            b']' => in_class = false,
            b'/' if !in_class => {
                i += 1;
                while i < bytes.len() && bytes[i].is_ascii_alphabetic() {
                    i += 1;
                }
                return Some(i);
            }
            _ => {}
        }
        i += 1;
    }
    None
}
