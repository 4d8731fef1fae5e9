#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Delimiters
    LeftParen,
    RightParen,
    LeftBrace,
    RightBrace,
    LeftBracket,
    RightBracket,

    // Punctuation
    Comma,
    Dot,
    OptionalChain,
    Semicolon,
    Colon,
    Arrow,
    Spread,
    Equal,
    Star,
    Operator,

    // Keywords the structural parser cares about
    Import,
    Export,
    Default,
    Function,
    Try,
    Catch,
    Finally,
    Const,
    Let,
    Var,
    New,
    Keyword,

    // Literals
    Identifier,
    String,
    Template,
    Number,
    Regex,

    EOF,
}

impl TokenKind {
    /// Reserved words of the language surface we scan. Contextual words such
    /// as `async`, `from`, `get` or `type` stay identifiers.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        let kind = match word {
            "import" => TokenKind::Import,
            "export" => TokenKind::Export,
            "default" => TokenKind::Default,
            "function" => TokenKind::Function,
            "try" => TokenKind::Try,
            "catch" => TokenKind::Catch,
            "finally" => TokenKind::Finally,
            "const" => TokenKind::Const,
            "let" => TokenKind::Let,
            "var" => TokenKind::Var,
            "new" => TokenKind::New,
            "break" | "case" | "class" | "continue" | "debugger" | "delete" | "do" | "else"
            | "extends" | "for" | "if" | "in" | "instanceof" | "return" | "super" | "switch"
            | "this" | "throw" | "typeof" | "void" | "while" | "with" | "yield" | "await" => {
                TokenKind::Keyword
            }
            _ => return None,
        };
        Some(kind)
    }

    pub fn is_opening(&self) -> bool {
        matches!(
            self,
            TokenKind::LeftParen | TokenKind::LeftBrace | TokenKind::LeftBracket
        )
    }

    pub fn is_closing(&self) -> bool {
        matches!(
            self,
            TokenKind::RightParen | TokenKind::RightBrace | TokenKind::RightBracket
        )
    }

    pub fn closing_for(&self) -> Option<TokenKind> {
        match self {
            TokenKind::LeftParen => Some(TokenKind::RightParen),
            TokenKind::LeftBrace => Some(TokenKind::RightBrace),
            TokenKind::LeftBracket => Some(TokenKind::RightBracket),
            _ => None,
        }
    }

    /// Whether a `/` following this token starts a division rather than a
    /// regular expression literal.
    pub fn ends_expression(&self) -> bool {
        matches!(
            self,
            TokenKind::Identifier
                | TokenKind::Number
                | TokenKind::String
                | TokenKind::Template
                | TokenKind::Regex
                | TokenKind::RightParen
                | TokenKind::RightBracket
                | TokenKind::RightBrace
        )
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>, position: usize) -> Self {
        Self {
            kind,
            value: value.into(),
            position,
        }
    }

    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Contents of a string literal without its quotes.
    pub fn unquoted(&self) -> &str {
        match self.kind {
            TokenKind::String | TokenKind::Template if self.value.len() >= 2 => {
                &self.value[1..self.value.len() - 1]
            }
            _ => &self.value,
        }
    }
}
