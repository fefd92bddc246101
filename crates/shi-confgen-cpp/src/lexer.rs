//! Tokenizer for C++ header text.
//!
//! Only produces what the declaration scanner needs: identifiers, numbers,
//! literals, `::` and single punctuation characters. Comments and
//! preprocessor lines never reach the scanner.

use crate::SyntaxError;

/// Kind of a lexed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TokenKind {
    /// Identifier or keyword.
    Ident(String),

    /// Numeric literal as written, suffix included.
    Number(String),

    /// String literal as written, prefix and quotes included.
    Str(String),

    /// Character literal as written, quotes included.
    Char(String),

    /// `::`
    Scope,

    /// Any other single character.
    Punct(char),
}

/// A token with the 1-based line it starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub line: usize,
}

impl Token {
    pub fn is_ident(&self, name: &str) -> bool {
        matches!(&self.kind, TokenKind::Ident(ident) if ident == name)
    }

    pub fn is_punct(&self, c: char) -> bool {
        self.kind == TokenKind::Punct(c)
    }

    pub fn ident(&self) -> Option<&str> {
        match &self.kind {
            TokenKind::Ident(ident) => Some(ident),
            _ => None,
        }
    }

    /// Text of the token as it appears in source.
    pub fn text(&self) -> String {
        match &self.kind {
            TokenKind::Ident(s) | TokenKind::Number(s) | TokenKind::Str(s) | TokenKind::Char(s) => {
                s.clone()
            }
            TokenKind::Scope => "::".to_string(),
            TokenKind::Punct(c) => c.to_string(),
        }
    }

    /// Identifiers and literals, which need a space between them when joined.
    pub fn is_word(&self) -> bool {
        !matches!(self.kind, TokenKind::Scope | TokenKind::Punct(_))
    }
}

/// Encoding prefixes that may precede a string literal.
const STRING_PREFIXES: &[&str] = &["L", "u", "U", "u8", "R", "LR", "uR", "UR", "u8R"];

/// Split `source` into tokens.
pub(crate) fn tokenize(source: &str) -> Result<Vec<Token>, SyntaxError> {
    Lexer::new(source).run()
}

struct Lexer {
    chars: Vec<char>,
    pos: usize,
    line: usize,
    at_line_start: bool,
    tokens: Vec<Token>,
}

impl Lexer {
    fn new(source: &str) -> Self {
        Self {
            chars: source.chars().collect(),
            pos: 0,
            line: 1,
            at_line_start: true,
            tokens: Vec::new(),
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += 1;
        if c == '\n' {
            self.line += 1;
        }
        Some(c)
    }

    fn push(&mut self, kind: TokenKind, line: usize) {
        self.tokens.push(Token { kind, line });
        self.at_line_start = false;
    }

    fn run(mut self) -> Result<Vec<Token>, SyntaxError> {
        while let Some(c) = self.peek() {
            match c {
                '\n' => {
                    self.bump();
                    self.at_line_start = true;
                }
                c if c.is_whitespace() => {
                    self.bump();
                }
                '#' if self.at_line_start => self.skip_directive(),
                '/' if self.peek_at(1) == Some('/') => self.skip_line_comment(),
                '/' if self.peek_at(1) == Some('*') => self.skip_block_comment()?,
                '"' => {
                    let line = self.line;
                    let text = self.quoted('"', String::new())?;
                    self.push(TokenKind::Str(text), line);
                }
                '\'' => {
                    let line = self.line;
                    let text = self.quoted('\'', String::new())?;
                    self.push(TokenKind::Char(text), line);
                }
                c if c.is_ascii_digit()
                    || (c == '.' && self.peek_at(1).is_some_and(|n| n.is_ascii_digit())) =>
                {
                    self.number();
                }
                c if c.is_alphabetic() || c == '_' => self.word()?,
                ':' if self.peek_at(1) == Some(':') => {
                    let line = self.line;
                    self.pos += 2;
                    self.push(TokenKind::Scope, line);
                }
                c => {
                    let line = self.line;
                    self.bump();
                    self.push(TokenKind::Punct(c), line);
                }
            }
        }
        Ok(self.tokens)
    }

    fn skip_directive(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\\' && self.peek_at(1) == Some('\n') {
                self.bump();
                self.bump();
                continue;
            }
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn skip_line_comment(&mut self) {
        while let Some(c) = self.peek() {
            if c == '\n' {
                break;
            }
            self.bump();
        }
    }

    fn skip_block_comment(&mut self) -> Result<(), SyntaxError> {
        let start = self.line;
        self.pos += 2;
        loop {
            match self.bump() {
                Some('*') if self.peek() == Some('/') => {
                    self.bump();
                    return Ok(());
                }
                Some(_) => {}
                None => return Err(SyntaxError::new(start, "unterminated block comment")),
            }
        }
    }

    /// Read a quoted literal starting at the opening quote.
    fn quoted(&mut self, quote: char, mut text: String) -> Result<String, SyntaxError> {
        let start = self.line;
        let kind = if quote == '"' { "string" } else { "character" };
        text.push(quote);
        self.pos += 1;
        loop {
            match self.peek() {
                Some('\\') => {
                    text.push('\\');
                    self.bump();
                    match self.bump() {
                        Some(escaped) => text.push(escaped),
                        None => break,
                    }
                }
                Some('\n') | None => break,
                Some(c) => {
                    text.push(c);
                    self.bump();
                    if c == quote {
                        return Ok(text);
                    }
                }
            }
        }
        Err(SyntaxError::new(start, format!("unterminated {kind} literal")))
    }

    /// Read `R"delim( ... )delim"` starting at the opening quote.
    fn raw_string(&mut self, mut text: String) -> Result<String, SyntaxError> {
        let start = self.line;
        text.push('"');
        self.pos += 1;
        let mut delimiter = String::new();
        loop {
            match self.bump() {
                Some('(') => break,
                Some(c) if c != '\n' && c != ')' && c != '\\' && delimiter.len() < 16 => {
                    delimiter.push(c);
                }
                _ => return Err(SyntaxError::new(start, "invalid raw string delimiter")),
            }
        }
        text.push_str(&delimiter);
        text.push('(');
        let terminator: Vec<char> = format!("){delimiter}\"").chars().collect();
        loop {
            if self.chars[self.pos..].starts_with(&terminator) {
                for _ in 0..terminator.len() {
                    if let Some(c) = self.bump() {
                        text.push(c);
                    }
                }
                return Ok(text);
            }
            match self.bump() {
                Some(c) => text.push(c),
                None => return Err(SyntaxError::new(start, "unterminated raw string literal")),
            }
        }
    }

    /// Preprocessing-number rules: digits, letters, `_`, `.`, `'` and a sign after an exponent.
    fn number(&mut self) {
        let line = self.line;
        let mut text = String::new();
        while let Some(c) = self.peek() {
            let exponent_sign = (c == '+' || c == '-')
                && text
                    .chars()
                    .last()
                    .is_some_and(|prev| matches!(prev, 'e' | 'E' | 'p' | 'P'));
            if c.is_alphanumeric() || c == '_' || c == '.' || c == '\'' || exponent_sign {
                text.push(c);
                self.bump();
            } else {
                break;
            }
        }
        self.push(TokenKind::Number(text), line);
    }

    fn word(&mut self) -> Result<(), SyntaxError> {
        let line = self.line;
        let mut text = String::new();
        while let Some(c) = self.peek() {
            if c.is_alphanumeric() || c == '_' {
                text.push(c);
                self.bump();
            } else {
                break;
            }
        }

        if self.peek() == Some('"') && STRING_PREFIXES.contains(&text.as_str()) {
            let literal = if text.ends_with('R') {
                self.raw_string(text)?
            } else {
                self.quoted('"', text)?
            };
            self.push(TokenKind::Str(literal), line);
        } else {
            self.push(TokenKind::Ident(text), line);
        }
        Ok(())
    }
}
