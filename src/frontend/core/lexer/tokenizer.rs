//! Tokenizer implementation
//! Main lexer structure and token generation logic

use super::literals::{
    is_digit, is_identifier_start, scan_identifier_body, scan_number, scan_reference,
    scan_string,
};
use super::state::LexerState;
use crate::frontend::core::lexer::tokens::*;
use crate::util::span::{Position, Span};
use std::iter::Peekable;
use std::str::Chars;

/// Main lexer structure
pub struct Lexer<'a> {
    source: &'a str,
    /// Offset of `source[0]` within the enclosing file
    base_offset: usize,
    chars: Peekable<Chars<'a>>,
    offset: usize,
    line: usize,
    column: usize,
    start_offset: usize,
    start_line: usize,
    start_column: usize,
    state: LexerState,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source
    pub fn new(source: &'a str) -> Self {
        Self::with_origin(source, Position::start())
    }

    /// Lexer whose positions start at `origin`, for text embedded in a
    /// larger file (markup attribute expressions, re-lexed tails).
    pub fn with_origin(
        source: &'a str,
        origin: Position,
    ) -> Self {
        Self {
            source,
            base_offset: origin.offset,
            chars: source.chars().peekable(),
            offset: origin.offset,
            line: origin.line,
            column: origin.column,
            start_offset: origin.offset,
            start_line: origin.line,
            start_column: origin.column,
            state: LexerState::new(),
        }
    }

    /// Get current position
    pub fn position(&self) -> Position {
        Position::with_offset(self.line, self.column, self.offset)
    }

    /// Get start position of current token
    pub fn start_position(&self) -> Position {
        Position::with_offset(self.start_line, self.start_column, self.start_offset)
    }

    /// Get span of current token
    pub fn span(&self) -> Span {
        Span::new(self.start_position(), self.position())
    }

    /// Raw source text of the current token
    pub fn lexeme(&self) -> &'a str {
        let start = self.start_offset - self.base_offset;
        let end = self.offset - self.base_offset;
        self.source.get(start..end).unwrap_or("")
    }

    /// Advance to next character
    pub fn advance(&mut self) -> Option<char> {
        match self.chars.next() {
            Some('\n') => {
                self.offset += 1;
                self.line += 1;
                self.column = 1;
                Some('\n')
            }
            Some(c) => {
                self.offset += c.len_utf8();
                self.column += 1;
                Some(c)
            }
            None => None,
        }
    }

    /// Peek at next character
    pub fn peek(&mut self) -> Option<char> {
        self.chars.peek().copied()
    }

    /// Peek at character after next
    pub fn peek_next(&self) -> Option<char> {
        self.chars.clone().nth(1)
    }

    /// Clone of the remaining characters for multi-character lookahead
    pub fn peek_chars(&self) -> Peekable<Chars<'a>> {
        self.chars.clone()
    }

    /// Skip whitespace (except newlines) and comments
    fn skip_whitespace_and_comments(&mut self) {
        while let Some(c) = self.peek() {
            match c {
                '\n' => break,
                c if c.is_whitespace() => {
                    self.advance();
                }
                '/' if self.peek_next() == Some('/') => {
                    while let Some(c) = self.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                '/' if self.peek_next() == Some('*') => {
                    self.advance();
                    self.advance();
                    // Unterminated block comments run to end of input
                    while let Some(c) = self.advance() {
                        if c == '*' && self.peek() == Some('/') {
                            self.advance();
                            break;
                        }
                    }
                }
                _ => break,
            }
        }
    }

    /// Generate next token, `None` at end of input
    pub fn next_token(&mut self) -> Option<Token> {
        let token = self.scan_token()?;
        self.state.observe(&token.kind);
        Some(token)
    }

    fn scan_token(&mut self) -> Option<Token> {
        self.skip_whitespace_and_comments();

        self.start_offset = self.offset;
        self.start_line = self.line;
        self.start_column = self.column;

        let c = self.advance()?;

        let token = match c {
            '\n' => self.make_token(TokenKind::Newline),
            c if is_identifier_start(c) => self.scan_identifier(c),
            c if is_digit(c) => scan_number(self, c),
            '"' | '\'' => scan_string(self, c),
            '-' => {
                if self.peek() == Some('-') && self.peek_next() == Some('-') {
                    while self.peek() == Some('-') {
                        self.advance();
                    }
                    self.make_token(TokenKind::SectionSep)
                } else if self.peek() == Some('>') {
                    self.advance();
                    self.make_token(TokenKind::Arrow)
                } else if self.peek().map(is_digit).unwrap_or(false) && self.state.minus_is_sign() {
                    scan_number(self, '-')
                } else {
                    self.make_token(TokenKind::Minus)
                }
            }
            '{' => {
                if self.peek() == Some('{') {
                    self.advance();
                    scan_reference(self)
                } else {
                    self.make_token(TokenKind::LBrace)
                }
            }
            '#' => self.scan_sigil('#'),
            '@' => self.scan_sigil('@'),
            '=' => {
                if self.peek() == Some('=') {
                    self.advance();
                    if self.peek() == Some('=') {
                        self.advance();
                        self.make_token(TokenKind::EqEqEq)
                    } else {
                        self.make_token(TokenKind::EqEq)
                    }
                } else if self.peek() == Some('>') {
                    self.advance();
                    self.make_token(TokenKind::FatArrow)
                } else {
                    self.make_token(TokenKind::Eq)
                }
            }
            '!' => {
                if self.peek() == Some('=') {
                    self.advance();
                    if self.peek() == Some('=') {
                        self.advance();
                        self.make_token(TokenKind::NeqEq)
                    } else {
                        self.make_token(TokenKind::Neq)
                    }
                } else {
                    self.make_token(TokenKind::Not)
                }
            }
            '<' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::Le)
                } else {
                    self.make_token(TokenKind::Lt)
                }
            }
            '>' => {
                if self.peek() == Some('=') {
                    self.advance();
                    self.make_token(TokenKind::Ge)
                } else {
                    self.make_token(TokenKind::Gt)
                }
            }
            '&' => {
                if self.peek() == Some('&') {
                    self.advance();
                    self.make_token(TokenKind::And)
                } else {
                    self.error_token(LexError::UnexpectedChar { ch: '&' })
                }
            }
            '|' => {
                if self.peek() == Some('|') {
                    self.advance();
                    self.make_token(TokenKind::Or)
                } else {
                    self.error_token(LexError::UnexpectedChar { ch: '|' })
                }
            }
            '+' => self.make_token(TokenKind::Plus),
            '*' => self.make_token(TokenKind::Star),
            '/' => self.make_token(TokenKind::Slash),
            '%' => self.make_token(TokenKind::Percent),
            '?' => self.make_token(TokenKind::Question),
            '(' => self.make_token(TokenKind::LParen),
            ')' => self.make_token(TokenKind::RParen),
            '}' => self.make_token(TokenKind::RBrace),
            '[' => self.make_token(TokenKind::LBracket),
            ']' => self.make_token(TokenKind::RBracket),
            ',' => self.make_token(TokenKind::Comma),
            ':' => self.make_token(TokenKind::Colon),
            ';' => self.make_token(TokenKind::Semicolon),
            '.' => self.make_token(TokenKind::Dot),
            c => self.error_token(LexError::UnexpectedChar { ch: c }),
        };

        Some(token)
    }

    /// Scan identifier token
    fn scan_identifier(
        &mut self,
        first_char: char,
    ) -> Token {
        let mut value = String::new();
        value.push(first_char);
        scan_identifier_body(self, &mut value);

        match self.state.keyword_from_str(&value) {
            Some(kind) => self.make_token(kind),
            None => self.make_token_with_value(TokenKind::Identifier(value.clone()), value),
        }
    }

    /// `#name` and `@name`
    fn scan_sigil(
        &mut self,
        sigil: char,
    ) -> Token {
        match self.peek() {
            Some(c) if is_identifier_start(c) => {
                self.advance();
                let mut name = String::new();
                name.push(c);
                scan_identifier_body(self, &mut name);
                let kind = if sigil == '#' {
                    TokenKind::BlockRef(name.clone())
                } else {
                    TokenKind::AtIdentifier(name.clone())
                };
                self.make_token_with_value(kind, name)
            }
            _ => self.error_token(LexError::MissingIdentifier { sigil }),
        }
    }

    /// Create token with current span and raw lexeme
    pub fn make_token(
        &self,
        kind: TokenKind,
    ) -> Token {
        Token::new(kind, self.lexeme(), self.span())
    }

    /// Create token with current span and an explicit value
    pub fn make_token_with_value(
        &self,
        kind: TokenKind,
        value: impl Into<String>,
    ) -> Token {
        Token::new(kind, value, self.span())
    }

    /// Error token covering the current lexeme
    pub fn error_token(
        &self,
        error: LexError,
    ) -> Token {
        tracing::trace!("lex error at {}: {}", self.start_position(), error);
        Token::new(TokenKind::Error(error.to_string()), self.lexeme(), self.span())
    }

    /// Drain the lexer, appending the terminating `Eof`
    pub fn tokenize(mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token() {
            tokens.push(token);
        }
        let end = self.position();
        tokens.push(Token::new(TokenKind::Eof, "", Span::new(end, end)));
        tokens
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        self.next_token()
    }
}
