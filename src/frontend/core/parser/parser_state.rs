//! Parser state and error handling

use crate::frontend::core::lexer::tokens::*;
use crate::frontend::plugins::SyntaxPattern;
use crate::util::span::{Position, Span};

/// Parse error: message, position, and the offending token when there is one
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
    pub position: Position,
    pub token: Option<Token>,
}

impl ParseError {
    /// Error located at `token`
    pub fn at_token(
        message: impl Into<String>,
        token: &Token,
    ) -> Self {
        Self {
            message: message.into(),
            position: token.span.start,
            token: Some(token.clone()),
        }
    }

    /// Error located at a raw source position (markup scanning)
    pub fn at_position(
        message: impl Into<String>,
        position: Position,
    ) -> Self {
        Self {
            message: message.into(),
            position,
            token: None,
        }
    }

    /// Source range the error covers
    pub fn span(&self) -> Span {
        match &self.token {
            Some(token) => token.span,
            None => Span::new(self.position, self.position),
        }
    }

    /// Raised on a lexer `Error` token; the lexer has already reported it
    pub fn is_lex_error(&self) -> bool {
        self.token
            .as_ref()
            .map(|t| t.kind.is_error())
            .unwrap_or(false)
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        write!(f, "{} at {}", self.message, self.position)
    }
}

impl std::error::Error for ParseError {}

pub type ParseResult<T> = Result<T, ParseError>;

/// Parser state for recursive descent
pub struct ParserState<'a> {
    source: &'a str,
    /// Offset of `source[0]` within the file
    base_offset: usize,
    tokens: Vec<Token>,
    pos: usize,
    errors: Vec<ParseError>,
    patterns: &'a [SyntaxPattern],
    /// Paren/bracket depth; newlines are insignificant while > 0
    nesting: usize,
}

impl<'a> ParserState<'a> {
    pub fn new(
        source: &'a str,
        tokens: Vec<Token>,
        patterns: &'a [SyntaxPattern],
    ) -> Self {
        Self::with_base(source, 0, tokens, patterns)
    }

    /// State over a source fragment whose first byte sits at `base_offset`
    pub fn with_base(
        source: &'a str,
        base_offset: usize,
        mut tokens: Vec<Token>,
        patterns: &'a [SyntaxPattern],
    ) -> Self {
        if tokens.last().map(|t| t.kind != TokenKind::Eof).unwrap_or(true) {
            tokens.push(Token::from(TokenKind::Eof));
        }
        Self {
            source,
            base_offset,
            tokens,
            pos: 0,
            errors: Vec::new(),
            patterns,
            nesting: 0,
        }
    }

    pub fn source(&self) -> &'a str {
        self.source
    }

    pub fn patterns(&self) -> &'a [SyntaxPattern] {
        self.patterns
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Source text between two absolute offsets
    pub fn source_slice(
        &self,
        start: usize,
        end: usize,
    ) -> &'a str {
        let start = start.saturating_sub(self.base_offset);
        let end = end.saturating_sub(self.base_offset);
        self.source.get(start..end).unwrap_or("")
    }

    /// Source text from an absolute offset to the end
    pub fn source_from(
        &self,
        start: usize,
    ) -> &'a str {
        self.source
            .get(start.saturating_sub(self.base_offset)..)
            .unwrap_or("")
    }

    pub fn at_end(&self) -> bool {
        self.at(&TokenKind::Eof)
    }

    pub fn current(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    pub fn kind(&self) -> &TokenKind {
        &self.current().kind
    }

    pub fn peek(&self) -> &Token {
        self.peek_nth(1)
    }

    pub fn peek_nth(
        &self,
        n: usize,
    ) -> &Token {
        &self.tokens[(self.pos + n).min(self.tokens.len() - 1)]
    }

    pub fn token_at(
        &self,
        index: usize,
    ) -> &Token {
        &self.tokens[index.min(self.tokens.len() - 1)]
    }

    pub fn span(&self) -> Span {
        self.current().span
    }

    /// Span of the most recently consumed token
    pub fn prev_span(&self) -> Span {
        match self.pos.checked_sub(1) {
            Some(prev) => self.token_at(prev).span,
            None => self.span(),
        }
    }

    /// Span from `start` through the last consumed token
    pub fn span_from(
        &self,
        start: Span,
    ) -> Span {
        start.to(self.prev_span())
    }

    pub fn bump(&mut self) -> Token {
        let token = self.current().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        token
    }

    pub fn at(
        &self,
        kind: &TokenKind,
    ) -> bool {
        self.kind() == kind
    }

    /// At `@keyword`
    pub fn at_keyword(
        &self,
        keyword: &str,
    ) -> bool {
        matches!(self.kind(), TokenKind::AtIdentifier(name) if name == keyword)
    }

    pub fn skip(
        &mut self,
        kind: &TokenKind,
    ) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume a token of `kind` or fail with `message`
    pub fn expect(
        &mut self,
        kind: &TokenKind,
        message: &str,
    ) -> ParseResult<Token> {
        if self.at(kind) {
            Ok(self.bump())
        } else {
            Err(self.error_here(message))
        }
    }

    /// Consume an identifier and return its name
    pub fn expect_identifier(
        &mut self,
        message: &str,
    ) -> ParseResult<String> {
        match self.kind() {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.bump();
                Ok(name)
            }
            _ => Err(self.error_here(message)),
        }
    }

    /// Error at the current token; lexer errors keep their own message
    pub fn error_here(
        &self,
        message: &str,
    ) -> ParseError {
        let token = self.current();
        match &token.kind {
            TokenKind::Error(lex_message) => ParseError::at_token(lex_message.clone(), token),
            kind => ParseError::at_token(format!("{}, found {}", message, kind), token),
        }
    }

    pub fn skip_newlines(&mut self) {
        while self.at(&TokenKind::Newline) {
            self.bump();
        }
    }

    /// Skip body item separators: newlines, `;` and `,`
    pub fn skip_separators(&mut self) {
        while matches!(
            self.kind(),
            TokenKind::Newline | TokenKind::Semicolon | TokenKind::Comma | TokenKind::SectionSep
        ) {
            self.bump();
        }
    }

    /// Skip newlines only inside parentheses or brackets
    pub fn skip_nested_newlines(&mut self) {
        if self.nesting > 0 {
            self.skip_newlines();
        }
    }

    pub fn enter_nested(&mut self) {
        self.nesting += 1;
    }

    pub fn exit_nested(&mut self) {
        self.nesting = self.nesting.saturating_sub(1);
    }

    /// Run `f` with newlines significant again (statement bodies)
    pub fn with_statement_context<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        let saved = std::mem::take(&mut self.nesting);
        let result = f(self);
        self.nesting = saved;
        result
    }

    pub fn error(
        &mut self,
        error: ParseError,
    ) {
        self.errors.push(error);
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn take_errors(&mut self) -> Vec<ParseError> {
        std::mem::take(&mut self.errors)
    }

    /// Save current position for backtracking
    pub fn save_position(&self) -> usize {
        self.pos
    }

    /// Restore a previously saved position
    pub fn restore_position(
        &mut self,
        pos: usize,
    ) {
        self.pos = pos;
    }

    /// Replace every token from the current position on; used to resume
    /// lexing after a span of raw markup.
    pub fn splice_tail(
        &mut self,
        tail: Vec<Token>,
    ) {
        self.tokens.truncate(self.pos);
        self.tokens.extend(tail);
        if self.tokens.last().map(|t| t.kind != TokenKind::Eof).unwrap_or(true) {
            self.tokens.push(Token::from(TokenKind::Eof));
        }
    }

    /// Skip to the next newline or `@keyword` after an error
    pub fn synchronize(&mut self) {
        while !self.at_end() {
            if matches!(self.kind(), TokenKind::Newline | TokenKind::AtIdentifier(_)) {
                break;
            }
            self.bump();
        }
    }
}
