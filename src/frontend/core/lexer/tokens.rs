//! Token types

use crate::util::span::Span;
use std::fmt;

/// Lexer error
///
/// Lexing never aborts: each error is carried by a [`TokenKind::Error`]
/// token whose payload is the rendered message.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexError {
    #[error("Unexpected character: '{ch}'")]
    UnexpectedChar { ch: char },
    #[error("Unterminated string starting at {position}")]
    UnterminatedString { position: String },
    #[error("Invalid reference: {reason}")]
    InvalidReference { reason: String },
    #[error("Unterminated reference starting at {position}")]
    UnterminatedReference { position: String },
    #[error("Invalid number literal: {0}")]
    InvalidNumber(String),
    #[error("Expected identifier after '{sigil}'")]
    MissingIdentifier { sigil: char },
}

/// Token kind
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // Literals
    String(String),
    Number(f64),
    Boolean(bool),
    Null,

    // Names
    Identifier(String),
    /// `{{ path }}`
    Reference(String),
    /// `#name`
    BlockRef(String),
    /// `@keyword`
    AtIdentifier(String),

    // Operators
    Eq,
    EqEq,
    EqEqEq,
    Neq,
    NeqEq,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    Not,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Question,
    Arrow,
    FatArrow,

    // Delimiters
    LParen,
    RParen,
    LBrace,
    RBrace,
    LBracket,
    RBracket,
    Comma,
    Colon,
    Semicolon,
    Dot,

    // Layout
    Newline,
    /// `---`
    SectionSep,

    // Special
    Eof,
    Error(String),
}

impl TokenKind {
    /// Upper-case token type name, as printed by `asxr tokens`
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::String(_) => "STRING",
            TokenKind::Number(_) => "NUMBER",
            TokenKind::Boolean(_) => "BOOLEAN",
            TokenKind::Null => "NULL",
            TokenKind::Identifier(_) => "IDENTIFIER",
            TokenKind::Reference(_) => "REFERENCE",
            TokenKind::BlockRef(_) => "BLOCK_REF",
            TokenKind::AtIdentifier(_) => "AT_IDENTIFIER",
            TokenKind::Eq
            | TokenKind::EqEq
            | TokenKind::EqEqEq
            | TokenKind::Neq
            | TokenKind::NeqEq
            | TokenKind::Lt
            | TokenKind::Le
            | TokenKind::Gt
            | TokenKind::Ge
            | TokenKind::And
            | TokenKind::Or
            | TokenKind::Not
            | TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Star
            | TokenKind::Slash
            | TokenKind::Percent
            | TokenKind::Question
            | TokenKind::Arrow
            | TokenKind::FatArrow => "OPERATOR",
            TokenKind::LParen
            | TokenKind::RParen
            | TokenKind::LBrace
            | TokenKind::RBrace
            | TokenKind::LBracket
            | TokenKind::RBracket
            | TokenKind::Comma
            | TokenKind::Colon
            | TokenKind::Semicolon
            | TokenKind::Dot => "PUNCTUATION",
            TokenKind::Newline => "NEWLINE",
            TokenKind::SectionSep => "SECTION_SEP",
            TokenKind::Eof => "EOF",
            TokenKind::Error(_) => "ERROR",
        }
    }

    /// Whether a `-` directly after this token is subtraction rather than a sign
    pub fn ends_value(&self) -> bool {
        matches!(
            self,
            TokenKind::String(_)
                | TokenKind::Number(_)
                | TokenKind::Boolean(_)
                | TokenKind::Null
                | TokenKind::Identifier(_)
                | TokenKind::Reference(_)
                | TokenKind::BlockRef(_)
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::RBrace
        )
    }

    pub fn is_error(&self) -> bool {
        matches!(self, TokenKind::Error(_))
    }
}

impl fmt::Display for TokenKind {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match self {
            TokenKind::String(s) => write!(f, "string \"{}\"", s),
            TokenKind::Number(n) => write!(f, "number {}", n),
            TokenKind::Boolean(b) => write!(f, "{}", b),
            TokenKind::Null => write!(f, "null"),
            TokenKind::Identifier(name) => write!(f, "identifier '{}'", name),
            TokenKind::Reference(path) => write!(f, "{{{{{}}}}}", path),
            TokenKind::BlockRef(name) => write!(f, "#{}", name),
            TokenKind::AtIdentifier(name) => write!(f, "@{}", name),
            TokenKind::Eq => write!(f, "'='"),
            TokenKind::EqEq => write!(f, "'=='"),
            TokenKind::EqEqEq => write!(f, "'==='"),
            TokenKind::Neq => write!(f, "'!='"),
            TokenKind::NeqEq => write!(f, "'!=='"),
            TokenKind::Lt => write!(f, "'<'"),
            TokenKind::Le => write!(f, "'<='"),
            TokenKind::Gt => write!(f, "'>'"),
            TokenKind::Ge => write!(f, "'>='"),
            TokenKind::And => write!(f, "'&&'"),
            TokenKind::Or => write!(f, "'||'"),
            TokenKind::Not => write!(f, "'!'"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Star => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::Percent => write!(f, "'%'"),
            TokenKind::Question => write!(f, "'?'"),
            TokenKind::Arrow => write!(f, "'->'"),
            TokenKind::FatArrow => write!(f, "'=>'"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::LBrace => write!(f, "'{{'"),
            TokenKind::RBrace => write!(f, "'}}'"),
            TokenKind::LBracket => write!(f, "'['"),
            TokenKind::RBracket => write!(f, "']'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Colon => write!(f, "':'"),
            TokenKind::Semicolon => write!(f, "';'"),
            TokenKind::Dot => write!(f, "'.'"),
            TokenKind::Newline => write!(f, "newline"),
            TokenKind::SectionSep => write!(f, "'---'"),
            TokenKind::Eof => write!(f, "end of input"),
            TokenKind::Error(msg) => write!(f, "error ({})", msg),
        }
    }
}

/// Token
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Textual value: decoded contents for strings, the path for references,
    /// the bare name for sigil tokens and identifiers, the raw lexeme otherwise.
    pub value: String,
    pub span: Span,
}

impl Token {
    pub fn new(
        kind: TokenKind,
        value: impl Into<String>,
        span: Span,
    ) -> Self {
        Self {
            kind,
            value: value.into(),
            span,
        }
    }
}

impl From<TokenKind> for Token {
    fn from(kind: TokenKind) -> Self {
        Token {
            kind,
            value: String::new(),
            span: Span::dummy(),
        }
    }
}
