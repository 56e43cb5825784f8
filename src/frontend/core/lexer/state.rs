//! Lexer state management
//! Keyword reclassification and sign/subtraction context

use crate::frontend::core::lexer::tokens::TokenKind;

/// Lexer state carried between tokens
#[derive(Debug, Default)]
pub struct LexerState {
    /// Set when the last significant token ended a value
    prev_ends_value: bool,
}

impl LexerState {
    /// Create new lexer state
    pub fn new() -> Self {
        Self::default()
    }

    /// Reclassify literal keywords scanned as identifiers
    pub fn keyword_from_str(
        &self,
        s: &str,
    ) -> Option<TokenKind> {
        match s {
            "true" => Some(TokenKind::Boolean(true)),
            "false" => Some(TokenKind::Boolean(false)),
            "null" => Some(TokenKind::Null),
            _ => None,
        }
    }

    /// Record an emitted token
    pub fn observe(
        &mut self,
        kind: &TokenKind,
    ) {
        self.prev_ends_value = kind.ends_value();
    }

    /// `-` followed by a digit starts a signed number unless a value precedes it
    pub fn minus_is_sign(&self) -> bool {
        !self.prev_ends_value
    }
}
