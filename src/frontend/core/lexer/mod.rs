//! Lexer module
//!
//! Single-pass scanner producing [`Token`]s with positions. Lexing is
//! total: malformed input becomes [`TokenKind::Error`] tokens and the
//! stream always ends with exactly one [`TokenKind::Eof`].

pub mod literals;
pub mod state;
pub mod tokenizer;
pub mod tokens;

#[cfg(test)]
mod tests;

// Re-export types
pub use tokenizer::Lexer;
pub use tokens::{LexError, Token, TokenKind};

/// Tokenize source code
pub fn tokenize(source: &str) -> Vec<Token> {
    tracing::debug!("Lexing {} bytes", source.len());

    let tokens = Lexer::new(source).tokenize();
    for token in &tokens {
        log_token(token);
    }

    let errors = tokens.iter().filter(|t| t.kind.is_error()).count();
    tracing::debug!("Lexed {} tokens ({} errors)", tokens.len(), errors);
    tokens
}

/// Log a token for debugging
fn log_token(token: &Token) {
    tracing::trace!(
        "{} {} {:?}",
        token.span.start,
        token.kind.name(),
        token.value
    );
}
