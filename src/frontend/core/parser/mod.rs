//! Parser module
//!
//! Recursive descent for `@constructs` with a Pratt parser for expressions.
//! Parsing never stops at the first error: each failed item is recorded,
//! the parser resynchronises at the next newline or `@keyword`, and the
//! items that did parse are kept.

pub mod ast;
pub mod markup;
pub mod parser_state;
pub mod pratt;
pub mod statements;
pub mod walk;
#[cfg(test)]
mod tests;

// Re-export commonly used items
pub use ast::*;
pub use parser_state::{ParseError, ParseResult, ParserState};
pub use pratt::*;

use crate::frontend::core::lexer::tokens::*;
use crate::frontend::core::lexer::Lexer;
use crate::frontend::plugins::SyntaxPattern;
use crate::util::span::{Position, Span};

/// Document parser
pub struct Parser<'a> {
    state: ParserState<'a>,
}

impl<'a> Parser<'a> {
    /// Parser with no markup patterns
    pub fn new(source: &'a str) -> Self {
        Self::with_patterns(source, &[])
    }

    /// Parser recognising markup at the given plugin syntax patterns
    pub fn with_patterns(
        source: &'a str,
        patterns: &'a [SyntaxPattern],
    ) -> Self {
        let tokens = crate::frontend::core::lexer::tokenize(source);
        Self {
            state: ParserState::new(source, tokens, patterns),
        }
    }

    /// Parse the whole document
    pub fn parse(&mut self) -> Program {
        let state = &mut self.state;
        let start = state.span();
        let mut body = Vec::new();

        loop {
            while matches!(
                state.kind(),
                TokenKind::Newline | TokenKind::SectionSep | TokenKind::Semicolon
            ) {
                state.bump();
            }
            if state.at_end() {
                break;
            }

            let before = state.save_position();
            match statements::parse_item(state) {
                Ok(node) => body.push(node),
                Err(error) => {
                    tracing::debug!("Parse error: {}", error);
                    state.error(error);
                    if state.save_position() == before {
                        state.bump();
                    }
                    state.synchronize();
                }
            }
        }

        let span = match (body.first(), body.last()) {
            (Some(first), Some(last)) => first.span.to(last.span),
            _ => Span::new(start.start, start.start),
        };
        tracing::debug!(
            "Parsed {} items ({} errors)",
            body.len(),
            state.errors().len()
        );
        Program { body, span }
    }

    /// Errors recorded so far
    pub fn errors(&self) -> &[ParseError] {
        self.state.errors()
    }

    /// Token stream, including any re-lexed markup tails
    pub fn tokens(&self) -> &[Token] {
        self.state.tokens()
    }

    pub fn into_errors(mut self) -> Vec<ParseError> {
        self.state.take_errors()
    }
}

/// Parse source into a program, discarding errors
pub fn parse(source: &str) -> Program {
    Parser::new(source).parse()
}

/// Parse source, returning the partial program and every error
pub fn parse_with_errors(source: &str) -> (Program, Vec<ParseError>) {
    let mut parser = Parser::new(source);
    let program = parser.parse();
    (program, parser.into_errors())
}

/// Parse a single expression
pub fn parse_expression(source: &str) -> Result<Node, ParseError> {
    parse_expression_at(source, Position::start())
}

/// Parse a single expression embedded in a larger file at `origin`.
/// Newlines are insignificant.
pub fn parse_expression_at(
    source: &str,
    origin: Position,
) -> Result<Node, ParseError> {
    let tokens = Lexer::with_origin(source, origin).tokenize();
    let mut state = ParserState::with_base(source, origin.offset, tokens, &[]);
    state.enter_nested();
    state.skip_newlines();
    let expr = state.parse_expression(BP_LOWEST)?;
    state.skip_newlines();
    if !state.at_end() {
        return Err(state.error_here("Unexpected token after expression"));
    }
    Ok(expr)
}
