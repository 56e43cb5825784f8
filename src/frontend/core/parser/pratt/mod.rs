//! Pratt parser implementation
//! Handles expression parsing with binding power

pub mod nud;
pub mod precedence;

pub use precedence::*;

use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::parser_state::{ParseResult, ParserState};

impl ParserState<'_> {
    /// Parse an expression whose operators all bind at least as tight as `min_bp`
    pub fn parse_expression(
        &mut self,
        min_bp: u8,
    ) -> ParseResult<Node> {
        let mut left = self.parse_prefix()?;

        loop {
            let resume = self.save_position();
            self.skip_nested_newlines();

            let Some((bp, operator)) = infix_binding_power(self.kind()) else {
                self.restore_position(resume);
                break;
            };
            if bp < min_bp {
                self.restore_position(resume);
                break;
            }

            self.bump();
            self.skip_nested_newlines();
            // bp + 1: left-associative
            let right = self.parse_expression(bp + 1)?;
            let span = left.span.to(right.span);
            left = Node::new(
                NodeKind::BinaryExpression {
                    operator,
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            );
        }

        Ok(left)
    }

    /// Parse `( expr )`; newlines inside the parentheses are ignored
    pub fn parse_paren_expression(&mut self) -> ParseResult<Node> {
        self.expect(&crate::frontend::core::lexer::TokenKind::LParen, "Expected '('")?;
        self.enter_nested();
        self.skip_nested_newlines();
        let expr = self.parse_expression(BP_LOWEST);
        self.skip_nested_newlines();
        self.exit_nested();
        let expr = expr?;
        self.expect(&crate::frontend::core::lexer::TokenKind::RParen, "Expected ')'")?;
        Ok(expr)
    }
}
