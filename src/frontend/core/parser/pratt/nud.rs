//! Prefix parsing (nud): literals, names, unary operators, groups,
//! array and object literals, and lambdas

use crate::frontend::core::lexer::tokens::*;
use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::parser_state::{ParseResult, ParserState};
use crate::frontend::core::parser::pratt::precedence::*;
use crate::frontend::core::parser::statements::parse_body;

/// Property name a single-expression lambda body is stored under
pub const LAMBDA_RETURN: &str = "_return";

impl ParserState<'_> {
    /// Parse a prefix expression
    pub fn parse_prefix(&mut self) -> ParseResult<Node> {
        let token = self.current().clone();
        let span = token.span;

        match &token.kind {
            TokenKind::Not | TokenKind::Minus => {
                let operator = if token.kind == TokenKind::Not {
                    UnaryOp::Not
                } else {
                    UnaryOp::Neg
                };
                self.bump();
                let argument = self.parse_expression(BP_UNARY)?;
                let span = span.to(argument.span);
                Ok(Node::new(
                    NodeKind::UnaryExpression {
                        operator,
                        argument: Box::new(argument),
                    },
                    span,
                ))
            }
            TokenKind::String(value) => {
                self.bump();
                Ok(Node::string(value.clone(), span))
            }
            TokenKind::Number(value) => {
                self.bump();
                Ok(Node::literal(LiteralValue::Number(*value), span))
            }
            TokenKind::Boolean(value) => {
                self.bump();
                Ok(Node::literal(LiteralValue::Boolean(*value), span))
            }
            TokenKind::Null => {
                self.bump();
                Ok(Node::literal(LiteralValue::Null, span))
            }
            TokenKind::Reference(path) => {
                self.bump();
                Ok(Node::new(NodeKind::Reference { path: path.clone() }, span))
            }
            TokenKind::BlockRef(name) => {
                self.bump();
                Ok(Node::new(NodeKind::BlockReference { name: name.clone() }, span))
            }
            TokenKind::Identifier(name) => {
                if self.peek().kind == TokenKind::FatArrow {
                    let name = name.clone();
                    self.bump();
                    return self.parse_lambda_tail(vec![name], span);
                }
                let name = self.parse_dotted_name()?;
                Ok(Node::new(NodeKind::Identifier { name }, span.to(self.prev_span())))
            }
            TokenKind::LParen => {
                if let Some(params) = self.try_lambda_params() {
                    return self.parse_lambda_tail(params, span);
                }
                self.parse_paren_expression()
            }
            TokenKind::LBracket => self.parse_array(),
            TokenKind::LBrace => self.parse_object(),
            _ => Err(self.error_here("Expected expression")),
        }
    }

    /// `a.b.c` as one dotted name
    pub fn parse_dotted_name(&mut self) -> ParseResult<String> {
        let mut name = self.expect_identifier("Expected identifier")?;
        while self.at(&TokenKind::Dot) {
            let TokenKind::Identifier(segment) = &self.peek().kind else {
                break;
            };
            name.push('.');
            name.push_str(segment);
            self.bump();
            self.bump();
        }
        Ok(name)
    }

    /// Speculatively read `( ident, … ) =>`. On success the position is left
    /// on `=>`; otherwise nothing is consumed.
    fn try_lambda_params(&mut self) -> Option<Vec<String>> {
        let start = self.save_position();
        self.bump();

        let mut params = Vec::new();
        let complete = loop {
            self.skip_newlines();
            match self.kind() {
                TokenKind::RParen => {
                    self.bump();
                    break self.at(&TokenKind::FatArrow);
                }
                TokenKind::Identifier(name) => {
                    params.push(name.clone());
                    self.bump();
                    self.skip_newlines();
                    if !self.skip(&TokenKind::Comma) && !self.at(&TokenKind::RParen) {
                        break false;
                    }
                }
                _ => break false,
            }
        };

        if complete {
            Some(params)
        } else {
            self.restore_position(start);
            None
        }
    }

    /// After the parameter list: `=> { body }` or `=> expr`
    fn parse_lambda_tail(
        &mut self,
        params: Vec<String>,
        start: crate::util::span::Span,
    ) -> ParseResult<Node> {
        self.expect(&TokenKind::FatArrow, "Expected '=>'")?;

        let body = if self.at(&TokenKind::LBrace) {
            parse_body(self)?
        } else {
            let value = self.parse_expression(BP_LOWEST)?;
            let span = value.span;
            vec![Node::property(LAMBDA_RETURN, value, span)]
        };

        Ok(Node::new(
            NodeKind::LambdaExpression { params, body },
            self.span_from(start),
        ))
    }

    /// `[a, b, c]`
    fn parse_array(&mut self) -> ParseResult<Node> {
        let start = self.bump().span;
        self.enter_nested();
        let elements = self.parse_array_elements();
        self.exit_nested();
        let elements = elements?;
        Ok(Node::new(
            NodeKind::ArrayExpression { elements },
            self.span_from(start),
        ))
    }

    fn parse_array_elements(&mut self) -> ParseResult<Vec<Node>> {
        let mut elements = Vec::new();
        loop {
            self.skip_newlines();
            if self.skip(&TokenKind::RBracket) {
                return Ok(elements);
            }
            elements.push(self.parse_expression(BP_LOWEST)?);
            self.skip_newlines();
            if !self.skip(&TokenKind::Comma) {
                self.expect(&TokenKind::RBracket, "Expected ',' or ']' in array")?;
                return Ok(elements);
            }
        }
    }

    /// `{ key: value, … }`; keys may be identifiers or strings
    fn parse_object(&mut self) -> ParseResult<Node> {
        let start = self.bump().span;
        let mut properties = Vec::new();

        loop {
            self.skip_separators();
            if self.skip(&TokenKind::RBrace) {
                break;
            }

            let key_span = self.span();
            let key = match self.kind() {
                TokenKind::Identifier(name) | TokenKind::String(name) => name.clone(),
                _ => return Err(self.error_here("Expected property name in object")),
            };
            self.bump();
            self.expect(&TokenKind::Colon, "Expected ':' after property name")?;
            self.skip_newlines();
            let value = self.parse_expression(BP_LOWEST)?;
            let span = key_span.to(value.span);
            properties.push(Node::property(key, value, span));
        }

        Ok(Node::new(
            NodeKind::ObjectExpression { properties },
            self.span_from(start),
        ))
    }
}
