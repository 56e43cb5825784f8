//! Control flow statement parsing
//! Handles @if/@else, loops, @switch, @set and @call

use crate::frontend::core::lexer::tokens::*;
use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::parser_state::{ParseResult, ParserState};
use crate::frontend::core::parser::pratt::BP_LOWEST;
use crate::frontend::core::parser::statements::{parse_body, skip_to_keyword};
use crate::util::span::Span;

/// `@if (cond) { … } @else @if (cond) { … } @else { … }`
pub fn parse_if(
    state: &mut ParserState<'_>,
    span: Span,
) -> ParseResult<Node> {
    let condition = state.parse_paren_expression()?;
    let consequent = parse_body(state)?;

    let alternate = if skip_to_keyword(state, "else") {
        if state.at_keyword("if") {
            let nested_span = state.bump().span;
            Some(vec![parse_if(state, nested_span)?])
        } else {
            Some(parse_body(state)?)
        }
    } else {
        None
    };

    Ok(Node::new(
        NodeKind::IfStatement {
            condition: Box::new(condition),
            consequent,
            alternate,
        },
        state.span_from(span),
    ))
}

/// `@for (item, index in iterable) { … }`; `of` is accepted for `in`
pub fn parse_for(
    state: &mut ParserState<'_>,
    span: Span,
) -> ParseResult<Node> {
    state.expect(&TokenKind::LParen, "Expected '(' after @for")?;
    state.enter_nested();
    let header = parse_for_header(state);
    state.exit_nested();
    let (item, index, iterable) = header?;
    state.expect(&TokenKind::RParen, "Expected ')' after @for header")?;

    let body = parse_body(state)?;
    Ok(Node::new(
        NodeKind::ForStatement {
            item,
            index,
            iterable: Box::new(iterable),
            body,
        },
        state.span_from(span),
    ))
}

fn parse_for_header(state: &mut ParserState<'_>) -> ParseResult<(String, Option<String>, Node)> {
    state.skip_newlines();
    let item = state.expect_identifier("Expected loop variable")?;
    let index = if state.skip(&TokenKind::Comma) {
        Some(state.expect_identifier("Expected index variable")?)
    } else {
        None
    };

    match state.kind() {
        TokenKind::Identifier(word) if word == "in" || word == "of" => {
            state.bump();
        }
        _ => return Err(state.error_here("Expected 'in' or 'of' in @for")),
    }

    let iterable = state.parse_expression(BP_LOWEST)?;
    state.skip_newlines();
    Ok((item, index, iterable))
}

/// `@while (cond) { … }`
pub fn parse_while(
    state: &mut ParserState<'_>,
    span: Span,
) -> ParseResult<Node> {
    let condition = state.parse_paren_expression()?;
    let body = parse_body(state)?;
    Ok(Node::new(
        NodeKind::WhileStatement {
            condition: Box::new(condition),
            body,
        },
        state.span_from(span),
    ))
}

/// `@do { … } @while (cond)`
pub fn parse_do_while(
    state: &mut ParserState<'_>,
    span: Span,
) -> ParseResult<Node> {
    let body = parse_body(state)?;
    if !skip_to_keyword(state, "while") {
        return Err(state.error_here("Expected '@while' after @do body"));
    }
    let condition = state.parse_paren_expression()?;
    Ok(Node::new(
        NodeKind::DoWhileStatement {
            body,
            condition: Box::new(condition),
        },
        state.span_from(span),
    ))
}

/// `@switch (expr) { @case value { … } @default { … } }`
pub fn parse_switch(
    state: &mut ParserState<'_>,
    span: Span,
) -> ParseResult<Node> {
    let discriminant = state.parse_paren_expression()?;
    state.expect(&TokenKind::LBrace, "Expected '{' after @switch")?;

    let cases = state.with_statement_context(|state| -> ParseResult<Vec<SwitchCase>> {
        let mut cases = Vec::new();
        loop {
            state.skip_separators();
            if state.skip(&TokenKind::RBrace) {
                return Ok(cases);
            }

            let case_span = state.span();
            let test = if state.at_keyword("case") {
                state.bump();
                Some(state.parse_expression(BP_LOWEST)?)
            } else if state.at_keyword("default") {
                state.bump();
                None
            } else {
                return Err(state.error_here("Expected '@case' or '@default' in @switch"));
            };

            let body = parse_body(state)?;
            cases.push(SwitchCase {
                test,
                body,
                span: state.span_from(case_span),
            });
        }
    })?;

    Ok(Node::new(
        NodeKind::SwitchStatement {
            discriminant: Box::new(discriminant),
            cases,
        },
        state.span_from(span),
    ))
}

/// Assignment or call target: `{{path}}` or a dotted name
fn parse_target(state: &mut ParserState<'_>) -> ParseResult<String> {
    match state.kind() {
        TokenKind::Reference(path) => {
            let path = path.clone();
            state.bump();
            Ok(path)
        }
        TokenKind::Identifier(_) => state.parse_dotted_name(),
        _ => Err(state.error_here("Expected assignment target")),
    }
}

/// `@set target = value` (`:` is accepted for `=`)
pub fn parse_set(
    state: &mut ParserState<'_>,
    span: Span,
) -> ParseResult<Node> {
    let target = parse_target(state)?;
    if !state.skip(&TokenKind::Eq) && !state.skip(&TokenKind::Colon) {
        return Err(state.error_here("Expected '=' in @set"));
    }
    let value = state.parse_expression(BP_LOWEST)?;
    Ok(Node::new(
        NodeKind::AssignmentStatement {
            target,
            value: Box::new(value),
        },
        state.span_from(span),
    ))
}

/// `@call endpoint(args) -> target`
pub fn parse_call(
    state: &mut ParserState<'_>,
    span: Span,
) -> ParseResult<Node> {
    let endpoint = match state.kind() {
        TokenKind::String(name) => {
            let name = name.clone();
            state.bump();
            name
        }
        TokenKind::Identifier(_) => state.parse_dotted_name()?,
        _ => return Err(state.error_here("Expected endpoint name after @call")),
    };

    state.expect(&TokenKind::LParen, "Expected '(' after endpoint")?;
    state.enter_nested();
    let arguments = parse_arguments(state);
    state.exit_nested();
    let arguments = arguments?;

    let target = if state.skip(&TokenKind::Arrow) {
        Some(parse_target(state)?)
    } else {
        None
    };

    Ok(Node::new(
        NodeKind::ServerCall {
            endpoint,
            arguments,
            target,
        },
        state.span_from(span),
    ))
}

fn parse_arguments(state: &mut ParserState<'_>) -> ParseResult<Vec<Node>> {
    let mut arguments = Vec::new();
    loop {
        state.skip_newlines();
        if state.skip(&TokenKind::RParen) {
            return Ok(arguments);
        }
        arguments.push(state.parse_expression(BP_LOWEST)?);
        state.skip_newlines();
        if !state.skip(&TokenKind::Comma) {
            state.expect(&TokenKind::RParen, "Expected ',' or ')' in argument list")?;
            return Ok(arguments);
        }
    }
}
