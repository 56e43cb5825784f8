//! Block constructs: `@atomic`-style blocks, `@dom`, `@component`,
//! `@propose`, `@state`, `@constraint` and plugin directives

use crate::frontend::core::lexer::tokens::*;
use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::parser_state::{ParseError, ParseResult, ParserState};
use crate::frontend::core::parser::pratt::BP_LOWEST;
use crate::frontend::core::parser::statements::{parse_body, parse_optional_id};
use crate::util::span::Span;

/// Selector used when `@dom` has none
pub const DEFAULT_SELECTOR: &str = "div";

/// `@type[id] { body }`; the body is optional
pub fn parse_atomic_block(
    state: &mut ParserState<'_>,
    block_type: &str,
    span: Span,
) -> ParseResult<Node> {
    let id = parse_optional_id(state)?;
    let body = if state.at(&TokenKind::LBrace) {
        parse_body(state)?
    } else {
        Vec::new()
    };

    Ok(Node::new(
        NodeKind::AtomicBlock {
            block_type: block_type.to_string(),
            id,
            body,
        },
        state.span_from(span),
    ))
}

/// `@dom selector[id] { body }`
///
/// The selector is the raw source between `@dom` and the body's `{`, so
/// `div.card > span` survives untouched. A trailing `[ident]` directly
/// before `{` is the block id.
pub fn parse_dom_block(
    state: &mut ParserState<'_>,
    span: Span,
) -> ParseResult<Node> {
    let start = state.save_position();
    let mut brace = start;
    loop {
        match &state.token_at(brace).kind {
            TokenKind::LBrace => break,
            TokenKind::Newline | TokenKind::Eof => {
                return Err(state.error_here("Expected '{' after @dom selector"));
            }
            _ => brace += 1,
        }
    }

    let id = if brace >= start + 3
        && state.token_at(brace - 3).kind == TokenKind::LBracket
        && state.token_at(brace - 1).kind == TokenKind::RBracket
    {
        match &state.token_at(brace - 2).kind {
            TokenKind::Identifier(name) | TokenKind::String(name) => Some(name.clone()),
            _ => None,
        }
    } else {
        None
    };

    let selector_end = if id.is_some() {
        state.token_at(brace - 3).span.start.offset
    } else {
        state.token_at(brace).span.start.offset
    };
    let selector = state
        .source_slice(span.end.offset, selector_end)
        .trim()
        .to_string();
    let selector = if selector.is_empty() {
        DEFAULT_SELECTOR.to_string()
    } else {
        selector
    };

    state.restore_position(brace);
    let body = parse_body(state)?;

    Ok(Node::new(
        NodeKind::DomBlock { selector, id, body },
        state.span_from(span),
    ))
}

/// `@component Name[id](a, b) { body }`
pub fn parse_component(
    state: &mut ParserState<'_>,
    span: Span,
) -> ParseResult<Node> {
    let name = state.expect_identifier("Expected component name")?;
    let id = parse_optional_id(state)?;

    let mut params = Vec::new();
    if state.skip(&TokenKind::LParen) {
        loop {
            state.skip_newlines();
            if state.skip(&TokenKind::RParen) {
                break;
            }
            params.push(state.expect_identifier("Expected parameter name")?);
            state.skip_newlines();
            if !state.skip(&TokenKind::Comma) {
                state.expect(&TokenKind::RParen, "Expected ',' or ')' in parameter list")?;
                break;
            }
        }
    }

    let body = parse_body(state)?;
    Ok(Node::new(
        NodeKind::ComponentDef {
            name,
            id,
            params,
            body,
        },
        state.span_from(span),
    ))
}

/// `@propose[id] { body }`
pub fn parse_proposal(
    state: &mut ParserState<'_>,
    span: Span,
) -> ParseResult<Node> {
    let id = parse_optional_id(state)?;
    let body = parse_body(state)?;
    Ok(Node::new(
        NodeKind::StateProposal { id, body },
        state.span_from(span),
    ))
}

/// `@constraint name: condition`
pub fn parse_constraint(
    state: &mut ParserState<'_>,
    span: Span,
) -> ParseResult<Node> {
    let name = match state.kind() {
        TokenKind::Identifier(name) | TokenKind::String(name) => name.clone(),
        _ => return Err(state.error_here("Expected constraint name")),
    };
    state.bump();
    state.expect(&TokenKind::Colon, "Expected ':' after constraint name")?;
    let condition = state.parse_expression(BP_LOWEST)?;
    Ok(Node::new(
        NodeKind::Constraint {
            name,
            condition: Box::new(condition),
        },
        state.span_from(span),
    ))
}

/// `@state { a: 1 }` or `@state a = 1`
pub fn parse_state(
    state: &mut ParserState<'_>,
    span: Span,
) -> ParseResult<Node> {
    let properties = if state.at(&TokenKind::LBrace) {
        let body = parse_body(state)?;
        if let Some(other) = body
            .iter()
            .find(|n| !matches!(n.kind, NodeKind::PropertyAssignment { .. }))
        {
            return Err(ParseError::at_position(
                format!("Only properties are allowed in @state, found {}", other.type_name()),
                other.span.start,
            ));
        }
        body
    } else {
        let start = state.span();
        let name = state.expect_identifier("Expected '{' or a property name after @state")?;
        state.expect(&TokenKind::Eq, "Expected '=' in @state definition")?;
        let value = state.parse_expression(BP_LOWEST)?;
        vec![Node::property(name, value, state.span_from(start))]
    };

    Ok(Node::new(
        NodeKind::StateDefinition { properties },
        state.span_from(span),
    ))
}

/// `@use name` / `@plugin "name" { options }`
pub fn parse_plugin_directive(
    state: &mut ParserState<'_>,
    keyword: &str,
    span: Span,
) -> ParseResult<Node> {
    let name = match state.kind() {
        TokenKind::Identifier(name) | TokenKind::String(name) => name.clone(),
        _ => return Err(state.error_here("Expected plugin name")),
    };
    state.bump();

    let options = if state.at(&TokenKind::LBrace) {
        parse_body(state)?
    } else {
        Vec::new()
    };

    Ok(Node::new(
        NodeKind::PluginDirective {
            keyword: keyword.to_string(),
            name,
            options,
        },
        state.span_from(span),
    ))
}
