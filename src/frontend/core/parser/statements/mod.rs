//! Statement parsing modules
//!
//! Items are `@constructs`, properties (`name: value`) and markup. Each
//! construct parser is a free function taking the state and the span of its
//! `@keyword`.

pub mod blocks;
pub mod control_flow;
pub mod reactive;

pub use blocks::*;
pub use control_flow::*;
pub use reactive::*;

use crate::frontend::core::lexer::tokens::*;
use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::markup;
use crate::frontend::core::parser::parser_state::{ParseError, ParseResult, ParserState};
use crate::frontend::core::parser::pratt::BP_LOWEST;

/// Parse a top-level item: a construct or markup
pub fn parse_item(state: &mut ParserState<'_>) -> ParseResult<Node> {
    match state.kind() {
        TokenKind::AtIdentifier(_) => parse_construct(state),
        TokenKind::Lt => match markup::matching_pattern(state) {
            Some(index) => markup::parse_markup(state, index),
            None => Err(state.error_here("Markup is not enabled by any plugin")),
        },
        TokenKind::Identifier(_) | TokenKind::String(_) if state.peek().kind == TokenKind::Colon => {
            Err(state.error_here("Properties are only allowed inside a block"))
        }
        _ => Err(state.error_here("Expected '@' construct")),
    }
}

/// Parse one item inside a `{ … }` body
pub fn parse_body_item(state: &mut ParserState<'_>) -> ParseResult<Node> {
    match state.kind() {
        TokenKind::AtIdentifier(_) => parse_construct(state),
        TokenKind::Identifier(_) | TokenKind::String(_) if state.peek().kind == TokenKind::Colon => {
            parse_property(state)
        }
        TokenKind::Lt => match markup::matching_pattern(state) {
            Some(index) => markup::parse_markup(state, index),
            None => Err(state.error_here("Expected property or construct")),
        },
        _ => Err(state.error_here("Expected property or construct")),
    }
}

/// `name: value`
pub fn parse_property(state: &mut ParserState<'_>) -> ParseResult<Node> {
    let start = state.span();
    let name = match state.kind() {
        TokenKind::Identifier(name) | TokenKind::String(name) => name.clone(),
        _ => return Err(state.error_here("Expected property name")),
    };
    state.bump();
    state.expect(&TokenKind::Colon, "Expected ':' after property name")?;
    let value = state.parse_expression(BP_LOWEST)?;
    Ok(Node::property(name, value, state.span_from(start)))
}

/// Parse `{ items }`. Newlines inside are statement separators even when
/// the braces sit inside parentheses.
pub fn parse_body(state: &mut ParserState<'_>) -> ParseResult<Vec<Node>> {
    state.expect(&TokenKind::LBrace, "Expected '{'")?;
    state.with_statement_context(|state| -> ParseResult<Vec<Node>> {
        let mut body = Vec::new();
        loop {
            state.skip_separators();
            if state.skip(&TokenKind::RBrace) {
                return Ok(body);
            }
            if state.at_end() {
                return Err(state.error_here("Expected '}' to close block"));
            }
            body.push(parse_body_item(state)?);
        }
    })
}

/// Dispatch on the `@keyword`
pub fn parse_construct(state: &mut ParserState<'_>) -> ParseResult<Node> {
    let keyword_token = state.bump();
    let span = keyword_token.span;
    let TokenKind::AtIdentifier(keyword) = &keyword_token.kind else {
        return Err(ParseError::at_token("Expected '@' construct", &keyword_token));
    };

    match keyword.as_str() {
        "dom" => parse_dom_block(state, span),
        "component" => parse_component(state, span),
        "propose" => parse_proposal(state, span),
        "constraint" => parse_constraint(state, span),
        "state" => parse_state(state, span),
        "use" | "plugin" => parse_plugin_directive(state, keyword, span),
        "if" => parse_if(state, span),
        "for" => parse_for(state, span),
        "while" => parse_while(state, span),
        "do" => parse_do_while(state, span),
        "switch" => parse_switch(state, span),
        "set" => parse_set(state, span),
        "call" => parse_call(state, span),
        "reactor" => parse_reactor(state, span),
        "every" => parse_every(state, span),
        "on" => parse_on(state, span),
        "else" => Err(ParseError::at_token("@else without a preceding @if", &keyword_token)),
        "case" | "default" => Err(ParseError::at_token(
            format!("@{} outside of @switch", keyword),
            &keyword_token,
        )),
        _ => parse_atomic_block(state, keyword, span),
    }
}

/// Optional `[id]` after a keyword
pub fn parse_optional_id(state: &mut ParserState<'_>) -> ParseResult<Option<String>> {
    if !state.skip(&TokenKind::LBracket) {
        return Ok(None);
    }
    let id = match state.kind() {
        TokenKind::Identifier(name) | TokenKind::String(name) => name.clone(),
        _ => return Err(state.error_here("Expected block id")),
    };
    state.bump();
    state.expect(&TokenKind::RBracket, "Expected ']' after block id")?;
    Ok(Some(id))
}

/// Look past newlines for `@keyword`; consumes the keyword when found
pub fn skip_to_keyword(
    state: &mut ParserState<'_>,
    keyword: &str,
) -> bool {
    let resume = state.save_position();
    state.skip_newlines();
    if state.at_keyword(keyword) {
        state.bump();
        true
    } else {
        state.restore_position(resume);
        false
    }
}
