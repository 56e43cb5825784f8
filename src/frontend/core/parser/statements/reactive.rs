//! Reactive constructs: `@reactor`, `@every` and `@on`

use crate::frontend::core::lexer::tokens::*;
use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::parser_state::{ParseResult, ParserState};
use crate::frontend::core::parser::pratt::BP_LOWEST;
use crate::frontend::core::parser::statements::{parse_body, parse_optional_id, skip_to_keyword};
use crate::util::span::Span;

/// `@reactor[id] { … }`
pub fn parse_reactor(
    state: &mut ParserState<'_>,
    span: Span,
) -> ParseResult<Node> {
    let id = parse_optional_id(state)?;
    let body = parse_body(state)?;
    Ok(Node::new(
        NodeKind::ReactorBlock { id, body },
        state.span_from(span),
    ))
}

/// `@every 1000 { … }`; the interval is in milliseconds
pub fn parse_every(
    state: &mut ParserState<'_>,
    span: Span,
) -> ParseResult<Node> {
    let interval = if state.at(&TokenKind::LParen) {
        state.parse_paren_expression()?
    } else {
        state.parse_expression(BP_LOWEST)?
    };
    let body = parse_body(state)?;
    Ok(Node::new(
        NodeKind::TimerBlock {
            interval: Box::new(interval),
            body,
        },
        state.span_from(span),
    ))
}

/// `@on (trigger) { … } @else { … }`
pub fn parse_on(
    state: &mut ParserState<'_>,
    span: Span,
) -> ParseResult<Node> {
    let trigger = if state.at(&TokenKind::LParen) {
        state.parse_paren_expression()?
    } else {
        state.parse_expression(BP_LOWEST)?
    };
    let body = parse_body(state)?;
    let otherwise = if skip_to_keyword(state, "else") {
        Some(parse_body(state)?)
    } else {
        None
    };

    Ok(Node::new(
        NodeKind::BinaryTrigger {
            trigger: Box::new(trigger),
            body,
            otherwise,
        },
        state.span_from(span),
    ))
}
