//! Markup scanning for plugin syntax patterns
//!
//! When a plugin pattern matches at a `<` in item position, the element is
//! read straight from the source text rather than from tokens: text
//! children and attribute strings are not valid token streams. `{expr}`
//! holes go back through the expression parser, and lexing resumes after
//! the closing tag.

use crate::frontend::core::lexer::Lexer;
use crate::frontend::core::parser::ast::*;
use crate::frontend::core::parser::parse_expression_at;
use crate::frontend::core::parser::parser_state::{ParseError, ParseResult, ParserState};
use crate::util::span::{Position, Span};

/// Index of the highest-priority pattern matching at the current `<`
pub fn matching_pattern(state: &ParserState<'_>) -> Option<usize> {
    let remaining = state.source_from(state.span().start.offset);
    state
        .patterns()
        .iter()
        .enumerate()
        .filter(|(_, p)| p.matches_at_start(remaining))
        // max_by_key keeps the last maximum; reverse so ties go to the first
        .rev()
        .max_by_key(|(_, p)| p.priority)
        .map(|(index, _)| index)
}

/// Read one element at the current `<` and re-lex the remaining source
pub fn parse_markup(
    state: &mut ParserState<'_>,
    pattern_index: usize,
) -> ParseResult<Node> {
    let origin = state.span().start;
    let (node_type, interpolation) = state
        .patterns()
        .get(pattern_index)
        .map(|p| (p.ast_node.clone(), p.interpolation))
        .unwrap_or_default();
    let mut reader = MarkupReader::new(state.source_from(origin.offset), origin, interpolation);
    let element = reader.read_element()?;

    let end = reader.position();
    let tail = Lexer::with_origin(state.source_from(end.offset), end).tokenize();
    state.splice_tail(tail);

    tracing::trace!("Captured <{}> as {}", element.tag, node_type);

    let span = element.span;
    Ok(Node::new(NodeKind::PluginNode { node_type, element }, span))
}

/// Character reader over raw markup text
pub struct MarkupReader<'a> {
    source: &'a str,
    /// Byte index into `source`
    index: usize,
    position: Position,
    /// `{{ path }}` reads as a reference rather than `{ {…} }`
    interpolation: bool,
}

impl<'a> MarkupReader<'a> {
    pub fn new(
        source: &'a str,
        origin: Position,
        interpolation: bool,
    ) -> Self {
        Self {
            source,
            index: 0,
            position: origin,
            interpolation,
        }
    }

    /// Absolute position of the next character
    pub fn position(&self) -> Position {
        self.position
    }

    fn rest(&self) -> &'a str {
        &self.source[self.index..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn starts_with(
        &self,
        prefix: &str,
    ) -> bool {
        self.rest().starts_with(prefix)
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.index += c.len_utf8();
        self.position.offset += c.len_utf8();
        if c == '\n' {
            self.position.line += 1;
            self.position.column = 1;
        } else {
            self.position.column += 1;
        }
        Some(c)
    }

    fn advance_by(
        &mut self,
        count: usize,
    ) {
        for _ in 0..count {
            self.advance();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn error(
        &self,
        message: impl Into<String>,
    ) -> ParseError {
        ParseError::at_position(message, self.position)
    }

    fn read_while(
        &mut self,
        pred: impl Fn(char) -> bool,
    ) -> &'a str {
        let start = self.index;
        while self.peek().is_some_and(&pred) {
            self.advance();
        }
        &self.source[start..self.index]
    }

    fn read_tag_name(&mut self) -> &'a str {
        self.read_while(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | '.' | ':' | '$'))
    }

    /// `<tag attrs…>children</tag>` or `<tag attrs… />`
    pub fn read_element(&mut self) -> ParseResult<MarkupElement> {
        let start = self.position;
        if self.advance() != Some('<') {
            return Err(self.error("Expected '<'"));
        }

        let tag = self.read_tag_name().to_string();
        if tag.is_empty() {
            return Err(self.error("Expected tag name after '<'"));
        }

        let mut attributes = Vec::new();
        let self_closing = loop {
            self.skip_whitespace();
            if self.starts_with("/>") {
                self.advance_by(2);
                break true;
            }
            match self.peek() {
                Some('>') => {
                    self.advance();
                    break false;
                }
                Some(_) => attributes.push(self.read_attribute()?),
                None => return Err(self.error(format!("Unclosed <{}> start tag", tag))),
            }
        };

        let children = if self_closing {
            Vec::new()
        } else {
            self.read_children(&tag)?
        };

        Ok(MarkupElement {
            tag,
            attributes,
            children,
            self_closing,
            span: Span::new(start, self.position),
        })
    }

    fn read_attribute(&mut self) -> ParseResult<MarkupAttribute> {
        let start = self.position;
        let name = self
            .read_while(|c| !c.is_whitespace() && !matches!(c, '=' | '>' | '/' | '{' | '"' | '\''))
            .to_string();
        if name.is_empty() {
            return Err(self.error(format!("Unexpected '{}' in tag", self.peek().unwrap_or(' '))));
        }

        let resume = (self.index, self.position);
        self.skip_whitespace();
        if self.peek() != Some('=') {
            (self.index, self.position) = resume;
            return Ok(MarkupAttribute {
                name,
                value: AttributeValue::Flag,
                span: Span::new(start, self.position),
            });
        }
        self.advance();
        self.skip_whitespace();

        let value = match self.peek() {
            Some(quote @ ('"' | '\'')) => {
                self.advance();
                let value_start = self.position;
                let text = self.read_while(|c| c != quote).to_string();
                let value_span = Span::new(value_start, self.position);
                if self.advance() != Some(quote) {
                    return Err(self.error(format!("Unterminated value for attribute '{}'", name)));
                }
                AttributeValue::Static { text, value_span }
            }
            Some('{') => AttributeValue::Expression(self.read_expression()?),
            Some(_) => {
                let value_start = self.position;
                let text = self
                    .read_while(|c| !c.is_whitespace() && c != '>')
                    .to_string();
                AttributeValue::Static {
                    text,
                    value_span: Span::new(value_start, self.position),
                }
            }
            None => return Err(self.error(format!("Missing value for attribute '{}'", name))),
        };

        Ok(MarkupAttribute {
            name,
            value,
            span: Span::new(start, self.position),
        })
    }

    /// `{expr}`, or `{{path}}` when interpolating; without interpolation
    /// `{{ a: 1 }}` is an object inside an expression container
    fn read_expression(&mut self) -> ParseResult<Node> {
        let start = self.position;

        if self.interpolation && self.starts_with("{{") {
            self.advance_by(2);
            let path = self.read_while(|c| c != '}').trim().to_string();
            if !self.starts_with("}}") {
                return Err(ParseError::at_position("Unterminated reference", start));
            }
            self.advance_by(2);
            if path.is_empty() {
                return Err(ParseError::at_position("Invalid reference: empty path", start));
            }
            return Ok(Node::new(NodeKind::Reference { path }, Span::new(start, self.position)));
        }

        self.advance();
        let inner_start = self.position;
        let inner_index = self.index;
        let mut depth = 0usize;
        let mut quote: Option<char> = None;

        loop {
            let Some(c) = self.peek() else {
                return Err(ParseError::at_position("Unterminated '{' in markup", start));
            };
            match (quote, c) {
                (Some(_), '\\') => {
                    self.advance();
                }
                (Some(q), c) if c == q => quote = None,
                (Some(_), _) => {}
                (None, '"' | '\'') => quote = Some(c),
                (None, '{') => depth += 1,
                (None, '}') if depth == 0 => break,
                (None, '}') => depth -= 1,
                (None, _) => {}
            }
            self.advance();
        }

        let inner = &self.source[inner_index..self.index];
        self.advance();
        if inner.trim().is_empty() {
            return Err(ParseError::at_position("Empty expression in markup", start));
        }
        parse_expression_at(inner, inner_start)
    }

    fn read_children(
        &mut self,
        tag: &str,
    ) -> ParseResult<Vec<MarkupChild>> {
        let mut children = Vec::new();

        loop {
            if self.starts_with("</") {
                let close_start = self.position;
                self.advance_by(2);
                let name = self.read_tag_name();
                self.skip_whitespace();
                if self.advance() != Some('>') {
                    return Err(self.error(format!("Expected '>' to close </{}>", name)));
                }
                if name != tag {
                    return Err(ParseError::at_position(
                        format!("Mismatched closing tag </{}>, expected </{}>", name, tag),
                        close_start,
                    ));
                }
                return Ok(children);
            }

            if self.starts_with("<!--") {
                let start = self.position;
                match self.rest().find("-->") {
                    Some(end) => {
                        let len = self.rest()[..end + 3].chars().count();
                        self.advance_by(len);
                    }
                    None => return Err(ParseError::at_position("Unterminated comment", start)),
                }
                continue;
            }

            match self.peek() {
                Some('<') => children.push(MarkupChild::Element(self.read_element()?)),
                Some('{') => children.push(MarkupChild::Expression(self.read_expression()?)),
                Some(_) => {
                    let start = self.position;
                    let raw = self.read_while(|c| c != '<' && c != '{');
                    let text = raw.trim();
                    if !text.is_empty() {
                        children.push(MarkupChild::Text {
                            text: text.to_string(),
                            span: Span::new(start, self.position),
                        });
                    }
                }
                None => return Err(self.error(format!("Unclosed <{}>", tag))),
            }
        }
    }
}
