//! Span 单元测试
//!
//! Position, Span and SourceFile

use crate::util::span::{Position, SourceFile, Span};

#[test]
fn test_position_display() {
    let pos = Position::new(10, 20);
    assert_eq!(format!("{}", pos), "10:20");
}

#[test]
fn test_position_advanced_over() {
    let start = Position::with_offset(3, 5, 40);
    assert_eq!(start.advanced_over("ab"), Position::with_offset(3, 7, 42));
    assert_eq!(start.advanced_over("é\nxy"), Position::with_offset(4, 3, 45));
    assert_eq!(start.advanced_over(""), start);
}

#[test]
fn test_span_to_merges_and_ignores_dummy() {
    let a = Span::new(Position::with_offset(1, 1, 0), Position::with_offset(1, 4, 3));
    let b = Span::new(Position::with_offset(2, 1, 10), Position::with_offset(2, 6, 15));

    let merged = a.to(b);
    assert_eq!(merged.start, a.start);
    assert_eq!(merged.end, b.end);
    assert_eq!(Span::dummy().to(b), b);
    assert_eq!(a.to(Span::dummy()), a);
}

#[test]
fn test_span_len() {
    let span = Span::new(Position::with_offset(1, 1, 4), Position::with_offset(1, 5, 9));
    assert_eq!(span.len(), 5);
    assert!(!span.is_empty());
    assert!(Span::dummy().is_dummy());
}

#[test]
fn test_source_file_positions() {
    let file = SourceFile::new("a.asxr".to_string(), "ab\ncd\n\nxyz".to_string());

    assert_eq!(file.line_count(), 4);
    assert_eq!(file.position_from_offset(0), Position::with_offset(1, 1, 0));
    assert_eq!(file.position_from_offset(4), Position::with_offset(2, 2, 4));
    assert_eq!(file.position_from_offset(7), Position::with_offset(4, 1, 7));
    assert_eq!(file.position_from_offset(8), Position::with_offset(4, 2, 8));
}

#[test]
fn test_source_file_line_text() {
    let file = SourceFile::new("a.asxr".to_string(), "first\r\nsecond\nthird".to_string());

    assert_eq!(file.line_text(1), Some("first"));
    assert_eq!(file.line_text(2), Some("second"));
    assert_eq!(file.line_text(3), Some("third"));
    assert_eq!(file.line_text(4), None);
    assert_eq!(file.line_text(0), None);
}

#[test]
fn test_source_text_for_span() {
    let file = SourceFile::new("a.asxr".to_string(), "@atomic[x] {}".to_string());
    let span = file.span_from_range(8, 9);

    assert_eq!(file.source_text(span), Some("x"));
    assert_eq!(file.source_text(Span::dummy()), None);
}
