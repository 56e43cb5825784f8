//! Property tests: the front end accepts any input without panicking

use asxr::frontend::core::lexer::TokenKind;
use asxr::{parse_with_errors, tokenize, Compiler};
use proptest::prelude::*;

/// Fragments that look like ASXR, glued together at random
fn asxr_fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("@atomic".to_string()),
        Just("@dom".to_string()),
        Just("@if".to_string()),
        Just("@else".to_string()),
        Just("@for".to_string()),
        Just("@switch".to_string()),
        Just("@case".to_string()),
        Just("@propose".to_string()),
        Just("@constraint".to_string()),
        Just("{".to_string()),
        Just("}".to_string()),
        Just("(".to_string()),
        Just(")".to_string()),
        Just("[".to_string()),
        Just("]".to_string()),
        Just(":".to_string()),
        Just("\n".to_string()),
        Just("=>".to_string()),
        Just("{{".to_string()),
        Just("}}".to_string()),
        Just("<div>".to_string()),
        Just("</div>".to_string()),
        "[a-z]{1,6}",
        "-?[0-9]{1,4}(\\.[0-9]{1,2})?",
        "\"[a-z ]{0,6}\"?",
        "#[a-z]{1,4}",
        "[-+*/%!<>=&|]{1,2}",
    ]
}

fn asxr_like() -> impl Strategy<Value = String> {
    prop::collection::vec(asxr_fragment(), 0..40).prop_map(|parts| parts.join(" "))
}

proptest! {
    #[test]
    fn lexer_is_total(source in "\\PC{0,200}") {
        let tokens = tokenize(&source);
        prop_assert!(matches!(tokens.last().map(|t| &t.kind), Some(TokenKind::Eof)));
        prop_assert_eq!(
            tokens.iter().filter(|t| matches!(t.kind, TokenKind::Eof)).count(),
            1
        );
        for pair in tokens.windows(2) {
            prop_assert!(pair[0].span.start.offset <= pair[1].span.start.offset);
        }
    }

    #[test]
    fn parser_never_panics(source in asxr_like()) {
        let (program, _) = parse_with_errors(&source);
        prop_assert_eq!(parse_with_errors(&source).0, program);
    }

    #[test]
    fn analysis_never_panics(source in asxr_like()) {
        let compiler = Compiler::new();
        let analysis = compiler.analyze("fuzz.asxr", &source);
        prop_assert_eq!(analysis.has_errors(), analysis.diagnostics.iter().any(|d| d.is_error()));
    }

    #[test]
    fn generation_is_deterministic(source in asxr_like()) {
        let (program, _) = parse_with_errors(&source);
        let options = asxr::GenerateOptions::default();
        prop_assert_eq!(asxr::generate(&program, &options), asxr::generate(&program, &options));
    }
}
