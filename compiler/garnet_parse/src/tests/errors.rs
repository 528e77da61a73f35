//! Failure taxonomy: every error kind is terminal, positioned, and never
//! a panic; no partial tree escapes.

use garnet_ir::{Span, TokenKind};
use garnet_lexer::LexErrorKind;

use crate::{SyntaxError, ValidationErrorKind};

fn parse_err(source: &str) -> SyntaxError {
    match crate::parse(source.as_bytes()) {
        Ok(root) => panic!("expected an error for {source:?}, got {root:?}"),
        Err(err) => err,
    }
}

// ─── Lexical ────────────────────────────────────────────────────────────

#[test]
fn unterminated_string_is_a_lex_error_at_the_opening_quote() {
    let err = parse_err("\"abc");
    let SyntaxError::Lex(lex) = &err else {
        panic!("expected a lex error, got {err:?}");
    };
    assert_eq!(lex.kind, LexErrorKind::UnterminatedString);
    assert_eq!(lex.span, Span::new(0, 1));
}

#[test]
fn lex_errors_surface_mid_program() {
    let err = parse_err("a = 1\nb = \"oops");
    assert!(matches!(&err, SyntaxError::Lex(l) if l.span.start == 10));
}

// ─── Grammar ────────────────────────────────────────────────────────────

#[test]
fn unexpected_token_reports_position_and_expectations() {
    let err = parse_err("x = = 1");
    let SyntaxError::Parse(parse) = &err else {
        panic!("expected a parse error, got {err:?}");
    };
    assert_eq!(parse.span, Span::new(4, 5));
    assert_eq!(parse.found, TokenKind::Assign);
    assert!(parse.expected.contains(&"integer literal"));
    assert!(parse.expected.contains(&"identifier"));
}

#[test]
fn error_at_end_of_input_points_past_the_source() {
    let err = parse_err("a +");
    let SyntaxError::Parse(parse) = &err else {
        panic!("expected a parse error");
    };
    assert_eq!(parse.found, TokenKind::Eof);
    assert_eq!(parse.span, Span::point(3));
}

#[test]
fn comparison_operators_do_not_chain() {
    // `==` is non-associative; the tie is rejected at generation time.
    let err = parse_err("a == b == c");
    assert!(matches!(&err, SyntaxError::Parse(p) if p.found == TokenKind::EqEq));
}

#[test]
fn unclosed_delimiters_fail_at_eof() {
    assert!(matches!(parse_err("foo(1"), SyntaxError::Parse(_)));
    assert!(matches!(parse_err("[1, 2"), SyntaxError::Parse(_)));
    assert!(matches!(parse_err("if a\n  b\n"), SyntaxError::Parse(_)));
}

#[test]
fn excluded_forms_error_rather_than_misparse() {
    // attribute and index assignment are outside the accepted subset
    assert!(matches!(parse_err("a.b = 1"), SyntaxError::Parse(_)));
    assert!(matches!(parse_err("a[0] = 1"), SyntaxError::Parse(_)));
}

// ─── Validation ─────────────────────────────────────────────────────────

#[test]
fn mixed_when_and_in_clauses_fail_validation() {
    let err = parse_err("case x\nwhen 1\n  :a\nin [2]\n  :b\nend");
    let SyntaxError::Validation(validation) = &err else {
        panic!("expected a validation error, got {err:?}");
    };
    assert_eq!(validation.kind, ValidationErrorKind::MixedCaseClauses);
    // position inherited from the violating clause (the `in` at byte 19)
    assert_eq!(validation.span.start, 19);
}

#[test]
fn begin_else_without_rescue_fails_validation() {
    let err = parse_err("begin\n  a\nelse\n  b\nend");
    assert!(matches!(
        &err,
        SyntaxError::Validation(v) if v.kind == ValidationErrorKind::ElseWithoutRescue
    ));
}

// ─── Rendering ──────────────────────────────────────────────────────────

#[test]
fn every_error_converts_to_a_coded_diagnostic() {
    for source in ["\"abc", "x = = 1", "begin\n  a\nelse\n  b\nend"] {
        let diagnostic = parse_err(source).to_diagnostic();
        assert!(!diagnostic.message.is_empty());
        assert!(diagnostic.primary_span().is_some(), "source: {source:?}");
    }
}
