use pretty_assertions::assert_eq;

use garnet_ir::{AssignOp, Span, TokenKind};
use garnet_lexer_core::SourceBuffer;

use crate::{Lexer, LexError, LexErrorKind};

fn kinds(source: &str) -> Vec<TokenKind> {
    let buffer = SourceBuffer::new(source.as_bytes());
    Lexer::new(&buffer)
        .tokenize()
        .unwrap_or_else(|e| panic!("lex failed on {source:?}: {}", e.message()))
        .into_iter()
        .map(|t| t.kind)
        .collect()
}

fn lex_err(source: &str) -> LexError {
    let buffer = SourceBuffer::new(source.as_bytes());
    match Lexer::new(&buffer).tokenize() {
        Ok(tokens) => panic!("expected error for {source:?}, got {tokens:?}"),
        Err(err) => err,
    }
}

fn ident(name: &str) -> TokenKind {
    TokenKind::Ident { name: name.into() }
}

fn int(value: i64) -> TokenKind {
    TokenKind::Integer { value }
}

fn string(value: &str) -> TokenKind {
    TokenKind::Str { value: value.into() }
}

// ─── Numbers ────────────────────────────────────────────────────────────

#[test]
fn integers() {
    assert_eq!(kinds("42"), vec![int(42)]);
    assert_eq!(kinds("1_000_000"), vec![int(1_000_000)]);
    assert_eq!(kinds("0xff"), vec![int(255)]);
    assert_eq!(kinds("0b1010"), vec![int(10)]);
    assert_eq!(kinds("0o17"), vec![int(15)]);
    assert_eq!(kinds("017"), vec![int(15)]);
    assert_eq!(kinds("0"), vec![int(0)]);
}

#[test]
fn floats() {
    assert_eq!(kinds("3.14"), vec![TokenKind::Float { value: 3.14 }]);
    assert_eq!(kinds("1e3"), vec![TokenKind::Float { value: 1000.0 }]);
    assert_eq!(kinds("2.5e-1"), vec![TokenKind::Float { value: 0.25 }]);
}

#[test]
fn int_then_method_call() {
    assert_eq!(kinds("1.abs"), vec![int(1), TokenKind::Dot, ident("abs")]);
}

#[test]
fn numeric_errors() {
    assert_eq!(lex_err("100_").kind, LexErrorKind::TrailingUnderscore);
    assert_eq!(lex_err("1e").kind, LexErrorKind::EmptyExponent);
    assert_eq!(lex_err("1e+").kind, LexErrorKind::EmptyExponent);
    assert_eq!(lex_err("0x").kind, LexErrorKind::EmptyRadixLiteral);
    assert_eq!(lex_err("089").kind, LexErrorKind::InvalidOctalDigit);
    assert_eq!(
        lex_err("99999999999999999999").kind,
        LexErrorKind::IntegerOverflow
    );
}

// ─── Strings & heredocs ─────────────────────────────────────────────────

#[test]
fn double_quoted_strings() {
    assert_eq!(kinds(r#""hello""#), vec![string("hello")]);
    assert_eq!(kinds(r#""a\nb""#), vec![string("a\nb")]);
    assert_eq!(kinds(r#""\x41""#), vec![string("A")]);
    assert_eq!(kinds(r#""\q""#), vec![string("q")]);
}

#[test]
fn single_quoted_strings() {
    assert_eq!(kinds(r"'a\nb'"), vec![string(r"a\nb")]);
    assert_eq!(kinds(r"'it\'s'"), vec![string("it's")]);
}

#[test]
fn unterminated_string_points_at_opening_quote() {
    let err = lex_err("\"abc");
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!(err.span, Span::new(0, 1));
}

#[test]
fn unterminated_string_after_other_tokens() {
    let err = lex_err("a = \"abc");
    assert_eq!(err.kind, LexErrorKind::UnterminatedString);
    assert_eq!(err.span, Span::new(4, 5));
}

#[test]
fn heredoc_basic() {
    let toks = kinds("x = <<EOS\nhello\nworld\nEOS\ny");
    assert_eq!(
        toks,
        vec![
            ident("x"),
            TokenKind::Assign,
            string("hello\nworld\n"),
            TokenKind::Newline,
            ident("y"),
        ]
    );
}

#[test]
fn heredoc_squiggly_dedents() {
    let toks = kinds("x = <<~EOS\n  a\n    b\n  EOS\n");
    assert_eq!(
        toks,
        vec![ident("x"), TokenKind::Assign, string("a\n  b\n"), TokenKind::Newline]
    );
}

#[test]
fn heredoc_single_quoted_is_raw() {
    let toks = kinds("x = <<'EOS'\na\\nb\nEOS\n");
    assert_eq!(
        toks,
        vec![ident("x"), TokenKind::Assign, string("a\\nb\n"), TokenKind::Newline]
    );
}

#[test]
fn two_heredocs_on_one_line() {
    let toks = kinds("f(<<A, <<B)\none\nA\ntwo\nB\n");
    assert_eq!(
        toks,
        vec![
            ident("f"),
            TokenKind::LParen,
            string("one\n"),
            TokenKind::Comma,
            string("two\n"),
            TokenKind::RParen,
            TokenKind::Newline,
        ]
    );
}

#[test]
fn unterminated_heredoc_reports_opener() {
    let err = lex_err("x = <<EOS\nbody");
    assert!(matches!(err.kind, LexErrorKind::UnterminatedHeredoc { .. }));
    assert_eq!(err.span, Span::new(4, 9));
}

#[test]
fn shift_is_not_a_heredoc_after_a_value() {
    assert_eq!(kinds("a << b"), vec![ident("a"), TokenKind::LShift, ident("b")]);
}

// ─── Symbols and colons ─────────────────────────────────────────────────

#[test]
fn symbols() {
    assert_eq!(kinds(":foo"), vec![TokenKind::Symbol { name: "foo".into() }]);
    assert_eq!(
        kinds(":empty?"),
        vec![TokenKind::Symbol { name: "empty?".into() }]
    );
}

#[test]
fn ternary_colon_is_not_a_symbol() {
    assert_eq!(
        kinds("a ? b : c"),
        vec![
            ident("a"),
            TokenKind::Question,
            ident("b"),
            TokenKind::Colon,
            ident("c"),
        ]
    );
}

#[test]
fn ternary_with_symbol_arms() {
    assert_eq!(
        kinds("a ? :b : :c"),
        vec![
            ident("a"),
            TokenKind::Question,
            TokenKind::Symbol { name: "b".into() },
            TokenKind::Colon,
            TokenKind::Symbol { name: "c".into() },
        ]
    );
}

// ─── Variables ──────────────────────────────────────────────────────────

#[test]
fn prefixed_variables() {
    assert_eq!(kinds("@a"), vec![TokenKind::InstVar { name: "@a".into() }]);
    assert_eq!(kinds("@@a"), vec![TokenKind::ClassVar { name: "@@a".into() }]);
    assert_eq!(kinds("$a"), vec![TokenKind::GlobalVar { name: "$a".into() }]);
    assert_eq!(kinds("Foo"), vec![TokenKind::Const { name: "Foo".into() }]);
}

#[test]
fn bad_variable_names() {
    assert_eq!(lex_err("@1").kind, LexErrorKind::InvalidVariableName);
    assert_eq!(lex_err("$ x").kind, LexErrorKind::InvalidVariableName);
}

// ─── State-dependent keywords ───────────────────────────────────────────

#[test]
fn modifier_if_after_value() {
    assert_eq!(
        kinds("a if b"),
        vec![ident("a"), TokenKind::KwIfMod, ident("b")]
    );
    assert_eq!(kinds("if b"), vec![TokenKind::KwIf, ident("b")]);
}

#[test]
fn modifier_after_return() {
    assert_eq!(
        kinds("return if b"),
        vec![TokenKind::KwReturn, TokenKind::KwIfMod, ident("b")]
    );
}

#[test]
fn do_after_while_condition_is_the_loop_separator() {
    assert_eq!(
        kinds("while a do end"),
        vec![TokenKind::KwWhile, ident("a"), TokenKind::KwDoCond, TokenKind::KwEnd]
    );
}

#[test]
fn do_without_loop_head_opens_a_block() {
    assert_eq!(
        kinds("foo do end"),
        vec![ident("foo"), TokenKind::KwDoBlock, TokenKind::KwEnd]
    );
}

#[test]
fn do_inside_loop_body_opens_a_block() {
    // the newline ends the condition, so the inner `do` is a block again
    let toks = kinds("while a\nfoo do end\nend");
    assert_eq!(
        toks,
        vec![
            TokenKind::KwWhile,
            ident("a"),
            TokenKind::Newline,
            ident("foo"),
            TokenKind::KwDoBlock,
            TokenKind::KwEnd,
            TokenKind::Newline,
            TokenKind::KwEnd,
        ]
    );
}

#[test]
fn parenthesized_condition_still_resolves_do() {
    assert_eq!(
        kinds("while (a) do end"),
        vec![
            TokenKind::KwWhile,
            TokenKind::LParen,
            ident("a"),
            TokenKind::RParen,
            TokenKind::KwDoCond,
            TokenKind::KwEnd,
        ]
    );
}

// ─── Braces and brackets ────────────────────────────────────────────────

#[test]
fn brace_splits_on_state() {
    assert_eq!(
        kinds("foo { }"),
        vec![ident("foo"), TokenKind::LBraceBlock, TokenKind::RBrace]
    );
    assert_eq!(
        kinds("a = { }"),
        vec![ident("a"), TokenKind::Assign, TokenKind::LBrace, TokenKind::RBrace]
    );
}

#[test]
fn bracket_splits_on_state() {
    assert_eq!(
        kinds("a[1]"),
        vec![ident("a"), TokenKind::LBracketIdx, int(1), TokenKind::RBracket]
    );
    assert_eq!(
        kinds("a = [1]"),
        vec![
            ident("a"),
            TokenKind::Assign,
            TokenKind::LBracket,
            int(1),
            TokenKind::RBracket,
        ]
    );
}

// ─── Newlines ───────────────────────────────────────────────────────────

#[test]
fn newline_insignificant_after_operator() {
    assert_eq!(kinds("a +\nb"), vec![ident("a"), TokenKind::Plus, ident("b")]);
}

#[test]
fn newline_significant_after_value() {
    assert_eq!(
        kinds("a\nb"),
        vec![ident("a"), TokenKind::Newline, ident("b")]
    );
}

#[test]
fn leading_dot_continues_the_chain() {
    assert_eq!(
        kinds("a\n  .b"),
        vec![ident("a"), TokenKind::Dot, ident("b")]
    );
}

#[test]
fn line_continuation() {
    assert_eq!(kinds("a \\\nb"), vec![ident("a"), ident("b")]);
}

#[test]
fn comments_are_skipped() {
    assert_eq!(kinds("a # trailing\nb"), vec![ident("a"), TokenKind::Newline, ident("b")]);
    assert_eq!(kinds("=begin\nanything\n=end\na"), vec![ident("a")]);
}

#[test]
fn unterminated_block_comment() {
    assert_eq!(
        lex_err("=begin\nnever closed").kind,
        LexErrorKind::UnterminatedBlockComment
    );
}

// ─── Operators ──────────────────────────────────────────────────────────

#[test]
fn operator_assignment_forms() {
    assert_eq!(
        kinds("a += 1"),
        vec![ident("a"), TokenKind::OpAssign { op: AssignOp::Add }, int(1)]
    );
    assert_eq!(
        kinds("a ||= 1"),
        vec![ident("a"), TokenKind::OpAssign { op: AssignOp::OrOp }, int(1)]
    );
    assert_eq!(
        kinds("a **= 2"),
        vec![ident("a"), TokenKind::OpAssign { op: AssignOp::Pow }, int(2)]
    );
    assert_eq!(
        kinds("a <<= 2"),
        vec![ident("a"), TokenKind::OpAssign { op: AssignOp::LShift }, int(2)]
    );
}

#[test]
fn comparison_operators() {
    assert_eq!(
        kinds("a <=> b"),
        vec![ident("a"), TokenKind::Cmp, ident("b")]
    );
    assert_eq!(kinds("a <= b"), vec![ident("a"), TokenKind::LtEq, ident("b")]);
    assert_eq!(kinds("a != b"), vec![ident("a"), TokenKind::NotEq, ident("b")]);
}

#[test]
fn keyword_after_dot_is_a_method_name() {
    assert_eq!(
        kinds("a.class"),
        vec![ident("a"), TokenKind::Dot, ident("class")]
    );
    assert_eq!(
        kinds("a\n  .end"),
        vec![ident("a"), TokenKind::Dot, ident("end")]
    );
}

#[test]
fn method_name_suffixes() {
    assert_eq!(kinds("empty?"), vec![ident("empty?")]);
    assert_eq!(kinds("save!"), vec![ident("save!")]);
    // `!=`/`?=` never swallow the `=`
    assert_eq!(kinds("a!= 1"), vec![ident("a"), TokenKind::NotEq, int(1)]);
}

// ─── Encodings ──────────────────────────────────────────────────────────

#[test]
fn unknown_magic_comment_encoding() {
    let err = lex_err("# coding: klingon\na = 1");
    assert!(matches!(err.kind, LexErrorKind::UnknownEncoding { .. }));
}

#[test]
fn invalid_utf8_byte() {
    let buffer = SourceBuffer::new(b"a = \xFF");
    let err = Lexer::new(&buffer).tokenize().unwrap_err();
    assert!(matches!(err.kind, LexErrorKind::InvalidByteSequence { .. }));
}

#[test]
fn ascii_source_with_high_bytes_is_rejected() {
    let err = lex_err("# coding: us-ascii\ns = \"héllo\"");
    assert!(matches!(err.kind, LexErrorKind::InvalidByteSequence { .. }));
}

#[test]
fn peek_does_not_consume() {
    let buffer = SourceBuffer::new(b"a b");
    let mut lexer = Lexer::new(&buffer);
    let peeked = lexer.peek().unwrap();
    let first = lexer.next_token().unwrap();
    assert_eq!(peeked, first);
    assert_eq!(first.kind, ident("a"));
    assert_eq!(lexer.next_token().unwrap().kind, ident("b"));
}

#[test]
fn spans_are_byte_accurate() {
    let buffer = SourceBuffer::new(b"ab + cd");
    let tokens = Lexer::new(&buffer).tokenize().unwrap();
    assert_eq!(tokens[0].span, Span::new(0, 2));
    assert_eq!(tokens[1].span, Span::new(3, 4));
    assert_eq!(tokens[2].span, Span::new(5, 7));
}
