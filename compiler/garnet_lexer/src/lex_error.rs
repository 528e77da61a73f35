//! Lexer error types.
//!
//! Every error carries the byte span of the offending lexeme. A `LexError`
//! is always terminal for the current parse: the lexer does not resynchronize.

use garnet_ir::Span;
use garnet_lexer_core::Encoding;

/// A positioned lexical error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LexError {
    pub kind: LexErrorKind,
    pub span: Span,
}

impl LexError {
    pub fn new(kind: LexErrorKind, span: Span) -> Self {
        LexError { kind, span }
    }

    /// Human-readable message (no source excerpt; rendering is the
    /// diagnostic layer's job).
    pub fn message(&self) -> String {
        match &self.kind {
            LexErrorKind::UnterminatedString => "unterminated string literal".to_string(),
            LexErrorKind::UnterminatedHeredoc { terminator } => {
                format!("unterminated heredoc; expected closing `{terminator}`")
            }
            LexErrorKind::UnterminatedBlockComment => {
                "unterminated block comment; expected `=end`".to_string()
            }
            LexErrorKind::InvalidEscape { escape } => {
                format!("invalid escape sequence `\\{escape}`")
            }
            LexErrorKind::InvalidUnicodeEscape => "invalid Unicode escape".to_string(),
            LexErrorKind::TrailingUnderscore => {
                "trailing `_` in numeric literal".to_string()
            }
            LexErrorKind::EmptyExponent => "exponent has no digits".to_string(),
            LexErrorKind::EmptyRadixLiteral => {
                "numeric literal has a radix prefix but no digits".to_string()
            }
            LexErrorKind::InvalidOctalDigit => "invalid digit in octal literal".to_string(),
            LexErrorKind::IntegerOverflow => {
                "integer literal does not fit in 64 bits".to_string()
            }
            LexErrorKind::InvalidVariableName => "invalid variable name".to_string(),
            LexErrorKind::UnexpectedCharacter { ch } => {
                format!("unexpected character `{ch}`")
            }
            LexErrorKind::UnknownEncoding { name } => {
                format!("unknown source encoding `{name}`")
            }
            LexErrorKind::InvalidByteSequence { encoding } => {
                format!("invalid byte sequence for {}", encoding.name())
            }
            LexErrorKind::WrongEncodingBom => {
                "UTF-16 byte order mark; Garnet sources must be UTF-8 compatible".to_string()
            }
            LexErrorKind::NulByte => "NUL byte in source".to_string(),
        }
    }
}

/// What went wrong.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LexErrorKind {
    // === Literal errors ===
    /// Missing closing quote.
    UnterminatedString,
    /// Heredoc body ran to EOF without its terminator line.
    UnterminatedHeredoc { terminator: Box<str> },
    /// `=begin` without a matching `=end`.
    UnterminatedBlockComment,
    /// Structurally malformed escape (`\x` with no digits). Unknown
    /// single-character escapes pass through as the literal character and
    /// are not errors.
    InvalidEscape { escape: char },
    /// `\uXXXX` / `\u{...}` with bad digits or an out-of-range scalar.
    InvalidUnicodeEscape,

    // === Numeric errors ===
    /// `100_`
    TrailingUnderscore,
    /// `1e` / `1e+`
    EmptyExponent,
    /// `0x` with no digits.
    EmptyRadixLiteral,
    /// `0o9`, `089`
    InvalidOctalDigit,
    /// Literal exceeds `i64`.
    IntegerOverflow,

    // === Character errors ===
    /// `@1`, `$`, `@@`
    InvalidVariableName,
    /// Byte or character with no token rule.
    UnexpectedCharacter { ch: char },

    // === Encoding errors (surfaced from the source buffer) ===
    UnknownEncoding { name: Box<str> },
    InvalidByteSequence { encoding: Encoding },
    WrongEncodingBom,
    NulByte,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_problem() {
        let err = LexError::new(LexErrorKind::UnterminatedString, Span::new(0, 1));
        assert!(err.message().contains("unterminated"));

        let err = LexError::new(
            LexErrorKind::UnterminatedHeredoc {
                terminator: "EOS".into(),
            },
            Span::new(4, 9),
        );
        assert!(err.message().contains("EOS"));
    }
}
