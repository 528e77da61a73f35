//! Parse-level error types.
//!
//! Three kinds, all terminal for the parse at hand: [`LexError`] from the
//! tokenizer, [`ParseError`] from the table driver, [`ValidationError`]
//! from post-processing. [`SyntaxError`] is the umbrella the entry points
//! return; every kind converts to a [`Diagnostic`] for rendering.

use std::fmt;

use garnet_diagnostic::{Diagnostic, ErrorCode};
use garnet_ir::{Span, TokenKind};
use garnet_lexer::{LexError, LexErrorKind};

/// The driver met a token no action accepts.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseError {
    /// Span of the offending token (a point at end of input).
    pub span: Span,
    /// The token that could not be consumed.
    pub found: TokenKind,
    /// Names of the terminals the current state would have accepted.
    pub expected: Vec<&'static str>,
}

impl ParseError {
    pub fn message(&self) -> String {
        format!("unexpected {}", self.found.describe())
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let mut d = Diagnostic::error(ErrorCode::E2001)
            .with_message(self.message())
            .with_label(self.span, format!("found {}", self.found.describe()));
        if !self.expected.is_empty() {
            let mut list = self.expected.clone();
            list.sort_unstable();
            list.dedup();
            d = d.with_note(format!("expected one of: {}", list.join(", ")));
        }
        d
    }
}

/// A structurally valid parse that violates a tree-level constraint.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    pub kind: ValidationErrorKind,
    /// Inherited from the violating node.
    pub span: Span,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// A `case` mixes `when` and `in` clauses.
    MixedCaseClauses,
    /// A `begin` carries an `else` without any `rescue`.
    ElseWithoutRescue,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, span: Span) -> Self {
        ValidationError { kind, span }
    }

    pub fn message(&self) -> &'static str {
        match self.kind {
            ValidationErrorKind::MixedCaseClauses => {
                "`case` cannot mix `when` and `in` clauses"
            }
            ValidationErrorKind::ElseWithoutRescue => {
                "`else` without `rescue` is useless"
            }
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        let code = match self.kind {
            ValidationErrorKind::MixedCaseClauses => ErrorCode::E3001,
            ValidationErrorKind::ElseWithoutRescue => ErrorCode::E3002,
        };
        Diagnostic::error(code)
            .with_message(self.message())
            .with_label(self.span, "")
    }
}

/// Umbrella error returned by the parse entry points.
#[derive(Clone, Debug, PartialEq)]
pub enum SyntaxError {
    Lex(LexError),
    Parse(ParseError),
    Validation(ValidationError),
}

impl SyntaxError {
    pub fn span(&self) -> Span {
        match self {
            SyntaxError::Lex(e) => e.span,
            SyntaxError::Parse(e) => e.span,
            SyntaxError::Validation(e) => e.span,
        }
    }

    pub fn message(&self) -> String {
        match self {
            SyntaxError::Lex(e) => e.message(),
            SyntaxError::Parse(e) => e.message(),
            SyntaxError::Validation(e) => e.message().to_string(),
        }
    }

    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            SyntaxError::Lex(e) => lex_diagnostic(e),
            SyntaxError::Parse(e) => e.to_diagnostic(),
            SyntaxError::Validation(e) => e.to_diagnostic(),
        }
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.message(), self.span())
    }
}

impl std::error::Error for SyntaxError {}

impl From<LexError> for SyntaxError {
    fn from(e: LexError) -> Self {
        SyntaxError::Lex(e)
    }
}

impl From<ParseError> for SyntaxError {
    fn from(e: ParseError) -> Self {
        SyntaxError::Parse(e)
    }
}

impl From<ValidationError> for SyntaxError {
    fn from(e: ValidationError) -> Self {
        SyntaxError::Validation(e)
    }
}

fn lex_diagnostic(e: &LexError) -> Diagnostic {
    let code = match &e.kind {
        LexErrorKind::UnterminatedString => ErrorCode::E1001,
        LexErrorKind::UnterminatedHeredoc { .. } => ErrorCode::E1002,
        LexErrorKind::UnterminatedBlockComment => ErrorCode::E1003,
        LexErrorKind::InvalidEscape { .. } => ErrorCode::E1004,
        LexErrorKind::InvalidUnicodeEscape => ErrorCode::E1005,
        LexErrorKind::TrailingUnderscore
        | LexErrorKind::EmptyExponent
        | LexErrorKind::EmptyRadixLiteral
        | LexErrorKind::InvalidOctalDigit => ErrorCode::E1006,
        LexErrorKind::IntegerOverflow => ErrorCode::E1007,
        LexErrorKind::InvalidVariableName => ErrorCode::E1008,
        LexErrorKind::UnexpectedCharacter { .. } => ErrorCode::E1009,
        LexErrorKind::UnknownEncoding { .. } => ErrorCode::E1010,
        LexErrorKind::InvalidByteSequence { .. } => ErrorCode::E1011,
        LexErrorKind::WrongEncodingBom => ErrorCode::E1012,
        LexErrorKind::NulByte => ErrorCode::E1013,
    };
    Diagnostic::error(code)
        .with_message(e.message())
        .with_label(e.span, "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_diagnostic_lists_expectations() {
        let err = ParseError {
            span: Span::new(2, 3),
            found: TokenKind::RParen,
            expected: vec!["integer literal", "identifier"],
        };
        let d = err.to_diagnostic();
        assert_eq!(d.code, ErrorCode::E2001);
        assert!(d.notes[0].contains("integer literal"));
    }

    #[test]
    fn lex_error_maps_to_lexical_code() {
        let err = SyntaxError::from(LexError::new(
            LexErrorKind::UnterminatedString,
            Span::new(0, 1),
        ));
        assert!(err.to_diagnostic().code.is_lexical());
    }
}
