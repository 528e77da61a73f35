//! Token types for the Garnet lexer.
//!
//! Tokens are immutable once produced: a kind (with any literal payload
//! riding in the variant) plus the byte span of the lexeme. Line and column
//! are not stored; they are derived from the span through the source
//! buffer's line index when a diagnostic needs them.
//!
//! Several keywords come in context-resolved pairs (`KwDoBlock`/`KwDoCond`,
//! `KwIf`/`KwIfMod`, ...). The split is decided by the lexer from its
//! expression state, so the grammar never has to disambiguate them.

use crate::Span;
use std::fmt;

/// A token with its span in the source.
#[derive(Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }

    /// True for the synthetic end-of-input token.
    #[inline]
    pub fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {}", self.kind, self.span)
    }
}

/// Operator half of an operator-assignment token (`+=`, `||=`, ...).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum AssignOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
    LShift,
    RShift,
    BitAnd,
    BitOr,
    BitXor,
    AndOp,
    OrOp,
}

impl AssignOp {
    /// The method the operator half desugars to, or `None` for the
    /// short-circuiting `&&=`/`||=` forms (those desugar to `And`/`Or`
    /// nodes, not calls).
    pub fn method_name(self) -> Option<&'static str> {
        match self {
            AssignOp::Add => Some("+"),
            AssignOp::Sub => Some("-"),
            AssignOp::Mul => Some("*"),
            AssignOp::Div => Some("/"),
            AssignOp::Mod => Some("%"),
            AssignOp::Pow => Some("**"),
            AssignOp::LShift => Some("<<"),
            AssignOp::RShift => Some(">>"),
            AssignOp::BitAnd => Some("&"),
            AssignOp::BitOr => Some("|"),
            AssignOp::BitXor => Some("^"),
            AssignOp::AndOp | AssignOp::OrOp => None,
        }
    }

    /// The full source spelling, `+=` and friends.
    pub fn symbol(self) -> &'static str {
        match self {
            AssignOp::Add => "+=",
            AssignOp::Sub => "-=",
            AssignOp::Mul => "*=",
            AssignOp::Div => "/=",
            AssignOp::Mod => "%=",
            AssignOp::Pow => "**=",
            AssignOp::LShift => "<<=",
            AssignOp::RShift => ">>=",
            AssignOp::BitAnd => "&=",
            AssignOp::BitOr => "|=",
            AssignOp::BitXor => "^=",
            AssignOp::AndOp => "&&=",
            AssignOp::OrOp => "||=",
        }
    }
}

/// Token kinds for Garnet.
#[derive(Clone, PartialEq, Debug)]
pub enum TokenKind {
    /// Integer literal: `42`, `1_000`, `0xff`
    Integer { value: i64 },
    /// Float literal: `3.14`, `2.5e-8`
    Float { value: f64 },
    /// String literal (after escape cooking): `"hello"`, `'raw'`, heredocs
    Str { value: Box<str> },
    /// Symbol literal: `:foo`
    Symbol { name: Box<str> },
    /// Lowercase identifier: `foo`
    Ident { name: Box<str> },
    /// Uppercase constant: `Foo`
    Const { name: Box<str> },
    /// Instance variable: `@foo`
    InstVar { name: Box<str> },
    /// Global variable: `$foo`
    GlobalVar { name: Box<str> },
    /// Class variable: `@@foo`
    ClassVar { name: Box<str> },

    KwNil,
    KwTrue,
    KwFalse,
    KwSelf,
    KwIf,
    KwElsif,
    KwElse,
    KwUnless,
    KwWhile,
    KwUntil,
    KwCase,
    KwWhen,
    KwIn,
    KwThen,
    /// `do` opening a block argument.
    KwDoBlock,
    /// `do` terminating a `while`/`until` condition.
    KwDoCond,
    KwDef,
    KwClass,
    KwModule,
    KwBegin,
    KwRescue,
    KwEnsure,
    KwEnd,
    KwReturn,
    KwBreak,
    KwNext,
    KwAnd,
    KwOr,
    KwNot,
    /// `if` in statement-modifier position.
    KwIfMod,
    KwUnlessMod,
    KwWhileMod,
    KwUntilMod,

    Plus,     // +
    Minus,    // -
    Star,     // *
    Slash,    // /
    Percent,  // %
    Pow,      // **
    Assign,   // =
    /// Operator assignment: `+=`, `||=`, ...
    OpAssign { op: AssignOp },
    EqEq,     // ==
    NotEq,    // !=
    Cmp,      // <=>
    Lt,       // <
    LtEq,     // <=
    Gt,       // >
    GtEq,     // >=
    AndOp,    // &&
    OrOp,     // ||
    Bang,     // !
    Amp,      // &
    Pipe,     // |
    Caret,    // ^
    LShift,   // <<
    RShift,   // >>
    LParen,   // (
    RParen,   // )
    /// `[` opening an array literal (expression position).
    LBracket,
    /// `[` opening an index call on the preceding value: `a[i]`.
    LBracketIdx,
    RBracket, // ]
    /// `{` opening a hash literal (expression position).
    LBrace,
    /// `{` opening a block argument: `foo { ... }`.
    LBraceBlock,
    RBrace,   // }
    Comma,    // ,
    Dot,      // .
    Assoc,    // =>
    Question, // ?
    Colon,    // :
    Newline,
    Semi, // ;
    Eof,
}

impl TokenKind {
    /// Human-readable description for error messages, ignoring payloads.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenKind::Integer { .. } => "integer literal",
            TokenKind::Float { .. } => "float literal",
            TokenKind::Str { .. } => "string literal",
            TokenKind::Symbol { .. } => "symbol literal",
            TokenKind::Ident { .. } => "identifier",
            TokenKind::Const { .. } => "constant",
            TokenKind::InstVar { .. } => "instance variable",
            TokenKind::GlobalVar { .. } => "global variable",
            TokenKind::ClassVar { .. } => "class variable",
            TokenKind::KwNil => "`nil`",
            TokenKind::KwTrue => "`true`",
            TokenKind::KwFalse => "`false`",
            TokenKind::KwSelf => "`self`",
            TokenKind::KwIf | TokenKind::KwIfMod => "`if`",
            TokenKind::KwElsif => "`elsif`",
            TokenKind::KwElse => "`else`",
            TokenKind::KwUnless | TokenKind::KwUnlessMod => "`unless`",
            TokenKind::KwWhile | TokenKind::KwWhileMod => "`while`",
            TokenKind::KwUntil | TokenKind::KwUntilMod => "`until`",
            TokenKind::KwCase => "`case`",
            TokenKind::KwWhen => "`when`",
            TokenKind::KwIn => "`in`",
            TokenKind::KwThen => "`then`",
            TokenKind::KwDoBlock | TokenKind::KwDoCond => "`do`",
            TokenKind::KwDef => "`def`",
            TokenKind::KwClass => "`class`",
            TokenKind::KwModule => "`module`",
            TokenKind::KwBegin => "`begin`",
            TokenKind::KwRescue => "`rescue`",
            TokenKind::KwEnsure => "`ensure`",
            TokenKind::KwEnd => "`end`",
            TokenKind::KwReturn => "`return`",
            TokenKind::KwBreak => "`break`",
            TokenKind::KwNext => "`next`",
            TokenKind::KwAnd => "`and`",
            TokenKind::KwOr => "`or`",
            TokenKind::KwNot => "`not`",
            TokenKind::Plus => "`+`",
            TokenKind::Minus => "`-`",
            TokenKind::Star => "`*`",
            TokenKind::Slash => "`/`",
            TokenKind::Percent => "`%`",
            TokenKind::Pow => "`**`",
            TokenKind::Assign => "`=`",
            TokenKind::OpAssign { .. } => "operator assignment",
            TokenKind::EqEq => "`==`",
            TokenKind::NotEq => "`!=`",
            TokenKind::Cmp => "`<=>`",
            TokenKind::Lt => "`<`",
            TokenKind::LtEq => "`<=`",
            TokenKind::Gt => "`>`",
            TokenKind::GtEq => "`>=`",
            TokenKind::AndOp => "`&&`",
            TokenKind::OrOp => "`||`",
            TokenKind::Bang => "`!`",
            TokenKind::Amp => "`&`",
            TokenKind::Pipe => "`|`",
            TokenKind::Caret => "`^`",
            TokenKind::LShift => "`<<`",
            TokenKind::RShift => "`>>`",
            TokenKind::LParen => "`(`",
            TokenKind::RParen => "`)`",
            TokenKind::LBracket | TokenKind::LBracketIdx => "`[`",
            TokenKind::RBracket => "`]`",
            TokenKind::LBrace | TokenKind::LBraceBlock => "`{`",
            TokenKind::RBrace => "`}`",
            TokenKind::Comma => "`,`",
            TokenKind::Dot => "`.`",
            TokenKind::Assoc => "`=>`",
            TokenKind::Question => "`?`",
            TokenKind::Colon => "`:`",
            TokenKind::Newline => "newline",
            TokenKind::Semi => "`;`",
            TokenKind::Eof => "end of input",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_ignores_payload() {
        let a = TokenKind::Integer { value: 1 };
        let b = TokenKind::Integer { value: 99 };
        assert_eq!(a.describe(), b.describe());
    }

    #[test]
    fn assign_op_method_names() {
        assert_eq!(AssignOp::Add.method_name(), Some("+"));
        assert_eq!(AssignOp::Pow.method_name(), Some("**"));
        assert_eq!(AssignOp::AndOp.method_name(), None);
        assert_eq!(AssignOp::OrOp.method_name(), None);
    }

    #[test]
    fn assign_op_symbols_round_trip_spelling() {
        assert_eq!(AssignOp::LShift.symbol(), "<<=");
        assert_eq!(AssignOp::OrOp.symbol(), "||=");
    }

    #[test]
    fn token_debug_includes_span() {
        let tok = Token::new(TokenKind::KwEnd, Span::new(3, 6));
        assert_eq!(format!("{tok:?}"), "KwEnd @ 3..6");
    }
}
