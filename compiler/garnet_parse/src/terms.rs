//! Terminal inventory: one [`TermId`] per token kind, plus the
//! token-to-terminal mapping the driver uses.
//!
//! Terminal names double as the diagnostic vocabulary ("expected one of
//! ..."), so they match [`TokenKind::describe`] where a token exists.

use garnet_grammar::{GrammarBuilder, TermId};
use garnet_ir::TokenKind;

/// Every terminal of the Ruby grammar.
///
/// `uminus` is a precedence-only pseudo-terminal (yacc's `tUMINUS`): it is
/// never produced by the lexer, only referenced by `%prec` overrides.
pub(crate) struct Terms {
    pub eof: TermId,

    pub int: TermId,
    pub float: TermId,
    pub string: TermId,
    pub symbol: TermId,
    pub ident: TermId,
    pub constant: TermId,
    pub ivar: TermId,
    pub gvar: TermId,
    pub cvar: TermId,

    pub k_nil: TermId,
    pub k_true: TermId,
    pub k_false: TermId,
    pub k_self: TermId,
    pub k_if: TermId,
    pub k_elsif: TermId,
    pub k_else: TermId,
    pub k_unless: TermId,
    pub k_while: TermId,
    pub k_until: TermId,
    pub k_case: TermId,
    pub k_when: TermId,
    pub k_in: TermId,
    pub k_then: TermId,
    pub k_do_block: TermId,
    pub k_do_cond: TermId,
    pub k_def: TermId,
    pub k_class: TermId,
    pub k_module: TermId,
    pub k_begin: TermId,
    pub k_rescue: TermId,
    pub k_ensure: TermId,
    pub k_end: TermId,
    pub k_return: TermId,
    pub k_break: TermId,
    pub k_next: TermId,
    pub k_and: TermId,
    pub k_or: TermId,
    pub k_not: TermId,
    pub k_if_mod: TermId,
    pub k_unless_mod: TermId,
    pub k_while_mod: TermId,
    pub k_until_mod: TermId,

    pub plus: TermId,
    pub minus: TermId,
    pub star: TermId,
    pub slash: TermId,
    pub percent: TermId,
    pub pow: TermId,
    pub assign: TermId,
    pub op_asgn: TermId,
    pub eqeq: TermId,
    pub neq: TermId,
    pub cmp: TermId,
    pub lt: TermId,
    pub leq: TermId,
    pub gt: TermId,
    pub geq: TermId,
    pub andop: TermId,
    pub orop: TermId,
    pub bang: TermId,
    pub amp: TermId,
    pub pipe: TermId,
    pub caret: TermId,
    pub lshift: TermId,
    pub rshift: TermId,
    pub lparen: TermId,
    pub rparen: TermId,
    pub lbrack: TermId,
    pub lbrack_idx: TermId,
    pub rbrack: TermId,
    pub lbrace: TermId,
    pub lbrace_blk: TermId,
    pub rbrace: TermId,
    pub comma: TermId,
    pub dot: TermId,
    pub assoc: TermId,
    pub question: TermId,
    pub colon: TermId,
    pub newline: TermId,
    pub semi: TermId,

    pub uminus: TermId,
}

impl Terms {
    pub fn declare(g: &mut GrammarBuilder) -> Terms {
        Terms {
            eof: g.eof(),

            int: g.terminal("integer literal"),
            float: g.terminal("float literal"),
            string: g.terminal("string literal"),
            symbol: g.terminal("symbol literal"),
            ident: g.terminal("identifier"),
            constant: g.terminal("constant"),
            ivar: g.terminal("instance variable"),
            gvar: g.terminal("global variable"),
            cvar: g.terminal("class variable"),

            k_nil: g.terminal("`nil`"),
            k_true: g.terminal("`true`"),
            k_false: g.terminal("`false`"),
            k_self: g.terminal("`self`"),
            k_if: g.terminal("`if`"),
            k_elsif: g.terminal("`elsif`"),
            k_else: g.terminal("`else`"),
            k_unless: g.terminal("`unless`"),
            k_while: g.terminal("`while`"),
            k_until: g.terminal("`until`"),
            k_case: g.terminal("`case`"),
            k_when: g.terminal("`when`"),
            k_in: g.terminal("`in`"),
            k_then: g.terminal("`then`"),
            k_do_block: g.terminal("`do`"),
            k_do_cond: g.terminal("`do`"),
            k_def: g.terminal("`def`"),
            k_class: g.terminal("`class`"),
            k_module: g.terminal("`module`"),
            k_begin: g.terminal("`begin`"),
            k_rescue: g.terminal("`rescue`"),
            k_ensure: g.terminal("`ensure`"),
            k_end: g.terminal("`end`"),
            k_return: g.terminal("`return`"),
            k_break: g.terminal("`break`"),
            k_next: g.terminal("`next`"),
            k_and: g.terminal("`and`"),
            k_or: g.terminal("`or`"),
            k_not: g.terminal("`not`"),
            k_if_mod: g.terminal("`if`"),
            k_unless_mod: g.terminal("`unless`"),
            k_while_mod: g.terminal("`while`"),
            k_until_mod: g.terminal("`until`"),

            plus: g.terminal("`+`"),
            minus: g.terminal("`-`"),
            star: g.terminal("`*`"),
            slash: g.terminal("`/`"),
            percent: g.terminal("`%`"),
            pow: g.terminal("`**`"),
            assign: g.terminal("`=`"),
            op_asgn: g.terminal("operator assignment"),
            eqeq: g.terminal("`==`"),
            neq: g.terminal("`!=`"),
            cmp: g.terminal("`<=>`"),
            lt: g.terminal("`<`"),
            leq: g.terminal("`<=`"),
            gt: g.terminal("`>`"),
            geq: g.terminal("`>=`"),
            andop: g.terminal("`&&`"),
            orop: g.terminal("`||`"),
            bang: g.terminal("`!`"),
            amp: g.terminal("`&`"),
            pipe: g.terminal("`|`"),
            caret: g.terminal("`^`"),
            lshift: g.terminal("`<<`"),
            rshift: g.terminal("`>>`"),
            lparen: g.terminal("`(`"),
            rparen: g.terminal("`)`"),
            lbrack: g.terminal("`[`"),
            lbrack_idx: g.terminal("`[`"),
            rbrack: g.terminal("`]`"),
            lbrace: g.terminal("`{`"),
            lbrace_blk: g.terminal("`{`"),
            rbrace: g.terminal("`}`"),
            comma: g.terminal("`,`"),
            dot: g.terminal("`.`"),
            assoc: g.terminal("`=>`"),
            question: g.terminal("`?`"),
            colon: g.terminal("`:`"),
            newline: g.terminal("newline"),
            semi: g.terminal("`;`"),

            uminus: g.terminal("unary minus"),
        }
    }

    /// The terminal a token resolves to.
    pub fn of(&self, kind: &TokenKind) -> TermId {
        match kind {
            TokenKind::Integer { .. } => self.int,
            TokenKind::Float { .. } => self.float,
            TokenKind::Str { .. } => self.string,
            TokenKind::Symbol { .. } => self.symbol,
            TokenKind::Ident { .. } => self.ident,
            TokenKind::Const { .. } => self.constant,
            TokenKind::InstVar { .. } => self.ivar,
            TokenKind::GlobalVar { .. } => self.gvar,
            TokenKind::ClassVar { .. } => self.cvar,
            TokenKind::KwNil => self.k_nil,
            TokenKind::KwTrue => self.k_true,
            TokenKind::KwFalse => self.k_false,
            TokenKind::KwSelf => self.k_self,
            TokenKind::KwIf => self.k_if,
            TokenKind::KwElsif => self.k_elsif,
            TokenKind::KwElse => self.k_else,
            TokenKind::KwUnless => self.k_unless,
            TokenKind::KwWhile => self.k_while,
            TokenKind::KwUntil => self.k_until,
            TokenKind::KwCase => self.k_case,
            TokenKind::KwWhen => self.k_when,
            TokenKind::KwIn => self.k_in,
            TokenKind::KwThen => self.k_then,
            TokenKind::KwDoBlock => self.k_do_block,
            TokenKind::KwDoCond => self.k_do_cond,
            TokenKind::KwDef => self.k_def,
            TokenKind::KwClass => self.k_class,
            TokenKind::KwModule => self.k_module,
            TokenKind::KwBegin => self.k_begin,
            TokenKind::KwRescue => self.k_rescue,
            TokenKind::KwEnsure => self.k_ensure,
            TokenKind::KwEnd => self.k_end,
            TokenKind::KwReturn => self.k_return,
            TokenKind::KwBreak => self.k_break,
            TokenKind::KwNext => self.k_next,
            TokenKind::KwAnd => self.k_and,
            TokenKind::KwOr => self.k_or,
            TokenKind::KwNot => self.k_not,
            TokenKind::KwIfMod => self.k_if_mod,
            TokenKind::KwUnlessMod => self.k_unless_mod,
            TokenKind::KwWhileMod => self.k_while_mod,
            TokenKind::KwUntilMod => self.k_until_mod,
            TokenKind::Plus => self.plus,
            TokenKind::Minus => self.minus,
            TokenKind::Star => self.star,
            TokenKind::Slash => self.slash,
            TokenKind::Percent => self.percent,
            TokenKind::Pow => self.pow,
            TokenKind::Assign => self.assign,
            TokenKind::OpAssign { .. } => self.op_asgn,
            TokenKind::EqEq => self.eqeq,
            TokenKind::NotEq => self.neq,
            TokenKind::Cmp => self.cmp,
            TokenKind::Lt => self.lt,
            TokenKind::LtEq => self.leq,
            TokenKind::Gt => self.gt,
            TokenKind::GtEq => self.geq,
            TokenKind::AndOp => self.andop,
            TokenKind::OrOp => self.orop,
            TokenKind::Bang => self.bang,
            TokenKind::Amp => self.amp,
            TokenKind::Pipe => self.pipe,
            TokenKind::Caret => self.caret,
            TokenKind::LShift => self.lshift,
            TokenKind::RShift => self.rshift,
            TokenKind::LParen => self.lparen,
            TokenKind::RParen => self.rparen,
            TokenKind::LBracket => self.lbrack,
            TokenKind::LBracketIdx => self.lbrack_idx,
            TokenKind::RBracket => self.rbrack,
            TokenKind::LBrace => self.lbrace,
            TokenKind::LBraceBlock => self.lbrace_blk,
            TokenKind::RBrace => self.rbrace,
            TokenKind::Comma => self.comma,
            TokenKind::Dot => self.dot,
            TokenKind::Assoc => self.assoc,
            TokenKind::Question => self.question,
            TokenKind::Colon => self.colon,
            TokenKind::Newline => self.newline,
            TokenKind::Semi => self.semi,
            TokenKind::Eof => self.eof,
        }
    }
}
