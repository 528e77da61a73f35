//! Grammar representation and builder.

use std::fmt;

/// Terminal symbol id. Id 0 is always the end-of-input marker.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct TermId(pub u16);

/// Nonterminal symbol id.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct NtId(pub u16);

/// A grammar symbol.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Symbol {
    Term(TermId),
    Nt(NtId),
}

/// Operator associativity for precedence declarations.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Assoc {
    /// Ties reduce: `a - b - c` groups as `(a - b) - c`.
    Left,
    /// Ties shift: `a = b = c` groups as `a = (b = c)`.
    Right,
    /// Ties are errors: `a == b == c` does not parse.
    NonAssoc,
}

/// A precedence level with its associativity.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub(crate) struct Prec {
    pub level: u16,
    pub assoc: Assoc,
}

pub(crate) struct TermDef {
    pub name: &'static str,
    pub prec: Option<Prec>,
}

pub(crate) struct NtDef {
    pub name: &'static str,
}

/// One production. `prec` is the resolved rule precedence: an explicit
/// `%prec`-style override, or the precedence of the last terminal in the
/// right-hand side.
pub struct Rule {
    pub lhs: NtId,
    pub rhs: Vec<Symbol>,
    pub action: u16,
    pub(crate) prec: Option<Prec>,
}

/// Incrementally assembled grammar.
///
/// Precedence declarations mirror yacc: each `left`/`right`/`nonassoc`
/// call opens the next (higher) precedence level for the listed terminals.
pub struct GrammarBuilder {
    terminals: Vec<TermDef>,
    nonterminals: Vec<NtDef>,
    rules: Vec<Rule>,
    next_level: u16,
}

impl GrammarBuilder {
    pub fn new() -> Self {
        GrammarBuilder {
            terminals: vec![TermDef {
                name: "end of input",
                prec: None,
            }],
            nonterminals: Vec::new(),
            rules: Vec::new(),
            next_level: 1,
        }
    }

    /// The end-of-input terminal, present in every grammar.
    pub fn eof(&self) -> TermId {
        TermId(0)
    }

    pub fn terminal(&mut self, name: &'static str) -> TermId {
        let id = TermId(self.id_u16(self.terminals.len()));
        self.terminals.push(TermDef { name, prec: None });
        id
    }

    pub fn nonterminal(&mut self, name: &'static str) -> NtId {
        let id = NtId(self.id_u16(self.nonterminals.len()));
        self.nonterminals.push(NtDef { name });
        id
    }

    pub fn left(&mut self, terms: &[TermId]) {
        self.declare(terms, Assoc::Left);
    }

    pub fn right(&mut self, terms: &[TermId]) {
        self.declare(terms, Assoc::Right);
    }

    pub fn nonassoc(&mut self, terms: &[TermId]) {
        self.declare(terms, Assoc::NonAssoc);
    }

    fn declare(&mut self, terms: &[TermId], assoc: Assoc) {
        let level = self.next_level;
        self.next_level += 1;
        for &t in terms {
            self.terminals[t.0 as usize].prec = Some(Prec { level, assoc });
        }
    }

    /// Add a rule. Rule precedence defaults to that of the last terminal
    /// in `rhs` (which may itself carry none).
    pub fn rule(&mut self, lhs: NtId, rhs: &[Symbol], action: u16) {
        let prec = rhs
            .iter()
            .rev()
            .find_map(|sym| match sym {
                Symbol::Term(t) => Some(*t),
                Symbol::Nt(_) => None,
            })
            .and_then(|t| self.terminals[t.0 as usize].prec);
        self.rules.push(Rule {
            lhs,
            rhs: rhs.to_vec(),
            action,
            prec,
        });
    }

    /// Add a rule whose precedence is that of `prec_term` regardless of
    /// its right-hand side (yacc's `%prec`).
    pub fn rule_prec(&mut self, lhs: NtId, rhs: &[Symbol], action: u16, prec_term: TermId) {
        self.rules.push(Rule {
            lhs,
            rhs: rhs.to_vec(),
            action,
            prec: self.terminals[prec_term.0 as usize].prec,
        });
    }

    /// Finish the grammar with `start` as the entry nonterminal. An
    /// augmented rule `start' -> start` is appended; its reduction becomes
    /// the accept action.
    pub fn build(mut self, start: NtId) -> Grammar {
        let internal_start = NtId(self.id_u16(self.nonterminals.len()));
        self.nonterminals.push(NtDef { name: "(start)" });
        self.rules.push(Rule {
            lhs: internal_start,
            rhs: vec![Symbol::Nt(start)],
            action: u16::MAX,
            prec: None,
        });
        Grammar {
            terminals: self.terminals,
            nonterminals: self.nonterminals,
            accept_rule: self.rules.len() - 1,
            rules: self.rules,
        }
    }

    fn id_u16(&self, len: usize) -> u16 {
        u16::try_from(len).unwrap_or(u16::MAX)
    }
}

impl Default for GrammarBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A complete grammar, ready for table generation.
pub struct Grammar {
    pub(crate) terminals: Vec<TermDef>,
    pub(crate) nonterminals: Vec<NtDef>,
    pub(crate) rules: Vec<Rule>,
    /// Index of the augmented `start' -> start` rule.
    pub(crate) accept_rule: usize,
}

impl Grammar {
    pub fn n_terminals(&self) -> usize {
        self.terminals.len()
    }

    pub fn n_nonterminals(&self) -> usize {
        self.nonterminals.len()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn term_name(&self, t: TermId) -> &'static str {
        self.terminals[t.0 as usize].name
    }

    pub fn nt_name(&self, nt: NtId) -> &'static str {
        self.nonterminals[nt.0 as usize].name
    }
}

impl fmt::Debug for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "grammar: {} rules", self.rules.len())?;
        for rule in &self.rules {
            write!(f, "  {} ->", self.nt_name(rule.lhs))?;
            for sym in &rule.rhs {
                match sym {
                    Symbol::Term(t) => write!(f, " {}", self.term_name(*t))?,
                    Symbol::Nt(n) => write!(f, " {}", self.nt_name(*n))?,
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
