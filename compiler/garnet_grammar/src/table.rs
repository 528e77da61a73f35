//! Flat action/goto table with yacc-style conflict resolution.
//!
//! Actions are packed into a dense `u32` array (2-bit tag, 30-bit value):
//! the table is the generated, versioned data asset the driver interprets
//! at runtime, safely shareable across threads once built.

use std::fmt;

use crate::first::FirstSets;
use crate::grammar::{Assoc, Grammar, NtId, TermId};
use crate::lalr;

/// One resolved table cell.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Action {
    Shift(u32),
    Reduce(u32),
    Accept,
    Error,
}

const TAG_ERROR: u32 = 0;
const TAG_SHIFT: u32 = 1;
const TAG_REDUCE: u32 = 2;
const TAG_ACCEPT: u32 = 3;

fn pack(action: Action) -> u32 {
    match action {
        Action::Error => TAG_ERROR,
        Action::Shift(s) => TAG_SHIFT | (s << 2),
        Action::Reduce(r) => TAG_REDUCE | (r << 2),
        Action::Accept => TAG_ACCEPT,
    }
}

fn unpack(cell: u32) -> Action {
    match cell & 0b11 {
        TAG_SHIFT => Action::Shift(cell >> 2),
        TAG_REDUCE => Action::Reduce(cell >> 2),
        TAG_ACCEPT => Action::Accept,
        _ => Action::Error,
    }
}

/// Reduction metadata the driver needs: what to pop, where to go, which
/// semantic action to run.
#[derive(Copy, Clone, Debug)]
pub struct RuleInfo {
    pub lhs: NtId,
    pub rhs_len: u8,
    pub action: u16,
}

/// The generated LALR(1) parse table. Immutable after generation.
pub struct ParseTable {
    n_terms: usize,
    n_nts: usize,
    actions: Box<[u32]>,
    gotos: Box<[u32]>,
    rules: Box<[RuleInfo]>,
    term_names: Box<[&'static str]>,
    n_states: usize,
    sr_conflicts: u32,
    rr_conflicts: u32,
}

impl ParseTable {
    /// Generate the table for `grammar`.
    ///
    /// Conflicts are resolved at generation time, never at runtime:
    /// shift/reduce by precedence and associativity where both sides carry
    /// a precedence (equal levels: `Left` reduces, `Right` shifts,
    /// `NonAssoc` errors), otherwise default shift, counted in
    /// [`sr_conflicts`](Self::sr_conflicts); reduce/reduce by the earliest
    /// rule, counted in [`rr_conflicts`](Self::rr_conflicts).
    pub fn generate(grammar: &Grammar) -> ParseTable {
        let firsts = FirstSets::compute(grammar);
        let automaton = lalr::build(grammar, &firsts);

        let n_terms = grammar.n_terminals();
        let n_nts = grammar.n_nonterminals();
        let n_states = automaton.n_states();
        let accept_rule = grammar.accept_rule;

        let mut actions = vec![pack(Action::Error); n_states * n_terms].into_boxed_slice();
        let mut gotos = vec![u32::MAX; n_states * n_nts].into_boxed_slice();
        let mut sr_conflicts = 0u32;
        let mut rr_conflicts = 0u32;

        for state in 0..n_states {
            for &(nt, target) in &automaton.gotos[state] {
                gotos[state * n_nts + usize::from(nt.0)] = target;
            }
            for &(t, target) in &automaton.shifts[state] {
                actions[state * n_terms + usize::from(t.0)] = pack(Action::Shift(target));
            }
            for (rule, la) in &automaton.reductions[state] {
                for t in la.iter() {
                    let cell = &mut actions[state * n_terms + usize::from(t.0)];
                    let new = if usize::from(*rule) == accept_rule {
                        Action::Accept
                    } else {
                        Action::Reduce(u32::from(*rule))
                    };
                    let resolved = resolve(
                        grammar,
                        unpack(*cell),
                        new,
                        t,
                        &mut sr_conflicts,
                        &mut rr_conflicts,
                    );
                    *cell = pack(resolved);
                }
            }
        }

        ParseTable {
            n_terms,
            n_nts,
            actions,
            gotos,
            rules: grammar
                .rules()
                .iter()
                .map(|r| RuleInfo {
                    lhs: r.lhs,
                    rhs_len: u8::try_from(r.rhs.len()).unwrap_or(u8::MAX),
                    action: r.action,
                })
                .collect(),
            term_names: grammar.terminals.iter().map(|t| t.name).collect(),
            n_states,
            sr_conflicts,
            rr_conflicts,
        }
    }

    #[inline]
    pub fn action(&self, state: u32, term: TermId) -> Action {
        unpack(self.actions[state as usize * self.n_terms + usize::from(term.0)])
    }

    #[inline]
    pub fn goto(&self, state: u32, nt: NtId) -> Option<u32> {
        let cell = self.gotos[state as usize * self.n_nts + usize::from(nt.0)];
        (cell != u32::MAX).then_some(cell)
    }

    #[inline]
    pub fn rule(&self, rule: u32) -> RuleInfo {
        self.rules[rule as usize]
    }

    /// The automaton's entry state.
    pub fn start_state(&self) -> u32 {
        0
    }

    pub fn n_states(&self) -> usize {
        self.n_states
    }

    /// Shift/reduce conflicts resolved by the default-shift rule (those
    /// settled by declared precedence are not conflicts).
    pub fn sr_conflicts(&self) -> u32 {
        self.sr_conflicts
    }

    /// Reduce/reduce conflicts resolved by earliest-rule.
    pub fn rr_conflicts(&self) -> u32 {
        self.rr_conflicts
    }

    pub fn term_name(&self, t: TermId) -> &'static str {
        self.term_names[usize::from(t.0)]
    }

    /// Names of the terminals acceptable in `state`, for diagnostics.
    pub fn expected(&self, state: u32) -> Vec<&'static str> {
        (0..self.n_terms)
            .filter(|&t| {
                self.action(state, TermId(t as u16)) != Action::Error
            })
            .map(|t| self.term_names[t])
            .collect()
    }
}

impl fmt::Debug for ParseTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ParseTable {{ states: {}, terms: {}, sr: {}, rr: {} }}",
            self.n_states, self.n_terms, self.sr_conflicts, self.rr_conflicts
        )
    }
}

/// Resolve a new action against the cell's existing one.
fn resolve(
    grammar: &Grammar,
    existing: Action,
    new: Action,
    term: TermId,
    sr_conflicts: &mut u32,
    rr_conflicts: &mut u32,
) -> Action {
    match (existing, new) {
        (Action::Error, action) => action,
        (Action::Shift(s), Action::Reduce(r)) => {
            shift_reduce(grammar, s, r, term, sr_conflicts)
        }
        (Action::Reduce(r), Action::Shift(s)) => {
            shift_reduce(grammar, s, r, term, sr_conflicts)
        }
        (Action::Reduce(r1), Action::Reduce(r2)) => {
            *rr_conflicts += 1;
            Action::Reduce(r1.min(r2))
        }
        // Accept only ever lands on EOF in the final state; nothing
        // competes with it, and identical re-inserts are no-ops.
        (existing, _) => existing,
    }
}

fn shift_reduce(
    grammar: &Grammar,
    shift_to: u32,
    rule: u32,
    term: TermId,
    sr_conflicts: &mut u32,
) -> Action {
    let rule_prec = grammar.rules[rule as usize].prec;
    let term_prec = grammar.terminals[usize::from(term.0)].prec;
    match (rule_prec, term_prec) {
        (Some(rp), Some(tp)) => {
            if rp.level > tp.level {
                Action::Reduce(rule)
            } else if rp.level < tp.level {
                Action::Shift(shift_to)
            } else {
                match tp.assoc {
                    Assoc::Left => Action::Reduce(rule),
                    Assoc::Right => Action::Shift(shift_to),
                    Assoc::NonAssoc => Action::Error,
                }
            }
        }
        _ => {
            *sr_conflicts += 1;
            Action::Shift(shift_to)
        }
    }
}
