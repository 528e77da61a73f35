//! LALR(1) automaton construction.
//!
//! States are LR(1) item sets merged by core as they are discovered: a
//! transition that reaches an existing core unions its lookaheads into that
//! state and re-queues it when they grew, so lookaheads keep propagating
//! until the fixed point. The result is the LALR(1) automaton.

use std::collections::{BTreeMap, VecDeque};

use rustc_hash::FxHashMap;

use crate::first::{FirstSets, TermSet};
use crate::grammar::{Grammar, NtId, Symbol, TermId};

/// A dotted rule. Kernel items have `dot > 0` (except in the start state).
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub(crate) struct Item {
    pub rule: u16,
    pub dot: u8,
}

struct State {
    kernel: Vec<Item>,
    lookaheads: Vec<TermSet>,
}

/// The finished automaton, ready for table filling.
pub(crate) struct Automaton {
    /// Per state: terminal shifts, in ascending terminal order.
    pub shifts: Vec<Vec<(TermId, u32)>>,
    /// Per state: nonterminal gotos, in ascending nonterminal order.
    pub gotos: Vec<Vec<(NtId, u32)>>,
    /// Per state: reductions `(rule, lookahead set)`, in rule order.
    pub reductions: Vec<Vec<(u16, TermSet)>>,
}

impl Automaton {
    pub fn n_states(&self) -> usize {
        self.shifts.len()
    }
}

pub(crate) fn build(grammar: &Grammar, firsts: &FirstSets) -> Automaton {
    let n_terms = grammar.n_terminals();
    let rules_of = rules_by_lhs(grammar);

    let accept_rule = u16::try_from(grammar.accept_rule).unwrap_or(u16::MAX);
    let mut states = vec![State {
        kernel: vec![Item {
            rule: accept_rule,
            dot: 0,
        }],
        lookaheads: vec![TermSet::singleton(n_terms, TermId(0))],
    }];
    let mut core_index: FxHashMap<Vec<Item>, u32> = FxHashMap::default();
    core_index.insert(states[0].kernel.clone(), 0);

    let mut transitions: Vec<BTreeMap<u32, u32>> = vec![BTreeMap::new()];
    let mut queue: VecDeque<u32> = VecDeque::from([0]);
    let mut queued = vec![true];

    while let Some(s) = queue.pop_front() {
        let si = s as usize;
        queued[si] = false;

        let closure = close(grammar, firsts, &rules_of, &states[si]);

        // Group advanced items by the symbol after the dot.
        let mut targets: BTreeMap<u32, Vec<(Item, TermSet)>> = BTreeMap::new();
        for (item, la) in &closure {
            let rhs = &grammar.rules[usize::from(item.rule)].rhs;
            if usize::from(item.dot) < rhs.len() {
                let sym = rhs[usize::from(item.dot)];
                targets.entry(sym_key(sym)).or_default().push((
                    Item {
                        rule: item.rule,
                        dot: item.dot + 1,
                    },
                    la.clone(),
                ));
            }
        }

        let mut out = BTreeMap::new();
        for (key, mut advanced) in targets {
            // Merge duplicate advanced items, then sort for a canonical core.
            advanced.sort_by_key(|(item, _)| *item);
            let mut kernel: Vec<Item> = Vec::new();
            let mut lookaheads: Vec<TermSet> = Vec::new();
            for (item, la) in advanced {
                if kernel.last() == Some(&item) {
                    if let Some(last) = lookaheads.last_mut() {
                        last.union(&la);
                    }
                } else {
                    kernel.push(item);
                    lookaheads.push(la);
                }
            }

            let target = match core_index.get(&kernel) {
                Some(&existing) => {
                    let state = &mut states[existing as usize];
                    let mut grew = false;
                    for (dst, src) in state.lookaheads.iter_mut().zip(&lookaheads) {
                        grew |= dst.union(src);
                    }
                    if grew && !queued[existing as usize] {
                        queued[existing as usize] = true;
                        queue.push_back(existing);
                    }
                    existing
                }
                None => {
                    let id = u32::try_from(states.len()).unwrap_or(u32::MAX);
                    core_index.insert(kernel.clone(), id);
                    states.push(State { kernel, lookaheads });
                    transitions.push(BTreeMap::new());
                    queued.push(true);
                    queue.push_back(id);
                    id
                }
            };
            out.insert(key, target);
        }
        transitions[si] = out;
    }

    // Lookaheads are final; extract shifts, gotos and reductions.
    let mut shifts = Vec::with_capacity(states.len());
    let mut gotos = Vec::with_capacity(states.len());
    let mut reductions = Vec::with_capacity(states.len());
    for (state, trans) in states.iter().zip(&transitions) {
        let mut state_shifts = Vec::new();
        let mut state_gotos = Vec::new();
        for (&key, &target) in trans {
            match sym_unkey(key) {
                Symbol::Term(t) => state_shifts.push((t, target)),
                Symbol::Nt(n) => state_gotos.push((n, target)),
            }
        }
        shifts.push(state_shifts);
        gotos.push(state_gotos);

        let mut state_reductions: Vec<(u16, TermSet)> = close(grammar, firsts, &rules_of, state)
            .into_iter()
            .filter(|(item, _)| {
                usize::from(item.dot) == grammar.rules[usize::from(item.rule)].rhs.len()
            })
            .map(|(item, la)| (item.rule, la))
            .collect();
        state_reductions.sort_by_key(|(rule, _)| *rule);
        reductions.push(state_reductions);
    }

    Automaton {
        shifts,
        gotos,
        reductions,
    }
}

/// LR(1) closure of a state: kernel items plus every derived dot-0 item
/// with its accumulated lookaheads.
fn close(
    grammar: &Grammar,
    firsts: &FirstSets,
    rules_of: &[Vec<u16>],
    state: &State,
) -> Vec<(Item, TermSet)> {
    let mut derived: FxHashMap<u16, TermSet> = FxHashMap::default();

    let mut changed = true;
    while changed {
        changed = false;
        for (item, la) in state.kernel.iter().zip(&state.lookaheads) {
            changed |= expand(grammar, firsts, rules_of, *item, la, &mut derived);
        }
        let snapshot: Vec<u16> = derived.keys().copied().collect();
        for rule in snapshot {
            let la = derived[&rule].clone();
            let item = Item { rule, dot: 0 };
            changed |= expand(grammar, firsts, rules_of, item, &la, &mut derived);
        }
    }

    let mut items: Vec<(Item, TermSet)> = state
        .kernel
        .iter()
        .copied()
        .zip(state.lookaheads.iter().cloned())
        .collect();
    let mut extra: Vec<(Item, TermSet)> = derived
        .into_iter()
        .map(|(rule, la)| (Item { rule, dot: 0 }, la))
        .collect();
    extra.sort_by_key(|(item, _)| *item);
    items.extend(extra);
    items
}

/// If `item`'s dot sits before a nonterminal, add that nonterminal's rules
/// as derived items with lookahead FIRST(rest · la). Returns true when any
/// derived lookahead set grew.
fn expand(
    grammar: &Grammar,
    firsts: &FirstSets,
    rules_of: &[Vec<u16>],
    item: Item,
    la: &TermSet,
    derived: &mut FxHashMap<u16, TermSet>,
) -> bool {
    let rhs = &grammar.rules[usize::from(item.rule)].rhs;
    let Some(Symbol::Nt(nt)) = rhs.get(usize::from(item.dot)) else {
        return false;
    };
    let follow = firsts.first_of(&rhs[usize::from(item.dot) + 1..], la);
    let mut changed = false;
    for &rule in &rules_of[usize::from(nt.0)] {
        let entry = derived
            .entry(rule)
            .or_insert_with(|| TermSet::empty(grammar.n_terminals()));
        changed |= entry.union(&follow);
    }
    changed
}

fn rules_by_lhs(grammar: &Grammar) -> Vec<Vec<u16>> {
    let mut rules_of = vec![Vec::new(); grammar.n_nonterminals()];
    for (idx, rule) in grammar.rules().iter().enumerate() {
        rules_of[usize::from(rule.lhs.0)].push(u16::try_from(idx).unwrap_or(u16::MAX));
    }
    rules_of
}

const NT_KEY_BASE: u32 = 0x1_0000;

fn sym_key(sym: Symbol) -> u32 {
    match sym {
        Symbol::Term(t) => u32::from(t.0),
        Symbol::Nt(n) => NT_KEY_BASE + u32::from(n.0),
    }
}

fn sym_unkey(key: u32) -> Symbol {
    if key >= NT_KEY_BASE {
        Symbol::Nt(NtId((key - NT_KEY_BASE) as u16))
    } else {
        Symbol::Term(TermId(key as u16))
    }
}
