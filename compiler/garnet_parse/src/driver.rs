//! The table-driven shift-reduce driver.
//!
//! A deterministic automaton over a state stack and a value stack: shift
//! pushes the token, reduce pops one rule's worth of values, runs the
//! rule's action (the only place nodes are created) and pushes the result
//! under the goto state. Runtime errors are terminal and carry the exact
//! token span plus the acceptable-terminal set scraped from the table row.

use smallvec::SmallVec;

use garnet_grammar::{Action, ParseTable};
use garnet_ir::{ParseNode, Span};
use garnet_lexer::Lexer;

use crate::actions::{self, Entry, SemValue};
use crate::error::{ParseError, SyntaxError};
use crate::rules::Lang;

pub(crate) fn run(
    lexer: &mut Lexer<'_>,
    table: &ParseTable,
    lang: &Lang,
    debug: bool,
) -> Result<ParseNode, SyntaxError> {
    let mut states: SmallVec<[u32; 32]> = SmallVec::new();
    states.push(table.start_state());
    let mut values: Vec<Entry> = Vec::new();
    let mut token = lexer.next_token()?;

    loop {
        let state = *states.last().unwrap_or(&0);
        let term = lang.terms.of(&token.kind);
        match table.action(state, term) {
            Action::Shift(next) => {
                if debug {
                    tracing::debug!(state, next, token = ?token.kind, "shift");
                }
                states.push(next);
                values.push(Entry {
                    span: Some(token.span),
                    value: SemValue::Token(token),
                });
                token = lexer.next_token()?;
            }
            Action::Reduce(rule) => {
                let info = table.rule(rule);
                let count = usize::from(info.rhs_len);
                let popped: Vec<Entry> = values.split_off(values.len().saturating_sub(count));
                states.truncate(states.len().saturating_sub(count));
                let span = popped
                    .iter()
                    .filter_map(|e| e.span)
                    .reduce(Span::merge);
                if debug {
                    tracing::debug!(state, rule, ?span, "reduce");
                }
                let action = lang
                    .actions
                    .get(usize::from(info.action))
                    .copied()
                    .unwrap_or(actions::ReduceAction::Unit);
                let value = actions::apply(action, span.unwrap_or(Span::DUMMY), popped);

                let top = *states.last().unwrap_or(&0);
                let Some(next) = table.goto(top, info.lhs) else {
                    // A reachable reduction always has a goto entry; this
                    // is a table-generation invariant, surfaced as a plain
                    // parse error rather than a panic if it ever broke.
                    return Err(unexpected(table, state, &token).into());
                };
                states.push(next);
                values.push(Entry { value, span });
            }
            Action::Accept => {
                if debug {
                    tracing::debug!("accept");
                }
                return match values.pop().map(|e| e.value) {
                    Some(SemValue::Node(root)) => Ok(root),
                    _ => Err(unexpected(table, state, &token).into()),
                };
            }
            Action::Error => {
                return Err(unexpected(table, state, &token).into());
            }
        }
    }
}

fn unexpected(table: &ParseTable, state: u32, token: &garnet_ir::Token) -> ParseError {
    ParseError {
        span: token.span,
        found: token.kind.clone(),
        expected: table.expected(state),
    }
}
