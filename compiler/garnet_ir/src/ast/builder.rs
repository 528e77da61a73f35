//! Two-phase node builders.
//!
//! A handful of constructs learn their last piece after the main node is
//! conceptually complete (a `case` head and clause list are reduced before
//! the optional `else` arm is). Rather than a mutable setter on an
//! otherwise-immutable node, those go through a builder: mutable while the
//! parser assembles it, gone once `finish` produces the node. A finished
//! node can never be retro-attached to.

use crate::Span;

use super::{NodeKind, ParseNode};

/// Builder for [`NodeKind::Case`] nodes.
///
/// `subject` may be absent for the bodyless `case` head form. `clauses`
/// must be a `List` of `When`/`In` nodes; the grammar guarantees it is
/// non-empty.
#[derive(Debug)]
pub struct CaseBuilder {
    subject: Option<ParseNode>,
    clauses: ParseNode,
    else_body: Option<ParseNode>,
}

impl CaseBuilder {
    pub fn new(subject: Option<ParseNode>, clauses: ParseNode) -> Self {
        CaseBuilder {
            subject,
            clauses,
            else_body: None,
        }
    }

    /// Attach the `else` arm.
    #[must_use]
    pub fn else_body(mut self, node: Option<ParseNode>) -> Self {
        self.else_body = node;
        self
    }

    /// Produce the immutable node. `span` must cover the whole
    /// `case ... end` region.
    pub fn finish(self, span: Span) -> ParseNode {
        ParseNode::new(
            NodeKind::Case {
                subject: self.subject.map(Box::new),
                clauses: Box::new(self.clauses),
                else_body: self.else_body.map(Box::new),
            },
            span,
        )
    }
}
