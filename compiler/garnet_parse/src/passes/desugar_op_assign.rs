//! Operator-assignment desugaring.
//!
//! `a += e` becomes `a = a + e` (an assignment of a `+` call on the
//! target's read); the short-circuiting forms keep their semantics:
//! `a ||= e` becomes `a = (a || e)`, `a &&= e` becomes `a = (a && e)`.
//! After this pass no `OpAsgn` node remains, which also makes the pass a
//! fixed point of itself.

use garnet_ir::{AssignOp, NodeKind, ParseNode, Span};

use crate::error::ValidationError;
use crate::passes::map_children;

pub fn desugar_op_assign(node: ParseNode) -> Result<ParseNode, ValidationError> {
    Ok(desugar(node))
}

fn desugar(node: ParseNode) -> ParseNode {
    let node = map_children(node, desugar);
    let span = node.span;
    match node.kind {
        NodeKind::OpAsgn { target, op, value } => {
            let inner_span = target.span.merge(value.span);
            let read = target.clone();
            let rhs = match op.method_name() {
                Some(method) => ParseNode::new(
                    NodeKind::Call {
                        receiver: Some(read),
                        name: method.into(),
                        args: vec![*value],
                        block: None,
                    },
                    inner_span,
                ),
                None => {
                    let kind = if op == AssignOp::AndOp {
                        NodeKind::And {
                            left: read,
                            right: value,
                        }
                    } else {
                        NodeKind::Or {
                            left: read,
                            right: value,
                        }
                    };
                    ParseNode::new(kind, inner_span)
                }
            };
            assign_to(&target, rhs, span)
        }
        kind => ParseNode::new(kind, span),
    }
}

/// Build the assignment node matching the read form of `target`.
fn assign_to(target: &ParseNode, value: ParseNode, span: Span) -> ParseNode {
    let value = Box::new(value);
    let kind = match &target.kind {
        NodeKind::Ident { name } => NodeKind::LocalAsgn {
            name: name.clone(),
            value,
        },
        NodeKind::InstVar { name } => NodeKind::InstAsgn {
            name: name.clone(),
            value,
        },
        NodeKind::GlobalVar { name } => NodeKind::GlobalAsgn {
            name: name.clone(),
            value,
        },
        NodeKind::ClassVar { name } => NodeKind::ClassVarAsgn {
            name: name.clone(),
            value,
        },
        NodeKind::Const { name } => NodeKind::ConstDecl {
            name: name.clone(),
            value,
        },
        // The grammar only produces variable reads as op-assign targets.
        _ => NodeKind::LocalAsgn {
            name: "".into(),
            value,
        },
    };
    ParseNode::new(kind, span)
}
