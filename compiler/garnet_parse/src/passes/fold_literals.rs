//! Negative-literal folding.
//!
//! The grammar parses `-2` as a unary `-@` call on the literal `2`; this
//! pass collapses that (and the no-op `+@` form) into a signed literal, so
//! downstream consumers see `Int(-2)` the way the original source reads.
//! The fold keeps the unary call's span, which covers the sign.

use garnet_ir::{NodeKind, ParseNode};

use crate::error::ValidationError;
use crate::passes::map_children;

pub fn fold_literals(node: ParseNode) -> Result<ParseNode, ValidationError> {
    Ok(fold(node))
}

fn fold(node: ParseNode) -> ParseNode {
    let node = map_children(node, fold);
    let span = node.span;
    match node.kind {
        NodeKind::Call {
            receiver: Some(operand),
            name,
            args,
            block: None,
        } if args.is_empty() && matches!(&*name, "-@" | "+@") => {
            let negate = &*name == "-@";
            let operand_span = operand.span;
            match operand.kind {
                NodeKind::Int { value } => ParseNode::new(
                    NodeKind::Int {
                        value: if negate { -value } else { value },
                    },
                    span,
                ),
                NodeKind::Float { value } => ParseNode::new(
                    NodeKind::Float {
                        value: if negate { -value } else { value },
                    },
                    span,
                ),
                other => ParseNode::new(
                    NodeKind::Call {
                        receiver: Some(Box::new(ParseNode::new(other, operand_span))),
                        name,
                        args,
                        block: None,
                    },
                    span,
                ),
            }
        }
        kind => ParseNode::new(kind, span),
    }
}
