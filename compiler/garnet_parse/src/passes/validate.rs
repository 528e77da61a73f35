//! Whole-tree structural validation.
//!
//! Checks constraints the grammar deliberately does not encode (keeping
//! the table smaller): a `case` must not mix `when` and `in` clauses, and
//! a `begin` body must not carry an `else` without at least one `rescue`.
//! The tree passes through unchanged on success.

use garnet_ir::{NodeKind, ParseNode};

use crate::error::{ValidationError, ValidationErrorKind};

pub fn validate(node: ParseNode) -> Result<ParseNode, ValidationError> {
    check(&node)?;
    Ok(node)
}

fn check(node: &ParseNode) -> Result<(), ValidationError> {
    match &node.kind {
        NodeKind::Case { clauses, .. } => {
            let nodes = clauses.list_nodes();
            if let Some(first) = nodes.first().map(ParseNode::node_type) {
                if let Some(mixed) = nodes.iter().find(|clause| clause.node_type() != first) {
                    return Err(ValidationError::new(
                        ValidationErrorKind::MixedCaseClauses,
                        mixed.span,
                    ));
                }
            }
        }
        NodeKind::Begin {
            rescues,
            else_body: Some(_),
            ..
        } if rescues.is_empty() => {
            return Err(ValidationError::new(
                ValidationErrorKind::ElseWithoutRescue,
                node.span,
            ));
        }
        _ => {}
    }

    for child in node.child_nodes().flatten() {
        check(child)?;
    }
    if let Some(else_body) = node.case_else() {
        check(else_body)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use garnet_ir::{CaseBuilder, Span};

    fn when_clause(start: u32) -> ParseNode {
        ParseNode::new(
            NodeKind::When {
                expressions: Box::new(ParseNode::new(
                    NodeKind::List {
                        nodes: vec![ParseNode::new(
                            NodeKind::Int { value: 1 },
                            Span::new(start, start + 1),
                        )],
                    },
                    Span::new(start, start + 1),
                )),
                body: None,
            },
            Span::new(start, start + 1),
        )
    }

    fn in_clause(start: u32) -> ParseNode {
        ParseNode::new(
            NodeKind::In {
                pattern: Box::new(ParseNode::new(
                    NodeKind::Int { value: 1 },
                    Span::new(start, start + 1),
                )),
                body: None,
            },
            Span::new(start, start + 1),
        )
    }

    fn case_with(clauses: Vec<ParseNode>) -> ParseNode {
        let span = Span::new(0, 20);
        let list = ParseNode::new(NodeKind::List { nodes: clauses }, Span::new(5, 15));
        CaseBuilder::new(None, list).finish(span)
    }

    #[test]
    fn uniform_clauses_pass() {
        assert!(validate(case_with(vec![when_clause(5), when_clause(8)])).is_ok());
        assert!(validate(case_with(vec![in_clause(5), in_clause(8)])).is_ok());
    }

    #[test]
    fn mixed_clauses_fail_at_the_offending_clause() {
        let err = validate(case_with(vec![when_clause(5), in_clause(9)])).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::MixedCaseClauses);
        assert_eq!(err.span, Span::new(9, 10));
    }

    #[test]
    fn else_without_rescue_fails() {
        let begin = ParseNode::new(
            NodeKind::Begin {
                body: None,
                rescues: Vec::new(),
                else_body: Some(Box::new(ParseNode::new(
                    NodeKind::Int { value: 1 },
                    Span::new(11, 12),
                ))),
                ensure_body: None,
            },
            Span::new(0, 15),
        );
        let err = validate(begin).unwrap_err();
        assert_eq!(err.kind, ValidationErrorKind::ElseWithoutRescue);
        assert_eq!(err.span, Span::new(0, 15));
    }

    #[test]
    fn else_with_rescue_passes() {
        let begin = ParseNode::new(
            NodeKind::Begin {
                body: None,
                rescues: vec![ParseNode::new(
                    NodeKind::Rescue {
                        exceptions: None,
                        variable: None,
                        body: None,
                    },
                    Span::new(6, 12),
                )],
                else_body: Some(Box::new(ParseNode::new(
                    NodeKind::Int { value: 1 },
                    Span::new(18, 19),
                ))),
                ensure_body: None,
            },
            Span::new(0, 22),
        );
        assert!(validate(begin).is_ok());
    }

    #[test]
    fn validation_recurses_into_nested_trees() {
        let nested = ParseNode::new(
            NodeKind::Array {
                elements: vec![case_with(vec![when_clause(5), in_clause(9)])],
            },
            Span::new(0, 20),
        );
        assert!(validate(nested).is_err());
    }
}
