//! Post-processing passes.
//!
//! Each pass is a pure `ParseNode -> Result<ParseNode, ValidationError>`
//! transform, individually idempotent on its own output. They run exactly
//! once, in this order:
//!
//! 1. [`fold_literals`]: collapse unary minus/plus on numeric literals
//!    into signed literals.
//! 2. [`desugar_op_assign`]: rewrite `a += e` / `a ||= e` forms into plain
//!    assignments over the target's read.
//! 3. [`validate`]: whole-tree structural checks (`when`/`in` mixing,
//!    `else` without `rescue`).

mod desugar_op_assign;
mod fold_literals;
mod validate;

pub use desugar_op_assign::desugar_op_assign;
pub use fold_literals::fold_literals;
pub use validate::validate;

use garnet_ir::{HashPair, NodeKind, ParseNode};

/// Rebuild `node` with `f` applied to every direct child, bottom-up when
/// `f` itself recurses through this helper first.
pub(crate) fn map_children(node: ParseNode, f: fn(ParseNode) -> ParseNode) -> ParseNode {
    let ParseNode { span, kind } = node;
    let map_box = |b: Box<ParseNode>| Box::new(f(*b));
    let map_opt = |o: Option<Box<ParseNode>>| o.map(|b| Box::new(f(*b)));
    let map_vec = |v: Vec<ParseNode>| v.into_iter().map(f).collect::<Vec<_>>();

    let kind = match kind {
        NodeKind::Nil
        | NodeKind::True
        | NodeKind::False
        | NodeKind::SelfRef
        | NodeKind::Int { .. }
        | NodeKind::Float { .. }
        | NodeKind::Str { .. }
        | NodeKind::Symbol { .. }
        | NodeKind::Ident { .. }
        | NodeKind::InstVar { .. }
        | NodeKind::GlobalVar { .. }
        | NodeKind::ClassVar { .. }
        | NodeKind::Const { .. } => kind,

        NodeKind::Array { elements } => NodeKind::Array {
            elements: map_vec(elements),
        },
        NodeKind::Hash { pairs } => NodeKind::Hash {
            pairs: pairs
                .into_iter()
                .map(|pair| HashPair {
                    key: f(pair.key),
                    value: f(pair.value),
                })
                .collect(),
        },
        NodeKind::LocalAsgn { name, value } => NodeKind::LocalAsgn {
            name,
            value: map_box(value),
        },
        NodeKind::InstAsgn { name, value } => NodeKind::InstAsgn {
            name,
            value: map_box(value),
        },
        NodeKind::GlobalAsgn { name, value } => NodeKind::GlobalAsgn {
            name,
            value: map_box(value),
        },
        NodeKind::ClassVarAsgn { name, value } => NodeKind::ClassVarAsgn {
            name,
            value: map_box(value),
        },
        NodeKind::ConstDecl { name, value } => NodeKind::ConstDecl {
            name,
            value: map_box(value),
        },
        NodeKind::OpAsgn { target, op, value } => NodeKind::OpAsgn {
            target: map_box(target),
            op,
            value: map_box(value),
        },
        NodeKind::Call {
            receiver,
            name,
            args,
            block,
        } => NodeKind::Call {
            receiver: map_opt(receiver),
            name,
            args: map_vec(args),
            block: map_opt(block),
        },
        NodeKind::Iter { params, body } => NodeKind::Iter {
            params: map_opt(params),
            body: map_opt(body),
        },
        NodeKind::If {
            condition,
            then_body,
            else_body,
        } => NodeKind::If {
            condition: map_box(condition),
            then_body: map_opt(then_body),
            else_body: map_opt(else_body),
        },
        NodeKind::While { condition, body } => NodeKind::While {
            condition: map_box(condition),
            body: map_opt(body),
        },
        NodeKind::Until { condition, body } => NodeKind::Until {
            condition: map_box(condition),
            body: map_opt(body),
        },
        NodeKind::Case {
            subject,
            clauses,
            else_body,
        } => NodeKind::Case {
            subject: map_opt(subject),
            clauses: map_box(clauses),
            else_body: map_opt(else_body),
        },
        NodeKind::When { expressions, body } => NodeKind::When {
            expressions: map_box(expressions),
            body: map_opt(body),
        },
        NodeKind::In { pattern, body } => NodeKind::In {
            pattern: map_box(pattern),
            body: map_opt(body),
        },
        NodeKind::Begin {
            body,
            rescues,
            else_body,
            ensure_body,
        } => NodeKind::Begin {
            body: map_opt(body),
            rescues: map_vec(rescues),
            else_body: map_opt(else_body),
            ensure_body: map_opt(ensure_body),
        },
        NodeKind::Rescue {
            exceptions,
            variable,
            body,
        } => NodeKind::Rescue {
            exceptions: map_opt(exceptions),
            variable,
            body: map_opt(body),
        },
        NodeKind::Return { value } => NodeKind::Return {
            value: map_opt(value),
        },
        NodeKind::Break { value } => NodeKind::Break {
            value: map_opt(value),
        },
        NodeKind::Next { value } => NodeKind::Next {
            value: map_opt(value),
        },
        NodeKind::Def { name, params, body } => NodeKind::Def {
            name,
            params: map_vec(params),
            body: map_opt(body),
        },
        NodeKind::Class {
            path,
            superclass,
            body,
        } => NodeKind::Class {
            path: map_box(path),
            superclass: map_opt(superclass),
            body: map_opt(body),
        },
        NodeKind::Module { path, body } => NodeKind::Module {
            path: map_box(path),
            body: map_opt(body),
        },
        NodeKind::Param { name, default } => NodeKind::Param {
            name,
            default: map_opt(default),
        },
        NodeKind::And { left, right } => NodeKind::And {
            left: map_box(left),
            right: map_box(right),
        },
        NodeKind::Or { left, right } => NodeKind::Or {
            left: map_box(left),
            right: map_box(right),
        },
        NodeKind::Not { expr } => NodeKind::Not {
            expr: map_box(expr),
        },
        NodeKind::Block { statements } => NodeKind::Block {
            statements: map_vec(statements),
        },
        NodeKind::List { nodes } => NodeKind::List {
            nodes: map_vec(nodes),
        },
    };
    ParseNode::new(kind, span)
}
