//! `ParseNode` and the closed set of node variants.
//!
//! # Invariants
//!
//! - A node's `span` covers the union of all of its children's spans.
//! - `child_nodes()` yields direct children in source order, with explicit
//!   `None` gaps where an absent child is positionally meaningful (a
//!   subject-less `case` yields a leading gap, a receiver-less call yields
//!   a leading gap). Generic walkers therefore see one uniform shape per
//!   variant regardless of which optional pieces are present.

use smallvec::SmallVec;

use crate::token::AssignOp;
use crate::visitor::Visitor;
use crate::Span;

use super::NodeType;

/// One node of the parse tree.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseNode {
    pub span: Span,
    pub kind: NodeKind,
}

/// A single `key => value` entry of a hash literal.
#[derive(Clone, Debug, PartialEq)]
pub struct HashPair {
    pub key: ParseNode,
    pub value: ParseNode,
}

/// Node variants (closed set).
///
/// Children are owned directly; there is no sharing and no parent links.
/// Where Ruby semantics need a distinction the parser cannot make (bare
/// identifier: local variable vs receiver-less call), the node records the
/// surface form and the decision is left to semantic analysis.
#[derive(Clone, Debug, PartialEq)]
pub enum NodeKind {
    // === Literals ===
    Nil,
    True,
    False,
    SelfRef,
    Int {
        value: i64,
    },
    Float {
        value: f64,
    },
    Str {
        value: Box<str>,
    },
    Symbol {
        name: Box<str>,
    },
    /// Array literal: `[1, 2]`
    Array {
        elements: Vec<ParseNode>,
    },
    /// Hash literal: `{1 => 2}`
    Hash {
        pairs: Vec<HashPair>,
    },

    // === Variable reads ===
    /// Bare identifier. Local-variable read or receiver-less call;
    /// resolution is downstream semantic analysis.
    Ident {
        name: Box<str>,
    },
    InstVar {
        name: Box<str>,
    },
    GlobalVar {
        name: Box<str>,
    },
    ClassVar {
        name: Box<str>,
    },
    Const {
        name: Box<str>,
    },

    // === Assignment ===
    LocalAsgn {
        name: Box<str>,
        value: Box<ParseNode>,
    },
    InstAsgn {
        name: Box<str>,
        value: Box<ParseNode>,
    },
    GlobalAsgn {
        name: Box<str>,
        value: Box<ParseNode>,
    },
    ClassVarAsgn {
        name: Box<str>,
        value: Box<ParseNode>,
    },
    ConstDecl {
        name: Box<str>,
        value: Box<ParseNode>,
    },
    /// Operator assignment before desugaring: `a += e`, `a ||= e`.
    /// `target` is the read form of the assigned variable. Removed from
    /// the tree by the `desugar_op_assign` pass.
    OpAsgn {
        target: Box<ParseNode>,
        op: AssignOp,
        value: Box<ParseNode>,
    },

    // === Calls ===
    /// Method call: `foo(1)`, `recv.foo`, `a[i]` (name `[]`), `-a`
    /// (name `-@`).
    Call {
        receiver: Option<Box<ParseNode>>,
        name: Box<str>,
        args: Vec<ParseNode>,
        block: Option<Box<ParseNode>>,
    },
    /// Block literal attached to a call: `{ |x| ... }` or `do ... end`.
    /// `params` is a `List` of `Param` nodes.
    Iter {
        params: Option<Box<ParseNode>>,
        body: Option<Box<ParseNode>>,
    },

    // === Control flow ===
    /// `if`/`elsif`/`else`, `unless` (branches swapped at reduction),
    /// ternary, and the statement modifiers.
    If {
        condition: Box<ParseNode>,
        then_body: Option<Box<ParseNode>>,
        else_body: Option<Box<ParseNode>>,
    },
    While {
        condition: Box<ParseNode>,
        body: Option<Box<ParseNode>>,
    },
    Until {
        condition: Box<ParseNode>,
        body: Option<Box<ParseNode>>,
    },
    /// A complete case statement. `subject` is absent for bodyless `case`
    /// heads (intentional, not an error). `clauses` is a `List` of `When`
    /// or `In` nodes, never empty at parse time by grammar construction.
    Case {
        subject: Option<Box<ParseNode>>,
        clauses: Box<ParseNode>,
        else_body: Option<Box<ParseNode>>,
    },
    /// One `when` clause. `expressions` is a `List`.
    When {
        expressions: Box<ParseNode>,
        body: Option<Box<ParseNode>>,
    },
    /// One `in` clause of a pattern-matching case.
    In {
        pattern: Box<ParseNode>,
        body: Option<Box<ParseNode>>,
    },
    /// `begin ... rescue ... else ... ensure ... end`.
    Begin {
        body: Option<Box<ParseNode>>,
        rescues: Vec<ParseNode>,
        else_body: Option<Box<ParseNode>>,
        ensure_body: Option<Box<ParseNode>>,
    },
    /// One `rescue` clause. `exceptions` is a `List` of class expressions;
    /// `variable` is the `=> e` binding.
    Rescue {
        exceptions: Option<Box<ParseNode>>,
        variable: Option<Box<str>>,
        body: Option<Box<ParseNode>>,
    },
    Return {
        value: Option<Box<ParseNode>>,
    },
    Break {
        value: Option<Box<ParseNode>>,
    },
    Next {
        value: Option<Box<ParseNode>>,
    },

    // === Definitions ===
    Def {
        name: Box<str>,
        params: Vec<ParseNode>,
        body: Option<Box<ParseNode>>,
    },
    Class {
        path: Box<ParseNode>,
        superclass: Option<Box<ParseNode>>,
        body: Option<Box<ParseNode>>,
    },
    Module {
        path: Box<ParseNode>,
        body: Option<Box<ParseNode>>,
    },
    /// One formal parameter of a `def` or block.
    Param {
        name: Box<str>,
        default: Option<Box<ParseNode>>,
    },

    // === Boolean operators (short-circuiting, not method calls) ===
    And {
        left: Box<ParseNode>,
        right: Box<ParseNode>,
    },
    Or {
        left: Box<ParseNode>,
        right: Box<ParseNode>,
    },
    Not {
        expr: Box<ParseNode>,
    },

    // === Sequencing ===
    /// Statement sequence (two or more statements).
    Block {
        statements: Vec<ParseNode>,
    },
    /// Generic node list used for clause lists, `when` expression lists
    /// and parameter lists.
    List {
        nodes: Vec<ParseNode>,
    },
}

/// Iterator over a node's direct children, gaps included.
///
/// Restartable by construction: calling [`ParseNode::child_nodes`] again
/// produces a fresh iterator over the same stable sequence.
pub struct ChildNodes<'a> {
    slots: smallvec::IntoIter<[Option<&'a ParseNode>; 8]>,
}

impl<'a> Iterator for ChildNodes<'a> {
    type Item = Option<&'a ParseNode>;

    fn next(&mut self) -> Option<Self::Item> {
        self.slots.next()
    }
}

impl ParseNode {
    pub fn new(kind: NodeKind, span: Span) -> Self {
        ParseNode { span, kind }
    }

    /// The variant tag, for dispatch without structural type tests. O(1).
    pub fn node_type(&self) -> NodeType {
        NodeType::of(&self.kind)
    }

    /// Double dispatch into the matching visitor method.
    pub fn accept<V: Visitor + ?Sized>(&self, visitor: &mut V) -> V::Output {
        match &self.kind {
            NodeKind::Nil => visitor.visit_nil(self),
            NodeKind::True => visitor.visit_true(self),
            NodeKind::False => visitor.visit_false(self),
            NodeKind::SelfRef => visitor.visit_self(self),
            NodeKind::Int { .. } => visitor.visit_int(self),
            NodeKind::Float { .. } => visitor.visit_float(self),
            NodeKind::Str { .. } => visitor.visit_str(self),
            NodeKind::Symbol { .. } => visitor.visit_symbol(self),
            NodeKind::Array { .. } => visitor.visit_array(self),
            NodeKind::Hash { .. } => visitor.visit_hash(self),
            NodeKind::Ident { .. } => visitor.visit_ident(self),
            NodeKind::InstVar { .. } => visitor.visit_inst_var(self),
            NodeKind::GlobalVar { .. } => visitor.visit_global_var(self),
            NodeKind::ClassVar { .. } => visitor.visit_class_var(self),
            NodeKind::Const { .. } => visitor.visit_const(self),
            NodeKind::LocalAsgn { .. } => visitor.visit_local_asgn(self),
            NodeKind::InstAsgn { .. } => visitor.visit_inst_asgn(self),
            NodeKind::GlobalAsgn { .. } => visitor.visit_global_asgn(self),
            NodeKind::ClassVarAsgn { .. } => visitor.visit_class_var_asgn(self),
            NodeKind::ConstDecl { .. } => visitor.visit_const_decl(self),
            NodeKind::OpAsgn { .. } => visitor.visit_op_asgn(self),
            NodeKind::Call { .. } => visitor.visit_call(self),
            NodeKind::Iter { .. } => visitor.visit_iter(self),
            NodeKind::If { .. } => visitor.visit_if(self),
            NodeKind::While { .. } => visitor.visit_while(self),
            NodeKind::Until { .. } => visitor.visit_until(self),
            NodeKind::Case { .. } => visitor.visit_case(self),
            NodeKind::When { .. } => visitor.visit_when(self),
            NodeKind::In { .. } => visitor.visit_in(self),
            NodeKind::Begin { .. } => visitor.visit_begin(self),
            NodeKind::Rescue { .. } => visitor.visit_rescue(self),
            NodeKind::Return { .. } => visitor.visit_return(self),
            NodeKind::Break { .. } => visitor.visit_break(self),
            NodeKind::Next { .. } => visitor.visit_next(self),
            NodeKind::Def { .. } => visitor.visit_def(self),
            NodeKind::Class { .. } => visitor.visit_class(self),
            NodeKind::Module { .. } => visitor.visit_module(self),
            NodeKind::Param { .. } => visitor.visit_param(self),
            NodeKind::And { .. } => visitor.visit_and(self),
            NodeKind::Or { .. } => visitor.visit_or(self),
            NodeKind::Not { .. } => visitor.visit_not(self),
            NodeKind::Block { .. } => visitor.visit_block(self),
            NodeKind::List { .. } => visitor.visit_list(self),
        }
    }

    /// Direct children in source order, with explicit gaps.
    ///
    /// Per the traversal contract, `Case` enumerates exactly
    /// `[subject-or-gap, clauses-list]`; its else body is reachable only
    /// through the typed accessor ([`ParseNode::case_else`]) and
    /// [`crate::visitor::walk_children`].
    pub fn child_nodes(&self) -> ChildNodes<'_> {
        let mut slots: SmallVec<[Option<&ParseNode>; 8]> = SmallVec::new();
        match &self.kind {
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
            | NodeKind::Const { .. } => {}

            NodeKind::Array { elements } => {
                slots.extend(elements.iter().map(Some));
            }
            NodeKind::Hash { pairs } => {
                for pair in pairs {
                    slots.push(Some(&pair.key));
                    slots.push(Some(&pair.value));
                }
            }
            NodeKind::LocalAsgn { value, .. }
            | NodeKind::InstAsgn { value, .. }
            | NodeKind::GlobalAsgn { value, .. }
            | NodeKind::ClassVarAsgn { value, .. }
            | NodeKind::ConstDecl { value, .. } => {
                slots.push(Some(value));
            }
            NodeKind::OpAsgn { target, value, .. } => {
                slots.push(Some(target));
                slots.push(Some(value));
            }
            NodeKind::Call {
                receiver,
                args,
                block,
                ..
            } => {
                slots.push(receiver.as_deref());
                slots.extend(args.iter().map(Some));
                slots.push(block.as_deref());
            }
            NodeKind::Iter { params, body } => {
                slots.push(params.as_deref());
                slots.push(body.as_deref());
            }
            NodeKind::If {
                condition,
                then_body,
                else_body,
            } => {
                slots.push(Some(condition));
                slots.push(then_body.as_deref());
                slots.push(else_body.as_deref());
            }
            NodeKind::While { condition, body } | NodeKind::Until { condition, body } => {
                slots.push(Some(condition));
                slots.push(body.as_deref());
            }
            NodeKind::Case {
                subject, clauses, ..
            } => {
                slots.push(subject.as_deref());
                slots.push(Some(clauses));
            }
            NodeKind::When { expressions, body } => {
                slots.push(Some(expressions));
                slots.push(body.as_deref());
            }
            NodeKind::In { pattern, body } => {
                slots.push(Some(pattern));
                slots.push(body.as_deref());
            }
            NodeKind::Begin {
                body,
                rescues,
                else_body,
                ensure_body,
            } => {
                slots.push(body.as_deref());
                slots.extend(rescues.iter().map(Some));
                slots.push(else_body.as_deref());
                slots.push(ensure_body.as_deref());
            }
            NodeKind::Rescue {
                exceptions, body, ..
            } => {
                slots.push(exceptions.as_deref());
                slots.push(body.as_deref());
            }
            NodeKind::Return { value } | NodeKind::Break { value } | NodeKind::Next { value } => {
                slots.push(value.as_deref());
            }
            NodeKind::Def { params, body, .. } => {
                slots.extend(params.iter().map(Some));
                slots.push(body.as_deref());
            }
            NodeKind::Class {
                path,
                superclass,
                body,
            } => {
                slots.push(Some(path));
                slots.push(superclass.as_deref());
                slots.push(body.as_deref());
            }
            NodeKind::Module { path, body } => {
                slots.push(Some(path));
                slots.push(body.as_deref());
            }
            NodeKind::Param { default, .. } => {
                slots.push(default.as_deref());
            }
            NodeKind::And { left, right } | NodeKind::Or { left, right } => {
                slots.push(Some(left));
                slots.push(Some(right));
            }
            NodeKind::Not { expr } => {
                slots.push(Some(expr));
            }
            NodeKind::Block { statements } => {
                slots.extend(statements.iter().map(Some));
            }
            NodeKind::List { nodes } => {
                slots.extend(nodes.iter().map(Some));
            }
        }
        ChildNodes {
            slots: slots.into_iter(),
        }
    }

    /// Present children only (gaps skipped).
    pub fn present_children(&self) -> impl Iterator<Item = &ParseNode> {
        self.child_nodes().flatten()
    }

    /// The else body of a `Case` node, if any.
    ///
    /// Separate accessor because the traversal contract keeps the else
    /// body out of `child_nodes()`.
    pub fn case_else(&self) -> Option<&ParseNode> {
        match &self.kind {
            NodeKind::Case { else_body, .. } => else_body.as_deref(),
            _ => None,
        }
    }

    /// Elements of a `List` node; empty for anything else.
    pub fn list_nodes(&self) -> &[ParseNode] {
        match &self.kind {
            NodeKind::List { nodes } => nodes,
            _ => &[],
        }
    }
}
