//! Parse-tree visitor dispatch.
//!
//! A capability interface with one method per node variant.
//! [`ParseNode::accept`](crate::ParseNode::accept) calls back into exactly
//! one method and returns the visitor's output type.
//!
//! Every method is required: adding a node variant breaks every visitor at
//! compile time. That closed extensibility is deliberate — the grammar is
//! language-defined and changes rarely, so completeness checking of tree
//! walkers wins over open extension.
//!
//! Visitors that only care about a few variants can delegate the rest to
//! [`walk_children`]:
//!
//! ```text
//! struct CountCases { count: usize }
//!
//! impl Visitor for CountCases {
//!     type Output = ();
//!     fn visit_case(&mut self, node: &ParseNode) {
//!         self.count += 1;
//!         walk_children(self, node);
//!     }
//!     // remaining methods: walk_children(self, node)
//! }
//! ```

use crate::ast::{NodeKind, ParseNode};

/// Visitor over [`ParseNode`]s, generic over the result type.
pub trait Visitor {
    type Output;

    fn visit_nil(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_true(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_false(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_self(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_int(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_float(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_str(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_symbol(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_array(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_hash(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_ident(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_inst_var(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_global_var(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_class_var(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_const(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_local_asgn(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_inst_asgn(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_global_asgn(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_class_var_asgn(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_const_decl(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_op_asgn(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_call(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_iter(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_if(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_while(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_until(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_case(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_when(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_in(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_begin(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_rescue(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_return(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_break(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_next(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_def(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_class(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_module(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_param(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_and(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_or(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_not(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_block(&mut self, node: &ParseNode) -> Self::Output;
    fn visit_list(&mut self, node: &ParseNode) -> Self::Output;
}

/// Visit every present child of `node` in source order.
///
/// Children come from `child_nodes()`, plus the `case` else body, which the
/// traversal contract keeps out of `child_nodes()` but a full walk must
/// still reach.
pub fn walk_children<V: Visitor + ?Sized>(visitor: &mut V, node: &ParseNode) {
    for child in node.child_nodes().flatten() {
        child.accept(visitor);
    }
    if let NodeKind::Case {
        else_body: Some(else_body),
        ..
    } = &node.kind
    {
        else_body.accept(visitor);
    }
}
