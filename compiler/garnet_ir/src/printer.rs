//! S-expression dump of a parse tree.
//!
//! `NodePrinter` is the reference visitor consumer: a compact, stable,
//! line-free rendering used by `garnet ast` and by test fixtures. Gaps in
//! `child_nodes()` print as `_` so the positional shape of every variant
//! stays visible.

use std::fmt::Write as _;

use crate::ast::{NodeKind, ParseNode};
use crate::visitor::Visitor;

/// Visitor that renders nodes as s-expressions.
#[derive(Default)]
pub struct NodePrinter {
    out: String,
}

impl NodePrinter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render a whole tree.
    pub fn print(node: &ParseNode) -> String {
        let mut printer = NodePrinter::new();
        node.accept(&mut printer);
        printer.out
    }

    fn open(&mut self, node: &ParseNode) {
        self.out.push('(');
        self.out.push_str(node.node_type().name());
    }

    fn close(&mut self) {
        self.out.push(')');
    }

    fn atom(&mut self, text: &str) {
        self.out.push(' ');
        self.out.push_str(text);
    }

    fn slot(&mut self, child: Option<&ParseNode>) {
        self.out.push(' ');
        match child {
            Some(node) => node.accept(self),
            None => self.out.push('_'),
        }
    }

    /// `(head child child ...)` straight from `child_nodes()`.
    fn plain(&mut self, node: &ParseNode) {
        self.open(node);
        for child in node.child_nodes() {
            self.slot(child);
        }
        self.close();
    }

    /// `(head name child child ...)` for variants carrying a name.
    fn named(&mut self, node: &ParseNode, name: &str) {
        self.open(node);
        self.atom(name);
        for child in node.child_nodes() {
            self.slot(child);
        }
        self.close();
    }
}

impl Visitor for NodePrinter {
    type Output = ();

    fn visit_nil(&mut self, node: &ParseNode) {
        self.plain(node);
    }

    fn visit_true(&mut self, node: &ParseNode) {
        self.plain(node);
    }

    fn visit_false(&mut self, node: &ParseNode) {
        self.plain(node);
    }

    fn visit_self(&mut self, node: &ParseNode) {
        self.plain(node);
    }

    fn visit_int(&mut self, node: &ParseNode) {
        self.open(node);
        if let NodeKind::Int { value } = &node.kind {
            let _ = write!(self.out, " {value}");
        }
        self.close();
    }

    fn visit_float(&mut self, node: &ParseNode) {
        self.open(node);
        if let NodeKind::Float { value } = &node.kind {
            let _ = write!(self.out, " {value}");
        }
        self.close();
    }

    fn visit_str(&mut self, node: &ParseNode) {
        self.open(node);
        if let NodeKind::Str { value } = &node.kind {
            let _ = write!(self.out, " {value:?}");
        }
        self.close();
    }

    fn visit_symbol(&mut self, node: &ParseNode) {
        self.open(node);
        if let NodeKind::Symbol { name } = &node.kind {
            self.atom(name);
        }
        self.close();
    }

    fn visit_array(&mut self, node: &ParseNode) {
        self.plain(node);
    }

    fn visit_hash(&mut self, node: &ParseNode) {
        self.plain(node);
    }

    fn visit_ident(&mut self, node: &ParseNode) {
        if let NodeKind::Ident { name } = &node.kind {
            self.named(node, name);
        }
    }

    fn visit_inst_var(&mut self, node: &ParseNode) {
        if let NodeKind::InstVar { name } = &node.kind {
            self.named(node, name);
        }
    }

    fn visit_global_var(&mut self, node: &ParseNode) {
        if let NodeKind::GlobalVar { name } = &node.kind {
            self.named(node, name);
        }
    }

    fn visit_class_var(&mut self, node: &ParseNode) {
        if let NodeKind::ClassVar { name } = &node.kind {
            self.named(node, name);
        }
    }

    fn visit_const(&mut self, node: &ParseNode) {
        if let NodeKind::Const { name } = &node.kind {
            self.named(node, name);
        }
    }

    fn visit_local_asgn(&mut self, node: &ParseNode) {
        if let NodeKind::LocalAsgn { name, .. } = &node.kind {
            self.named(node, name);
        }
    }

    fn visit_inst_asgn(&mut self, node: &ParseNode) {
        if let NodeKind::InstAsgn { name, .. } = &node.kind {
            self.named(node, name);
        }
    }

    fn visit_global_asgn(&mut self, node: &ParseNode) {
        if let NodeKind::GlobalAsgn { name, .. } = &node.kind {
            self.named(node, name);
        }
    }

    fn visit_class_var_asgn(&mut self, node: &ParseNode) {
        if let NodeKind::ClassVarAsgn { name, .. } = &node.kind {
            self.named(node, name);
        }
    }

    fn visit_const_decl(&mut self, node: &ParseNode) {
        if let NodeKind::ConstDecl { name, .. } = &node.kind {
            self.named(node, name);
        }
    }

    fn visit_op_asgn(&mut self, node: &ParseNode) {
        if let NodeKind::OpAsgn { op, .. } = &node.kind {
            self.named(node, op.symbol());
        }
    }

    fn visit_call(&mut self, node: &ParseNode) {
        if let NodeKind::Call { name, .. } = &node.kind {
            self.named(node, name);
        }
    }

    fn visit_iter(&mut self, node: &ParseNode) {
        self.plain(node);
    }

    fn visit_if(&mut self, node: &ParseNode) {
        self.plain(node);
    }

    fn visit_while(&mut self, node: &ParseNode) {
        self.plain(node);
    }

    fn visit_until(&mut self, node: &ParseNode) {
        self.plain(node);
    }

    fn visit_case(&mut self, node: &ParseNode) {
        // child_nodes() excludes the else body; render it anyway so the
        // dump is complete.
        self.open(node);
        for child in node.child_nodes() {
            self.slot(child);
        }
        if let Some(else_body) = node.case_else() {
            self.slot(Some(else_body));
        }
        self.close();
    }

    fn visit_when(&mut self, node: &ParseNode) {
        self.plain(node);
    }

    fn visit_in(&mut self, node: &ParseNode) {
        self.plain(node);
    }

    fn visit_begin(&mut self, node: &ParseNode) {
        self.plain(node);
    }

    fn visit_rescue(&mut self, node: &ParseNode) {
        if let NodeKind::Rescue {
            variable: Some(variable),
            ..
        } = &node.kind
        {
            self.named(node, variable);
        } else {
            self.plain(node);
        }
    }

    fn visit_return(&mut self, node: &ParseNode) {
        self.plain(node);
    }

    fn visit_break(&mut self, node: &ParseNode) {
        self.plain(node);
    }

    fn visit_next(&mut self, node: &ParseNode) {
        self.plain(node);
    }

    fn visit_def(&mut self, node: &ParseNode) {
        if let NodeKind::Def { name, .. } = &node.kind {
            self.named(node, name);
        }
    }

    fn visit_class(&mut self, node: &ParseNode) {
        self.plain(node);
    }

    fn visit_module(&mut self, node: &ParseNode) {
        self.plain(node);
    }

    fn visit_param(&mut self, node: &ParseNode) {
        if let NodeKind::Param { name, .. } = &node.kind {
            self.named(node, name);
        }
    }

    fn visit_and(&mut self, node: &ParseNode) {
        self.plain(node);
    }

    fn visit_or(&mut self, node: &ParseNode) {
        self.plain(node);
    }

    fn visit_not(&mut self, node: &ParseNode) {
        self.plain(node);
    }

    fn visit_block(&mut self, node: &ParseNode) {
        self.plain(node);
    }

    fn visit_list(&mut self, node: &ParseNode) {
        self.plain(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{NodeKind, ParseNode};
    use crate::Span;

    fn int(value: i64, start: u32, end: u32) -> ParseNode {
        ParseNode::new(NodeKind::Int { value }, Span::new(start, end))
    }

    #[test]
    fn prints_literals() {
        assert_eq!(NodePrinter::print(&int(42, 0, 2)), "(int 42)");
    }

    #[test]
    fn prints_assignment_with_name_and_value() {
        let node = ParseNode::new(
            NodeKind::LocalAsgn {
                name: "a".into(),
                value: Box::new(int(1, 4, 5)),
            },
            Span::new(0, 5),
        );
        assert_eq!(NodePrinter::print(&node), "(lasgn a (int 1))");
    }

    #[test]
    fn prints_call_with_receiver_gap() {
        let node = ParseNode::new(
            NodeKind::Call {
                receiver: None,
                name: "foo".into(),
                args: vec![int(1, 4, 5)],
                block: None,
            },
            Span::new(0, 6),
        );
        assert_eq!(NodePrinter::print(&node), "(call foo _ (int 1) _)");
    }
}
