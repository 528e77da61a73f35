//! Reduction actions: the single point where parse nodes are created.
//!
//! Each grammar rule carries one [`ReduceAction`] tag; when the driver
//! fires a reduction it pops the rule's semantic values and hands them
//! here. The grammar guarantees the popped shapes, so extraction helpers
//! fall back to inert defaults instead of panicking on a mismatch.

use garnet_ir::{CaseBuilder, HashPair, NodeKind, ParseNode, Span, Token, TokenKind};

/// A semantic value on the driver's value stack.
#[derive(Debug)]
pub(crate) enum SemValue {
    Token(Token),
    Node(ParseNode),
    OptNode(Option<ParseNode>),
    Nodes(Vec<ParseNode>),
    Pairs(Vec<HashPair>),
    OptName(Option<Box<str>>),
    Unit,
}

/// One value-stack entry: the value plus the source span the reduced
/// symbols covered (`None` for empty productions).
#[derive(Debug)]
pub(crate) struct Entry {
    pub value: SemValue,
    pub span: Option<Span>,
}

/// Which variable family an assignment or read targets.
#[derive(Copy, Clone, Debug)]
pub(crate) enum VarKind {
    Local,
    Inst,
    Global,
    ClassVar,
    Const,
}

impl VarKind {
    fn read(self, name: Box<str>, span: Span) -> ParseNode {
        let kind = match self {
            VarKind::Local => NodeKind::Ident { name },
            VarKind::Inst => NodeKind::InstVar { name },
            VarKind::Global => NodeKind::GlobalVar { name },
            VarKind::ClassVar => NodeKind::ClassVar { name },
            VarKind::Const => NodeKind::Const { name },
        };
        ParseNode::new(kind, span)
    }

    fn assign(self, name: Box<str>, value: ParseNode, span: Span) -> ParseNode {
        let value = Box::new(value);
        let kind = match self {
            VarKind::Local => NodeKind::LocalAsgn { name, value },
            VarKind::Inst => NodeKind::InstAsgn { name, value },
            VarKind::Global => NodeKind::GlobalAsgn { name, value },
            VarKind::ClassVar => NodeKind::ClassVarAsgn { name, value },
            VarKind::Const => NodeKind::ConstDecl { name, value },
        };
        ParseNode::new(kind, span)
    }
}

/// `return`/`break`/`next`.
#[derive(Copy, Clone, Debug)]
pub(crate) enum JumpKind {
    Return,
    Break,
    Next,
}

impl JumpKind {
    fn node(self, value: Option<ParseNode>, span: Span) -> ParseNode {
        let value = value.map(Box::new);
        let kind = match self {
            JumpKind::Return => NodeKind::Return { value },
            JumpKind::Break => NodeKind::Break { value },
            JumpKind::Next => NodeKind::Next { value },
        };
        ParseNode::new(kind, span)
    }
}

/// Per-rule reduction behavior.
#[derive(Copy, Clone, Debug)]
pub(crate) enum ReduceAction {
    // Plumbing
    /// Pass the first popped value through.
    First,
    /// Pass the second popped value through.
    Second,
    Unit,
    OptNone,
    NoName,
    NodesEmpty,
    NodesOne,
    /// First popped is a node list, last popped a node; append.
    NodesAppend,
    PairsEmpty,
    MakePair,
    PairsAppend,

    // Program structure
    Program,
    CompStmt,

    // Statement modifiers
    IfMod,
    UnlessMod,
    WhileMod,
    UntilMod,

    // Expression operators
    AndKw,
    OrKw,
    NotKw,
    AndOp,
    OrOp,
    BangNot,
    Ternary,
    Assign(VarKind),
    OpAssign(VarKind),
    Binary(&'static str),
    Unary(&'static str),

    // Literals and variable reads
    LitInt,
    LitFloat,
    LitStr,
    LitSym,
    LitNil,
    LitTrue,
    LitFalse,
    LitSelf,
    VarRef(VarKind),
    ArrayLit,
    HashLit,
    Paren,

    // Calls and blocks
    FCall,
    MethodCall,
    MethodCallArgs,
    IndexCall,
    AttachBlock,
    FCallBlock,
    BlockIter,
    BlockParams,
    EmptyBlockParams,

    // Control flow
    If,
    Unless,
    ElsifTail,
    While,
    Until,
    CaseSubject,
    CaseBare,
    WhenClause,
    InClause,
    BodyStmt,
    BeginExpr,
    RescueClause,
    ExcVar,
    Jump(JumpKind),
    JumpBare(JumpKind),

    // Definitions
    Def,
    ClassDef,
    ModuleDef,
    ParamPlain,
    ParamDefault,
    SuperClass,
}

/// Positional reader over the popped entries of one reduction.
struct Popped {
    iter: std::vec::IntoIter<Entry>,
}

impl Popped {
    fn new(entries: Vec<Entry>) -> Popped {
        Popped {
            iter: entries.into_iter(),
        }
    }

    fn skip(&mut self) {
        let _ = self.iter.next();
    }

    fn entry(&mut self) -> Option<Entry> {
        self.iter.next()
    }

    fn node(&mut self) -> ParseNode {
        match self.iter.next().map(|e| e.value) {
            Some(SemValue::Node(node)) => node,
            _ => ParseNode::new(NodeKind::Nil, Span::DUMMY),
        }
    }

    fn opt(&mut self) -> Option<ParseNode> {
        match self.iter.next().map(|e| e.value) {
            Some(SemValue::OptNode(opt)) => opt,
            Some(SemValue::Node(node)) => Some(node),
            _ => None,
        }
    }

    fn nodes(&mut self) -> Vec<ParseNode> {
        match self.iter.next().map(|e| e.value) {
            Some(SemValue::Nodes(nodes)) => nodes,
            _ => Vec::new(),
        }
    }

    fn pairs(&mut self) -> Vec<HashPair> {
        match self.iter.next().map(|e| e.value) {
            Some(SemValue::Pairs(pairs)) => pairs,
            _ => Vec::new(),
        }
    }

    fn opt_name(&mut self) -> Option<Box<str>> {
        match self.iter.next().map(|e| e.value) {
            Some(SemValue::OptName(name)) => name,
            _ => None,
        }
    }

    fn token(&mut self) -> Option<Token> {
        match self.iter.next().map(|e| e.value) {
            Some(SemValue::Token(tok)) => Some(tok),
            _ => None,
        }
    }

    /// Name payload of the next popped token.
    fn name(&mut self) -> Box<str> {
        self.token().map_or_else(|| "".into(), |t| token_name(&t.kind))
    }

    /// The last remaining value (used with `NodesAppend`-style rules).
    fn last_node(&mut self) -> ParseNode {
        let mut last = None;
        for entry in self.iter.by_ref() {
            last = Some(entry);
        }
        match last.map(|e| e.value) {
            Some(SemValue::Node(node)) => node,
            _ => ParseNode::new(NodeKind::Nil, Span::DUMMY),
        }
    }
}

/// Extract the identifier-ish payload of a token kind.
fn token_name(kind: &TokenKind) -> Box<str> {
    match kind {
        TokenKind::Ident { name }
        | TokenKind::Const { name }
        | TokenKind::InstVar { name }
        | TokenKind::GlobalVar { name }
        | TokenKind::ClassVar { name }
        | TokenKind::Symbol { name } => name.clone(),
        _ => "".into(),
    }
}

fn node_list(nodes: Vec<ParseNode>, fallback: Span) -> ParseNode {
    let span = nodes
        .iter()
        .map(|n| n.span)
        .reduce(Span::merge)
        .unwrap_or(fallback);
    ParseNode::new(NodeKind::List { nodes }, span)
}

/// Run one reduction. `span` is the merged span of every popped symbol
/// (dummy only for empty productions feeding node-free values).
pub(crate) fn apply(action: ReduceAction, span: Span, popped: Vec<Entry>) -> SemValue {
    let mut p = Popped::new(popped);
    match action {
        // ─── Plumbing ───────────────────────────────────────────────────
        ReduceAction::First => p.entry().map_or(SemValue::Unit, |e| e.value),
        ReduceAction::Second => {
            p.skip();
            p.entry().map_or(SemValue::Unit, |e| e.value)
        }
        ReduceAction::Unit => SemValue::Unit,
        ReduceAction::OptNone => SemValue::OptNode(None),
        ReduceAction::NoName => SemValue::OptName(None),
        ReduceAction::NodesEmpty => SemValue::Nodes(Vec::new()),
        ReduceAction::NodesOne => SemValue::Nodes(vec![p.node()]),
        ReduceAction::NodesAppend => {
            let mut nodes = p.nodes();
            nodes.push(p.last_node());
            SemValue::Nodes(nodes)
        }
        ReduceAction::PairsEmpty => SemValue::Pairs(Vec::new()),
        ReduceAction::MakePair => {
            let key = p.node();
            p.skip(); // `=>`
            let value = p.node();
            SemValue::Pairs(vec![HashPair { key, value }])
        }
        ReduceAction::PairsAppend => {
            let mut pairs = p.pairs();
            p.skip(); // `,`
            pairs.extend(p.pairs());
            SemValue::Pairs(pairs)
        }

        // ─── Program structure ──────────────────────────────────────────
        ReduceAction::Program => {
            let root = match p.opt() {
                Some(node) => node,
                None => ParseNode::new(
                    NodeKind::Block {
                        statements: Vec::new(),
                    },
                    Span::DUMMY,
                ),
            };
            SemValue::Node(root)
        }
        ReduceAction::CompStmt => {
            let mut stmts = p.nodes();
            let value = match stmts.len() {
                0 => None,
                1 => stmts.pop(),
                _ => {
                    let span = stmts
                        .iter()
                        .map(|n| n.span)
                        .reduce(Span::merge)
                        .unwrap_or(span);
                    Some(ParseNode::new(NodeKind::Block { statements: stmts }, span))
                }
            };
            SemValue::OptNode(value)
        }

        // ─── Statement modifiers ────────────────────────────────────────
        ReduceAction::IfMod => {
            let body = p.node();
            p.skip();
            let condition = p.node();
            SemValue::Node(ParseNode::new(
                NodeKind::If {
                    condition: Box::new(condition),
                    then_body: Some(Box::new(body)),
                    else_body: None,
                },
                span,
            ))
        }
        ReduceAction::UnlessMod => {
            let body = p.node();
            p.skip();
            let condition = p.node();
            SemValue::Node(ParseNode::new(
                NodeKind::If {
                    condition: Box::new(condition),
                    then_body: None,
                    else_body: Some(Box::new(body)),
                },
                span,
            ))
        }
        ReduceAction::WhileMod => {
            let body = p.node();
            p.skip();
            let condition = p.node();
            SemValue::Node(ParseNode::new(
                NodeKind::While {
                    condition: Box::new(condition),
                    body: Some(Box::new(body)),
                },
                span,
            ))
        }
        ReduceAction::UntilMod => {
            let body = p.node();
            p.skip();
            let condition = p.node();
            SemValue::Node(ParseNode::new(
                NodeKind::Until {
                    condition: Box::new(condition),
                    body: Some(Box::new(body)),
                },
                span,
            ))
        }

        // ─── Expression operators ───────────────────────────────────────
        ReduceAction::AndKw | ReduceAction::AndOp => {
            let left = p.node();
            p.skip();
            let right = p.node();
            SemValue::Node(ParseNode::new(
                NodeKind::And {
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            ))
        }
        ReduceAction::OrKw | ReduceAction::OrOp => {
            let left = p.node();
            p.skip();
            let right = p.node();
            SemValue::Node(ParseNode::new(
                NodeKind::Or {
                    left: Box::new(left),
                    right: Box::new(right),
                },
                span,
            ))
        }
        ReduceAction::NotKw | ReduceAction::BangNot => {
            p.skip(); // `not` / `!`
            let expr = p.node();
            SemValue::Node(ParseNode::new(
                NodeKind::Not {
                    expr: Box::new(expr),
                },
                span,
            ))
        }
        ReduceAction::Ternary => {
            let condition = p.node();
            p.skip(); // `?`
            let then_body = p.node();
            p.skip(); // `:`
            let else_body = p.node();
            SemValue::Node(ParseNode::new(
                NodeKind::If {
                    condition: Box::new(condition),
                    then_body: Some(Box::new(then_body)),
                    else_body: Some(Box::new(else_body)),
                },
                span,
            ))
        }
        ReduceAction::Assign(kind) => {
            let name = p.name();
            p.skip(); // `=`
            let value = p.node();
            SemValue::Node(kind.assign(name, value, span))
        }
        ReduceAction::OpAssign(kind) => {
            let target_tok = p.token();
            let op_tok = p.token();
            let value = p.node();
            let (target, op) = match (target_tok, op_tok) {
                (Some(target), Some(op)) => {
                    let read = kind.read(token_name(&target.kind), target.span);
                    let op = match op.kind {
                        TokenKind::OpAssign { op } => op,
                        _ => garnet_ir::AssignOp::Add,
                    };
                    (read, op)
                }
                _ => (
                    ParseNode::new(NodeKind::Nil, Span::DUMMY),
                    garnet_ir::AssignOp::Add,
                ),
            };
            SemValue::Node(ParseNode::new(
                NodeKind::OpAsgn {
                    target: Box::new(target),
                    op,
                    value: Box::new(value),
                },
                span,
            ))
        }
        ReduceAction::Binary(name) => {
            let left = p.node();
            p.skip();
            let right = p.node();
            SemValue::Node(ParseNode::new(
                NodeKind::Call {
                    receiver: Some(Box::new(left)),
                    name: name.into(),
                    args: vec![right],
                    block: None,
                },
                span,
            ))
        }
        ReduceAction::Unary(name) => {
            p.skip(); // the operator
            let operand = p.node();
            SemValue::Node(ParseNode::new(
                NodeKind::Call {
                    receiver: Some(Box::new(operand)),
                    name: name.into(),
                    args: Vec::new(),
                    block: None,
                },
                span,
            ))
        }

        // ─── Literals and variable reads ────────────────────────────────
        ReduceAction::LitInt => {
            let value = match p.token().map(|t| t.kind) {
                Some(TokenKind::Integer { value }) => value,
                _ => 0,
            };
            SemValue::Node(ParseNode::new(NodeKind::Int { value }, span))
        }
        ReduceAction::LitFloat => {
            let value = match p.token().map(|t| t.kind) {
                Some(TokenKind::Float { value }) => value,
                _ => 0.0,
            };
            SemValue::Node(ParseNode::new(NodeKind::Float { value }, span))
        }
        ReduceAction::LitStr => {
            let value = match p.token().map(|t| t.kind) {
                Some(TokenKind::Str { value }) => value,
                _ => "".into(),
            };
            SemValue::Node(ParseNode::new(NodeKind::Str { value }, span))
        }
        ReduceAction::LitSym => {
            let name = p.name();
            SemValue::Node(ParseNode::new(NodeKind::Symbol { name }, span))
        }
        ReduceAction::LitNil => SemValue::Node(ParseNode::new(NodeKind::Nil, span)),
        ReduceAction::LitTrue => SemValue::Node(ParseNode::new(NodeKind::True, span)),
        ReduceAction::LitFalse => SemValue::Node(ParseNode::new(NodeKind::False, span)),
        ReduceAction::LitSelf => SemValue::Node(ParseNode::new(NodeKind::SelfRef, span)),
        ReduceAction::VarRef(kind) => {
            let name = p.name();
            SemValue::Node(kind.read(name, span))
        }
        ReduceAction::ArrayLit => {
            p.skip(); // `[`
            let elements = p.nodes();
            SemValue::Node(ParseNode::new(NodeKind::Array { elements }, span))
        }
        ReduceAction::HashLit => {
            p.skip(); // `{`
            let pairs = p.pairs();
            SemValue::Node(ParseNode::new(NodeKind::Hash { pairs }, span))
        }
        ReduceAction::Paren => {
            p.skip(); // `(`
            let inner = p.opt();
            let node = match inner {
                Some(mut node) => {
                    // widen to include the parentheses
                    node.span = span;
                    node
                }
                None => ParseNode::new(NodeKind::Nil, span),
            };
            SemValue::Node(node)
        }

        // ─── Calls and blocks ───────────────────────────────────────────
        ReduceAction::FCall => {
            let name = p.name();
            p.skip(); // `(`
            let args = p.nodes();
            SemValue::Node(ParseNode::new(
                NodeKind::Call {
                    receiver: None,
                    name,
                    args,
                    block: None,
                },
                span,
            ))
        }
        ReduceAction::MethodCall => {
            let receiver = p.node();
            p.skip(); // `.`
            let name = p.name();
            SemValue::Node(ParseNode::new(
                NodeKind::Call {
                    receiver: Some(Box::new(receiver)),
                    name,
                    args: Vec::new(),
                    block: None,
                },
                span,
            ))
        }
        ReduceAction::MethodCallArgs => {
            let receiver = p.node();
            p.skip(); // `.`
            let name = p.name();
            p.skip(); // `(`
            let args = p.nodes();
            SemValue::Node(ParseNode::new(
                NodeKind::Call {
                    receiver: Some(Box::new(receiver)),
                    name,
                    args,
                    block: None,
                },
                span,
            ))
        }
        ReduceAction::IndexCall => {
            let receiver = p.node();
            p.skip(); // `[`
            let args = p.nodes();
            SemValue::Node(ParseNode::new(
                NodeKind::Call {
                    receiver: Some(Box::new(receiver)),
                    name: "[]".into(),
                    args,
                    block: None,
                },
                span,
            ))
        }
        ReduceAction::AttachBlock => {
            let call = p.node();
            let block = p.node();
            let node = match call.kind {
                NodeKind::Call {
                    receiver,
                    name,
                    args,
                    ..
                } => ParseNode::new(
                    NodeKind::Call {
                        receiver,
                        name,
                        args,
                        block: Some(Box::new(block)),
                    },
                    span,
                ),
                other => ParseNode::new(other, span),
            };
            SemValue::Node(node)
        }
        ReduceAction::FCallBlock => {
            let name = p.name();
            let block = p.node();
            SemValue::Node(ParseNode::new(
                NodeKind::Call {
                    receiver: None,
                    name,
                    args: Vec::new(),
                    block: Some(Box::new(block)),
                },
                span,
            ))
        }
        ReduceAction::BlockIter => {
            p.skip(); // `{` / `do`
            let params = p.opt();
            let body = p.opt();
            SemValue::Node(ParseNode::new(
                NodeKind::Iter {
                    params: params.map(Box::new),
                    body: body.map(Box::new),
                },
                span,
            ))
        }
        ReduceAction::BlockParams => {
            p.skip(); // `|`
            let params = p.nodes();
            SemValue::OptNode(Some(node_list(params, span)))
        }
        ReduceAction::EmptyBlockParams => {
            SemValue::OptNode(Some(ParseNode::new(NodeKind::List { nodes: Vec::new() }, span)))
        }

        // ─── Control flow ───────────────────────────────────────────────
        ReduceAction::If => {
            p.skip(); // `if`
            let condition = p.node();
            p.skip(); // then separator
            let then_body = p.opt();
            let else_body = p.opt();
            SemValue::Node(ParseNode::new(
                NodeKind::If {
                    condition: Box::new(condition),
                    then_body: then_body.map(Box::new),
                    else_body: else_body.map(Box::new),
                },
                span,
            ))
        }
        ReduceAction::Unless => {
            p.skip(); // `unless`
            let condition = p.node();
            p.skip(); // then separator
            let body = p.opt();
            let else_body = p.opt();
            // `unless c; A; else; B; end` is `if c; B; else; A; end`
            SemValue::Node(ParseNode::new(
                NodeKind::If {
                    condition: Box::new(condition),
                    then_body: else_body.map(Box::new),
                    else_body: body.map(Box::new),
                },
                span,
            ))
        }
        ReduceAction::ElsifTail => {
            p.skip(); // `elsif`
            let condition = p.node();
            p.skip(); // then separator
            let then_body = p.opt();
            let else_body = p.opt();
            SemValue::OptNode(Some(ParseNode::new(
                NodeKind::If {
                    condition: Box::new(condition),
                    then_body: then_body.map(Box::new),
                    else_body: else_body.map(Box::new),
                },
                span,
            )))
        }
        ReduceAction::While => {
            p.skip(); // `while`
            let condition = p.node();
            p.skip(); // do separator
            let body = p.opt();
            SemValue::Node(ParseNode::new(
                NodeKind::While {
                    condition: Box::new(condition),
                    body: body.map(Box::new),
                },
                span,
            ))
        }
        ReduceAction::Until => {
            p.skip(); // `until`
            let condition = p.node();
            p.skip(); // do separator
            let body = p.opt();
            SemValue::Node(ParseNode::new(
                NodeKind::Until {
                    condition: Box::new(condition),
                    body: body.map(Box::new),
                },
                span,
            ))
        }
        ReduceAction::CaseSubject => {
            p.skip(); // `case`
            let subject = p.node();
            p.skip(); // opt_terms
            let clauses = p.nodes();
            let else_body = p.opt();
            let case = CaseBuilder::new(Some(subject), node_list(clauses, span))
                .else_body(else_body)
                .finish(span);
            SemValue::Node(case)
        }
        ReduceAction::CaseBare => {
            p.skip(); // `case`
            p.skip(); // opt_terms
            let clauses = p.nodes();
            let else_body = p.opt();
            let case = CaseBuilder::new(None, node_list(clauses, span))
                .else_body(else_body)
                .finish(span);
            SemValue::Node(case)
        }
        ReduceAction::WhenClause => {
            p.skip(); // `when`
            let expressions = p.nodes();
            p.skip(); // then separator
            let body = p.opt();
            SemValue::Node(ParseNode::new(
                NodeKind::When {
                    expressions: Box::new(node_list(expressions, span)),
                    body: body.map(Box::new),
                },
                span,
            ))
        }
        ReduceAction::InClause => {
            p.skip(); // `in`
            let pattern = p.node();
            p.skip(); // then separator
            let body = p.opt();
            SemValue::Node(ParseNode::new(
                NodeKind::In {
                    pattern: Box::new(pattern),
                    body: body.map(Box::new),
                },
                span,
            ))
        }
        ReduceAction::BodyStmt => {
            let body = p.opt();
            let rescues = p.nodes();
            let else_body = p.opt();
            let ensure_body = p.opt();
            if rescues.is_empty() && else_body.is_none() && ensure_body.is_none() {
                SemValue::OptNode(body)
            } else {
                SemValue::OptNode(Some(ParseNode::new(
                    NodeKind::Begin {
                        body: body.map(Box::new),
                        rescues,
                        else_body: else_body.map(Box::new),
                        ensure_body: ensure_body.map(Box::new),
                    },
                    span,
                )))
            }
        }
        ReduceAction::BeginExpr => {
            p.skip(); // `begin`
            let body = p.opt();
            let node = match body {
                Some(mut node) => {
                    if matches!(node.kind, NodeKind::Begin { .. }) {
                        node.span = span;
                        node
                    } else {
                        ParseNode::new(
                            NodeKind::Begin {
                                body: Some(Box::new(node)),
                                rescues: Vec::new(),
                                else_body: None,
                                ensure_body: None,
                            },
                            span,
                        )
                    }
                }
                None => ParseNode::new(
                    NodeKind::Begin {
                        body: None,
                        rescues: Vec::new(),
                        else_body: None,
                        ensure_body: None,
                    },
                    span,
                ),
            };
            SemValue::Node(node)
        }
        ReduceAction::RescueClause => {
            p.skip(); // `rescue`
            let exceptions = p.nodes();
            let variable = p.opt_name();
            p.skip(); // then separator
            let body = p.opt();
            let exceptions = if exceptions.is_empty() {
                None
            } else {
                Some(Box::new(node_list(exceptions, span)))
            };
            SemValue::Node(ParseNode::new(
                NodeKind::Rescue {
                    exceptions,
                    variable,
                    body: body.map(Box::new),
                },
                span,
            ))
        }
        ReduceAction::ExcVar => {
            p.skip(); // `=>`
            let name = p.name();
            SemValue::OptName(Some(name))
        }
        ReduceAction::Jump(kind) => {
            p.skip(); // the keyword
            let value = Some(p.node());
            SemValue::Node(kind.node(value, span))
        }
        ReduceAction::JumpBare(kind) => SemValue::Node(kind.node(None, span)),

        // ─── Definitions ────────────────────────────────────────────────
        ReduceAction::Def => {
            p.skip(); // `def`
            let name = p.name();
            let params = p.nodes();
            let body = p.opt();
            SemValue::Node(ParseNode::new(
                NodeKind::Def {
                    name,
                    params,
                    body: body.map(Box::new),
                },
                span,
            ))
        }
        ReduceAction::ClassDef => {
            p.skip(); // `class`
            let path = p.node();
            let superclass = p.opt();
            let body = p.opt();
            SemValue::Node(ParseNode::new(
                NodeKind::Class {
                    path: Box::new(path),
                    superclass: superclass.map(Box::new),
                    body: body.map(Box::new),
                },
                span,
            ))
        }
        ReduceAction::ModuleDef => {
            p.skip(); // `module`
            let path = p.node();
            let body = p.opt();
            SemValue::Node(ParseNode::new(
                NodeKind::Module {
                    path: Box::new(path),
                    body: body.map(Box::new),
                },
                span,
            ))
        }
        ReduceAction::ParamPlain => {
            let name = p.name();
            SemValue::Node(ParseNode::new(
                NodeKind::Param {
                    name,
                    default: None,
                },
                span,
            ))
        }
        ReduceAction::ParamDefault => {
            let name = p.name();
            p.skip(); // `=`
            let default = p.node();
            SemValue::Node(ParseNode::new(
                NodeKind::Param {
                    name,
                    default: Some(Box::new(default)),
                },
                span,
            ))
        }
        ReduceAction::SuperClass => {
            p.skip(); // `<`
            SemValue::OptNode(Some(p.node()))
        }
    }
}
