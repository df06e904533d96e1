//! AST node definitions and the node arena.
//!
//! All nodes of a compilation unit live in one [`Ast`] arena and address
//! each other through 32-bit [`NodeId`] indices. Statements inside a block
//! form a forward chain through [`Node::next`]; nothing is freed before
//! code generation completes, so the arena is the natural owner.

use minc_lex::Token;
use minc_util::{define_idx, IndexVec};

use crate::obj::ObjId;
use crate::types::Ty;

define_idx!(NodeId);

/// Binary operators surviving to the AST.
///
/// `>` and `>=` never appear: the parser rewrites them to `Lt` / `Le` with
/// swapped operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Ne,
    Lt,
    Le,
}

impl BinOp {
    /// True for the comparison operators, whose result type is `int`.
    pub fn is_comparison(self) -> bool {
        matches!(self, BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Le)
    }
}

/// The kind of an AST node, with per-variant payload.
#[derive(Clone, Debug)]
pub enum NodeKind {
    /// Integer literal.
    Num { value: i64 },
    /// Reference to a variable.
    Var { obj: ObjId },
    /// Binary operation.
    Binary { op: BinOp, lhs: NodeId, rhs: NodeId },
    /// Assignment; `lhs` must be addressable.
    Assign { lhs: NodeId, rhs: NodeId },
    /// Arithmetic negation.
    Neg { operand: NodeId },
    /// Address-of.
    Addr { operand: NodeId },
    /// Pointer dereference.
    Deref { operand: NodeId },
    /// `return expr;`
    Return { value: NodeId },
    /// Expression used as a statement.
    ExprStmt { expr: NodeId },
    /// `{ ... }`; `body` heads a chain linked through `Node::next`.
    Block { body: Option<NodeId> },
    /// GNU statement expression `({ ... })`.
    StmtExpr { body: Option<NodeId> },
    /// `if (cond) then else otherwise`.
    If {
        cond: NodeId,
        then: NodeId,
        otherwise: Option<NodeId>,
    },
    /// `for` loop; also represents `while` (only `cond` and `body` set).
    For {
        init: Option<NodeId>,
        cond: Option<NodeId>,
        inc: Option<NodeId>,
        body: NodeId,
    },
    /// Function call with at most 6 arguments.
    Call { name: String, args: Vec<NodeId> },
}

/// One AST node.
#[derive(Clone, Debug)]
pub struct Node {
    pub kind: NodeKind,
    /// The token this node was produced from, for diagnostics.
    pub token: Token,
    /// Resolved type; set by the annotator for every expression node.
    pub ty: Option<Ty>,
    /// Forward sibling link inside a block body chain.
    pub next: Option<NodeId>,
}

/// The node arena for one compilation unit.
#[derive(Debug, Default)]
pub struct Ast {
    nodes: IndexVec<NodeId, Node>,
}

impl Ast {
    pub fn new() -> Self {
        Self {
            nodes: IndexVec::new(),
        }
    }

    /// Allocate a node.
    pub fn new_node(&mut self, kind: NodeKind, token: Token) -> NodeId {
        self.nodes.push(Node {
            kind,
            token,
            ty: None,
            next: None,
        })
    }

    /// Allocate a binary operation node.
    pub fn new_binary(&mut self, op: BinOp, lhs: NodeId, rhs: NodeId, token: Token) -> NodeId {
        self.new_node(NodeKind::Binary { op, lhs, rhs }, token)
    }

    /// Allocate an integer literal node.
    pub fn new_num(&mut self, value: i64, token: Token) -> NodeId {
        self.new_node(NodeKind::Num { value }, token)
    }

    /// Allocate a variable reference node.
    pub fn new_var(&mut self, obj: ObjId, token: Token) -> NodeId {
        self.new_node(NodeKind::Var { obj }, token)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    /// The resolved type of an expression node.
    ///
    /// # Panics
    ///
    /// Panics if the annotator has not run over this node; that is a
    /// compiler bug, not a user error.
    pub fn ty(&self, id: NodeId) -> &Ty {
        self.nodes[id]
            .ty
            .as_ref()
            .expect("expression node has no type; annotator did not run")
    }

    /// Link `next` after `id` in a body chain.
    pub fn set_next(&mut self, id: NodeId, next: NodeId) {
        self.nodes[id].next = Some(next);
    }

    /// Number of nodes allocated so far.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterate a statement chain starting at `head`.
    pub fn chain(&self, head: Option<NodeId>) -> ChainIter<'_> {
        ChainIter { ast: self, cur: head }
    }
}

impl std::ops::Index<NodeId> for Ast {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }
}

/// Iterator over a `next`-linked statement chain.
pub struct ChainIter<'a> {
    ast: &'a Ast,
    cur: Option<NodeId>,
}

impl<'a> Iterator for ChainIter<'a> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let id = self.cur?;
        self.cur = self.ast[id].next;
        Some(id)
    }
}
