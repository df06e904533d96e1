//! minc-sem - Semantic model of the compiled language.
//!
//! This crate holds the data structures shared between the parser and the
//! code generator, plus the type annotator:
//!
//! - [`types`] - the algebraic type model (`int`, `char`, pointer, array,
//!   function) with size and decay helpers
//! - [`ast`] - the arena-backed AST
//! - [`obj`] - symbols ([`Obj`]) and the parsed compilation unit
//!   ([`Program`])
//! - [`scope`] - the name-resolution scope stack
//! - [`typing`] - the post-order type annotator
//!
//! It sits below the parser because the grammar is type-directed: pointer
//! arithmetic scaling and `sizeof` need operand types while parsing.

pub mod ast;
pub mod obj;
pub mod scope;
pub mod types;
pub mod typing;

pub use ast::{Ast, BinOp, Node, NodeId, NodeKind};
pub use obj::{Obj, ObjId, Program};
pub use scope::ScopeStack;
pub use types::{Ty, TyKind};
pub use typing::{add_type, annotate};
