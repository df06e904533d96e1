//! Symbols and the compilation unit.
//!
//! One record type, [`Obj`], is used for variables and functions alike,
//! distinguished by the `is_function` and `is_local` flags. All symbols of
//! a compilation unit live in the [`Program`]'s symbol table and are
//! addressed by [`ObjId`].

use minc_util::{define_idx, IndexVec};

use crate::ast::{Ast, NodeId};
use crate::types::Ty;

define_idx!(ObjId);

/// A variable or function.
#[derive(Clone, Debug)]
pub struct Obj {
    pub name: String,
    pub ty: Ty,
    /// True for locals and parameters; false for globals and functions.
    pub is_local: bool,
    pub is_function: bool,
    /// Stack-frame offset from `%rbp`; negative, assigned by codegen
    /// pass 1. Meaningful for locals only.
    pub offset: i64,
    /// Initializing payload for string-literal globals.
    pub init_data: Option<Vec<u8>>,
    /// Function body (functions only).
    pub body: Option<NodeId>,
    /// Parameter symbols in declaration order (functions only).
    pub params: Vec<ObjId>,
    /// All locals in declaration order, parameters included (functions only).
    pub locals: Vec<ObjId>,
    /// Frame size rounded up to 16 (functions only).
    pub stack_size: i64,
}

impl Obj {
    /// A local variable or parameter.
    pub fn local(name: impl Into<String>, ty: Ty) -> Self {
        Self {
            name: name.into(),
            ty,
            is_local: true,
            is_function: false,
            offset: 0,
            init_data: None,
            body: None,
            params: Vec::new(),
            locals: Vec::new(),
            stack_size: 0,
        }
    }

    /// A global variable; also the starting point for a function, which
    /// the parser upgrades by setting `is_function` and the function
    /// payload fields.
    pub fn global(name: impl Into<String>, ty: Ty) -> Self {
        Self {
            name: name.into(),
            ty,
            is_local: false,
            is_function: false,
            offset: 0,
            init_data: None,
            body: None,
            params: Vec::new(),
            locals: Vec::new(),
            stack_size: 0,
        }
    }
}

/// A parsed compilation unit: the node arena, the symbol table, and the
/// top-level objects in declaration order.
#[derive(Debug, Default)]
pub struct Program {
    pub ast: Ast,
    pub objs: IndexVec<ObjId, Obj>,
    /// Globals, functions, and anonymous string literals, in the order
    /// they were created. Code generation emits data and text sections by
    /// walking this list.
    pub globals: Vec<ObjId>,
}

impl Program {
    pub fn new() -> Self {
        Self {
            ast: Ast::new(),
            objs: IndexVec::new(),
            globals: Vec::new(),
        }
    }

    /// Add a top-level object and record it in declaration order.
    pub fn push_global(&mut self, obj: Obj) -> ObjId {
        let id = self.objs.push(obj);
        self.globals.push(id);
        id
    }

    /// Add a local; locals are reachable only through their function's
    /// `locals` list and the scope stack, not through `globals`.
    pub fn push_local(&mut self, obj: Obj) -> ObjId {
        self.objs.push(obj)
    }

    /// Top-level function ids in declaration order.
    pub fn functions(&self) -> impl Iterator<Item = ObjId> + '_ {
        self.globals
            .iter()
            .copied()
            .filter(|&id| self.objs[id].is_function)
    }

    /// Top-level data objects (everything that is not a function).
    pub fn data_objects(&self) -> impl Iterator<Item = ObjId> + '_ {
        self.globals
            .iter()
            .copied()
            .filter(|&id| !self.objs[id].is_function)
    }
}
