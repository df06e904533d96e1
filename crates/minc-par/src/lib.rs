//! minc-par - Recursive-descent parser.
//!
//! Consumes the token sequence with one token of look-ahead and builds the
//! typed, scope-resolved [`Program`]. Grammar:
//!
//! ```text
//! program      = (global-decl)*
//! global-decl  = declspec (function | global-var)
//! function     = declarator "(" params? ")" compound
//! global-var   = declarator ("," declarator)* ";"
//! declspec     = "int" | "char"
//! declarator   = "*"* identifier type-suffix
//! type-suffix  = "(" params? ")" | "[" number "]" type-suffix | ε
//! compound     = "{" (declaration | stmt)* "}"
//! stmt         = "return" expr ";" | "if" ... | "while" ... | "for" ...
//!              | compound | expr-stmt
//! expr         = assign, with the usual precedence ladder below it
//! ```
//!
//! Parsing is type-directed: each finished statement is run through the
//! annotator, and pointer arithmetic is scaled as it is built. The first
//! syntax or semantic error aborts the parse.

mod decl;
#[cfg(test)]
mod edge_cases;
mod expr;
mod stmt;
mod stream;

pub use stream::TokenStream;

use minc_lex::Token;
use minc_sem::{Obj, ObjId, Program, ScopeStack, Ty, TyKind};
use minc_util::CompileResult;

/// The parser state for one translation unit.
pub struct Parser {
    pub(crate) stream: TokenStream,
    pub(crate) program: Program,
    pub(crate) scope: ScopeStack,
    /// Locals of the function currently being parsed, declaration order.
    pub(crate) locals: Vec<ObjId>,
    /// Counter naming anonymous string-literal globals `.L..<n>`.
    pub(crate) next_anon_id: usize,
}

impl Parser {
    /// Create a parser over an EOF-terminated token sequence.
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            stream: TokenStream::new(tokens),
            program: Program::new(),
            scope: ScopeStack::new(),
            locals: Vec::new(),
            next_anon_id: 0,
        }
    }

    /// program = (global-decl)*
    pub fn parse(mut self) -> CompileResult<Program> {
        while !self.stream.at_eof() {
            let base = self.declspec()?;
            if self.is_function()? {
                self.function(base)?;
            } else {
                self.global_variable(base)?;
            }
        }

        debug_assert_eq!(self.scope.depth(), 1, "scope stack must be balanced");
        Ok(self.program)
    }

    /// function = declarator "(" params? ")" compound
    fn function(&mut self, base: Ty) -> CompileResult<()> {
        let ty = self.declarator(base)?;
        let name = ty.name.clone().expect("declarator sets a name");

        let func = self.new_global_var(name, ty.clone());
        self.program.objs[func].is_function = true;

        // Fresh locals list and a scope frame for the parameters; the
        // body's `{` pushes its own frame on top.
        self.locals = Vec::new();
        self.scope.enter();

        let param_tys = match ty.kind {
            TyKind::Func { params, .. } => params,
            _ => unreachable!("is_function checked the declarator"),
        };
        let mut params = Vec::new();
        for param_ty in param_tys {
            let param_name = param_ty.name.clone().expect("parameters are named");
            params.push(self.new_local_var(param_name, param_ty));
        }
        self.program.objs[func].params = params;

        self.stream.expect("{")?;
        let body = self.compound_stmt()?;

        self.scope.leave();

        self.program.objs[func].body = Some(body);
        self.program.objs[func].locals = self.locals.clone();
        Ok(())
    }

    /// global-var = declarator ("," declarator)* ";"
    fn global_variable(&mut self, base: Ty) -> CompileResult<()> {
        let mut first = true;
        while !self.stream.at(";") {
            if !first {
                self.stream.expect(",")?;
            }
            first = false;

            let ty = self.declarator(base.clone())?;
            let name = ty.name.clone().expect("declarator sets a name");
            self.new_global_var(name, ty);
        }
        self.stream.advance();
        Ok(())
    }

    /// Create a local, record it in the current function's locals list,
    /// and bind its name in the innermost scope.
    pub(crate) fn new_local_var(&mut self, name: String, ty: Ty) -> ObjId {
        let id = self.program.push_local(Obj::local(name.clone(), ty));
        self.locals.push(id);
        self.scope.bind(name, id);
        id
    }

    /// Create a global and bind its name in the outermost scope.
    pub(crate) fn new_global_var(&mut self, name: String, ty: Ty) -> ObjId {
        let id = self.program.push_global(Obj::global(name.clone(), ty));
        self.scope.bind_global(name, id);
        id
    }
}

/// Parse a token sequence into a [`Program`].
pub fn parse(tokens: Vec<Token>) -> CompileResult<Program> {
    Parser::new(tokens).parse()
}
