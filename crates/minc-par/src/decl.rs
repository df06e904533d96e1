//! Declaration parsing: declaration specifiers, declarators, type
//! suffixes, and local declarations.

use minc_sem::{NodeKind, NodeId, Ty, TyKind};
use minc_util::{CompileError, CompileResult};

use crate::Parser;

impl Parser {
    /// declspec = "int" | "char"
    pub(crate) fn declspec(&mut self) -> CompileResult<Ty> {
        if self.stream.eat("char") {
            return Ok(Ty::char_ty());
        }
        if self.stream.eat("int") {
            return Ok(Ty::int());
        }
        Err(CompileError::parse(self.stream.peek().span, "expected type"))
    }

    /// declarator = "*"* identifier type-suffix
    ///
    /// The returned type carries the declared name.
    pub(crate) fn declarator(&mut self, mut ty: Ty) -> CompileResult<Ty> {
        while self.stream.eat("*") {
            ty = Ty::pointer_to(ty);
        }

        if !matches!(self.stream.peek().kind, minc_lex::TokenKind::Ident) {
            return Err(CompileError::parse(
                self.stream.peek().span,
                "expected identifier",
            ));
        }
        let name = self.stream.advance().lexeme;

        let ty = self.type_suffix(ty)?;
        Ok(ty.named(name))
    }

    /// type-suffix = "(" params? ")" | "[" number "]" type-suffix | ε
    fn type_suffix(&mut self, ty: Ty) -> CompileResult<Ty> {
        if self.stream.eat("(") {
            return self.func_params(ty);
        }

        if self.stream.eat("[") {
            let (len, _) = self.stream.expect_number()?;
            self.stream.expect("]")?;
            let inner = self.type_suffix(ty)?;
            return Ok(Ty::array_of(inner, len));
        }

        Ok(ty)
    }

    /// params = param ("," param)*    with    param = declspec declarator
    ///
    /// Called with `(` already consumed; consumes the closing `)`.
    fn func_params(&mut self, return_ty: Ty) -> CompileResult<Ty> {
        let mut params = Vec::new();

        while !self.stream.at(")") {
            if !params.is_empty() {
                self.stream.expect(",")?;
            }
            let base = self.declspec()?;
            let param = self.declarator(base)?;
            params.push(param);
        }
        self.stream.expect(")")?;

        Ok(Ty::func(return_ty, params))
    }

    /// declaration = declspec (declarator ("=" assign)?) ("," ...)* ";"
    ///
    /// Produces a Block whose body chain holds one expression statement
    /// per initialized declarator.
    pub(crate) fn declaration(&mut self) -> CompileResult<NodeId> {
        let base = self.declspec()?;

        let mut head: Option<NodeId> = None;
        let mut tail: Option<NodeId> = None;
        let mut first = true;

        while !self.stream.at(";") {
            if !first {
                self.stream.expect(",")?;
            }
            first = false;

            let ty = self.declarator(base.clone())?;
            let name = ty.name.clone().expect("declarator sets a name");
            let obj = self.new_local_var(name, ty);

            if !self.stream.at("=") {
                continue;
            }
            let eq = self.stream.advance();
            let lhs = self.program.ast.new_var(obj, eq.clone());
            let rhs = self.assign()?;
            let assign = self
                .program
                .ast
                .new_node(NodeKind::Assign { lhs, rhs }, eq.clone());
            let stmt = self
                .program
                .ast
                .new_node(NodeKind::ExprStmt { expr: assign }, eq);

            match tail {
                Some(prev) => self.program.ast.set_next(prev, stmt),
                None => head = Some(stmt),
            }
            tail = Some(stmt);
        }

        let semi = self.stream.advance();
        Ok(self
            .program
            .ast
            .new_node(NodeKind::Block { body: head }, semi))
    }

    /// Tentatively parse a declarator to decide whether a top-level
    /// declaration is a function definition. The stream position is
    /// restored before returning.
    pub(crate) fn is_function(&mut self) -> CompileResult<bool> {
        if self.stream.at(";") {
            return Ok(false);
        }

        let save = self.stream.pos();
        let ty = self.declarator(Ty::int())?;
        self.stream.rewind(save);

        Ok(matches!(ty.kind, TyKind::Func { .. }))
    }
}
