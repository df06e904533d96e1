//! Expression parsing.
//!
//! A conventional precedence ladder: assign → equality → relational →
//! add → mul → unary → postfix → primary. `>` and `>=` are rewritten to
//! `<` and `<=` with swapped operands, and subscripting is sugar for
//! `*(base + index)`, so the later phases only see the canonical forms.

use minc_lex::{Token, TokenKind};
use minc_sem::{add_type, BinOp, NodeId, NodeKind, Obj, Ty};
use minc_util::{CompileError, CompileResult};

use crate::Parser;

/// Arguments are passed in registers; there are six of them.
const MAX_CALL_ARGS: usize = 6;

impl Parser {
    /// expr = assign
    pub(crate) fn expr(&mut self) -> CompileResult<NodeId> {
        self.assign()
    }

    /// assign = equality ("=" assign)?     (right-associative)
    pub(crate) fn assign(&mut self) -> CompileResult<NodeId> {
        let node = self.equality()?;

        if self.stream.at("=") {
            let token = self.stream.advance();
            let rhs = self.assign()?;
            return Ok(self
                .program
                .ast
                .new_node(NodeKind::Assign { lhs: node, rhs }, token));
        }

        Ok(node)
    }

    /// equality = relational (("==" | "!=") relational)*
    fn equality(&mut self) -> CompileResult<NodeId> {
        let mut node = self.relational()?;

        loop {
            if self.stream.at("==") {
                let token = self.stream.advance();
                let rhs = self.relational()?;
                node = self.program.ast.new_binary(BinOp::Eq, node, rhs, token);
                continue;
            }
            if self.stream.at("!=") {
                let token = self.stream.advance();
                let rhs = self.relational()?;
                node = self.program.ast.new_binary(BinOp::Ne, node, rhs, token);
                continue;
            }
            return Ok(node);
        }
    }

    /// relational = add (("<" | ">" | "<=" | ">=") add)*
    ///
    /// `>` and `>=` swap their operands and store `<` / `<=`.
    fn relational(&mut self) -> CompileResult<NodeId> {
        let mut node = self.add()?;

        loop {
            let (op, swap) = match () {
                _ if self.stream.at("<") => (BinOp::Lt, false),
                _ if self.stream.at(">") => (BinOp::Lt, true),
                _ if self.stream.at("<=") => (BinOp::Le, false),
                _ if self.stream.at(">=") => (BinOp::Le, true),
                _ => return Ok(node),
            };
            let token = self.stream.advance();
            let rhs = self.add()?;
            let (lhs, rhs) = if swap { (rhs, node) } else { (node, rhs) };
            node = self.program.ast.new_binary(op, lhs, rhs, token);
        }
    }

    /// add = mul (("+" | "-") mul)*
    fn add(&mut self) -> CompileResult<NodeId> {
        let mut node = self.mul()?;

        loop {
            if self.stream.at("+") {
                let token = self.stream.advance();
                let rhs = self.mul()?;
                node = self.new_add(node, rhs, token)?;
                continue;
            }
            if self.stream.at("-") {
                let token = self.stream.advance();
                let rhs = self.mul()?;
                node = self.new_sub(node, rhs, token)?;
                continue;
            }
            return Ok(node);
        }
    }

    /// mul = unary (("*" | "/") unary)*
    fn mul(&mut self) -> CompileResult<NodeId> {
        let mut node = self.unary()?;

        loop {
            if self.stream.at("*") {
                let token = self.stream.advance();
                let rhs = self.unary()?;
                node = self.program.ast.new_binary(BinOp::Mul, node, rhs, token);
                continue;
            }
            if self.stream.at("/") {
                let token = self.stream.advance();
                let rhs = self.unary()?;
                node = self.program.ast.new_binary(BinOp::Div, node, rhs, token);
                continue;
            }
            return Ok(node);
        }
    }

    /// unary = ("+" | "-" | "&" | "*") unary | postfix
    fn unary(&mut self) -> CompileResult<NodeId> {
        if self.stream.eat("+") {
            return self.unary();
        }
        if self.stream.at("-") {
            let token = self.stream.advance();
            let operand = self.unary()?;
            return Ok(self
                .program
                .ast
                .new_node(NodeKind::Neg { operand }, token));
        }
        if self.stream.at("&") {
            let token = self.stream.advance();
            let operand = self.unary()?;
            return Ok(self
                .program
                .ast
                .new_node(NodeKind::Addr { operand }, token));
        }
        if self.stream.at("*") {
            let token = self.stream.advance();
            let operand = self.unary()?;
            return Ok(self
                .program
                .ast
                .new_node(NodeKind::Deref { operand }, token));
        }

        self.postfix()
    }

    /// postfix = primary ("[" expr "]")*
    ///
    /// `a[b]` desugars to `*(a + b)`.
    fn postfix(&mut self) -> CompileResult<NodeId> {
        let mut node = self.primary()?;

        while self.stream.at("[") {
            let token = self.stream.advance();
            let index = self.expr()?;
            self.stream.expect("]")?;
            let sum = self.new_add(node, index, token.clone())?;
            node = self
                .program
                .ast
                .new_node(NodeKind::Deref { operand: sum }, token);
        }

        Ok(node)
    }

    /// primary = "(" "{" compound ")" | "(" expr ")" | "sizeof" unary
    ///         | number | string | identifier ("(" args? ")")?
    fn primary(&mut self) -> CompileResult<NodeId> {
        if self.stream.at("(") {
            let token = self.stream.advance();

            // GNU statement expression: ({ stmt* })
            if self.stream.eat("{") {
                let block = self.compound_stmt()?;
                let body = match self.program.ast[block].kind {
                    NodeKind::Block { body } => body,
                    _ => unreachable!("compound_stmt returns a block"),
                };
                self.stream.expect(")")?;
                return Ok(self
                    .program
                    .ast
                    .new_node(NodeKind::StmtExpr { body }, token));
            }

            let node = self.expr()?;
            self.stream.expect(")")?;
            return Ok(node);
        }

        // sizeof folds to a number literal at parse time.
        if self.stream.at("sizeof") {
            let token = self.stream.advance();
            let operand = self.unary()?;
            add_type(&mut self.program.ast, &self.program.objs, operand)?;
            let size = self.program.ast.ty(operand).size();
            return Ok(self.program.ast.new_num(size, token));
        }

        let token = self.stream.peek().clone();
        match &token.kind {
            TokenKind::Num { value } => {
                let value = *value;
                self.stream.advance();
                Ok(self.program.ast.new_num(value, token))
            }
            TokenKind::Str { bytes } => {
                let obj = self.new_string_literal(bytes.clone());
                self.stream.advance();
                Ok(self.program.ast.new_var(obj, token))
            }
            TokenKind::Ident => {
                let token = self.stream.advance();
                if self.stream.at("(") {
                    return self.funcall(token);
                }
                let obj = self.scope.resolve(&token.lexeme).ok_or_else(|| {
                    CompileError::semantic(token.span, "undefined variable")
                })?;
                Ok(self.program.ast.new_var(obj, token))
            }
            _ => Err(CompileError::parse(token.span, "expected an expression")),
        }
    }

    /// Function call arguments; at most [`MAX_CALL_ARGS`] are accepted.
    fn funcall(&mut self, name: Token) -> CompileResult<NodeId> {
        self.stream.expect("(")?;

        let mut args = Vec::new();
        while !self.stream.at(")") {
            if !args.is_empty() {
                self.stream.expect(",")?;
            }
            args.push(self.assign()?);
        }
        self.stream.expect(")")?;

        if args.len() > MAX_CALL_ARGS {
            return Err(CompileError::semantic(
                name.span,
                format!("too many function call arguments (at most {})", MAX_CALL_ARGS),
            ));
        }

        let call = NodeKind::Call {
            name: name.lexeme.clone(),
            args,
        };
        Ok(self.program.ast.new_node(call, name))
    }

    /// Build an addition, scaling the integer operand of pointer + int by
    /// the pointee size. A base link on both operands is `pointer +
    /// pointer` and is rejected.
    pub(crate) fn new_add(
        &mut self,
        mut lhs: NodeId,
        mut rhs: NodeId,
        token: Token,
    ) -> CompileResult<NodeId> {
        add_type(&mut self.program.ast, &self.program.objs, lhs)?;
        add_type(&mut self.program.ast, &self.program.objs, rhs)?;

        let lhs_ty = self.program.ast.ty(lhs).clone();
        let rhs_ty = self.program.ast.ty(rhs).clone();

        if lhs_ty.is_integer() && rhs_ty.is_integer() {
            return Ok(self.program.ast.new_binary(BinOp::Add, lhs, rhs, token));
        }

        if lhs_ty.base().is_some() && rhs_ty.base().is_some() {
            return Err(CompileError::semantic(token.span, "pointer + pointer"));
        }

        // Canonicalize: pointer on the left.
        let base_size = if let Some(base) = lhs_ty.base() {
            base.size()
        } else if let Some(base) = rhs_ty.base() {
            let size = base.size();
            std::mem::swap(&mut lhs, &mut rhs);
            size
        } else {
            return Err(CompileError::semantic(token.span, "invalid operands"));
        };

        let scale = self.program.ast.new_num(base_size, token.clone());
        let scaled = self
            .program
            .ast
            .new_binary(BinOp::Mul, rhs, scale, token.clone());
        Ok(self.program.ast.new_binary(BinOp::Add, lhs, scaled, token))
    }

    /// Build a subtraction: int − int, pointer − int (scaled), or
    /// pointer − pointer (difference in elements, type int).
    pub(crate) fn new_sub(
        &mut self,
        lhs: NodeId,
        rhs: NodeId,
        token: Token,
    ) -> CompileResult<NodeId> {
        add_type(&mut self.program.ast, &self.program.objs, lhs)?;
        add_type(&mut self.program.ast, &self.program.objs, rhs)?;

        let lhs_ty = self.program.ast.ty(lhs).clone();
        let rhs_ty = self.program.ast.ty(rhs).clone();

        if lhs_ty.is_integer() && rhs_ty.is_integer() {
            return Ok(self.program.ast.new_binary(BinOp::Sub, lhs, rhs, token));
        }

        if let Some(base) = lhs_ty.base() {
            let base_size = base.size();

            if rhs_ty.is_integer() {
                let scale = self.program.ast.new_num(base_size, token.clone());
                let scaled = self
                    .program
                    .ast
                    .new_binary(BinOp::Mul, rhs, scale, token.clone());
                add_type(&mut self.program.ast, &self.program.objs, scaled)?;
                let sub = self.program.ast.new_binary(BinOp::Sub, lhs, scaled, token);
                self.program.ast.node_mut(sub).ty = Some(lhs_ty);
                return Ok(sub);
            }

            if rhs_ty.base().is_some() {
                let sub = self
                    .program
                    .ast
                    .new_binary(BinOp::Sub, lhs, rhs, token.clone());
                self.program.ast.node_mut(sub).ty = Some(Ty::int());
                let scale = self.program.ast.new_num(base_size, token.clone());
                return Ok(self.program.ast.new_binary(BinOp::Div, sub, scale, token));
            }
        }

        Err(CompileError::semantic(token.span, "invalid operands"))
    }

    /// Allocate an anonymous global for a string literal.
    ///
    /// The payload arrives NUL-terminated from the lexer; the type is
    /// array-of-char covering every payload byte.
    fn new_string_literal(&mut self, bytes: Vec<u8>) -> minc_sem::ObjId {
        let name = format!(".L..{}", self.next_anon_id);
        self.next_anon_id += 1;

        let ty = Ty::array_of(Ty::char_ty(), bytes.len() as i64);
        let mut obj = Obj::global(name.clone(), ty);
        obj.init_data = Some(bytes);

        let id = self.program.push_global(obj);
        self.scope.bind_global(name, id);
        id
    }
}
