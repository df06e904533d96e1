//! Statement parsing.

use minc_sem::{add_type, NodeId, NodeKind};
use minc_util::CompileResult;

use crate::Parser;

impl Parser {
    /// stmt = "return" expr ";"
    ///      | "if" "(" expr ")" stmt ("else" stmt)?
    ///      | "while" "(" expr ")" stmt
    ///      | "for" "(" expr-stmt expr? ";" expr? ")" stmt
    ///      | "{" compound "}"
    ///      | expr-stmt
    pub(crate) fn stmt(&mut self) -> CompileResult<NodeId> {
        if self.stream.at("return") {
            let token = self.stream.advance();
            let value = self.expr()?;
            self.stream.expect(";")?;
            return Ok(self
                .program
                .ast
                .new_node(NodeKind::Return { value }, token));
        }

        if self.stream.at("if") {
            let token = self.stream.advance();
            self.stream.expect("(")?;
            let cond = self.expr()?;
            self.stream.expect(")")?;
            let then = self.stmt()?;
            let otherwise = if self.stream.eat("else") {
                Some(self.stmt()?)
            } else {
                None
            };
            return Ok(self.program.ast.new_node(
                NodeKind::If {
                    cond,
                    then,
                    otherwise,
                },
                token,
            ));
        }

        // while is sugar for a for loop with only a condition.
        if self.stream.at("while") {
            let token = self.stream.advance();
            self.stream.expect("(")?;
            let cond = self.expr()?;
            self.stream.expect(")")?;
            let body = self.stmt()?;
            return Ok(self.program.ast.new_node(
                NodeKind::For {
                    init: None,
                    cond: Some(cond),
                    inc: None,
                    body,
                },
                token,
            ));
        }

        if self.stream.at("for") {
            let token = self.stream.advance();
            self.stream.expect("(")?;
            let init = Some(self.expr_stmt()?);
            let cond = if self.stream.at(";") {
                None
            } else {
                Some(self.expr()?)
            };
            self.stream.expect(";")?;
            let inc = if self.stream.at(")") {
                None
            } else {
                Some(self.expr()?)
            };
            self.stream.expect(")")?;
            let body = self.stmt()?;
            return Ok(self.program.ast.new_node(
                NodeKind::For {
                    init,
                    cond,
                    inc,
                    body,
                },
                token,
            ));
        }

        if self.stream.eat("{") {
            return self.compound_stmt();
        }

        self.expr_stmt()
    }

    /// expr-stmt = ";" | expr ";"
    ///
    /// A lone `;` is an empty block.
    pub(crate) fn expr_stmt(&mut self) -> CompileResult<NodeId> {
        if self.stream.at(";") {
            let token = self.stream.advance();
            return Ok(self
                .program
                .ast
                .new_node(NodeKind::Block { body: None }, token));
        }

        let token = self.stream.peek().clone();
        let expr = self.expr()?;
        self.stream.expect(";")?;
        Ok(self
            .program
            .ast
            .new_node(NodeKind::ExprStmt { expr }, token))
    }

    /// compound = "{" (declaration | stmt)* "}"
    ///
    /// Called with `{` already consumed. Pushes its own scope frame and
    /// annotates each finished statement.
    pub(crate) fn compound_stmt(&mut self) -> CompileResult<NodeId> {
        self.scope.enter();

        let mut head: Option<NodeId> = None;
        let mut tail: Option<NodeId> = None;

        while !self.stream.at("}") {
            let node = if is_type_name(self.stream.peek()) {
                self.declaration()?
            } else {
                self.stmt()?
            };
            add_type(&mut self.program.ast, &self.program.objs, node)?;

            match tail {
                Some(prev) => self.program.ast.set_next(prev, node),
                None => head = Some(node),
            }
            tail = Some(node);
        }

        self.scope.leave();
        let close = self.stream.advance();
        Ok(self
            .program
            .ast
            .new_node(NodeKind::Block { body: head }, close))
    }
}

/// True if `token` starts a declaration.
fn is_type_name(token: &minc_lex::Token) -> bool {
    token.is("int") || token.is("char")
}
