//! Assembly emission (pass 2).
//!
//! Emits AT&T-syntax x86-64 text for the whole program: first the `.data`
//! section for every non-function global, then `.text` for every function.
//!
//! Expressions are evaluated on a one-accumulator virtual stack: every
//! binary operator evaluates its right subtree first, pushes, evaluates
//! the left subtree into `%rax`, pops `%rdi`, and combines. The `depth`
//! counter tracks pushes against pops and must be zero at the end of
//! every function body.

use minc_sem::{BinOp, NodeId, NodeKind, ObjId, Program, Ty};

use crate::error::{CodeGenError, Result};

/// Argument registers of the System V AMD64 calling convention.
const ARG_REGS64: [&str; 6] = ["%rdi", "%rsi", "%rdx", "%rcx", "%r8", "%r9"];
/// Byte-wide alternates, used for size-1 parameters.
const ARG_REGS8: [&str; 6] = ["%dil", "%sil", "%dl", "%cl", "%r8b", "%r9b"];

/// Assembly generator for one program.
pub struct AsmGenerator<'a> {
    program: &'a Program,
    output: String,
    /// Virtual operand-stack height; pushes and pops must balance.
    depth: i64,
    /// Branch-label counter, monotonic per compilation.
    label_count: u32,
    /// Name of the function currently being emitted.
    current_fn: String,
}

impl<'a> AsmGenerator<'a> {
    pub fn new(program: &'a Program) -> Self {
        Self {
            program,
            output: String::new(),
            depth: 0,
            label_count: 0,
            current_fn: String::new(),
        }
    }

    /// Emit the whole program and return the assembly text.
    pub fn generate(mut self) -> Result<String> {
        self.emit_data();
        self.emit_text()?;
        Ok(self.output)
    }

    /// Append one indented instruction or directive line.
    fn emit(&mut self, line: &str) {
        self.output.push_str("  ");
        self.output.push_str(line);
        self.output.push('\n');
    }

    /// Append a label line (no indentation).
    fn label(&mut self, label: &str) {
        self.output.push_str(label);
        self.output.push_str(":\n");
    }

    fn push(&mut self) {
        self.emit("push %rax");
        self.depth += 1;
    }

    fn pop(&mut self, register: &str) {
        self.emit(&format!("pop {}", register));
        self.depth -= 1;
    }

    /// Next branch-label sequence number.
    fn count(&mut self) -> u32 {
        self.label_count += 1;
        self.label_count
    }

    /// Emit the `.data` section for every non-function global.
    fn emit_data(&mut self) {
        let data: Vec<ObjId> = self.program.data_objects().collect();
        for obj_id in data {
            let obj = &self.program.objs[obj_id];
            let name = obj.name.clone();
            let size = obj.ty.size();
            let init_data = obj.init_data.clone();

            self.emit(".data");
            self.emit(&format!(".global {}", name));
            self.label(&name);
            match init_data {
                Some(bytes) => {
                    for byte in bytes {
                        self.emit(&format!(".byte {}", byte));
                    }
                }
                None => self.emit(&format!(".zero {}", size)),
            }
        }
    }

    /// Emit the `.text` section for every function.
    fn emit_text(&mut self) -> Result<()> {
        let functions: Vec<ObjId> = self.program.functions().collect();
        for func_id in functions {
            self.emit_function(func_id)?;
        }
        Ok(())
    }

    fn emit_function(&mut self, func_id: ObjId) -> Result<()> {
        let func = &self.program.objs[func_id];
        let name = func.name.clone();
        let stack_size = func.stack_size;
        let params = func.params.clone();
        let body = func.body;

        self.current_fn = name.clone();

        self.emit(&format!(".global {}", name));
        self.emit(".text");
        self.label(&name);

        // Prologue.
        self.emit("push %rbp");
        self.emit("mov %rsp, %rbp");
        self.emit(&format!("sub ${}, %rsp", stack_size));

        // Move register arguments into their stack slots.
        for (i, &param) in params.iter().enumerate() {
            let obj = &self.program.objs[param];
            let reg = if obj.ty.size() == 1 {
                ARG_REGS8[i]
            } else {
                ARG_REGS64[i]
            };
            self.emit(&format!("mov {}, {}(%rbp)", reg, obj.offset));
        }

        if let Some(body) = body {
            self.gen_stmt(body)?;
        }
        assert_eq!(self.depth, 0, "operand stack unbalanced in {}", name);

        // Epilogue; every return jumps here.
        self.label(&format!(".L.return.{}", name));
        self.emit("mov %rbp, %rsp");
        self.emit("pop %rbp");
        self.emit("ret");
        Ok(())
    }

    fn gen_stmt(&mut self, node: NodeId) -> Result<()> {
        let kind = self.program.ast[node].kind.clone();
        match kind {
            NodeKind::If {
                cond,
                then,
                otherwise,
            } => {
                let c = self.count();
                self.gen_expr(cond)?;
                self.emit("cmp $0, %rax");
                self.emit(&format!("je .L.else{}", c));
                self.gen_stmt(then)?;
                self.emit(&format!("jmp .L.end{}", c));
                self.label(&format!(".L.else{}", c));
                if let Some(otherwise) = otherwise {
                    self.gen_stmt(otherwise)?;
                }
                self.label(&format!(".L.end{}", c));
                Ok(())
            }
            NodeKind::For {
                init,
                cond,
                inc,
                body,
            } => {
                let c = self.count();
                if let Some(init) = init {
                    self.gen_stmt(init)?;
                }
                self.label(&format!(".L.begin{}", c));
                if let Some(cond) = cond {
                    self.gen_expr(cond)?;
                    self.emit("cmp $0, %rax");
                    self.emit(&format!("je .L.end{}", c));
                }
                self.gen_stmt(body)?;
                if let Some(inc) = inc {
                    self.gen_expr(inc)?;
                }
                self.emit(&format!("jmp .L.begin{}", c));
                self.label(&format!(".L.end{}", c));
                Ok(())
            }
            NodeKind::Block { body } => {
                let stmts: Vec<NodeId> = self.program.ast.chain(body).collect();
                for stmt in stmts {
                    self.gen_stmt(stmt)?;
                }
                Ok(())
            }
            NodeKind::Return { value } => {
                self.gen_expr(value)?;
                self.emit(&format!("jmp .L.return.{}", self.current_fn));
                Ok(())
            }
            NodeKind::ExprStmt { expr } => self.gen_expr(expr),
            _ => Err(CodeGenError::InvalidStatement),
        }
    }

    fn gen_expr(&mut self, node: NodeId) -> Result<()> {
        let kind = self.program.ast[node].kind.clone();
        match kind {
            NodeKind::Num { value } => {
                self.emit(&format!("mov ${}, %rax", value));
                Ok(())
            }
            NodeKind::Neg { operand } => {
                self.gen_expr(operand)?;
                self.emit("neg %rax");
                Ok(())
            }
            NodeKind::Var { .. } => {
                self.gen_addr(node)?;
                self.load(self.program.ast.ty(node).clone());
                Ok(())
            }
            NodeKind::Addr { operand } => self.gen_addr(operand),
            NodeKind::Deref { operand } => {
                self.gen_expr(operand)?;
                self.load(self.program.ast.ty(node).clone());
                Ok(())
            }
            NodeKind::Assign { lhs, rhs } => {
                self.gen_addr(lhs)?;
                self.push();
                self.gen_expr(rhs)?;
                self.pop("%rdi");
                self.store(self.program.ast.ty(node).clone());
                Ok(())
            }
            NodeKind::Call { name, args } => {
                for &arg in &args {
                    self.gen_expr(arg)?;
                    self.push();
                }
                for i in (0..args.len()).rev() {
                    self.pop(ARG_REGS64[i]);
                }
                self.emit("mov $0, %rax");
                self.emit(&format!("call {}", name));
                Ok(())
            }
            NodeKind::StmtExpr { body } => {
                let stmts: Vec<NodeId> = self.program.ast.chain(body).collect();
                for stmt in stmts {
                    self.gen_stmt(stmt)?;
                }
                Ok(())
            }
            NodeKind::Binary { op, lhs, rhs } => {
                self.gen_expr(rhs)?;
                self.push();
                self.gen_expr(lhs)?;
                self.pop("%rdi");
                self.gen_binop(op);
                Ok(())
            }
            NodeKind::Block { .. }
            | NodeKind::If { .. }
            | NodeKind::For { .. }
            | NodeKind::Return { .. }
            | NodeKind::ExprStmt { .. } => Err(CodeGenError::InvalidStatement),
        }
    }

    /// Combine `%rdi` (right) into `%rax` (left) for a binary operator.
    fn gen_binop(&mut self, op: BinOp) {
        match op {
            BinOp::Add => self.emit("add %rdi, %rax"),
            BinOp::Sub => self.emit("sub %rdi, %rax"),
            BinOp::Mul => self.emit("imul %rdi, %rax"),
            BinOp::Div => {
                self.emit("cqo");
                self.emit("idiv %rdi");
            }
            BinOp::Eq | BinOp::Ne | BinOp::Lt | BinOp::Le => {
                self.emit("cmp %rdi, %rax");
                let set = match op {
                    BinOp::Eq => "sete %al",
                    BinOp::Ne => "setne %al",
                    BinOp::Lt => "setl %al",
                    BinOp::Le => "setle %al",
                    _ => unreachable!(),
                };
                self.emit(set);
                self.emit("movzb %al, %rax");
            }
        }
    }

    /// Emit the address of an addressable node into `%rax`.
    fn gen_addr(&mut self, node: NodeId) -> Result<()> {
        let kind = self.program.ast[node].kind.clone();
        match kind {
            NodeKind::Var { obj } => {
                let obj = &self.program.objs[obj];
                if obj.is_local {
                    self.emit(&format!("lea {}(%rbp), %rax", obj.offset));
                } else {
                    self.emit(&format!("lea {}(%rip), %rax", obj.name));
                }
                Ok(())
            }
            // The value of the operand is already the address.
            NodeKind::Deref { operand } => self.gen_expr(operand),
            _ => Err(CodeGenError::NotAnLvalue {
                span: self.program.ast[node].token.span,
            }),
        }
    }

    /// Load the value at the address in `%rax`, honoring the size rule.
    /// Arrays skip the load: an array lvalue is its address.
    fn load(&mut self, ty: Ty) {
        if ty.is_array() {
            return;
        }
        if ty.size() == 1 {
            self.emit("movsbq (%rax), %rax");
        } else {
            self.emit("mov (%rax), %rax");
        }
    }

    /// Store `%rax` at the address in `%rdi`, honoring the size rule.
    fn store(&mut self, ty: Ty) {
        if ty.size() == 1 {
            self.emit("mov %al, (%rdi)");
        } else {
            self.emit("mov %rax, (%rdi)");
        }
    }
}
