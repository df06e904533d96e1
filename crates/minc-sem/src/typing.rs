//! The type annotator.
//!
//! [`add_type`] walks a subtree post-order and assigns a type to every
//! expression node whose type is not already set. The parser invokes it
//! while building pointer arithmetic and `sizeof`; [`annotate`] re-runs it
//! over every function body after parsing, which is a no-op on
//! already-typed nodes (the pass is idempotent).

use minc_util::{CompileError, CompileResult, IndexVec};

use crate::ast::{Ast, NodeId, NodeKind};
use crate::obj::{Obj, ObjId, Program};
use crate::types::Ty;

/// Annotate `node` and everything below it.
///
/// Container statements (`If`, `For`, `Block`, `Return`, `ExprStmt`) get no
/// type of their own but have their children annotated. Fails on the
/// semantic errors detectable here: assignment to an array value,
/// dereference of a non-pointer, and a statement expression that does not
/// end in an expression statement.
pub fn add_type(ast: &mut Ast, objs: &IndexVec<ObjId, Obj>, node: NodeId) -> CompileResult<()> {
    if ast[node].ty.is_some() {
        return Ok(());
    }

    let kind = ast[node].kind.clone();
    match kind {
        NodeKind::Num { .. } => {
            ast.node_mut(node).ty = Some(Ty::int());
        }
        NodeKind::Var { obj } => {
            ast.node_mut(node).ty = Some(objs[obj].ty.clone());
        }
        NodeKind::Binary { op, lhs, rhs } => {
            add_type(ast, objs, lhs)?;
            add_type(ast, objs, rhs)?;
            let ty = if op.is_comparison() {
                Ty::int()
            } else {
                ast.ty(lhs).clone()
            };
            ast.node_mut(node).ty = Some(ty);
        }
        NodeKind::Assign { lhs, rhs } => {
            add_type(ast, objs, lhs)?;
            add_type(ast, objs, rhs)?;
            let lhs_ty = ast.ty(lhs).clone();
            if lhs_ty.is_array() {
                return Err(CompileError::semantic(
                    ast[node].token.span,
                    "invalid array assignment",
                ));
            }
            ast.node_mut(node).ty = Some(lhs_ty);
        }
        NodeKind::Neg { operand } => {
            add_type(ast, objs, operand)?;
            let ty = ast.ty(operand).clone();
            ast.node_mut(node).ty = Some(ty);
        }
        NodeKind::Addr { operand } => {
            add_type(ast, objs, operand)?;
            // Taking the address of an array decays to a pointer to the
            // element type, not a pointer to the array.
            let ty = match ast.ty(operand).base() {
                Some(base) if ast.ty(operand).is_array() => Ty::pointer_to(base.clone()),
                _ => Ty::pointer_to(ast.ty(operand).clone()),
            };
            ast.node_mut(node).ty = Some(ty);
        }
        NodeKind::Deref { operand } => {
            add_type(ast, objs, operand)?;
            let ty = match ast.ty(operand).base() {
                Some(base) => base.clone(),
                None => {
                    return Err(CompileError::semantic(
                        ast[node].token.span,
                        "invalid pointer dereference",
                    ))
                }
            };
            ast.node_mut(node).ty = Some(ty);
        }
        NodeKind::Call { args, .. } => {
            for arg in args {
                add_type(ast, objs, arg)?;
            }
            ast.node_mut(node).ty = Some(Ty::int());
        }
        NodeKind::StmtExpr { body } => {
            let stmts: Vec<NodeId> = ast.chain(body).collect();
            for stmt in &stmts {
                add_type(ast, objs, *stmt)?;
            }
            let ty = stmts
                .last()
                .and_then(|&last| match ast[last].kind {
                    NodeKind::ExprStmt { expr } => Some(ast.ty(expr).clone()),
                    _ => None,
                })
                .ok_or_else(|| {
                    CompileError::semantic(
                        ast[node].token.span,
                        "stmt expr is not a valid expression",
                    )
                })?;
            ast.node_mut(node).ty = Some(ty);
        }
        NodeKind::Return { value } => {
            add_type(ast, objs, value)?;
        }
        NodeKind::ExprStmt { expr } => {
            add_type(ast, objs, expr)?;
        }
        NodeKind::Block { body } => {
            let stmts: Vec<NodeId> = ast.chain(body).collect();
            for stmt in stmts {
                add_type(ast, objs, stmt)?;
            }
        }
        NodeKind::If {
            cond,
            then,
            otherwise,
        } => {
            add_type(ast, objs, cond)?;
            add_type(ast, objs, then)?;
            if let Some(otherwise) = otherwise {
                add_type(ast, objs, otherwise)?;
            }
        }
        NodeKind::For {
            init,
            cond,
            inc,
            body,
        } => {
            for child in [init, cond, inc].into_iter().flatten() {
                add_type(ast, objs, child)?;
            }
            add_type(ast, objs, body)?;
        }
    }

    Ok(())
}

/// Annotate every function body in the program.
///
/// Running this after parsing is equivalent to the per-statement
/// annotation the parser already performed; running it twice changes
/// nothing.
pub fn annotate(program: &mut Program) -> CompileResult<()> {
    let bodies: Vec<NodeId> = program
        .objs
        .iter()
        .filter(|obj| obj.is_function)
        .filter_map(|obj| obj.body)
        .collect();

    for body in bodies {
        add_type(&mut program.ast, &program.objs, body)?;
    }
    Ok(())
}
