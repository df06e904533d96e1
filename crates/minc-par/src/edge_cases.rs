//! Edge case tests for minc-par.

#[cfg(test)]
mod tests {
    use crate::tests_support::{parse_err, parse_ok};
    use minc_sem::{NodeKind, TyKind};

    #[test]
    fn test_edge_empty_translation_unit() {
        let program = parse_ok("");
        assert!(program.globals.is_empty());
        assert!(program.ast.is_empty());
    }

    #[test]
    fn test_edge_deeply_nested_parens() {
        let expr = format!("{}1{}", "(".repeat(200), ")".repeat(200));
        let program = parse_ok(&format!("int main() {{ return {}; }}", expr));
        assert_eq!(program.functions().count(), 1);
    }

    #[test]
    fn test_edge_deeply_nested_blocks() {
        let body = format!("{}{}", "{".repeat(100), "}".repeat(100));
        let program = parse_ok(&format!("int main() {{ {} return 0; }}", body));
        assert_eq!(program.functions().count(), 1);
    }

    #[test]
    fn test_edge_chained_assignment_is_right_associative() {
        let program = parse_ok("int main() { int a; int b; a = b = 5; return a; }");
        let main = program.functions().next().unwrap();
        let body = program.objs[main].body.unwrap();
        // Find the outer assignment: its rhs must itself be an assignment.
        let mut found = false;
        for id in program.ast.chain(match program.ast[body].kind {
            NodeKind::Block { body } => body,
            _ => unreachable!(),
        }) {
            if let NodeKind::ExprStmt { expr } = program.ast[id].kind {
                if let NodeKind::Assign { rhs, .. } = program.ast[expr].kind {
                    if matches!(program.ast[rhs].kind, NodeKind::Assign { .. }) {
                        found = true;
                    }
                }
            }
        }
        assert!(found, "a = b = 5 should nest on the right");
    }

    #[test]
    fn test_edge_unary_chains() {
        // Unary plus is absorbed; negation stacks.
        let program = parse_ok("int main() { return - - +1; }");
        assert_eq!(program.functions().count(), 1);
    }

    #[test]
    fn test_edge_addr_deref_roundtrip() {
        let program = parse_ok("int main() { int x = 3; return *&x; }");
        assert_eq!(program.functions().count(), 1);
    }

    #[test]
    fn test_edge_deref_of_addr_has_base_type() {
        let program = parse_ok("int main() { char c; return *&c; }");
        let main = program.functions().next().unwrap();
        let body = program.objs[main].body.unwrap();
        let mut deref_ty = None;
        let mut stack = vec![body];
        while let Some(id) = stack.pop() {
            match &program.ast[id].kind {
                NodeKind::Return { value } => stack.push(*value),
                NodeKind::Block { body } => stack.extend(program.ast.chain(*body)),
                NodeKind::Deref { .. } => deref_ty = program.ast[id].ty.clone(),
                _ => {}
            }
        }
        assert_eq!(deref_ty.unwrap().kind, TyKind::Char);
    }

    #[test]
    fn test_edge_call_in_argument_position() {
        let program = parse_ok("int main() { return f(g(), h(1, i())); }");
        assert_eq!(program.functions().count(), 1);
    }

    #[test]
    fn test_edge_pointer_to_pointer_arithmetic_scales_by_eight() {
        // **pp + 1 on an int** scales the inner pointer by 8.
        let program = parse_ok("int main() { int x; int *p = &x; int **pp = &p; return **(pp + 0) ; }");
        assert_eq!(program.functions().count(), 1);
    }

    #[test]
    fn test_edge_sizeof_of_pointer_deref() {
        let program = parse_ok("int main() { char *p; return sizeof(*p); }");
        let main = program.functions().next().unwrap();
        let body = program.objs[main].body.unwrap();
        let mut literal = None;
        let mut stack = vec![body];
        while let Some(id) = stack.pop() {
            match &program.ast[id].kind {
                NodeKind::Return { value } => stack.push(*value),
                NodeKind::Block { body } => stack.extend(program.ast.chain(*body)),
                NodeKind::Num { value } => literal = Some(*value),
                _ => {}
            }
        }
        assert_eq!(literal, Some(1));
    }

    #[test]
    fn test_edge_array_of_chars_sizeof() {
        let program = parse_ok("int main() { char s[10]; return sizeof(s); }");
        let main = program.functions().next().unwrap();
        assert!(program.objs[main].body.is_some());
    }

    #[test]
    fn test_edge_global_shadowed_by_local() {
        let program = parse_ok("int x; int main() { int x = 1; return x; }");
        let main = program.functions().next().unwrap();
        // The local exists independently of the global.
        assert_eq!(program.objs[main].locals.len(), 1);
        assert_eq!(program.data_objects().count(), 1);
    }

    #[test]
    fn test_edge_else_binds_to_nearest_if() {
        let program = parse_ok("int main() { if (1) if (0) return 1; else return 2; return 3; }");
        let main = program.functions().next().unwrap();
        let body = program.objs[main].body.unwrap();
        // The outer if has no else branch; the inner one does.
        let stmts: Vec<_> = program
            .ast
            .chain(match program.ast[body].kind {
                NodeKind::Block { body } => body,
                _ => unreachable!(),
            })
            .collect();
        match &program.ast[stmts[0]].kind {
            NodeKind::If { then, otherwise, .. } => {
                assert!(otherwise.is_none());
                match &program.ast[*then].kind {
                    NodeKind::If { otherwise, .. } => assert!(otherwise.is_some()),
                    other => panic!("expected nested if, got {:?}", other),
                }
            }
            other => panic!("expected if, got {:?}", other),
        }
    }

    #[test]
    fn test_edge_semicolons_alone_are_statements() {
        let program = parse_ok("int main() { ;;; return 0; ; }");
        assert_eq!(program.functions().count(), 1);
    }

    #[test]
    fn test_edge_string_in_stmt_expr() {
        let program = parse_ok(r#"int main() { char *s = ({ "hi"; }); return 0; }"#);
        assert_eq!(program.data_objects().count(), 1);
    }

    #[test]
    fn test_edge_trailing_tokens_after_function_fail() {
        assert_eq!(parse_err("int main() { return 0; } }"), "expected type");
    }

    #[test]
    fn test_edge_unclosed_brace_fails() {
        let message = parse_err("int main() { return 0;");
        assert!(message.contains("expected an expression") || message.contains("expected"));
    }

    #[test]
    fn test_edge_keyword_cannot_be_variable() {
        // "return" as an operand is a parse error, not an identifier.
        assert_eq!(
            parse_err("int main() { return return; }"),
            "expected an expression"
        );
    }
}
