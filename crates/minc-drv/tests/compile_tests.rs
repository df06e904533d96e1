//! Pipeline integration tests.
//!
//! Drive the full lex → parse → annotate → codegen pipeline over the
//! library API and check the emitted assembly's structure. Execution of
//! the assembly is left to an external assembler and is not part of this
//! suite.

use minc_drv::compile_source;

fn compile(source: &str) -> String {
    compile_source(source, false).expect("compilation failed")
}

fn compile_err(source: &str) -> String {
    format!("{}", compile_source(source, false).unwrap_err())
}

#[test]
fn test_return_zero() {
    let asm = compile("int main(){ return 0; }");
    assert!(asm.contains("  .global main\n"));
    assert!(asm.contains("main:\n"));
    assert!(asm.contains("  mov $0, %rax\n"));
    assert!(asm.contains("  jmp .L.return.main\n"));
    assert!(asm.contains(".L.return.main:\n  mov %rbp, %rsp\n  pop %rbp\n  ret\n"));
}

#[test]
fn test_additive_expression() {
    let asm = compile("int main(){ return 3+5-2; }");
    assert!(asm.contains("  add %rdi, %rax\n"));
    assert!(asm.contains("  sub %rdi, %rax\n"));
}

#[test]
fn test_locals_and_multiplication() {
    let asm = compile("int main(){ int a=3; int b=4; return a*b+2; }");
    assert!(asm.contains("  imul %rdi, %rax\n"));
    // Two distinct 8-byte slots.
    assert!(asm.contains("lea -8(%rbp), %rax"));
    assert!(asm.contains("lea -16(%rbp), %rax"));
    assert!(asm.contains("sub $16, %rsp"));
}

#[test]
fn test_for_loop_sum() {
    let asm = compile("int main(){ int i=0; int s=0; for(i=1;i<=10;i=i+1) s=s+i; return s; }");
    assert!(asm.contains(".L.begin1:\n"));
    assert!(asm.contains("  je .L.end1\n"));
    assert!(asm.contains("  jmp .L.begin1\n"));
    assert!(asm.contains("  setle %al\n"));
}

#[test]
fn test_arrays_and_pointer_arithmetic() {
    let asm = compile(
        "int main(){ int a[3]; a[0]=1; a[1]=2; a[2]=4; int *p=a; return *(p+2) + a[1]; }",
    );
    // Subscripts and *(p+2) scale indexes by 8.
    assert!(asm.contains("  mov $8, %rax\n"));
    assert!(asm.contains("  imul %rdi, %rax\n"));
    // Stores into the array, loads out of it.
    assert!(asm.contains("  mov %rax, (%rdi)\n"));
    assert!(asm.contains("  mov (%rax), %rax\n"));
}

#[test]
fn test_function_calls_with_arguments() {
    let asm = compile("int add(int x,int y){ return x+y; } int main(){ return add(3, add(4,5)); }");
    assert!(asm.contains("  .global add\n"));
    assert!(asm.contains("  .global main\n"));
    assert_eq!(asm.matches("  call add\n").count(), 2);
    // Parameters land in their stack slots from the argument registers.
    assert!(asm.contains("mov %rdi, -16(%rbp)"));
    assert!(asm.contains("mov %rsi, -8(%rbp)"));
    // Nested call's result is pushed as an outer argument.
    assert!(asm.contains("  mov $0, %rax\n  call add\n"));
}

#[test]
fn test_string_literal_program() {
    let asm = compile(r#"int main(){ char *s="abc"; return s[0] + s[1] + s[2]; }"#);
    // One .byte per payload character plus the trailing NUL.
    assert!(asm.contains("  .byte 97\n  .byte 98\n  .byte 99\n  .byte 0\n"));
    assert_eq!(asm.matches("  .byte ").count(), 4);
    assert!(asm.contains(".L..0:\n"));
    assert!(asm.contains("lea .L..0(%rip), %rax"));
    // Char loads sign-extend from one byte.
    assert!(asm.contains("  movsbq (%rax), %rax\n"));
}

#[test]
fn test_data_before_text() {
    let asm = compile("int g; int main(){ return g; }");
    assert!(asm.find("  .data\n").unwrap() < asm.find("  .text\n").unwrap());
    assert!(asm.contains("  .zero 8\n"));
}

#[test]
fn test_empty_function_body() {
    let asm = compile("int main(){}");
    // Prologue and epilogue with nothing in between but the return label.
    assert!(asm.contains("  sub $0, %rsp\n"));
    assert!(asm.contains(".L.return.main:\n"));
}

#[test]
fn test_infinite_loop() {
    let asm = compile("int main(){ for(;;){} }");
    assert!(asm.contains(".L.begin1:\n  jmp .L.begin1\n"));
}

#[test]
fn test_six_arguments_compile() {
    let asm = compile(
        "int f(int a,int b,int c,int d,int e,int g){ return g; } \
         int main(){ return f(1,2,3,4,5,6); }",
    );
    for reg in ["%rdi", "%rsi", "%rdx", "%rcx", "%r8", "%r9"] {
        assert!(asm.contains(&format!("  pop {}\n", reg)), "missing {}", reg);
    }
}

#[test]
fn test_seven_arguments_rejected() {
    let err = compile_err("int main(){ return f(1,2,3,4,5,6,7); }");
    assert!(err.contains("too many function call arguments"));
}

#[test]
fn test_output_is_deterministic() {
    let source = r#"
        int g;
        char *s() { return "hey"; }
        int main() { int i; int t = 0; for (i = 0; i < 4; i = i + 1) t = t + i; return t; }
    "#;
    assert_eq!(compile(source), compile(source));
}

#[test]
fn test_comments_and_whitespace_do_not_change_output() {
    let plain = compile("int main(){ return 1+2; }");
    let commented = compile(
        "int main() { // add\n  return /* left */ 1 + \t2 ;\n}",
    );
    assert_eq!(plain, commented);
}

#[test]
fn test_sizeof_folds_before_emission() {
    let asm = compile("int main(){ int a[3]; return sizeof(a) + sizeof(a[0]); }");
    assert!(asm.contains("  mov $24, %rax\n"));
    assert!(asm.contains("  mov $8, %rax\n"));
}

#[test]
fn test_chained_globals_and_functions_keep_source_order() {
    let asm = compile("int a; int f(){ return 1; } int b; int main(){ return f(); }");
    let a = asm.find("a:\n").unwrap();
    let b = asm.find("b:\n").unwrap();
    let f = asm.find("f:\n").unwrap();
    let main = asm.find("main:\n").unwrap();
    // All data first (in declaration order), then functions in order.
    assert!(a < b && b < f && f < main);
}

#[test]
fn test_error_diagnostics_render_source_line() {
    let err = compile_err("int main() {\n  return 1 +;\n}");
    assert!(err.contains("  return 1 +;"));
    assert!(err.contains("^ expected an expression"));
}
