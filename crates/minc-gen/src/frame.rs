//! Stack-frame layout (pass 1).
//!
//! Walks each function's locals in reverse declaration order and assigns
//! negative `%rbp`-relative offsets, each aligned to the variable's own
//! size. The frame total rounds up to 16 to keep `%rsp` aligned across
//! calls.

use minc_sem::Program;

/// Round `n` up to the next multiple of `align`.
pub fn align_to(n: i64, align: i64) -> i64 {
    (n + align - 1) / align * align
}

/// Assign offsets to every local of every function and fix each
/// function's `stack_size`.
pub fn assign_lvar_offsets(program: &mut Program) {
    let functions: Vec<_> = program.functions().collect();

    for func in functions {
        let locals = program.objs[func].locals.clone();
        let mut offset = 0i64;

        for &local in locals.iter().rev() {
            let size = program.objs[local].ty.size().max(1);
            offset += size;
            offset = align_to(offset, size);
            program.objs[local].offset = -offset;
        }

        program.objs[func].stack_size = align_to(offset, 16);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minc_lex::tokenize;
    use minc_par::parse;

    fn layout(source: &str) -> Program {
        let mut program = parse(tokenize(source).unwrap()).unwrap();
        assign_lvar_offsets(&mut program);
        program
    }

    #[test]
    fn test_align_to() {
        assert_eq!(align_to(0, 16), 0);
        assert_eq!(align_to(1, 16), 16);
        assert_eq!(align_to(16, 16), 16);
        assert_eq!(align_to(17, 16), 32);
        assert_eq!(align_to(3, 8), 8);
    }

    #[test]
    fn test_offsets_negative_and_within_frame() {
        let program = layout("int main() { int a; int b; char c; return 0; }");
        let main = program.functions().next().unwrap();
        let obj = &program.objs[main];

        assert_eq!(obj.stack_size % 16, 0);
        for &local in &obj.locals {
            let offset = program.objs[local].offset;
            let size = program.objs[local].ty.size();
            assert!(offset < 0);
            assert!(-offset <= obj.stack_size);
            assert_eq!(offset % size, 0, "offset must be a multiple of the size");
        }
    }

    #[test]
    fn test_distinct_offsets() {
        let program = layout("int main() { int a; int b; return 0; }");
        let main = program.functions().next().unwrap();
        let offsets: Vec<_> = program.objs[main]
            .locals
            .iter()
            .map(|&l| program.objs[l].offset)
            .collect();
        assert_eq!(offsets.len(), 2);
        assert_ne!(offsets[0], offsets[1]);
    }

    #[test]
    fn test_array_reserves_full_size() {
        let program = layout("int main() { int a[4]; return 0; }");
        let main = program.functions().next().unwrap();
        let obj = &program.objs[main];
        // 32 bytes of array, frame rounded to 16.
        assert_eq!(obj.stack_size, 32);
        assert_eq!(program.objs[obj.locals[0]].offset, -32);
    }

    #[test]
    fn test_empty_function_has_empty_frame() {
        let program = layout("int main() { return 0; }");
        let main = program.functions().next().unwrap();
        assert_eq!(program.objs[main].stack_size, 0);
    }

    #[test]
    fn test_params_get_slots() {
        let program = layout("int add(int x, int y) { return x + y; }");
        let add = program.functions().next().unwrap();
        for &param in &program.objs[add].params {
            assert!(program.objs[param].offset < 0);
        }
    }
}
