//! minc-gen - x86-64 assembly generation.
//!
//! Translates a parsed and annotated [`Program`] into one GNU-assembler
//! source file in AT&T syntax, in two passes:
//!
//! 1. [`frame::assign_lvar_offsets`] lays out each function's stack frame.
//! 2. [`emit::AsmGenerator`] walks the program and appends to a single
//!    growable text buffer: all `.data` globals first, then all `.text`
//!    functions.
//!
//! The emitted code follows the System V AMD64 calling convention to the
//! extent used: up to six integer/pointer arguments in registers, return
//! value in `%rax`, `%rbp` as the frame pointer.

pub mod emit;
pub mod error;
pub mod frame;

pub use emit::AsmGenerator;
pub use error::{CodeGenError, Result};
pub use frame::{align_to, assign_lvar_offsets};

use minc_sem::Program;

/// Lay out stack frames and emit the whole program.
pub fn codegen(program: &mut Program) -> Result<String> {
    assign_lvar_offsets(program);
    AsmGenerator::new(program).generate()
}
