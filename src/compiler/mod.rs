//! # Compiler Module
//!
//! Lowers a [`Template`](crate::template::Template) into a stack-machine
//! [`CompiledProgram`]: a sequence of `(opcode, operand)` pairs, a
//! deduplicated string pool and the ordered list of captured field paths.
//!
//! ## Opcodes
//!
//! | Mnemonic | Value | Meaning |
//! |---|---|---|
//! | `Nop` | 0 | reserved, never emitted |
//! | `Push` | 1 | consume one component, push it |
//! | `LitPush` | 2 | consume one component equal to `pool[operand]`, push it |
//! | `PushM` | 3 | consume all remaining components, push them joined by `/` |
//! | `ConcatN` | 4 | pop `operand` values, push them joined by `/` |
//! | `Capture` | 5 | pop one value, bind it to `pool[operand]` |
//! | `End` | 6 | sentinel, lowest invalid opcode |
//!
//! ## Example
//!
//! `/obj/{name.nested=a/*/b}/{obj=**}` compiles to:
//!
//! ```text
//! 0000 litpush  0 ; "obj"
//! 0001 litpush  1 ; "a"
//! 0002 push
//! 0003 litpush  2 ; "b"
//! 0004 concatn  3
//! 0005 capture  3 ; "name.nested"
//! 0006 pushm
//! 0007 concatn  1
//! 0008 capture  0 ; "obj"
//! ```
//!
//! The literal `obj` and the field path `obj` share pool slot 0.

mod core;
mod opcode;
mod pool;
mod program;

pub use core::compile;
pub use opcode::{Instruction, OpCode, PROGRAM_VERSION};
pub use pool::Pool;
pub use program::{CompiledProgram, ProgramError};
