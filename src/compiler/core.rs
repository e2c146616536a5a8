//! Template → bytecode lowering.

use tracing::trace;

use super::opcode::{Instruction, OpCode};
use super::pool::Pool;
use super::program::CompiledProgram;
use crate::template::{Segment, Template};

/// Lower a template into a [`CompiledProgram`].
///
/// Single left-to-right pass; each top-level segment is emitted on its own:
///
/// | Segment | Emitted |
/// |---|---|
/// | `Literal(s)` | `LitPush pool[s]` |
/// | `Wildcard` | `Push 0` |
/// | `DeepWildcard` | `PushM 0` |
/// | `Variable{path, segs}` | each of `segs`, then `ConcatN len(segs)`, `Capture pool[path]` |
///
/// The input is trusted to be parser output: variables never nest. A nested
/// variable inside a variable is skipped rather than reported.
///
/// ```rust
/// use httprule::compiler::compile;
/// use httprule::template::parse;
///
/// let program = compile(&parse("/v1/{name=shelves/*}").unwrap());
/// assert_eq!(program.fields().to_vec(), vec!["name".to_string()]);
/// assert_eq!(program.opcodes(), vec![2, 0, 2, 1, 1, 0, 4, 2, 5, 2]);
/// ```
#[must_use]
pub fn compile(template: &Template) -> CompiledProgram {
    let mut compiler = Compiler::default();
    for segment in &template.segments {
        compiler.segment(segment);
    }

    trace!(
        instructions = compiler.instructions.len(),
        pool_size = compiler.pool.len(),
        fields = ?compiler.fields,
        "Template compiled"
    );

    CompiledProgram::assemble(
        compiler.instructions,
        compiler.pool.into_entries(),
        template.verb.clone(),
        compiler.fields,
    )
}

#[derive(Default)]
struct Compiler {
    pool: Pool,
    instructions: Vec<Instruction>,
    fields: Vec<String>,
}

impl Compiler {
    fn emit(&mut self, code: OpCode, operand: usize) {
        self.instructions.push(Instruction::new(code, operand));
    }

    fn segment(&mut self, segment: &Segment) {
        match segment {
            Segment::Variable { path, segments } => {
                for inner in segments {
                    self.simple(inner);
                }
                self.emit(OpCode::ConcatN, segments.len());
                let idx = self.pool.index(path);
                self.emit(OpCode::Capture, idx);
                self.fields.push(path.clone());
            }
            simple => self.simple(simple),
        }
    }

    fn simple(&mut self, segment: &Segment) {
        match segment {
            Segment::Literal(text) => {
                let idx = self.pool.index(text);
                self.emit(OpCode::LitPush, idx);
            }
            Segment::Wildcard => self.emit(OpCode::Push, 0),
            Segment::DeepWildcard => self.emit(OpCode::PushM, 0),
            Segment::Variable { .. } => {}
        }
    }
}
