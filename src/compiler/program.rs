//! The compiled, immutable form of a template.

use std::fmt::{self, Write};
use std::sync::Arc;

use super::opcode::{Instruction, OpCode, PROGRAM_VERSION};

/// Error returned when a program fails structural validation.
///
/// Programs produced by [`compile`](super::compile) from parser output are always
/// valid; these errors exist for programs decoded from their flat form or built
/// from hand-assembled segment trees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgramError {
    /// Program was produced by an incompatible bytecode revision
    UnsupportedVersion {
        /// Version carried by the program
        found: i32,
        /// Version this crate executes
        expected: i32,
    },
    /// Flat opcode array does not hold whole `(opcode, operand)` pairs
    OddOpcodeLength {
        /// Length of the flat array
        len: usize,
    },
    /// Opcode outside the live range `Push..=Capture`
    InvalidOpcode {
        /// Instruction index
        at: usize,
        /// Raw opcode value
        raw: i32,
    },
    /// Operand below zero in the flat form
    NegativeOperand {
        /// Instruction index
        at: usize,
        /// Raw operand value
        operand: i32,
    },
    /// `LitPush`/`Capture` operand does not address a pool entry
    PoolIndexOutOfRange {
        /// Instruction index
        at: usize,
        /// Operand value
        index: usize,
        /// Pool size
        pool_len: usize,
    },
    /// `ConcatN`/`Capture` would pop more values than the stack can hold
    StackUnderflow {
        /// Instruction index
        at: usize,
    },
    /// Number of `Capture` instructions differs from the field list
    FieldCountMismatch {
        /// Capture instructions in the program
        captures: usize,
        /// Entries in the field list
        fields: usize,
    },
}

impl fmt::Display for ProgramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProgramError::UnsupportedVersion { found, expected } => write!(
                f,
                "unsupported program version {found} (expected {expected})"
            ),
            ProgramError::OddOpcodeLength { len } => {
                write!(f, "opcode array length {len} is not a whole number of pairs")
            }
            ProgramError::InvalidOpcode { at, raw } => {
                write!(f, "invalid opcode {raw} at instruction {at}")
            }
            ProgramError::NegativeOperand { at, operand } => {
                write!(f, "negative operand {operand} at instruction {at}")
            }
            ProgramError::PoolIndexOutOfRange {
                at,
                index,
                pool_len,
            } => write!(
                f,
                "pool index {index} out of range (pool has {pool_len} entries) at instruction {at}"
            ),
            ProgramError::StackUnderflow { at } => {
                write!(f, "stack underflow at instruction {at}")
            }
            ProgramError::FieldCountMismatch { captures, fields } => write!(
                f,
                "program has {captures} captures but {fields} field paths"
            ),
        }
    }
}

impl std::error::Error for ProgramError {}

/// Bytecode program for one registered template.
///
/// Immutable once built and `Send + Sync`: share it behind an `Arc` and run
/// any number of concurrent matches against it without locking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompiledProgram {
    version: i32,
    instructions: Vec<Instruction>,
    pool: Vec<Arc<str>>,
    verb: String,
    fields: Vec<String>,
    max_stack: usize,
}

impl CompiledProgram {
    /// Assemble a program from compiler output. No validation: the compiler's
    /// input is trusted.
    pub(crate) fn assemble(
        instructions: Vec<Instruction>,
        pool: Vec<Arc<str>>,
        verb: String,
        fields: Vec<String>,
    ) -> Self {
        let max_stack = peak_depth(&instructions);
        Self {
            version: PROGRAM_VERSION,
            instructions,
            pool,
            verb,
            fields,
            max_stack,
        }
    }

    /// Decode and validate a program from its flat form.
    ///
    /// `opcodes` interleaves `(opcode, operand)` pairs exactly as returned by
    /// [`CompiledProgram::opcodes`].
    pub fn from_parts(
        version: i32,
        opcodes: &[i32],
        pool: Vec<String>,
        verb: impl Into<String>,
        fields: Vec<String>,
    ) -> Result<Self, ProgramError> {
        check_version(version)?;
        if opcodes.len() % 2 != 0 {
            return Err(ProgramError::OddOpcodeLength { len: opcodes.len() });
        }

        let mut instructions = Vec::with_capacity(opcodes.len() / 2);
        for (at, pair) in opcodes.chunks_exact(2).enumerate() {
            let (raw, operand) = (pair[0], pair[1]);
            let code = OpCode::from_raw(raw).ok_or(ProgramError::InvalidOpcode { at, raw })?;
            let operand = usize::try_from(operand)
                .map_err(|_| ProgramError::NegativeOperand { at, operand })?;
            instructions.push(Instruction::new(code, operand));
        }

        let program = Self {
            version,
            max_stack: 0,
            instructions,
            pool: pool.into_iter().map(Arc::from).collect(),
            verb: verb.into(),
            fields,
        };
        let max_stack = program.check()?;
        Ok(Self {
            max_stack,
            ..program
        })
    }

    /// Re-run structural validation on this program
    pub fn validate(&self) -> Result<(), ProgramError> {
        self.check().map(|_| ())
    }

    fn check(&self) -> Result<usize, ProgramError> {
        check_version(self.version)?;

        let pool_len = self.pool.len();
        let mut depth = 0usize;
        let mut peak = 0usize;
        let mut captures = 0usize;
        for (at, ins) in self.instructions.iter().enumerate() {
            if ins.code.uses_pool() && ins.operand >= pool_len {
                return Err(ProgramError::PoolIndexOutOfRange {
                    at,
                    index: ins.operand,
                    pool_len,
                });
            }
            match ins.code {
                OpCode::Push | OpCode::LitPush | OpCode::PushM => depth += 1,
                OpCode::ConcatN => {
                    if depth < ins.operand {
                        return Err(ProgramError::StackUnderflow { at });
                    }
                    depth = depth - ins.operand + 1;
                }
                OpCode::Capture => {
                    if depth == 0 {
                        return Err(ProgramError::StackUnderflow { at });
                    }
                    depth -= 1;
                    captures += 1;
                }
                OpCode::Nop | OpCode::End => {
                    return Err(ProgramError::InvalidOpcode {
                        at,
                        raw: ins.code as i32,
                    });
                }
            }
            peak = peak.max(depth);
        }

        if captures != self.fields.len() {
            return Err(ProgramError::FieldCountMismatch {
                captures,
                fields: self.fields.len(),
            });
        }
        Ok(peak)
    }

    /// Bytecode format revision this program was built for
    #[inline]
    #[must_use]
    pub fn version(&self) -> i32 {
        self.version
    }

    /// Typed instruction sequence
    #[inline]
    #[must_use]
    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Flat `(opcode, operand)` interleaved form; always even length
    #[must_use]
    pub fn opcodes(&self) -> Vec<i32> {
        self.instructions
            .iter()
            .flat_map(|ins| [ins.code as i32, i32::try_from(ins.operand).unwrap_or(i32::MAX)])
            .collect()
    }

    /// Deduplicated string pool in slot order
    #[inline]
    #[must_use]
    pub fn pool(&self) -> &[Arc<str>] {
        &self.pool
    }

    /// Required verb, empty when the template has none
    #[inline]
    #[must_use]
    pub fn verb(&self) -> &str {
        &self.verb
    }

    /// Captured field paths in document order
    #[inline]
    #[must_use]
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Peak evaluation-stack depth reached by a successful run
    #[inline]
    #[must_use]
    pub fn max_stack_depth(&self) -> usize {
        self.max_stack
    }

    /// Human-readable listing, one instruction per line, pool operands resolved.
    #[must_use]
    pub fn disassemble(&self) -> String {
        let mut out = String::new();
        for (i, ins) in self.instructions.iter().enumerate() {
            let _ = match ins.code {
                OpCode::LitPush | OpCode::Capture => {
                    let text = self.pool.get(ins.operand).map_or("?", |s| s.as_ref());
                    writeln!(out, "{i:04} {:<8} {} ; {:?}", ins.code, ins.operand, text)
                }
                OpCode::ConcatN => writeln!(out, "{i:04} {:<8} {}", ins.code, ins.operand),
                _ => writeln!(out, "{i:04} {}", ins.code),
            };
        }
        out
    }
}

fn check_version(version: i32) -> Result<(), ProgramError> {
    if version != PROGRAM_VERSION {
        return Err(ProgramError::UnsupportedVersion {
            found: version,
            expected: PROGRAM_VERSION,
        });
    }
    Ok(())
}

/// Saturating stack profile for trusted compiler output
fn peak_depth(instructions: &[Instruction]) -> usize {
    let mut depth = 0usize;
    let mut peak = 0usize;
    for ins in instructions {
        match ins.code {
            OpCode::Push | OpCode::LitPush | OpCode::PushM => depth += 1,
            OpCode::ConcatN => depth = depth.saturating_sub(ins.operand) + 1,
            OpCode::Capture => depth = depth.saturating_sub(1),
            OpCode::Nop | OpCode::End => {}
        }
        peak = peak.max(depth);
    }
    peak
}
