use serde::{Deserialize, Serialize};
use std::fmt;

/// Bytecode format revision. Bump on any change to opcode numbering or semantics.
pub const PROGRAM_VERSION: i32 = 1;

/// Matcher opcodes.
///
/// The numeric values are part of the flat program form and must not change
/// without bumping [`PROGRAM_VERSION`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum OpCode {
    /// Reserved, never emitted
    Nop = 0,
    /// Consume one component and push it
    Push = 1,
    /// Consume one component equal to `pool[operand]` and push it
    LitPush = 2,
    /// Consume every remaining component, push them joined by `/`
    PushM = 3,
    /// Pop `operand` values, push them joined by `/`
    ConcatN = 4,
    /// Pop one value and bind it to `pool[operand]`
    Capture = 5,
    /// Sentinel: the lowest invalid opcode, never emitted
    End = 6,
}

impl OpCode {
    /// Decode a raw opcode. Only the live opcodes (`Push..=Capture`) decode.
    #[must_use]
    pub fn from_raw(raw: i32) -> Option<Self> {
        if raw <= OpCode::Nop as i32 || raw >= OpCode::End as i32 {
            return None;
        }
        Some(match raw {
            1 => OpCode::Push,
            2 => OpCode::LitPush,
            3 => OpCode::PushM,
            4 => OpCode::ConcatN,
            _ => OpCode::Capture,
        })
    }

    /// Mnemonic used in disassembly
    #[must_use]
    pub fn mnemonic(self) -> &'static str {
        match self {
            OpCode::Nop => "nop",
            OpCode::Push => "push",
            OpCode::LitPush => "litpush",
            OpCode::PushM => "pushm",
            OpCode::ConcatN => "concatn",
            OpCode::Capture => "capture",
            OpCode::End => "end",
        }
    }

    /// Whether the operand indexes the string pool
    #[inline]
    #[must_use]
    pub fn uses_pool(self) -> bool {
        matches!(self, OpCode::LitPush | OpCode::Capture)
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.mnemonic())
    }
}

/// One `(opcode, operand)` pair.
///
/// `Push` and `PushM` carry a filler operand of 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instruction {
    /// Operation to execute
    pub code: OpCode,
    /// Pool index for `LitPush`/`Capture`, count for `ConcatN`, 0 otherwise
    pub operand: usize,
}

impl Instruction {
    /// Build an instruction
    #[inline]
    #[must_use]
    pub const fn new(code: OpCode, operand: usize) -> Self {
        Self { code, operand }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.code, self.operand)
    }
}
