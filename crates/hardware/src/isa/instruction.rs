//! Decoded instruction records.

use std::fmt;

use crate::common::Word;

use super::Opcode;

/// One decoded instruction, immutable once it leaves the operand resolver.
///
/// Register operands are `None` when the source text named no register or a
/// malformed/out-of-range one; an instruction whose required operands are
/// `None` executes as a PC increment only. A `Some` index is always in
/// `[0, 31]` — the operand resolver never produces one outside that range,
/// and the register file panics on one. Hand-built records must uphold this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    /// Operation to perform.
    pub op: Opcode,
    /// Destination register, where the opcode has one.
    pub rd: Option<usize>,
    /// First source register.
    pub rs1: Option<usize>,
    /// Second source register.
    pub rs2: Option<usize>,
    /// Immediate value; 0 when absent or unparseable.
    pub imm: Word,
    /// Id of the core that fetched this instruction.
    pub core: usize,
    /// Program counter value at which the instruction was fetched, before
    /// the eager fetch-time increment. Kept for tracing.
    pub fetch_pc: Word,
}

impl Instruction {
    /// Whether this instruction writes `reg` when it executes.
    ///
    /// Covers both the `rd` path and SWAP, which rewrites its two source
    /// registers instead of a destination.
    pub fn writes_register(&self, reg: usize) -> bool {
        match self.op {
            Opcode::Swap => self.rs1 == Some(reg) || self.rs2 == Some(reg),
            _ => self.rd == Some(reg),
        }
    }
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reg = |r: Option<usize>| r.map_or_else(|| "x?".to_string(), |i| format!("x{i}"));
        match self.op {
            Opcode::Jal => write!(f, "JAL {} {}", reg(self.rd), self.imm),
            Opcode::Bne => write!(f, "BNE {} {} {}", reg(self.rd), reg(self.rs1), self.imm),
            Opcode::Add | Opcode::Sub => write!(
                f,
                "{} {} {} {}",
                self.op,
                reg(self.rd),
                reg(self.rs1),
                reg(self.rs2)
            ),
            Opcode::Swap => write!(f, "SWAP {} {}", reg(self.rs1), reg(self.rs2)),
            Opcode::Unknown => f.write_str("???"),
        }
    }
}
