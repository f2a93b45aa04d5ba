//! Instruction set definitions.
//!
//! This module covers everything the pipeline knows about instructions:
//! 1. **Opcodes:** The closed five-opcode set plus an `Unknown` catch-all.
//! 2. **Instruction records:** The decoded, mostly-immutable per-instruction state.
//! 3. **Operand resolution:** Text-line tokenization into instruction records.
//! 4. **Latencies:** The opcode-indexed execute-stage cycle table.

pub mod decode;
pub mod instruction;

pub use instruction::Instruction;

use std::fmt;

/// The closed opcode set of the simulated machine.
///
/// Dispatch is by enum variant rather than mnemonic string comparison, so
/// adding an opcode is a localized change (this variant list, the decode
/// positional table, and the execute engine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// Jump-and-link: relative jump, link register receives the target PC.
    Jal,
    /// Branch if the two source registers differ.
    Bne,
    /// Signed addition with wraparound.
    Add,
    /// Signed subtraction with wraparound.
    Sub,
    /// Exchange two registers.
    Swap,
    /// Anything unrecognized; executes as a PC increment only.
    Unknown,
}

impl Opcode {
    /// All real opcodes, in latency-table order. `Unknown` is excluded.
    pub const ALL: [Self; 5] = [Self::Jal, Self::Bne, Self::Add, Self::Sub, Self::Swap];

    /// Resolves a mnemonic token. Matching is exact: mnemonics are
    /// upper-case and lower-case spellings decode as `Unknown`.
    pub fn from_mnemonic(tok: &str) -> Self {
        match tok {
            "JAL" => Self::Jal,
            "BNE" => Self::Bne,
            "ADD" => Self::Add,
            "SUB" => Self::Sub,
            "SWAP" => Self::Swap,
            _ => Self::Unknown,
        }
    }

    /// The canonical mnemonic, `"???"` for `Unknown`.
    pub fn mnemonic(self) -> &'static str {
        match self {
            Self::Jal => "JAL",
            Self::Bne => "BNE",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Swap => "SWAP",
            Self::Unknown => "???",
        }
    }

    fn index(self) -> Option<usize> {
        Self::ALL.iter().position(|op| *op == self)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Execute-stage latency per opcode, in cycles.
///
/// Consulted exactly once per instruction, at the moment it is promoted from
/// Decode into the Execute slot. Every opcode defaults to a single cycle;
/// `Unknown` always takes one cycle and cannot be overridden.
#[derive(Debug, Clone)]
pub struct LatencyTable {
    cycles: [u64; Opcode::ALL.len()],
}

impl Default for LatencyTable {
    fn default() -> Self {
        Self {
            cycles: [1; Opcode::ALL.len()],
        }
    }
}

impl LatencyTable {
    /// Overrides the latency of one opcode. Zero is clamped to one cycle:
    /// an instruction always occupies the Execute slot for at least a cycle.
    pub fn set(&mut self, op: Opcode, cycles: u64) {
        if let Some(i) = op.index() {
            self.cycles[i] = cycles.max(1);
        }
    }

    /// Looks up the latency for an opcode.
    pub fn get(&self, op: Opcode) -> u64 {
        op.index().map_or(1, |i| self.cycles[i])
    }
}
