//! Pipeline slots.
//!
//! Five slots per core, one per stage. Each holds at most one in-flight
//! instruction; a slot empties when its contents are promoted to the next
//! stage (or retired at Writeback). The Execute slot additionally carries
//! the remaining-latency countdown, and the Memory/Writeback slots carry
//! the register writes the instruction performed, which feed the bypass
//! network.

pub mod hazards;

use crate::common::Word;
use crate::isa::Instruction;

/// Decode-slot entry: the instruction plus any operand values supplied by
/// the forwarding network instead of the register file.
#[derive(Debug, Clone)]
pub struct DecodeEntry {
    /// The decoded instruction.
    pub inst: Instruction,
    /// Bypass value for `rs1`, when a downstream producer supplied one.
    pub fwd1: Option<Word>,
    /// Bypass value for `rs2`, when a downstream producer supplied one.
    pub fwd2: Option<Word>,
}

impl DecodeEntry {
    /// Wraps a freshly fetched instruction with no forwarded operands.
    pub fn new(inst: Instruction) -> Self {
        Self {
            inst,
            fwd1: None,
            fwd2: None,
        }
    }
}

/// Execute-slot entry: a decode entry plus the latency countdown.
#[derive(Debug, Clone)]
pub struct ExecuteEntry {
    /// The instruction and its resolved bypass operands.
    pub entry: DecodeEntry,
    /// Cycles left in the Execute slot; the semantic effect is applied on
    /// the cycle this reaches 1.
    pub remaining: u64,
}

/// One architectural register write performed at Execute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegWrite {
    /// The register written.
    pub reg: usize,
    /// The value it now holds.
    pub value: Word,
}

/// Memory/Writeback-slot entry: an executed instruction passing through.
#[derive(Debug, Clone)]
pub struct CommitEntry {
    /// The executed instruction.
    pub inst: Instruction,
    /// Every register write the instruction performed; empty for branches
    /// and no-ops, two entries for SWAP. This is what the forwarding unit
    /// hands to younger consumers.
    pub writes: Vec<RegWrite>,
}

/// The five pipeline slots of one core.
#[derive(Debug, Default)]
pub struct PipelineRegs {
    /// Fetched, not yet decoded against hazards.
    pub fetch: Option<Instruction>,
    /// Waiting to enter Execute.
    pub decode: Option<DecodeEntry>,
    /// Executing, counting down latency.
    pub execute: Option<ExecuteEntry>,
    /// Architectural placeholder; passes through unchanged.
    pub memory: Option<CommitEntry>,
    /// About to retire.
    pub writeback: Option<CommitEntry>,
}

impl PipelineRegs {
    /// True while any slot holds an instruction.
    pub fn occupied(&self) -> bool {
        self.fetch.is_some()
            || self.decode.is_some()
            || self.execute.is_some()
            || self.memory.is_some()
            || self.writeback.is_some()
    }
}
