//! Per-core architectural state and the pipeline.
//!
//! Each simulated core owns its register file, program counter, and five
//! pipeline slots; cores share nothing but the read-only program text and
//! their private partition of the memory array.

pub mod execute;
pub mod pipeline;

use crate::common::{RegisterFile, Word};

/// One simulated processor core.
#[derive(Debug)]
pub struct Core {
    /// Stable numeric identifier, also the memory-partition index.
    pub id: usize,
    /// Architectural registers; x3 is seeded with `id`.
    pub regs: RegisterFile,
    /// Byte-addressed program counter (word size 4). Advanced eagerly by 4
    /// at fetch time, and again (or overwritten) by the execute engine.
    pub pc: Word,
    /// Data-hazard stall flag; only meaningful within the current cycle.
    pub stalled: bool,
    /// Index of the next unread program line. Fetch is sequential over the
    /// shared text; the PC is architectural state, not the fetch cursor.
    pub next_line: usize,
}

impl Core {
    /// Creates a core with PC 0, an empty pipeline, and a seeded register file.
    pub fn new(id: usize) -> Self {
        Self {
            id,
            regs: RegisterFile::new(id),
            pc: 0,
            stalled: false,
            next_line: 0,
        }
    }
}
