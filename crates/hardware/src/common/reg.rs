//! Per-core register file.
//!
//! This module provides the `RegisterFile` struct holding the 32 signed
//! architectural registers of one core. Unlike real RISC-V hardware, x0 is
//! not hardwired to zero: this model treats all 32 registers uniformly, and
//! seeds x3 with the owning core's id at construction.

use super::{CORE_ID_REG, NUM_REGS, Word};

/// The 32 general-purpose signed registers of one core.
#[derive(Debug, Clone)]
pub struct RegisterFile {
    regs: [Word; NUM_REGS],
}

impl RegisterFile {
    /// Creates a register file with every register zeroed except the core-id
    /// seed register (x3), which receives `core_id`.
    pub fn new(core_id: usize) -> Self {
        let mut regs = [0; NUM_REGS];
        regs[CORE_ID_REG] = core_id as Word;
        Self { regs }
    }

    /// Reads a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    ///
    /// # Panics
    ///
    /// Panics when `idx` is 32 or above. The operand resolver never
    /// produces such an index; see [`crate::isa::Instruction`].
    #[inline]
    pub fn read(&self, idx: usize) -> Word {
        self.regs[idx]
    }

    /// Writes a register.
    ///
    /// # Arguments
    ///
    /// * `idx` - Register index (0-31).
    /// * `val` - The word to store.
    ///
    /// # Panics
    ///
    /// Panics when `idx` is 32 or above. The operand resolver never
    /// produces such an index; see [`crate::isa::Instruction`].
    #[inline]
    pub fn write(&mut self, idx: usize, val: Word) {
        self.regs[idx] = val;
    }

    /// Exchanges the contents of two registers.
    ///
    /// # Panics
    ///
    /// Panics when either index is 32 or above.
    pub fn swap(&mut self, a: usize, b: usize) {
        self.regs.swap(a, b);
    }

    /// Returns a snapshot of all register values for final reporting.
    pub fn dump(&self) -> [Word; NUM_REGS] {
        self.regs
    }
}
