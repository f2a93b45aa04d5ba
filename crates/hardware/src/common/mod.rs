//! Common scalar types and architectural constants.
//!
//! This module defines the shared vocabulary of the simulator. It provides:
//! 1. **Word type:** The signed machine word used for registers, memory, and the PC.
//! 2. **Constants:** Register count, word size, and the core-id seed register.
//! 3. **Register file:** Per-core architectural register storage.

pub mod reg;

pub use reg::RegisterFile;

/// The machine word: every register, memory cell, and program counter value.
///
/// Arithmetic on words wraps on overflow; there is no trap for signed overflow.
pub type Word = i32;

/// Number of architectural registers per core.
pub const NUM_REGS: usize = 32;

/// Size of one word in bytes; the PC advances by this much per fetch.
pub const WORD_BYTES: Word = 4;

/// Register pre-seeded with the owning core's id at construction.
///
/// A simulation convenience, not an ISA rule: programs can branch on x3 to
/// diverge per core while sharing one instruction stream.
pub const CORE_ID_REG: usize = 3;
