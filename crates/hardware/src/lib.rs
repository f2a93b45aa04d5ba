//! Multi-core five-stage pipeline simulator library.
//!
//! This crate implements a lockstep multi-core pipeline simulator with the following:
//! 1. **Core:** Per-core register file, program counter, and five pipeline slots
//!    (fetch, decode, execute, memory, writeback).
//! 2. **Hazards:** RAW hazard detection with stall accounting, and an optional
//!    value-forwarding network that bypasses the register file.
//! 3. **ISA:** A five-opcode instruction set (JAL, BNE, ADD, SUB, SWAP) decoded
//!    from whitespace-separated text, with per-opcode execute latencies.
//! 4. **Memory:** A flat signed-word memory partitioned evenly across cores.
//! 5. **Simulation:** Program loader, configuration, and statistics collection.

/// Common scalar types, constants, and the register file.
pub mod common;
/// Simulator configuration (defaults and hierarchical config structures).
pub mod config;
/// Per-core state and the pipeline (slots, hazards, execute engine).
pub mod core;
/// Instruction set (opcodes, instruction records, operand resolution, latencies).
pub mod isa;
/// Shared memory with per-core partitions.
pub mod memory;
/// Program loading and the cycle-level scheduler.
pub mod sim;
/// Simulation statistics collection and reporting.
pub mod stats;

/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Top-level simulator; construct with `Simulator::new` and drive with `run`.
pub use crate::sim::simulator::Simulator;
