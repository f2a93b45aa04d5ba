//! Hazard-detection and forwarding-unit tests.
//!
//! The units are exercised in isolation with hand-built slot occupants so
//! each downstream stage and each priority rule gets its own case.

use pretty_assertions::assert_eq;

use mcsim_core::core::pipeline::hazards::{raw_hazard, resolve_forwards};
use mcsim_core::core::pipeline::{CommitEntry, DecodeEntry, ExecuteEntry, RegWrite};
use mcsim_core::isa::{Instruction, Opcode};

fn inst(op: Opcode, rd: Option<usize>, rs1: Option<usize>, rs2: Option<usize>) -> Instruction {
    Instruction {
        op,
        rd,
        rs1,
        rs2,
        imm: 0,
        core: 0,
        fetch_pc: 0,
    }
}

fn consumer(rs1: usize, rs2: usize) -> DecodeEntry {
    DecodeEntry::new(inst(Opcode::Add, Some(10), Some(rs1), Some(rs2)))
}

fn executing(rd: usize) -> ExecuteEntry {
    ExecuteEntry {
        entry: DecodeEntry::new(inst(Opcode::Add, Some(rd), Some(1), Some(2))),
        remaining: 1,
    }
}

fn committing(rd: usize, result: i32) -> CommitEntry {
    CommitEntry {
        inst: inst(Opcode::Add, Some(rd), Some(1), Some(2)),
        writes: vec![RegWrite {
            reg: rd,
            value: result,
        }],
    }
}

fn committed_swap(a: usize, va: i32, b: usize, vb: i32) -> CommitEntry {
    CommitEntry {
        inst: inst(Opcode::Swap, None, Some(a), Some(b)),
        writes: vec![
            RegWrite { reg: a, value: va },
            RegWrite { reg: b, value: vb },
        ],
    }
}

#[test]
fn no_downstream_occupants_is_hazard_free() {
    assert!(!raw_hazard(&consumer(4, 5), None, None, None));
}

#[test]
fn execute_stage_producer_is_a_hazard() {
    let ex = executing(4);
    assert!(raw_hazard(&consumer(4, 5), Some(&ex), None, None));
}

#[test]
fn memory_stage_producer_is_a_hazard() {
    let mem = committing(5, 0);
    assert!(raw_hazard(&consumer(4, 5), None, Some(&mem), None));
}

#[test]
fn writeback_stage_producer_is_a_hazard() {
    let wb = committing(4, 0);
    assert!(raw_hazard(&consumer(4, 5), None, None, Some(&wb)));
}

#[test]
fn unrelated_destinations_do_not_stall() {
    let ex = executing(20);
    let mem = committing(21, 0);
    let wb = committing(22, 0);
    assert!(!raw_hazard(&consumer(4, 5), Some(&ex), Some(&mem), Some(&wb)));
}

/// A producer with no destination register (e.g. SWAP) never raises a hazard
/// on the `rd` path.
#[test]
fn producer_without_destination_is_ignored() {
    let mem = committed_swap(4, 0, 5, 0);
    assert!(!raw_hazard(&consumer(4, 5), None, Some(&mem), None));
}

#[test]
fn memory_producer_forwards_its_result() {
    let mut entry = consumer(4, 5);
    let mem = committing(4, 42);
    resolve_forwards(&mut entry, None, Some(&mem), None);
    assert_eq!(entry.fwd1, Some(42));
    assert_eq!(entry.fwd2, None);
}

#[test]
fn writeback_producer_forwards_its_result() {
    let mut entry = consumer(4, 5);
    let wb = committing(5, 7);
    resolve_forwards(&mut entry, None, None, Some(&wb));
    assert_eq!(entry.fwd1, None);
    assert_eq!(entry.fwd2, Some(7));
}

/// When Memory and Writeback both hold producers of the same register, the
/// younger (Memory-stage) result wins.
#[test]
fn memory_takes_priority_over_writeback() {
    let mut entry = consumer(4, 4);
    let mem = committing(4, 100);
    let wb = committing(4, 1);
    resolve_forwards(&mut entry, None, Some(&mem), Some(&wb));
    assert_eq!(entry.fwd1, Some(100));
    assert_eq!(entry.fwd2, Some(100));
}

/// An Execute-stage producer has no result yet; the operand stays on the
/// register-file path even when an older producer sits further downstream.
#[test]
fn execute_producer_defers_to_register_file() {
    let mut entry = consumer(4, 5);
    let ex = executing(4);
    let wb = committing(4, 9);
    resolve_forwards(&mut entry, Some(&ex), None, Some(&wb));
    assert_eq!(entry.fwd1, None);
}

/// SWAP writes both of its registers, so either one is forwardable from the
/// Memory slot.
#[test]
fn swap_forwards_both_of_its_registers() {
    let mut entry = consumer(4, 6);
    let mem = committed_swap(4, 10, 6, 32);
    resolve_forwards(&mut entry, None, Some(&mem), None);
    assert_eq!(entry.fwd1, Some(10));
    assert_eq!(entry.fwd2, Some(32));
}

/// A SWAP in Memory supersedes an older producer of the same register in
/// Writeback: the consumer must see the post-swap value, not the older
/// result.
#[test]
fn swap_supersedes_older_producer() {
    let mut entry = consumer(4, 5);
    let mem = committed_swap(4, 0, 6, 2);
    let wb = committing(4, 2);
    resolve_forwards(&mut entry, None, Some(&mem), Some(&wb));
    assert_eq!(entry.fwd1, Some(0));
}

/// A SWAP still in Execute will rewrite the consumer's source register, so
/// no older downstream value may be forwarded past it.
#[test]
fn in_flight_swap_blocks_older_forward() {
    let mut entry = consumer(4, 5);
    let ex = ExecuteEntry {
        entry: DecodeEntry::new(inst(Opcode::Swap, None, Some(4), Some(6))),
        remaining: 1,
    };
    let wb = committing(4, 2);
    resolve_forwards(&mut entry, Some(&ex), None, Some(&wb));
    assert_eq!(entry.fwd1, None, "register file wins once the swap lands");
}

/// Both operands resolve independently: one from the bypass network, one
/// from the register file.
#[test]
fn operands_resolve_independently() {
    let mut entry = consumer(4, 5);
    let mem = committing(4, 11);
    resolve_forwards(&mut entry, None, Some(&mem), None);
    assert_eq!(entry.fwd1, Some(11));
    assert_eq!(entry.fwd2, None);
}
