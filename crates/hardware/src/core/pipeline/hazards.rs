//! Data hazard detection and operand forwarding.
//!
//! Both units inspect the instruction sitting in Decode against the
//! occupants of Execute, Memory, and Writeback, in that order (most recent
//! producer first). With forwarding disabled the hazard unit requests a
//! stall; with forwarding enabled the forwarding unit latches the producer's
//! actual register writes into the decode entry so the consumer never reads
//! a stale value. Hazard detection matches producers by `rd`; forwarding
//! matches them by the writes they performed, so SWAP (which has no `rd`)
//! still supersedes an older producer of the same register. Only
//! `rs1`/`rs2` participate as consumers; BNE's use of `rd` as a comparison
//! source is not hazard-checked.

use crate::common::Word;

use super::{CommitEntry, DecodeEntry, ExecuteEntry};

/// Checks whether the Decode-slot instruction has a RAW dependency on any
/// downstream stage. Called only when forwarding is disabled.
///
/// # Arguments
///
/// * `entry` - The Decode-slot occupant.
/// * `execute`, `memory`, `writeback` - The three downstream slots.
///
/// # Returns
///
/// `true` when `rs1` or `rs2` matches the destination register of any
/// downstream occupant. The caller records the stall.
pub fn raw_hazard(
    entry: &DecodeEntry,
    execute: Option<&ExecuteEntry>,
    memory: Option<&CommitEntry>,
    writeback: Option<&CommitEntry>,
) -> bool {
    let downstream_rd = [
        execute.and_then(|e| e.entry.inst.rd),
        memory.and_then(|c| c.inst.rd),
        writeback.and_then(|c| c.inst.rd),
    ];

    downstream_rd
        .into_iter()
        .flatten()
        .any(|rd| entry.inst.rs1 == Some(rd) || entry.inst.rs2 == Some(rd))
}

/// Resolves the decode entry's operands against the bypass network.
///
/// Priority is Execute, then Memory, then Writeback: the most recent
/// producer wins. An Execute-stage producer has not computed its value yet,
/// so the operand is left on the register-file path; the producer writes the
/// register file before the consumer can itself reach Execute, so that path
/// still observes the freshest value. Memory/Writeback producers hand over
/// the register writes latched when they executed, which makes SWAP a
/// first-class producer of both its registers.
pub fn resolve_forwards(
    entry: &mut DecodeEntry,
    execute: Option<&ExecuteEntry>,
    memory: Option<&CommitEntry>,
    writeback: Option<&CommitEntry>,
) {
    entry.fwd1 = forward_operand(entry.inst.rs1, execute, memory, writeback);
    entry.fwd2 = forward_operand(entry.inst.rs2, execute, memory, writeback);
}

fn forward_operand(
    rs: Option<usize>,
    execute: Option<&ExecuteEntry>,
    memory: Option<&CommitEntry>,
    writeback: Option<&CommitEntry>,
) -> Option<Word> {
    let rs = rs?;
    if execute.is_some_and(|e| e.entry.inst.writes_register(rs)) {
        // In-flight producer; defer to the register file it will write.
        return None;
    }
    bypass_from(memory, rs).or_else(|| bypass_from(writeback, rs))
}

fn bypass_from(slot: Option<&CommitEntry>, rs: usize) -> Option<Word> {
    slot?.writes.iter().find(|w| w.reg == rs).map(|w| w.value)
}
