//! Execute engine: opcode semantics.
//!
//! Applies the semantic effect of one instruction to its core on the final
//! cycle of its Execute-slot residence. Source operands come from the
//! bypass network when the forwarding unit latched a value, otherwise from
//! the register file. Every opcode that does not explicitly steer the PC
//! falls through to the default `pc += 4`; JAL and BNE set the PC
//! themselves and skip the default increment.
//!
//! An instruction whose required operands resolved to no register has no
//! register effect and takes only the default increment.

use tracing::trace;

use crate::common::{WORD_BYTES, Word};
use crate::isa::Opcode;

use super::Core;
use super::pipeline::{DecodeEntry, RegWrite};

/// Applies one instruction to `core`.
///
/// # Returns
///
/// Every register write the instruction performed (two for SWAP, none for
/// branches and no-ops); latched into the Memory slot for the forwarding
/// network.
pub fn apply(core: &mut Core, entry: &DecodeEntry) -> Vec<RegWrite> {
    let inst = &entry.inst;
    let src1 = |core: &Core| operand(core, inst.rs1, entry.fwd1);
    let src2 = |core: &Core| operand(core, inst.rs2, entry.fwd2);

    let writes = match inst.op {
        Opcode::Jal => match inst.rd {
            Some(rd) => {
                // The link value is the post-jump PC, not the fall-through PC.
                core.pc = core.pc.wrapping_add(inst.imm);
                core.regs.write(rd, core.pc);
                vec![RegWrite {
                    reg: rd,
                    value: core.pc,
                }]
            }
            None => {
                core.pc = core.pc.wrapping_add(WORD_BYTES);
                Vec::new()
            }
        },
        Opcode::Bne => {
            if let (Some(rd), Some(_)) = (inst.rd, inst.rs1) {
                let taken = core.regs.read(rd) != src1(core).unwrap_or(0);
                let offset = if taken { inst.imm } else { WORD_BYTES };
                core.pc = core.pc.wrapping_add(offset);
            } else {
                core.pc = core.pc.wrapping_add(WORD_BYTES);
            }
            Vec::new()
        }
        Opcode::Add | Opcode::Sub => {
            let writes = match (inst.rd, src1(core), src2(core)) {
                (Some(rd), Some(a), Some(b)) => {
                    let v = if inst.op == Opcode::Add {
                        a.wrapping_add(b)
                    } else {
                        a.wrapping_sub(b)
                    };
                    core.regs.write(rd, v);
                    vec![RegWrite { reg: rd, value: v }]
                }
                _ => Vec::new(),
            };
            core.pc = core.pc.wrapping_add(WORD_BYTES);
            writes
        }
        Opcode::Swap => {
            let writes = match (inst.rs1, inst.rs2) {
                (Some(a), Some(b)) => {
                    core.regs.swap(a, b);
                    vec![
                        RegWrite {
                            reg: a,
                            value: core.regs.read(a),
                        },
                        RegWrite {
                            reg: b,
                            value: core.regs.read(b),
                        },
                    ]
                }
                _ => Vec::new(),
            };
            core.pc = core.pc.wrapping_add(WORD_BYTES);
            writes
        }
        Opcode::Unknown => {
            core.pc = core.pc.wrapping_add(WORD_BYTES);
            Vec::new()
        }
    };

    trace!(core = core.id, inst = %inst, pc = core.pc, "execute");
    writes
}

fn operand(core: &Core, rs: Option<usize>, fwd: Option<Word>) -> Option<Word> {
    fwd.or_else(|| rs.map(|r| core.regs.read(r)))
}
