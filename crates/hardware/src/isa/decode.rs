//! Operand resolution: raw program text to instruction records.
//!
//! One line of program text holds up to four whitespace-separated fields:
//! the mnemonic and up to three arguments. Which argument supplies which
//! operand is opcode-positional (JAL takes its immediate from the second
//! field, BNE from the third), and that convention is load-bearing for the
//! simulated control flow.
//!
//! Nothing here can fail: a malformed register token resolves to no
//! register, a malformed immediate resolves to zero, and an unrecognized
//! mnemonic decodes as `Opcode::Unknown`.

use crate::common::{NUM_REGS, Word};

use super::{Instruction, Opcode};

/// Resolves a register token of the form `x<n>`.
///
/// Returns `Some(n)` only for `n` in `[0, 31]`; any other shape (missing
/// prefix, non-numeric suffix, out of range) silently resolves to `None`.
pub fn register_index(tok: &str) -> Option<usize> {
    let digits = tok.strip_prefix('x')?;
    match digits.parse::<usize>() {
        Ok(n) if n < NUM_REGS => Some(n),
        _ => None,
    }
}

/// Parses an immediate token.
///
/// Base selection: `0x`/`0X` prefix (with at least one digit after it) is
/// hexadecimal, `0b`/`0B` is binary, anything else decimal. A token that
/// fails to parse under its selected base resolves to 0.
pub fn immediate(tok: &str) -> Word {
    let bytes = tok.as_bytes();
    if bytes.first() == Some(&b'0') && bytes.len() > 2 {
        match bytes[1] {
            b'x' | b'X' => return Word::from_str_radix(&tok[2..], 16).unwrap_or(0),
            b'b' | b'B' => return Word::from_str_radix(&tok[2..], 2).unwrap_or(0),
            _ => {}
        }
    }
    tok.parse::<Word>().unwrap_or(0)
}

/// Decodes one line of program text into an instruction record.
///
/// # Arguments
///
/// * `line` - The raw instruction text, `OPCODE ARG1 [ARG2 [ARG3]]`.
/// * `core` - Id of the fetching core.
/// * `fetch_pc` - The core's PC at fetch time, before the eager increment.
pub fn decode_line(line: &str, core: usize, fetch_pc: Word) -> Instruction {
    let mut fields = line.split_whitespace();
    let op = Opcode::from_mnemonic(fields.next().unwrap_or(""));
    let arg1 = fields.next();
    let arg2 = fields.next();
    let arg3 = fields.next();

    let reg = |tok: Option<&str>| tok.and_then(register_index);
    let imm = |tok: Option<&str>| tok.map_or(0, immediate);

    let (rd, rs1, rs2, imm) = match op {
        Opcode::Jal => (reg(arg1), None, None, imm(arg2)),
        Opcode::Bne => (reg(arg1), reg(arg2), None, imm(arg3)),
        Opcode::Add | Opcode::Sub => (reg(arg1), reg(arg2), reg(arg3), 0),
        Opcode::Swap => (None, reg(arg1), reg(arg2), 0),
        Opcode::Unknown => (None, None, None, 0),
    };

    Instruction {
        op,
        rd,
        rs1,
        rs2,
        imm,
        core,
        fetch_pc,
    }
}
