//! BN.SUM4 instruction encoding
//!
//! BN.SUM4 is an R-type instruction in the custom-0 major opcode:
//!
//! ```text
//! [ funct7 : 7 | rs2 : 5 | rs1 : 5 | funct3 : 3 | rd : 5 | opcode : 7 ]
//! [  0000000   |  wts    |  acts   |    000     |  sum   |  0001011   ]
//! ```
//!
//! In assembly this is `.insn r 0x0b, 0, 0x00, rd, rs1, rs2`.

/// The custom-0 major opcode.
pub const OPCODE_CUSTOM_0: u32 = 0b000_1011;
/// BN.SUM4 function selector.
pub const BN_SUM4_FUNCT3: u32 = 0b000;
/// BN.SUM4 sub-function.
pub const BN_SUM4_FUNCT7: u32 = 0b000_0000;

const OPCODE_MASK: u32 = 0x7f;
const REG_MASK: u32 = 0x1f;
const FUNCT3_MASK: u32 = 0x7;
const FUNCT7_MASK: u32 = 0x7f;

/// Number of general purpose registers.
pub const NB_REGISTERS: u32 = 32;

/// ABI names of the general purpose registers, indexed by register number.
const ABI_NAMES: [&str; NB_REGISTERS as usize] = [
    "zero", "ra", "sp", "gp", "tp", "t0", "t1", "t2", "s0", "s1", "a0", "a1", "a2", "a3", "a4",
    "a5", "a6", "a7", "s2", "s3", "s4", "s5", "s6", "s7", "s8", "s9", "s10", "s11", "t3", "t4",
    "t5", "t6",
];

// ———————————————————————————————— Encoding ———————————————————————————————— //

/// Make an R-type instruction.
///
/// Fields are truncated to their width.
pub const fn r_type(funct7: u32, rs2: u32, rs1: u32, funct3: u32, rd: u32, opcode: u32) -> u32 {
    (funct7 & FUNCT7_MASK) << 25
        | (rs2 & REG_MASK) << 20
        | (rs1 & REG_MASK) << 15
        | (funct3 & FUNCT3_MASK) << 12
        | (rd & REG_MASK) << 7
        | (opcode & OPCODE_MASK)
}

/// Encode `bn.sum4 rd, rs1, rs2`.
pub const fn encode(operands: Operands) -> u32 {
    r_type(
        BN_SUM4_FUNCT7,
        operands.rs2,
        operands.rs1,
        BN_SUM4_FUNCT3,
        operands.rd,
        OPCODE_CUSTOM_0,
    )
}

// ———————————————————————————————— Decoding ———————————————————————————————— //

/// Register operands of a BN.SUM4 instruction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Operands {
    /// Destination, receives the sum.
    pub rd: u32,
    /// Packed activations.
    pub rs1: u32,
    /// Packed weights.
    pub rs2: u32,
}

/// Decode a raw instruction, returning its operands if it is a BN.SUM4.
pub const fn decode(raw: u32) -> Option<Operands> {
    let opcode = raw & OPCODE_MASK;
    let funct3 = (raw >> 12) & FUNCT3_MASK;
    let funct7 = (raw >> 25) & FUNCT7_MASK;

    if opcode != OPCODE_CUSTOM_0 || funct3 != BN_SUM4_FUNCT3 || funct7 != BN_SUM4_FUNCT7 {
        return None;
    }

    Some(Operands {
        rd: (raw >> 7) & REG_MASK,
        rs1: (raw >> 15) & REG_MASK,
        rs2: (raw >> 20) & REG_MASK,
    })
}

// ———————————————————————————————— Registers ——————————————————————————————— //

/// Parse a register name, either as `xN` or as its ABI name (`a0`, `t1`, `fp`, ...).
pub fn parse_register(name: &str) -> Option<u32> {
    if name == "fp" {
        return Some(8);
    }
    if let Some(idx) = ABI_NAMES.iter().position(|abi| *abi == name) {
        return Some(idx as u32);
    }

    // Only canonical `xN` names, without sign nor leading zeros.
    let digits = name.strip_prefix('x')?;
    if digits.is_empty()
        || !digits.bytes().all(|b| b.is_ascii_digit())
        || (digits.len() > 1 && digits.starts_with('0'))
    {
        return None;
    }

    let idx: u32 = digits.parse().ok()?;
    (idx < NB_REGISTERS).then_some(idx)
}

/// Returns the ABI name of a register.
pub fn register_name(idx: u32) -> &'static str {
    ABI_NAMES[(idx & REG_MASK) as usize]
}

// ————————————————————————————————— Tests —————————————————————————————————— //
