//! Encode subcommand
//!
//! Print the raw BN.SUM4 instruction for a given set of registers, for toolchains that do not
//! support the `.insn` directive.

use std::process::ExitCode;

use bn_sum4_core::insn::{self, parse_register, register_name, Operands};

use crate::EncodeArgs;

pub fn encode(args: &EncodeArgs) -> ExitCode {
    match operands(args) {
        Ok(ops) => {
            log::info!(
                ".insn r 0x{:02x}, {}, 0x{:02x}, {}, {}, {}",
                insn::OPCODE_CUSTOM_0,
                insn::BN_SUM4_FUNCT3,
                insn::BN_SUM4_FUNCT7,
                register_name(ops.rd),
                register_name(ops.rs1),
                register_name(ops.rs2)
            );
            log::info!(".word 0x{:08x}", insn::encode(ops));
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn operands(args: &EncodeArgs) -> Result<Operands, String> {
    let reg = |name: &str| {
        parse_register(name).ok_or_else(|| format!("invalid register '{}'", name))
    };
    Ok(Operands {
        rd: reg(&args.rd)?,
        rs1: reg(&args.rs1)?,
        rs2: reg(&args.rs2)?,
    })
}
