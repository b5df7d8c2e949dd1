//! Decode subcommand
//!
//! Interpret the values of the result and done registers, as observed at the end of a
//! simulation. The exit code reflects the verdict so that the command can be used from scripts.

use std::process::ExitCode;

use bn_sum4_core::{Verdict, VECTORS};

use crate::DecodeArgs;

pub fn decode(args: &DecodeArgs) -> ExitCode {
    let verdict = Verdict::from_registers(args.result, args.done);
    match verdict {
        Verdict::Pass => log::info!("{}", verdict),
        Verdict::Fail { index } => {
            log::error!("{}", verdict);
            if let Some(vector) = VECTORS.get(index as usize) {
                log::error!(
                    "  acts 0x{:08x} wts 0x{:02x}, expected {}",
                    vector.activations,
                    vector.weights,
                    vector.expected()
                );
            } else {
                log::warn!("  vector {} does not exist", index);
            }
        }
        Verdict::Pending => log::warn!("{}", verdict),
        Verdict::Panicked | Verdict::Invalid(_) => log::error!("{}", verdict),
    }

    if verdict.is_pass() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

/// Parse a register value, either decimal or hexadecimal with a `0x` prefix.
pub fn parse_u32(value: &str) -> Result<u32, String> {
    let parsed = match value.strip_prefix("0x").or_else(|| value.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(&hex.replace('_', ""), 16),
        None => value.replace('_', "").parse(),
    };
    parsed.map_err(|err| format!("invalid register value '{}': {}", value, err))
}
