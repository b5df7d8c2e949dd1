//! Vectors subcommand
//!
//! Print the self-test vectors along with their decoded lanes and the reference results, which
//! is handy when looking at a waveform of the hardware.

use std::process::ExitCode;

use bn_sum4_core::packed::{Activations, Weights};
use bn_sum4_core::report::failure_code;
use bn_sum4_core::{reference, TestVector, VECTORS};

pub fn print_vectors() -> ExitCode {
    log::info!(
        "{:<4}{:<13}{:<23}{:<8}{:<20}{:<8}fail code",
        "idx",
        "acts",
        "lanes",
        "wts",
        "codes",
        "sum"
    );
    for (idx, vector) in VECTORS.iter().enumerate() {
        log::info!("{}", format_vector(idx, vector));
        log::debug!(
            "    contributions: {:?}",
            reference::contributions(vector.activations, vector.weights)
        );
    }

    ExitCode::SUCCESS
}

fn format_vector(idx: usize, vector: &TestVector) -> String {
    let lanes = Activations(vector.activations)
        .lanes()
        .map(|lane| format!("{:>4}", lane))
        .join(",");
    let codes = Weights(vector.weights)
        .codes()
        .map(|code| format!("{:>2}", code))
        .join(", ");

    format!(
        "{:<4}0x{:08x}   [{}]  0x{:02x}    [{}]  {:<8}0x{:08x}",
        idx,
        vector.activations,
        lanes,
        vector.weights,
        codes,
        vector.expected(),
        failure_code(idx)
    )
}
