//! Software reference of BN.SUM4
//!
//! Bit-exact model of the hardware: it is what the self-test compares the instruction against,
//! so it must never depend on the extension itself.

use crate::packed::{Activations, WeightCode, Weights, NB_LANES};

/// Compute BN.SUM4 in software.
///
/// Each activation lane is sign-extended to 32 bits, then added if its weight code is `01`,
/// subtracted if it is `10`, and ignored otherwise. The sum lies in `-512..=512` and can not
/// overflow.
pub const fn sum4(activations: u32, weights: u32) -> i32 {
    let activations = Activations(activations);
    let weights = Weights(weights);

    let mut sum: i32 = 0;
    let mut lane = 0;
    while lane < NB_LANES {
        sum += contribution(activations.lane(lane), weights.code(lane));
        lane += 1;
    }
    sum
}

/// The contribution of a single lane to the sum.
pub const fn contribution(activation: i8, code: WeightCode) -> i32 {
    // NOTE: the reserved code `11` is assumed to behave like `00`, the test vectors never
    // exercise it on hardware.
    code.sign() * activation as i32
}

/// Per-lane contributions, lane 0 first.
pub const fn contributions(activations: u32, weights: u32) -> [i32; NB_LANES] {
    let activations = Activations(activations);
    let weights = Weights(weights);

    let mut res = [0; NB_LANES];
    let mut lane = 0;
    while lane < NB_LANES {
        res[lane] = contribution(activations.lane(lane), weights.code(lane));
        lane += 1;
    }
    res
}

// ————————————————————————————————— Tests —————————————————————————————————— //
