//! Fixed test vectors
//!
//! The vectors cover positive and negative lanes, the extreme byte values (-128 and 127), every
//! used weight code on every lane, and a set of lanes cancelling each others.

/// A pair of BN.SUM4 operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TestVector {
    /// Packed signed bytes, passed in `rs1`.
    pub activations: u32,
    /// Packed 2-bit weight codes, passed in `rs2`.
    pub weights: u32,
}

impl TestVector {
    pub const fn new(activations: u32, weights: u32) -> Self {
        TestVector {
            activations,
            weights,
        }
    }

    /// The value the hardware is expected to produce.
    pub const fn expected(&self) -> i32 {
        crate::reference::sum4(self.activations, self.weights)
    }
}

/// The vectors checked by the self-test, in order.
#[rustfmt::skip]
pub const VECTORS: [TestVector; 5] = [
    // acts [1, 2, 3, 4], weights [+1, +1, +1, +1]
    TestVector::new(0x04030201, 0x55),
    // acts [-1, -2, 7, 100], weights [+1, 0, -1, +1]
    TestVector::new(0x6407FEFF, 0x61),
    // acts [-128, 127, -5, 6], weights [-1, 0, +1, -1]
    TestVector::new(0x06FB7F80, 0x92),
    // acts [127, -1, -128, 0], weights [+1, -1, +1, 0]
    TestVector::new(0x0080FF7F, 0x19),
    // acts [-16, 85, 10, -91], weights [-1, +1, -1, -1]
    TestVector::new(0xA50A55F0, 0xA6),
];

#[cfg(test)]
mod tests {
    use super::*;
    use crate::packed::{Activations, WeightCode, Weights};

    #[test]
    fn expected_sums() {
        let sums: [i32; 5] = core::array::from_fn(|idx| VECTORS[idx].expected());
        assert_eq!(sums, [10, 92, 117, 0, 182]);
    }

    #[test]
    fn documented_lanes() {
        use WeightCode::*;

        let v = &VECTORS[1];
        assert_eq!(Activations(v.activations).lanes(), [-1, -2, 7, 100]);
        assert_eq!(Weights(v.weights).codes(), [Plus, Zero, Minus, Plus]);

        let v = &VECTORS[2];
        assert_eq!(Activations(v.activations).lanes(), [-128, 127, -5, 6]);
        assert_eq!(Weights(v.weights).codes(), [Minus, Zero, Plus, Minus]);
    }

    #[test]
    fn no_reserved_code() {
        for v in &VECTORS {
            assert!(
                !Weights(v.weights).codes().contains(&WeightCode::Reserved),
                "Vector {:#x} uses the reserved weight code",
                v.weights
            );
        }
    }
}
