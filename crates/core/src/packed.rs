//! Packed operands
//!
//! Both BN.SUM4 operands are 32-bit words holding four lanes, lane 0 being stored in the least
//! significant bits:
//!
//! ```text
//! activations: [ lane 3 : 8 | lane 2 : 8 | lane 1 : 8 | lane 0 : 8 ]   (signed bytes)
//! weights:     [ ignored : 24 | w3 : 2 | w2 : 2 | w1 : 2 | w0 : 2 ]    (2-bit codes)
//! ```

use core::fmt;

/// Number of lanes in a BN.SUM4 operand.
pub const NB_LANES: usize = 4;

/// Width of a weight code, in bits.
const WEIGHT_CODE_BITS: usize = 2;
const WEIGHT_CODE_MASK: u32 = 0b11;

// ———————————————————————————— Activation Lanes ———————————————————————————— //

/// Four signed 8-bit activations packed into a word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Activations(pub u32);

impl Activations {
    /// Returns the signed value of the given lane.
    ///
    /// Panics if `lane` is not in `0..NB_LANES`.
    pub const fn lane(self, lane: usize) -> i8 {
        assert!(lane < NB_LANES, "Invalid activation lane");
        (self.0 >> (8 * lane)) as u8 as i8
    }

    pub const fn lanes(self) -> [i8; NB_LANES] {
        [self.lane(0), self.lane(1), self.lane(2), self.lane(3)]
    }

    /// Pack four signed bytes, lane 0 first.
    pub const fn pack(lanes: [i8; NB_LANES]) -> Self {
        let mut word = 0;
        let mut idx = 0;
        while idx < NB_LANES {
            word |= (lanes[idx] as u8 as u32) << (8 * idx);
            idx += 1;
        }
        Activations(word)
    }
}

// —————————————————————————————— Weight Codes —————————————————————————————— //

/// A 2-bit weight code.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum WeightCode {
    /// `00`: the lane is excluded from the sum.
    Zero = 0b00,
    /// `01`: the lane is added.
    Plus = 0b01,
    /// `10`: the lane is subtracted.
    Minus = 0b10,
    /// `11`: never produced by the test vectors, contributes nothing.
    Reserved = 0b11,
}

impl WeightCode {
    /// Build a code from the two least significant bits, higher bits are ignored.
    pub const fn from_bits(bits: u32) -> Self {
        match bits & WEIGHT_CODE_MASK {
            0b00 => WeightCode::Zero,
            0b01 => WeightCode::Plus,
            0b10 => WeightCode::Minus,
            _ => WeightCode::Reserved,
        }
    }

    /// The multiplier applied to the lane.
    pub const fn sign(self) -> i32 {
        match self {
            WeightCode::Plus => 1,
            WeightCode::Minus => -1,
            WeightCode::Zero | WeightCode::Reserved => 0,
        }
    }
}

impl fmt::Display for WeightCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let repr = match self {
            WeightCode::Zero => "0",
            WeightCode::Plus => "+1",
            WeightCode::Minus => "-1",
            WeightCode::Reserved => "r",
        };
        f.pad(repr)
    }
}

/// Four 2-bit weight codes packed into the low byte of a word.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Weights(pub u32);

impl Weights {
    /// Returns the code of the given lane.
    ///
    /// Panics if `lane` is not in `0..NB_LANES`.
    pub const fn code(self, lane: usize) -> WeightCode {
        assert!(lane < NB_LANES, "Invalid weight lane");
        WeightCode::from_bits(self.0 >> (WEIGHT_CODE_BITS * lane))
    }

    pub const fn codes(self) -> [WeightCode; NB_LANES] {
        [self.code(0), self.code(1), self.code(2), self.code(3)]
    }

    /// Pack four codes, lane 0 in bits [1:0].
    pub const fn pack(codes: [WeightCode; NB_LANES]) -> Self {
        let mut word = 0;
        let mut idx = 0;
        while idx < NB_LANES {
            word |= (codes[idx] as u32) << (WEIGHT_CODE_BITS * idx);
            idx += 1;
        }
        Weights(word)
    }
}

// ————————————————————————————————— Tests —————————————————————————————————— //

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn activation_lanes() {
        assert_eq!(Activations(0x04030201).lanes(), [1, 2, 3, 4]);
        assert_eq!(Activations(0x6407FEFF).lanes(), [-1, -2, 7, 100]);
        assert_eq!(Activations(0x06FB7F80).lanes(), [-128, 127, -5, 6]);
        assert_eq!(Activations(0x0080FF7F).lanes(), [127, -1, -128, 0]);
        assert_eq!(Activations(0xA50A55F0).lanes(), [-16, 85, 10, -91]);
    }

    #[test]
    fn weight_codes() {
        use WeightCode::*;

        assert_eq!(Weights(0x55).codes(), [Plus, Plus, Plus, Plus]);
        assert_eq!(Weights(0x61).codes(), [Plus, Zero, Minus, Plus]);
        assert_eq!(Weights(0x92).codes(), [Minus, Zero, Plus, Minus]);
        assert_eq!(Weights(0x19).codes(), [Plus, Minus, Plus, Zero]);
        assert_eq!(Weights(0xA6).codes(), [Minus, Plus, Minus, Minus]);
        assert_eq!(Weights(0xFF).codes(), [Reserved; NB_LANES]);
    }

    #[test]
    fn upper_weight_bits_are_ignored() {
        assert_eq!(Weights(0xFFFF_FF00).codes(), [WeightCode::Zero; NB_LANES]);
        assert_eq!(Weights(0x1234_5655).codes(), Weights(0x55).codes());
    }

    #[test]
    fn every_code_decodes() {
        for bits in 0..16 {
            let code = WeightCode::from_bits(bits);
            assert_eq!(code as u32, bits & 0b11, "Wrong code for {:#b}", bits);
        }
        assert_eq!(WeightCode::Zero.sign(), 0);
        assert_eq!(WeightCode::Plus.sign(), 1);
        assert_eq!(WeightCode::Minus.sign(), -1);
        assert_eq!(WeightCode::Reserved.sign(), 0);
    }

    #[test]
    fn pack() {
        assert_eq!(Activations::pack([-16, 85, 10, -91]), Activations(0xA50A55F0));
        assert_eq!(
            Weights::pack([
                WeightCode::Minus,
                WeightCode::Plus,
                WeightCode::Zero,
                WeightCode::Minus
            ]),
            Weights(0x86)
        );
        assert_eq!(
            Weights::pack([
                WeightCode::Minus,
                WeightCode::Zero,
                WeightCode::Plus,
                WeightCode::Minus
            ]),
            Weights(0x92)
        );
    }
}
