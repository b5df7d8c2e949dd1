//! BN.SUM4 core definitions
//!
//! BN.SUM4 is a custom RISC-V instruction living in the custom-0 opcode space. It takes four
//! signed 8-bit activations packed in `rs1` and four 2-bit weight codes packed in `rs2`, and
//! writes the signed sum of the activations selected (and possibly negated) by the weights to
//! `rd`.
//!
//! This crate holds everything about the instruction that does not require running on the
//! hardware: the packed operand layout, a software reference, the instruction encoding, the
//! report codes and the self-test driver itself. As a consequence it can be used both from the
//! firmware and from host tooling, and it is unit-tested on the host.

#![no_std]

pub mod insn;
pub mod packed;
pub mod reference;
pub mod report;
pub mod selftest;
pub mod vectors;

pub use reference::sum4;
pub use report::{TestRegisters, Verdict};
pub use selftest::{SelfTestError, Sum4Unit};
pub use vectors::{TestVector, VECTORS};
